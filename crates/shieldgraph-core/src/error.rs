pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no finding matches id: {id}")]
    FindingNotFound { id: String },

    #[error("findings document contains no findings")]
    EmptyFeed,
}
