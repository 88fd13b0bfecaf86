#![forbid(unsafe_code)]

//! Attack-path semantic model (headless).
//!
//! Design goals:
//! - total, never-throw normalization of loosely-typed feed JSON
//! - deterministic, testable outputs
//! - no I/O: the feed/API layer is an external collaborator

pub mod attack_path;
pub mod error;
pub mod finding;

pub use attack_path::{AttackPath, PathEdge, PathNode, normalize};
pub use error::{Error, Result};
pub use finding::{Finding, FindingsDocument, Severity, safe_id};
