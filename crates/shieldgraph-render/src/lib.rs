#![forbid(unsafe_code)]

//! Headless layout + SVG renderer for attack-path graphs.
//!
//! The pipeline is synchronous and total: normalize (in
//! `shieldgraph-core`) → depth assignment → layer/position layout → SVG
//! frame. Interaction state (selection, pan, zoom) lives in [`GraphView`]
//! and is rebuilt from scratch on every render call.

pub mod depth;
pub mod layout;
pub mod model;
pub mod svg;
pub mod view;

pub use depth::compute_depths;
pub use layout::{LayoutConfig, layout};
pub use model::{EdgeLayout, GraphLayout, Layer, LayoutPoint, NodeLayout};
pub use view::{
    FullscreenHost, GraphView, InspectEvent, RenderOptions, Selection, ViewTransform,
};
