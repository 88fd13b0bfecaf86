//! Layout output types. All geometry is in diagram pixels, before the view
//! transform is applied.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

/// A placed node box. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLayout {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub depth: u32,
}

/// A routed edge: a cubic curve from the source box's right-middle to the
/// target box's left-middle, with the control x at the horizontal midpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeLayout {
    pub from: String,
    pub to: String,
    pub action: String,
    pub start: LayoutPoint,
    pub end: LayoutPoint,
    pub control_x: f64,
    /// Anchor for the action label.
    pub label: LayoutPoint,
}

impl EdgeLayout {
    /// Stable selection key, e.g. `"vm-1→vm-2"`.
    pub fn key(&self) -> String {
        format!("{}→{}", self.from, self.to)
    }
}

/// One visual column: all node ids at a given depth, ordered
/// lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub depth: u32,
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphLayout {
    pub nodes: Vec<NodeLayout>,
    pub edges: Vec<EdgeLayout>,
    pub layers: Vec<Layer>,
    pub width: f64,
    pub height: f64,
}

impl GraphLayout {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
