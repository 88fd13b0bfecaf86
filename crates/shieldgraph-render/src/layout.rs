//! Layer bucketing and position derivation.

use crate::depth::compute_depths;
use crate::model::{EdgeLayout, GraphLayout, Layer, LayoutPoint, NodeLayout};
use rustc_hash::FxHashMap as HashMap;
use shieldgraph_core::AttackPath;
use std::collections::BTreeMap;

/// Fixed geometric constants. Not data-dependent: the canvas always exactly
/// fits the content, and zoom/pan handles overflow at render time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub padding: f64,
    pub column_stride: f64,
    pub row_stride: f64,
    pub node_width: f64,
    pub node_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 24.0,
            column_stride: 220.0,
            row_stride: 90.0,
            node_width: 180.0,
            node_height: 52.0,
        }
    }
}

/// Computes the deterministic layered layout for a normalized path.
///
/// Layers are keyed by depth and ordered lexicographically inside each
/// column. Duplicate node ids occupy slots in their layer, but the position
/// index is last-wins, so every occurrence of the id is drawn at the final
/// slot (bug-compatible with existing feeds). Edges whose endpoints have no
/// position are dropped here.
pub fn layout(path: &AttackPath, config: &LayoutConfig) -> GraphLayout {
    if path.nodes.is_empty() {
        return GraphLayout::default();
    }

    let depths = compute_depths(&path.nodes, &path.edges);

    let mut layers_by_depth: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    for node in &path.nodes {
        let depth = depths.get(&node.id).copied().unwrap_or(0);
        layers_by_depth.entry(depth).or_default().push(node.id.clone());
    }
    for ids in layers_by_depth.values_mut() {
        ids.sort();
    }

    let max_depth = layers_by_depth.keys().next_back().copied().unwrap_or(0);
    let max_layer_size = layers_by_depth.values().map(Vec::len).max().unwrap_or(0);

    let width = config.padding * 2.0 + (max_depth as f64 + 1.0) * config.column_stride;
    let height = config.padding * 2.0 + (max_layer_size.max(1) as f64) * config.row_stride;

    let mut positions: HashMap<String, LayoutPoint> = HashMap::default();
    for (depth, ids) in &layers_by_depth {
        let layer_height = ids.len() as f64 * config.row_stride;
        let y_start = config.padding + (height - config.padding * 2.0 - layer_height) / 2.0;
        for (row, id) in ids.iter().enumerate() {
            let x = config.padding + *depth as f64 * config.column_stride;
            let y = y_start + row as f64 * config.row_stride;
            positions.insert(id.clone(), LayoutPoint { x, y });
        }
    }

    let mut nodes = Vec::with_capacity(path.nodes.len());
    for node in &path.nodes {
        let Some(point) = positions.get(&node.id) else {
            continue;
        };
        nodes.push(NodeLayout {
            id: node.id.clone(),
            node_type: node.node_type.clone(),
            x: point.x,
            y: point.y,
            width: config.node_width,
            height: config.node_height,
            depth: depths.get(&node.id).copied().unwrap_or(0),
        });
    }

    let mut edges = Vec::new();
    for edge in &path.edges {
        let (Some(a), Some(b)) = (positions.get(&edge.from), positions.get(&edge.to)) else {
            continue;
        };
        let x1 = a.x + config.node_width;
        let y1 = a.y + config.node_height / 2.0;
        let x2 = b.x;
        let y2 = b.y + config.node_height / 2.0;
        let control_x = (x1 + x2) / 2.0;
        edges.push(EdgeLayout {
            from: edge.from.clone(),
            to: edge.to.clone(),
            action: edge.action.clone(),
            start: LayoutPoint { x: x1, y: y1 },
            end: LayoutPoint { x: x2, y: y2 },
            control_x,
            label: LayoutPoint {
                x: control_x,
                y: (y1 + y2) / 2.0 - 6.0,
            },
        });
    }

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        layers = layers_by_depth.len(),
        "layout computed"
    );

    GraphLayout {
        nodes,
        edges,
        layers: layers_by_depth
            .into_iter()
            .map(|(depth, ids)| Layer { depth, ids })
            .collect(),
        width,
        height,
    }
}
