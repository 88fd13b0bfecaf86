//! Depth assignment: longest-path relaxation in Kahn order.

use rustc_hash::FxHashMap as HashMap;
use shieldgraph_core::{PathEdge, PathNode};
use std::collections::BTreeSet;

/// Assigns each node its longest-path distance from any in-degree-0 node.
///
/// Processing is Kahn-topological with a lexicographically ordered ready
/// set, so the result is identical across runs and independent of the
/// node/edge array order.
///
/// In-degree counts every edge target, including ids not declared in
/// `nodes`; relaxation propagates through such undeclared intermediate ids
/// (they appear in the returned map but are never laid out). Nodes on a
/// cycle never reach in-degree 0, keep depth 0 and render in the leftmost
/// column; the computation still terminates because each id is dequeued at
/// most once.
pub fn compute_depths(nodes: &[PathNode], edges: &[PathEdge]) -> HashMap<String, u32> {
    let mut depths: HashMap<String, u32> = HashMap::default();
    for node in nodes {
        depths.insert(node.id.clone(), 0);
    }

    let mut in_degree: HashMap<String, usize> = HashMap::default();
    for edge in edges {
        *in_degree.entry(edge.to.clone()).or_insert(0) += 1;
    }

    let mut adjacency: HashMap<String, Vec<String>> = HashMap::default();
    for edge in edges {
        adjacency
            .entry(edge.from.clone())
            .or_default()
            .push(edge.to.clone());
    }

    let mut ready: BTreeSet<String> = nodes
        .iter()
        .filter(|n| in_degree.get(&n.id).copied().unwrap_or(0) == 0)
        .map(|n| n.id.clone())
        .collect();

    while let Some(u) = ready.pop_first() {
        let depth_u = depths.get(&u).copied().unwrap_or(0);
        let Some(targets) = adjacency.get(&u) else {
            continue;
        };
        for v in targets {
            let entry = depths.entry(v.clone()).or_insert(0);
            *entry = (*entry).max(depth_u + 1);
            if let Some(remaining) = in_degree.get_mut(v) {
                *remaining = remaining.saturating_sub(1);
                if *remaining == 0 {
                    ready.insert(v.clone());
                }
            }
        }
    }

    tracing::trace!(nodes = nodes.len(), edges = edges.len(), "depths assigned");
    depths
}
