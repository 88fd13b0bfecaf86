use shieldgraph_core::{PathEdge, PathNode};
use shieldgraph_render::compute_depths;

fn node(id: &str) -> PathNode {
    PathNode {
        id: id.to_string(),
        node_type: None,
    }
}

fn edge(from: &str, to: &str) -> PathEdge {
    PathEdge {
        from: from.to_string(),
        to: to.to_string(),
        action: String::new(),
    }
}

#[test]
fn single_node_gets_depth_zero() {
    let depths = compute_depths(&[node("a")], &[]);
    assert_eq!(depths.get("a"), Some(&0));
}

#[test]
fn unconnected_nodes_all_get_depth_zero() {
    let depths = compute_depths(&[node("a"), node("b"), node("c")], &[]);
    assert_eq!(depths.get("a"), Some(&0));
    assert_eq!(depths.get("b"), Some(&0));
    assert_eq!(depths.get("c"), Some(&0));
}

#[test]
fn chain_depths_increase_along_the_path() {
    let depths = compute_depths(
        &[node("a"), node("b"), node("c")],
        &[edge("a", "b"), edge("b", "c")],
    );
    assert_eq!(depths.get("a"), Some(&0));
    assert_eq!(depths.get("b"), Some(&1));
    assert_eq!(depths.get("c"), Some(&2));
}

#[test]
fn diamond_takes_the_longest_path() {
    let depths = compute_depths(
        &[node("a"), node("b"), node("c"), node("d")],
        &[edge("a", "b"), edge("a", "c"), edge("b", "d"), edge("c", "d")],
    );
    assert_eq!(depths.get("d"), Some(&2));
}

#[test]
fn longer_branch_wins_over_shorter_one() {
    // a→b→c→d and a→d: d must sit at depth 3, not 1.
    let depths = compute_depths(
        &[node("a"), node("b"), node("c"), node("d")],
        &[edge("a", "b"), edge("b", "c"), edge("c", "d"), edge("a", "d")],
    );
    assert_eq!(depths.get("d"), Some(&3));
}

#[test]
fn two_node_cycle_stays_at_depth_zero_and_terminates() {
    let depths = compute_depths(&[node("a"), node("b")], &[edge("a", "b"), edge("b", "a")]);
    assert_eq!(depths.get("a"), Some(&0));
    assert_eq!(depths.get("b"), Some(&0));
}

#[test]
fn nodes_downstream_of_a_cycle_are_frozen_too() {
    let depths = compute_depths(
        &[node("a"), node("b"), node("c")],
        &[edge("a", "b"), edge("b", "a"), edge("b", "c")],
    );
    // b never reaches in-degree 0, so c is never relaxed.
    assert_eq!(depths.get("c"), Some(&0));
}

#[test]
fn relaxation_propagates_through_undeclared_intermediate_ids() {
    let depths = compute_depths(&[node("a"), node("c")], &[edge("a", "x"), edge("x", "c")]);
    assert_eq!(depths.get("a"), Some(&0));
    assert_eq!(depths.get("x"), Some(&1));
    assert_eq!(depths.get("c"), Some(&2));
}

#[test]
fn dangling_edges_do_not_disturb_declared_nodes() {
    let base = compute_depths(&[node("a"), node("b")], &[edge("a", "b")]);
    let with_dangling = compute_depths(
        &[node("a"), node("b")],
        &[edge("a", "b"), edge("a", "ghost")],
    );
    assert_eq!(base.get("a"), with_dangling.get("a"));
    assert_eq!(base.get("b"), with_dangling.get("b"));
}

#[test]
fn output_is_independent_of_input_array_order() {
    let nodes = [node("a"), node("b"), node("c"), node("d")];
    let edges = [edge("a", "b"), edge("a", "c"), edge("b", "d"), edge("c", "d")];

    let forward = compute_depths(&nodes, &edges);

    let mut nodes_rev = nodes.to_vec();
    nodes_rev.reverse();
    let mut edges_rev = edges.to_vec();
    edges_rev.reverse();
    let backward = compute_depths(&nodes_rev, &edges_rev);

    assert_eq!(forward, backward);
}

#[test]
fn repeated_invocations_are_identical() {
    let nodes = [node("x"), node("y"), node("z")];
    let edges = [edge("x", "y"), edge("y", "z"), edge("x", "z")];
    let first = compute_depths(&nodes, &edges);
    let second = compute_depths(&nodes, &edges);
    assert_eq!(first, second);
}
