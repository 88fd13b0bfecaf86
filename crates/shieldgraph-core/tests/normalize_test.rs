use serde_json::json;
use shieldgraph_core::{AttackPath, PathEdge, PathNode, normalize};

#[test]
fn normalize_returns_empty_for_non_object_input() {
    for raw in [
        json!(null),
        json!(42),
        json!("attack_path"),
        json!(true),
        json!([1, 2, 3]),
    ] {
        let out = normalize(&raw);
        assert_eq!(out, AttackPath::default());
        assert!(out.is_empty());
    }
}

#[test]
fn normalize_tolerates_missing_or_mistyped_sections() {
    let out = normalize(&json!({}));
    assert!(out.nodes.is_empty() && out.edges.is_empty());

    let out = normalize(&json!({ "nodes": 7, "edges": { "from": "a" } }));
    assert!(out.nodes.is_empty() && out.edges.is_empty());
}

#[test]
fn normalize_accepts_bare_string_node_ids() {
    let out = normalize(&json!({ "nodes": ["vm-1", "db-1"] }));
    assert_eq!(
        out.nodes,
        vec![
            PathNode {
                id: "vm-1".to_string(),
                node_type: None
            },
            PathNode {
                id: "db-1".to_string(),
                node_type: None
            },
        ]
    );
}

#[test]
fn normalize_accepts_object_nodes_and_drops_junk_entries() {
    let out = normalize(&json!({
        "nodes": [
            { "id": "vm-1", "type": "compute" },
            { "id": 42 },
            { "type": "orphan-without-id" },
            { "id": "" },
            { "id": 0 },
            { "id": false },
            null,
            7,
            ""
        ]
    }));

    assert_eq!(out.nodes.len(), 2);
    assert_eq!(out.nodes[0].id, "vm-1");
    assert_eq!(out.nodes[0].node_type.as_deref(), Some("compute"));
    assert_eq!(out.nodes[1].id, "42");
    assert_eq!(out.nodes[1].node_type, None);
}

#[test]
fn normalize_coerces_truthy_scalars_to_strings() {
    let out = normalize(&json!({
        "nodes": [{ "id": true, "type": 3 }],
        "edges": [{ "from": 1, "to": 2.5, "action": true }]
    }));

    assert_eq!(out.nodes[0].id, "true");
    assert_eq!(out.nodes[0].node_type.as_deref(), Some("3"));
    assert_eq!(
        out.edges,
        vec![PathEdge {
            from: "1".to_string(),
            to: "2.5".to_string(),
            action: "true".to_string(),
        }]
    );
}

#[test]
fn normalize_requires_both_edge_endpoints() {
    let out = normalize(&json!({
        "nodes": ["a", "b"],
        "edges": [
            { "from": "a" },
            { "to": "b" },
            { "from": "", "to": "b" },
            { "from": "a", "to": null },
            "a->b",
            null
        ]
    }));
    assert!(out.edges.is_empty());
}

#[test]
fn normalize_defaults_edge_action_to_empty_string() {
    let out = normalize(&json!({
        "nodes": ["a", "b"],
        "edges": [{ "from": "a", "to": "b" }]
    }));
    assert_eq!(out.edges[0].action, "");
    assert_eq!(out.edges[0].key(), "a→b");
}

#[test]
fn normalize_preserves_duplicate_node_ids() {
    // Last-wins indexing happens at render time; normalization keeps the
    // feed order intact.
    let out = normalize(&json!({
        "nodes": [
            { "id": "a", "type": "first" },
            { "id": "a", "type": "second" }
        ]
    }));
    assert_eq!(out.nodes.len(), 2);
    assert_eq!(out.nodes[0].node_type.as_deref(), Some("first"));
    assert_eq!(out.nodes[1].node_type.as_deref(), Some("second"));
}

#[test]
fn summary_joins_node_ids_in_feed_order() {
    let out = normalize(&json!({ "nodes": ["vm-1", "vm-2", "db-1"] }));
    assert_eq!(out.summary().as_deref(), Some("vm-1 → vm-2 → db-1"));

    assert_eq!(normalize(&json!({})).summary(), None);
}

#[test]
fn normalize_keeps_edges_referencing_undeclared_nodes() {
    // Dangling edges stay in the normalized list; they are skipped at
    // render time because no position exists for them.
    let out = normalize(&json!({
        "nodes": ["a"],
        "edges": [{ "from": "a", "to": "ghost", "action": "x" }]
    }));
    assert_eq!(out.edges.len(), 1);
    assert_eq!(out.edges[0].to, "ghost");
}
