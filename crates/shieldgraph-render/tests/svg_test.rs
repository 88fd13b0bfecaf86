use serde_json::json;
use shieldgraph_render::{GraphView, RenderOptions};

fn render(raw: serde_json::Value) -> String {
    GraphView::render(&raw, RenderOptions::default()).svg()
}

#[test]
fn frame_has_viewbox_marker_and_viewport_group() {
    let svg = render(json!({
        "nodes": ["vm-1", "vm-2", "db-1"],
        "edges": [
            { "from": "vm-1", "to": "vm-2", "action": "lateral-move" },
            { "from": "vm-2", "to": "db-1", "action": "read-secret" }
        ]
    }));

    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.contains(r#"viewBox="0 0 708 138""#));
    assert!(svg.contains(r#"aria-label="Attack path map""#));
    assert_eq!(svg.matches("<marker id=\"arrow\"").count(), 1);
    assert!(svg.contains(r#"<g class="viewport" transform="translate(0,0) scale(1)">"#));
    assert!(svg.contains(">lateral-move</text>"));
    assert!(svg.contains(">read-secret</text>"));
    assert!(!svg.contains("data-placeholder"));
}

#[test]
fn every_edge_gets_a_visible_path_and_a_hit_path() {
    let svg = render(json!({
        "nodes": ["a", "b"],
        "edges": [{ "from": "a", "to": "b", "action": "move" }]
    }));

    assert!(svg.contains(r#"data-edge="a→b""#));
    assert!(svg.contains(r#"data-edge-hit="a→b""#));
    assert!(svg.contains(r#"stroke="transparent" stroke-width="14""#));
    assert!(svg.contains(r#"marker-end="url(#arrow)""#));
}

#[test]
fn node_groups_are_focusable_and_show_type_or_placeholder_dash() {
    let svg = render(json!({
        "nodes": [
            { "id": "vm-1", "type": "compute" },
            "db-1"
        ],
        "edges": []
    }));

    assert!(svg.contains(r#"<g class="node" data-node="vm-1" tabindex="0">"#));
    assert!(svg.contains(">compute</text>"));
    // Typeless node renders the em-dash placeholder line.
    assert!(svg.contains(">—</text>"));
}

#[test]
fn pan_and_zoom_are_reflected_in_the_viewport_transform() {
    let mut view = GraphView::render(
        &json!({ "nodes": ["a"], "edges": [] }),
        RenderOptions::default(),
    );
    view.zoom_in();
    view.pointer_down(0.0, 0.0);
    view.pointer_move(20.0, 15.0);
    view.pointer_up();

    let svg = view.svg();
    assert!(svg.contains(r#"transform="translate(20,15) scale(1.15)""#));
}

#[test]
fn selected_node_is_emphasized() {
    let mut view = GraphView::render(
        &json!({ "nodes": ["a", "b"], "edges": [] }),
        RenderOptions::default(),
    );
    view.select_node("a");

    let svg = view.svg();
    assert_eq!(
        svg.matches(r#"stroke="currentColor" stroke-width="4" />"#).count(),
        1
    );
}

#[test]
fn ids_labels_and_severity_are_xml_escaped() {
    let mut options = RenderOptions::default();
    options.severity = Some("high & rising".to_string());
    let view = GraphView::render(
        &json!({
            "nodes": ["a<b>", "c\"d\""],
            "edges": [{ "from": "a<b>", "to": "c\"d\"", "action": "steal & run" }]
        }),
        options,
    );
    let svg = view.svg();

    assert!(svg.contains("a&lt;b&gt;"));
    assert!(svg.contains("c&quot;d&quot;"));
    assert!(svg.contains(">steal &amp; run</text>"));
    assert!(svg.contains(r#"data-severity="HIGH &amp; RISING""#));
    assert!(!svg.contains("a<b>"));
}

#[test]
fn placeholder_document_is_valid_svg_with_the_message() {
    let svg = render(json!(null));
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.contains("No attack_path nodes to render."));
    assert!(svg.trim_end().ends_with("</svg>"));
}
