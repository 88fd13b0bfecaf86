//! SVG frame writer.
//!
//! Emits a complete document per call: marker defs, a `viewport` group
//! carrying the pan/zoom transform, edge curves with action labels and wide
//! transparent hit paths, then node groups. Colors are left to the host
//! stylesheet via `currentColor` and the `data-severity` hook.

use crate::model::GraphLayout;
use crate::view::{Selection, ViewTransform};
use rustc_hash::FxHashMap as HashMap;
use std::fmt::Write as _;

const SVG_OPEN: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%" height="100%""#;

pub struct SvgFrame<'a> {
    pub layout: &'a GraphLayout,
    pub transform: &'a ViewTransform,
    pub selection: &'a Selection,
    pub severity: Option<&'a str>,
}

pub fn render_svg(frame: &SvgFrame<'_>) -> String {
    let layout = frame.layout;
    let mut out = String::new();

    let _ = write!(
        &mut out,
        r#"{SVG_OPEN} viewBox="0 0 {} {}" role="img" aria-label="Attack path map""#,
        fmt(layout.width),
        fmt(layout.height)
    );
    write_severity(&mut out, frame.severity);
    out.push_str(">\n");

    let _ = writeln!(
        &mut out,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="transparent" />"#,
        fmt(layout.width),
        fmt(layout.height)
    );

    out.push_str(concat!(
        r#"<defs><marker id="arrow" markerWidth="10" markerHeight="10" refX="9" refY="3" "#,
        r#"orient="auto" markerUnits="strokeWidth">"#,
        r#"<path d="M0,0 L10,3 L0,6 Z" fill="currentColor" /></marker></defs>"#,
        "\n"
    ));

    let _ = writeln!(
        &mut out,
        r#"<g class="viewport" transform="translate({},{}) scale({})">"#,
        fmt(frame.transform.translate_x),
        fmt(frame.transform.translate_y),
        fmt(frame.transform.scale)
    );

    out.push_str(r#"<g class="edges">"#);
    out.push('\n');
    for edge in &layout.edges {
        let key = edge.key();
        let selected = matches!(frame.selection, Selection::Edge(k) if *k == key);
        let d = format!(
            "M {} {} C {} {}, {} {}, {} {}",
            fmt(edge.start.x),
            fmt(edge.start.y),
            fmt(edge.control_x),
            fmt(edge.start.y),
            fmt(edge.control_x),
            fmt(edge.end.y),
            fmt(edge.end.x),
            fmt(edge.end.y)
        );
        let _ = writeln!(
            &mut out,
            r#"<path class="edge" d="{d}" fill="none" stroke="currentColor" stroke-width="{}" marker-end="url(#arrow)" data-edge="{}" />"#,
            if selected { 4 } else { 2 },
            escape_xml(&key)
        );
        let _ = writeln!(
            &mut out,
            r#"<text class="edge-label" x="{}" y="{}" text-anchor="middle" font-size="12" fill="currentColor" opacity="0.85">{}</text>"#,
            fmt(edge.label.x),
            fmt(edge.label.y),
            escape_xml(&edge.action)
        );
        let _ = writeln!(
            &mut out,
            r#"<path class="edge-hit" d="{d}" fill="none" stroke="transparent" stroke-width="14" data-edge-hit="{}" />"#,
            escape_xml(&key)
        );
    }
    out.push_str("</g>\n");

    // Duplicate ids all draw at the final slot; the emphasized entry for a
    // selected id is the last occurrence, matching the last-wins id index.
    let mut last_occurrence: HashMap<&str, usize> = HashMap::default();
    for (idx, node) in layout.nodes.iter().enumerate() {
        last_occurrence.insert(node.id.as_str(), idx);
    }

    out.push_str(r#"<g class="nodes">"#);
    out.push('\n');
    for (idx, node) in layout.nodes.iter().enumerate() {
        let selected = matches!(frame.selection, Selection::Node(id) if *id == node.id)
            && last_occurrence.get(node.id.as_str()) == Some(&idx);
        let _ = writeln!(
            &mut out,
            r#"<g class="node" data-node="{}" tabindex="0">"#,
            escape_xml(&node.id)
        );
        let _ = writeln!(
            &mut out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="12" fill="rgba(255,255,255,0.03)" stroke="currentColor" stroke-width="{}" />"#,
            fmt(node.x),
            fmt(node.y),
            fmt(node.width),
            fmt(node.height),
            if selected { 4 } else { 2 }
        );
        let _ = writeln!(
            &mut out,
            r#"<text x="{}" y="{}" font-size="14" fill="currentColor">{}</text>"#,
            fmt(node.x + 12.0),
            fmt(node.y + 22.0),
            escape_xml(&node.id)
        );
        let _ = writeln!(
            &mut out,
            r#"<text x="{}" y="{}" font-size="12" fill="currentColor" opacity="0.75">{}</text>"#,
            fmt(node.x + 12.0),
            fmt(node.y + 42.0),
            escape_xml(node.node_type.as_deref().unwrap_or("—"))
        );
        out.push_str("</g>\n");
    }
    out.push_str("</g>\n");

    out.push_str("</g>\n</svg>\n");
    out
}

/// Placeholder document for empty input.
pub fn placeholder_svg(severity: Option<&str>) -> String {
    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"{SVG_OPEN} viewBox="0 0 320 80" role="img" aria-label="Attack path map" data-placeholder="true""#
    );
    write_severity(&mut out, severity);
    out.push_str(">\n");
    out.push_str(concat!(
        r#"<text class="muted" x="16" y="44" font-size="14" fill="currentColor">"#,
        "No attack_path nodes to render.</text>\n</svg>\n"
    ));
    out
}

fn write_severity(out: &mut String, severity: Option<&str>) {
    if let Some(sev) = severity {
        let _ = write!(
            out,
            r#" data-severity="{}""#,
            escape_xml(&sev.to_uppercase())
        );
    }
}

/// Stringifies a coordinate the way JS `Number#toString()` would: a
/// round-trippable decimal form, avoiding `-0` and tiny float noise from
/// our own centering math.
fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
