//! Defensive normalization of the `attack_path` wire shape.
//!
//! Feed payloads arrive loosely typed and occasionally malformed. Everything
//! in this module is total: malformed input degrades to an empty (or
//! partially empty) path, never to an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A normalized attack path: identity/resource nodes plus the actions
/// connecting them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackPath {
    /// Accepted nodes in feed order. Duplicate ids are preserved as-is;
    /// consumers index by id with last-wins semantics (documented policy,
    /// kept for bug-compatibility with existing feeds).
    pub nodes: Vec<PathNode>,
    /// Accepted edges in feed order. An edge may reference an id that is
    /// not declared in `nodes`; such edges are dropped at render time.
    pub edges: Vec<PathEdge>,
}

/// Invariant: `id` is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: Option<String>,
}

/// Invariant: `from` and `to` are non-empty; `action` defaults to `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEdge {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub action: String,
}

impl AttackPath {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node-id chain for detail panels, e.g. `"vm-1 → vm-2 → db-1"`.
    pub fn summary(&self) -> Option<String> {
        if self.nodes.is_empty() {
            return None;
        }
        Some(
            self.nodes
                .iter()
                .map(|n| n.id.as_str())
                .collect::<Vec<_>>()
                .join(" → "),
        )
    }
}

impl PathEdge {
    /// Stable selection key, e.g. `"vm-1→vm-2"`.
    pub fn key(&self) -> String {
        format!("{}→{}", self.from, self.to)
    }
}

/// Coerces a truthy JSON scalar into its string form; rejects everything
/// else. Mirrors the upstream feed contract: non-empty strings, non-zero
/// finite numbers and `true` pass, while `null`, `false`, `0`, `""`, arrays
/// and objects do not.
fn coerce_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => {
            let f = n.as_f64()?;
            if f == 0.0 || !f.is_finite() {
                return None;
            }
            Some(number_to_string(n))
        }
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn number_to_string(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    let f = n.as_f64().unwrap_or(0.0);
    if f.fract() == 0.0 && f.abs() < 9e15 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

/// Normalizes an arbitrary JSON value into a well-formed [`AttackPath`].
///
/// Total by contract: any input, including `null`, primitives, arrays and
/// deeply malformed objects, yields a valid (possibly empty) path.
pub fn normalize(raw: &Value) -> AttackPath {
    let mut out = AttackPath::default();

    let Value::Object(map) = raw else {
        return out;
    };

    if let Some(Value::Array(raw_nodes)) = map.get("nodes") {
        for entry in raw_nodes {
            match entry {
                Value::String(id) if !id.is_empty() => out.nodes.push(PathNode {
                    id: id.clone(),
                    node_type: None,
                }),
                Value::Object(obj) => {
                    let Some(id) = obj.get("id").and_then(coerce_scalar) else {
                        continue;
                    };
                    let node_type = obj.get("type").and_then(coerce_scalar);
                    out.nodes.push(PathNode { id, node_type });
                }
                _ => {}
            }
        }
    }

    if let Some(Value::Array(raw_edges)) = map.get("edges") {
        for entry in raw_edges {
            let Value::Object(obj) = entry else {
                continue;
            };
            let Some(from) = obj.get("from").and_then(coerce_scalar) else {
                continue;
            };
            let Some(to) = obj.get("to").and_then(coerce_scalar) else {
                continue;
            };
            let action = obj.get("action").and_then(coerce_scalar).unwrap_or_default();
            out.edges.push(PathEdge { from, to, action });
        }
    }

    tracing::debug!(
        nodes = out.nodes.len(),
        edges = out.edges.len(),
        "normalized attack path"
    );
    out
}
