//! Interactive view state: selection, pan, zoom, and the inspect callback.
//!
//! A [`GraphView`] owns everything derived from one render call. Calling
//! [`GraphView::render`] again yields a brand-new view; no state crosses
//! invocations. There are no module-level globals, so multiple views can
//! coexist without colliding.

use crate::layout::{self, LayoutConfig};
use crate::model::GraphLayout;
use crate::svg;
use indexmap::IndexMap;
use serde_json::Value;
use shieldgraph_core::{AttackPath, PathNode, normalize};
use std::sync::Arc;

pub const MIN_SCALE: f64 = 0.3;
pub const MAX_SCALE: f64 = 3.0;
/// Multiplicative step per wheel tick.
pub const WHEEL_ZOOM_STEP: f64 = 1.08;
/// Multiplicative step per explicit zoom-in/zoom-out control activation.
pub const BUTTON_ZOOM_STEP: f64 = 1.15;

pub type InspectFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Options for one render call.
///
/// `severity` is a display hint only: it is attached to the rendered root
/// as a `data-severity` attribute and never influences normalization,
/// depth, or layout.
#[derive(Clone, Default)]
pub struct RenderOptions {
    pub severity: Option<String>,
    pub finding_id: Option<String>,
    pub on_inspect: Option<InspectFn>,
    pub layout: LayoutConfig,
}

/// Pan/zoom state, independent of selection. Reset only by an explicit
/// reset-view action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

/// At most one entity is selected at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Node(String),
    /// Edge selection key, `"from→to"`.
    Edge(String),
}

/// Typed inspection event; hosts receive the formatted message through the
/// `on_inspect` callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectEvent {
    Empty,
    Rendered,
    NodeSelected {
        id: String,
        node_type: Option<String>,
        finding_id: Option<String>,
    },
    EdgeSelected {
        from: String,
        to: String,
        action: String,
        finding_id: Option<String>,
    },
    ViewReset,
}

impl InspectEvent {
    pub fn message(&self) -> String {
        match self {
            Self::Empty => "No attack_path nodes to render.".to_string(),
            Self::Rendered => "Rendered attack_path graph (read-only).".to_string(),
            Self::NodeSelected {
                id,
                node_type,
                finding_id,
            } => {
                let mut msg = format!("Node: {id}");
                if let Some(t) = node_type {
                    msg.push_str(&format!(" ({t})"));
                }
                if let Some(fid) = finding_id {
                    msg.push_str(&format!(" • Finding: {fid}"));
                }
                msg
            }
            Self::EdgeSelected {
                from,
                to,
                action,
                finding_id,
            } => {
                let mut msg = format!("Edge: {from} → {to}");
                if !action.is_empty() {
                    msg.push_str(&format!(" • action: {action}"));
                }
                if let Some(fid) = finding_id {
                    msg.push_str(&format!(" • Finding: {fid}"));
                }
                msg
            }
            Self::ViewReset => "View reset.".to_string(),
        }
    }
}

/// Host hook for the fullscreen affordance. When the runtime provides no
/// such capability, pass `None` to [`GraphView::fullscreen`]; the call is a
/// no-op.
pub trait FullscreenHost {
    fn request_fullscreen(&mut self);
}

/// One rendered attack-path diagram plus its interaction state.
#[derive(Clone)]
pub struct GraphView {
    path: AttackPath,
    layout: GraphLayout,
    /// Id index with last-wins values for duplicate ids (documented
    /// policy; see `AttackPath::nodes`).
    nodes_by_id: IndexMap<String, PathNode>,
    options: RenderOptions,
    selection: Selection,
    transform: ViewTransform,
    drag: Option<(f64, f64)>,
}

impl GraphView {
    /// The render entry point: normalizes `raw`, computes the layout and
    /// resets all interaction state. Emits an inspect message for the
    /// rendered or empty outcome. Never fails.
    pub fn render(raw: &Value, options: RenderOptions) -> Self {
        Self::from_path(normalize(raw), options)
    }

    /// Renders an already-normalized path.
    pub fn from_path(path: AttackPath, options: RenderOptions) -> Self {
        let layout = layout::layout(&path, &options.layout);
        let mut nodes_by_id = IndexMap::new();
        for node in &path.nodes {
            nodes_by_id.insert(node.id.clone(), node.clone());
        }

        let view = Self {
            path,
            layout,
            nodes_by_id,
            options,
            selection: Selection::None,
            transform: ViewTransform::default(),
            drag: None,
        };

        if view.is_empty() {
            view.inspect(&InspectEvent::Empty);
        } else {
            tracing::debug!(
                nodes = view.layout.nodes.len(),
                edges = view.layout.edges.len(),
                "attack path rendered"
            );
            view.inspect(&InspectEvent::Rendered);
        }
        view
    }

    fn inspect(&self, event: &InspectEvent) {
        if let Some(cb) = &self.options.on_inspect {
            cb(&event.message());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn attack_path(&self) -> &AttackPath {
        &self.path
    }

    pub fn layout(&self) -> &GraphLayout {
        &self.layout
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn severity(&self) -> Option<&str> {
        self.options.severity.as_deref()
    }

    /// Selects a node exclusively (clears any edge selection). Returns
    /// `false` for unknown ids.
    pub fn select_node(&mut self, id: &str) -> bool {
        let Some(node) = self.nodes_by_id.get(id).cloned() else {
            return false;
        };
        self.selection = Selection::Node(node.id.clone());
        self.inspect(&InspectEvent::NodeSelected {
            id: node.id,
            node_type: node.node_type,
            finding_id: self.options.finding_id.clone(),
        });
        true
    }

    /// Selects an edge exclusively (clears any node selection). Only edges
    /// that actually rendered are selectable; returns `false` otherwise.
    pub fn select_edge(&mut self, from: &str, to: &str) -> bool {
        let Some(edge) = self
            .layout
            .edges
            .iter()
            .find(|e| e.from == from && e.to == to)
            .cloned()
        else {
            return false;
        };
        self.selection = Selection::Edge(edge.key());
        self.inspect(&InspectEvent::EdgeSelected {
            from: edge.from,
            to: edge.to,
            action: edge.action,
            finding_id: self.options.finding_id.clone(),
        });
        true
    }

    /// Keyboard activation on a focused node: Enter and Space trigger the
    /// same selection as a click.
    pub fn key_activate(&mut self, key: &str, node_id: &str) -> bool {
        if matches!(key, "Enter" | " ") {
            self.select_node(node_id)
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
    }

    pub fn zoom_by(&mut self, factor: f64) {
        self.transform.scale = (self.transform.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(BUTTON_ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(1.0 / BUTTON_ZOOM_STEP);
    }

    /// Wheel input: positive delta zooms out, negative zooms in.
    pub fn wheel(&mut self, delta_y: f64) {
        let factor = if delta_y > 0.0 {
            1.0 / WHEEL_ZOOM_STEP
        } else {
            WHEEL_ZOOM_STEP
        };
        self.zoom_by(factor);
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.drag = Some((x, y));
    }

    /// Translates the view while a drag is active; ignored otherwise.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if let Some((last_x, last_y)) = self.drag {
            self.transform.translate_x += x - last_x;
            self.transform.translate_y += y - last_y;
            self.drag = Some((x, y));
        }
    }

    /// Ends a drag. Valid wherever the pointer is released, so a drag can
    /// never get stuck when the pointer leaves the canvas bounds.
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Restores scale 1 and origin translation, clears any selection and
    /// reports the reset through the inspect callback.
    pub fn reset_view(&mut self) {
        self.transform = ViewTransform::default();
        self.selection = Selection::None;
        self.inspect(&InspectEvent::ViewReset);
    }

    /// Requests fullscreen through the host hook; no-op without one.
    pub fn fullscreen(&self, host: Option<&mut dyn FullscreenHost>) {
        if let Some(host) = host {
            host.request_fullscreen();
        }
    }

    /// The full current frame as an SVG document. Empty input yields a
    /// placeholder document, never an error.
    pub fn svg(&self) -> String {
        if self.is_empty() {
            svg::placeholder_svg(self.severity())
        } else {
            svg::render_svg(&svg::SvgFrame {
                layout: &self.layout,
                transform: &self.transform,
                selection: &self.selection,
                severity: self.severity(),
            })
        }
    }
}
