#![forbid(unsafe_code)]

//! `shieldgraph` is a headless attack-path diagram engine.
//!
//! It consumes the loosely-typed `attack_path` JSON shape produced by the
//! findings feed, normalizes it defensively (never-throw), computes a
//! deterministic layered layout, and renders an SVG frame with a read-only
//! pan/zoom/select interaction model.
//!
//! # Features
//!
//! - `render` (default): enable layout + SVG rendering (`shieldgraph::render`)

pub use shieldgraph_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use shieldgraph_render::model::{EdgeLayout, GraphLayout, Layer, LayoutPoint, NodeLayout};
    pub use shieldgraph_render::view::{
        FullscreenHost, GraphView, InspectEvent, InspectFn, RenderOptions, Selection,
        ViewTransform,
    };
    pub use shieldgraph_render::{LayoutConfig, compute_depths, layout};

    use serde_json::Value;
    use shieldgraph_core::Finding;
    use std::sync::Arc;

    /// Convenience wrapper that bundles [`RenderOptions`] for hosts that
    /// render many paths with the same wiring.
    ///
    /// All work is CPU-bound and synchronous; the wrapper performs no I/O.
    #[derive(Clone, Default)]
    pub struct ShieldRenderer {
        pub options: RenderOptions,
    }

    impl ShieldRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
            self.options.severity = Some(severity.into());
            self
        }

        pub fn with_finding_id(mut self, finding_id: impl Into<String>) -> Self {
            self.options.finding_id = Some(finding_id.into());
            self
        }

        pub fn with_inspect(mut self, callback: impl Fn(&str) + Send + Sync + 'static) -> Self {
            self.options.on_inspect = Some(Arc::new(callback));
            self
        }

        pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
            self.options.layout = layout;
            self
        }

        pub fn render_view(&self, raw: &Value) -> GraphView {
            GraphView::render(raw, self.options.clone())
        }

        pub fn render_svg(&self, raw: &Value) -> String {
            self.render_view(raw).svg()
        }

        /// Renders a finding's attack path; the record's severity and
        /// sanitized id fill in any options not set explicitly.
        pub fn render_finding(&self, finding: &Finding) -> GraphView {
            let mut options = self.options.clone();
            if options.severity.is_none() {
                options.severity = Some(finding.severity().as_str().to_string());
            }
            if options.finding_id.is_none() {
                options.finding_id = Some(finding.safe_id());
            }
            GraphView::render(finding.attack_path_value(), options)
        }
    }
}
