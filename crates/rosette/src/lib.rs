//! Rosette - Radial port layout for workflow node canvases.
//!
//! Workflow steps and parameters are drawn as circles. Their input ports
//! fan out over an arc on the left of the circle, their outputs over an arc
//! on the right. Rosette computes where each port sits, keeps those
//! placements current as ports are added, resolves coordinates between
//! nested scene elements, and renders the result to SVG.
//!
//! # Overview
//!
//! - [`model`] - Node and port models, deserializable from TOML.
//! - [`layout`] - Port angles, placement transforms and [`layout::GraphNode`].
//! - [`canvas`] - The node arena of one diagram and its scene graph.
//! - [`scene`] - Scene graph and coordinate resolution between elements.
//! - [`export`] - SVG rendering.
//! - [`config`] - Layout and style configuration.

pub mod canvas;
pub mod config;
pub mod export;
pub mod layout;
pub mod model;
pub mod scene;

mod error;

pub use rosette_core::{geometry, identifier};

pub use canvas::{Canvas, CanvasScene};
pub use error::RosetteError;

use log::{debug, info, trace};
use serde::Deserialize;

use config::AppConfig;
use export::Exporter;
use geometry::Point;
use layout::GhostPort;
use model::NodeModel;

/// A canvas document: the nodes to lay out, each at a position.
#[derive(Debug, Deserialize)]
struct CanvasDocument {
    #[serde(default)]
    nodes: Vec<NodeEntry>,
}

#[derive(Debug, Deserialize)]
struct NodeEntry {
    #[serde(default)]
    position: Point,
    #[serde(flatten)]
    model: NodeModel,
}

/// Builder for laying out and rendering Rosette canvases.
///
/// # Examples
///
/// ```rust
/// use rosette::{CanvasBuilder, config::AppConfig};
///
/// let source = r##"
/// [[nodes]]
/// kind = "input_parameter"
/// id = "reads"
/// connection_id = "#reads"
/// position = { x = 0.0, y = 0.0 }
///
/// [[nodes]]
/// kind = "step"
/// id = "align"
/// connection_id = "#align"
/// position = { x = 200.0, y = 0.0 }
///
/// [[nodes.in]]
/// id = "reads"
/// connection_id = "#align/reads"
/// "##;
///
/// let builder = CanvasBuilder::new(AppConfig::default());
///
/// let canvas = builder.parse(source)
///     .expect("Failed to parse");
///
/// let svg = builder.render_svg(&canvas)
///     .expect("Failed to render");
/// assert!(svg.contains("input-port"));
/// ```
#[derive(Default)]
pub struct CanvasBuilder {
    config: AppConfig,
}

impl CanvasBuilder {
    /// Create a new canvas builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a TOML canvas document and lay out every node.
    ///
    /// Each `[[nodes]]` table holds a node model (`kind`, `id`, `label`,
    /// `connection_id`, and for steps `in`/`out` port arrays) plus an
    /// optional `position`, which defaults to the origin.
    ///
    /// # Errors
    ///
    /// Returns [`RosetteError::Parse`] for malformed documents,
    /// [`RosetteError::DuplicateNode`] and [`RosetteError::DuplicatePort`]
    /// for repeated identifiers.
    pub fn parse(&self, source: &str) -> Result<Canvas, RosetteError> {
        info!("Parsing canvas document");

        let document: CanvasDocument = toml::from_str(source)?;
        debug!(nodes = document.nodes.len(); "Canvas document parsed");

        let mut canvas = Canvas::new(self.config.layout().clone());
        for entry in &document.nodes {
            trace!(node:? = entry.model; "Adding node");
            canvas.add_node(&entry.model, entry.position)?;
        }

        info!(nodes = canvas.len(); "Canvas laid out");
        Ok(canvas)
    }

    /// Render a laid-out canvas to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`RosetteError::Export`] if the canvas cannot be rendered.
    pub fn render_svg(&self, canvas: &Canvas) -> Result<String, RosetteError> {
        info!(nodes = canvas.len(); "Rendering canvas");

        let mut exporter = export::svg::Svg::new(self.config.style().clone());
        exporter.export_canvas(canvas)?;

        info!("SVG rendered successfully");
        Ok(exporter.into_output())
    }

    /// Render the placeholder port shown while a connection is being drawn.
    pub fn render_ghost_port(&self, ghost: &GhostPort) -> String {
        export::svg::Svg::new(self.config.style().clone())
            .render_ghost_port(ghost)
            .to_string()
    }
}
