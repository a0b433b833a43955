//! SVG rendering of canvases.
//!
//! Every node becomes a group translated to the node position:
//!
//! ```text
//! g.node.{id}.{kind}          matrix(1, 0, 0, 1, x, y)
//! ├── g.drag-handle
//! │   ├── circle.outer        r = radius
//! │   └── circle.inner        r = radius * inner_radius_ratio
//! ├── text.title.label        below the node
//! └── g.port.{side}-port.{id} placement matrix, one per placed port
//!     ├── g.io-port.{id}
//!     │   └── circle.port-handle
//!     └── text.label.unselectable
//! ```
//!
//! Hidden ports have no placement and are not emitted.

use log::debug;
use svg::{Document, node::element as svg_element};

use rosette_core::geometry::{Point, Transform};

use crate::{
    canvas::Canvas,
    config::StyleConfig,
    export,
    layout::{GhostPort, GraphNode, Placement, Port},
    model::Side,
};

/// SVG exporter collecting its output in memory.
#[derive(Debug, Clone)]
pub struct Svg {
    style: StyleConfig,
    output: String,
}

impl Svg {
    /// Creates an exporter drawing with the proportions of `style`.
    pub fn new(style: StyleConfig) -> Self {
        Self {
            style,
            output: String::new(),
        }
    }

    /// The document produced by the last export, empty before the first one.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }

    /// Renders the whole canvas into a document sized to its content.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if a node sits at a non-finite position.
    pub fn render_canvas(&self, canvas: &Canvas) -> Result<Document, export::Error> {
        let (min, max) = self.content_bounds(canvas)?;
        let margin = self.style.margin();
        let width = (max.x() - min.x()) + margin * 2.0;
        let height = (max.y() - min.y()) + margin * 2.0;

        debug!(width = width, height = height, nodes = canvas.len(); "SVG canvas dimensions");

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    min.x() - margin,
                    min.y() - margin,
                    width,
                    height
                ),
            )
            .set("width", width)
            .set("height", height);

        for node in canvas.nodes() {
            doc = doc.add(self.render_node(node));
        }
        Ok(doc)
    }

    /// Renders one node with its placed ports, inputs first.
    pub fn render_node(&self, node: &GraphNode) -> svg_element::Group {
        let position = node.position();
        let radius = node.radius();

        let handle = svg_element::Group::new()
            .set("class", "drag-handle")
            .set("transform", Transform::identity().to_string())
            .add(circle(radius, "outer"))
            .add(circle(radius * self.style.inner_radius_ratio(), "inner"));

        let title = svg_element::Text::new(node.label())
            .set(
                "transform",
                Transform::translation(0.0, radius + self.style.title_offset()).to_string(),
            )
            .set("class", "title label");

        let mut group = svg_element::Group::new()
            .set("tabindex", "-1")
            .set(
                "class",
                format!("node {} {}", node.id(), node.kind().css_class()),
            )
            .set("data-connection-id", node.connection_id())
            .set("data-id", node.id().to_string())
            .set(
                "transform",
                Transform::translation(position.x(), position.y()).to_string(),
            )
            .add(handle)
            .add(title);

        for side in Side::ALL {
            for (port, placement) in node.placed_ports(side) {
                group = group.add(self.render_port(port, placement));
            }
        }
        group
    }

    /// Renders a port group carrying its placement transform.
    pub fn render_port(&self, port: &Port, placement: &Placement) -> svg_element::Group {
        let handle = svg_element::Group::new()
            .set("class", format!("io-port {}", port.id()))
            .add(circle(self.style.port_handle_radius(), "port-handle"));

        let label = svg_element::Text::new(port.label())
            .set("x", 0)
            .set("y", 0)
            .set("transform", Transform::identity().to_string())
            .set("class", "label unselectable");

        svg_element::Group::new()
            .set(
                "class",
                format!("port {} {}", port.side().port_class(), port.id()),
            )
            .set("transform", placement.transform().to_string())
            .set("data-connection-id", port.connection_id())
            .set("data-port-id", port.id().to_string())
            .add(handle)
            .add(label)
    }

    /// Renders the placeholder port used while a connection is drawn.
    pub fn render_ghost_port(&self, ghost: &GhostPort) -> svg_element::Group {
        svg_element::Group::new()
            .set("transform", ghost.transform().to_string())
            .set("class", "ghost node")
            .add(circle(ghost.radius(), "ghost-circle"))
    }

    /// Smallest box holding every node circle and title.
    fn content_bounds(&self, canvas: &Canvas) -> Result<(Point, Point), export::Error> {
        let mut bounds: Option<(Point, Point)> = None;

        for node in canvas.nodes() {
            let position = node.position();
            if !position.x().is_finite() || !position.y().is_finite() {
                return Err(export::Error::Render(format!(
                    "node `{}` has a non-finite position ({}, {})",
                    node.id(),
                    position.x(),
                    position.y()
                )));
            }

            let radius = node.radius();
            let top_left = Point::new(position.x() - radius, position.y() - radius);
            let bottom_right = Point::new(
                position.x() + radius,
                position.y() + radius + self.style.title_offset(),
            );

            bounds = Some(match bounds {
                None => (top_left, bottom_right),
                Some((min, max)) => (
                    Point::new(min.x().min(top_left.x()), min.y().min(top_left.y())),
                    Point::new(max.x().max(bottom_right.x()), max.y().max(bottom_right.y())),
                ),
            });
        }

        Ok(bounds.unwrap_or_default())
    }
}

impl export::Exporter for Svg {
    fn export_canvas(&mut self, canvas: &Canvas) -> Result<(), export::Error> {
        let doc = self.render_canvas(canvas)?;
        debug!("SVG document rendered");

        self.output = doc.to_string();
        Ok(())
    }
}

fn circle(radius: f64, class: &str) -> svg_element::Circle {
    svg_element::Circle::new()
        .set("cx", 0)
        .set("cy", 0)
        .set("r", radius)
        .set("class", class)
}
