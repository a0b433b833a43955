//! A canvas node and the placements of its ports.

use log::debug;

use rosette_core::{
    geometry::{Angle, Point, Transform},
    identifier::Id,
};

use super::{Placement, Port, PortIndex, distribute};
use crate::{
    config::{LayoutConfig, Redistribution},
    error::RosetteError,
    model::{NodeKind, NodeModel, Side},
};

/// The ghost port radius is the node radius divided by this value.
pub const GHOST_RADIUS_DIVISOR: f64 = 1.5;

/// Placeholder port shown while a connection is being drawn.
///
/// A ghost port has no model and no angle. It never joins a node's port
/// collection and is never distributed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostPort {
    radius: f64,
    transform: Transform,
}

impl GhostPort {
    /// Node radius divided by [`GHOST_RADIUS_DIVISOR`].
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Always the identity; the drawing controller moves it.
    pub fn transform(&self) -> Transform {
        self.transform
    }
}

/// A circular node owning an ordered collection of ports.
///
/// Port placements always reflect the current number of visible ports per
/// side. Under [`Redistribution::Eager`] every [`GraphNode::add_port`]
/// re-places all visible ports of the new port's side, which is `O(k)` per
/// addition and `O(k²)` for `k` sequential additions; [`GraphNode::add_ports`]
/// inserts a batch and distributes once.
#[derive(Debug, Clone)]
pub struct GraphNode {
    id: Id,
    kind: NodeKind,
    label: String,
    connection_id: String,
    position: Point,
    radius: f64,
    arc: Angle,
    redistribution: Redistribution,
    ports: Vec<Port>,
    placements: Vec<Option<Placement>>,
}

impl GraphNode {
    /// Creates a node without ports.
    ///
    /// The label and connection id start out as the node id.
    ///
    /// # Arguments
    ///
    /// * `id` - Canvas-unique node id
    /// * `kind` - Step or parameter, used for styling
    /// * `position` - Centre of the node in canvas coordinates
    /// * `layout` - Supplies the radius, the per-side arc and the re-distribution policy
    ///
    /// # Examples
    ///
    /// ```
    /// # use rosette::{config::LayoutConfig, geometry::Point, identifier::Id, layout::GraphNode, model::NodeKind};
    /// let node = GraphNode::new(Id::new("align"), NodeKind::Step, Point::default(), &LayoutConfig::default())
    ///     .with_label("Align");
    ///
    /// assert_eq!(node.label(), "Align");
    /// assert_eq!(node.connection_id(), "align");
    /// assert_eq!(node.radius(), 40.0);
    /// assert!(node.ports().is_empty());
    /// ```
    pub fn new(id: Id, kind: NodeKind, position: Point, layout: &LayoutConfig) -> Self {
        Self {
            id,
            kind,
            label: id.to_string(),
            connection_id: id.to_string(),
            position,
            radius: layout.radius(),
            arc: layout.port_arc(),
            redistribution: layout.redistribution(),
            ports: Vec::new(),
            placements: Vec::new(),
        }
    }

    /// Creates a node from its model, adding the model's ports on both sides
    /// as a single batch.
    ///
    /// # Errors
    ///
    /// Returns [`RosetteError::DuplicatePort`] if the model declares the same
    /// port id twice.
    pub fn from_model(
        model: &NodeModel,
        position: Point,
        layout: &LayoutConfig,
    ) -> Result<Self, RosetteError> {
        let mut node = Self::new(model.id(), model.kind(), position, layout)
            .with_label(model.label())
            .with_connection_id(model.connection_id());

        let ports = Side::ALL.into_iter().flat_map(|side| {
            model
                .ports(side)
                .into_owned()
                .into_iter()
                .map(move |port| Port::new(port, side))
        });
        node.add_ports(ports)?;

        Ok(node)
    }

    /// Sets the title shown under the node.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the connection id emitted on the node group.
    pub fn with_connection_id(mut self, connection_id: impl Into<String>) -> Self {
        self.connection_id = connection_id.into();
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// Whether this is a step or an input or output parameter.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn connection_id(&self) -> &str {
        &self.connection_id
    }

    /// Centre of the node in canvas coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Moves the node. Port placements are relative and stay valid.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Radius of the circle the ports sit on.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// All ports in insertion order, visible or not.
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Looks up a port by id.
    pub fn port(&self, id: Id) -> Option<(PortIndex, &Port)> {
        self.ports
            .iter()
            .enumerate()
            .find(|(_, port)| port.id() == id)
            .map(|(index, port)| (PortIndex(index), port))
    }

    /// Number of visible ports on `side`.
    pub fn visible_port_count(&self, side: Side) -> usize {
        self.ports
            .iter()
            .filter(|port| port.side() == side && port.is_visible())
            .count()
    }

    /// Current placement of a port; `None` for hidden or not yet placed ports.
    pub fn placement(&self, index: PortIndex) -> Option<&Placement> {
        self.placements.get(index.0).and_then(Option::as_ref)
    }

    /// Current placement of the port with the given id.
    pub fn placement_of(&self, id: Id) -> Option<&Placement> {
        let (index, _) = self.port(id)?;
        self.placement(index)
    }

    /// Placed ports of `side`, in descending-id order.
    pub fn placed_ports(&self, side: Side) -> Vec<(&Port, &Placement)> {
        let mut placed: Vec<(&Port, &Placement)> = self
            .ports
            .iter()
            .zip(&self.placements)
            .filter(|(port, _)| port.side() == side)
            .filter_map(|(port, placement)| placement.as_ref().map(|placement| (port, placement)))
            .collect();
        placed.sort_by_key(|(_, placement)| placement.order());
        placed
    }

    /// Canvas position of a placed port's anchor.
    pub fn port_position(&self, id: Id) -> Option<Point> {
        let placement = self.placement_of(id)?;
        Some(
            self.position
                .add_point(placement.transform().apply(Point::default())),
        )
    }

    /// Inserts a port.
    ///
    /// Under [`Redistribution::Eager`] all visible ports of the port's side
    /// are placed again, so the new count is reflected immediately.
    ///
    /// # Errors
    ///
    /// Returns [`RosetteError::DuplicatePort`] if a port with the same id is
    /// already attached to this node.
    pub fn add_port(&mut self, port: Port) -> Result<PortIndex, RosetteError> {
        self.ensure_unique(port.id())?;

        let side = port.side();
        let index = self.push_port(port);
        if self.redistribution == Redistribution::Eager {
            self.distribute_side(side);
        }
        Ok(index)
    }

    /// Inserts several ports, then distributes the affected sides once.
    ///
    /// The batch is validated up front: on error no port is inserted.
    ///
    /// # Errors
    ///
    /// Returns [`RosetteError::DuplicatePort`] if any id is already attached
    /// or repeats within the batch.
    pub fn add_ports(
        &mut self,
        ports: impl IntoIterator<Item = Port>,
    ) -> Result<Vec<PortIndex>, RosetteError> {
        let ports: Vec<Port> = ports.into_iter().collect();
        for (position, port) in ports.iter().enumerate() {
            self.ensure_unique(port.id())?;
            if ports[..position].iter().any(|other| other.id() == port.id()) {
                return Err(RosetteError::DuplicatePort {
                    node: self.id,
                    port: port.id(),
                });
            }
        }

        let mut touched = Vec::with_capacity(2);
        let indices = ports
            .into_iter()
            .map(|port| {
                if !touched.contains(&port.side()) {
                    touched.push(port.side());
                }
                self.push_port(port)
            })
            .collect();

        if self.redistribution == Redistribution::Eager {
            for side in touched {
                self.distribute_side(side);
            }
        }
        Ok(indices)
    }

    /// Places every visible port on both sides.
    ///
    /// Idempotent: with an unchanged port collection the resulting
    /// placements are identical. A side without visible ports is left
    /// untouched.
    pub fn distribute_ports(&mut self) {
        for side in Side::ALL {
            self.distribute_side(side);
        }
    }

    /// Creates a ghost port sized for this node.
    pub fn ghost_port(&self) -> GhostPort {
        GhostPort {
            radius: self.radius / GHOST_RADIUS_DIVISOR,
            transform: Transform::identity(),
        }
    }

    fn ensure_unique(&self, id: Id) -> Result<(), RosetteError> {
        if self.port(id).is_some() {
            return Err(RosetteError::DuplicatePort {
                node: self.id,
                port: id,
            });
        }
        Ok(())
    }

    fn push_port(&mut self, port: Port) -> PortIndex {
        self.ports.push(port);
        self.placements.push(None);
        PortIndex(self.ports.len() - 1)
    }

    fn distribute_side(&mut self, side: Side) {
        let placements = distribute(&self.ports, side, self.radius, self.arc);
        if placements.is_empty() {
            return;
        }

        debug!(
            node_id:% = self.id,
            side:% = side,
            count = placements.len();
            "Distributing ports"
        );
        for placement in placements {
            self.placements[placement.port().index()] = Some(placement);
        }
    }
}
