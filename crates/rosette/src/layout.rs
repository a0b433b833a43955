//! Radial port layout.
//!
//! Ports sit on the circumference of their node. Each side owns an arc
//! (see [`port_angle`]), the visible ports of a side are ordered by
//! descending id and spread evenly over that arc, and every port receives a
//! [`placement_transform`] that moves it onto the circle without rotating
//! its label.
//!
//! [`distribute`] is the pure core: it reads a port collection and returns
//! new placements. [`GraphNode`] owns a port collection and keeps its
//! placements in step with it.

mod angle;
mod node;
mod placement;

pub use angle::{PORT_ARC, port_angle};
pub use node::{GHOST_RADIUS_DIVISOR, GhostPort, GraphNode};
pub use placement::placement_transform;

use std::borrow::Cow;

use log::trace;

use rosette_core::{
    geometry::{Angle, Transform},
    identifier::Id,
};

use crate::model::{PortModel, Side};

/// Stable handle of a port inside its node's port collection.
///
/// Indices follow insertion order and never change, since ports are not
/// removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortIndex(usize);

impl PortIndex {
    /// Position in the node's port collection.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A port attached to a node side.
#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    model: PortModel,
    side: Side,
}

impl Port {
    /// Creates a port on one side of a node.
    ///
    /// # Arguments
    ///
    /// * `model` - Id, label, connection id and visibility of the port
    /// * `side` - Whether the port accepts inputs or emits outputs
    ///
    /// # Examples
    ///
    /// ```
    /// # use rosette::{identifier::Id, layout::Port, model::{PortModel, Side}};
    /// let port = Port::new(PortModel::new(Id::new("bam"), "#align/bam"), Side::Output);
    ///
    /// assert_eq!(port.id(), "bam");
    /// assert_eq!(port.label(), "bam");
    /// assert!(port.is_visible());
    /// ```
    pub fn new(model: PortModel, side: Side) -> Self {
        Self { model, side }
    }

    pub fn id(&self) -> Id {
        self.model.id()
    }

    /// The node side the port belongs to.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Hidden ports keep their slot in the collection but are never placed.
    pub fn is_visible(&self) -> bool {
        self.model.is_visible()
    }

    /// Target reference used by connections, emitted as `data-connection-id`.
    pub fn connection_id(&self) -> &str {
        self.model.connection_id()
    }

    /// Display label, or the id when the model has none.
    pub fn label(&self) -> Cow<'_, str> {
        self.model.label()
    }

    /// The underlying port model.
    pub fn model(&self) -> &PortModel {
        &self.model
    }
}

/// Where one port sits on its node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    port: PortIndex,
    order: usize,
    angle: Angle,
    transform: Transform,
}

impl Placement {
    /// The placed port.
    pub fn port(&self) -> PortIndex {
        self.port
    }

    /// Position of the port in its side's descending-id order.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Angle on the node circle, in degrees clockwise from the positive x axis.
    pub fn angle(&self) -> Angle {
        self.angle
    }

    /// Transform relative to the node centre.
    pub fn transform(&self) -> Transform {
        self.transform
    }
}

/// Computes placements for the visible ports of `side`.
///
/// Ports are ordered by descending id before angles are assigned, so the
/// greatest id takes index 0. Returned placements follow that order. An
/// empty result means the side has nothing to place.
pub fn distribute(ports: &[Port], side: Side, radius: f64, arc: Angle) -> Vec<Placement> {
    let mut ordered: Vec<PortIndex> = ports
        .iter()
        .enumerate()
        .filter(|(_, port)| port.side() == side && port.is_visible())
        .map(|(index, _)| PortIndex(index))
        .collect();

    ordered.sort_by(|lhs, rhs| ports[rhs.0].id().cmp_collated(ports[lhs.0].id()));

    let total = ordered.len();
    ordered
        .into_iter()
        .enumerate()
        .map(|(order, port)| {
            let angle = port_angle(order, total, side, arc);
            let transform = placement_transform(angle, radius);
            trace!(
                port_id:% = ports[port.0].id(),
                side:% = side,
                order = order,
                angle = angle.degrees();
                "Placed port"
            );
            Placement {
                port,
                order,
                angle,
                transform,
            }
        })
        .collect()
}
