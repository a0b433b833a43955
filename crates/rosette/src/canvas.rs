//! Canvas: the set of laid-out nodes of one diagram.
//!
//! # Overview
//!
//! - [`Canvas`] - Insertion-ordered arena of [`GraphNode`]s keyed by node id.
//! - [`CanvasScene`] - Scene graph mirroring the rendered canvas, with handles
//!   for every node and port element.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::debug;

use rosette_core::{
    geometry::{Point, Transform},
    identifier::Id,
};

use crate::{
    config::LayoutConfig,
    error::RosetteError,
    layout::GraphNode,
    model::{NodeModel, Side},
    scene::{ElementId, SceneGraph},
};

/// The nodes of one diagram, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    layout: LayoutConfig,
    nodes: IndexMap<Id, GraphNode>,
}

impl Canvas {
    /// Creates an empty canvas whose nodes follow `layout`.
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            layout,
            nodes: IndexMap::new(),
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Lays out `model` at `position` and adds it to the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`RosetteError::DuplicateNode`] if a node with the same id
    /// exists, or [`RosetteError::DuplicatePort`] if the model repeats a
    /// port id.
    pub fn add_node(&mut self, model: &NodeModel, position: Point) -> Result<Id, RosetteError> {
        let id = model.id();
        if self.nodes.contains_key(&id) {
            return Err(RosetteError::DuplicateNode(id));
        }

        let node = GraphNode::from_model(model, position, &self.layout)?;
        debug!(
            node_id:% = id,
            kind = node.kind().css_class(),
            ports = node.ports().len();
            "Added node"
        );
        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Looks up a node.
    ///
    /// # Errors
    ///
    /// Returns [`RosetteError::UnknownNode`] if no node has this id.
    pub fn node(&self, id: Id) -> Result<&GraphNode, RosetteError> {
        self.nodes.get(&id).ok_or(RosetteError::UnknownNode(id))
    }

    /// Looks up a node for modification, e.g. to add ports or move it.
    ///
    /// # Errors
    ///
    /// Returns [`RosetteError::UnknownNode`] if no node has this id.
    pub fn node_mut(&mut self, id: Id) -> Result<&mut GraphNode, RosetteError> {
        self.nodes.get_mut(&id).ok_or(RosetteError::UnknownNode(id))
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Builds the scene graph of the rendered canvas.
    ///
    /// The root stands for the canvas viewport. Each node becomes a group
    /// translated to the node position, and each placed port a child group
    /// carrying its placement transform. Hidden ports are left out.
    pub fn scene(&self) -> Result<CanvasScene, RosetteError> {
        let mut graph = SceneGraph::new();
        let root = graph.add_root(Transform::identity());
        let mut nodes = HashMap::with_capacity(self.nodes.len());
        let mut ports = HashMap::new();

        for node in self.nodes.values() {
            let position = node.position();
            let group = graph.add_child(root, Transform::translation(position.x(), position.y()))?;
            nodes.insert(node.id(), group);

            for side in Side::ALL {
                for (port, placement) in node.placed_ports(side) {
                    let element = graph.add_child(group, placement.transform())?;
                    ports.insert((node.id(), port.id()), element);
                }
            }
        }

        Ok(CanvasScene {
            graph,
            root,
            nodes,
            ports,
        })
    }
}

/// Scene graph of a rendered canvas.
#[derive(Debug, Clone)]
pub struct CanvasScene {
    graph: SceneGraph,
    root: ElementId,
    nodes: HashMap<Id, ElementId>,
    ports: HashMap<(Id, Id), ElementId>,
}

impl CanvasScene {
    /// The element tree backing this scene.
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Element of a node group.
    pub fn node(&self, node: Id) -> Option<ElementId> {
        self.nodes.get(&node).copied()
    }

    /// Element of a placed port group.
    pub fn port(&self, node: Id, port: Id) -> Option<ElementId> {
        self.ports.get(&(node, port)).copied()
    }
}
