//! Workflow data model consumed by the layout engine.
//!
//! A canvas node is described by a [`NodeModel`]: a step with its declared
//! input and output ports, or a workflow-level input or output parameter.
//! Parameters carry no port lists of their own; they expose a single port
//! derived from the parameter itself (see [`NodeModel::ports`]).
//!
//! Models deserialize from a tagged document:
//!
//! ```
//! # use rosette::model::{NodeModel, NodeKind};
//! let node: NodeModel = toml::from_str(
//!     r##"
//!     kind = "step"
//!     id = "align"
//!     connection_id = "#align"
//!
//!     [[in]]
//!     id = "reads"
//!     connection_id = "#align/reads"
//!     "##,
//! )
//! .expect("valid node");
//!
//! assert_eq!(node.kind(), NodeKind::Step);
//! assert_eq!(node.label(), "align");
//! ```

use std::{borrow::Cow, fmt};

use serde::Deserialize;

use rosette_core::identifier::Id;

/// Which arc of the node a port belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Input,
    Output,
}

impl Side {
    /// Both sides, inputs first.
    pub const ALL: [Side; 2] = [Side::Input, Side::Output];

    /// CSS class of a port group on this side.
    pub fn port_class(self) -> &'static str {
        match self {
            Self::Input => "input-port",
            Self::Output => "output-port",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Output => f.write_str("output"),
        }
    }
}

fn visible_by_default() -> bool {
    true
}

/// An empty label counts as missing.
fn label_or_id(label: Option<&str>, id: Id) -> Cow<'_, str> {
    match label {
        Some(label) if !label.is_empty() => Cow::Borrowed(label),
        _ => Cow::Owned(id.to_string()),
    }
}

/// A port as declared by the workflow model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PortModel {
    id: Id,
    #[serde(default)]
    label: Option<String>,
    connection_id: String,
    #[serde(default = "visible_by_default")]
    is_visible: bool,
}

impl PortModel {
    /// Creates a visible port without a label.
    ///
    /// # Arguments
    ///
    /// * `id` - Port id, unique within its node
    /// * `connection_id` - Reference that connections attach to
    pub fn new(id: Id, connection_id: impl Into<String>) -> Self {
        Self {
            id,
            label: None,
            connection_id: connection_id.into(),
            is_visible: true,
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the visibility flag.
    pub fn with_visible(mut self, is_visible: bool) -> Self {
        self.is_visible = is_visible;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn connection_id(&self) -> &str {
        &self.connection_id
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    /// Display label, falling back to the id when absent or empty.
    pub fn label(&self) -> Cow<'_, str> {
        label_or_id(self.label.as_deref(), self.id)
    }
}

/// A workflow step with declared inputs and outputs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StepModel {
    id: Id,
    #[serde(default)]
    label: Option<String>,
    connection_id: String,
    #[serde(default, rename = "in")]
    inputs: Vec<PortModel>,
    #[serde(default, rename = "out")]
    outputs: Vec<PortModel>,
}

impl StepModel {
    pub fn new(id: Id, connection_id: impl Into<String>) -> Self {
        Self {
            id,
            label: None,
            connection_id: connection_id.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_input(mut self, port: PortModel) -> Self {
        self.inputs.push(port);
        self
    }

    pub fn with_output(mut self, port: PortModel) -> Self {
        self.outputs.push(port);
        self
    }

    pub fn inputs(&self) -> &[PortModel] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[PortModel] {
        &self.outputs
    }
}

/// A workflow-level input or output parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParameterModel {
    id: Id,
    #[serde(default)]
    label: Option<String>,
    connection_id: String,
}

impl ParameterModel {
    pub fn new(id: Id, connection_id: impl Into<String>) -> Self {
        Self {
            id,
            label: None,
            connection_id: connection_id.into(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The single port a parameter node exposes: its own id and connection.
    fn as_port(&self) -> PortModel {
        PortModel::new(self.id, self.connection_id.clone())
    }
}

/// Classification of a canvas node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Step,
    InputParameter,
    OutputParameter,
}

impl NodeKind {
    /// CSS class of the node group.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Step => "step",
            Self::InputParameter => "input",
            Self::OutputParameter => "output",
        }
    }
}

/// The model behind one canvas node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeModel {
    Step(StepModel),
    InputParameter(ParameterModel),
    OutputParameter(ParameterModel),
}

impl NodeModel {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Step(_) => NodeKind::Step,
            Self::InputParameter(_) => NodeKind::InputParameter,
            Self::OutputParameter(_) => NodeKind::OutputParameter,
        }
    }

    pub fn id(&self) -> Id {
        match self {
            Self::Step(step) => step.id,
            Self::InputParameter(param) | Self::OutputParameter(param) => param.id,
        }
    }

    pub fn connection_id(&self) -> &str {
        match self {
            Self::Step(step) => &step.connection_id,
            Self::InputParameter(param) | Self::OutputParameter(param) => &param.connection_id,
        }
    }

    /// Display label, falling back to the id when absent or empty.
    pub fn label(&self) -> Cow<'_, str> {
        let label = match self {
            Self::Step(step) => step.label.as_deref(),
            Self::InputParameter(param) | Self::OutputParameter(param) => param.label.as_deref(),
        };
        label_or_id(label, self.id())
    }

    /// Ports exposed on `side`.
    ///
    /// A workflow input parameter feeds the graph, so it exposes one output
    /// port and no inputs; a workflow output parameter is the reverse.
    pub fn ports(&self, side: Side) -> Cow<'_, [PortModel]> {
        match (self, side) {
            (Self::Step(step), Side::Input) => Cow::Borrowed(&step.inputs),
            (Self::Step(step), Side::Output) => Cow::Borrowed(&step.outputs),
            (Self::InputParameter(param), Side::Output)
            | (Self::OutputParameter(param), Side::Input) => Cow::Owned(vec![param.as_port()]),
            (Self::InputParameter(_), Side::Input) | (Self::OutputParameter(_), Side::Output) => {
                Cow::Borrowed(&[])
            }
        }
    }
}

impl From<StepModel> for NodeModel {
    fn from(step: StepModel) -> Self {
        Self::Step(step)
    }
}
