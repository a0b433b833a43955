//! Scene graph and coordinate resolution between nested elements.
//!
//! # Overview
//!
//! - [`SceneGraph`] - Arena of elements, each with an optional parent and a local [`Transform`].
//! - [`ElementId`] - Stable handle of an element inside its graph.
//! - [`SceneError`] - Failures while walking an element's ancestry.
//!
//! An element without a parent is the root of its tree. The root's own
//! transform is never accumulated: it stands for the canvas viewport, and
//! offsets are measured inside it.
//!
//! Only the translation component `(e, f)` of each ancestor is summed. An
//! ancestor that rotates or scales its content produces a wrong offset
//! without any error being reported.

use std::fmt;

use thiserror::Error;

use rosette_core::geometry::{Point, Transform};

/// Handle of an element inside a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors raised while resolving element coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("Element {0} does not belong to this scene graph")]
    UnknownElement(ElementId),

    #[error("Ancestry of element {0} does not reach a root")]
    AncestryCycle(ElementId),
}

#[derive(Debug, Clone)]
struct Element {
    parent: Option<ElementId>,
    transform: Transform,
}

/// Arena of transformed elements forming one or more trees.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    elements: Vec<Element>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Adds an element without a parent.
    pub fn add_root(&mut self, transform: Transform) -> ElementId {
        self.push(None, transform)
    }

    /// Adds an element under `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownElement`] if `parent` is not part of this graph.
    pub fn add_child(
        &mut self,
        parent: ElementId,
        transform: Transform,
    ) -> Result<ElementId, SceneError> {
        self.element(parent)?;
        Ok(self.push(Some(parent), transform))
    }

    /// Moves `element` under `parent`.
    ///
    /// Cycles are not rejected here; resolving coordinates through one
    /// fails with [`SceneError::AncestryCycle`].
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownElement`] if either handle is not part of this graph.
    pub fn reparent(&mut self, element: ElementId, parent: ElementId) -> Result<(), SceneError> {
        self.element(parent)?;
        self.element_mut(element)?.parent = Some(parent);
        Ok(())
    }

    /// Replaces the local transform of `element`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownElement`] if `element` is not part of this graph.
    pub fn set_transform(
        &mut self,
        element: ElementId,
        transform: Transform,
    ) -> Result<(), SceneError> {
        self.element_mut(element)?.transform = transform;
        Ok(())
    }

    /// Local transform of `element`.
    pub fn transform(&self, element: ElementId) -> Result<Transform, SceneError> {
        Ok(self.element(element)?.transform)
    }

    /// Parent of `element`, `None` for a root.
    pub fn parent(&self, element: ElementId) -> Result<Option<ElementId>, SceneError> {
        Ok(self.element(element)?.parent)
    }

    /// Sum of the translations of `element` and its ancestors, excluding the root.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownElement`] for a foreign handle and
    /// [`SceneError::AncestryCycle`] when the parent chain loops.
    pub fn absolute_translation(&self, element: ElementId) -> Result<Point, SceneError> {
        let mut total = Point::default();
        let mut current = self.element(element)?;

        // A chain longer than the arena must revisit an element.
        for _ in 0..=self.elements.len() {
            let Some(parent) = current.parent else {
                return Ok(total);
            };
            total = total.add_point(current.transform.translation_part());
            current = self.element(parent)?;
        }

        Err(SceneError::AncestryCycle(element))
    }

    /// Translation that maps points in `to`'s frame into `from`'s frame.
    pub fn relative_offset(&self, from: ElementId, to: ElementId) -> Result<Transform, SceneError> {
        let offset = self
            .absolute_translation(to)?
            .sub_point(self.absolute_translation(from)?);
        Ok(Transform::translation(offset.x(), offset.y()))
    }

    /// Translation that maps points in `from`'s frame into `to`'s frame.
    ///
    /// This is the inverse of [`SceneGraph::relative_offset`] and the value
    /// a drag or connection controller applies to move a delta between the
    /// two elements.
    pub fn transform_to_element(
        &self,
        from: ElementId,
        to: ElementId,
    ) -> Result<Transform, SceneError> {
        let offset = self.relative_offset(from, to)?;
        Ok(Transform::translation(-offset.e(), -offset.f()))
    }

    fn push(&mut self, parent: Option<ElementId>, transform: Transform) -> ElementId {
        self.elements.push(Element { parent, transform });
        ElementId(self.elements.len() - 1)
    }

    fn element(&self, id: ElementId) -> Result<&Element, SceneError> {
        self.elements
            .get(id.0)
            .ok_or(SceneError::UnknownElement(id))
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut Element, SceneError> {
        self.elements
            .get_mut(id.0)
            .ok_or(SceneError::UnknownElement(id))
    }
}
