//! Export of laid-out canvases.
//!
//! This module provides the [`Exporter`] trait, the last stage of the
//! pipeline:
//!
//! ```text
//! Canvas document
//!     ↓ parse
//! Node models + positions
//!     ↓ layout
//! Canvas (nodes with placed ports)
//!     ↓ export (this module)
//! Output document
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::Svg`]
//!
//! [`Error`] converts into [`RosetteError::Export`] at the crate boundary.
//!
//! [`RosetteError::Export`]: crate::RosetteError::Export

/// SVG export backend.
pub mod svg;

use thiserror::Error;

use crate::canvas::Canvas;

/// Abstraction for canvas export backends.
pub trait Exporter {
    /// Exports every node of `canvas` with its placed ports.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the canvas cannot be expressed in the
    /// target format.
    fn export_canvas(&mut self, canvas: &Canvas) -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum Error {
    /// A rendering or conversion failure described by the message.
    #[error("Render error: {0}")]
    Render(String),
}
