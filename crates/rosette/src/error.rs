//! Error types for Rosette operations.
//!
//! This module provides the main error type [`RosetteError`]. Geometry is
//! infallible; errors come from loading documents and configuration,
//! violating identifier uniqueness, or walking a malformed scene graph.

use std::io;

use thiserror::Error;

use rosette_core::identifier::Id;

use crate::scene::SceneError;

/// The main error type for Rosette operations.
#[derive(Debug, Error)]
pub enum RosetteError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Node `{0}` is defined more than once")]
    DuplicateNode(Id),

    #[error("Port `{port}` is defined more than once on node `{node}`")]
    DuplicatePort { node: Id, port: Id },

    #[error("Unknown node `{0}`")]
    UnknownNode(Id),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for RosetteError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
