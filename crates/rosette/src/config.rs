//! Configuration types for Rosette canvases.
//!
//! All types implement [`serde::Deserialize`] and fall back to the stock
//! values for every missing field.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Node radius, per-side port arc and the re-distribution policy.
//! - [`StyleConfig`] - Proportions used by the SVG exporter.
//!
//! # Example
//!
//! ```
//! # use rosette::config::AppConfig;
//! let config = AppConfig::from_toml_str(
//!     r#"
//!     [layout]
//!     radius = 60.0
//!     "#,
//! )
//! .expect("valid config");
//!
//! assert_eq!(config.layout().radius(), 60.0);
//! assert_eq!(config.layout().port_arc().degrees(), 140.0);
//! ```

use std::{fs, path::Path};

use log::debug;
use serde::Deserialize;

use rosette_core::geometry::Angle;

use crate::{error::RosetteError, layout::PORT_ARC};

/// Top-level configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its two sections.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Parses a TOML configuration document.
    ///
    /// Both sections are validated while they deserialize, so any
    /// `serde` entry point rejects out-of-range values the same way.
    ///
    /// # Arguments
    ///
    /// * `source` - TOML text with optional `[layout]` and `[style]` tables
    ///
    /// # Errors
    ///
    /// Returns [`RosetteError::Parse`] for malformed TOML and for
    /// out-of-range values; the message names the offending field.
    pub fn from_toml_str(source: &str) -> Result<Self, RosetteError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`RosetteError::Io`] if the file cannot be read, otherwise
    /// the errors of [`AppConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RosetteError> {
        let path = path.as_ref();
        debug!(path:? = path; "Loading configuration file");
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// When a node recomputes port placements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Redistribution {
    /// Every added port re-distributes all visible ports of its side.
    #[default]
    Eager,
    /// Ports are only placed by an explicit `distribute_ports` call.
    Deferred,
}

/// Layout configuration shared by every node of a canvas.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "LayoutSection")]
pub struct LayoutConfig {
    /// Radius of the node circle the ports sit on.
    radius: f64,

    /// Angular span per side, in degrees.
    port_arc: f64,

    redistribution: Redistribution,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            radius: 40.0,
            port_arc: PORT_ARC.degrees(),
            redistribution: Redistribution::default(),
        }
    }
}

/// Unvalidated `[layout]` table.
#[derive(Deserialize)]
#[serde(default)]
struct LayoutSection {
    radius: f64,
    port_arc: f64,
    redistribution: Redistribution,
}

impl Default for LayoutSection {
    fn default() -> Self {
        let LayoutConfig {
            radius,
            port_arc,
            redistribution,
        } = LayoutConfig::default();
        Self {
            radius,
            port_arc,
            redistribution,
        }
    }
}

impl TryFrom<LayoutSection> for LayoutConfig {
    type Error = RosetteError;

    fn try_from(section: LayoutSection) -> Result<Self, Self::Error> {
        let config = Self {
            radius: section.radius,
            port_arc: section.port_arc,
            redistribution: section.redistribution,
        };
        config.validate()?;
        Ok(config)
    }
}

impl LayoutConfig {
    /// Creates a layout configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RosetteError::Config`] when the radius is negative or not
    /// finite, or when the arc is outside `(0, 180]` degrees.
    pub fn new(
        radius: f64,
        port_arc: Angle,
        redistribution: Redistribution,
    ) -> Result<Self, RosetteError> {
        let config = Self {
            radius,
            port_arc: port_arc.degrees(),
            redistribution,
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns the node radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the angular span available to the ports of one side.
    pub fn port_arc(&self) -> Angle {
        Angle::from_degrees(self.port_arc)
    }

    /// Returns the re-distribution policy.
    pub fn redistribution(&self) -> Redistribution {
        self.redistribution
    }

    fn validate(&self) -> Result<(), RosetteError> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(RosetteError::Config(format!(
                "radius must be a finite non-negative number, got {}",
                self.radius
            )));
        }
        // Wider arcs would let the input and output sides overlap.
        if !(self.port_arc > 0.0 && self.port_arc <= 180.0) {
            return Err(RosetteError::Config(format!(
                "port_arc must be in (0, 180] degrees, got {}",
                self.port_arc
            )));
        }
        Ok(())
    }
}

/// Proportions used when exporting nodes to SVG.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "StyleSection")]
pub struct StyleConfig {
    /// Inner circle radius as a fraction of the node radius.
    inner_radius_ratio: f64,

    /// Radius of the circular port handle.
    port_handle_radius: f64,

    /// Distance between the node's bottom edge and its title baseline.
    title_offset: f64,

    /// Empty space around the canvas content.
    margin: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            inner_radius_ratio: 0.75,
            port_handle_radius: 7.0,
            title_offset: 30.0,
            margin: 50.0,
        }
    }
}

/// Unvalidated `[style]` table.
#[derive(Deserialize)]
#[serde(default)]
struct StyleSection {
    inner_radius_ratio: f64,
    port_handle_radius: f64,
    title_offset: f64,
    margin: f64,
}

impl Default for StyleSection {
    fn default() -> Self {
        let StyleConfig {
            inner_radius_ratio,
            port_handle_radius,
            title_offset,
            margin,
        } = StyleConfig::default();
        Self {
            inner_radius_ratio,
            port_handle_radius,
            title_offset,
            margin,
        }
    }
}

impl TryFrom<StyleSection> for StyleConfig {
    type Error = RosetteError;

    fn try_from(section: StyleSection) -> Result<Self, Self::Error> {
        let config = Self {
            inner_radius_ratio: section.inner_radius_ratio,
            port_handle_radius: section.port_handle_radius,
            title_offset: section.title_offset,
            margin: section.margin,
        };
        config.validate()?;
        Ok(config)
    }
}

impl StyleConfig {
    /// Inner circle radius as a fraction of the node radius.
    pub fn inner_radius_ratio(&self) -> f64 {
        self.inner_radius_ratio
    }

    /// Radius of the circular port handle.
    pub fn port_handle_radius(&self) -> f64 {
        self.port_handle_radius
    }

    /// Gap between the node circle and its title.
    pub fn title_offset(&self) -> f64 {
        self.title_offset
    }

    /// Empty space around the rendered content.
    pub fn margin(&self) -> f64 {
        self.margin
    }

    fn validate(&self) -> Result<(), RosetteError> {
        let fields = [
            ("inner_radius_ratio", self.inner_radius_ratio),
            ("port_handle_radius", self.port_handle_radius),
            ("title_offset", self.title_offset),
            ("margin", self.margin),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(RosetteError::Config(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.layout().radius(), 40.0);
        assert_eq!(config.layout().port_arc().degrees(), 140.0);
        assert_eq!(config.layout().redistribution(), Redistribution::Eager);
        assert_eq!(config.style().port_handle_radius(), 7.0);
        assert_eq!(config.style().inner_radius_ratio(), 0.75);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_toml_str("").expect("empty config is valid");
        assert_eq!(config.layout().radius(), 40.0);
        assert_eq!(config.style().margin(), 50.0);
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml_str(
            r#"
            [layout]
            port_arc = 120.0
            redistribution = "deferred"

            [style]
            title_offset = 12.0
            "#,
        )
        .expect("valid config");

        assert_eq!(config.layout().radius(), 40.0);
        assert_eq!(config.layout().port_arc().degrees(), 120.0);
        assert_eq!(config.layout().redistribution(), Redistribution::Deferred);
        assert_eq!(config.style().title_offset(), 12.0);
        assert_eq!(config.style().port_handle_radius(), 7.0);
    }

    #[test]
    fn test_invalid_arc_rejected() {
        let result = AppConfig::from_toml_str("[layout]\nport_arc = 200.0\n");
        match result {
            Err(RosetteError::Parse(err)) => assert!(err.to_string().contains("port_arc")),
            other => panic!("expected a parse error, got {other:?}"),
        }

        let result = AppConfig::from_toml_str("[layout]\nport_arc = 0.0\n");
        assert!(matches!(result, Err(RosetteError::Parse(_))));
    }

    #[test]
    fn test_direct_deserialization_validates() {
        let result = toml::from_str::<AppConfig>("[layout]\nport_arc = 200.0\n");
        assert!(result.is_err());

        let result = toml::from_str::<LayoutConfig>("radius = -5.0\n");
        assert!(result.is_err());

        let result = toml::from_str::<StyleConfig>("margin = -1.0\n");
        assert!(result.is_err());

        let layout: LayoutConfig = toml::from_str("radius = 12.0\n").expect("valid layout");
        assert_eq!(layout.radius(), 12.0);
        assert_eq!(layout.port_arc().degrees(), 140.0);
    }

    #[test]
    fn test_negative_radius_rejected() {
        let result = LayoutConfig::new(-1.0, PORT_ARC, Redistribution::Eager);
        assert!(matches!(result, Err(RosetteError::Config(_))));
    }

    #[test]
    fn test_zero_radius_allowed() {
        let config = LayoutConfig::new(0.0, PORT_ARC, Redistribution::Eager)
            .expect("zero radius is valid");
        assert_eq!(config.radius(), 0.0);
    }

    #[test]
    fn test_malformed_toml() {
        let result = AppConfig::from_toml_str("[layout\nradius = ");
        assert!(matches!(result, Err(RosetteError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = AppConfig::from_file("/nonexistent/rosette/config.toml");
        assert!(matches!(result, Err(RosetteError::Io(_))));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result = AppConfig::from_toml_str("[layout]\nredistribution = \"lazy\"\n");
        assert!(matches!(result, Err(RosetteError::Parse(_))));
    }
}
