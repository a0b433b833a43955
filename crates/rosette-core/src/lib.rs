//! Rosette Core Types
//!
//! This crate provides the foundational value types shared by the Rosette
//! workflow canvas crates:
//!
//! - **Identifiers**: String-interned identifiers ([`identifier::Id`])
//! - **Geometry**: Points, angles and SVG-style affine transforms ([`geometry`] module)

pub mod geometry;
pub mod identifier;
