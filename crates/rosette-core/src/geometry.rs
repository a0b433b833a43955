//! Geometric primitives for node and port placement.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in canvas space
//! - [`Angle`] - An angle measured in degrees
//! - [`Transform`] - A 2D affine matrix in SVG layout
//!
//! # Coordinate System
//!
//! Rosette uses the SVG coordinate system:
//!
//! ```text
//!   (0,0) ────────► +X   (0°)
//!     │
//!     │
//!     ▼
//!    +Y  (90°)
//! ```
//!
//! Angles are measured from the local +X axis and grow clockwise on screen,
//! because the Y axis points down.

use std::{fmt, ops::Neg};

use serde::Deserialize;

/// Tolerance used by the approximate predicates on [`Transform`].
const EPSILON: f64 = 1e-9;

/// A 2D point in canvas coordinate space.
///
/// Missing fields deserialize as `0.0`, so a partial position such as
/// `{ x = 10 }` is accepted.
///
/// # Examples
///
/// ```
/// # use rosette_core::geometry::Point;
/// let a = Point::new(3.0, 0.0);
/// let b = Point::new(0.0, 4.0);
///
/// assert_eq!(a.distance(b), 5.0);
/// assert_eq!(a.add_point(b), Point::new(3.0, 4.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Euclidean distance from the origin
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between this point and `other`
    pub fn distance(self, other: Point) -> f64 {
        other.sub_point(self).hypot()
    }
}

/// An angle in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Angle(f64);

impl Angle {
    /// Creates an angle from a value in degrees
    pub const fn from_degrees(degrees: f64) -> Self {
        Self(degrees)
    }

    /// Returns the angle in degrees
    pub const fn degrees(self) -> f64 {
        self.0
    }

    /// Returns the angle in radians
    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }
}

impl Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// A 2D affine transform.
///
/// The six components follow the SVG `matrix(a, b, c, d, e, f)` layout:
///
/// ```text
/// | a  c  e |
/// | b  d  f |
/// | 0  0  1 |
/// ```
///
/// Transforms are immutable values. [`Transform::translate`] and
/// [`Transform::rotate`] post-multiply, so a chain reads in the same order
/// as an SVG `transform` attribute: the last step is applied to the content
/// first.
///
/// # Examples
///
/// ```
/// # use rosette_core::geometry::{Angle, Point, Transform};
/// let m = Transform::identity()
///     .translate(10.0, 0.0)
///     .rotate(Angle::from_degrees(90.0));
///
/// let p = m.apply(Point::new(1.0, 0.0));
/// assert!((p.x() - 10.0).abs() < 1e-9);
/// assert!((p.y() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Creates a transform from its six SVG matrix components.
    ///
    /// # Arguments
    ///
    /// * `a`, `b`, `c`, `d` - The linear part, column by column
    /// * `e`, `f` - The translation
    ///
    /// # Examples
    ///
    /// ```
    /// # use rosette_core::geometry::{Point, Transform};
    /// let m = Transform::new(1.0, 0.0, 0.0, 1.0, 5.0, -2.0);
    ///
    /// assert!(m.is_translation());
    /// assert_eq!(m.apply(Point::new(1.0, 1.0)), Point::new(6.0, -1.0));
    /// ```
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// The identity transform
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// A pure translation by `(tx, ty)`
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// A rotation about the origin
    pub fn rotation(angle: Angle) -> Self {
        let (sin, cos) = angle.radians().sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Horizontal scale component
    pub fn a(self) -> f64 {
        self.a
    }

    /// Vertical skew component
    pub fn b(self) -> f64 {
        self.b
    }

    /// Horizontal skew component
    pub fn c(self) -> f64 {
        self.c
    }

    /// Vertical scale component
    pub fn d(self) -> f64 {
        self.d
    }

    /// Horizontal translation
    pub fn e(self) -> f64 {
        self.e
    }

    /// Vertical translation
    pub fn f(self) -> f64 {
        self.f
    }

    /// Returns `self × other`: `other` is applied first, then `self`.
    pub fn multiply(self, other: Transform) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Appends a translation to the chain
    pub fn translate(self, tx: f64, ty: f64) -> Self {
        self.multiply(Self::translation(tx, ty))
    }

    /// Appends a rotation about the origin to the chain
    pub fn rotate(self, angle: Angle) -> Self {
        self.multiply(Self::rotation(angle))
    }

    /// Maps a point through this transform
    pub fn apply(self, point: Point) -> Point {
        Point::new(
            self.a * point.x() + self.c * point.y() + self.e,
            self.b * point.x() + self.d * point.y() + self.f,
        )
    }

    /// Returns the inverse transform, or `None` if the matrix is singular.
    pub fn inverse(self) -> Option<Self> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() < EPSILON {
            return None;
        }

        Some(Self {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }

    /// The translation component `(e, f)`
    pub fn translation_part(self) -> Point {
        Point::new(self.e, self.f)
    }

    /// True when the linear part is the identity, within tolerance
    pub fn is_translation(self) -> bool {
        (self.a - 1.0).abs() < EPSILON
            && self.b.abs() < EPSILON
            && self.c.abs() < EPSILON
            && (self.d - 1.0).abs() < EPSILON
    }

    /// True when this is the identity transform, within tolerance
    pub fn is_identity(self) -> bool {
        self.is_translation() && self.e.abs() < EPSILON && self.f.abs() < EPSILON
    }
}

impl fmt::Display for Transform {
    /// Formats the transform as an SVG `matrix(...)` function
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "matrix({}, {}, {}, {}, {}, {})",
            self.a, self.b, self.c, self.d, self.e, self.f
        )
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f64..1000.0, -1000.0f64..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn angle_strategy() -> impl Strategy<Value = Angle> {
        (0.0f64..360.0).prop_map(Angle::from_degrees)
    }

    fn rigid_transform_strategy() -> impl Strategy<Value = Transform> {
        (angle_strategy(), point_strategy()).prop_map(|(angle, offset)| {
            Transform::translation(offset.x(), offset.y()).rotate(angle)
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Applying a transform and then its inverse returns the original point.
    fn check_inverse_roundtrip(m: Transform, p: Point) -> Result<(), TestCaseError> {
        let inverse = m.inverse().expect("rigid transforms are invertible");
        let back = inverse.apply(m.apply(p));

        prop_assert!(approx_eq!(f64, back.x(), p.x(), epsilon = 1e-6));
        prop_assert!(approx_eq!(f64, back.y(), p.y(), epsilon = 1e-6));
        Ok(())
    }

    /// Rotations about the origin preserve the distance to the origin.
    fn check_rotation_preserves_length(angle: Angle, p: Point) -> Result<(), TestCaseError> {
        let rotated = Transform::rotation(angle).apply(p);
        prop_assert!(approx_eq!(f64, rotated.hypot(), p.hypot(), epsilon = 1e-6));
        Ok(())
    }

    /// Applying a product equals applying the factors one after the other.
    fn check_multiply_matches_sequential_apply(
        m1: Transform,
        m2: Transform,
        p: Point,
    ) -> Result<(), TestCaseError> {
        let combined = m1.multiply(m2).apply(p);
        let sequential = m1.apply(m2.apply(p));

        prop_assert!(approx_eq!(f64, combined.x(), sequential.x(), epsilon = 1e-6));
        prop_assert!(approx_eq!(f64, combined.y(), sequential.y(), epsilon = 1e-6));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn inverse_roundtrip(m in rigid_transform_strategy(), p in point_strategy()) {
            check_inverse_roundtrip(m, p)?;
        }

        #[test]
        fn rotation_preserves_length(angle in angle_strategy(), p in point_strategy()) {
            check_rotation_preserves_length(angle, p)?;
        }

        #[test]
        fn multiply_matches_sequential_apply(
            m1 in rigid_transform_strategy(),
            m2 in rigid_transform_strategy(),
            p in point_strategy(),
        ) {
            check_multiply_matches_sequential_apply(m1, m2, p)?;
        }
    }
}
