//! Placement transforms for ports on a node's circumference.

use rosette_core::geometry::{Angle, Transform};

/// Builds the transform that moves port content from the node centre to the
/// point at `angle` on a circle of `radius`, without rotating the content.
///
/// The chain is `rotate(angle) · translate(radius, 0) · rotate(-angle)`.
/// The trailing counter-rotation cancels the orientation change, so the
/// linear part is the identity and labels stay upright; the origin lands on
/// `(radius·cos(angle), radius·sin(angle))`. A zero radius yields the
/// identity.
///
/// # Examples
///
/// ```
/// # use rosette::geometry::{Angle, Point};
/// # use rosette::layout::placement_transform;
/// let m = placement_transform(Angle::from_degrees(90.0), 40.0);
/// let p = m.apply(Point::default());
///
/// assert!(p.x().abs() < 1e-9);
/// assert!((p.y() - 40.0).abs() < 1e-9);
/// assert!(m.is_translation());
/// ```
pub fn placement_transform(angle: Angle, radius: f64) -> Transform {
    Transform::identity()
        .rotate(angle)
        .translate(radius, 0.0)
        .rotate(-angle)
}
