//! Angular distribution of ports around a node.
//!
//! Each side owns an arc centred on its own axis: outputs around 0° (the
//! node's +X axis), inputs around 180°. `n` ports split the arc into `n + 1`
//! equal steps, leaving half a step of margin at both ends, so ports never
//! coincide and never reach the arc boundary.

use rosette_core::geometry::Angle;

use crate::model::Side;

/// Default angular span available to the ports of one side.
pub const PORT_ARC: Angle = Angle::from_degrees(140.0);

/// Angle of the port at `index` among `total` ports of `side`.
///
/// Output angles grow with the index, input angles shrink, so both sides
/// are walked top to bottom on screen.
///
/// `index` must be below `total`, so the divisor `total + 1` is never zero.
///
/// # Examples
///
/// ```
/// # use rosette::layout::{port_angle, PORT_ARC};
/// # use rosette::model::Side;
/// let angles: Vec<f64> = (0..3)
///     .map(|i| port_angle(i, 3, Side::Output, PORT_ARC).degrees())
///     .collect();
/// assert_eq!(angles, vec![-35.0, 0.0, 35.0]);
/// ```
pub fn port_angle(index: usize, total: usize, side: Side, arc: Angle) -> Angle {
    debug_assert!(index < total, "port index {index} out of range for {total} ports");

    let arc = arc.degrees();
    let step = arc / (total + 1) as f64;
    let offset = (index + 1) as f64 * step;

    let degrees = match side {
        Side::Output => -arc / 2.0 + offset,
        Side::Input => 180.0 + arc / 2.0 - offset,
    };
    Angle::from_degrees(degrees)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn angles(total: usize, side: Side) -> Vec<f64> {
        (0..total)
            .map(|i| port_angle(i, total, side, PORT_ARC).degrees())
            .collect()
    }

    #[test]
    fn test_three_outputs() {
        assert_eq!(angles(3, Side::Output), vec![-35.0, 0.0, 35.0]);
    }

    #[test]
    fn test_two_inputs() {
        let result = angles(2, Side::Input);
        assert_approx_eq!(f64, result[0], 203.333_333_333_333_3, epsilon = 1e-9);
        assert_approx_eq!(f64, result[1], 156.666_666_666_666_7, epsilon = 1e-9);
    }

    #[test]
    fn test_single_port_sits_on_axis() {
        assert_eq!(port_angle(0, 1, Side::Output, PORT_ARC).degrees(), 0.0);
        assert_eq!(port_angle(0, 1, Side::Input, PORT_ARC).degrees(), 180.0);
    }

    #[test]
    fn test_input_formula_matches_fixed_arc_form() {
        // With the default arc the input angle is 250 - (i + 1) * 140 / (n + 1).
        for total in 1..10 {
            for index in 0..total {
                let expected = 250.0 - (index + 1) as f64 * 140.0 / (total + 1) as f64;
                assert_approx_eq!(
                    f64,
                    port_angle(index, total, Side::Input, PORT_ARC).degrees(),
                    expected,
                    epsilon = 1e-9
                );
            }
        }
    }

    #[test]
    fn test_custom_arc() {
        let arc = Angle::from_degrees(90.0);
        assert_eq!(port_angle(0, 2, Side::Output, arc).degrees(), -15.0);
        assert_eq!(port_angle(1, 2, Side::Output, arc).degrees(), 15.0);
        assert_eq!(port_angle(0, 2, Side::Input, arc).degrees(), 195.0);
    }
}
