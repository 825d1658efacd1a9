//! Miter joins.
//!
//! When two segments meet at a vertex, the stroke geometry extrudes that vertex along
//! a single normal. For the extruded outline to stay parallel to both segments at
//! the same distance, the normal is the bisector of the two segment normals, scaled
//! by `1 / cos(φ / 2)` where `φ` is the angle between the two normals:
//!
//! ```text
//! avg = normalize(n1 + n2)
//! join = avg / dot(avg, n1)
//! ```
//!
//! The scale factor grows without bound as the segments fold back onto each other,
//! so the join is clamped to a miter limit, in the same spirit as SVG's
//! `stroke-miterlimit`.

use crate::scalar::Scalar;
use crate::utils::normalized;
use crate::Vector;

/// The result of a miter join computation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MiterJoin<S> {
    /// The extrusion vector at the join.
    pub normal: Vector<S>,
    /// Whether the unclamped miter was longer than the miter limit.
    pub clamped: bool,
}

/// Compute the join normal between `n1`, the normal of the incoming segment, and
/// `n2`, the normal of the outgoing segment.
///
/// Both normals are expected to be normalized. The length of the result is at most
/// `miter_limit`. If the two normals cancel out (the path folds back onto itself),
/// the join falls back to `n1`.
pub fn miter_normal<S: Scalar>(n1: Vector<S>, n2: Vector<S>, miter_limit: S) -> MiterJoin<S> {
    debug_assert!(miter_limit >= S::ONE);

    let avg = match normalized(n1 + n2) {
        Some(avg) => avg,
        None => {
            return MiterJoin {
                normal: n1,
                clamped: true,
            };
        }
    };

    // avg is the bisector of two unit vectors that don't cancel out, so this is
    // strictly positive.
    let cos_half_angle = avg.dot(n1);

    if cos_half_angle * miter_limit < S::ONE {
        return MiterJoin {
            normal: avg * miter_limit,
            clamped: true,
        };
    }

    MiterJoin {
        normal: avg / cos_half_angle,
        clamped: false,
    }
}

#[cfg(test)]
use crate::vector;

#[cfg(test)]
fn unit(angle_degrees: f32) -> Vector<f32> {
    let a = angle_degrees.to_radians();
    vector(a.cos(), a.sin())
}

#[test]
fn straight_join_is_the_normal() {
    let n = unit(30.0);
    let join = miter_normal(n, n, 4.0);
    assert!(!join.clamped);
    assert!((join.normal - n).length() < 1e-6);
}

#[test]
fn miter_length_law() {
    // Normals 60° apart: the join is 1 / cos(30°) long.
    let join = miter_normal(unit(0.0), unit(60.0), 4.0);
    assert!(!join.clamped);
    assert!((join.normal.length() - 1.1547).abs() < 1e-3);
    // And it bisects the two normals.
    assert!((join.normal.normalize() - unit(30.0)).length() < 1e-5);

    for &phi in &[10.0f32, 45.0, 90.0, 120.0, 150.0] {
        let join = miter_normal(unit(20.0), unit(20.0 + phi), f32::INFINITY);
        let expected = 1.0 / (phi.to_radians() * 0.5).cos();
        assert!(
            (join.normal.length() - expected).abs() < 1e-3,
            "φ = {}: {} != {}",
            phi,
            join.normal.length(),
            expected
        );
    }
}

#[test]
fn join_extrudes_onto_both_offset_edges() {
    // Extruding the corner by the join normal lands at distance 1 from both segments.
    let n1 = unit(-90.0);
    let n2 = unit(-10.0);
    let join = miter_normal(n1, n2, 10.0);
    assert!((join.normal.dot(n1) - 1.0).abs() < 1e-5);
    assert!((join.normal.dot(n2) - 1.0).abs() < 1e-5);
}

#[test]
fn miter_limit_clamps_sharp_joins() {
    // 170° between the normals: the raw miter is ~11.5 long.
    let unclamped = miter_normal(unit(0.0), unit(170.0), f32::INFINITY);
    assert!(unclamped.normal.length() > 11.0);
    assert!(!unclamped.clamped);

    let clamped = miter_normal(unit(0.0), unit(170.0), 4.0);
    assert!(clamped.clamped);
    assert!((clamped.normal.length() - 4.0).abs() < 1e-4);
    assert!((clamped.normal.normalize() - unit(85.0)).length() < 1e-4);
}

#[test]
fn reversal_falls_back_to_incoming_normal() {
    let n1 = unit(45.0);
    let join = miter_normal(n1, -n1, 4.0);
    assert!(join.clamped);
    assert_eq!(join.normal, n1);

    let join = miter_normal(n1, -n1, f32::INFINITY);
    assert!(join.normal.x.is_finite() && join.normal.y.is_finite());
}
