//! Small vector helpers shared by the curve and join code.

use crate::scalar::Scalar;
use crate::{vector, Point, Vector};

/// Rotate a vector by a quarter turn.
///
/// The stroke normals of the whole crate use this convention: for a segment going
/// towards positive x, the normal points towards negative y.
#[inline]
pub fn perp<S: Scalar>(v: Vector<S>) -> Vector<S> {
    vector(v.y, -v.x)
}

/// Normalize `v`, or return `None` if it has no meaningful direction.
///
/// The threshold is absolute (`Scalar::EPSILON`), which suits vectors of about
/// unit length such as sums of normals. Vectors computed from coordinates go
/// through `normalized_in` instead.
///
/// Vectors with a non-finite component are treated as having no direction
/// so that a NaN never leaks into the produced geometry.
#[inline]
pub fn normalized<S: Scalar>(v: Vector<S>) -> Option<Vector<S>> {
    let sq = v.square_length();
    if !sq.is_finite() || sq <= S::EPSILON * S::EPSILON {
        return None;
    }

    Some(v / sq.sqrt())
}

/// Normalize `v`, a difference of coordinates of magnitude up to `scale`.
///
/// Returns `None` if `v` is zero or lost in the rounding error of such
/// coordinates, so the threshold follows the size of the geometry instead of
/// being absolute.
#[inline]
pub fn normalized_in<S: Scalar>(v: Vector<S>, scale: S) -> Option<Vector<S>> {
    let sq = v.square_length();
    let min = scale * S::epsilon();
    if !sq.is_finite() || sq == S::ZERO || sq <= min * min {
        return None;
    }

    Some(v / sq.sqrt())
}

/// The largest absolute coordinate of a set of points.
#[inline]
pub fn magnitude<S: Scalar>(points: &[Point<S>]) -> S {
    points
        .iter()
        .fold(S::ZERO, |m, p| m.max(p.x.abs()).max(p.y.abs()))
}

/// Unit normal of the segment going from `from` to `to`, or `None` if the
/// segment has no length.
#[inline]
pub fn segment_normal<S: Scalar>(from: Point<S>, to: Point<S>) -> Option<Vector<S>> {
    normalized_in(perp(to - from), magnitude(&[from, to]))
}

/// Returns true if the vector is exactly zero, which is how the path builder
/// encodes the absence of a direction.
#[inline]
pub fn is_zero<S: Scalar>(v: Vector<S>) -> bool {
    v.x == S::ZERO && v.y == S::ZERO
}

#[inline]
pub fn is_finite_point<S: Scalar>(p: Point<S>) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

#[cfg(test)]
fn assert_almost_eq(a: Vector<f32>, b: Vector<f32>) {
    if (a - b).square_length() > 0.000001 {
        panic!("assert almost equal: {:?} != {:?}", a, b);
    }
}

#[test]
fn perp_is_a_clockwise_quarter_turn() {
    assert_eq!(perp(vector(1.0f32, 0.0)), vector(0.0, -1.0));
    assert_eq!(perp(vector(0.0f32, 1.0)), vector(1.0, 0.0));
    assert_eq!(perp(vector(2.0f32, 3.0)).dot(vector(2.0, 3.0)), 0.0);
}

#[test]
fn normalize_zero_length() {
    assert_eq!(normalized(vector(0.0f32, 0.0)), None);
    assert_eq!(normalized(vector(1e-9f32, 0.0)), None);
    assert_eq!(normalized(vector(f32::NAN, 1.0)), None);
    assert_eq!(normalized(vector(f32::INFINITY, 1.0)), None);

    assert_almost_eq(normalized(vector(3.0f32, 4.0)).unwrap(), vector(0.6, 0.8));
}

#[test]
fn segment_normals() {
    use crate::point;

    assert_almost_eq(
        segment_normal(point(0.0f32, 0.0), point(5.0, 0.0)).unwrap(),
        vector(0.0, -1.0),
    );
    assert_almost_eq(
        segment_normal(point(1.0f32, 1.0), point(1.0, -3.0)).unwrap(),
        vector(-1.0, 0.0),
    );
    assert_eq!(segment_normal(point(1.0f32, 1.0), point(1.0, 1.0)), None);
}

#[test]
fn short_segment_normals() {
    use crate::point;

    // Short segments keep their direction near the origin.
    assert_almost_eq(
        segment_normal(point(0.0f32, 0.0), point(1e-7, 0.0)).unwrap(),
        vector(0.0, -1.0),
    );
    assert_almost_eq(
        segment_normal(point(1e-7f32, 0.0), point(1e-7, 1e-7)).unwrap(),
        vector(1.0, 0.0),
    );
    // A few units of precision away from the origin are still a direction.
    assert_almost_eq(
        segment_normal(point(1e6f32, 0.0), point(1e6 + 0.5, 0.0)).unwrap(),
        vector(0.0, -1.0),
    );
    assert_eq!(segment_normal(point(0.0f32, 0.0), point(0.0, 0.0)), None);

    assert_eq!(magnitude(&[point(-3.0f32, 1.0), point(2.0, -0.5)]), 3.0);
    assert_eq!(normalized_in(vector(1e-9f32, 0.0), 1e3), None);
}
