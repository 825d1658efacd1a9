//! Circular arcs defined by their endpoints and a sweep angle.

use crate::scalar::Scalar;
use crate::utils::{magnitude, normalized_in, perp};
use crate::{point, vector, Point, Vector};

/// A circular arc.
///
/// The arc starts at `start_angle` and turns by `sweep_angle` radians. A positive
/// sweep turns counter-clockwise (in a y-up coordinate system), from the positive x
/// axis towards the positive y axis.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ChordArc<S> {
    pub center: Point<S>,
    pub radius: S,
    pub start_angle: S,
    pub sweep_angle: S,
}

impl<S: Scalar> ChordArc<S> {
    /// Find the circle going through `from` and `to` such that the arc between the two
    /// points subtends `sweep_angle`.
    ///
    /// Returns `None` if the chord has no length or if `sweep_angle` is a multiple of
    /// a full turn, in which case there is no such circle (the arc is either a point
    /// or a straight line).
    pub fn from_chord(from: Point<S>, to: Point<S>, sweep_angle: S) -> Option<Self> {
        if !sweep_angle.is_finite() {
            return None;
        }

        let chord = to - from;
        let chord_dir = normalized_in(chord, magnitude(&[from, to]))?;
        let half_chord = chord.length() * S::HALF;
        let half_sweep = sweep_angle * S::HALF;
        let sin = half_sweep.sin();
        if sin.abs() <= S::EPSILON {
            return None;
        }

        let radius = half_chord / sin.abs();
        // Signed distance from the middle of the chord to the center, measured
        // towards the left of the chord. Small arcs turning counter-clockwise have
        // their center on the left, arcs larger than half a turn on the right.
        let offset = half_chord * half_sweep.cos() / sin;
        let left = -perp(chord_dir);
        let center = from.lerp(to, S::HALF) + left * offset;

        let v = from - center;
        let start_angle = v.y.atan2(v.x);

        Some(ChordArc {
            center,
            radius,
            start_angle,
            sweep_angle,
        })
    }

    /// Sample the arc at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let angle = self.start_angle + self.sweep_angle * t;
        point(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    /// Unit stroke normal at a position on the arc.
    ///
    /// This is the radial direction from the center, oriented to follow the same
    /// side convention as straight segments (see `utils::perp`): it points away from
    /// the center for counter-clockwise arcs and towards it for clockwise ones.
    pub fn normal_at(&self, position: Point<S>) -> Vector<S> {
        let radial = normalized_in(position - self.center, self.radius)
            .unwrap_or_else(|| vector(S::ONE, S::ZERO));
        if self.sweep_angle < S::ZERO {
            -radial
        } else {
            radial
        }
    }

    /// Unit stroke normal at t.
    pub fn normal(&self, t: S) -> Vector<S> {
        let angle = self.start_angle + self.sweep_angle * t;
        let radial = vector(angle.cos(), angle.sin());
        if self.sweep_angle < S::ZERO {
            -radial
        } else {
            radial
        }
    }

    /// Split the arc into `num_steps` equal angular steps and call the callback
    /// for each interior split point with its parameter, position and normal.
    ///
    /// The endpoints are not visited.
    pub fn for_each_interior_step<F>(&self, num_steps: usize, cb: &mut F)
    where
        F: FnMut(S, Point<S>, Vector<S>),
    {
        let n = S::from_usize(num_steps);
        for i in 1..num_steps {
            let t = S::from_usize(i) / n;
            cb(t, self.sample(t), self.normal(t));
        }
    }
}

#[cfg(test)]
fn assert_almost_eq(a: Vector<f32>, b: Vector<f32>) {
    if (a - b).square_length() > 0.00001 {
        panic!("assert almost equal: {:?} != {:?}", a, b);
    }
}

#[cfg(test)]
fn assert_point_almost_eq(a: Point<f32>, b: Point<f32>) {
    assert_almost_eq(a.to_vector(), b.to_vector());
}

#[test]
fn quarter_circle_around_origin() {
    use std::f32::consts::FRAC_PI_2;

    let arc = ChordArc::from_chord(point(1.0f32, 0.0), point(0.0, 1.0), FRAC_PI_2).unwrap();

    assert_point_almost_eq(arc.center, point(0.0, 0.0));
    assert!((arc.radius - 1.0).abs() < 1e-5);
    assert!(arc.start_angle.abs() < 1e-5);

    assert_almost_eq(arc.normal_at(point(1.0, 0.0)), vector(1.0, 0.0));
    assert_almost_eq(arc.normal_at(point(0.0, 1.0)), vector(0.0, 1.0));
    assert_point_almost_eq(arc.sample(1.0), point(0.0, 1.0));
    assert_point_almost_eq(arc.sample(0.5), point(0.5f32.sqrt(), 0.5f32.sqrt()));
}

#[test]
fn clockwise_arc() {
    use std::f32::consts::FRAC_PI_2;

    let arc = ChordArc::from_chord(point(1.0f32, 0.0), point(0.0, -1.0), -FRAC_PI_2).unwrap();
    assert_point_almost_eq(arc.center, point(0.0, 0.0));
    assert_point_almost_eq(arc.sample(0.5), point(0.5f32.sqrt(), -(0.5f32.sqrt())));

    // Going down from (1, 0), the right hand side of the path is towards the center.
    assert_almost_eq(arc.normal(0.0), vector(-1.0, 0.0));
    assert_almost_eq(arc.normal_at(point(0.0, -1.0)), vector(0.0, 1.0));
}

#[test]
fn large_arc() {
    use std::f32::consts::PI;

    // Three quarters of the unit circle, counter-clockwise.
    let arc = ChordArc::from_chord(point(1.0f32, 0.0), point(0.0, -1.0), 1.5 * PI).unwrap();
    assert_point_almost_eq(arc.center, point(0.0, 0.0));
    assert!((arc.radius - 1.0).abs() < 1e-5);
    assert_point_almost_eq(arc.sample(1.0 / 3.0), point(0.0, 1.0));
}

#[test]
fn half_circle() {
    use std::f32::consts::PI;

    let arc = ChordArc::from_chord(point(-2.0f32, 0.0), point(2.0, 0.0), PI).unwrap();
    assert_point_almost_eq(arc.center, point(0.0, 0.0));
    assert!((arc.radius - 2.0).abs() < 1e-5);
    // Counter-clockwise from the left side of the circle goes through the bottom.
    assert_point_almost_eq(arc.sample(0.5), point(0.0, -2.0));
}

#[test]
fn degenerate_arcs() {
    use std::f32::consts::PI;

    assert_eq!(ChordArc::from_chord(point(0.0f32, 0.0), point(1.0, 0.0), 0.0), None);
    assert_eq!(ChordArc::from_chord(point(0.0f32, 0.0), point(1.0, 0.0), 2.0 * PI), None);
    assert_eq!(ChordArc::from_chord(point(0.0f32, 0.0), point(0.0, 0.0), 1.0), None);
    assert_eq!(ChordArc::from_chord(point(0.0f32, 0.0), point(1.0, 0.0), f32::NAN), None);
}

#[test]
fn interior_steps() {
    use std::f32::consts::FRAC_PI_2;

    let arc = ChordArc::from_chord(point(1.0f32, 0.0), point(0.0, 1.0), FRAC_PI_2).unwrap();
    let mut count = 0;
    arc.for_each_interior_step(16, &mut |_, p, n| {
        count += 1;
        assert!((p.to_vector().length() - 1.0).abs() < 1e-4);
        assert_almost_eq(n, p.to_vector());
    });
    assert_eq!(count, 15);
}
