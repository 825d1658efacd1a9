use crate::scalar::Scalar;
use crate::utils::{magnitude, normalized_in, perp, segment_normal};
use crate::{Point, Vector};

/// A 2d curve segment defined by three points: the beginning of the segment, a control
/// point and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadraticBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> QuadraticBezierSegment<S> {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let t2 = t * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;

        self.from * one_t2 + self.ctrl.to_vector() * S::TWO * one_t * t + self.to.to_vector() * t2
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    ///
    /// `B'(t) = 2 * (1 - t) * (ctrl - from) + 2 * t * (to - ctrl)`
    pub fn derivative(&self, t: S) -> Vector<S> {
        let one_t = S::ONE - t;
        (self.ctrl - self.from) * (S::TWO * one_t) + (self.to - self.ctrl) * (S::TWO * t)
    }

    /// Unit stroke normal of the curve at t.
    ///
    /// When the control point coincides with one of the endpoints, the derivative
    /// vanishes at that endpoint. The direction of the curve there is then the
    /// direction of the chord, which is used instead. Returns `None` only if the
    /// whole curve is degenerate.
    pub fn normal(&self, t: S) -> Option<Vector<S>> {
        let scale = magnitude(&[self.from, self.ctrl, self.to]);
        normalized_in(perp(self.derivative(t)), scale)
            .or_else(|| normalized_in(perp(self.to - self.from), scale))
    }

    /// Returns true if the curve has no extent.
    pub fn is_degenerate(&self) -> bool {
        segment_normal(self.from, self.ctrl).is_none()
            && segment_normal(self.ctrl, self.to).is_none()
    }

    /// Split the curve into `num_steps` segments of equal parameter range and call
    /// the callback for each of the interior split points, in order, with their
    /// parameter, position and normal.
    ///
    /// The endpoints (`t = 0` and `t = 1`) are not visited.
    pub fn for_each_interior_step<F>(&self, num_steps: usize, cb: &mut F)
    where
        F: FnMut(S, Point<S>, Vector<S>),
    {
        let n = S::from_usize(num_steps);
        let mut prev_normal = self.normal(S::ZERO);
        for i in 1..num_steps {
            let t = S::from_usize(i) / n;
            let normal = self.normal(t).or(prev_normal);
            if let Some(normal) = normal {
                cb(t, self.sample(t), normal);
            }
            prev_normal = normal;
        }
    }
}

#[cfg(test)]
use crate::{point, vector};

#[cfg(test)]
fn assert_almost_eq(a: Vector<f32>, b: Vector<f32>) {
    if (a - b).square_length() > 0.000001 {
        panic!("assert almost equal: {:?} != {:?}", a, b);
    }
}

#[test]
fn sample_endpoints_and_middle() {
    let curve = QuadraticBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(1.0, 1.0),
        to: point(2.0, 0.0),
    };

    assert_eq!(curve.sample(0.0), point(0.0, 0.0));
    assert_eq!(curve.sample(1.0), point(2.0, 0.0));
    assert_eq!(curve.sample(0.5), point(1.0, 0.5));
}

#[test]
fn derivative_and_normal() {
    let curve = QuadraticBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(1.0, 1.0),
        to: point(2.0, 0.0),
    };

    assert_eq!(curve.derivative(0.0), vector(2.0, 2.0));
    assert_eq!(curve.derivative(0.5), vector(2.0, 0.0));
    assert_eq!(curve.derivative(1.0), vector(2.0, -2.0));

    let h = std::f32::consts::FRAC_1_SQRT_2;
    assert_almost_eq(curve.normal(0.0).unwrap(), vector(h, -h));
    assert_almost_eq(curve.normal(0.5).unwrap(), vector(0.0, -1.0));
    assert_almost_eq(curve.normal(1.0).unwrap(), vector(-h, -h));
}

#[test]
fn normal_with_control_point_on_endpoint() {
    let curve = QuadraticBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(0.0, 0.0),
        to: point(3.0, 0.0),
    };

    assert_almost_eq(curve.normal(0.0).unwrap(), vector(0.0, -1.0));
    assert!(!curve.is_degenerate());

    let point_curve = QuadraticBezierSegment {
        from: point(1.0f32, 1.0),
        ctrl: point(1.0, 1.0),
        to: point(1.0, 1.0),
    };
    assert!(point_curve.is_degenerate());
    assert_eq!(point_curve.normal(0.5), None);
}

#[test]
fn interior_steps() {
    let curve = QuadraticBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(1.0, 1.0),
        to: point(2.0, 0.0),
    };

    let mut steps = Vec::new();
    curve.for_each_interior_step(4, &mut |t, p, n| steps.push((t, p, n)));

    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0].0, 0.25);
    assert_eq!(steps[1].0, 0.5);
    assert_eq!(steps[2].0, 0.75);
    assert_eq!(steps[1].1, point(1.0, 0.5));
    for (_, _, n) in &steps {
        assert!((n.length() - 1.0).abs() < 1e-5);
    }

    let mut count = 0;
    curve.for_each_interior_step(1, &mut |_, _, _| count += 1);
    assert_eq!(count, 0);
}
