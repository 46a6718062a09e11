use arrayvec::ArrayVec;

use crate::math::{point, vector, Point, Vector};
use crate::scalar::unit_quad_roots;

/// A 2d curve segment defined by four points: the beginning of the segment,
/// two control points and the end of the segment.
///
/// The curve is defined by equation:
/// `∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 +
/// 3 * (1 - t) * t² * ctrl2 + t³ * to`
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

impl CubicBezierSegment {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f32) -> Point {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        point(
            self.from.x * one_t3
                + self.ctrl1.x * 3.0 * one_t2 * t
                + self.ctrl2.x * 3.0 * one_t * t2
                + self.to.x * t3,
            self.from.y * one_t3
                + self.ctrl1.y * 3.0 * one_t2 * t
                + self.ctrl2.y * 3.0 * one_t * t2
                + self.to.y * t3,
        )
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: f32) -> Vector {
        let (ax, bx, cx) = derivative_coefficients(self.from.x, self.ctrl1.x, self.ctrl2.x, self.to.x);
        let (ay, by, cy) = derivative_coefficients(self.from.y, self.ctrl1.y, self.ctrl2.y, self.to.y);
        vector(
            (ax * t + bx) * t + cx,
            (ay * t + by) * t + cy,
        )
    }

    /// Split this curve into two sub-curves at `t`.
    pub fn split(&self, t: f32) -> (CubicBezierSegment, CubicBezierSegment) {
        let ctrl1a = self.from.lerp(self.ctrl1, t);
        let ctrl2a = self.ctrl1.lerp(self.ctrl2, t);
        let ctrl1aa = ctrl1a.lerp(ctrl2a, t);
        let ctrl3a = self.ctrl2.lerp(self.to, t);
        let ctrl2aa = ctrl2a.lerp(ctrl3a, t);
        let ctrl1aaa = ctrl1aa.lerp(ctrl2aa, t);

        (
            CubicBezierSegment {
                from: self.from,
                ctrl1: ctrl1a,
                ctrl2: ctrl1aa,
                to: ctrl1aaa,
            },
            CubicBezierSegment {
                from: ctrl1aaa,
                ctrl1: ctrl2aa,
                ctrl2: ctrl3a,
                to: self.to,
            },
        )
    }

    /// Invokes `callback` with the curve parameter of each point where the
    /// x coordinate of the curve reaches a local extremum.
    pub fn for_each_local_x_extremum_t<F: FnMut(f32)>(&self, callback: &mut F) {
        let (a, b, c) = derivative_coefficients(self.from.x, self.ctrl1.x, self.ctrl2.x, self.to.x);
        for t in unit_quad_roots(a, b, c) {
            callback(t);
        }
    }

    /// Invokes `callback` with the curve parameter of each point where the
    /// y coordinate of the curve reaches a local extremum.
    pub fn for_each_local_y_extremum_t<F: FnMut(f32)>(&self, callback: &mut F) {
        let (a, b, c) = derivative_coefficients(self.from.y, self.ctrl1.y, self.ctrl2.y, self.to.y);
        for t in unit_quad_roots(a, b, c) {
            callback(t);
        }
    }

    /// Finds the parameter of a cusp, if the curve has one strictly inside
    /// its range.
    ///
    /// At a cusp both components of the derivative vanish simultaneously, so
    /// the roots of one component's quadratic are checked against the other
    /// component, with a tolerance proportional to the curve's extent.
    pub fn find_cusp(&self) -> Option<f32> {
        let extent = self
            .from
            .x
            .abs()
            .max(self.from.y.abs())
            .max(self.ctrl1.x.abs())
            .max(self.ctrl1.y.abs())
            .max(self.ctrl2.x.abs())
            .max(self.ctrl2.y.abs())
            .max(self.to.x.abs())
            .max(self.to.y.abs());
        let tolerance = extent * f32::EPSILON * 16.0;

        let mut candidates: ArrayVec<f32, 4> = ArrayVec::new();
        let (ax, bx, cx) = derivative_coefficients(self.from.x, self.ctrl1.x, self.ctrl2.x, self.to.x);
        candidates.extend(unit_quad_roots(ax, bx, cx));
        let (ay, by, cy) = derivative_coefficients(self.from.y, self.ctrl1.y, self.ctrl2.y, self.to.y);
        candidates.extend(unit_quad_roots(ay, by, cy));

        for &t in &candidates {
            let d = self.derivative(t);
            if d.x.abs() <= tolerance && d.y.abs() <= tolerance {
                return Some(t);
            }
        }

        None
    }

    /// Approximate the curve with a sequence of line segments, invoking
    /// `callback` with the endpoint of each segment.
    ///
    /// The chord deviation bound is derived from the second differences of
    /// the control polygon (`max(|from - 2 ctrl1 + ctrl2|, |ctrl1 - 2 ctrl2 +
    /// to|) * 3 / 4`). A fixed depth bound guards against non-finite inputs;
    /// past it the chord is emitted as is.
    pub fn for_each_flattened<F: FnMut(Point)>(&self, tolerance: f32, callback: &mut F) {
        debug_assert!(tolerance > 0.0);
        self.flatten_recursive(tolerance, 0, callback);
    }

    fn flatten_recursive<F: FnMut(Point)>(&self, tolerance: f32, depth: u32, callback: &mut F) {
        const MAX_RECURSION_DEPTH: u32 = 16;

        let d1 = vector(
            self.from.x - 2.0 * self.ctrl1.x + self.ctrl2.x,
            self.from.y - 2.0 * self.ctrl1.y + self.ctrl2.y,
        );
        let d2 = vector(
            self.ctrl1.x - 2.0 * self.ctrl2.x + self.to.x,
            self.ctrl1.y - 2.0 * self.ctrl2.y + self.to.y,
        );
        let deviation = d1.length().max(d2.length()) * 0.75;

        if deviation <= tolerance || depth >= MAX_RECURSION_DEPTH {
            callback(self.to);
            return;
        }

        let (first, second) = self.split(0.5);
        first.flatten_recursive(tolerance, depth + 1, callback);
        second.flatten_recursive(tolerance, depth + 1, callback);
    }
}

// B'(t) per axis: a t² + b t + c with
//   a = 3 (-p0 + 3 p1 - 3 p2 + p3)
//   b = 6 (p0 - 2 p1 + p2)
//   c = 3 (p1 - p0)
fn derivative_coefficients(p0: f32, p1: f32, p2: f32, p3: f32) -> (f32, f32, f32) {
    (
        3.0 * (-p0 + 3.0 * p1 - 3.0 * p2 + p3),
        6.0 * (p0 - 2.0 * p1 + p2),
        3.0 * (p1 - p0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_endpoints() {
        let curve = CubicBezierSegment {
            from: point(0.0, 0.0),
            ctrl1: point(1.0, 2.0),
            ctrl2: point(3.0, 2.0),
            to: point(4.0, 0.0),
        };
        assert_eq!(curve.sample(0.0), curve.from);
        assert_eq!(curve.sample(1.0), curve.to);
    }

    #[test]
    fn split_preserves_endpoints() {
        let curve = CubicBezierSegment {
            from: point(0.0, 0.0),
            ctrl1: point(1.0, 2.0),
            ctrl2: point(3.0, 2.0),
            to: point(4.0, 0.0),
        };
        let (a, b) = curve.split(0.5);
        assert_eq!(a.from, curve.from);
        assert_eq!(b.to, curve.to);
        assert_eq!(a.to, b.from);
        assert_eq!(a.to, curve.sample(0.5));
    }

    #[test]
    fn y_extremum_of_symmetric_curve() {
        let curve = CubicBezierSegment {
            from: point(0.0, 0.0),
            ctrl1: point(1.0, 2.0),
            ctrl2: point(3.0, 2.0),
            to: point(4.0, 0.0),
        };
        let mut ts = Vec::new();
        curve.for_each_local_y_extremum_t(&mut |t| ts.push(t));
        assert_eq!(ts.len(), 1);
        assert!((ts[0] - 0.5).abs() < 1e-5);

        // x is monotonic.
        let mut count = 0;
        curve.for_each_local_x_extremum_t(&mut |_| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn cusp_detection() {
        // Symmetric self-intersecting control polygon with a cusp at t = 0.5.
        let curve = CubicBezierSegment {
            from: point(0.0, 0.0),
            ctrl1: point(4.0, 0.0),
            ctrl2: point(4.0, 4.0),
            to: point(0.0, -4.0),
        };
        let t = curve.find_cusp().expect("cusp");
        assert!((t - 0.5).abs() < 1e-4);
        let d = curve.derivative(t);
        assert!(d.length() < 1e-2);

        // A smooth arch has no cusp.
        let smooth = CubicBezierSegment {
            from: point(0.0, 0.0),
            ctrl1: point(1.0, 2.0),
            ctrl2: point(3.0, 2.0),
            to: point(4.0, 0.0),
        };
        assert!(smooth.find_cusp().is_none());
    }

    #[test]
    fn flatten_ends_at_to() {
        let curve = CubicBezierSegment {
            from: point(0.0, 0.0),
            ctrl1: point(10.0, 20.0),
            ctrl2: point(30.0, 20.0),
            to: point(40.0, 0.0),
        };
        let mut count = 0;
        let mut last = curve.from;
        curve.for_each_flattened(0.05, &mut |p| {
            last = p;
            count += 1;
        });
        assert!(count > 2);
        assert_eq!(last, curve.to);
    }
}
