use crate::math::{point, Point};

/// A 2d curve segment defined by three points: the beginning of the segment,
/// a control point and the end of the segment.
///
/// The curve is defined by equation:
/// `∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to`
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadraticBezierSegment {
    pub from: Point,
    pub ctrl: Point,
    pub to: Point,
}

impl QuadraticBezierSegment {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f32) -> Point {
        let t2 = t * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;

        point(
            self.from.x * one_t2 + self.ctrl.x * 2.0 * one_t * t + self.to.x * t2,
            self.from.y * one_t2 + self.ctrl.y * 2.0 * one_t * t + self.to.y * t2,
        )
    }

    /// Return the parameter value of the x extremum if it lies strictly
    /// inside the curve.
    pub fn local_x_extremum_t(&self) -> Option<f32> {
        Self::local_extremum_t(self.from.x, self.ctrl.x, self.to.x)
    }

    /// Return the parameter value of the y extremum if it lies strictly
    /// inside the curve.
    pub fn local_y_extremum_t(&self) -> Option<f32> {
        Self::local_extremum_t(self.from.y, self.ctrl.y, self.to.y)
    }

    fn local_extremum_t(p0: f32, p1: f32, p2: f32) -> Option<f32> {
        // The derivative is linear: 2 * ((p1 - p0) + t * (p0 - 2 p1 + p2)).
        let div = p0 - 2.0 * p1 + p2;
        if div == 0.0 {
            return None;
        }
        let t = (p0 - p1) / div;
        if t > 0.0 && t < 1.0 {
            return Some(t);
        }

        None
    }

    /// Split this curve into two sub-curves at `t`.
    pub fn split(&self, t: f32) -> (QuadraticBezierSegment, QuadraticBezierSegment) {
        let split_point = self.sample(t);

        (
            QuadraticBezierSegment {
                from: self.from,
                ctrl: self.from.lerp(self.ctrl, t),
                to: split_point,
            },
            QuadraticBezierSegment {
                from: split_point,
                ctrl: self.ctrl.lerp(self.to, t),
                to: self.to,
            },
        )
    }

    /// Approximate the curve with a sequence of line segments, invoking
    /// `callback` with the endpoint of each segment.
    ///
    /// The maximum deviation of the chord from the curve is
    /// `|from - 2 * ctrl + to| / 4`, which halves quadratically with each
    /// subdivision, so the recursion is shallow in practice. A fixed depth
    /// bound guards against non-finite inputs; past it the chord is emitted
    /// as is.
    pub fn for_each_flattened<F: FnMut(Point)>(&self, tolerance: f32, callback: &mut F) {
        debug_assert!(tolerance > 0.0);
        self.flatten_recursive(tolerance, 0, callback);
    }

    fn flatten_recursive<F: FnMut(Point)>(&self, tolerance: f32, depth: u32, callback: &mut F) {
        const MAX_RECURSION_DEPTH: u32 = 16;

        let dx = self.from.x - 2.0 * self.ctrl.x + self.to.x;
        let dy = self.from.y - 2.0 * self.ctrl.y + self.to.y;
        let deviation = (dx * dx + dy * dy).sqrt() * 0.25;

        if deviation <= tolerance || depth >= MAX_RECURSION_DEPTH {
            callback(self.to);
            return;
        }

        let (first, second) = self.split(0.5);
        first.flatten_recursive(tolerance, depth + 1, callback);
        second.flatten_recursive(tolerance, depth + 1, callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_endpoints() {
        let curve = QuadraticBezierSegment {
            from: point(0.0, 0.0),
            ctrl: point(1.0, 2.0),
            to: point(2.0, 0.0),
        };
        assert_eq!(curve.sample(0.0), curve.from);
        assert_eq!(curve.sample(1.0), curve.to);
        assert_eq!(curve.sample(0.5), point(1.0, 1.0));
    }

    #[test]
    fn y_extremum_of_symmetric_arch() {
        let curve = QuadraticBezierSegment {
            from: point(0.0, 0.0),
            ctrl: point(1.0, 2.0),
            to: point(2.0, 0.0),
        };
        let t = curve.local_y_extremum_t().unwrap();
        assert!((t - 0.5).abs() < 1e-6);
        assert!(curve.local_x_extremum_t().is_none());
    }

    #[test]
    fn flatten_within_tolerance() {
        let curve = QuadraticBezierSegment {
            from: point(0.0, 0.0),
            ctrl: point(10.0, 10.0),
            to: point(20.0, 0.0),
        };

        let mut count = 0;
        let mut last = curve.from;
        curve.for_each_flattened(0.05, &mut |p| {
            last = p;
            count += 1;
        });
        assert!(count > 2);
        assert_eq!(last, curve.to);

        // A flat "curve" needs no subdivision at all.
        let flat = QuadraticBezierSegment {
            from: point(0.0, 0.0),
            ctrl: point(1.0, 0.0),
            to: point(2.0, 0.0),
        };
        let mut count = 0;
        flat.for_each_flattened(0.05, &mut |_| count += 1);
        assert_eq!(count, 1);
    }
}
