//! Conic (rational quadratic bézier) segments.
//!
//! Conics represent circular arcs exactly, which makes them the natural
//! primitive for round joins and caps: a quarter circle is a single conic
//! with weight `sqrt(2) / 2`.

use arrayvec::ArrayVec;

use crate::math::{point, vector, Point, Transform, Vector};
use crate::scalar::{unit_quad_roots, Scalar, NEARLY_ZERO, ROOT_2_OVER_2};
use crate::utils::{points_within_tolerance, try_set_length};

/// The largest number of conics [`Conic::build_unit_arc`] can produce:
/// one per quadrant plus a partial arc.
pub const MAX_CONICS_FOR_ARC: usize = 5;

/// Rotation direction of an arc, in y-down coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArcDirection {
    Cw,
    Ccw,
}

/// A rational quadratic bézier segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Conic {
    pub from: Point,
    pub ctrl: Point,
    pub to: Point,
    pub weight: f32,
}

impl Conic {
    #[inline]
    pub fn new(from: Point, ctrl: Point, to: Point, weight: f32) -> Self {
        Conic {
            from,
            ctrl,
            to,
            weight,
        }
    }

    /// Samples the conic at `t` (between 0 and 1).
    pub fn sample(&self, t: f32) -> Point {
        let u = 1.0 - t;
        let b0 = u * u;
        let b1 = 2.0 * self.weight * u * t;
        let b2 = t * t;
        let denom = b0 + b1 + b2;
        point(
            (b0 * self.from.x + b1 * self.ctrl.x + b2 * self.to.x) / denom,
            (b0 * self.from.y + b1 * self.ctrl.y + b2 * self.to.y) / denom,
        )
    }

    /// Invokes `callback` with the curve parameter of each point where the
    /// x coordinate of the conic reaches a local extremum.
    pub fn for_each_local_x_extremum_t<F: FnMut(f32)>(&self, callback: &mut F) {
        for_each_extremum_t(self.from.x, self.ctrl.x, self.to.x, self.weight, callback)
    }

    /// Invokes `callback` with the curve parameter of each point where the
    /// y coordinate of the conic reaches a local extremum.
    pub fn for_each_local_y_extremum_t<F: FnMut(f32)>(&self, callback: &mut F) {
        for_each_extremum_t(self.from.y, self.ctrl.y, self.to.y, self.weight, callback)
    }

    /// Approximates the conic with a sequence of line segments, invoking
    /// `callback` with the endpoint of each segment (the starting point is
    /// not reported).
    ///
    /// Subdivision stops when the curve deviates from the chord by less than
    /// `tolerance`, or at a fixed recursion depth. Hitting the depth bound
    /// degrades to emitting the chord rather than recursing further.
    pub fn for_each_flattened<F: FnMut(Point)>(&self, tolerance: f32, callback: &mut F) {
        debug_assert!(tolerance > 0.0);
        self.flatten_range(0.0, self.from, 1.0, self.to, tolerance, 0, callback);
    }

    fn flatten_range<F: FnMut(Point)>(
        &self,
        t0: f32,
        p0: Point,
        t1: f32,
        p1: Point,
        tolerance: f32,
        depth: u32,
        callback: &mut F,
    ) {
        const MAX_RECURSION_DEPTH: u32 = 10;

        let tm = (t0 + t1) * 0.5;
        let pm = self.sample(tm);
        let chord_mid = p0.lerp(p1, 0.5);
        if (pm - chord_mid).length() <= tolerance || depth >= MAX_RECURSION_DEPTH {
            callback(p1);
            return;
        }

        self.flatten_range(t0, p0, tm, pm, tolerance, depth + 1, callback);
        self.flatten_range(tm, pm, t1, p1, tolerance, depth + 1, callback);
    }

    /// Builds the arc of the unit circle from the unit vector `start` to the
    /// unit vector `stop`, rotating in direction `dir`, as a sequence of at
    /// most [`MAX_CONICS_FOR_ARC`] conics, then maps the result through
    /// `transform`.
    ///
    /// Returns an empty sequence when the two vectors are (effectively)
    /// coincident in the requested direction.
    pub fn build_unit_arc(
        start: Vector,
        stop: Vector,
        dir: ArcDirection,
        transform: &Transform,
    ) -> ArrayVec<Conic, MAX_CONICS_FOR_ARC> {
        let mut conics = ArrayVec::new();

        // Rotate so that `start` maps to (1, 0) and work out which quadrant
        // `stop` falls in.
        let x = start.dot(stop);
        let mut y = start.cross(stop);

        let abs_y = y.abs();

        // The angle is nearly 0 or nearly 360 (y == 0, x > 0): nothing to do.
        if abs_y.is_nearly_zero()
            && x > 0.0
            && ((y >= 0.0 && dir == ArcDirection::Cw) || (y <= 0.0 && dir == ArcDirection::Ccw))
        {
            return conics;
        }

        if dir == ArcDirection::Ccw {
            y = -y;
        }

        // Quadrants, counting 90° steps from (1, 0):
        //   0 == [0   .. 90)
        //   1 == [90  .. 180)
        //   2 == [180 .. 270)
        //   3 == [270 .. 360)
        let quadrant = if y == 0.0 {
            debug_assert!((x + 1.0).is_nearly_zero());
            2 // 180°
        } else if x == 0.0 {
            debug_assert!((abs_y - 1.0).is_nearly_zero());
            if y > 0.0 {
                1 // 90°
            } else {
                3 // 270°
            }
        } else {
            let mut q = 0;
            if y < 0.0 {
                q += 2;
            }
            if (x < 0.0) != (y < 0.0) {
                q += 1;
            }
            q
        };

        const QUADRANT_PTS: [(f32, f32); 8] = [
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (-1.0, 1.0),
            (-1.0, 0.0),
            (-1.0, -1.0),
            (0.0, -1.0),
            (1.0, -1.0),
        ];
        let quadrant_pt = |i: usize| -> Point {
            let (px, py) = QUADRANT_PTS[i % 8];
            point(px, py)
        };

        for i in 0..quadrant {
            conics.push(Conic::new(
                quadrant_pt(i * 2),
                quadrant_pt(i * 2 + 1),
                quadrant_pt(i * 2 + 2),
                ROOT_2_OVER_2,
            ));
        }

        // The remaining sub-90° arc, if any.
        let final_pt = point(x, y);
        let last_q = quadrant_pt(quadrant * 2); // already a unit vector
        let dot = vector(last_q.x, last_q.y).dot(vector(x, y));
        if dot < 1.0 {
            let off_curve = vector(last_q.x + x, last_q.y + y);
            // The bisector rescaled to the off-curve point. From the half
            // angle identity its length is 1 / cos(theta/2), which doubles
            // as the conic weight.
            let cos_theta_over_2 = ((1.0 + dot).half()).sqrt();
            if let Some(off_curve) = try_set_length(off_curve, cos_theta_over_2.invert()) {
                let off_curve = point(off_curve.x, off_curve.y);
                if !points_within_tolerance(last_q, off_curve, NEARLY_ZERO) {
                    conics.push(Conic::new(last_q, off_curve, final_pt, cos_theta_over_2));
                }
            }
        }

        // Map back through the initial rotation (and flip for the
        // counter-clockwise case), then through the caller's transform.
        let rotation = Transform::new(start.x, start.y, -start.y, start.x, 0.0, 0.0);
        let total = if dir == ArcDirection::Ccw {
            Transform::scale(1.0, -1.0).then(&rotation).then(transform)
        } else {
            rotation.then(transform)
        };

        for conic in &mut conics {
            conic.from = total.transform_point(conic.from);
            conic.ctrl = total.transform_point(conic.ctrl);
            conic.to = total.transform_point(conic.to);
        }

        conics
    }
}

// The derivative of a conic coordinate is a quadratic over a strictly
// positive denominator, so extrema are the roots of the numerator.
fn for_each_extremum_t<F: FnMut(f32)>(p0: f32, p1: f32, p2: f32, w: f32, callback: &mut F) {
    let p20 = p2 - p0;
    let p10 = p1 - p0;
    let a = w * p20 - p20;
    let b = p20 - 2.0 * w * p10;
    let c = w * p10;
    for t in unit_quad_roots(a, b, c) {
        callback(t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;

    #[test]
    fn quarter_circle_sample() {
        // Unit quarter circle from (1, 0) to (0, 1).
        let conic = Conic::new(
            point(1.0, 0.0),
            point(1.0, 1.0),
            point(0.0, 1.0),
            ROOT_2_OVER_2,
        );
        let mid = conic.sample(0.5);
        assert!((mid.to_vector().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn unit_arc_quarter() {
        let conics = Conic::build_unit_arc(
            vector(1.0, 0.0),
            vector(0.0, 1.0),
            ArcDirection::Cw,
            &Transform::identity(),
        );
        assert_eq!(conics.len(), 1);
        assert!(points_within_tolerance(conics[0].from, point(1.0, 0.0), 1e-5));
        assert!(points_within_tolerance(conics[0].to, point(0.0, 1.0), 1e-5));
    }

    #[test]
    fn unit_arc_half_circle() {
        let conics = Conic::build_unit_arc(
            vector(1.0, 0.0),
            vector(-1.0, 0.0),
            ArcDirection::Cw,
            &Transform::identity(),
        );
        assert_eq!(conics.len(), 2);
        assert!(points_within_tolerance(conics[1].to, point(-1.0, 0.0), 1e-5));
        // The arc passes through (0, 1) between the two quadrants.
        assert!(points_within_tolerance(conics[0].to, point(0.0, 1.0), 1e-5));
    }

    #[test]
    fn unit_arc_coincident_vectors() {
        let conics = Conic::build_unit_arc(
            vector(1.0, 0.0),
            vector(1.0, 0.0),
            ArcDirection::Cw,
            &Transform::identity(),
        );
        assert!(conics.is_empty());
    }

    #[test]
    fn unit_arc_ccw() {
        let conics = Conic::build_unit_arc(
            vector(1.0, 0.0),
            vector(0.0, 1.0),
            ArcDirection::Ccw,
            &Transform::identity(),
        );
        // Going the long way around: three quadrants.
        assert_eq!(conics.len(), 3);
        assert!(points_within_tolerance(conics[2].to, point(0.0, 1.0), 1e-5));
    }

    #[test]
    fn extrema_of_quarter_circle() {
        let conic = Conic::new(
            point(1.0, 0.0),
            point(1.0, 1.0),
            point(0.0, 1.0),
            ROOT_2_OVER_2,
        );
        // x decreases monotonically, y increases monotonically: no interior
        // extrema on either axis.
        let mut count = 0;
        conic.for_each_local_x_extremum_t(&mut |_| count += 1);
        conic.for_each_local_y_extremum_t(&mut |_| count += 1);
        assert_eq!(count, 0);

        // A half circle has an interior y extremum at its apex.
        let half = Conic::new(point(1.0, 0.0), point(0.0, 2.0), point(-1.0, 0.0), 0.5);
        let mut ts = Vec::new();
        half.for_each_local_y_extremum_t(&mut |t| ts.push(t));
        assert_eq!(ts.len(), 1);
        assert!((ts[0] - 0.5).abs() < 1e-5);
    }

    #[test]
    fn flatten_ends_at_to() {
        let conic = Conic::new(
            point(1.0, 0.0),
            point(1.0, 1.0),
            point(0.0, 1.0),
            ROOT_2_OVER_2,
        );
        let mut last = conic.from;
        let mut count = 0;
        conic.for_each_flattened(0.01, &mut |p| {
            last = p;
            count += 1;
        });
        assert!(count > 1);
        assert_eq!(last, conic.to);
    }
}
