//! Join and cap geometry.
//!
//! Join procedures take the unit normals of the edges meeting at a pivot and
//! append the connecting geometry to the two offset contours. Cap procedures
//! connect the end of the outer contour to the end of the inner contour at an
//! open contour end. All of them assume y-down coordinates and unit normals
//! pointing to the left of the direction of travel.

use crate::geom::scalar::{Scalar, ROOT_2_OVER_2};
use crate::geom::utils::{rotate_cw, try_set_length};
use crate::geom::{ArcDirection, Conic};
use crate::math::{vector, Point, Transform, Vector};
use crate::path::PathBuilder;
use crate::{LineCap, LineJoin};

/// The two offset contours a join appends to.
///
/// Join procedures are written for clockwise turns; for counter-clockwise
/// turns the roles of the sides are swapped instead of duplicating the
/// logic.
pub(crate) struct StrokeSides<'l> {
    pub outer: &'l mut PathBuilder,
    pub inner: &'l mut PathBuilder,
}

impl StrokeSides<'_> {
    fn swap(&mut self) {
        std::mem::swap(&mut self.outer, &mut self.inner);
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum AngleType {
    Nearly180,
    Sharp,
    Shallow,
    NearlyLine,
}

fn dot_to_angle_type(dot: f32) -> AngleType {
    if dot >= 0.0 {
        if (1.0 - dot).is_nearly_zero() {
            AngleType::NearlyLine
        } else {
            AngleType::Shallow
        }
    } else if (1.0 + dot).is_nearly_zero() {
        AngleType::Nearly180
    } else {
        AngleType::Sharp
    }
}

// The turn from `before` to `after` bends clockwise (y-down).
fn is_clockwise(before: Vector, after: Vector) -> bool {
    before.x * after.y > before.y * after.x
}

// The inner side always goes through the pivot. Cheaper than intersecting
// the two inner offset edges, and the resulting backtrack is absorbed by
// the non-zero fill rule.
fn handle_inner_join(pivot: Point, after: Vector, inner: &mut PathBuilder) {
    inner.line_to(pivot);
    inner.line_to(pivot - after);
}

/// Appends the geometry joining two adjacent stroke edges at `pivot`.
pub(crate) fn add_join(
    join: LineJoin,
    before_unit_normal: Vector,
    pivot: Point,
    after_unit_normal: Vector,
    radius: f32,
    inv_miter_limit: f32,
    prev_is_line: bool,
    curr_is_line: bool,
    sides: StrokeSides,
) {
    match join {
        LineJoin::Bevel => bevel_join(before_unit_normal, pivot, after_unit_normal, radius, sides),
        LineJoin::Round => round_join(before_unit_normal, pivot, after_unit_normal, radius, sides),
        LineJoin::Miter => miter_join(
            before_unit_normal,
            pivot,
            after_unit_normal,
            radius,
            inv_miter_limit,
            prev_is_line,
            curr_is_line,
            sides,
        ),
    }
}

fn bevel_join(
    before_unit_normal: Vector,
    pivot: Point,
    after_unit_normal: Vector,
    radius: f32,
    mut sides: StrokeSides,
) {
    let mut after = after_unit_normal * radius;
    if !is_clockwise(before_unit_normal, after_unit_normal) {
        sides.swap();
        after = -after;
    }

    sides.outer.line_to(pivot + after);
    handle_inner_join(pivot, after, sides.inner);
}

fn round_join(
    before_unit_normal: Vector,
    pivot: Point,
    after_unit_normal: Vector,
    radius: f32,
    mut sides: StrokeSides,
) {
    let dot = before_unit_normal.dot(after_unit_normal);
    if dot_to_angle_type(dot) == AngleType::NearlyLine {
        return;
    }

    let mut before = before_unit_normal;
    let mut after = after_unit_normal;
    let mut dir = ArcDirection::Cw;
    if !is_clockwise(before, after) {
        sides.swap();
        before = -before;
        after = -after;
        dir = ArcDirection::Ccw;
    }

    let transform = Transform::new(radius, 0.0, 0.0, radius, pivot.x, pivot.y);
    let conics = Conic::build_unit_arc(before, after, dir, &transform);
    if !conics.is_empty() {
        for conic in &conics {
            sides.outer.conic_to(conic.ctrl, conic.to, conic.weight);
        }

        handle_inner_join(pivot, after * radius, sides.inner);
    }
}

fn miter_join(
    before_unit_normal: Vector,
    pivot: Point,
    after_unit_normal: Vector,
    radius: f32,
    inv_miter_limit: f32,
    prev_is_line: bool,
    mut curr_is_line: bool,
    mut sides: StrokeSides,
) {
    let dot = before_unit_normal.dot(after_unit_normal);
    let angle_type = dot_to_angle_type(dot);
    if angle_type == AngleType::NearlyLine {
        return;
    }

    let mut before = before_unit_normal;
    let mut after = after_unit_normal;
    let mut mid = None;

    if angle_type == AngleType::Nearly180 {
        // The miter point would be at infinity; emit a blunt join.
        curr_is_line = false;
    } else {
        let ccw = !is_clockwise(before, after);
        if ccw {
            sides.swap();
            before = -before;
            after = -after;
        }

        // Check for an upright right angle before entering the world of
        // square roots and divides (the common case when stroking
        // rectangles), since it has an exact mid vector.
        if dot == 0.0 && inv_miter_limit <= ROOT_2_OVER_2 {
            mid = Some((before + after) * radius);
        } else {
            // The miter length is radius / sin(half angle); when it exceeds
            // miter_limit * radius, fall back to a blunt join.
            let sin_half_angle = (1.0 + dot).half().sqrt();
            if sin_half_angle < inv_miter_limit {
                curr_is_line = false;
            } else {
                // The rotated chord is the more accurate mid direction for
                // sharp angles, the normal sum for shallow ones.
                let direction = if angle_type == AngleType::Sharp {
                    let chord = vector(after.y - before.y, before.x - after.x);
                    if ccw {
                        -chord
                    } else {
                        chord
                    }
                } else {
                    before + after
                };

                match try_set_length(direction, radius / sin_half_angle) {
                    Some(m) => mid = Some(m),
                    None => curr_is_line = false,
                }
            }
        }
    }

    if let Some(mid) = mid {
        let miter_point = pivot + mid;
        if prev_is_line {
            // The previous edge is straight: move its endpoint out to the
            // miter point instead of stacking a colinear segment.
            sides.outer.set_last_point(miter_point);
        } else {
            sides.outer.line_to(miter_point);
        }
    }

    let after = after * radius;
    if !curr_is_line {
        sides.outer.line_to(pivot + after);
    }
    handle_inner_join(pivot, after, sides.inner);
}

/// Appends the cap geometry connecting the outer contour's end to `stop`,
/// the matching point of the inner contour.
///
/// `normal` is the scaled normal of the capped edge at `pivot`, pointing
/// towards the outer contour's end. `is_line` indicates that the capped
/// edge is a straight segment whose endpoint may be moved in place (used by
/// the square cap).
pub(crate) fn add_cap(
    cap: LineCap,
    pivot: Point,
    normal: Vector,
    stop: Point,
    is_line: bool,
    path: &mut PathBuilder,
) {
    match cap {
        LineCap::Butt => {
            path.line_to(stop);
        }
        LineCap::Round => {
            let parallel = rotate_cw(normal);
            let projected_center = pivot + parallel;

            path.conic_to(projected_center + normal, projected_center, ROOT_2_OVER_2);
            path.conic_to(projected_center - normal, stop, ROOT_2_OVER_2);
        }
        LineCap::Square => {
            let parallel = rotate_cw(normal);
            if is_line {
                path.set_last_point(pivot + normal + parallel);
                path.line_to(pivot - normal + parallel);
            } else {
                path.line_to(pivot + normal + parallel);
                path.line_to(pivot - normal + parallel);
                path.line_to(stop);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;
    use crate::path::Verb;

    #[test]
    fn clockwise_turns() {
        // In y-down coordinates, turning from +x towards +y is clockwise.
        assert!(is_clockwise(vector(1.0, 0.0), vector(0.0, 1.0)));
        assert!(!is_clockwise(vector(1.0, 0.0), vector(0.0, -1.0)));
    }

    #[test]
    fn angle_classification() {
        assert_eq!(dot_to_angle_type(1.0), AngleType::NearlyLine);
        assert_eq!(dot_to_angle_type(0.5), AngleType::Shallow);
        assert_eq!(dot_to_angle_type(-0.5), AngleType::Sharp);
        assert_eq!(dot_to_angle_type(-1.0), AngleType::Nearly180);
    }

    #[test]
    fn miter_right_angle() {
        // A right angle turn with the default miter limit produces a single
        // miter point on the outer side.
        let mut outer = PathBuilder::new();
        let mut inner = PathBuilder::new();
        outer.move_to(point(0.0, -1.0));
        outer.line_to(point(5.0, -1.0));
        inner.move_to(point(0.0, 1.0));
        inner.line_to(point(5.0, 1.0));

        miter_join(
            vector(0.0, -1.0),
            point(5.0, 0.0),
            vector(1.0, 0.0),
            1.0,
            1.0 / 4.0,
            true,
            true,
            StrokeSides {
                outer: &mut outer,
                inner: &mut inner,
            },
        );

        // prev_is_line moves the previous endpoint to the miter corner.
        assert_eq!(outer.last_point(), Some(point(6.0, -1.0)));
        assert_eq!(outer.verbs(), &[Verb::MoveTo, Verb::LineTo]);
        // The inner side goes through the pivot.
        assert_eq!(
            inner.points(),
            &[
                point(0.0, 1.0),
                point(5.0, 1.0),
                point(5.0, 0.0),
                point(4.0, 0.0),
            ]
        );
    }

    #[test]
    fn miter_limit_fallback() {
        // A very sharp turn with a small miter limit degrades to a blunt
        // join: no miter point, just a line to the next offset point.
        let mut outer = PathBuilder::new();
        let mut inner = PathBuilder::new();
        outer.move_to(point(0.0, -1.0));
        outer.line_to(point(5.0, -1.0));
        inner.move_to(point(0.0, 1.0));
        inner.line_to(point(5.0, 1.0));

        // Nearly reversing direction, still turning clockwise.
        let after = vector(0.1f32, 1.0).normalize();
        miter_join(
            vector(0.0, -1.0),
            point(5.0, 0.0),
            after,
            1.0,
            1.0 / 1.1,
            true,
            true,
            StrokeSides {
                outer: &mut outer,
                inner: &mut inner,
            },
        );

        assert_eq!(outer.verbs(), &[Verb::MoveTo, Verb::LineTo, Verb::LineTo]);
        let blunt = outer.last_point().unwrap();
        let expected = point(5.0, 0.0) + after;
        assert!((blunt.x - expected.x).abs() < 1e-5);
        assert!((blunt.y - expected.y).abs() < 1e-5);
    }

    #[test]
    fn round_join_emits_conics() {
        let mut outer = PathBuilder::new();
        let mut inner = PathBuilder::new();
        outer.move_to(point(0.0, -1.0));
        outer.line_to(point(5.0, -1.0));
        inner.move_to(point(0.0, 1.0));
        inner.line_to(point(5.0, 1.0));

        round_join(
            vector(0.0, -1.0),
            point(5.0, 0.0),
            vector(1.0, 0.0),
            1.0,
            StrokeSides {
                outer: &mut outer,
                inner: &mut inner,
            },
        );

        assert!(outer.verbs().contains(&Verb::ConicTo));
        assert_eq!(outer.last_point(), Some(point(6.0, 0.0)));
    }

    #[test]
    fn butt_cap_is_a_straight_edge() {
        let mut path = PathBuilder::new();
        path.move_to(point(10.0, -2.0));
        add_cap(
            LineCap::Butt,
            point(10.0, 0.0),
            vector(0.0, -2.0),
            point(10.0, 2.0),
            true,
            &mut path,
        );
        assert_eq!(path.verbs(), &[Verb::MoveTo, Verb::LineTo]);
        assert_eq!(path.last_point(), Some(point(10.0, 2.0)));
    }

    #[test]
    fn round_cap_protrudes_by_the_radius() {
        let mut path = PathBuilder::new();
        path.move_to(point(10.0, -2.0));
        add_cap(
            LineCap::Round,
            point(10.0, 0.0),
            vector(0.0, -2.0),
            point(10.0, 2.0),
            true,
            &mut path,
        );
        let bounds = path.build().tight_bounds();
        assert!((bounds.max.x - 12.0).abs() < 1e-4);
        assert!((bounds.min.y - -2.0).abs() < 1e-4);
        assert!((bounds.max.y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn square_cap_protrudes_by_the_radius() {
        let mut path = PathBuilder::new();
        path.move_to(point(0.0, -2.0));
        path.line_to(point(10.0, -2.0));
        add_cap(
            LineCap::Square,
            point(10.0, 0.0),
            vector(0.0, -2.0),
            point(10.0, 2.0),
            true,
            &mut path,
        );
        // The capped edge is a line, so the cap replaces its endpoint and
        // skips the colinear stop point.
        assert_eq!(
            path.points(),
            &[point(0.0, -2.0), point(12.0, -2.0), point(12.0, 2.0)]
        );
    }
}
