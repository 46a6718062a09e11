//! Growable path storage.

use crate::geom::scalar::ROOT_2_OVER_2;
use crate::math::{point, Box2D, Point};
use crate::path::{bounding_box_of_points, Path, Verb};

/// Builds a [`Path`] incrementally.
///
/// Besides one-shot path construction, the builder doubles as a reusable
/// working path for the stroking code: it exposes the accumulated verb and
/// point tapes, can be rewound without releasing its storage, and supports
/// appending another builder's contour in reverse.
#[derive(Clone, Default, Debug)]
pub struct PathBuilder {
    points: Vec<Point>,
    verbs: Vec<Verb>,
    conic_weights: Vec<f32>,
}

impl PathBuilder {
    pub fn new() -> Self {
        PathBuilder::default()
    }

    pub fn with_capacity(endpoints: usize, ctrl_points: usize) -> Self {
        let mut builder = PathBuilder::new();
        builder.reserve(endpoints, ctrl_points);
        builder
    }

    /// Reserves storage for at least `endpoints + ctrl_points` additional
    /// points and `endpoints` additional verbs.
    pub fn reserve(&mut self, endpoints: usize, ctrl_points: usize) {
        self.points.reserve(endpoints + ctrl_points);
        self.verbs.reserve(endpoints);
    }

    /// Rewinds the builder to an empty path, keeping the allocated storage.
    pub fn clear(&mut self) {
        self.points.clear();
        self.verbs.clear();
        self.conic_weights.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The last endpoint written, if any.
    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Overwrites the last endpoint in place.
    ///
    /// Used by the join code to merge a join's trailing segment with the
    /// upcoming edge instead of stacking two colinear segments.
    pub fn set_last_point(&mut self, p: Point) {
        if let Some(last) = self.points.last_mut() {
            *last = p;
        } else {
            self.move_to(p);
        }
    }

    pub fn move_to(&mut self, to: Point) {
        self.points.push(to);
        self.verbs.push(Verb::MoveTo);
    }

    pub fn line_to(&mut self, to: Point) {
        self.inject_move_to_if_needed();
        self.points.push(to);
        self.verbs.push(Verb::LineTo);
    }

    pub fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        self.inject_move_to_if_needed();
        self.points.push(ctrl);
        self.points.push(to);
        self.verbs.push(Verb::QuadraticTo);
    }

    pub fn conic_to(&mut self, ctrl: Point, to: Point, weight: f32) {
        self.inject_move_to_if_needed();
        self.points.push(ctrl);
        self.points.push(to);
        self.conic_weights.push(weight);
        self.verbs.push(Verb::ConicTo);
    }

    pub fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.inject_move_to_if_needed();
        self.points.push(ctrl1);
        self.points.push(ctrl2);
        self.points.push(to);
        self.verbs.push(Verb::CubicTo);
    }

    /// Closes the current contour. Does nothing if no contour is open.
    pub fn close(&mut self) {
        match self.verbs.last() {
            None | Some(Verb::Close) => {}
            _ => self.verbs.push(Verb::Close),
        }
    }

    // Segment commands issued without an open contour start one at the
    // current position (or the origin if there is none).
    fn inject_move_to_if_needed(&mut self) {
        match self.verbs.last() {
            None => self.move_to(point(0.0, 0.0)),
            Some(Verb::Close) => {
                let first = self.first_point_of_last_contour();
                self.move_to(first);
            }
            _ => {}
        }
    }

    fn first_point_of_last_contour(&self) -> Point {
        let mut pts = self.points.len();
        for verb in self.verbs.iter().rev() {
            match verb {
                Verb::MoveTo => return self.points[pts - 1],
                Verb::LineTo => pts -= 1,
                Verb::QuadraticTo | Verb::ConicTo => pts -= 2,
                Verb::CubicTo => pts -= 3,
                Verb::Close => {}
            }
        }

        point(0.0, 0.0)
    }

    /// Appends the last contour of `other` to this builder's current contour,
    /// walking it back to front.
    ///
    /// The caller must have brought the current position to `other`'s last
    /// point; the reversed segments then retrace `other` until its `MoveTo`,
    /// which is not emitted.
    pub fn reverse_path_to(&mut self, other: &PathBuilder) {
        let points = &other.points;
        let weights = &other.conic_weights;
        let mut pts = points.len();
        let mut wts = weights.len();

        for verb in other.verbs.iter().rev() {
            match verb {
                Verb::MoveTo => break,
                Verb::LineTo => {
                    pts -= 1;
                    self.points.push(points[pts - 1]);
                    self.verbs.push(Verb::LineTo);
                }
                Verb::QuadraticTo => {
                    pts -= 2;
                    self.points.push(points[pts]);
                    self.points.push(points[pts - 1]);
                    self.verbs.push(Verb::QuadraticTo);
                }
                Verb::ConicTo => {
                    pts -= 2;
                    wts -= 1;
                    self.points.push(points[pts]);
                    self.points.push(points[pts - 1]);
                    self.conic_weights.push(weights[wts]);
                    self.verbs.push(Verb::ConicTo);
                }
                Verb::CubicTo => {
                    pts -= 3;
                    self.points.push(points[pts + 1]);
                    self.points.push(points[pts]);
                    self.points.push(points[pts - 1]);
                    self.verbs.push(Verb::CubicTo);
                }
                Verb::Close => {}
            }
        }
    }

    /// Appends all of `other`'s contours, as is.
    pub fn push_path_builder(&mut self, other: &PathBuilder) {
        self.points.extend_from_slice(&other.points);
        self.verbs.extend_from_slice(&other.verbs);
        self.conic_weights.extend_from_slice(&other.conic_weights);
    }

    /// Appends all of `path`'s contours, as is.
    pub fn push_path(&mut self, path: &Path) {
        self.points.extend_from_slice(path.points());
        self.verbs.extend_from_slice(path.verbs());
        self.conic_weights.extend_from_slice(path.conic_weights());
    }

    /// Appends a closed circle made of four conic quarter arcs.
    pub fn push_circle(&mut self, center: Point, radius: f32) {
        let r = radius.abs();
        self.move_to(point(center.x + r, center.y));
        self.conic_to(
            point(center.x + r, center.y + r),
            point(center.x, center.y + r),
            ROOT_2_OVER_2,
        );
        self.conic_to(
            point(center.x - r, center.y + r),
            point(center.x - r, center.y),
            ROOT_2_OVER_2,
        );
        self.conic_to(
            point(center.x - r, center.y - r),
            point(center.x, center.y - r),
            ROOT_2_OVER_2,
        );
        self.conic_to(
            point(center.x + r, center.y - r),
            point(center.x + r, center.y),
            ROOT_2_OVER_2,
        );
        self.close();
    }

    /// The axis-aligned bounding box of the accumulated control points.
    pub fn bounds(&self) -> Box2D {
        bounding_box_of_points(&self.points)
    }

    /// Returns whether every point written since point index `start_point`
    /// coincides exactly with the first of them.
    pub fn is_zero_length_since(&self, start_point: usize) -> bool {
        let points = &self.points[start_point.min(self.points.len())..];
        let first = match points.first() {
            Some(p) => *p,
            None => return true,
        };

        points[1..].iter().all(|p| *p == first)
    }

    /// Consumes the builder and produces an immutable [`Path`].
    pub fn build(self) -> Path {
        Path {
            points: self.points.into_boxed_slice(),
            verbs: self.verbs.into_boxed_slice(),
            conic_weights: self.conic_weights.into_boxed_slice(),
        }
    }
}
