//! The incremental ink stroker.
//!
//! [`InkStroker`] consumes a stream of pressure-tagged points one at a time,
//! growing an outer and an inner offset contour as it goes, and emits a
//! single closed outline path when the stream ends. The pressure of each
//! sample scales the local half-width, which is what turns a flat polyline
//! into calligraphic ink.

use crate::geom::scalar::{Scalar, NEARLY_ZERO};
use crate::geom::utils::{normal_and_unit_normal, points_within_tolerance};
use crate::join::{add_cap, add_join, StrokeSides};
use crate::math::{point, vector, Point, Vector};
use crate::path::{Path, PathBuilder};
use crate::{InkEndpointType, InvalidInput, LineCap, LineJoin, StrokeError, StrokeOptions};

/// A single stylus sample: a position and the pen pressure recorded there.
///
/// Pressure scales the local stroke half-width. Equality compares the
/// position only, so that degeneracy checks ignore pressure jitter between
/// coincident samples.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct StylusPoint {
    pub position: Point,
    pub pressure: f32,
}

impl StylusPoint {
    #[inline]
    pub fn new(x: f32, y: f32, pressure: f32) -> Self {
        StylusPoint {
            position: point(x, y),
            pressure,
        }
    }

    /// A sample at the default pressure of 1.0.
    #[inline]
    pub fn at(position: Point) -> Self {
        StylusPoint {
            position,
            pressure: 1.0,
        }
    }
}

impl PartialEq for StylusPoint {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ContourState {
    /// No contour is open.
    NoContour,
    /// A `move_to` was seen, no segment accepted yet.
    Started,
    /// At least one segment was accepted.
    Extending,
}

/// The incremental stroker state machine.
///
/// Feed it a contour at a time through [`move_to`](InkStroker::move_to) and
/// [`line_to`](InkStroker::line_to); a new `move_to` finalizes the open
/// contour with caps. [`close`](InkStroker::close) seals the current contour
/// with a join instead, and [`finish`](InkStroker::finish) hands over the
/// accumulated outline.
///
/// The stroker owns its outer, inner and cusp scratch paths for its whole
/// lifetime; the inner path is rewound (not freed) between contours.
pub struct InkStroker {
    radius: f32,
    inv_miter_limit: f32,
    res_scale: f32,
    inv_res_scale: f32,
    cap: LineCap,
    join: LineJoin,
    can_ignore_center: bool,

    first_normal: Vector,
    prev_normal: Vector,
    first_unit_normal: Vector,
    prev_unit_normal: Vector,
    first_pt: StylusPoint,
    prev_pt: StylusPoint,
    first_outer_pt: Point,
    first_outer_pt_index_in_contour: usize,

    contour: ContourState,
    prev_is_line: bool,
    // The previous join was not degenerate.
    join_completed: bool,

    // outer is the working answer, inner is per-contour scratch, cusper
    // holds patch geometry for cusps found along the way.
    outer: PathBuilder,
    inner: PathBuilder,
    cusper: PathBuilder,
}

impl InkStroker {
    /// Creates a stroker for the given options.
    ///
    /// With `can_ignore_center` enabled, a closed contour whose inner
    /// boundary is known to be covered by the outer one keeps only the
    /// larger of the two (used for stroke-and-fill styles where the center
    /// is filled anyway).
    pub fn new(options: &StrokeOptions, can_ignore_center: bool) -> Self {
        let mut join = options.line_join;
        let mut inv_miter_limit = 0.0;
        if join == LineJoin::Miter {
            if options.miter_limit <= StrokeOptions::MINIMUM_MITER_LIMIT {
                join = LineJoin::Bevel;
            } else {
                inv_miter_limit = options.miter_limit.invert();
            }
        }

        let res_scale = if options.resolution_scale > 0.0 {
            options.resolution_scale
        } else {
            StrokeOptions::DEFAULT_RESOLUTION_SCALE
        };
        // The '4' matches the error term of scanline conversion.
        let inv_res_scale = (res_scale * 4.0).invert();

        InkStroker {
            radius: options.line_width.half(),
            inv_miter_limit,
            res_scale,
            inv_res_scale,
            cap: options.line_cap,
            join,
            can_ignore_center,
            first_normal: vector(0.0, 0.0),
            prev_normal: vector(0.0, 0.0),
            first_unit_normal: vector(0.0, 0.0),
            prev_unit_normal: vector(0.0, 0.0),
            first_pt: StylusPoint::new(0.0, 0.0, 1.0),
            prev_pt: StylusPoint::new(0.0, 0.0, 1.0),
            first_outer_pt: point(0.0, 0.0),
            first_outer_pt_index_in_contour: 0,
            contour: ContourState::NoContour,
            prev_is_line: false,
            join_completed: false,
            outer: PathBuilder::new(),
            inner: PathBuilder::new(),
            cusper: PathBuilder::new(),
        }
    }

    /// Pre-sizes the scratch paths for a stream of `point_count` samples.
    pub fn reserve(&mut self, point_count: usize) {
        // 3x for the result (inner + outer + joins), 1x for the scratch.
        self.outer.reserve(point_count * 3, point_count);
        self.inner.reserve(point_count, point_count);
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn resolution_scale(&self) -> f32 {
        self.res_scale
    }

    /// Starts a new contour, finalizing the previous one (with caps) if it
    /// had any committed segments.
    pub fn move_to(&mut self, pt: StylusPoint) {
        if self.contour == ContourState::Extending {
            self.finish_contour(false, false);
        }
        self.contour = ContourState::Started;
        self.first_pt = pt;
        self.prev_pt = pt;
        self.join_completed = false;
    }

    /// Extends the current contour with a straight segment.
    ///
    /// Segments shorter than the degeneracy tolerance are dropped, except
    /// when doing so would suppress the cap of a single tap: a teeny segment
    /// whose endpoints are exactly equal still goes through (with a fallback
    /// orientation) as long as no join has been completed yet and the cap
    /// style draws something at zero length.
    pub fn line_to(&mut self, curr: StylusPoint) {
        let teeny_line = points_within_tolerance(
            self.prev_pt.position,
            curr.position,
            NEARLY_ZERO * self.inv_res_scale,
        );

        if self.cap == LineCap::Butt && teeny_line {
            return;
        }
        if teeny_line && (self.join_completed || self.prev_pt != curr) {
            return;
        }

        let unit_normal = match self.pre_join_to(curr, true) {
            Some((_, unit_normal)) => unit_normal,
            None => return,
        };

        let curr_normal = unit_normal * (self.radius * curr.pressure);
        self.outer.line_to(curr.position + curr_normal);
        self.inner.line_to(curr.position - curr_normal);

        self.post_join_to(curr, curr_normal, unit_normal);
    }

    /// Finalizes the current contour as closed: seals the loop with a join
    /// and retraces the inner contour in reverse.
    pub fn close(&mut self, is_line: bool) {
        self.finish_contour(true, is_line);
    }

    /// Finalizes the current contour as open (caps at both ends) and hands
    /// ownership of the accumulated outline to the caller.
    pub fn finish(self, is_line: bool) -> Path {
        self.finish_builder(is_line).build()
    }

    pub(crate) fn finish_builder(mut self, is_line: bool) -> PathBuilder {
        self.finish_contour(false, is_line);
        self.outer
    }

    /// Appends a circular patch covering a cusp at `center`.
    pub fn push_cusp_circle(&mut self, center: Point) {
        self.cusper.push_circle(center, self.radius);
    }

    /// The first point of the current contour.
    pub fn first_point(&self) -> Point {
        self.first_pt.position
    }

    /// The current contour has seen its `move_to` but no accepted segment.
    pub fn has_only_move_to(&self) -> bool {
        self.contour == ContourState::Started
    }

    /// Every offset point committed for the current contour is coincident:
    /// nothing visible would be stroked.
    pub fn is_current_contour_empty(&self) -> bool {
        self.inner.is_zero_length_since(0)
            && self
                .outer
                .is_zero_length_since(self.first_outer_pt_index_in_contour)
    }

    // Computes the normal for the segment from prev_pt to curr and either
    // seeds the offset contours (first segment) or emits the join with the
    // previous segment. Returns None when the segment must be skipped.
    fn pre_join_to(&mut self, curr: StylusPoint, curr_is_line: bool) -> Option<(Vector, Vector)> {
        debug_assert!(self.contour != ContourState::NoContour);

        let prev = self.prev_pt.position;
        let prev_radius = self.radius * self.prev_pt.pressure;

        let (normal, unit_normal) =
            match normal_and_unit_normal(prev, curr.position, self.res_scale, prev_radius) {
                Some(normals) => normals,
                None => {
                    if self.cap == LineCap::Butt {
                        return None;
                    }
                    // Square and round caps draw even at zero length. A zero
                    // length segment has no direction, so default to upright.
                    (vector(prev_radius, 0.0), vector(1.0, 0.0))
                }
            };

        if self.contour == ContourState::Started {
            self.first_normal = normal;
            self.first_unit_normal = unit_normal;
            self.first_outer_pt = prev + normal;

            self.outer.move_to(self.first_outer_pt);
            self.inner.move_to(prev - normal);
        } else {
            add_join(
                self.join,
                self.prev_unit_normal,
                prev,
                unit_normal,
                prev_radius,
                self.inv_miter_limit,
                self.prev_is_line,
                curr_is_line,
                StrokeSides {
                    outer: &mut self.outer,
                    inner: &mut self.inner,
                },
            );
        }
        self.prev_is_line = curr_is_line;

        Some((normal, unit_normal))
    }

    fn post_join_to(&mut self, curr: StylusPoint, normal: Vector, unit_normal: Vector) {
        self.join_completed = true;
        self.prev_pt = curr;
        self.prev_normal = normal;
        self.prev_unit_normal = unit_normal;
        self.contour = ContourState::Extending;
    }

    fn finish_contour(&mut self, close: bool, curr_is_line: bool) {
        if self.contour == ContourState::Extending {
            if close {
                add_join(
                    self.join,
                    self.prev_unit_normal,
                    self.prev_pt.position,
                    self.first_unit_normal,
                    self.radius,
                    self.inv_miter_limit,
                    self.prev_is_line,
                    curr_is_line,
                    StrokeSides {
                        outer: &mut self.outer,
                        inner: &mut self.inner,
                    },
                );
                self.outer.close();

                if self.can_ignore_center {
                    // The center is filled anyway: keep the larger of the
                    // two boundaries and drop the other.
                    if self.inner.bounds().contains_box(&self.outer.bounds()) {
                        std::mem::swap(&mut self.inner, &mut self.outer);
                    }
                } else {
                    // Add the inner boundary as its own contour, retraced
                    // backwards so the non-zero winding leaves the ring.
                    if let Some(inner_last) = self.inner.last_point() {
                        self.outer.move_to(inner_last);
                    }
                    self.outer.reverse_path_to(&self.inner);
                    self.outer.close();
                }
            } else {
                // Cap the end.
                if let Some(inner_last) = self.inner.last_point() {
                    add_cap(
                        self.cap,
                        self.prev_pt.position,
                        self.prev_normal,
                        inner_last,
                        curr_is_line,
                        &mut self.outer,
                    );
                }
                self.outer.reverse_path_to(&self.inner);
                // Cap the start.
                add_cap(
                    self.cap,
                    self.first_pt.position,
                    -self.first_normal,
                    self.first_outer_pt,
                    self.prev_is_line,
                    &mut self.outer,
                );
                self.outer.close();
            }

            if !self.cusper.is_empty() {
                self.outer.push_path_builder(&self.cusper);
                self.cusper.clear();
            }
        }

        // The inner path is reused across contours: rewind it instead of
        // releasing its storage.
        self.inner.clear();
        self.contour = ContourState::NoContour;
        self.first_outer_pt_index_in_contour = self.outer.num_points();
    }
}

/// Strokes a stream of stylus samples into a closed outline path.
///
/// A single sample is treated as a zero-length segment: round and square
/// styles render a dot of the configured width, a butt cap renders nothing
/// and yields an empty path.
pub fn stroke_ink(points: &[StylusPoint], options: &StrokeOptions) -> Result<Path, StrokeError> {
    if points.is_empty() {
        return Err(InvalidInput::EmptyPointStream.into());
    }
    if options.line_width.half() <= 0.0 {
        return Err(InvalidInput::NonPositiveWidth.into());
    }
    // Reject non-finite samples up front: depending on the cap style a NaN
    // segment may be silently dropped rather than poisoning the output, and
    // the caller should not get an outline that ignored part of the stream.
    if !points
        .iter()
        .all(|p| p.position.x.is_finite() && p.position.y.is_finite())
    {
        return Err(StrokeError::NonFiniteResult);
    }

    let mut stroker = InkStroker::new(options, false);
    stroker.reserve(points.len());

    stroker.move_to(points[0]);
    for pt in &points[1..] {
        stroker.line_to(*pt);
    }
    if points.len() == 1 {
        // A single tap still deserves ink: replay the point as a
        // zero-length segment so the caps can render the dot.
        stroker.line_to(points[0]);
    }

    let path = stroker.finish(true);
    if !path.is_finite() {
        return Err(StrokeError::NonFiniteResult);
    }

    Ok(path)
}

/// Like [`stroke_ink`], with the join and cap picked by an
/// [`InkEndpointType`] shorthand.
pub fn stroke_ink_with_endpoint(
    points: &[StylusPoint],
    endpoint_type: InkEndpointType,
    options: &StrokeOptions,
) -> Result<Path, StrokeError> {
    let options = options
        .with_line_cap(endpoint_type.line_cap())
        .with_line_join(endpoint_type.line_join());

    stroke_ink(points, &options)
}
