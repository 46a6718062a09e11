//! Uniform-width stroking of already-built paths.
//!
//! The assembler walks the source path's events, flattens curve segments and
//! drives the same incremental stroker as the ink entry point, at a constant
//! pressure of 1.0. The [`StrokeStyle`] record also models the hairline and
//! fill styles, for which stroking is a no-op and the source path is passed
//! through unchanged.

use crate::geom::scalar::Scalar;
use crate::geom::{Conic, CubicBezierSegment, QuadraticBezierSegment};
use crate::ink::{InkStroker, StylusPoint};
use crate::path::{Path, PathEvent};
use crate::{LineCap, LineJoin, StrokeError, StrokeOptions};

// Must be negative: 0 means hairline and positive widths mean a normal
// stroke.
const FILL_STYLE_WIDTH: f32 = -1.0;

/// The effective rendering style a [`StrokeStyle`] resolves to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Style {
    /// A stroke of zero width, rendered as thin lines without outline
    /// generation.
    Hairline,
    /// No stroking at all.
    Fill,
    Stroke,
    /// The outline covers both the stroke and the filled interior.
    StrokeAndFill,
}

/// A resolved stroke style record: the subset of the paint state the
/// outline assembler consumes.
///
/// The width doubles as the style discriminant: negative means fill, zero
/// means hairline, positive means an actual stroke.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    resolution_scale: f32,
    width: f32,
    miter_limit: f32,
    cap: LineCap,
    join: LineJoin,
    stroke_and_fill: bool,
}

impl StrokeStyle {
    /// A style that strokes at the width in `options`.
    pub fn stroke(options: &StrokeOptions) -> Self {
        StrokeStyle {
            resolution_scale: Self::normalized_res_scale(options),
            width: options.line_width,
            miter_limit: options.miter_limit,
            cap: options.line_cap,
            join: options.line_join,
            stroke_and_fill: false,
        }
    }

    /// A style that strokes and fills the interior.
    ///
    /// A zero width degenerates to a plain fill (hairline + fill == fill).
    pub fn stroke_and_fill(options: &StrokeOptions) -> Self {
        let mut style = Self::stroke(options);
        if options.line_width == 0.0 {
            style.width = FILL_STYLE_WIDTH;
        } else {
            style.stroke_and_fill = true;
        }
        style
    }

    /// A style that fills without stroking.
    pub fn fill(options: &StrokeOptions) -> Self {
        let mut style = Self::stroke(options);
        style.width = FILL_STYLE_WIDTH;
        style
    }

    /// A zero-width (hairline) style.
    pub fn hairline(options: &StrokeOptions) -> Self {
        let mut style = Self::stroke(options);
        style.width = 0.0;
        style
    }

    fn normalized_res_scale(options: &StrokeOptions) -> f32 {
        if options.resolution_scale > 0.0 {
            options.resolution_scale
        } else {
            StrokeOptions::DEFAULT_RESOLUTION_SCALE
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn resolution_scale(&self) -> f32 {
        self.resolution_scale
    }

    pub fn style(&self) -> Style {
        if self.width < 0.0 {
            Style::Fill
        } else if self.width == 0.0 {
            Style::Hairline
        } else if self.stroke_and_fill {
            Style::StrokeAndFill
        } else {
            Style::Stroke
        }
    }

    pub fn is_hairline_style(&self) -> bool {
        self.style() == Style::Hairline
    }

    pub fn is_fill_style(&self) -> bool {
        self.style() == Style::Fill
    }

    /// Whether [`apply_to_path`](StrokeStyle::apply_to_path) would change
    /// the path.
    pub fn need_to_apply(&self) -> bool {
        matches!(self.style(), Style::Stroke | Style::StrokeAndFill)
    }

    /// Applies the style to `src`, producing the stroked outline.
    ///
    /// Returns `None` for the hairline and fill styles, for which the source
    /// is to be used unchanged.
    pub fn apply_to_path(&self, src: &Path) -> Option<Path> {
        if self.width <= 0.0 {
            return None;
        }

        let options = StrokeOptions {
            line_width: self.width,
            miter_limit: self.miter_limit,
            resolution_scale: self.resolution_scale,
            line_join: self.join,
            line_cap: self.cap,
        };
        let mut stroker = InkStroker::new(&options, self.stroke_and_fill);
        stroker.reserve(src.points().len());

        // The same tolerance that drives the degeneracy checks bounds the
        // flattening error of curve segments.
        let tolerance = (self.resolution_scale * 4.0).invert();
        let mut last_segment_is_line = false;

        for event in src.iter() {
            match event {
                PathEvent::Begin { at } => {
                    stroker.move_to(StylusPoint::at(at));
                    last_segment_is_line = false;
                }
                PathEvent::Line { to, .. } => {
                    stroker.line_to(StylusPoint::at(to));
                    last_segment_is_line = true;
                }
                PathEvent::Quadratic { from, ctrl, to } => {
                    let segment = QuadraticBezierSegment { from, ctrl, to };
                    segment.for_each_flattened(tolerance, &mut |p| {
                        stroker.line_to(StylusPoint::at(p));
                    });
                    last_segment_is_line = false;
                }
                PathEvent::Conic {
                    from,
                    ctrl,
                    to,
                    weight,
                } => {
                    let conic = Conic::new(from, ctrl, to, weight);
                    conic.for_each_flattened(tolerance, &mut |p| {
                        stroker.line_to(StylusPoint::at(p));
                    });
                    last_segment_is_line = false;
                }
                PathEvent::Cubic {
                    from,
                    ctrl1,
                    ctrl2,
                    to,
                } => {
                    let segment = CubicBezierSegment {
                        from,
                        ctrl1,
                        ctrl2,
                        to,
                    };
                    // A cusp leaves a notch between the offset contours;
                    // patch it with a circle at the cusp point.
                    if let Some(t) = segment.find_cusp() {
                        stroker.push_cusp_circle(segment.sample(t));
                    }
                    segment.for_each_flattened(tolerance, &mut |p| {
                        stroker.line_to(StylusPoint::at(p));
                    });
                    last_segment_is_line = false;
                }
                PathEvent::End { close: true, first, last } => {
                    if self.cap != LineCap::Butt {
                        // A close right after a move is a zero-length line,
                        // which square and round caps render as a dot: leave
                        // the contour open so the caps are drawn.
                        if stroker.has_only_move_to() {
                            stroker.line_to(StylusPoint::at(first));
                            last_segment_is_line = true;
                            continue;
                        }
                        // A contour of only zero-length segments strokes
                        // nothing; keep it open for the same reason.
                        if stroker.is_current_contour_empty() {
                            last_segment_is_line = true;
                            continue;
                        }
                    }
                    // The closing edge back to the first point is implicit
                    // in the verb tape; stroke it explicitly.
                    if last != first {
                        stroker.line_to(StylusPoint::at(first));
                        last_segment_is_line = true;
                    }
                    stroker.close(last_segment_is_line);
                }
                PathEvent::End { close: false, .. } => {
                    // The next Begin (or the final finish) caps this
                    // contour.
                }
            }
        }

        let mut outline = stroker.finish_builder(last_segment_is_line);
        if self.stroke_and_fill {
            // The interior is part of the shape: carry the source contours
            // into the result so filling the outline also fills the center.
            outline.push_path(src);
        }

        Some(outline.build())
    }
}

/// Strokes `src` at uniform width, producing a closed outline path.
///
/// Hairline and fill styles (width of zero in `options`) pass the source
/// through unchanged. Non-finite input or output resets to an error rather
/// than exposing partial geometry.
pub fn stroke_path(src: &Path, options: &StrokeOptions) -> Result<Path, StrokeError> {
    if !src.is_finite() {
        return Err(StrokeError::NonFiniteResult);
    }

    let style = StrokeStyle::stroke(options);
    let dst = match style.apply_to_path(src) {
        Some(outline) => outline,
        None => src.clone(),
    };

    if !dst.is_finite() {
        return Err(StrokeError::NonFiniteResult);
    }

    Ok(dst)
}
