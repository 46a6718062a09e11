#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::too_many_arguments)]

//! Stroke outline generation for 2d vector paths and pressure-varying ink.
//!
//! Stroking turns a centerline into the closed outline a pen of a given
//! width would paint: an outer offset contour, an inner offset contour
//! retraced in reverse, join geometry at every vertex and cap geometry at
//! the open ends. Two entry points are provided:
//!
//! - [`stroke_ink`] consumes a stream of pressure-tagged stylus samples and
//!   lets the pressure scale the local half-width,
//! - [`stroke_path`] strokes an already-built [`Path`](path::Path) at
//!   uniform width, flattening its curve segments.
//!
//! Both produce a [`Path`](path::Path) suitable for filling with the
//! non-zero winding rule, and both guarantee the result is finite or an
//! error, never a partially built outline.
//!
//! This crate is reexported in [freehand](https://docs.rs/freehand/).

pub use freehand_path as path;
pub use freehand_path::geom;
pub use freehand_path::math;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod error;
mod ink;
mod join;
mod outline;


pub use crate::error::{InvalidInput, StrokeError, StrokeResult};
pub use crate::ink::{stroke_ink, stroke_ink_with_endpoint, InkStroker, StylusPoint};
pub use crate::outline::{stroke_path, StrokeStyle, Style};

/// Line cap as defined by the SVG specification.
///
/// See: <https://svgwg.org/specs/strokes/#StrokeLinecapProperty>
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LineCap {
    /// The stroke for each sub-path does not extend beyond its two endpoints.
    /// A zero length sub-path will therefore not have any stroke.
    Butt,
    /// At the end of each sub-path, the shape representing the stroke will be
    /// extended by a half circle with a diameter equal to the stroke width.
    /// A zero length sub-path will therefore be rendered as a full circle.
    Round,
    /// At the end of each sub-path, the shape representing the stroke will be
    /// extended by a rectangle with the same width as the stroke width and
    /// whose length is half of the stroke width. A zero length sub-path will
    /// therefore be rendered as a square.
    Square,
}

/// Line join as defined by the SVG specification.
///
/// See: <https://svgwg.org/specs/strokes/#StrokeLinejoinProperty>
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LineJoin {
    /// A sharp corner is to be used to join path segments, falling back to
    /// a bevel when the miter limit is exceeded.
    Miter,
    /// A round corner is to be used to join path segments.
    Round,
    /// A bevelled corner is to be used to join path segments. The bevel
    /// shape is a triangle that fills the area between the two stroked
    /// segments.
    Bevel,
}

/// The endpoint styles of the ink stroking entry point.
///
/// A shorthand that picks both the join and the cap of the stroke.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum InkEndpointType {
    /// Round joins and round caps.
    Circle,
    /// Bevel joins and square caps.
    Square,
}

impl InkEndpointType {
    pub fn line_cap(self) -> LineCap {
        match self {
            InkEndpointType::Circle => LineCap::Round,
            InkEndpointType::Square => LineCap::Square,
        }
    }

    pub fn line_join(self) -> LineJoin {
        match self {
            InkEndpointType::Circle => LineJoin::Round,
            InkEndpointType::Square => LineJoin::Bevel,
        }
    }
}

/// Parameters for the stroke outline generators.
///
/// See the SVG specification for the meaning of the line width, cap, join
/// and miter limit parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct StrokeOptions {
    /// Thickness of the stroke.
    ///
    /// Default value: `StrokeOptions::DEFAULT_LINE_WIDTH`.
    pub line_width: f32,

    /// See the SVG specification.
    ///
    /// Must be greater than or equal to 1.0; a smaller value makes miter
    /// joins fall back to bevel.
    ///
    /// Default value: `StrokeOptions::DEFAULT_MITER_LIMIT`.
    pub miter_limit: f32,

    /// The ratio between the output resolution and the coordinate space of
    /// the input. Tolerances used for degeneracy checks and curve
    /// flattening are derived from it.
    ///
    /// Values lower than or equal to zero are normalized to 1.0 by the
    /// stroking entry points.
    ///
    /// Default value: `StrokeOptions::DEFAULT_RESOLUTION_SCALE`.
    pub resolution_scale: f32,

    /// See the SVG specification.
    ///
    /// Default value: `LineJoin::Miter`.
    pub line_join: LineJoin,

    /// The cap drawn at the ends of open contours.
    ///
    /// Default value: `LineCap::Butt`.
    pub line_cap: LineCap,
}

impl StrokeOptions {
    /// Minimum miter limit for a miter join to remain a miter.
    pub const MINIMUM_MITER_LIMIT: f32 = 1.0;
    /// Default miter limit.
    pub const DEFAULT_MITER_LIMIT: f32 = 4.0;
    /// Default line cap.
    pub const DEFAULT_LINE_CAP: LineCap = LineCap::Butt;
    /// Default line join.
    pub const DEFAULT_LINE_JOIN: LineJoin = LineJoin::Miter;
    /// Default line width.
    pub const DEFAULT_LINE_WIDTH: f32 = 1.0;
    /// Default resolution scale.
    pub const DEFAULT_RESOLUTION_SCALE: f32 = 1.0;

    pub const DEFAULT: Self = StrokeOptions {
        line_width: Self::DEFAULT_LINE_WIDTH,
        miter_limit: Self::DEFAULT_MITER_LIMIT,
        resolution_scale: Self::DEFAULT_RESOLUTION_SCALE,
        line_join: Self::DEFAULT_LINE_JOIN,
        line_cap: Self::DEFAULT_LINE_CAP,
    };

    #[inline]
    pub fn with_line_cap(mut self, cap: LineCap) -> Self {
        self.line_cap = cap;
        self
    }

    #[inline]
    pub fn with_line_join(mut self, join: LineJoin) -> Self {
        self.line_join = join;
        self
    }

    #[inline]
    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    #[inline]
    pub fn with_miter_limit(mut self, limit: f32) -> Self {
        assert!(limit >= Self::MINIMUM_MITER_LIMIT);
        self.miter_limit = limit;
        self
    }

    #[inline]
    pub fn with_resolution_scale(mut self, scale: f32) -> Self {
        self.resolution_scale = scale;
        self
    }
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}
