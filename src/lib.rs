#![deny(bare_trait_objects)]

//! 2d stroke outline generation, for pressure-varying ink and plain paths.
//!
//! This meta-crate (`freehand`) reexports the following sub-crates for
//! convenience:
//!
//! * **freehand_stroke** - The ink stroker and the uniform-width path
//!   stroker.
//! * **freehand_path** - The path data structure and builder.
//! * **freehand_geom** - The geometric primitives underneath.

pub extern crate freehand_stroke as stroke;

pub use stroke::geom;
pub use stroke::math;
pub use stroke::path;

pub use stroke::{
    stroke_ink, stroke_ink_with_endpoint, stroke_path, InkEndpointType, InkStroker, InvalidInput,
    LineCap, LineJoin, StrokeError, StrokeOptions, StrokeResult, StrokeStyle, Style, StylusPoint,
};
