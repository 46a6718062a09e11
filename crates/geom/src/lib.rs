#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::many_single_char_names)]

//! Simple 2D geometric primitives on top of euclid, sized for stroke
//! outline generation.
//!
//! This crate implements the maths to work with:
//!
//! - normals and unit normals of line segments,
//! - rational quadratic (conic) arcs, used for round joins and caps,
//! - quadratic and cubic bézier curves.
//!
//! # Flattening
//!
//! Flattening is the action of approximating a curve with a succession of
//! line segments. The tolerance threshold taken as input by the flattening
//! methods corresponds to the maximum distance between the curve and its
//! linear approximation. This value is typically chosen in function of the
//! resolution the output will be displayed at.
//!
//! This crate is reexported in [freehand](https://docs.rs/freehand/).

// Reexport the dependency so that consumers use the same version.
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod scalar;
pub mod utils;

mod conic;
mod cubic_bezier;
mod quadratic_bezier;

pub use crate::conic::{ArcDirection, Conic, MAX_CONICS_FOR_ARC};
pub use crate::cubic_bezier::CubicBezierSegment;
pub use crate::quadratic_bezier::QuadraticBezierSegment;

pub mod math {
    //! f32 versions of the euclid types used everywhere in this crate.
    //! The other freehand crates reexport them.

    /// Alias for `euclid::default::Point2D<f32>`.
    pub type Point = euclid::default::Point2D<f32>;

    /// Alias for `euclid::default::Vector2D<f32>`.
    pub type Vector = euclid::default::Vector2D<f32>;

    /// Alias for `euclid::default::Box2D<f32>`.
    pub type Box2D = euclid::default::Box2D<f32>;

    /// Alias for `euclid::default::Transform2D<f32>`.
    pub type Transform = euclid::default::Transform2D<f32>;

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f32, y: f32) -> Vector {
        Vector::new(x, y)
    }
}
