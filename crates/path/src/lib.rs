//! Data structure and path building facilities for 2d vector paths.
//!
//! The central type is [`Path`]: an immutable verb/point tape that can
//! represent line segments, quadratic and cubic béziers and conic (rational
//! quadratic) arcs. Paths are created with [`PathBuilder`], which can also be
//! reused as a growable working path by the stroking code.
//!
//! This crate is reexported in [freehand](https://docs.rs/freehand/).

pub use freehand_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

/// f32 versions of the euclid types used everywhere in this crate.
pub use freehand_geom::math;

mod builder;
mod events;
mod path;

pub use crate::builder::PathBuilder;
pub use crate::events::PathEvent;
pub use crate::path::{Iter, Path, Verb};
