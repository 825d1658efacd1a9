#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]

//! Build 2D paths into vertex buffers ready for GPU stroking and filling.
//!
//! This crate is reexported in [tracery](../tracery/index.html).
//!
//! A [`Path`](path/struct.Path.html) accumulates drawing commands (move, line,
//! quadratic bézier curve and circular arc) and directly produces the stroke
//! geometry: an ordered list of [`PathVertex`](struct.PathVertex.html), each
//! made of a position and an extrusion normal. Curves are flattened into a fixed
//! number of line segments and corners get a miter normal so that extruding every
//! vertex by half of the line width gives a stroke of uniform width.
//!
//! The vertices are meant to be drawn as a line list: every pair of consecutive
//! vertices `(2 * i, 2 * i + 1)` is one edge of the path. Sub-paths are never
//! connected to each other.
//!
//! # Examples
//!
//! ```
//! use tracery_path::Path;
//! use tracery_path::math::point;
//! use tracery_path::traits::*;
//!
//! let mut path = Path::new();
//! path.move_to(point(0.0, 0.0)).unwrap();
//! path.line_to(point(1.0, 0.0)).unwrap();
//! path.quadratic_to(point(2.0, 0.0), point(2.0, 1.0)).unwrap();
//!
//! let buffer = path.build();
//!
//! // One edge for the line and four for the curve, two vertices per edge.
//! assert_eq!(buffer.len(), 10);
//! ```

pub use tracery_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod buffer;
pub mod builder;
pub mod commands;
mod error;
pub mod path;

#[doc(inline)]
pub use crate::buffer::{PathVertex, VertexBuffer, VertexLayout};
#[doc(inline)]
pub use crate::commands::{PathCommand, PathCommands};
pub use crate::error::*;
#[doc(inline)]
pub use crate::path::Path;

pub use crate::geom::math;

pub mod traits {
    //! `tracery_path` traits reexported here for convenience.

    pub use crate::builder::Build;
    pub use crate::builder::PathBuilder;
}

/// Parameters for the path builder.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct BuilderOptions {
    /// Number of line segments each quadratic bézier curve is split into.
    ///
    /// Must be at least 1.
    /// Default value: `BuilderOptions::DEFAULT_QUADRATIC_STEPS`.
    pub quadratic_steps: usize,

    /// Number of line segments each arc is split into.
    ///
    /// Must be at least 1.
    /// Default value: `BuilderOptions::DEFAULT_ARC_STEPS`.
    pub arc_steps: usize,

    /// Maximum length of a join normal, in units of half line width.
    ///
    /// Sharper joins are clamped to this length. Use `f32::INFINITY` to never clamp.
    /// Must be greater than or equal to 1.0.
    /// Default value: `BuilderOptions::DEFAULT_MITER_LIMIT`.
    pub miter_limit: f32,
}

impl BuilderOptions {
    /// Minimum miter limit. A join normal is never shorter than a unit normal.
    pub const MINIMUM_MITER_LIMIT: f32 = 1.0;
    /// Default miter limit, the same as SVG's default `stroke-miterlimit`.
    pub const DEFAULT_MITER_LIMIT: f32 = 4.0;
    pub const DEFAULT_QUADRATIC_STEPS: usize = 4;
    pub const DEFAULT_ARC_STEPS: usize = 16;

    pub const DEFAULT: Self = BuilderOptions {
        quadratic_steps: Self::DEFAULT_QUADRATIC_STEPS,
        arc_steps: Self::DEFAULT_ARC_STEPS,
        miter_limit: Self::DEFAULT_MITER_LIMIT,
    };

    #[inline]
    pub fn with_quadratic_steps(mut self, steps: usize) -> Self {
        assert!(steps >= 1);
        self.quadratic_steps = steps;
        self
    }

    #[inline]
    pub fn with_arc_steps(mut self, steps: usize) -> Self {
        assert!(steps >= 1);
        self.arc_steps = steps;
        self
    }

    #[inline]
    pub fn with_miter_limit(mut self, limit: f32) -> Self {
        assert!(limit >= Self::MINIMUM_MITER_LIMIT);
        self.miter_limit = limit;
        self
    }
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[test]
fn options_defaults() {
    let options = BuilderOptions::default();
    assert_eq!(options.quadratic_steps, 4);
    assert_eq!(options.arc_steps, 16);
    assert_eq!(options.miter_limit, 4.0);

    let options = options.with_arc_steps(8).with_miter_limit(f32::INFINITY);
    assert_eq!(options.arc_steps, 8);
    assert_eq!(options.quadratic_steps, 4);
    assert!(options.miter_limit.is_infinite());
}

#[test]
#[should_panic]
fn options_reject_small_miter_limit() {
    let _ = BuilderOptions::DEFAULT.with_miter_limit(0.5);
}
