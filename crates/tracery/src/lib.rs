#![deny(bare_trait_objects)]

//! Turn 2D paths into stroke geometry for the GPU.
//!
//! # Crates
//!
//! This meta-crate (`tracery`) reexports the following sub-crates for convenience:
//!
//! * **tracery_path** - Build paths into position and normal vertex buffers.
//! * **tracery_geom** - Quadratic bézier curves, circular arcs and miter joins.
//! * **tracery_extra** - Glyph outlines, a text format for path commands and debugging
//!   tools.
//! * **tracery_render** - Draw plans and shaders to stroke and fill the vertex buffers,
//!   and a small particle system.
//!
//! Each `tracery_<name>` crate is reexported as a `<name>` module in `tracery`. For example:
//!
//! ```ignore
//! extern crate tracery_path;
//! use tracery_path::Path;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate tracery;
//! use tracery::path::Path;
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! `tracery_extra` and `tracery_render` are disabled by default. They can be added
//! with the feature flags `extra` and `render`.
//!
//! # Examples
//!
//! ## Building the stroke of a path
//!
//! ```
//! use tracery::math::point;
//! use tracery::path::{Path, BuilderOptions};
//! use tracery::path::traits::*;
//! use tracery::geom::euclid::Angle;
//!
//! let options = BuilderOptions::DEFAULT.with_arc_steps(32);
//! let mut path = Path::with_options(options);
//! path.move_to(point(0.0, 0.0)).unwrap();
//! path.line_to(point(1.0, 0.0)).unwrap();
//! path.quadratic_to(point(2.0, 0.0), point(2.0, 1.0)).unwrap();
//! path.arc_to(point(2.0, 3.0), Angle::radians(std::f32::consts::PI)).unwrap();
//!
//! let buffer = path.build();
//!
//! // Every pair of vertices is an edge. Extruding each vertex along its normal
//! // by half of the line width gives the outline of the stroke.
//! for (from, to) in buffer.edges() {
//!     let _ = (from.extrude(0.1), to.extrude(0.1));
//! }
//!
//! // The vertices can be uploaded to the GPU as they are.
//! let bytes: &[u8] = buffer.as_bytes();
//! assert_eq!(bytes.len(), buffer.len() * buffer.layout().stride);
//! ```
//!
//! ## Rendering
//!
//! tracery does not talk to any graphics API. The `render` module (behind the
//! `render` feature) describes what to draw as a list of commands, leaving the
//! choice of API to a backend.

pub extern crate tracery_geom;
pub extern crate tracery_path;
#[cfg(feature = "extra")]
pub extern crate tracery_extra;
#[cfg(feature = "render")]
pub extern crate tracery_render;

pub use tracery_geom as geom;
pub use tracery_path as path;
#[cfg(feature = "extra")]
pub use tracery_extra as extra;
#[cfg(feature = "render")]
pub use tracery_render as render;

pub use path::math;
