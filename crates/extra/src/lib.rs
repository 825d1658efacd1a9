#![deny(bare_trait_objects)]

//! Producers of path commands and debugging helpers.
//!
//! This crate is reexported in [tracery](../tracery/index.html).

extern crate tracery_path as path;

pub use path::geom::euclid;
pub use path::math;

pub mod debugging;
pub mod glyph;
pub mod parser;
