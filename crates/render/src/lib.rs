#![deny(bare_trait_objects)]

//! The boundary between path geometry and a GPU renderer.
//!
//! This crate is reexported in [tracery](../tracery/index.html).
//!
//! Nothing here talks to a graphics API. The [`PathRenderer`](struct.PathRenderer.html)
//! turns vertex buffers into [draw plans](plan/struct.DrawPlan.html), ordered lists of
//! simple commands (upload, bind a program, set the stencil state, draw) that a
//! [`RenderBackend`](plan/trait.RenderBackend.html) executes. The GLSL sources of the
//! programs are provided by [`ShaderSources`](struct.ShaderSources.html).
//!
//! The [`view`](view/index.html) module maps window coordinates to the world, and
//! [`particles`](particles/index.html) holds a small particle system drawn with
//! instancing.

pub extern crate tracery_path as path;

pub use path::math;

pub mod particles;
pub mod plan;
mod renderer;
mod style;
pub mod view;

#[doc(inline)]
pub use crate::plan::{DrawCommand, DrawPlan, RecordingBackend, RenderBackend, RenderError};
pub use crate::renderer::{PathRenderer, ProgramSources, ShaderSources};
pub use crate::style::{Color, FillStyle, StrokeStyle};
