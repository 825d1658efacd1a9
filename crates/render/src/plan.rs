//! Draw plans: the sequence of GPU operations needed to draw something.
//!
//! Plans are plain data. They are executed by a [`RenderBackend`](trait.RenderBackend.html)
//! which maps each [`DrawCommand`](enum.DrawCommand.html) to the graphics API of its
//! choice.

use crate::math::Transform;
use crate::particles::{ParticleInstance, ParticleVertex};
use crate::path::VertexBuffer;
use crate::style::Color;
use crate::view::transform_columns;

use thiserror::Error;

/// How vertices are assembled into primitives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Each pair of vertices is a line.
    Lines,
    /// Each group of three vertices is a triangle.
    Triangles,
    TriangleStrip,
}

/// The shader programs a backend needs to provide.
///
/// See [`ShaderSources`](../struct.ShaderSources.html) for their source code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Program {
    /// Vertex, geometry and fragment shaders. The geometry shader extrudes each line
    /// along the vertex normals.
    Stroke,
    /// Vertex and fragment shaders.
    Fill,
    /// Instanced sprite-sheet quads.
    Particles,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StencilMode {
    Disabled,
    /// Invert the stencil value of every covered pixel, without testing.
    Invert,
    /// Only draw where the stencil value is not zero.
    TestNonZero,
}

/// Uniform values of the path programs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Uniforms {
    pub transform: Transform,
    pub color: Color,
    /// Stroke width, unused when filling.
    pub width: f32,
}

impl Uniforms {
    /// The transform as the columns of a 3x3 matrix.
    pub fn transform_columns(&self) -> [[f32; 3]; 3] {
        transform_columns(&self.transform)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Make the vertices the current vertex input.
    UploadVertices { buffer: VertexBuffer },
    /// Make the quad the current per-vertex input of the particle program.
    UploadQuad { vertices: [ParticleVertex; 4] },
    /// Make the particles the current per-instance input.
    UploadInstances { instances: Vec<ParticleInstance> },
    UseProgram(Program),
    SetUniforms(Uniforms),
    /// Uniforms of the particle program.
    SetParticleUniforms {
        transform: Transform,
        columns: u32,
        rows: u32,
        /// Sampler unit of the sprite sheet.
        texture_unit: u32,
    },
    /// Bind the texture of the current program to a texture unit.
    BindTexture { unit: u32 },
    ClearStencil,
    SetStencilMode(StencilMode),
    SetColorWrite(bool),
    Draw {
        primitive: Primitive,
        first: usize,
        count: usize,
    },
    DrawInstanced {
        primitive: Primitive,
        count: usize,
        instances: usize,
    },
}

impl DrawCommand {
    pub fn is_draw_call(&self) -> bool {
        matches!(
            self,
            DrawCommand::Draw { .. } | DrawCommand::DrawInstanced { .. }
        )
    }
}

/// An ordered list of draw commands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawPlan {
    commands: Vec<DrawCommand>,
}

impl DrawPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn num_draw_calls(&self) -> usize {
        self.commands.iter().filter(|cmd| cmd.is_draw_call()).count()
    }

    /// Execute the commands in order, stopping at the first error.
    pub fn submit(&self, backend: &mut dyn RenderBackend) -> Result<(), RenderError> {
        log::trace!("submitting {} draw commands", self.commands.len());
        for command in &self.commands {
            backend.execute(command)?;
        }

        Ok(())
    }
}

impl Extend<DrawCommand> for DrawPlan {
    fn extend<Iter: IntoIterator<Item = DrawCommand>>(&mut self, commands: Iter) {
        self.commands.extend(commands);
    }
}

/// Something that executes draw commands, usually on the GPU.
pub trait RenderBackend {
    fn execute(&mut self, command: &DrawCommand) -> Result<(), RenderError>;
}

/// A backend that only records the commands it receives.
#[derive(Clone, Debug, Default)]
pub struct RecordingBackend {
    commands: Vec<DrawCommand>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Return the recorded commands, leaving the backend empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl RenderBackend for RecordingBackend {
    fn execute(&mut self, command: &DrawCommand) -> Result<(), RenderError> {
        self.commands.push(command.clone());
        Ok(())
    }
}

#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum RenderError {
    #[error("Invalid stroke width {0}.")]
    InvalidStrokeWidth(f32),
    #[error("The {stage} shader source is empty.")]
    EmptyShaderSource { stage: &'static str },
    #[error("Invalid sprite sheet: {columns}x{rows} frames.")]
    InvalidSpriteSheet { columns: u32, rows: u32 },
    /// An error reported by the backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

#[test]
fn submit_stops_at_the_first_error() {
    struct FailOnDraw(Vec<DrawCommand>);
    impl RenderBackend for FailOnDraw {
        fn execute(&mut self, command: &DrawCommand) -> Result<(), RenderError> {
            if command.is_draw_call() {
                return Err(RenderError::Backend("out of memory".to_string()));
            }
            self.0.push(command.clone());
            Ok(())
        }
    }

    let mut plan = DrawPlan::new();
    plan.extend(vec![
        DrawCommand::UseProgram(Program::Fill),
        DrawCommand::Draw {
            primitive: Primitive::Triangles,
            first: 0,
            count: 3,
        },
        DrawCommand::SetStencilMode(StencilMode::Disabled),
    ]);
    assert_eq!(plan.num_draw_calls(), 1);

    let mut backend = FailOnDraw(Vec::new());
    assert_eq!(
        plan.submit(&mut backend),
        Err(RenderError::Backend("out of memory".to_string()))
    );
    assert_eq!(backend.0, vec![DrawCommand::UseProgram(Program::Fill)]);

    let mut recorder = RecordingBackend::new();
    plan.submit(&mut recorder).unwrap();
    assert_eq!(recorder.commands(), plan.commands());
    assert_eq!(recorder.take().len(), 3);
    assert!(recorder.commands().is_empty());
}
