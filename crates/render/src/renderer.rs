use crate::math::{Box2D, Transform};
use crate::path::{PathVertex, VertexBuffer};
use crate::plan::{DrawCommand, DrawPlan, Primitive, Program, RenderError, StencilMode, Uniforms};
use crate::style::{FillStyle, StrokeStyle};

/// GLSL sources of the programs a backend compiles.
///
/// `Default` gives the built-in shaders.
#[derive(Clone, Debug, PartialEq)]
pub struct ShaderSources {
    /// Shared by the stroke and fill programs.
    pub vertex: String,
    /// Shared by the stroke and fill programs.
    pub fragment: String,
    /// Extrudes the lines of the stroke program.
    pub stroke_geometry: String,
    pub particle_vertex: String,
    pub particle_fragment: String,
}

/// The stages of one program.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProgramSources<'l> {
    pub vertex: &'l str,
    pub geometry: Option<&'l str>,
    pub fragment: &'l str,
}

impl ShaderSources {
    pub fn program(&self, program: Program) -> ProgramSources {
        match program {
            Program::Stroke => ProgramSources {
                vertex: &self.vertex,
                geometry: Some(self.stroke_geometry.as_str()),
                fragment: &self.fragment,
            },
            Program::Fill => ProgramSources {
                vertex: &self.vertex,
                geometry: None,
                fragment: &self.fragment,
            },
            Program::Particles => ProgramSources {
                vertex: &self.particle_vertex,
                geometry: None,
                fragment: &self.particle_fragment,
            },
        }
    }

    fn validate(&self) -> Result<(), RenderError> {
        let stages = [
            ("vertex", &self.vertex),
            ("fragment", &self.fragment),
            ("stroke geometry", &self.stroke_geometry),
            ("particle vertex", &self.particle_vertex),
            ("particle fragment", &self.particle_fragment),
        ];
        for &(stage, src) in &stages {
            if src.trim().is_empty() {
                return Err(RenderError::EmptyShaderSource { stage });
            }
        }

        Ok(())
    }
}

impl Default for ShaderSources {
    fn default() -> Self {
        ShaderSources {
            vertex: include_str!("../shaders/path.vert.glsl").to_string(),
            fragment: include_str!("../shaders/path.frag.glsl").to_string(),
            stroke_geometry: include_str!("../shaders/stroke.geom.glsl").to_string(),
            particle_vertex: include_str!("../shaders/particle.vert.glsl").to_string(),
            particle_fragment: include_str!("../shaders/particle.frag.glsl").to_string(),
        }
    }
}

/// Produces the draw plans of stroked and filled paths.
///
/// # Examples
///
/// ```
/// use tracery_render::{PathRenderer, RecordingBackend, ShaderSources, StrokeStyle};
/// use tracery_render::math::{point, Transform};
/// use tracery_render::path::{Path, traits::*};
///
/// let mut path = Path::new();
/// path.move_to(point(0.0, 0.0)).unwrap();
/// path.line_to(point(0.2, 0.0)).unwrap();
/// let buffer = path.build();
///
/// let renderer = PathRenderer::new(ShaderSources::default()).unwrap();
/// let plan = renderer.stroke(&buffer, &Transform::identity(), &StrokeStyle::DEFAULT).unwrap();
///
/// let mut backend = RecordingBackend::new();
/// plan.submit(&mut backend).unwrap();
/// assert_eq!(backend.commands().len(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct PathRenderer {
    shaders: ShaderSources,
}

impl PathRenderer {
    pub fn new(shaders: ShaderSources) -> Result<Self, RenderError> {
        shaders.validate()?;

        Ok(PathRenderer { shaders })
    }

    pub fn shaders(&self) -> &ShaderSources {
        &self.shaders
    }

    /// Draw the buffer as a line list, extruded by the stroke program.
    pub fn stroke(
        &self,
        buffer: &VertexBuffer,
        transform: &Transform,
        style: &StrokeStyle,
    ) -> Result<DrawPlan, RenderError> {
        if !(style.width.is_finite() && style.width >= 0.0) {
            return Err(RenderError::InvalidStrokeWidth(style.width));
        }

        let mut plan = DrawPlan::new();
        if buffer.is_empty() {
            log::debug!("stroke: nothing to draw");
            return Ok(plan);
        }

        plan.push(DrawCommand::UploadVertices {
            buffer: buffer.clone(),
        });
        plan.push(DrawCommand::UseProgram(Program::Stroke));
        plan.push(DrawCommand::SetUniforms(Uniforms {
            transform: *transform,
            color: style.color,
            width: style.width,
        }));
        plan.push(DrawCommand::Draw {
            primitive: Primitive::Lines,
            first: 0,
            count: buffer.len(),
        });

        log::debug!("stroke: {} vertices", buffer.len());

        Ok(plan)
    }

    /// Fill the inside of the path with the even-odd rule, using the stencil buffer.
    ///
    /// Each edge forms a triangle with a common pivot point. Drawing all of these
    /// triangles while inverting the stencil leaves a non-zero value in the pixels
    /// covered an odd number of times, which are the inside of the path. A rectangle
    /// covering the whole path is then drawn where the stencil is not zero.
    pub fn fill(
        &self,
        buffer: &VertexBuffer,
        transform: &Transform,
        style: &FillStyle,
    ) -> DrawPlan {
        let mut plan = DrawPlan::new();
        let (geometry, num_fan_vertices) = match fill_geometry(buffer) {
            Some(geometry) => geometry,
            None => {
                log::debug!("fill: nothing to draw");
                return plan;
            }
        };

        plan.push(DrawCommand::UploadVertices { buffer: geometry });
        plan.push(DrawCommand::UseProgram(Program::Fill));
        plan.push(DrawCommand::SetUniforms(Uniforms {
            transform: *transform,
            color: style.color,
            width: 0.0,
        }));

        plan.push(DrawCommand::ClearStencil);
        plan.push(DrawCommand::SetColorWrite(false));
        plan.push(DrawCommand::SetStencilMode(StencilMode::Invert));
        plan.push(DrawCommand::Draw {
            primitive: Primitive::Triangles,
            first: 0,
            count: num_fan_vertices,
        });

        plan.push(DrawCommand::SetColorWrite(true));
        plan.push(DrawCommand::SetStencilMode(StencilMode::TestNonZero));
        plan.push(DrawCommand::Draw {
            primitive: Primitive::TriangleStrip,
            first: num_fan_vertices,
            count: 4,
        });
        plan.push(DrawCommand::SetStencilMode(StencilMode::Disabled));

        log::debug!("fill: {} stencil triangles", num_fan_vertices / 3);

        plan
    }
}

/// The stencil triangles of each edge followed by the covering rectangle.
///
/// Returns the geometry and the number of stencil vertices, or `None` if the buffer
/// has no edge.
fn fill_geometry(buffer: &VertexBuffer) -> Option<(VertexBuffer, usize)> {
    if buffer.edges().next().is_none() {
        return None;
    }

    let vertex = |position: [f32; 2]| PathVertex {
        position,
        normal: [0.0, 0.0],
    };

    let pivot = buffer[0].position;
    let mut vertices = Vec::with_capacity(buffer.len() / 2 * 3 + 4);
    for (from, to) in buffer.edges() {
        vertices.push(vertex(pivot));
        vertices.push(vertex(from.position));
        vertices.push(vertex(to.position));
    }
    let num_fan_vertices = vertices.len();

    let bounds = Box2D::from_points(buffer.iter().map(|v| v.position()));
    vertices.push(vertex([bounds.min.x, bounds.min.y]));
    vertices.push(vertex([bounds.max.x, bounds.min.y]));
    vertices.push(vertex([bounds.min.x, bounds.max.y]));
    vertices.push(vertex([bounds.max.x, bounds.max.y]));

    Some((VertexBuffer::from(vertices), num_fan_vertices))
}

#[cfg(test)]
use crate::math::point;
#[cfg(test)]
use crate::path::{traits::*, Path};
#[cfg(test)]
use crate::style::Color;

#[cfg(test)]
fn triangle() -> VertexBuffer {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0)).unwrap();
    path.line_to(point(1.0, 0.0)).unwrap();
    path.line_to(point(0.0, 1.0)).unwrap();
    path.line_to(point(0.0, 0.0)).unwrap();
    path.build()
}

#[test]
fn stroke_plan() {
    let renderer = PathRenderer::new(ShaderSources::default()).unwrap();
    let buffer = triangle();
    let transform = Transform::scale(2.0, 2.0);
    let style = StrokeStyle::DEFAULT.with_width(0.1);

    let plan = renderer.stroke(&buffer, &transform, &style).unwrap();
    assert_eq!(
        plan.commands(),
        &[
            DrawCommand::UploadVertices {
                buffer: buffer.clone()
            },
            DrawCommand::UseProgram(Program::Stroke),
            DrawCommand::SetUniforms(Uniforms {
                transform,
                color: Color::BLACK,
                width: 0.1,
            }),
            DrawCommand::Draw {
                primitive: Primitive::Lines,
                first: 0,
                count: 6,
            },
        ]
    );

    // The plan shares the vertices of the path.
    match &plan.commands()[0] {
        DrawCommand::UploadVertices { buffer: uploaded } => assert!(uploaded.ptr_eq(&buffer)),
        _ => panic!(),
    }

    assert!(matches!(
        renderer.stroke(&buffer, &transform, &StrokeStyle::DEFAULT.with_width(f32::NAN)),
        Err(RenderError::InvalidStrokeWidth(w)) if w.is_nan()
    ));
    assert!(renderer
        .stroke(&buffer, &transform, &StrokeStyle::DEFAULT.with_width(-1.0))
        .is_err());
    assert!(renderer
        .stroke(&VertexBuffer::empty(), &transform, &style)
        .unwrap()
        .is_empty());
}

#[test]
fn fill_plan_pass_order() {
    let renderer = PathRenderer::new(ShaderSources::default()).unwrap();
    let style = FillStyle::color(Color::new(1.0, 0.0, 0.0, 1.0));
    let plan = renderer.fill(&triangle(), &Transform::identity(), &style);

    let passes: Vec<&DrawCommand> = plan
        .commands()
        .iter()
        .filter(|cmd| match cmd {
            DrawCommand::ClearStencil
            | DrawCommand::SetStencilMode(_)
            | DrawCommand::SetColorWrite(_)
            | DrawCommand::Draw { .. } => true,
            _ => false,
        })
        .collect();

    assert_eq!(
        passes,
        vec![
            &DrawCommand::ClearStencil,
            &DrawCommand::SetColorWrite(false),
            &DrawCommand::SetStencilMode(StencilMode::Invert),
            &DrawCommand::Draw {
                primitive: Primitive::Triangles,
                first: 0,
                count: 9,
            },
            &DrawCommand::SetColorWrite(true),
            &DrawCommand::SetStencilMode(StencilMode::TestNonZero),
            &DrawCommand::Draw {
                primitive: Primitive::TriangleStrip,
                first: 9,
                count: 4,
            },
            &DrawCommand::SetStencilMode(StencilMode::Disabled),
        ]
    );
}

#[test]
fn fill_geometry_covers_the_path() {
    let (geometry, fan) = fill_geometry(&triangle()).unwrap();
    assert_eq!(fan, 9);
    assert_eq!(geometry.len(), 13);
    // Every stencil triangle starts at the pivot.
    for tri in geometry[..fan].chunks(3) {
        assert_eq!(tri[0].position, [0.0, 0.0]);
    }
    let cover: Vec<[f32; 2]> = geometry[fan..].iter().map(|v| v.position).collect();
    assert_eq!(
        cover,
        vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]
    );

    assert!(fill_geometry(&VertexBuffer::empty()).is_none());
}

#[test]
fn shader_sources() {
    let shaders = ShaderSources::default();
    let stroke = shaders.program(Program::Stroke);
    assert!(stroke.geometry.unwrap().contains("layout(lines) in;"));
    assert_eq!(shaders.program(Program::Fill).geometry, None);
    assert_eq!(shaders.program(Program::Fill).vertex, stroke.vertex);
    assert!(shaders
        .program(Program::Particles)
        .vertex
        .contains("a_frame"));

    let mut broken = shaders;
    broken.stroke_geometry = "  \n".to_string();
    assert_eq!(
        PathRenderer::new(broken).err(),
        Some(RenderError::EmptyShaderSource {
            stage: "stroke geometry"
        })
    );
}
