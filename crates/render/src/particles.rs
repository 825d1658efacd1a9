//! A fixed capacity pool of animated particles.
//!
//! # Examples
//!
//! ```
//! use tracery_render::particles::{Particle, ParticleMotion, ParticleSystem};
//! use tracery_render::math::Transform;
//!
//! let mut system = ParticleSystem::with_capacity(1000);
//! system.spawn(Particle::new(Transform::scale(0.1, 0.1), ParticleMotion::DEFAULT));
//!
//! // Called once per frame.
//! system.update();
//! assert_eq!(system.len(), 1);
//! ```

use crate::math::{Transform, Vector};
use crate::plan::{DrawCommand, DrawPlan, Primitive, Program, RenderError};
use crate::view::transform_columns;

use bytemuck::{Pod, Zeroable};

/// Something that evolves over time.
pub trait Updatable {
    /// Advance by one frame. Returns false when the element should be removed.
    fn advance(&mut self) -> bool;
}

/// How a particle evolves at each frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParticleMotion {
    /// Added to the sprite-sheet frame of the particle.
    pub frame_step: f32,
    /// Translation applied after the particle's transform.
    pub velocity: Vector,
    /// The particle dies when its frame reaches this value.
    pub max_frame: f32,
}

impl ParticleMotion {
    /// Slowly rising particles going through six frames of animation.
    pub const DEFAULT: Self = ParticleMotion {
        frame_step: 0.0005,
        velocity: Vector::new(0.0, 0.00005),
        max_frame: 6.0,
    };
}

impl Default for ParticleMotion {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub transform: Transform,
    /// Index in the sprite sheet, fractional values round down.
    pub frame: f32,
    pub motion: ParticleMotion,
}

impl Particle {
    pub fn new(transform: Transform, motion: ParticleMotion) -> Self {
        Particle {
            transform,
            frame: 0.0,
            motion,
        }
    }
}

impl Updatable for Particle {
    fn advance(&mut self) -> bool {
        self.frame += self.motion.frame_step;
        self.transform = self.transform.then_translate(self.motion.velocity);

        self.frame < self.motion.max_frame
    }
}

/// Per-instance data of the particle program.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// Columns of the particle's transform.
    pub transform: [[f32; 3]; 3],
    pub frame: f32,
}

impl ParticleInstance {
    /// View instances as raw bytes, for upload.
    pub fn as_bytes(instances: &[ParticleInstance]) -> &[u8] {
        bytemuck::cast_slice(instances)
    }
}

impl From<Particle> for ParticleInstance {
    fn from(particle: Particle) -> Self {
        ParticleInstance {
            transform: transform_columns(&particle.transform),
            frame: particle.frame,
        }
    }
}

/// A corner of the quad every particle is drawn with.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl ParticleVertex {
    /// The unit quad, in triangle strip order.
    pub const QUAD: [ParticleVertex; 4] = [
        ParticleVertex {
            position: [-1.0, 1.0],
            uv: [0.0, 0.0],
        },
        ParticleVertex {
            position: [1.0, 1.0],
            uv: [1.0, 0.0],
        },
        ParticleVertex {
            position: [-1.0, -1.0],
            uv: [0.0, 1.0],
        },
        ParticleVertex {
            position: [1.0, -1.0],
            uv: [1.0, 1.0],
        },
    ];

    /// View vertices as raw bytes, for upload.
    pub fn as_bytes(vertices: &[ParticleVertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}

/// The layout of the animation frames in the particle texture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SpriteSheet {
    pub columns: u32,
    pub rows: u32,
}

impl SpriteSheet {
    /// The texture unit the sprite sheet is bound to while drawing particles.
    pub const TEXTURE_UNIT: u32 = 0;
}

/// Live particles, stored contiguously.
///
/// Dead particles are removed by moving the last particle in their place, so the
/// order of the particles changes over time.
#[derive(Clone, Debug)]
pub struct ParticleSystem<P> {
    particles: Vec<P>,
    capacity: usize,
}

impl<P: Updatable> ParticleSystem<P> {
    pub fn with_capacity(capacity: usize) -> Self {
        ParticleSystem {
            particles: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a particle. Returns false if the system is full.
    pub fn spawn(&mut self, particle: P) -> bool {
        if self.particles.len() >= self.capacity {
            log::trace!("particle system full ({} particles)", self.capacity);
            return false;
        }

        self.particles.push(particle);

        true
    }

    /// Advance all particles by one frame and remove the dead ones.
    ///
    /// Returns the number of removed particles.
    pub fn update(&mut self) -> usize {
        let mut removed = 0;
        let mut i = 0;
        while i < self.particles.len() {
            if self.particles[i].advance() {
                i += 1;
            } else {
                self.particles.swap_remove(i);
                removed += 1;
            }
        }

        removed
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&P> {
        self.particles.get(index)
    }

    pub fn particles(&self) -> &[P] {
        &self.particles
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

impl<P: Updatable + Copy + Into<ParticleInstance>> ParticleSystem<P> {
    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.particles.iter().map(|&p| p.into()).collect()
    }

    /// Draw the particles as instanced quads.
    pub fn draw_plan(
        &self,
        transform: &Transform,
        sheet: SpriteSheet,
    ) -> Result<DrawPlan, RenderError> {
        if sheet.columns == 0 || sheet.rows == 0 {
            return Err(RenderError::InvalidSpriteSheet {
                columns: sheet.columns,
                rows: sheet.rows,
            });
        }

        let mut plan = DrawPlan::new();
        if self.is_empty() {
            return Ok(plan);
        }

        plan.push(DrawCommand::UploadQuad {
            vertices: ParticleVertex::QUAD,
        });
        plan.push(DrawCommand::UploadInstances {
            instances: self.instances(),
        });
        plan.push(DrawCommand::UseProgram(Program::Particles));
        plan.push(DrawCommand::BindTexture {
            unit: SpriteSheet::TEXTURE_UNIT,
        });
        plan.push(DrawCommand::SetParticleUniforms {
            transform: *transform,
            columns: sheet.columns,
            rows: sheet.rows,
            texture_unit: SpriteSheet::TEXTURE_UNIT,
        });
        plan.push(DrawCommand::DrawInstanced {
            primitive: Primitive::TriangleStrip,
            count: ParticleVertex::QUAD.len(),
            instances: self.len(),
        });

        Ok(plan)
    }
}

#[cfg(test)]
#[derive(Copy, Clone, Debug, PartialEq)]
struct Countdown(u32);

#[cfg(test)]
impl Updatable for Countdown {
    fn advance(&mut self) -> bool {
        self.0 = self.0.saturating_sub(1);
        self.0 > 0
    }
}

#[test]
fn spawn_until_full() {
    let mut system = ParticleSystem::with_capacity(2);
    assert!(system.spawn(Countdown(1)));
    assert!(system.spawn(Countdown(1)));
    assert!(!system.spawn(Countdown(1)));
    assert_eq!(system.len(), 2);
    assert_eq!(system.capacity(), 2);
}

#[test]
fn dead_particles_are_swapped_with_the_last_one() {
    let mut system = ParticleSystem::with_capacity(10);
    for &n in &[5, 1, 3, 1, 7] {
        system.spawn(Countdown(n));
    }

    assert_eq!(system.update(), 2);
    // The last particle moves into the first dead slot before being advanced.
    assert_eq!(system.particles(), &[Countdown(4), Countdown(6), Countdown(2)]);
    assert_eq!(system.get(1), Some(&Countdown(6)));
    assert_eq!(system.get(3), None);

    assert_eq!(system.update(), 0);
    assert_eq!(system.update(), 1);
    assert_eq!(system.particles(), &[Countdown(2), Countdown(4)]);

    // There is room for new particles again.
    assert!(system.spawn(Countdown(1)));
}

#[test]
fn particle_motion() {
    let motion = ParticleMotion {
        frame_step: 0.5,
        velocity: Vector::new(0.0, 1.0),
        max_frame: 2.0,
    };
    let mut particle = Particle::new(Transform::scale(0.5, 0.5), motion);

    assert!(particle.advance());
    assert_eq!(particle.frame, 0.5);
    assert_eq!(
        particle.transform,
        Transform::scale(0.5, 0.5).then_translate(Vector::new(0.0, 1.0))
    );
    assert!(particle.advance());
    assert!(particle.advance());
    assert!(!particle.advance());
}

#[test]
fn particle_instances() {
    let mut system = ParticleSystem::with_capacity(4);
    system.spawn(Particle::new(Transform::scale(2.0, 3.0), ParticleMotion::DEFAULT));
    system.spawn(Particle::new(Transform::identity(), ParticleMotion::DEFAULT));

    let instances = system.instances();
    assert_eq!(instances.len(), 2);
    assert_eq!(instances[0].transform[0], [2.0, 0.0, 0.0]);
    assert_eq!(instances[0].transform[1], [0.0, 3.0, 0.0]);
    assert_eq!(ParticleInstance::as_bytes(&instances).len(), 2 * 40);
    assert_eq!(ParticleVertex::as_bytes(&ParticleVertex::QUAD).len(), 4 * 16);

    let sheet = SpriteSheet {
        columns: 4,
        rows: 4,
    };
    let plan = system.draw_plan(&Transform::identity(), sheet).unwrap();
    assert_eq!(plan.num_draw_calls(), 1);
    // The per-vertex quad and the sprite sheet texture are set up before drawing.
    assert_eq!(
        &plan.commands()[..4],
        &[
            DrawCommand::UploadQuad {
                vertices: ParticleVertex::QUAD,
            },
            DrawCommand::UploadInstances {
                instances: instances.clone(),
            },
            DrawCommand::UseProgram(Program::Particles),
            DrawCommand::BindTexture { unit: 0 },
        ]
    );
    assert_eq!(
        plan.commands()[4],
        DrawCommand::SetParticleUniforms {
            transform: Transform::identity(),
            columns: 4,
            rows: 4,
            texture_unit: 0,
        }
    );
    assert_eq!(
        plan.commands().last(),
        Some(&DrawCommand::DrawInstanced {
            primitive: Primitive::TriangleStrip,
            count: 4,
            instances: 2,
        })
    );

    assert!(system
        .draw_plan(&Transform::identity(), SpriteSheet { columns: 0, rows: 4 })
        .is_err());

    system.clear();
    assert!(system.draw_plan(&Transform::identity(), sheet).unwrap().is_empty());
}
