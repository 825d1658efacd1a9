//! The path accumulator.

use crate::buffer::{PathVertex, VertexBuffer};
use crate::builder::{Build, PathBuilder, Validator};
use crate::commands::PathCommand;
use crate::geom::utils::{is_zero, segment_normal};
use crate::geom::{miter_normal, ChordArc, QuadraticBezierSegment};
use crate::math::{point, vector, Angle, Point, Vector};
use crate::{BuildError, BuildResult, BuilderOptions};

/// Builds the stroke geometry of a path, one command at a time.
///
/// Each command appends vertices to the path, the last position and the normal of
/// the last segment are kept as a cursor to compute the join with the next segment.
///
/// ## Vertex layout
///
/// The vertices form a line list. Within a sub-path:
///
/// - the first segment emits a single vertex at its start, with the segment's normal,
/// - every following segment emits its start vertex twice, once to end the previous
///   edge and once to start its own, with the miter normal of the join,
/// - curves and arcs are split into a fixed number of steps, each interior step
///   vertex being emitted twice as well,
/// - the sub-path is terminated by a vertex at its last position, with the normal of
///   its last segment. This vertex is only emitted by the next `move_to` or when the
///   path is finalized.
///
/// ## Examples
///
/// ```
/// use tracery_path::Path;
/// use tracery_path::math::point;
/// use tracery_path::traits::*;
///
/// let mut path = Path::new();
/// path.move_to(point(0.0, 0.0)).unwrap();
/// path.line_to(point(1.0, 0.0)).unwrap();
/// path.line_to(point(1.0, 1.0)).unwrap();
///
/// let buffer = path.to_buffer();
/// let positions: Vec<_> = buffer.iter().map(|v| v.position()).collect();
/// assert_eq!(
///     positions,
///     vec![point(0.0, 0.0), point(1.0, 0.0), point(1.0, 0.0), point(1.0, 1.0)]
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Path {
    vertices: Vec<PathVertex>,
    last_point: Point,
    last_normal: Vector,
    options: BuilderOptions,
    validator: Validator,
}

impl Path {
    pub fn new() -> Self {
        Path::with_options(BuilderOptions::DEFAULT)
    }

    pub fn with_options(options: BuilderOptions) -> Self {
        Path {
            vertices: Vec::new(),
            last_point: point(0.0, 0.0),
            last_normal: vector(0.0, 0.0),
            options,
            validator: Validator::default(),
        }
    }

    /// Build a path from a sequence of commands.
    pub fn from_commands<Iter>(commands: Iter) -> Result<Self, BuildError>
    where
        Iter: IntoIterator<Item = PathCommand>,
    {
        Path::from_commands_with_options(commands, BuilderOptions::DEFAULT)
    }

    pub fn from_commands_with_options<Iter>(
        commands: Iter,
        options: BuilderOptions,
    ) -> Result<Self, BuildError>
    where
        Iter: IntoIterator<Item = PathCommand>,
    {
        let mut path = Path::with_options(options);
        path.extend(commands)?;

        Ok(path)
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// The vertices emitted so far, without the pending end of the current sub-path.
    pub fn vertices(&self) -> &[PathVertex] {
        &self.vertices
    }

    /// The current position, or `None` before the first `move_to`.
    pub fn current_position(&self) -> Option<Point> {
        if !self.has_started() {
            return None;
        }

        Some(self.last_point)
    }

    /// The normal of the last segment, zero if the current sub-path has no segment yet.
    pub fn last_normal(&self) -> Vector {
        self.last_normal
    }

    /// Whether the current sub-path has at least one segment.
    pub fn is_open(&self) -> bool {
        !is_zero(self.last_normal)
    }

    fn has_started(&self) -> bool {
        self.validator != Validator::default()
    }

    /// Remove all vertices and go back to the initial state, keeping the allocation.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.last_point = point(0.0, 0.0);
        self.last_normal = vector(0.0, 0.0);
        self.validator = Validator::default();
    }

    /// Produce the vertex buffer of the path built so far.
    ///
    /// The path is not modified: more commands can be added and the buffer produced
    /// again. An empty path produces an empty buffer.
    pub fn to_buffer(&self) -> VertexBuffer {
        let mut vertices = Vec::with_capacity(self.vertices.len() + 1);
        vertices.extend_from_slice(&self.vertices);
        if self.is_open() {
            vertices.push(PathVertex::new(self.last_point, self.last_normal));
        }

        log::debug!("path finalized: {} vertices", vertices.len());

        VertexBuffer::from_vec(vertices)
    }

    /// Emit the vertex terminating the current sub-path, if any.
    fn end_subpath(&mut self) {
        if self.is_open() {
            self.vertices
                .push(PathVertex::new(self.last_point, self.last_normal));
            self.last_normal = vector(0.0, 0.0);
        }
    }

    /// Emit the start vertex of a new segment leaving `last_point` with `normal`.
    fn begin_segment(&mut self, normal: Vector) {
        if !self.is_open() {
            self.vertices.push(PathVertex::new(self.last_point, normal));
            return;
        }

        let join = miter_normal(self.last_normal, normal, self.options.miter_limit);
        if join.clamped {
            log::warn!(
                "miter join at {:?} clamped to {} (normals {:?} and {:?})",
                self.last_point,
                self.options.miter_limit,
                self.last_normal,
                normal,
            );
        }

        let v = PathVertex::new(self.last_point, join.normal);
        self.vertices.push(v);
        self.vertices.push(v);
    }
}

impl Default for Path {
    fn default() -> Self {
        Path::new()
    }
}

impl PathBuilder for Path {
    fn move_to(&mut self, to: Point) -> BuildResult {
        self.validator.move_to(to)?;
        self.end_subpath();
        self.last_point = to;

        Ok(())
    }

    fn line_to(&mut self, to: Point) -> BuildResult {
        self.validator.edge("line_to", &[to])?;

        let normal = match segment_normal(self.last_point, to) {
            Some(normal) => normal,
            None => {
                log::trace!("line_to: skipping zero-length segment at {:?}", to);
                return Ok(());
            }
        };

        self.begin_segment(normal);
        self.last_point = to;
        self.last_normal = normal;

        Ok(())
    }

    fn quadratic_to(&mut self, ctrl: Point, to: Point) -> BuildResult {
        self.validator.edge("quadratic_to", &[ctrl, to])?;

        let curve = QuadraticBezierSegment {
            from: self.last_point,
            ctrl,
            to,
        };

        let start_normal = match curve.normal(0.0) {
            Some(normal) if !curve.is_degenerate() => normal,
            _ => {
                log::trace!("quadratic_to: skipping degenerate curve at {:?}", to);
                return Ok(());
            }
        };

        self.begin_segment(start_normal);

        let vertices = &mut self.vertices;
        curve.for_each_interior_step(self.options.quadratic_steps, &mut |_, position, normal| {
            let v = PathVertex::new(position, normal);
            vertices.push(v);
            vertices.push(v);
        });

        self.last_point = to;
        self.last_normal = curve.normal(1.0).unwrap_or(start_normal);

        Ok(())
    }

    fn arc_to(&mut self, to: Point, sweep: Angle) -> BuildResult {
        self.validator.arc(to, sweep)?;

        let arc = match ChordArc::from_chord(self.last_point, to, sweep.radians) {
            Some(arc) => arc,
            None => {
                log::trace!(
                    "arc_to: no circle through {:?} and {:?} with sweep {}, drawing a line",
                    self.last_point,
                    to,
                    sweep.radians,
                );
                return self.line_to(to);
            }
        };

        self.begin_segment(arc.normal(0.0));

        let vertices = &mut self.vertices;
        arc.for_each_interior_step(self.options.arc_steps, &mut |_, position, normal| {
            let v = PathVertex::new(position, normal);
            vertices.push(v);
            vertices.push(v);
        });

        self.last_point = to;
        self.last_normal = arc.normal_at(to);

        Ok(())
    }
}

impl Build for Path {
    type PathType = VertexBuffer;

    fn build(mut self) -> VertexBuffer {
        self.end_subpath();

        log::debug!("path finalized: {} vertices", self.vertices.len());

        VertexBuffer::from_vec(self.vertices)
    }
}

#[cfg(test)]
use std::f32::consts::{FRAC_PI_2, PI};

#[cfg(test)]
fn assert_almost_eq(a: Vector, b: Vector) {
    if (a - b).square_length() > 0.00001 {
        panic!("assert almost equal: {:?} != {:?}", a, b);
    }
}

#[cfg(test)]
fn assert_no_nan(buffer: &VertexBuffer) {
    for v in buffer.iter() {
        assert!(v.position[0].is_finite() && v.position[1].is_finite(), "{:?}", v);
        assert!(v.normal[0].is_finite() && v.normal[1].is_finite(), "{:?}", v);
    }
}

#[test]
fn empty_path() {
    let path = Path::new();
    assert_eq!(path.current_position(), None);
    assert!(path.to_buffer().is_empty());
    assert!(path.build().is_empty());

    // A lone move doesn't produce anything either.
    let mut path = Path::new();
    path.move_to(point(1.0, 1.0)).unwrap();
    assert_eq!(path.current_position(), Some(point(1.0, 1.0)));
    assert!(path.to_buffer().is_empty());
}

#[test]
fn single_line() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0)).unwrap();
    path.line_to(point(2.0, 0.0)).unwrap();
    assert!(path.is_open());
    assert_eq!(path.vertices().len(), 1);

    let buffer = path.build();
    assert_eq!(
        buffer.vertices(),
        &[
            PathVertex::new(point(0.0, 0.0), vector(0.0, -1.0)),
            PathVertex::new(point(2.0, 0.0), vector(0.0, -1.0)),
        ]
    );
}

#[test]
fn line_normals_are_unit_except_at_joins() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0)).unwrap();
    path.line_to(point(3.0, 1.0)).unwrap();
    path.line_to(point(4.0, 5.0)).unwrap();
    path.line_to(point(-2.0, 6.0)).unwrap();
    path.line_to(point(-3.0, -1.0)).unwrap();

    let buffer = path.build();
    // 1 start vertex, 3 doubled joins, 1 end vertex.
    assert_eq!(buffer.len(), 8);

    let first = buffer[0];
    let last = buffer[buffer.len() - 1];
    assert!((first.normal().length() - 1.0).abs() < 1e-5);
    assert!((last.normal().length() - 1.0).abs() < 1e-5);

    for pair in buffer[1..7].chunks(2) {
        assert_eq!(pair[0], pair[1]);
        assert!(pair[0].normal().length() >= 1.0 - 1e-5);
    }
}

#[test]
fn right_angle_join() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0)).unwrap();
    path.line_to(point(1.0, 0.0)).unwrap();
    path.line_to(point(1.0, 1.0)).unwrap();

    let buffer = path.build();
    assert_eq!(buffer.len(), 4);
    assert_almost_eq(buffer[0].normal(), vector(0.0, -1.0));
    assert_eq!(buffer[1], buffer[2]);
    assert_eq!(buffer[1].position(), point(1.0, 0.0));
    assert_almost_eq(buffer[1].normal(), vector(1.0, -1.0));
    assert_almost_eq(buffer[3].normal(), vector(1.0, 0.0));
}

#[test]
fn miter_length_at_60_degrees() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0)).unwrap();
    path.line_to(point(1.0, 0.0)).unwrap();
    let a = 60.0f32.to_radians();
    path.line_to(point(1.0 + a.cos(), a.sin())).unwrap();

    let buffer = path.build();
    assert_eq!(buffer.len(), 4);
    assert!((buffer[1].normal().length() - 1.1547).abs() < 1e-3);
    assert!((buffer[2].normal().length() - 1.1547).abs() < 1e-3);
}

#[test]
fn sharp_join_is_clamped() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0)).unwrap();
    path.line_to(point(10.0, 0.0)).unwrap();
    path.line_to(point(0.0, 0.1)).unwrap();

    let buffer = path.build();
    assert!((buffer[1].normal().length() - BuilderOptions::DEFAULT_MITER_LIMIT).abs() < 1e-4);

    let mut path = Path::with_options(BuilderOptions::DEFAULT.with_miter_limit(f32::INFINITY));
    path.move_to(point(0.0, 0.0)).unwrap();
    path.line_to(point(10.0, 0.0)).unwrap();
    path.line_to(point(0.0, 0.1)).unwrap();

    let buffer = path.build();
    assert!(buffer[1].normal().length() > 100.0);
    assert_no_nan(&buffer);
}

#[test]
fn reversal_does_not_produce_nan() {
    let mut path = Path::with_options(BuilderOptions::DEFAULT.with_miter_limit(f32::INFINITY));
    path.move_to(point(0.0, 0.0)).unwrap();
    path.line_to(point(1.0, 0.0)).unwrap();
    path.line_to(point(0.0, 0.0)).unwrap();

    let buffer = path.build();
    assert_eq!(buffer.len(), 4);
    assert_no_nan(&buffer);
    assert_almost_eq(buffer[1].normal(), vector(0.0, -1.0));
}

#[test]
fn quadratic_curve() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0)).unwrap();
    path.quadratic_to(point(1.0, 1.0), point(2.0, 0.0)).unwrap();

    // One vertex at t = 0 and two per interior step.
    assert_eq!(path.vertices().len(), 1 + 2 * 3);

    let buffer = path.build();
    assert_eq!(buffer.len(), 8);

    let h = std::f32::consts::FRAC_1_SQRT_2;
    assert_eq!(buffer[0].position(), point(0.0, 0.0));
    assert_almost_eq(buffer[0].normal(), vector(h, -h));
    assert_eq!(buffer[1].position(), point(0.5, 0.375));
    assert_eq!(buffer[3].position(), point(1.0, 0.5));
    assert_almost_eq(buffer[3].normal(), vector(0.0, -1.0));
    assert_eq!(buffer[7].position(), point(2.0, 0.0));
    assert_almost_eq(buffer[7].normal(), vector(-h, -h));

    for pair in buffer[1..7].chunks(2) {
        assert_eq!(pair[0], pair[1]);
        assert!((pair[0].normal().length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn quadratic_after_line_is_joined() {
    let mut path = Path::new();
    path.move_to(point(-1.0, 0.0)).unwrap();
    path.line_to(point(0.0, 0.0)).unwrap();
    path.quadratic_to(point(1.0, 1.0), point(2.0, 0.0)).unwrap();

    let buffer = path.build();
    // Line start, doubled join, 3 doubled steps, end.
    assert_eq!(buffer.len(), 1 + 2 + 6 + 1);
    assert_eq!(buffer[1], buffer[2]);
    assert_eq!(buffer[1].position(), point(0.0, 0.0));
    // 45° between the normals.
    let expected = 1.0 / (22.5f32.to_radians()).cos();
    assert!((buffer[1].normal().length() - expected).abs() < 1e-4);
}

#[test]
fn quadratic_steps_option() {
    let mut path = Path::with_options(BuilderOptions::DEFAULT.with_quadratic_steps(10));
    path.move_to(point(0.0, 0.0)).unwrap();
    path.quadratic_to(point(1.0, 1.0), point(2.0, 0.0)).unwrap();
    assert_eq!(path.build().len(), 1 + 2 * 9 + 1);
}

#[test]
fn degenerate_quadratic_curves() {
    let mut path = Path::new();
    path.move_to(point(1.0, 1.0)).unwrap();
    path.quadratic_to(point(1.0, 1.0), point(1.0, 1.0)).unwrap();
    assert!(path.vertices().is_empty());
    assert!(!path.is_open());

    // Control point on the start point: the curve is a straight line.
    path.quadratic_to(point(1.0, 1.0), point(3.0, 1.0)).unwrap();
    let buffer = path.to_buffer();
    assert_no_nan(&buffer);
    assert_almost_eq(buffer[0].normal(), vector(0.0, -1.0));
    assert_almost_eq(buffer[buffer.len() - 1].normal(), vector(0.0, -1.0));

    // Closed loop: the tangent vanishes in the middle of the curve.
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0)).unwrap();
    path.quadratic_to(point(2.0, 0.0), point(0.0, 0.0)).unwrap();
    let buffer = path.build();
    assert_eq!(buffer.len(), 8);
    assert_no_nan(&buffer);
}

#[test]
fn quarter_arc() {
    let mut path = Path::new();
    path.move_to(point(1.0, 0.0)).unwrap();
    path.arc_to(point(0.0, 1.0), Angle::radians(FRAC_PI_2)).unwrap();

    let buffer = path.build();
    assert_eq!(buffer.len(), 1 + 2 * 15 + 1);
    assert_almost_eq(buffer[0].normal(), vector(1.0, 0.0));
    assert_eq!(buffer[buffer.len() - 1].position(), point(0.0, 1.0));
    assert_almost_eq(buffer[buffer.len() - 1].normal(), vector(0.0, 1.0));

    for v in buffer.iter() {
        assert!((v.position().to_vector().length() - 1.0).abs() < 1e-4);
        assert_almost_eq(v.normal(), v.position().to_vector());
    }
}

#[test]
fn arc_after_line_is_joined() {
    // The line arrives tangent to the arc: the join is a plain unit normal.
    let mut path = Path::new();
    path.move_to(point(1.0, -1.0)).unwrap();
    path.line_to(point(1.0, 0.0)).unwrap();
    path.arc_to(point(-1.0, 0.0), Angle::radians(PI)).unwrap();

    let buffer = path.build();
    assert_eq!(buffer.len(), 1 + 2 + 2 * 15 + 1);
    assert_almost_eq(buffer[1].normal(), vector(1.0, 0.0));
    assert_almost_eq(buffer[2].normal(), vector(1.0, 0.0));
    assert_almost_eq(buffer[buffer.len() - 1].normal(), vector(-1.0, 0.0));
}

#[test]
fn clockwise_arc_after_line_is_joined() {
    // Going down into a clockwise half circle around the origin. The arc normals
    // stay on the same side as the line's normal, so the join is not a reversal.
    let mut path = Path::new();
    path.move_to(point(1.0, 1.0)).unwrap();
    path.line_to(point(1.0, 0.0)).unwrap();
    path.arc_to(point(-1.0, 0.0), Angle::radians(-PI)).unwrap();

    let buffer = path.build();
    assert_no_nan(&buffer);
    assert_eq!(buffer.len(), 1 + 2 + 2 * 15 + 1);
    assert_almost_eq(buffer[0].normal(), vector(-1.0, 0.0));

    // Unclamped join of two identical normals.
    assert_almost_eq(buffer[1].normal(), vector(-1.0, 0.0));
    assert_almost_eq(buffer[2].normal(), vector(-1.0, 0.0));
    assert!((buffer[1].normal().length() - 1.0).abs() < 1e-5);

    // Half way, at the bottom of the circle, going towards negative x.
    assert_almost_eq(buffer[17].position().to_vector(), vector(0.0, -1.0));
    assert_almost_eq(buffer[17].normal(), vector(0.0, 1.0));

    let last = buffer[buffer.len() - 1];
    assert_almost_eq(last.position().to_vector(), vector(-1.0, 0.0));
    assert_almost_eq(last.normal(), vector(1.0, 0.0));
}

#[test]
fn zero_sweep_arc_is_a_line() {
    let mut arc = Path::new();
    arc.move_to(point(0.0, 0.0)).unwrap();
    arc.arc_to(point(2.0, 1.0), Angle::radians(0.0)).unwrap();

    let mut line = Path::new();
    line.move_to(point(0.0, 0.0)).unwrap();
    line.line_to(point(2.0, 1.0)).unwrap();

    assert_eq!(arc.build(), line.build());
}

#[test]
fn zero_length_commands_are_skipped() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0)).unwrap();
    path.line_to(point(0.0, 0.0)).unwrap();
    assert!(!path.is_open());
    path.line_to(point(1.0, 0.0)).unwrap();
    path.line_to(point(1.0, 0.0)).unwrap();
    path.arc_to(point(1.0, 0.0), Angle::radians(1.0)).unwrap();

    let buffer = path.build();
    assert_eq!(buffer.len(), 2);
    assert_no_nan(&buffer);
}

#[test]
fn small_paths_are_not_skipped() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0)).unwrap();
    path.line_to(point(1e-7, 0.0)).unwrap();
    path.line_to(point(1e-7, 1e-7)).unwrap();
    path.quadratic_to(point(1e-7, 2e-7), point(0.0, 2e-7)).unwrap();

    let buffer = path.build();
    assert_no_nan(&buffer);
    assert_eq!(buffer.len(), 1 + 2 + 2 + 2 * 3 + 1);
    assert_almost_eq(buffer[0].normal(), vector(0.0, -1.0));
    assert_almost_eq(buffer[1].normal(), vector(1.0, -1.0));
    // The curve leaves in the direction of the previous line.
    assert_almost_eq(buffer[3].normal(), vector(1.0, 0.0));
    assert_almost_eq(buffer[4].normal(), vector(1.0, 0.0));
    assert_almost_eq(buffer[buffer.len() - 1].normal(), vector(0.0, 1.0));
}

#[test]
fn subpaths_are_not_connected() {
    let p1 = point(0.0, 0.0);
    let p2 = point(1.0, 0.0);
    let p3 = point(5.0, 5.0);
    let p4 = point(5.0, 6.0);

    let mut path = Path::new();
    path.move_to(p1).unwrap();
    path.line_to(p2).unwrap();
    path.move_to(p3).unwrap();
    assert!(!path.is_open());
    path.line_to(p4).unwrap();

    let buffer = path.build();
    assert_eq!(buffer.len(), 4);

    let edges: Vec<(Point, Point)> = buffer
        .edges()
        .map(|(a, b)| (a.position(), b.position()))
        .collect();
    assert_eq!(edges, vec![(p1, p2), (p3, p4)]);
}

#[test]
fn vertex_count_is_even() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0)).unwrap();
    path.line_to(point(1.0, 0.0)).unwrap();
    path.quadratic_to(point(2.0, 0.0), point(2.0, 1.0)).unwrap();
    path.arc_to(point(2.0, 3.0), Angle::radians(-PI)).unwrap();
    path.move_to(point(10.0, 0.0)).unwrap();
    path.move_to(point(11.0, 0.0)).unwrap();
    path.arc_to(point(12.0, 0.0), Angle::radians(1.0)).unwrap();
    path.line_to(point(11.0, 0.0)).unwrap();

    let buffer = path.build();
    assert_eq!(buffer.len() % 2, 0);
    assert_no_nan(&buffer);
}

#[test]
fn to_buffer_is_idempotent() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0)).unwrap();
    path.line_to(point(1.0, 0.0)).unwrap();
    path.line_to(point(1.0, 1.0)).unwrap();

    let a = path.to_buffer();
    let b = path.to_buffer();
    assert_eq!(a, b);
    assert!(!a.ptr_eq(&b));

    // The path can keep growing after being finalized.
    path.line_to(point(0.0, 1.0)).unwrap();
    let c = path.to_buffer();
    assert_eq!(c.len(), a.len() + 2);
    assert_eq!(&c[..3], &a[..3]);
    assert_eq!(c, path.build());
}

#[test]
fn commands_before_move_to_fail() {
    let mut path = Path::new();
    assert_eq!(
        path.line_to(point(1.0, 0.0)),
        Err(BuildError::MissingMoveTo { command: "line_to" })
    );
    assert_eq!(
        path.quadratic_to(point(1.0, 0.0), point(1.0, 1.0)),
        Err(BuildError::MissingMoveTo {
            command: "quadratic_to"
        })
    );
    assert_eq!(
        path.arc_to(point(1.0, 0.0), Angle::radians(1.0)),
        Err(BuildError::MissingMoveTo { command: "arc_to" })
    );
    assert!(path.to_buffer().is_empty());
}

#[test]
fn invalid_commands_leave_the_path_untouched() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0)).unwrap();
    path.line_to(point(1.0, 0.0)).unwrap();
    let before = path.to_buffer();

    assert!(path.line_to(point(f32::NAN, 0.0)).is_err());
    assert!(path.move_to(point(0.0, f32::INFINITY)).is_err());
    assert!(path.quadratic_to(point(f32::NAN, 0.0), point(1.0, 1.0)).is_err());
    assert!(path.arc_to(point(2.0, 0.0), Angle::radians(f32::NAN)).is_err());

    assert_eq!(path.to_buffer(), before);
    assert_eq!(path.current_position(), Some(point(1.0, 0.0)));
}

#[test]
fn from_commands() {
    let commands = [
        PathCommand::MoveTo { to: point(0.0, 0.0) },
        PathCommand::LineTo { to: point(1.0, 0.0) },
        PathCommand::QuadraticTo {
            ctrl: point(2.0, 0.0),
            to: point(2.0, 1.0),
        },
        PathCommand::ArcTo {
            to: point(2.0, 3.0),
            sweep: PI,
        },
    ];

    let mut direct = Path::new();
    direct.move_to(point(0.0, 0.0)).unwrap();
    direct.line_to(point(1.0, 0.0)).unwrap();
    direct.quadratic_to(point(2.0, 0.0), point(2.0, 1.0)).unwrap();
    direct.arc_to(point(2.0, 3.0), Angle::radians(PI)).unwrap();

    let replayed = Path::from_commands(commands.iter().copied()).unwrap();
    assert_eq!(replayed.build(), direct.build());

    assert_eq!(
        Path::from_commands(vec![PathCommand::LineTo { to: point(1.0, 0.0) }]).err(),
        Some(BuildError::MissingMoveTo { command: "line_to" })
    );
}

#[test]
fn clear() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0)).unwrap();
    path.line_to(point(1.0, 0.0)).unwrap();
    path.clear();

    assert!(path.to_buffer().is_empty());
    assert_eq!(path.current_position(), None);
    assert!(path.line_to(point(1.0, 1.0)).is_err());
}

#[test]
fn buffer_handoff_to_another_thread() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0)).unwrap();
    path.line_to(point(1.0, 0.0)).unwrap();
    let buffer = path.to_buffer();

    let len = std::thread::spawn(move || buffer.as_bytes().len())
        .join()
        .unwrap();
    assert_eq!(len, 32);
}
