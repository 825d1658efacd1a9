//! Turn glyph outlines into path commands.
//!
//! Glyph outlines, as stored in TrueType fonts, are made of closed contours of
//! quadratic bézier curves. Each point of a contour is either on the curve or a
//! control point. Two consecutive control points imply an on-curve point halfway
//! between them.
//!
//! Loading the outline from a font file is left to the font library; this module
//! only walks the contours.
//!
//! # Examples
//!
//! ```
//! use tracery_extra::glyph::{GlyphOutline, OutlinePoint};
//! use tracery_path::{BuilderOptions, math::point};
//!
//! // A square with one rounded corner.
//! let mut outline = GlyphOutline::new();
//! outline.add_contour(vec![
//!     OutlinePoint::on_curve(point(0.0, 0.0)),
//!     OutlinePoint::on_curve(point(100.0, 0.0)),
//!     OutlinePoint::control(point(100.0, 100.0)),
//!     OutlinePoint::on_curve(point(0.0, 100.0)),
//! ]);
//!
//! let buffer = tracery_extra::glyph::build_glyph(&outline, 0.01, &BuilderOptions::DEFAULT).unwrap();
//! assert!(!buffer.is_empty());
//! ```

use crate::path::math::Point;
use crate::path::traits::{Build, PathBuilder};
use crate::path::{BuildError, BuilderOptions, Path, VertexBuffer};

use thiserror::Error;

use std::ops::Range;

/// Error produced while decoding a glyph outline.
#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum GlyphError {
    #[error("Contour {contour} ends at {end}, past the last point ({num_points}).")]
    ContourEndOutOfRange {
        contour: usize,
        end: usize,
        num_points: usize,
    },
    #[error("Contour {contour} ends at {end}, before the previous contour ({previous}).")]
    UnorderedContourEnds {
        contour: usize,
        end: usize,
        previous: usize,
    },
    #[error("Invalid outline geometry: {0}")]
    Build(#[from] BuildError),
}

/// A point of a glyph outline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OutlinePoint {
    pub position: Point,
    /// False for control points.
    pub on_curve: bool,
}

impl OutlinePoint {
    pub fn on_curve(position: Point) -> Self {
        OutlinePoint {
            position,
            on_curve: true,
        }
    }

    pub fn control(position: Point) -> Self {
        OutlinePoint {
            position,
            on_curve: false,
        }
    }
}

/// The outline of a glyph, in font units.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphOutline {
    pub points: Vec<OutlinePoint>,
    /// Exclusive end index of each contour in `points`. The first contour starts at 0,
    /// the others where the previous one ends.
    pub contour_ends: Vec<usize>,
}

impl GlyphOutline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_contour<Iter>(&mut self, points: Iter)
    where
        Iter: IntoIterator<Item = OutlinePoint>,
    {
        self.points.extend(points);
        self.contour_ends.push(self.points.len());
    }

    pub fn num_contours(&self) -> usize {
        self.contour_ends.len()
    }

    /// Check that the contour ends are in range and in order.
    pub fn validate(&self) -> Result<(), GlyphError> {
        self.contour_ranges().map(|_| ())
    }

    fn contour_ranges(&self) -> Result<Vec<Range<usize>>, GlyphError> {
        let mut ranges = Vec::with_capacity(self.contour_ends.len());
        let mut start = 0;
        for (contour, &end) in self.contour_ends.iter().enumerate() {
            if end > self.points.len() {
                return Err(GlyphError::ContourEndOutOfRange {
                    contour,
                    end,
                    num_points: self.points.len(),
                });
            }
            if end < start {
                return Err(GlyphError::UnorderedContourEnds {
                    contour,
                    end,
                    previous: start,
                });
            }
            ranges.push(start..end);
            start = end;
        }

        Ok(ranges)
    }
}

/// Emit the path commands of a glyph outline, with positions multiplied by `scale`.
///
/// Each contour becomes a sub-path starting with `move_to` and closed with a
/// segment back to its start. The outline is validated before anything is sent to
/// the output.
pub fn decode(
    outline: &GlyphOutline,
    scale: f32,
    output: &mut impl PathBuilder,
) -> Result<(), GlyphError> {
    let contours = outline.contour_ranges()?;

    for range in contours {
        decode_contour(&outline.points[range], scale, output)?;
    }

    Ok(())
}

/// Decode and tessellate a glyph outline.
pub fn build_glyph(
    outline: &GlyphOutline,
    scale: f32,
    options: &BuilderOptions,
) -> Result<VertexBuffer, GlyphError> {
    let mut path = Path::with_options(*options);
    decode(outline, scale, &mut path)?;

    Ok(path.build())
}

fn decode_contour(
    points: &[OutlinePoint],
    scale: f32,
    output: &mut impl PathBuilder,
) -> Result<(), BuildError> {
    let n = points.len();
    if n == 0 {
        return Ok(());
    }

    let position = |i: usize| points[i % n].position * scale;

    // Start on the first on-curve point. If there is none, start at the implicit
    // on-curve point between the first two control points.
    let (start, first, count) = match points.iter().position(|p| p.on_curve) {
        Some(idx) => (position(idx), idx + 1, n - 1),
        None if n > 1 => (position(0).lerp(position(1), 0.5), 1, n),
        None => (position(0), 1, 0),
    };

    output.move_to(start)?;

    let mut ctrl: Option<Point> = None;
    for i in first..(first + count) {
        let p = position(i);
        if points[i % n].on_curve {
            match ctrl.take() {
                Some(ctrl) => output.quadratic_to(ctrl, p)?,
                None => output.line_to(p)?,
            }
        } else {
            if let Some(prev) = ctrl {
                output.quadratic_to(prev, prev.lerp(p, 0.5))?;
            }
            ctrl = Some(p);
        }
    }

    match ctrl {
        Some(ctrl) => output.quadratic_to(ctrl, start),
        None => output.line_to(start),
    }
}

#[cfg(test)]
use crate::path::{math::point, PathCommand, PathCommands};

#[cfg(test)]
fn decode_commands(outline: &GlyphOutline, scale: f32) -> Vec<PathCommand> {
    let mut commands = PathCommands::new();
    decode(outline, scale, &mut commands).unwrap();
    commands.build()
}

#[test]
fn straight_contour() {
    let mut outline = GlyphOutline::new();
    outline.add_contour(vec![
        OutlinePoint::on_curve(point(0.0, 0.0)),
        OutlinePoint::on_curve(point(200.0, 0.0)),
        OutlinePoint::on_curve(point(200.0, 100.0)),
    ]);

    assert_eq!(
        decode_commands(&outline, 0.5),
        vec![
            PathCommand::MoveTo { to: point(0.0, 0.0) },
            PathCommand::LineTo { to: point(100.0, 0.0) },
            PathCommand::LineTo { to: point(100.0, 50.0) },
            PathCommand::LineTo { to: point(0.0, 0.0) },
        ]
    );
}

#[test]
fn implicit_on_curve_points() {
    let mut outline = GlyphOutline::new();
    outline.add_contour(vec![
        OutlinePoint::on_curve(point(0.0, 0.0)),
        OutlinePoint::control(point(2.0, 0.0)),
        OutlinePoint::control(point(2.0, 2.0)),
        OutlinePoint::on_curve(point(0.0, 2.0)),
    ]);

    assert_eq!(
        decode_commands(&outline, 1.0),
        vec![
            PathCommand::MoveTo { to: point(0.0, 0.0) },
            PathCommand::QuadraticTo {
                ctrl: point(2.0, 0.0),
                to: point(2.0, 1.0),
            },
            PathCommand::QuadraticTo {
                ctrl: point(2.0, 2.0),
                to: point(0.0, 2.0),
            },
            PathCommand::LineTo { to: point(0.0, 0.0) },
        ]
    );
}

#[test]
fn contour_starting_with_a_control_point() {
    let mut outline = GlyphOutline::new();
    outline.add_contour(vec![
        OutlinePoint::control(point(0.0, 0.0)),
        OutlinePoint::on_curve(point(1.0, 0.0)),
        OutlinePoint::on_curve(point(1.0, 1.0)),
    ]);

    // The contour wraps around: the control point closes it.
    assert_eq!(
        decode_commands(&outline, 1.0),
        vec![
            PathCommand::MoveTo { to: point(1.0, 0.0) },
            PathCommand::LineTo { to: point(1.0, 1.0) },
            PathCommand::QuadraticTo {
                ctrl: point(0.0, 0.0),
                to: point(1.0, 0.0),
            },
        ]
    );
}

#[test]
fn control_points_only() {
    let mut outline = GlyphOutline::new();
    outline.add_contour(vec![
        OutlinePoint::control(point(0.0, 0.0)),
        OutlinePoint::control(point(2.0, 0.0)),
        OutlinePoint::control(point(2.0, 2.0)),
        OutlinePoint::control(point(0.0, 2.0)),
    ]);

    assert_eq!(
        decode_commands(&outline, 1.0),
        vec![
            PathCommand::MoveTo { to: point(1.0, 0.0) },
            PathCommand::QuadraticTo {
                ctrl: point(2.0, 0.0),
                to: point(2.0, 1.0),
            },
            PathCommand::QuadraticTo {
                ctrl: point(2.0, 2.0),
                to: point(1.0, 2.0),
            },
            PathCommand::QuadraticTo {
                ctrl: point(0.0, 2.0),
                to: point(0.0, 1.0),
            },
            PathCommand::QuadraticTo {
                ctrl: point(0.0, 0.0),
                to: point(1.0, 0.0),
            },
        ]
    );
}

#[test]
fn several_contours() {
    let mut outline = GlyphOutline::new();
    outline.add_contour(vec![
        OutlinePoint::on_curve(point(0.0, 0.0)),
        OutlinePoint::on_curve(point(4.0, 0.0)),
        OutlinePoint::on_curve(point(4.0, 4.0)),
    ]);
    outline.add_contour(Vec::new());
    outline.add_contour(vec![
        OutlinePoint::on_curve(point(1.0, 1.0)),
        OutlinePoint::on_curve(point(2.0, 1.0)),
    ]);
    assert_eq!(outline.num_contours(), 3);
    assert_eq!(outline.contour_ends, vec![3, 3, 5]);

    let mut commands = PathCommands::new();
    decode(&outline, 1.0, &mut commands).unwrap();
    assert_eq!(commands.num_subpaths(), 2);
    assert_eq!(commands.len(), 4 + 3);

    let buffer = build_glyph(&outline, 1.0, &BuilderOptions::DEFAULT).unwrap();
    // Three edges for the triangle, two for the line going back and forth.
    assert_eq!(buffer.len(), 2 * (3 + 2));
}

#[test]
fn invalid_outlines() {
    let mut outline = GlyphOutline::new();
    outline.points = vec![
        OutlinePoint::on_curve(point(0.0, 0.0)),
        OutlinePoint::on_curve(point(1.0, 0.0)),
    ];

    outline.contour_ends = vec![3];
    assert_eq!(
        outline.validate(),
        Err(GlyphError::ContourEndOutOfRange {
            contour: 0,
            end: 3,
            num_points: 2
        })
    );

    outline.contour_ends = vec![2, 1];
    let mut commands = PathCommands::new();
    assert_eq!(
        decode(&outline, 1.0, &mut commands),
        Err(GlyphError::UnorderedContourEnds {
            contour: 1,
            end: 1,
            previous: 2
        })
    );
    // Nothing is emitted for an invalid outline.
    assert!(commands.is_empty());

    outline.contour_ends = vec![2];
    assert_eq!(
        build_glyph(&outline, f32::NAN, &BuilderOptions::DEFAULT).err(),
        Some(GlyphError::Build(BuildError::NonFinitePosition {
            command: "move_to"
        }))
    );
}
