//! Path building interface.
//!
//! The [PathBuilder](trait.PathBuilder.html) trait is implemented by everything that
//! consumes drawing commands: the vertex-producing [Path](../path/struct.Path.html)
//! and the [PathCommands](../commands/struct.PathCommands.html) recorder. Producers of
//! commands (the text parser or the glyph outline decoder of `tracery_extra`, for
//! example) are written against the trait and work with both.
//!
//! ## Examples
//!
//! ```
//! use tracery_path::{Path, PathCommands, math::point};
//! use tracery_path::traits::*;
//!
//! fn triangle(builder: &mut impl PathBuilder) -> tracery_path::BuildResult {
//!     builder.move_to(point(0.0, 0.0))?;
//!     builder.line_to(point(1.0, 0.0))?;
//!     builder.line_to(point(0.0, 1.0))?;
//!     builder.line_to(point(0.0, 0.0))
//! }
//!
//! let mut commands = PathCommands::new();
//! triangle(&mut commands).unwrap();
//!
//! let mut path = Path::new();
//! triangle(&mut path).unwrap();
//!
//! assert_eq!(Path::from_commands(&commands).unwrap().build(), path.build());
//! ```

use crate::commands::PathCommand;
use crate::geom::utils::is_finite_point;
use crate::math::{Angle, Point};
use crate::{BuildError, BuildResult};

/// The main path building interface.
///
/// Every sub-path starts with `move_to`. Issuing an edge command before the first
/// `move_to` is an error. A failing command doesn't modify the builder.
pub trait PathBuilder {
    /// Start a new sub-path at `to`, ending the current one if any.
    fn move_to(&mut self, to: Point) -> BuildResult;

    /// Add a straight segment from the current position to `to`.
    fn line_to(&mut self, to: Point) -> BuildResult;

    /// Add a quadratic bézier curve from the current position to `to`.
    fn quadratic_to(&mut self, ctrl: Point, to: Point) -> BuildResult;

    /// Add a circular arc from the current position to `to`, turning by `sweep`.
    ///
    /// Positive angles turn counter-clockwise in a y-up coordinate system.
    fn arc_to(&mut self, to: Point, sweep: Angle) -> BuildResult;

    /// Apply a single command.
    fn command(&mut self, command: PathCommand) -> BuildResult {
        match command {
            PathCommand::MoveTo { to } => self.move_to(to),
            PathCommand::LineTo { to } => self.line_to(to),
            PathCommand::QuadraticTo { ctrl, to } => self.quadratic_to(ctrl, to),
            PathCommand::ArcTo { to, sweep } => self.arc_to(to, Angle::radians(sweep)),
        }
    }

    /// Apply a sequence of commands, stopping at the first error.
    fn extend<Iter>(&mut self, commands: Iter) -> BuildResult
    where
        Iter: IntoIterator<Item = PathCommand>,
        Self: Sized,
    {
        for command in commands {
            self.command(command)?;
        }

        Ok(())
    }
}

/// Builders that produce a finished object.
pub trait Build {
    /// The type of object that is created by this builder.
    type PathType;

    /// Builds a path object, consuming the builder.
    fn build(self) -> Self::PathType;
}

impl<'l, T: PathBuilder> PathBuilder for &'l mut T {
    fn move_to(&mut self, to: Point) -> BuildResult {
        (**self).move_to(to)
    }

    fn line_to(&mut self, to: Point) -> BuildResult {
        (**self).line_to(to)
    }

    fn quadratic_to(&mut self, ctrl: Point, to: Point) -> BuildResult {
        (**self).quadratic_to(ctrl, to)
    }

    fn arc_to(&mut self, to: Point, sweep: Angle) -> BuildResult {
        (**self).arc_to(to, sweep)
    }
}

/// Checks shared by all `PathBuilder` implementations of this crate.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct Validator {
    started: bool,
}

impl Validator {
    pub fn move_to(&mut self, to: Point) -> BuildResult {
        check_point("move_to", to)?;
        self.started = true;
        Ok(())
    }

    pub fn edge(&self, command: &'static str, points: &[Point]) -> BuildResult {
        if !self.started {
            return Err(BuildError::MissingMoveTo { command });
        }
        for &p in points {
            check_point(command, p)?;
        }

        Ok(())
    }

    pub fn arc(&self, to: Point, sweep: Angle) -> BuildResult {
        self.edge("arc_to", &[to])?;
        if !sweep.radians.is_finite() {
            return Err(BuildError::NonFiniteAngle { command: "arc_to" });
        }

        Ok(())
    }
}

fn check_point(command: &'static str, p: Point) -> BuildResult {
    if !is_finite_point(p) {
        return Err(BuildError::NonFinitePosition { command });
    }

    Ok(())
}

#[test]
fn validator() {
    use crate::math::point;

    let mut v = Validator::default();
    assert_eq!(
        v.edge("line_to", &[point(1.0, 1.0)]),
        Err(BuildError::MissingMoveTo { command: "line_to" })
    );
    assert_eq!(
        v.move_to(point(f32::NAN, 0.0)),
        Err(BuildError::NonFinitePosition { command: "move_to" })
    );
    assert_eq!(v.move_to(point(0.0, 0.0)), Ok(()));
    assert_eq!(v.edge("line_to", &[point(1.0, 1.0)]), Ok(()));
    assert_eq!(
        v.edge("quadratic_to", &[point(1.0, 1.0), point(f32::INFINITY, 0.0)]),
        Err(BuildError::NonFinitePosition { command: "quadratic_to" })
    );
    assert_eq!(
        v.arc(point(1.0, 1.0), Angle::radians(f32::NAN)),
        Err(BuildError::NonFiniteAngle { command: "arc_to" })
    );
}
