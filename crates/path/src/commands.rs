//! A recorded sequence of path commands.
//!
//! Paths in this crate are consumed as they are built, so commands are the only
//! form in which a path can be stored, compared or replayed later, for example to
//! rebuild the geometry with different `BuilderOptions`.

use crate::builder::{Build, PathBuilder, Validator};
use crate::math::{Angle, Point};
use crate::{BuildError, BuildResult};

use std::convert::TryFrom;
use std::slice;

/// A single drawing command.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PathCommand {
    MoveTo { to: Point },
    LineTo { to: Point },
    QuadraticTo { ctrl: Point, to: Point },
    /// `sweep` is in radians.
    ArcTo { to: Point, sweep: f32 },
}

impl PathCommand {
    /// The position of the path after this command.
    pub fn to(&self) -> Point {
        match *self {
            PathCommand::MoveTo { to }
            | PathCommand::LineTo { to }
            | PathCommand::QuadraticTo { to, .. }
            | PathCommand::ArcTo { to, .. } => to,
        }
    }

    pub fn is_edge(&self) -> bool {
        match self {
            PathCommand::MoveTo { .. } => false,
            _ => true,
        }
    }
}

/// A validated list of path commands.
///
/// `PathCommands` implements `PathBuilder` and applies the same validation as
/// `Path`, so a recorded sequence can always be replayed without error.
///
/// With the `serialization` feature, it is serialized as its list of commands and
/// deserialized by replaying them, which validates them again.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serialization",
    serde(try_from = "Vec<PathCommand>", into = "Vec<PathCommand>")
)]
pub struct PathCommands {
    commands: Vec<PathCommand>,
    validator: Validator,
}

impl PathCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PathCommands {
            commands: Vec::with_capacity(capacity),
            validator: Validator::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn as_slice(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn iter(&self) -> slice::Iter<PathCommand> {
        self.commands.iter()
    }

    /// Number of sub-paths, counting those without any edge.
    pub fn num_subpaths(&self) -> usize {
        self.commands.iter().filter(|cmd| !cmd.is_edge()).count()
    }

    /// Replay the commands into another builder.
    pub fn replay(&self, output: &mut impl PathBuilder) -> BuildResult {
        for &command in &self.commands {
            output.command(command)?;
        }

        Ok(())
    }
}

impl PathBuilder for PathCommands {
    fn move_to(&mut self, to: Point) -> BuildResult {
        self.validator.move_to(to)?;
        self.commands.push(PathCommand::MoveTo { to });
        Ok(())
    }

    fn line_to(&mut self, to: Point) -> BuildResult {
        self.validator.edge("line_to", &[to])?;
        self.commands.push(PathCommand::LineTo { to });
        Ok(())
    }

    fn quadratic_to(&mut self, ctrl: Point, to: Point) -> BuildResult {
        self.validator.edge("quadratic_to", &[ctrl, to])?;
        self.commands.push(PathCommand::QuadraticTo { ctrl, to });
        Ok(())
    }

    fn arc_to(&mut self, to: Point, sweep: Angle) -> BuildResult {
        self.validator.arc(to, sweep)?;
        self.commands.push(PathCommand::ArcTo {
            to,
            sweep: sweep.radians,
        });
        Ok(())
    }
}

impl Build for PathCommands {
    type PathType = Vec<PathCommand>;

    fn build(self) -> Vec<PathCommand> {
        self.commands
    }
}

impl TryFrom<Vec<PathCommand>> for PathCommands {
    type Error = BuildError;

    fn try_from(commands: Vec<PathCommand>) -> Result<Self, BuildError> {
        let mut recorder = PathCommands::with_capacity(commands.len());
        recorder.extend(commands)?;

        Ok(recorder)
    }
}

impl From<PathCommands> for Vec<PathCommand> {
    fn from(commands: PathCommands) -> Self {
        commands.commands
    }
}

impl<'l> IntoIterator for &'l PathCommands {
    type Item = PathCommand;
    type IntoIter = std::iter::Copied<slice::Iter<'l, PathCommand>>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter().copied()
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn record_commands() {
    let mut commands = PathCommands::new();
    commands.move_to(point(0.0, 0.0)).unwrap();
    commands.line_to(point(1.0, 0.0)).unwrap();
    commands.quadratic_to(point(2.0, 0.0), point(2.0, 1.0)).unwrap();
    commands.move_to(point(5.0, 5.0)).unwrap();
    commands.arc_to(point(6.0, 6.0), Angle::radians(1.0)).unwrap();

    assert_eq!(commands.len(), 5);
    assert_eq!(commands.num_subpaths(), 2);
    assert_eq!(commands.as_slice()[2].to(), point(2.0, 1.0));
    assert_eq!(
        commands.as_slice()[4],
        PathCommand::ArcTo {
            to: point(6.0, 6.0),
            sweep: 1.0
        }
    );
}

#[test]
fn rejected_commands_are_not_recorded() {
    let mut commands = PathCommands::new();
    assert_eq!(
        commands.line_to(point(1.0, 0.0)),
        Err(BuildError::MissingMoveTo { command: "line_to" })
    );
    commands.move_to(point(0.0, 0.0)).unwrap();
    assert!(commands.line_to(point(f32::NAN, 0.0)).is_err());
    assert!(commands.arc_to(point(1.0, 0.0), Angle::radians(f32::INFINITY)).is_err());
    assert_eq!(commands.len(), 1);
}

#[test]
fn replay_commands() {
    let mut commands = PathCommands::new();
    commands.move_to(point(0.0, 0.0)).unwrap();
    commands.line_to(point(1.0, 0.0)).unwrap();

    let mut copy = PathCommands::new();
    commands.replay(&mut copy).unwrap();
    assert_eq!(copy.as_slice(), commands.as_slice());

    let mut extended = PathCommands::new();
    extended.extend(&commands).unwrap();
    assert_eq!(extended.build(), commands.build());
}

#[test]
fn rebuild_from_command_list() {
    let list = vec![
        PathCommand::MoveTo { to: point(0.0, 0.0) },
        PathCommand::LineTo { to: point(1.0, 0.0) },
    ];

    // The rebuilt recorder knows a sub-path is started and accepts more edges.
    let mut commands = PathCommands::try_from(list.clone()).unwrap();
    commands.line_to(point(1.0, 1.0)).unwrap();
    assert_eq!(commands.len(), 3);
    assert_eq!(Vec::from(commands)[..2], list[..]);

    assert_eq!(
        PathCommands::try_from(vec![PathCommand::LineTo { to: point(1.0, 0.0) }]),
        Err(BuildError::MissingMoveTo { command: "line_to" })
    );
    assert_eq!(PathCommands::try_from(Vec::new()), Ok(PathCommands::new()));
}
