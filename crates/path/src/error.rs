use thiserror::Error;

/// The result type of the path building commands.
pub type BuildResult = Result<(), BuildError>;

/// An error that can happen while issuing path commands.
///
/// A command that fails leaves the path untouched.
#[non_exhaustive]
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BuildError {
    #[error("{command} issued before any move_to")]
    MissingMoveTo { command: &'static str },
    #[error("{command}: position is not a finite number")]
    NonFinitePosition { command: &'static str },
    #[error("{command}: angle is not a finite number")]
    NonFiniteAngle { command: &'static str },
}

#[test]
fn error_messages() {
    assert_eq!(
        BuildError::MissingMoveTo { command: "line_to" }.to_string(),
        "line_to issued before any move_to"
    );
    assert_eq!(
        BuildError::NonFiniteAngle { command: "arc_to" }.to_string(),
        "arc_to: angle is not a finite number"
    );
}
