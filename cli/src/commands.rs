use tracery::extra::parser::ParseError;
use tracery::path::{BuildError, BuilderOptions, PathCommands};

use thiserror::Error;

use std::io;

pub struct TessellateCmd {
    pub commands: PathCommands,
    pub options: BuilderOptions,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Cannot open file {file}: {source}")]
    Input {
        file: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Invalid path: {0}")]
    Parse(#[from] ParseError),
    #[error("Invalid path: {0}")]
    Build(#[from] BuildError),
    #[error("Invalid value {value:?} for --{name}.")]
    InvalidOption { name: &'static str, value: String },
}
