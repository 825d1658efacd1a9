//! A compact text format for path commands.
//!
//! # Syntax
//!
//! The syntax borrows the command letters of SVG paths, restricted to the commands
//! supported by `tracery_path`:
//!
//! - `M x y`: move to,
//! - `L x y`: line to,
//! - `Q cx cy x y`: quadratic bézier curve with control point `(cx, cy)`,
//! - `A x y sweep`: circular arc to `(x, y)` turning by `sweep` radians,
//! - `Z`: line back to the start of the sub-path.
//!
//! Lowercase commands take coordinates relative to the current position. Numbers are
//! separated by whitespace or commas. A command letter can be omitted when it is the
//! same as the previous one, numbers following a move are read as line commands.
//!
//! For example `M 0 0 L 1 0 1 1 Q 0 1 0 0` reads as a move to `(0, 0)`, two lines and
//! a quadratic curve back to the start.

use crate::path::math::{point, Angle, Point};
use crate::path::{BuildError, PathCommand};
use crate::path::traits::PathBuilder;

use thiserror::Error;

use std::fmt;

#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ParseError {
    #[error("Line {line} Column {column}: Expected number, got {src:?}.")]
    Number { src: String, line: i32, column: i32 },
    #[error("Line {line} Column {column}: Invalid command {command:?}.")]
    Command {
        command: char,
        line: i32,
        column: i32,
    },
    #[error("Line {line} Column {column}: Expected move-to command, got {command:?}.")]
    MissingMoveTo {
        command: char,
        line: i32,
        column: i32,
    },
    #[error("Line {line} Column {column}: {source}")]
    Build {
        source: BuildError,
        line: i32,
        column: i32,
    },
}

// A buffered iterator of characters keeping track of line and column.
pub struct Source<Iter> {
    src: Iter,
    current: char,
    line: i32,
    col: i32,
    finished: bool,
}

impl<Iter: Iterator<Item = char>> Source<Iter> {
    pub fn new<IntoIter>(src: IntoIter) -> Self
    where
        IntoIter: IntoIterator<IntoIter = Iter>,
    {
        let mut src = src.into_iter();
        let (current, finished) = match src.next() {
            Some(c) => (c, false),
            None => (' ', true),
        };

        Source {
            src,
            current,
            line: if current == '\n' { 1 } else { 0 },
            col: 0,
            finished,
        }
    }

    fn skip_whitespace(&mut self) {
        while !self.finished && (self.current.is_whitespace() || self.current == ',') {
            self.advance_one();
        }
    }

    fn advance_one(&mut self) {
        if self.finished {
            return;
        }
        match self.src.next() {
            Some('\n') => {
                self.current = '\n';
                self.line += 1;
                self.col = -1;
            }
            Some(c) => {
                self.current = c;
                self.col += 1;
            }
            None => {
                self.current = '~';
                self.finished = true;
            }
        }
    }
}

/// A context object for parsing the path command syntax.
///
/// The parser keeps a few buffers around, so it is a bit cheaper to reuse it for
/// several paths.
#[derive(Debug, Default)]
pub struct PathParser {
    float_buffer: String,
    current_position: Point,
}

impl PathParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse<Iter, Builder>(
        &mut self,
        src: &mut Source<Iter>,
        output: &mut Builder,
    ) -> Result<(), ParseError>
    where
        Iter: Iterator<Item = char>,
        Builder: PathBuilder,
    {
        self.current_position = point(0.0, 0.0);
        let mut first_position = point(0.0, 0.0);
        let mut need_start = true;
        let mut implicit_cmd = 'M';

        src.skip_whitespace();

        while !src.finished {
            let mut cmd = src.current;
            let line = src.line;
            let column = src.col;

            if cmd.is_ascii_alphabetic() {
                src.advance_one();
            } else {
                cmd = implicit_cmd;
            }

            if need_start && cmd != 'm' && cmd != 'M' {
                return Err(ParseError::MissingMoveTo {
                    command: cmd,
                    line,
                    column,
                });
            }

            let at = |source| ParseError::Build {
                source,
                line,
                column,
            };

            let is_relative = cmd.is_lowercase();

            match cmd {
                'm' | 'M' => {
                    let to = self.parse_endpoint(is_relative, src)?;
                    output.move_to(to).map_err(at)?;
                    first_position = to;
                    need_start = false;
                }
                'l' | 'L' => {
                    let to = self.parse_endpoint(is_relative, src)?;
                    output.line_to(to).map_err(at)?;
                }
                'q' | 'Q' => {
                    let ctrl = self.parse_point(is_relative, src)?;
                    let to = self.parse_endpoint(is_relative, src)?;
                    output.quadratic_to(ctrl, to).map_err(at)?;
                }
                'a' | 'A' => {
                    let to = self.parse_endpoint(is_relative, src)?;
                    let sweep = self.parse_number(src)?;
                    output.arc_to(to, Angle::radians(sweep)).map_err(at)?;
                }
                'z' | 'Z' => {
                    output.line_to(first_position).map_err(at)?;
                    self.current_position = first_position;
                    need_start = true;
                }
                _ => {
                    return Err(ParseError::Command {
                        command: cmd,
                        line,
                        column,
                    });
                }
            }

            implicit_cmd = match cmd {
                'm' => 'l',
                'M' => 'L',
                'z' => 'm',
                'Z' => 'M',
                c => c,
            };

            src.skip_whitespace();
        }

        Ok(())
    }

    fn parse_endpoint(
        &mut self,
        is_relative: bool,
        src: &mut Source<impl Iterator<Item = char>>,
    ) -> Result<Point, ParseError> {
        let position = self.parse_point(is_relative, src)?;
        self.current_position = position;

        Ok(position)
    }

    fn parse_point(
        &mut self,
        is_relative: bool,
        src: &mut Source<impl Iterator<Item = char>>,
    ) -> Result<Point, ParseError> {
        let mut x = self.parse_number(src)?;
        let mut y = self.parse_number(src)?;

        if is_relative {
            x += self.current_position.x;
            y += self.current_position.y;
        }

        Ok(point(x, y))
    }

    fn parse_number(
        &mut self,
        src: &mut Source<impl Iterator<Item = char>>,
    ) -> Result<f32, ParseError> {
        self.float_buffer.clear();

        src.skip_whitespace();

        let line = src.line;
        let column = src.col;

        if src.current == '-' {
            self.float_buffer.push('-');
            src.advance_one();
        }

        self.push_digits(src);

        if src.current == '.' {
            self.float_buffer.push('.');
            src.advance_one();
            self.push_digits(src);
        }

        if src.current == 'e' || src.current == 'E' {
            self.float_buffer.push(src.current);
            src.advance_one();

            if src.current == '-' {
                self.float_buffer.push('-');
                src.advance_one();
            }

            self.push_digits(src);
        }

        match self.float_buffer.parse::<f32>() {
            Ok(val) => Ok(val),
            Err(_) => Err(ParseError::Number {
                src: std::mem::take(&mut self.float_buffer),
                line,
                column,
            }),
        }
    }

    fn push_digits(&mut self, src: &mut Source<impl Iterator<Item = char>>) {
        while !src.finished && src.current.is_ascii_digit() {
            self.float_buffer.push(src.current);
            src.advance_one();
        }
    }
}

/// Parse a string into a path builder.
pub fn parse_str(text: &str, output: &mut impl PathBuilder) -> Result<(), ParseError> {
    PathParser::new().parse(&mut Source::new(text.chars()), output)
}

/// Write commands using the syntax understood by `PathParser`, one command per line.
///
/// Positions are written as absolute coordinates. Parsing the output gives back the
/// same commands.
pub fn write_commands<Iter>(commands: Iter, output: &mut impl fmt::Write) -> fmt::Result
where
    Iter: IntoIterator<Item = PathCommand>,
{
    for command in commands {
        match command {
            PathCommand::MoveTo { to } => writeln!(output, "M {} {}", to.x, to.y)?,
            PathCommand::LineTo { to } => writeln!(output, "L {} {}", to.x, to.y)?,
            PathCommand::QuadraticTo { ctrl, to } => {
                writeln!(output, "Q {} {} {} {}", ctrl.x, ctrl.y, to.x, to.y)?
            }
            PathCommand::ArcTo { to, sweep } => {
                writeln!(output, "A {} {} {}", to.x, to.y, sweep)?
            }
        }
    }

    Ok(())
}

#[cfg(test)]
use crate::path::{traits::Build, PathCommands};

#[cfg(test)]
fn parse_commands(text: &str) -> Result<Vec<PathCommand>, ParseError> {
    let mut commands = PathCommands::new();
    parse_str(text, &mut commands)?;
    Ok(commands.build())
}

#[test]
fn empty() {
    assert_eq!(parse_commands(""), Ok(Vec::new()));
    assert_eq!(parse_commands(" \n "), Ok(Vec::new()));
}

#[test]
fn all_commands() {
    assert_eq!(
        parse_commands("M 0 0 L 1 0 Q 2 0, 2 1 A 2 3 3.5 Z"),
        Ok(vec![
            PathCommand::MoveTo { to: point(0.0, 0.0) },
            PathCommand::LineTo { to: point(1.0, 0.0) },
            PathCommand::QuadraticTo {
                ctrl: point(2.0, 0.0),
                to: point(2.0, 1.0)
            },
            PathCommand::ArcTo {
                to: point(2.0, 3.0),
                sweep: 3.5
            },
            PathCommand::LineTo { to: point(0.0, 0.0) },
        ])
    );
}

#[test]
fn relative_commands() {
    assert_eq!(
        parse_commands("m 1 1 l 1 0 q 1 0 1 1 a 0 2 -1"),
        Ok(vec![
            PathCommand::MoveTo { to: point(1.0, 1.0) },
            PathCommand::LineTo { to: point(2.0, 1.0) },
            PathCommand::QuadraticTo {
                ctrl: point(3.0, 1.0),
                to: point(3.0, 2.0)
            },
            PathCommand::ArcTo {
                to: point(3.0, 4.0),
                sweep: -1.0
            },
        ])
    );
}

#[test]
fn implicit_polyline() {
    assert_eq!(
        parse_commands("0 0 1 0 1 1"),
        Ok(vec![
            PathCommand::MoveTo { to: point(0.0, 0.0) },
            PathCommand::LineTo { to: point(1.0, 0.0) },
            PathCommand::LineTo { to: point(1.0, 1.0) },
        ])
    );
}

#[test]
fn invalid_cmd() {
    assert_eq!(
        parse_commands("x 0 0"),
        Err(ParseError::Command {
            command: 'x',
            line: 0,
            column: 0
        })
    );

    assert_eq!(
        parse_commands("\n M 0 \n0 1 x 1 1"),
        Err(ParseError::Command {
            command: 'x',
            line: 2,
            column: 4
        })
    );

    // Cubic curves are not supported.
    assert!(matches!(
        parse_commands("M 0 0 C 1 1 2 2 3 3"),
        Err(ParseError::Command { command: 'C', .. })
    ));
}

#[test]
fn need_start() {
    assert_eq!(
        parse_commands("L 1 1"),
        Err(ParseError::MissingMoveTo {
            command: 'L',
            line: 0,
            column: 0
        })
    );
    assert_eq!(
        parse_commands("M 0 0 L 1 1 Z L 2 2"),
        Err(ParseError::MissingMoveTo {
            command: 'L',
            line: 0,
            column: 14
        })
    );
    assert!(parse_commands("M 0 0 L 1 1 Z M 2 2 L 3 3").is_ok());
}

#[test]
fn numbers() {
    assert_eq!(
        parse_commands("M 1e-2 -1E3"),
        Ok(vec![PathCommand::MoveTo {
            to: point(0.01, -1000.0)
        }])
    );
    assert_eq!(
        parse_commands("M .5,-.25"),
        Ok(vec![PathCommand::MoveTo {
            to: point(0.5, -0.25)
        }])
    );

    let bad_number = |src: &str| match parse_commands(src) {
        Err(ParseError::Number { .. }) => true,
        r => {
            println!("{r:?}");
            false
        }
    };

    assert!(bad_number("M 0 --1"));
    assert!(bad_number("M 0 1ee2"));
    assert!(bad_number("M 0 1e--1"));
    assert!(bad_number("M 0 *2"));
    assert!(bad_number("M 0 e"));
    assert!(bad_number("M 0 1e"));
    assert!(bad_number("M 0 +1"));
    assert!(bad_number("M 0"));
}

#[test]
fn builder_errors_have_a_position() {
    assert_eq!(
        parse_commands("M 0 0\nL 1e39 0"),
        Err(ParseError::Build {
            source: BuildError::NonFinitePosition { command: "line_to" },
            line: 1,
            column: 0
        })
    );
}

#[test]
fn write_then_parse() {
    let commands = vec![
        PathCommand::MoveTo {
            to: point(0.1, -3.0),
        },
        PathCommand::LineTo {
            to: point(1.0e-7, 2.5),
        },
        PathCommand::QuadraticTo {
            ctrl: point(10.0, 11.0),
            to: point(-0.333, 1.0),
        },
        PathCommand::ArcTo {
            to: point(4.0, 4.0),
            sweep: -std::f32::consts::FRAC_PI_2,
        },
    ];

    let mut text = String::new();
    write_commands(commands.iter().copied(), &mut text).unwrap();
    assert!(text.starts_with("M 0.1 -3\nL "));
    assert_eq!(text.lines().count(), 4);

    assert_eq!(parse_commands(&text), Ok(commands));
}
