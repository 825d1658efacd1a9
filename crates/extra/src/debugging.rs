//! Tools to help with debugging path geometry issues.

use crate::parser::write_commands;
use crate::path::{PathCommand, VertexBuffer};

use std::fmt;
use std::panic;

/// Split a sequence of commands at each move.
///
/// Edge commands before the first move end up in their own group.
pub fn split_subpaths(commands: &[PathCommand]) -> Vec<Vec<PathCommand>> {
    let mut subpaths = Vec::new();
    let mut current = Vec::new();
    for &cmd in commands {
        if !cmd.is_edge() && !current.is_empty() {
            subpaths.push(std::mem::take(&mut current));
        }
        current.push(cmd);
    }
    if !current.is_empty() {
        subpaths.push(current);
    }

    subpaths
}

/// Write the vertices of a buffer as text, one `x y nx ny` line per vertex.
pub fn write_vertices(buffer: &VertexBuffer, output: &mut impl fmt::Write) -> fmt::Result {
    for v in buffer.iter() {
        writeln!(
            output,
            "{} {} {} {}",
            v.position[0], v.position[1], v.normal[0], v.normal[1]
        )?;
    }

    Ok(())
}

/// Remove as many commands as possible while `cb` keeps failing.
///
/// `cb` returns true (or panics) when the test case fails. Whole sub-paths are
/// removed first, then individual edges.
pub fn find_reduced_test_case<F>(commands: &[PathCommand], cb: &F) -> Vec<PathCommand>
where
    F: Fn(&[PathCommand]) -> bool + panic::RefUnwindSafe,
{
    let fails = |subpaths: &[Vec<PathCommand>]| {
        let commands: Vec<PathCommand> = subpaths.concat();
        panic::catch_unwind(|| cb(&commands)).unwrap_or(true)
    };

    let mut subpaths = split_subpaths(commands);

    log::info!("removing sub-paths...");

    let mut i = 0;
    while i < subpaths.len() {
        let mut candidate = subpaths.clone();
        candidate.remove(i);
        if fails(&candidate) {
            subpaths = candidate;
            continue;
        }
        i += 1;
    }

    log::info!("removing edges...");

    for sp in 0..subpaths.len() {
        let mut e = 1;
        while e < subpaths[sp].len() && subpaths[sp].len() > 2 {
            let mut candidate = subpaths.clone();
            candidate[sp].remove(e);
            if fails(&candidate) {
                subpaths = candidate;
                continue;
            }
            e += 1;
        }
    }

    subpaths.concat()
}

/// Format commands as a test function that rebuilds the path.
pub fn test_case_source(commands: &[PathCommand]) -> String {
    use std::fmt::Write;

    let mut syntax = String::new();
    let _ = write_commands(commands.iter().copied(), &mut syntax);

    let mut src = String::new();
    let _ = writeln!(src, "#[test]");
    let _ = writeln!(src, "fn reduced_test_case() {{");
    let _ = writeln!(src, "    let mut path = Path::new();");
    for cmd in commands {
        let _ = match *cmd {
            PathCommand::MoveTo { to } => {
                writeln!(src, "    path.move_to(point({}, {})).unwrap();", to.x, to.y)
            }
            PathCommand::LineTo { to } => {
                writeln!(src, "    path.line_to(point({}, {})).unwrap();", to.x, to.y)
            }
            PathCommand::QuadraticTo { ctrl, to } => writeln!(
                src,
                "    path.quadratic_to(point({}, {}), point({}, {})).unwrap();",
                ctrl.x, ctrl.y, to.x, to.y
            ),
            PathCommand::ArcTo { to, sweep } => writeln!(
                src,
                "    path.arc_to(point({}, {}), Angle::radians({})).unwrap();",
                to.x, to.y, sweep
            ),
        };
    }
    let _ = writeln!(src, "    test_path(path.build());\n");
    let _ = writeln!(src, "    // Path syntax:");
    for line in syntax.lines() {
        let _ = writeln!(src, "    // {}", line);
    }
    let _ = writeln!(src, "}}");

    src
}

#[cfg(test)]
use crate::path::math::point;

#[test]
fn subpaths() {
    let commands = [
        PathCommand::MoveTo { to: point(0.0, 0.0) },
        PathCommand::LineTo { to: point(1.0, 0.0) },
        PathCommand::MoveTo { to: point(2.0, 0.0) },
        PathCommand::MoveTo { to: point(3.0, 0.0) },
        PathCommand::LineTo { to: point(4.0, 0.0) },
    ];

    let subpaths = split_subpaths(&commands);
    assert_eq!(subpaths.len(), 3);
    assert_eq!(subpaths[0], &commands[0..2]);
    assert_eq!(subpaths[1], &commands[2..3]);
    assert_eq!(subpaths[2], &commands[3..5]);
    assert!(split_subpaths(&[]).is_empty());
}

#[test]
fn reduce_test_case() {
    let bad = point(5.0, 5.0);
    let mut commands = Vec::new();
    for i in 0..4 {
        let y = i as f32 * 10.0;
        commands.push(PathCommand::MoveTo { to: point(0.0, y) });
        commands.push(PathCommand::LineTo { to: point(1.0, y) });
        if i == 2 {
            commands.push(PathCommand::LineTo { to: bad });
        }
        commands.push(PathCommand::LineTo { to: point(1.0, y + 1.0) });
    }

    let reduced = find_reduced_test_case(&commands, &|commands: &[PathCommand]| {
        commands.iter().any(|cmd| cmd.to() == bad)
    });

    assert_eq!(
        reduced,
        vec![
            PathCommand::MoveTo {
                to: point(0.0, 20.0)
            },
            PathCommand::LineTo { to: bad },
        ]
    );

    let src = test_case_source(&reduced);
    assert!(src.contains("path.move_to(point(0, 20)).unwrap();"));
    assert!(src.contains("// L 5 5"));
}

#[test]
fn vertices_as_text() {
    use crate::path::{traits::*, Path};

    let mut path = Path::new();
    path.move_to(point(0.0, 0.0)).unwrap();
    path.line_to(point(2.0, 0.0)).unwrap();

    let mut text = String::new();
    write_vertices(&path.build(), &mut text).unwrap();
    assert_eq!(text, "0 0 0 -1\n2 0 0 -1\n");
}
