use crate::commands::{CliError, TessellateCmd};
use tracery::extra::debugging::write_vertices;
use tracery::path::traits::Build;
use tracery::path::{Path, VertexBuffer};

use std::io::Write;

fn build(cmd: &TessellateCmd) -> Result<VertexBuffer, CliError> {
    let path = Path::from_commands_with_options(&cmd.commands, cmd.options)?;

    Ok(path.build())
}

/// Print one `x y nx ny` line per vertex.
pub fn tessellate(cmd: &TessellateCmd, output: &mut dyn Write) -> Result<(), CliError> {
    let buffer = build(cmd)?;

    let mut text = String::with_capacity(buffer.len() * 16);
    // Writing into a String doesn't fail.
    let _ = write_vertices(&buffer, &mut text);
    output.write_all(text.as_bytes())?;

    Ok(())
}

pub fn count(cmd: &TessellateCmd, output: &mut dyn Write) -> Result<(), CliError> {
    let buffer = build(cmd)?;

    writeln!(output, "vertices: {}", buffer.len())?;
    writeln!(output, "edges: {}", buffer.len() / 2)?;
    writeln!(output, "sub-paths: {}", cmd.commands.num_subpaths())?;

    Ok(())
}

#[cfg(test)]
fn cmd(src: &str) -> TessellateCmd {
    let mut commands = tracery::path::PathCommands::new();
    tracery::extra::parser::parse_str(src, &mut commands).unwrap();

    TessellateCmd {
        commands,
        options: tracery::path::BuilderOptions::DEFAULT,
    }
}

#[test]
fn tessellate_line() {
    let mut output = Vec::new();
    tessellate(&cmd("M 0 0 L 2 0"), &mut output).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), "0 0 0 -1\n2 0 0 -1\n");
}

#[test]
fn count_vertices() {
    let mut output = Vec::new();
    count(&cmd("M 0 0 L 1 0 Q 2 0 2 1 M 5 5"), &mut output).unwrap();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "vertices: 10\nedges: 5\nsub-paths: 2\n"
    );
}
