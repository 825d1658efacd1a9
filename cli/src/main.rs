mod commands;
mod tessellate;

use clap::{App, Arg, ArgMatches, SubCommand};
use commands::*;
use tracery::extra::parser::parse_str;
use tracery::path::{BuilderOptions, PathCommands};

use std::fs::File;
use std::io::{stdout, Read, Write};
use std::process;
use std::str::FromStr;

fn main() {
    env_logger::init();

    let matches = App::new("tracery command-line interface")
        .version("0.3")
        .about("Builds the stroke geometry of paths")
        .subcommand(
            SubCommand::with_name("tessellate")
                .about("Prints the vertices of the path, one `x y nx ny` line per vertex"),
        )
        .subcommand(
            SubCommand::with_name("count").about("Prints the number of vertices and sub-paths"),
        )
        .arg(
            Arg::with_name("PATH")
                .value_name("PATH")
                .help("Path commands, for example \"M 0 0 L 1 0 Q 2 0 2 1 A 2 3 3.14\"")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("INPUT")
                .help("Sets the input file to use")
                .short("i")
                .long("input")
                .value_name("FILE")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Sets the output file to use")
                .value_name("FILE")
                .short("o")
                .long("output")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("QUADRATIC_STEPS")
                .long("quadratic-steps")
                .help("Number of segments per quadratic bézier curve (4 by default)")
                .value_name("STEPS")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("ARC_STEPS")
                .long("arc-steps")
                .help("Number of segments per arc (16 by default)")
                .value_name("STEPS")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("MITER_LIMIT")
                .long("miter-limit")
                .help("Maximum length of the join normals (4 by default)")
                .value_name("LIMIT")
                .takes_value(true),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        log::error!("{}", e);
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let mut input_buffer = matches.value_of("PATH").unwrap_or("").to_string();

    if let Some(input_file) = matches.value_of("INPUT") {
        File::open(input_file)
            .and_then(|mut file| file.read_to_string(&mut input_buffer))
            .map_err(|source| CliError::Input {
                file: input_file.to_string(),
                source,
            })?;
    }

    let mut output: Box<dyn Write> = match matches.value_of("OUTPUT") {
        Some(output_file) => Box::new(File::create(output_file)?),
        None => Box::new(stdout()),
    };

    let mut commands = PathCommands::new();
    parse_str(&input_buffer, &mut commands)?;
    log::debug!("parsed {} commands", commands.len());

    let cmd = TessellateCmd {
        commands,
        options: get_options(matches)?,
    };

    match matches.subcommand_name() {
        Some("tessellate") => tessellate::tessellate(&cmd, &mut *output),
        Some("count") => tessellate::count(&cmd, &mut *output),
        _ => {
            eprintln!("{}", matches.usage());
            Ok(())
        }
    }
}

fn get_options(matches: &ArgMatches) -> Result<BuilderOptions, CliError> {
    let mut options = BuilderOptions::DEFAULT;

    if let Some(steps) = get_value::<usize>(matches, "QUADRATIC_STEPS", "quadratic-steps", |s| *s >= 1)? {
        options = options.with_quadratic_steps(steps);
    }
    if let Some(steps) = get_value::<usize>(matches, "ARC_STEPS", "arc-steps", |s| *s >= 1)? {
        options = options.with_arc_steps(steps);
    }
    if let Some(limit) = get_value::<f32>(matches, "MITER_LIMIT", "miter-limit", |l| {
        *l >= BuilderOptions::MINIMUM_MITER_LIMIT
    })? {
        options = options.with_miter_limit(limit);
    }

    Ok(options)
}

fn get_value<T: FromStr>(
    matches: &ArgMatches,
    arg: &str,
    name: &'static str,
    is_valid: impl Fn(&T) -> bool,
) -> Result<Option<T>, CliError> {
    let value = match matches.value_of(arg) {
        Some(value) => value,
        None => return Ok(None),
    };

    match value.parse::<T>() {
        Ok(v) if is_valid(&v) => Ok(Some(v)),
        _ => Err(CliError::InvalidOption {
            name,
            value: value.to_string(),
        }),
    }
}
