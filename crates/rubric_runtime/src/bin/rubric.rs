//! Rubric CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use rubric_runtime::{Session, init_logging, load_fields, load_registry, render_json, render_tree};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    schema: Option<PathBuf>,
    files: Vec<PathBuf>,
    json: bool,
    verbose: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-v" | "--verbose" => config.verbose = true,
            "--json" => config.json = true,
            "-s" | "--schema" => {
                i += 1;
                if i >= args.len() {
                    return Err("--schema requires a path".into());
                }
                config.schema = Some(PathBuf::from(&args[i]));
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
        i += 1;
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("rubric {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_logging(config.verbose);

    let schema = config.schema.ok_or("--schema is required (see --help)")?;
    let session = Session::new(load_registry(&schema)?);

    let mut fields = Vec::new();
    for file in &config.files {
        let document = load_fields(file)?;
        fields.extend(session.expand_document(&document)?);
    }

    if config.json {
        println!("{}", render_json(fields.iter().map(|field| &**field))?);
    } else {
        for field in &fields {
            print!("{}", render_tree(field));
        }
    }
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mRubric\x1b[0m - Composite directive expander

\x1b[1mUSAGE:\x1b[0m
    rubric --schema <SCHEMA> [OPTIONS] [FILES...]

\x1b[1mARGUMENTS:\x1b[0m
    [FILES...]    Field documents (JSON) to expand

\x1b[1mOPTIONS:\x1b[0m
    -s, --schema <SCHEMA>   Directive schema document (JSON)
        --json              Print expanded trees as JSON
    -v, --verbose           Log expansion steps to stderr
    -h, --help              Print help
    -V, --version           Print version

\x1b[1mENVIRONMENT:\x1b[0m
    RUBRIC_LOG    tracing filter directive (overrides --verbose)

\x1b[1mOUTPUT:\x1b[0m
    One line per directive, indented under its composite:
        + Username[0] {{maxLength=20}}
              LengthMax[1] {{order=2, value=20}}
    '+' marks a composite; [n] is the declaration index."
    );
}
