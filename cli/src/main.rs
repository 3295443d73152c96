use std::fs;
use std::path::{Path, PathBuf};

use argbind_core::Schema;
use argbind_gen::{OutputFormat, SchemaSet, emit_as, format_args, format_schema, struct_name};
use argbind_parser::ParsedArgs;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Exit status for command lines rejected by a schema.
const EXIT_REJECTED: i32 = 2;

#[derive(Debug, Parser)]
#[command(name = "argbind")]
#[command(about = "Check argument schemas, parse command lines against them and generate Rust code")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate definition files and/or directories.
    Check(CheckArgs),
    /// Parse one command line against a schema.
    Parse(ParseArgs),
    /// Parse a file of command lines, one per line, in parallel.
    Batch(BatchArgs),
    /// Generate a Rust module for a schema.
    Generate(GenerateArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Definition files and/or directories containing them.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Print every loaded schema in this format.
    #[arg(long)]
    format: Option<OutputFormat>,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Definition file or directory.
    definitions: PathBuf,
    /// Name of the schema to parse against.
    #[arg(long)]
    schema: String,
    /// Output format.
    #[arg(long, default_value = "text")]
    format: OutputFormat,
    /// Tokens to parse, given after `--`.
    #[arg(last = true)]
    tokens: Vec<String>,
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// Definition file or directory.
    definitions: PathBuf,
    /// Name of the schema to parse against.
    #[arg(long)]
    schema: String,
    /// File with one whitespace-separated command line per line.
    #[arg(long)]
    input: PathBuf,
    /// Number of parallel jobs (default: number of CPUs).
    #[arg(long)]
    jobs: Option<usize>,
    /// Output format.
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Definition file or directory.
    definitions: PathBuf,
    /// Name of the schema to generate code for.
    #[arg(long)]
    schema: String,
    /// Struct name (default: derived from the schema name).
    #[arg(long)]
    struct_name: Option<String>,
    /// Output path (default: stdout).
    #[arg(long)]
    output: Option<PathBuf>,
    /// Fail if the output file is missing or out of date instead of writing it.
    #[arg(long, requires = "output")]
    check: bool,
}

/// A failed command: message plus process exit status.
#[derive(Debug)]
struct CliError {
    message: String,
    code: i32,
}

impl CliError {
    fn rejected(message: String) -> Self {
        Self {
            message,
            code: EXIT_REJECTED,
        }
    }
}

impl From<String> for CliError {
    fn from(message: String) -> Self {
        Self { message, code: 1 }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Check(args) => run_check(args),
        Command::Parse(args) => run_parse(args),
        Command::Batch(args) => run_batch(args),
        Command::Generate(args) => run_generate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {}", err.message);
        std::process::exit(err.code);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_set<P: AsRef<Path>>(inputs: &[P]) -> Result<SchemaSet, String> {
    SchemaSet::from_paths(inputs).map_err(|e| format!("Failed to load definitions: {e}"))
}

fn require<'s>(set: &'s SchemaSet, name: &str) -> Result<&'s Schema, String> {
    set.require(name).map_err(|e| e.to_string())
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

fn run_check(args: CheckArgs) -> Result<(), CliError> {
    let set = load_set(&args.inputs)?;

    if let Some(format) = args.format {
        for schema in set.iter() {
            print!("{}", ensure_newline(format_schema(schema, format)?));
        }
    }

    println!(
        "Validated {} schema(s) from {} input(s).",
        set.len(),
        args.inputs.len()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

fn run_parse(args: ParseArgs) -> Result<(), CliError> {
    let set = load_set(&[&args.definitions])?;
    let schema = require(&set, &args.schema)?;

    let parsed = argbind_parser::parse(&args.tokens, schema)
        .map_err(|err| CliError::rejected(err.to_string()))?;
    print!("{}", ensure_newline(format_args(&parsed, args.format)?));
    Ok(())
}

// ---------------------------------------------------------------------------
// batch
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct BatchRecord {
    line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    args: Option<ParsedArgs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn run_batch(args: BatchArgs) -> Result<(), CliError> {
    use rayon::prelude::*;

    let set = load_set(&[&args.definitions])?;
    let schema = require(&set, &args.schema)?;

    let text = fs::read_to_string(&args.input)
        .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?;
    let lines: Vec<(usize, Vec<&str>)> = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| (number, line.split_whitespace().collect()))
        .collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.jobs.unwrap_or(0))
        .build()
        .map_err(|e| format!("Failed to create thread pool: {e}"))?;

    let records: Vec<BatchRecord> = pool.install(|| {
        lines
            .par_iter()
            .map(|(line, tokens)| match argbind_parser::parse(tokens, schema) {
                Ok(parsed) => BatchRecord {
                    line: *line,
                    args: Some(parsed),
                    error: None,
                },
                Err(err) => BatchRecord {
                    line: *line,
                    args: None,
                    error: Some(err.to_string()),
                },
            })
            .collect()
    });

    let rejected = records.iter().filter(|r| r.error.is_some()).count();
    debug!(lines = records.len(), rejected, "batch finished");

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&records)
                .map_err(|e| format!("Failed to serialize output: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&records)
                .map_err(|e| format!("Failed to serialize output: {e}"))?;
            print!("{yaml}");
        }
        OutputFormat::Text => {
            for record in &records {
                match (&record.args, &record.error) {
                    (Some(parsed), _) => println!("{}: {parsed}", record.line),
                    (None, Some(err)) => println!("{}: error: {err}", record.line),
                    (None, None) => {}
                }
            }
        }
    }

    if rejected > 0 {
        return Err(CliError::rejected(format!(
            "{rejected} of {} line(s) rejected",
            records.len()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let set = load_set(&[&args.definitions])?;
    let schema = require(&set, &args.schema)?;

    let name = match &args.struct_name {
        Some(name) => name.clone(),
        None => struct_name(schema.name()).map_err(|e| e.to_string())?,
    };
    let source = emit_as(schema, &name).map_err(|e| e.to_string())?;

    if args.check {
        let Some(path) = &args.output else {
            return Err("--check requires --output".to_string().into());
        };
        let existing = fs::read_to_string(path)
            .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
        if existing != source {
            return Err(format!(
                "'{}' is out of date with schema `{}` as `{name}`; rerun generate",
                path.display(),
                schema.name()
            )
            .into());
        }
        println!("'{}' is up to date.", path.display());
        return Ok(());
    }

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).map_err(|err| {
                        format!(
                            "Failed to create output directory '{}': {err}",
                            parent.display()
                        )
                    })?;
                }
            }
            fs::write(path, &source)
                .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
            println!(
                "Generated schema `{}` into '{}'.",
                schema.name(),
                path.display()
            );
        }
        None => print!("{source}"),
    }
    Ok(())
}

fn ensure_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
