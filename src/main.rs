//! Purpose: `jsonview` CLI entry point; walks one JSON document with the typed views.
//! Role: Binary crate root; parses args, reads input, runs commands, emits JSON on stdout.
//! Invariants: Stdout carries only JSON payloads; diagnostics and logs go to stderr.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
//! Invariants: Every lookup goes through the view accessors (no ad hoc Value probing).
use std::error::Error as StdError;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

mod color_json;
mod command_dispatch;

use color_json::{RenderStyle, render_json};
use jsonview::api::{
    ArrayView, Error, ErrorKind, MAX_ROUNDED_DIGITS, Node, ObjectView, to_exit_code,
};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome { exit_code });
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint("Try `jsonview --help`."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    init_tracing();

    let color_mode = cli.color;
    let output = OutputConfig {
        color_mode,
        compact: cli.compact,
    };

    command_dispatch::dispatch_command(cli.command, cli.input.as_deref(), output)
        .map_err(|err| (err, color_mode))
}

#[derive(Parser)]
#[command(
    name = "jsonview",
    version,
    about = "Read JSON documents through shape-checked views",
    long_about = None,
    after_help = r#"EXAMPLES
  $ echo '{"user":{"id":1},"tags":["a","b"]}' | jsonview show user id --as int
  $ jsonview --input doc.json keys user
  $ jsonview --input doc.json show tags 0
  $ jsonview --input list.json len

Segments are keys while the current node is an object and indices while it is an array."#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "Read the document from this file (default: stdin)",
        value_hint = ValueHint::FilePath
    )]
    input: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics and pretty JSON output: auto|always|never"
    )]
    color: ColorMode,
    #[arg(long, global = true, help = "Emit single-line JSON even on a terminal")]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Coercion {
    Int,
    Double,
    Bool,
    Text,
    Date,
    Rounded,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Print the node at a path, optionally coerced to a primitive type")]
    Show {
        #[arg(help = "Keys and indices leading to the node")]
        segments: Vec<String>,
        #[arg(long = "as", value_enum, help = "Coerce the primitive: int|double|bool|text|date|rounded")]
        coerce: Option<Coercion>,
        #[arg(
            long,
            default_value_t = 2,
            value_parser = clap::builder::RangedU64ValueParser::<usize>::new()
                .range(0..=MAX_ROUNDED_DIGITS as u64),
            help = "Fraction digits for --as rounded (0-17)"
        )]
        digits: usize,
    },
    #[command(about = "List the keys of the object at a path")]
    Keys {
        #[arg(help = "Keys and indices leading to the object")]
        segments: Vec<String>,
    },
    #[command(about = "Count the entries or elements of the node at a path")]
    Len {
        #[arg(help = "Keys and indices leading to the node")]
        segments: Vec<String>,
    },
    #[command(about = "Report the root shape and size of the document")]
    Check,
}

#[derive(Copy, Clone, Debug)]
struct OutputConfig {
    color_mode: ColorMode,
    compact: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(input: Option<&Path>) -> Result<String, Error> {
    match input {
        Some(path) => std::fs::read_to_string(path).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to read input file")
                .with_path(path)
                .with_source(err)
        }),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to read stdin")
                    .with_hint("Pipe a UTF-8 JSON document in, or pass --input <FILE>.")
                    .with_source(err)
            })?;
            Ok(text)
        }
    }
}

/// Arrays open with `[`; everything else is handed to the object view so that
/// invalid or primitive roots surface its `Format` error.
fn load_root(text: &str) -> Result<Node, Error> {
    if text.trim_start().starts_with('[') {
        ArrayView::from_text(text).map(Node::from)
    } else {
        ObjectView::from_text(text).map(Node::from)
    }
}

fn emit_json(value: &Value, output: OutputConfig) {
    let is_tty = io::stdout().is_terminal();
    let use_color = output.color_mode.use_color(is_tty);
    let style = RenderStyle {
        color: use_color,
        compact: output.compact || !(is_tty || use_color),
    };
    println!("{}", render_json(value, style));
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::NullInput => "no input text".to_string(),
        ErrorKind::Format => "invalid JSON".to_string(),
        ErrorKind::WrongShape => "value has a different shape".to_string(),
        ErrorKind::IndexRange => "index out of range".to_string(),
        ErrorKind::Coercion => "value cannot be coerced".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
        ErrorKind::Internal => "internal error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(key) = err.key() {
        inner.insert("key".to_string(), json!(key));
    }
    if let Some(index) = err.index() {
        inner.insert("index".to_string(), json!(index));
    }
    if let Some(length) = err.length() {
        inner.insert("length".to_string(), json!(length));
    }
    if let Some(expected) = err.expected() {
        inner.insert("expected".to_string(), json!(expected));
    }
    if let Some(actual) = err.actual() {
        inner.insert("actual".to_string(), json!(actual));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(path) = err.path() {
        lines.push(format!(
            "{} {}",
            colorize_label("path:", use_color, AnsiColor::Yellow),
            path.display()
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}
