//! spendsearch-parse - Show how search queries are parsed.
//!
//! Prints, for each query, the key/value ranges the search bar would
//! highlight and the value it would offer suggestions for.
//!
//! # Usage
//!
//! ```bash
//! spendsearch-parse 'type:expense category:Car,Cel'
//! spendsearch-parse -F queries.txt --format json
//! printf 'tag:a,b\n' | spendsearch-parse -
//! spendsearch-parse --keys keys.json 'vendor:Acme'
//! spendsearch-parse  # Interactive mode
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde::Serialize;
use spendsearch_parser::completions::apply_suggestion;
use spendsearch_parser::{parse_with, KeyTable, ParseResult};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Show the ranges and autocomplete target of search queries.
#[derive(Parser, Debug)]
#[command(name = "spendsearch-parse")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Query to parse, words joined by spaces ("-" reads one query per line
    /// from stdin; if not provided, enters interactive mode)
    #[arg(value_name = "QUERY", trailing_var_arg = true, num_args = 0..)]
    query: Vec<String>,

    /// Read queries from a file, one per line (cannot be combined with QUERY)
    #[arg(
        short = 'F',
        long = "query-file",
        value_name = "QUERY_FILE",
        conflicts_with = "query"
    )]
    query_file: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short = 'f', long, default_value = "text")]
    format: OutputFormat,

    /// JSON key table to use instead of the builtin one
    #[arg(short = 'k', long, value_name = "KEYS_FILE")]
    keys: Option<PathBuf>,

    /// Replace the autocomplete target with this value and print the result
    #[arg(short = 's', long, value_name = "VALUE")]
    suggest: Option<String>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Main entry point for the parse command.
pub fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "spendsearch=debug,spendsearch_parser=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let table = match &args.keys {
        Some(path) => load_key_table(path)?,
        None => KeyTable::default(),
    };
    tracing::debug!(forms = table.len(), "key table ready");

    let mut settings = Settings {
        format: args.format,
        suggest: args.suggest.clone(),
        table,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.query.len() == 1 && args.query[0] == "-" {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            write_query(&line, &settings, &mut out)?;
        }
        Ok(())
    } else if !args.query.is_empty() {
        write_query(&args.query.join(" "), &settings, &mut out)
    } else if let Some(ref query_file) = args.query_file {
        let contents = fs::read_to_string(query_file)
            .with_context(|| format!("failed to read query file {}", query_file.display()))?;
        for line in contents.lines() {
            write_query(line, &settings, &mut out)?;
        }
        Ok(())
    } else {
        drop(out);
        run_interactive(&mut settings)
    }
}

fn load_key_table(path: &Path) -> Result<KeyTable> {
    let document = fs::read_to_string(path)
        .with_context(|| format!("failed to read key table {}", path.display()))?;
    KeyTable::from_json(&document)
        .with_context(|| format!("invalid key table {}", path.display()))
}

/// Output settings shared by batch and interactive mode.
struct Settings {
    format: OutputFormat,
    suggest: Option<String>,
    table: KeyTable,
}

fn write_query<W: Write>(query: &str, settings: &Settings, writer: &mut W) -> Result<()> {
    let result = parse_with(query, &settings.table);
    let suggested = settings.suggest.as_deref().and_then(|suggestion| {
        let applied = result
            .autocomplete
            .as_ref()
            .map(|target| apply_suggestion(query, target, suggestion));
        if applied.is_none() {
            tracing::warn!(query, "no autocomplete target, suggestion not applied");
        }
        applied
    });

    match settings.format {
        OutputFormat::Text => write_text(query, &result, suggested.as_deref(), writer),
        OutputFormat::Json => write_json(&result, suggested.as_deref(), writer),
    }
}

fn write_text<W: Write>(
    query: &str,
    result: &ParseResult,
    suggested: Option<&str>,
    writer: &mut W,
) -> Result<()> {
    writeln!(writer, "query: {query:?}")?;
    for range in &result.ranges {
        writeln!(
            writer,
            "  {:<12} {:>4} {:>4}  {:?}",
            range.key, range.start, range.length, range.value
        )?;
    }
    match &result.autocomplete {
        Some(target) => writeln!(
            writer,
            "autocomplete: {} {:?} at {} (length {})",
            target.key, target.value, target.start, target.length
        )?,
        None => writeln!(writer, "autocomplete: none")?,
    }
    if let Some(suggested) = suggested {
        writeln!(writer, "suggested: {suggested}")?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    result: &'a ParseResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggested: Option<&'a str>,
}

/// One JSON document per line.
fn write_json<W: Write>(
    result: &ParseResult,
    suggested: Option<&str>,
    writer: &mut W,
) -> Result<()> {
    serde_json::to_writer(&mut *writer, &JsonOutput { result, suggested })?;
    writeln!(writer)?;
    Ok(())
}

fn run_interactive(settings: &mut Settings) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    println!("Type a query to parse it, .help for commands.");
    println!();

    loop {
        match rl.readline("search> ") {
            Ok(line) => {
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                if let Some(cmd) = line.trim().strip_prefix('.') {
                    if !handle_dot_command(cmd, settings) {
                        break;
                    }
                    continue;
                }

                // Queries are not trimmed: trailing whitespace ends completion.
                if let Err(e) = write_query(&line, settings, &mut io::stdout().lock()) {
                    eprintln!("error: {e:#}");
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

/// Handle a `.command`. Returns `false` when the shell should exit.
fn handle_dot_command(cmd: &str, settings: &mut Settings) -> bool {
    let (name, rest) = cmd.split_once(' ').unwrap_or((cmd, ""));
    let rest = rest.trim();

    match name {
        "exit" | "quit" => return false,
        "help" => {
            println!(".format [text|json]   Show or set the output format");
            println!(".suggest [VALUE]      Set or clear the suggestion to apply");
            println!(".keys                 List the recognized key spellings");
            println!(".exit                 Leave the shell");
        }
        "format" => match rest {
            "" => println!("format: {}", settings.format),
            "text" => settings.format = OutputFormat::Text,
            "json" => settings.format = OutputFormat::Json,
            other => eprintln!("error: unknown format: {other}"),
        },
        "suggest" => {
            settings.suggest = (!rest.is_empty()).then(|| rest.to_string());
        }
        "keys" => {
            for (form, key) in settings.table.iter() {
                println!("  {form:<14} -> {key}");
            }
        }
        other => eprintln!("error: unknown command: .{other}"),
    }
    true
}
