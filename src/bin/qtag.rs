//! Command-line interface for qtag
//! Repairs tagged question text and emits the paragraph-style instruction stream for it.
//!
//! Usage:
//!   qtag render `<path>` [--format `<format>`] [--dry-run]  - Emit the instruction stream
//!   qtag preview `<path>` [--limit `<n>`]                  - List items with their styles
//!   qtag normalize `<path>`                               - Print repaired tagged text
//!   qtag tag-passage `<path>`                             - Tag a raw passage by paragraph
//!   qtag to-html `<path>` [-o `<out>`]                    - Export tagged text as HTML divs
//!
//! Input files ending in .html/.htm are read as one item per div, anything else as one item
//! per line. Configuration comes from the built-in defaults, then ./qtag.toml if present, then
//! --config.

use clap::{Arg, ArgAction, ArgMatches, Command};
use qtag::config::{ConfigError, Loader, QtagConfig};
use qtag::source::{self, html, SourceError};
use qtag::{tag_passage, CancelFlag, OutputFormat, RecordingSink, RunSummary, StreamSink};
use std::fmt;
use std::io;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::{fmt as tracing_fmt, prelude::*, EnvFilter};

#[derive(Debug)]
enum CliError {
    Config(ConfigError),
    Source(SourceError),
    Io(io::Error),
    Usage(String),
    Task(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(err) => write!(f, "Configuration error: {}", err),
            CliError::Source(err) => write!(f, "{}", err),
            CliError::Io(err) => write!(f, "I/O error: {}", err),
            CliError::Usage(msg) => write!(f, "{}", msg),
            CliError::Task(msg) => write!(f, "Run aborted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config(err)
    }
}

impl From<SourceError> for CliError {
    fn from(err: SourceError) -> Self {
        CliError::Source(err)
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Io(err)
    }
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the input file")
        .required(true)
        .index(1)
}

fn build_cli() -> Command {
    Command::new("qtag")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Lays out tagged exam-question text as paragraph-style instructions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("More log output (repeat for more)")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("No log output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .about("Emit the instruction stream for a document")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format: text, json or yaml (default from config)"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Plan the run without writing instructions")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("preview")
                .about("List items with the style and role they resolve to")
                .arg(path_arg())
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .short('n')
                        .help("Number of items to list")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("10"),
                ),
        )
        .subcommand(
            Command::new("normalize")
                .about("Print the repaired tagged text")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("tag-passage")
                .about("Tag a raw passage paragraph by paragraph")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("to-html")
                .about("Export tagged text as an HTML page of divs")
                .arg(path_arg())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write to this file instead of stdout"),
                ),
        )
}

#[tokio::main]
async fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    init_tracing(&matches);

    match run(&matches).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(matches: &ArgMatches) {
    if matches.get_flag("quiet") {
        return;
    }

    let filter = match matches.get_count("verbose") {
        0 => "warn,qtag=info",
        1 => "info,qtag=debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<QtagConfig, CliError> {
    let explicit = matches.get_one::<String>("config").map(Path::new);
    Ok(Loader::layered(explicit).build()?)
}

async fn run(matches: &ArgMatches) -> Result<ExitCode, CliError> {
    let config = load_config(matches)?;

    match matches.subcommand() {
        Some(("render", sub)) => handle_render(&config, sub).await,
        Some(("preview", sub)) => {
            let items = source::load_items(required_path(sub))?;
            let limit = sub.get_one::<usize>("limit").copied().unwrap_or(10);
            print!("{}", qtag::preview::preview(&items, limit));
            Ok(ExitCode::SUCCESS)
        }
        Some(("normalize", sub)) => {
            let items = source::load_items(required_path(sub))?;
            let normalizer = config.normalizer();
            for line in items.iter().filter_map(|i| normalizer.normalize_line(&i.text)) {
                println!("{}", line);
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(("tag-passage", sub)) => {
            let passage = source::read_to_string(Path::new(required_path(sub)))?;
            println!("{}", tag_passage(&passage));
            Ok(ExitCode::SUCCESS)
        }
        Some(("to-html", sub)) => {
            let items = source::load_items(required_path(sub))?;
            let tagged = items
                .iter()
                .map(|i| i.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            let page = html::to_html(&tagged)?;
            match sub.get_one::<String>("output") {
                Some(out) => std::fs::write(out, page)?,
                None => println!("{}", page),
            }
            Ok(ExitCode::SUCCESS)
        }
        _ => Err(CliError::Usage("Unknown command".to_string())),
    }
}

fn required_path(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or_default()
}

/// Handle the render command
async fn handle_render(config: &QtagConfig, matches: &ArgMatches) -> Result<ExitCode, CliError> {
    let items = source::load_items(required_path(matches))?;
    let format = match matches.get_one::<String>("format") {
        Some(name) => name.parse::<OutputFormat>().map_err(CliError::Usage)?,
        None => config.output.format,
    };
    let dry_run = matches.get_flag("dry-run");
    let sequencer = config.sequencer();

    let cancel = CancelFlag::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupt received, stopping after the current item");
                cancel.cancel();
            }
        })
    };

    let summary = tokio::task::spawn_blocking(move || {
        if dry_run {
            sequencer.run(&items, RecordingSink::new(), &cancel)
        } else {
            sequencer.run(&items, StreamSink::new(io::stdout(), format), &cancel)
        }
    })
    .await
    .map_err(|e| CliError::Task(e.to_string()))?;
    watcher.abort();

    report(&summary);
    if summary.failed > 0 || summary.cancelled {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn report(summary: &RunSummary) {
    eprintln!(
        "{}/{} items emitted, {} failed, {} dropped{}",
        summary.succeeded,
        summary.total,
        summary.failed,
        summary.dropped,
        if summary.cancelled { " (cancelled)" } else { "" }
    );
    for failure in &summary.failures {
        eprintln!("  #{} {}: {}", failure.order, failure.preview, failure.reason);
    }
}
