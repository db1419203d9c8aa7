use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum, error::ErrorKind};
use tracing_subscriber::EnvFilter;
use xsdcheck_core::config::Config;
use xsdcheck_core::history::{FileHistory, HistoryStore};
use xsdcheck_core::report::ExitStatus;
use xsdcheck_core::session::{ValidationOutcome, ValidationSession};

#[derive(Parser, Debug)]
#[command(name = "xsdcheck", version)]
#[command(about = "Validate an XML file or URL against its declared XML Schema")]
struct Cli {
    /// File or URL to validate.
    #[arg(value_name = "FILE|URL")]
    input: Option<String>,

    /// Only display error messages.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Enable debug output.
    #[arg(short, long)]
    verbose: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Keep a downloaded document instead of deleting it, and print its path.
    #[arg(long)]
    keep_download: bool,

    /// Transport timeout in seconds for network fetches.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// List previously validated inputs, most recent first.
    #[arg(long)]
    history: bool,

    #[arg(long)]
    clear_history: bool,

    /// Do not record this input in the history.
    #[arg(long)]
    no_history: bool,

    #[arg(long, value_name = "PATH")]
    history_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn exit_code(status: ExitStatus) -> ExitCode {
    ExitCode::from(u8::try_from(status.code()).unwrap_or(u8::MAX))
}

fn init_tracing(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn history_store(cli: &Cli) -> Result<FileHistory> {
    match &cli.history_file {
        Some(path) => Ok(FileHistory::new(path)),
        None => FileHistory::open_default().context("cannot locate history file"),
    }
}

fn print_outcome(cli: &Cli, input: &str, outcome: &ValidationOutcome) -> Result<()> {
    let Some(report) = outcome.report() else {
        eprintln!(
            "error: could not validate {input}: {}",
            outcome.failure_message().unwrap_or_default()
        );
        if let Some(path) = outcome.kept_download() {
            eprintln!("downloaded document kept at {}", path.display());
        }
        return Ok(());
    };

    match cli.format {
        Format::Json => {
            let json = serde_json::json!({
                "input": input,
                "status": outcome.status(),
                "exit_code": outcome.status().code(),
                "report": report,
                "kept_download": outcome.kept_download(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Format::Text if report.is_valid() => {
            if !cli.quiet {
                println!("{input}: VALID");
            }
        }
        Format::Text => {
            println!("{input}: INVALID ({})", outcome.status());
            print!("{report}");
        }
    }
    if cli.format == Format::Text {
        if let Some(path) = outcome.kept_download() {
            println!("downloaded document kept at {}", path.display());
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<ExitCode> {
    if cli.history || cli.clear_history {
        let store = history_store(&cli)?;
        if cli.clear_history {
            store.clear()?;
        }
        if cli.history {
            for entry in store.entries()? {
                println!("{entry}");
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let Some(input) = cli.input.as_deref() else {
        eprintln!("error: you must specify a file or URL");
        eprintln!("usage: xsdcheck [OPTIONS] <FILE|URL>");
        return Ok(exit_code(ExitStatus::Exception));
    };

    let config = Config::default()
        .with_fetch_timeout(cli.timeout.map(Duration::from_secs))
        .with_keep_downloads(cli.keep_download);
    let mut session = ValidationSession::new(config)?;
    if !cli.no_history {
        match history_store(&cli) {
            Ok(store) => session = session.with_history(Arc::new(store)),
            Err(e) => tracing::warn!("history disabled: {e:#}"),
        }
    }

    let outcome = session.run_validation(input);
    print_outcome(&cli, input, &outcome)?;
    tracing::debug!(status = outcome.status().code(), "exiting");
    Ok(exit_code(outcome.status()))
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            return exit_code(ExitStatus::Exception);
        }
    };
    init_tracing(&cli);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            exit_code(ExitStatus::Exception)
        }
    }
}
