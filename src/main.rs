use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser};
use inquire::{InquireError, Text};
use thiserror::Error;
use tracing_subscriber::{filter::LevelFilter, fmt};

use jpk_vat::core::JpkError;
use jpk_vat::jpk::JpkConfig;
use jpk_vat::workbook::process_workbook;

#[derive(Parser, Debug)]
#[command(
    name = "jpk-vat",
    version,
    about = "Convert purchase worksheets of an Excel workbook into JPK_V7M XML files"
)]
struct Cli {
    /// Workbook to convert (prompted for when omitted).
    path: Option<PathBuf>,

    /// TOML file overriding header and taxpayer settings.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Only report warnings and errors.
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("prompt cancelled")]
    PromptCancelled,

    #[error("failed to read input path: {0}")]
    Prompt(#[source] InquireError),

    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Jpk(#[from] JpkError),
}

fn main() {
    let cli = Cli::parse();
    init_tracing(log_level(&cli));

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn log_level(cli: &Cli) -> LevelFilter {
    if cli.quiet {
        return LevelFilter::WARN;
    }
    match cli.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn init_tracing(level: LevelFilter) {
    let subscriber = fmt().with_max_level(level).with_target(false).finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("Tracing subscriber already set; skipping re-initialization.");
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => JpkConfig::default(),
    };

    let input = match cli.path {
        Some(path) => path,
        None => prompt_path()?,
    };

    process_workbook(&input, &config)?;
    Ok(())
}

fn load_config(path: &Path) -> Result<JpkConfig, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| CliError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

fn prompt_path() -> Result<PathBuf, CliError> {
    let answer = match Text::new("Path to the Excel workbook (*.xlsx):")
        .with_help_message("Surrounding quotes are ignored.")
        .prompt()
    {
        Ok(value) => value,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            return Err(CliError::PromptCancelled);
        }
        Err(err) => return Err(CliError::Prompt(err)),
    };
    Ok(PathBuf::from(clean_path_input(&answer)))
}

/// Trim whitespace, then one layer of double quotes, then single quotes, as
/// left behind by drag-and-drop or "copy as path".
fn clean_path_input(raw: &str) -> &str {
    raw.trim().trim_matches('"').trim_matches('\'')
}
