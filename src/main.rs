mod aggregator;
mod config;
mod domain;
mod ingest;
mod parser;
mod render;

use clap::Parser;
use config::{CliOverrides, CrawlerConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Parse a Quake 3 Arena server log and print a per-match report:
/// players, kill counts and kills grouped by cause of death.
#[derive(Parser, Debug)]
#[command(name = "quake-crawler", version, about)]
pub struct Cli {
    /// Log file to read, `-` for stdin (default: from config)
    #[arg(value_name = "LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Config file path
    #[arg(short, long, default_value = "crawler.toml")]
    config: PathBuf,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Match id prefix (overrides config)
    #[arg(long)]
    prefix: Option<String>,

    /// Print resolved settings and exit without reading the log
    #[arg(long)]
    dry_run: bool,

    /// Debug logging (per-match summaries)
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?cli, "parsed CLI arguments");

    let mut config = match CrawlerConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    config.merge_cli(CliOverrides {
        log_file: cli.log_file,
        game_prefix: cli.prefix,
        output_file: cli.output,
    });

    if cli.dry_run {
        println!("quake-crawler v{}", env!("CARGO_PKG_VERSION"));
        println!("Config file: {}", cli.config.display());
        println!("Log file: {}", config.input.log_file.display());
        println!("Match prefix: {}", config.report.game_prefix);
        match &config.report.output_file {
            Some(path) => println!("Output: {}", path.display()),
            None => println!("Output: stdout"),
        }
        return ExitCode::SUCCESS;
    }

    let report = match ingest::ingest_path(&config.input.log_file, &config.report.game_prefix) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if report.is_empty() {
        tracing::warn!("no InitGame: line found, report is empty");
    }

    let written = match &config.report.output_file {
        Some(path) => render::write_report(&report, path).map(|()| {
            tracing::info!(path = %path.display(), "report written");
        }),
        None => render::render(&report, std::io::stdout().lock()),
    };
    if let Err(e) = written {
        tracing::error!("{e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
