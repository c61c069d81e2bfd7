//! timecard: shift-time reconciliation for VMS asset session feeds.
//!
//! Reads a backend session feed (JSON envelope of device session events)
//! and classifies worked time against the fixed nightly shift window.
//!
//! ## Subcommands
//!
//! - `report`: reconcile a feed against a shift date, print text or JSON
//! - `check`: strict feed validation, for feed-producer debugging

mod config;
mod feed;
mod logging;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use timecard_core::{parse_shift_date, reconcile, ShiftReport};

#[derive(Parser)]
#[command(name = "timecard")]
#[command(about = "Shift-time reconciliation for asset session feeds")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile a session feed against a shift date and print the report
    Report {
        /// Shift date (YYYY-MM-DD); the window runs 19:00 that day to
        /// 04:00 the next, UTC+05:30
        #[arg(long)]
        date: String,

        /// Feed file to read (stdin when absent)
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Validate a feed strictly and report the first failure
    Check {
        /// Feed file to read (stdin when absent)
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
    },
}

fn main() {
    let config = config::load();
    let _logging_guard = logging::init(config.log_to_file);
    let cli = Cli::parse();

    match cli.command {
        Commands::Report { date, input, json } => {
            if let Err(e) = run_report(&date, input.as_deref(), json || config.json) {
                tracing::error!(error = %e, "timecard report failed");
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Check { input } => {
            if let Err(e) = run_check(input.as_deref()) {
                tracing::error!(error = %e, "timecard check failed");
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn run_report(date: &str, input: Option<&Path>, json: bool) -> Result<(), String> {
    let shift_date = parse_shift_date(date)?;
    let body = feed::read_input(input)?;
    let feed = feed::decode_feed(&body)?;

    let result = reconcile(&feed.sessions, shift_date)?;
    if result.skipped_events > 0 {
        tracing::warn!(
            skipped = result.skipped_events,
            "Feed contained events with unparseable timestamps"
        );
    }

    let report = ShiftReport::build(&feed.sessions, shift_date, &result)?;
    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to render report: {}", e))?;
        println!("{}", rendered);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}

fn run_check(input: Option<&Path>) -> Result<(), String> {
    let body = feed::read_input(input)?;
    let feed = timecard_feed_protocol::parse_feed(&body)
        .map_err(|e| format!("{}: {}", e.code, e.message))?;

    println!("feed ok: {} event(s)", feed.sessions.len());
    Ok(())
}
