//! `overlap` CLI - compute common meeting availability from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Common slots as JSON (stdin → stdout)
//! cat availability.json | overlap common
//!
//! # Only slots where at least 3 people can make it for 30 minutes or more
//! overlap common -i availability.json --min-participants 3 --min-duration 30
//!
//! # The five strongest candidates, human-readable
//! overlap common -i availability.json --top 5 --format text
//!
//! # Per-date listing of everyone's windows
//! overlap group -i availability.json --format text
//!
//! # Who has responded
//! overlap participants -i availability.json
//! ```
//!
//! Input is a JSON array of availability records, or an object with an
//! `availability` array. Set `RUST_LOG` or pass `-v` for diagnostics on stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use overlap_engine::{
    best_slots, compute_common_availability_with, distinct_participants, group_by_date,
    records_from_json, AvailabilityRecord, CommonAvailabilitySlot, OverlapOptions, TimeOfDay,
};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::{self, Read};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "overlap",
    version,
    about = "Find when meeting participants are available together"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log engine diagnostics at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute maximal slots where two or more participants overlap
    Common {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Minimum distinct participants per slot (at least 2)
        #[arg(long, default_value_t = 2)]
        min_participants: usize,
        /// Drop slots shorter than this many minutes
        #[arg(long, default_value_t = 0)]
        min_duration: u32,
        /// Keep only the N best slots (most participants, then longest)
        #[arg(long)]
        top: Option<usize>,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// List records grouped by date, sorted by start time
    Group {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the distinct participant names, one per line
    Participants {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Common {
            input,
            output,
            min_participants,
            min_duration,
            top,
            format,
            pretty,
        } => {
            let records = load_records(input.as_deref())?;
            let options = OverlapOptions {
                min_participants,
                min_duration_minutes: min_duration,
            };

            let mut report = compute_common_availability_with(&records, &options);
            info!(
                records = records.len(),
                rejected = report.rejected.len(),
                slots = report.slots.len(),
                "computed common availability"
            );
            if let Some(limit) = top {
                report.slots = best_slots(&report.slots, limit);
            }

            let rendered = match format {
                Format::Json => to_json(&report, pretty)?,
                Format::Text => render_slots(&report.slots),
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Group {
            input,
            output,
            format,
            pretty,
        } => {
            let records = load_records(input.as_deref())?;
            let groups = group_by_date(&records);
            debug!(dates = groups.len(), "grouped records by date");

            let rendered = match format {
                Format::Json => to_json(&groups, pretty)?,
                Format::Text => render_groups(&groups),
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Participants { input, output } => {
            let records = load_records(input.as_deref())?;
            let mut rendered = String::new();
            for name in distinct_participants(&records) {
                rendered.push_str(&name);
                rendered.push('\n');
            }
            write_output(output.as_deref(), &rendered)?;
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `-v` forces debug; otherwise `RUST_LOG`
/// applies, defaulting to warnings only.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A subscriber may already be set when embedded; that is fine.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .try_init();
}

fn load_records(path: Option<&str>) -> Result<Vec<AvailabilityRecord>> {
    let json = read_input(path)?;
    records_from_json(&json).context("Failed to parse availability records")
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let mut json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    json.push('\n');
    Ok(json)
}

/// One line per slot: `2025-06-01  9:30 AM - 10:00 AM  (30 min)  Alice, Bob`.
fn render_slots(slots: &[CommonAvailabilitySlot]) -> String {
    if slots.is_empty() {
        return "No common availability found.\n".to_string();
    }
    let mut out = String::new();
    for slot in slots {
        let _ = writeln!(
            out,
            "{}  {} - {}  ({} min)  {}",
            slot.date,
            slot.start_time.to_12h_string(),
            slot.end_time.to_12h_string(),
            slot.duration_minutes,
            slot.participants.join(", ")
        );
    }
    out
}

fn render_groups(groups: &BTreeMap<String, Vec<&AvailabilityRecord>>) -> String {
    if groups.is_empty() {
        return "No availability added yet.\n".to_string();
    }
    let mut out = String::new();
    for (date, records) in groups {
        let _ = writeln!(out, "{}", date);
        for record in records {
            let _ = writeln!(
                out,
                "  {} - {}  {}",
                display_time(&record.start_time),
                display_time(&record.end_time),
                record.participant_name.trim()
            );
        }
    }
    out
}

/// 12-hour form when the time parses, the raw string otherwise.
fn display_time(raw: &str) -> String {
    TimeOfDay::parse(raw)
        .map(TimeOfDay::to_12h_string)
        .unwrap_or_else(|_| raw.to_string())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
