//! `recur` CLI — evaluate a saved recurrence rule set from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Next three occurrences after the saved start date
//! recur next -i rules.json -n 3
//!
//! # Occurrences before a given date, US-style output
//! recur previous -i rules.json --from 2014-02-01 -n 2 --format %m/%d/%Y
//!
//! # Every occurrence between start and end (stdin → stdout)
//! cat rules.json | recur all
//!
//! # Check individual dates
//! recur matches -i rules.json 2014-01-03 2014-01-04
//! ```
//!
//! The input is a snapshot as written by `RecurrenceRuleSet::save`.
//! Set `RUST_LOG` or pass `--verbose` to see engine logs on stderr.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use recur_engine::{RecurrenceRuleSet, Snapshot};
use std::io::{self, Read};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "recur",
    version,
    about = "Evaluate saved recurrence rule sets"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log engine decisions to stderr (debug level unless RUST_LOG is set)
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the next occurrences after the origin
    Next {
        #[command(flatten)]
        source: Source,
        /// Number of occurrences to list
        #[arg(short, default_value_t = 1)]
        n: usize,
        #[command(flatten)]
        output: Output,
    },
    /// List the occurrences before the origin, nearest first
    Previous {
        #[command(flatten)]
        source: Source,
        /// Number of occurrences to list
        #[arg(short, default_value_t = 1)]
        n: usize,
        #[command(flatten)]
        output: Output,
    },
    /// List every occurrence from the origin through the end date
    All {
        #[command(flatten)]
        source: Source,
        #[command(flatten)]
        output: Output,
    },
    /// Print whether each date matches the rule set
    Matches {
        #[command(flatten)]
        source: Source,
        /// Dates to check (YYYY-MM-DD, MM/DD/YYYY or RFC 3339)
        #[arg(required = true)]
        dates: Vec<String>,
    },
}

#[derive(Args)]
struct Source {
    /// Snapshot JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Start enumerating from this date instead of the saved start
    #[arg(long)]
    from: Option<String>,
}

#[derive(Args)]
struct Output {
    /// strftime format for printed dates
    #[arg(long, default_value = "%Y-%m-%d")]
    format: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Next { source, n, output } => {
            let set = load(&source)?;
            let dates = set
                .next_formatted(n, &output.format)
                .context("Failed to list next occurrences")?;
            print_lines(&dates);
        }
        Commands::Previous { source, n, output } => {
            let set = load(&source)?;
            let dates = set
                .previous_formatted(n, &output.format)
                .context("Failed to list previous occurrences")?;
            print_lines(&dates);
        }
        Commands::All { source, output } => {
            let set = load(&source)?;
            let dates = set
                .all_formatted(&output.format)
                .context("Failed to list occurrences")?;
            print_lines(&dates);
        }
        Commands::Matches { source, dates } => {
            let set = load(&source)?;
            for date in &dates {
                let matched = set
                    .matches(date.as_str())
                    .with_context(|| format!("Failed to check date: {}", date))?;
                println!("{} {}", date, matched);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .init();
}

/// Read and validate the snapshot, then apply `--from`.
fn load(source: &Source) -> Result<RecurrenceRuleSet> {
    let json = read_input(source.input.as_deref())?;
    let snapshot = Snapshot::from_json(&json).context("Failed to parse snapshot JSON")?;
    let mut set =
        RecurrenceRuleSet::from_snapshot(&snapshot).context("Invalid rule set in snapshot")?;

    if let Some(from) = source.from.as_deref() {
        set.set_from_date(from)
            .with_context(|| format!("Invalid --from date: {}", from))?;
    }

    tracing::debug!(rules = set.rules().len(), "rule set loaded");
    Ok(set)
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

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
