//! Parcel daemon: builds a genesis asset and replays an ordered operation
//! stream against it.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use parcel_asset::{AssetConfig, Envelope, FractionalAsset, StateSnapshot};
use parcel_types::Timestamp;
use parcel_utils::{format_duration, init_logging, LogFormat, StatsCounter};

const LINES_APPLIED: &str = "lines_applied";
const LINES_REJECTED: &str = "lines_rejected";
const LINES_MALFORMED: &str = "lines_malformed";

#[derive(Parser)]
#[command(name = "parcel", about = "Fractional asset ledger", version)]
struct Cli {
    /// Path to a TOML configuration file. Without one, built-in defaults
    /// are used.
    #[arg(long, global = true, env = "PARCEL_CONFIG")]
    config: Option<PathBuf>,

    /// Log level filter, e.g. "info" or "debug,parcel_governance=trace".
    /// Overrides the config file.
    #[arg(long, global = true, env = "PARCEL_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json". Overrides the config file.
    #[arg(long, global = true, env = "PARCEL_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print the effective configuration as TOML.
    Genesis,
    /// Apply a JSON-lines operation stream to the genesis state.
    Replay {
        /// File with one JSON envelope per line. Blank lines and lines
        /// starting with '#' are skipped.
        #[arg(long)]
        ops: PathBuf,

        /// Write a snapshot of the final state here.
        #[arg(long)]
        snapshot_out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AssetConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AssetConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format.to_string();
    }
    let format: LogFormat = config
        .log_format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    init_logging(format, &config.log_level);

    match cli.command {
        Command::Genesis => {
            print!("{}", config.to_toml_string()?);
        }
        Command::Replay { ops, snapshot_out } => {
            let asset = replay(&config, &ops)?;
            if let Some(path) = snapshot_out {
                let snapshot = StateSnapshot::capture(&asset)?;
                snapshot
                    .save_to(&path)
                    .with_context(|| format!("writing snapshot {}", path.display()))?;
                tracing::info!(
                    path = %path.display(),
                    digest = %snapshot.digest_hex(),
                    "snapshot written"
                );
            }
        }
    }

    Ok(())
}

fn replay(config: &AssetConfig, ops: &Path) -> anyhow::Result<FractionalAsset> {
    let mut asset = FractionalAsset::genesis(config)?;
    let file = File::open(ops).with_context(|| format!("opening {}", ops.display()))?;
    let stats = StatsCounter::new(&[LINES_APPLIED, LINES_REJECTED, LINES_MALFORMED]);
    let mut first_seen: Option<Timestamp> = None;
    let mut last_seen = Timestamp::EPOCH;

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("reading {}", ops.display()))?;
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let envelope = match Envelope::parse_line(trimmed) {
            Ok(envelope) => envelope,
            Err(e) => {
                stats.increment(LINES_MALFORMED);
                tracing::warn!(line = line_no, error = %e, "skipping malformed line");
                continue;
            }
        };
        if envelope.now < last_seen {
            tracing::warn!(
                line = line_no,
                now = envelope.now.as_secs(),
                previous = last_seen.as_secs(),
                "operation time moved backwards"
            );
        }
        first_seen.get_or_insert(envelope.now);
        last_seen = last_seen.max(envelope.now);

        let op = envelope.op.name();
        match asset.apply(&envelope) {
            Ok(outcome) => {
                stats.increment(LINES_APPLIED);
                tracing::info!(
                    line = line_no,
                    op,
                    caller = %envelope.caller,
                    ?outcome,
                    "applied"
                );
            }
            Err(e) => {
                stats.increment(LINES_REJECTED);
                tracing::info!(
                    line = line_no,
                    op,
                    caller = %envelope.caller,
                    kind = ?e.kind(),
                    error = %e,
                    "rejected"
                );
            }
        }
    }

    let span = first_seen.map_or(0, |first| first.elapsed_since(last_seen));
    println!("replayed {}", ops.display());
    for (name, count) in stats.snapshot() {
        println!("  {name:<16} {count}");
    }
    println!("  {:<16} {}", "stream_span", format_duration(span));
    println!("  {:<16} {}", "total_supply", asset.total_supply());
    println!("  {:<16} {}", "proposals", asset.proposal_count());
    let executed = asset.proposals().filter(|p| p.executed).count();
    println!("  {:<16} {}", "executed", executed);
    println!("  {:<16} {}", "jurisdiction", asset.metadata().jurisdiction);
    if !asset.is_consistent() {
        anyhow::bail!("total supply no longer matches the sum of balances");
    }
    Ok(asset)
}
