use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use patternlock_core::{GridLayout, PatternConfig, Point};

use crate::error::{CliError, Result};
use crate::inspect::{ConfigSummary, lookup_cell, parse_layout};
use crate::replay::{ReplayOptions, describe_final, describe_step, replay};
use crate::trace::read_trace;

#[derive(Debug, Parser)]
#[command(
    name = "patternlock",
    about = "Replay and inspect 3x3 pattern-unlock gestures",
    version
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Feed a JSONL gesture trace through the recognizer.
    Replay(ReplayArgs),

    /// Print the cell under a grid-local point.
    Map(MapArgs),

    /// Load and validate a config file, then print the effective values.
    #[command(name = "check-config")]
    CheckConfig(CheckConfigArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    /// Trace file, one JSON record per line.
    pub trace: PathBuf,

    /// TOML or JSON config (defaults to the built-in pattern).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Grid size before the first layout record, e.g. `320x320`.
    #[arg(long, value_parser = parse_layout)]
    pub layout: Option<GridLayout>,

    /// Fire a reset still pending after the last record.
    #[arg(long)]
    pub settle: bool,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
#[command(allow_negative_numbers = true)]
pub struct MapArgs {
    #[arg(long)]
    pub width: f32,

    #[arg(long)]
    pub height: f32,

    pub x: f32,

    pub y: f32,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct CheckConfigArgs {
    pub path: PathBuf,

    #[arg(long)]
    pub json: bool,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    if !crate::logging::init(cli.verbose) {
        tracing::debug!("global subscriber already installed; keeping it");
    }
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(cli, &mut out)
}

/// Run a parsed command, writing its output to `out`.
pub fn execute(cli: Cli, out: &mut dyn Write) -> Result<()> {
    match cli.command {
        Commands::Replay(args) => run_replay(&args, out),
        Commands::Map(args) => run_map(&args, out),
        Commands::CheckConfig(args) => run_check_config(&args, out),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<PatternConfig> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            Ok(PatternConfig::from_file(path)?)
        }
        None => Ok(PatternConfig::default()),
    }
}

fn run_replay(args: &ReplayArgs, out: &mut dyn Write) -> Result<()> {
    let config = load_config(args.config.as_ref())?;
    let records = read_trace(&args.trace)?;
    let options = ReplayOptions {
        initial_layout: args.layout,
        settle: args.settle,
    };
    let report = replay(&records, config, &options);

    if args.json {
        write_json(out, &report)?;
    } else {
        for step in &report.steps {
            writeln!(out, "{}", describe_step(step)).map_err(CliError::Output)?;
        }
        writeln!(out, "{}", describe_final(&report.final_state)).map_err(CliError::Output)?;
    }
    Ok(())
}

fn run_map(args: &MapArgs, out: &mut dyn Write) -> Result<()> {
    let lookup = lookup_cell(args.width, args.height, Point::new(args.x, args.y))?;
    if args.json {
        write_json(out, &lookup)
    } else {
        writeln!(
            out,
            "cell {} (row {}, col {}) center ({}, {})",
            lookup.cell, lookup.row, lookup.col, lookup.center.x, lookup.center.y
        )
        .map_err(CliError::Output)
    }
}

fn run_check_config(args: &CheckConfigArgs, out: &mut dyn Write) -> Result<()> {
    let config = load_config(Some(&args.path))?;
    let summary = ConfigSummary::from(&config);
    if args.json {
        write_json(out, &summary)
    } else {
        writeln!(out, "correct_pattern = {}", config.correct_pattern).map_err(CliError::Output)?;
        writeln!(out, "reset_delay_ms = {}", summary.reset_delay_ms).map_err(CliError::Output)?;
        writeln!(out, "error_message = {:?}", summary.error_message).map_err(CliError::Output)
    }
}

fn write_json<T: serde::Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)
        .map_err(|e| CliError::Output(e.into()))?;
    writeln!(out).map_err(CliError::Output)
}
