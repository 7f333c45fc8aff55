//! Command-line parsing for the growth curve explorer.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! engine and the front ends. Every view setting can also come from the
//! environment (or a `.env` file loaded by `app::run`).

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::data::phase;
use crate::domain::{ExplorerConfig, PhaseId, WeightInterval};
use crate::engine::clamp_day;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "growth", version, about = "African catfish growth curve explorer")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the growth phases.
    Phases,
    /// Show weight, length and stage for one day of a phase.
    Day(ViewArgs),
    /// Print the dense per-day table of a phase, optionally exporting it.
    Table(TableArgs),
    /// Print the day- and weight-axis ticks for the current settings.
    Ticks(ViewArgs),
    /// Render ASCII weight and length charts.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// Running `growth` without a subcommand does the same.
    Tui(ViewArgs),
}

/// View settings shared by every phase-specific command.
#[derive(Debug, Args, Clone)]
pub struct ViewArgs {
    /// Growth phase.
    #[arg(short, long, value_enum, env = "GROWTH_PHASE", default_value_t = PhaseId::Nursing)]
    pub phase: PhaseId,

    /// Day to inspect (clamped to the phase range).
    #[arg(short, long, env = "GROWTH_DAY", default_value_t = 30, allow_negative_numbers = true)]
    pub day: i64,

    /// Day-axis tick interval.
    #[arg(long, env = "GROWTH_DAY_INTERVAL", default_value_t = 5)]
    pub day_interval: u32,

    /// Weight-axis tick interval in grams, or `auto`.
    #[arg(long, env = "GROWTH_WEIGHT_INTERVAL", default_value_t = WeightInterval::Auto)]
    pub weight_interval: WeightInterval,

    /// Hide chart gridlines.
    #[arg(long, env = "GROWTH_NO_GRID")]
    pub no_grid: bool,
}

impl ViewArgs {
    /// Settings as the explorer understands them (day already clamped).
    pub fn explorer_config(&self) -> ExplorerConfig {
        ExplorerConfig {
            phase: self.phase,
            day: clamp_day(self.day, phase(self.phase).max_day),
            day_interval: self.day_interval,
            weight_interval: self.weight_interval,
            show_grid: !self.no_grid,
        }
    }
}

/// Options for printing/exporting a dense table.
#[derive(Debug, Args, Clone)]
pub struct TableArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Only print every N-th day (exports always contain every day).
    #[arg(long, default_value_t = 1)]
    pub every: u32,

    /// Export the dense table to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,

    /// Export the dense table to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Options for ASCII plots.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Plot a table JSON produced by `growth table --export-json` instead of the catalog.
    #[arg(long, value_name = "JSON")]
    pub table: Option<PathBuf>,

    /// Plot width (columns, clamped to 10..=400).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows, clamped to 5..=200).
    #[arg(long, default_value_t = 18)]
    pub height: usize,
}
