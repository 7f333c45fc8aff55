//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs logging
//! - computes explorer views through the shared pipeline
//! - prints readouts/plots or launches the TUI
//! - writes optional exports

use clap::Parser;
use tracing::{debug, info};

use crate::cli::{Command, PlotArgs, TableArgs, ViewArgs};
use crate::domain::Measure;
use crate::error::AppError;

pub mod pipeline;
pub mod state;

/// Entry point for the `growth` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is normal; anything else in it is user configuration.
    let dotenv = dotenvy::dotenv();

    // We want `growth` and `growth -p fingerling2` to behave like `growth tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let level = match cli.command {
        // Anything written to stderr would corrupt the alternate screen.
        Command::Tui(_) => "off",
        _ => crate::logging::default_level(cli.verbose),
    };
    crate::logging::init(level);

    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(err) if err.not_found() => {}
        Err(err) => return Err(AppError::new(1, format!("Failed to load .env: {err}"))),
    }

    match cli.command {
        Command::Phases => handle_phases(),
        Command::Day(args) => handle_day(args),
        Command::Table(args) => handle_table(args),
        Command::Ticks(args) => handle_ticks(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_phases() -> Result<(), AppError> {
    println!("{}", crate::report::format_phase_list(crate::data::catalog()));
    Ok(())
}

fn handle_day(args: ViewArgs) -> Result<(), AppError> {
    if args.day < 0 || args.day > i64::from(crate::data::phase(args.phase).max_day) {
        info!(requested = args.day, phase = %args.phase, "day outside phase range; clamping");
    }
    let view = pipeline::run_view(&args.explorer_config())?;
    println!("{}", crate::report::format_day_summary(&view));
    Ok(())
}

fn handle_table(args: TableArgs) -> Result<(), AppError> {
    let view = pipeline::run_view(&args.view.explorer_config())?;
    println!("{}", crate::report::format_dense_table(&view, args.every));

    if let Some(path) = &args.export_csv {
        crate::io::export::write_table_csv(path, view.phase, &view.table)?;
        info!("Wrote dense table CSV: {}", path.display());
    }
    if let Some(path) = &args.export_json {
        crate::io::table::write_table_json(path, view.phase, &view.table)?;
        info!("Wrote dense table JSON: {}", path.display());
    }
    Ok(())
}

fn handle_ticks(args: ViewArgs) -> Result<(), AppError> {
    let view = pipeline::run_view(&args.explorer_config())?;
    println!("{}", crate::report::format_ticks(&view));
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    if let Some(path) = &args.table {
        let file = crate::io::table::read_table_json(path)?;
        let plot = crate::plot::render_table_file(&file, args.view.day, args.width, args.height);
        println!("{plot}");
        return Ok(());
    }

    let view = pipeline::run_view(&args.view.explorer_config())?;
    println!("{}", view.phase.title);
    for measure in [Measure::Weight, Measure::Length] {
        println!("{}", crate::plot::render_ascii_plot(&view, measure, args.width, args.height));
    }
    Ok(())
}

fn handle_tui(args: ViewArgs) -> Result<(), AppError> {
    crate::tui::run(args.explorer_config())
}

/// Rewrite argv so `growth` defaults to `growth tui`.
///
/// Rules:
/// - `growth`                          -> `growth tui`
/// - `growth -p fingerling2 ...`       -> `growth tui -p fingerling2 ...`
/// - `growth --help/--version/-h`      -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "phases" | "day" | "table" | "ticks" | "plot" | "tui"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_launches_tui() {
        assert_eq!(rewrite_args(args(&["growth"])), args(&["growth", "tui"]));
    }

    #[test]
    fn leading_flags_go_to_tui() {
        assert_eq!(
            rewrite_args(args(&["growth", "-p", "fingerling2"])),
            args(&["growth", "tui", "-p", "fingerling2"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        let plot = args(&["growth", "plot", "--day", "12"]);
        assert_eq!(rewrite_args(plot.clone()), plot);
        let help = args(&["growth", "--help"]);
        assert_eq!(rewrite_args(help.clone()), help);
    }
}
