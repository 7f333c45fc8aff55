//! Formatted terminal output: phase list, day readout, dense table, ticks.
//!
//! We keep formatting code in one place so:
//! - the engine stays free of presentation concerns
//! - output changes are localized (the tests below pin the exact text)

use crate::app::pipeline::ExplorerView;
use crate::domain::GrowthPhase;

/// Header shown above every readout.
pub const UNITS_LINE: &str = "Weight in GRAMS | Length in CM | Time in DAYS";

/// Weight as shown in readouts (`0.132g`).
pub fn fmt_weight(grams: f64) -> String {
    format!("{grams:.3}g")
}

/// Length as shown in readouts (`1.6cm`).
pub fn fmt_length(cm: f64) -> String {
    format!("{cm:.1}cm")
}

/// List the catalog phases.
pub fn format_phase_list(phases: &[GrowthPhase]) -> String {
    let mut out = String::new();
    out.push_str("=== African Catfish Growth Explorer ===\n");
    out.push_str(UNITS_LINE);
    out.push_str("\n\n");

    out.push_str(&format!("{:<12} {:<10} {:>10}  {}\n", "phase", "days", "max", "title"));
    out.push_str(&format!("{:-<12} {:-<10} {:->10}  {:-<5}\n", "", "", "", ""));
    for p in phases {
        out.push_str(&format!(
            "{:<12} {:<10} {:>10}  {}\n",
            p.id.key(),
            format!("0-{}", p.max_day),
            format!("{:.1}g", p.max_weight()),
            p.title
        ));
    }
    out.trim_end().to_string()
}

/// Summary readouts for the selected day.
pub fn format_day_summary(view: &ExplorerView) -> String {
    let r = &view.current;
    let mut out = String::new();
    out.push_str(&format!("{}\n", view.phase.title));
    out.push_str(&format!("Day: {} ({})\n", r.day, r.stage));
    out.push_str(&format!("  days   : {}\n", r.day));
    out.push_str(&format!("  weight : {}\n", fmt_weight(r.weight)));
    out.push_str(&format!("  length : {}\n", fmt_length(r.length)));
    out.push_str(&format!("  stage  : {} [{}]\n", r.stage, view.stage_color));
    out.push_str(&format!(
        "Max: {:.1}g | {} days total",
        view.max_weight, view.phase.max_day
    ));
    out
}

/// Dense table listing (every `every`-th day, plus the last day).
pub fn format_dense_table(view: &ExplorerView, every: u32) -> String {
    let every = every.max(1);
    let mut out = String::new();
    out.push_str(&format!("{}\n", view.phase.title));
    out.push_str(&format!("{:>5} {:>12} {:>10}  {}\n", "day", "weight_g", "length_cm", "stage"));
    out.push_str(&format!("{:->5} {:->12} {:->10}  {:-<5}\n", "", "", "", ""));

    let last = view.table.last().map(|r| r.day);
    for r in &view.table {
        if r.day % every != 0 && Some(r.day) != last {
            continue;
        }
        let marker = if r.day == view.current.day { " <" } else { "" };
        out.push_str(&format!(
            "{:>5} {:>12.3} {:>10.2}  {}{marker}\n",
            r.day, r.weight, r.length, r.stage
        ));
    }
    out.trim_end().to_string()
}

/// Axis ticks for the current settings.
pub fn format_ticks(view: &ExplorerView) -> String {
    let days: Vec<String> = view.day_ticks.iter().map(u32::to_string).collect();
    let weights = match &view.weight_ticks {
        None => "auto".to_string(),
        Some(ticks) => {
            let parts: Vec<String> = ticks.iter().map(|t| t.to_string()).collect();
            format!("[{}]", parts.join(", "))
        }
    };
    format!(
        "days (every {}): [{}]\nweight ({}): {}",
        view.config.day_interval,
        days.join(", "),
        view.config.weight_interval,
        weights
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_view;
    use crate::data::catalog;
    use crate::domain::{ExplorerConfig, PhaseId, WeightInterval};

    #[test]
    fn day_summary_nursing_day_32() {
        let view = run_view(&ExplorerConfig {
            day: 32,
            ..ExplorerConfig::default()
        })
        .unwrap();
        let expected = concat!(
            "Figure 1: Nursing Phase (0-60 days)\n",
            "Day: 32 (Larvae)\n",
            "  days   : 32\n",
            "  weight : 0.132g\n",
            "  length : 1.6cm\n",
            "  stage  : Larvae [#48dbfb]\n",
            "Max: 1.2g | 60 days total",
        );
        assert_eq!(format_day_summary(&view), expected);
    }

    #[test]
    fn phase_list_mentions_every_phase() {
        let txt = format_phase_list(catalog());
        assert!(txt.contains("nursing      0-60"));
        assert!(txt.contains("fingerling1  0-80"));
        assert!(txt.contains("1895.0g"));
        assert!(txt.contains("Figure 3: Second Phase Fingerling (0-300 days)"));
    }

    #[test]
    fn dense_table_respects_every_and_keeps_last_day() {
        let view = run_view(&ExplorerConfig {
            phase: PhaseId::Fingerling1,
            day: 5,
            ..ExplorerConfig::default()
        })
        .unwrap();
        let txt = format_dense_table(&view, 25);
        let rows: Vec<&str> = txt.lines().skip(3).collect();
        assert_eq!(rows.len(), 5, "{txt}");
        assert!(rows[0].trim_start().starts_with("0 "));
        assert!(rows[4].trim_start().starts_with("80 "));
        assert!(rows[4].contains("26.000"));
    }

    #[test]
    fn dense_table_marks_current_day() {
        let view = run_view(&ExplorerConfig {
            phase: PhaseId::Fingerling1,
            day: 5,
            ..ExplorerConfig::default()
        })
        .unwrap();
        let txt = format_dense_table(&view, 1);
        let row = txt.lines().find(|l| l.ends_with(" <")).unwrap();
        assert_eq!(row, "    5        0.400       1.10  Start <");
    }

    #[test]
    fn ticks_output() {
        let view = run_view(&ExplorerConfig {
            day_interval: 25,
            weight_interval: WeightInterval::Grams(0.5),
            ..ExplorerConfig::default()
        })
        .unwrap();
        assert_eq!(
            format_ticks(&view),
            "days (every 25): [0, 25, 50, 60]\nweight (0.5g): [0, 0.5, 1]"
        );
    }
}
