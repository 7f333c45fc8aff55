//! Caller-held explorer state.
//!
//! The engine is stateless; this is where the interactive front end keeps the
//! selected phase, day, intervals and grid flag. The only transition rule is that
//! the day is re-clamped whenever the phase changes (clamp only, no proportional
//! re-mapping).

use tracing::debug;

use crate::app::pipeline::{DenseTableCache, ExplorerView, compute_view};
use crate::data::phase;
use crate::domain::{ExplorerConfig, PhaseId, WeightInterval};
use crate::engine::{DAY_INTERVAL_OPTIONS, clamp_day, weight_interval_options};
use crate::error::AppError;

#[derive(Debug, Clone, Default)]
pub struct ExplorerState {
    config: ExplorerConfig,
    cache: DenseTableCache,
}

impl ExplorerState {
    pub fn new(config: ExplorerConfig) -> Self {
        let mut state = Self {
            config,
            cache: DenseTableCache::default(),
        };
        state.select_phase(config.phase);
        state
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn max_day(&self) -> u32 {
        phase(self.config.phase).max_day
    }

    /// Switch phase and clamp the selected day into the new range.
    pub fn select_phase(&mut self, id: PhaseId) {
        self.config.phase = id;
        self.config.day = self.config.day.min(self.max_day());
        debug!(phase = %id, day = self.config.day, "selected phase");
    }

    pub fn cycle_phase(&mut self, delta: i32) {
        let next = if delta >= 0 {
            self.config.phase.next()
        } else {
            self.config.phase.prev()
        };
        self.select_phase(next);
    }

    pub fn set_day(&mut self, day: i64) {
        self.config.day = clamp_day(day, self.max_day());
    }

    pub fn step_day(&mut self, delta: i64) {
        self.set_day(i64::from(self.config.day) + delta);
    }

    /// Move along `DAY_INTERVAL_OPTIONS`, stopping at either end.
    pub fn cycle_day_interval(&mut self, delta: i32) {
        let current = DAY_INTERVAL_OPTIONS
            .iter()
            .position(|&v| v == self.config.day_interval);
        let idx = match current {
            Some(i) => step_index(i, delta, DAY_INTERVAL_OPTIONS.len()),
            // Off-menu values (e.g. from the CLI) snap to the nearest larger option.
            None => DAY_INTERVAL_OPTIONS
                .iter()
                .position(|&v| v >= self.config.day_interval)
                .unwrap_or(DAY_INTERVAL_OPTIONS.len() - 1),
        };
        self.config.day_interval = DAY_INTERVAL_OPTIONS[idx];
    }

    /// Move along the current phase's weight-interval menu, stopping at either end.
    ///
    /// An interval that is not on the menu (left over from another phase) restarts
    /// from `Auto`.
    pub fn cycle_weight_interval(&mut self, delta: i32) {
        let options = weight_interval_options(phase(self.config.phase).max_weight());
        let idx = match options.iter().position(|&o| o == self.config.weight_interval) {
            Some(i) => step_index(i, delta, options.len()),
            None => 0,
        };
        self.config.weight_interval = options.get(idx).copied().unwrap_or(WeightInterval::Auto);
    }

    pub fn toggle_grid(&mut self) {
        self.config.show_grid = !self.config.show_grid;
    }

    pub fn view(&mut self) -> Result<ExplorerView, AppError> {
        compute_view(&self.config, &mut self.cache)
    }
}

fn step_index(i: usize, delta: i32, len: usize) -> usize {
    if delta >= 0 {
        (i + 1).min(len.saturating_sub(1))
    } else {
        i.saturating_sub(1)
    }
}
