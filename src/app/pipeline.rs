//! Shared "view pipeline" used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! settings -> phase lookup -> dense table -> resolved day -> ticks/domains
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use std::collections::HashMap;

use tracing::debug;

use crate::data::{phase, validate_phase};
use crate::domain::{DenseRecord, ExplorerConfig, GrowthPhase, Measure, PhaseId, Rgb};
use crate::engine::{build_axis_ticks, build_dense_table, build_weight_ticks, resolve_day, value_domain};
use crate::error::{AppError, EngineError};

/// Dense tables memoised by phase.
///
/// Tables are pure functions of the static catalog, so entries never go stale.
#[derive(Debug, Clone, Default)]
pub struct DenseTableCache {
    tables: HashMap<PhaseId, Vec<DenseRecord>>,
}

impl DenseTableCache {
    /// Validate and build `phase`'s table on first use.
    pub fn get_or_build(&mut self, phase: &GrowthPhase) -> Result<&[DenseRecord], EngineError> {
        if !self.tables.contains_key(&phase.id) {
            validate_phase(phase)?;
            let table = build_dense_table(phase)?;
            self.tables.insert(phase.id, table);
        }
        Ok(self.tables.get(&phase.id).map(Vec::as_slice).unwrap_or_default())
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Everything a front end needs to draw one state of the explorer.
#[derive(Debug, Clone)]
pub struct ExplorerView {
    pub config: ExplorerConfig,
    pub phase: &'static GrowthPhase,
    pub table: Vec<DenseRecord>,
    /// Record for the selected (clamped) day.
    pub current: DenseRecord,
    pub stage_color: Rgb,
    pub day_ticks: Vec<u32>,
    /// `None` means the renderer picks weight ticks itself.
    pub weight_ticks: Option<Vec<f64>>,
    pub max_weight: f64,
    pub weight_domain: (f64, f64),
    pub length_domain: (f64, f64),
}

/// Compute a view using a caller-owned cache.
pub fn compute_view(config: &ExplorerConfig, cache: &mut DenseTableCache) -> Result<ExplorerView, AppError> {
    let phase = phase(config.phase);
    let table = cache.get_or_build(phase)?.to_vec();

    let current = *resolve_day(&table, i64::from(config.day), phase)
        .ok_or_else(|| AppError::new(3, format!("Phase '{}' produced an empty table.", phase.id)))?;

    let max_weight = phase.max_weight();
    let view = ExplorerView {
        config: ExplorerConfig {
            day: current.day,
            ..*config
        },
        phase,
        current,
        stage_color: current.stage.color(),
        day_ticks: build_axis_ticks(phase.max_day, config.day_interval),
        weight_ticks: build_weight_ticks(max_weight, config.weight_interval),
        max_weight,
        weight_domain: value_domain(&table, Measure::Weight).unwrap_or((0.0, 1.0)),
        length_domain: value_domain(&table, Measure::Length).unwrap_or((0.0, 1.0)),
        table,
    };

    debug!(
        phase = %view.phase.id,
        day = view.current.day,
        stage = %view.current.stage,
        "computed explorer view"
    );
    Ok(view)
}

/// One-shot view without a long-lived cache (CLI commands).
pub fn run_view(config: &ExplorerConfig) -> Result<ExplorerView, AppError> {
    compute_view(config, &mut DenseTableCache::default())
}
