//! Axis tick generation and the interval menus offered to the user.

use crate::domain::WeightInterval;

/// Day-axis intervals offered by the explorer.
pub const DAY_INTERVAL_OPTIONS: [u32; 7] = [1, 2, 5, 10, 20, 25, 50];

/// Day-axis ticks: multiples of `interval` up to `max_day`, always ending on
/// `max_day` itself.
///
/// An interval of 0 is treated as 1.
pub fn build_axis_ticks(max_day: u32, interval: u32) -> Vec<u32> {
    let step = interval.max(1) as usize;
    let mut ticks: Vec<u32> = (0..=max_day).step_by(step).collect();
    if ticks.last() != Some(&max_day) {
        ticks.push(max_day);
    }
    ticks
}

/// Upper bound on generated weight ticks; finer intervals produce no ticks.
pub const MAX_WEIGHT_TICKS: usize = 10_000;

/// Weight-axis ticks, or `None` when the renderer should pick them.
///
/// Ticks are accumulated (`0, i, i+i, ...`) while `<= max_weight` and each one is
/// rounded to 3 decimals to hide accumulation error. An interval that would
/// need more than [`MAX_WEIGHT_TICKS`] ticks yields an empty list.
pub fn build_weight_ticks(max_weight: f64, interval: WeightInterval) -> Option<Vec<f64>> {
    let WeightInterval::Grams(step) = interval else {
        return None;
    };
    if !(step.is_finite() && step > 0.0) || !max_weight.is_finite() {
        return Some(Vec::new());
    }
    let needed = (max_weight / step).floor() + 1.0;
    if !needed.is_finite() || needed > MAX_WEIGHT_TICKS as f64 {
        return Some(Vec::new());
    }

    let mut ticks = Vec::new();
    let mut value = 0.0_f64;
    while value <= max_weight && ticks.len() <= MAX_WEIGHT_TICKS {
        ticks.push(round3(value));
        value += step;
    }
    Some(ticks)
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Weight intervals that make sense for a phase whose heaviest sample is
/// `max_weight` grams. `Auto` is always first.
pub fn weight_interval_options(max_weight: f64) -> Vec<WeightInterval> {
    let grams: &[f64] = if max_weight <= 2.0 {
        &[0.1, 0.2, 0.5]
    } else if max_weight <= 30.0 {
        &[1.0, 2.0, 5.0]
    } else {
        &[50.0, 100.0, 200.0, 500.0]
    };

    std::iter::once(WeightInterval::Auto)
        .chain(grams.iter().map(|&g| WeightInterval::Grams(g)))
        .collect()
}
