//! Shared domain types.
//!
//! These types are kept small and serializable so they can be:
//!
//! - embedded in the static phase catalog (all catalog types are `const`-constructible)
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Key of one of the three catalog phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PhaseId {
    Nursing,
    Fingerling1,
    Fingerling2,
}

impl PhaseId {
    /// Catalog order.
    pub const ALL: [PhaseId; 3] = [PhaseId::Nursing, PhaseId::Fingerling1, PhaseId::Fingerling2];

    /// Stable string key (matches the serde/CLI spelling).
    pub fn key(self) -> &'static str {
        match self {
            PhaseId::Nursing => "nursing",
            PhaseId::Fingerling1 => "fingerling1",
            PhaseId::Fingerling2 => "fingerling2",
        }
    }

    /// Short human-readable name for settings lists.
    pub fn display_name(self) -> &'static str {
        match self {
            PhaseId::Nursing => "Nursing",
            PhaseId::Fingerling1 => "Small fingerling",
            PhaseId::Fingerling2 => "Second phase fingerling",
        }
    }

    pub fn index(self) -> usize {
        match self {
            PhaseId::Nursing => 0,
            PhaseId::Fingerling1 => 1,
            PhaseId::Fingerling2 => 2,
        }
    }

    /// Next phase in catalog order (wraps).
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous phase in catalog order (wraps).
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for PhaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Biological sub-stage attached to a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageLabel {
    #[serde(rename = "Yolk-sac larvae")]
    YolkSacLarvae,
    #[serde(rename = "Early larvae")]
    EarlyLarvae,
    #[serde(rename = "Larvae")]
    Larvae,
    #[serde(rename = "Late larvae")]
    LateLarvae,
    #[serde(rename = "Juvenile")]
    Juvenile,
    #[serde(rename = "Small fingerling")]
    SmallFingerling,
    #[serde(rename = "Fingerling")]
    Fingerling,
    #[serde(rename = "Large fingerling")]
    LargeFingerling,
    #[serde(rename = "Table fish")]
    TableFish,
    #[serde(rename = "Adult")]
    Adult,
    #[serde(rename = "Start")]
    Start,
}

impl StageLabel {
    pub const ALL: [StageLabel; 11] = [
        StageLabel::YolkSacLarvae,
        StageLabel::EarlyLarvae,
        StageLabel::Larvae,
        StageLabel::LateLarvae,
        StageLabel::Juvenile,
        StageLabel::SmallFingerling,
        StageLabel::Fingerling,
        StageLabel::LargeFingerling,
        StageLabel::TableFish,
        StageLabel::Adult,
        StageLabel::Start,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StageLabel::YolkSacLarvae => "Yolk-sac larvae",
            StageLabel::EarlyLarvae => "Early larvae",
            StageLabel::Larvae => "Larvae",
            StageLabel::LateLarvae => "Late larvae",
            StageLabel::Juvenile => "Juvenile",
            StageLabel::SmallFingerling => "Small fingerling",
            StageLabel::Fingerling => "Fingerling",
            StageLabel::LargeFingerling => "Large fingerling",
            StageLabel::TableFish => "Table fish",
            StageLabel::Adult => "Adult",
            StageLabel::Start => "Start",
        }
    }
}

impl fmt::Display for StageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StageLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.label() == s)
            .ok_or_else(|| format!("unknown stage label '{s}'"))
    }
}

/// A 24-bit display colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(format!("invalid colour '{s}' (expected #rrggbb)"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|e| format!("invalid colour '{s}': {e}"))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// A hardcoded, exact data point of a phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthSample {
    pub day: u32,
    /// Grams.
    pub weight: f64,
    /// Centimetres.
    pub length: f64,
    pub stage: StageLabel,
}

impl GrowthSample {
    pub const fn new(day: u32, weight: f64, length: f64, stage: StageLabel) -> Self {
        Self {
            day,
            weight,
            length,
            stage,
        }
    }
}

/// One of the fixed growth phases.
///
/// Samples are sorted strictly ascending by day, start at day 0 and end at
/// `max_day`. See `data::catalog::validate_phase`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthPhase {
    pub id: PhaseId,
    pub title: &'static str,
    /// Inclusive upper bound of valid days.
    pub max_day: u32,
    pub samples: &'static [GrowthSample],
}

impl GrowthPhase {
    /// Largest sample weight (0 for an empty phase).
    pub fn max_weight(&self) -> f64 {
        self.samples.iter().map(|s| s.weight).fold(0.0, f64::max)
    }

    /// Largest sample length (0 for an empty phase).
    pub fn max_length(&self) -> f64 {
        self.samples.iter().map(|s| s.length).fold(0.0, f64::max)
    }
}

/// One row of a dense per-day table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DenseRecord {
    pub day: u32,
    pub weight: f64,
    pub length: f64,
    pub stage: StageLabel,
}

impl From<GrowthSample> for DenseRecord {
    fn from(sample: GrowthSample) -> Self {
        Self {
            day: sample.day,
            weight: sample.weight,
            length: sample.length,
            stage: sample.stage,
        }
    }
}

/// Which measurement a chart or domain refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Weight,
    Length,
}

impl Measure {
    pub fn of(self, record: &DenseRecord) -> f64 {
        match self {
            Measure::Weight => record.weight,
            Measure::Length => record.length,
        }
    }

    /// Axis caption.
    pub fn axis_label(self) -> &'static str {
        match self {
            Measure::Weight => "Weight (grams)",
            Measure::Length => "Length (cm)",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Measure::Weight => "g",
            Measure::Length => "cm",
        }
    }
}

/// Weight-axis tick spacing.
///
/// `Auto` leaves tick placement to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightInterval {
    #[default]
    Auto,
    Grams(f64),
}

impl fmt::Display for WeightInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightInterval::Auto => f.write_str("Auto"),
            WeightInterval::Grams(g) => write!(f, "{g}g"),
        }
    }
}

impl FromStr for WeightInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(WeightInterval::Auto);
        }
        let number = trimmed.strip_suffix('g').unwrap_or(trimmed);
        let grams: f64 = number
            .parse()
            .map_err(|e| format!("invalid weight interval '{s}': {e}"))?;
        if !(grams.is_finite() && grams > 0.0) {
            return Err(format!("weight interval must be a positive number of grams, got '{s}'"));
        }
        Ok(WeightInterval::Grams(grams))
    }
}

/// Caller-held presentation settings.
///
/// This is the whole of the explorer's state; the engine itself is stateless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplorerConfig {
    pub phase: PhaseId,
    /// Always within `[0, max_day]` of `phase` once applied through `ExplorerState`.
    pub day: u32,
    /// Day-axis tick spacing.
    pub day_interval: u32,
    pub weight_interval: WeightInterval,
    pub show_grid: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            phase: PhaseId::Nursing,
            day: 30,
            day_interval: 5,
            weight_interval: WeightInterval::Auto,
            show_grid: true,
        }
    }
}

/// An exported dense table (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseTableFile {
    pub tool: String,
    pub exported_at: DateTime<Utc>,
    pub phase: PhaseId,
    pub title: String,
    pub max_day: u32,
    pub records: Vec<DenseRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_cycle_wraps_both_ways() {
        assert_eq!(PhaseId::Fingerling2.next(), PhaseId::Nursing);
        assert_eq!(PhaseId::Nursing.prev(), PhaseId::Fingerling2);
        assert_eq!(PhaseId::Nursing.next().next(), PhaseId::Fingerling2);
    }

    #[test]
    fn stage_label_parses_display_text() {
        assert_eq!("Table fish".parse::<StageLabel>(), Ok(StageLabel::TableFish));
        assert!("table fish".parse::<StageLabel>().is_err());
    }

    #[test]
    fn rgb_hex_parse_and_format() {
        let c: Rgb = "#26de81".parse().unwrap();
        assert_eq!(c, Rgb::new(0x26, 0xde, 0x81));
        assert_eq!(c.hex(), "#26de81");
        assert!("#26de8".parse::<Rgb>().is_err());
    }

    #[test]
    fn weight_interval_accepts_auto_and_grams() {
        assert_eq!("auto".parse::<WeightInterval>(), Ok(WeightInterval::Auto));
        assert_eq!("0.5".parse::<WeightInterval>(), Ok(WeightInterval::Grams(0.5)));
        assert_eq!("100g".parse::<WeightInterval>(), Ok(WeightInterval::Grams(100.0)));
        assert!("0".parse::<WeightInterval>().is_err());
        assert!("-2".parse::<WeightInterval>().is_err());
        assert_eq!(WeightInterval::Grams(0.2).to_string(), "0.2g");
    }
}
