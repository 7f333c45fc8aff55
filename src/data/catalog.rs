//! The fixed three-phase growth catalog (weights in grams, lengths in cm).
//!
//! Samples are exact observations; everything between them is interpolated by
//! `engine::build_dense_table`.

use crate::domain::{GrowthPhase, GrowthSample, PhaseId, StageLabel};
use crate::error::EngineError;

use StageLabel::*;

const NURSING_SAMPLES: &[GrowthSample] = &[
    GrowthSample::new(0, 0.0, 0.3, YolkSacLarvae),
    GrowthSample::new(5, 0.002, 0.4, YolkSacLarvae),
    GrowthSample::new(10, 0.005, 0.5, EarlyLarvae),
    GrowthSample::new(15, 0.012, 0.7, EarlyLarvae),
    GrowthSample::new(20, 0.025, 0.9, Larvae),
    GrowthSample::new(25, 0.05, 1.2, Larvae),
    GrowthSample::new(30, 0.1, 1.5, Larvae),
    GrowthSample::new(35, 0.18, 1.8, LateLarvae),
    GrowthSample::new(40, 0.32, 2.2, LateLarvae),
    GrowthSample::new(45, 0.52, 2.6, LateLarvae),
    GrowthSample::new(50, 0.75, 3.0, Juvenile),
    GrowthSample::new(55, 0.95, 3.3, Juvenile),
    GrowthSample::new(60, 1.2, 3.6, Juvenile),
];

const FINGERLING1_SAMPLES: &[GrowthSample] = &[
    GrowthSample::new(0, 0.0, 0.0, Start),
    GrowthSample::new(10, 0.8, 2.2, SmallFingerling),
    GrowthSample::new(20, 1.8, 2.8, SmallFingerling),
    GrowthSample::new(30, 3.2, 3.4, SmallFingerling),
    GrowthSample::new(35, 4.1, 3.7, SmallFingerling),
    GrowthSample::new(40, 5.2, 4.0, SmallFingerling),
    GrowthSample::new(45, 6.8, 4.4, SmallFingerling),
    GrowthSample::new(50, 8.5, 4.8, SmallFingerling),
    GrowthSample::new(55, 10.8, 5.2, SmallFingerling),
    GrowthSample::new(60, 13.5, 5.6, SmallFingerling),
    GrowthSample::new(65, 16.2, 6.0, SmallFingerling),
    GrowthSample::new(70, 19.5, 6.4, SmallFingerling),
    GrowthSample::new(75, 22.8, 6.8, SmallFingerling),
    GrowthSample::new(80, 26.0, 7.2, SmallFingerling),
];

const FINGERLING2_SAMPLES: &[GrowthSample] = &[
    GrowthSample::new(0, 0.0, 0.0, Start),
    GrowthSample::new(25, 15.0, 4.2, Fingerling),
    GrowthSample::new(50, 45.0, 6.8, Fingerling),
    GrowthSample::new(75, 95.0, 9.2, Fingerling),
    GrowthSample::new(100, 175.0, 11.8, LargeFingerling),
    GrowthSample::new(125, 285.0, 14.5, LargeFingerling),
    GrowthSample::new(150, 425.0, 17.2, TableFish),
    GrowthSample::new(175, 595.0, 19.8, TableFish),
    GrowthSample::new(200, 795.0, 22.5, TableFish),
    GrowthSample::new(225, 1025.0, 25.1, TableFish),
    GrowthSample::new(250, 1285.0, 27.8, TableFish),
    GrowthSample::new(275, 1575.0, 30.4, Adult),
    GrowthSample::new(300, 1895.0, 33.0, Adult),
];

static CATALOG: [GrowthPhase; 3] = [
    GrowthPhase {
        id: PhaseId::Nursing,
        title: "Figure 1: Nursing Phase (0-60 days)",
        max_day: 60,
        samples: NURSING_SAMPLES,
    },
    GrowthPhase {
        id: PhaseId::Fingerling1,
        title: "Figure 2: Small Fingerling Production (0-80 days)",
        max_day: 80,
        samples: FINGERLING1_SAMPLES,
    },
    GrowthPhase {
        id: PhaseId::Fingerling2,
        title: "Figure 3: Second Phase Fingerling (0-300 days)",
        max_day: 300,
        samples: FINGERLING2_SAMPLES,
    },
];

/// All phases in display order.
pub fn catalog() -> &'static [GrowthPhase; 3] {
    &CATALOG
}

/// Look up a phase by id.
pub fn phase(id: PhaseId) -> &'static GrowthPhase {
    &CATALOG[id.index()]
}

/// Check every catalog invariant for `phase`.
///
/// - at least one sample, the first at day 0 and the last at `max_day`
/// - days strictly ascending
/// - weight/length finite, non-negative and non-decreasing
pub fn validate_phase(phase: &GrowthPhase) -> Result<(), EngineError> {
    let id = phase.id;
    let (Some(first), Some(last)) = (phase.samples.first(), phase.samples.last()) else {
        return Err(EngineError::EmptyPhase { phase: id });
    };
    if first.day != 0 {
        return Err(EngineError::FirstSampleNotAtZero { phase: id, day: first.day });
    }

    for s in phase.samples {
        for (field, value) in [("weight", s.weight), ("length", s.length)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(EngineError::NegativeMeasurement { phase: id, field, day: s.day });
            }
        }
    }

    for pair in phase.samples.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        if cur.day == prev.day {
            return Err(EngineError::DuplicateSampleDay { phase: id, day: cur.day });
        }
        if cur.day < prev.day {
            return Err(EngineError::UnsortedSamples {
                phase: id,
                prev_day: prev.day,
                day: cur.day,
            });
        }
        for (field, a, b) in [
            ("weight", prev.weight, cur.weight),
            ("length", prev.length, cur.length),
        ] {
            if b < a {
                return Err(EngineError::NonMonotonicGrowth {
                    phase: id,
                    field,
                    prev_day: prev.day,
                    day: cur.day,
                });
            }
        }
    }

    if last.day != phase.max_day {
        return Err(EngineError::LastSampleNotAtMaxDay {
            phase: id,
            last_day: last.day,
            max_day: phase.max_day,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_phases_satisfy_invariants() {
        for p in catalog() {
            validate_phase(p).unwrap_or_else(|e| panic!("{e}"));
        }
    }

    #[test]
    fn catalog_order_and_ranges() {
        let days: Vec<_> = catalog().iter().map(|p| (p.id, p.max_day)).collect();
        assert_eq!(
            days,
            vec![
                (PhaseId::Nursing, 60),
                (PhaseId::Fingerling1, 80),
                (PhaseId::Fingerling2, 300),
            ]
        );
        for id in PhaseId::ALL {
            assert_eq!(phase(id).id, id);
        }
    }

    #[test]
    fn max_weight_per_phase() {
        assert!((phase(PhaseId::Nursing).max_weight() - 1.2).abs() < 1e-12);
        assert!((phase(PhaseId::Fingerling1).max_weight() - 26.0).abs() < 1e-12);
        assert!((phase(PhaseId::Fingerling2).max_weight() - 1895.0).abs() < 1e-12);
        assert!((phase(PhaseId::Fingerling2).max_length() - 33.0).abs() < 1e-12);
    }

    #[test]
    fn duplicate_day_is_reported() {
        const SAMPLES: &[GrowthSample] = &[
            GrowthSample::new(0, 0.0, 0.0, Start),
            GrowthSample::new(5, 1.0, 1.0, Start),
            GrowthSample::new(5, 2.0, 2.0, Adult),
            GrowthSample::new(10, 3.0, 3.0, Adult),
        ];
        let bad = GrowthPhase {
            id: PhaseId::Nursing,
            title: "bad",
            max_day: 10,
            samples: SAMPLES,
        };
        assert_eq!(
            validate_phase(&bad),
            Err(EngineError::DuplicateSampleDay { phase: PhaseId::Nursing, day: 5 })
        );
    }

    #[test]
    fn shrinking_length_is_reported() {
        const SAMPLES: &[GrowthSample] = &[
            GrowthSample::new(0, 0.0, 2.0, Start),
            GrowthSample::new(4, 1.0, 1.0, Start),
        ];
        let bad = GrowthPhase {
            id: PhaseId::Fingerling1,
            title: "bad",
            max_day: 4,
            samples: SAMPLES,
        };
        assert!(matches!(
            validate_phase(&bad),
            Err(EngineError::NonMonotonicGrowth { field: "length", prev_day: 0, day: 4, .. })
        ));
    }

    #[test]
    fn short_last_sample_is_reported() {
        const SAMPLES: &[GrowthSample] = &[GrowthSample::new(0, 0.0, 0.0, Start)];
        let bad = GrowthPhase {
            id: PhaseId::Fingerling2,
            title: "bad",
            max_day: 3,
            samples: SAMPLES,
        };
        assert_eq!(
            validate_phase(&bad),
            Err(EngineError::LastSampleNotAtMaxDay {
                phase: PhaseId::Fingerling2,
                last_day: 0,
                max_day: 3
            })
        );
    }
}
