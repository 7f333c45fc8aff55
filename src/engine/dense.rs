//! Dense per-day tables and day resolution.

use tracing::debug;

use crate::domain::{DenseRecord, GrowthPhase, GrowthSample, Measure};
use crate::error::EngineError;

/// Expand a phase's sparse samples into one record per day in `[0, max_day]`.
///
/// Days that match a sample copy it unchanged. Other days interpolate weight and
/// length linearly between the nearest samples on either side and keep the
/// stage label of the sample before. Days past the last sample repeat it; days
/// before the first sample are skipped.
///
/// Consecutive samples must have strictly increasing days, otherwise the
/// interpolation interval would be empty.
pub fn build_dense_table(phase: &GrowthPhase) -> Result<Vec<DenseRecord>, EngineError> {
    check_sample_order(phase)?;

    let samples = phase.samples;
    let mut out = Vec::with_capacity(phase.max_day as usize + 1);

    // `next` is the index of the first sample with `sample.day >= day`.
    let mut next = 0usize;
    for day in 0..=phase.max_day {
        while next < samples.len() && samples[next].day < day {
            next += 1;
        }

        match samples.get(next) {
            Some(exact) if exact.day == day => out.push(DenseRecord::from(*exact)),
            after => {
                let before = next.checked_sub(1).map(|i| &samples[i]);
                match (before, after) {
                    (Some(before), Some(after)) => out.push(interpolate(before, after, day)),
                    (Some(before), None) => out.push(DenseRecord {
                        day,
                        ..DenseRecord::from(*before)
                    }),
                    (None, _) => {}
                }
            }
        }
    }

    debug!(phase = %phase.id, samples = samples.len(), rows = out.len(), "built dense table");
    Ok(out)
}

fn check_sample_order(phase: &GrowthPhase) -> Result<(), EngineError> {
    if phase.samples.is_empty() {
        return Err(EngineError::EmptyPhase { phase: phase.id });
    }
    for pair in phase.samples.windows(2) {
        let (prev, cur) = (pair[0].day, pair[1].day);
        if cur == prev {
            return Err(EngineError::DuplicateSampleDay { phase: phase.id, day: cur });
        }
        if cur < prev {
            return Err(EngineError::UnsortedSamples {
                phase: phase.id,
                prev_day: prev,
                day: cur,
            });
        }
    }
    Ok(())
}

fn interpolate(before: &GrowthSample, after: &GrowthSample, day: u32) -> DenseRecord {
    let ratio = f64::from(day - before.day) / f64::from(after.day - before.day);
    DenseRecord {
        day,
        weight: before.weight + ratio * (after.weight - before.weight),
        length: before.length + ratio * (after.length - before.length),
        stage: before.stage,
    }
}

/// Clamp `requested_day` to the phase range and return that day's record.
///
/// Falls back to the first record if the table has no row for the clamped day;
/// `None` only for an empty table.
pub fn resolve_day<'a>(
    table: &'a [DenseRecord],
    requested_day: i64,
    phase: &GrowthPhase,
) -> Option<&'a DenseRecord> {
    let day = clamp_day(requested_day, phase.max_day);
    table
        .get(day as usize)
        .filter(|r| r.day == day)
        .or_else(|| table.iter().find(|r| r.day == day))
        .or_else(|| table.first())
}

/// Clamp a possibly negative or oversized day into `[0, max_day]`.
pub fn clamp_day(day: i64, max_day: u32) -> u32 {
    // Lossless: the clamp keeps the value within u32 range.
    day.clamp(0, i64::from(max_day)) as u32
}

/// `(min, max)` of one measurement over a table (the chart's y domain).
pub fn value_domain(table: &[DenseRecord], measure: Measure) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for r in table {
        let v = measure.of(r);
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{catalog, phase};
    use crate::domain::{PhaseId, StageLabel};

    fn table(id: PhaseId) -> Vec<DenseRecord> {
        build_dense_table(phase(id)).unwrap()
    }

    #[test]
    fn dense_table_covers_every_day() {
        for p in catalog() {
            let t = build_dense_table(p).unwrap();
            assert_eq!(t.len(), p.max_day as usize + 1);
            for (i, r) in t.iter().enumerate() {
                assert_eq!(r.day as usize, i, "phase {} row {i}", p.id);
            }
        }
    }

    #[test]
    fn samples_are_copied_unchanged() {
        for p in catalog() {
            let t = build_dense_table(p).unwrap();
            for s in p.samples {
                assert_eq!(t[s.day as usize], DenseRecord::from(*s));
            }
        }
    }

    #[test]
    fn interpolated_rows_are_affine_and_bounded() {
        for p in catalog() {
            let t = build_dense_table(p).unwrap();
            for pair in p.samples.windows(2) {
                let (b, a) = (pair[0], pair[1]);
                let slope_w = (a.weight - b.weight) / f64::from(a.day - b.day);
                let slope_l = (a.length - b.length) / f64::from(a.day - b.day);
                for day in (b.day + 1)..a.day {
                    let r = t[day as usize];
                    let dx = f64::from(day - b.day);
                    assert!(r.weight >= b.weight - 1e-12 && r.weight <= a.weight + 1e-12);
                    assert!(r.length >= b.length - 1e-12 && r.length <= a.length + 1e-12);
                    assert!((r.weight - (b.weight + slope_w * dx)).abs() < 1e-9);
                    assert!((r.length - (b.length + slope_l * dx)).abs() < 1e-9);
                    assert_eq!(r.stage, b.stage, "phase {} day {day}", p.id);
                }
            }
        }
    }

    #[test]
    fn nursing_day_32_matches_hand_calculation() {
        let r = table(PhaseId::Nursing)[32];
        assert_eq!(r.day, 32);
        assert!((r.weight - 0.132).abs() < 1e-9, "weight {}", r.weight);
        assert!((r.length - 1.62).abs() < 1e-9, "length {}", r.length);
        assert_eq!(r.stage, StageLabel::Larvae);
    }

    #[test]
    fn fingerling1_day_5_interpolates_from_start() {
        let r = table(PhaseId::Fingerling1)[5];
        assert!((r.weight - 0.4).abs() < 1e-9);
        assert!((r.length - 1.1).abs() < 1e-9);
        assert_eq!(r.stage, StageLabel::Start);
    }

    #[test]
    fn label_switches_exactly_at_sample_day() {
        let t = table(PhaseId::Nursing);
        assert_eq!(t[34].stage, StageLabel::Larvae);
        assert_eq!(t[35].stage, StageLabel::LateLarvae);
        let t = table(PhaseId::Fingerling2);
        assert_eq!(t[149].stage, StageLabel::LargeFingerling);
        assert_eq!(t[150].stage, StageLabel::TableFish);
    }

    #[test]
    fn days_past_last_sample_repeat_it() {
        const SAMPLES: &[GrowthSample] = &[
            GrowthSample::new(0, 0.0, 0.0, StageLabel::Start),
            GrowthSample::new(2, 4.0, 2.0, StageLabel::Adult),
        ];
        let p = GrowthPhase {
            id: PhaseId::Nursing,
            title: "short",
            max_day: 4,
            samples: SAMPLES,
        };
        let t = build_dense_table(&p).unwrap();
        assert_eq!(t.len(), 5);
        assert_eq!(t[1].weight, 2.0);
        assert_eq!(
            t[4],
            DenseRecord {
                day: 4,
                weight: 4.0,
                length: 2.0,
                stage: StageLabel::Adult
            }
        );
    }

    #[test]
    fn days_before_first_sample_are_skipped() {
        const SAMPLES: &[GrowthSample] = &[
            GrowthSample::new(3, 1.0, 1.0, StageLabel::Start),
            GrowthSample::new(5, 3.0, 2.0, StageLabel::Start),
        ];
        let p = GrowthPhase {
            id: PhaseId::Nursing,
            title: "late start",
            max_day: 5,
            samples: SAMPLES,
        };
        let days: Vec<u32> = build_dense_table(&p).unwrap().iter().map(|r| r.day).collect();
        assert_eq!(days, vec![3, 4, 5]);
    }

    #[test]
    fn duplicate_sample_day_is_a_data_integrity_error() {
        const SAMPLES: &[GrowthSample] = &[
            GrowthSample::new(0, 0.0, 0.0, StageLabel::Start),
            GrowthSample::new(0, 1.0, 1.0, StageLabel::Start),
            GrowthSample::new(2, 2.0, 2.0, StageLabel::Start),
        ];
        let p = GrowthPhase {
            id: PhaseId::Fingerling1,
            title: "dup",
            max_day: 2,
            samples: SAMPLES,
        };
        assert_eq!(
            build_dense_table(&p),
            Err(EngineError::DuplicateSampleDay { phase: PhaseId::Fingerling1, day: 0 })
        );
    }

    #[test]
    fn unsorted_samples_are_a_data_integrity_error() {
        const SAMPLES: &[GrowthSample] = &[
            GrowthSample::new(0, 0.0, 0.0, StageLabel::Start),
            GrowthSample::new(6, 2.0, 2.0, StageLabel::Start),
            GrowthSample::new(4, 3.0, 3.0, StageLabel::Start),
        ];
        let p = GrowthPhase {
            id: PhaseId::Fingerling2,
            title: "unsorted",
            max_day: 6,
            samples: SAMPLES,
        };
        assert_eq!(
            build_dense_table(&p),
            Err(EngineError::UnsortedSamples {
                phase: PhaseId::Fingerling2,
                prev_day: 6,
                day: 4,
            })
        );
    }

    #[test]
    fn resolve_day_clamps_out_of_range_requests() {
        for id in PhaseId::ALL {
            let p = phase(id);
            let t = build_dense_table(p).unwrap();
            assert_eq!(resolve_day(&t, -5, p).unwrap().day, 0);
            assert_eq!(resolve_day(&t, i64::from(p.max_day) + 100, p).unwrap().day, p.max_day);
            assert_eq!(resolve_day(&t, 17, p).unwrap().day, 17);
        }
    }

    #[test]
    fn resolve_day_falls_back_to_first_record() {
        let p = phase(PhaseId::Nursing);
        let t = vec![DenseRecord::from(p.samples[0])];
        assert_eq!(resolve_day(&t, 40, p), Some(&t[0]));
        assert_eq!(resolve_day(&[], 40, p), None);
    }

    #[test]
    fn value_domain_spans_table() {
        let t = table(PhaseId::Fingerling2);
        assert_eq!(value_domain(&t, Measure::Weight), Some((0.0, 1895.0)));
        assert_eq!(value_domain(&t, Measure::Length), Some((0.0, 33.0)));
        assert_eq!(value_domain(&[], Measure::Weight), None);
    }
}
