//! Read/write dense-table JSON files.
//!
//! Table JSON is the "portable" representation of one phase:
//! - phase id, title and day range
//! - every dense record (day, weight, length, stage)
//! - export timestamp
//!
//! The schema is defined by `domain::DenseTableFile`.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use chrono::Utc;

use crate::domain::{DenseRecord, DenseTableFile, GrowthPhase};
use crate::error::AppError;

/// Build the serializable form of a dense table.
pub fn table_file(phase: &GrowthPhase, table: &[DenseRecord]) -> DenseTableFile {
    DenseTableFile {
        tool: "growth".to_string(),
        exported_at: Utc::now(),
        phase: phase.id,
        title: phase.title.to_string(),
        max_day: phase.max_day,
        records: table.to_vec(),
    }
}

/// Write a table JSON file.
pub fn write_table_json(path: &Path, phase: &GrowthPhase, table: &[DenseRecord]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create table JSON '{}': {e}", path.display())))?;
    write_table_json_to(file, &table_file(phase, table))
}

pub fn write_table_json_to<W: Write>(writer: W, file: &DenseTableFile) -> Result<(), AppError> {
    serde_json::to_writer_pretty(writer, file)
        .map_err(|e| AppError::new(2, format!("Failed to write table JSON: {e}")))
}

/// Read a table JSON file.
pub fn read_table_json(path: &Path) -> Result<DenseTableFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open table JSON '{}': {e}", path.display())))?;
    read_table_json_from(file)
}

pub fn read_table_json_from<R: Read>(reader: R) -> Result<DenseTableFile, AppError> {
    let file: DenseTableFile =
        serde_json::from_reader(reader).map_err(|e| AppError::new(2, format!("Invalid table JSON: {e}")))?;
    if file.records.is_empty() {
        return Err(AppError::new(2, "Table JSON has no records."));
    }
    check_records(&file)?;
    Ok(file)
}

/// Records must be finite, strictly ascending by day and within `0..=max_day`.
fn check_records(file: &DenseTableFile) -> Result<(), AppError> {
    let mut prev: Option<u32> = None;
    for r in &file.records {
        if r.day > file.max_day {
            return Err(AppError::new(
                2,
                format!("Table JSON record at day {} is past max_day {}.", r.day, file.max_day),
            ));
        }
        if let Some(p) = prev {
            if r.day <= p {
                return Err(AppError::new(
                    2,
                    format!("Table JSON records are not ascending: day {} follows day {p}.", r.day),
                ));
            }
        }
        if !(r.weight.is_finite() && r.length.is_finite()) {
            return Err(AppError::new(2, format!("Table JSON record at day {} is not finite.", r.day)));
        }
        prev = Some(r.day);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::phase;
    use crate::domain::{PhaseId, StageLabel};
    use crate::engine::build_dense_table;

    #[test]
    fn json_uses_stage_text_and_phase_key() {
        let p = phase(PhaseId::Fingerling2);
        let table = build_dense_table(p).unwrap();
        let mut buf = Vec::new();
        write_table_json_to(&mut buf, &table_file(p, &table)).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["tool"], "growth");
        assert_eq!(value["phase"], "fingerling2");
        assert_eq!(value["max_day"], 300);
        assert_eq!(value["records"].as_array().unwrap().len(), 301);
        assert_eq!(value["records"][150]["stage"], "Table fish");

        let back = read_table_json_from(buf.as_slice()).unwrap();
        assert_eq!(back.records[275].stage, StageLabel::Adult);
    }

    #[test]
    fn empty_table_is_rejected() {
        let json = r#"{"tool":"growth","exported_at":"2025-01-01T00:00:00Z","phase":"nursing","title":"t","max_day":0,"records":[]}"#;
        let err = read_table_json_from(json.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    fn table_json(max_day: u32, days: &[u32]) -> String {
        let records: Vec<String> = days
            .iter()
            .map(|d| format!(r#"{{"day":{d},"weight":1.0,"length":1.0,"stage":"Start"}}"#))
            .collect();
        format!(
            r#"{{"tool":"growth","exported_at":"2025-01-01T00:00:00Z","phase":"nursing","title":"t","max_day":{max_day},"records":[{}]}}"#,
            records.join(",")
        )
    }

    #[test]
    fn records_must_fit_max_day_and_ascend() {
        assert!(read_table_json_from(table_json(2, &[0, 1, 2]).as_bytes()).is_ok());

        let past_end = read_table_json_from(table_json(2, &[0, 1, 5]).as_bytes()).unwrap_err();
        assert_eq!(past_end.exit_code(), 2);
        assert!(past_end.to_string().contains("past max_day"));

        let unsorted = read_table_json_from(table_json(2, &[0, 2, 1]).as_bytes()).unwrap_err();
        assert!(unsorted.to_string().contains("not ascending"));

        let repeated = read_table_json_from(table_json(2, &[0, 1, 1]).as_bytes()).unwrap_err();
        assert_eq!(repeated.exit_code(), 2);
    }
}
