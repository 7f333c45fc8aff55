//! Export dense tables to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts:
//! one row per day, full precision, stage labels as display text.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::{DenseRecord, GrowthPhase};
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    phase: &'a str,
    day: u32,
    weight_g: f64,
    length_cm: f64,
    stage: &'a str,
}

/// Write a dense table to a CSV file.
pub fn write_table_csv(path: &Path, phase: &GrowthPhase, table: &[DenseRecord]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_table_csv_to(file, phase, table)
}

/// Write a dense table as CSV to any writer.
pub fn write_table_csv_to<W: Write>(writer: W, phase: &GrowthPhase, table: &[DenseRecord]) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for r in table {
        wtr.serialize(CsvRow {
            phase: phase.id.key(),
            day: r.day,
            weight_g: r.weight,
            length_cm: r.length,
            stage: r.stage.label(),
        })
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }
    wtr.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::phase;
    use crate::domain::PhaseId;
    use crate::engine::build_dense_table;

    #[test]
    fn csv_has_header_and_one_row_per_day() {
        let p = phase(PhaseId::Nursing);
        let table = build_dense_table(p).unwrap();
        let mut buf = Vec::new();
        write_table_csv_to(&mut buf, p, &table).unwrap();

        let txt = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 62);
        assert_eq!(lines[0], "phase,day,weight_g,length_cm,stage");
        assert_eq!(lines[6], "nursing,5,0.002,0.4,Yolk-sac larvae");
        assert!(lines[61].starts_with("nursing,60,1.2,3.6,Juvenile"));
    }
}
