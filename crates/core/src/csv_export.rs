//! CSV export for measurements
//!
//! Provides functionality to export takeoff measurements to CSV format for
//! reporting and spreadsheet integration.

use crate::measurement::Measurement;
use std::io::Write;

/// Error types for CSV export
#[derive(Debug, thiserror::Error)]
pub enum CsvExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),
}

pub type CsvExportResult<T> = Result<T, CsvExportError>;

/// Configuration for CSV export
#[derive(Debug, Clone)]
pub struct CsvExportConfig {
    /// Include column headers in the output
    pub include_headers: bool,

    /// CSV delimiter character
    pub delimiter: u8,
}

impl Default for CsvExportConfig {
    fn default() -> Self {
        Self { include_headers: true, delimiter: b',' }
    }
}

/// Export measurements to CSV format
///
/// CSV columns:
/// - ID: unique measurement identifier
/// - Plan: owning plan identifier
/// - Type: measurement kind (Length or Area)
/// - Label: user-provided label
/// - Value: real-world magnitude, two decimal places
/// - Unit: display unit derived from the kind
/// - Points: semicolon-separated `x,y` pixel coordinates
pub fn export_measurements_csv<W: Write>(
    writer: W,
    measurements: &[&Measurement],
    config: &CsvExportConfig,
) -> CsvExportResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(config.include_headers)
        .from_writer(writer);

    if config.include_headers {
        csv_writer.write_record(["ID", "Plan", "Type", "Label", "Value", "Unit", "Points"])?;
    }

    for measurement in measurements {
        let points = measurement
            .points()
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(";");

        csv_writer.write_record([
            measurement.id().to_string(),
            measurement.plan_id().to_string(),
            format!("{:?}", measurement.kind()),
            measurement.label().to_string(),
            format!("{:.2}", measurement.value()),
            measurement.unit().to_string(),
            points,
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
