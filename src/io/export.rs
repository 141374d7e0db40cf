//! Export the evaluated grid to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::path::Path;

use serde::Serialize;

use crate::domain::CorrectionParams;
use crate::error::AppError;
use crate::models::region_of;

#[derive(Debug, Serialize)]
struct Row {
    distance_km: f64,
    /// Empty when no region matches (NaN distance).
    region: Option<usize>,
    b: f64,
}

/// Write `distance_km,region,b` rows to a CSV file.
pub fn write_results_csv(
    path: &Path,
    params: &CorrectionParams,
    distances: &[f64],
    values: &[f64],
) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::input(format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    for (&r, &b) in distances.iter().zip(values) {
        let row = Row {
            distance_km: r,
            region: region_of(params, r).map(|reg| reg.number()),
            b,
        };
        writer
            .serialize(row)
            .map_err(|e| AppError::input(format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::input(format!("Failed to flush export CSV: {e}")))?;

    log::info!("wrote {} rows to {}", distances.len(), path.display());
    Ok(())
}
