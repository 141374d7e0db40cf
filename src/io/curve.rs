//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of an evaluated B(R):
//! - the full parameter set (breakpoints + coefficients)
//! - generation timestamp
//! - the evaluated grid, for previews without re-evaluating
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::Utc;

use crate::domain::{CorrectionParams, CurveFile, CurveGrid};
use crate::error::AppError;

/// Write a curve JSON file.
pub fn write_curve_json(
    path: &Path,
    params: &CorrectionParams,
    distances: &[f64],
    values: &[f64],
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::input(format!("Failed to create curve JSON '{}': {e}", path.display()))
    })?;

    let curve = CurveFile {
        tool: "bcurve".to_string(),
        generated_at: Utc::now(),
        params: *params,
        grid: CurveGrid {
            distance_km: distances.to_vec(),
            b: values.to_vec(),
        },
    };

    serde_json::to_writer_pretty(BufWriter::new(file), &curve)
        .map_err(|e| AppError::input(format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!("Failed to open curve JSON '{}': {e}", path.display()))
    })?;
    let curve: CurveFile = serde_json::from_reader(file)
        .map_err(|e| AppError::input(format!("Invalid curve JSON: {e}")))?;

    if curve.grid.distance_km.len() != curve.grid.b.len() {
        return Err(AppError::input(format!(
            "Invalid curve JSON: {} distances but {} B values.",
            curve.grid.distance_km.len(),
            curve.grid.b.len()
        )));
    }
    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::linspace;
    use crate::models::evaluate;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("kclass-bcurve-{}-{name}", std::process::id()))
    }

    #[test]
    fn write_then_read_preserves_params_and_grid() {
        let path = temp_path("curve.json");
        let params = CorrectionParams::default();
        let r = linspace(1.0, 1000.0, 25);
        let b = evaluate(&params, &r);

        write_curve_json(&path, &params, &r, &b).unwrap();
        let curve = read_curve_json(&path).unwrap();

        assert_eq!(curve.tool, "bcurve");
        assert_eq!(curve.params, params);
        assert_eq!(curve.grid.distance_km, r);
        assert_eq!(curve.grid.b, b);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn mismatched_grid_is_rejected() {
        let path = temp_path("bad-curve.json");
        let json = serde_json::json!({
            "tool": "bcurve",
            "generated_at": "2024-01-01T00:00:00Z",
            "params": CorrectionParams::default(),
            "grid": { "distance_km": [1.0, 2.0], "b": [1.0] }
        });
        std::fs::write(&path, json.to_string()).unwrap();

        let err = read_curve_json(&path).unwrap_err();
        assert!(err.message().contains("2 distances but 1 B values"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let err = read_curve_json(&temp_path("does-not-exist.json")).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }
}
