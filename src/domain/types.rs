//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during evaluation and rendering
//! - exported to JSON/CSV
//! - reloaded later for a terminal preview

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Default PNG destination, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "./K_Class/descriptions/B_R_plot.png";

/// Export resolution in dots per inch.
pub const DEFAULT_DPI: u32 = 300;

/// Figure size in inches (width, height).
pub const FIGURE_SIZE_IN: (f64, f64) = (10.0, 6.0);

/// Distance thresholds (km) separating the four correction regions.
///
/// The regions are `(0, l1]`, `(l1, l2]`, `(l2, l3]` and `(l3, ∞)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoints {
    pub l1: f64,
    pub l2: f64,
    pub l3: f64,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            l1: 75.0,
            l2: 264.0,
            l3: 800.0,
        }
    }
}

impl Breakpoints {
    pub fn as_array(&self) -> [f64; 3] {
        [self.l1, self.l2, self.l3]
    }

    /// `true` when `l1 < l2 < l3`, i.e. every region is non-empty and no two overlap.
    pub fn is_monotonic(&self) -> bool {
        self.l1 < self.l2 && self.l2 < self.l3
    }
}

/// One region's model: `B = a·log10(R) + b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogLinear {
    pub a: f64,
    pub b: f64,
}

impl LogLinear {
    pub const fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    pub fn eval(&self, r: f64) -> f64 {
        self.a * r.log10() + self.b
    }
}

/// The four correction regions, nearest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Near,
    Intermediate,
    Far,
    Teleseismic,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::Near,
        Region::Intermediate,
        Region::Far,
        Region::Teleseismic,
    ];

    /// 1-based region number as used in exports and reports.
    pub fn number(self) -> usize {
        match self {
            Region::Near => 1,
            Region::Intermediate => 2,
            Region::Far => 3,
            Region::Teleseismic => 4,
        }
    }
}

/// Per-region coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub near: LogLinear,
    pub intermediate: LogLinear,
    pub far: LogLinear,
    pub teleseismic: LogLinear,
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            near: LogLinear::new(2.11, 1.32),
            intermediate: LogLinear::new(1.1, 3.21),
            far: LogLinear::new(2.98, -1.34),
            teleseismic: LogLinear::new(0.0, 8.0),
        }
    }
}

impl Coefficients {
    pub fn get(&self, region: Region) -> LogLinear {
        match region {
            Region::Near => self.near,
            Region::Intermediate => self.intermediate,
            Region::Far => self.far,
            Region::Teleseismic => self.teleseismic,
        }
    }
}

/// The full parameter set of B(R): 3 breakpoints and 8 coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CorrectionParams {
    pub breakpoints: Breakpoints,
    pub coefficients: Coefficients,
}

/// How distances are spread between `r_min` and `r_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    /// Evenly spaced in km (endpoint inclusive).
    Linear,
    /// Evenly spaced in log10(km) (endpoint inclusive).
    Log,
}

/// Distance grid definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    pub r_min: f64,
    pub r_max: f64,
    pub num_points: usize,
    pub spacing: Spacing,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            r_min: 1.0,
            r_max: 1000.0,
            num_points: 1000,
            spacing: Spacing::Linear,
        }
    }
}

/// PNG export settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub output: PathBuf,
    pub dpi: u32,
    pub size_in: (f64, f64),
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            dpi: DEFAULT_DPI,
            size_in: FIGURE_SIZE_IN,
        }
    }
}

impl ChartConfig {
    /// Pixel dimensions of the exported image.
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = self.dpi.max(1) as f64;
        let w = (self.size_in.0 * dpi).round().max(1.0) as u32;
        let h = (self.size_in.1 * dpi).round().max(1.0) as u32;
        (w, h)
    }

    /// Convert a font size in points to pixels at the configured DPI.
    pub fn pt_to_px(&self, pt: f64) -> f64 {
        pt * self.dpi.max(1) as f64 / 72.0
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub params: CorrectionParams,
    pub sampling: SamplingConfig,
    pub chart: ChartConfig,

    pub preview: bool,
    pub preview_width: usize,
    pub preview_height: usize,

    pub export_csv: Option<PathBuf>,
    pub export_curve: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            params: CorrectionParams::default(),
            sampling: SamplingConfig::default(),
            chart: ChartConfig::default(),
            preview: true,
            preview_width: 100,
            preview_height: 25,
            export_csv: None,
            export_curve: None,
        }
    }
}

/// A saved curve file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub params: CorrectionParams,
    pub grid: CurveGrid,
}

/// Evaluated grid. JSON has no NaN/inf, so non-finite values are stored as `null`
/// and read back as NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveGrid {
    #[serde(with = "nullable_f64")]
    pub distance_km: Vec<f64>,
    #[serde(with = "nullable_f64")]
    pub b: Vec<f64>,
}

mod nullable_f64 {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        values
            .iter()
            .map(|v| v.is_finite().then_some(*v))
            .collect::<Vec<Option<f64>>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        let values = Vec::<Option<f64>>::deserialize(deserializer)?;
        Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chart_is_ten_by_six_inches_at_300_dpi() {
        let chart = ChartConfig::default();
        assert_eq!(chart.pixel_size(), (3000, 1800));
        assert!((chart.pt_to_px(12.0) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn default_breakpoints_are_monotonic() {
        assert!(Breakpoints::default().is_monotonic());
        let bad = Breakpoints {
            l1: 300.0,
            l2: 264.0,
            l3: 800.0,
        };
        assert!(!bad.is_monotonic());
    }

    #[test]
    fn non_finite_grid_values_round_trip_as_nan() {
        let grid = CurveGrid {
            distance_km: vec![0.0, 1.0],
            b: vec![f64::NEG_INFINITY, 1.32],
        };
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, r#"{"distance_km":[0.0,1.0],"b":[null,1.32]}"#);

        let back: CurveGrid = serde_json::from_str(&json).unwrap();
        assert!(back.b[0].is_nan());
        assert_eq!(back.b[1], 1.32);
    }

    #[test]
    fn region_numbers_are_one_based() {
        let numbers: Vec<usize> = Region::ALL.iter().map(|r| r.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }
}
