//! Piecewise log-linear evaluation of B(R).
//!
//! Each region `i` uses `B = a_i·log10(R) + b_i`. Region membership is decided by
//! four independent masks with inclusive upper bounds:
//!
//! - region 1: `R ≤ l1`
//! - region 2: `l1 < R ≤ l2`
//! - region 3: `l2 < R ≤ l3`
//! - region 4: `R > l3`
//!
//! With `l1 < l2 < l3` exactly one mask matches every positive distance. With
//! non-monotonic breakpoints masks may overlap (the later region wins) or leave
//! gaps; a distance no mask matches (NaN) evaluates to `0.0`.
//!
//! There is no validation of `R`: `R = 0` produces `a1·(-inf) + b1` and `R < 0`
//! produces NaN, straight from `log10`.

use crate::domain::{CorrectionParams, Region};

/// Region of `r`, or `None` if no mask matches.
pub fn region_of(params: &CorrectionParams, r: f64) -> Option<Region> {
    let bp = params.breakpoints;
    if r > bp.l3 {
        Some(Region::Teleseismic)
    } else if r > bp.l2 && r <= bp.l3 {
        Some(Region::Far)
    } else if r > bp.l1 && r <= bp.l2 {
        Some(Region::Intermediate)
    } else if r <= bp.l1 {
        Some(Region::Near)
    } else {
        None
    }
}

/// Evaluate `B(r)` for a single distance.
pub fn evaluate_one(params: &CorrectionParams, r: f64) -> f64 {
    match region_of(params, r) {
        Some(region) => params.coefficients.get(region).eval(r),
        None => 0.0,
    }
}

/// Evaluate `B` for every distance. The output has the same length as the input.
pub fn evaluate(params: &CorrectionParams, distances: &[f64]) -> Vec<f64> {
    distances.iter().map(|&r| evaluate_one(params, r)).collect()
}

/// Region of every distance (parallel to `distances`).
pub fn classify(params: &CorrectionParams, distances: &[f64]) -> Vec<Option<Region>> {
    distances.iter().map(|&r| region_of(params, r)).collect()
}

/// Number of distances falling in each region, in `Region::ALL` order.
pub fn region_counts(params: &CorrectionParams, distances: &[f64]) -> [usize; 4] {
    let mut counts = [0usize; 4];
    for region in classify(params, distances).into_iter().flatten() {
        counts[region.number() - 1] += 1;
    }
    counts
}

/// Left/right limits of B at one breakpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryJump {
    pub breakpoint_km: f64,
    /// Value of the lower region's formula at the breakpoint (this is `B(l)`).
    pub left: f64,
    /// Limit of the upper region's formula as `R → l⁺`.
    pub right: f64,
}

impl BoundaryJump {
    pub fn jump(&self) -> f64 {
        self.right - self.left
    }

    pub fn is_continuous(&self, tol: f64) -> bool {
        self.jump().abs() <= tol
    }
}

/// Jumps at `l1`, `l2`, `l3`.
///
/// Coefficients are independent per region, so B is generally discontinuous at
/// the breakpoints.
pub fn boundary_jumps(params: &CorrectionParams) -> [BoundaryJump; 3] {
    let c = params.coefficients;
    let bp = params.breakpoints.as_array();
    let pairs = [
        (c.near, c.intermediate),
        (c.intermediate, c.far),
        (c.far, c.teleseismic),
    ];

    std::array::from_fn(|i| {
        let (lower, upper) = pairs[i];
        BoundaryJump {
            breakpoint_km: bp[i],
            left: lower.eval(bp[i]),
            right: upper.eval(bp[i]),
        }
    })
}
