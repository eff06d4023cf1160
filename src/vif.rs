//! Variance-inflation-factor collinearity check.
//!
//! Each candidate column is regressed on all the other candidates; the score
//! 1/(1-R²) of that auxiliary regression measures how much of the column is
//! already explained by the rest. Scores are always at least 1; a column
//! perfectly explained by the others scores infinite.

use crate::error::Result;
use crate::table::Table;
use ndarray::{Array1, Array2, Axis};
use ndarray_linalg::SolveH;

/// Columns scoring above this are reported as highly collinear.
pub const VIF_THRESHOLD: f64 = 5.0;

/// Per-column scores and the set of flagged columns, aligned with the input
/// candidate list.
#[derive(Debug, Clone)]
pub struct Collinearity {
    pub names: Vec<String>,
    pub scores: Vec<f64>,
    pub flagged: Vec<String>,
}

/// Compute the variance inflation factor of every candidate column. Pure
/// function of the table and the candidate list; which columns take part
/// determines the scores, not their order.
pub fn variance_inflation_factors(table: &Table, candidates: &[String]) -> Result<Vec<f64>> {
    let design = table.select(candidates)?;
    let mut scores = Vec::with_capacity(candidates.len());
    for idx in 0..candidates.len() {
        scores.push(single_vif(&design, idx));
    }
    Ok(scores)
}

/// Score every candidate and flag the ones above the threshold.
pub fn check(table: &Table, candidates: &[String]) -> Result<Collinearity> {
    let scores = variance_inflation_factors(table, candidates)?;
    let flagged = candidates
        .iter()
        .zip(scores.iter())
        .filter(|(_, &score)| score > VIF_THRESHOLD)
        .map(|(name, _)| name.clone())
        .collect();
    Ok(Collinearity {
        names: candidates.to_vec(),
        scores,
        flagged,
    })
}

/// VIF of one column of the design against the others, via an auxiliary OLS
/// regression with an intercept. A singular auxiliary system or a constant
/// target column both mean the column carries no independent variation, which
/// is reported as an infinite score.
fn single_vif(design: &Array2<f64>, target: usize) -> f64 {
    let n_rows = design.nrows();
    let y: Array1<f64> = design.index_axis(Axis(1), target).to_owned();
    // intercept plus every column except the target
    let mut x = Array2::<f64>::ones((n_rows, design.ncols()));
    let mut j_out = 1;
    for j in 0..design.ncols() {
        if j == target {
            continue;
        }
        x.index_axis_mut(Axis(1), j_out)
            .assign(&design.index_axis(Axis(1), j));
        j_out += 1;
    }

    let y_mean = y.mean().unwrap_or(0.0);
    let tss: f64 = y.mapv(|v| (v - y_mean) * (v - y_mean)).sum();
    if tss == 0.0 {
        return f64::INFINITY;
    }

    let xtx: Array2<f64> = x.t().dot(&x);
    let xty: Array1<f64> = x.t().dot(&y);
    let beta = match xtx.solveh_into(xty) {
        Ok(beta) => beta,
        Err(_) => return f64::INFINITY,
    };
    let residuals = &y - &x.dot(&beta);
    let rss: f64 = residuals.mapv(|r| r * r).sum();
    // rounding can push RSS a hair past TSS; the score must stay >= 1
    let r_squared = (1.0 - rss / tss).max(0.0);
    if r_squared >= 1.0 {
        return f64::INFINITY;
    }
    (1.0 - r_squared).recip()
}
