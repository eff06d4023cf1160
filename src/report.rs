//! Human-readable report formatting. Every function writes plain text to a
//! sink; there is no machine-readable output and nothing is returned to
//! further consumers.

use crate::error::Result;
use crate::fit::Fit;
use crate::linear::Linear;
use crate::logistic::Logistic;
use crate::search::SearchResults;
use crate::vif::Collinearity;
use std::io::Write;

const RULE: &str = "==============================================================================";
const THIN_RULE: &str =
    "------------------------------------------------------------------------------";

/// Summary of the exploratory OLS phase: overall fit quality plus the
/// coefficient table with t-based inference.
pub fn linear_summary<W: Write>(out: &mut W, fit: &Fit<Linear>) -> Result<()> {
    let (f_stat, f_pvalue) = fit.f_statistic()?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "OLS Regression Results")?;
    writeln!(out, "{}", THIN_RULE)?;
    writeln!(out, "No. Observations: {:>10}", fit.n_obs)?;
    writeln!(out, "Df Residuals:     {:>10}", fit.ndf)?;
    writeln!(out, "R-squared:        {:>10.3}", fit.r_squared())?;
    writeln!(out, "Adj. R-squared:   {:>10.3}", fit.adj_r_squared())?;
    writeln!(out, "F-statistic:      {:>10.3}", f_stat)?;
    writeln!(out, "Prob (F-statistic): {:>8.3e}", f_pvalue)?;
    writeln!(out, "{}", THIN_RULE)?;
    writeln!(
        out,
        "{:<16} {:>10} {:>10} {:>8} {:>8} {:>10} {:>10}",
        "", "coef", "std err", "t", "P>|t|", "[0.025", "0.975]"
    )?;
    let se = fit.standard_errors();
    let t_values = fit.t_values();
    let p_values = fit.p_values()?;
    let bounds = fit.conf_int()?;
    for (i, name) in fit.names.iter().enumerate() {
        writeln!(
            out,
            "{:<16} {:>10.4} {:>10.3} {:>8.3} {:>8.3} {:>10.3} {:>10.3}",
            name, fit.result[i], se[i], t_values[i], p_values[i], bounds[i].0, bounds[i].1
        )?;
    }
    writeln!(out, "{}", RULE)?;
    Ok(())
}

/// Summary of one logistic fit: convergence state, likelihoods, pseudo
/// R-squared, and the z-based coefficient table.
pub fn logistic_summary<W: Write>(out: &mut W, fit: &Fit<Logistic>, formula: &str) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "MODEL: {}", formula)?;
    writeln!(out)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Logit Regression Results")?;
    writeln!(out, "{}", THIN_RULE)?;
    writeln!(out, "No. Observations: {:>10}", fit.n_obs)?;
    writeln!(out, "Df Residuals:     {:>10}", fit.ndf)?;
    writeln!(out, "Converged:        {:>10}", fit.converged)?;
    writeln!(out, "Iterations:       {:>10}", fit.n_iter)?;
    writeln!(out, "Log-Likelihood:   {:>10.3}", fit.log_like)?;
    writeln!(out, "LL-Null:          {:>10.3}", fit.null_log_like)?;
    writeln!(out, "Pseudo R-squ.:    {:>10.4}", fit.pseudo_r_squared())?;
    if !fit.converged {
        writeln!(out, "Warning: Maximum number of iterations has been exceeded.")?;
    }
    writeln!(out, "{}", THIN_RULE)?;
    writeln!(
        out,
        "{:<16} {:>10} {:>10} {:>8} {:>8} {:>10} {:>10}",
        "", "coef", "std err", "z", "P>|z|", "[0.025", "0.975]"
    )?;
    let se = fit.standard_errors();
    let z_scores = fit.z_scores();
    let p_values = fit.p_values()?;
    let bounds = fit.conf_int()?;
    for (i, name) in fit.names.iter().enumerate() {
        writeln!(
            out,
            "{:<16} {:>10.4} {:>10.3} {:>8.3} {:>8.3} {:>10.3} {:>10.3}",
            name, fit.result[i], se[i], z_scores[i], p_values[i], bounds[i].0, bounds[i].1
        )?;
    }
    writeln!(out, "{}", RULE)?;
    Ok(())
}

/// Odds ratios with their exponentiated confidence bounds.
pub fn odds_ratio_table<W: Write>(out: &mut W, fit: &Fit<Logistic>) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Odds Ratios")?;
    writeln!(
        out,
        "{:<16} {:>12} {:>12} {:>12}",
        "", "Lower CI", "Upper CI", "Odds Ratios"
    )?;
    for row in fit.odds_ratios()? {
        writeln!(
            out,
            "{:<16} {:>12.3} {:>12.3} {:>12.3}",
            row.name, row.lower, row.upper, row.odds_ratio
        )?;
    }
    Ok(())
}

/// The VIF table and the set of columns flagged as highly collinear.
pub fn collinearity_table<W: Write>(out: &mut W, check: &Collinearity) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Variance Inflation Factors:")?;
    for (name, score) in check.names.iter().zip(check.scores.iter()) {
        writeln!(out, "{:<16} {:>12.3}", name, score)?;
    }
    writeln!(out)?;
    writeln!(out, "Highly collinear features:")?;
    writeln!(out, "{:?}", check.flagged)?;
    Ok(())
}

/// Aggregate counts of a finished search plus the converged models with
/// their fit quality.
pub fn search_summary<W: Write>(out: &mut W, results: &SearchResults) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Total models: {}", results.total())?;
    writeln!(out, "Total models which converged: {}", results.n_converged())?;
    writeln!(out, "Total models with warnings: {}", results.n_warned())?;
    writeln!(out, "Total models on error: {}", results.n_errored())?;
    writeln!(out)?;
    writeln!(out, "Models which converged")?;
    for record in results
        .records
        .iter()
        .filter(|r| r.converged == Some(true))
    {
        if let Some(pr2) = record.pseudo_r_squared {
            writeln!(out, "Pseudo R sq = {:.3}, Model = {}", pr2, record.formula)?;
        }
    }
    Ok(())
}
