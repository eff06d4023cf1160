//! struct holding the result of a regression and the derived fit statistics

use crate::error::{FireError, Result};
use crate::glm::Glm;
use crate::linear::Linear;
use crate::logistic::Logistic;
use ndarray::{Array1, Array2};
use statrs::distribution::{ContinuousCDF, FisherSnedecor, Normal, StudentsT};
use std::marker::PhantomData;

/// Two-sided confidence level used throughout the analysis.
const CONFIDENCE: f64 = 0.95;

/// The result of a GLM fit. Inference specific to a family (z-based for the
/// logistic phases, t-based for the linear phase) hangs off the concrete
/// types below.
#[derive(Debug)]
pub struct Fit<M>
where
    M: Glm,
{
    pub(crate) model: PhantomData<M>,
    /// parameter names, intercept first
    pub names: Vec<String>,
    /// the parameter values that maximize the likelihood
    pub result: Array1<f64>,
    /// the unscaled covariance (X^T W X)^-1 at the maximum
    pub covariance: Array2<f64>,
    /// log-likelihood of the final estimate
    pub log_like: f64,
    /// log-likelihood of the intercept-only model
    pub null_log_like: f64,
    /// the number of iterations taken
    pub n_iter: usize,
    /// whether the iteration terminated within tolerance before the cap
    pub converged: bool,
    /// number of observations
    pub n_obs: usize,
    /// number of data points minus number of free parameters
    pub ndf: usize,
}

/// One row of the odds-ratio table: exponentiated coefficient and
/// exponentiated confidence bounds.
#[derive(Debug, Clone)]
pub struct OddsRatioRow {
    pub name: String,
    pub lower: f64,
    pub upper: f64,
    pub odds_ratio: f64,
}

impl<M> Fit<M>
where
    M: Glm,
{
    /// Warning code: 0 for a clean fit, 1 when the iteration cap was reached.
    pub fn warn_flag(&self) -> i32 {
        if self.converged {
            0
        } else {
            1
        }
    }

    fn covariance_diagonal(&self) -> Array1<f64> {
        self.covariance.diag().to_owned()
    }
}

impl Fit<Logistic> {
    /// Asymptotic standard error of each parameter.
    pub fn standard_errors(&self) -> Array1<f64> {
        self.covariance_diagonal().mapv(f64::sqrt)
    }

    /// Signed z-score of each parameter.
    pub fn z_scores(&self) -> Array1<f64> {
        &self.result / &self.standard_errors()
    }

    /// Two-sided p-value of each parameter under the normal approximation.
    pub fn p_values(&self) -> Result<Array1<f64>> {
        let normal = standard_normal()?;
        Ok(self
            .z_scores()
            .mapv(|z| 2.0 * (1.0 - normal.cdf(z.abs()))))
    }

    /// 95% confidence bounds (lower, upper) of each parameter.
    pub fn conf_int(&self) -> Result<Vec<(f64, f64)>> {
        let z = standard_normal()?.inverse_cdf(0.5 + CONFIDENCE / 2.0);
        let se = self.standard_errors();
        Ok(self
            .result
            .iter()
            .zip(se.iter())
            .map(|(&b, &s)| (b - z * s, b + z * s))
            .collect())
    }

    /// McFadden's pseudo R-squared: 1 - ll / ll_null.
    pub fn pseudo_r_squared(&self) -> f64 {
        if self.null_log_like == 0.0 {
            return 0.0;
        }
        1.0 - self.log_like / self.null_log_like
    }

    /// Odds ratios with exponentiated 95% confidence bounds, indexed by
    /// parameter name (intercept included).
    pub fn odds_ratios(&self) -> Result<Vec<OddsRatioRow>> {
        let bounds = self.conf_int()?;
        Ok(self
            .names
            .iter()
            .zip(self.result.iter())
            .zip(bounds.iter())
            .map(|((name, &b), &(lo, hi))| OddsRatioRow {
                name: name.clone(),
                lower: lo.exp(),
                upper: hi.exp(),
                odds_ratio: b.exp(),
            })
            .collect())
    }
}

impl Fit<Linear> {
    /// Residual sum of squares. The linear family defines its log-likelihood
    /// as -RSS/2.
    pub fn rss(&self) -> f64 {
        -2.0 * self.log_like
    }

    /// Total (mean-centered) sum of squares of the response.
    pub fn tss(&self) -> f64 {
        -2.0 * self.null_log_like
    }

    /// Unbiased residual variance estimate.
    pub fn sigma_squared(&self) -> f64 {
        self.rss() / self.ndf as f64
    }

    pub fn r_squared(&self) -> f64 {
        if self.tss() == 0.0 {
            return 0.0;
        }
        1.0 - self.rss() / self.tss()
    }

    pub fn adj_r_squared(&self) -> f64 {
        let n = self.n_obs as f64;
        let r2 = self.r_squared();
        1.0 - (1.0 - r2) * (n - 1.0) / self.ndf as f64
    }

    /// Standard error of each parameter, scaled by the residual variance.
    pub fn standard_errors(&self) -> Array1<f64> {
        let s2 = self.sigma_squared();
        self.covariance_diagonal().mapv(|v| (s2 * v).sqrt())
    }

    /// t-statistic of each parameter.
    pub fn t_values(&self) -> Array1<f64> {
        &self.result / &self.standard_errors()
    }

    /// Two-sided p-value of each parameter from the t distribution with ndf
    /// degrees of freedom.
    pub fn p_values(&self) -> Result<Array1<f64>> {
        let t_dist = StudentsT::new(0.0, 1.0, self.ndf as f64)
            .map_err(|e| FireError::BadInput(e.to_string()))?;
        Ok(self
            .t_values()
            .mapv(|t| 2.0 * (1.0 - t_dist.cdf(t.abs()))))
    }

    /// 95% confidence bounds (lower, upper) of each parameter.
    pub fn conf_int(&self) -> Result<Vec<(f64, f64)>> {
        let t_dist = StudentsT::new(0.0, 1.0, self.ndf as f64)
            .map_err(|e| FireError::BadInput(e.to_string()))?;
        let t = t_dist.inverse_cdf(0.5 + CONFIDENCE / 2.0);
        let se = self.standard_errors();
        Ok(self
            .result
            .iter()
            .zip(se.iter())
            .map(|(&b, &s)| (b - t * s, b + t * s))
            .collect())
    }

    /// Overall F-statistic of the regression and its p-value.
    pub fn f_statistic(&self) -> Result<(f64, f64)> {
        let k = self.names.len();
        if k < 2 {
            return Err(FireError::BadInput(
                "F-test needs at least one non-constant regressor".to_string(),
            ));
        }
        let d1 = (k - 1) as f64;
        let d2 = self.ndf as f64;
        let f = ((self.tss() - self.rss()) / d1) / (self.rss() / d2);
        let f_dist =
            FisherSnedecor::new(d1, d2).map_err(|e| FireError::BadInput(e.to_string()))?;
        Ok((f, 1.0 - f_dist.cdf(f)))
    }
}

fn standard_normal() -> Result<Normal> {
    Normal::new(0.0, 1.0).map_err(|e| FireError::BadInput(e.to_string()))
}
