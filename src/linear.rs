//! Ordinary least squares family, used by the exploratory linear phase.

use crate::glm::Glm;
use ndarray::{Array1, Array2};

/// Linear regression with identity link and constant variance. Under IRLS
/// this solves the normal equations in a single step.
pub struct Linear;

impl Glm for Linear {
    const NAME: &'static str = "OLS";

    // identity link
    fn mean(lin_pred: f64) -> f64 {
        lin_pred
    }

    // variance is not a function of the mean in OLS regression
    fn variance(_mean: f64) -> f64 {
        1.0
    }

    // Up to constants that do not depend on the parameters, the Gaussian
    // log-likelihood is -RSS/2. That is all the iteration and the fit
    // statistics need.
    fn log_likelihood(data_y: &Array1<f64>, data_x: &Array2<f64>, regressors: &Array1<f64>) -> f64 {
        let residuals = data_y - &data_x.dot(regressors);
        -0.5 * residuals.mapv(|r| r * r).sum()
    }

    // The null model predicts the mean everywhere, so this is -TSS/2.
    fn null_log_likelihood(data_y: &Array1<f64>) -> f64 {
        let mean = data_y.mean().unwrap_or(0.0);
        -0.5 * data_y.mapv(|y| (y - mean) * (y - mean)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelBuilder;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn exact_line_is_recovered() {
        // y = 1 + 2x without noise
        let x = array![[0.0], [1.0], [2.0], [3.0]];
        let y = array![1.0, 3.0, 5.0, 7.0];
        let fit = ModelBuilder::<Linear>::data(y, x).build().unwrap().fit().unwrap();
        assert!(fit.converged);
        assert_abs_diff_eq!(fit.result[0], 1.0, epsilon = 1e-8);
        assert_abs_diff_eq!(fit.result[1], 2.0, epsilon = 1e-8);
    }
}
