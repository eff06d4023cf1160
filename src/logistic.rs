//! Logistic regression family for the binary fire-occurrence response.

use crate::glm::Glm;
use ndarray::{Array1, Array2, Zip};

pub struct Logistic;

impl Glm for Logistic {
    const NAME: &'static str = "Logit";

    // inverse link function, expit
    fn mean(lin_pred: f64) -> f64 {
        (1.0 + (-lin_pred).exp()).recip()
    }

    // var = mu*(1-mu)
    fn variance(mean: f64) -> f64 {
        mean * (1.0 - mean)
    }

    fn log_likelihood(data_y: &Array1<f64>, data_x: &Array2<f64>, regressors: &Array1<f64>) -> f64 {
        let linear_predictor: Array1<f64> = data_x.dot(regressors);
        let mut log_like_terms: Array1<f64> = Array1::zeros(data_y.len());
        Zip::from(&mut log_like_terms)
            .and(data_y)
            .and(&linear_predictor)
            .apply(|l, &y, &wx| {
                // Both expressions are mathematically identical; the branch
                // avoids under/overflow of exp for large |wx|.
                let (yt, xt) = if wx < 0.0 { (y, wx) } else { (1.0 - y, -wx) };
                *l = yt * xt - xt.exp().ln_1p()
            });
        log_like_terms.sum()
    }

    /// Intercept-only likelihood: the event fraction is the MLE of the mean.
    fn null_log_likelihood(data_y: &Array1<f64>) -> f64 {
        let n = data_y.len() as f64;
        let n_ones: f64 = data_y.sum();
        let n_zeros = n - n_ones;
        if n_ones <= 0.0 || n_zeros <= 0.0 {
            return 0.0;
        }
        let p = n_ones / n;
        n_ones * p.ln() + n_zeros * (1.0 - p).ln()
    }
}
