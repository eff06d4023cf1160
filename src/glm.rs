//! trait defining a generalized linear model and the shared regression driver.
//! Models are fit such that E[Y] = g^-1(X*B) where g is the link function.

use crate::error::{FireError, Result};
use crate::fit::Fit;
use crate::irls::Irls;
use crate::model::Model;
use ndarray::{Array1, Array2};
use ndarray_linalg::InverseH;
use std::marker::PhantomData;

pub trait Glm: Sized {
    /// Family name used in report headers.
    const NAME: &'static str;

    /// Inverse link function, mapping the linear predictor to the expected
    /// value of the response.
    fn mean(lin_pred: f64) -> f64;

    /// The variance of the response as a function of its mean.
    fn variance(mean: f64) -> f64;

    /// Logarithm of the likelihood given the data and regression parameters.
    fn log_likelihood(data_y: &Array1<f64>, data_x: &Array2<f64>, regressors: &Array1<f64>) -> f64;

    /// Log-likelihood of the intercept-only null model, used for
    /// goodness-of-fit measures.
    fn null_log_likelihood(data_y: &Array1<f64>) -> f64;

    /// Run IRLS on the model data and return the fit result. Reaching the
    /// iteration cap is not an error: the most recent estimate is returned
    /// with the convergence flag cleared, the way the reference statistics
    /// packages behave. A singular update matrix is an error.
    fn regression(model: &Model<Self>) -> Result<Fit<Self>> {
        let n_obs = model.y.len();
        let n_par = model.x.ncols();
        if n_obs <= n_par {
            return Err(FireError::Underconstrained);
        }
        let initial = Array1::<f64>::zeros(n_par);
        let initial_like = Self::log_likelihood(&model.y, &model.x, &initial);

        let mut irls: Irls<Self> = Irls::new(model, initial.clone(), initial_like);
        let mut result = initial;
        let mut log_like = initial_like;
        let mut converged = true;
        while let Some(step) = irls.next() {
            match step {
                Ok(step) => {
                    result = step.guess;
                    log_like = step.like;
                }
                Err(FireError::MaxIter(_)) => {
                    // keep the last accepted estimate, flag non-convergence
                    result = irls.guess().to_owned();
                    log_like = irls.last_like();
                    converged = false;
                    break;
                }
                Err(err) => return Err(err),
            }
        }
        let n_iter = irls.n_iter;

        // asymptotic covariance (X^T W X)^-1 evaluated at the final estimate
        let var_diag: Array1<f64> = model
            .x
            .dot(&result)
            .mapv(Self::mean)
            .mapv(Self::variance)
            .mapv(|v| v + f64::EPSILON);
        let xtwx: Array2<f64> = (&model.x.t() * &var_diag).dot(&model.x);
        let covariance = xtwx.invh().map_err(|_| FireError::SingularMatrix)?;

        Ok(Fit {
            model: PhantomData,
            names: model.names.clone(),
            result,
            covariance,
            log_like,
            null_log_like: Self::null_log_likelihood(&model.y),
            n_iter,
            converged,
            n_obs,
            ndf: n_obs - n_par,
        })
    }
}
