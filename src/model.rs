//! Collect data for and configure a regression model.

use crate::error::{FireError, Result};
use crate::fit::Fit;
use crate::glm::Glm;
use crate::table::Table;
use ndarray::{concatenate, Array1, Array2, Axis};
use ndarray_linalg::DeterminantH;
use std::marker::PhantomData;

/// Default iteration cap, matching the default of the reference
/// implementation's optimizer.
pub const DEFAULT_MAX_ITER: usize = 35;

/// Name given to the constant term in reports.
pub const INTERCEPT: &str = "Intercept";

/// Holds the data and configuration settings for a regression.
pub struct Model<M>
where
    M: Glm,
{
    pub(crate) model: PhantomData<M>,
    /// the observed response by event
    pub y: Array1<f64>,
    /// the design matrix, one-padded, with events in rows
    pub x: Array2<f64>,
    /// parameter names aligned with the columns of `x`
    pub names: Vec<String>,
    /// the maximum number of IRLS iterations before the fit is flagged
    /// non-converged
    pub max_iter: usize,
    /// relative log-likelihood tolerance of the iteration
    pub tol: f64,
}

impl<M> Model<M>
where
    M: Glm,
{
    /// Perform the regression and return a fit object holding the results.
    pub fn fit(&self) -> Result<Fit<M>> {
        M::regression(self)
    }
}

/// Provides an interface to create the full model struct with convenient type
/// inference.
pub struct ModelBuilder<M: Glm> {
    _model: PhantomData<M>,
}

impl<M: Glm> ModelBuilder<M> {
    /// Start a builder from a response vector and a design matrix whose rows
    /// are observations. The matrix must not yet include a constant column.
    pub fn data(data_y: Array1<f64>, data_x: Array2<f64>) -> ModelBuilderData<M> {
        ModelBuilderData {
            model: PhantomData,
            data_y,
            data_x,
            names: None,
            max_iter: DEFAULT_MAX_ITER,
            tol: f64::EPSILON,
        }
    }
}

/// Holds the data and all specifications for the model and provides functions
/// to adjust the settings.
pub struct ModelBuilderData<M>
where
    M: Glm,
{
    model: PhantomData<M>,
    data_y: Array1<f64>,
    data_x: Array2<f64>,
    names: Option<Vec<String>>,
    max_iter: usize,
    tol: f64,
}

impl<M> ModelBuilderData<M>
where
    M: Glm,
{
    /// Name the explanatory variables, aligned with the design matrix columns.
    pub fn names<S: Into<String>>(mut self, names: Vec<S>) -> Self {
        self.names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Use a maximum number of iterations.
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the relative tolerance of the iteration.
    pub fn tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub fn build(self) -> Result<Model<M>> {
        let n_data = self.data_y.len();
        let n_cols = self.data_x.ncols();
        if n_data != self.data_x.nrows() {
            return Err(FireError::BadInput(
                "y and x data must have same number of points".to_string(),
            ));
        }
        // The regression can find a solution if n_data == ncols + 1, but
        // there will be no estimate for the uncertainty.
        if n_data < n_cols + 1 {
            return Err(FireError::Underconstrained);
        }
        let names = match self.names {
            Some(names) => {
                if names.len() != n_cols {
                    return Err(FireError::BadInput(format!(
                        "{} names for {} design columns",
                        names.len(),
                        n_cols
                    )));
                }
                names
            }
            None => (0..n_cols).map(|i| format!("x{}", i)).collect(),
        };

        // Check for collinearity by ensuring the determinant of X^T X is
        // bounded away from zero. An identically-zero column, a duplicated
        // column, or perfect collinearity all fail here, before any
        // coefficient is produced.
        let xtx: Array2<f64> = self.data_x.t().dot(&self.data_x);
        let det = xtx.deth()?;
        if det.abs() < det_tolerance(n_cols + 1) {
            return Err(FireError::SingularMatrix);
        }

        let mut all_names = vec![INTERCEPT.to_string()];
        all_names.extend(names);
        Ok(Model {
            model: PhantomData,
            y: self.data_y,
            x: one_pad(&self.data_x),
            names: all_names,
            max_iter: self.max_iter,
            tol: self.tol,
        })
    }
}

/// Fit one regression of `response` on the ordered `explanatory` columns of
/// the table, capping the iteration count. Failures are explicit values; the
/// caller decides whether a failed combination aborts or is recorded.
pub fn fit_model<M: Glm>(
    table: &Table,
    explanatory: &[String],
    response: &str,
    max_iter: usize,
) -> Result<Fit<M>> {
    let y = table.column(response)?.to_owned();
    let x = table.select(explanatory)?;
    ModelBuilder::<M>::data(y, x)
        .names(explanatory.to_vec())
        .max_iter(max_iter)
        .build()?
        .fit()
}

/// Prepend the design matrix with a column of ones for the intercept term.
fn one_pad(data: &Array2<f64>) -> Array2<f64> {
    let ones: Array2<f64> = Array2::ones((data.nrows(), 1));
    concatenate![Axis(1), ones, data.view()]
}

/// Determinant tolerance for the collinearity pre-check: the square root of
/// the parameter count times machine epsilon.
fn det_tolerance(n_pred: usize) -> f64 {
    (n_pred as f64).sqrt() * f64::EPSILON
}
