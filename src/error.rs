//! define the error enum for loading, transformation, and regression

use ndarray_linalg::error::LinalgError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FireError>;

#[derive(Error, Debug)]
pub enum FireError {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV failure: {0}")]
    Csv(#[from] csv::Error),
    /// A month or day name outside the known tables. Fatal during load.
    #[error("Unrecognized {kind} category {value:?}")]
    UnrecognizedCategory { kind: &'static str, value: String },
    #[error("Unknown column {0:?}")]
    UnknownColumn(String),
    #[error("Inconsistent input: {0}")]
    BadInput(String),
    /// The design matrix is not invertible (constant column, perfect
    /// collinearity, or a duplicated regressor).
    #[error("Singular design matrix")]
    SingularMatrix,
    /// An explanatory column that is identically zero must be filtered out
    /// before fitting.
    #[error("Column {0:?} has zero variance")]
    ZeroVariance(String),
    /// Internal signal that the iteration cap was reached. The fitter converts
    /// this into a non-converged fit rather than surfacing it to callers.
    #[error("Reached maximum of {0} iterations")]
    MaxIter(usize),
    #[error("Underconstrained data")]
    Underconstrained,
    #[error("Linear algebra")]
    Linalg {
        #[from]
        source: LinalgError,
    },
}
