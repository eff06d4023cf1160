//! A named-column table of observations backed by a dense array.

use crate::error::{FireError, Result};
use ndarray::{Array2, ArrayView1, Axis};

/// An immutable table: one row per observation, one named column per field.
/// All values are stored as floats; categorical fields are numerically coded
/// before they enter the table.
#[derive(Debug, Clone)]
pub struct Table {
    names: Vec<String>,
    data: Array2<f64>,
}

impl Table {
    pub fn new<S: Into<String>>(names: Vec<S>, data: Array2<f64>) -> Result<Self> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() != data.ncols() {
            return Err(FireError::BadInput(format!(
                "{} column names for {} data columns",
                names.len(),
                data.ncols()
            )));
        }
        Ok(Self { names, data })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// View of a single column by name.
    pub fn column(&self, name: &str) -> Result<ArrayView1<f64>> {
        let idx = self
            .index_of(name)
            .ok_or_else(|| FireError::UnknownColumn(name.to_string()))?;
        Ok(self.data.index_axis(Axis(1), idx))
    }

    /// Gather the named columns, in the given order, into a design matrix.
    /// Repeated names are gathered repeatedly; the fitter will reject the
    /// resulting singular design.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Array2<f64>> {
        let mut out = Array2::<f64>::zeros((self.n_rows(), names.len()));
        for (j, name) in names.iter().enumerate() {
            let col = self.column(name.as_ref())?;
            out.index_axis_mut(Axis(1), j).assign(&col);
        }
        Ok(out)
    }

    /// Arithmetic mean of a column. Zero for an empty table.
    pub fn column_mean(&self, name: &str) -> Result<f64> {
        Ok(self.column(name)?.mean().unwrap_or(0.0))
    }

    /// Names of all columns except the given one, preserving table order.
    pub fn names_except(&self, excluded: &str) -> Vec<String> {
        self.names
            .iter()
            .filter(|n| n.as_str() != excluded)
            .cloned()
            .collect()
    }
}
