//! Pure transformations taking the raw observation table to the analysis
//! table: coordinate shifting, indicator expansion, response binarization,
//! and mean-centering of the explanatory columns.
//!
//! Each step consumes its input and produces a new table; no phase of the
//! analysis mutates a table another phase still holds.

use crate::error::{FireError, Result};
use crate::load::{DAYS, MONTHS};
use crate::table::Table;
use ndarray::{Array2, Axis};

/// The response column of the analysis.
pub const RESPONSE: &str = "area";

/// Translate the named columns so the minimum observed value becomes zero.
/// Translation only, no scaling.
pub fn shift_to_origin(table: &Table, columns: &[&str]) -> Result<Table> {
    let mut data = table.data().clone();
    for name in columns {
        let idx = table
            .index_of(name)
            .ok_or_else(|| FireError::UnknownColumn(name.to_string()))?;
        let min = table.column(name)?.iter().cloned().fold(f64::INFINITY, f64::min);
        data.index_axis_mut(Axis(1), idx).mapv_inplace(|v| v - min);
    }
    Table::new(table.names().to_vec(), data)
}

/// Expand the month, day, and spatial-coordinate columns into disjoint 0/1
/// indicator columns. Month and day get one column per name in the fixed
/// tables whether observed or not; each coordinate gets one column per value
/// in its observed min..=max range post-shift. Within a category group the
/// indicators of a row sum to exactly 1.
pub fn expand_indicators(table: &Table) -> Result<Table> {
    let mut names: Vec<String> = Vec::new();
    let mut columns: Vec<Vec<f64>> = Vec::new();

    // passthrough of the non-categorical columns, preserving order
    for name in table.names() {
        if matches!(name.as_str(), "X" | "Y" | "month" | "day") {
            continue;
        }
        names.push(name.clone());
        columns.push(table.column(name)?.to_vec());
    }

    let month = table.column("month")?;
    for (code, month_name) in MONTHS.iter().enumerate() {
        names.push(format!("month_{}", month_name));
        columns.push(month.iter().map(|&v| indicator(v, code)).collect());
    }
    let day = table.column("day")?;
    for (code, day_name) in DAYS.iter().enumerate() {
        names.push(format!("day_{}", day_name));
        columns.push(day.iter().map(|&v| indicator(v, code)).collect());
    }
    for coord in &["X", "Y"] {
        let col = table.column(coord)?;
        let min = col.iter().cloned().fold(f64::INFINITY, f64::min) as i64;
        let max = col.iter().cloned().fold(f64::NEG_INFINITY, f64::max) as i64;
        for value in min..=max {
            names.push(format!("{}_{}", coord, value));
            columns.push(col.iter().map(|&v| indicator(v, value as usize)).collect());
        }
    }

    from_columns(names, columns, table.n_rows())
}

/// Binarize the response: 1 when the original value is strictly positive.
pub fn binarize_response(table: &Table, response: &str) -> Result<Table> {
    let mut data = table.data().clone();
    let idx = table
        .index_of(response)
        .ok_or_else(|| FireError::UnknownColumn(response.to_string()))?;
    data.index_axis_mut(Axis(1), idx)
        .mapv_inplace(|v| if v > 0.0 { 1.0 } else { 0.0 });
    Table::new(table.names().to_vec(), data)
}

/// Subtract each explanatory column's own mean. The response is left alone.
/// Indicator columns are centered along with everything else, matching the
/// original analysis.
pub fn center_explanatory(table: &Table, response: &str) -> Result<Table> {
    let mut data = table.data().clone();
    for (idx, name) in table.names().iter().enumerate() {
        if name == response {
            continue;
        }
        let mean = table.column_mean(name)?;
        data.index_axis_mut(Axis(1), idx).mapv_inplace(|v| v - mean);
    }
    Table::new(table.names().to_vec(), data)
}

/// The full transformation pipeline for the logistic phases, in the original
/// order: shift coordinates, expand indicators, binarize the response, then
/// center every explanatory column.
pub fn transform(table: &Table) -> Result<Table> {
    let shifted = shift_to_origin(table, &["X", "Y"])?;
    let expanded = expand_indicators(&shifted)?;
    let binarized = binarize_response(&expanded, RESPONSE)?;
    center_explanatory(&binarized, RESPONSE)
}

/// Names of explanatory columns that are identically zero. Fitting such a
/// column would fail with a singular matrix, so callers exclude these before
/// building a model.
pub fn zero_columns(table: &Table, response: &str) -> Vec<String> {
    table
        .names()
        .iter()
        .filter(|name| name.as_str() != response)
        .filter(|name| {
            let col = table.column(name).expect("iterating the table's own names");
            col.iter().map(|v| v.abs()).sum::<f64>() == 0.0
        })
        .cloned()
        .collect()
}

/// Treatment-code a numerically coded categorical column: one indicator per
/// observed level except the first (reference) level, named `col[T.level]`.
/// Used by the exploratory linear phase, which treats the categoricals as
/// factors rather than pre-expanded indicators.
pub fn factor_columns(table: &Table, column: &str) -> Result<(Vec<String>, Vec<Vec<f64>>)> {
    let col = table.column(column)?;
    let mut levels: Vec<i64> = col.iter().map(|&v| v as i64).collect();
    levels.sort_unstable();
    levels.dedup();
    let mut names = Vec::new();
    let mut columns = Vec::new();
    // first level is the reference and gets no column
    for level in levels.iter().skip(1) {
        names.push(format!("{}[T.{}]", column, level));
        columns.push(col.iter().map(|&v| indicator(v, *level as usize)).collect());
    }
    Ok((names, columns))
}

/// Append extra named columns to a table.
pub fn with_columns(table: &Table, names: Vec<String>, columns: Vec<Vec<f64>>) -> Result<Table> {
    let mut all_names: Vec<String> = table.names().to_vec();
    let mut all_columns: Vec<Vec<f64>> = table
        .names()
        .iter()
        .map(|n| table.column(n).map(|c| c.to_vec()))
        .collect::<Result<_>>()?;
    all_names.extend(names);
    all_columns.extend(columns);
    from_columns(all_names, all_columns, table.n_rows())
}

fn indicator(value: f64, code: usize) -> f64 {
    if value as i64 == code as i64 {
        1.0
    } else {
        0.0
    }
}

fn from_columns(names: Vec<String>, columns: Vec<Vec<f64>>, n_rows: usize) -> Result<Table> {
    let mut data = Array2::<f64>::zeros((n_rows, columns.len()));
    for (j, col) in columns.iter().enumerate() {
        for (i, &v) in col.iter().enumerate() {
            data[[i, j]] = v;
        }
    }
    Table::new(names, data)
}
