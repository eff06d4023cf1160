//! The exploratory linear phase: factor coding plus OLS inference.

use anyhow::Result;
use approx::assert_abs_diff_eq;
use fireglm::model::fit_model;
use fireglm::transform;
use fireglm::{Linear, Table};
use ndarray::Array2;

mod common;
use common::Lcg;

/// A table with one three-level categorical column and a continuous one,
/// where the response has a known additive structure.
fn categorical_table(n_rows: usize) -> Table {
    let mut rng = Lcg::new(3);
    let mut data = Array2::<f64>::zeros((n_rows, 3));
    for i in 0..n_rows {
        let group = (i % 3) as f64;
        let x = rng.next_f64() - 0.5;
        // group effects 0, +2, +5 on top of slope 3
        let effect = match i % 3 {
            0 => 0.0,
            1 => 2.0,
            _ => 5.0,
        };
        data[[i, 0]] = group;
        data[[i, 1]] = x;
        data[[i, 2]] = 1.0 + effect + 3.0 * x + 0.01 * (rng.next_f64() - 0.5);
    }
    Table::new(vec!["group", "x", "area"], data).expect("fixture dimensions are consistent")
}

#[test]
fn factor_coded_ols_recovers_group_effects() -> Result<()> {
    let table = categorical_table(90);
    let (names, columns) = transform::factor_columns(&table, "group")?;
    assert_eq!(names, vec!["group[T.1]".to_string(), "group[T.2]".to_string()]);
    let table = transform::with_columns(&table, names.clone(), columns)?;

    let mut explanatory = names;
    explanatory.push("x".to_string());
    let fit = fit_model::<Linear>(&table, &explanatory, "area", 100)?;

    assert_eq!(fit.names, vec!["Intercept", "group[T.1]", "group[T.2]", "x"]);
    assert_abs_diff_eq!(fit.result[0], 1.0, epsilon = 0.01);
    assert_abs_diff_eq!(fit.result[1], 2.0, epsilon = 0.01);
    assert_abs_diff_eq!(fit.result[2], 5.0, epsilon = 0.01);
    assert_abs_diff_eq!(fit.result[3], 3.0, epsilon = 0.05);
    assert!(fit.r_squared() > 0.99);

    // the group effects are overwhelmingly significant on this data
    let p_values = fit.p_values()?;
    assert!(p_values[1] < 1e-6);
    assert!(p_values[2] < 1e-6);
    let (f_stat, f_p) = fit.f_statistic()?;
    assert!(f_stat > 100.0);
    assert!(f_p < 1e-6);
    Ok(())
}
