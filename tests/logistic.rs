//! test cases for the logistic fitting path

use anyhow::Result;
use fireglm::error::FireError;
use fireglm::model::fit_model;
use fireglm::Logistic;

mod common;
use common::{synthetic_table, synthetic_table_with_zero_column, Lcg};

#[test]
fn signal_variables_get_sensible_signs() -> Result<()> {
    let table = synthetic_table(200);
    let explanatory: Vec<String> = vec!["x1".into(), "x2".into(), "x3".into()];
    let fit = fit_model::<Logistic>(&table, &explanatory, "area", 100)?;
    assert!(fit.converged);
    assert_eq!(fit.warn_flag(), 0);
    // names are intercept-first and aligned with the coefficients
    assert_eq!(fit.names[0], "Intercept");
    assert_eq!(fit.names[1], "x1");
    // the response was generated with a positive x1 and negative x2 loading
    assert!(fit.result[1] > 0.0);
    assert!(fit.result[2] < 0.0);
    let pr2 = fit.pseudo_r_squared();
    assert!(pr2 > 0.0 && pr2 < 1.0);
    Ok(())
}

#[test]
fn all_zero_column_fails_before_any_coefficient() {
    let table = synthetic_table_with_zero_column(50);
    let explanatory: Vec<String> = vec!["x1".into(), "dead".into()];
    let result = fit_model::<Logistic>(&table, &explanatory, "area", 100);
    assert!(matches!(result, Err(FireError::SingularMatrix)));
}

#[test]
fn duplicated_column_is_singular() {
    let table = synthetic_table(50);
    let explanatory: Vec<String> = vec!["x1".into(), "x1".into()];
    let result = fit_model::<Logistic>(&table, &explanatory, "area", 100);
    assert!(matches!(result, Err(FireError::SingularMatrix)));
}

#[test]
fn complete_separation_hits_the_iteration_cap() -> Result<()> {
    // y = 1 exactly when x > 0: the likelihood keeps improving as the
    // coefficient diverges, so the cap is reached without convergence
    use fireglm::Table;
    use ndarray::Array2;
    let n = 60;
    let mut rng = Lcg::new(7);
    let mut data = Array2::<f64>::zeros((n, 2));
    for i in 0..n {
        let x = rng.next_f64() - 0.5;
        data[[i, 0]] = x;
        data[[i, 1]] = if x > 0.0 { 1.0 } else { 0.0 };
    }
    let table = Table::new(vec!["x", "area"], data)?;
    let fit = fit_model::<Logistic>(&table, &["x".to_string()], "area", 10)?;
    assert!(!fit.converged);
    assert_eq!(fit.warn_flag(), 1);
    // a non-converged fit still reports its quality measure
    assert!(fit.pseudo_r_squared() > 0.0);
    Ok(())
}
