//! Search-driver behavior: enumeration order, caps, failure recording.

use anyhow::Result;
use fireglm::search::{SearchConfig, SearchDriver, MAX_MODELS};

mod common;
use common::synthetic_table;

fn config(base: Vec<&str>, pool: Vec<&str>, max_models: usize) -> SearchConfig {
    SearchConfig {
        base: base.into_iter().map(str::to_string).collect(),
        pool: pool.into_iter().map(str::to_string).collect(),
        response: "area".to_string(),
        max_iter: 35,
        max_models,
    }
}

#[test]
fn results_arrive_in_enumeration_order() -> Result<()> {
    let table = synthetic_table(120);
    let driver = SearchDriver::new(&table, config(vec!["x1"], vec!["x2", "x3", "x4"], MAX_MODELS));
    let mut sink = Vec::new();
    let results = driver.run(&mut sink)?;
    let formulas: Vec<&str> = results.records.iter().map(|r| r.formula.as_str()).collect();
    assert_eq!(
        formulas,
        vec![
            "area ~ x1 + x2",
            "area ~ x1 + x2 + x3",
            "area ~ x1 + x2 + x3 + x4",
            "area ~ x1 + x2 + x4",
            "area ~ x1 + x3",
            "area ~ x1 + x3 + x4",
            "area ~ x1 + x4",
        ]
    );
    Ok(())
}

#[test]
fn row_cap_terminates_the_search() -> Result<()> {
    let table = synthetic_table(120);
    let driver = SearchDriver::new(&table, config(vec!["x1"], vec!["x2", "x3", "x4"], 3));
    let mut sink = Vec::new();
    let results = driver.run(&mut sink)?;
    assert_eq!(results.total(), 3);
    Ok(())
}

#[test]
fn two_runs_are_identical() -> Result<()> {
    let table = synthetic_table(120);
    let cfg = || config(vec!["x1", "x2"], vec!["x3", "x4", "x5"], MAX_MODELS);
    let mut sink = Vec::new();
    let a = SearchDriver::new(&table, cfg()).run(&mut sink)?;
    let b = SearchDriver::new(&table, cfg()).run(&mut sink)?;
    assert_eq!(a.total(), b.total());
    for (ra, rb) in a.records.iter().zip(b.records.iter()) {
        assert_eq!(ra.formula, rb.formula);
        assert_eq!(ra.converged, rb.converged);
        assert_eq!(ra.warn_flag, rb.warn_flag);
        assert_eq!(ra.pseudo_r_squared, rb.pseudo_r_squared);
    }
    Ok(())
}

#[test]
fn failed_combination_is_recorded_and_skipped() -> Result<()> {
    let table = synthetic_table(120);
    // x1 appears in the base and in the pool, so every combination that
    // selects it builds a duplicated (singular) design
    let driver = SearchDriver::new(&table, config(vec!["x1"], vec!["x1", "x2"], MAX_MODELS));
    let mut sink = Vec::new();
    let results = driver.run(&mut sink)?;
    // enumeration: [x1], [x1, x2], [x2]
    assert_eq!(results.total(), 3);
    let errored = &results.records[0];
    assert_eq!(errored.converged, None);
    assert_eq!(errored.warn_flag, -1);
    assert_eq!(errored.pseudo_r_squared, None);
    assert!(errored.formula.starts_with("Error: "));
    // the diagnostics sink saw the failure as it happened
    let diagnostics = String::from_utf8(sink)?;
    assert!(diagnostics.contains("while processing model area ~ x1 + x1"));
    // the search moved on: the last combination is clean
    assert_eq!(results.records[2].formula, "area ~ x1 + x2");
    assert!(results.records[2].converged.is_some());
    assert_eq!(results.n_errored(), 2);
    Ok(())
}

#[test]
fn best_converged_has_the_maximal_fit_quality() -> Result<()> {
    let table = synthetic_table(150);
    let driver = SearchDriver::new(
        &table,
        config(vec!["x3"], vec!["x1", "x2", "x4", "x5"], MAX_MODELS),
    );
    let mut sink = Vec::new();
    let results = driver.run(&mut sink)?;
    let best = results.best_converged().expect("some model converges");
    let best_pr2 = best.pseudo_r_squared.expect("converged rows carry a quality");
    for record in results.records.iter().filter(|r| r.converged == Some(true)) {
        if let Some(pr2) = record.pseudo_r_squared {
            assert!(pr2 <= best_pr2);
        }
    }
    // the strongest model includes both signal variables
    assert!(best.formula.contains("x1"));
    assert!(best.formula.contains("x2"));
    Ok(())
}
