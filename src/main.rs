//! Exploratory analysis of the forest-fires record set: can meteorological
//! and fire-index measurements predict burned area, or at least whether
//! anything burns at all?
//!
//! The analysis is a fixed sequence of phases over one dataset; all caps and
//! thresholds are literal constants, there are no flags.

use fireglm::error::Result;
use fireglm::fit::Fit;
use fireglm::load;
use fireglm::model::fit_model;
use fireglm::report;
use fireglm::search::{self, SearchConfig, SearchDriver};
use fireglm::table::Table;
use fireglm::transform::{self, RESPONSE};
use fireglm::vif;
use fireglm::{Linear, Logistic};
use std::io::Write;

/// Default input file; a single positional argument overrides it.
const DATA_FILE: &str = "forestfires.csv";

/// Iteration cap for the single exploratory fits.
const EXPLORATORY_MAX_ITER: usize = 100;

/// FWI system components plus the meteorological variables: the base of
/// every searched model.
const BASE_VARS: [&str; 8] = ["FFMC", "DMC", "DC", "ISI", "temp", "RH", "wind", "rain"];

fn main() -> anyhow::Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| DATA_FILE.to_string());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let (raw, n_dropped) = load::read_observations_file(&path)?;
    writeln!(
        out,
        "Loaded {} observations from {} ({} incomplete rows dropped)",
        raw.n_rows(),
        path,
        n_dropped
    )?;

    // Phase 1: exploratory OLS of burned area on factor-coded categoricals
    // plus the continuous predictors.
    let shifted = transform::shift_to_origin(&raw, &["X", "Y"])?;
    linear_phase(&mut out, &shifted)?;

    // Phase 2: full logistic model on the transformed table.
    let fires = transform::transform(&raw)?;
    let zeroes = transform::zero_columns(&fires, RESPONSE);
    writeln!(out, "\nAvoiding {:?}", zeroes)?;
    let explanatory: Vec<String> = fires
        .names_except(RESPONSE)
        .into_iter()
        .filter(|name| !zeroes.contains(name))
        .collect();
    if let Some(fit) = logistic_phase(&mut out, &fires, &explanatory)? {
        report::odds_ratio_table(&mut out, &fit)?;
    }
    report::collinearity_table(&mut out, &vif::check(&fires, &explanatory)?)?;

    // Phase 3: the simple model, FWI components plus meteorological
    // variables only.
    writeln!(out, "\nTEST A SIMPLE MODEL (FWI system components + meteorological variables)")?;
    let base: Vec<String> = BASE_VARS.iter().map(|s| s.to_string()).collect();
    if let Some(fit) = logistic_phase(&mut out, &fires, &base)? {
        report::odds_ratio_table(&mut out, &fit)?;
    }
    report::collinearity_table(&mut out, &vif::check(&fires, &base)?)?;

    // Phase 4: brute-force search over the remaining pool. It may take a
    // while.
    let pool: Vec<String> = explanatory
        .iter()
        .filter(|name| !base.contains(name))
        .cloned()
        .collect();
    let config = SearchConfig {
        base: base.clone(),
        pool,
        response: RESPONSE.to_string(),
        max_iter: fireglm::model::DEFAULT_MAX_ITER,
        max_models: search::MAX_MODELS,
    };
    let driver = SearchDriver::new(&fires, config);
    let results = driver.run(&mut out)?;
    report::search_summary(&mut out, &results)?;

    // Phase 5: re-fit the most promising model verbosely and check its
    // collinearity.
    match results.best_converged() {
        Some(best) => {
            let exp_vars = search::explanatory_from_formula(&best.formula);
            if let Some(fit) = logistic_phase(&mut out, &fires, &exp_vars)? {
                report::odds_ratio_table(&mut out, &fit)?;
            }
            report::collinearity_table(&mut out, &vif::check(&fires, &exp_vars)?)?;
        }
        None => writeln!(out, "\nNo searched model converged; nothing to re-fit.")?,
    }

    writeln!(out, "\nCONCLUSIONS")?;
    writeln!(
        out,
        "High collinearity between the predictors leaves most models short of \
         convergence (complete or quasi-complete separation), and the odds \
         ratios of the models that do converge stay near 1: with this sample \
         the measurements do not separate fire from no-fire days."
    )?;
    Ok(())
}

/// The exploratory OLS of phase 1. The categoricals enter as treatment-coded
/// factors here, unlike the logistic phases, which use the pre-expanded
/// indicator columns.
fn linear_phase<W: Write>(out: &mut W, shifted: &Table) -> Result<()> {
    let mut table = shifted.clone();
    let mut explanatory: Vec<String> = Vec::new();
    for factor in &["X", "Y", "month", "day"] {
        let (names, columns) = transform::factor_columns(&table, factor)?;
        table = transform::with_columns(&table, names.clone(), columns)?;
        explanatory.extend(names);
    }
    explanatory.extend(BASE_VARS.iter().map(|s| s.to_string()));

    match fit_model::<Linear>(&table, &explanatory, RESPONSE, EXPLORATORY_MAX_ITER) {
        Ok(fit) => report::linear_summary(out, &fit)?,
        Err(err) => writeln!(
            out,
            "Error \"{}\" while processing model {}",
            err,
            search::formula(RESPONSE, &explanatory)
        )?,
    }
    Ok(())
}

/// Fit one logistic model verbosely. A failure is reported and turned into
/// None so the caller can move on to the next phase.
fn logistic_phase<W: Write>(
    out: &mut W,
    table: &Table,
    explanatory: &[String],
) -> Result<Option<Fit<Logistic>>> {
    let formula = search::formula(RESPONSE, explanatory);
    match fit_model::<Logistic>(table, explanatory, RESPONSE, EXPLORATORY_MAX_ITER) {
        Ok(fit) => {
            report::logistic_summary(out, &fit, &formula)?;
            Ok(Some(fit))
        }
        Err(err) => {
            writeln!(out, "Error \"{}\" while processing model {}", err, formula)?;
            Ok(None)
        }
    }
}
