//! Brute-force model search: enumerate growing variable combinations from a
//! pool, fit each silently, and collect the outcomes in an append-only
//! results table.
//!
//! The enumeration reproduces the cursor/depth state machine of the original
//! analysis literally rather than a textbook subset generator: a cursor array
//! indexed by depth, a carry step that resets the deepest slot and increments
//! the one above it, and a depth extension that seeds the new slot with the
//! previous slot's position plus one. As implemented this walks the strictly
//! increasing index prefixes in depth-first order, and that order is pinned by
//! the tests below.

use crate::error::Result;
use crate::logistic::Logistic;
use crate::model::fit_model;
use crate::table::Table;
use itertools::Itertools;
use std::io::Write;

/// Hard cap on the number of combinations attempted in one search.
pub const MAX_MODELS: usize = 5000;

/// Lazily produced sequence of candidate combinations, as indices into the
/// pool. Restartable: a fresh cursor re-yields the identical sequence.
pub struct CombinationCursor {
    cursor: Vec<usize>,
    depth: usize,
    n: usize,
    done: bool,
}

impl CombinationCursor {
    pub fn new(pool_size: usize) -> Self {
        Self {
            cursor: vec![0; pool_size],
            depth: 0,
            n: pool_size,
            done: pool_size == 0,
        }
    }

    /// Move the cursor to the next combination; sets `done` when the depth
    /// would retract past the shallowest slot.
    fn advance(&mut self) {
        if self.cursor[self.depth] + 1 >= self.n {
            // carry: reset this slot, retract, and bump the slot above
            self.cursor[self.depth] = 0;
            if self.depth == 0 {
                self.done = true;
                return;
            }
            self.depth -= 1;
            self.cursor[self.depth] += 1;
        } else if self.depth < self.n - 1 {
            // extend: open a deeper slot seeded one past the current position
            self.depth += 1;
            self.cursor[self.depth] = self.cursor[self.depth - 1] + 1;
        } else {
            // unreachable for the seeded cursor; kept as a terminating guard
            self.done = true;
        }
    }
}

impl Iterator for CombinationCursor {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let selection: Vec<usize> = self.cursor[..=self.depth].to_vec();
        self.advance();
        Some(selection)
    }
}

/// One row of the results table, in enumeration order.
#[derive(Debug, Clone)]
pub struct SearchRecord {
    /// None when the fit failed outright.
    pub converged: Option<bool>,
    /// 0 clean, positive converged-with-caveats, -1 errored.
    pub warn_flag: i32,
    /// Absent when the fit failed.
    pub pseudo_r_squared: Option<f64>,
    /// The attempted formula; failures are prefixed with "Error: ".
    pub formula: String,
}

/// The completed results table with its aggregate counts.
#[derive(Debug, Default)]
pub struct SearchResults {
    pub records: Vec<SearchRecord>,
}

impl SearchResults {
    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn n_converged(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.converged == Some(true))
            .count()
    }

    pub fn n_warned(&self) -> usize {
        self.records.iter().filter(|r| r.warn_flag > 0).count()
    }

    pub fn n_errored(&self) -> usize {
        self.records.iter().filter(|r| r.warn_flag < 0).count()
    }

    /// The converged record with the largest pseudo R-squared, if any
    /// combination converged at all.
    pub fn best_converged(&self) -> Option<&SearchRecord> {
        self.records
            .iter()
            .filter(|r| r.converged == Some(true))
            .filter(|r| r.pseudo_r_squared.is_some())
            .max_by(|a, b| {
                a.pseudo_r_squared
                    .partial_cmp(&b.pseudo_r_squared)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}

/// Render `response ~ a + b + ...`.
pub fn formula(response: &str, explanatory: &[String]) -> String {
    format!("{} ~ {}", response, explanatory.iter().join(" + "))
}

/// Recover the explanatory variable list from a formula string.
pub fn explanatory_from_formula(formula: &str) -> Vec<String> {
    formula
        .splitn(2, " ~ ")
        .nth(1)
        .unwrap_or("")
        .split(" + ")
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration of one search run. All values are fixed at construction
/// time; there are no runtime knobs.
pub struct SearchConfig {
    /// Variables included in every attempted model.
    pub base: Vec<String>,
    /// Additional candidates drawn from by the cursor.
    pub pool: Vec<String>,
    pub response: String,
    /// Per-fit iteration cap.
    pub max_iter: usize,
    /// Row cap on the results table.
    pub max_models: usize,
}

/// Enumerates combinations, fits each one silently, and aggregates the
/// outcomes. Owns the only mutable state of the search (the append-only
/// results table); never aborts on an individual fit failure.
pub struct SearchDriver<'a> {
    table: &'a Table,
    config: SearchConfig,
}

impl<'a> SearchDriver<'a> {
    pub fn new(table: &'a Table, config: SearchConfig) -> Self {
        Self { table, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run the search to exhaustion or to the row cap, whichever comes first.
    /// Per-failure diagnostics are written to `diagnostics` as they happen.
    pub fn run<W: Write>(&self, diagnostics: &mut W) -> Result<SearchResults> {
        let mut results = SearchResults::default();
        for selection in CombinationCursor::new(self.config.pool.len()) {
            if results.records.len() >= self.config.max_models {
                break;
            }
            // selected positions are resolved by index; any duplication the
            // cursor produced would be carried into the formula as-is
            let mut explanatory = self.config.base.clone();
            explanatory.extend(selection.iter().map(|&i| self.config.pool[i].clone()));
            let formula_text = formula(&self.config.response, &explanatory);

            match fit_model::<Logistic>(
                self.table,
                &explanatory,
                &self.config.response,
                self.config.max_iter,
            ) {
                Ok(fit) => results.records.push(SearchRecord {
                    converged: Some(fit.converged),
                    warn_flag: fit.warn_flag(),
                    pseudo_r_squared: Some(fit.pseudo_r_squared()),
                    formula: formula_text,
                }),
                Err(err) => {
                    writeln!(
                        diagnostics,
                        "Error \"{}\" while processing model {}",
                        err, formula_text
                    )?;
                    results.records.push(SearchRecord {
                        converged: None,
                        warn_flag: -1,
                        pseudo_r_squared: None,
                        formula: format!("Error: {}", formula_text),
                    });
                }
            }
        }
        Ok(results)
    }
}
