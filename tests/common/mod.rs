//! Utility functions for testing
#![allow(dead_code)]

use fireglm::Table;
use ndarray::Array2;

/// Header of the forest-fires file, for building CSV fixtures inline.
pub const CSV_HEADER: &str = "X,Y,month,day,FFMC,DMC,DC,ISI,temp,RH,wind,rain,area";

/// Small deterministic congruential generator so fixtures need no external
/// randomness.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_f64(&mut self) -> f64 {
        // Numerical Recipes constants
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// A numeric table with five continuous predictors and a binary response
/// driven by the first two of them. The remaining predictors are noise.
#[allow(dead_code)]
pub fn synthetic_table(n_rows: usize) -> Table {
    let names = vec!["x1", "x2", "x3", "x4", "x5", "area"];
    let mut rng = Lcg::new(42);
    let mut data = Array2::<f64>::zeros((n_rows, names.len()));
    for i in 0..n_rows {
        let x: Vec<f64> = (0..5).map(|_| rng.next_f64() - 0.5).collect();
        let lin = 1.5 * x[0] - 2.0 * x[1];
        let noise = rng.next_f64() - 0.5;
        for (j, &v) in x.iter().enumerate() {
            data[[i, j]] = v;
        }
        data[[i, 5]] = if lin + noise > 0.0 { 1.0 } else { 0.0 };
    }
    Table::new(names, data).expect("fixture dimensions are consistent")
}

/// As `synthetic_table`, but with an extra column that is identically zero.
#[allow(dead_code)]
pub fn synthetic_table_with_zero_column(n_rows: usize) -> Table {
    let base = synthetic_table(n_rows);
    let mut names: Vec<String> = base.names().to_vec();
    names.push("dead".to_string());
    let mut data = Array2::<f64>::zeros((n_rows, names.len()));
    for (j, name) in base.names().iter().enumerate() {
        let col = base.column(name).expect("iterating fixture names");
        for i in 0..n_rows {
            data[[i, j]] = col[i];
        }
    }
    Table::new(names, data).expect("fixture dimensions are consistent")
}
