//! Exploratory regression modeling of forest-fire occurrence.
//!
//! The crate loads the Montesinho forest-fires record set, derives an
//! indicator-expanded and mean-centered analysis table, and asks two
//! questions of it: whether the meteorological and fire-index measurements
//! predict burned-area magnitude (ordinary least squares) and whether they
//! predict any burning at all (logistic regression). A brute-force search
//! driver enumerates variable combinations on top of a fixed base model and
//! records the convergence and fit quality of each attempt.
//!
//! The pipeline is explicit: each phase takes the previous phase's table as
//! input and nothing is shared mutably between phases.

pub mod error;
pub mod fit;
pub mod glm;
mod irls;
pub mod linear;
pub mod load;
pub mod logistic;
pub mod model;
pub mod report;
pub mod search;
pub mod table;
pub mod transform;
pub mod vif;

pub use error::{FireError, Result};
pub use fit::Fit;
pub use glm::Glm;
pub use linear::Linear;
pub use logistic::Logistic;
pub use model::{fit_model, Model, ModelBuilder};
pub use table::Table;
