pub mod allocation;
pub mod analysis;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod optimizer;
pub mod output;
pub mod plan;
pub mod policy;
pub mod revaluation;
pub mod structure;
pub mod values;

pub use error::{Error, Result};
pub use models::{ChipDenomination, OptimizeParams};
pub use optimizer::optimize;
pub use plan::{OptimizationResult, RevaluationResult};
pub use revaluation::analyze_revaluation;
