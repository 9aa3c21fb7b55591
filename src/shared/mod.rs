pub mod config;
pub mod error;
pub mod metrics;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use metrics::{MutationMetrics, MutationMetricsSnapshot};
pub use validation::ValidationFailureKind;
