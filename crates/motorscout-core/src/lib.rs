pub mod app_config;
pub mod config;
pub mod history;
pub mod lenient;
pub mod listings;
pub mod postcode;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use history::{load_checks, CheckStatus, HistoryCheck, IssueType, Severity, ValidationIssue};
pub use listings::{load_listings, Category, Condition, Coordinate, Listing};
pub use postcode::normalize_postcode;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("configuration validation failed: {0}")]
    Validation(String),

    #[error("failed to read snapshot file {path}: {source}")]
    SnapshotIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot file {path}: {source}")]
    SnapshotParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
