//! Shared configuration for the pulse workspace.

use thiserror::Error;

mod app_config;
mod config;

pub use app_config::{AppConfig, BucketStrategy, Environment};
pub use config::{load_app_config, load_app_config_from_env};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
