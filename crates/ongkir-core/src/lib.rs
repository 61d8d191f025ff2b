//! Shared building blocks for the shipping-quote workspace: environment
//! configuration, the inputs a host page hands to the quote controller, and
//! rupiah formatting.

pub mod app_config;
pub mod config;
pub mod host;
pub mod money;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, normalize_courier_codes};
pub use host::{normalize_weight, HostInputs, PreselectedAddress};
pub use money::format_rupiah;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
