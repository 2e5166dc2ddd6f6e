pub mod app_config;
pub mod config;
pub mod intelligence;
pub mod profile;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use intelligence::{BrandIntelligence, FieldRef, IntelligenceField, TextOrList, YearFounded};
pub use profile::{BrandProfile, PROFILE_KEYS};

/// Sentinel written in place of free-text values the source did not provide.
pub const NOT_PROVIDED: &str = "Not Provided";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
