use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL_TIMEOUT_MS: u64 = 120_000;
pub const DEFAULT_USER_AGENT: &str = "BrandIntelligenceExtractor/1.0 (extraction; no indexing)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric setting holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric setting holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing is decoupled from the process environment so it can be tested
/// with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let anthropic_api_key = lookup("ANTHROPIC_API_KEY")
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty());
    let anthropic_base_url = or_default("ANTHROPIC_BASE_URL", DEFAULT_ANTHROPIC_BASE_URL);
    let extraction_model = or_default("ANTHROPIC_EXTRACTION_MODEL", DEFAULT_MODEL);
    let brand_guide_model = or_default("ANTHROPIC_BRANDGUIDE_MODEL", DEFAULT_MODEL);
    let model_timeout_ms = lookup("ANTHROPIC_WEB_FETCH_TIMEOUT_MS")
        .ok()
        .as_deref()
        .and_then(parse_timeout_ms)
        .unwrap_or(DEFAULT_MODEL_TIMEOUT_MS);

    let fetch_user_agent = or_default("BRANDSCAN_USER_AGENT", DEFAULT_USER_AGENT);
    let fetch_timeout_secs = parse_u64("BRANDSCAN_FETCH_TIMEOUT_SECS", "30")?;
    let max_page_chars = parse_usize("BRANDSCAN_MAX_PAGE_CHARS", "80000")?;
    let log_level = or_default("BRANDSCAN_LOG_LEVEL", "info");

    Ok(AppConfig {
        anthropic_api_key,
        anthropic_base_url,
        extraction_model,
        brand_guide_model,
        model_timeout_ms,
        fetch_user_agent,
        fetch_timeout_secs,
        max_page_chars,
        log_level,
    })
}

/// Parses the model timeout override. Zero and non-numeric values are
/// rejected so the caller falls back to [`DEFAULT_MODEL_TIMEOUT_MS`].
fn parse_timeout_ms(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|ms| *ms > 0)
}
