use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("ANTHROPIC_API_KEY is not set")]
    MissingApiKey,

    #[error("invalid homepage URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to fetch {url}: HTTP status {status}")]
    PageStatus { status: u16, url: String },

    #[error("model API returned status {status}: {body}")]
    ModelStatus { status: u16, body: String },

    #[error("model request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("web fetch tool failed for {url} ({error_code})")]
    WebFetchTool { url: String, error_code: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{context} returned invalid JSON. Raw response (first 500 chars): {raw_prefix}")]
    Unparseable { context: String, raw_prefix: String },
}

impl ExtractError {
    /// Configuration and caller-input errors fail the same way on every
    /// attempt, so they are never retried and never trigger a fallback.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingApiKey | Self::InvalidUrl { .. })
    }

    /// Builds an [`ExtractError::Unparseable`] carrying a bounded prefix of
    /// the raw model output.
    pub(crate) fn unparseable(context: &str, raw: &str) -> Self {
        Self::Unparseable {
            context: context.to_owned(),
            raw_prefix: raw.chars().take(RAW_PREFIX_CHARS).collect(),
        }
    }
}

/// Maximum characters of raw model output carried in diagnostic errors.
pub(crate) const RAW_PREFIX_CHARS: usize = 500;
