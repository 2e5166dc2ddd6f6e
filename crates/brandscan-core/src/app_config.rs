#[derive(Clone)]
pub struct AppConfig {
    pub anthropic_api_key: Option<String>,
    pub anthropic_base_url: String,
    pub extraction_model: String,
    pub brand_guide_model: String,
    pub model_timeout_ms: u64,
    pub fetch_user_agent: String,
    pub fetch_timeout_secs: u64,
    pub max_page_chars: usize,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "anthropic_api_key",
                &self.anthropic_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("anthropic_base_url", &self.anthropic_base_url)
            .field("extraction_model", &self.extraction_model)
            .field("brand_guide_model", &self.brand_guide_model)
            .field("model_timeout_ms", &self.model_timeout_ms)
            .field("fetch_user_agent", &self.fetch_user_agent)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("max_page_chars", &self.max_page_chars)
            .field("log_level", &self.log_level)
            .finish()
    }
}
