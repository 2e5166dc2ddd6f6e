//! Brand intelligence extraction with retry and fallback.
//!
//! Two strategies produce a [`BrandIntelligence`] for a homepage:
//!
//! - [`Strategy::ServerFetch`]: this process fetches the HTML, reduces it to
//!   visible text and sends the text to the model.
//! - [`Strategy::ModelFetch`]: the model fetches the page itself with the
//!   `web_fetch` tool.
//!
//! Strategies are composed as an ordered list by [`Extractor::run_chain`].

use brandscan_core::{AppConfig, BrandIntelligence};

use crate::anthropic::{AnthropicClient, MessageRequest};
use crate::error::ExtractError;
use crate::fetch::PageFetcher;
use crate::json_recovery::extract_first_json_object;
use crate::logo::find_logo_url;
use crate::normalize::normalize_intelligence;
use crate::prompts;
use crate::sanitize::{sanitize_html, TRUNCATION_MARKER};

/// One extraction attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    ServerFetch,
    ModelFetch,
}

impl Strategy {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ServerFetch => "server_fetch",
            Self::ModelFetch => "model_fetch",
        }
    }
}

/// Model fetch, one retry, then server fetch as the last resort.
pub const MODEL_FETCH_CHAIN: [Strategy; 3] = [
    Strategy::ModelFetch,
    Strategy::ModelFetch,
    Strategy::ServerFetch,
];

/// Caller-facing choice of extraction path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionMode {
    /// Server fetch only.
    Server,
    /// Model fetch with retry, falling back to server fetch.
    #[default]
    Model,
    /// Server fetch first; on failure, the full model-fetch chain.
    Auto,
}

impl ExtractionMode {
    #[must_use]
    pub fn chain(self) -> &'static [Strategy] {
        const SERVER_ONLY: [Strategy; 1] = [Strategy::ServerFetch];
        const AUTO: [Strategy; 4] = [
            Strategy::ServerFetch,
            Strategy::ModelFetch,
            Strategy::ModelFetch,
            Strategy::ServerFetch,
        ];
        match self {
            Self::Server => &SERVER_ONLY,
            Self::Model => &MODEL_FETCH_CHAIN,
            Self::Auto => &AUTO,
        }
    }
}

/// Runs extraction strategies against one model client and page fetcher.
#[derive(Clone)]
pub struct Extractor {
    model: AnthropicClient,
    fetcher: PageFetcher,
    extraction_model: String,
    max_page_chars: usize,
}

impl Extractor {
    #[must_use]
    pub fn new(
        model: AnthropicClient,
        fetcher: PageFetcher,
        extraction_model: impl Into<String>,
        max_page_chars: usize,
    ) -> Self {
        Self {
            model,
            fetcher,
            extraction_model: extraction_model.into(),
            max_page_chars,
        }
    }

    /// Builds an `Extractor` with clients configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if an HTTP client cannot be built or
    /// [`ExtractError::InvalidUrl`] if the API base URL is malformed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ExtractError> {
        let model = AnthropicClient::new(
            config.anthropic_api_key.as_deref(),
            &config.anthropic_base_url,
            config.model_timeout_ms,
        )?;
        let fetcher = PageFetcher::new(config.fetch_timeout_secs, &config.fetch_user_agent)?;
        Ok(Self::new(
            model,
            fetcher,
            config.extraction_model.clone(),
            config.max_page_chars,
        ))
    }

    /// Fetches the page here and asks the model to extract from its text.
    ///
    /// When the model names no logo, the best logo candidate found in the
    /// HTML fills `logo_url`.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::MissingApiKey`] before any network activity.
    /// - [`ExtractError::PageStatus`] or [`ExtractError::Http`] if the page
    ///   cannot be fetched.
    /// - [`ExtractError::Unparseable`] if the reply holds no JSON object.
    /// - Any model call error from [`AnthropicClient::create_message`].
    pub async fn extract_via_server_fetch(
        &self,
        url: &str,
    ) -> Result<BrandIntelligence, ExtractError> {
        self.model.require_api_key()?;

        let html = self.fetcher.fetch_html(url).await?;
        let page_text = sanitize_html(&html, self.max_page_chars);
        tracing::debug!(
            url,
            text_chars = page_text.chars().count(),
            truncated = page_text.ends_with(TRUNCATION_MARKER),
            "sanitized page"
        );

        let system = prompts::intelligence_system_prompt();
        let user = prompts::intelligence_page_text_message(url, &page_text);
        let response = self
            .model
            .create_message(&MessageRequest {
                model: &self.extraction_model,
                system: &system,
                user: &user,
                web_fetch: false,
            })
            .await?;

        let raw = response.text();
        let object = extract_first_json_object(&raw)
            .ok_or_else(|| ExtractError::unparseable("Extraction", &raw))?;

        let mut brand = normalize_intelligence(&object);
        if brand.logo_url.is_none() {
            brand.logo_url = find_logo_url(url, &html);
            if let Some(logo) = &brand.logo_url {
                tracing::debug!(url, logo, "logo_url filled from page markup");
            }
        }
        Ok(brand)
    }

    /// One model-fetch attempt with no retry.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::WebFetchTool`] if the tool reported a fetch failure.
    /// - [`ExtractError::Unparseable`] if the reply holds no JSON object.
    /// - Any model call error from [`AnthropicClient::create_message`].
    pub async fn attempt_model_fetch(&self, url: &str) -> Result<BrandIntelligence, ExtractError> {
        let system = prompts::intelligence_web_fetch_system_prompt();
        let user = prompts::intelligence_web_fetch_message(url);
        let response = self
            .model
            .create_message(&MessageRequest {
                model: &self.extraction_model,
                system: &system,
                user: &user,
                web_fetch: true,
            })
            .await?;

        if let Some(error_code) = response.web_fetch_error() {
            return Err(ExtractError::WebFetchTool {
                url: url.to_owned(),
                error_code,
            });
        }

        let raw = response.text();
        let object = extract_first_json_object(&raw)
            .ok_or_else(|| ExtractError::unparseable("Web fetch extraction", &raw))?;
        Ok(normalize_intelligence(&object))
    }

    /// Model fetch, one retry, then server fetch.
    ///
    /// # Errors
    ///
    /// Returns the server-fetch error when every attempt fails, or a
    /// configuration error as soon as one occurs.
    pub async fn extract_via_model_fetch(
        &self,
        url: &str,
    ) -> Result<BrandIntelligence, ExtractError> {
        self.run_chain(url, &MODEL_FETCH_CHAIN).await
    }

    /// Extraction using the path chosen by `mode`.
    ///
    /// # Errors
    ///
    /// See [`Extractor::run_chain`].
    pub async fn extract(
        &self,
        url: &str,
        mode: ExtractionMode,
    ) -> Result<BrandIntelligence, ExtractError> {
        self.run_chain(url, mode.chain()).await
    }

    /// Tries each strategy in order and returns the first success.
    ///
    /// A configuration error ends the chain immediately since every later
    /// attempt would fail the same way.
    ///
    /// # Errors
    ///
    /// Returns the last strategy's error when all fail, or the first
    /// configuration error. An empty chain is reported as
    /// [`ExtractError::Unparseable`] with an empty prefix.
    pub async fn run_chain(
        &self,
        url: &str,
        chain: &[Strategy],
    ) -> Result<BrandIntelligence, ExtractError> {
        let mut last_error = None;

        for (index, strategy) in chain.iter().copied().enumerate() {
            let result = match strategy {
                Strategy::ServerFetch => self.extract_via_server_fetch(url).await,
                Strategy::ModelFetch => self.attempt_model_fetch(url).await,
            };

            match result {
                Ok(brand) => {
                    if index > 0 {
                        tracing::info!(
                            url,
                            strategy = strategy.name(),
                            attempt = index + 1,
                            "extraction succeeded after earlier failures"
                        );
                    }
                    return Ok(brand);
                }
                Err(e) if e.is_configuration() => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        url,
                        strategy = strategy.name(),
                        attempt = index + 1,
                        of = chain.len(),
                        error = %e,
                        "extraction attempt failed"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| ExtractError::unparseable("Extraction", "")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_chain_retries_once_then_falls_back() {
        assert_eq!(
            ExtractionMode::Model.chain(),
            &[Strategy::ModelFetch, Strategy::ModelFetch, Strategy::ServerFetch]
        );
    }

    #[test]
    fn auto_chain_starts_with_server_then_runs_model_chain() {
        let chain = ExtractionMode::Auto.chain();
        assert_eq!(chain[0], Strategy::ServerFetch);
        assert_eq!(&chain[1..], &MODEL_FETCH_CHAIN);
    }

    #[test]
    fn server_mode_is_a_single_attempt() {
        assert_eq!(ExtractionMode::Server.chain(), &[Strategy::ServerFetch]);
    }

    #[test]
    fn default_mode_is_model() {
        assert_eq!(ExtractionMode::default(), ExtractionMode::Model);
    }

    #[tokio::test]
    async fn missing_key_aborts_chain_before_any_request() {
        let model = AnthropicClient::new(None, "http://127.0.0.1:9", 1_000).unwrap();
        let fetcher = PageFetcher::new(1, "test-agent").unwrap();
        let extractor = Extractor::new(model, fetcher, "test-model", 1_000);

        // Port 9 is never contacted: a fetch attempt would surface as Http.
        let err = extractor
            .extract("http://127.0.0.1:9/", ExtractionMode::Auto)
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::MissingApiKey), "got: {err:?}");
    }
}
