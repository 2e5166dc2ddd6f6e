//! Flat brand profile extraction. Always model-fetched, with no retry and no
//! fallback.

use brandscan_core::{AppConfig, BrandProfile};

use crate::anthropic::{AnthropicClient, MessageRequest};
use crate::error::ExtractError;
use crate::json_recovery::extract_first_json_object;
use crate::normalize::normalize_profile;
use crate::prompts;

#[derive(Clone)]
pub struct ProfileGenerator {
    model: AnthropicClient,
    extraction_model: String,
}

impl ProfileGenerator {
    #[must_use]
    pub fn new(model: AnthropicClient, extraction_model: impl Into<String>) -> Self {
        Self {
            model,
            extraction_model: extraction_model.into(),
        }
    }

    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] or [`ExtractError::InvalidUrl`] if the
    /// model client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ExtractError> {
        let model = AnthropicClient::new(
            config.anthropic_api_key.as_deref(),
            &config.anthropic_base_url,
            config.model_timeout_ms,
        )?;
        Ok(Self::new(model, config.extraction_model.clone()))
    }

    /// Extracts the 17-field profile for `url`.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::MissingApiKey`] before any network activity.
    /// - [`ExtractError::WebFetchTool`] if the tool reported a fetch failure.
    /// - [`ExtractError::Unparseable`] if the reply holds no JSON object.
    /// - Any model call error from [`AnthropicClient::create_message`].
    pub async fn generate(&self, url: &str) -> Result<BrandProfile, ExtractError> {
        let system = prompts::profile_system_prompt();
        let user = prompts::profile_message(url);
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
            .ok_or_else(|| ExtractError::unparseable("Brand profile extraction", &raw))?;
        Ok(normalize_profile(&object))
    }
}
