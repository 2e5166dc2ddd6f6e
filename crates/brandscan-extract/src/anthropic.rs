//! HTTP client for the Anthropic Messages API.
//!
//! Only what the extraction pipelines need: a single user turn, an optional
//! server-side `web_fetch` tool, and text output. Every call is bounded by a
//! client-side timeout.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ExtractError;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Beta header value that enables the web fetch tool.
pub const WEB_FETCH_BETA: &str = "web-fetch-2025-09-10";

/// Output token ceiling for every call.
pub const MAX_OUTPUT_TOKENS: u32 = 8192;

/// How many times the model may call the fetch tool within one request.
pub const WEB_FETCH_MAX_USES: u32 = 5;

/// Client for the Anthropic Messages API.
///
/// Holds the credential as configured; [`AnthropicClient::require_api_key`]
/// lets pipelines fail before doing any network work when it is absent.
#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: Option<String>,
    messages_url: Url,
    timeout: Duration,
}

/// One Messages API request.
#[derive(Debug, Clone)]
pub struct MessageRequest<'a> {
    pub model: &'a str,
    pub system: &'a str,
    pub user: &'a str,
    /// Grants the model the bounded-use `web_fetch` tool.
    pub web_fetch: bool,
}

#[derive(Serialize)]
struct RequestBody<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [UserMessage<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<[WebFetchTool; 1]>,
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct WebFetchTool {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'static str,
    max_uses: u32,
}

/// Decoded Messages API response.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    WebFetchToolResult {
        #[serde(default)]
        content: Value,
    },
    #[serde(other)]
    Other,
}

impl MessageResponse {
    /// Concatenation of every text block, in order.
    #[must_use]
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Error code of the first failed `web_fetch` tool result, if any.
    #[must_use]
    pub fn web_fetch_error(&self) -> Option<String> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::WebFetchToolResult { content }
                if content.get("type").and_then(Value::as_str)
                    == Some("web_fetch_tool_result_error") =>
            {
                Some(
                    content
                        .get("error_code")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown")
                        .to_owned(),
                )
            }
            _ => None,
        })
    }
}

impl AnthropicClient {
    /// Creates a client for the API at `base_url`.
    ///
    /// `timeout_ms` bounds each call end to end, including reading the body.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ExtractError::InvalidUrl`] if `base_url`
    /// is not a valid URL.
    pub fn new(
        api_key: Option<&str>,
        base_url: &str,
        timeout_ms: u64,
    ) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let messages_url = Url::parse(&normalised)
            .and_then(|base| base.join("v1/messages"))
            .map_err(|e| ExtractError::InvalidUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_owned),
            messages_url,
            timeout: Duration::from_millis(timeout_ms),
        })
    }

    /// Returns the API key.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MissingApiKey`] when no key is configured.
    pub fn require_api_key(&self) -> Result<&str, ExtractError> {
        self.api_key.as_deref().ok_or(ExtractError::MissingApiKey)
    }

    /// Sends one request and decodes the response.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::MissingApiKey`] before any network activity.
    /// - [`ExtractError::Timeout`] when the call exceeds the client timeout.
    /// - [`ExtractError::ModelStatus`] for a non-2xx API response.
    /// - [`ExtractError::Http`] on transport failure.
    /// - [`ExtractError::Deserialize`] if the response envelope does not decode.
    pub async fn create_message(
        &self,
        request: &MessageRequest<'_>,
    ) -> Result<MessageResponse, ExtractError> {
        let api_key = self.require_api_key()?;
        let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);

        tracing::debug!(
            model = request.model,
            web_fetch = request.web_fetch,
            "calling model API"
        );

        tokio::time::timeout(self.timeout, self.send(api_key, request))
            .await
            .map_err(|_| ExtractError::Timeout { timeout_ms })?
    }

    async fn send(
        &self,
        api_key: &str,
        request: &MessageRequest<'_>,
    ) -> Result<MessageResponse, ExtractError> {
        let body = RequestBody {
            model: request.model,
            max_tokens: MAX_OUTPUT_TOKENS,
            system: request.system,
            messages: [UserMessage {
                role: "user",
                content: request.user,
            }],
            tools: request.web_fetch.then_some([WebFetchTool {
                kind: "web_fetch_20250910",
                name: "web_fetch",
                max_uses: WEB_FETCH_MAX_USES,
            }]),
        };

        let mut builder = self
            .client
            .post(self.messages_url.clone())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);
        if request.web_fetch {
            builder = builder.header("anthropic-beta", WEB_FETCH_BETA);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ExtractError::ModelStatus {
                status: status.as_u16(),
                body: text.chars().take(crate::error::RAW_PREFIX_CHARS).collect(),
            });
        }

        serde_json::from_str::<MessageResponse>(&text).map_err(|e| ExtractError::Deserialize {
            context: format!("messages response from {}", request.model),
            source: e,
        })
    }
}
