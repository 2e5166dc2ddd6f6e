//! Homepage fetching and URL validation.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ExtractError;

/// Validates a caller-supplied homepage URL and returns it trimmed.
///
/// # Errors
///
/// Returns [`ExtractError::InvalidUrl`] if the input is blank, does not use
/// the `http` or `https` scheme, or cannot be parsed.
pub fn validate_homepage_url(input: &str) -> Result<String, ExtractError> {
    let trimmed = input.trim();
    let invalid = |reason: &str| ExtractError::InvalidUrl {
        url: input.to_owned(),
        reason: reason.to_owned(),
    };

    if trimmed.is_empty() {
        return Err(invalid("URL must not be empty"));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(invalid("URL must start with http:// or https://"));
    }
    Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;
    Ok(trimmed.to_owned())
}

/// Plain HTTP GET client for homepage HTML.
///
/// Static HTML only: nothing is rendered and no JavaScript runs.
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Creates a `PageFetcher` with a request timeout and a descriptive
    /// `User-Agent`. Redirects are followed.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }

    /// Fetches the page body at `url` as text.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::PageStatus`] for any non-2xx final status.
    /// - [`ExtractError::Http`] on network, TLS, timeout or body decoding failure.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ExtractError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "page fetch returned non-success status");
            return Err(ExtractError::PageStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(url, html_len = body.len(), "fetched page");
        Ok(body)
    }
}
