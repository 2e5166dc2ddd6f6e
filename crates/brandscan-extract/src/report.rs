//! Combined brand guide and profile for one homepage.
//!
//! The two halves run concurrently and fail independently: a failed half
//! leaves its slot empty and records its error message.

use brandscan_core::BrandProfile;
use serde::Serialize;

use crate::error::ExtractError;
use crate::extraction::{ExtractionMode, Extractor};
use crate::guide::GuideGenerator;
use crate::profile::ProfileGenerator;

#[derive(Debug, Clone, Serialize)]
pub struct BrandReport {
    pub markdown: Option<String>,
    pub profile: Option<BrandProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ReportErrors>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guide: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

impl BrandReport {
    /// True when neither half produced output.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markdown.is_none() && self.profile.is_none()
    }
}

/// Extracts intelligence with `mode` and writes the guide from it.
///
/// # Errors
///
/// Returns the extraction error, or the guide generation error.
pub async fn generate_guide(
    extractor: &Extractor,
    guide: &GuideGenerator,
    url: &str,
    mode: ExtractionMode,
) -> Result<String, ExtractError> {
    let brand = extractor.extract(url, mode).await?;
    guide.generate_markdown(&brand).await
}

/// Runs the guide flow and the profile extraction concurrently.
///
/// [`ExtractionMode::Auto`] reproduces the usual guide flow: server fetch
/// first, then model fetch.
pub async fn generate_report(
    extractor: &Extractor,
    guide: &GuideGenerator,
    profile: &ProfileGenerator,
    url: &str,
    mode: ExtractionMode,
) -> BrandReport {
    let (guide_result, profile_result) = tokio::join!(
        generate_guide(extractor, guide, url, mode),
        profile.generate(url),
    );

    let mut errors = ReportErrors::default();
    let markdown = guide_result
        .map_err(|e| {
            tracing::warn!(url, error = %e, "brand guide generation failed");
            errors.guide = Some(e.to_string());
        })
        .ok();
    let profile = profile_result
        .map_err(|e| {
            tracing::warn!(url, error = %e, "brand profile extraction failed");
            errors.profile = Some(e.to_string());
        })
        .ok();

    let has_errors = errors.guide.is_some() || errors.profile.is_some();
    BrandReport {
        markdown,
        profile,
        errors: has_errors.then_some(errors),
    }
}
