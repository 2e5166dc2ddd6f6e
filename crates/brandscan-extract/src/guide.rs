//! Markdown brand guide generation from a [`BrandIntelligence`].

use std::fmt::Write as _;

use brandscan_core::{AppConfig, BrandIntelligence, FieldRef, IntelligenceField, NOT_PROVIDED};

use crate::anthropic::{AnthropicClient, MessageRequest};
use crate::error::ExtractError;
use crate::prompts::{self, GUIDE_SECTIONS};

/// Renders the prompt inputs block: one `Label: value` line per field in
/// schema order, lists as indented bullets, flags as `Yes`/`No`.
#[must_use]
pub fn format_inputs(brand: &BrandIntelligence) -> String {
    let mut lines = Vec::with_capacity(IntelligenceField::ALL.len());

    for field in IntelligenceField::ALL {
        let label = field.label();
        match brand.get(field) {
            FieldRef::List(items) if !items.is_empty() => {
                let mut block = format!("{label}:");
                for item in items {
                    let _ = write!(block, "\n  - {item}");
                }
                lines.push(block);
            }
            FieldRef::Text(text) => {
                let text = text.trim();
                let value = if text.is_empty() { NOT_PROVIDED } else { text };
                lines.push(format!("{label}: {value}"));
            }
            FieldRef::Flag(flag) => {
                lines.push(format!("{label}: {}", if flag { "Yes" } else { "No" }));
            }
            FieldRef::Year(year) => {
                let year = year.to_string();
                let year = year.trim();
                let value = if year.is_empty() { NOT_PROVIDED } else { year };
                lines.push(format!("{label}: {value}"));
            }
            FieldRef::List(_) | FieldRef::Missing => {
                lines.push(format!("{label}: {NOT_PROVIDED}"));
            }
        }
    }

    lines.join("\n")
}

/// Guide section headings absent from `markdown`.
#[must_use]
pub fn missing_sections(markdown: &str) -> Vec<&'static str> {
    GUIDE_SECTIONS
        .into_iter()
        .filter(|section| {
            !markdown
                .lines()
                .any(|line| line.trim().strip_prefix("###").map(str::trim) == Some(*section))
        })
        .collect()
}

/// Generates brand guides with a dedicated model.
#[derive(Clone)]
pub struct GuideGenerator {
    model: AnthropicClient,
    guide_model: String,
}

impl GuideGenerator {
    #[must_use]
    pub fn new(model: AnthropicClient, guide_model: impl Into<String>) -> Self {
        Self {
            model,
            guide_model: guide_model.into(),
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
        Ok(Self::new(model, config.brand_guide_model.clone()))
    }

    /// Writes the Markdown guide for `brand`, trimmed of surrounding
    /// whitespace. The output is returned as-is; missing section headings
    /// are only logged.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::MissingApiKey`] before any network activity.
    /// - Any model call error from [`AnthropicClient::create_message`].
    pub async fn generate_markdown(
        &self,
        brand: &BrandIntelligence,
    ) -> Result<String, ExtractError> {
        self.model.require_api_key()?;

        let system = prompts::guide_system_prompt();
        let user = prompts::guide_message(&format_inputs(brand));
        let response = self
            .model
            .create_message(&MessageRequest {
                model: &self.guide_model,
                system: &system,
                user: &user,
                web_fetch: false,
            })
            .await?;

        let markdown = response.text().trim().to_owned();
        let missing = missing_sections(&markdown);
        if !missing.is_empty() {
            tracing::warn!(?missing, "brand guide is missing section headings");
        }
        Ok(markdown)
    }
}

#[cfg(test)]
mod tests {
    use brandscan_core::{TextOrList, YearFounded};

    use super::*;

    #[test]
    fn empty_brand_renders_every_field_as_not_provided() {
        let block = format_inputs(&BrandIntelligence::default());
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines.len(), IntelligenceField::ALL.len());
        for (line, field) in lines.iter().zip(IntelligenceField::ALL) {
            assert_eq!(*line, format!("{}: Not Provided", field.label()));
        }
    }

    #[test]
    fn lists_render_as_indented_bullets() {
        let brand = BrandIntelligence {
            core_values: Some(TextOrList::List(vec!["Honesty".into(), "Craft".into()])),
            ..Default::default()
        };
        let block = format_inputs(&brand);
        let label = IntelligenceField::CoreValues.label();
        assert!(block.contains(&format!("{label}:\n  - Honesty\n  - Craft\n")));
    }

    #[test]
    fn flags_render_yes_and_no() {
        let brand = BrandIntelligence {
            offers_financing: Some(true),
            handles_insurance_claims: Some(false),
            ..Default::default()
        };
        let block = format_inputs(&brand);
        assert!(block.contains(&format!("{}: Yes", IntelligenceField::OffersFinancing.label())));
        assert!(block.contains(&format!(
            "{}: No",
            IntelligenceField::HandlesInsuranceClaims.label()
        )));
    }

    #[test]
    fn sentinel_and_values_pass_through() {
        let brand = BrandIntelligence {
            business_name: Some("Acme Roofing".into()),
            slogan_or_tagline: Some(NOT_PROVIDED.into()),
            year_founded: Some(YearFounded::Number(1987.into())),
            ..Default::default()
        };
        let block = format_inputs(&brand);
        assert!(block.starts_with(&format!(
            "{}: Acme Roofing\n",
            IntelligenceField::BusinessName.label()
        )));
        assert!(block.contains(&format!(
            "{}: Not Provided",
            IntelligenceField::SloganOrTagline.label()
        )));
        assert!(block.contains(&format!("{}: 1987", IntelligenceField::YearFounded.label())));
    }

    #[test]
    fn detects_missing_sections() {
        let markdown =
            "### Mission Statement\nWe fix roofs.\n\n###  Primary Audience \nHomeowners.";
        let missing = missing_sections(markdown);
        assert_eq!(missing.len(), 5);
        assert!(!missing.contains(&"Mission Statement"));
        assert!(!missing.contains(&"Primary Audience"));
        assert!(missing.contains(&"Content Guidelines"));
    }

    #[test]
    fn complete_guide_has_no_missing_sections() {
        let markdown = GUIDE_SECTIONS
            .iter()
            .map(|s| format!("### {s}\n\nBody."))
            .collect::<Vec<_>>()
            .join("\n\n");
        assert!(missing_sections(&markdown).is_empty());
    }
}
