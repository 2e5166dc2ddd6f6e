//! Brand intelligence: the structured result of a homepage extraction.
//!
//! Every field is optional. Absence is the only representation of "unknown";
//! normalized values never hold an empty string or an empty list.

use serde::{Deserialize, Serialize};

/// A value the source may emit either as a single string or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrList {
    Text(String),
    List(Vec<String>),
}

/// Founding year, kept in whichever shape the source used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearFounded {
    Number(serde_json::Number),
    Text(String),
}

impl std::fmt::Display for YearFounded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YearFounded::Number(n) => write!(f, "{n}"),
            YearFounded::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandIntelligence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_story: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_goals: Option<TextOrList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slogan_or_tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_differentiators: Option<TextOrList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_customer_result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideal_customer_review_example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accreditations_and_awards: Option<TextOrList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_values: Option<TextOrList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_emotional_response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_voice_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_should_not_sound_like: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_brand_perception: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_persona: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_area_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub five_step_process: Option<TextOrList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_events_causing_service_needs: Option<TextOrList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handles_insurance_claims: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offers_drone_inspections: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_founded: Option<YearFounded>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_call_to_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offers_financing: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financing_callouts: Option<TextOrList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financing_disclaimers: Option<TextOrList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_example_content: Option<String>,
}

/// Schema keys of [`BrandIntelligence`], in prompt and guide order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntelligenceField {
    BusinessName,
    LogoUrl,
    OriginStory,
    BusinessGoals,
    SloganOrTagline,
    UniqueDifferentiators,
    PrimaryCustomerResult,
    IdealCustomerReviewExample,
    AccreditationsAndAwards,
    CoreValues,
    DesiredEmotionalResponse,
    BrandVoiceDescription,
    BrandTone,
    BrandShouldNotSoundLike,
    DesiredBrandPerception,
    BuyerPersona,
    LocalAreaName,
    FiveStepProcess,
    WeatherEventsCausingServiceNeeds,
    HandlesInsuranceClaims,
    OffersDroneInspections,
    YearFounded,
    PreferredCallToAction,
    OffersFinancing,
    FinancingCallouts,
    FinancingDisclaimers,
    ReferenceExampleContent,
}

/// Borrowed view of one field's value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRef<'a> {
    Missing,
    Text(&'a str),
    List(&'a [String]),
    Flag(bool),
    Year(&'a YearFounded),
}

impl IntelligenceField {
    pub const ALL: [IntelligenceField; 27] = [
        IntelligenceField::BusinessName,
        IntelligenceField::LogoUrl,
        IntelligenceField::OriginStory,
        IntelligenceField::BusinessGoals,
        IntelligenceField::SloganOrTagline,
        IntelligenceField::UniqueDifferentiators,
        IntelligenceField::PrimaryCustomerResult,
        IntelligenceField::IdealCustomerReviewExample,
        IntelligenceField::AccreditationsAndAwards,
        IntelligenceField::CoreValues,
        IntelligenceField::DesiredEmotionalResponse,
        IntelligenceField::BrandVoiceDescription,
        IntelligenceField::BrandTone,
        IntelligenceField::BrandShouldNotSoundLike,
        IntelligenceField::DesiredBrandPerception,
        IntelligenceField::BuyerPersona,
        IntelligenceField::LocalAreaName,
        IntelligenceField::FiveStepProcess,
        IntelligenceField::WeatherEventsCausingServiceNeeds,
        IntelligenceField::HandlesInsuranceClaims,
        IntelligenceField::OffersDroneInspections,
        IntelligenceField::YearFounded,
        IntelligenceField::PreferredCallToAction,
        IntelligenceField::OffersFinancing,
        IntelligenceField::FinancingCallouts,
        IntelligenceField::FinancingDisclaimers,
        IntelligenceField::ReferenceExampleContent,
    ];

    /// JSON key used in model output and serialized results.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            IntelligenceField::BusinessName => "business_name",
            IntelligenceField::LogoUrl => "logo_url",
            IntelligenceField::OriginStory => "origin_story",
            IntelligenceField::BusinessGoals => "business_goals",
            IntelligenceField::SloganOrTagline => "slogan_or_tagline",
            IntelligenceField::UniqueDifferentiators => "unique_differentiators",
            IntelligenceField::PrimaryCustomerResult => "primary_customer_result",
            IntelligenceField::IdealCustomerReviewExample => "ideal_customer_review_example",
            IntelligenceField::AccreditationsAndAwards => "accreditations_and_awards",
            IntelligenceField::CoreValues => "core_values",
            IntelligenceField::DesiredEmotionalResponse => "desired_emotional_response",
            IntelligenceField::BrandVoiceDescription => "brand_voice_description",
            IntelligenceField::BrandTone => "brand_tone",
            IntelligenceField::BrandShouldNotSoundLike => "brand_should_not_sound_like",
            IntelligenceField::DesiredBrandPerception => "desired_brand_perception",
            IntelligenceField::BuyerPersona => "buyer_persona",
            IntelligenceField::LocalAreaName => "local_area_name",
            IntelligenceField::FiveStepProcess => "five_step_process",
            IntelligenceField::WeatherEventsCausingServiceNeeds => {
                "weather_events_causing_service_needs"
            }
            IntelligenceField::HandlesInsuranceClaims => "handles_insurance_claims",
            IntelligenceField::OffersDroneInspections => "offers_drone_inspections",
            IntelligenceField::YearFounded => "year_founded",
            IntelligenceField::PreferredCallToAction => "preferred_call_to_action",
            IntelligenceField::OffersFinancing => "offers_financing",
            IntelligenceField::FinancingCallouts => "financing_callouts",
            IntelligenceField::FinancingDisclaimers => "financing_disclaimers",
            IntelligenceField::ReferenceExampleContent => "reference_example_content",
        }
    }

    /// Human-readable label used in the brand guide inputs block.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            IntelligenceField::BusinessName => "Business name",
            IntelligenceField::LogoUrl => "Logo URL",
            IntelligenceField::OriginStory => "Origin story",
            IntelligenceField::BusinessGoals => "Business goals",
            IntelligenceField::SloganOrTagline => "Slogan or tagline",
            IntelligenceField::UniqueDifferentiators => "Unique differentiators",
            IntelligenceField::PrimaryCustomerResult => "Primary customer result",
            IntelligenceField::IdealCustomerReviewExample => "Ideal customer review example",
            IntelligenceField::AccreditationsAndAwards => "Accreditations and awards",
            IntelligenceField::CoreValues => "Core values",
            IntelligenceField::DesiredEmotionalResponse => "Desired emotional response",
            IntelligenceField::BrandVoiceDescription => "Brand voice description",
            IntelligenceField::BrandTone => "Brand tone",
            IntelligenceField::BrandShouldNotSoundLike => "Brand should not sound like",
            IntelligenceField::DesiredBrandPerception => "Desired brand perception",
            IntelligenceField::BuyerPersona => "Buyer persona",
            IntelligenceField::LocalAreaName => "Local area name",
            IntelligenceField::FiveStepProcess => "Five step process",
            IntelligenceField::WeatherEventsCausingServiceNeeds => {
                "Weather events causing service needs"
            }
            IntelligenceField::HandlesInsuranceClaims => "Handles insurance claims",
            IntelligenceField::OffersDroneInspections => "Offers drone inspections",
            IntelligenceField::YearFounded => "Year founded",
            IntelligenceField::PreferredCallToAction => "Preferred call to action",
            IntelligenceField::OffersFinancing => "Offers financing",
            IntelligenceField::FinancingCallouts => "Financing callouts",
            IntelligenceField::FinancingDisclaimers => "Financing disclaimers",
            IntelligenceField::ReferenceExampleContent => "Reference example content",
        }
    }

    /// Comma-separated list of every schema key, for embedding in prompts.
    #[must_use]
    pub fn key_list() -> String {
        Self::ALL
            .iter()
            .map(|field| field.key())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl BrandIntelligence {
    /// Returns a borrowed view of `field`.
    #[must_use]
    pub fn get(&self, field: IntelligenceField) -> FieldRef<'_> {
        use IntelligenceField as F;

        match field {
            F::BusinessName => text_ref(self.business_name.as_ref()),
            F::LogoUrl => text_ref(self.logo_url.as_ref()),
            F::OriginStory => text_ref(self.origin_story.as_ref()),
            F::BusinessGoals => text_or_list_ref(self.business_goals.as_ref()),
            F::SloganOrTagline => text_ref(self.slogan_or_tagline.as_ref()),
            F::UniqueDifferentiators => text_or_list_ref(self.unique_differentiators.as_ref()),
            F::PrimaryCustomerResult => text_ref(self.primary_customer_result.as_ref()),
            F::IdealCustomerReviewExample => text_ref(self.ideal_customer_review_example.as_ref()),
            F::AccreditationsAndAwards => text_or_list_ref(self.accreditations_and_awards.as_ref()),
            F::CoreValues => text_or_list_ref(self.core_values.as_ref()),
            F::DesiredEmotionalResponse => text_ref(self.desired_emotional_response.as_ref()),
            F::BrandVoiceDescription => text_ref(self.brand_voice_description.as_ref()),
            F::BrandTone => text_ref(self.brand_tone.as_ref()),
            F::BrandShouldNotSoundLike => text_ref(self.brand_should_not_sound_like.as_ref()),
            F::DesiredBrandPerception => text_ref(self.desired_brand_perception.as_ref()),
            F::BuyerPersona => text_ref(self.buyer_persona.as_ref()),
            F::LocalAreaName => text_ref(self.local_area_name.as_ref()),
            F::FiveStepProcess => text_or_list_ref(self.five_step_process.as_ref()),
            F::WeatherEventsCausingServiceNeeds => {
                text_or_list_ref(self.weather_events_causing_service_needs.as_ref())
            }
            F::HandlesInsuranceClaims => flag_ref(self.handles_insurance_claims.as_ref()),
            F::OffersDroneInspections => flag_ref(self.offers_drone_inspections.as_ref()),
            F::YearFounded => year_ref(self.year_founded.as_ref()),
            F::PreferredCallToAction => text_ref(self.preferred_call_to_action.as_ref()),
            F::OffersFinancing => flag_ref(self.offers_financing.as_ref()),
            F::FinancingCallouts => text_or_list_ref(self.financing_callouts.as_ref()),
            F::FinancingDisclaimers => text_or_list_ref(self.financing_disclaimers.as_ref()),
            F::ReferenceExampleContent => text_ref(self.reference_example_content.as_ref()),
        }
    }
}

fn text_ref(value: Option<&String>) -> FieldRef<'_> {
    value.map_or(FieldRef::Missing, |s| FieldRef::Text(s))
}

fn text_or_list_ref(value: Option<&TextOrList>) -> FieldRef<'_> {
    match value {
        Some(TextOrList::Text(s)) => FieldRef::Text(s),
        Some(TextOrList::List(items)) => FieldRef::List(items),
        None => FieldRef::Missing,
    }
}

fn flag_ref(value: Option<&bool>) -> FieldRef<'static> {
    value.map_or(FieldRef::Missing, |b| FieldRef::Flag(*b))
}

fn year_ref(value: Option<&YearFounded>) -> FieldRef<'_> {
    value.map_or(FieldRef::Missing, FieldRef::Year)
}

#[cfg(test)]
#[path = "intelligence_test.rs"]
mod tests;
