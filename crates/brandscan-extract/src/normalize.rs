//! Normalization from recovered model JSON to [`BrandIntelligence`] and
//! [`BrandProfile`].
//!
//! The raw object is untyped: keys may be missing, extraneous, null or of the
//! wrong shape. Unknown keys and nested objects are dropped. Each schema key
//! has exactly one coercion rule, listed in [`apply_field`].

use brandscan_core::{
    BrandIntelligence, BrandProfile, IntelligenceField, TextOrList, YearFounded, NOT_PROVIDED,
};
use serde_json::{Map, Value};

/// Normalizes a recovered object into [`BrandIntelligence`].
///
/// The result never holds an empty string or an empty list: empty free-text
/// becomes [`NOT_PROVIDED`], while empty lists, unrecognized flags and empty
/// logo URLs are omitted.
#[must_use]
pub fn normalize_intelligence(raw: &Map<String, Value>) -> BrandIntelligence {
    let mut out = BrandIntelligence::default();
    for field in IntelligenceField::ALL {
        if let Some(value) = raw.get(field.key()) {
            apply_field(&mut out, field, value);
        }
    }
    out
}

/// The field-to-coercion table.
fn apply_field(out: &mut BrandIntelligence, field: IntelligenceField, value: &Value) {
    use IntelligenceField as F;

    match field {
        F::BusinessName => out.business_name = text(value),
        F::LogoUrl => out.logo_url = logo_url(value),
        F::OriginStory => out.origin_story = text(value),
        F::BusinessGoals => out.business_goals = text_or_list(value),
        F::SloganOrTagline => out.slogan_or_tagline = text(value),
        F::UniqueDifferentiators => out.unique_differentiators = text_or_list(value),
        F::PrimaryCustomerResult => out.primary_customer_result = text(value),
        F::IdealCustomerReviewExample => out.ideal_customer_review_example = text(value),
        F::AccreditationsAndAwards => out.accreditations_and_awards = text_or_list(value),
        F::CoreValues => out.core_values = text_or_list(value),
        F::DesiredEmotionalResponse => out.desired_emotional_response = text(value),
        F::BrandVoiceDescription => out.brand_voice_description = text(value),
        F::BrandTone => out.brand_tone = text(value),
        F::BrandShouldNotSoundLike => out.brand_should_not_sound_like = text(value),
        F::DesiredBrandPerception => out.desired_brand_perception = text(value),
        F::BuyerPersona => out.buyer_persona = text(value),
        F::LocalAreaName => out.local_area_name = text(value),
        F::FiveStepProcess => out.five_step_process = text_or_list(value),
        F::WeatherEventsCausingServiceNeeds => {
            out.weather_events_causing_service_needs = text_or_list(value);
        }
        F::HandlesInsuranceClaims => out.handles_insurance_claims = flag(value),
        F::OffersDroneInspections => out.offers_drone_inspections = flag(value),
        F::YearFounded => out.year_founded = year(value),
        F::PreferredCallToAction => out.preferred_call_to_action = text(value),
        F::OffersFinancing => out.offers_financing = flag(value),
        F::FinancingCallouts => out.financing_callouts = text_or_list(value),
        F::FinancingDisclaimers => out.financing_disclaimers = text_or_list(value),
        F::ReferenceExampleContent => out.reference_example_content = text(value),
    }
}

/// Trimmed string, or [`NOT_PROVIDED`] when blank.
fn non_blank_or_sentinel(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        NOT_PROVIDED.to_owned()
    } else {
        trimmed.to_owned()
    }
}

fn item_to_string(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Free text. Scalars are stringified; a non-empty list is joined.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(non_blank_or_sentinel(s)),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) if !items.is_empty() => Some(non_blank_or_sentinel(
            &items.iter().map(item_to_string).collect::<Vec<_>>().join(", "),
        )),
        Value::Array(_) | Value::Object(_) | Value::Null => None,
    }
}

/// Scalar text or a non-empty list, kept in the shape given.
fn text_or_list(value: &Value) -> Option<TextOrList> {
    match value {
        Value::Array(items) if items.is_empty() => None,
        Value::Array(items) => Some(TextOrList::List(
            items.iter().map(item_to_string).collect(),
        )),
        other => text(other).map(TextOrList::Text),
    }
}

/// Tri-state flag: anything unrecognized is `None`, never `false`.
#[allow(clippy::float_cmp)] // exact 1 / 0 only
fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(v) if v == 1.0 => Some(true),
            Some(v) if v == 0.0 => Some(false),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "1" => Some(true),
            "no" | "false" | "0" => Some(false),
            _ => None,
        },
        Value::Array(_) | Value::Object(_) | Value::Null => None,
    }
}

fn year(value: &Value) -> Option<YearFounded> {
    match value {
        Value::Number(n) => Some(YearFounded::Number(n.clone())),
        Value::String(s) => Some(YearFounded::Text(non_blank_or_sentinel(s))),
        _ => None,
    }
}

/// Logo URL is a non-empty string or absent; the sentinel counts as absent.
fn logo_url(value: &Value) -> Option<String> {
    let trimmed = value.as_str()?.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NOT_PROVIDED) {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Normalizes a recovered object into a fully populated [`BrandProfile`].
///
/// Every key is present. Missing, non-string and blank values become
/// [`NOT_PROVIDED`]; strings are trimmed.
#[must_use]
pub fn normalize_profile(raw: &Map<String, Value>) -> BrandProfile {
    BrandProfile::from_fn(|key| {
        raw.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map_or_else(|| NOT_PROVIDED.to_owned(), str::to_owned)
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
