//! Brand profile: a flat contact and positioning summary.

use serde::{Deserialize, Serialize};

/// Keys of [`BrandProfile`] in declaration order.
pub const PROFILE_KEYS: [&str; 17] = [
    "company_name",
    "type_of_business",
    "website",
    "company_email",
    "company_address",
    "phone_number",
    "business_hours",
    "tone_of_voice",
    "target_audience",
    "customer_pain_points",
    "brand_promise",
    "brand_values",
    "what_does_your_brand_do",
    "what_makes_you_better_than_competitors",
    "unique_selling_proposition",
    "risks_of_inaction",
    "call_to_action",
];

/// Every field is always present; missing data is the literal
/// [`crate::NOT_PROVIDED`] rather than an absent key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandProfile {
    pub company_name: String,
    pub type_of_business: String,
    pub website: String,
    pub company_email: String,
    pub company_address: String,
    pub phone_number: String,
    pub business_hours: String,
    pub tone_of_voice: String,
    pub target_audience: String,
    pub customer_pain_points: String,
    pub brand_promise: String,
    pub brand_values: String,
    pub what_does_your_brand_do: String,
    pub what_makes_you_better_than_competitors: String,
    pub unique_selling_proposition: String,
    pub risks_of_inaction: String,
    pub call_to_action: String,
}

impl BrandProfile {
    /// Builds a profile by asking `value_for` for each key in [`PROFILE_KEYS`].
    pub fn from_fn<F>(mut value_for: F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        Self {
            company_name: value_for("company_name"),
            type_of_business: value_for("type_of_business"),
            website: value_for("website"),
            company_email: value_for("company_email"),
            company_address: value_for("company_address"),
            phone_number: value_for("phone_number"),
            business_hours: value_for("business_hours"),
            tone_of_voice: value_for("tone_of_voice"),
            target_audience: value_for("target_audience"),
            customer_pain_points: value_for("customer_pain_points"),
            brand_promise: value_for("brand_promise"),
            brand_values: value_for("brand_values"),
            what_does_your_brand_do: value_for("what_does_your_brand_do"),
            what_makes_you_better_than_competitors: value_for(
                "what_makes_you_better_than_competitors",
            ),
            unique_selling_proposition: value_for("unique_selling_proposition"),
            risks_of_inaction: value_for("risks_of_inaction"),
            call_to_action: value_for("call_to_action"),
        }
    }
}
