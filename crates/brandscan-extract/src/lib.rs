pub mod anthropic;
pub mod error;
pub mod extraction;
pub mod fetch;
pub mod guide;
pub mod json_recovery;
pub mod logo;
pub mod normalize;
pub mod profile;
pub mod prompts;
pub mod report;
pub mod sanitize;

pub use anthropic::{AnthropicClient, MessageRequest, MessageResponse};
pub use error::ExtractError;
pub use extraction::{ExtractionMode, Extractor, Strategy, MODEL_FETCH_CHAIN};
pub use fetch::{validate_homepage_url, PageFetcher};
pub use guide::GuideGenerator;
pub use json_recovery::extract_first_json_object;
pub use normalize::{normalize_intelligence, normalize_profile};
pub use profile::ProfileGenerator;
pub use report::{generate_guide, generate_report, BrandReport, ReportErrors};
pub use sanitize::sanitize_html;
