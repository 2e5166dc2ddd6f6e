//! Prompt text for the three model pipelines.

use brandscan_core::{IntelligenceField, PROFILE_KEYS};

const INTELLIGENCE_RULES: &str = r#"You are a Brand Intelligence Extraction AI.

Your task:
- Read the visible content of the provided homepage.
- Extract brand, business and positioning information ONLY from that content.
- Return structured JSON for downstream brand and design systems.

RULES:
- Do NOT use prior knowledge of the business.
- Do NOT fabricate facts.
- If information is not clearly present or reasonably supported, return "Not Provided".
- Prefer conservative accuracy over completeness.
- Reasonable inference is allowed ONLY for tone, perception and emotional qualities, never for operational facts.

LOGO URL:
- Look for the primary brand logo in the header or navigation image, an SVG used as a logo, or an image with "logo" in its filename or alt text.
- If several logos exist, choose the primary brand logo.
- If no clear logo is found, return null.

OUTPUT:
- Return VALID JSON ONLY: no commentary, explanations or markdown.
- Use "Yes", "No" or "Not Provided" for handles_insurance_claims, offers_drone_inspections and offers_financing.
- Arrays must be empty if no data is found.
- Do not infer financing, insurance handling, drone usage or founding year unless explicitly stated."#;

const WEB_FETCH_RULES: &str = "Use web_fetch only for this exact URL. Do not fetch any other URLs.
After you receive the page content, extract brand information and return the BrandIntelligence JSON as specified above.";

/// Section headings the brand guide must contain, in order.
pub const GUIDE_SECTIONS: [&str; 7] = [
    "Mission Statement",
    "Unique Value Proposition (UVP)",
    "Primary Audience",
    "Audience Needs & Pain Points",
    "Brand Voice & Personality",
    "Messaging Foundations",
    "Content Guidelines",
];

const GUIDE_SECTION_INSTRUCTIONS: [&str; 7] = [
    "Using the origin story, goals and core values, write a clear, authentic mission statement (1-2 sentences) that says why the business exists and what it promises customers. Keep it relevant to the primary audience and local context, use action verbs, avoid generic phrasing, and nod to a key differentiator if one is provided.",
    "Using what separates the company from local competitors, the primary result customers want, any unique process or guarantee, and relevant accreditations or awards, write a specific Unique Value Proposition (1-2 sentences). State the main benefit, say what makes the business different in its market, and back the claim with a process, guarantee or award where possible.",
    "Describe the primary audience in 1-2 sentences: who they are (demographics, role or situation) and where, if relevant. Keep it human and relatable.",
    "Using the primary customer result, weather events, insurance handling, financing and any described scenarios, summarize the audience's needs, pain points and desired outcomes (1-2 sentences or a bullet list). Name the events or frustrations that prompt them to seek help and the emotional or practical drivers behind it.",
    "Using the voice description, tone, desired feeling, brand perception, core values and what the brand should not sound like, summarize the voice and personality: 3-5 traits, the desired emotional impact, and explicit do and don't language guidelines. Use provided sample phrases as examples.",
    "Write: **Tagline** (use the provided one exactly, otherwise synthesize a short phrase); **Elevator Pitch** (1-2 sentences on who the business serves, what it does and why it matters); **Key Brand Messages** (2-4 recurring messages on differentiators, process, trust or values); **Required CTAs** (every call to action provided, as separate items).",
    "Write concise, actionable content guidelines: stylistic dos and don'ts, required disclaimers or compliance language, reference content to model, must-have sections, and any formatting, linking or CTA placement rules.",
];

/// System prompt for extraction from page text fetched by this process.
#[must_use]
pub fn intelligence_system_prompt() -> String {
    format!(
        "{INTELLIGENCE_RULES}\n\nBrandIntelligence JSON keys (use these exact keys): {}",
        IntelligenceField::key_list()
    )
}

/// System prompt for extraction where the model fetches the page itself.
#[must_use]
pub fn intelligence_web_fetch_system_prompt() -> String {
    format!(
        "{INTELLIGENCE_RULES}\n\n{WEB_FETCH_RULES}\n\nBrandIntelligence JSON keys (use these exact keys): {}",
        IntelligenceField::key_list()
    )
}

#[must_use]
pub fn intelligence_page_text_message(url: &str, page_text: &str) -> String {
    format!("Homepage URL: {url}\n\nPage content (visible text) to analyze:\n\n{page_text}")
}

#[must_use]
pub fn intelligence_web_fetch_message(url: &str) -> String {
    format!(
        "Fetch this exact URL and extract brand intelligence from its visible content:\n\n{url}\n\n\
         Use the web_fetch tool to retrieve the page, then extract and return a single JSON object \
         conforming to the BrandIntelligence interface (the exact keys you were given). \
         Return VALID JSON ONLY, no commentary or markdown."
    )
}

#[must_use]
pub fn profile_system_prompt() -> String {
    format!(
        "You are a Brand Profile Extraction AI.\n\n\
         Your task:\n\
         - Fetch the given URL with the web_fetch tool and read ONLY the visible page content.\n\
         - Extract brand and business information ONLY from what is explicitly visible on the page.\n\
         - Return a single JSON object using exactly the BrandProfile keys you were given.\n\
         - Use \"Not Provided\" for any field that is not clearly present on the page.\n\
         - Do NOT infer email, address, phone number or business hours unless they are explicitly shown.\n\
         - Output MUST be valid JSON only: no commentary, no markdown, no code fences.\n\n\
         BrandProfile keys (use these exact keys): {}",
        PROFILE_KEYS.join(", ")
    )
}

#[must_use]
pub fn profile_message(url: &str) -> String {
    format!(
        "Fetch this exact URL and extract a brand profile from its visible content only:\n\n{url}\n\n\
         Use the web_fetch tool to retrieve the page, then return a single JSON object with these keys: {}. \
         Use \"Not Provided\" for any missing field. Return VALID JSON ONLY, no commentary or markdown.",
        PROFILE_KEYS.join(", ")
    )
}

/// System prompt for the Markdown brand guide.
#[must_use]
pub fn guide_system_prompt() -> String {
    let headings = GUIDE_SECTIONS
        .iter()
        .map(|s| format!("`### {s}`"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut prompt = format!(
        "**Instructions:** Write a brand guide from the inputs provided. Output each section below \
         under a level-3 Markdown heading on its own line, using exactly: {headings}.\n\n\
         You will receive the business name, origin story, goals, slogan, differentiators, the \
         primary customer result, an ideal review, accreditations, desired feeling, brand voice, \
         what the brand should not sound like, reference content, core values, brand perception, \
         tone, buyer persona, local area name, the 5-step process, weather events causing service \
         needs, insurance claim handling, drone inspections, year founded, preferred call to action, \
         financing availability, financing callouts and financing disclaimers.\n"
    );
    for (section, instructions) in GUIDE_SECTIONS.iter().zip(GUIDE_SECTION_INSTRUCTIONS) {
        prompt.push_str(&format!("\n---\n\n### {section}\n\n{instructions}\n"));
    }
    prompt.push_str(
        "\n---\n\nUse `###` for every section title so they render as headings. \
         Output Markdown only. No JSON, no commentary, no preamble.",
    );
    prompt
}

#[must_use]
pub fn guide_message(inputs_block: &str) -> String {
    format!(
        "Use ONLY the inputs below. Do not invent or infer missing information. \
         Output Markdown only.\n\n--- Inputs ---\n\n{inputs_block}"
    )
}
