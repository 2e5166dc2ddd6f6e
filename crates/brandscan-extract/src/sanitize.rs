//! HTML to bounded, model-safe plain text.
//!
//! Regex-based: only the visible text matters, so no DOM is built.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Default cap on sanitized page text sent to the model.
pub const DEFAULT_MAX_PAGE_CHARS: usize = 80_000;

/// Appended when the sanitized text was cut at the cap.
pub const TRUNCATION_MARKER: &str = "\n[... truncated for length ...]";

// Unclosed script/style/comment blocks run to end of input so their content
// can never leak into the output.
static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?(?:</script\s*>|\z)").expect("valid script regex")
});
static STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<style\b[^>]*>.*?(?:</style\s*>|\z)").expect("valid style regex")
});
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?(?:-->|\z)").expect("valid comment regex"));
static BLOCK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)</?(?:h[1-6]|p|div|br|li|ul|ol|table|tr|th|td|hr|section|article|header|footer|nav|main|aside|blockquote|pre)(?:\s[^>]*)?/?>",
    )
    .expect("valid block tag regex")
});
static ANY_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static DECIMAL_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(\d+);").expect("valid decimal reference regex"));
static HEX_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)&#x([0-9a-f]+);").expect("valid hex reference regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static EXCESS_NEWLINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid newline regex"));

/// Named entities decoded before numeric references. `&amp;` is decoded
/// separately, last, so its output is never decoded a second time.
const NAMED_ENTITIES: [(&str, &str); 6] = [
    ("(?i)&nbsp;", " "),
    ("(?i)&lt;", "<"),
    ("(?i)&gt;", ">"),
    ("(?i)&quot;", "\""),
    ("(?i)&#39;", "'"),
    ("(?i)&apos;", "'"),
];

static AMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)&amp;").expect("valid entity regex"));
static NAMED_ENTITY_RES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    NAMED_ENTITIES
        .iter()
        .map(|(pattern, replacement)| {
            (
                Regex::new(pattern).expect("valid entity regex"),
                *replacement,
            )
        })
        .collect()
});

/// Converts raw HTML into visible plain text capped at `max_chars` characters.
///
/// Script, style and comment blocks are dropped entirely, block-level tags
/// become line breaks, remaining tags are stripped, entities are decoded and
/// whitespace is collapsed so paragraphs are separated by one blank line.
/// Output longer than `max_chars` is cut and suffixed with
/// [`TRUNCATION_MARKER`].
#[must_use]
pub fn sanitize_html(html: &str, max_chars: usize) -> String {
    let text = SCRIPT_RE.replace_all(html, "");
    let text = STYLE_RE.replace_all(&text, "");
    let text = COMMENT_RE.replace_all(&text, "");

    let text = BLOCK_TAG_RE.replace_all(&text, "\n");
    let text = ANY_TAG_RE.replace_all(&text, " ");

    let text = decode_entities(&text);
    let text = collapse_whitespace(&text);

    truncate_chars(text, max_chars)
}

fn decode_entities(text: &str) -> String {
    let mut decoded = text.to_owned();
    for (re, replacement) in NAMED_ENTITY_RES.iter() {
        decoded = re.replace_all(&decoded, *replacement).into_owned();
    }

    let decoded = DECIMAL_REF_RE.replace_all(&decoded, |caps: &Captures<'_>| {
        caps[1]
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map_or_else(|| caps[0].to_owned(), String::from)
    });
    let decoded = HEX_REF_RE.replace_all(&decoded, |caps: &Captures<'_>| {
        u32::from_str_radix(&caps[1], 16)
            .ok()
            .and_then(char::from_u32)
            .map_or_else(|| caps[0].to_owned(), String::from)
    });
    AMP_RE.replace_all(&decoded, "&").into_owned()
}

fn collapse_whitespace(text: &str) -> String {
    let joined = text
        .split('\n')
        .map(|line| WHITESPACE_RE.replace_all(line, " ").trim().to_owned())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    EXCESS_NEWLINES_RE
        .replace_all(&joined, "\n\n")
        .trim()
        .to_owned()
}

fn truncate_chars(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &text[..cut]),
        None => text,
    }
}
