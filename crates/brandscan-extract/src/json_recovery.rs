//! Recovery of a single JSON object from free-form model output.

use serde_json::{Map, Value};

/// Extracts and parses the first balanced JSON object in `text`.
///
/// A response wrapped entirely in a fenced code block (optionally tagged
/// `json`) is unwrapped first. Scanning starts at the first `{` and tracks
/// brace depth, skipping over single- or double-quoted strings (with
/// backslash escapes) so braces inside string values do not count. The exact
/// span from the opening `{` to its matching `}` is then parsed.
///
/// Returns `None` when no `{` exists, the braces never balance, or the
/// balanced span is not a valid JSON object. `None` means "no JSON found";
/// it is not an error.
#[must_use]
pub fn extract_first_json_object(text: &str) -> Option<Map<String, Value>> {
    let body = strip_code_fence(text);
    let start = body.find('{')?;
    let end = matching_brace(&body[start..])?;

    match serde_json::from_str::<Value>(&body[start..=start + end]) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(error = %e, "balanced JSON span failed to parse");
            None
        }
    }
}

/// Unwraps a fenced code block that spans the whole trimmed input.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(after_open) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = after_open.strip_suffix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.trim()
}

/// Returns the byte offset of the `}` closing the `{` at offset 0.
///
/// Single quotes are accepted as string delimiters because models
/// occasionally use them informally.
fn matching_brace(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if let Some(q) = quote {
            if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}
