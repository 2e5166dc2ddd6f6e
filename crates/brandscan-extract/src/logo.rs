//! Best-effort brand logo detection from homepage HTML.
//!
//! Used to fill `logo_url` when the model did not name one. Candidates come
//! from `og:logo`, `<img>` tags marked as logos, icon `<link>`s and
//! `og:image`, and are ranked so logo-like assets beat favicon-sized icons.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;

static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("valid regex"));
static LINK_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<link\b[^>]*>").expect("valid regex"));
static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid regex"));
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\b([a-z][a-z0-9:_-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("valid attribute regex")
});
static SIZES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*x\s*(\d+)").expect("valid sizes regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    OgLogo,
    ImgLogo,
    LinkIcon,
    OgImage,
}

#[derive(Debug, Clone)]
struct Candidate {
    url: String,
    source: Source,
    dims: Option<(u32, u32)>,
}

/// Returns the most logo-like absolute image URL on the page, if any.
#[must_use]
pub fn find_logo_url(page_url: &str, html: &str) -> Option<String> {
    let base = Url::parse(page_url).ok()?;
    collect_candidates(&base, html)
        .into_iter()
        .max_by_key(score)
        .map(|c| c.url)
}

fn collect_candidates(base: &Url, html: &str) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    if let Some(url) = meta_content(html, "og:logo").and_then(|raw| absolutize(base, &raw)) {
        candidates.push(Candidate {
            url,
            source: Source::OgLogo,
            dims: None,
        });
    }

    for m in IMG_TAG_RE.find_iter(html) {
        let attrs = Attrs::parse(m.as_str());
        let marker = ["class", "id", "alt"]
            .iter()
            .filter_map(|name| attrs.get(name))
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase();
        if !marker.contains("logo") {
            continue;
        }
        let Some(url) = attrs.get("src").and_then(|raw| absolutize(base, raw)) else {
            continue;
        };
        let dims = attrs
            .get("width")
            .and_then(|w| w.parse().ok())
            .zip(attrs.get("height").and_then(|h| h.parse().ok()));
        candidates.push(Candidate {
            url,
            source: Source::ImgLogo,
            dims,
        });
    }

    for m in LINK_TAG_RE.find_iter(html) {
        let attrs = Attrs::parse(m.as_str());
        if !attrs
            .get("rel")
            .is_some_and(|rel| rel.to_ascii_lowercase().contains("icon"))
        {
            continue;
        }
        let Some(url) = attrs.get("href").and_then(|raw| absolutize(base, raw)) else {
            continue;
        };
        candidates.push(Candidate {
            url,
            source: Source::LinkIcon,
            dims: attrs.get("sizes").and_then(parse_sizes),
        });
    }

    if let Some(url) = meta_content(html, "og:image").and_then(|raw| absolutize(base, &raw)) {
        candidates.push(Candidate {
            url,
            source: Source::OgImage,
            dims: None,
        });
    }

    candidates
}

#[allow(clippy::case_sensitive_file_extension_comparisons)] // url is already lowercased
fn score(candidate: &Candidate) -> i32 {
    let url = candidate.url.to_ascii_lowercase();
    let has_ext = |ext: &str| url.ends_with(ext) || url.contains(&format!("{ext}?"));

    let mut score = match candidate.source {
        Source::OgLogo => 600,
        Source::ImgLogo => 500,
        Source::OgImage => 340,
        Source::LinkIcon => -30,
    };

    score += if has_ext(".svg") {
        120
    } else if has_ext(".png") {
        100
    } else if has_ext(".webp") {
        70
    } else if has_ext(".jpg") || has_ext(".jpeg") {
        50
    } else if has_ext(".ico") {
        -260
    } else {
        0
    };

    if url.contains("favicon") {
        score -= 220;
    }
    if url.contains("apple-touch-icon") {
        score -= 130;
    }
    if url.contains("logo") {
        score += 80;
    }

    if let Some((w, h)) = candidate.dims {
        score += match w.min(h) {
            0..=32 => -260,
            33..=64 => -160,
            65..=96 => -70,
            97..=119 => 0,
            120..=219 => 45,
            _ => 90,
        };
    }

    score
}

/// Attribute name/value pairs of a single tag.
struct Attrs(Vec<(String, String)>);

impl Attrs {
    fn parse(tag: &str) -> Self {
        Self(
            ATTR_RE
                .captures_iter(tag)
                .filter_map(|caps| {
                    let name = caps.get(1)?.as_str().to_ascii_lowercase();
                    let value = caps.get(2).or_else(|| caps.get(3))?.as_str().trim();
                    Some((name, value.to_owned()))
                })
                .collect(),
        )
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, v)| n == name && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }
}

fn meta_content(html: &str, property: &str) -> Option<String> {
    META_TAG_RE.find_iter(html).find_map(|m| {
        let attrs = Attrs::parse(m.as_str());
        let key = attrs.get("property").or_else(|| attrs.get("name"))?;
        if key.eq_ignore_ascii_case(property) {
            attrs.get("content").map(str::to_owned)
        } else {
            None
        }
    })
}

fn parse_sizes(value: &str) -> Option<(u32, u32)> {
    let caps = SIZES_RE.captures(value)?;
    Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
}

/// Resolves `raw` against the page URL. Only `http` and `https` results are
/// kept, which also rules out `data:` URIs.
fn absolutize(base: &Url, raw: &str) -> Option<String> {
    let raw = raw.replace("&amp;", "&");
    let url = base.join(&raw).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}
