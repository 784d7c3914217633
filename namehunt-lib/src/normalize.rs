//! Domain token normalization and free-text extraction.
//!
//! A normalized token is lowercase, has no scheme prefix, no leading `www.`,
//! and no path/query suffix. Normalization is a total, deterministic,
//! idempotent function: any string produces some token, and callers filter
//! out empty results upstream.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    /// Matches substrings shaped like `label(.label)*.tld`; labels are
    /// alphanumeric with internal hyphens, the tld is 2+ letters.
    static ref DOMAIN_SHAPE: Regex = Regex::new(
        r"(?i)\b[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)*\.[a-z]{2,}\b"
    )
    .expect("domain shape regex is valid");
}

/// Clean a raw user-supplied string into a canonical comparable token.
///
/// - trims surrounding whitespace and lowercases
/// - strips leading `http://` / `https://` and `www.` prefixes, repeating
///   until none remain, so stacked prefixes (`www.www.`) collapse in one
///   pass and the function stays idempotent
/// - truncates at the first `/` (path/query/fragment discarded)
pub fn normalize(raw: &str) -> String {
    let mut token = raw.trim().to_lowercase();

    loop {
        let before = token.len();
        for prefix in ["https://", "http://", "www."] {
            if let Some(rest) = token.strip_prefix(prefix) {
                token = rest.to_string();
            }
        }
        if token.len() == before {
            break;
        }
    }

    if let Some(slash) = token.find('/') {
        token.truncate(slash);
    }

    token
}

/// Normalize a collection of raw inputs, dropping empties and collapsing
/// duplicates while preserving first-seen order.
pub fn normalize_all<I, S>(inputs: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut tokens = Vec::new();

    for raw in inputs {
        let token = normalize(raw.as_ref());
        if token.is_empty() {
            continue;
        }
        if seen.insert(token.clone()) {
            tokens.push(token);
        }
    }

    tokens
}

/// Isolate domain-shaped substrings from free-form text, then normalize.
///
/// Non-matching text is discarded silently. Duplicates collapse to the
/// first occurrence.
pub fn extract_domains(text: &str) -> Vec<String> {
    normalize_all(DOMAIN_SHAPE.find_iter(text).map(|m| m.as_str()))
}
