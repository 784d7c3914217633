//! AI-assisted domain name generation.
//!
//! Builds a natural-language instruction from keyword/TLD hints, asks the
//! text service for a plain line-delimited list, and parses it into
//! normalized, deduplicated tokens. Upstream failure is not fatal: the
//! generator reports an empty list and the caller stops gracefully.

use crate::error::NameHuntError;
use crate::llm::LlmClient;
use crate::normalize::normalize_all;
use crate::types::LlmConfig;

/// Generates candidate domain names from keyword and TLD hints.
pub struct NameGenerator {
    llm: LlmClient,
    list_size: usize,
}

impl NameGenerator {
    pub fn new(config: &LlmConfig) -> Result<Self, NameHuntError> {
        Ok(Self {
            llm: LlmClient::from_config(config)?,
            list_size: config.list_size.max(1),
        })
    }

    /// Propose candidate domains for the given keywords and TLDs.
    ///
    /// Returns an empty list on upstream failure: "nothing to check" is a
    /// graceful end state, not an error.
    pub async fn generate(&self, keywords: &str, tlds: &str) -> Vec<String> {
        let prompt = build_prompt(keywords, tlds, self.list_size);

        match self.llm.complete(&prompt).await {
            Ok(text) => {
                let names = parse_name_list(&text);
                tracing::debug!(count = names.len(), "generator produced candidates");
                names
            }
            Err(e) => {
                tracing::warn!(error = %e, "name generation failed, continuing with no candidates");
                Vec::new()
            }
        }
    }
}

fn build_prompt(keywords: &str, tlds: &str, count: usize) -> String {
    format!(
        "Suggest exactly {count} domain names for a project about: {keywords}. \
         Use only these TLDs: {tlds}. \
         Respond with one domain per line, bare domains only, \
         no numbering, no commentary, no markdown.",
    )
}

/// Split a completion into normalized domain tokens.
///
/// Tolerates the decorations models add despite instructions: bullets,
/// numbering, and surrounding whitespace. Empty lines are discarded and
/// duplicates collapse to the first occurrence.
pub(crate) fn parse_name_list(text: &str) -> Vec<String> {
    normalize_all(text.lines().map(strip_list_decoration))
}

/// Remove a leading bullet (`-`, `*`, `•`) or numbering (`3.`, `3)`).
fn strip_list_decoration(line: &str) -> &str {
    let line = line.trim();
    let line = line
        .strip_prefix('-')
        .or_else(|| line.strip_prefix('*'))
        .or_else(|| line.strip_prefix('•'))
        .unwrap_or(line);
    let line = line.trim_start();

    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(stripped) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return stripped.trim();
        }
    }

    line
}
