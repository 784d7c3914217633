//! Categorization of available domains via the text service.
//!
//! The service is asked for schema-constrained JSON. Some response variants
//! wrap the JSON in a markdown code fence, so the parser strips an optional
//! fence before decoding. On any malformed response or upstream failure the
//! categorizer falls back to a single deterministic bucket, since availability
//! results are still valuable without categorization, so this path can
//! never fail the pipeline.

use crate::error::NameHuntError;
use crate::llm::LlmClient;
use crate::types::{CategoryGroup, LlmConfig};

/// Label of the deterministic fallback bucket.
pub const FALLBACK_CATEGORY: &str = "Available Domains";

/// Groups available domains into labeled buckets.
pub struct Categorizer {
    llm: LlmClient,
}

impl Categorizer {
    pub fn new(config: &LlmConfig) -> Result<Self, NameHuntError> {
        Ok(Self {
            llm: LlmClient::from_config(config)?,
        })
    }

    /// Group the given domains. Infallible: falls back to a single bucket
    /// containing all inputs in input order.
    pub async fn categorize(&self, domains: &[String]) -> Vec<CategoryGroup> {
        if domains.is_empty() {
            return Vec::new();
        }

        let prompt = build_prompt(domains);
        match self.llm.complete(&prompt).await {
            Ok(text) => match parse_groups(&text) {
                Ok(groups) => groups,
                Err(e) => {
                    tracing::warn!(error = %e, "malformed categorization response, using fallback");
                    fallback_grouping(domains)
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "categorization failed, using fallback");
                fallback_grouping(domains)
            }
        }
    }
}

/// The deterministic single-bucket grouping: all inputs, input order.
pub fn fallback_grouping(domains: &[String]) -> Vec<CategoryGroup> {
    vec![CategoryGroup {
        category: FALLBACK_CATEGORY.to_string(),
        domains: domains.to_vec(),
    }]
}

fn build_prompt(domains: &[String]) -> String {
    format!(
        "Group these available domain names into 2-5 thematic categories. \
         Respond with JSON only, matching this schema exactly: \
         [{{\"category\": \"label\", \"domains\": [\"a.com\"]}}]. \
         Every input domain must appear in exactly one category. \
         Domains: {}",
        domains.join(", ")
    )
}

/// Strip an optional leading/trailing markdown code fence.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // The opening fence line may carry a language tag ("```json").
    let body = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => return trimmed,
    };
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

fn parse_groups(text: &str) -> Result<Vec<CategoryGroup>, NameHuntError> {
    let groups: Vec<CategoryGroup> = serde_json::from_str(strip_code_fence(text))?;
    if groups.is_empty() {
        return Err(NameHuntError::parse("category list is empty"));
    }
    Ok(groups)
}
