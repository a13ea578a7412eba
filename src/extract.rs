//! Pure extraction of a test suite from raw model output.
//!
//! Kept free of any network or I/O so it can be exercised directly against
//! malformed and adversarial replies.

use serde::Deserialize;

use crate::error::{GeneratorError, Result};
use crate::models::{TestScenario, TestSuite};

/// Suite as the model reports it, before the count invariant is restored.
#[derive(Debug, Deserialize)]
struct RawSuite {
    user_story: String,
    test_scenarios: Vec<TestScenario>,
    coverage_areas: Vec<String>,
    /// The model's own count. Ignored: the real count is derived.
    #[serde(default)]
    #[allow(dead_code)]
    total_scenarios: i64,
}

/// Return the content of the first fence opened by `opening`, if closed.
fn fenced_block<'a>(text: &'a str, opening: &str) -> Option<&'a str> {
    let start = text.find(opening)? + opening.len();
    let rest = &text[start..];
    let end = rest.find("```")?;
    Some(rest[..end].trim())
}

/// Locate the JSON payload in a free-form reply.
///
/// Models tend to wrap JSON in a markdown fence; look for a ```json fence
/// first, then any fence, and fall back to the whole (trimmed) reply.
pub fn extract_json_block(text: &str) -> &str {
    fenced_block(text, "```json")
        .or_else(|| fenced_block(text, "```"))
        .unwrap_or_else(|| text.trim())
}

/// Parse a raw model reply into a [`TestSuite`].
///
/// Syntactically invalid JSON yields [`GeneratorError::Parse`]; JSON that
/// parses but does not describe a suite yields
/// [`GeneratorError::Construction`]. The returned suite always has
/// `total_scenarios == test_scenarios.len()`, whatever the reply claimed.
pub fn parse_suite(response_text: &str) -> Result<TestSuite> {
    let block = extract_json_block(response_text);

    let value: serde_json::Value =
        serde_json::from_str(block).map_err(|e| GeneratorError::Parse(e.to_string()))?;

    let raw: RawSuite =
        serde_json::from_value(value).map_err(|e| GeneratorError::Construction(e.to_string()))?;

    Ok(TestSuite::new(
        raw.user_story,
        raw.test_scenarios,
        raw.coverage_areas,
    ))
}
