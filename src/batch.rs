use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::format::{format_suite, OutputFormat};
use crate::models::TestSuite;

/// One entry of a batch input file: either a bare story string or an
/// object carrying a story and optional criteria.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Story(String),
    Detailed {
        story: String,
        #[serde(default)]
        criteria: Option<Vec<String>>,
    },
}

impl BatchEntry {
    pub fn story(&self) -> &str {
        match self {
            BatchEntry::Story(story) => story,
            BatchEntry::Detailed { story, .. } => story,
        }
    }

    pub fn criteria(&self) -> Option<Vec<String>> {
        match self {
            BatchEntry::Story(_) => None,
            BatchEntry::Detailed { criteria, .. } => criteria.clone(),
        }
    }
}

/// Load a batch file: a JSON array of stories or story/criteria objects.
pub fn load_batch<P: AsRef<Path>>(path: P) -> Result<Vec<BatchEntry>> {
    let contents = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read batch file: {}", path.as_ref().display()))?;

    let value: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse batch file: {}", path.as_ref().display()))?;

    if !value.is_array() {
        bail!("Input file should contain a JSON array of user stories");
    }

    serde_json::from_value(value).context("Batch entries must be strings or {story, criteria} objects")
}

/// Combine per-story suites into one output block.
///
/// JSON output is a single array of suites; the text formats are joined by
/// blank lines.
pub fn combine_output(suites: &[TestSuite], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(suites).unwrap_or_default(),
        _ => suites
            .iter()
            .map(|suite| format_suite(suite, format))
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TestScenario, TestSuite};

    fn suite(story: &str) -> TestSuite {
        TestSuite::new(
            story.to_string(),
            vec![TestScenario {
                scenario_id: "TC001".to_string(),
                title: "A scenario".to_string(),
                description: "Checks something".to_string(),
                preconditions: vec![],
                test_steps: vec!["Do the thing".to_string()],
                expected_result: "It worked".to_string(),
                test_type: "positive".to_string(),
                priority: "low".to_string(),
            }],
            vec!["General".to_string()],
        )
    }

    #[test]
    fn test_mixed_entry_shapes() {
        let entries: Vec<BatchEntry> = serde_json::from_str(
            r#"[
                "As a user, I want to reset my password",
                {"story": "As an admin, I want to export reports", "criteria": ["CSV format supported"]},
                {"story": "As a guest, I want to browse without an account"}
            ]"#,
        )
        .unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].story(), "As a user, I want to reset my password");
        assert!(entries[0].criteria().is_none());
        assert_eq!(
            entries[1].criteria(),
            Some(vec!["CSV format supported".to_string()])
        );
        assert!(entries[2].criteria().is_none());
    }

    #[test]
    fn test_non_array_file_rejected() {
        let dir = std::env::temp_dir();
        let path = dir.join("testgen_batch_not_array.json");
        fs::write(&path, r#"{"story": "not wrapped in an array"}"#).unwrap();
        let err = load_batch(&path).unwrap_err();
        assert!(err.to_string().contains("JSON array"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_combined_json_is_an_array() {
        let suites = vec![suite("Story one goes here"), suite("Story two goes here")];
        let output = combine_output(&suites, OutputFormat::Json);
        let parsed: Vec<TestSuite> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed, suites);
    }

    #[test]
    fn test_combined_text_joined_by_blank_lines() {
        let suites = vec![suite("Story one goes here"), suite("Story two goes here")];
        let output = combine_output(&suites, OutputFormat::Console);
        assert_eq!(output.matches("TEST CASE GENERATOR RESULTS").count(), 2);
        assert!(output.contains("\n\n"));
    }
}
