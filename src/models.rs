use serde::{Deserialize, Serialize};

use crate::error::{GeneratorError, Result};

/// Minimum length for a user story to be considered meaningful.
pub const MIN_STORY_LENGTH: usize = 10;

/// A single generated test scenario.
///
/// Category and priority are kept as free strings: replies phrase them
/// loosely ("edge case", "boundary", "Edge-Case") and nothing downstream
/// branches on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestScenario {
    /// Unique identifier for the test scenario, e.g. "TC001".
    pub scenario_id: String,
    /// Brief title describing the test scenario.
    pub title: String,
    /// Detailed description of what to test.
    pub description: String,
    /// Prerequisites for the test.
    pub preconditions: Vec<String>,
    /// Step-by-step instructions.
    pub test_steps: Vec<String>,
    /// Expected outcome of the test.
    pub expected_result: String,
    /// Type of test (positive, negative, edge case, security, ...).
    pub test_type: String,
    /// Test priority (high, medium, low).
    pub priority: String,
}

/// A complete test suite generated for one user story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSuite {
    /// Original user story.
    pub user_story: String,
    /// Generated test scenarios, in the order the model produced them.
    pub test_scenarios: Vec<TestScenario>,
    /// Areas of functionality covered.
    pub coverage_areas: Vec<String>,
    /// Total number of test scenarios. Always equals `test_scenarios.len()`.
    pub total_scenarios: usize,
}

impl TestSuite {
    /// Build a suite, restoring the count invariant.
    ///
    /// Model replies carry their own `total_scenarios`, which is not
    /// trustworthy; the stored count is always derived from the actual
    /// scenario list.
    pub fn new(
        user_story: String,
        test_scenarios: Vec<TestScenario>,
        coverage_areas: Vec<String>,
    ) -> Self {
        let total_scenarios = test_scenarios.len();
        Self {
            user_story,
            test_scenarios,
            coverage_areas,
            total_scenarios,
        }
    }
}

/// Validated input for one generation request.
///
/// Exists only for the duration of a single request; nothing persists it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryInput {
    /// User story description, at least [`MIN_STORY_LENGTH`] characters.
    pub story: String,
    /// Optional acceptance criteria. `None` when the caller supplied none.
    pub acceptance_criteria: Option<Vec<String>>,
    /// Type of user story.
    pub story_type: String,
}

impl StoryInput {
    /// Validate a raw story and optional criteria list.
    pub fn new(story: &str, acceptance_criteria: Option<Vec<String>>) -> Result<Self> {
        let trimmed = story.trim();
        if trimmed.is_empty() {
            return Err(GeneratorError::Validation(
                "user story must not be empty".to_string(),
            ));
        }
        if trimmed.chars().count() < MIN_STORY_LENGTH {
            return Err(GeneratorError::Validation(format!(
                "user story must be at least {} characters, got {}",
                MIN_STORY_LENGTH,
                trimmed.chars().count()
            )));
        }
        Ok(Self {
            story: story.to_string(),
            acceptance_criteria,
            story_type: "feature".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(id: &str) -> TestScenario {
        TestScenario {
            scenario_id: id.to_string(),
            title: "Test login".to_string(),
            description: "Test user login".to_string(),
            preconditions: vec!["User exists".to_string()],
            test_steps: vec!["Enter credentials".to_string(), "Click login".to_string()],
            expected_result: "User logged in".to_string(),
            test_type: "positive".to_string(),
            priority: "high".to_string(),
        }
    }

    #[test]
    fn test_valid_story_input() {
        let criteria = vec![
            "Valid credentials required".to_string(),
            "Error handling for invalid login".to_string(),
        ];
        let input = StoryInput::new(
            "As a user, I want to login to my account",
            Some(criteria.clone()),
        )
        .unwrap();

        assert_eq!(input.story, "As a user, I want to login to my account");
        assert_eq!(input.acceptance_criteria, Some(criteria));
        assert_eq!(input.story_type, "feature");
    }

    #[test]
    fn test_short_story_rejected() {
        let err = StoryInput::new("Short", None).unwrap_err();
        assert!(matches!(err, GeneratorError::Validation(_)));
    }

    #[test]
    fn test_empty_story_rejected() {
        assert!(StoryInput::new("", None).is_err());
        assert!(StoryInput::new("   ", None).is_err());
    }

    #[test]
    fn test_ten_chars_is_enough() {
        // Exactly at the boundary, content irrelevant.
        assert!(StoryInput::new("aaaaaaaaaa", None).is_ok());
        assert!(StoryInput::new("aaaaaaaaa", None).is_err());
    }

    #[test]
    fn test_omitted_criteria_stay_absent() {
        let input = StoryInput::new("As a user, I want to test the system functionality", None)
            .unwrap();
        assert!(input.acceptance_criteria.is_none());
    }

    #[test]
    fn test_suite_count_derived_from_list() {
        let suite = TestSuite::new(
            "Test story".to_string(),
            vec![scenario("TC001"), scenario("TC002"), scenario("TC003")],
            vec!["Authentication".to_string()],
        );
        assert_eq!(suite.total_scenarios, 3);
    }

    #[test]
    fn test_empty_suite_counts_zero() {
        let suite = TestSuite::new("Test story".to_string(), vec![], vec![]);
        assert_eq!(suite.total_scenarios, 0);
    }
}
