use crate::models::StoryInput;

/// Fixed system instruction sent with every generation request.
pub fn system_prompt() -> &'static str {
    r#"You are an expert QA engineer and test case generator. Your task is to analyze user stories and generate comprehensive test scenarios.

For each user story, you should:
1. Identify all testable aspects and edge cases
2. Create positive, negative, and boundary test scenarios
3. Include proper test steps, preconditions, and expected results
4. Prioritize tests based on risk and importance
5. Ensure good test coverage

Generate test scenarios that cover:
- Happy path scenarios (positive testing)
- Error scenarios (negative testing)
- Boundary conditions and edge cases
- Integration points
- User experience aspects
- Performance considerations (when relevant)
- Security aspects (when relevant)

Each test scenario should be:
- Clear and unambiguous
- Executable by any QA tester
- Include specific steps and expected outcomes
- Properly categorized by type and priority"#
}

/// Machine-readable description of the reply shape appended to the user
/// prompt so the model returns parseable JSON.
fn format_instructions() -> &'static str {
    r#"The output must be a single JSON object conforming to this schema:

{
  "user_story": string,            // the original user story
  "test_scenarios": [              // generated test scenarios
    {
      "scenario_id": string,       // unique identifier, e.g. "TC001"
      "title": string,             // brief title for the scenario
      "description": string,       // detailed description of what to test
      "preconditions": [string],   // prerequisites for the test
      "test_steps": [string],      // step-by-step instructions
      "expected_result": string,   // expected outcome
      "test_type": string,         // positive, negative, edge case, security, ...
      "priority": string           // high, medium or low
    }
  ],
  "coverage_areas": [string],      // areas of functionality covered
  "total_scenarios": number        // number of scenarios
}

Return only the JSON object, optionally inside a ```json code fence."#
}

/// Build the user prompt for a validated story.
///
/// Deterministic: same input, same prompt.
pub fn build_user_prompt(input: &StoryInput) -> String {
    let mut prompt = format!(
        "Please generate comprehensive test scenarios for the following user story:\n\n\
         **User Story:** {}\n",
        input.story
    );

    if let Some(criteria) = &input.acceptance_criteria {
        prompt.push_str("\n**Acceptance Criteria:**\n");
        for criterion in criteria {
            prompt.push_str(&format!("- {}\n", criterion));
        }
    }

    prompt.push_str(&format!(
        "\nPlease provide a complete test suite in the following JSON format:\n{}\n\n\
         Generate 5-8 diverse test scenarios covering different testing aspects (positive, negative, edge cases, etc.).\n\
         Make sure each scenario has a unique ID, clear steps, and specific expected results.",
        format_instructions()
    ));

    prompt
}
