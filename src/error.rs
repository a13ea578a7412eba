use thiserror::Error;

/// Errors produced by the generation pipeline.
///
/// Parse and construction failures are deliberately separate variants: the
/// first means the model reply contained no syntactically valid JSON, the
/// second that the JSON parsed but did not describe a usable test suite.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Input rejected before any external call was made.
    #[error("invalid user story input: {0}")]
    Validation(String),

    /// The model reply could not be parsed as JSON.
    #[error("failed to parse AI response as JSON: {0}")]
    Parse(String),

    /// The reply parsed as JSON but lacked required fields or had wrong types.
    #[error("failed to build test suite from AI response: {0}")]
    Construction(String),

    /// The remote completion service returned an error or was unreachable.
    #[error("AI service error: {0}")]
    Api(String),

    /// Bad configuration or missing credential, detected at initialization.
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
