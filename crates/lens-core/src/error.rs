//! Error types for lens-core

use thiserror::Error;

/// Result type alias for lens-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for pipeline operations
#[derive(Error, Debug)]
pub enum Error {
    /// Submitted text was empty or whitespace only
    #[error("Input text is empty")]
    EmptyInput,

    /// An upstream API call failed
    #[error("Upstream request failed: {0}")]
    Upstream(String),

    /// An upstream API answered with something we could not use
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),

    /// Configuration problem
    #[error("Configuration error: {0}")]
    Config(String),

    /// Event addressed a sentence the document does not have
    #[error("Invalid sentence: {0}")]
    InvalidSentence(String),

    /// View state could not be rendered or updated
    #[error("Render error: {0}")]
    Render(String),
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        Error::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::EmptyInput.to_string(), "Input text is empty");

        let err = Error::Upstream("connection reset".to_string());
        assert_eq!(err.to_string(), "Upstream request failed: connection reset");

        let err = Error::InvalidSentence("no sentence 4 (document has 2)".to_string());
        assert_eq!(err.to_string(), "Invalid sentence: no sentence 4 (document has 2)");
    }
}
