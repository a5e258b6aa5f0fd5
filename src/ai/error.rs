use serde_json::Error as JsonError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum AIError {
    NetworkError(String),
    ParseError(String),
    AuthenticationError(String),
    RateLimitError(String),
    APIError(String),
}

impl fmt::Display for AIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetworkError(msg) => write!(f, "Network error: {}", msg),
            Self::ParseError(msg) => write!(f, "Parse error: {}", msg),
            Self::AuthenticationError(msg) => write!(f, "Authentication error: {}", msg),
            Self::RateLimitError(msg) => write!(f, "Rate limit error: {}", msg),
            Self::APIError(msg) => write!(f, "API error: {}", msg),
        }
    }
}

impl std::error::Error for AIError {}

impl From<JsonError> for AIError {
    fn from(error: JsonError) -> Self {
        AIError::ParseError(format!("JSON deserialization error: {}", error))
    }
}

impl From<reqwest::Error> for AIError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            AIError::ParseError(error.to_string())
        } else {
            AIError::NetworkError(error.to_string())
        }
    }
}

/// Every candidate model was tried and none produced an answer.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationError {
    Exhausted {
        attempts: usize,
        last_error: Option<AIError>,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted {
                last_error: Some(e),
                ..
            } => write!(f, "All models failed. Last error: {}", e),
            Self::Exhausted {
                last_error: None, ..
            } => write!(f, "Unable to generate response with available models."),
        }
    }
}

impl std::error::Error for GenerationError {}
