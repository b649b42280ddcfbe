//! Error types for the Gemini client

use std::fmt;

/// Errors that can occur when calling Vertex AI
#[derive(Debug)]
pub enum GeminiError {
    /// Could not obtain an access token
    Auth(gce_metadata::MetadataError),
    /// HTTP request failed
    Http(reqwest::Error),
    /// Vertex AI answered with a non-success status
    Api { status: u16, message: String },
    /// Failed to parse JSON response
    Json(serde_json::Error),
}

impl fmt::Display for GeminiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auth(e) => write!(f, "Gemini auth error: {}", e),
            Self::Http(e) => write!(f, "Gemini HTTP error: {}", e),
            Self::Api { status, message } => {
                write!(f, "Gemini API error ({}): {}", status, message)
            }
            Self::Json(e) => write!(f, "Gemini JSON parse error: {}", e),
        }
    }
}

impl std::error::Error for GeminiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Auth(e) => Some(e),
            Self::Http(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Api { .. } => None,
        }
    }
}

impl From<gce_metadata::MetadataError> for GeminiError {
    fn from(e: gce_metadata::MetadataError) -> Self {
        Self::Auth(e)
    }
}

impl From<reqwest::Error> for GeminiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for GeminiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Result type for Gemini operations
pub type Result<T> = std::result::Result<T, GeminiError>;
