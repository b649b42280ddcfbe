//! Error types for the fact service

use std::fmt;

#[derive(Debug)]
pub enum FactServiceError {
    /// Project id lookup failed
    Metadata(gce_metadata::MetadataError),
    /// Configuration error
    Config(String),
    /// Listener error
    Io(std::io::Error),
}

impl fmt::Display for FactServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metadata(e) => write!(f, "Metadata error: {}", e),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for FactServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Metadata(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Config(_) => None,
        }
    }
}

impl From<gce_metadata::MetadataError> for FactServiceError {
    fn from(e: gce_metadata::MetadataError) -> Self {
        Self::Metadata(e)
    }
}

impl From<std::io::Error> for FactServiceError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<tracing_subscriber::filter::ParseError> for FactServiceError {
    fn from(e: tracing_subscriber::filter::ParseError) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FactServiceError>;
