use std::fmt;

/// Errors from the metadata server client
#[derive(Debug)]
pub enum MetadataError {
    /// HTTP request failed or the body could not be decoded
    Http(reqwest::Error),
    /// Metadata server answered with a non-success status
    Status { path: String, status: u16 },
    /// Metadata server returned an empty project id
    EmptyProjectId,
    /// Token lifetime out of range
    InvalidExpiry(i64),
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "Metadata HTTP error: {e}"),
            Self::Status { path, status } => {
                write!(f, "Metadata server returned status {status} for {path}")
            }
            Self::EmptyProjectId => write!(f, "Metadata server returned an empty project id"),
            Self::InvalidExpiry(secs) => write!(f, "Invalid token expiry: {secs} seconds"),
        }
    }
}

impl std::error::Error for MetadataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for MetadataError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

pub type Result<T> = std::result::Result<T, MetadataError>;
