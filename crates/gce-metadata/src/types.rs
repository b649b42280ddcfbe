use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::error::{MetadataError, Result};

/// Tokens are refreshed this many seconds before they expire
const EXPIRY_MARGIN_SECS: i64 = 60;

/// A service account OAuth2 access token
#[derive(Debug, Clone)]
pub(crate) struct AccessToken {
    pub(crate) token: String,
    pub(crate) expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Whether the token can still be used at `now`
    pub(crate) fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

/// Token endpoint payload
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: String,
    pub(crate) expires_in: i64,
    #[allow(dead_code)]
    pub(crate) token_type: Option<String>,
}

impl TokenResponse {
    pub(crate) fn into_access_token(self, now: DateTime<Utc>) -> Result<AccessToken> {
        let expires_at = Duration::try_seconds(self.expires_in)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(MetadataError::InvalidExpiry(self.expires_in))?;

        Ok(AccessToken {
            token: self.access_token,
            expires_at,
        })
    }
}
