use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{MetadataError, Result};
use crate::types::{AccessToken, TokenResponse};

const DEFAULT_HOST: &str = "169.254.169.254";
const HOST_ENV: &str = "GCE_METADATA_HOST";
const PROJECT_ID_PATH: &str = "/computeMetadata/v1/project/project-id";
const TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";

/// Metadata server client
///
/// The default service account token is kept in memory and reused until it
/// is about to expire.
pub struct MetadataClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<AccessToken>>,
}

impl MetadataClient {
    /// Create a client for `GCE_METADATA_HOST`, or the link-local default
    pub fn new() -> Self {
        let host = std::env::var(HOST_ENV)
            .ok()
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        Self::with_base_url(&format!("http://{}", host))
    }

    /// Create a client against an explicit base URL (scheme included)
    pub fn with_base_url(base_url: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        }
    }

    /// Project id of the project this workload runs in
    pub async fn project_id(&self) -> Result<String> {
        let body = self.get(PROJECT_ID_PATH).await?.text().await?;
        let project_id = body.trim();
        if project_id.is_empty() {
            return Err(MetadataError::EmptyProjectId);
        }

        debug!(project_id, "Resolved project id from metadata server");
        Ok(project_id.to_string())
    }

    /// OAuth2 access token for the default service account
    pub async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.token.read().await.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.token.clone());
            }
        }

        let mut slot = self.token.write().await;
        // Another task may have refreshed while we waited for the lock
        if let Some(token) = slot.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.token.clone());
            }
        }

        let response: TokenResponse = self.get(TOKEN_PATH).await?.json().await?;
        let token = response.into_access_token(Utc::now())?;
        debug!(expires_at = %token.expires_at, "Fetched service account token");

        let value = token.token.clone();
        *slot = Some(token);
        Ok(value)
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MetadataError::Status {
                path: path.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }
}

impl Default for MetadataClient {
    fn default() -> Self {
        Self::new()
    }
}
