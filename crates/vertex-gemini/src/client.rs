//! Vertex AI HTTP client

use std::sync::Arc;
use std::time::Duration;

use gce_metadata::MetadataClient;
use tracing::{debug, warn};

use crate::error::{GeminiError, Result};
use crate::types::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

/// Client bound to one project and location
///
/// Cloning is cheap; clones share the HTTP connection pool and cached token.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    endpoint: String,
    project_id: String,
    location: String,
    metadata: MetadataClient,
}

impl GeminiClient {
    /// Create a client for the regional endpoint of `location`
    pub fn new(project_id: &str, location: &str, metadata: MetadataClient) -> Self {
        let endpoint = format!("https://{}-aiplatform.googleapis.com", location);
        Self::with_endpoint(&endpoint, project_id, location, metadata)
    }

    /// Create a client against a custom API endpoint
    pub fn with_endpoint(
        endpoint: &str,
        project_id: &str,
        location: &str,
        metadata: MetadataClient,
    ) -> Self {
        // No overall request timeout here; callers bound each call themselves
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            inner: Arc::new(ClientInner {
                http,
                endpoint: endpoint.trim_end_matches('/').to_string(),
                project_id: project_id.to_string(),
                location: location.to_string(),
                metadata,
            }),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.inner.project_id
    }

    pub fn location(&self) -> &str {
        &self.inner.location
    }

    /// Handle for a publisher model, e.g. `gemini-1.5-flash-001`
    pub fn generative_model(&self, name: &str) -> GenerativeModel {
        GenerativeModel {
            client: self.clone(),
            name: name.to_string(),
        }
    }

    fn generate_content_url(&self, model: &str) -> String {
        format!(
            "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
            self.inner.endpoint, self.inner.project_id, self.inner.location, model
        )
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let token = self.inner.metadata.access_token().await?;
        let url = self.generate_content_url(model);
        debug!(url = %url, "Calling generateContent");

        let response = self
            .inner
            .http
            .post(&url)
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            warn!(status = status.as_u16(), model, "generateContent failed");
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// A generative model reachable through a [`GeminiClient`]
#[derive(Clone)]
pub struct GenerativeModel {
    client: GeminiClient,
    name: String,
}

impl GenerativeModel {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Send a single text prompt and return the full response
    pub async fn generate_content(&self, text: &str) -> Result<GenerateContentResponse> {
        let request = GenerateContentRequest::from_text(text);
        self.client.generate_content(&self.name, &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};

    const TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn metadata_routes() -> Router {
        Router::new().route(
            TOKEN_PATH,
            get(|| async {
                Json(json!({
                    "access_token": "test-token",
                    "expires_in": 3600,
                    "token_type": "Bearer"
                }))
            }),
        )
    }

    async fn client_for(router: Router) -> GeminiClient {
        let base = spawn_stub(router.merge(metadata_routes())).await;
        GeminiClient::with_endpoint(
            &base,
            "demo-project",
            "us-central1",
            MetadataClient::with_base_url(&base),
        )
    }

    #[test]
    fn test_generate_content_url() {
        let client = GeminiClient::new(
            "demo-project",
            "us-central1",
            MetadataClient::with_base_url("http://127.0.0.1:1"),
        );
        assert_eq!(
            client.generate_content_url("gemini-1.5-flash-001"),
            "https://us-central1-aiplatform.googleapis.com/v1/projects/demo-project/locations/us-central1/publishers/google/models/gemini-1.5-flash-001:generateContent"
        );
    }

    #[tokio::test]
    async fn test_generate_content_success() {
        let router = Router::new().route(
            "/v1/{*path}",
            post(
                |Path(path): Path<String>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    let authorized = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        == Some("Bearer test-token");
                    if !authorized {
                        return Err(StatusCode::UNAUTHORIZED);
                    }
                    if path.trim_start_matches('/')
                        != "projects/demo-project/locations/us-central1/publishers/google/models/gemini-test:generateContent"
                    {
                        return Err(StatusCode::NOT_FOUND);
                    }
                    let prompt = body["contents"][0]["parts"][0]["text"]
                        .as_str()
                        .unwrap_or_default()
                        .to_string();
                    Ok(Json(json!({
                        "candidates": [{
                            "content": {"role": "model", "parts": [{"text": format!("echo: {}", prompt)}]},
                            "finishReason": "STOP"
                        }]
                    })))
                },
            ),
        );
        let model = client_for(router).await.generative_model("gemini-test");

        let response = model.generate_content("hello").await.unwrap();
        assert_eq!(response.first_text(), Some("echo: hello"));
    }

    #[tokio::test]
    async fn test_generate_content_api_error_envelope() {
        let router = Router::new().route(
            "/v1/{*path}",
            post(|| async {
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({
                        "error": {
                            "code": 429,
                            "message": "Quota exceeded for aiplatform.googleapis.com",
                            "status": "RESOURCE_EXHAUSTED"
                        }
                    })),
                )
            }),
        );
        let model = client_for(router).await.generative_model("gemini-test");

        match model.generate_content("hello").await {
            Err(GeminiError::Api { status, message }) => {
                assert_eq!(status, 429);
                assert_eq!(message, "Quota exceeded for aiplatform.googleapis.com");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_content_api_error_plain_body() {
        let router = Router::new().route(
            "/v1/{*path}",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream unavailable") }),
        );
        let model = client_for(router).await.generative_model("gemini-test");

        match model.generate_content("hello").await {
            Err(GeminiError::Api { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream unavailable");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_content_invalid_json() {
        let router = Router::new().route("/v1/{*path}", post(|| async { "not json" }));
        let model = client_for(router).await.generative_model("gemini-test");

        let result = model.generate_content("hello").await;
        assert!(matches!(result, Err(GeminiError::Json(_))));
    }

    #[tokio::test]
    async fn test_generate_content_auth_failure() {
        // No metadata routes: token fetch gets a 404
        let base = spawn_stub(Router::new()).await;
        let client = GeminiClient::with_endpoint(
            &base,
            "demo-project",
            "us-central1",
            MetadataClient::with_base_url(&base),
        );

        let result = client.generative_model("gemini-test").generate_content("hello").await;
        assert!(matches!(result, Err(GeminiError::Auth(_))));
    }
}
