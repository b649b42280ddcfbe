//! HTTP server for the fact endpoint
//!
//! Every path is routed to the same handler.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::any,
    Router,
};
use tracing::{debug, error, info, warn};
use vertex_gemini::{GenerateContentResponse, GeminiError};

use crate::facts::{animal_param, fact_prompt, FactModel};

/// Dependencies shared by all requests, built once at startup
pub struct AppState {
    pub model: Arc<dyn FactModel>,
    pub model_timeout: Duration,
}

impl AppState {
    pub fn new(model: Arc<dyn FactModel>, model_timeout: Duration) -> Self {
        Self {
            model,
            model_timeout,
        }
    }
}

pub type SharedState = Arc<AppState>;

/// Upstream failures, surfaced to the caller as an empty 503
#[derive(Debug)]
pub enum FactsError {
    Upstream(GeminiError),
    Timeout(Duration),
}

impl fmt::Display for FactsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upstream(e) => write!(f, "{}", e),
            Self::Timeout(d) => write!(f, "Model call timed out after {}ms", d.as_millis()),
        }
    }
}

impl IntoResponse for FactsError {
    fn into_response(self) -> Response {
        warn!(error = %self, "Model call failed");
        StatusCode::SERVICE_UNAVAILABLE.into_response()
    }
}

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", any(facts))
        .fallback(facts)
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}

/// Ask the model for facts about `?animal=` and return its HTML
///
/// A successful call with no usable part answers 200 with an empty body.
async fn facts(
    State(state): State<SharedState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, FactsError> {
    let animal = animal_param(&params);
    let prompt = fact_prompt(animal);
    debug!(animal = %animal, "Generating facts");

    let response = tokio::time::timeout(state.model_timeout, state.model.complete(&prompt))
        .await
        .map_err(|_| FactsError::Timeout(state.model_timeout))?
        .map_err(FactsError::Upstream)?;

    log_response(&response);

    match response.first_text() {
        Some(html) => Ok(Html(html.to_string()).into_response()),
        None => Ok(StatusCode::OK.into_response()),
    }
}

fn log_response(response: &GenerateContentResponse) {
    match serde_json::to_string(response) {
        Ok(json) => debug!(json_response = %json, "Complete response content"),
        Err(e) => error!(error = %e, "Failed to marshal response to JSON"),
    }
}
