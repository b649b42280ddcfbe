//! Fact Service - animal fun facts from Vertex AI Gemini
//!
//! Serves `GET /?animal=<name>` by asking a Gemini model for ten facts about
//! the animal and returning the generated HTML.

mod config;
mod error;
mod facts;
mod logging;
mod server;

use crate::config::Config;
use crate::error::Result;
use crate::server::{start_server, AppState, SharedState};
use gce_metadata::MetadataClient;
use std::sync::Arc;
use tracing::{error, info};
use vertex_gemini::GeminiClient;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    logging::init(config.log_format)?;

    info!("Starting fact-service...");
    info!(
        port = config.port,
        location = %config.location,
        model = %config.model,
        timeout_secs = config.model_timeout.as_secs(),
        "Loaded configuration"
    );

    let metadata = MetadataClient::new();
    let project_id = resolve_project_id(&config, &metadata).await.map_err(|e| {
        error!(error = %e, "Failed to resolve project id");
        e
    })?;

    let client = GeminiClient::new(&project_id, &config.location, metadata);
    let model = client.generative_model(&config.model);
    info!(
        project_id = client.project_id(),
        location = client.location(),
        model = model.name(),
        "Model client ready"
    );

    let state: SharedState = Arc::new(AppState::new(Arc::new(model), config.model_timeout));

    start_server(state, config.port).await.map_err(|e| {
        error!(error = %e, "Server error");
        e
    })?;

    Ok(())
}

/// `GOOGLE_CLOUD_PROJECT` wins; otherwise ask the metadata server
async fn resolve_project_id(config: &Config, metadata: &MetadataClient) -> Result<String> {
    if let Some(project_id) = &config.project_id {
        return Ok(project_id.clone());
    }
    Ok(metadata.project_id().await?)
}
