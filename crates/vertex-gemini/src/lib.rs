//! Vertex AI Gemini client
//!
//! A small client for the Vertex AI `generateContent` REST endpoint,
//! authenticated with service account tokens from the metadata server.
//!
//! # Example
//!
//! ```no_run
//! use gce_metadata::MetadataClient;
//! use vertex_gemini::GeminiClient;
//!
//! # async fn example() -> Result<(), vertex_gemini::GeminiError> {
//! let client = GeminiClient::new("my-project", "us-central1", MetadataClient::new());
//! let model = client.generative_model("gemini-1.5-flash-001");
//!
//! let response = model.generate_content("Give me 10 fun facts about otters.").await?;
//! if let Some(text) = response.first_text() {
//!     println!("{}", text);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod types;

pub use client::{GeminiClient, GenerativeModel};
pub use error::{GeminiError, Result};
pub use types::{
    Blob, Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part,
    PromptFeedback, SafetyRating, UsageMetadata,
};
