//! GCE Metadata Server Client
//!
//! Resolves the ambient Google Cloud project id and service account access
//! tokens from the metadata server available on GCE, GKE and Cloud Run.
//!
//! The server host defaults to `169.254.169.254` and can be overridden with
//! the `GCE_METADATA_HOST` environment variable.

mod client;
mod error;
mod types;

pub use client::MetadataClient;
pub use error::{MetadataError, Result};
