use tracing_subscriber::{prelude::*, EnvFilter};

use crate::config::LogFormat;
use crate::error::Result;

/// Install the global subscriber
///
/// JSON output goes through `tracing_stackdriver`, which writes `severity`
/// and `message` keys as Cloud Logging expects.
pub fn init(format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::from_default_env().add_directive("fact_service=debug".parse()?);

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(env_filter).init(),
    }

    Ok(())
}
