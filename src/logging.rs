use crate::types::{GraphError, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Installs a stderr `fmt` subscriber filtered by `level` (an `EnvFilter`
/// directive such as `warn` or `champnet=debug`).
pub fn init_logging(level: &str) -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_new(level)
                .map_err(|e| GraphError::InvalidArgument(format!("Invalid log level: {e}")))?,
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| GraphError::InvalidArgument("Logging already initialized".into()))
}
