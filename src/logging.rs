//! Logging subscriber initialisation.

use thiserror::Error;
use tracing_subscriber::{
    EnvFilter,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// Errors installing the global subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// A global subscriber is already installed.
    #[error("failed to initialise logging: {0}")]
    Init(#[from] TryInitError),
}

/// Installs a compact stderr subscriber.
///
/// `RUST_LOG` takes precedence over `level` when it holds a valid filter.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init(level: &str) -> Result<(), LoggingError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(build_env_filter(level))
        .try_init()?;

    Ok(())
}

fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_fails() {
        // The first call may already have happened in another test in this binary.
        let _first = init("debug");

        assert!(matches!(init("debug"), Err(LoggingError::Init(_))));
    }
}
