//! CLI command implementations.

pub mod probe;
pub mod resolve;
pub mod sync;

use catalog_bridge::config::{BridgeConfig, ConfigError};
use catalog_bridge::resolver::ResolveError;
use catalog_bridge::shopify::RemoteApiError;
use catalog_bridge::state::AppState;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A store API call failed.
    #[error(transparent)]
    Remote(#[from] RemoteApiError),

    /// A source variant could not be resolved.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The supplied SKU is empty.
    #[error("SKU must not be empty")]
    EmptySku,

    /// At least one store did not answer the probe.
    #[error("{0} store(s) unreachable")]
    Unreachable(usize),
}

/// Load configuration and build live store clients with an empty cache.
fn connect() -> Result<AppState, CommandError> {
    let config = BridgeConfig::from_env()?;
    tracing::info!(
        source = %config.source.domain,
        target = %config.target.domain,
        "Connecting to stores..."
    );
    Ok(AppState::from_config(&config)?)
}
