//! Errors of the grocery application shell. Resource failures never show up here:
//! they are returned to callers as envelopes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GroceryError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error(transparent)]
    Action(#[from] crate::payments::UnknownPaymentAction),

    #[error("Could not render envelope: {0}")]
    Render(#[from] serde_json::Error),

    #[error("Store task failed: {0}")]
    StoreTask(#[from] tokio::task::JoinError),
}
