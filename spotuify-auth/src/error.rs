use thiserror::Error;

use crate::client::AuthFailure;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Token storage error: {0}")]
    TokenStorage(String),

    #[error("Token cache is corrupt: {0}")]
    CorruptCache(String),

    #[error("Could not bind callback listener on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Token endpoint error: {0}")]
    TokenEndpoint(String),

    #[error("Authorization failed: {0}")]
    Flow(#[from] AuthFailure),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for AuthError {
    fn from(err: config::ConfigError) -> Self {
        AuthError::Configuration(err.to_string())
    }
}
