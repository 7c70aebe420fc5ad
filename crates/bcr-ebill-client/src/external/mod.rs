pub mod ledger;

use thiserror::Error;

/// Generic result type
pub type Result<T> = std::result::Result<T, Error>;

/// Generic error type
#[derive(Debug, Error)]
pub enum Error {
    /// the ledger couldn't be reached, or the connection broke down
    #[error("External Ledger request error: {0}")]
    Network(#[from] reqwest::Error),

    /// the ledger answered with a non-2xx status
    #[error("External Ledger returned status {status} for {path}")]
    Status { status: u16, path: String },

    /// the ledger answered with a body we can't parse
    #[error("External Ledger response has an unexpected shape: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Ledger URL {0} can't be used as a base URL")]
    InvalidBaseUrl(String),
}
