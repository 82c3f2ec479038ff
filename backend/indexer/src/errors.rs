//! Indexer error type shared by the poller, the database layer and the API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Transport failure talking to the Soroban RPC.
    #[error("rpc transport: {0}")]
    Http(#[from] reqwest::Error),

    /// A JSON-RPC error that retrying will not fix.
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The RPC answered with neither `result` nor `error`.
    #[error("malformed rpc response: {0}")]
    MalformedResponse(String),

    #[error("config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, IndexerError>;
