//! Error types for the migration system.

use strata_sql_core::QueryError;
use strata_sql_postgres::DbError;

/// Errors that can occur during diffing, generation or application.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// A snapshot carries the same entity key twice.
    #[error("duplicate entity key '{0}' in snapshot")]
    DuplicateKey(String),

    /// An operation references an entity key missing from its snapshot.
    #[error("unknown entity '{0}' in snapshot")]
    UnknownEntity(String),

    /// A table entity has no column definitions to build from.
    #[error("entity '{0}' has no columns")]
    EmptyEntity(String),

    /// Statement assembly failed.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Connection or execution-layer failure.
    #[error(transparent)]
    Db(#[from] DbError),

    /// A migration statement executed with a non-clean error state.
    #[error("migration statement failed: {message} ({sql})")]
    StatementFailed {
        /// The offending SQL text.
        sql: String,
        /// Driver error message.
        message: String,
    },

    /// IO error (reading snapshot files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for migration operations.
pub type Result<T> = std::result::Result<T, MigrateError>;
