//! Error types for statement execution.

use strata_sql_core::QueryError;

use crate::executor::ErrorState;

/// Errors raised while connecting or executing statements.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Statement assembly failed before anything reached the driver.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Connection-level driver failure (pool setup, protocol).
    #[error("driver error: {0}")]
    Driver(#[from] sqlx::Error),

    /// The driver reported a non-clean error state after execution.
    ///
    /// Only raised in development mode; other modes surface the failure
    /// through [`crate::executor::Executed::success`].
    #[error("query failed: {} ({sql})", .state.message)]
    Execution {
        /// Captured driver error state.
        state: ErrorState,
        /// The offending SQL text.
        sql: String,
    },
}

/// Result type for execution operations.
pub type Result<T> = std::result::Result<T, DbError>;
