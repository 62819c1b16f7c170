//! Connection abstraction: a write-capable master link and a read link.

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::{DatabaseConfig, ExecutionMode};
use crate::error::Result;

/// A read/write pool pair plus the injected execution mode.
///
/// The pools provide their own internal sharing and thread-safety; this
/// type only decides which link a statement is issued on. Distinct
/// statement builders used concurrently by different callers are
/// independent and need no locking of their own.
#[derive(Debug, Clone)]
pub struct Database {
    write: PgPool,
    read: PgPool,
    mode: ExecutionMode,
}

impl Database {
    /// Connects both links described by the configuration.
    ///
    /// When no read URL is configured, the read link aliases the write
    /// pool.
    ///
    /// # Errors
    ///
    /// Returns a driver error when either pool fails to connect.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let write = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.write_url)
            .await?;
        let read = match &config.read_url {
            Some(url) => {
                PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .connect(url)
                    .await?
            }
            None => write.clone(),
        };
        Ok(Self {
            write,
            read,
            mode: config.mode,
        })
    }

    /// Builds a database from pre-connected pools.
    #[must_use]
    pub const fn from_pools(write: PgPool, read: PgPool, mode: ExecutionMode) -> Self {
        Self { write, read, mode }
    }

    /// Returns the read link.
    #[must_use]
    pub const fn link(&self) -> &PgPool {
        &self.read
    }

    /// Returns the write-capable master link.
    #[must_use]
    pub const fn master_link(&self) -> &PgPool {
        &self.write
    }

    /// Returns the execution mode.
    #[must_use]
    pub const fn mode(&self) -> ExecutionMode {
        self.mode
    }
}
