//! Migration application.
//!
//! Runs the operations of a generated migration module against a
//! database and keeps the ledger in step. Generation and application
//! are one-shot administrative operations; nothing here coordinates
//! two concurrent runners.

use tracing::info;

use strata_sql_core::{Params, Raw};
use strata_sql_postgres::Database;

use crate::error::{MigrateError, Result};
use crate::ledger::MigrationLedger;
use crate::operations::Operation;
use crate::schema::Snapshot;
use crate::Migration;

/// The snapshot pair and mapping a migration executes against.
#[derive(Debug, Clone)]
pub struct MigrationContext {
    /// Last migrated snapshot.
    pub old: Snapshot,
    /// Current declarative snapshot.
    pub new: Snapshot,
    /// Mapping name the physical names derive from.
    pub mapping: String,
}

impl MigrationContext {
    /// Creates a context.
    #[must_use]
    pub fn new(old: Snapshot, new: Snapshot, mapping: impl Into<String>) -> Self {
        Self {
            old,
            new,
            mapping: mapping.into(),
        }
    }
}

/// Applies and reverts migration modules.
#[derive(Debug, Clone)]
pub struct MigrationRunner {
    db: Database,
    ledger: MigrationLedger,
    context: MigrationContext,
}

impl MigrationRunner {
    /// Creates a runner for one database and context.
    #[must_use]
    pub fn new(db: Database, context: MigrationContext) -> Self {
        let ledger = MigrationLedger::new(db.clone());
        Self {
            db,
            ledger,
            context,
        }
    }

    /// Returns the ledger.
    #[must_use]
    pub const fn ledger(&self) -> &MigrationLedger {
        &self.ledger
    }

    /// Applies a migration: executes its forward operations in order,
    /// then records the name in the ledger.
    ///
    /// # Errors
    ///
    /// Fails on the first operation whose statement cannot be rendered
    /// or executes with a non-clean state.
    pub async fn apply<M: Migration>(&self) -> Result<()> {
        info!(name = M::NAME, "applying migration");
        for operation in M::up() {
            self.execute(&operation).await?;
        }
        self.ledger.record(M::NAME).await
    }

    /// Reverts a migration: executes its inverse operations in order,
    /// then removes the ledger record.
    ///
    /// # Errors
    ///
    /// Fails on the first operation whose statement cannot be rendered
    /// or executes with a non-clean state.
    pub async fn revert<M: Migration>(&self) -> Result<()> {
        info!(name = M::NAME, "reverting migration");
        for operation in M::down() {
            self.execute(&operation).await?;
        }
        self.ledger.erase(M::NAME).await
    }

    async fn execute(&self, operation: &Operation) -> Result<()> {
        let sql = operation.to_sql(&self.context.old, &self.context.new)?;
        let executed = self.db.run(&Raw::new(&sql), &Params::new()).await?;
        if !executed.success() {
            return Err(MigrateError::StatementFailed {
                sql,
                message: executed.error_state().message.clone(),
            });
        }
        Ok(())
    }
}
