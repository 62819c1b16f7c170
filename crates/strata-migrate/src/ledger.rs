//! Migration ledger.
//!
//! Bookkeeping for applied migrations in the `_stray_migration` table.
//! Setup is best effort with visibility: it runs once at environment
//! bootstrap, every failure is logged, and none aborts the caller —
//! a missing ledger is recoverable by retrying setup later.

use chrono::NaiveDateTime;
use tracing::error;

use strata_sql_core::{Condition, Delete, Insert, Params, Raw, Select, SqlValue};
use strata_sql_postgres::Database;

use crate::error::{MigrateError, Result};

/// Physical name of the ledger table.
pub const LEDGER_TABLE: &str = "_stray_migration";

/// SQL to create the ledger table.
///
/// One row per applied migration; the initial sentinel row carries a
/// NULL identifier so the oldest known schema state is well-defined
/// before any real migration runs.
pub const CREATE_LEDGER_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS _stray_migration (\
     date TIMESTAMP DEFAULT CURRENT_TIMESTAMP NOT NULL, \
     migration VARCHAR(255))";

/// One ledger row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRow {
    /// When the migration was applied.
    pub date: NaiveDateTime,
    /// Migration identifier; NULL on the sentinel row.
    pub migration: Option<String>,
}

/// Manages the migration ledger of one database.
#[derive(Debug, Clone)]
pub struct MigrationLedger {
    db: Database,
}

impl MigrationLedger {
    /// Creates a ledger manager.
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Ensures the ledger table exists and holds at least the sentinel
    /// row.
    ///
    /// Idempotent: running it twice against the same database leaves
    /// exactly one sentinel row. Failures are logged and swallowed.
    pub async fn setup(&self) {
        match self.db.run(&Raw::new(CREATE_LEDGER_TABLE_SQL), &Params::new()).await {
            Ok(executed) if executed.success() => {}
            Ok(executed) => {
                error!(
                    "can't create {LEDGER_TABLE} ({})",
                    executed.error_state().message
                );
                return;
            }
            Err(err) => {
                error!("can't create {LEDGER_TABLE} ({err})");
                return;
            }
        }

        let count = match self.count().await {
            Ok(count) => count,
            Err(err) => {
                error!("can't fetch from {LEDGER_TABLE} ({err})");
                return;
            }
        };

        if count == 0 {
            let insert = Insert::new().into(LEDGER_TABLE);
            match self.db.run(&insert, &Params::new()).await {
                Ok(executed) if executed.success() => {}
                Ok(executed) => {
                    error!(
                        "can't insert into {LEDGER_TABLE} ({})",
                        executed.error_state().message
                    );
                }
                Err(err) => {
                    error!("can't insert into {LEDGER_TABLE} ({err})");
                }
            }
        }
    }

    /// Records a migration as applied.
    ///
    /// # Errors
    ///
    /// Fails when the insert cannot be executed.
    pub async fn record(&self, name: &str) -> Result<()> {
        let insert = Insert::new()
            .into(LEDGER_TABLE)
            .values(vec![("migration", ":migration")]);
        let mut params = Params::new();
        params.bind("migration", name);
        let executed = self.db.run(&insert, &params).await?;
        if !executed.success() {
            return Err(statement_failed(&insert, executed.error_state().message.clone()));
        }
        Ok(())
    }

    /// Removes a migration record (for rollback).
    ///
    /// # Errors
    ///
    /// Fails when the delete cannot be executed.
    pub async fn erase(&self, name: &str) -> Result<()> {
        let delete = Delete::new()
            .from(LEDGER_TABLE)
            .where_clause(Condition::all(vec![("migration", ":migration")]));
        let mut params = Params::new();
        params.bind("migration", name);
        let executed = self.db.run(&delete, &params).await?;
        if !executed.success() {
            return Err(statement_failed(&delete, executed.error_state().message.clone()));
        }
        Ok(())
    }

    /// Counts ledger rows, sentinel included.
    ///
    /// # Errors
    ///
    /// Fails when the count query cannot be executed.
    pub async fn count(&self) -> Result<i64> {
        let select = Select::new()
            .select(vec![("count", "COUNT(*)")])
            .from(LEDGER_TABLE)
            .critical(true);
        let mut executed = self.db.run(&select, &Params::new()).await?;
        if !executed.success() {
            return Err(statement_failed(&select, executed.error_state().message.clone()));
        }
        let count = executed.fetch().and_then(|row| match row.get("count") {
            Some(SqlValue::Int(n)) => Some(*n),
            _ => None,
        });
        Ok(count.unwrap_or(0))
    }

    /// Returns the most recently applied row, if any.
    ///
    /// # Errors
    ///
    /// Fails when the select cannot be executed.
    pub async fn last(&self) -> Result<Option<LedgerRow>> {
        let select = Select::new()
            .select("date, migration")
            .from(LEDGER_TABLE)
            .order_by("date DESC")
            .limit(1)
            .critical(true);
        let mut executed = self.db.run(&select, &Params::new()).await?;
        if !executed.success() {
            return Err(statement_failed(&select, executed.error_state().message.clone()));
        }
        Ok(executed.fetch().map(|row| {
            let date = match row.get("date") {
                Some(SqlValue::Text(text)) => {
                    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f")
                        .unwrap_or_default()
                }
                _ => NaiveDateTime::default(),
            };
            let migration = match row.get("migration") {
                Some(SqlValue::Text(name)) => Some(name.clone()),
                _ => None,
            };
            LedgerRow { date, migration }
        }))
    }
}

fn statement_failed(statement: &impl strata_sql_core::SqlStatement, message: String) -> MigrateError {
    MigrateError::StatementFailed {
        sql: statement.to_sql().unwrap_or_default(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_sql_core::SqlStatement;

    #[test]
    fn test_ledger_table_layout() {
        assert_eq!(
            CREATE_LEDGER_TABLE_SQL,
            "CREATE TABLE IF NOT EXISTS _stray_migration (\
             date TIMESTAMP DEFAULT CURRENT_TIMESTAMP NOT NULL, \
             migration VARCHAR(255))"
        );
    }

    #[test]
    fn test_sentinel_insert_uses_default_values() {
        let insert = Insert::new().into(LEDGER_TABLE);
        assert_eq!(
            insert.to_sql().unwrap(),
            "INSERT INTO _stray_migration DEFAULT VALUES"
        );
    }

    #[test]
    fn test_count_query_is_critical() {
        let select = Select::new()
            .select(vec![("count", "COUNT(*)")])
            .from(LEDGER_TABLE)
            .critical(true);
        assert!(select.is_critical());
        assert_eq!(
            select.to_sql().unwrap(),
            "SELECT COUNT(*) AS count FROM _stray_migration"
        );
    }
}
