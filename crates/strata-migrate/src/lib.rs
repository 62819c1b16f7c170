//! # strata-migrate
//!
//! Schema-diff driven migration generation and bookkeeping.
//!
//! The migration engine compares two snapshots of one mapping's
//! declarative schema — the last migrated state and the current one —
//! and emits the add/remove operations, plus generated up/down code,
//! needed to evolve the physical schema. Applied migrations are tracked
//! in the `_stray_migration` ledger table.
//!
//! # Architecture
//!
//! - **Schema** — snapshot and entity definitions, physical-name
//!   derivation
//! - **Diff** — exact key-set comparison of two snapshots
//! - **Generator** — forward/inverse operation pairs from a diff
//! - **Codegen** — renders a generation result into a Rust module
//! - **Ledger** — the `_stray_migration` bookkeeping table
//! - **Runner** — applies and reverts migration modules
//!
//! # Example
//!
//! ```rust
//! use strata_migrate::generator::generate;
//! use strata_migrate::schema::{ColumnDef, EntityDef, Snapshot};
//!
//! let old = Snapshot::new();
//! let new = Snapshot::new().entity(
//!     EntityDef::new("post")
//!         .column(ColumnDef::new("id", "BIGINT").primary_key())
//!         .column(ColumnDef::new("title", "VARCHAR(255)").not_null()),
//! );
//!
//! let generated = generate(&old, &new, "blog").unwrap();
//! assert_eq!(generated.up.len(), 1);
//! assert_eq!(
//!     generated.up[0].to_sql(&old, &new).unwrap(),
//!     "CREATE TABLE blog_post (id BIGINT NOT NULL, \
//!      title VARCHAR(255) NOT NULL, PRIMARY KEY (id))"
//! );
//! ```

pub mod codegen;
pub mod diff;
pub mod error;
pub mod generator;
pub mod ledger;
pub mod operations;
pub mod runner;
pub mod schema;

pub use diff::SchemaDiff;
pub use error::{MigrateError, Result};
pub use generator::GeneratedMigration;
pub use ledger::MigrationLedger;
pub use operations::Operation;
pub use runner::{MigrationContext, MigrationRunner};
pub use schema::{codify, ColumnDef, EntityDef, EntityKind, Snapshot};

/// A migration module: the shape emitted by [`codegen`].
///
/// `up()` returns the forward operations in application order; `down()`
/// returns the rollback operations in application order (codegen emits
/// them already reversed).
pub trait Migration {
    /// Migration identifier recorded in the ledger.
    const NAME: &'static str;

    /// Forward operations.
    fn up() -> Vec<Operation>;

    /// Rollback operations.
    fn down() -> Vec<Operation>;
}
