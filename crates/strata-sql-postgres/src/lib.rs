//! # strata-sql-postgres
//!
//! PostgreSQL connection abstraction and statement executor for the
//! `strata-sql` statement builders.
//!
//! A [`Database`] holds a write-capable master link and a read link;
//! [`Database::run`] renders a statement, resolves its named
//! placeholders, binds every tracked parameter by runtime type, and
//! executes on the link the statement asks for. Driver failures are
//! captured as a structured [`executor::ErrorState`] and reported
//! according to the injected [`ExecutionMode`].
//!
//! ```rust,ignore
//! use strata_sql_core::{Condition, Params, Select};
//! use strata_sql_postgres::{Database, DatabaseConfig};
//!
//! let db = Database::connect(&DatabaseConfig::new(std::env::var("DATABASE_URL")?)).await?;
//!
//! let query = Select::new()
//!     .select("id, name")
//!     .from("blog_user")
//!     .where_clause(Condition::all(vec![("active", ":active")]));
//! let mut params = Params::new();
//! params.bind("active", true);
//!
//! let mut executed = db.run(&query, &params).await?;
//! if executed.success() {
//!     for row in executed.fetch_all().unwrap_or_default() {
//!         println!("{:?}", row.get("name"));
//!     }
//! }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod executor;

pub use config::{DatabaseConfig, ExecutionMode};
pub use database::Database;
pub use error::{DbError, Result};
pub use executor::{ErrorState, Executed, Row, CLEAN_STATE};
