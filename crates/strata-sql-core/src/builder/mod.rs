//! Composable statement builders.
//!
//! Each statement kind is a plain owned value with fluent setters; the
//! builder renders to SQL text through [`crate::SqlStatement::to_sql`]
//! and tracks no execution state of its own.
//!
//! # Example
//!
//! ```rust
//! use strata_sql_core::{Select, SqlStatement};
//!
//! let sql = Select::new()
//!     .select("id, name")
//!     .from("blog_user")
//!     .where_clause("active = :active")
//!     .to_sql()
//!     .unwrap();
//!
//! assert_eq!(sql, "SELECT id, name FROM blog_user WHERE active = :active");
//! ```

mod clause;
mod delete;
mod insert;
mod raw;
mod select;
mod update;

pub use clause::{Direction, FieldList, OrderList, SelectList};
pub use delete::Delete;
pub use insert::Insert;
pub use raw::Raw;
pub use select::{Join, Select};
pub use update::Update;
