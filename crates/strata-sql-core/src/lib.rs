//! # strata-sql-core
//!
//! Composable SQL statement builders with named-parameter tracking.
//!
//! This crate covers the pure half of the database layer: statements are
//! assembled from clause objects rather than raw strings, rendered to
//! parameterized SQL text, and handed to an executor together with their
//! bound values. Nothing here touches a connection.
//!
//! ## Building a statement
//!
//! ```rust
//! use strata_sql_core::{Condition, Params, Select, SqlStatement};
//!
//! let query = Select::new()
//!     .select(vec![("author_name", "u.name"), ("total", "COUNT(p.id)")])
//!     .from("blog_user u")
//!     .add_inner_join("blog_post p", "p.author = u.id")
//!     .where_clause(Condition::all(vec![("u.active", ":active")]))
//!     .group_by("u.name")
//!     .limit(10);
//!
//! let mut params = Params::new();
//! params.bind("active", true);
//!
//! assert_eq!(
//!     query.to_sql().unwrap(),
//!     "SELECT u.name AS author_name, COUNT(p.id) AS total \
//!      FROM blog_user u INNER JOIN blog_post p ON p.author = u.id \
//!      WHERE u.active = :active GROUP BY u.name LIMIT 10"
//! );
//! ```
//!
//! ## Injection safety
//!
//! Values never reach the SQL text: conditions reference named
//! placeholders (`:name`) and [`value::resolve_placeholders`] rewrites
//! them to positional parameters for the driver, failing fast when a
//! referenced placeholder has no bound value.

pub mod builder;
pub mod condition;
pub mod error;
pub mod value;

pub use builder::{
    Delete, Direction, FieldList, Insert, Join, OrderList, Raw, Select, SelectList, Update,
};
pub use condition::Condition;
pub use error::{QueryError, Result};
pub use value::{resolve_placeholders, Params, SqlValue, ToSqlValue};

/// A statement that can be rendered to SQL text.
///
/// Rendering is pure: it never mutates the statement and is idempotent
/// given unchanged clause state.
pub trait SqlStatement {
    /// Extracts the corresponding SQL code.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError::Misuse`] when a required clause is
    /// missing, naming the clause.
    fn to_sql(&self) -> Result<String>;

    /// Returns true when the statement must run on the write link:
    /// every mutation, and reads flagged critical.
    fn is_critical(&self) -> bool;
}
