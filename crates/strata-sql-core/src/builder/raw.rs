//! Pre-formed statement wrapper.

use crate::error::{QueryError, Result};
use crate::SqlStatement;

/// A pre-formed SQL statement, rendered verbatim.
///
/// Used for DDL the builders do not model (CREATE TABLE, DROP TABLE).
/// Raw statements always run on the write link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raw {
    sql: String,
}

impl Raw {
    /// Wraps a pre-formed statement.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self { sql: sql.into() }
    }
}

impl SqlStatement for Raw {
    fn to_sql(&self) -> Result<String> {
        if self.sql.trim().is_empty() {
            return Err(QueryError::Misuse(String::from("raw statement is empty")));
        }
        Ok(self.sql.clone())
    }

    fn is_critical(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_renders_verbatim() {
        let sql = Raw::new("DROP TABLE blog_post").to_sql().unwrap();
        assert_eq!(sql, "DROP TABLE blog_post");
    }

    #[test]
    fn test_empty_raw_is_misuse() {
        assert!(matches!(
            Raw::new("  ").to_sql(),
            Err(QueryError::Misuse(_))
        ));
    }

    #[test]
    fn test_raw_runs_on_the_write_link() {
        assert!(Raw::new("CREATE TABLE t (id BIGINT)").is_critical());
    }
}
