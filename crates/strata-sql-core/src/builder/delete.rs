//! DELETE statement builder.

use crate::condition::Condition;
use crate::error::{QueryError, Result};
use crate::SqlStatement;

/// A composable DELETE statement.
#[derive(Debug, Clone, Default)]
pub struct Delete {
    from: Option<String>,
    where_clause: Option<Condition>,
}

impl Delete {
    /// Creates a new empty DELETE statement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source table. Mandatory before rendering.
    #[must_use]
    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.from = Some(table.into());
        self
    }

    /// Sets the WHERE clause.
    #[must_use]
    pub fn where_clause(mut self, condition: impl Into<Condition>) -> Self {
        self.where_clause = Some(condition.into());
        self
    }
}

impl SqlStatement for Delete {
    fn to_sql(&self) -> Result<String> {
        let from = self
            .from
            .as_ref()
            .ok_or_else(|| QueryError::missing_clause("from"))?;
        let mut sql = format!("DELETE FROM {from}");

        if let Some(where_clause) = &self.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&where_clause.to_sql()?);
        }

        Ok(sql)
    }

    fn is_critical(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_with_where() {
        let sql = Delete::new()
            .from("blog_post")
            .where_clause(Condition::all(vec![("id", ":id")]))
            .to_sql()
            .unwrap();
        assert_eq!(sql, "DELETE FROM blog_post WHERE id = :id");
    }

    #[test]
    fn test_delete_without_where_targets_all_rows() {
        let sql = Delete::new().from("blog_post").to_sql().unwrap();
        assert_eq!(sql, "DELETE FROM blog_post");
    }

    #[test]
    fn test_missing_from_is_misuse() {
        let err = Delete::new().to_sql().unwrap_err();
        assert_eq!(
            err,
            QueryError::Misuse(String::from("from clause has not been defined"))
        );
    }
}
