//! UPDATE statement builder.

use crate::condition::Condition;
use crate::error::{QueryError, Result};
use crate::SqlStatement;

/// A composable UPDATE statement.
#[derive(Debug, Clone, Default)]
pub struct Update {
    table: Option<String>,
    set: Vec<(String, String)>,
    where_clause: Option<Condition>,
}

impl Update {
    /// Creates a new empty UPDATE statement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target table. Mandatory before rendering.
    #[must_use]
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Sets the ordered column → right-hand expression assignments.
    /// Mandatory and non-empty before rendering.
    #[must_use]
    pub fn set<C, E>(mut self, set: Vec<(C, E)>) -> Self
    where
        C: Into<String>,
        E: Into<String>,
    {
        self.set = set.into_iter().map(|(c, e)| (c.into(), e.into())).collect();
        self
    }

    /// Sets the WHERE clause.
    #[must_use]
    pub fn where_clause(mut self, condition: impl Into<Condition>) -> Self {
        self.where_clause = Some(condition.into());
        self
    }
}

impl SqlStatement for Update {
    fn to_sql(&self) -> Result<String> {
        let table = self
            .table
            .as_ref()
            .ok_or_else(|| QueryError::missing_clause("table"))?;
        if self.set.is_empty() {
            return Err(QueryError::missing_clause("set"));
        }

        let assignments: Vec<String> = self
            .set
            .iter()
            .map(|(column, rhs)| format!("{column} = {rhs}"))
            .collect();
        let mut sql = format!("UPDATE {table} SET {}", assignments.join(", "));

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
    fn test_update_with_where() {
        let sql = Update::new()
            .table("blog_post")
            .set(vec![("title", ":title")])
            .where_clause(Condition::all(vec![("id", ":id")]))
            .to_sql()
            .unwrap();
        assert_eq!(sql, "UPDATE blog_post SET title = :title WHERE id = :id");
    }

    #[test]
    fn test_assignment_order_preserved() {
        let sql = Update::new()
            .table("t")
            .set(vec![("b", ":b"), ("a", ":a")])
            .to_sql()
            .unwrap();
        assert_eq!(sql, "UPDATE t SET b = :b, a = :a");
    }

    #[test]
    fn test_missing_table_is_misuse() {
        let err = Update::new().set(vec![("a", ":a")]).to_sql().unwrap_err();
        assert_eq!(
            err,
            QueryError::Misuse(String::from("table clause has not been defined"))
        );
    }

    #[test]
    fn test_empty_set_is_misuse() {
        let err = Update::new().table("t").to_sql().unwrap_err();
        assert_eq!(
            err,
            QueryError::Misuse(String::from("set clause has not been defined"))
        );
    }
}
