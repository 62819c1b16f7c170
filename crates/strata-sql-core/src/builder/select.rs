//! SELECT statement builder.

use crate::condition::Condition;
use crate::error::{QueryError, Result};
use crate::SqlStatement;

use super::clause::{FieldList, OrderList, SelectList};

/// One joined table with its ON condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    /// Foreign table real name.
    pub table: String,
    /// Join condition.
    pub on: Condition,
}

/// A composable SELECT statement.
///
/// Every setter consumes and returns the builder, so statements are
/// assembled as a chain and stay plain values until rendered:
///
/// ```rust
/// use strata_sql_core::{Condition, Select, SqlStatement};
///
/// let sql = Select::new()
///     .select(vec![("total", "COUNT(*)")])
///     .from("blog_post")
///     .where_clause(Condition::all(vec![("author", ":author")]))
///     .to_sql()
///     .unwrap();
///
/// assert_eq!(
///     sql,
///     "SELECT COUNT(*) AS total FROM blog_post WHERE author = :author"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Select {
    critical: bool,
    select: Option<SelectList>,
    from: Option<String>,
    where_clause: Option<Condition>,
    group_by: Option<FieldList>,
    having: Option<Condition>,
    order_by: Option<OrderList>,
    distinct: Option<FieldList>,
    limit: Option<u64>,
    offset: Option<u64>,
    inner_joins: Vec<Join>,
    left_outer_joins: Vec<Join>,
    right_outer_joins: Vec<Join>,
    full_outer_joins: Vec<Join>,
}

impl Select {
    /// Creates a new empty SELECT statement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the statement as critical: it must observe the freshest
    /// data and is executed on the write link instead of a read replica.
    #[must_use]
    pub const fn critical(mut self, critical: bool) -> Self {
        self.critical = critical;
        self
    }

    /// Sets the select list; defaults to `*` when unset.
    #[must_use]
    pub fn select(mut self, select: impl Into<SelectList>) -> Self {
        self.select = Some(select.into());
        self
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

    /// Sets the GROUP BY clause.
    #[must_use]
    pub fn group_by(mut self, group_by: impl Into<FieldList>) -> Self {
        self.group_by = Some(group_by.into());
        self
    }

    /// Sets the HAVING clause.
    #[must_use]
    pub fn having(mut self, condition: impl Into<Condition>) -> Self {
        self.having = Some(condition.into());
        self
    }

    /// Sets the ORDER BY clause.
    #[must_use]
    pub fn order_by(mut self, order_by: impl Into<OrderList>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// Sets the DISTINCT ON clause.
    #[must_use]
    pub fn distinct(mut self, distinct: impl Into<FieldList>) -> Self {
        self.distinct = Some(distinct.into());
        self
    }

    /// Sets or clears the LIMIT clause.
    #[must_use]
    pub fn limit(mut self, limit: impl Into<Option<u64>>) -> Self {
        self.limit = limit.into();
        self
    }

    /// Sets or clears the OFFSET clause.
    #[must_use]
    pub fn offset(mut self, offset: impl Into<Option<u64>>) -> Self {
        self.offset = offset.into();
        self
    }

    /// Appends an inner join.
    #[must_use]
    pub fn add_inner_join(mut self, table: impl Into<String>, on: impl Into<Condition>) -> Self {
        self.inner_joins.push(Join {
            table: table.into(),
            on: on.into(),
        });
        self
    }

    /// Appends a left outer join.
    #[must_use]
    pub fn add_left_outer_join(
        mut self,
        table: impl Into<String>,
        on: impl Into<Condition>,
    ) -> Self {
        self.left_outer_joins.push(Join {
            table: table.into(),
            on: on.into(),
        });
        self
    }

    /// Appends a right outer join.
    #[must_use]
    pub fn add_right_outer_join(
        mut self,
        table: impl Into<String>,
        on: impl Into<Condition>,
    ) -> Self {
        self.right_outer_joins.push(Join {
            table: table.into(),
            on: on.into(),
        });
        self
    }

    /// Appends a full outer join.
    #[must_use]
    pub fn add_full_outer_join(
        mut self,
        table: impl Into<String>,
        on: impl Into<Condition>,
    ) -> Self {
        self.full_outer_joins.push(Join {
            table: table.into(),
            on: on.into(),
        });
        self
    }
}

impl SqlStatement for Select {
    /// Renders the statement.
    ///
    /// Clauses are emitted in a fixed canonical order: select list, FROM,
    /// joins (inner, left outer, right outer, full outer; append order
    /// within each kind), WHERE, GROUP BY, HAVING, ORDER BY, LIMIT,
    /// OFFSET. Absent clauses are omitted entirely.
    fn to_sql(&self) -> Result<String> {
        let mut sql = String::from("SELECT ");

        if let Some(distinct) = &self.distinct {
            sql.push_str("DISTINCT ON (");
            sql.push_str(&distinct.to_sql());
            sql.push_str(") ");
        }

        match &self.select {
            Some(list) => sql.push_str(&list.to_sql()?),
            None => sql.push('*'),
        }

        let from = self
            .from
            .as_ref()
            .ok_or_else(|| QueryError::missing_clause("from"))?;
        sql.push_str(" FROM ");
        sql.push_str(from);

        let join_kinds = [
            ("INNER", &self.inner_joins),
            ("LEFT OUTER", &self.left_outer_joins),
            ("RIGHT OUTER", &self.right_outer_joins),
            ("FULL OUTER", &self.full_outer_joins),
        ];
        for (kind, joins) in join_kinds {
            for join in joins {
                sql.push(' ');
                sql.push_str(kind);
                sql.push_str(" JOIN ");
                sql.push_str(&join.table);
                sql.push_str(" ON ");
                sql.push_str(&join.on.to_sql()?);
            }
        }

        if let Some(where_clause) = &self.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&where_clause.to_sql()?);
        }
        if let Some(group_by) = &self.group_by {
            sql.push_str(" GROUP BY ");
            sql.push_str(&group_by.to_sql());
        }
        if let Some(having) = &self.having {
            sql.push_str(" HAVING ");
            sql.push_str(&having.to_sql()?);
        }
        if let Some(order_by) = &self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(&order_by.to_sql());
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        Ok(sql)
    }

    fn is_critical(&self) -> bool {
        self.critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::clause::Direction;

    #[test]
    fn test_defaults_to_star() {
        let sql = Select::new().from("users").to_sql().unwrap();
        assert_eq!(sql, "SELECT * FROM users");
    }

    #[test]
    fn test_missing_from_is_misuse() {
        let err = Select::new().select("id").to_sql().unwrap_err();
        assert_eq!(
            err,
            QueryError::Misuse(String::from("from clause has not been defined"))
        );
    }

    #[test]
    fn test_missing_from_fails_with_all_other_clauses_set() {
        let err = Select::new()
            .select("id")
            .where_clause("a = :a")
            .group_by("a")
            .having("COUNT(*) > 1")
            .order_by("a")
            .distinct("a")
            .limit(1)
            .offset(2)
            .add_inner_join("t", "t.a = a")
            .to_sql()
            .unwrap_err();
        assert!(matches!(err, QueryError::Misuse(_)));
    }

    #[test]
    fn test_aliased_select_list_order() {
        let sql = Select::new()
            .select(vec![("a", "x"), ("b", "y")])
            .from("t")
            .to_sql()
            .unwrap();
        assert_eq!(sql, "SELECT x AS a, y AS b FROM t");
    }

    #[test]
    fn test_distinct_on() {
        let sql = Select::new()
            .distinct(vec!["author"])
            .select("author, title")
            .from("blog_post")
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "SELECT DISTINCT ON (author) author, title FROM blog_post"
        );
    }

    #[test]
    fn test_join_kind_order_is_fixed() {
        let sql = Select::new()
            .from("a")
            .add_full_outer_join("f", "f.id = a.f_id")
            .add_inner_join("i", "i.id = a.i_id")
            .add_left_outer_join("l", "l.id = a.l_id")
            .add_right_outer_join("r", "r.id = a.r_id")
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "SELECT * FROM a \
             INNER JOIN i ON i.id = a.i_id \
             LEFT OUTER JOIN l ON l.id = a.l_id \
             RIGHT OUTER JOIN r ON r.id = a.r_id \
             FULL OUTER JOIN f ON f.id = a.f_id"
        );
    }

    #[test]
    fn test_append_order_within_join_kind() {
        let sql = Select::new()
            .from("a")
            .add_inner_join("first", "first.id = a.id")
            .add_inner_join("second", "second.id = a.id")
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "SELECT * FROM a INNER JOIN first ON first.id = a.id \
             INNER JOIN second ON second.id = a.id"
        );
    }

    #[test]
    fn test_full_clause_order() {
        let sql = Select::new()
            .select("author, COUNT(*)")
            .from("blog_post")
            .add_inner_join("blog_user", "blog_user.id = blog_post.author")
            .where_clause(Condition::all(vec![("published", "TRUE")]))
            .group_by("author")
            .having("COUNT(*) > :min")
            .order_by(vec![("author", Direction::Asc)])
            .limit(10)
            .offset(20)
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "SELECT author, COUNT(*) FROM blog_post \
             INNER JOIN blog_user ON blog_user.id = blog_post.author \
             WHERE published = TRUE \
             GROUP BY author \
             HAVING COUNT(*) > :min \
             ORDER BY author ASC \
             LIMIT 10 OFFSET 20"
        );
    }

    #[test]
    fn test_limit_accepts_none() {
        let sql = Select::new().from("t").limit(None).to_sql().unwrap();
        assert_eq!(sql, "SELECT * FROM t");
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let query = Select::new()
            .select("id")
            .from("users")
            .where_clause("id = :id");
        let first = query.to_sql().unwrap();
        assert_eq!(query.to_sql().unwrap(), first);
    }

    #[test]
    fn test_critical_flag() {
        assert!(!Select::new().from("t").is_critical());
        assert!(Select::new().from("t").critical(true).is_critical());
    }
}
