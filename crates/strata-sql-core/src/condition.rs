//! Boolean condition trees for WHERE, HAVING and join ON clauses.
//!
//! A condition is built either from a structured description (an ordered
//! mapping of column to right-hand expression, combined with implicit
//! equality and AND) or wrapped verbatim from a pre-formed expression.
//! Right-hand expressions are normally named placeholders (`:name`), so
//! values stay out of the SQL text and are bound separately through
//! [`crate::Params`].

use crate::error::{QueryError, Result};

/// A boolean expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// A pre-formed expression, rendered verbatim.
    Raw(String),
    /// Ordered column → right-hand expression pairs, joined with
    /// implicit `=` and `AND`.
    All(Vec<(String, String)>),
    /// Conjunction of two subtrees.
    And(Box<Condition>, Box<Condition>),
    /// Disjunction of two subtrees.
    Or(Box<Condition>, Box<Condition>),
}

impl Condition {
    /// Wraps a pre-formed boolean expression.
    #[must_use]
    pub fn raw(expr: impl Into<String>) -> Self {
        Self::Raw(expr.into())
    }

    /// Builds an implicit-equality conjunction from ordered
    /// column → right-hand expression pairs.
    #[must_use]
    pub fn all<C, E>(pairs: Vec<(C, E)>) -> Self
    where
        C: Into<String>,
        E: Into<String>,
    {
        Self::All(
            pairs
                .into_iter()
                .map(|(c, e)| (c.into(), e.into()))
                .collect(),
        )
    }

    /// Combines this condition with another using AND.
    #[must_use]
    pub fn and(self, other: impl Into<Self>) -> Self {
        Self::And(Box::new(self), Box::new(other.into()))
    }

    /// Combines this condition with another using OR.
    #[must_use]
    pub fn or(self, other: impl Into<Self>) -> Self {
        Self::Or(Box::new(self), Box::new(other.into()))
    }

    /// Renders the condition to SQL boolean-expression text.
    ///
    /// Rendering is pure: it does not mutate the tree and is idempotent
    /// given unchanged input.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyCondition`] when the tree was built
    /// from empty input, instead of silently producing invalid SQL.
    pub fn to_sql(&self) -> Result<String> {
        match self {
            Self::Raw(expr) => {
                if expr.trim().is_empty() {
                    return Err(QueryError::EmptyCondition);
                }
                Ok(expr.clone())
            }
            Self::All(pairs) => {
                if pairs.is_empty() {
                    return Err(QueryError::EmptyCondition);
                }
                let rendered: Vec<String> = pairs
                    .iter()
                    .map(|(column, rhs)| format!("{column} = {rhs}"))
                    .collect();
                Ok(rendered.join(" AND "))
            }
            Self::And(lhs, rhs) => Ok(format!("({}) AND ({})", lhs.to_sql()?, rhs.to_sql()?)),
            Self::Or(lhs, rhs) => Ok(format!("({}) OR ({})", lhs.to_sql()?, rhs.to_sql()?)),
        }
    }
}

impl From<&str> for Condition {
    fn from(expr: &str) -> Self {
        Self::raw(expr)
    }
}

impl From<String> for Condition {
    fn from(expr: String) -> Self {
        Self::Raw(expr)
    }
}

impl From<Vec<(&str, &str)>> for Condition {
    fn from(pairs: Vec<(&str, &str)>) -> Self {
        Self::all(pairs)
    }
}

impl From<Vec<(String, String)>> for Condition {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::All(pairs)
    }
}
