//! Clause value types shared by the statement builders.
//!
//! Each setter on a builder accepts either a raw string or an ordered
//! structured form; the `From` impls here do the auto-wrapping so call
//! sites stay terse.

use crate::error::{QueryError, Result};

/// A select list: a raw expression, or ordered alias → expression pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectList {
    /// Raw expression string, rendered as-is.
    Expr(String),
    /// Ordered (alias, expression) pairs, rendered `expr AS alias`.
    Aliased(Vec<(String, String)>),
}

impl SelectList {
    /// Renders the select list.
    ///
    /// # Errors
    ///
    /// Returns a misuse error when the aliased form is empty.
    pub fn to_sql(&self) -> Result<String> {
        match self {
            Self::Expr(expr) => Ok(expr.clone()),
            Self::Aliased(pairs) => {
                if pairs.is_empty() {
                    return Err(QueryError::Misuse(String::from(
                        "select clause given an empty list",
                    )));
                }
                let rendered: Vec<String> = pairs
                    .iter()
                    .map(|(alias, expr)| format!("{expr} AS {alias}"))
                    .collect();
                Ok(rendered.join(", "))
            }
        }
    }
}

impl From<&str> for SelectList {
    fn from(expr: &str) -> Self {
        Self::Expr(String::from(expr))
    }
}

impl From<String> for SelectList {
    fn from(expr: String) -> Self {
        Self::Expr(expr)
    }
}

impl From<Vec<(&str, &str)>> for SelectList {
    fn from(pairs: Vec<(&str, &str)>) -> Self {
        Self::Aliased(
            pairs
                .into_iter()
                .map(|(a, e)| (String::from(a), String::from(e)))
                .collect(),
        )
    }
}

impl From<Vec<(String, String)>> for SelectList {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::Aliased(pairs)
    }
}

/// A plain column list: a raw string or ordered column names.
///
/// Used by GROUP BY and DISTINCT ON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldList {
    /// Raw string, rendered as-is.
    Raw(String),
    /// Ordered column names, joined with `, `.
    Columns(Vec<String>),
}

impl FieldList {
    /// Renders the field list.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Raw(raw) => raw.clone(),
            Self::Columns(cols) => cols.join(", "),
        }
    }
}

impl From<&str> for FieldList {
    fn from(raw: &str) -> Self {
        Self::Raw(String::from(raw))
    }
}

impl From<String> for FieldList {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

impl From<Vec<&str>> for FieldList {
    fn from(cols: Vec<&str>) -> Self {
        Self::Columns(cols.into_iter().map(String::from).collect())
    }
}

impl From<Vec<String>> for FieldList {
    fn from(cols: Vec<String>) -> Self {
        Self::Columns(cols)
    }
}

/// Sort direction for ORDER BY pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl Direction {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// An ORDER BY spec: a raw string or ordered (column, direction) pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderList {
    /// Raw string, rendered as-is.
    Raw(String),
    /// Ordered (column, direction) pairs, rendered `col ASC, col2 DESC`.
    Pairs(Vec<(String, Direction)>),
}

impl OrderList {
    /// Renders the order spec.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Raw(raw) => raw.clone(),
            Self::Pairs(pairs) => {
                let rendered: Vec<String> = pairs
                    .iter()
                    .map(|(col, dir)| format!("{col} {}", dir.as_sql()))
                    .collect();
                rendered.join(", ")
            }
        }
    }
}

impl From<&str> for OrderList {
    fn from(raw: &str) -> Self {
        Self::Raw(String::from(raw))
    }
}

impl From<String> for OrderList {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

impl From<Vec<(&str, Direction)>> for OrderList {
    fn from(pairs: Vec<(&str, Direction)>) -> Self {
        Self::Pairs(
            pairs
                .into_iter()
                .map(|(c, d)| (String::from(c), d))
                .collect(),
        )
    }
}

impl From<Vec<(String, Direction)>> for OrderList {
    fn from(pairs: Vec<(String, Direction)>) -> Self {
        Self::Pairs(pairs)
    }
}
