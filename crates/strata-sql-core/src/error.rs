//! Error types for statement building.

/// Errors raised while assembling or rendering a statement.
///
/// These are library-misuse failures: they are always returned to the
/// caller immediately and never downgraded to a status flag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// A required clause is missing, or an argument has the wrong shape.
    #[error("query misuse: {0}")]
    Misuse(String),

    /// A condition was built from empty input.
    #[error("condition has no operands")]
    EmptyCondition,

    /// The rendered SQL references a placeholder with no bound value.
    #[error("no value bound for placeholder ':{0}'")]
    UnboundParameter(String),
}

impl QueryError {
    /// Creates a misuse error naming the offending clause.
    #[must_use]
    pub fn missing_clause(clause: &str) -> Self {
        Self::Misuse(format!("{clause} clause has not been defined"))
    }
}

/// Result type for statement building.
pub type Result<T> = std::result::Result<T, QueryError>;
