//! INSERT statement builder.

use crate::error::{QueryError, Result};
use crate::SqlStatement;

/// A composable INSERT statement.
///
/// Values are ordered column → right-hand expression pairs; the usual
/// right-hand side is a named placeholder bound later through
/// [`crate::Params`]. An empty values set renders `DEFAULT VALUES`, which
/// inserts a row built entirely from column defaults.
#[derive(Debug, Clone, Default)]
pub struct Insert {
    into: Option<String>,
    values: Vec<(String, String)>,
}

impl Insert {
    /// Creates a new empty INSERT statement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the destination table. Mandatory before rendering.
    #[must_use]
    pub fn into(mut self, table: impl Into<String>) -> Self {
        self.into = Some(table.into());
        self
    }

    /// Sets the ordered column → right-hand expression pairs.
    #[must_use]
    pub fn values<C, E>(mut self, values: Vec<(C, E)>) -> Self
    where
        C: Into<String>,
        E: Into<String>,
    {
        self.values = values
            .into_iter()
            .map(|(c, e)| (c.into(), e.into()))
            .collect();
        self
    }
}

impl SqlStatement for Insert {
    fn to_sql(&self) -> Result<String> {
        let into = self
            .into
            .as_ref()
            .ok_or_else(|| QueryError::missing_clause("into"))?;

        if self.values.is_empty() {
            return Ok(format!("INSERT INTO {into} DEFAULT VALUES"));
        }

        let columns: Vec<&str> = self.values.iter().map(|(c, _)| c.as_str()).collect();
        let rhs: Vec<&str> = self.values.iter().map(|(_, e)| e.as_str()).collect();
        Ok(format!(
            "INSERT INTO {into} ({}) VALUES ({})",
            columns.join(", "),
            rhs.join(", ")
        ))
    }

    fn is_critical(&self) -> bool {
        true
    }
}
