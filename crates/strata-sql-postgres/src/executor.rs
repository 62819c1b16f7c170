//! Statement execution against a chosen link.
//!
//! A statement is rendered, its named placeholders resolved to
//! positional parameters, each value bound by its runtime type, and the
//! result captured together with the driver error state. Fetching is
//! gated on a clean error state: a failed execution yields no rows, it
//! never yields partial data.

use std::collections::VecDeque;

use sqlx::postgres::PgRow;
use sqlx::{Column, Row as _, TypeInfo};
use tracing::{debug, error};

use strata_sql_core::{resolve_placeholders, Params, SqlStatement, SqlValue};

use crate::config::ExecutionMode;
use crate::database::Database;
use crate::error::{DbError, Result};

/// SQLSTATE code reported for a successful execution.
pub const CLEAN_STATE: &str = "00000";

/// Structured driver error state: an error-code string and a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorState {
    /// Five-character SQLSTATE code, `00000` when clean.
    pub code: String,
    /// Human-readable driver message, empty when clean.
    pub message: String,
}

impl Default for ErrorState {
    fn default() -> Self {
        Self {
            code: String::from(CLEAN_STATE),
            message: String::new(),
        }
    }
}

impl ErrorState {
    /// Returns true when the state reports no error.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.code == CLEAN_STATE
    }

    /// Captures the state from a driver error.
    ///
    /// Errors without a SQLSTATE (protocol or pool failures) map to the
    /// general `HY000` code.
    #[must_use]
    pub fn from_driver(err: &sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => Self {
                code: db_err
                    .code()
                    .map_or_else(|| String::from("HY000"), |code| code.into_owned()),
                message: db_err.message().to_string(),
            },
            other => Self {
                code: String::from("HY000"),
                message: other.to_string(),
            },
        }
    }
}

/// One result row: an ordered column-name → value mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Vec<(String, SqlValue)>,
}

impl Row {
    /// Creates a row from ordered (name, value) pairs.
    #[must_use]
    pub fn new(columns: Vec<(String, SqlValue)>) -> Self {
        Self { columns }
    }

    /// Returns the value of the named column, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterates over (name, value) pairs in select-list order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true when the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn from_pg(row: &PgRow) -> Self {
        let columns = row
            .columns()
            .iter()
            .map(|column| {
                let name = column.name().to_string();
                let value = decode_column(row, column.ordinal(), column.type_info().name());
                (name, value)
            })
            .collect();
        Self { columns }
    }
}

/// Decodes one column into a [`SqlValue`] based on its Postgres type.
///
/// Types with no direct mapping are read back as text; values that
/// cannot be decoded at all surface as NULL rather than aborting the
/// whole fetch.
fn decode_column(row: &PgRow, index: usize, type_name: &str) -> SqlValue {
    match type_name {
        "BOOL" => row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .flatten()
            .map_or(SqlValue::Null, SqlValue::Bool),
        "INT2" => row
            .try_get::<Option<i16>, _>(index)
            .ok()
            .flatten()
            .map_or(SqlValue::Null, |v| SqlValue::Int(i64::from(v))),
        "INT4" => row
            .try_get::<Option<i32>, _>(index)
            .ok()
            .flatten()
            .map_or(SqlValue::Null, |v| SqlValue::Int(i64::from(v))),
        "INT8" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map_or(SqlValue::Null, SqlValue::Int),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(index)
            .ok()
            .flatten()
            .map_or(SqlValue::Null, |v| SqlValue::Float(f64::from(v))),
        "FLOAT8" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map_or(SqlValue::Null, SqlValue::Float),
        "TIMESTAMP" => row
            .try_get::<Option<chrono::NaiveDateTime>, _>(index)
            .ok()
            .flatten()
            .map_or(SqlValue::Null, |v| SqlValue::Text(v.to_string())),
        "TIMESTAMPTZ" => row
            .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(index)
            .ok()
            .flatten()
            .map_or(SqlValue::Null, |v| SqlValue::Text(v.to_rfc3339())),
        "DATE" => row
            .try_get::<Option<chrono::NaiveDate>, _>(index)
            .ok()
            .flatten()
            .map_or(SqlValue::Null, |v| SqlValue::Text(v.to_string())),
        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map_or(SqlValue::Null, SqlValue::Text),
    }
}

/// The outcome of one statement execution.
///
/// Callers must check [`Executed::success`]; outside development mode a
/// failed execution is reported here, not as an error.
#[derive(Debug, Clone)]
pub struct Executed {
    success: bool,
    state: ErrorState,
    rows: VecDeque<Row>,
}

impl Executed {
    fn succeeded(rows: Vec<Row>) -> Self {
        Self {
            success: true,
            state: ErrorState::default(),
            rows: rows.into(),
        }
    }

    fn failed(state: ErrorState) -> Self {
        Self {
            success: false,
            state,
            rows: VecDeque::new(),
        }
    }

    /// Returns true when the execution completed with a clean state.
    #[must_use]
    pub fn success(&self) -> bool {
        self.success
    }

    /// Returns the captured driver error state.
    #[must_use]
    pub fn error_state(&self) -> &ErrorState {
        &self.state
    }

    /// Returns the next result row.
    ///
    /// Returns `None` when the execution did not succeed, the error
    /// state is non-clean, or all rows have been consumed.
    pub fn fetch(&mut self) -> Option<Row> {
        if !self.success || !self.state.is_clean() {
            return None;
        }
        self.rows.pop_front()
    }

    /// Returns all remaining result rows.
    ///
    /// Returns `None` when the execution did not succeed or the error
    /// state is non-clean.
    pub fn fetch_all(&mut self) -> Option<Vec<Row>> {
        if !self.success || !self.state.is_clean() {
            return None;
        }
        Some(self.rows.drain(..).collect())
    }
}

impl Database {
    /// Executes a statement with its bound parameters.
    ///
    /// The statement runs on the master link when critical (all
    /// mutations, and reads that must bypass replicas) and on the read
    /// link otherwise. Each parameter is bound by its runtime type.
    ///
    /// On a driver failure the error state is captured and logged with
    /// the offending SQL; in development mode the failure is re-raised
    /// as [`DbError::Execution`], in every other mode it is returned as
    /// a non-success [`Executed`] the caller must check.
    ///
    /// # Errors
    ///
    /// Always fails on misuse (missing clause, unbound placeholder);
    /// fails on execution errors only in development mode.
    pub async fn run<S>(&self, statement: &S, params: &Params) -> Result<Executed>
    where
        S: SqlStatement + ?Sized,
    {
        let sql = statement.to_sql()?;
        let (positional, values) = resolve_placeholders(&sql, params)?;
        let pool = if statement.is_critical() {
            self.master_link()
        } else {
            self.link()
        };

        let mut query = sqlx::query(&positional);
        for value in values {
            query = match value {
                SqlValue::Null => query.bind(None::<String>),
                SqlValue::Bool(b) => query.bind(b),
                SqlValue::Int(i) => query.bind(i),
                SqlValue::Float(f) => query.bind(f),
                SqlValue::Text(s) => query.bind(s),
            };
        }

        debug!(sql = %positional, critical = statement.is_critical(), "executing statement");
        match query.fetch_all(pool).await {
            Ok(rows) => Ok(Executed::succeeded(rows.iter().map(Row::from_pg).collect())),
            Err(err) => {
                let state = ErrorState::from_driver(&err);
                error!(code = %state.code, sql = %sql, "query failed: {}", state.message);
                if self.mode() == ExecutionMode::Development {
                    Err(DbError::Execution { state, sql })
                } else {
                    Ok(Executed::failed(state))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_state_defaults_to_clean() {
        let state = ErrorState::default();
        assert!(state.is_clean());
        assert_eq!(state.code, "00000");
    }

    #[test]
    fn test_row_lookup_and_order() {
        let row = Row::new(vec![
            (String::from("id"), SqlValue::Int(1)),
            (String::from("name"), SqlValue::Text(String::from("a"))),
        ]);
        assert_eq!(row.get("id"), Some(&SqlValue::Int(1)));
        assert_eq!(row.get("missing"), None);
        let names: Vec<&str> = row.columns().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["id", "name"]);
    }

    #[test]
    fn test_fetch_consumes_rows_in_order() {
        let mut executed = Executed::succeeded(vec![
            Row::new(vec![(String::from("n"), SqlValue::Int(1))]),
            Row::new(vec![(String::from("n"), SqlValue::Int(2))]),
        ]);
        assert!(executed.success());
        assert_eq!(
            executed.fetch().unwrap().get("n"),
            Some(&SqlValue::Int(1))
        );
        assert_eq!(
            executed.fetch().unwrap().get("n"),
            Some(&SqlValue::Int(2))
        );
        assert!(executed.fetch().is_none());
    }

    #[test]
    fn test_fetch_all_drains_remaining() {
        let mut executed = Executed::succeeded(vec![
            Row::new(vec![(String::from("n"), SqlValue::Int(1))]),
            Row::new(vec![(String::from("n"), SqlValue::Int(2))]),
        ]);
        let _first = executed.fetch();
        let rest = executed.fetch_all().unwrap();
        assert_eq!(rest.len(), 1);
        assert!(executed.fetch_all().unwrap().is_empty());
    }

    #[test]
    fn test_failed_execution_yields_no_rows() {
        let state = ErrorState {
            code: String::from("42P01"),
            message: String::from("relation does not exist"),
        };
        let mut executed = Executed::failed(state);
        assert!(!executed.success());
        assert!(!executed.error_state().is_clean());
        assert!(executed.fetch().is_none());
        assert!(executed.fetch_all().is_none());
    }
}
