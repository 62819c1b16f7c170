//! Migration operations.
//!
//! Operations are structured records (kind plus typed arguments); a
//! separate code-emission stage renders them into generated source, and
//! the runner renders them into SQL at application time. The diff and
//! generation algorithms never touch output formatting.

use serde::{Deserialize, Serialize};

use crate::error::{MigrateError, Result};
use crate::schema::{ColumnDef, Snapshot};

/// The operation kinds a generated module can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    /// Create a table from an entity definition.
    AddTable,
    /// Drop a table by name.
    RemoveTable,
}

impl OperationKind {
    /// Returns the symbol name a generated module imports.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::AddTable => "AddTable",
            Self::RemoveTable => "RemoveTable",
        }
    }
}

/// Which snapshot an operation reads its entity definition from.
///
/// Forward create-table operations read the new snapshot; the inverse of
/// a removal recreates the table from the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaSource {
    /// The new (current declarative) snapshot.
    New,
    /// The old (last migrated) snapshot.
    Old,
}

/// Create a table from an entity definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddTable {
    /// Physical table name.
    pub table: String,
    /// Entity key inside the source snapshot.
    pub key: String,
    /// Snapshot the entity definition is read from.
    pub source: SchemaSource,
}

impl AddTable {
    /// Creates an add-table operation.
    #[must_use]
    pub fn new(table: impl Into<String>, key: impl Into<String>, source: SchemaSource) -> Self {
        Self {
            table: table.into(),
            key: key.into(),
            source,
        }
    }
}

/// Drop a table by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveTable {
    /// Physical table name.
    pub table: String,
}

impl RemoveTable {
    /// Creates a remove-table operation.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }
}

/// A single migration operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Create a table.
    AddTable(AddTable),
    /// Drop a table.
    RemoveTable(RemoveTable),
}

impl From<AddTable> for Operation {
    fn from(op: AddTable) -> Self {
        Self::AddTable(op)
    }
}

impl From<RemoveTable> for Operation {
    fn from(op: RemoveTable) -> Self {
        Self::RemoveTable(op)
    }
}

impl Operation {
    /// Returns the operation kind.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::AddTable(_) => OperationKind::AddTable,
            Self::RemoveTable(_) => OperationKind::RemoveTable,
        }
    }

    /// Renders the operation to SQL against the snapshot pair it was
    /// generated from.
    ///
    /// # Errors
    ///
    /// Fails fast, naming the offending entity key, when an add-table
    /// operation references a key missing from its source snapshot or a
    /// table entity with no columns.
    pub fn to_sql(&self, old: &Snapshot, new: &Snapshot) -> Result<String> {
        match self {
            Self::AddTable(op) => {
                let snapshot = match op.source {
                    SchemaSource::New => new,
                    SchemaSource::Old => old,
                };
                let entity = snapshot
                    .get(&op.key)
                    .ok_or_else(|| MigrateError::UnknownEntity(op.key.clone()))?;
                if entity.columns.is_empty() {
                    return Err(MigrateError::EmptyEntity(op.key.clone()));
                }
                Ok(create_table_sql(&op.table, &entity.columns))
            }
            Self::RemoveTable(op) => Ok(format!("DROP TABLE {}", op.table)),
        }
    }
}

fn create_table_sql(table: &str, columns: &[ColumnDef]) -> String {
    let mut defs: Vec<String> = columns.iter().map(column_definition).collect();

    let pk_columns: Vec<&str> = columns
        .iter()
        .filter(|c| c.primary_key)
        .map(|c| c.name.as_str())
        .collect();
    if !pk_columns.is_empty() {
        defs.push(format!("PRIMARY KEY ({})", pk_columns.join(", ")));
    }

    format!("CREATE TABLE {table} ({})", defs.join(", "))
}

fn column_definition(column: &ColumnDef) -> String {
    let mut def = format!("{} {}", column.name, column.sql_type);
    if let Some(default) = &column.default {
        def.push_str(" DEFAULT ");
        def.push_str(default);
    }
    if !column.nullable {
        def.push_str(" NOT NULL");
    }
    def
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::EntityDef;

    fn snapshots() -> (Snapshot, Snapshot) {
        let new = Snapshot::new().entity(
            EntityDef::new("post")
                .column(ColumnDef::new("id", "BIGINT").primary_key())
                .column(ColumnDef::new("title", "VARCHAR(255)").not_null())
                .column(
                    ColumnDef::new("created_at", "TIMESTAMP")
                        .default_value("CURRENT_TIMESTAMP")
                        .not_null(),
                ),
        );
        (Snapshot::new(), new)
    }

    #[test]
    fn test_add_table_renders_create_table() {
        let (old, new) = snapshots();
        let op: Operation = AddTable::new("blog_post", "post", SchemaSource::New).into();
        assert_eq!(
            op.to_sql(&old, &new).unwrap(),
            "CREATE TABLE blog_post (\
             id BIGINT NOT NULL, \
             title VARCHAR(255) NOT NULL, \
             created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP NOT NULL, \
             PRIMARY KEY (id))"
        );
    }

    #[test]
    fn test_remove_table_renders_drop_table() {
        let (old, new) = snapshots();
        let op: Operation = RemoveTable::new("blog_post").into();
        assert_eq!(op.to_sql(&old, &new).unwrap(), "DROP TABLE blog_post");
    }

    #[test]
    fn test_add_table_reads_the_named_source() {
        let old = Snapshot::new().entity(
            EntityDef::new("post").column(ColumnDef::new("id", "BIGINT").primary_key()),
        );
        let new = Snapshot::new();
        let op: Operation = AddTable::new("blog_post", "post", SchemaSource::Old).into();
        assert!(op.to_sql(&old, &new).unwrap().starts_with("CREATE TABLE"));
    }

    #[test]
    fn test_unknown_entity_names_the_key() {
        let (old, new) = snapshots();
        let op: Operation = AddTable::new("blog_tag", "tag", SchemaSource::New).into();
        assert!(matches!(
            op.to_sql(&old, &new),
            Err(MigrateError::UnknownEntity(key)) if key == "tag"
        ));
    }

    #[test]
    fn test_entity_without_columns_fails_fast() {
        let new = Snapshot::new().entity(EntityDef::new("post"));
        let op: Operation = AddTable::new("blog_post", "post", SchemaSource::New).into();
        assert!(matches!(
            op.to_sql(&Snapshot::new(), &new),
            Err(MigrateError::EmptyEntity(key)) if key == "post"
        ));
    }

    #[test]
    fn test_kind() {
        let add: Operation = AddTable::new("t", "k", SchemaSource::New).into();
        let remove: Operation = RemoveTable::new("t").into();
        assert_eq!(add.kind(), OperationKind::AddTable);
        assert_eq!(remove.kind(), OperationKind::RemoveTable);
        assert_eq!(OperationKind::AddTable.symbol(), "AddTable");
    }
}
