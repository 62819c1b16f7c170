//! Schema snapshot types.
//!
//! A snapshot is the fully materialized schema definition of one mapping
//! at one point in time: an ordered list of entity definitions keyed by
//! a unique entity key. Snapshots are plain serde values; whatever
//! config front end produced them (YAML, JSON) is not this crate's
//! concern.

use serde::{Deserialize, Serialize};

use crate::error::{MigrateError, Result};

/// What an entity maps to physically.
///
/// Decided once at schema-load time; everything that is not a table is
/// a non-table construct the generator only reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A physical table.
    #[default]
    Model,
    /// An enumerated type.
    Enum,
}

const fn default_nullable() -> bool {
    true
}

/// One column of a table entity.
///
/// Provider-specific metadata: opaque to the differ, consumed when an
/// add-table operation renders its CREATE TABLE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// SQL type text (e.g. `BIGINT`, `VARCHAR(255)`).
    #[serde(rename = "type")]
    pub sql_type: String,
    /// Whether the column accepts NULL.
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    /// Whether the column is part of the primary key.
    #[serde(default)]
    pub primary_key: bool,
    /// Default value expression.
    #[serde(default)]
    pub default: Option<String>,
}

impl ColumnDef {
    /// Creates a nullable column of the given type.
    #[must_use]
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            nullable: true,
            primary_key: false,
            default: None,
        }
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Marks the column as part of the primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    /// Sets a default value expression.
    #[must_use]
    pub fn default_value(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(expr.into());
        self
    }
}

/// One entity definition inside a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDef {
    /// Entity key, unique within the snapshot.
    pub key: String,
    /// Explicit physical name; derived from the mapping and key when
    /// absent.
    #[serde(default)]
    pub name: Option<String>,
    /// What the entity maps to; defaults to a table.
    #[serde(default, rename = "type")]
    pub kind: EntityKind,
    /// Column definitions (table entities).
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
}

impl EntityDef {
    /// Creates a table entity with the given key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: None,
            kind: EntityKind::Model,
            columns: Vec::new(),
        }
    }

    /// Sets an explicit physical name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the entity kind.
    #[must_use]
    pub const fn kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    /// Appends a column definition.
    #[must_use]
    pub fn column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    /// Returns the physical table name: the explicit name when set,
    /// otherwise derived deterministically from the mapping name and
    /// the entity key.
    #[must_use]
    pub fn table_name(&self, mapping_name: &str) -> String {
        self.name.clone().unwrap_or_else(|| {
            format!("{}_{}", codify(mapping_name), codify(&self.key))
        })
    }
}

/// An ordered mapping from entity key to entity definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Entity definitions, in declaration order.
    #[serde(default)]
    pub entities: Vec<EntityDef>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entity definition.
    #[must_use]
    pub fn entity(mut self, entity: EntityDef) -> Self {
        self.entities.push(entity);
        self
    }

    /// Returns the entity with the given key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&EntityDef> {
        self.entities.iter().find(|e| e.key == key)
    }

    /// Returns true when the snapshot contains the key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over entity keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(|e| e.key.as_str())
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true when the snapshot holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Checks the unique-key invariant.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::DuplicateKey`] naming the first key that
    /// appears more than once.
    pub fn validate(&self) -> Result<()> {
        for (i, entity) in self.entities.iter().enumerate() {
            if self.entities[..i].iter().any(|e| e.key == entity.key) {
                return Err(MigrateError::DuplicateKey(entity.key.clone()));
            }
        }
        Ok(())
    }
}

/// Deterministically transforms a human-readable name into a safe
/// physical identifier fragment.
///
/// Camel-case boundaries become underscores, letters are lowercased,
/// and any run of non-alphanumeric characters collapses to a single
/// underscore: `BlogPost` → `blog_post`, `my blog` → `my_blog`.
#[must_use]
pub fn codify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if c.is_ascii_uppercase() {
                if prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit()) {
                    out.push('_');
                }
                out.push(c.to_ascii_lowercase());
            } else {
                out.push(c);
            }
            prev = Some(c);
        } else {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            prev = None;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}
