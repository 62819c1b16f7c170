//! Migration generation from a schema diff.
//!
//! For every table-classified entity in the diff, the generator emits a
//! forward operation paired with its inverse, and tracks the
//! de-duplicated set of operation-kind symbols the generated module
//! must import. Non-table constructs are reported and skipped.

use tracing::info;

use crate::diff::SchemaDiff;
use crate::error::{MigrateError, Result};
use crate::operations::{AddTable, Operation, OperationKind, RemoveTable, SchemaSource};
use crate::schema::{EntityKind, Snapshot};

/// The three artifacts of one generation run.
///
/// `down[i]` is the inverse of `up[i]`: the lists share pairwise order.
/// Consumers that need a true rollback order reverse the down list; the
/// code-emission stage does exactly that when it renders a module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedMigration {
    /// De-duplicated operation-kind symbols, in first-appearance order.
    pub imports: Vec<OperationKind>,
    /// Forward operations, in diff order.
    pub up: Vec<Operation>,
    /// Inverse operations, pairwise with `up`.
    pub down: Vec<Operation>,
    /// Non-table entities observed in the diff: reported, no operation
    /// emitted.
    pub skipped: Vec<(String, EntityKind)>,
}

impl GeneratedMigration {
    fn import(&mut self, kind: OperationKind) {
        if !self.imports.contains(&kind) {
            self.imports.push(kind);
        }
    }

    /// Returns true when the run produced no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.up.is_empty()
    }
}

/// Generates migration operations from two snapshots of one mapping.
///
/// Surviving (common) entity keys are not structurally compared: only
/// additions and removals produce operations.
///
/// # Errors
///
/// Fails fast on a snapshot violating the unique-key invariant, naming
/// the offending entity key.
pub fn generate(
    old: &Snapshot,
    new: &Snapshot,
    mapping_name: &str,
) -> Result<GeneratedMigration> {
    old.validate()?;
    new.validate()?;
    let diff = SchemaDiff::between(old, new);
    let mut generated = GeneratedMigration::default();

    for key in &diff.added {
        let entity = new
            .get(key)
            .ok_or_else(|| MigrateError::UnknownEntity(key.clone()))?;
        match entity.kind {
            EntityKind::Model => {
                let table = entity.table_name(mapping_name);
                info!(entity = %key, table = %table, "add table");
                generated.import(OperationKind::AddTable);
                generated.import(OperationKind::RemoveTable);
                generated
                    .up
                    .push(AddTable::new(&table, key, SchemaSource::New).into());
                generated.down.push(RemoveTable::new(&table).into());
            }
            kind => {
                info!(entity = %key, "add: skipping non-table entity");
                generated.skipped.push((key.clone(), kind));
            }
        }
    }

    for key in &diff.removed {
        let entity = old
            .get(key)
            .ok_or_else(|| MigrateError::UnknownEntity(key.clone()))?;
        match entity.kind {
            EntityKind::Model => {
                let table = entity.table_name(mapping_name);
                info!(entity = %key, table = %table, "remove table");
                generated.import(OperationKind::AddTable);
                generated.import(OperationKind::RemoveTable);
                generated.up.push(RemoveTable::new(&table).into());
                generated
                    .down
                    .push(AddTable::new(&table, key, SchemaSource::Old).into());
            }
            kind => {
                info!(entity = %key, "remove: skipping non-table entity");
                generated.skipped.push((key.clone(), kind));
            }
        }
    }

    Ok(generated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnDef, EntityDef};

    fn post_entity() -> EntityDef {
        EntityDef::new("post").column(ColumnDef::new("id", "BIGINT").primary_key())
    }

    #[test]
    fn test_added_entity_yields_create_paired_with_drop() {
        let old = Snapshot::new();
        let new = Snapshot::new().entity(post_entity());
        let generated = generate(&old, &new, "blog").unwrap();

        assert_eq!(generated.up.len(), 1);
        assert_eq!(generated.down.len(), 1);
        assert_eq!(
            generated.up[0],
            AddTable::new("blog_post", "post", SchemaSource::New).into()
        );
        assert_eq!(generated.down[0], RemoveTable::new("blog_post").into());
    }

    #[test]
    fn test_removed_entity_yields_drop_paired_with_create_from_old() {
        let old = Snapshot::new().entity(post_entity());
        let new = Snapshot::new();
        let generated = generate(&old, &new, "blog").unwrap();

        assert_eq!(generated.up[0], RemoveTable::new("blog_post").into());
        assert_eq!(
            generated.down[0],
            AddTable::new("blog_post", "post", SchemaSource::Old).into()
        );
    }

    #[test]
    fn test_imports_deduplicated() {
        let old = Snapshot::new().entity(EntityDef::new("tag"));
        let new = Snapshot::new()
            .entity(post_entity())
            .entity(EntityDef::new("comment"));
        let generated = generate(&old, &new, "blog").unwrap();

        assert_eq!(
            generated.imports,
            vec![OperationKind::AddTable, OperationKind::RemoveTable]
        );
    }

    #[test]
    fn test_imports_empty_without_table_operations() {
        let old = Snapshot::new();
        let new = Snapshot::new().entity(EntityDef::new("status").kind(EntityKind::Enum));
        let generated = generate(&old, &new, "blog").unwrap();

        assert!(generated.imports.is_empty());
        assert!(generated.is_empty());
        assert_eq!(
            generated.skipped,
            vec![(String::from("status"), EntityKind::Enum)]
        );
    }

    #[test]
    fn test_one_pair_per_table_entry() {
        let old = Snapshot::new()
            .entity(EntityDef::new("tag"))
            .entity(EntityDef::new("shared"));
        let new = Snapshot::new()
            .entity(post_entity())
            .entity(EntityDef::new("shared"));
        let generated = generate(&old, &new, "blog").unwrap();

        assert_eq!(generated.up.len(), 2);
        assert_eq!(generated.down.len(), 2);
    }

    #[test]
    fn test_explicit_name_used_in_operations() {
        let old = Snapshot::new();
        let new = Snapshot::new().entity(
            EntityDef::new("user")
                .named("accounts")
                .column(ColumnDef::new("id", "BIGINT").primary_key()),
        );
        let generated = generate(&old, &new, "blog").unwrap();
        assert_eq!(
            generated.up[0],
            AddTable::new("accounts", "user", SchemaSource::New).into()
        );
    }

    #[test]
    fn test_common_keys_produce_no_operations() {
        let snapshot = Snapshot::new().entity(post_entity());
        let generated = generate(&snapshot, &snapshot, "blog").unwrap();
        assert!(generated.is_empty());
        assert!(generated.imports.is_empty());
    }

    #[test]
    fn test_duplicate_key_fails_fast() {
        let bad = Snapshot::new()
            .entity(EntityDef::new("post"))
            .entity(EntityDef::new("post"));
        assert!(matches!(
            generate(&bad, &Snapshot::new(), "blog"),
            Err(MigrateError::DuplicateKey(key)) if key == "post"
        ));
    }

    #[test]
    fn test_blog_post_scenario() {
        // Old schema {}, new schema {"post": {...}}, mapping "blog".
        let old = Snapshot::new();
        let new = Snapshot::new().entity(post_entity());
        let generated = generate(&old, &new, "blog").unwrap();

        assert_eq!(generated.up.len(), 1);
        let sql = generated.up[0].to_sql(&old, &new).unwrap();
        assert!(sql.starts_with("CREATE TABLE blog_post "));
    }
}
