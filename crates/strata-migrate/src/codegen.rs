//! Migration code emission.
//!
//! The single stage that turns a [`GeneratedMigration`] into Rust
//! source implementing the [`crate::Migration`] trait. Generation
//! itself works on structured operation records; only this stage knows
//! what the output language looks like.

use crate::generator::GeneratedMigration;
use crate::operations::{Operation, OperationKind, SchemaSource};

/// Renders a Rust source string containing a `Migration` impl for the
/// given generation result.
///
/// The generated `up()` returns the forward operations in order; the
/// generated `down()` returns the inverse operations in reversed order,
/// so running it as-is performs a true rollback.
#[must_use]
pub fn generate_migration_code(id: &str, migration: &GeneratedMigration) -> String {
    let struct_name = id_to_struct_name(id);
    let imports = render_imports(&migration.imports);
    let up_body = render_operations(migration.up.iter());
    let down_body = render_operations(migration.down.iter().rev());

    format!(
        "{imports}use strata_migrate::{{Migration, Operation}};\n\
         \n\
         pub struct {struct_name};\n\
         \n\
         impl Migration for {struct_name} {{\n\
         \x20   const NAME: &'static str = \"{id}\";\n\
         \n\
         \x20   fn up() -> Vec<Operation> {{\n\
         \x20       vec![\n\
         {up_body}\
         \x20       ]\n\
         \x20   }}\n\
         \n\
         \x20   fn down() -> Vec<Operation> {{\n\
         \x20       vec![\n\
         {down_body}\
         \x20       ]\n\
         \x20   }}\n\
         }}\n"
    )
}

/// Converts a migration id like "0002_add_post" into a struct name like
/// "Migration0002AddPost".
fn id_to_struct_name(id: &str) -> String {
    let mut result = String::from("Migration");
    let mut capitalize_next = true;
    for ch in id.chars() {
        if ch == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(ch.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(ch);
        }
    }
    result
}

/// Renders the operation-symbol import line, empty when the module
/// references no operations.
fn render_imports(imports: &[OperationKind]) -> String {
    if imports.is_empty() {
        return String::new();
    }
    let mut symbols: Vec<&str> = imports.iter().map(|kind| kind.symbol()).collect();
    if imports.contains(&OperationKind::AddTable) {
        symbols.push("SchemaSource");
    }
    format!(
        "use strata_migrate::operations::{{{}}};\n",
        symbols.join(", ")
    )
}

fn render_operations<'a>(ops: impl Iterator<Item = &'a Operation>) -> String {
    let mut out = String::new();
    for op in ops {
        out.push_str(&format!("            {},\n", render_operation(op)));
    }
    out
}

fn render_operation(op: &Operation) -> String {
    match op {
        Operation::AddTable(add) => {
            let source = match add.source {
                SchemaSource::New => "SchemaSource::New",
                SchemaSource::Old => "SchemaSource::Old",
            };
            format!(
                "AddTable::new(\"{}\", \"{}\", {source}).into()",
                add.table, add.key
            )
        }
        Operation::RemoveTable(remove) => {
            format!("RemoveTable::new(\"{}\").into()", remove.table)
        }
    }
}
