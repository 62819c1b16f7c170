//! Example: generating a migration for a blog mapping.
//!
//! Diffs an empty snapshot against a declarative schema with a post and
//! an author table, then prints the generated migration module.
//!
//! Run with: cargo run --example blog_migration -p strata-migrate

use strata_migrate::codegen::generate_migration_code;
use strata_migrate::generator::generate;
use strata_migrate::schema::{ColumnDef, EntityDef, Snapshot};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Last migrated state: nothing yet.
    let old = Snapshot::new();

    // Current declarative state.
    let new = Snapshot::new()
        .entity(
            EntityDef::new("author")
                .column(ColumnDef::new("id", "BIGINT").primary_key())
                .column(ColumnDef::new("name", "VARCHAR(100)").not_null())
                .column(ColumnDef::new("email", "VARCHAR(255)").not_null()),
        )
        .entity(
            EntityDef::new("post")
                .column(ColumnDef::new("id", "BIGINT").primary_key())
                .column(ColumnDef::new("author", "BIGINT").not_null())
                .column(ColumnDef::new("title", "VARCHAR(200)").not_null())
                .column(ColumnDef::new("content", "TEXT").not_null())
                .column(
                    ColumnDef::new("created_at", "TIMESTAMP")
                        .default_value("CURRENT_TIMESTAMP")
                        .not_null(),
                ),
        );

    let generated = generate(&old, &new, "blog")?;

    println!("-- forward statements --");
    for operation in &generated.up {
        println!("{}", operation.to_sql(&old, &new)?);
    }

    println!();
    println!("-- generated module --");
    println!("{}", generate_migration_code("0001_initial", &generated));

    Ok(())
}
