//! strata-migrate CLI
//!
//! Command-line tool for generating migrations and managing the ledger.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use strata_migrate::codegen::generate_migration_code;
use strata_migrate::generator::generate;
use strata_migrate::ledger::MigrationLedger;
use strata_migrate::schema::Snapshot;
use strata_sql_postgres::{Database, DatabaseConfig};

/// Schema-diff driven migrations for PostgreSQL.
#[derive(Parser)]
#[command(name = "strata-migrate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database connection URL.
    #[arg(
        short,
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost/strata"
    )]
    database: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a migration module from two snapshot files.
    Generate {
        /// Path to the old (last migrated) snapshot JSON.
        #[arg(long)]
        old_schema: PathBuf,

        /// Path to the new (current declarative) snapshot JSON.
        #[arg(long)]
        new_schema: PathBuf,

        /// Mapping name physical names derive from.
        #[arg(short, long)]
        mapping: String,

        /// Migration identifier (e.g. "0002_add_post").
        #[arg(short, long)]
        name: String,

        /// Print the operation summary without emitting code.
        #[arg(long)]
        dry_run: bool,
    },

    /// Initialize the migration ledger.
    Init,

    /// Show ledger status.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Generate {
            old_schema,
            new_schema,
            mapping,
            name,
            dry_run,
        } => {
            let old: Snapshot = serde_json::from_str(&std::fs::read_to_string(&old_schema)?)?;
            let new: Snapshot = serde_json::from_str(&std::fs::read_to_string(&new_schema)?)?;
            let generated = generate(&old, &new, &mapping)?;

            if generated.is_empty() {
                info!("no schema changes detected");
            }
            for (key, kind) in &generated.skipped {
                info!(entity = %key, ?kind, "entity skipped, no operation emitted");
            }

            if dry_run {
                info!(
                    up = generated.up.len(),
                    down = generated.down.len(),
                    "dry run, no code emitted"
                );
            } else {
                println!("{}", generate_migration_code(&name, &generated));
            }
        }

        Commands::Init => {
            let db = Database::connect(&DatabaseConfig::new(&cli.database)).await?;
            info!("setting up migration ledger...");
            MigrationLedger::new(db).setup().await;
            info!("ledger setup finished");
        }

        Commands::Status => {
            let db = Database::connect(&DatabaseConfig::new(&cli.database)).await?;
            let ledger = MigrationLedger::new(db);
            let count = ledger.count().await?;
            info!(rows = count, "ledger rows");
            match ledger.last().await? {
                Some(row) => match row.migration {
                    Some(name) => info!(date = %row.date, migration = %name, "last applied"),
                    None => info!(date = %row.date, "only the sentinel row is present"),
                },
                None => info!("ledger is empty; run `strata-migrate init`"),
            }
        }
    }

    Ok(())
}
