/// osm: inspect how result columns map onto record field names
///
/// Commands:
/// - names: print the plain and initialism candidates for identifiers ("-" when
///   the initialism form is the same as the plain one)
/// - columns: list a query's result columns with their candidates
/// - dump: run a query and print each row as a JSON array of raw values
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use osm::config::OrmConfig;
use osm::database::Database;
use osm::logging::init_logging;
use osm::naming::{to_candidate_names, CandidateNames};
use osm::utils::time_format::{time_format, FORMAT_DATETIME};

#[derive(Parser)]
#[command(name = "osm")]
#[command(about = "Column name resolution and typed row scanning for SQLite", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML config file (defaults are used when missing)
    #[arg(short, long, global = true, default_value = "osm.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print candidate field names for snake_case identifiers
    Names {
        /// Identifiers to convert
        #[arg(required = true)]
        identifiers: Vec<String>,
    },

    /// List the result columns of a query with their candidate field names
    Columns {
        /// SQLite database path
        #[arg(short = 'b', long)]
        db: PathBuf,

        /// SELECT statement
        #[arg(short, long)]
        sql: String,
    },

    /// Print every row of a query as a JSON array
    Dump {
        /// SQLite database path
        #[arg(short = 'b', long)]
        db: PathBuf,

        /// SELECT statement
        #[arg(short, long)]
        sql: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = OrmConfig::load(&cli.config)?;
    let _guard = init_logging(&config.logging)?;
    debug!("Loaded config: {:?}", config);

    match cli.command {
        Commands::Names { identifiers } => print_names(&identifiers),
        Commands::Columns { db, sql } => print_columns(&db, &sql, &config),
        Commands::Dump { db, sql } => dump_rows(&db, &sql, &config),
    }
}

fn print_names(identifiers: &[String]) -> Result<()> {
    for identifier in identifiers {
        println!("{}\t{}", identifier, format_candidates(&to_candidate_names(identifier)));
    }
    Ok(())
}

/// Plain and initialism forms, tab separated; "-" when no initialism applies
fn format_candidates(names: &CandidateNames) -> String {
    if names.is_same() {
        format!("{}\t-", names.plain)
    } else {
        format!("{}\t{}", names.plain, names.initialism)
    }
}

fn print_columns(db_path: &Path, sql: &str, config: &OrmConfig) -> Result<()> {
    let db = Database::open(db_path, config)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    let columns = db.columns(sql).context("Failed to prepare query")?;

    for column in &columns {
        println!("{}\t{}", column, format_candidates(&to_candidate_names(column)));
    }
    Ok(())
}

fn dump_rows(db_path: &Path, sql: &str, config: &OrmConfig) -> Result<()> {
    let db = Database::open(db_path, config)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    let (columns, rows) = db.query_raw(sql, []).context("Query failed")?;

    println!("{}", serde_json::to_string(&columns)?);
    for row in &rows {
        println!("{}", serde_json::to_string(row)?);
    }
    info!(
        "Dumped {} row(s) at {}",
        rows.len(),
        time_format(&chrono::Utc::now().naive_utc(), FORMAT_DATETIME)
    );
    Ok(())
}
