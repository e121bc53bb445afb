//! rowmap CLI
//!
//! Debug harness for the department mapper over a SQLite file

use clap::{Args, Parser, Subcommand};
use rowmap_core::logging_facility::{self, Profile};
use rowmap_core::{ExError, ExErrorKind};
use rowmap_store::StoreConfig;
use std::path::PathBuf;

mod commands;

const DEFAULT_DB_PATH: &str = ".rowmap/store.db";

#[derive(Debug, Parser)]
#[command(name = "rowmap")]
#[command(about = "rowmap - identity-mapped department records", long_about = None)]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,

    /// Log profile: dev (human-readable) or json; logs go to stderr
    #[arg(long, global = true)]
    log: Option<Profile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct StoreArgs {
    /// Database file (default: .rowmap/store.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// TOML store config; --db overrides its path
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

impl StoreArgs {
    fn resolve(&self) -> Result<StoreConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => StoreConfig::load(path).map_err(|e| {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("resolve_store")
                    .with_message(format!("Unusable --config {}", path.display()))
                    .with_source(e)
            })?,
            None => StoreConfig::default(),
        };
        if let Some(db) = &self.db {
            config.path = Some(db.clone());
        }
        if config.path.is_none() {
            config.path = Some(PathBuf::from(DEFAULT_DB_PATH));
        }
        Ok(config)
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Table operations (create / drop)
    Table(commands::table::TableArgs),
    /// Department record operations
    Dept(commands::department::DeptArgs),
    /// Run the Payroll/HR walkthrough against the database
    Demo,
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(profile) = cli.log {
        logging_facility::init(profile);
    }
    let config = cli.store.resolve()?;

    match cli.command {
        Commands::Table(args) => commands::table::execute(args, &config),
        Commands::Dept(args) => commands::department::execute(args, &config),
        Commands::Demo => commands::demo::execute(&config),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
