//! Table command
//!
//! Usage: rowmap table <create|drop>

use clap::{Args, Subcommand};
use rowmap_core::DepartmentMapper;
use rowmap_store::{SqliteExecutor, StoreConfig};

#[derive(Debug, Args)]
pub struct TableArgs {
    #[command(subcommand)]
    pub command: TableCommand,
}

#[derive(Debug, Subcommand)]
pub enum TableCommand {
    /// Create the departments table if absent
    Create,
    /// Drop the departments table if present
    Drop,
}

/// Execute table command
pub fn execute(args: TableArgs, config: &StoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut mapper = DepartmentMapper::new(SqliteExecutor::open(config)?);

    match args.command {
        TableCommand::Create => {
            mapper.create_table()?;
            println!("✓ Table ready");
        }
        TableCommand::Drop => {
            mapper.drop_table()?;
            println!("✓ Table dropped");
        }
    }

    Ok(())
}
