//! Department command
//!
//! Usage: rowmap dept <create|list|get|find|update|delete> ...

use clap::{Args, Subcommand};
use rowmap_core::{Department, DepartmentId, ExError, ExErrorKind, Handle, NewDepartment};
use rowmap_store::{open_department_mapper, StoreConfig};

#[derive(Debug, Args)]
pub struct DeptArgs {
    #[command(subcommand)]
    pub command: DeptCommand,
}

#[derive(Debug, Subcommand)]
pub enum DeptCommand {
    /// Insert a new department
    Create {
        name: String,
        location: String,
    },
    /// List every department in storage order
    List {
        /// Print JSON instead of one line per department
        #[arg(long)]
        json: bool,
    },
    /// Show the department with the given id
    Get {
        id: i64,
        #[arg(long)]
        json: bool,
    },
    /// Show the first department with the given name
    Find {
        name: String,
        #[arg(long)]
        json: bool,
    },
    /// Change attributes of an existing department
    Update(UpdateArgs),
    /// Delete the department with the given id
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: i64,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub location: Option<String>,
}

/// Execute department command
pub fn execute(args: DeptArgs, config: &StoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut mapper = open_department_mapper(config)?;

    match args.command {
        DeptCommand::Create { name, location } => {
            let dept = mapper.create(NewDepartment::new(name, location))?;
            println!("✓ Created {}", dept);
        }
        DeptCommand::List { json } => {
            let all = mapper.list_all()?;
            if json {
                let values: Vec<Department> = all.iter().map(|d| d.borrow().clone()).collect();
                println!("{}", serde_json::to_string_pretty(&values)?);
            } else {
                for dept in &all {
                    println!("{}", dept);
                }
            }
        }
        DeptCommand::Get { id, json } => {
            let dept = mapper
                .find_by_id(DepartmentId::from(id))?
                .ok_or_else(|| missing_id("get", id))?;
            print_dept(&dept, json)?;
        }
        DeptCommand::Find { name, json } => {
            let dept = mapper.find_by_name(&name)?.ok_or_else(|| {
                ExError::new(ExErrorKind::NotFound)
                    .with_op("find")
                    .with_message(format!("No department with name '{}'", name))
            })?;
            print_dept(&dept, json)?;
        }
        DeptCommand::Update(update) => {
            if update.name.is_none() && update.location.is_none() {
                return Err(ExError::new(ExErrorKind::InvalidInput)
                    .with_op("update")
                    .with_message("Nothing to change: pass --name and/or --location")
                    .into());
            }
            let dept = mapper
                .find_by_id(DepartmentId::from(update.id))?
                .ok_or_else(|| missing_id("update", update.id))?;
            {
                let mut d = dept.borrow_mut();
                if let Some(name) = update.name {
                    d.name = name;
                }
                if let Some(location) = update.location {
                    d.location = location;
                }
            }
            mapper.update(&dept)?;
            println!("✓ Updated {}", dept);
        }
        DeptCommand::Delete { id } => {
            let dept = mapper
                .find_by_id(DepartmentId::from(id))?
                .ok_or_else(|| missing_id("delete", id))?;
            mapper.delete(&dept)?;
            println!("✓ Deleted {}", dept);
        }
    }

    Ok(())
}

fn missing_id(op: &str, id: i64) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op(op)
        .with_entity_id(id.to_string())
        .with_message(format!("No department with id {}", id))
}

fn print_dept(dept: &Handle<Department>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&*dept.borrow())?);
    } else {
        println!("{}", dept);
    }
    Ok(())
}
