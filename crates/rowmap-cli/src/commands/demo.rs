//! Demo command
//!
//! Usage: rowmap demo
//!
//! Walks through create, lookup, identity, reload and delete on a fresh
//! departments table, printing each step.

use rowmap_core::NewDepartment;
use rowmap_store::{open_department_mapper, StoreConfig};

/// Execute demo command
pub fn execute(config: &StoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut mapper = open_department_mapper(config)?;
    mapper.drop_table()?;
    mapper.create_table()?;
    println!("Fresh departments table");

    let payroll = mapper.create(NewDepartment::new("Payroll", "Building A"))?;
    let hr = mapper.create(NewDepartment::new("HR", "Building C"))?;
    println!("Created {}", payroll);
    println!("Created {}", hr);

    let found = mapper
        .find_by_name("Payroll")?
        .ok_or("Payroll missing after create")?;
    println!(
        "find_by_name(\"Payroll\") -> {} (same instance: {})",
        found,
        found.ptr_eq(&payroll)
    );

    found.borrow_mut().location = "Building Z".to_string();
    println!("Edited in memory without saving -> {}", found);
    let id = found.id().ok_or("Payroll lost its id before reload")?;
    let reloaded = mapper
        .find_by_id(id)?
        .ok_or("Payroll missing on reload")?;
    println!(
        "Reloaded from storage -> {} (same instance: {})",
        reloaded,
        reloaded.ptr_eq(&payroll)
    );

    mapper.delete(&payroll)?;
    println!("Deleted -> {}", payroll);

    match mapper.find_by_name("Payroll")? {
        Some(dept) => println!("find_by_name(\"Payroll\") -> {}", dept),
        None => println!("find_by_name(\"Payroll\") -> none"),
    }
    match mapper.find_by_name("HR")? {
        Some(dept) => println!("find_by_name(\"HR\") -> {}", dept),
        None => println!("find_by_name(\"HR\") -> none"),
    }

    Ok(())
}
