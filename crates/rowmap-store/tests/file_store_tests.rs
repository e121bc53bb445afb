// On-disk store: config loading, directory creation, durability across
// reopen.

use rowmap_core::NewDepartment;
use rowmap_store::{open_department_mapper, JournalMode, StoreConfig};

#[test]
fn test_rows_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::at_path(dir.path().join("nested").join("store.db"));

    {
        let mut mapper = open_department_mapper(&config).unwrap();
        mapper
            .create(NewDepartment::new("Payroll", "Building A"))
            .unwrap();
    }

    // Fresh process-equivalent: new connection, empty identity map
    let mut mapper = open_department_mapper(&config).unwrap();
    assert!(mapper.identity_map().is_empty());
    let payroll = mapper.find_by_name("Payroll").unwrap().unwrap();
    assert_eq!(payroll.borrow().location, "Building A");
}

#[test]
fn test_load_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("store.db");
    let config_path = dir.path().join("rowmap.toml");
    std::fs::write(
        &config_path,
        format!(
            "path = {:?}\njournal_mode = \"delete\"\n",
            db_path.to_string_lossy()
        ),
    )
    .unwrap();

    let config = StoreConfig::load(&config_path).unwrap();
    assert_eq!(config.journal_mode, JournalMode::Delete);
    assert_eq!(config.path.as_deref(), Some(db_path.as_path()));

    let mapper = open_department_mapper(&config).unwrap();
    let mode: String = mapper
        .executor()
        .connection()
        .query_row("PRAGMA journal_mode", [], |row| row.get(0))
        .unwrap();
    assert_eq!(mode.to_lowercase(), "delete");
    assert!(db_path.exists());
}
