#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{dept_row, ScriptedExecutor};
use rowmap_core::errors::{ExError, ExErrorKind, RowMapError};
use rowmap_core::logging_facility::test_capture::init_test_capture;
use rowmap_core::types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use rowmap_core::{log_op_end, log_op_error, log_op_start};
use rowmap_core::{DepartmentMapper, NewDepartment};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = RowMapError::NotPersisted {
        entity: "Department",
        op: "delete",
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(events[0].field("err_code"), Some("ERR_NOT_PERSISTED"));
    assert_eq!(events[0].level, tracing::Level::ERROR);
}

#[test]
fn test_create_emits_start_and_end() {
    let capture = init_test_capture();
    let exec = ScriptedExecutor::new();
    let mut m = DepartmentMapper::new(&exec);

    m.create(NewDepartment::new("Logged Dept", "Building L")).unwrap();

    capture.assert_event_exists("create", EVENT_START);
    capture.assert_event_exists("create", EVENT_END);
}

#[test]
fn test_failed_lookup_emits_end_error() {
    let capture = init_test_capture();
    let exec = ScriptedExecutor::new();
    let mut m = DepartmentMapper::new(&exec);
    exec.queue_error(
        ExError::new(ExErrorKind::Persistence).with_message("unique_failure_marker_4"),
    );

    assert!(m.find_by_name("unique_failure_name_4").is_err());

    let matched = capture.count_events(|e| {
        e.op.as_deref() == Some("find_by_name")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field("err_code") == Some("ERR_PERSISTENCE")
    });
    assert!(matched >= 1);
}

#[test]
fn test_list_all_end_reports_row_count() {
    let capture = init_test_capture();
    let exec = ScriptedExecutor::new();
    let mut m = DepartmentMapper::new(&exec);
    exec.queue_rows(vec![
        dept_row(901, "Count A", "X"),
        dept_row(902, "Count B", "Y"),
        dept_row(903, "Count C", "Z"),
        dept_row(904, "Count D", "W"),
        dept_row(905, "Count E", "V"),
    ]);

    m.list_all().unwrap();

    let matched = capture.count_events(|e| {
        e.op.as_deref() == Some("list_all")
            && e.event.as_deref() == Some(EVENT_END)
            && e.field("row_count") == Some("5")
    });
    assert!(matched >= 1);
}
