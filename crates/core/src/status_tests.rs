// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn completed(result: BakeResult, logs: Option<&str>) -> BakeStatus {
    let mut builder = BakeStatus::builder().state(BakeState::Completed).result(result);
    if let Some(logs) = logs {
        builder = builder.logs_content(logs);
    }
    builder.build()
}

#[yare::parameterized(
    running   = { BakeStatus::builder().build(),            true },
    success   = { completed(BakeResult::Success, None),     true },
    failure   = { completed(BakeResult::Failure, Some("x")), false },
    cancelled = { completed(BakeResult::Cancelled, None),   false },
)]
fn reusable_only_when_running_or_successful(status: BakeStatus, expected: bool) {
    assert_eq!(status.is_reusable(), expected);
}

#[yare::parameterized(
    with_logs    = { completed(BakeResult::Failure, Some("exit 1")), true },
    blank_logs   = { completed(BakeResult::Failure, Some("  \n")),   false },
    no_logs      = { completed(BakeResult::Failure, None),           false },
    success_logs = { completed(BakeResult::Success, Some("ok")),     false },
    running_logs = { BakeStatus::builder().logs_content("partial").build(), false },
)]
fn concrete_failure_needs_failure_and_logs(status: BakeStatus, expected: bool) {
    assert_eq!(status.is_concrete_failure(), expected);
}

#[test]
fn cancelled_keeps_identity_and_logs() {
    let status = BakeStatus::running(JobId::from("job-1"), 10).with_logs("step 1");

    let cancelled = status.cancelled(20);

    assert_eq!(cancelled.id, status.id);
    assert!(cancelled.is_terminal());
    assert_eq!(cancelled.result, Some(BakeResult::Cancelled));
    assert_eq!(cancelled.logs_content.as_deref(), Some("step 1"));
    assert_eq!(cancelled.created_timestamp, 10);
    assert_eq!(cancelled.updated_timestamp, 20);
}

#[test]
fn completed_constructor_is_terminal() {
    let status = BakeStatus::completed(JobId::from("job-2"), BakeResult::Success, 5);
    assert!(status.is_terminal());
    assert!(!status.is_running());
    assert_eq!(status.result, Some(BakeResult::Success));
}

#[test]
fn serializes_with_upper_case_states() {
    let status = BakeStatus::completed(JobId::from("job-3"), BakeResult::Failure, 7);
    let json = serde_json::to_value(&status).unwrap();

    assert_eq!(json["state"], "COMPLETED");
    assert_eq!(json["result"], "FAILURE");
    assert!(json.get("logs_content").is_none());
}

#[test]
fn display_matches_wire_names() {
    assert_eq!(BakeState::Running.to_string(), "RUNNING");
    assert_eq!(BakeResult::Cancelled.to_string(), "CANCELLED");
}
