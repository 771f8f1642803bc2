//! In-memory integration tests for pending test runs.

use super::helpers::{TestService, register, service, stored_status};
use mcp_portal::tool_registry::{domain::ToolStatus, services::ToolTestOutcome};
use rstest::rstest;
use std::time::Duration;

#[rstest]
#[tokio::test(start_paused = true)]
async fn concurrent_runs_clear_their_own_markers(service: TestService) {
    let first = register(&service, "First", "First tool").await;
    let second = register(&service, "Second", "Second tool").await;

    let first_run = service
        .test_tool(first.id())
        .await
        .expect("test should be scheduled");
    let second_run = service
        .test_tool(second.id())
        .await
        .expect("test should be scheduled");
    assert!(service.is_pending(first.id()).expect("lookup succeeds"));
    assert!(service.is_pending(second.id()).expect("lookup succeeds"));

    assert!(first_run.outcome().await.is_completed());
    assert!(second_run.outcome().await.is_completed());

    assert!(!service.is_pending(first.id()).expect("lookup succeeds"));
    assert!(!service.is_pending(second.id()).expect("lookup succeeds"));
    assert_eq!(stored_status(&service, first.id()).await, ToolStatus::Tested);
    assert_eq!(stored_status(&service, second.id()).await, ToolStatus::Tested);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn first_marker_clears_while_second_run_is_in_flight(service: TestService) {
    let first = register(&service, "First", "First tool").await;
    let second = register(&service, "Second", "Second tool").await;

    let first_run = service
        .test_tool(first.id())
        .await
        .expect("test should be scheduled");
    tokio::time::advance(Duration::from_millis(300)).await;
    let second_run = service
        .test_tool(second.id())
        .await
        .expect("test should be scheduled");

    assert!(first_run.outcome().await.is_completed());
    assert!(!service.is_pending(first.id()).expect("lookup succeeds"));
    assert!(service.is_pending(second.id()).expect("lookup succeeds"));

    assert!(second_run.outcome().await.is_completed());
    assert!(service.pending_tool_ids().expect("listing succeeds").is_empty());
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn only_latest_run_for_a_tool_writes_status(service: TestService) {
    let tool = register(&service, "Echo", "Echoes input").await;

    let runs = [
        service.test_tool(tool.id()).await.expect("scheduled"),
        service.test_tool(tool.id()).await.expect("scheduled"),
        service.test_tool(tool.id()).await.expect("scheduled"),
    ];
    let mut outcomes = Vec::new();
    for run in runs {
        outcomes.push(run.outcome().await);
    }

    assert_eq!(
        outcomes.get(..2),
        Some([ToolTestOutcome::Superseded, ToolTestOutcome::Superseded].as_slice())
    );
    assert!(outcomes.last().is_some_and(ToolTestOutcome::is_completed));
    assert!(service.pending_tool_ids().expect("listing succeeds").is_empty());
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn dropping_the_handle_does_not_cancel_the_run(service: TestService) {
    let tool = register(&service, "Echo", "Echoes input").await;

    drop(
        service
            .test_tool(tool.id())
            .await
            .expect("test should be scheduled"),
    );
    tokio::time::sleep(service.config().test_delay() + Duration::from_millis(1)).await;

    assert_eq!(stored_status(&service, tool.id()).await, ToolStatus::Tested);
    assert!(!service.is_pending(tool.id()).expect("lookup succeeds"));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn cancelling_one_run_leaves_other_tools_pending(service: TestService) {
    let first = register(&service, "First", "First tool").await;
    let second = register(&service, "Second", "Second tool").await;
    let first_run = service
        .test_tool(first.id())
        .await
        .expect("test should be scheduled");
    let second_run = service
        .test_tool(second.id())
        .await
        .expect("test should be scheduled");

    assert!(service.cancel_test(first.id()).expect("cancel succeeds"));

    assert_eq!(first_run.outcome().await, ToolTestOutcome::Cancelled);
    assert_eq!(
        service.pending_tool_ids().expect("listing succeeds"),
        vec![second.id()]
    );
    assert!(second_run.outcome().await.is_completed());
    assert_eq!(stored_status(&service, first.id()).await, ToolStatus::Draft);
    assert_eq!(stored_status(&service, second.id()).await, ToolStatus::Tested);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn cancelled_tool_can_be_tested_again(service: TestService) {
    let tool = register(&service, "Echo", "Echoes input").await;
    let cancelled = service
        .test_tool(tool.id())
        .await
        .expect("test should be scheduled");
    assert!(service.cancel_test(tool.id()).expect("cancel succeeds"));
    assert_eq!(cancelled.outcome().await, ToolTestOutcome::Cancelled);

    let retried = service
        .test_tool(tool.id())
        .await
        .expect("test should be scheduled")
        .outcome()
        .await;

    assert!(retried.is_completed());
    assert_eq!(stored_status(&service, tool.id()).await, ToolStatus::Tested);
}
