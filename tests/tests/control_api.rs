//! HTTP control surface tests against the full router.

use integration_tests::fixtures;
use integration_tests::setup::TestContext;

use api::response::{ControlResponse, HealthResponse, MessageResponse, StatusResponse};
use newswire_core::PipelineStatus;

#[tokio::test]
async fn test_start_is_idempotent_over_http() {
    let ctx = TestContext::new();

    let first: ControlResponse = ctx.server.post("/start").await.json();
    assert_eq!(first.status, "News feed started");

    let second: ControlResponse = ctx.server.post("/start").await.json();
    assert_eq!(second.status, "News feed is already running");

    ctx.controller.pause().await;
}

#[tokio::test]
async fn test_pause_lifecycle_messages() {
    let ctx = TestContext::new();

    let premature: ControlResponse = ctx.server.post("/pause").await.json();
    assert_eq!(premature.status, "not running");

    ctx.server.post("/start").await;
    let paused: ControlResponse = ctx.server.post("/pause").await.json();
    assert_eq!(paused.status, "paused");
    assert_eq!(ctx.controller.task_count().await, 0);
}

#[tokio::test]
async fn test_start_accepts_topic_and_agents_params() {
    let ctx = TestContext::new();

    let response: ControlResponse = ctx
        .server
        .post("/start")
        .add_query_param("topic", "Energy")
        .add_query_param("agents", "3")
        .await
        .json();
    assert_eq!(response.status, "News feed started");
    assert_eq!(ctx.controller.task_count().await, 4); // producer + 3 workers

    ctx.controller.pause().await;
}

#[tokio::test]
async fn test_power_mode_uses_configured_agent_count() {
    let ctx = TestContext::new();

    ctx.server
        .post("/start")
        .add_query_param("power_mode", "true")
        .await;
    let expected = ctx.controller.config().power_agents + 1;
    assert_eq!(ctx.controller.task_count().await, expected);

    ctx.controller.pause().await;
}

#[tokio::test]
async fn test_status_tracks_lifecycle_and_processed_count() {
    let ctx = TestContext::new();
    ctx.feed.set_articles(fixtures::articles("s", 2));

    let stopped: StatusResponse = ctx.server.get("/status").await.json();
    assert_eq!(stopped.status, PipelineStatus::Stopped);
    assert_eq!(stopped.processed, 0);

    ctx.server.post("/start").await;
    assert!(ctx.wait_until(|c| c.controller.results().len() == 2).await);

    let running: StatusResponse = ctx.server.get("/status").await.json();
    assert_eq!(running.status, PipelineStatus::Running);
    assert_eq!(running.processed, 2);

    ctx.controller.pause().await;
}

#[tokio::test]
async fn test_clear_empties_the_result_log() {
    let ctx = TestContext::new();
    ctx.feed.set_articles(fixtures::articles("c", 1));

    ctx.server.post("/start").await;
    assert!(ctx.wait_until(|c| !c.controller.results().is_empty()).await);
    ctx.controller.pause().await;

    let response: MessageResponse = ctx.server.post("/clear").await.json();
    assert_eq!(response.message, "Analyzed articles cleared successfully.");
    assert!(ctx.controller.results().is_empty());
}

#[tokio::test]
async fn test_export_with_no_data_returns_message() {
    let ctx = TestContext::new();

    let response: MessageResponse = ctx.server.get("/export/csv").await.json();
    assert_eq!(response.message, "No data to export.");
}

#[tokio::test]
async fn test_export_returns_csv_attachment() {
    let ctx = TestContext::new();
    ctx.feed.set_articles(fixtures::articles("e", 2));

    ctx.server.post("/start").await;
    assert!(ctx.wait_until(|c| c.controller.results().len() == 2).await);
    ctx.controller.pause().await;

    let response = ctx.server.get("/export/csv").await;
    response.assert_status_ok();

    let content_type = response.header("content-type");
    assert!(content_type.to_str().unwrap().starts_with("text/csv"));
    let disposition = response.header("content-disposition");
    assert!(disposition
        .to_str()
        .unwrap()
        .contains("attachment; filename=news_analysis_"));

    let body = response.text();
    let mut lines = body.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("task_id,title,link"));
    assert_eq!(lines.count(), 2);
    assert!(body.contains("https://news.example.com/e-0"));
}

#[tokio::test]
async fn test_health_reports_pipeline_state() {
    let ctx = TestContext::new();

    let health: HealthResponse = ctx.server.get("/health").await.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.pipeline, PipelineStatus::Stopped);
    assert_eq!(health.subscribers, 0);
}
