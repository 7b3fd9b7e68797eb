//! End-to-end pipeline behavior: ingestion, de-duplication, fallback, and
//! subscriber fan-out, driven through the real controller with mock
//! collaborators.

use std::time::Duration;

use integration_tests::fixtures;
use integration_tests::setup::TestContext;

use newswire_core::{PipelineStatus, StreamMessage};
use pipeline::PipelineConfig;

#[tokio::test]
async fn test_repeated_feed_batches_are_analyzed_once() {
    let ctx = TestContext::new();
    // The same two articles come back on every fetch cycle.
    ctx.feed.set_articles(fixtures::articles("dup", 2));

    ctx.controller.start("Technology", 2).await;
    assert!(ctx.wait_until(|c| c.feed.fetch_count() >= 3).await);
    ctx.controller.pause().await;

    assert_eq!(ctx.controller.results().len(), 2);
    assert_eq!(ctx.analyzer.call_count(), 2);
}

#[tokio::test]
async fn test_new_articles_are_picked_up_across_cycles() {
    let ctx = TestContext::new();
    ctx.feed.set_articles(fixtures::articles("first", 1));

    ctx.controller.start("Technology", 1).await;
    assert!(ctx.wait_until(|c| c.controller.results().len() == 1).await);

    ctx.feed.set_articles(fixtures::articles("second", 2));
    assert!(ctx.wait_until(|c| c.controller.results().len() == 3).await);
    ctx.controller.pause().await;

    let links: Vec<String> = ctx
        .controller
        .results()
        .snapshot()
        .iter()
        .map(|r| r.link.clone())
        .collect();
    assert!(links.contains(&"https://news.example.com/first-0".to_string()));
    assert!(links.contains(&"https://news.example.com/second-1".to_string()));
}

#[tokio::test]
async fn test_failed_analysis_falls_back_and_run_continues() {
    let ctx = TestContext::new();
    let mut doomed = fixtures::article("doomed");
    doomed.summary = "this one is doomed".to_string();
    ctx.feed
        .set_articles(vec![fixtures::article("fine"), doomed]);
    ctx.analyzer.fail_on("doomed");

    ctx.controller.start("Technology", 1).await;
    assert!(ctx.wait_until(|c| c.controller.results().len() == 2).await);

    // A failed enrichment never stops the run.
    assert_eq!(ctx.controller.status(), PipelineStatus::Running);

    let records = ctx.controller.results().snapshot();
    let doomed_record = records
        .iter()
        .find(|r| r.link.ends_with("/doomed"))
        .unwrap();
    assert!(doomed_record.analysis.is_fallback());
    assert!(doomed_record
        .analysis
        .summary_explanation
        .contains("Could not perform analysis"));
    assert!(doomed_record.tokens_per_second.is_none());

    let fine_record = records.iter().find(|r| r.link.ends_with("/fine")).unwrap();
    assert!(!fine_record.analysis.is_fallback());
    assert_eq!(fine_record.tokens_per_second, Some(2000.0));

    ctx.controller.pause().await;
}

#[tokio::test]
async fn test_subscribers_see_status_then_records_in_log_order() {
    let ctx = TestContext::new();
    ctx.feed.set_articles(fixtures::articles("ord", 3));

    let (id, mut rx) = ctx
        .controller
        .broadcaster()
        .subscribe(ctx.controller.status());

    // Single worker so broadcast order matches log order deterministically.
    ctx.controller.start("Technology", 1).await;
    assert!(ctx.wait_until(|c| c.controller.results().len() == 3).await);
    ctx.controller.pause().await;

    let mut messages = Vec::new();
    while let Ok(Some(msg)) = tokio::time::timeout(Duration::from_millis(20), rx.recv()).await {
        messages.push(msg);
    }

    // Initial status snapshot, run start, three records, pause.
    assert!(matches!(
        messages[0],
        StreamMessage::Status { status: PipelineStatus::Stopped }
    ));
    assert!(matches!(
        messages[1],
        StreamMessage::Status { status: PipelineStatus::Running }
    ));
    let broadcast_ids: Vec<String> = messages[2..5]
        .iter()
        .map(|msg| match msg {
            StreamMessage::Record(record) => record.task_id.clone(),
            other => panic!("expected record, got {other:?}"),
        })
        .collect();
    let log_ids: Vec<String> = ctx
        .controller
        .results()
        .snapshot()
        .iter()
        .map(|r| r.task_id.clone())
        .collect();
    assert_eq!(broadcast_ids, log_ids);
    assert!(matches!(
        messages[5],
        StreamMessage::Status { status: PipelineStatus::Stopped }
    ));

    ctx.controller.broadcaster().unsubscribe(id);
}

#[tokio::test]
async fn test_disconnected_subscriber_does_not_block_the_rest() {
    let ctx = TestContext::new();
    ctx.feed.set_articles(fixtures::articles("iso", 1));

    let (_, dead_rx) = ctx
        .controller
        .broadcaster()
        .subscribe(ctx.controller.status());
    let (_, mut live_rx) = ctx
        .controller
        .broadcaster()
        .subscribe(ctx.controller.status());
    drop(dead_rx);

    ctx.controller.start("Technology", 1).await;
    assert!(ctx.wait_until(|c| c.controller.results().len() == 1).await);
    ctx.controller.pause().await;

    assert_eq!(ctx.controller.broadcaster().subscriber_count(), 1);

    let mut saw_record = false;
    while let Ok(Some(msg)) =
        tokio::time::timeout(Duration::from_millis(20), live_rx.recv()).await
    {
        if matches!(msg, StreamMessage::Record(_)) {
            saw_record = true;
        }
    }
    assert!(saw_record);
}

#[tokio::test]
async fn test_pause_discards_in_flight_analysis() {
    let ctx = TestContext::with_config(PipelineConfig {
        quiesce_timeout_secs: 2,
        ..PipelineConfig::default()
    });
    ctx.feed.set_articles(fixtures::articles("slow", 1));
    ctx.analyzer.set_delay(Duration::from_millis(300));

    ctx.controller.start("Technology", 1).await;
    assert!(ctx.wait_until(|c| c.analyzer.call_count() >= 1).await);
    ctx.controller.pause().await;

    // The analysis was in flight when the stop signal arrived; its result
    // never reaches the log.
    assert!(ctx.controller.results().is_empty());
    assert_eq!(ctx.controller.task_count().await, 0);
}

#[tokio::test]
async fn test_restart_clears_previous_run_state() {
    let ctx = TestContext::new();
    ctx.feed.set_articles(fixtures::articles("run1", 2));

    ctx.controller.start("Technology", 1).await;
    assert!(ctx.wait_until(|c| c.controller.results().len() == 2).await);
    ctx.controller.pause().await;

    // A new run starts from an empty log and an empty de-duplication set,
    // so the same articles are analyzed again.
    ctx.controller.start("Technology", 1).await;
    assert!(ctx.wait_until(|c| c.controller.results().len() == 2).await);
    ctx.controller.pause().await;

    assert_eq!(ctx.analyzer.call_count(), 4);
}

#[tokio::test]
async fn test_feed_failure_is_nonfatal() {
    let ctx = TestContext::new();
    ctx.feed.set_should_fail(true);

    ctx.controller.start("Technology", 1).await;
    assert!(ctx.wait_until(|c| c.feed.fetch_count() >= 2).await);
    assert_eq!(ctx.controller.status(), PipelineStatus::Running);

    // Recovery: the next successful fetch flows through normally.
    ctx.feed.set_should_fail(false);
    ctx.feed.set_articles(fixtures::articles("rec", 1));
    assert!(ctx.wait_until(|c| c.controller.results().len() == 1).await);

    ctx.controller.pause().await;
}
