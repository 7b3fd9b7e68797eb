//! Test environment wiring the real controller and router against mocks.

use std::sync::Arc;
use std::time::Duration;

use api::{router, AppState};
use axum_test::TestServer;
use pipeline::{PipelineConfig, PipelineController};

use crate::mocks::{MockAnalyzer, MockFeed};

/// Fetch cadence used by every test context; fast enough that a test sees
/// several cycles without waiting on wall-clock minutes.
pub const TEST_FETCH_INTERVAL: Duration = Duration::from_millis(20);

/// Full application wiring with the network collaborators replaced by mocks.
pub struct TestContext {
    pub feed: Arc<MockFeed>,
    pub analyzer: Arc<MockAnalyzer>,
    pub controller: Arc<PipelineController>,
    pub server: TestServer,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(PipelineConfig {
            quiesce_timeout_secs: 1,
            ..PipelineConfig::default()
        })
    }

    pub fn with_config(config: PipelineConfig) -> Self {
        let feed = Arc::new(MockFeed::new());
        let analyzer = Arc::new(MockAnalyzer::new());
        let controller = Arc::new(PipelineController::new(
            config,
            TEST_FETCH_INTERVAL,
            feed.clone(),
            analyzer.clone(),
        ));
        let server = TestServer::new(router(AppState::new(controller.clone())))
            .expect("failed to start test server");

        Self {
            feed,
            analyzer,
            controller,
            server,
        }
    }

    /// Polls until `predicate` holds or two seconds elapse.
    pub async fn wait_until(&self, predicate: impl Fn(&Self) -> bool) -> bool {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        while tokio::time::Instant::now() < deadline {
            if predicate(self) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        predicate(self)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
