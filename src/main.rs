//! Newswire: real-time news analysis engine.
//!
//! Fetches topic-filtered news on a fixed cadence, enriches each article
//! through an LLM analysis step, and streams the results to WebSocket
//! subscribers, with an HTTP control surface for start/pause/export.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::info;

use analysis::{AnalysisConfig, LlmAnalyzer};
use api::{router, AppState};
use feed::{FeedConfig, GoogleNewsFeed};
use pipeline::{PipelineConfig, PipelineController};
use telemetry::init_tracing_from_env;

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    #[serde(default)]
    feed: FeedConfig,

    #[serde(default)]
    analysis: AnalysisConfig,

    #[serde(default)]
    pipeline: PipelineConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            feed: FeedConfig::default(),
            analysis: AnalysisConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing_from_env();

    info!("Starting newswire engine v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = load_config()?;

    info!(
        topic = %config.pipeline.default_topic,
        fetch_interval_secs = config.feed.fetch_interval_secs,
        model = %config.analysis.model,
        "Loaded configuration"
    );

    // Collaborators
    let feed = Arc::new(
        GoogleNewsFeed::new(config.feed.clone()).context("Failed to create news feed client")?,
    );
    let analyzer = Arc::new(
        LlmAnalyzer::new(config.analysis.clone()).context("Failed to create analysis client")?,
    );

    // Pipeline controller owns all background task lifecycle
    let controller = Arc::new(PipelineController::new(
        config.pipeline.clone(),
        Duration::from_secs(config.feed.fetch_interval_secs),
        feed,
        analyzer,
    ));

    // Create router
    let state = AppState::new(controller.clone());
    let app = router(state);

    // Start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Stop any running generation before exit
    info!("Shutting down...");
    controller.pause().await;

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("NEWSWIRE")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Manual overrides for nested fields; the config crate's nested parsing
    // doesn't work reliably with underscored field names
    if let Ok(api_key) = std::env::var("NEWSWIRE_ANALYSIS_API_KEY") {
        config.analysis.api_key = api_key;
    }
    if config.analysis.api_key.is_empty() {
        if let Ok(api_key) = std::env::var("CEREBRAS_API_KEY") {
            config.analysis.api_key = api_key;
        }
    }
    if let Ok(base_url) = std::env::var("NEWSWIRE_ANALYSIS_BASE_URL") {
        config.analysis.base_url = base_url;
    }
    if let Ok(model) = std::env::var("NEWSWIRE_ANALYSIS_MODEL") {
        config.analysis.model = model;
    }
    if let Ok(topic) = std::env::var("NEWSWIRE_PIPELINE_DEFAULT_TOPIC") {
        config.pipeline.default_topic = topic;
    }
    if let Ok(interval) = std::env::var("NEWSWIRE_FEED_FETCH_INTERVAL_SECS") {
        if let Ok(interval) = interval.parse() {
            config.feed.fetch_interval_secs = interval;
        }
    }

    Ok(config)
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
