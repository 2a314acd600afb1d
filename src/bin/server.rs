//! personality-predictor HTTP server binary.
//!
//! Loads the vocabulary and the four axis models, then serves the form
//! front-end and the JSON API.
//!
//! # Environment Variables
//!
//! See [`personality_predictor::config`] for the full list. `RUST_LOG`
//! sets the tracing filter (default: "info,personality_predictor=debug").
//!
//! # Usage
//!
//! ```bash
//! MODEL_DIR=models VOCABULARY_PATH=newfrequency300.csv cargo run --bin server
//! ```

use std::sync::Arc;

use anyhow::Context;
use personality_predictor::cache::PostCache;
use personality_predictor::config::{AppConfig, PostSourceConfig};
use personality_predictor::posts::{HttpPostSource, PostSource, StaticPostSource};
use personality_predictor::server::{app_router, AppState};
use personality_predictor::{ClassifierSet, PersonalityPredictor, PersonalityService, Vocabulary};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,personality_predictor=debug,tower_http=debug".into()),
        )
        .init();

    let config = AppConfig::from_env().context("Invalid configuration")?;

    let vocabulary = Vocabulary::load(&config.vocabulary_path).with_context(|| {
        format!("Failed to load vocabulary from {}", config.vocabulary_path.display())
    })?;
    tracing::info!(
        "Vocabulary: {} terms from {}",
        vocabulary.len(),
        config.vocabulary_path.display()
    );

    let classifiers = ClassifierSet::load_dir(&config.model_dir, vocabulary.width())
        .with_context(|| {
            format!("Failed to load axis models from {}", config.model_dir.display())
        })?;
    tracing::info!("Axis models loaded from {}", config.model_dir.display());

    let source: Arc<dyn PostSource> = match &config.post_source {
        PostSourceConfig::Http { base_url, timeout } => {
            tracing::info!("Post source: {} (timeout {:?})", base_url, timeout);
            Arc::new(HttpPostSource::new(base_url.clone(), *timeout))
        }
        PostSourceConfig::File { path } => {
            tracing::info!("Post source: file {}", path.display());
            Arc::new(
                StaticPostSource::from_json_file(path)
                    .with_context(|| format!("Failed to load posts from {}", path.display()))?,
            )
        }
    };

    let predictor = PersonalityPredictor::new(Arc::new(vocabulary), classifiers);
    let service = PersonalityService::new(
        Arc::new(predictor),
        source,
        PostCache::new(config.cache_ttl),
    )
    .with_max_posts(config.max_posts);

    let state = AppState::new(service).context("Failed to compile templates")?;
    let app = app_router(state);

    let bind_addr = config.bind_addr();
    tracing::info!("personality-predictor server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health      — liveness probe");
    tracing::info!("  GET  /            — username form");
    tracing::info!("  POST /            — form prediction");
    tracing::info!("  POST /api/predict — JSON prediction");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
