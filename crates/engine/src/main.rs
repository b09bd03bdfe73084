//! Jotun's Lair Wiki Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jotunwiki_engine::api;
use jotunwiki_engine::infrastructure::{
    clock::SystemClock, config::AppConfig, ports::ClockPort, sqlite::SqliteRepositories,
};
use jotunwiki_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jotunwiki_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Jotun's Lair Wiki Engine");

    let config = AppConfig::from_env()?;

    let repos = SqliteRepositories::connect(&config.db_path)
        .await
        .with_context(|| format!("opening document store at {}", config.db_path.display()))?;

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
    let app = Arc::new(App::new(repos, clock));

    if let Some(seed_path) = &config.seed_path {
        let outcome = app
            .use_cases
            .seed
            .import_file(seed_path)
            .await
            .with_context(|| format!("importing seed file {}", seed_path.display()))?;
        tracing::info!(path = %seed_path.display(), ?outcome, "Seed step finished");
    }

    if config.reconcile_on_startup {
        // A failed sweep leaves stale snapshots in place but the wiki still serves.
        match app.use_cases.reconcile.execute().await {
            Ok(report) if !report.failed.is_empty() => tracing::warn!(
                failed = ?report.failed,
                "Snapshot reconciliation left rooms unscrubbed"
            ),
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "Snapshot reconciliation failed"),
        }
    }

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(&config.cors_allowed_origins) {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port)
        .parse()
        .context("SERVER_HOST and SERVER_PORT must form a socket address")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer(allowed_origins: &[String]) -> Option<CorsLayer> {
    if allowed_origins.is_empty() {
        return None;
    }

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins.iter().any(|o| o == "*") {
        return Some(cors.allow_origin(Any));
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(cors.allow_origin(origins))
}
