use scholars_middleware::{
    api::{build_router, AppState},
    config::Config,
    defaults::seed_all,
    harvest::HarvestRegistry,
    search::SearchService,
    state::create_repositories,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            eprintln!("Using bundled configuration");
            Config::embedded()?
        }
    };

    // Initialize tracing
    let json_logs = config.observability.json_logs;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "scholars_middleware={},tower_http=info",
                    config.observability.log_level
                )
                .into()
            }),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!(
        service = %config.observability.service_name,
        "Starting scholars middleware v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Initialize storage backend
    tracing::info!("Storage backend: {:?}", config.state.backend);
    let repos = create_repositories(&config.state).await?;

    // Seed reference data; a malformed bundled resource aborts startup
    let report = seed_all(&config.defaults, &repos).await?;
    tracing::info!(
        themes = report.themes.created + report.themes.updated,
        directory_views = report.directory_views.created + report.directory_views.updated,
        discovery_views = report.discovery_views.created + report.discovery_views.updated,
        "Default data seeded"
    );

    // Initialize search index
    let search = Arc::new(SearchService::new(config.search.clone()).await?);
    let stats = search.get_stats().await?;
    tracing::info!(documents = stats.total_documents, "Search service initialized");

    let harvest = Arc::new(HarvestRegistry::from_config(&config.harvest)?);

    let app_state = AppState::new(search, repos, harvest, &config);
    let app = build_router(app_state);

    // Start HTTP server
    let http_addr = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_addr).await?;

    tracing::info!("HTTP API server listening on http://{}", http_addr);
    tracing::info!("   Health check: http://{}/health", http_addr);
    tracing::info!("   Discovery: http://{}/persons/search/faceted", http_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let http_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(http_listener, app).await {
            tracing::error!("HTTP server error: {}", e);
        }
    });

    tokio::select! {
        _ = http_handle => {
            tracing::warn!("HTTP server stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("Shutting down gracefully...");
    Ok(())
}
