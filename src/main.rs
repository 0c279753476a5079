use oceanlens::config::Config;
use oceanlens::services::ocean_service::OceanDataService;
use oceanlens::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oceanlens=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting OceanLens API server");
    tracing::info!("Analysis region: {}", config.region);

    // Load occurrence data and set up the grid cache
    let ocean = OceanDataService::from_config(&config);
    if ocean.store().is_empty() {
        tracing::warn!(
            "No occurrence records loaded from {}; data endpoints will return 404",
            config.biodiversity_csv.display()
        );
    } else {
        tracing::info!("{} occurrence records ready", ocean.store().len());
    }

    // Warm the grid cache so the first request does not pay for generation
    match ocean.layers().await {
        Ok(layers) => tracing::info!("Generated {} ocean layers", layers.len()),
        Err(e) => tracing::warn!("Failed to pre-generate ocean layers: {}", e),
    }

    // Create application state
    let state = Arc::new(AppState { ocean });

    // Build router with CORS and tracing
    let app = oceanlens::routes::create_router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
