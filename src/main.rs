//! Breach Cost Prediction API server

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use breach_cost_api::{
    create_router,
    model::ArtifactError,
    AppState, BreachCostPredictor, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging
    let default_filter = if config.is_production() {
        "breach_cost_api=info,tower_http=info"
    } else {
        "breach_cost_api=debug,tower_http=debug"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Breach Cost Prediction API starting...");
    tracing::info!("Environment: {}", config.environment);

    // The artifact must exist before anything is served
    if !config.model_path.exists() {
        return Err(ArtifactError::NotFound(config.model_path.clone()).into());
    }

    let predictor = BreachCostPredictor::load_model(&config.model_path)
        .with_context(|| format!("Failed to load model from {}", config.model_path.display()))?;

    let addr = config.bind_addr();
    let app = create_router(AppState::new(predictor, config));

    // Start server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
