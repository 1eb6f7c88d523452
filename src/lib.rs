//! Breach Cost Prediction API
//!
//! Serves a pre-trained breach cost regression model over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  BREACH COST PREDICTION API                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────┐   ┌───────────────────┐  │
//! │  │  Router   │──▶│  Predictor   │──▶│  Scaler → Model   │  │
//! │  │  (Axum)   │   │ (feature row)│   │    (ndarray)      │  │
//! │  └───────────┘   └──────────────┘   └─────────┬─────────┘  │
//! │                                               ▲            │
//! │                                     ┌─────────┴─────────┐  │
//! │                                     │  Model Artifact   │  │
//! │                                     │  (JSON, at start) │  │
//! │                                     └───────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod model;
pub mod predictor;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{any, get},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use config::Config;
pub use error::{AppError, AppResult};
pub use predictor::{BreachCostPredictor, PredictionResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<BreachCostPredictor>,
    pub config: Config,
}

impl AppState {
    pub fn new(predictor: BreachCostPredictor, config: Config) -> Self {
        Self {
            predictor: Arc::new(predictor),
            config,
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index::index))
        .route("/predict", any(handlers::predict::predict))
        .route("/health", get(handlers::health::check))
        // /predict bodies are not size-limited
        .layer(DefaultBodyLimit::disable())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
