use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use condition_predictor::HttpConditionPredictor;
use triage_core::config::{
    api_key_from_env_value, catalog_file_from_env_value, predictor_timeout_from_env_value,
    predictor_url_from_env_value, rest_addr_from_env_value,
};
use triage_core::{TriageConfig, TriageService};

/// Main entry point for the OPG triage service
///
/// Resolves configuration once, loads the symptom catalog and serves the REST API.
///
/// # Environment Variables
/// - `TRIAGE_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `PREDICTOR_URL`: Base URL of the condition prediction service (default: "http://localhost:5000")
/// - `PREDICTOR_TIMEOUT_SECS`: Prediction request timeout in seconds (default: 10)
/// - `TRIAGE_CATALOG_FILE`: Optional YAML symptom catalog replacing the built-in table
/// - `API_KEY`: When set, required in the `x-api-key` header on every route except `/health`
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration is invalid or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("triage=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = TriageConfig::new(
        rest_addr_from_env_value(std::env::var("TRIAGE_REST_ADDR").ok())?,
        predictor_url_from_env_value(std::env::var("PREDICTOR_URL").ok()),
        predictor_timeout_from_env_value(std::env::var("PREDICTOR_TIMEOUT_SECS").ok())?,
        catalog_file_from_env_value(std::env::var("TRIAGE_CATALOG_FILE").ok()),
        api_key_from_env_value(std::env::var("API_KEY").ok()),
    )?;

    let catalog = Arc::new(cfg.load_catalog()?);
    let predictor = Arc::new(HttpConditionPredictor::new(
        cfg.predictor_url(),
        cfg.predictor_timeout(),
    )?);
    let service = TriageService::new(catalog, predictor.clone(), cfg.predictor_timeout());

    if cfg.api_key().is_none() {
        tracing::warn!("API_KEY not set; REST routes are unauthenticated");
    }

    tracing::info!("++ Starting OPG triage REST on {}", cfg.rest_addr());
    tracing::info!("++ Condition predictor at {}", predictor.endpoint());

    let app = api_rest::router(AppState::new(service, cfg.api_key()));
    let listener = tokio::net::TcpListener::bind(cfg.rest_addr()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
