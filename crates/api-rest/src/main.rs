//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging when you only want the REST
//! server (with OpenAPI/Swagger UI). The workspace's main `clinica-run`
//! binary is the normal entry point.

use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinica_core::{CoreConfig, Services, Store};

/// Starts the REST server on the configured address.
///
/// # Environment Variables
/// - `CLINICA_REST_ADDR`: server address (default: "0.0.0.0:3000")
/// - `CLINICA_DATA_FILE`: snapshot file path (default:
///   "clinica-data/clinic.json")
///
/// # Errors
/// Returns an error if the logging configuration cannot be initialised,
/// the snapshot cannot be loaded, or the address cannot be bound.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("clinica_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("CLINICA_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_file = std::env::var("CLINICA_DATA_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("clinica-data/clinic.json"));

    tracing::info!("-- Starting clinica REST API on {}", addr);

    let cfg = CoreConfig::new(data_file);
    let store = Arc::new(Store::open(&cfg)?);
    let app = api_rest::router(Services::new(store));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
