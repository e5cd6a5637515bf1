//! Main entry point for the clinica backend.
//!
//! Opens the store from the configured snapshot file and serves the
//! REST API built in `api-rest`.

use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinica_core::{CoreConfig, Services, Store};

/// Starts the clinica REST server.
///
/// # Environment Variables
/// - `CLINICA_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `CLINICA_DATA_FILE`: snapshot file for the store (default:
///   "clinica-data/clinic.json")
///
/// # Returns
/// * `Ok(())` - if the server starts and runs successfully
/// * `Err(anyhow::Error)` - if startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinica_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("clinica_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("CLINICA_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_file = std::env::var("CLINICA_DATA_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("clinica-data/clinic.json"));

    tracing::info!("++ Starting clinica REST on {}", rest_addr);
    tracing::info!("++ Snapshot file: {}", data_file.display());

    let cfg = CoreConfig::new(data_file);
    let store = Arc::new(Store::open(&cfg)?);
    let app = api_rest::router(Services::new(store));

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
