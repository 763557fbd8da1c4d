use std::sync::Arc;

use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hubspot_connect_axum::{HubSpotConfig, hubspot_router, init};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(HubSpotConfig::from_env()?);

    // Connect the cache store before accepting traffic
    init().await?;

    let app = Router::new()
        .route("/", get(index))
        .nest("/integrations/hubspot", hubspot_router(config));

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index() -> &'static str {
    "hubspot-connect demo server\n"
}
