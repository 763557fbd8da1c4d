//! Router for the HubSpot integration endpoints

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use hubspot_connect::HubSpotConfig;

use super::handlers;

/// Create the router for the HubSpot integration endpoints.
///
/// Nest it under the backend's HubSpot prefix, e.g.
/// `/integrations/hubspot`; the callback route must then line up with the
/// redirect URI registered for the app.
pub fn hubspot_router(config: Arc<HubSpotConfig>) -> Router {
    hubspot_router_no_trace(config).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`hubspot_router`] but without HTTP tracing middleware, for
/// callers that layer their own.
pub fn hubspot_router_no_trace(config: Arc<HubSpotConfig>) -> Router {
    Router::new()
        .route("/authorize", post(handlers::authorize))
        .route("/oauth2callback", get(handlers::oauth2_callback))
        .route("/credentials", post(handlers::credentials))
        .route("/items", post(handlers::items))
        .with_state(config)
}
