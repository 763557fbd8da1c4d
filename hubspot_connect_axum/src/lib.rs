//! Axum HTTP layer for the `hubspot-connect` library: one router exposing
//! the authorization flow and the contact fetch, meant to be nested into the
//! integrations backend under its HubSpot prefix.

mod error;
mod handlers;
mod router;

pub use error::IntoResponseError;
pub use router::{hubspot_router, hubspot_router_no_trace};

// Re-export the initialization function so binaries only need this crate
pub use hubspot_connect::{HubSpotConfig, init};
