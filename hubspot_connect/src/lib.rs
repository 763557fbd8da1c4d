//! hubspot-connect - HubSpot OAuth2 integration library
//!
//! This crate implements the server side of the HubSpot OAuth2
//! authorization-code flow (state token management, code-for-token exchange,
//! single-use credential handoff) plus a thin fetch of contact records mapped
//! into the generic `IntegrationItem` shape shared by the integrations
//! backend.

mod config;
mod items;
mod oauth2;
mod storage;
mod utils;

#[cfg(test)]
mod test_utils;

pub use config::HubSpotConfig;

pub use oauth2::{
    CallbackParams, OAuth2Error, TokenResponse, authorization_url, create_state,
    handle_oauth2_callback, take_credentials, validate_state,
};

pub use items::{IntegrationItem, ItemsError, fetch_items};

pub use storage::StorageError;

pub use utils::UtilError;

/// Initialize the library: connects the configured cache store so that
/// backend problems surface at startup instead of on the first request.
pub async fn init() -> Result<(), StorageError> {
    storage::init().await
}
