mod errors;
mod flow;
mod state;
mod types;

pub use errors::OAuth2Error;
pub use flow::{authorization_url, handle_oauth2_callback, take_credentials};
pub use state::{create_state, validate_state};
pub use types::{CallbackParams, TokenResponse};

/// Cache entries are keyed by the (org, user) pair the flow was started for.
pub(crate) fn cache_key(org_id: &str, user_id: &str) -> String {
    format!("{org_id}:{user_id}")
}
