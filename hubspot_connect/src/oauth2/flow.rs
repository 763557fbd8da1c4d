use crate::config::HubSpotConfig;
use crate::storage::{CacheData, GENERIC_CACHE_STORE};
use crate::utils::get_client;

use super::cache_key;
use super::errors::OAuth2Error;
use super::state::{consume_state, create_state, verify_state};
use super::types::TokenResponse;

const CREDENTIALS_PREFIX: &str = "credentials";

/// Begin the authorization flow: cache a fresh state for the pair and build
/// the HubSpot authorize URL the user's browser should be sent to.
pub async fn authorization_url(
    config: &HubSpotConfig,
    user_id: &str,
    org_id: &str,
) -> Result<String, OAuth2Error> {
    let encoded_state = create_state(user_id, org_id, config.state_ttl).await?;

    Ok(format!(
        "{}?client_id={}&scope={}&redirect_uri={}&state={}",
        config.auth_url,
        config.client_id,
        config.scope_param(),
        urlencoding::encode(&config.redirect_uri),
        encoded_state,
    ))
}

/// Complete the flow after HubSpot redirects back with an authorization code.
///
/// The state is verified before any network traffic; the code-for-token
/// exchange then runs concurrently with consuming the state entry. The token
/// response body is cached byte-for-byte as issued, retrievable once via
/// [`take_credentials`].
pub async fn handle_oauth2_callback(
    config: &HubSpotConfig,
    code: &str,
    encoded_state: &str,
) -> Result<(), OAuth2Error> {
    let (user_id, org_id) = verify_state(encoded_state).await?;

    let (exchange, consumed) = tokio::join!(
        exchange_code_for_token(config, code),
        consume_state(&user_id, &org_id),
    );

    // The exchange outcome decides the flow; a failed cleanup only means the
    // entry waits out its TTL.
    if let Err(e) = consumed {
        tracing::warn!(%user_id, %org_id, "Failed to consume state entry: {}", e);
    }

    let (token, raw_body) = exchange?;
    tracing::debug!(
        %user_id,
        %org_id,
        token_type = ?token.token_type,
        "OAuth2 token exchange succeeded"
    );

    GENERIC_CACHE_STORE
        .lock()
        .await
        .put_with_ttl(
            CREDENTIALS_PREFIX,
            &cache_key(&org_id, &user_id),
            CacheData { value: raw_body },
            config.credentials_ttl.as_secs(),
        )
        .await?;

    Ok(())
}

/// Retrieve and delete the cached credentials for the pair. The second call
/// for the same pair fails with [`OAuth2Error::NoCredentials`].
///
/// Returns the token endpoint response body exactly as HubSpot sent it.
pub async fn take_credentials(user_id: &str, org_id: &str) -> Result<String, OAuth2Error> {
    let data = GENERIC_CACHE_STORE
        .lock()
        .await
        .take(CREDENTIALS_PREFIX, &cache_key(org_id, user_id))
        .await?
        .ok_or(OAuth2Error::NoCredentials)?;

    // The entry is gone either way; confirm what we hand out is still JSON
    serde_json::from_str::<serde_json::Value>(&data.value)
        .map_err(|e| OAuth2Error::Parse(format!("Failed to parse cached credentials: {e}")))?;

    Ok(data.value)
}

/// POST the authorization code to the token endpoint.
///
/// Returns both the parsed response and the raw body: the parse validates the
/// shape, the raw body is what gets cached.
async fn exchange_code_for_token(
    config: &HubSpotConfig,
    code: &str,
) -> Result<(TokenResponse, String), OAuth2Error> {
    let response = get_client()
        .post(&config.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", &config.client_id),
            ("client_secret", &config.client_secret),
            ("redirect_uri", &config.redirect_uri),
            ("code", code),
        ])
        .send()
        .await
        .map_err(|e| OAuth2Error::Transport(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| OAuth2Error::Transport(e.to_string()))?;

    if status != reqwest::StatusCode::OK {
        tracing::error!("Token exchange failed with status {}: {}", status, body);
        return Err(OAuth2Error::Provider {
            status: status.as_u16(),
            detail: body,
        });
    }

    let token: TokenResponse = serde_json::from_str(&body)
        .map_err(|e| OAuth2Error::Parse(format!("Failed to parse token response: {e}")))?;

    Ok((token, body))
}
