use std::time::Duration;

use serde_json::Value;

use crate::storage::{CacheData, GENERIC_CACHE_STORE};
use crate::utils::{base64url_decode, base64url_encode, gen_random_string};

use super::cache_key;
use super::errors::OAuth2Error;
use super::types::StateRecord;

const STATE_PREFIX: &str = "state";

/// Length in bytes of the CSRF token before base64url encoding.
const CSRF_TOKEN_LENGTH: usize = 32;

/// Start an authorization flow for the given user and org: generate a CSRF
/// token, cache the record under the (org, user) pair, and return the
/// base64url-encoded transit form to embed in the authorize URL.
///
/// A repeat call for the same pair overwrites the previous pending flow.
pub async fn create_state(
    user_id: &str,
    org_id: &str,
    ttl: Duration,
) -> Result<String, OAuth2Error> {
    let record = StateRecord {
        state: gen_random_string(CSRF_TOKEN_LENGTH)?,
        user_id: user_id.to_string(),
        org_id: org_id.to_string(),
    };

    let data = CacheData::try_from(record)?;
    // The transit form is the cached JSON itself, base64url-encoded
    let encoded = base64url_encode(data.value.clone().into_bytes());

    GENERIC_CACHE_STORE
        .lock()
        .await
        .put_with_ttl(STATE_PREFIX, &cache_key(org_id, user_id), data, ttl.as_secs())
        .await?;

    Ok(encoded)
}

/// Decode the transit state, compare its CSRF token against the cached record
/// and return the (user_id, org_id) pair on success. Does not consume the
/// cache entry; pair with [`consume_state`] once the flow is done with it.
pub(crate) async fn verify_state(encoded_state: &str) -> Result<(String, String), OAuth2Error> {
    let (state, user_id, org_id) = decode_state(encoded_state)?;

    let stored = GENERIC_CACHE_STORE
        .lock()
        .await
        .get(STATE_PREFIX, &cache_key(&org_id, &user_id))
        .await?
        .ok_or(OAuth2Error::StateExpiredOrMissing)?;

    let record = StateRecord::try_from(stored)?;
    if record.state != state {
        tracing::warn!(%user_id, %org_id, "State token mismatch in OAuth2 callback");
        return Err(OAuth2Error::StateMismatch);
    }

    Ok((user_id, org_id))
}

/// Remove the pending state entry for the pair. Missing entries are not an
/// error; the TTL may have beaten us to it.
pub(crate) async fn consume_state(user_id: &str, org_id: &str) -> Result<(), OAuth2Error> {
    GENERIC_CACHE_STORE
        .lock()
        .await
        .remove(STATE_PREFIX, &cache_key(org_id, user_id))
        .await?;
    Ok(())
}

/// Single-use state check: verify the transit state against the cache and
/// consume the entry, so a second call with the same state fails with
/// [`OAuth2Error::StateExpiredOrMissing`].
pub async fn validate_state(encoded_state: &str) -> Result<(String, String), OAuth2Error> {
    let (user_id, org_id) = verify_state(encoded_state).await?;
    consume_state(&user_id, &org_id).await?;
    Ok((user_id, org_id))
}

/// Decode the base64url transit state into its three fields.
///
/// Decoding failures are [`OAuth2Error::MalformedState`]; a payload that
/// decodes to JSON but lacks a field is [`OAuth2Error::IncompleteState`],
/// mirroring the distinct rejection the caller maps each to.
fn decode_state(encoded_state: &str) -> Result<(String, String, String), OAuth2Error> {
    let bytes = base64url_decode(encoded_state)
        .map_err(|e| OAuth2Error::MalformedState(e.to_string()))?;
    let text = String::from_utf8(bytes)
        .map_err(|_| OAuth2Error::MalformedState("state is not valid UTF-8".to_string()))?;
    let value: Value = serde_json::from_str(&text)
        .map_err(|_| OAuth2Error::MalformedState("state is not valid JSON".to_string()))?;

    let state = required_field(&value, "state")?;
    let user_id = required_field(&value, "user_id")?;
    let org_id = required_field(&value, "org_id")?;

    Ok((state, user_id, org_id))
}

fn required_field(value: &Value, name: &'static str) -> Result<String, OAuth2Error> {
    value
        .get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(OAuth2Error::IncompleteState(name))
}
