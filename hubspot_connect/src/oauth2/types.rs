use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::storage::CacheData;

use super::errors::OAuth2Error;

/// Authoritative server-side copy of one pending authorization flow. The
/// base64url transit form the user carries through the provider redirect
/// holds the same three fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StateRecord {
    pub(crate) state: String,
    pub(crate) user_id: String,
    pub(crate) org_id: String,
}

impl TryFrom<StateRecord> for CacheData {
    type Error = OAuth2Error;

    fn try_from(record: StateRecord) -> Result<Self, Self::Error> {
        let value = serde_json::to_string(&record)
            .map_err(|e| OAuth2Error::Parse(format!("Failed to serialize state record: {e}")))?;
        Ok(CacheData { value })
    }
}

impl TryFrom<CacheData> for StateRecord {
    type Error = OAuth2Error;

    fn try_from(data: CacheData) -> Result<Self, Self::Error> {
        serde_json::from_str(&data.value)
            .map_err(|e| OAuth2Error::Parse(format!("Failed to parse stored state record: {e}")))
    }
}

/// Query parameters HubSpot appends to the redirect URI. All optional at the
/// wire level; the callback handler decides which combinations are valid.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Token endpoint response. Only `access_token` is required; everything else
/// the provider sends is carried along untouched so the cached credential is
/// byte-for-byte what HubSpot issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_keeps_unknown_fields() {
        let body = r#"{"access_token":"abc123","expires_in":1800,"hub_domain":"example.hubspot.com"}"#;
        let token: TokenResponse = serde_json::from_str(body).unwrap();

        assert_eq!(token.access_token, "abc123");
        assert_eq!(token.expires_in, Some(1800));
        assert_eq!(
            token.extra.get("hub_domain").and_then(|v| v.as_str()),
            Some("example.hubspot.com")
        );
    }

    #[test]
    fn test_token_response_requires_access_token() {
        let body = r#"{"expires_in":1800}"#;
        assert!(serde_json::from_str::<TokenResponse>(body).is_err());
    }

    #[test]
    fn test_state_record_cache_roundtrip() {
        let record = StateRecord {
            state: "random-token".to_string(),
            user_id: "user1".to_string(),
            org_id: "org1".to_string(),
        };

        let data = CacheData::try_from(record).unwrap();
        let back = StateRecord::try_from(data).unwrap();

        assert_eq!(back.state, "random-token");
        assert_eq!(back.user_id, "user1");
        assert_eq!(back.org_id, "org1");
    }
}
