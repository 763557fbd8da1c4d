use std::env;
use std::time::Duration;

/// Default scopes requested from HubSpot. Contacts read is what the item
/// fetch needs; the rest match what the app is registered for.
const DEFAULT_SCOPES: &[&str] = &[
    "crm.objects.contacts.read",
    "crm.objects.contacts.write",
    "crm.objects.deals.read",
    "crm.objects.deals.write",
    "oauth",
];

const DEFAULT_AUTH_URL: &str = "https://app.hubspot.com/oauth/authorize";
const DEFAULT_TOKEN_URL: &str = "https://api.hubapi.com/oauth/v1/token";
const DEFAULT_API_BASE_URL: &str = "https://api.hubapi.com";

/// State and credential cache entries both live for ten minutes; the TTL is
/// the only cleanup for abandoned flows.
const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// OAuth2 client configuration, constructed once at process start and passed
/// by reference into the handlers. Business logic never reads the
/// environment directly.
#[derive(Debug, Clone)]
pub struct HubSpotConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub auth_url: String,
    pub token_url: String,
    pub api_base_url: String,
    pub state_ttl: Duration,
    pub credentials_ttl: Duration,
}

impl HubSpotConfig {
    /// Build the configuration from environment variables.
    ///
    /// `HUBSPOT_CLIENT_ID`, `HUBSPOT_CLIENT_SECRET` and
    /// `HUBSPOT_REDIRECT_URI` are required; the endpoint URLs and scope list
    /// have HubSpot defaults and exist as overrides mainly so tests can point
    /// the flow at a local mock provider.
    pub fn from_env() -> Result<Self, env::VarError> {
        let scopes = match env::var("HUBSPOT_SCOPES") {
            Ok(s) => s.split_whitespace().map(str::to_string).collect(),
            Err(_) => DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Self {
            client_id: env::var("HUBSPOT_CLIENT_ID")?,
            client_secret: env::var("HUBSPOT_CLIENT_SECRET")?,
            redirect_uri: env::var("HUBSPOT_REDIRECT_URI")?,
            scopes,
            auth_url: env::var("HUBSPOT_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.into()),
            token_url: env::var("HUBSPOT_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.into()),
            api_base_url: env::var("HUBSPOT_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.into()),
            state_ttl: DEFAULT_TTL,
            credentials_ttl: DEFAULT_TTL,
        })
    }

    /// Scope list in the form HubSpot expects in the authorize URL.
    pub(crate) fn scope_param(&self) -> String {
        urlencoding::encode(&self.scopes.join(" ")).into_owned()
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> HubSpotConfig {
    HubSpotConfig {
        client_id: "test-client-id".to_string(),
        client_secret: "test-client-secret".to_string(),
        redirect_uri: "http://localhost:8000/integrations/hubspot/oauth2callback".to_string(),
        scopes: vec!["crm.objects.contacts.read".to_string(), "oauth".to_string()],
        auth_url: DEFAULT_AUTH_URL.to_string(),
        token_url: DEFAULT_TOKEN_URL.to_string(),
        api_base_url: DEFAULT_API_BASE_URL.to_string(),
        state_ttl: DEFAULT_TTL,
        credentials_ttl: DEFAULT_TTL,
    }
}
