use serde_json::Value;

use crate::config::HubSpotConfig;
use crate::utils::get_client;

use super::errors::ItemsError;
use super::types::{Contact, ContactsPage, IntegrationItem};

/// Contacts are fetched one page at a time; this is the page size.
const CONTACTS_PAGE_LIMIT: u32 = 10;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Fetch the first page of CRM contacts using the given credentials payload
/// (a token endpoint response as returned by `take_credentials`) and map
/// each contact to an [`IntegrationItem`], preserving API order.
pub async fn fetch_items(
    config: &HubSpotConfig,
    credentials: &str,
) -> Result<Vec<IntegrationItem>, ItemsError> {
    let credentials: Value = serde_json::from_str(credentials)
        .map_err(|e| ItemsError::Credentials(format!("credentials are not valid JSON: {e}")))?;
    let access_token = credentials
        .get("access_token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ItemsError::Credentials("missing access_token".to_string()))?;

    let url = format!("{}/crm/v3/objects/contacts", config.api_base_url);
    let response = get_client()
        .get(&url)
        .query(&[
            ("limit", CONTACTS_PAGE_LIMIT.to_string().as_str()),
            ("archived", "false"),
        ])
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| ItemsError::Transport(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ItemsError::Transport(e.to_string()))?;

    if !status.is_success() {
        tracing::error!("Contacts listing failed with status {}: {}", status, body);
        return Err(ItemsError::Provider {
            status: status.as_u16(),
            detail: body,
        });
    }

    let page: ContactsPage = serde_json::from_str(&body)
        .map_err(|e| ItemsError::Parse(format!("Failed to parse contacts page: {e}")))?;

    tracing::info!("Fetched {} HubSpot contacts", page.results.len());

    Ok(page.results.into_iter().map(contact_to_item).collect())
}

fn contact_to_item(contact: Contact) -> IntegrationItem {
    let first = contact.properties.firstname.unwrap_or_default();
    let last = contact.properties.lastname.unwrap_or_default();

    IntegrationItem {
        id: contact.id,
        name: format!("{first} {last}").trim().to_string(),
        item_type: "Contact".to_string(),
        url: contact.properties.email.unwrap_or_default(),
        creation_time: contact.created_at.format(TIMESTAMP_FORMAT).to_string(),
        last_modified_time: contact.updated_at.format(TIMESTAMP_FORMAT).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;

    async fn spawn_contacts_endpoint(status: StatusCode, body: &'static str) -> String {
        let app = Router::new().route(
            "/crm/v3/objects/contacts",
            get(move || async move { (status, body) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    const TWO_CONTACTS: &str = r#"{
        "results": [
            {
                "id": "101",
                "properties": {
                    "firstname": "Ada",
                    "lastname": "Lovelace",
                    "email": "ada@example.com"
                },
                "createdAt": "2024-01-02T03:04:05.000Z",
                "updatedAt": "2024-02-03T04:05:06.000Z"
            },
            {
                "id": "102",
                "properties": {
                    "firstname": "Alan",
                    "lastname": "Turing",
                    "email": "alan@example.com"
                },
                "createdAt": "2024-03-04T05:06:07.000Z",
                "updatedAt": "2024-04-05T06:07:08.000Z"
            }
        ]
    }"#;

    #[tokio::test]
    async fn test_fetch_items_maps_contacts_in_order() {
        let mut config = test_config();
        config.api_base_url = spawn_contacts_endpoint(StatusCode::OK, TWO_CONTACTS).await;

        let items = fetch_items(&config, r#"{"access_token":"abc123"}"#)
            .await
            .unwrap();

        assert_eq!(items.len(), 2);

        assert_eq!(items[0].id, "101");
        assert_eq!(items[0].name, "Ada Lovelace");
        assert_eq!(items[0].item_type, "Contact");
        assert_eq!(items[0].url, "ada@example.com");
        assert_eq!(items[0].creation_time, "2024-01-02 03:04:05");
        assert_eq!(items[0].last_modified_time, "2024-02-03 04:05:06");

        assert_eq!(items[1].id, "102");
        assert_eq!(items[1].name, "Alan Turing");
    }

    #[tokio::test]
    async fn test_fetch_items_empty_page() {
        let mut config = test_config();
        config.api_base_url = spawn_contacts_endpoint(StatusCode::OK, r#"{"results":[]}"#).await;

        let items = fetch_items(&config, r#"{"access_token":"abc123"}"#)
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_items_provider_error() {
        let mut config = test_config();
        config.api_base_url = spawn_contacts_endpoint(
            StatusCode::UNAUTHORIZED,
            r#"{"status":"error","message":"expired token"}"#,
        )
        .await;

        let result = fetch_items(&config, r#"{"access_token":"expired"}"#).await;
        match result {
            Err(ItemsError::Provider { status, detail }) => {
                assert_eq!(status, 401);
                assert!(detail.contains("expired token"));
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_items_rejects_bad_credentials_payload() {
        let config = test_config();

        let not_json = fetch_items(&config, "not json").await;
        assert!(matches!(not_json, Err(ItemsError::Credentials(_))));

        let no_token = fetch_items(&config, r#"{"refresh_token":"only"}"#).await;
        assert!(matches!(no_token, Err(ItemsError::Credentials(_))));

        let empty_token = fetch_items(&config, r#"{"access_token":""}"#).await;
        assert!(matches!(empty_token, Err(ItemsError::Credentials(_))));
    }

    #[test]
    fn test_contact_without_properties_maps_to_empty_fields() {
        let contact: Contact = serde_json::from_str(
            r#"{
                "id": "103",
                "properties": {},
                "createdAt": "2024-01-01T00:00:00.000Z",
                "updatedAt": "2024-01-01T00:00:00.000Z"
            }"#,
        )
        .unwrap();

        let item = contact_to_item(contact);
        assert_eq!(item.id, "103");
        assert_eq!(item.name, "");
        assert_eq!(item.url, "");
        assert_eq!(item.item_type, "Contact");
    }

    #[test]
    fn test_contact_with_only_first_name() {
        let contact: Contact = serde_json::from_str(
            r#"{
                "id": "104",
                "properties": {"firstname": "Ada"},
                "createdAt": "2024-01-01T00:00:00.000Z",
                "updatedAt": "2024-01-01T00:00:00.000Z"
            }"#,
        )
        .unwrap();

        // No stray whitespace around a half-filled name
        assert_eq!(contact_to_item(contact).name, "Ada");
    }
}
