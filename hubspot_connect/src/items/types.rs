use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized representation of a remote record, shared by every integration
/// the backend talks to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    /// For contacts this carries the email address; downstream consumers
    /// expect the contact's address in this slot.
    pub url: String,
    pub creation_time: String,
    pub last_modified_time: String,
}

/// One page of the CRM contacts listing. Paging metadata is ignored; only
/// the first page is ever requested.
#[derive(Debug, Deserialize)]
pub(crate) struct ContactsPage {
    #[serde(default)]
    pub(crate) results: Vec<Contact>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Contact {
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) properties: ContactProperties,
    #[serde(rename = "createdAt")]
    pub(crate) created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub(crate) updated_at: DateTime<Utc>,
}

/// The default property set HubSpot returns when none are requested
/// explicitly. Any of them can be unset on a given contact.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ContactProperties {
    pub(crate) firstname: Option<String>,
    pub(crate) lastname: Option<String>,
    pub(crate) email: Option<String>,
}
