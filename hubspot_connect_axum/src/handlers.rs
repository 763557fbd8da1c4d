use std::sync::Arc;

use askama::Template;
use axum::{
    Json,
    extract::{Form, Query, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{Html, Response},
};
use serde::Deserialize;

use hubspot_connect::{
    CallbackParams, HubSpotConfig, IntegrationItem, authorization_url, fetch_items,
    handle_oauth2_callback, take_credentials,
};

use super::error::IntoResponseError;

#[derive(Debug, Deserialize)]
pub(super) struct PairForm {
    pub(super) user_id: String,
    pub(super) org_id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ItemsForm {
    pub(super) credentials: String,
}

#[derive(Template)]
#[template(path = "close_window.j2")]
struct CloseWindowTemplate {
    message: String,
}

/// Start an authorization flow. Responds with the HubSpot authorize URL the
/// frontend should open in a popup.
pub(super) async fn authorize(
    State(config): State<Arc<HubSpotConfig>>,
    Form(form): Form<PairForm>,
) -> Result<String, (StatusCode, String)> {
    authorization_url(&config, &form.user_id, &form.org_id)
        .await
        .into_response_error()
}

/// The redirect target HubSpot sends the user's browser back to.
///
/// Provider denials and missing parameters are rejected before any token
/// exchange is attempted. On success the popup gets a page that closes
/// itself.
pub(super) async fn oauth2_callback(
    State(config): State<Arc<HubSpotConfig>>,
    Query(params): Query<CallbackParams>,
) -> Result<Html<String>, (StatusCode, String)> {
    if let Some(error) = params.error {
        let detail = params.error_description.unwrap_or(error);
        tracing::warn!("OAuth2 callback denied by provider: {}", detail);
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Authorization failed: {detail}"),
        ));
    }
    let code = params
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "Missing code parameter".to_string()))?;
    let state = params
        .state
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "Missing state parameter".to_string()))?;

    handle_oauth2_callback(&config, code, state)
        .await
        .into_response_error()?;

    let template = CloseWindowTemplate {
        message: "Authorization complete. You can close this window.".to_string(),
    };
    let html = template
        .render()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Html(html))
}

/// Hand the cached credentials to the caller and delete them. The body is
/// the token endpoint response exactly as HubSpot sent it, so it is written
/// out as raw JSON instead of being re-serialized.
pub(super) async fn credentials(
    Form(form): Form<PairForm>,
) -> Result<Response, (StatusCode, String)> {
    let raw = take_credentials(&form.user_id, &form.org_id)
        .await
        .into_response_error()?;

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "application/json")
        .body(raw.into())
        .into_response_error()
}

/// Fetch the first page of contacts with the supplied credentials payload.
pub(super) async fn items(
    State(config): State<Arc<HubSpotConfig>>,
    Form(form): Form<ItemsForm>,
) -> Result<Json<Vec<IntegrationItem>>, (StatusCode, String)> {
    fetch_items(&config, &form.credentials)
        .await
        .map(Json)
        .into_response_error()
}
