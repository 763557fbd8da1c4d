use http::{Result as HttpResponse, StatusCode};
use hubspot_connect::{ItemsError, OAuth2Error};

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// State and credential errors are the client's fault; provider errors keep
/// the provider's status; everything else is on us.
impl<T> IntoResponseError<T> for Result<T, OAuth2Error> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            let status = match &e {
                OAuth2Error::MalformedState(_)
                | OAuth2Error::IncompleteState(_)
                | OAuth2Error::StateExpiredOrMissing
                | OAuth2Error::StateMismatch
                | OAuth2Error::NoCredentials => StatusCode::BAD_REQUEST,
                OAuth2Error::Provider { status, .. } => StatusCode::from_u16(*status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, e.to_string())
        })
    }
}

impl<T> IntoResponseError<T> for Result<T, ItemsError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            let status = match &e {
                ItemsError::Credentials(_) => StatusCode::BAD_REQUEST,
                ItemsError::Provider { .. } => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, e.to_string())
        })
    }
}

/// Implementation for http::Error (used by Response::builder())
impl<T> IntoResponseError<T> for HttpResponse<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_errors_map_to_bad_request() {
        for e in [
            OAuth2Error::MalformedState("bad".to_string()),
            OAuth2Error::IncompleteState("org_id"),
            OAuth2Error::StateExpiredOrMissing,
            OAuth2Error::StateMismatch,
            OAuth2Error::NoCredentials,
        ] {
            let result: Result<(), OAuth2Error> = Err(e);
            let (status, _) = result.into_response_error().unwrap_err();
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_provider_error_keeps_provider_status() {
        let result: Result<(), OAuth2Error> = Err(OAuth2Error::Provider {
            status: 403,
            detail: "forbidden".to_string(),
        });
        let (status, detail) = result.into_response_error().unwrap_err();
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(detail.contains("forbidden"));
    }

    #[test]
    fn test_transport_error_is_internal() {
        let result: Result<(), OAuth2Error> =
            Err(OAuth2Error::Transport("connection refused".to_string()));
        let (status, _) = result.into_response_error().unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_items_provider_error_is_bad_gateway() {
        let result: Result<(), ItemsError> = Err(ItemsError::Provider {
            status: 500,
            detail: "provider down".to_string(),
        });
        let (status, _) = result.into_response_error().unwrap_err();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_items_credentials_error_is_bad_request() {
        let result: Result<(), ItemsError> =
            Err(ItemsError::Credentials("missing access_token".to_string()));
        let (status, _) = result.into_response_error().unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_success_case_passes_through() {
        let result: Result<String, OAuth2Error> = Ok("ok".to_string());
        assert_eq!(result.into_response_error().unwrap(), "ok");
    }
}
