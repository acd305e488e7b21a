use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::db::StoreError;

/// Endpoint an error was raised on. Each endpoint keeps its own failure
/// body shape, so the mapping to JSON is keyed on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    SubmitConsultation,
    SubmitFeedback,
    ListFeedback,
    BookAppointment,
    ListAppointments,
}

impl Endpoint {
    fn validation_body(self) -> Value {
        match self {
            Self::SubmitConsultation => json!({ "message": "Missing required fields" }),
            _ => json!({ "success": false, "message": "Missing fields" }),
        }
    }

    fn persistence_body(self) -> Value {
        match self {
            Self::SubmitConsultation => json!({ "message": "Database Error" }),
            Self::SubmitFeedback => json!({ "success": false, "message": "Database error" }),
            Self::BookAppointment => json!({ "success": false, "message": "Database Error" }),
            Self::ListFeedback | Self::ListAppointments => json!({ "success": false }),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{endpoint:?}: missing required fields")]
    Validation { endpoint: Endpoint },
    #[error("{endpoint:?}: {source}")]
    Persistence {
        endpoint: Endpoint,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn validation(endpoint: Endpoint) -> Self {
        Self::Validation { endpoint }
    }

    /// Adapter for `map_err` on store calls.
    pub fn persistence(endpoint: Endpoint) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Persistence { endpoint, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation { endpoint } => (StatusCode::BAD_REQUEST, endpoint.validation_body()),
            Self::Persistence { endpoint, source } => {
                log::error!("{:?} failed: {}", endpoint, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    endpoint.persistence_body(),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn outage() -> StoreError {
        StoreError::Unavailable("connection refused".to_string())
    }

    #[tokio::test]
    async fn consultation_errors_carry_only_a_message() {
        let (status, body) = render(ApiError::validation(Endpoint::SubmitConsultation)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "Missing required fields" }));

        let (status, body) =
            render(ApiError::persistence(Endpoint::SubmitConsultation)(outage())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Database Error" }));
    }

    #[tokio::test]
    async fn listing_failures_only_report_success_false() {
        for endpoint in [Endpoint::ListFeedback, Endpoint::ListAppointments] {
            let (status, body) = render(ApiError::persistence(endpoint)(outage())).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, json!({ "success": false }));
        }
    }

    #[tokio::test]
    async fn store_detail_never_reaches_the_client() {
        let (_, body) = render(ApiError::persistence(Endpoint::SubmitFeedback)(outage())).await;
        assert_eq!(body, json!({ "success": false, "message": "Database error" }));
        assert!(!body.to_string().contains("connection refused"));
    }
}
