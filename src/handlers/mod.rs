use std::sync::Arc;

use axum::{
    extract::{FromRequest, Request, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::db::SubmissionStore;

pub mod appointment;
pub mod consultation;
pub mod feedback;

/// State shared by every handler: the store behind the connection pool.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SubmissionStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self { store }
    }
}

/// JSON object body extractor that never rejects.
///
/// The body is read as a plain object, so a repeated key keeps its last
/// value. A missing, non-JSON or non-object body is read as an empty form,
/// so each route still answers with its own JSON shape instead of a
/// plain-text rejection.
pub struct Payload(pub Map<String, Value>);

impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Map<String, Value>>::from_request(req, state).await {
            Ok(Json(body)) => Ok(Self(body)),
            Err(rejection) => {
                log::warn!("Unreadable request body, treating as empty: {}", rejection);
                Ok(Self(Map::new()))
            }
        }
    }
}

/// Success acknowledgement. The consultation route omits `success`.
#[derive(Serialize, Debug)]
pub struct Ack {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub message: &'static str,
}

impl Ack {
    pub fn message(message: &'static str) -> Json<Self> {
        Json(Self {
            success: None,
            message,
        })
    }

    pub fn success(message: &'static str) -> Json<Self> {
        Json(Self {
            success: Some(true),
            message,
        })
    }
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => {
            log::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}
