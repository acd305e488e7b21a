use axum::{extract::State, Json};
use serde_json::{Map, Value};

use super::{Ack, AppState, Payload};
use crate::db::models::{Feedback, NewFeedback};
use crate::error::{ApiError, Endpoint};
use crate::utils::{field_number, field_text};

#[derive(Debug, Default)]
pub struct FeedbackForm {
    pub name: Option<Value>,
    pub location: Option<Value>,
    pub rating: Option<Value>,
    pub message: Option<Value>,
}

impl From<Map<String, Value>> for FeedbackForm {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            name: body.remove("name"),
            location: body.remove("location"),
            rating: body.remove("rating"),
            message: body.remove("message"),
        }
    }
}

impl From<FeedbackForm> for NewFeedback {
    fn from(form: FeedbackForm) -> Self {
        Self {
            name: field_text(form.name.as_ref()),
            location: field_text(form.location.as_ref()),
            rating: field_number(form.rating.as_ref()),
            message: field_text(form.message.as_ref()),
        }
    }
}

/// `POST /api/feedback`
///
/// Feedback is accepted as-is; absent fields are stored as NULL.
pub async fn submit(
    State(state): State<AppState>,
    Payload(body): Payload,
) -> Result<Json<Ack>, ApiError> {
    let feedback = NewFeedback::from(FeedbackForm::from(body));

    let id = state
        .store
        .insert_feedback(&feedback)
        .await
        .map_err(ApiError::persistence(Endpoint::SubmitFeedback))?;

    log::info!("Feedback {} submitted", id);
    Ok(Ack::success("Feedback submitted successfully!"))
}

/// `GET /api/feedback`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Feedback>>, ApiError> {
    let rows = state
        .store
        .list_feedback()
        .await
        .map_err(ApiError::persistence(Endpoint::ListFeedback))?;

    Ok(Json(rows))
}
