use axum::{extract::State, Json};
use serde_json::{Map, Value};

use super::{Ack, AppState, Payload};
use crate::db::models::NewConsultation;
use crate::error::{ApiError, Endpoint};
use crate::utils::{field_text, required_text};

#[derive(Debug, Default)]
pub struct ConsultationForm {
    pub name: Option<Value>,
    pub contact: Option<Value>,
    pub problem: Option<Value>,
    pub date: Option<Value>,
    pub message: Option<Value>,
}

impl From<Map<String, Value>> for ConsultationForm {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            name: body.remove("name"),
            contact: body.remove("contact"),
            problem: body.remove("problem"),
            date: body.remove("date"),
            message: body.remove("message"),
        }
    }
}

impl ConsultationForm {
    /// `None` when any of name, contact, problem or date is blank.
    pub fn validate(&self) -> Option<NewConsultation> {
        Some(NewConsultation {
            name: required_text(self.name.as_ref())?,
            contact: required_text(self.contact.as_ref())?,
            problem: required_text(self.problem.as_ref())?,
            date: required_text(self.date.as_ref())?,
            message: field_text(self.message.as_ref()),
        })
    }
}

/// `POST /api/consult`
pub async fn submit(
    State(state): State<AppState>,
    Payload(body): Payload,
) -> Result<Json<Ack>, ApiError> {
    let consultation = ConsultationForm::from(body)
        .validate()
        .ok_or_else(|| ApiError::validation(Endpoint::SubmitConsultation))?;

    let id = state
        .store
        .insert_consultation(&consultation)
        .await
        .map_err(ApiError::persistence(Endpoint::SubmitConsultation))?;

    log::info!("Consultation {} submitted", id);
    Ok(Ack::message("Consultation submitted!"))
}
