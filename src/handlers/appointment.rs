use axum::{extract::State, Json};
use serde_json::{Map, Value};

use super::{Ack, AppState, Payload};
use crate::db::models::{Appointment, NewAppointment};
use crate::error::{ApiError, Endpoint};
use crate::utils::required_text;

#[derive(Debug, Default)]
pub struct AppointmentForm {
    pub name: Option<Value>,
    pub contact: Option<Value>,
    pub problem: Option<Value>,
    pub date: Option<Value>,
    pub doctor_name: Option<Value>,
    pub doctor_role: Option<Value>,
}

impl From<Map<String, Value>> for AppointmentForm {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            name: body.remove("name"),
            contact: body.remove("contact"),
            problem: body.remove("problem"),
            date: body.remove("date"),
            doctor_name: body.remove("doctorName"),
            doctor_role: body.remove("doctorRole"),
        }
    }
}

impl AppointmentForm {
    /// `None` when any field is blank; all six are required.
    pub fn validate(&self) -> Option<NewAppointment> {
        Some(NewAppointment {
            name: required_text(self.name.as_ref())?,
            contact: required_text(self.contact.as_ref())?,
            problem: required_text(self.problem.as_ref())?,
            date: required_text(self.date.as_ref())?,
            doctor_name: required_text(self.doctor_name.as_ref())?,
            doctor_role: required_text(self.doctor_role.as_ref())?,
        })
    }
}

/// `POST /api/book-appointment`
pub async fn book(
    State(state): State<AppState>,
    Payload(body): Payload,
) -> Result<Json<Ack>, ApiError> {
    let appointment = AppointmentForm::from(body)
        .validate()
        .ok_or_else(|| ApiError::validation(Endpoint::BookAppointment))?;

    let id = state
        .store
        .insert_appointment(&appointment)
        .await
        .map_err(ApiError::persistence(Endpoint::BookAppointment))?;

    log::info!(
        "Appointment {} booked with {}",
        id,
        appointment.doctor_name
    );
    Ok(Ack::success("Appointment booked successfully!"))
}

/// `GET /api/appointments`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Appointment>>, ApiError> {
    let rows = state
        .store
        .list_appointments()
        .await
        .map_err(ApiError::persistence(Endpoint::ListAppointments))?;

    Ok(Json(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(body: Value) -> AppointmentForm {
        match body {
            Value::Object(map) => AppointmentForm::from(map),
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn reads_camel_case_doctor_fields() {
        let form = form(json!({
            "name": "A", "contact": "1", "problem": "rash", "date": "2024-03-02",
            "doctorName": "Dr. Osei", "doctorRole": "Dermatologist"
        }));

        let appointment = form.validate().unwrap();
        assert_eq!(appointment.doctor_name, "Dr. Osei");
        assert_eq!(appointment.doctor_role, "Dermatologist");
    }

    #[test]
    fn snake_case_doctor_fields_do_not_count() {
        let form = form(json!({
            "name": "A", "contact": "1", "problem": "rash", "date": "2024-03-02",
            "doctor_name": "Dr. Osei", "doctor_role": "Dermatologist"
        }));

        assert!(form.validate().is_none());
    }
}
