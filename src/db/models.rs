use serde::{Deserialize, Serialize};

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Consultation {
    pub id: i64,
    pub name: String,
    pub contact: String,
    pub problem: String,
    pub date: String,
    pub message: Option<String>,
}

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Feedback {
    pub id: i64,
    pub name: Option<String>,
    pub location: Option<String>,
    pub rating: Option<f64>,
    pub message: Option<String>,
}

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub name: String,
    pub contact: String,
    pub problem: String,
    pub date: String,
    pub doctor_name: String,
    pub doctor_role: String,
}

/// A validated consultation, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewConsultation {
    pub name: String,
    pub contact: String,
    pub problem: String,
    pub date: String,
    pub message: Option<String>,
}

/// Feedback is stored as received; every column may be NULL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewFeedback {
    pub name: Option<String>,
    pub location: Option<String>,
    pub rating: Option<f64>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub name: String,
    pub contact: String,
    pub problem: String,
    pub date: String,
    pub doctor_name: String,
    pub doctor_role: String,
}
