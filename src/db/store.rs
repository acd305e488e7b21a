use async_trait::async_trait;
use thiserror::Error;

use super::models::{Appointment, Feedback, NewAppointment, NewConsultation, NewFeedback};

/// Any failure coming back from the store. Callers never distinguish
/// between connectivity, constraint or syntax problems.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence seam used by the HTTP handlers.
///
/// Every method maps to exactly one statement. Inserts return the id the
/// store assigned; listings are ordered by id, newest first.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn insert_consultation(&self, consultation: &NewConsultation) -> Result<u64, StoreError>;

    async fn insert_feedback(&self, feedback: &NewFeedback) -> Result<u64, StoreError>;

    async fn list_feedback(&self) -> Result<Vec<Feedback>, StoreError>;

    async fn insert_appointment(&self, appointment: &NewAppointment) -> Result<u64, StoreError>;

    async fn list_appointments(&self) -> Result<Vec<Appointment>, StoreError>;

    /// Trivial round trip, used by the keepalive job and the `/health` route.
    async fn ping(&self) -> Result<(), StoreError>;
}
