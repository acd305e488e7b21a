use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::models::{
    Appointment, Consultation, Feedback, NewAppointment, NewConsultation, NewFeedback,
};
use super::store::{StoreError, SubmissionStore};

// Rows are never deleted, so a table's next id is its length plus one.
#[derive(Default)]
struct Tables {
    consultations: Vec<Consultation>,
    feedbacks: Vec<Feedback>,
    appointments: Vec<Appointment>,
}

fn next_id<T>(rows: &[T]) -> i64 {
    rows.len() as i64 + 1
}

/// In-process [`SubmissionStore`], used to run the router without a database.
///
/// [`MemoryStore::set_available`] toggles a simulated outage: while the store
/// is unavailable every call fails with [`StoreError::Unavailable`].
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    /// Stored consultations in insertion order. There is no HTTP listing for
    /// consultations, so this is the only way to inspect them.
    pub fn consultations(&self) -> Vec<Consultation> {
        self.lock().consultations.clone()
    }

    pub fn appointment_count(&self) -> usize {
        self.lock().appointments.len()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn insert_consultation(&self, consultation: &NewConsultation) -> Result<u64, StoreError> {
        self.check()?;
        let mut tables = self.lock();
        let id = next_id(&tables.consultations);
        tables.consultations.push(Consultation {
            id,
            name: consultation.name.clone(),
            contact: consultation.contact.clone(),
            problem: consultation.problem.clone(),
            date: consultation.date.clone(),
            message: consultation.message.clone(),
        });
        Ok(id as u64)
    }

    async fn insert_feedback(&self, feedback: &NewFeedback) -> Result<u64, StoreError> {
        self.check()?;
        let mut tables = self.lock();
        let id = next_id(&tables.feedbacks);
        tables.feedbacks.push(Feedback {
            id,
            name: feedback.name.clone(),
            location: feedback.location.clone(),
            rating: feedback.rating,
            message: feedback.message.clone(),
        });
        Ok(id as u64)
    }

    async fn list_feedback(&self) -> Result<Vec<Feedback>, StoreError> {
        self.check()?;
        Ok(self.lock().feedbacks.iter().rev().cloned().collect())
    }

    async fn insert_appointment(&self, appointment: &NewAppointment) -> Result<u64, StoreError> {
        self.check()?;
        let mut tables = self.lock();
        let id = next_id(&tables.appointments);
        tables.appointments.push(Appointment {
            id,
            name: appointment.name.clone(),
            contact: appointment.contact.clone(),
            problem: appointment.problem.clone(),
            date: appointment.date.clone(),
            doctor_name: appointment.doctor_name.clone(),
            doctor_role: appointment.doctor_role.clone(),
        });
        Ok(id as u64)
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>, StoreError> {
        self.check()?;
        Ok(self.lock().appointments.iter().rev().cloned().collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback(name: &str) -> NewFeedback {
        NewFeedback {
            name: Some(name.to_string()),
            ..NewFeedback::default()
        }
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let store = MemoryStore::new();
        store.insert_feedback(&feedback("first")).await.unwrap();
        store.insert_feedback(&feedback("second")).await.unwrap();

        let rows = store.list_feedback().await.unwrap();
        assert_eq!(rows[0].name.as_deref(), Some("second"));
        assert_eq!(rows[1].name.as_deref(), Some("first"));
        assert!(rows[0].id > rows[1].id);
    }

    #[tokio::test]
    async fn outage_fails_every_call_until_restored() {
        let store = MemoryStore::new();
        store.set_available(false);

        assert!(matches!(
            store.insert_feedback(&feedback("x")).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.ping().await.is_err());

        store.set_available(true);
        assert!(store.ping().await.is_ok());
        assert!(store.list_feedback().await.unwrap().is_empty());
    }
}
