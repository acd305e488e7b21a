use async_trait::async_trait;
use sqlx::MySqlPool;

use super::models::{Appointment, Feedback, NewAppointment, NewConsultation, NewFeedback};
use super::store::{StoreError, SubmissionStore};

// Listings cast every column to the type its row struct decodes, so tables
// created elsewhere (DATE dates, INT UNSIGNED ids, INT or DECIMAL ratings)
// still read back. `+ 0E0` is MySQL 5.7's spelling of a cast to DOUBLE.
const LIST_FEEDBACK: &str = "SELECT CAST(id AS SIGNED) AS id, \
    CAST(name AS CHAR) AS name, \
    CAST(location AS CHAR) AS location, \
    rating + 0E0 AS rating, \
    CAST(message AS CHAR) AS message \
    FROM feedbacks ORDER BY id DESC";

const LIST_APPOINTMENTS: &str = "SELECT CAST(id AS SIGNED) AS id, \
    CAST(name AS CHAR) AS name, \
    CAST(contact AS CHAR) AS contact, \
    CAST(problem AS CHAR) AS problem, \
    CAST(date AS CHAR) AS date, \
    CAST(doctorName AS CHAR) AS doctorName, \
    CAST(doctorRole AS CHAR) AS doctorRole \
    FROM appointments ORDER BY id DESC";

/// [`SubmissionStore`] backed by the shared MySQL pool.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl SubmissionStore for MySqlStore {
    async fn insert_consultation(&self, consultation: &NewConsultation) -> Result<u64, StoreError> {
        let result = sqlx::query(
            "INSERT INTO consultations (name, contact, problem, date, message) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&consultation.name)
        .bind(&consultation.contact)
        .bind(&consultation.problem)
        .bind(&consultation.date)
        .bind(&consultation.message)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id())
    }

    async fn insert_feedback(&self, feedback: &NewFeedback) -> Result<u64, StoreError> {
        let result = sqlx::query(
            "INSERT INTO feedbacks (name, location, rating, message) VALUES (?, ?, ?, ?)",
        )
        .bind(&feedback.name)
        .bind(&feedback.location)
        .bind(feedback.rating)
        .bind(&feedback.message)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id())
    }

    async fn list_feedback(&self) -> Result<Vec<Feedback>, StoreError> {
        let rows = sqlx::query_as::<_, Feedback>(LIST_FEEDBACK)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn insert_appointment(&self, appointment: &NewAppointment) -> Result<u64, StoreError> {
        let result = sqlx::query(
            "INSERT INTO appointments (name, contact, problem, date, doctorName, doctorRole) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&appointment.name)
        .bind(&appointment.contact)
        .bind(&appointment.problem)
        .bind(&appointment.date)
        .bind(&appointment.doctor_name)
        .bind(&appointment.doctor_role)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id())
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>, StoreError> {
        let rows = sqlx::query_as::<_, Appointment>(LIST_APPOINTMENTS)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use envconfig::Envconfig;

    // Run against a disposable server: DB_HOST=... DB_NAME=clinic_test cargo test -- --ignored

    async fn store() -> MySqlStore {
        let config = Config::init_from_env().expect("config");
        let pool = crate::db::init_db(&config).await.expect("pool");
        MySqlStore::new(pool)
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn appointments_come_back_newest_first() {
        let store = store().await;
        let appointment = NewAppointment {
            name: "Ada".to_string(),
            contact: "555-0100".to_string(),
            problem: "migraine".to_string(),
            date: "2024-02-01".to_string(),
            doctor_name: "Dr. Hale".to_string(),
            doctor_role: "Neurologist".to_string(),
        };

        let first = store.insert_appointment(&appointment).await.unwrap();
        let second = store.insert_appointment(&appointment).await.unwrap();
        assert!(second > first);

        let rows = store.list_appointments().await.unwrap();
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(ids, sorted);
        assert_eq!(rows[0].doctor_role, "Neurologist");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn reads_tables_created_with_other_column_types() {
        use sqlx::{mysql::MySqlPoolOptions, Executor};

        let mut config = Config::init_from_env().expect("config");
        config.db_name = "clinic_legacy_test".to_string();

        let server = MySqlPoolOptions::new()
            .max_connections(1)
            .connect_with(config.server_options())
            .await
            .expect("server");
        for statement in [
            "CREATE DATABASE IF NOT EXISTS clinic_legacy_test",
            "DROP TABLE IF EXISTS clinic_legacy_test.appointments",
            "DROP TABLE IF EXISTS clinic_legacy_test.feedbacks",
            "CREATE TABLE clinic_legacy_test.appointments (
                id INT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
                name VARCHAR(100) NOT NULL,
                contact VARCHAR(50) NOT NULL,
                problem TEXT NOT NULL,
                date DATE NOT NULL,
                doctorName VARCHAR(100) NOT NULL,
                doctorRole VARCHAR(100) NOT NULL
            )",
            "CREATE TABLE clinic_legacy_test.feedbacks (
                id INT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
                name VARCHAR(100),
                location VARCHAR(100),
                rating INT,
                message TEXT
            )",
        ] {
            server.execute(statement).await.expect("legacy schema");
        }
        server.close().await;

        let store = MySqlStore::new(crate::db::init_db(&config).await.expect("pool"));
        store
            .insert_appointment(&NewAppointment {
                name: "Ada".to_string(),
                contact: "555-0100".to_string(),
                problem: "migraine".to_string(),
                date: "2024-02-01".to_string(),
                doctor_name: "Dr. Hale".to_string(),
                doctor_role: "Neurologist".to_string(),
            })
            .await
            .unwrap();
        store
            .insert_feedback(&NewFeedback {
                rating: Some(4.0),
                ..NewFeedback::default()
            })
            .await
            .unwrap();

        let appointments = store.list_appointments().await.unwrap();
        assert_eq!(appointments[0].date, "2024-02-01");
        assert_eq!(appointments[0].id, 1);

        let feedback = store.list_feedback().await.unwrap();
        assert_eq!(feedback[0].rating, Some(4.0));
        assert_eq!(feedback[0].name, None);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ping_round_trips() {
        store().await.ping().await.unwrap();
    }
}
