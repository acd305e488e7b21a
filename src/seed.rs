use chrono::{Duration, Utc};
use clinic_intake::{
    config::Config,
    db::{
        self,
        models::{NewAppointment, NewConsultation, NewFeedback},
        MySqlStore, StoreError, SubmissionStore,
    },
    Error,
};
use envconfig::Envconfig;
use futures::future;
use rand::Rng;

/// Visit dates are spread over the coming weeks, formatted the way the
/// booking form sends them.
fn visit_date(days_ahead: i64) -> String {
    (Utc::now().date_naive() + Duration::days(days_ahead))
        .format("%Y-%m-%d")
        .to_string()
}

fn get_seed_data() -> (Vec<NewConsultation>, Vec<NewFeedback>, Vec<NewAppointment>) {
    let mut rng = rand::thread_rng();

    let consultations = [
        ("Amina Yusuf", "555-0101", "Persistent cough", Some("Mornings preferred")),
        ("Liam Carter", "555-0102", "Lower back pain", None),
        ("Sofia Rossi", "555-0103", "Seasonal allergies", Some("Second opinion")),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, contact, problem, message))| NewConsultation {
        name: name.to_string(),
        contact: contact.to_string(),
        problem: problem.to_string(),
        date: visit_date(i as i64 + 1),
        message: message.map(str::to_string),
    })
    .collect();

    let feedback = [
        ("Noah Kim", "Austin", "Quick and friendly video call."),
        ("Priya Nair", "Pune", "The doctor took time to explain everything."),
        ("Jonas Berg", "Oslo", "Booking was easy, waiting time was short."),
    ]
    .into_iter()
    .map(|(name, location, message)| NewFeedback {
        name: Some(name.to_string()),
        location: Some(location.to_string()),
        rating: Some(f64::from(rng.gen_range(3u8..=5))),
        message: Some(message.to_string()),
    })
    .collect();

    let appointments = [
        ("Amina Yusuf", "555-0101", "Persistent cough", "Dr. Elena Park", "Pulmonologist"),
        ("Liam Carter", "555-0102", "Lower back pain", "Dr. Samuel Reyes", "Orthopedist"),
        ("Grace Obi", "555-0104", "Skin rash", "Dr. Hannah Lee", "Dermatologist"),
    ]
    .into_iter()
    .map(|(name, contact, problem, doctor_name, doctor_role)| NewAppointment {
        name: name.to_string(),
        contact: contact.to_string(),
        problem: problem.to_string(),
        date: visit_date(rng.gen_range(2..=21)),
        doctor_name: doctor_name.to_string(),
        doctor_role: doctor_role.to_string(),
    })
    .collect();

    (consultations, feedback, appointments)
}

pub async fn seed_database(store: &dyn SubmissionStore) -> Result<usize, StoreError> {
    let (consultations, feedback, appointments) = get_seed_data();

    let inserted = future::try_join_all(
        consultations
            .iter()
            .map(|consultation| store.insert_consultation(consultation)),
    )
    .await?
    .len();

    let inserted = inserted
        + future::try_join_all(feedback.iter().map(|entry| store.insert_feedback(entry)))
            .await?
            .len();

    let inserted = inserted
        + future::try_join_all(
            appointments
                .iter()
                .map(|appointment| store.insert_appointment(appointment)),
        )
        .await?
        .len();

    Ok(inserted)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::init_from_env()?;
    let pool = db::init_db(&config).await?;
    let store = MySqlStore::new(pool);

    let inserted = seed_database(&store).await?;
    log::info!("Seeded {} rows", inserted);

    store.pool().close().await;
    Ok(())
}
