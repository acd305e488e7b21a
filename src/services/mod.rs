use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::db::SubmissionStore;

/// Schedules the pool keepalive.
///
/// Hosted MySQL instances drop connections that sit idle for too long; a
/// trivial query on the given cron schedule keeps at least one pool member
/// warm. A failed ping is logged and the next tick tries again.
///
/// Parameters:
/// - `store`: The store whose `ping` is run on every tick.
/// - `schedule`: A six-field cron expression (seconds first), such as
///   `"0 */5 * * * *"`.
///
/// Returns:
/// - `Ok(JobScheduler)` already running; call `shutdown` on it when the
///   server stops.
/// - `Err(JobSchedulerError)` if the expression does not parse or the
///   scheduler fails to start.
pub async fn schedule_keepalive(
    store: Arc<dyn SubmissionStore>,
    schedule: &str,
) -> Result<JobScheduler, JobSchedulerError> {
    let sched = JobScheduler::new().await?;

    let job = Job::new_async(schedule, move |_uuid, _l| {
        let store = store.clone();
        Box::pin(async move {
            match store.ping().await {
                Ok(()) => log::debug!("Keepalive ping succeeded"),
                Err(e) => log::error!("Keepalive ping failed: {}", e),
            }
        })
    })
    .map_err(|e| {
        log::error!("Failed to create keepalive job for {:?}: {}", schedule, e);
        e
    })?;

    sched.add(job).await.map_err(|e| {
        log::error!("Failed to add keepalive job to scheduler: {}", e);
        e
    })?;

    sched.start().await?;

    log::info!("Keepalive scheduled ({})", schedule);
    Ok(sched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[tokio::test(flavor = "multi_thread")]
    async fn rejects_malformed_schedule() {
        let store: Arc<dyn SubmissionStore> = Arc::new(MemoryStore::new());
        assert!(schedule_keepalive(store, "every now and then").await.is_err());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn starts_and_stops_with_a_valid_schedule() {
        let store: Arc<dyn SubmissionStore> = Arc::new(MemoryStore::new());
        let mut sched = schedule_keepalive(store, "0 */5 * * * *").await.unwrap();
        sched.shutdown().await.unwrap();
    }
}
