use crate::group::GroupService;
use chrono::Duration;
use tokio_cron_scheduler::{Job, JobScheduler};

/// Starts the retention sweep on the given cron schedule. Groups whose last
/// write is older than `retention` are purged in bulk. A failed run is
/// logged and retried at the next tick; it never takes the service down.
pub async fn start_sweep_scheduler(
    service: GroupService,
    schedule: &str,
    retention: Duration,
) -> anyhow::Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(schedule, move |_id, _scheduler| {
        let service = service.clone();
        Box::pin(async move {
            match service.sweep_expired(retention).await {
                Ok(0) => tracing::debug!("Retention sweep found nothing to remove"),
                Ok(removed) => {
                    tracing::info!("Retention sweep removed {} expired groups", removed)
                }
                Err(e) => tracing::error!("Retention sweep failed: {:?}", e),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    Ok(scheduler)
}
