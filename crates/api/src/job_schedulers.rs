use crate::{
    reminder::send_event_reminders::SendEventRemindersUseCase, shared::usecase::execute,
};
use actix_web::rt::time::{interval, sleep_until, Instant};
use gemschihub_infra::GemschiContext;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::warn;

/// Seconds until the next multiple of `interval_secs` on the wall clock
pub fn get_start_delay(now_ts: usize, interval_secs: usize) -> usize {
    interval_secs - (now_ts / 1000) % interval_secs
}

pub fn start_send_reminders_job(ctx: GemschiContext) {
    actix_web::rt::spawn(async move {
        let interval_secs = ctx.config.reminder_interval_secs.max(1);
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, interval_secs as usize);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        sleep_until(start).await;
        let running = Arc::new(Mutex::new(()));
        let mut reminder_interval = interval(Duration::from_secs(interval_secs));
        loop {
            reminder_interval.tick().await;
            let guard = match running.clone().try_lock_owned() {
                Ok(guard) => guard,
                Err(_) => {
                    warn!("Previous reminder run is still in progress, skipping this tick");
                    continue;
                }
            };
            let context = ctx.clone();
            actix_web::rt::spawn(async move {
                let _ = execute(SendEventRemindersUseCase, &context).await;
                drop(guard);
            });
        }
    });
}
