use crate::notification::broadcast::BroadcastNotificationUseCase;
use crate::shared::usecase::{execute, UseCase};
use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use futures::future::join_all;
use gemschihub_domain::{due_reminders, DueReminder, PushMessage, LOOKAHEAD_MILLIS};
use gemschihub_infra::GemschiContext;
use tracing::{error, info};

/// One pass of the reminder job: finds every event inside a reminder window
/// and notifies all devices once per event and window.
#[derive(Debug)]
pub struct SendEventRemindersUseCase;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReminderRunSummary {
    pub sent: usize,
    /// Already sent by an earlier run
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    InvalidTimestamp(i64),
    StorageError,
}

enum ReminderOutcome {
    Sent,
    Skipped,
    Failed,
}

fn local_date(ts: i64, tz: &Tz) -> Option<NaiveDate> {
    Utc.timestamp_millis_opt(ts)
        .single()
        .map(|dt| dt.with_timezone(tz).date_naive())
}

async fn process_reminder(due: &DueReminder, now: i64, ctx: &GemschiContext) -> ReminderOutcome {
    let entry = due.log_entry(now);
    match ctx.repos.notification_log.claim(&entry).await {
        Ok(true) => (),
        Ok(false) => return ReminderOutcome::Skipped,
        Err(e) => {
            error!(
                "Unable to claim {} reminder for event {}: {:?}",
                entry.reminder_type, entry.event_id, e
            );
            return ReminderOutcome::Failed;
        }
    }

    let broadcast = BroadcastNotificationUseCase {
        message: PushMessage::new(due.message(), due.data()),
    };
    match execute(broadcast, ctx).await {
        Ok(_) => ReminderOutcome::Sent,
        Err(e) => {
            // The claim stays, this reminder is not retried
            error!(
                "Sending {} reminder for event {} failed: {:?}",
                entry.reminder_type, entry.event_id, e
            );
            ReminderOutcome::Failed
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendEventRemindersUseCase {
    type Response = ReminderRunSummary;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "SendEventReminders";

    async fn execute(&mut self, ctx: &GemschiContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.get_timestamp_millis();
        let tz = ctx.config.timezone;
        let from = local_date(now, &tz).ok_or(UseCaseErrors::InvalidTimestamp(now))?;
        let to = local_date(now + LOOKAHEAD_MILLIS, &tz)
            .ok_or(UseCaseErrors::InvalidTimestamp(now))?;

        let events = ctx
            .repos
            .events
            .find_by_date_range(from, to)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        let due = due_reminders(&events, now, &tz);
        let outcomes = join_all(due.iter().map(|d| process_reminder(d, now, ctx))).await;

        let mut summary = ReminderRunSummary::default();
        for outcome in outcomes {
            match outcome {
                ReminderOutcome::Sent => summary.sent += 1,
                ReminderOutcome::Skipped => summary.skipped += 1,
                ReminderOutcome::Failed => summary.failed += 1,
            }
        }
        info!(
            "Reminder run checked {} event(s) between {} and {}: {:?}",
            events.len(),
            from,
            to,
            summary
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveTime;
    use gemschihub_domain::{Event, EventCategory, NotificationLogEntry, PushToken, ID};
    use gemschihub_infra::{INotificationLogRepo, InMemoryPushSender, StaticTimeSys};
    use std::sync::Arc;

    /// Log that cannot be written for one event
    struct BrokenLogForEvent(ID);

    #[async_trait::async_trait]
    impl INotificationLogRepo for BrokenLogForEvent {
        async fn claim(&self, entry: &NotificationLogEntry) -> anyhow::Result<bool> {
            if entry.event_id == self.0 {
                anyhow::bail!("connection reset");
            }
            Ok(true)
        }
    }

    const TZ: Tz = chrono_tz::Europe::Zurich;

    fn millis(day: u32, hour: u32, minute: u32) -> i64 {
        TZ.with_ymd_and_hms(2026, 6, day, hour, minute, 0)
            .unwrap()
            .timestamp_millis()
    }

    async fn setup(now: i64) -> (GemschiContext, Arc<InMemoryPushSender>) {
        let mut ctx = GemschiContext::create_inmemory();
        ctx.config.timezone = TZ;
        ctx.sys = Arc::new(StaticTimeSys(now));
        let sender = Arc::new(InMemoryPushSender::new());
        ctx.push = sender.clone();
        ctx.repos
            .push_tokens
            .insert_if_absent(&PushToken::new("device".into(), None, 0))
            .await
            .unwrap();
        (ctx, sender)
    }

    async fn insert_event(
        ctx: &GemschiContext,
        category: EventCategory,
        day: u32,
        hour: u32,
        minute: u32,
    ) -> Event {
        let mut e = Event::new(
            category,
            "Interclub Runde 5".into(),
            chrono::NaiveDate::from_ymd_opt(2026, 6, day).unwrap(),
            0,
        );
        e.time = NaiveTime::from_hms_opt(hour, minute, 0);
        e.location = Some("Tennisclub Gemsberg".into());
        ctx.repos.events.insert(&e).await.unwrap();
        e
    }

    #[actix_web::test]
    async fn sends_each_reminder_once() {
        let (ctx, sender) = setup(millis(10, 18, 0)).await;
        let e = insert_event(&ctx, EventCategory::Training, 10, 19, 5).await;

        let summary = SendEventRemindersUseCase.execute(&ctx).await.unwrap();
        assert_eq!(
            summary,
            ReminderRunSummary {
                sent: 1,
                skipped: 0,
                failed: 0
            }
        );

        let sent = sender.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].title, "🏃 In einer Stunde: Interclub Runde 5");
        assert_eq!(
            sent[0].data.get("eventId").map(String::as_str),
            Some(e.id.as_string().as_str())
        );
        assert_eq!(
            sent[0].data.get("reminderType").map(String::as_str),
            Some("1h")
        );

        let mut later = ctx.clone();
        later.sys = Arc::new(StaticTimeSys(millis(10, 18, 3)));
        let summary = SendEventRemindersUseCase.execute(&later).await.unwrap();
        assert_eq!(summary.sent, 0);
        assert_eq!(summary.skipped, 1);
        assert_eq!(sender.sent_messages().len(), 1);
    }

    #[actix_web::test]
    async fn day_before_reminder_reaches_into_tomorrow() {
        // 24h05m before an interclub match that starts tomorrow morning
        let (ctx, sender) = setup(millis(12, 8, 55)).await;
        insert_event(&ctx, EventCategory::Interclub, 13, 9, 0).await;
        insert_event(&ctx, EventCategory::Training, 13, 9, 0).await;

        let summary = SendEventRemindersUseCase.execute(&ctx).await.unwrap();
        assert_eq!(summary.sent, 1);
        let sent = sender.sent_messages();
        assert_eq!(sent[0].title, "🎾 Morgen: Interclub Runde 5");
        assert_eq!(
            sent[0].body,
            "Interclub am 13.06.2026, 09:00 Uhr — Tennisclub Gemsberg"
        );
    }

    #[actix_web::test]
    async fn failed_delivery_is_counted_and_not_retried() {
        let (ctx, sender) = setup(millis(10, 13, 0)).await;
        insert_event(&ctx, EventCategory::Spirit, 10, 19, 0).await;
        sender.set_unavailable(true);

        let summary = SendEventRemindersUseCase.execute(&ctx).await.unwrap();
        assert_eq!(summary.failed, 1);

        sender.set_unavailable(false);
        let summary = SendEventRemindersUseCase.execute(&ctx).await.unwrap();
        assert_eq!(summary.skipped, 1);
        assert!(sender.sent().is_empty());
    }

    #[actix_web::test]
    async fn one_failing_reminder_does_not_stop_the_others() {
        let (mut ctx, sender) = setup(millis(10, 18, 0)).await;
        let broken = insert_event(&ctx, EventCategory::Training, 10, 19, 0).await;
        let healthy = insert_event(&ctx, EventCategory::Training, 10, 19, 5).await;
        ctx.repos.notification_log = Arc::new(BrokenLogForEvent(broken.id.clone()));

        let summary = SendEventRemindersUseCase.execute(&ctx).await.unwrap();
        assert_eq!(
            summary,
            ReminderRunSummary {
                sent: 1,
                skipped: 0,
                failed: 1
            }
        );

        let sent = sender.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].data.get("eventId").map(String::as_str),
            Some(healthy.id.as_string().as_str())
        );
    }
}
