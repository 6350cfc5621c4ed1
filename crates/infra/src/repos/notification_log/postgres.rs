use super::INotificationLogRepo;
use gemschihub_domain::NotificationLogEntry;
use sqlx::PgPool;
use tracing::error;

pub struct PostgresNotificationLogRepo {
    pool: PgPool,
}

impl PostgresNotificationLogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl INotificationLogRepo for PostgresNotificationLogRepo {
    async fn claim(&self, entry: &NotificationLogEntry) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO notification_log(event_uid, reminder_type, sent_at)
            VALUES($1, $2, $3)
            ON CONFLICT (event_uid, reminder_type) DO NOTHING
            "#,
        )
        .bind(entry.event_id.inner_ref())
        .bind(&entry.reminder_type)
        .bind(entry.sent_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to write notification log entry: {:?}. DB returned error: {:?}",
                entry, e
            );
            e
        })?;

        Ok(res.rows_affected() == 1)
    }
}
