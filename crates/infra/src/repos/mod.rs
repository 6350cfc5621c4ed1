mod event;
mod notification_log;
mod push_token;
mod shared;

use event::{IEventRepo, InMemoryEventRepo, PostgresEventRepo};
use notification_log::{InMemoryNotificationLogRepo, PostgresNotificationLogRepo};
use push_token::{IPushTokenRepo, InMemoryPushTokenRepo, PostgresPushTokenRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

pub use notification_log::INotificationLogRepo;
pub use shared::repo::DeleteResult;

#[derive(Clone)]
pub struct Repos {
    pub events: Arc<dyn IEventRepo>,
    pub push_tokens: Arc<dyn IPushTokenRepo>,
    pub notification_log: Arc<dyn INotificationLogRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB EXECUTING MIGRATION ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB EXECUTING MIGRATION ... [done]");

        Ok(Self {
            events: Arc::new(PostgresEventRepo::new(pool.clone())),
            push_tokens: Arc::new(PostgresPushTokenRepo::new(pool.clone())),
            notification_log: Arc::new(PostgresNotificationLogRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            events: Arc::new(InMemoryEventRepo::new()),
            push_tokens: Arc::new(InMemoryPushTokenRepo::new()),
            notification_log: Arc::new(InMemoryNotificationLogRepo::new()),
        }
    }
}
