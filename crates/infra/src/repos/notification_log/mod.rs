mod inmemory;
mod postgres;

use gemschihub_domain::NotificationLogEntry;
pub use inmemory::InMemoryNotificationLogRepo;
pub use postgres::PostgresNotificationLogRepo;

/// Append only log of sent reminders, keyed by `(event_id, reminder_type)`
#[async_trait::async_trait]
pub trait INotificationLogRepo: Send + Sync {
    /// Atomically records the entry unless one with the same key exists.
    /// Returns `true` when this call created it.
    async fn claim(&self, entry: &NotificationLogEntry) -> anyhow::Result<bool>;
}
