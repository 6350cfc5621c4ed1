use super::INotificationLogRepo;
use crate::repos::shared::inmemory_repo::*;
use gemschihub_domain::NotificationLogEntry;

pub struct InMemoryNotificationLogRepo {
    entries: std::sync::Mutex<Vec<NotificationLogEntry>>,
}

impl InMemoryNotificationLogRepo {
    pub fn new() -> Self {
        Self {
            entries: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl INotificationLogRepo for InMemoryNotificationLogRepo {
    async fn claim(&self, entry: &NotificationLogEntry) -> anyhow::Result<bool> {
        Ok(insert_if_absent(entry, &self.entries, |e| {
            e.event_id == entry.event_id && e.reminder_type == entry.reminder_type
        }))
    }
}
