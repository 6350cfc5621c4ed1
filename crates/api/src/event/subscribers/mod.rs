use super::{update_event::UpdateEventUseCase, update_game::UpdateGameUseCase, EventUpdate};
use crate::notification::broadcast::BroadcastNotificationUseCase;
use crate::shared::usecase::{execute, Subscriber};
use gemschihub_domain::{detect_score_changes, PushMessage};
use gemschihub_infra::GemschiContext;
use tracing::info;

pub struct NotifyScoreChangesOnEventUpdated;

impl NotifyScoreChangesOnEventUpdated {
    async fn notify_changes(&self, update: &EventUpdate, ctx: &GemschiContext) {
        let changes = detect_score_changes(&update.previous, &update.current);
        if changes.is_empty() {
            return;
        }
        info!(
            "Event {} has {} score change(s) to announce",
            update.current.id,
            changes.len()
        );

        // Sequential so that devices receive them in game order
        for change in changes {
            let broadcast = BroadcastNotificationUseCase {
                message: PushMessage::new(change.message(), change.data(&update.current)),
            };
            // Sideeffect, ignore result
            let _ = execute(broadcast, ctx).await;
        }
    }
}

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateEventUseCase> for NotifyScoreChangesOnEventUpdated {
    async fn notify(&self, e: &EventUpdate, ctx: &GemschiContext) {
        self.notify_changes(e, ctx).await
    }
}

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateGameUseCase> for NotifyScoreChangesOnEventUpdated {
    async fn notify(&self, e: &EventUpdate, ctx: &GemschiContext) {
        self.notify_changes(e, ctx).await
    }
}
