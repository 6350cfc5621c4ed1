use super::{DeliveryOutcome, IPushSender, MulticastReport};
use gemschihub_domain::PushMessage;
use tracing::info;

/// Used when no push credentials are configured
pub struct LogPushSender;

#[async_trait::async_trait]
impl IPushSender for LogPushSender {
    async fn send_multicast(
        &self,
        message: &PushMessage,
        tokens: &[String],
    ) -> anyhow::Result<MulticastReport> {
        info!(
            "[Push disabled] Would send {:?} to {} device(s)",
            message,
            tokens.len()
        );
        Ok(MulticastReport {
            outcomes: tokens
                .iter()
                .map(|t| (t.clone(), DeliveryOutcome::Delivered))
                .collect(),
        })
    }
}
