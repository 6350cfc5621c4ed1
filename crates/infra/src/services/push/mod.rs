mod fcm;
mod inmemory;
mod log;

use gemschihub_domain::PushMessage;

pub use fcm::FcmPushSender;
pub use inmemory::InMemoryPushSender;
pub use log::LogPushSender;

/// Result of delivering one message to one device token
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryOutcome {
    Delivered,
    /// The app was uninstalled or the token expired
    Unregistered,
    /// The provider does not recognize the token format
    InvalidToken,
    Failed(String),
}

impl DeliveryOutcome {
    /// Whether the token should be removed from the registry
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Unregistered | Self::InvalidToken)
    }
}

/// Per token outcomes of one multicast, in the order the tokens were given
#[derive(Debug, Clone, Default)]
pub struct MulticastReport {
    pub outcomes: Vec<(String, DeliveryOutcome)>,
}

impl MulticastReport {
    pub fn success_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == DeliveryOutcome::Delivered)
            .count()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    pub fn stale_tokens(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter(|(_, o)| o.is_stale())
            .map(|(token, _)| token.clone())
            .collect()
    }
}

#[async_trait::async_trait]
pub trait IPushSender: Send + Sync {
    /// Sends the same message to every token. Errors are reserved for failures
    /// that prevented the whole multicast, per token problems end up in the report.
    async fn send_multicast(
        &self,
        message: &PushMessage,
        tokens: &[String],
    ) -> anyhow::Result<MulticastReport>;
}
