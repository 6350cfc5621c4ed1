use super::{DeliveryOutcome, IPushSender, MulticastReport};
use gemschihub_domain::PushMessage;
use std::sync::Mutex;

/// Records every multicast instead of delivering it. Tokens marked stale are
/// reported as unregistered.
#[derive(Default)]
pub struct InMemoryPushSender {
    sent: Mutex<Vec<(PushMessage, Vec<String>)>>,
    stale_tokens: Mutex<Vec<String>>,
    unavailable: Mutex<bool>,
}

impl InMemoryPushSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_stale(&self, token: &str) {
        if let Ok(mut stale) = self.stale_tokens.lock() {
            stale.push(token.to_string());
        }
    }

    /// Makes every following multicast fail as a whole
    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut flag) = self.unavailable.lock() {
            *flag = unavailable;
        }
    }

    pub fn sent(&self) -> Vec<(PushMessage, Vec<String>)> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn sent_messages(&self) -> Vec<PushMessage> {
        self.sent().into_iter().map(|(m, _)| m).collect()
    }
}

#[async_trait::async_trait]
impl IPushSender for InMemoryPushSender {
    async fn send_multicast(
        &self,
        message: &PushMessage,
        tokens: &[String],
    ) -> anyhow::Result<MulticastReport> {
        if self.unavailable.lock().map(|f| *f).unwrap_or(false) {
            return Err(anyhow::anyhow!("Push provider unavailable"));
        }
        let stale = self
            .stale_tokens
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default();
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((message.clone(), tokens.to_vec()));
        }

        Ok(MulticastReport {
            outcomes: tokens
                .iter()
                .map(|t| {
                    let outcome = if stale.contains(t) {
                        DeliveryOutcome::Unregistered
                    } else {
                        DeliveryOutcome::Delivered
                    };
                    (t.clone(), outcome)
                })
                .collect(),
        })
    }
}
