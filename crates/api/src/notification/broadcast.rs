use crate::shared::usecase::UseCase;
use gemschihub_domain::PushMessage;
use gemschihub_infra::GemschiContext;
use tracing::{error, info};

/// At most this many stale tokens are deleted per storage call
const PRUNE_CHUNK_SIZE: usize = 10;

/// Sends one message to every registered device and prunes the tokens the
/// provider reported as stale.
#[derive(Debug)]
pub struct BroadcastNotificationUseCase {
    pub message: PushMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BroadcastResult {
    pub success_count: usize,
    pub failure_count: usize,
    pub removed_tokens: usize,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError,
    ProviderError(String),
}

#[async_trait::async_trait(?Send)]
impl UseCase for BroadcastNotificationUseCase {
    type Response = BroadcastResult;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "BroadcastNotification";

    async fn execute(&mut self, ctx: &GemschiContext) -> Result<Self::Response, Self::Errors> {
        let tokens = ctx
            .repos
            .push_tokens
            .find_all()
            .await
            .map_err(|_| UseCaseErrors::StorageError)?
            .into_iter()
            .map(|t| t.token)
            .collect::<Vec<_>>();

        if tokens.is_empty() {
            info!("No registered devices, skipping broadcast of: {}", self.message.title);
            return Ok(Default::default());
        }

        let report = ctx
            .push
            .send_multicast(&self.message, &tokens)
            .await
            .map_err(|e| UseCaseErrors::ProviderError(e.to_string()))?;

        let mut removed_tokens = 0;
        for chunk in report.stale_tokens().chunks(PRUNE_CHUNK_SIZE) {
            match ctx.repos.push_tokens.delete_many(chunk).await {
                Ok(res) => removed_tokens += res.deleted_count as usize,
                Err(e) => error!("Unable to remove stale push tokens: {:?}", e),
            }
        }

        let res = BroadcastResult {
            success_count: report.success_count(),
            failure_count: report.failure_count(),
            removed_tokens,
        };
        info!("Broadcast of {} finished: {:?}", self.message.title, res);
        Ok(res)
    }
}
