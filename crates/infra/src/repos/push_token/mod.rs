mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
use gemschihub_domain::PushToken;
pub use inmemory::InMemoryPushTokenRepo;
pub use postgres::PostgresPushTokenRepo;

#[async_trait::async_trait]
pub trait IPushTokenRepo: Send + Sync {
    /// Stores the token unless the exact same token is already registered.
    /// Returns whether a new record was created.
    async fn insert_if_absent(&self, token: &PushToken) -> anyhow::Result<bool>;
    async fn find_all(&self) -> anyhow::Result<Vec<PushToken>>;
    async fn delete_by_token(&self, token: &str) -> anyhow::Result<DeleteResult>;
    async fn delete_many(&self, tokens: &[String]) -> anyhow::Result<DeleteResult>;
}
