use super::IPushTokenRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use gemschihub_domain::PushToken;

pub struct InMemoryPushTokenRepo {
    tokens: std::sync::Mutex<Vec<PushToken>>,
}

impl InMemoryPushTokenRepo {
    pub fn new() -> Self {
        Self {
            tokens: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IPushTokenRepo for InMemoryPushTokenRepo {
    async fn insert_if_absent(&self, token: &PushToken) -> anyhow::Result<bool> {
        Ok(insert_if_absent(token, &self.tokens, |t| {
            t.token == token.token
        }))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<PushToken>> {
        Ok(find_by(&self.tokens, |_| true))
    }

    async fn delete_by_token(&self, token: &str) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.tokens, |t| t.token == token))
    }

    async fn delete_many(&self, tokens: &[String]) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.tokens, |t| tokens.contains(&t.token)))
    }
}
