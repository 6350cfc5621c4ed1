use crate::{APIResponse, BaseClient};
use gemschihub_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct PushTokenClient {
    base: Arc<BaseClient>,
}

impl PushTokenClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn register<T: Into<String>>(
        &self,
        token: T,
    ) -> APIResponse<register_push_token::APIResponse> {
        let body = register_push_token::RequestBody {
            token: token.into(),
        };
        self.base
            .post(body, "push-tokens".into(), StatusCode::OK)
            .await
    }

    pub async fn unregister<T: Into<String>>(
        &self,
        token: T,
    ) -> APIResponse<unregister_push_token::APIResponse> {
        let body = unregister_push_token::RequestBody {
            token: token.into(),
        };
        self.base
            .delete_with_body(body, "push-tokens".into(), StatusCode::OK)
            .await
    }
}
