use crate::{APIResponse, BaseClient};
use gemschihub_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct NotificationClient {
    base: Arc<BaseClient>,
}

impl NotificationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Broadcasts a free text message to every registered device
    pub async fn send<T: Into<String>, B: Into<String>>(
        &self,
        title: T,
        body: B,
    ) -> APIResponse<send_notification::APIResponse> {
        let body = send_notification::RequestBody {
            title: title.into(),
            body: body.into(),
        };
        self.base
            .post(body, "notifications".into(), StatusCode::OK)
            .await
    }
}
