use super::{DeliveryOutcome, IPushSender, MulticastReport};
use crate::config::FcmConfig;
use futures::future::join_all;
use gemschihub_domain::PushMessage;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{error, warn};

const FCM_API_BASE_URL: &str = "https://fcm.googleapis.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Field named by a `BadRequest` violation when the registration token itself is rejected
const TOKEN_FIELD: &str = "message.token";

#[derive(Debug, Serialize)]
struct FcmNotification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct FcmMessage<'a> {
    token: &'a str,
    notification: FcmNotification<'a>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    data: &'a HashMap<String, String>,
}

#[derive(Debug, Serialize)]
struct FcmSendRequest<'a> {
    message: FcmMessage<'a>,
}

#[derive(Debug, Deserialize)]
struct FcmErrorResponse {
    error: FcmErrorBody,
}

#[derive(Debug, Deserialize)]
struct FcmErrorBody {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    details: Vec<FcmErrorDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FcmErrorDetail {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    field_violations: Vec<FcmFieldViolation>,
}

#[derive(Debug, Deserialize)]
struct FcmFieldViolation {
    #[serde(default)]
    field: String,
}

/// Sends through the Firebase Cloud Messaging HTTP v1 api, one request per
/// device token.
pub struct FcmPushSender {
    client: Client,
    send_url: String,
    access_token: String,
}

impl FcmPushSender {
    pub fn new(config: &FcmConfig) -> anyhow::Result<Self> {
        Self::with_timeout(config, REQUEST_TIMEOUT)
    }

    fn with_timeout(config: &FcmConfig, timeout: Duration) -> anyhow::Result<Self> {
        let base = config
            .endpoint
            .as_ref()
            .map(|url| url.as_str().trim_end_matches('/').to_string())
            .unwrap_or_else(|| FCM_API_BASE_URL.to_string());

        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            send_url: format!("{}/projects/{}/messages:send", base, config.project_id),
            access_token: config.access_token.clone(),
        })
    }

    async fn send(&self, message: &PushMessage, token: &str) -> DeliveryOutcome {
        let body = FcmSendRequest {
            message: FcmMessage {
                token,
                notification: FcmNotification {
                    title: &message.title,
                    body: &message.body,
                },
                data: &message.data,
            },
        };

        let res = match self
            .client
            .post(&self.send_url)
            .header("authorization", format!("Bearer {}", self.access_token))
            .json(&body)
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                error!("[Network Error] FCM send error. Error message: {:?}", e);
                return DeliveryOutcome::Failed(e.to_string());
            }
        };

        if res.status().is_success() {
            return DeliveryOutcome::Delivered;
        }

        let status = res.status();
        match res.json::<FcmErrorResponse>().await {
            Ok(err) => classify_error(&err.error),
            Err(e) => {
                warn!(
                    "[Unexpected Response] FCM returned {} without an error body: {:?}",
                    status, e
                );
                DeliveryOutcome::Failed(status.to_string())
            }
        }
    }
}

/// Only errors about the registration token itself make a token stale.
/// `INVALID_ARGUMENT` is also returned for a bad payload, which fails for every token.
fn classify_error(err: &FcmErrorBody) -> DeliveryOutcome {
    let code = err
        .details
        .iter()
        .find_map(|d| d.error_code.as_deref())
        .unwrap_or(err.status.as_str());
    let token_rejected = err
        .details
        .iter()
        .flat_map(|d| d.field_violations.iter())
        .any(|v| v.field == TOKEN_FIELD);

    match code {
        "UNREGISTERED" | "NOT_FOUND" => DeliveryOutcome::Unregistered,
        "INVALID_ARGUMENT" if token_rejected => DeliveryOutcome::InvalidToken,
        _ => DeliveryOutcome::Failed(format!("{}: {}", code, err.message)),
    }
}

#[async_trait::async_trait]
impl IPushSender for FcmPushSender {
    async fn send_multicast(
        &self,
        message: &PushMessage,
        tokens: &[String],
    ) -> anyhow::Result<MulticastReport> {
        let outcomes = join_all(tokens.iter().map(|t| self.send(message, t))).await;

        Ok(MulticastReport {
            outcomes: tokens.iter().cloned().zip(outcomes).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> FcmErrorBody {
        serde_json::from_str::<FcmErrorResponse>(json).unwrap().error
    }

    #[test]
    fn classifies_provider_errors() {
        let unregistered = parse(
            r#"{"error": {"code": 404, "message": "Requested entity was not found.", "status": "NOT_FOUND",
                "details": [{"@type": "type.googleapis.com/google.firebase.fcm.v1.FcmError", "errorCode": "UNREGISTERED"}]}}"#,
        );
        assert_eq!(classify_error(&unregistered), DeliveryOutcome::Unregistered);

        let invalid = parse(
            r#"{"error": {"code": 400, "message": "The registration token is not a valid FCM registration token", "status": "INVALID_ARGUMENT",
                "details": [{"@type": "type.googleapis.com/google.rpc.BadRequest", "fieldViolations": [{"field": "message.token", "description": "Invalid registration token"}]}]}}"#,
        );
        assert_eq!(classify_error(&invalid), DeliveryOutcome::InvalidToken);

        let bad_payload = parse(
            r#"{"error": {"code": 400, "message": "Invalid JSON payload received.", "status": "INVALID_ARGUMENT",
                "details": [{"@type": "type.googleapis.com/google.rpc.BadRequest", "fieldViolations": [{"field": "message.data"}]}]}}"#,
        );
        let outcome = classify_error(&bad_payload);
        assert_eq!(
            outcome,
            DeliveryOutcome::Failed("INVALID_ARGUMENT: Invalid JSON payload received.".into())
        );
        assert!(!outcome.is_stale());

        let no_details = parse(
            r#"{"error": {"code": 400, "message": "Request contains an invalid argument.", "status": "INVALID_ARGUMENT"}}"#,
        );
        assert!(!classify_error(&no_details).is_stale());

        let quota = parse(
            r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED",
                "details": [{"errorCode": "QUOTA_EXCEEDED"}]}}"#,
        );
        assert_eq!(
            classify_error(&quota),
            DeliveryOutcome::Failed("QUOTA_EXCEEDED: Quota exceeded".into())
        );
    }

    #[test]
    fn builds_send_url() {
        let sender = FcmPushSender::new(&FcmConfig {
            project_id: "gemschi".into(),
            access_token: "secret".into(),
            endpoint: None,
        })
        .unwrap();
        assert_eq!(
            sender.send_url,
            "https://fcm.googleapis.com/v1/projects/gemschi/messages:send"
        );

        let sender = FcmPushSender::new(&FcmConfig {
            project_id: "gemschi".into(),
            access_token: "secret".into(),
            endpoint: Some(url::Url::parse("http://localhost:9099/v1/").unwrap()),
        })
        .unwrap();
        assert_eq!(
            sender.send_url,
            "http://localhost:9099/v1/projects/gemschi/messages:send"
        );
    }

    #[tokio::test]
    async fn unresponsive_provider_times_out() {
        // Accepts connections but never answers
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let endpoint = format!("http://127.0.0.1:{}/v1", port);
        let sender = FcmPushSender::with_timeout(
            &FcmConfig {
                project_id: "gemschi".into(),
                access_token: "secret".into(),
                endpoint: Some(url::Url::parse(&endpoint).unwrap()),
            },
            Duration::from_millis(200),
        )
        .unwrap();

        let message = PushMessage::new(
            gemschihub_domain::RenderedMessage {
                title: "Training".into(),
                body: "Heute".into(),
            },
            HashMap::new(),
        );
        let tokens = vec!["device".to_string()];
        let report = tokio::time::timeout(
            Duration::from_secs(5),
            sender.send_multicast(&message, &tokens),
        )
        .await
        .expect("send to give up after the request timeout")
        .unwrap();

        assert_eq!(report.failure_count(), 1);
        assert!(report.stale_tokens().is_empty());
        drop(listener);
    }
}
