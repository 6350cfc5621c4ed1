use super::broadcast::{self, BroadcastNotificationUseCase, BroadcastResult};
use crate::{
    error::GemschiError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use gemschihub_api_structs::send_notification::*;
use gemschihub_domain::PushMessage;
use gemschihub_infra::GemschiContext;
use std::collections::HashMap;

fn handle_error(e: UseCaseErrors) -> GemschiError {
    match e {
        UseCaseErrors::MissingField(field) => {
            GemschiError::BadClientData(format!("The field `{}` must not be empty", field))
        }
        UseCaseErrors::Broadcast(_) => GemschiError::InternalError,
    }
}

pub async fn send_notification_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<GemschiContext>,
) -> Result<HttpResponse, GemschiError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = SendCustomNotificationUseCase {
        title: body.title,
        body: body.body,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                success_count: res.success_count,
                failure_count: res.failure_count,
                removed_tokens: res.removed_tokens,
            })
        })
        .map_err(handle_error)
}

/// Free text announcement from a club admin
#[derive(Debug)]
pub struct SendCustomNotificationUseCase {
    pub title: String,
    pub body: String,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    MissingField(&'static str),
    Broadcast(broadcast::UseCaseErrors),
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendCustomNotificationUseCase {
    type Response = BroadcastResult;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "SendCustomNotification";

    async fn execute(&mut self, ctx: &GemschiContext) -> Result<Self::Response, Self::Errors> {
        let title = self.title.trim();
        let body = self.body.trim();
        if title.is_empty() {
            return Err(UseCaseErrors::MissingField("title"));
        }
        if body.is_empty() {
            return Err(UseCaseErrors::MissingField("body"));
        }

        let mut data = HashMap::new();
        data.insert("type".to_string(), "custom".to_string());
        let broadcast = BroadcastNotificationUseCase {
            message: PushMessage {
                title: title.to_string(),
                body: body.to_string(),
                data,
            },
        };

        execute(broadcast, ctx)
            .await
            .map_err(UseCaseErrors::Broadcast)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use gemschihub_domain::PushToken;
    use gemschihub_infra::InMemoryPushSender;
    use std::sync::Arc;

    #[actix_web::test]
    async fn rejects_blank_fields_before_sending() {
        let mut ctx = GemschiContext::create_inmemory();
        let sender = Arc::new(InMemoryPushSender::new());
        ctx.push = sender.clone();
        ctx.repos
            .push_tokens
            .insert_if_absent(&PushToken::new("device".into(), None, 0))
            .await
            .unwrap();

        let mut usecase = SendCustomNotificationUseCase {
            title: "  ".into(),
            body: "Apéro nach dem Training".into(),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseErrors::MissingField("title"))
        ));
        assert!(sender.sent().is_empty());

        let mut usecase = SendCustomNotificationUseCase {
            title: "Apéro".into(),
            body: "Apéro nach dem Training".into(),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.success_count, 1);

        let sent = sender.sent_messages();
        assert_eq!(sent[0].data.get("type").map(String::as_str), Some("custom"));
    }
}
