use crate::{
    error::GemschiError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use gemschihub_api_structs::register_push_token::*;
use gemschihub_domain::PushToken;
use gemschihub_infra::GemschiContext;

fn handle_error(e: UseCaseErrors) -> GemschiError {
    match e {
        UseCaseErrors::MissingToken => {
            GemschiError::BadClientData("The field `token` must not be empty".into())
        }
        UseCaseErrors::StorageError => GemschiError::InternalError,
    }
}

pub async fn register_push_token_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<GemschiContext>,
) -> Result<HttpResponse, GemschiError> {
    let user = protect_route(&http_req, &ctx)?;

    let usecase = RegisterPushTokenUseCase {
        token: body.0.token,
        user_id: user.id,
    };

    execute(usecase, &ctx)
        .await
        .map(|(token, created)| {
            HttpResponse::Ok().json(APIResponse {
                token: token.token,
                created,
            })
        })
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct RegisterPushTokenUseCase {
    pub token: String,
    pub user_id: String,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    MissingToken,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for RegisterPushTokenUseCase {
    /// The token and whether it was newly registered
    type Response = (PushToken, bool);

    type Errors = UseCaseErrors;

    const NAME: &'static str = "RegisterPushToken";

    async fn execute(&mut self, ctx: &GemschiContext) -> Result<Self::Response, Self::Errors> {
        let token = self.token.trim();
        if token.is_empty() {
            return Err(UseCaseErrors::MissingToken);
        }

        let push_token = PushToken::new(
            token.to_string(),
            Some(self.user_id.clone()),
            ctx.sys.get_timestamp_millis(),
        );
        let created = ctx
            .repos
            .push_tokens
            .insert_if_absent(&push_token)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        Ok((push_token, created))
    }
}
