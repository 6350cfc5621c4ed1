use crate::{
    error::GemschiError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use gemschihub_api_structs::unregister_push_token::*;
use gemschihub_infra::GemschiContext;

fn handle_error(e: UseCaseErrors) -> GemschiError {
    match e {
        UseCaseErrors::MissingToken => {
            GemschiError::BadClientData("The field `token` must not be empty".into())
        }
        UseCaseErrors::StorageError => GemschiError::InternalError,
    }
}

pub async fn unregister_push_token_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<GemschiContext>,
) -> Result<HttpResponse, GemschiError> {
    protect_route(&http_req, &ctx)?;

    let usecase = UnregisterPushTokenUseCase {
        token: body.0.token,
    };

    execute(usecase, &ctx)
        .await
        .map(|deleted_count| HttpResponse::Ok().json(APIResponse { deleted_count }))
        .map_err(handle_error)
}

/// Removes every record holding the token, regardless of who registered it
#[derive(Debug)]
pub struct UnregisterPushTokenUseCase {
    pub token: String,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    MissingToken,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UnregisterPushTokenUseCase {
    type Response = i64;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "UnregisterPushToken";

    async fn execute(&mut self, ctx: &GemschiContext) -> Result<Self::Response, Self::Errors> {
        let token = self.token.trim();
        if token.is_empty() {
            return Err(UseCaseErrors::MissingToken);
        }

        ctx.repos
            .push_tokens
            .delete_by_token(token)
            .await
            .map(|res| res.deleted_count)
            .map_err(|_| UseCaseErrors::StorageError)
    }
}
