use crate::{
    error::GemschiError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::NaiveDate;
use gemschihub_api_structs::get_events::*;
use gemschihub_domain::Event;
use gemschihub_infra::GemschiContext;

fn handle_error(e: UseCaseErrors) -> GemschiError {
    match e {
        UseCaseErrors::InvalidDateRange => GemschiError::BadClientData(
            "The provided date range is invalid, `from` must not be after `to`".into(),
        ),
        UseCaseErrors::StorageError => GemschiError::InternalError,
    }
}

pub async fn get_events_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<GemschiContext>,
) -> Result<HttpResponse, GemschiError> {
    protect_route(&http_req, &ctx)?;

    let usecase = GetEventsUseCase {
        from: query_params.from,
        to: query_params.to,
    };

    execute(usecase, &ctx)
        .await
        .map(|events| HttpResponse::Ok().json(APIResponse::new(events)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct GetEventsUseCase {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    InvalidDateRange,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventsUseCase {
    type Response = Vec<Event>;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "GetEvents";

    async fn execute(&mut self, ctx: &GemschiContext) -> Result<Self::Response, Self::Errors> {
        if self.from > self.to {
            return Err(UseCaseErrors::InvalidDateRange);
        }

        ctx.repos
            .events
            .find_by_date_range(self.from, self.to)
            .await
            .map_err(|_| UseCaseErrors::StorageError)
    }
}
