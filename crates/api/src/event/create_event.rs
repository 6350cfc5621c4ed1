use crate::{
    error::GemschiError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{NaiveDate, NaiveTime};
use gemschihub_api_structs::create_event::*;
use gemschihub_domain::{Event, EventCategory};
use gemschihub_infra::GemschiContext;

fn handle_error(e: UseCaseErrors) -> GemschiError {
    match e {
        UseCaseErrors::EmptyTitle => {
            GemschiError::BadClientData("The field `title` must not be empty".into())
        }
        UseCaseErrors::StorageError => GemschiError::InternalError,
    }
}

pub async fn create_event_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<GemschiContext>,
) -> Result<HttpResponse, GemschiError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = CreateEventUseCase {
        category: body.category,
        title: body.title,
        date: body.date,
        time: body.time,
        all_day: body.all_day.unwrap_or(false),
        location: body.location,
        opponent: body.opponent,
    };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Created().json(APIResponse::new(event)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct CreateEventUseCase {
    pub category: EventCategory,
    pub title: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub all_day: bool,
    pub location: Option<String>,
    pub opponent: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    EmptyTitle,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateEventUseCase {
    type Response = Event;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "CreateEvent";

    async fn execute(&mut self, ctx: &GemschiContext) -> Result<Self::Response, Self::Errors> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(UseCaseErrors::EmptyTitle);
        }

        let mut e = Event::new(
            self.category,
            title.to_string(),
            self.date,
            ctx.sys.get_timestamp_millis(),
        );
        e.time = self.time;
        e.all_day = self.all_day;
        e.location = self.location.take().filter(|l| !l.trim().is_empty());
        e.set_category(self.category, self.opponent.take());

        ctx.repos
            .events
            .insert(&e)
            .await
            .map(|_| e)
            .map_err(|_| UseCaseErrors::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use gemschihub_domain::MatchStatus;
    use gemschihub_infra::StaticTimeSys;
    use std::sync::Arc;

    fn usecase(category: EventCategory) -> CreateEventUseCase {
        CreateEventUseCase {
            category,
            title: "Interclub Runde 3".into(),
            date: NaiveDate::from_ymd_opt(2026, 5, 16).unwrap(),
            time: NaiveTime::from_hms_opt(13, 30, 0),
            all_day: false,
            location: Some("Tennisclub Gemsberg".into()),
            opponent: Some("TC Seeblick".into()),
        }
    }

    #[actix_web::test]
    async fn creates_interclub_event_with_empty_match() {
        let mut ctx = GemschiContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(1000));

        let e = usecase(EventCategory::Interclub).execute(&ctx).await.unwrap();
        assert_eq!(e.created, 1000);
        let m = e.interclub.as_ref().unwrap();
        assert_eq!(m.opponent, "TC Seeblick");
        assert_eq!(m.status, MatchStatus::Open);
        assert_eq!(m.games().count(), 9);

        assert_eq!(ctx.repos.events.find(&e.id).await, Some(e));
    }

    #[actix_web::test]
    async fn other_categories_have_no_match() {
        let ctx = GemschiContext::create_inmemory();
        let e = usecase(EventCategory::Training).execute(&ctx).await.unwrap();
        assert!(e.interclub.is_none());
    }

    #[actix_web::test]
    async fn rejects_blank_title() {
        let ctx = GemschiContext::create_inmemory();
        let mut usecase = usecase(EventCategory::Spirit);
        usecase.title = " ".into();
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseErrors::EmptyTitle)
        ));
    }
}
