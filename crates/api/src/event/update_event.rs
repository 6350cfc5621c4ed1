use super::{subscribers::NotifyScoreChangesOnEventUpdated, EventUpdate};
use crate::{
    error::GemschiError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{NaiveDate, NaiveTime};
use gemschihub_api_structs::update_event::*;
use gemschihub_domain::{EventCategory, EventError, InterclubMatch, ID};
use gemschihub_infra::GemschiContext;

fn handle_error(e: UseCaseErrors) -> GemschiError {
    match e {
        UseCaseErrors::NotFound(event_id) => GemschiError::NotFound(format!(
            "The event with id: {}, was not found.",
            event_id
        )),
        UseCaseErrors::EmptyTitle => {
            GemschiError::BadClientData("The field `title` must not be empty".into())
        }
        UseCaseErrors::InvalidEvent(e) => GemschiError::BadClientData(e.to_string()),
        UseCaseErrors::StorageError => GemschiError::InternalError,
    }
}

pub async fn update_event_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    path_params: web::Path<PathParams>,
    ctx: web::Data<GemschiContext>,
) -> Result<HttpResponse, GemschiError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = UpdateEventUseCase {
        event_id: path_params.event_id.clone(),
        category: body.category,
        title: body.title,
        date: body.date,
        time: body.time,
        all_day: body.all_day,
        location: body.location,
        opponent: body.opponent,
        interclub: body.interclub,
    };

    execute(usecase, &ctx)
        .await
        .map(|update| HttpResponse::Ok().json(APIResponse::new(update.current)))
        .map_err(handle_error)
}

#[derive(Debug, Default)]
pub struct UpdateEventUseCase {
    pub event_id: ID,
    pub category: Option<EventCategory>,
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    /// `Some(None)` clears the time
    pub time: Option<Option<NaiveTime>>,
    pub all_day: Option<bool>,
    /// An empty location clears it
    pub location: Option<String>,
    pub opponent: Option<String>,
    /// Replaces the whole match. Totals and status are derived from its games.
    pub interclub: Option<InterclubMatch>,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound(ID),
    EmptyTitle,
    InvalidEvent(EventError),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateEventUseCase {
    type Response = EventUpdate;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "UpdateEvent";

    async fn execute(&mut self, ctx: &GemschiContext) -> Result<Self::Response, Self::Errors> {
        let UpdateEventUseCase {
            event_id,
            category,
            title,
            date,
            time,
            all_day,
            location,
            opponent,
            interclub,
        } = self;

        let previous = match ctx.repos.events.find(event_id).await {
            Some(event) => event,
            None => return Err(UseCaseErrors::NotFound(event_id.clone())),
        };
        let mut e = previous.clone();

        if let Some(title) = title {
            let title = title.trim();
            if title.is_empty() {
                return Err(UseCaseErrors::EmptyTitle);
            }
            e.title = title.to_string();
        }

        let category = category.unwrap_or(e.category);
        e.set_category(category, opponent.take());

        if let Some(date) = date {
            e.date = *date;
        }
        if let Some(time) = time {
            e.time = *time;
        }
        if let Some(all_day) = all_day {
            e.all_day = *all_day;
        }
        if let Some(location) = location.take() {
            e.location = Some(location).filter(|l| !l.trim().is_empty());
        }
        if let Some(interclub) = interclub.take() {
            e.set_interclub(interclub)
                .map_err(UseCaseErrors::InvalidEvent)?;
        }

        e.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .events
            .save(&e)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        Ok(EventUpdate {
            previous,
            current: e,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(NotifyScoreChangesOnEventUpdated)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use gemschihub_domain::{Event, MatchStatus, SetScore};

    async fn insert_event(ctx: &GemschiContext, category: EventCategory) -> Event {
        let e = Event::new(
            category,
            "Interclub Runde 2".into(),
            NaiveDate::from_ymd_opt(2026, 5, 9).unwrap(),
            0,
        );
        ctx.repos.events.insert(&e).await.unwrap();
        e
    }

    #[actix_web::test]
    async fn update_nonexisting_event() {
        let ctx = GemschiContext::create_inmemory();
        let mut usecase = UpdateEventUseCase {
            title: Some("Saisonabschluss".into()),
            ..Default::default()
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseErrors::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn replaced_match_is_recomputed() {
        let ctx = GemschiContext::create_inmemory();
        let e = insert_event(&ctx, EventCategory::Interclub).await;

        let mut interclub = InterclubMatch::new("TC Seeblick".into());
        for game in interclub.singles.iter_mut() {
            game.set1 = Some(SetScore::new(6, 1));
            game.set2 = Some(SetScore::new(6, 2));
        }
        // Stale client values must not survive
        interclub.status = MatchStatus::Played;

        let mut usecase = UpdateEventUseCase {
            event_id: e.id.clone(),
            interclub: Some(interclub),
            ..Default::default()
        };
        let update = usecase.execute(&ctx).await.unwrap();

        assert_eq!(update.previous, e);
        let m = update.current.interclub.unwrap();
        assert_eq!(m.total_score.our_score, 6);
        assert_eq!(m.status, MatchStatus::InProgress);
    }

    #[actix_web::test]
    async fn changing_category_drops_match() {
        let ctx = GemschiContext::create_inmemory();
        let e = insert_event(&ctx, EventCategory::Interclub).await;

        let mut usecase = UpdateEventUseCase {
            event_id: e.id.clone(),
            category: Some(EventCategory::Spirit),
            location: Some("".into()),
            ..Default::default()
        };
        let update = usecase.execute(&ctx).await.unwrap();
        assert!(update.current.interclub.is_none());
        assert!(update.current.location.is_none());

        let mut usecase = UpdateEventUseCase {
            event_id: e.id.clone(),
            interclub: Some(InterclubMatch::new("TC Seeblick".into())),
            ..Default::default()
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseErrors::InvalidEvent(EventError::NotInterclub))
        ));
    }

    #[actix_web::test]
    async fn rejects_match_without_fixed_layout() {
        let ctx = GemschiContext::create_inmemory();
        let e = insert_event(&ctx, EventCategory::Interclub).await;

        let mut interclub = InterclubMatch::new("TC Seeblick".into());
        interclub.singles.clear();
        let mut usecase = UpdateEventUseCase {
            event_id: e.id.clone(),
            interclub: Some(interclub),
            ..Default::default()
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseErrors::InvalidEvent(EventError::InvalidLayout))
        ));
        assert_eq!(ctx.repos.events.find(&e.id).await, Some(e));
    }

    #[actix_web::test]
    async fn time_can_be_kept_or_cleared() {
        let ctx = GemschiContext::create_inmemory();
        let mut e = insert_event(&ctx, EventCategory::Interclub).await;
        e.time = NaiveTime::from_hms_opt(13, 0, 0);
        ctx.repos.events.save(&e).await.unwrap();

        let mut usecase = UpdateEventUseCase {
            event_id: e.id.clone(),
            title: Some("Interclub Heimspiel".into()),
            ..Default::default()
        };
        let update = usecase.execute(&ctx).await.unwrap();
        assert_eq!(update.current.time, e.time);

        let mut usecase = UpdateEventUseCase {
            event_id: e.id.clone(),
            time: Some(None),
            ..Default::default()
        };
        let update = usecase.execute(&ctx).await.unwrap();
        assert_eq!(update.current.time, None);
        assert!(!update.current.all_day);
    }
}
