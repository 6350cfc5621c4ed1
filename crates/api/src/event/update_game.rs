use super::{subscribers::NotifyScoreChangesOnEventUpdated, EventUpdate};
use crate::{
    error::GemschiError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use gemschihub_api_structs::update_game::*;
use gemschihub_domain::{EventError, SetScore, ID};
use gemschihub_infra::GemschiContext;

fn handle_error(e: UseCaseErrors) -> GemschiError {
    match e {
        UseCaseErrors::NotFound(event_id) => GemschiError::NotFound(format!(
            "The event with id: {}, was not found.",
            event_id
        )),
        UseCaseErrors::InvalidGame(EventError::UnknownGame(game_number)) => {
            GemschiError::NotFound(format!("The game: {}, was not found.", game_number))
        }
        UseCaseErrors::InvalidGame(e) => GemschiError::BadClientData(e.to_string()),
        UseCaseErrors::StorageError => GemschiError::InternalError,
    }
}

pub async fn update_game_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    path_params: web::Path<PathParams>,
    ctx: web::Data<GemschiContext>,
) -> Result<HttpResponse, GemschiError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = UpdateGameUseCase {
        event_id: path_params.event_id.clone(),
        game_number: path_params.game_number,
        players: body.players,
        sets: body.sets,
    };

    execute(usecase, &ctx)
        .await
        .map(|update| HttpResponse::Ok().json(APIResponse::new(update.current)))
        .map_err(handle_error)
}

/// Enters the result of a single interclub game
#[derive(Debug)]
pub struct UpdateGameUseCase {
    pub event_id: ID,
    pub game_number: u32,
    pub players: Option<Vec<String>>,
    pub sets: Vec<SetScore>,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound(ID),
    InvalidGame(EventError),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateGameUseCase {
    type Response = EventUpdate;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "UpdateGame";

    async fn execute(&mut self, ctx: &GemschiContext) -> Result<Self::Response, Self::Errors> {
        let previous = match ctx.repos.events.find(&self.event_id).await {
            Some(event) => event,
            None => return Err(UseCaseErrors::NotFound(self.event_id.clone())),
        };
        let mut e = previous.clone();

        e.set_game_result(
            self.game_number,
            self.players.take(),
            std::mem::take(&mut self.sets),
        )
        .map_err(UseCaseErrors::InvalidGame)?;
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
    use chrono::NaiveDate;
    use gemschihub_domain::{Event, EventCategory, MatchStatus, PushToken};
    use gemschihub_infra::InMemoryPushSender;
    use std::sync::Arc;

    async fn setup() -> (GemschiContext, Arc<InMemoryPushSender>, Event) {
        let mut ctx = GemschiContext::create_inmemory();
        let sender = Arc::new(InMemoryPushSender::new());
        ctx.push = sender.clone();
        ctx.repos
            .push_tokens
            .insert_if_absent(&PushToken::new("device".into(), None, 0))
            .await
            .unwrap();

        let mut e = Event::new(
            EventCategory::Interclub,
            "Interclub Runde 4".into(),
            NaiveDate::from_ymd_opt(2026, 5, 23).unwrap(),
            0,
        );
        e.set_category(EventCategory::Interclub, Some("TC Seeblick".into()));
        ctx.repos.events.insert(&e).await.unwrap();
        (ctx, sender, e)
    }

    fn won(game_number: u32, e: &Event) -> UpdateGameUseCase {
        UpdateGameUseCase {
            event_id: e.id.clone(),
            game_number,
            players: Some(vec!["Anna".into()]),
            sets: vec![SetScore::new(6, 3), SetScore::new(6, 4)],
        }
    }

    #[actix_web::test]
    async fn completed_game_is_broadcast() {
        let (ctx, sender, e) = setup().await;

        let update = execute(won(2, &e), &ctx).await.unwrap();
        let m = update.current.interclub.unwrap();
        assert_eq!(m.total_score.our_score, 1);
        assert_eq!(m.status, MatchStatus::InProgress);

        let sent = sender.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].title, "🎾 Einzel 2 gewonnen!");
        assert_eq!(
            sent[0].body,
            "Anna 6:3 6:4 gegen TC Seeblick. Zwischenstand 1:0"
        );
        assert_eq!(sent[0].data.get("gameNumber").map(String::as_str), Some("2"));

        // Entering the same result again is not news
        execute(won(2, &e), &ctx).await.unwrap();
        assert_eq!(sender.sent_messages().len(), 1);
    }

    #[actix_web::test]
    async fn final_result_replaces_game_notification() {
        let (ctx, sender, e) = setup().await;
        for game_number in 1..=8 {
            execute(won(game_number, &e), &ctx).await.unwrap();
        }
        assert_eq!(sender.sent_messages().len(), 8);

        execute(won(9, &e), &ctx).await.unwrap();
        let sent = sender.sent_messages();
        assert_eq!(sent.len(), 9);
        assert_eq!(sent[8].title, "🏆 Sieg gegen TC Seeblick!");
        assert_eq!(sent[8].body, "Endstand 9:0. Hopp Gemschi!");
        assert_eq!(
            sent[8].data.get("type").map(String::as_str),
            Some("interclub_final")
        );
    }

    #[actix_web::test]
    async fn unknown_game_is_rejected() {
        let (ctx, sender, e) = setup().await;
        let res = execute(won(10, &e), &ctx).await;
        assert!(matches!(
            res,
            Err(UseCaseErrors::InvalidGame(EventError::UnknownGame(10)))
        ));
        assert!(sender.sent().is_empty());
    }
}
