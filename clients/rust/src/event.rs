use crate::{APIResponse, BaseClient};
use crate::{EventCategory, InterclubMatch, SetScore, ID};
use chrono::{NaiveDate, NaiveTime};
use gemschihub_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct EventClient {
    base: Arc<BaseClient>,
}

pub struct CreateEventInput {
    pub category: EventCategory,
    pub title: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub all_day: Option<bool>,
    pub location: Option<String>,
    pub opponent: Option<String>,
}

pub struct GetEventsInput {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Default)]
pub struct UpdateEventInput {
    pub event_id: ID,
    pub category: Option<EventCategory>,
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    /// `Some(None)` clears the time
    pub time: Option<Option<NaiveTime>>,
    pub all_day: Option<bool>,
    pub location: Option<String>,
    pub opponent: Option<String>,
    pub interclub: Option<InterclubMatch>,
}

pub struct UpdateGameInput {
    pub event_id: ID,
    pub game_number: u32,
    pub players: Option<Vec<String>>,
    pub sets: Vec<SetScore>,
}

impl EventClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateEventInput) -> APIResponse<create_event::APIResponse> {
        let body = create_event::RequestBody {
            category: input.category,
            title: input.title,
            date: input.date,
            time: input.time,
            all_day: input.all_day,
            location: input.location,
            opponent: input.opponent,
        };

        self.base
            .post(body, "events".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, event_id: ID) -> APIResponse<get_event::APIResponse> {
        self.base
            .get(format!("events/{}", event_id), StatusCode::OK)
            .await
    }

    pub async fn get_by_date_range(
        &self,
        input: GetEventsInput,
    ) -> APIResponse<get_events::APIResponse> {
        self.base
            .get(
                format!("events?from={}&to={}", input.from, input.to),
                StatusCode::OK,
            )
            .await
    }

    pub async fn update(&self, input: UpdateEventInput) -> APIResponse<update_event::APIResponse> {
        let event_id = input.event_id.clone();
        let body = update_event::RequestBody {
            category: input.category,
            title: input.title,
            date: input.date,
            time: input.time,
            all_day: input.all_day,
            location: input.location,
            opponent: input.opponent,
            interclub: input.interclub,
        };
        self.base
            .put(body, format!("events/{}", event_id), StatusCode::OK)
            .await
    }

    pub async fn update_game(
        &self,
        input: UpdateGameInput,
    ) -> APIResponse<update_game::APIResponse> {
        let body = update_game::RequestBody {
            players: input.players,
            sets: input.sets,
        };
        self.base
            .put(
                body,
                format!("events/{}/games/{}", input.event_id, input.game_number),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, event_id: ID) -> APIResponse<delete_event::APIResponse> {
        self.base
            .delete(format!("events/{}", event_id), StatusCode::OK)
            .await
    }
}
