use crate::dtos::EventDTO;
use chrono::{NaiveDate, NaiveTime};
use gemschihub_domain::{
    date::{hh_mm, hh_mm_patch},
    Event, EventCategory, InterclubMatch, SetScore, ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub event: EventDTO,
}

impl EventResponse {
    pub fn new(event: Event) -> Self {
        Self {
            event: EventDTO::new(event),
        }
    }
}

pub mod create_event {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub category: EventCategory,
        pub title: String,
        pub date: NaiveDate,
        #[serde(default, with = "hh_mm")]
        pub time: Option<NaiveTime>,
        #[serde(default)]
        pub all_day: Option<bool>,
        #[serde(default)]
        pub location: Option<String>,
        /// Only used for Interclub events
        #[serde(default)]
        pub opponent: Option<String>,
    }

    pub type APIResponse = EventResponse;
}

pub mod get_event {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = EventResponse;
}

pub mod get_events {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub from: NaiveDate,
        pub to: NaiveDate,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub events: Vec<EventDTO>,
    }

    impl APIResponse {
        pub fn new(events: Vec<Event>) -> Self {
            Self {
                events: events.into_iter().map(EventDTO::new).collect(),
            }
        }
    }
}

pub mod update_event {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    /// Every field is optional, absent fields are left untouched
    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub category: Option<EventCategory>,
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub date: Option<NaiveDate>,
        /// `null` clears the time
        #[serde(default, skip_serializing_if = "Option::is_none", with = "hh_mm_patch")]
        pub time: Option<Option<NaiveTime>>,
        #[serde(default)]
        pub all_day: Option<bool>,
        #[serde(default)]
        pub location: Option<String>,
        #[serde(default)]
        pub opponent: Option<String>,
        #[serde(default)]
        pub interclub: Option<InterclubMatch>,
    }

    pub type APIResponse = EventResponse;
}

pub mod update_game {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PathParams {
        pub event_id: ID,
        pub game_number: u32,
    }

    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub players: Option<Vec<String>>,
        /// Played sets in order, at most three
        #[serde(default)]
        pub sets: Vec<SetScore>,
    }

    pub type APIResponse = EventResponse;
}

pub mod delete_event {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = EventResponse;
}
