use chrono::{NaiveDate, NaiveTime};
use gemschihub_domain::{date::hh_mm, Event, EventCategory, InterclubMatch, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventDTO {
    pub id: ID,
    pub category: EventCategory,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, with = "hh_mm")]
    pub time: Option<NaiveTime>,
    pub all_day: bool,
    pub location: Option<String>,
    pub interclub: Option<InterclubMatch>,
    pub created: i64,
    pub updated: i64,
}

impl EventDTO {
    pub fn new(event: Event) -> Self {
        Self {
            id: event.id.clone(),
            category: event.category,
            title: event.title,
            date: event.date,
            time: event.time,
            all_day: event.all_day,
            location: event.location,
            interclub: event.interclub,
            created: event.created,
            updated: event.updated,
        }
    }
}
