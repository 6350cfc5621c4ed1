use crate::{
    date::hh_mm,
    interclub::InterclubMatch,
    shared::entity::{Entity, ID},
};
use chrono::{prelude::*, LocalResult};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Start time assumed for all-day events and events without a time
pub const DEFAULT_START_HOUR: u32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Training,
    Interclub,
    Spirit,
}

impl EventCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Training => "Training",
            Self::Interclub => "Interclub",
            Self::Spirit => "Spirit",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Training => "🏃",
            Self::Interclub => "🎾",
            Self::Spirit => "🍻",
        }
    }
}

impl std::str::FromStr for EventCategory {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Training" => Ok(Self::Training),
            "Interclub" => Ok(Self::Interclub),
            "Spirit" => Ok(Self::Spirit),
            _ => Err(EventError::UnknownCategory(s.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum EventError {
    #[error("Unknown event category: {0}")]
    UnknownCategory(String),
    #[error("Game number {0} does not exist in an interclub match")]
    UnknownGame(u32),
    #[error("A game has at most three sets, got {0}")]
    TooManySets(usize),
    #[error("The event is not an interclub match")]
    NotInterclub,
    #[error("An interclub match needs singles 1 to 6 and doubles 7 to 9")]
    InvalidLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: ID,
    pub category: EventCategory,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, with = "hh_mm")]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub interclub: Option<InterclubMatch>,
    pub created: i64,
    pub updated: i64,
}

impl Entity for Event {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Event {
    pub fn new(category: EventCategory, title: String, date: NaiveDate, now: i64) -> Self {
        let mut e = Self {
            id: Default::default(),
            category,
            title,
            date,
            time: None,
            all_day: false,
            location: None,
            interclub: None,
            created: now,
            updated: now,
        };
        e.set_category(category, None);
        e
    }

    /// Changes the category and keeps the match sub-record consistent with it.
    /// An Interclub event without a match gets an empty one against `opponent`.
    pub fn set_category(&mut self, category: EventCategory, opponent: Option<String>) {
        self.category = category;
        if category != EventCategory::Interclub {
            self.interclub = None;
            return;
        }
        match self.interclub.as_mut() {
            Some(m) => {
                if let Some(opponent) = opponent {
                    m.opponent = opponent;
                }
            }
            None => {
                self.interclub = Some(InterclubMatch::new(opponent.unwrap_or_default()));
            }
        }
    }

    /// Replaces the whole match sub-record. Totals and status are always recomputed.
    pub fn set_interclub(&mut self, mut interclub: InterclubMatch) -> Result<(), EventError> {
        if self.category != EventCategory::Interclub {
            return Err(EventError::NotInterclub);
        }
        if !interclub.normalize_layout() {
            return Err(EventError::InvalidLayout);
        }
        interclub.recompute();
        self.interclub = Some(interclub);
        Ok(())
    }

    /// Overwrites one game's players and set results, then recomputes the match.
    pub fn set_game_result(
        &mut self,
        game_number: u32,
        players: Option<Vec<String>>,
        sets: Vec<crate::SetScore>,
    ) -> Result<(), EventError> {
        if sets.len() > 3 {
            return Err(EventError::TooManySets(sets.len()));
        }
        let interclub = self.interclub.as_mut().ok_or(EventError::NotInterclub)?;
        let game = interclub
            .game_mut(game_number)
            .ok_or(EventError::UnknownGame(game_number))?;

        if let Some(players) = players {
            game.players = players;
        }
        let mut sets = sets.into_iter();
        game.set1 = sets.next();
        game.set2 = sets.next();
        game.set3 = sets.next();

        interclub.recompute();
        Ok(())
    }

    /// Local wall clock start, falling back to 09:00 when no time applies
    pub fn start_time(&self) -> NaiveTime {
        match self.time {
            Some(time) if !self.all_day => time,
            _ => NaiveTime::from_hms_opt(DEFAULT_START_HOUR, 0, 0).unwrap_or_default(),
        }
    }

    /// The start of the event as a timestamp in millis, interpreting the
    /// date and time in the club timezone.
    pub fn start_ts(&self, tz: &Tz) -> i64 {
        let local = self.date.and_time(self.start_time());
        match tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => dt.timestamp_millis(),
            LocalResult::Ambiguous(earliest, _) => earliest.timestamp_millis(),
            // Inside a DST gap
            LocalResult::None => Utc.from_utc_datetime(&local).timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::MatchStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn interclub_events_get_a_match_layout() {
        let e = Event::new(
            EventCategory::Interclub,
            "Interclub Runde 1".into(),
            date(2026, 5, 2),
            0,
        );
        let m = e.interclub.expect("Interclub match to be synthesized");
        assert_eq!(m.singles.len(), 6);
        assert_eq!(m.doubles.len(), 3);
        assert_eq!(m.doubles[0].game_number, 7);
        assert_eq!(m.status, MatchStatus::Open);
    }

    #[test]
    fn leaving_interclub_drops_the_match() {
        let mut e = Event::new(
            EventCategory::Interclub,
            "Match".into(),
            date(2026, 5, 2),
            0,
        );
        e.set_category(EventCategory::Training, None);
        assert!(e.interclub.is_none());
        e.set_category(EventCategory::Interclub, Some("TC Olten".into()));
        assert_eq!(e.interclub.unwrap().opponent, "TC Olten");
    }

    #[test]
    fn start_defaults_to_nine_for_all_day_events() {
        let tz = chrono_tz::Europe::Zurich;
        let mut e = Event::new(EventCategory::Spirit, "Grillabend".into(), date(2026, 7, 1), 0);
        let nine = tz
            .with_ymd_and_hms(2026, 7, 1, 9, 0, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(e.start_ts(&tz), nine);

        e.time = NaiveTime::from_hms_opt(18, 30, 0);
        e.all_day = true;
        assert_eq!(e.start_ts(&tz), nine);

        e.all_day = false;
        assert_eq!(e.start_ts(&tz), nine + 9 * 60 * 60 * 1000 + 30 * 60 * 1000);
    }

    #[test]
    fn set_game_result_recomputes_the_match() {
        let mut e = Event::new(
            EventCategory::Interclub,
            "Match".into(),
            date(2026, 5, 2),
            0,
        );
        e.set_game_result(
            3,
            Some(vec!["Reto".into()]),
            vec![crate::SetScore::new(6, 2), crate::SetScore::new(6, 3)],
        )
        .unwrap();
        let m = e.interclub.as_ref().unwrap();
        assert_eq!(m.total_score.our_score, 1);
        assert_eq!(m.status, MatchStatus::InProgress);
        assert_eq!(m.game(3).unwrap().players, vec!["Reto".to_string()]);

        assert_eq!(
            e.set_game_result(10, None, Vec::new()),
            Err(EventError::UnknownGame(10))
        );
    }

    #[test]
    fn replacing_the_match_keeps_the_fixed_layout() {
        let mut e = Event::new(
            EventCategory::Interclub,
            "Match".into(),
            date(2026, 5, 2),
            0,
        );

        let mut without_singles = InterclubMatch::new("TC Olten".into());
        without_singles.singles.clear();
        assert_eq!(
            e.set_interclub(without_singles),
            Err(EventError::InvalidLayout)
        );

        let mut duplicated = InterclubMatch::new("TC Olten".into());
        duplicated.singles[5].game_number = 5;
        assert_eq!(e.set_interclub(duplicated), Err(EventError::InvalidLayout));

        let mut out_of_range = InterclubMatch::new("TC Olten".into());
        out_of_range.doubles[2].game_number = 10;
        assert_eq!(
            e.set_interclub(out_of_range),
            Err(EventError::InvalidLayout)
        );

        let mut swapped = InterclubMatch::new("TC Olten".into());
        swapped.doubles[0].game_number = 1;
        swapped.singles[0].game_number = 7;
        assert_eq!(e.set_interclub(swapped), Err(EventError::InvalidLayout));

        // The stored match is untouched by rejected replacements
        assert_eq!(e.interclub.as_ref().unwrap().singles.len(), 6);
        assert!(e.set_game_result(3, None, Vec::new()).is_ok());
    }

    #[test]
    fn replacing_the_match_orders_games_by_number() {
        let mut e = Event::new(
            EventCategory::Interclub,
            "Match".into(),
            date(2026, 5, 2),
            0,
        );
        let mut m = InterclubMatch::new("TC Olten".into());
        m.singles.reverse();
        m.doubles.reverse();
        e.set_interclub(m).unwrap();

        let m = e.interclub.as_ref().unwrap();
        let numbers: Vec<u32> = m.games().map(|g| g.game_number).collect();
        assert_eq!(numbers, (1..=9).collect::<Vec<u32>>());
    }

    #[test]
    fn non_interclub_events_reject_game_results() {
        let mut e = Event::new(EventCategory::Training, "Training".into(), date(2026, 5, 2), 0);
        assert_eq!(
            e.set_game_result(1, None, Vec::new()),
            Err(EventError::NotInterclub)
        );
    }

    #[test]
    fn event_time_is_serialized_as_hours_and_minutes() {
        let mut e = Event::new(EventCategory::Training, "Training".into(), date(2026, 5, 2), 0);
        e.time = NaiveTime::from_hms_opt(19, 0, 0);
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["time"], "19:00");
        assert_eq!(json["date"], "2026-05-02");
        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back.time, e.time);
    }
}
