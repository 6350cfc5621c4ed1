pub mod date;
mod event;
mod interclub;
pub mod message;
mod push;
mod reminder;
mod score_change;
mod shared;

pub use event::{Event, EventCategory, EventError, DEFAULT_START_HOUR};
pub use interclub::{
    summarize, Game, InterclubMatch, MatchStatus, SetScore, Side, TotalScore, DOUBLES_COUNT,
    GAMES_COUNT, SINGLES_COUNT,
};
pub use message::{MessageTemplate, RenderedMessage};
pub use push::{PushMessage, PushToken};
pub use reminder::{
    due_reminders, DueReminder, NotificationLogEntry, ReminderWindow, LOOKAHEAD_MILLIS,
    REMINDER_WINDOWS,
};
pub use score_change::{
    detect_score_changes, ScoreChange, INTERCLUB_FINAL_TAG, INTERCLUB_SCORE_TAG,
};
pub use shared::entity::{Entity, InvalidIDError, ID};

pub use chrono_tz::Tz;
