use crate::{
    date::{format_date, format_time},
    event::{Event, EventCategory},
    message::{self, MessageTemplate, RenderedMessage},
    shared::entity::ID,
};
use chrono_tz::Tz;
use std::collections::HashMap;

const MINUTE_MILLIS: i64 = 60 * 1000;

/// Events are fetched by calendar date up to this far ahead of now
pub const LOOKAHEAD_MILLIS: i64 = 26 * 60 * MINUTE_MILLIS;

/// A lead time bracket before an event start in which one reminder is sent.
///
/// The bracket is 15 minutes wide so that a poll every 5 minutes hits it at
/// least once; the `NotificationLogEntry` keeps later hits from sending again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReminderWindow {
    /// Tag stored in the notification log and sent along with the push data
    pub reminder_type: &'static str,
    /// Earliest eligible point, in minutes before the start
    pub min_before: i64,
    /// Latest eligible point, in minutes before the start
    pub max_before: i64,
    pub categories: &'static [EventCategory],
    pub template: MessageTemplate,
}

pub const REMINDER_WINDOWS: [ReminderWindow; 3] = [
    ReminderWindow {
        reminder_type: "1d",
        min_before: 24 * 60 + 10,
        max_before: 24 * 60 - 5,
        categories: &[EventCategory::Interclub],
        template: message::REMINDER_1D,
    },
    ReminderWindow {
        reminder_type: "6h",
        min_before: 6 * 60 + 10,
        max_before: 6 * 60 - 5,
        categories: &[
            EventCategory::Training,
            EventCategory::Interclub,
            EventCategory::Spirit,
        ],
        template: message::REMINDER_6H,
    },
    ReminderWindow {
        reminder_type: "1h",
        min_before: 60 + 10,
        max_before: 60 - 5,
        categories: &[
            EventCategory::Training,
            EventCategory::Interclub,
            EventCategory::Spirit,
        ],
        template: message::REMINDER_1H,
    },
];

impl ReminderWindow {
    pub fn applies_to(&self, category: EventCategory) -> bool {
        self.categories.contains(&category)
    }

    /// `millis_until_start` is compared exactly, so e.g. 70 minutes and
    /// 0.5 seconds before the start is already outside of a 70 minute bound.
    pub fn contains(&self, millis_until_start: i64) -> bool {
        millis_until_start >= self.max_before * MINUTE_MILLIS
            && millis_until_start <= self.min_before * MINUTE_MILLIS
    }
}

/// Write once marker that a reminder of `reminder_type` was sent for `event_id`
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationLogEntry {
    pub event_id: ID,
    pub reminder_type: String,
    pub sent_at: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DueReminder {
    pub event: Event,
    pub window: ReminderWindow,
    pub minutes_until_start: i64,
}

impl DueReminder {
    pub fn log_entry(&self, now: i64) -> NotificationLogEntry {
        NotificationLogEntry {
            event_id: self.event.id.clone(),
            reminder_type: self.window.reminder_type.to_string(),
            sent_at: now,
        }
    }

    pub fn message(&self) -> RenderedMessage {
        message::render(&self.window.template, &reminder_values(&self.event))
    }

    pub fn data(&self) -> HashMap<String, String> {
        let mut data = HashMap::new();
        data.insert("type".to_string(), "reminder".to_string());
        data.insert(
            "reminderType".to_string(),
            self.window.reminder_type.to_string(),
        );
        data.insert("eventId".to_string(), self.event.id.as_string());
        data
    }
}

fn reminder_values(event: &Event) -> HashMap<&'static str, String> {
    let time = match event.time {
        Some(time) if !event.all_day => format!("{} Uhr", format_time(&time)),
        _ => "ganztägig".to_string(),
    };

    let mut values = HashMap::new();
    values.insert("icon", event.category.icon().to_string());
    values.insert("title", event.title.clone());
    values.insert("typeLabel", event.category.label().to_string());
    values.insert("time", time);
    values.insert("date", format_date(&event.date));
    values.insert("location", event.location.clone().unwrap_or_default());
    values
}

/// Every `(event, window)` pair that is eligible for a reminder at `now`.
pub fn due_reminders(events: &[Event], now: i64, tz: &Tz) -> Vec<DueReminder> {
    let mut due = Vec::new();
    for event in events {
        let millis_until_start = event.start_ts(tz) - now;
        for window in REMINDER_WINDOWS.iter() {
            if !window.applies_to(event.category) || !window.contains(millis_until_start) {
                continue;
            }
            due.push(DueReminder {
                event: event.clone(),
                window: *window,
                minutes_until_start: millis_until_start / MINUTE_MILLIS,
            });
        }
    }
    due
}
