use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Title and body pair with `{placeholder}` tokens
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MessageTemplate {
    pub title: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedMessage {
    pub title: String,
    pub body: String,
}

pub const REMINDER_1D: MessageTemplate = MessageTemplate {
    title: "{icon} Morgen: {title}",
    body: "{typeLabel} am {date}, {time} — {location}",
};

pub const REMINDER_6H: MessageTemplate = MessageTemplate {
    title: "{icon} Heute: {title}",
    body: "{typeLabel} um {time} — {location}",
};

pub const REMINDER_1H: MessageTemplate = MessageTemplate {
    title: "{icon} In einer Stunde: {title}",
    body: "{typeLabel} um {time} — {location}",
};

pub const INTERCLUB_GAME_WON: MessageTemplate = MessageTemplate {
    title: "🎾 {gameLabel} gewonnen!",
    body: "{players} {sets} gegen {opponent}. Zwischenstand {ourTotal}:{opponentTotal}",
};

pub const INTERCLUB_GAME_LOST: MessageTemplate = MessageTemplate {
    title: "🎾 {gameLabel} verloren",
    body: "{players} {sets} gegen {opponent}. Zwischenstand {ourTotal}:{opponentTotal}",
};

pub const INTERCLUB_FINAL_WON: MessageTemplate = MessageTemplate {
    title: "🏆 Sieg gegen {opponent}!",
    body: "Endstand {ourTotal}:{opponentTotal}. Hopp Gemschi!",
};

pub const INTERCLUB_FINAL_LOST: MessageTemplate = MessageTemplate {
    title: "Niederlage gegen {opponent}",
    body: "Endstand {ourTotal}:{opponentTotal}. Nächstes Mal!",
};

/// Fills every known placeholder of `template` with its value and tidies the result.
///
/// Placeholders without a matching key are left as they are.
pub fn render(template: &MessageTemplate, values: &HashMap<&str, String>) -> RenderedMessage {
    RenderedMessage {
        title: render_str(template.title, values),
        body: render_str(template.body, values),
    }
}

/// Single left to right pass, inserted values are never scanned for placeholders.
pub fn render_str(template: &str, values: &HashMap<&str, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let value = after
            .find('}')
            .and_then(|end| values.get(&after[..end]).map(|value| (end, value)));
        match value {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    tidy(&out)
}

fn is_separator_dash(c: char) -> bool {
    matches!(c, '-' | '–' | '—')
}

/// Collapses whitespace runs, drops a dangling separator dash left behind by an
/// empty trailing field, and trims.
fn tidy(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_whitespace() && chars.peek().map_or(false, |next| next.is_whitespace()) {
            while chars.peek().map_or(false, |next| next.is_whitespace()) {
                chars.next();
            }
            collapsed.push(' ');
        } else {
            collapsed.push(c);
        }
    }

    let trimmed = collapsed.trim_end();
    let without_dash = trimmed.trim_end_matches(is_separator_dash);
    let dangling = without_dash.is_empty() || without_dash.ends_with(char::is_whitespace);
    if without_dash.len() != trimmed.len() && dangling {
        without_dash.trim().to_string()
    } else {
        trimmed.trim().to_string()
    }
}
