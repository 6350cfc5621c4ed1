use crate::{
    event::{Event, EventCategory},
    interclub::{Game, InterclubMatch, MatchStatus, Side, TotalScore},
    message::{self, RenderedMessage},
};
use itertools::Itertools;
use std::collections::HashMap;

pub const INTERCLUB_SCORE_TAG: &str = "interclub_score";
pub const INTERCLUB_FINAL_TAG: &str = "interclub_final";

/// Something worth telling the club about after an interclub event changed
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreChange {
    GameCompleted {
        game: Game,
        winner: Side,
        opponent: String,
        total: TotalScore,
    },
    MatchFinished {
        won: bool,
        opponent: String,
        total: TotalScore,
    },
}

/// Compares two snapshots of the same event.
///
/// A match that became `Gespielt` yields exactly one `MatchFinished` and nothing
/// else. Otherwise every game that is decided in `after` but was not in
/// `before` yields a `GameCompleted`, in game number order.
pub fn detect_score_changes(before: &Event, after: &Event) -> Vec<ScoreChange> {
    if after.category != EventCategory::Interclub {
        return Vec::new();
    }
    let (before_match, after_match) = match (&before.interclub, &after.interclub) {
        (Some(b), Some(a)) => (b, a),
        _ => return Vec::new(),
    };

    if before_match.status != MatchStatus::Played && after_match.status == MatchStatus::Played {
        return vec![ScoreChange::MatchFinished {
            won: after_match.is_won(),
            opponent: after_match.opponent.clone(),
            total: after_match.total_score,
        }];
    }

    newly_completed_games(before_match, after_match)
        .map(|(game, winner)| ScoreChange::GameCompleted {
            game: game.clone(),
            winner,
            opponent: after_match.opponent.clone(),
            total: after_match.total_score,
        })
        .collect()
}

fn newly_completed_games<'a>(
    before: &'a InterclubMatch,
    after: &'a InterclubMatch,
) -> impl Iterator<Item = (&'a Game, Side)> + 'a {
    let completed_before: HashMap<u32, bool> = before
        .games()
        .map(|g| (g.game_number, g.is_completed()))
        .collect();

    after
        .games()
        .sorted_by_key(|g| g.game_number)
        .filter_map(move |g| {
            let winner = g.winner()?;
            match completed_before.get(&g.game_number) {
                Some(true) => None,
                _ => Some((g, winner)),
            }
        })
}

impl ScoreChange {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::GameCompleted { .. } => INTERCLUB_SCORE_TAG,
            Self::MatchFinished { .. } => INTERCLUB_FINAL_TAG,
        }
    }

    pub fn message(&self) -> RenderedMessage {
        let mut values = HashMap::new();
        let template = match self {
            Self::GameCompleted {
                game,
                winner,
                opponent,
                total,
            } => {
                values.insert("gameLabel", game.label());
                values.insert("players", game.players.join(" / "));
                values.insert("sets", game.set_summary());
                insert_totals(&mut values, opponent, total);
                match winner {
                    Side::Our => message::INTERCLUB_GAME_WON,
                    Side::Opponent => message::INTERCLUB_GAME_LOST,
                }
            }
            Self::MatchFinished {
                won,
                opponent,
                total,
            } => {
                insert_totals(&mut values, opponent, total);
                if *won {
                    message::INTERCLUB_FINAL_WON
                } else {
                    message::INTERCLUB_FINAL_LOST
                }
            }
        };
        message::render(&template, &values)
    }

    pub fn data(&self, event: &Event) -> HashMap<String, String> {
        let mut data = HashMap::new();
        data.insert("type".to_string(), self.tag().to_string());
        data.insert("eventId".to_string(), event.id.as_string());
        if let Self::GameCompleted { game, .. } = self {
            data.insert("gameNumber".to_string(), game.game_number.to_string());
        }
        data
    }
}

fn insert_totals(values: &mut HashMap<&'static str, String>, opponent: &str, total: &TotalScore) {
    values.insert("opponent", opponent.to_string());
    values.insert("ourTotal", total.our_score.to_string());
    values.insert("opponentTotal", total.opponent_score.to_string());
}
