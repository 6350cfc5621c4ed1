use serde::{Deserialize, Serialize};

pub const SINGLES_COUNT: u32 = 6;
pub const DOUBLES_COUNT: u32 = 3;
pub const GAMES_COUNT: u32 = SINGLES_COUNT + DOUBLES_COUNT;

/// Set wins needed to decide a best-of-three game
const SETS_TO_WIN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Our,
    Opponent,
}

/// Progress of an interclub match. Ordered so that later stages compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MatchStatus {
    #[serde(rename = "Offen")]
    Open,
    #[serde(rename = "Am Spielen")]
    InProgress,
    #[serde(rename = "Gespielt")]
    Played,
}

impl MatchStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "Offen",
            Self::InProgress => "Am Spielen",
            Self::Played => "Gespielt",
        }
    }
}

impl Default for MatchStatus {
    fn default() -> Self {
        Self::Open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetScore {
    pub our_score: u32,
    pub opponent_score: u32,
}

impl SetScore {
    pub fn new(our_score: u32, opponent_score: u32) -> Self {
        Self {
            our_score,
            opponent_score,
        }
    }

    /// Ties are not won by either side
    pub fn winner(&self) -> Option<Side> {
        if self.our_score > self.opponent_score {
            Some(Side::Our)
        } else if self.opponent_score > self.our_score {
            Some(Side::Opponent)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalScore {
    pub our_score: u32,
    pub opponent_score: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub game_number: u32,
    #[serde(default)]
    pub players: Vec<String>,
    #[serde(default)]
    pub set1: Option<SetScore>,
    #[serde(default)]
    pub set2: Option<SetScore>,
    #[serde(default)]
    pub set3: Option<SetScore>,
}

impl Game {
    pub fn new(game_number: u32) -> Self {
        Self {
            game_number,
            ..Default::default()
        }
    }

    pub fn sets(&self) -> impl Iterator<Item = &SetScore> {
        [&self.set1, &self.set2, &self.set3]
            .into_iter()
            .filter_map(|set| set.as_ref())
    }

    pub fn is_singles(&self) -> bool {
        self.game_number <= SINGLES_COUNT
    }

    /// Best of three: decided as soon as one side has won two sets.
    pub fn winner(&self) -> Option<Side> {
        let mut our_wins = 0;
        let mut opponent_wins = 0;
        for set in self.sets() {
            match set.winner() {
                Some(Side::Our) => our_wins += 1,
                Some(Side::Opponent) => opponent_wins += 1,
                None => {}
            }
        }

        if our_wins >= SETS_TO_WIN {
            Some(Side::Our)
        } else if opponent_wins >= SETS_TO_WIN {
            Some(Side::Opponent)
        } else {
            None
        }
    }

    pub fn is_completed(&self) -> bool {
        self.winner().is_some()
    }

    /// `Einzel 1` .. `Einzel 6`, `Doppel 1` .. `Doppel 3`
    pub fn label(&self) -> String {
        if self.is_singles() {
            format!("Einzel {}", self.game_number)
        } else {
            format!("Doppel {}", self.game_number - SINGLES_COUNT)
        }
    }

    /// Set results as displayed in notifications, e.g. `6:2 6:3`
    pub fn set_summary(&self) -> String {
        self.sets()
            .map(|set| format!("{}:{}", set.our_score, set.opponent_score))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Derives the running total and the match status from the game collections.
///
/// This is the only place where either value is computed.
pub fn summarize(singles: &[Game], doubles: &[Game]) -> (TotalScore, MatchStatus) {
    let mut total = TotalScore::default();
    let mut completed = 0;

    for game in singles.iter().chain(doubles.iter()) {
        match game.winner() {
            Some(Side::Our) => total.our_score += 1,
            Some(Side::Opponent) => total.opponent_score += 1,
            None => continue,
        }
        completed += 1;
    }

    let status = if completed == 0 {
        MatchStatus::Open
    } else if completed == GAMES_COUNT
        && singles.len() as u32 == SINGLES_COUNT
        && doubles.len() as u32 == DOUBLES_COUNT
    {
        MatchStatus::Played
    } else {
        MatchStatus::InProgress
    };

    (total, status)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterclubMatch {
    pub opponent: String,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub singles: Vec<Game>,
    #[serde(default)]
    pub doubles: Vec<Game>,
    #[serde(default)]
    pub total_score: TotalScore,
}

impl InterclubMatch {
    /// An open match with the empty six singles and three doubles layout
    pub fn new(opponent: String) -> Self {
        Self {
            opponent,
            status: MatchStatus::Open,
            singles: (1..=SINGLES_COUNT).map(Game::new).collect(),
            doubles: (SINGLES_COUNT + 1..=GAMES_COUNT).map(Game::new).collect(),
            total_score: TotalScore::default(),
        }
    }

    /// Overwrites `total_score` and `status` with the values derived from the games.
    pub fn recompute(&mut self) {
        let (total_score, status) = summarize(&self.singles, &self.doubles);
        self.total_score = total_score;
        self.status = status;
    }

    /// Puts the games in game number order. Returns false unless the singles
    /// are exactly games 1 to 6 and the doubles exactly games 7 to 9.
    pub fn normalize_layout(&mut self) -> bool {
        self.singles.sort_by_key(|g| g.game_number);
        self.doubles.sort_by_key(|g| g.game_number);

        self.singles.iter().map(|g| g.game_number).eq(1..=SINGLES_COUNT)
            && self
                .doubles
                .iter()
                .map(|g| g.game_number)
                .eq(SINGLES_COUNT + 1..=GAMES_COUNT)
    }

    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.singles.iter().chain(self.doubles.iter())
    }

    pub fn game(&self, game_number: u32) -> Option<&Game> {
        self.games().find(|g| g.game_number == game_number)
    }

    pub fn game_mut(&mut self, game_number: u32) -> Option<&mut Game> {
        self.singles
            .iter_mut()
            .chain(self.doubles.iter_mut())
            .find(|g| g.game_number == game_number)
    }

    pub fn is_won(&self) -> bool {
        self.total_score.our_score > self.total_score.opponent_score
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn game_with_sets(game_number: u32, sets: &[(u32, u32)]) -> Game {
        let mut sets = sets.iter().map(|(o, p)| SetScore::new(*o, *p));
        Game {
            game_number,
            players: Vec::new(),
            set1: sets.next(),
            set2: sets.next(),
            set3: sets.next(),
        }
    }

    fn won_game(game_number: u32) -> Game {
        game_with_sets(game_number, &[(6, 1), (6, 2)])
    }

    fn lost_game(game_number: u32) -> Game {
        game_with_sets(game_number, &[(1, 6), (2, 6)])
    }

    #[test]
    fn winner_needs_two_set_wins() {
        assert_eq!(
            game_with_sets(1, &[(2, 1), (1, 2), (2, 0)]).winner(),
            Some(Side::Our)
        );
        assert_eq!(
            game_with_sets(1, &[(0, 2), (0, 2)]).winner(),
            Some(Side::Opponent)
        );
        assert_eq!(game_with_sets(1, &[(2, 1)]).winner(), None);
        assert_eq!(game_with_sets(1, &[]).winner(), None);
    }

    #[test]
    fn tied_sets_do_not_count() {
        assert_eq!(game_with_sets(1, &[(6, 6), (6, 3)]).winner(), None);
        assert_eq!(
            game_with_sets(1, &[(6, 6), (6, 3), (7, 5)]).winner(),
            Some(Side::Our)
        );
    }

    #[test]
    fn labels_singles_and_doubles() {
        assert_eq!(Game::new(3).label(), "Einzel 3");
        assert_eq!(Game::new(7).label(), "Doppel 1");
        assert_eq!(Game::new(9).label(), "Doppel 3");
    }

    #[test]
    fn status_follows_completed_games() {
        let mut m = InterclubMatch::new("TC Bern".into());
        m.recompute();
        assert_eq!(m.status, MatchStatus::Open);
        assert_eq!(m.status.label(), "Offen");

        for n in 1..=5 {
            *m.game_mut(n).unwrap() = won_game(n);
        }
        m.recompute();
        assert_eq!(m.status, MatchStatus::InProgress);
        assert_eq!(m.status.label(), "Am Spielen");
        assert_eq!(m.total_score.our_score, 5);

        *m.game_mut(6).unwrap() = won_game(6);
        for n in 7..=9 {
            *m.game_mut(n).unwrap() = lost_game(n);
        }
        m.recompute();
        assert_eq!(m.status, MatchStatus::Played);
        assert_eq!(m.status.label(), "Gespielt");
        assert_eq!(
            m.total_score,
            TotalScore {
                our_score: 6,
                opponent_score: 3
            }
        );
        assert!(m.is_won());
    }

    #[test]
    fn caller_supplied_totals_are_overwritten() {
        let mut m = InterclubMatch::new("TC Thun".into());
        m.total_score = TotalScore {
            our_score: 9,
            opponent_score: 0,
        };
        m.status = MatchStatus::Played;
        m.recompute();
        assert_eq!(m.total_score, TotalScore::default());
        assert_eq!(m.status, MatchStatus::Open);
    }

    #[test]
    fn status_serializes_with_club_labels() {
        let json = serde_json::to_string(&MatchStatus::InProgress).unwrap();
        assert_eq!(json, "\"Am Spielen\"");
        let status: MatchStatus = serde_json::from_str("\"Gespielt\"").unwrap();
        assert_eq!(status, MatchStatus::Played);
    }
}
