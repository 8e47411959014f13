//! Intuition color-guessing game.
//!
//! # Invariants
//! - A correct guess adds one point, a wrong guess subtracts one.
//! - The consecutive-correct counter lives only for the session and resets
//!   on any wrong guess.
//! - Reaching `HIGH_FOCUS_STREAK` unlocks the high-focus badge once; later
//!   correct guesses never report another unlock.

use crate::model::stats::{UserStats, BADGE_HIGH_FOCUS_ID};
use crate::store::points::{awards, PointSink};
use log::info;
use rand::Rng;

/// Consecutive correct guesses needed for the high-focus badge.
pub const HIGH_FOCUS_STREAK: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntuitionColor {
    Blue,
    Red,
    Green,
    Yellow,
}

impl IntuitionColor {
    pub const ALL: [IntuitionColor; 4] = [Self::Blue, Self::Red, Self::Green, Self::Yellow];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "blue" => Some(Self::Blue),
            "red" => Some(Self::Red),
            "green" => Some(Self::Green),
            "yellow" => Some(Self::Yellow),
            _ => None,
        }
    }

    /// Draws one color uniformly.
    pub fn draw(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessOutcome {
    pub correct: bool,
    pub delta: i64,
    pub consecutive_correct: u32,
    /// `true` only on the guess that unlocked the badge.
    pub badge_unlocked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntuitionSession {
    hidden: Option<IntuitionColor>,
    consecutive_correct: u32,
}

impl IntuitionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn consecutive_correct(&self) -> u32 {
        self.consecutive_correct
    }

    pub fn has_open_round(&self) -> bool {
        self.hidden.is_some()
    }

    /// Hides a freshly drawn color, replacing any unfinished round.
    pub fn start_round(&mut self, rng: &mut impl Rng) {
        self.hidden = Some(IntuitionColor::draw(rng));
    }

    /// Resolves the open round against `guess`.
    ///
    /// Returns the hidden color with the outcome, or `None` when no round is
    /// open.
    pub fn guess(
        &mut self,
        guess: IntuitionColor,
        stats: &mut UserStats,
    ) -> Option<(IntuitionColor, GuessOutcome)> {
        let hidden = self.hidden.take()?;
        Some((hidden, self.score(guess == hidden, stats)))
    }

    /// Applies one guess result to points, the counter and badges.
    pub fn score(&mut self, correct: bool, stats: &mut UserStats) -> GuessOutcome {
        let delta = if correct {
            awards::INTUITION_GUESS
        } else {
            -awards::INTUITION_GUESS
        };
        stats.add_points(delta);

        let mut badge_unlocked = false;
        if correct {
            self.consecutive_correct += 1;
            if self.consecutive_correct >= HIGH_FOCUS_STREAK {
                badge_unlocked = stats.unlock_badge(BADGE_HIGH_FOCUS_ID);
                if badge_unlocked {
                    info!(
                        "event=badge_unlock module=intuition status=ok badge_id={} consecutive_correct={}",
                        BADGE_HIGH_FOCUS_ID, self.consecutive_correct
                    );
                }
            }
        } else {
            self.consecutive_correct = 0;
        }

        GuessOutcome {
            correct,
            delta,
            consecutive_correct: self.consecutive_correct,
            badge_unlocked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{IntuitionColor, IntuitionSession};
    use crate::model::stats::UserStats;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn guess_without_round_is_ignored() {
        let mut session = IntuitionSession::new();
        let mut stats = UserStats::default();
        assert_eq!(session.guess(IntuitionColor::Red, &mut stats), None);
        assert_eq!(stats.points, 0);
    }

    #[test]
    fn round_resolves_once() {
        let mut session = IntuitionSession::new();
        let mut stats = UserStats::default();
        let mut rng = StdRng::seed_from_u64(7);
        session.start_round(&mut rng);
        assert!(session.has_open_round());

        let (hidden, outcome) = session.guess(IntuitionColor::Blue, &mut stats).unwrap();
        assert_eq!(outcome.correct, hidden == IntuitionColor::Blue);
        assert_eq!(stats.points, outcome.delta);
        assert!(!session.has_open_round());
        assert_eq!(session.guess(IntuitionColor::Blue, &mut stats), None);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(IntuitionColor::parse(" Green "), Some(IntuitionColor::Green));
        assert_eq!(IntuitionColor::parse("purple"), None);
    }

    #[test]
    fn draw_covers_every_color() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(IntuitionColor::draw(&mut rng).as_str());
        }
        assert_eq!(seen.len(), IntuitionColor::ALL.len());
    }
}
