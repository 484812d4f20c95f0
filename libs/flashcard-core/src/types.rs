//! Core types for flashcard application.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

/// Ease factor every new card starts with.
pub const INITIAL_EASE: f64 = 2.5;

/// Hard floor for the ease factor.
pub const MINIMUM_EASE: f64 = 1.3;

/// Learner's self-reported recall quality for a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Judgment {
    /// Forgot completely.
    Again,
    /// Recalled with difficulty.
    Hard,
    /// Recalled with some hesitation.
    Medium,
    /// Recalled perfectly.
    Easy,
}

impl Judgment {
    /// All judgments in ordinal order.
    pub const ALL: [Judgment; 4] = [Self::Again, Self::Hard, Self::Medium, Self::Easy];

    /// Wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Again => "again",
            Self::Hard => "hard",
            Self::Medium => "medium",
            Self::Easy => "easy",
        }
    }

    /// Ordinal weight (0-3, higher = easier). Stored on the card as `difficulty`.
    pub fn weight(self) -> u8 {
        match self {
            Self::Again => 0,
            Self::Hard => 1,
            Self::Medium => 2,
            Self::Easy => 3,
        }
    }
}

impl fmt::Display for Judgment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Judgment {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "again" => Ok(Self::Again),
            "hard" => Ok(Self::Hard),
            "medium" => Ok(Self::Medium),
            "easy" => Ok(Self::Easy),
            other => Err(SchedulerError::InvalidArgument(format!(
                "unknown judgment '{other}', expected one of again, hard, medium, easy"
            ))),
        }
    }
}

impl TryFrom<u8> for Judgment {
    type Error = SchedulerError;

    fn try_from(weight: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(weight as usize)
            .copied()
            .ok_or_else(|| SchedulerError::InvalidArgument(format!("judgment weight {weight} is not in 0-3")))
    }
}

/// A question/answer unit with its spaced repetition state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub deck_id: String,
    pub front: String,
    pub back: String,
    /// Weight of the most recent judgment (0-3). Display only.
    pub difficulty: u8,
    pub next_review: DateTime<Utc>,
    /// Days until the card is due again.
    pub interval: i64,
    /// Consecutive non-"again" reviews since the last lapse.
    pub repetitions: i64,
    pub ease_factor: f64,
}

impl Card {
    /// Create a never-reviewed card, due immediately.
    pub fn new(
        id: impl Into<String>,
        deck_id: impl Into<String>,
        front: impl Into<String>,
        back: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            deck_id: deck_id.into(),
            front: front.into(),
            back: back.into(),
            difficulty: 0,
            next_review: now,
            interval: 0,
            repetitions: 0,
            ease_factor: INITIAL_EASE,
        }
    }

    /// Whether the card should be studied at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now
    }
}

/// A named collection of cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: String,
    pub card_count: usize,
}

impl Deck {
    /// Create an empty deck.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description,
            color: color.into(),
            card_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn judgment_parses_every_label() {
        for judgment in Judgment::ALL {
            assert_eq!(judgment.as_str().parse::<Judgment>(), Ok(judgment));
        }
    }

    #[test]
    fn judgment_rejects_unknown_label() {
        let err = "invalid-judgment".parse::<Judgment>().unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidArgument(_)));
        assert!("Easy".parse::<Judgment>().is_err());
    }

    #[test]
    fn judgment_weight_round_trips_through_try_from() {
        assert_eq!(Judgment::try_from(0), Ok(Judgment::Again));
        assert_eq!(Judgment::try_from(3), Ok(Judgment::Easy));
        assert!(matches!(
            Judgment::try_from(4),
            Err(SchedulerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn judgment_serde_uses_lowercase_labels() {
        assert_eq!(serde_json::to_string(&Judgment::Medium).unwrap(), "\"medium\"");
        assert!(serde_json::from_str::<Judgment>("\"good\"").is_err());
    }

    #[test]
    fn new_card_is_due_immediately() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let card = Card::new("c1", "d1", "front", "back", now);

        assert_eq!(card.repetitions, 0);
        assert_eq!(card.interval, 0);
        assert_eq!(card.ease_factor, INITIAL_EASE);
        assert_eq!(card.difficulty, 0);
        assert!(card.is_due(now));
    }

    #[test]
    fn card_serializes_camel_case() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let json = serde_json::to_value(Card::new("c1", "d1", "q", "a", now)).unwrap();

        assert_eq!(json["deckId"], "d1");
        assert_eq!(json["easeFactor"], 2.5);
        assert!(json.get("nextReview").is_some());
    }

    #[test]
    fn new_deck_is_empty() {
        let deck = Deck::new("d1", "Spanish", None, "#ff0000");
        assert_eq!(deck.card_count, 0);
        assert_eq!(deck.description, None);
    }
}
