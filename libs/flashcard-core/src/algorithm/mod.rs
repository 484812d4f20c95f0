//! Spaced repetition scheduling.
//!
//! Pure functions over [`Card`] values: nothing here reads a clock or touches storage.
//! Callers pass "now" in and persist the returned card themselves.

pub mod sm2;

use chrono::{DateTime, TimeZone, Utc};

use crate::error::Result;
use crate::types::{Card, Judgment};

pub use sm2::Sm2;

/// Next state of `card` after it was judged `judgment` at `now`, using the default
/// [`Sm2`] parameters.
pub fn update_after_review<Tz: TimeZone>(
    card: &Card,
    judgment: Judgment,
    now: &DateTime<Tz>,
) -> Result<Card> {
    Sm2::default().review(card, judgment, now)
}

/// Whether `card` is due at `now`.
pub fn is_due(card: &Card, now: DateTime<Utc>) -> bool {
    card.is_due(now)
}

/// Cards whose `next_review` is at or before `now`, in input order.
pub fn select_due(cards: &[Card], now: DateTime<Utc>) -> Vec<Card> {
    cards.iter().filter(|card| is_due(card, now)).cloned().collect()
}
