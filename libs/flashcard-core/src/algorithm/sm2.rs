//! SM-2 style update rule.
//!
//! A simplified SuperMemo 2: four judgments, no lapse counting, intervals in whole days.

use chrono::{DateTime, TimeZone, Utc};

use crate::calendar::add_calendar_days;
use crate::error::{Result, SchedulerError};
use crate::types::{Card, Judgment, MINIMUM_EASE};

/// Parameters of the update rule.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub minimum_ease: f64,
    pub again_penalty: f64,
    pub hard_penalty: f64,
    pub easy_bonus: f64,
    pub hard_multiplier: f64,
    pub lapse_interval: i64,
    pub first_medium_interval: i64,
    pub first_easy_interval: i64,
    pub second_interval: i64,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            minimum_ease: MINIMUM_EASE,
            again_penalty: 0.2,
            hard_penalty: 0.15,
            easy_bonus: 0.15,
            hard_multiplier: 1.2,
            lapse_interval: 1,
            first_medium_interval: 1,
            first_easy_interval: 4,
            second_interval: 6,
        }
    }
}

impl Sm2 {
    /// Compute the card's next state after it was judged `judgment` at `now`.
    ///
    /// `id`, deck and content fields are carried over unchanged. The due date is
    /// `interval` calendar days after `now` in `now`'s time zone.
    pub fn review<Tz: TimeZone>(
        &self,
        card: &Card,
        judgment: Judgment,
        now: &DateTime<Tz>,
    ) -> Result<Card> {
        self.validate(card)?;

        let (repetitions, interval, ease_factor) = match judgment {
            Judgment::Again => (
                0,
                self.lapse_interval,
                card.ease_factor - self.again_penalty,
            ),
            Judgment::Hard => (
                next_repetition(card)?,
                scale_interval(card.interval, self.hard_multiplier)?.max(1),
                card.ease_factor - self.hard_penalty,
            ),
            Judgment::Medium => {
                let repetitions = next_repetition(card)?;
                let interval =
                    self.progressive_interval(card, repetitions, self.first_medium_interval)?;
                (repetitions, interval, card.ease_factor)
            }
            Judgment::Easy => {
                let repetitions = next_repetition(card)?;
                let interval =
                    self.progressive_interval(card, repetitions, self.first_easy_interval)?;
                (repetitions, interval, card.ease_factor + self.easy_bonus)
            }
        };
        let ease_factor = ease_factor.max(self.minimum_ease);

        let next_review = add_calendar_days(now, interval)
            .ok_or(SchedulerError::IntervalOverflow { interval })?
            .with_timezone(&Utc);

        tracing::debug!(
            card_id = %card.id,
            %judgment,
            interval_before = card.interval,
            interval_after = interval,
            ease_before = card.ease_factor,
            ease_after = ease_factor,
            "rescheduled card"
        );

        Ok(Card {
            difficulty: judgment.weight(),
            next_review,
            interval,
            repetitions,
            ease_factor,
            ..card.clone()
        })
    }

    fn validate(&self, card: &Card) -> Result<()> {
        if card.interval < 0 {
            return Err(SchedulerError::InvalidState(format!(
                "card {} has negative interval {}",
                card.id, card.interval
            )));
        }
        if card.repetitions < 0 {
            return Err(SchedulerError::InvalidState(format!(
                "card {} has negative repetitions {}",
                card.id, card.repetitions
            )));
        }
        if !card.ease_factor.is_finite() || card.ease_factor < self.minimum_ease {
            return Err(SchedulerError::InvalidState(format!(
                "card {} has ease factor {} below the {} floor",
                card.id, card.ease_factor, self.minimum_ease
            )));
        }
        Ok(())
    }

    /// Fixed steps for the first two successful reviews, then growth by ease.
    /// `repetitions` is the already incremented count.
    fn progressive_interval(&self, card: &Card, repetitions: i64, first: i64) -> Result<i64> {
        let interval = match repetitions {
            1 => first,
            2 => self.second_interval,
            _ => scale_interval(card.interval, card.ease_factor)?,
        };
        Ok(interval.max(1))
    }
}

fn next_repetition(card: &Card) -> Result<i64> {
    card.repetitions.checked_add(1).ok_or_else(|| {
        SchedulerError::InvalidState(format!("card {} repetition count overflowed", card.id))
    })
}

/// `round(interval * factor)`, half away from zero.
fn scale_interval(interval: i64, factor: f64) -> Result<i64> {
    let scaled = (interval as f64 * factor).round();
    // i64::MAX as f64 rounds up to 2^63, so `<` keeps the cast in range.
    if scaled.is_finite() && scaled < i64::MAX as f64 {
        Ok(scaled as i64)
    } else {
        Err(SchedulerError::IntervalOverflow { interval })
    }
}
