//! Core flashcard library shared by the backend application.
//!
//! Provides:
//! - Spaced repetition scheduling (SM-2 style update rule, due-card selection)
//! - Calendar-day arithmetic for due dates
//! - URL slugs for deck names
//! - Shared types (Card, Deck, Judgment)

pub mod algorithm;
pub mod calendar;
pub mod error;
pub mod slug;
pub mod types;

pub use algorithm::{is_due, select_due, update_after_review, Sm2};
pub use error::{Result, SchedulerError};
pub use slug::{create_slug, find_deck_by_slug};
pub use types::{Card, Deck, Judgment, INITIAL_EASE, MINIMUM_EASE};
