//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Re-export shared types from flashcard-core
pub use flashcard_core::types::{Card, Deck, Judgment};

// === Database Entity Types ===

/// Deck row with its computed card count
#[derive(Debug, Clone, FromRow)]
pub struct DbDeck {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub card_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbDeck {
    /// Convert to API deck type
    pub fn to_api_deck(&self) -> Deck {
        Deck {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            color: self.color.clone(),
            card_count: usize::try_from(self.card_count).unwrap_or(0),
        }
    }
}

/// Flashcard row
#[derive(Debug, Clone, FromRow)]
pub struct DbCard {
    pub id: String,
    pub deck_id: String,
    pub front: String,
    pub back: String,
    pub difficulty: i64,
    pub next_review: DateTime<Utc>,
    pub interval_days: i64,
    pub repetitions: i64,
    pub ease_factor: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbCard {
    /// Convert to flashcard-core Card
    pub fn to_core_card(&self) -> Card {
        Card {
            id: self.id.clone(),
            deck_id: self.deck_id.clone(),
            front: self.front.clone(),
            back: self.back.clone(),
            difficulty: self.difficulty.clamp(0, 3) as u8,
            next_review: self.next_review,
            interval: self.interval_days,
            repetitions: self.repetitions,
            ease_factor: self.ease_factor,
        }
    }
}

// === API Request/Response Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

// Deck types
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateDeckRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateDeckRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

impl UpdateDeckRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.color.is_none()
    }
}

// Card types
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardsQuery {
    pub deck_id: Option<String>,
    pub due_only: Option<bool>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardRequest {
    pub deck_id: Option<String>,
    pub front: Option<String>,
    pub back: Option<String>,
}

/// Partial card update; scheduling fields may be overwritten directly.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardRequest {
    pub front: Option<String>,
    pub back: Option<String>,
    pub difficulty: Option<u8>,
    pub next_review: Option<DateTime<Utc>>,
    pub interval: Option<i64>,
    pub repetitions: Option<i64>,
    pub ease_factor: Option<f64>,
}

impl UpdateCardRequest {
    pub fn is_empty(&self) -> bool {
        self.front.is_none()
            && self.back.is_none()
            && self.difficulty.is_none()
            && self.next_review.is_none()
            && self.interval.is_none()
            && self.repetitions.is_none()
            && self.ease_factor.is_none()
    }
}

// Study types
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyQueueQuery {
    pub deck_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StudyQueueResponse {
    pub cards: Vec<Card>,
    pub total: usize,
}

/// Judgment is taken as a raw label so unknown values map to a scheduler error.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub judgment: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub card: Card,
    pub previous_interval: i64,
    pub previous_ease_factor: f64,
}
