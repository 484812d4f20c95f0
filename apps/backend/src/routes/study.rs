//! Study endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use flashcard_core::{select_due, update_after_review, Judgment};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/study/queue?deckId=
pub async fn queue(
    State(state): State<AppState>,
    Query(query): Query<StudyQueueQuery>,
) -> Result<Json<StudyQueueResponse>> {
    let cards = state
        .db
        .list_cards_by_next_review(query.deck_id.as_deref())
        .await?;
    let due = select_due(&cards, Utc::now());

    Ok(Json(StudyQueueResponse {
        total: due.len(),
        cards: due,
    }))
}

/// POST /api/cards/{id}/review
pub async fn review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<ReviewResponse>> {
    let judgment: Judgment = payload.judgment.parse()?;

    let card = state
        .db
        .get_card(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Card not found".to_string()))?;

    let next = update_after_review(&card, judgment, &Utc::now())?;

    if !state.db.save_review(&card, &next).await? {
        return Err(ApiError::Conflict(
            "Card was reviewed concurrently, reload and retry".to_string(),
        ));
    }

    tracing::info!(
        card_id = %card.id,
        %judgment,
        interval = next.interval,
        next_review = %next.next_review,
        "recorded review"
    );

    Ok(Json(ReviewResponse {
        previous_interval: card.interval,
        previous_ease_factor: card.ease_factor,
        card: next,
    }))
}
