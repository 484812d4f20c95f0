//! Flashcard endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use flashcard_core::{select_due, MINIMUM_EASE};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/cards?deckId=&dueOnly=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CardsQuery>,
) -> Result<Json<Vec<Card>>> {
    let deck_id = query.deck_id.as_deref();

    let cards = if query.due_only.unwrap_or(false) {
        let cards = state.db.list_cards_by_next_review(deck_id).await?;
        select_due(&cards, Utc::now())
    } else {
        state.db.list_cards(deck_id).await?
    };

    Ok(Json(cards))
}

/// GET /api/cards/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Card>> {
    let card = state
        .db
        .get_card(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Card not found".to_string()))?;
    Ok(Json(card))
}

/// POST /api/cards
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateCardRequest>,
) -> Result<(StatusCode, Json<Card>)> {
    let (Some(deck_id), Some(front), Some(back)) = (
        non_empty(payload.deck_id),
        non_empty(payload.front),
        non_empty(payload.back),
    ) else {
        return Err(ApiError::BadRequest(
            "Deck ID, front, and back are required".to_string(),
        ));
    };

    if state.db.get_deck(&deck_id).await?.is_none() {
        return Err(ApiError::NotFound("Deck not found".to_string()));
    }

    let card = state.db.create_card(&deck_id, &front, &back).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

/// PUT /api/cards/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCardRequest>,
) -> Result<Json<Card>> {
    validate_update(&payload)?;

    let card = state
        .db
        .update_card(&id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("Card not found".to_string()))?;
    Ok(Json(card))
}

/// DELETE /api/cards/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    if !state.db.delete_card(&id).await? {
        return Err(ApiError::NotFound("Card not found".to_string()));
    }
    tracing::info!(card_id = %id, "deleted card");
    Ok(StatusCode::NO_CONTENT)
}

/// Reject direct edits that would leave the card unschedulable.
fn validate_update(payload: &UpdateCardRequest) -> Result<()> {
    if payload.difficulty.is_some_and(|d| d > 3) {
        return Err(ApiError::BadRequest("difficulty must be between 0 and 3".to_string()));
    }
    if payload.interval.is_some_and(|i| i < 0) {
        return Err(ApiError::BadRequest("interval cannot be negative".to_string()));
    }
    if payload.repetitions.is_some_and(|r| r < 0) {
        return Err(ApiError::BadRequest("repetitions cannot be negative".to_string()));
    }
    if payload
        .ease_factor
        .is_some_and(|e| !e.is_finite() || e < MINIMUM_EASE)
    {
        return Err(ApiError::BadRequest(format!(
            "easeFactor must be at least {MINIMUM_EASE}"
        )));
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_update_accepts_content_edits() {
        let payload = UpdateCardRequest {
            front: Some("new front".to_string()),
            ..Default::default()
        };
        assert!(validate_update(&payload).is_ok());
    }

    #[test]
    fn test_validate_update_rejects_ease_below_floor() {
        let payload = UpdateCardRequest {
            ease_factor: Some(1.0),
            ..Default::default()
        };
        assert!(matches!(validate_update(&payload), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_validate_update_rejects_negative_interval() {
        let payload = UpdateCardRequest {
            interval: Some(-2),
            ..Default::default()
        };
        assert!(matches!(validate_update(&payload), Err(ApiError::BadRequest(_))));
    }
}
