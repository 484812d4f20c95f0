//! Deck endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use flashcard_core::find_deck_by_slug;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/decks
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Deck>>> {
    let decks = state.db.list_decks().await?;
    Ok(Json(decks))
}

/// GET /api/decks/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Deck>> {
    let deck = state
        .db
        .get_deck(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Deck not found".to_string()))?;
    Ok(Json(deck))
}

/// GET /api/decks/slug/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Deck>> {
    let decks = state.db.list_decks().await?;
    let deck = find_deck_by_slug(&decks, &slug)
        .and_then(|id| decks.iter().find(|deck| deck.id == id))
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("No deck matches slug '{slug}'")))?;
    Ok(Json(deck))
}

/// POST /api/decks
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateDeckRequest>,
) -> Result<(StatusCode, Json<Deck>)> {
    let (Some(name), Some(description), Some(color)) = (
        non_empty(payload.name),
        non_empty(payload.description),
        non_empty(payload.color),
    ) else {
        return Err(ApiError::BadRequest(
            "Name, description, and color are required".to_string(),
        ));
    };

    let deck = state.db.create_deck(&name, Some(description.as_str()), &color).await?;
    Ok((StatusCode::CREATED, Json(deck)))
}

/// PUT /api/decks/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateDeckRequest>,
) -> Result<Json<Deck>> {
    if matches!(payload.name.as_deref(), Some(name) if name.trim().is_empty()) {
        return Err(ApiError::BadRequest("Deck name cannot be empty".to_string()));
    }

    let deck = state
        .db
        .update_deck(&id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("Deck not found".to_string()))?;
    Ok(Json(deck))
}

/// DELETE /api/decks/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    if !state.db.delete_deck(&id).await? {
        return Err(ApiError::NotFound("Deck not found".to_string()));
    }
    tracing::info!(deck_id = %id, "deleted deck");
    Ok(StatusCode::NO_CONTENT)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
