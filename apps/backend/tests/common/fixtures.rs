//! Test fixtures and factory functions for request bodies.

use serde_json::json;

/// Create a deck request body.
pub fn create_deck_request(name: &str, description: &str, color: &str) -> serde_json::Value {
    json!({
        "name": name,
        "description": description,
        "color": color
    })
}

/// Create a card request body.
pub fn create_card_request(deck_id: &str, front: &str, back: &str) -> serde_json::Value {
    json!({
        "deckId": deck_id,
        "front": front,
        "back": back
    })
}

/// Create a review request body.
pub fn review_request(judgment: &str) -> serde_json::Value {
    json!({ "judgment": judgment })
}
