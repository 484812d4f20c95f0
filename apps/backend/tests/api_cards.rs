//! Card API tests.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;

use common::fixtures;
use common::TestContext;
use flashcards_backend::models::UpdateCardRequest;

fn ids(body: &serde_json::Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect()
}

/// Test a created card starts in the initial scheduling state.
#[tokio::test]
async fn test_create_card() {
    let ctx = TestContext::new().await;
    let deck = ctx.create_deck("Spanish").await;

    let response = ctx
        .server
        .post("/api/cards")
        .json(&fixtures::create_card_request(&deck.id, "hablar", "to speak"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["deckId"], deck.id.as_str());
    assert_eq!(body["repetitions"], 0);
    assert_eq!(body["interval"], 0);
    assert_eq!(body["easeFactor"], 2.5);
    assert_eq!(body["difficulty"], 0);
}

/// Test card creation validates its input.
#[tokio::test]
async fn test_create_card_validation() {
    let ctx = TestContext::new().await;
    let deck = ctx.create_deck("Spanish").await;

    let response = ctx
        .server
        .post("/api/cards")
        .json(&fixtures::create_card_request(&deck.id, "", "to speak"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = ctx
        .server
        .post("/api/cards")
        .json(&fixtures::create_card_request("no-such-deck", "hablar", "to speak"))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

/// Test listing cards filters by deck.
#[tokio::test]
async fn test_list_cards_by_deck() {
    let ctx = TestContext::new().await;
    let spanish = ctx.create_deck("Spanish").await;
    let biology = ctx.create_deck("Biology").await;
    ctx.create_card(&spanish.id, "hablar").await;
    ctx.create_card(&spanish.id, "comer").await;
    ctx.create_card(&biology.id, "cell").await;

    let all: serde_json::Value = ctx.server.get("/api/cards").await.json();
    assert_eq!(all.as_array().unwrap().len(), 3);

    let response = ctx
        .server
        .get(&format!("/api/cards?deckId={}", spanish.id))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 2);
}

/// Test dueOnly returns only due cards, oldest first.
#[tokio::test]
async fn test_list_due_cards() {
    let ctx = TestContext::new().await;
    let deck = ctx.create_deck("Spanish").await;
    let recent = ctx.create_card(&deck.id, "recent").await;
    let future = ctx.create_card(&deck.id, "future").await;
    let overdue = ctx.create_card(&deck.id, "overdue").await;

    ctx.set_card_state(
        &future.id,
        UpdateCardRequest {
            next_review: Some(Utc::now() + Duration::days(2)),
            ..Default::default()
        },
    )
    .await;
    ctx.set_card_state(
        &overdue.id,
        UpdateCardRequest {
            next_review: Some(Utc::now() - Duration::days(3)),
            ..Default::default()
        },
    )
    .await;

    let response = ctx
        .server
        .get(&format!("/api/cards?deckId={}&dueOnly=true", deck.id))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(ids(&body), vec![overdue.id, recent.id]);
}

/// Test partial card update.
#[tokio::test]
async fn test_update_card() {
    let ctx = TestContext::new().await;
    let deck = ctx.create_deck("Spanish").await;
    let card = ctx.create_card(&deck.id, "hablar").await;

    let response = ctx
        .server
        .put(&format!("/api/cards/{}", card.id))
        .json(&serde_json::json!({ "back": "to talk", "interval": 3 }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["back"], "to talk");
    assert_eq!(body["front"], "hablar");
    assert_eq!(body["interval"], 3);
}

/// Test card update rejects unschedulable values.
#[tokio::test]
async fn test_update_card_rejects_bad_ease() {
    let ctx = TestContext::new().await;
    let deck = ctx.create_deck("Spanish").await;
    let card = ctx.create_card(&deck.id, "hablar").await;

    let response = ctx
        .server
        .put(&format!("/api/cards/{}", card.id))
        .json(&serde_json::json!({ "easeFactor": 0.9 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

/// Test deleting a card.
#[tokio::test]
async fn test_delete_card() {
    let ctx = TestContext::new().await;
    let deck = ctx.create_deck("Spanish").await;
    let card = ctx.create_card(&deck.id, "hablar").await;

    let response = ctx.server.delete(&format!("/api/cards/{}", card.id)).await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = ctx.server.delete(&format!("/api/cards/{}", card.id)).await;
    response.assert_status(StatusCode::NOT_FOUND);
}
