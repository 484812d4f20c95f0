//! Common test utilities and fixtures for integration tests.
//!
//! Every TestContext owns a private in-memory SQLite database, so tests
//! run without any external services and never share state.

pub mod fixtures;

use std::sync::Arc;

use axum_test::TestServer;
use flashcard_core::{Card, Deck};

use flashcards_backend::db::Database;
use flashcards_backend::models::UpdateCardRequest;
use flashcards_backend::{router, AppState};

/// Test context containing the database and a test server over the full router.
pub struct TestContext {
    pub db: Arc<Database>,
    pub server: TestServer,
}

impl TestContext {
    /// Create a new test context with migrations applied.
    ///
    /// # Panics
    /// Panics if the in-memory database cannot be set up.
    pub async fn new() -> Self {
        let db = Database::connect_in_memory()
            .await
            .expect("Failed to open in-memory database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        let db = Arc::new(db);
        let state = AppState { db: db.clone() };
        let server = TestServer::new(router(state)).expect("Failed to start test server");

        Self { db, server }
    }

    /// Insert a deck directly through the repository.
    pub async fn create_deck(&self, name: &str) -> Deck {
        self.db
            .create_deck(name, Some("test deck"), "#3366ff")
            .await
            .expect("Failed to create test deck")
    }

    /// Insert a new card directly through the repository.
    pub async fn create_card(&self, deck_id: &str, front: &str) -> Card {
        self.db
            .create_card(deck_id, front, &format!("answer to {front}"))
            .await
            .expect("Failed to create test card")
    }

    /// Overwrite a card's stored fields.
    pub async fn set_card_state(&self, card_id: &str, changes: UpdateCardRequest) -> Card {
        self.db
            .update_card(card_id, &changes)
            .await
            .expect("Failed to update test card")
            .expect("Test card does not exist")
    }
}
