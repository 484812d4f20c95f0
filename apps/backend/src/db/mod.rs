//! SQLite database operations

use std::str::FromStr;

use chrono::Utc;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    QueryBuilder, Sqlite, SqlitePool,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

const DECK_COLUMNS: &str = r#"
    d.id, d.name, d.description, d.color,
    (SELECT COUNT(*) FROM flashcards f WHERE f.deck_id = d.id) AS card_count,
    d.created_at, d.updated_at
"#;

const CARD_COLUMNS: &str = r#"
    id, deck_id, front, back, difficulty, next_review,
    interval_days, repetitions, ease_factor, created_at, updated_at
"#;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the SQLite database at `database_url`
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Private in-memory database on a single long-lived connection
    pub async fn connect_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // === Deck Repository ===

    /// All decks ordered by name
    pub async fn list_decks(&self) -> Result<Vec<Deck>> {
        let rows = sqlx::query_as::<_, DbDeck>(&format!(
            "SELECT {DECK_COLUMNS} FROM decks d ORDER BY d.name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(DbDeck::to_api_deck).collect())
    }

    /// Get deck by ID
    pub async fn get_deck(&self, id: &str) -> Result<Option<Deck>> {
        let row = sqlx::query_as::<_, DbDeck>(&format!(
            "SELECT {DECK_COLUMNS} FROM decks d WHERE d.id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(DbDeck::to_api_deck))
    }

    /// Insert a new, empty deck
    pub async fn create_deck(
        &self,
        name: &str,
        description: Option<&str>,
        color: &str,
    ) -> Result<Deck> {
        let deck = Deck::new(
            Uuid::new_v4().to_string(),
            name,
            description.map(str::to_string),
            color,
        );
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO decks (id, name, description, color, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&deck.id)
        .bind(&deck.name)
        .bind(&deck.description)
        .bind(&deck.color)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        tracing::info!(deck_id = %deck.id, name = %deck.name, "created deck");
        Ok(deck)
    }

    /// Apply a partial update; returns `None` if the deck does not exist
    pub async fn update_deck(&self, id: &str, changes: &UpdateDeckRequest) -> Result<Option<Deck>> {
        if changes.is_empty() {
            return self.get_deck(id).await;
        }

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE decks SET updated_at = ");
        builder.push_bind(Utc::now());
        if let Some(name) = &changes.name {
            builder.push(", name = ").push_bind(name.clone());
        }
        if let Some(description) = &changes.description {
            builder.push(", description = ").push_bind(description.clone());
        }
        if let Some(color) = &changes.color {
            builder.push(", color = ").push_bind(color.clone());
        }
        builder.push(" WHERE id = ").push_bind(id.to_string());

        let result = builder.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_deck(id).await
    }

    /// Delete a deck and, by cascade, its cards
    pub async fn delete_deck(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM decks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // === Card Repository ===

    /// Cards, newest first, optionally limited to one deck
    pub async fn list_cards(&self, deck_id: Option<&str>) -> Result<Vec<Card>> {
        self.query_cards(deck_id, "created_at DESC, rowid DESC").await
    }

    /// Cards ordered by due date, oldest first, optionally limited to one deck
    pub async fn list_cards_by_next_review(&self, deck_id: Option<&str>) -> Result<Vec<Card>> {
        self.query_cards(deck_id, "next_review ASC, rowid ASC").await
    }

    async fn query_cards(&self, deck_id: Option<&str>, order_by: &str) -> Result<Vec<Card>> {
        let rows = match deck_id {
            Some(deck_id) => {
                sqlx::query_as::<_, DbCard>(&format!(
                    "SELECT {CARD_COLUMNS} FROM flashcards WHERE deck_id = ? ORDER BY {order_by}"
                ))
                .bind(deck_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, DbCard>(&format!(
                    "SELECT {CARD_COLUMNS} FROM flashcards ORDER BY {order_by}"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.iter().map(DbCard::to_core_card).collect())
    }

    /// Get card by ID
    pub async fn get_card(&self, id: &str) -> Result<Option<Card>> {
        let row = sqlx::query_as::<_, DbCard>(&format!(
            "SELECT {CARD_COLUMNS} FROM flashcards WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(DbCard::to_core_card))
    }

    /// Insert a never-reviewed card, due immediately
    pub async fn create_card(&self, deck_id: &str, front: &str, back: &str) -> Result<Card> {
        let now = Utc::now();
        let card = Card::new(Uuid::new_v4().to_string(), deck_id, front, back, now);

        sqlx::query(
            r#"
            INSERT INTO flashcards (id, deck_id, front, back, difficulty, next_review,
                                    interval_days, repetitions, ease_factor, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&card.id)
        .bind(&card.deck_id)
        .bind(&card.front)
        .bind(&card.back)
        .bind(i64::from(card.difficulty))
        .bind(card.next_review)
        .bind(card.interval)
        .bind(card.repetitions)
        .bind(card.ease_factor)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        tracing::info!(card_id = %card.id, deck_id = %card.deck_id, "created card");
        Ok(card)
    }

    /// Apply a partial update; returns `None` if the card does not exist
    pub async fn update_card(&self, id: &str, changes: &UpdateCardRequest) -> Result<Option<Card>> {
        if changes.is_empty() {
            return self.get_card(id).await;
        }

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE flashcards SET updated_at = ");
        builder.push_bind(Utc::now());
        if let Some(front) = &changes.front {
            builder.push(", front = ").push_bind(front.clone());
        }
        if let Some(back) = &changes.back {
            builder.push(", back = ").push_bind(back.clone());
        }
        if let Some(difficulty) = changes.difficulty {
            builder.push(", difficulty = ").push_bind(i64::from(difficulty));
        }
        if let Some(next_review) = changes.next_review {
            builder.push(", next_review = ").push_bind(next_review);
        }
        if let Some(interval) = changes.interval {
            builder.push(", interval_days = ").push_bind(interval);
        }
        if let Some(repetitions) = changes.repetitions {
            builder.push(", repetitions = ").push_bind(repetitions);
        }
        if let Some(ease_factor) = changes.ease_factor {
            builder.push(", ease_factor = ").push_bind(ease_factor);
        }
        builder.push(" WHERE id = ").push_bind(id.to_string());

        let result = builder.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_card(id).await
    }

    /// Persist a rescheduled card if its stored state still matches `previous`.
    ///
    /// Returns `false` when another review was saved in between.
    pub async fn save_review(&self, previous: &Card, next: &Card) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE flashcards
            SET difficulty = ?, next_review = ?, interval_days = ?, repetitions = ?,
                ease_factor = ?, updated_at = ?
            WHERE id = ? AND interval_days = ? AND repetitions = ? AND ease_factor = ?
            "#,
        )
        .bind(i64::from(next.difficulty))
        .bind(next.next_review)
        .bind(next.interval)
        .bind(next.repetitions)
        .bind(next.ease_factor)
        .bind(Utc::now())
        .bind(&previous.id)
        .bind(previous.interval)
        .bind(previous.repetitions)
        .bind(previous.ease_factor)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete card by ID
    pub async fn delete_card(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM flashcards WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
