//! URL slugs for deck names.

use crate::types::Deck;

/// Lowercase `text` and collapse every run of non-alphanumeric characters into `-`.
pub fn create_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Id of the first deck whose name maps to `slug`.
pub fn find_deck_by_slug<'a>(decks: &'a [Deck], slug: &str) -> Option<&'a str> {
    decks
        .iter()
        .find(|deck| create_slug(&deck.name) == slug)
        .map(|deck| deck.id.as_str())
}
