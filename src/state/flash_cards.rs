//! Flash-card deck widget state

use serde::{Deserialize, Serialize};

/// Storage key for the persisted deck
pub const FLASH_CARDS_KEY: &str = "FlashCards";

/// A question/answer card; `flip_card` marks the answer side as shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashCard {
    pub id: u64,
    pub question: String,
    pub answer: String,
    #[serde(rename = "flipCard")]
    pub flip_card: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashDeck {
    cards: Vec<FlashCard>,
    /// `None` once every id has been handed out
    next_id: Option<u64>,
}

impl FlashDeck {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            next_id: Some(1),
        }
    }

    /// Rebuild a deck from stored cards, continuing ids after the highest one
    pub fn from_cards(cards: Vec<FlashCard>) -> Self {
        let next_id = match cards.iter().map(|c| c.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };
        Self { cards, next_id }
    }

    pub fn cards(&self) -> &[FlashCard] {
        &self.cards
    }

    /// Append a card showing its question side. `None` when ids are exhausted.
    pub fn add(&mut self, question: String, answer: String) -> Option<FlashCard> {
        let id = self.next_id?;
        let card = FlashCard {
            id,
            question,
            answer,
            flip_card: false,
        };
        self.next_id = id.checked_add(1);
        self.cards.push(card.clone());
        Some(card)
    }

    /// Turn the card with `id` over
    pub fn flip(&mut self, id: u64) -> Option<FlashCard> {
        let card = self.cards.iter_mut().find(|c| c.id == id)?;
        card.flip_card = !card.flip_card;
        Some(card.clone())
    }

    pub fn remove(&mut self, id: u64) -> Option<FlashCard> {
        let index = self.cards.iter().position(|c| c.id == id)?;
        Some(self.cards.remove(index))
    }
}

impl Default for FlashDeck {
    fn default() -> Self {
        Self::new()
    }
}
