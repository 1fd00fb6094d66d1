//! Shared fixtures for the ingestion integration tests.
//!
//! Provides an in-memory implementation of the three persistence ports
//! (upsert-by-natural-key, inspectable after the run) and sample MTGJSON
//! payload builders: a four-card mock set and a small price snapshot.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use mtgjson_ingest::create::{CardCreate, PriceCreate, SetCreate};
use mtgjson_ingest::store::{CardStore, PriceStore, SetStore};
use mtgjson_ingest::{IngestError, Result};

// ---------------------------------------------------------------------------
// MemoryStore — upsert-by-natural-key, in memory
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryStore {
    pub sets: Mutex<BTreeMap<String, SetCreate>>,
    pub cards: Mutex<BTreeMap<String, CardCreate>>,
    pub prices: Mutex<BTreeMap<(String, String, NaiveDate), PriceCreate>>,
    /// Number of save_prices calls, for batching assertions.
    pub price_flushes: Mutex<usize>,
}

impl MemoryStore {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

impl SetStore for MemoryStore {
    async fn save_sets(&self, batch: Vec<SetCreate>) -> Result<Vec<SetCreate>> {
        let mut sets = self.sets.lock().unwrap();
        for set in &batch {
            sets.insert(set.code.clone(), set.clone());
        }
        Ok(batch)
    }

    async fn find_set(&self, code: &str) -> Result<Option<SetCreate>> {
        Ok(self.sets.lock().unwrap().get(code).cloned())
    }
}

impl CardStore for MemoryStore {
    async fn save_cards(&self, batch: Vec<CardCreate>) -> Result<Vec<CardCreate>> {
        let mut cards = self.cards.lock().unwrap();
        for card in &batch {
            cards.insert(card.uuid.clone(), card.clone());
        }
        Ok(batch)
    }
}

impl PriceStore for MemoryStore {
    async fn save_prices(&self, batch: Vec<PriceCreate>) -> Result<Vec<PriceCreate>> {
        *self.price_flushes.lock().unwrap() += 1;
        let mut prices = self.prices.lock().unwrap();
        for row in &batch {
            prices.insert(
                (row.card_uuid.clone(), row.provider.clone(), row.date),
                row.clone(),
            );
        }
        Ok(batch)
    }
}

// ---------------------------------------------------------------------------
// RejectingPriceStore — storage collaborator that refuses every batch
// ---------------------------------------------------------------------------

pub struct RejectingPriceStore;

impl PriceStore for RejectingPriceStore {
    async fn save_prices(&self, _batch: Vec<PriceCreate>) -> Result<Vec<PriceCreate>> {
        Err(IngestError::Persistence("batch rejected".into()))
    }
}

// ---------------------------------------------------------------------------
// Sample payloads
// ---------------------------------------------------------------------------

pub const MOCK_SET_CODE: &str = "SET";
pub const MOCK_SCRYFALL_ROOT: &str = "abc123def456";

/// One card of the mock set. Cards 1..=3 alternate common/uncommon; card 4
/// is the mythic bonus card.
pub fn sample_card(number: u32) -> serde_json::Value {
    let rarity = match number {
        4 => "mythic",
        n if n % 2 == 1 => "common",
        _ => "uncommon",
    };
    serde_json::json!({
        "name": format!("Test Card Name{}", number),
        "number": number.to_string(),
        "manaCost": format!("{{{}}}{{W}}", number),
        "rarity": rarity,
        "type": "Creature",
        "artist": "Some Artist",
        "text": "When this enters, draw a card.",
        "uuid": format!("uuid-{:04}", number),
        "setCode": MOCK_SET_CODE,
        "isReserved": false,
        "identifiers": { "scryfallId": format!("{}{}", number, MOCK_SCRYFALL_ROOT) },
        "legalities": { "modern": "Legal", "vintage": "Legal" }
    })
}

/// Full set payload (the `data` object of `{CODE}.json`): three base cards
/// plus the mythic bonus card.
pub fn sample_set() -> serde_json::Value {
    serde_json::json!({
        "baseSetSize": 3,
        "block": "Setname",
        "code": MOCK_SET_CODE,
        "keyruneCode": MOCK_SET_CODE,
        "name": "Setname",
        "releaseDate": "1970-01-01",
        "totalSetSize": 4,
        "type": "expansion",
        "cards": [sample_card(1), sample_card(2), sample_card(3), sample_card(4)]
    })
}

/// SetList.json-style metadata entry for the mock set.
pub fn sample_set_meta() -> serde_json::Value {
    serde_json::json!({
        "baseSetSize": 3,
        "block": "Setname",
        "code": MOCK_SET_CODE,
        "keyruneCode": MOCK_SET_CODE,
        "name": "Setname",
        "releaseDate": "1970-01-01",
        "totalSetSize": 4,
        "type": "expansion"
    })
}

/// Wrap a payload in the provider's `{ meta, data }` envelope.
pub fn envelope(data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "meta": { "date": "2023-10-01", "version": "5.2.2+20231001" },
        "data": data
    })
}

/// A daily price snapshot with one paper/USD card, one card that only has
/// an online-play medium, and one non-USD paper card.
pub fn sample_price_snapshot() -> serde_json::Value {
    envelope(serde_json::json!({
        "uuid-paper": {
            "paper": {
                "cardkingdom": {
                    "currency": "USD",
                    "retail": {
                        "foil": { "2023-10-01": 2.46 },
                        "normal": { "2023-10-01": 1.23 }
                    }
                }
            },
            "mtgo": {
                "cardhoarder": {
                    "currency": "USD",
                    "retail": { "normal": { "2023-10-01": 9.99 } }
                }
            }
        },
        "uuid-online-only": {
            "mtgo": {
                "cardhoarder": {
                    "currency": "USD",
                    "retail": { "normal": { "2023-10-01": 0.05 } }
                }
            }
        },
        "uuid-eur": {
            "paper": {
                "cardmarket": {
                    "currency": "EUR",
                    "retail": { "normal": { "2023-10-01": 3.33 } }
                }
            }
        }
    }))
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}
