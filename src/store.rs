//! Persistence ports.
//!
//! Implemented by the external storage collaborator, not by this core. All
//! three saves are upserts keyed by natural key (set code, card uuid,
//! (uuid, provider, date)) and must be safe to call repeatedly with
//! overlapping data: re-running an ingestion flow for the same source data
//! must not create duplicates or clobber previously stored fields absent
//! from the new payload. Upserts are atomic per row; a batch need not be
//! transactional as a whole.

use std::sync::Arc;

use crate::create::{CardCreate, PriceCreate, SetCreate};
use crate::error::Result;

#[allow(async_fn_in_trait)]
pub trait SetStore {
    /// Upsert a batch of sets keyed by set code; returns the saved batch.
    async fn save_sets(&self, batch: Vec<SetCreate>) -> Result<Vec<SetCreate>>;

    /// Look up a previously persisted set by its (lower-cased) code.
    /// Serves the explicit find-or-ingest path.
    async fn find_set(&self, code: &str) -> Result<Option<SetCreate>>;
}

#[allow(async_fn_in_trait)]
pub trait CardStore {
    /// Upsert a batch of cards keyed by card uuid; returns the saved batch.
    async fn save_cards(&self, batch: Vec<CardCreate>) -> Result<Vec<CardCreate>>;
}

#[allow(async_fn_in_trait)]
pub trait PriceStore {
    /// Upsert a batch of price rows keyed by (cardUuid, provider, date);
    /// returns the saved batch.
    async fn save_prices(&self, batch: Vec<PriceCreate>) -> Result<Vec<PriceCreate>>;
}

impl<T: SetStore> SetStore for Arc<T> {
    async fn save_sets(&self, batch: Vec<SetCreate>) -> Result<Vec<SetCreate>> {
        (**self).save_sets(batch).await
    }

    async fn find_set(&self, code: &str) -> Result<Option<SetCreate>> {
        (**self).find_set(code).await
    }
}

impl<T: CardStore> CardStore for Arc<T> {
    async fn save_cards(&self, batch: Vec<CardCreate>) -> Result<Vec<CardCreate>> {
        (**self).save_cards(batch).await
    }
}

impl<T: PriceStore> PriceStore for Arc<T> {
    async fn save_prices(&self, batch: Vec<PriceCreate>) -> Result<Vec<PriceCreate>> {
        (**self).save_prices(batch).await
    }
}
