//! Ingestion orchestrator: fetch -> normalize -> persist.
//!
//! Three flows share one shape: all-set metadata, a single set with its
//! cards, and the daily price snapshot. Malformed individual records are
//! skipped and counted; an unreachable provider or a malformed envelope is
//! fatal for the run. The price flow drains the streaming decoder and
//! flushes batches incrementally, never holding the full document.
//!
//! The orchestrator behaves identically whether invoked on demand or from a
//! scheduled trigger — the scheduler is purely a caller.

use serde_json::Value;
use tracing::{info, warn};

use crate::client::ProviderClient;
use crate::config;
use crate::create::{CardCreate, PriceCreate, SetCreate};
use crate::error::{IngestError, Result};
use crate::models::{CardData, PricePoints, SetData, SetMeta};
use crate::normalize;
use crate::store::{CardStore, PriceStore, SetStore};
use crate::stream;

// ---------------------------------------------------------------------------
// Run reports
// ---------------------------------------------------------------------------

/// Per-run tally of persisted and skipped records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunReport {
    pub saved: usize,
    pub skipped: usize,
}

impl RunReport {
    pub fn outcome(&self) -> RunOutcome {
        if self.skipped == 0 {
            RunOutcome::Completed
        } else {
            RunOutcome::CompletedWithSkips(self.skipped)
        }
    }
}

/// Caller-visible outcome of a run. A partial success is never silent: skips
/// are always surfaced in the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    CompletedWithSkips(usize),
    Failed(String),
}

/// Collapse a flow result into a reportable outcome.
pub fn run_outcome(result: &Result<RunReport>) -> RunOutcome {
    match result {
        Ok(report) => report.outcome(),
        Err(e) => RunOutcome::Failed(e.to_string()),
    }
}

/// Outcome of a single-set ingestion. An absent upstream set is "not found",
/// not a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum SetIngest {
    NotFound,
    Ingested { set: SetCreate, cards: RunReport },
}

// ---------------------------------------------------------------------------
// Ingestor
// ---------------------------------------------------------------------------

/// Sequences the three ingestion flows over a provider client and the
/// persistence ports. Independent runs share no mutable state and may run
/// concurrently.
pub struct Ingestor<S, C, P> {
    client: ProviderClient,
    sets: S,
    cards: C,
    prices: P,
    price_batch_size: usize,
}

impl<S, C, P> Ingestor<S, C, P>
where
    S: SetStore,
    C: CardStore,
    P: PriceStore,
{
    pub fn new(client: ProviderClient, sets: S, cards: C, prices: P) -> Self {
        Self {
            client,
            sets,
            cards,
            prices,
            price_batch_size: config::DEFAULT_PRICE_BATCH_SIZE,
        }
    }

    /// Override the price flush batch size (a tuning knob, clamped to >= 1).
    pub fn with_price_batch_size(mut self, size: usize) -> Self {
        self.price_batch_size = size.max(1);
        self
    }

    // -- Flows ------------------------------------------------------------

    /// Ingest metadata for every set the provider knows about.
    pub async fn ingest_all_set_meta(&self) -> Result<RunReport> {
        let raw_sets = self.client.fetch_set_list().await?;
        let mut batch = Vec::with_capacity(raw_sets.len());
        let mut skipped = 0;
        for raw in raw_sets {
            match serde_json::from_value::<SetMeta>(raw) {
                Ok(meta) => batch.push(normalize::to_set_create(&meta)),
                Err(e) => {
                    warn!("skipping malformed set record: {}", e);
                    skipped += 1;
                }
            }
        }
        let saved = self.sets.save_sets(batch).await?;
        let report = RunReport {
            saved: saved.len(),
            skipped,
        };
        info!(
            "set metadata ingestion done: {} saved, {} skipped",
            report.saved, report.skipped
        );
        Ok(report)
    }

    /// Ingest one set and its cards. The set is persisted first; a malformed
    /// card is skipped and counted without affecting its siblings or the set.
    pub async fn ingest_set_by_code(&self, code: &str) -> Result<SetIngest> {
        let Some(set_data) = self.client.fetch_set(code).await? else {
            info!("set '{}' not found upstream", code);
            return Ok(SetIngest::NotFound);
        };
        let saved = self
            .sets
            .save_sets(vec![normalize::to_set_create(&set_data.meta())])
            .await?;
        let set = saved.into_iter().next().ok_or_else(|| {
            IngestError::Persistence("store returned no saved set".into())
        })?;

        let (batch, skipped) = normalize_cards(&set_data);
        let saved_cards = self.cards.save_cards(batch).await?;
        let cards = RunReport {
            saved: saved_cards.len(),
            skipped,
        };
        info!(
            "set '{}' ingested: {} cards saved, {} skipped",
            set.code, cards.saved, cards.skipped
        );
        Ok(SetIngest::Ingested { set, cards })
    }

    /// Ingest only the cards of one set. `Ok(None)` when the set is absent
    /// upstream.
    pub async fn ingest_cards_in_set(&self, code: &str) -> Result<Option<RunReport>> {
        let Some(set_data) = self.client.fetch_set(code).await? else {
            info!("set '{}' not found upstream", code);
            return Ok(None);
        };
        let (batch, skipped) = normalize_cards(&set_data);
        let saved = self.cards.save_cards(batch).await?;
        Ok(Some(RunReport {
            saved: saved.len(),
            skipped,
        }))
    }

    /// Ingest today's price snapshot, flushing to the price store as batches
    /// fill. The decode rate is governed by persistence draining the
    /// pull-based stream, so a slow store naturally throttles the download.
    /// Runs are not resumable: a failed run restarts from the beginning.
    pub async fn ingest_today_prices(&self) -> Result<RunReport> {
        let byte_stream = self.client.open_price_stream().await?;
        let mut entries = stream::from_byte_stream(byte_stream);

        let mut batch: Vec<PriceCreate> = Vec::with_capacity(self.price_batch_size);
        let mut saved = 0;
        let mut skipped = 0;

        while let Some(entry) = entries.next_entry().await {
            match entry {
                Ok((uuid, raw)) => match serde_json::from_value::<PricePoints>(raw) {
                    Ok(points) => {
                        let (rows, bad_dates) = normalize::to_price_creates(&uuid, &points);
                        skipped += bad_dates;
                        batch.extend(rows);
                        if batch.len() >= self.price_batch_size {
                            saved += self.flush_prices(&mut batch).await?;
                        }
                    }
                    Err(e) => {
                        warn!("skipping price record for {}: {}", uuid, e);
                        skipped += 1;
                    }
                },
                Err(e) if e.is_record_level() => {
                    warn!("skipping undecodable price record: {}", e);
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        if !batch.is_empty() {
            saved += self.flush_prices(&mut batch).await?;
        }

        let report = RunReport { saved, skipped };
        info!(
            "price ingestion done: {} rows saved, {} skipped",
            report.saved, report.skipped
        );
        Ok(report)
    }

    /// Explicit find-or-ingest: look the set up in the store and, on miss,
    /// run the single-set ingestion flow and re-query. `Ok(None)` when the
    /// set exists neither locally nor upstream.
    pub async fn find_or_ingest_set(&self, code: &str) -> Result<Option<SetCreate>> {
        let key = code.to_lowercase();
        if let Some(found) = self.sets.find_set(&key).await? {
            return Ok(Some(found));
        }
        match self.ingest_set_by_code(code).await? {
            SetIngest::NotFound => Ok(None),
            SetIngest::Ingested { .. } => self.sets.find_set(&key).await,
        }
    }

    // -- Helpers ----------------------------------------------------------

    async fn flush_prices(&self, batch: &mut Vec<PriceCreate>) -> Result<usize> {
        let flushed = self.prices.save_prices(std::mem::take(batch)).await?;
        batch.reserve(self.price_batch_size);
        Ok(flushed.len())
    }
}

/// Decode and normalize a set's cards, counting per-card failures instead of
/// failing the run.
fn normalize_cards(set: &SetData) -> (Vec<CardCreate>, usize) {
    let mut batch = Vec::with_capacity(set.cards.len());
    let mut skipped = 0;
    for raw in &set.cards {
        match decode_card(raw).and_then(|card| normalize::to_card_create(&card)) {
            Ok(create) => batch.push(create),
            Err(e) => {
                warn!("skipping card in set '{}': {}", set.code, e);
                skipped += 1;
            }
        }
    }
    (batch, skipped)
}

fn decode_card(raw: &Value) -> Result<CardData> {
    serde_json::from_value(raw.clone())
        .map_err(|e| IngestError::MalformedRecord(format!("card payload: {}", e)))
}
