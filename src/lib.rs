//! Ingestion core for MTGJSON data.
//!
//! Fetches set metadata, per-set card payloads, and the daily multi-provider
//! price snapshot from the MTGJSON v5 API, normalizes them into internal
//! creation records, and hands idempotent batches to persistence ports
//! implemented by the storage collaborator. The price snapshot is decoded as
//! a pull-based stream so memory stays bounded regardless of document size.
//!
//! # Quick start
//!
//! ```no_run
//! use mtgjson_ingest::{Ingestor, ProviderClient};
//! # use mtgjson_ingest::create::{CardCreate, PriceCreate, SetCreate};
//! # use mtgjson_ingest::store::{CardStore, PriceStore, SetStore};
//! # use mtgjson_ingest::Result;
//! # struct Db;
//! # impl SetStore for Db {
//! #     async fn save_sets(&self, b: Vec<SetCreate>) -> Result<Vec<SetCreate>> { Ok(b) }
//! #     async fn find_set(&self, _: &str) -> Result<Option<SetCreate>> { Ok(None) }
//! # }
//! # impl CardStore for Db {
//! #     async fn save_cards(&self, b: Vec<CardCreate>) -> Result<Vec<CardCreate>> { Ok(b) }
//! # }
//! # impl PriceStore for Db {
//! #     async fn save_prices(&self, b: Vec<PriceCreate>) -> Result<Vec<PriceCreate>> { Ok(b) }
//! # }
//!
//! # async fn example() -> mtgjson_ingest::Result<()> {
//! let client = ProviderClient::builder().build()?;
//! let ingestor = Ingestor::new(client, Db, Db, Db);
//!
//! let report = ingestor.ingest_all_set_meta().await?;
//! println!("{} sets saved, {} skipped", report.saved, report.skipped);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod create;
pub mod error;
pub mod ingest;
pub mod models;
pub mod normalize;
pub mod scheduler;
pub mod store;
pub mod stream;

pub use client::{ProviderClient, ProviderClientBuilder};
pub use create::{
    CardCreate, Format, LegalityCreate, LegalityStatus, PriceCreate, SetCreate,
};
pub use error::{IngestError, Result};
pub use ingest::{run_outcome, Ingestor, RunOutcome, RunReport, SetIngest};
pub use store::{CardStore, PriceStore, SetStore};
pub use stream::PriceStream;
