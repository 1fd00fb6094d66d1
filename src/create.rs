//! Internal creation records and the closed legality vocabularies.
//!
//! Creation records are transient: produced fresh per ingestion run, consumed
//! by a persistence port, never re-used across runs. Identity and upsert
//! matching happen entirely inside the store using natural keys (set code,
//! card uuid, (uuid, provider, date)).

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Format — closed vocabulary of play formats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Standard,
    Commander,
    Modern,
    Legacy,
    Vintage,
    Brawl,
    Explorer,
    Historic,
    Oathbreaker,
    Pauper,
    Pioneer,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Standard => "standard",
            Format::Commander => "commander",
            Format::Modern => "modern",
            Format::Legacy => "legacy",
            Format::Vintage => "vintage",
            Format::Brawl => "brawl",
            Format::Explorer => "explorer",
            Format::Historic => "historic",
            Format::Oathbreaker => "oathbreaker",
            Format::Pauper => "pauper",
            Format::Pioneer => "pioneer",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = ();

    /// Membership check against the closed vocabulary. Expects lowercase
    /// input; the normalizer lower-cases before parsing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Format::Standard),
            "commander" => Ok(Format::Commander),
            "modern" => Ok(Format::Modern),
            "legacy" => Ok(Format::Legacy),
            "vintage" => Ok(Format::Vintage),
            "brawl" => Ok(Format::Brawl),
            "explorer" => Ok(Format::Explorer),
            "historic" => Ok(Format::Historic),
            "oathbreaker" => Ok(Format::Oathbreaker),
            "pauper" => Ok(Format::Pauper),
            "pioneer" => Ok(Format::Pioneer),
            _ => Err(()),
        }
    }
}

// ---------------------------------------------------------------------------
// LegalityStatus — closed vocabulary of legality statuses
// ---------------------------------------------------------------------------

/// "Not Legal" is deliberately absent: the ingestion boundary drops entries
/// rather than synthesizing them; backfilling missing formats for display is
/// a presentation-layer concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegalityStatus {
    Legal,
    Banned,
    Restricted,
}

impl LegalityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LegalityStatus::Legal => "legal",
            LegalityStatus::Banned => "banned",
            LegalityStatus::Restricted => "restricted",
        }
    }
}

impl fmt::Display for LegalityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LegalityStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legal" => Ok(LegalityStatus::Legal),
            "banned" => Ok(LegalityStatus::Banned),
            "restricted" => Ok(LegalityStatus::Restricted),
            _ => Err(()),
        }
    }
}

// ---------------------------------------------------------------------------
// SetCreate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCreate {
    /// Lower-cased natural key.
    pub code: String,
    pub base_size: i64,
    pub block: Option<String>,
    pub keyrune_code: String,
    pub name: String,
    /// Lower-cased, or absent — never an empty string.
    pub parent_code: Option<String>,
    pub release_date: String,
    #[serde(rename = "type")]
    pub type_field: String,
}

// ---------------------------------------------------------------------------
// CardCreate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardCreate {
    pub artist: Option<String>,
    /// Derived deterministically from the scryfall identifier:
    /// `{first-char}/{second-char}/{identifier}.jpg`.
    pub img_src: String,
    pub is_reserved: bool,
    pub legalities: Vec<LegalityCreate>,
    pub mana_cost: Option<String>,
    pub name: String,
    pub number: String,
    pub oracle_text: Option<String>,
    pub rarity: String,
    /// Lower-cased.
    pub set_code: String,
    pub uuid: String,
    #[serde(rename = "type")]
    pub type_field: String,
}

// ---------------------------------------------------------------------------
// LegalityCreate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalityCreate {
    pub format: Format,
    pub status: LegalityStatus,
    /// None until the card is persisted and assigned an identity by the store.
    pub card_id: Option<i64>,
}

// ---------------------------------------------------------------------------
// PriceCreate
// ---------------------------------------------------------------------------

/// One row per (cardUuid, provider, date) where at least one of foil/normal
/// has a value. Paper medium, USD only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceCreate {
    pub card_uuid: String,
    pub provider: String,
    pub date: NaiveDate,
    pub foil: Option<f64>,
    pub normal: Option<f64>,
}
