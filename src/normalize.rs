//! Pure mapping from external MTGJSON shapes to internal creation records.
//!
//! No I/O happens here. Case normalization (set codes, keyrune codes, rarity,
//! legality formats and statuses) occurs exactly once, at this boundary;
//! nothing downstream may assume original casing. Legality entries outside
//! the closed [`Format`]/[`LegalityStatus`] vocabularies are dropped from the
//! output — this is expected and common, not an error.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::create::{CardCreate, Format, LegalityCreate, LegalityStatus, PriceCreate, SetCreate};
use crate::error::{IngestError, Result};
use crate::models::{CardData, PricePoints, SetMeta};

const PRICE_CURRENCY: &str = "USD";

// ---------------------------------------------------------------------------
// Sets
// ---------------------------------------------------------------------------

/// Map set metadata to a creation record, lower-casing `code` and
/// `keyruneCode`. An empty `parentCode` becomes absence, never `Some("")`.
pub fn to_set_create(meta: &SetMeta) -> SetCreate {
    SetCreate {
        code: meta.code.to_lowercase(),
        base_size: meta.base_set_size,
        block: meta.block.clone(),
        keyrune_code: meta.keyrune_code.to_lowercase(),
        name: meta.name.clone(),
        parent_code: meta
            .parent_code
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(str::to_lowercase),
        release_date: meta.release_date.clone(),
        type_field: meta.type_field.clone(),
    }
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

/// Map one card printing to a creation record.
///
/// Fails with [`IngestError::MissingImageIdentifier`] when the card carries
/// no scryfall id — the image path cannot be derived, and a placeholder is
/// never substituted.
pub fn to_card_create(card: &CardData) -> Result<CardCreate> {
    Ok(CardCreate {
        artist: card.artist.clone(),
        img_src: build_img_src(card)?,
        is_reserved: card.is_reserved.unwrap_or(false),
        legalities: to_legality_creates(&card.legalities),
        mana_cost: card.mana_cost.clone(),
        name: card.name.clone(),
        number: card.number.clone(),
        oracle_text: card.text.clone(),
        rarity: card.rarity.to_lowercase(),
        set_code: card.set_code.to_lowercase(),
        uuid: card.uuid.clone(),
        type_field: card.type_field.clone(),
    })
}

/// Derive the image path from the scryfall identifier alone:
/// `{first-char}/{second-char}/{identifier}.jpg`.
fn build_img_src(card: &CardData) -> Result<String> {
    let id = card
        .identifiers
        .scryfall_id
        .as_deref()
        .filter(|id| id.len() >= 2)
        .ok_or_else(|| IngestError::MissingImageIdentifier(card.name.clone()))?;
    let mut chars = id.chars();
    let first = chars.next().unwrap();
    let second = chars.next().unwrap();
    Ok(format!("{}/{}/{}.jpg", first, second, id))
}

// ---------------------------------------------------------------------------
// Legalities
// ---------------------------------------------------------------------------

/// Map the external format -> status mapping to creation records.
///
/// Both sides are lower-cased, then checked for membership in the closed
/// vocabularies; entries failing either check are silently dropped. No format
/// absent from the input is synthesized here.
pub fn to_legality_creates(legalities: &BTreeMap<String, String>) -> Vec<LegalityCreate> {
    legalities
        .iter()
        .filter_map(|(format, status)| {
            let format: Format = format.to_lowercase().parse().ok()?;
            let status: LegalityStatus = status.to_lowercase().parse().ok()?;
            Some(LegalityCreate {
                format,
                status,
                card_id: None,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Prices
// ---------------------------------------------------------------------------

/// Reconcile one card's nested price snapshot into flat rows.
///
/// Only paper-medium providers quoting USD are considered. For each surviving
/// provider, one [`PriceCreate`] is emitted per date in the union of the
/// retail foil/normal date mappings, carrying whichever finish is present and
/// leaving the other `None`. Returns the rows together with the count of
/// dates dropped for unparsable keys.
pub fn to_price_creates(card_uuid: &str, points: &PricePoints) -> (Vec<PriceCreate>, usize) {
    let mut rows = Vec::new();
    let mut skipped = 0;

    for (provider, list) in &points.paper {
        if list.currency != PRICE_CURRENCY {
            continue;
        }
        let Some(retail) = &list.retail else {
            continue;
        };

        let dates: BTreeSet<&String> = retail.foil.keys().chain(retail.normal.keys()).collect();
        for date_key in dates {
            let Ok(date) = NaiveDate::parse_from_str(date_key, "%Y-%m-%d") else {
                skipped += 1;
                continue;
            };
            rows.push(PriceCreate {
                card_uuid: card_uuid.to_string(),
                provider: provider.clone(),
                date,
                foil: retail.foil.get(date_key).copied(),
                normal: retail.normal.get(date_key).copied(),
            });
        }
    }

    (rows, skipped)
}
