use std::collections::BTreeMap;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// CardData — one card printing inside a set payload
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    pub name: String,
    pub number: String,
    pub mana_cost: Option<String>,
    pub rarity: String,
    #[serde(rename = "type")]
    pub type_field: String,
    pub artist: Option<String>,
    pub text: Option<String>,
    pub uuid: String,
    pub set_code: String,
    pub is_reserved: Option<bool>,
    #[serde(default)]
    pub identifiers: Identifiers,
    /// External format-name -> status-string mapping. BTreeMap keeps the
    /// normalized output order-stable across runs.
    #[serde(default)]
    pub legalities: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Identifiers — provider identifier block on a card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifiers {
    pub scryfall_id: Option<String>,
    pub scryfall_oracle_id: Option<String>,
    pub multiverse_id: Option<String>,
    pub tcgplayer_product_id: Option<String>,
    pub card_kingdom_id: Option<String>,
    pub mtgo_id: Option<String>,
}
