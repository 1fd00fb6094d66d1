use std::collections::BTreeMap;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// PricePoints — one card's entry in the daily price snapshot
// ---------------------------------------------------------------------------

/// Only the `paper` medium is modeled; online-play and online-quote mediums
/// (`mtgo` and friends) are discarded at deserialization. Providers are keyed
/// in a BTreeMap so reconciliation output is order-stable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricePoints {
    #[serde(default)]
    pub paper: BTreeMap<String, PriceList>,
}

// ---------------------------------------------------------------------------
// PriceList — one provider's price lists under a medium
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct PriceList {
    pub currency: String,
    pub retail: Option<RetailPrices>,
    // buylist is present upstream but not ingested
}

// ---------------------------------------------------------------------------
// RetailPrices — parallel date-keyed foil/normal mappings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetailPrices {
    #[serde(default)]
    pub foil: BTreeMap<String, f64>,
    #[serde(default)]
    pub normal: BTreeMap<String, f64>,
}
