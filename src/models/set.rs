use serde::Deserialize;

// ---------------------------------------------------------------------------
// SetMeta — one element of SetList.json (summary info, no cards)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetMeta {
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_field: String,
    pub release_date: String,
    pub base_set_size: i64,
    #[serde(default)]
    pub total_set_size: i64,
    pub keyrune_code: String,
    pub block: Option<String>,
    pub parent_code: Option<String>,
}

// ---------------------------------------------------------------------------
// SetData — full set data from {CODE}.json, including its cards
// ---------------------------------------------------------------------------

/// Cards are kept as raw JSON values so a single malformed card record cannot
/// poison the envelope decode; per-card decoding is the orchestrator's call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetData {
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_field: String,
    pub release_date: String,
    pub base_set_size: i64,
    #[serde(default)]
    pub total_set_size: i64,
    pub keyrune_code: String,
    pub block: Option<String>,
    pub parent_code: Option<String>,
    #[serde(default)]
    pub cards: Vec<serde_json::Value>,
}

impl SetData {
    /// Summary view of this set, for mapping through the same path as
    /// SetList.json entries.
    pub fn meta(&self) -> SetMeta {
        SetMeta {
            code: self.code.clone(),
            name: self.name.clone(),
            type_field: self.type_field.clone(),
            release_date: self.release_date.clone(),
            base_set_size: self.base_set_size,
            total_set_size: self.total_set_size,
            keyrune_code: self.keyrune_code.clone(),
            block: self.block.clone(),
            parent_code: self.parent_code.clone(),
        }
    }
}
