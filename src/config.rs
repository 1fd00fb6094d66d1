use std::time::Duration;

pub const PROVIDER_BASE: &str = "https://mtgjson.com/api/v5";
pub const SET_LIST_FILE: &str = "SetList.json";
pub const PRICES_TODAY_FILE: &str = "AllPricesToday.json";
pub const SET_FILE_EXT: &str = ".json";

/// Number of normalized price rows flushed per persistence call by default.
/// A tuning knob, not a correctness requirement.
pub const DEFAULT_PRICE_BATCH_SIZE: usize = 500;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// URL of the full set-list metadata file.
pub fn set_list_url(base: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), SET_LIST_FILE)
}

/// URL of a single set file. Set codes are case-insensitive at the boundary
/// and upper-cased before the request.
pub fn set_url(base: &str, code: &str) -> String {
    format!(
        "{}/{}{}",
        base.trim_end_matches('/'),
        code.to_uppercase(),
        SET_FILE_EXT
    )
}

/// URL of the daily price snapshot file.
pub fn prices_today_url(base: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), PRICES_TODAY_FILE)
}
