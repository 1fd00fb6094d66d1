//! Normalizer unit tests: case normalization, closed-vocabulary legality
//! filtering, image path derivation, and price reconciliation.

mod common;

use std::collections::BTreeMap;

use mtgjson_ingest::create::{Format, LegalityStatus};
use mtgjson_ingest::models::{CardData, PricePoints, SetMeta};
use mtgjson_ingest::normalize::{
    to_card_create, to_legality_creates, to_price_creates, to_set_create,
};
use mtgjson_ingest::IngestError;

fn card_from(value: serde_json::Value) -> CardData {
    serde_json::from_value(value).unwrap()
}

fn meta_from(value: serde_json::Value) -> SetMeta {
    serde_json::from_value(value).unwrap()
}

fn points_from(value: serde_json::Value) -> PricePoints {
    serde_json::from_value(value).unwrap()
}

// ---------------------------------------------------------------------------
// to_set_create
// ---------------------------------------------------------------------------

#[test]
fn set_codes_are_lowercased() {
    let meta = meta_from(common::sample_set_meta());
    let create = to_set_create(&meta);

    assert_eq!(create.code, "set");
    assert_eq!(create.keyrune_code, "set");
    assert_eq!(create.name, "Setname");
    assert_eq!(create.base_size, 3);
    assert_eq!(create.release_date, "1970-01-01");
    assert_eq!(create.type_field, "expansion");
}

#[test]
fn parent_code_lowercased_or_absent() {
    let mut raw = common::sample_set_meta();
    raw["parentCode"] = serde_json::json!("PAR");
    let create = to_set_create(&meta_from(raw));
    assert_eq!(create.parent_code.as_deref(), Some("par"));

    let create = to_set_create(&meta_from(common::sample_set_meta()));
    assert_eq!(create.parent_code, None);
}

#[test]
fn empty_parent_code_becomes_absence() {
    let mut raw = common::sample_set_meta();
    raw["parentCode"] = serde_json::json!("");
    let create = to_set_create(&meta_from(raw));
    assert_eq!(create.parent_code, None);
}

// ---------------------------------------------------------------------------
// to_card_create
// ---------------------------------------------------------------------------

#[test]
fn card_image_path_derived_from_scryfall_id() {
    let card = card_from(common::sample_card(1));
    let create = to_card_create(&card).unwrap();

    assert_eq!(create.img_src, "1/a/1abc123def456.jpg");
    assert_eq!(create.set_code, "set");
    assert_eq!(create.uuid, "uuid-0001");
}

#[test]
fn card_rarity_is_lowercased() {
    let mut raw = common::sample_card(1);
    raw["rarity"] = serde_json::json!("Mythic");
    let create = to_card_create(&card_from(raw)).unwrap();
    assert_eq!(create.rarity, "mythic");
}

#[test]
fn missing_scryfall_id_is_a_hard_failure() {
    let mut raw = common::sample_card(1);
    raw["identifiers"] = serde_json::json!({});
    let err = to_card_create(&card_from(raw)).unwrap_err();
    assert!(matches!(err, IngestError::MissingImageIdentifier(_)));
}

#[test]
fn one_char_scryfall_id_is_a_hard_failure() {
    let mut raw = common::sample_card(1);
    raw["identifiers"] = serde_json::json!({ "scryfallId": "x" });
    let err = to_card_create(&card_from(raw)).unwrap_err();
    assert!(matches!(err, IngestError::MissingImageIdentifier(_)));
}

#[test]
fn reserved_flag_defaults_to_false() {
    let mut raw = common::sample_card(1);
    raw.as_object_mut().unwrap().remove("isReserved");
    let create = to_card_create(&card_from(raw)).unwrap();
    assert!(!create.is_reserved);
}

// ---------------------------------------------------------------------------
// to_legality_creates
// ---------------------------------------------------------------------------

fn legalities(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(f, s)| (f.to_string(), s.to_string()))
        .collect()
}

#[test]
fn recognized_entries_survive_and_empty_status_is_dropped() {
    let out = to_legality_creates(&legalities(&[
        ("modern", "banned"),
        ("standard", "legal"),
        ("pauper", ""),
    ]));

    assert_eq!(out.len(), 2);
    assert!(out
        .iter()
        .any(|l| l.format == Format::Modern && l.status == LegalityStatus::Banned));
    assert!(out
        .iter()
        .any(|l| l.format == Format::Standard && l.status == LegalityStatus::Legal));
}

#[test]
fn unknown_format_or_status_is_dropped_not_defaulted() {
    let out = to_legality_creates(&legalities(&[
        ("premodern", "legal"),
        ("modern", "suspended"),
    ]));
    assert!(out.is_empty());
}

#[test]
fn vocabulary_check_is_case_insensitive() {
    let out = to_legality_creates(&legalities(&[("Modern", "Banned")]));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].format, Format::Modern);
    assert_eq!(out[0].status, LegalityStatus::Banned);
}

#[test]
fn card_id_is_unassigned_until_persisted() {
    let out = to_legality_creates(&legalities(&[("legacy", "legal")]));
    assert_eq!(out[0].card_id, None);
}

// ---------------------------------------------------------------------------
// to_price_creates
// ---------------------------------------------------------------------------

#[test]
fn paper_usd_provider_yields_one_row_per_date() {
    let points = points_from(serde_json::json!({
        "paper": {
            "cardkingdom": {
                "currency": "USD",
                "retail": {
                    "foil": { "2023-10-01": 2.46 },
                    "normal": { "2023-10-01": 1.23 }
                }
            }
        }
    }));

    let (rows, skipped) = to_price_creates("X", &points);
    assert_eq!(skipped, 0);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].card_uuid, "X");
    assert_eq!(rows[0].provider, "cardkingdom");
    assert_eq!(rows[0].date, common::date("2023-10-01"));
    assert_eq!(rows[0].foil, Some(2.46));
    assert_eq!(rows[0].normal, Some(1.23));
}

#[test]
fn online_play_mediums_never_appear_in_output() {
    let points = points_from(serde_json::json!({
        "paper": {
            "cardkingdom": {
                "currency": "USD",
                "retail": { "normal": { "2023-10-01": 1.23 } }
            }
        },
        "mtgo": {
            "cardhoarder": {
                "currency": "USD",
                "retail": { "normal": { "2023-10-01": 9.99 } }
            }
        }
    }));

    let (rows, _) = to_price_creates("X", &points);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].provider, "cardkingdom");
}

#[test]
fn non_usd_providers_are_discarded() {
    let points = points_from(serde_json::json!({
        "paper": {
            "cardmarket": {
                "currency": "EUR",
                "retail": { "normal": { "2023-10-01": 3.33 } }
            }
        }
    }));

    let (rows, skipped) = to_price_creates("X", &points);
    assert!(rows.is_empty());
    assert_eq!(skipped, 0);
}

#[test]
fn date_union_merges_parallel_foil_and_normal_mappings() {
    let points = points_from(serde_json::json!({
        "paper": {
            "tcgplayer": {
                "currency": "USD",
                "retail": {
                    "foil": { "2023-10-01": 5.0 },
                    "normal": { "2023-10-02": 2.0 }
                }
            }
        }
    }));

    let (rows, _) = to_price_creates("X", &points);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, common::date("2023-10-01"));
    assert_eq!(rows[0].foil, Some(5.0));
    assert_eq!(rows[0].normal, None);
    assert_eq!(rows[1].date, common::date("2023-10-02"));
    assert_eq!(rows[1].foil, None);
    assert_eq!(rows[1].normal, Some(2.0));
}

#[test]
fn unparsable_date_is_counted_as_skipped() {
    let points = points_from(serde_json::json!({
        "paper": {
            "tcgplayer": {
                "currency": "USD",
                "retail": {
                    "normal": { "not-a-date": 2.0, "2023-10-02": 2.5 }
                }
            }
        }
    }));

    let (rows, skipped) = to_price_creates("X", &points);
    assert_eq!(rows.len(), 1);
    assert_eq!(skipped, 1);
}

#[test]
fn normalizing_twice_is_order_stable_and_identical() {
    let points = points_from(serde_json::json!({
        "paper": {
            "tcgplayer": {
                "currency": "USD",
                "retail": { "normal": { "2023-10-01": 2.0, "2023-10-02": 2.5 } }
            },
            "cardkingdom": {
                "currency": "USD",
                "retail": { "foil": { "2023-10-01": 4.0 } }
            }
        }
    }));

    let (first, _) = to_price_creates("X", &points);
    let (second, _) = to_price_creates("X", &points);
    assert_eq!(first, second);
    // providers iterate in key order: cardkingdom before tcgplayer
    assert_eq!(first[0].provider, "cardkingdom");
    assert_eq!(first[1].provider, "tcgplayer");
}
