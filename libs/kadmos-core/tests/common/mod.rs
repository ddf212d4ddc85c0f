//! Shared fixtures for integration tests.

use std::collections::BTreeMap;

use kadmos_core::{PropertyConfig, PropertyData, QuizItem};

/// Field configuration of a small Hebrew letter set.
pub fn letter_configs() -> BTreeMap<String, PropertyConfig> {
    serde_json::from_str(
        r#"{
            "name": {"type": "list", "maxDist": 1, "listMode": "best"},
            "sound": {"type": "string", "maxDist": 0},
            "value": {"type": "number", "maxDist": 0}
        }"#,
    )
    .expect("valid letter config")
}

/// Raw data for the first few letters.
pub fn letter_data() -> Vec<(&'static str, BTreeMap<String, PropertyData>)> {
    let rows = [
        ("א", "alef, aleph", "ʔ", 1.0),
        ("ב", "bet, vet (without dagesh)", "b", 2.0),
        ("ג", "gimel", "g", 3.0),
        ("ד", "dalet", "d", 4.0),
        ("כ", "kaf, khaf (final)", "k", 20.0),
    ];

    rows.iter()
        .map(|&(display, name, sound, value)| {
            let data = BTreeMap::from([
                ("name".to_string(), PropertyData::Text(name.to_string())),
                ("sound".to_string(), PropertyData::Text(sound.to_string())),
                ("value".to_string(), PropertyData::Number(value)),
            ]);
            (display, data)
        })
        .collect()
}

/// Quiz items graded on the given fields.
pub fn letter_items(fields: &[&str]) -> Vec<QuizItem> {
    let configs = letter_configs();
    letter_data()
        .iter()
        .map(|(display, data)| {
            QuizItem::from_data(*display, data, &configs, fields, None).expect("valid letter item")
        })
        .collect()
}

/// One guess per field.
pub fn guesses(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(field, guess)| (field.to_string(), guess.to_string()))
        .collect()
}
