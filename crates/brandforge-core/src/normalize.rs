//! Validation/normalization primitives for untrusted JSON.
//!
//! Every function here is pure and total: malformed input degrades to a
//! safe default or an explicit `None`, never a panic. These are the leaf
//! helpers the document readers and request validators are built from.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value as JsonValue};

/// Borrow a JSON value as an object map. Arrays, scalars, and null are not
/// objects.
pub fn read_object(value: &JsonValue) -> Option<&Map<String, JsonValue>> {
    value.as_object()
}

/// Truncate a string to at most `max` characters on a char boundary.
pub fn truncate_chars(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

/// Trim and clamp an untyped value to a string of at most `max` characters.
///
/// Non-string input yields `""` so callers can uniformly treat "absent",
/// "wrong type", and "blank" as the empty string.
pub fn trim_and_clamp(value: &JsonValue, max: usize) -> String {
    match value.as_str() {
        Some(s) => truncate_chars(s.trim(), max).to_string(),
        None => String::new(),
    }
}

/// Clamp an untyped value to an integer slider in `0..=100`.
///
/// Non-numbers and non-finite floats fall back; in-range floats round to
/// the nearest integer.
pub fn clamp_percent(value: &JsonValue, fallback: i64) -> i64 {
    let n = match value {
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                i as f64
            } else if let Some(f) = n.as_f64() {
                if !f.is_finite() {
                    return fallback;
                }
                f
            } else {
                return fallback;
            }
        }
        _ => return fallback,
    };
    (n.round() as i64).clamp(crate::defaults::SLIDER_MIN, crate::defaults::SLIDER_MAX)
}

/// Normalize an untyped value into a word list: strings only, trimmed,
/// empties dropped, case-insensitively deduplicated (first occurrence
/// wins, original casing kept), capped at `max_count`.
pub fn normalize_word_list(value: &JsonValue, max_count: usize) -> Vec<String> {
    let Some(entries) = value.as_array() else {
        return Vec::new();
    };

    let mut seen: Vec<String> = Vec::new();
    let mut words: Vec<String> = Vec::new();

    for entry in entries {
        let Some(s) = entry.as_str() else { continue };
        let trimmed = s.trim();
        if trimmed.is_empty() {
            continue;
        }
        let key = trimmed.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        words.push(trimmed.to_string());
        if words.len() >= max_count {
            break;
        }
    }

    words
}

/// Read a fixed-arity string array: after per-item trim/clamp/empty-filter,
/// exactly `count` items must survive, else `None`.
///
/// Used for fields like `proofPoints` and `pillars` where partial content
/// is meaningless.
pub fn read_string_array_exact(
    value: &JsonValue,
    count: usize,
    item_max: usize,
) -> Option<Vec<String>> {
    let entries = value.as_array()?;
    if entries.len() != count {
        return None;
    }

    let values: Vec<String> = entries
        .iter()
        .filter_map(|entry| entry.as_str())
        .map(|entry| truncate_chars(entry.trim(), item_max).to_string())
        .filter(|entry| !entry.is_empty())
        .collect();

    if values.len() != count {
        return None;
    }
    Some(values)
}

/// Read a bounded string list: after per-item trim/clamp/empty-filter the
/// surviving count must fall in `min..=max`, else `None`.
pub fn read_string_list(
    value: &JsonValue,
    min: usize,
    max: usize,
    item_max: usize,
) -> Option<Vec<String>> {
    let entries = value.as_array()?;

    let values: Vec<String> = entries
        .iter()
        .filter_map(|entry| entry.as_str())
        .map(|entry| truncate_chars(entry.trim(), item_max).to_string())
        .filter(|entry| !entry.is_empty())
        .collect();

    if values.len() < min || values.len() > max {
        return None;
    }
    Some(values)
}

/// Read an ISO-8601 timestamp string, falling back when absent or
/// unparseable. Stored documents carry timestamps from several historical
/// writers; anything RFC3339-parseable is accepted.
pub fn read_timestamp(value: &JsonValue, fallback: DateTime<Utc>) -> DateTime<Utc> {
    match value.as_str() {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(fallback),
        None => fallback,
    }
}

/// Loose shape check for a `#RRGGBB` hex color. Palette storage treats
/// `#RRGGBB` as the contract; this is only enforced where new palettes
/// are persisted, not on read (historical documents are permissive).
pub fn looks_like_hex(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 7 && bytes[0] == b'#' && bytes[1..].iter().all(|b| b.is_ascii_hexdigit())
}
