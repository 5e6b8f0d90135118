//! Document writers: whole-document merge with a monotonic version bump.
//!
//! Every mutation computes a new document value from the existing one and
//! replaces the stored JSON wholesale; there are no partial-field
//! updates. `meta.version` increments by exactly 1 per write; it is an
//! advisory audit counter, not a compare-and-swap token, so concurrent
//! writers race (last write wins). Unknown document keys pass through
//! untouched: writers only replace the sections they own.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value as JsonValue};

use crate::error::Result;
use crate::models::{AssetCampaign, BrandConstraints, BrandPalette, BrandProfile, BrandVoice, KitMeta};
use crate::readers::read_meta;

/// Which section-level update stamp a write touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaStamp {
    Profile,
    Voice,
    Assets,
}

/// Compute the next meta block: version +1, `updatedAt` and the
/// stamp-specific sub-timestamp set to `now`, other stamps carried over.
pub fn update_meta(doc: &JsonValue, now: DateTime<Utc>, stamp: MetaStamp) -> Result<JsonValue> {
    let current = read_meta(doc.get("meta").unwrap_or(&JsonValue::Null));
    let now_iso = now.to_rfc3339();

    let next = KitMeta {
        version: current.version + 1,
        updated_at: Some(now_iso.clone()),
        profile_updated_at: if stamp == MetaStamp::Profile {
            Some(now_iso.clone())
        } else {
            current.profile_updated_at
        },
        voice_updated_at: if stamp == MetaStamp::Voice {
            Some(now_iso.clone())
        } else {
            current.voice_updated_at
        },
        assets_updated_at: if stamp == MetaStamp::Assets {
            Some(now_iso)
        } else {
            current.assets_updated_at
        },
    };

    Ok(serde_json::to_value(next)?)
}

fn base_object(doc: &JsonValue) -> Map<String, JsonValue> {
    doc.as_object().cloned().unwrap_or_default()
}

/// Replace `assets.campaigns` wholesale and bump meta with the assets stamp.
pub fn save_campaigns(
    doc: &JsonValue,
    campaigns: &[AssetCampaign],
    now: DateTime<Utc>,
) -> Result<JsonValue> {
    let mut next = base_object(doc);
    next.insert(
        "assets".to_string(),
        serde_json::json!({ "campaigns": serde_json::to_value(campaigns)? }),
    );
    next.insert("meta".to_string(), update_meta(doc, now, MetaStamp::Assets)?);
    Ok(JsonValue::Object(next))
}

/// Merge profile and/or constraints fragments into the stored `profile`
/// object (shallow field overwrite; unknown keys inside `profile` are
/// preserved) and bump meta with the profile stamp.
pub fn save_profile(
    doc: &JsonValue,
    profile: Option<&BrandProfile>,
    constraints: Option<&BrandConstraints>,
    now: DateTime<Utc>,
) -> Result<JsonValue> {
    let mut next = base_object(doc);

    let mut profile_obj = doc
        .get("profile")
        .and_then(|v| v.as_object())
        .cloned()
        .unwrap_or_default();

    if let Some(profile) = profile {
        if let JsonValue::Object(fields) = serde_json::to_value(profile)? {
            for (key, value) in fields {
                profile_obj.insert(key, value);
            }
        }
    }
    if let Some(constraints) = constraints {
        profile_obj.insert("constraints".to_string(), serde_json::to_value(constraints)?);
    }

    next.insert("profile".to_string(), JsonValue::Object(profile_obj));
    next.insert("meta".to_string(), update_meta(doc, now, MetaStamp::Profile)?);
    Ok(JsonValue::Object(next))
}

/// Replace the `voiceAi` block and bump meta with the voice stamp.
pub fn save_voice(doc: &JsonValue, voice: &BrandVoice, now: DateTime<Utc>) -> Result<JsonValue> {
    let mut next = base_object(doc);
    next.insert("voiceAi".to_string(), serde_json::to_value(voice)?);
    next.insert("meta".to_string(), update_meta(doc, now, MetaStamp::Voice)?);
    Ok(JsonValue::Object(next))
}

/// Build the initial document for a freshly generated kit: palette fields
/// at the root plus a version-1 meta block.
pub fn new_kit_document(palette: &BrandPalette, now: DateTime<Utc>) -> Result<JsonValue> {
    let mut doc = match serde_json::to_value(palette)? {
        JsonValue::Object(map) => map,
        _ => Map::new(),
    };

    let meta = KitMeta {
        version: 1,
        updated_at: Some(now.to_rfc3339()),
        ..KitMeta::default()
    };
    doc.insert("meta".to_string(), serde_json::to_value(meta)?);
    Ok(JsonValue::Object(doc))
}
