//! Document readers: total functions from untrusted JSON to typed values.
//!
//! The brand-kit document is mutable, schema-less JSON storage with
//! multiple historical shapes in production, and old documents are never
//! migrated in place. Every reader here therefore takes the raw persisted
//! value and returns a fully validated typed value or `None`/defaults,
//! tolerating wrong types, missing fields, extra fields, and legacy
//! shapes by construction. Readers never panic and are idempotent.

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use tracing::trace;

use crate::brief::read_brief;
use crate::defaults;
use crate::models::{
    AssetCampaign, AssetItem, BrandConstraints, BrandPalette, BrandProfile, BrandVoice,
    CampaignIntelligence, Caption, CaptionInput, CaptionOutput, CaptionOutputV1, CaptionOutputV2,
    CaptionPack, Hook, HookStyle, KitMeta, ToneSliders, VariantInfo,
};
use crate::normalize::{
    clamp_percent, normalize_word_list, read_object, read_timestamp, trim_and_clamp,
    truncate_chars,
};

static NULL: JsonValue = JsonValue::Null;

/// Field access that treats "absent" as JSON null, so the normalize
/// primitives see a uniform input.
fn field<'a>(value: &'a JsonValue, key: &str) -> &'a JsonValue {
    value.get(key).unwrap_or(&NULL)
}

// =============================================================================
// PALETTE
// =============================================================================

/// Read the visual identity block from the document root.
///
/// All of primary/secondary/accent, exactly four neutrals, and both font
/// names must be present; any violation yields `None`, which callers
/// surface as "kit incomplete" (not found).
pub fn read_brand_palette(value: &JsonValue) -> Option<BrandPalette> {
    let obj = read_object(value)?;

    let primary = obj.get("primary")?.as_str()?;
    let secondary = obj.get("secondary")?.as_str()?;
    let accent = obj.get("accent")?.as_str()?;

    let neutrals_raw = obj.get("neutrals")?.as_array()?;
    if neutrals_raw.len() != defaults::NEUTRAL_COUNT {
        return None;
    }
    let mut neutrals: Vec<String> = Vec::with_capacity(defaults::NEUTRAL_COUNT);
    for entry in neutrals_raw {
        neutrals.push(entry.as_str()?.to_string());
    }

    let headline_font = obj.get("headlineFont")?.as_str()?;
    let body_font = obj.get("bodyFont")?.as_str()?;

    Some(BrandPalette {
        primary: primary.to_string(),
        secondary: secondary.to_string(),
        accent: accent.to_string(),
        neutrals: neutrals.try_into().ok()?,
        headline_font: headline_font.to_string(),
        body_font: body_font.to_string(),
    })
}

// =============================================================================
// PROFILE & CONSTRAINTS
// =============================================================================

/// Read the profile identity block; sliders clamp with per-slider defaults.
/// Non-object input is `None` so request validators can distinguish "no
/// profile sent" from "profile sent but malformed".
pub fn read_profile(value: &JsonValue) -> Option<BrandProfile> {
    read_object(value)?;
    let tone = field(value, "tone");

    Some(BrandProfile {
        name: field(value, "name").as_str().unwrap_or("").to_string(),
        audience: field(value, "audience").as_str().unwrap_or("").to_string(),
        description: field(value, "description").as_str().unwrap_or("").to_string(),
        tone: ToneSliders {
            bold: clamp_percent(field(tone, "bold"), defaults::TONE_DEFAULT),
            playful: clamp_percent(field(tone, "playful"), defaults::TONE_DEFAULT),
            formal: clamp_percent(field(tone, "formal"), defaults::TONE_DEFAULT),
            emotional: clamp_percent(field(tone, "emotional"), defaults::TONE_DEFAULT),
        },
    })
}

/// Read the constraints block; sliders clamp with defaults, word lists are
/// normalized (deduped, capped).
pub fn read_constraints(value: &JsonValue) -> Option<BrandConstraints> {
    read_object(value)?;

    Some(BrandConstraints {
        formality: clamp_percent(field(value, "formality"), defaults::FORMALITY_DEFAULT),
        humor: clamp_percent(field(value, "humor"), defaults::HUMOR_DEFAULT),
        intensity: clamp_percent(field(value, "intensity"), defaults::INTENSITY_DEFAULT),
        allow_words: normalize_word_list(field(value, "allowWords"), defaults::WORD_LIST_CAP),
        avoid_words: normalize_word_list(field(value, "avoidWords"), defaults::WORD_LIST_CAP),
    })
}

// =============================================================================
// VOICE
// =============================================================================

fn string_array(value: &JsonValue, min: usize, max: usize) -> Option<Vec<String>> {
    let entries = value.as_array()?;
    if entries.len() < min || entries.len() > max {
        return None;
    }
    entries
        .iter()
        .map(|entry| entry.as_str().map(str::to_string))
        .collect()
}

/// Read the `voiceAi` block. Every arity rule must hold or the whole block
/// reads as absent.
pub fn read_brand_voice(value: &JsonValue) -> Option<BrandVoice> {
    read_object(value)?;

    let taglines = string_array(
        field(value, "taglines"),
        defaults::VOICE_TAGLINE_COUNT,
        defaults::VOICE_TAGLINE_COUNT,
    )?;
    let voice_summary = field(value, "voiceSummary").as_str()?.to_string();
    let guidelines = string_array(
        field(value, "guidelines"),
        defaults::VOICE_LIST_MIN,
        defaults::VOICE_LIST_MAX,
    )?;
    let do_list = string_array(field(value, "do"), defaults::VOICE_LIST_MIN, defaults::VOICE_LIST_MAX)?;
    let dont_list =
        string_array(field(value, "dont"), defaults::VOICE_LIST_MIN, defaults::VOICE_LIST_MAX)?;
    let sample_lines = string_array(
        field(value, "sampleLines"),
        defaults::VOICE_SAMPLE_LINE_COUNT,
        defaults::VOICE_SAMPLE_LINE_COUNT,
    )?;

    Some(BrandVoice {
        taglines: taglines.try_into().ok()?,
        voice_summary,
        guidelines,
        do_list,
        dont_list,
        sample_lines: sample_lines.try_into().ok()?,
    })
}

// =============================================================================
// META
// =============================================================================

/// Read the meta block, defaulting the version to 1 when absent or
/// invalid. Timestamps pass through as stored strings.
pub fn read_meta(value: &JsonValue) -> KitMeta {
    let version = match field(value, "version") {
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                if i > 0 {
                    i
                } else {
                    1
                }
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f > 0.0 => f.floor() as i64,
                    _ => 1,
                }
            }
        }
        _ => 1,
    };

    let stamp = |key: &str| field(value, key).as_str().map(str::to_string);

    KitMeta {
        version,
        updated_at: stamp("updatedAt"),
        profile_updated_at: stamp("profileUpdatedAt"),
        voice_updated_at: stamp("voiceUpdatedAt"),
        assets_updated_at: stamp("assetsUpdatedAt"),
    }
}

// =============================================================================
// CAMPAIGNS & ITEMS
// =============================================================================

fn read_variant(value: &JsonValue) -> Option<VariantInfo> {
    serde_json::from_value(value.clone()).ok()
}

fn read_items(value: &JsonValue, fallback: DateTime<Utc>) -> Vec<AssetItem> {
    let Some(entries) = value.as_array() else {
        return Vec::new();
    };

    let mut items: Vec<AssetItem> = Vec::new();

    for entry in entries {
        if read_object(entry).is_none() {
            continue;
        }

        let id = field(entry, "id").as_str().unwrap_or("");
        let kind = field(entry, "type").as_str().unwrap_or("");
        if id.is_empty() || kind.is_empty() {
            continue;
        }

        let (Some(input), Some(output)) =
            (field(entry, "input").as_object(), field(entry, "output").as_object())
        else {
            continue;
        };

        let output_version = if field(entry, "outputVersion").as_i64() == Some(2) {
            2
        } else {
            1
        };

        let parent_id = field(entry, "parentId")
            .as_str()
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        items.push(AssetItem {
            id: id.to_string(),
            kind: kind.to_string(),
            output_version,
            created_at: read_timestamp(field(entry, "createdAt"), fallback),
            parent_id,
            variant: read_variant(field(entry, "variant")),
            input: JsonValue::Object(input.clone()),
            output: JsonValue::Object(output.clone()),
        });
    }

    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items
}

fn read_intelligence(value: &JsonValue, fallback: DateTime<Utc>) -> Option<CampaignIntelligence> {
    read_object(value)?;
    let brief = read_brief(field(value, "brief"))?;
    let source = match field(value, "source").as_str() {
        Some("user") => crate::models::BriefSource::User,
        _ => crate::models::BriefSource::Ai,
    };
    Some(CampaignIntelligence {
        brief,
        source,
        updated_at: read_timestamp(field(value, "updatedAt"), fallback),
    })
}

/// Read the `assets` block into campaigns. Dual-mode:
///
/// - a `campaigns` array is parsed entry-wise, skipping (not failing on)
///   any malformed campaign or item;
/// - otherwise a legacy `items` array is interpreted as a single implicit
///   "General" campaign (pre-campaign document shape).
///
/// The result is always sorted newest-`updated_at`-first (the reader
/// falls `updated_at` back to `created_at`, so the render invariant holds
/// for documents written before campaigns carried an update stamp).
pub fn read_asset_campaigns(assets: &JsonValue, fallback: DateTime<Utc>) -> Vec<AssetCampaign> {
    let Some(assets_obj) = read_object(assets) else {
        return Vec::new();
    };

    if let Some(campaign_entries) = assets_obj.get("campaigns").and_then(|v| v.as_array()) {
        let mut campaigns: Vec<AssetCampaign> = Vec::new();

        for entry in campaign_entries {
            if read_object(entry).is_none() {
                continue;
            }

            let id = field(entry, "id").as_str().unwrap_or("");
            let name = trim_and_clamp(field(entry, "name"), defaults::CAMPAIGN_NAME_MAX);
            if id.is_empty() || name.is_empty() {
                trace!(subsystem = "core", component = "readers", "Skipping malformed campaign entry");
                continue;
            }

            let created_at = read_timestamp(field(entry, "createdAt"), fallback);
            let updated_at = read_timestamp(field(entry, "updatedAt"), created_at);

            let optional = |key: &str, max: usize| {
                let v = trim_and_clamp(field(entry, key), max);
                if v.is_empty() {
                    None
                } else {
                    Some(v)
                }
            };

            campaigns.push(AssetCampaign {
                id: id.to_string(),
                name,
                goal: trim_and_clamp(field(entry, "goal"), defaults::CAMPAIGN_GOAL_MAX),
                platform: trim_and_clamp(field(entry, "platform"), defaults::CAMPAIGN_PLATFORM_MAX),
                cta_style: optional("ctaStyle", defaults::CAMPAIGN_CTA_STYLE_MAX),
                tone_override: optional("toneOverride", defaults::CAMPAIGN_TONE_OVERRIDE_MAX),
                notes: optional("notes", defaults::CAMPAIGN_NOTES_MAX),
                created_at,
                updated_at,
                intelligence: read_intelligence(field(entry, "intelligence"), created_at),
                items: read_items(field(entry, "items"), fallback),
            });
        }

        campaigns.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        return campaigns;
    }

    let legacy_items = read_items(field(assets, "items"), fallback);
    if legacy_items.is_empty() {
        return Vec::new();
    }

    vec![AssetCampaign {
        id: "general".to_string(),
        name: "General".to_string(),
        goal: String::new(),
        platform: String::new(),
        cta_style: None,
        tone_override: None,
        notes: None,
        created_at: fallback,
        updated_at: fallback,
        intelligence: None,
        items: legacy_items,
    }]
}

// =============================================================================
// CAPTION PACKS
// =============================================================================

fn read_v2_hooks(value: &JsonValue) -> Option<[Hook; 3]> {
    let entries = value.as_array()?;

    let mut hooks: Vec<Hook> = Vec::new();
    for entry in entries {
        if read_object(entry).is_none() {
            continue;
        }
        let Some(style) = field(entry, "style").as_str().and_then(HookStyle::parse) else {
            continue;
        };
        let text = trim_and_clamp(field(entry, "text"), defaults::HOOK_TEXT_MAX);
        if text.is_empty() {
            continue;
        }
        hooks.push(Hook { style, text });
        if hooks.len() == defaults::PACK_FACET_COUNT {
            break;
        }
    }

    hooks.try_into().ok()
}

fn read_v2_captions(value: &JsonValue) -> Option<[Caption; 3]> {
    let entries = value.as_array()?;

    let mut captions: Vec<Caption> = Vec::new();
    for entry in entries {
        if read_object(entry).is_none() {
            continue;
        }
        let text = trim_and_clamp(field(entry, "text"), defaults::CAPTION_TEXT_MAX);
        if text.is_empty() {
            continue;
        }
        captions.push(Caption {
            text,
            cta_line: trim_and_clamp(field(entry, "ctaLine"), defaults::CTA_LINE_MAX),
        });
        if captions.len() == defaults::PACK_FACET_COUNT {
            break;
        }
    }

    captions.try_into().ok()
}

fn normalize_v1_list(value: &JsonValue, max_len: usize) -> Vec<String> {
    let Some(entries) = value.as_array() else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| entry.as_str())
        .map(|entry| truncate_chars(entry.trim(), max_len).to_string())
        .filter(|entry| !entry.is_empty())
        .take(defaults::PACK_FACET_COUNT)
        .collect()
}

/// Normalize a raw version-2 output object (e.g. freshly parsed generator
/// output). Requires 3 valid hooks and 3 valid captions; a missing or
/// blank angle falls back to canned copy.
pub fn read_caption_output_v2(value: &JsonValue) -> Option<CaptionOutputV2> {
    let hooks = read_v2_hooks(field(value, "hooks"))?;
    let captions = read_v2_captions(field(value, "captions"))?;
    let angle = trim_and_clamp(field(value, "angle"), defaults::ANGLE_MAX);

    Some(CaptionOutputV2 {
        angle: if angle.is_empty() {
            defaults::ANGLE_FALLBACK.to_string()
        } else {
            angle
        },
        hooks,
        captions,
    })
}

/// Refine a raw asset item into a validated caption pack.
///
/// Version detection prefers structural evidence over the stored
/// `outputVersion`: an `angle` string or object-shaped hooks/captions
/// marks a version-2 output even if the version field was lost; otherwise
/// the legacy flat-string-array shape is tried. Neither shape validating
/// fully yields `None`.
pub fn read_caption_pack(item: &AssetItem) -> Option<CaptionPack> {
    if item.kind != "caption_pack" {
        return None;
    }

    let goal = trim_and_clamp(field(&item.input, "goal"), defaults::ASSET_GOAL_MAX);
    let cta = trim_and_clamp(field(&item.input, "cta"), defaults::ASSET_CTA_MAX);
    if goal.is_empty() || cta.is_empty() {
        return None;
    }
    let topic = {
        let t = trim_and_clamp(field(&item.input, "topic"), defaults::ASSET_TOPIC_MAX);
        if t.is_empty() {
            None
        } else {
            Some(t)
        }
    };
    let input = CaptionInput { goal, cta, topic };

    let angle = trim_and_clamp(field(&item.output, "angle"), defaults::ANGLE_MAX);
    let v2_hooks = read_v2_hooks(field(&item.output, "hooks"));
    let v2_captions = read_v2_captions(field(&item.output, "captions"));

    if item.output_version == 2 || !angle.is_empty() || v2_hooks.is_some() || v2_captions.is_some()
    {
        let hooks = v2_hooks?;
        let captions = v2_captions?;
        return Some(CaptionPack {
            id: item.id.clone(),
            created_at: item.created_at,
            output_version: 2,
            parent_id: item.parent_id.clone(),
            variant: item.variant,
            input,
            output: CaptionOutput::V2(CaptionOutputV2 {
                angle: if angle.is_empty() {
                    defaults::ANGLE_FALLBACK.to_string()
                } else {
                    angle
                },
                hooks,
                captions,
            }),
        });
    }

    let hooks = normalize_v1_list(field(&item.output, "hooks"), defaults::HOOK_V1_MAX);
    let captions = normalize_v1_list(field(&item.output, "captions"), defaults::CAPTION_TEXT_MAX);
    if hooks.len() != defaults::PACK_FACET_COUNT || captions.len() != defaults::PACK_FACET_COUNT {
        return None;
    }
    let notes = {
        let n = trim_and_clamp(field(&item.output, "notes"), defaults::ASSET_NOTES_MAX);
        if n.is_empty() {
            None
        } else {
            Some(n)
        }
    };

    Some(CaptionPack {
        id: item.id.clone(),
        created_at: item.created_at,
        output_version: 1,
        parent_id: item.parent_id.clone(),
        variant: item.variant,
        input,
        output: CaptionOutput::V1(CaptionOutputV1 {
            hooks: hooks.try_into().ok()?,
            captions: captions.try_into().ok()?,
            notes,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn fallback() -> DateTime<Utc> {
        ts("2024-01-01T00:00:00Z")
    }

    fn valid_v2_item(id: &str, created: &str) -> JsonValue {
        json!({
            "id": id,
            "type": "caption_pack",
            "outputVersion": 2,
            "createdAt": created,
            "input": {"goal": "Awareness", "cta": "Try now"},
            "output": {
                "angle": "Sharp positioning",
                "hooks": [
                    {"style": "Curiosity", "text": "h1"},
                    {"style": "Pain", "text": "h2"},
                    {"style": "Proof", "text": "h3"}
                ],
                "captions": [
                    {"text": "c1", "ctaLine": "l1"},
                    {"text": "c2", "ctaLine": "l2"},
                    {"text": "c3", "ctaLine": "l3"}
                ]
            }
        })
    }

    #[test]
    fn test_read_brand_palette_complete() {
        let doc = json!({
            "primary": "#AA1122",
            "secondary": "#112233",
            "accent": "#FF8800",
            "neutrals": ["#FFFFFF", "#CCCCCC", "#666666", "#111111"],
            "headlineFont": "Space Grotesk",
            "bodyFont": "Inter"
        });
        let palette = read_brand_palette(&doc).unwrap();
        assert_eq!(palette.primary, "#AA1122");
        assert_eq!(palette.neutrals[3], "#111111");
        assert_eq!(palette.body_font, "Inter");
    }

    #[test]
    fn test_read_brand_palette_incomplete() {
        // three neutrals instead of four
        let doc = json!({
            "primary": "#AA1122",
            "secondary": "#112233",
            "accent": "#FF8800",
            "neutrals": ["#FFFFFF", "#CCCCCC", "#666666"],
            "headlineFont": "Space Grotesk",
            "bodyFont": "Inter"
        });
        assert!(read_brand_palette(&doc).is_none());
        assert!(read_brand_palette(&json!(null)).is_none());
        assert!(read_brand_palette(&json!({"primary": 7})).is_none());
    }

    #[test]
    fn test_read_meta_defaults_and_floor() {
        assert_eq!(read_meta(&json!(null)).version, 1);
        assert_eq!(read_meta(&json!({"version": 0})).version, 1);
        assert_eq!(read_meta(&json!({"version": -4})).version, 1);
        assert_eq!(read_meta(&json!({"version": 7})).version, 7);
        assert_eq!(read_meta(&json!({"version": 3.9})).version, 3);
        assert_eq!(read_meta(&json!({"version": "8"})).version, 1);

        let meta = read_meta(&json!({"version": 2, "updatedAt": "2024-05-01T00:00:00Z"}));
        assert_eq!(meta.updated_at.as_deref(), Some("2024-05-01T00:00:00Z"));
        assert!(meta.assets_updated_at.is_none());
    }

    #[test]
    fn test_read_asset_campaigns_skips_malformed_entries() {
        let assets = json!({
            "campaigns": [
                {"id": "c1", "name": "Launch Week", "goal": "Get signups",
                 "platform": "Instagram", "createdAt": "2024-02-01T00:00:00Z",
                 "items": []},
                {"id": "", "name": "no id"},
                {"name": "no id either"},
                42,
                null,
                {"id": "c2", "name": "  Evergreen  ",
                 "createdAt": "2024-03-01T00:00:00Z",
                 "items": "not an array"}
            ]
        });

        let campaigns = read_asset_campaigns(&assets, fallback());
        assert_eq!(campaigns.len(), 2);
        // newest-first: c2 (March) before c1 (February)
        assert_eq!(campaigns[0].id, "c2");
        assert_eq!(campaigns[0].name, "Evergreen");
        assert!(campaigns[0].items.is_empty());
        assert_eq!(campaigns[1].goal, "Get signups");
    }

    #[test]
    fn test_read_asset_campaigns_updated_at_sort_beats_created_at() {
        let assets = json!({
            "campaigns": [
                {"id": "old-but-touched", "name": "A",
                 "createdAt": "2024-01-01T00:00:00Z",
                 "updatedAt": "2024-06-01T00:00:00Z", "items": []},
                {"id": "new-untouched", "name": "B",
                 "createdAt": "2024-05-01T00:00:00Z", "items": []}
            ]
        });
        let campaigns = read_asset_campaigns(&assets, fallback());
        assert_eq!(campaigns[0].id, "old-but-touched");
    }

    #[test]
    fn test_read_asset_campaigns_legacy_items_fallback() {
        let assets = json!({
            "items": [
                valid_v2_item("i-new", "2024-04-01T00:00:00Z"),
                valid_v2_item("i-old", "2024-02-01T00:00:00Z")
            ]
        });

        let campaigns = read_asset_campaigns(&assets, fallback());
        assert_eq!(campaigns.len(), 1);
        assert_eq!(campaigns[0].id, "general");
        assert_eq!(campaigns[0].name, "General");
        assert_eq!(campaigns[0].items.len(), 2);
        // newest-first inside the synthesized campaign
        assert_eq!(campaigns[0].items[0].id, "i-new");
    }

    #[test]
    fn test_read_asset_campaigns_legacy_empty_means_no_campaigns() {
        assert!(read_asset_campaigns(&json!({"items": []}), fallback()).is_empty());
        assert!(read_asset_campaigns(&json!({}), fallback()).is_empty());
        assert!(read_asset_campaigns(&json!(null), fallback()).is_empty());
        assert!(read_asset_campaigns(&json!([1, 2]), fallback()).is_empty());
    }

    #[test]
    fn test_read_asset_campaigns_idempotent() {
        let assets = json!({
            "campaigns": [
                {"id": "c1", "name": "Launch", "goal": "Signups", "platform": "IG",
                 "createdAt": "2024-02-01T00:00:00Z",
                 "items": [valid_v2_item("i1", "2024-02-02T00:00:00Z")]}
            ]
        });
        let first = read_asset_campaigns(&assets, fallback());
        let second = read_asset_campaigns(&assets, fallback());
        assert_eq!(first, second);
    }

    #[test]
    fn test_readers_never_panic_on_hostile_values() {
        let hostile = [
            json!(null),
            json!(true),
            json!(1e308),
            json!(-0.0),
            json!(""),
            json!([[[]]]),
            json!({"campaigns": {"id": "not-an-array"}}),
            json!({"campaigns": [{"items": [{"input": [], "output": {}}]}]}),
            json!({"version": 1e308}),
            json!({"neutrals": [null, null, null, null]}),
        ];
        for value in &hostile {
            let _ = read_brand_palette(value);
            let _ = read_profile(value);
            let _ = read_constraints(value);
            let _ = read_brand_voice(value);
            let _ = read_meta(value);
            let _ = read_asset_campaigns(value, fallback());
        }
    }

    #[test]
    fn test_read_caption_pack_v2() {
        let items = read_items(&json!([valid_v2_item("i1", "2024-02-02T00:00:00Z")]), fallback());
        let pack = read_caption_pack(&items[0]).unwrap();
        assert_eq!(pack.output_version, 2);
        let v2 = pack.output.as_v2().unwrap();
        assert_eq!(v2.angle, "Sharp positioning");
        assert_eq!(v2.hooks[1].style, HookStyle::Pain);
        assert_eq!(v2.captions[2].cta_line, "l3");
    }

    #[test]
    fn test_read_caption_pack_v2_by_structural_evidence() {
        // outputVersion missing entirely: the object-shaped hooks are the tell
        let mut item = valid_v2_item("i1", "2024-02-02T00:00:00Z");
        item.as_object_mut().unwrap().remove("outputVersion");
        let items = read_items(&json!([item]), fallback());
        let pack = read_caption_pack(&items[0]).unwrap();
        assert_eq!(pack.output_version, 2);
    }

    #[test]
    fn test_read_caption_pack_v2_rejects_partial() {
        // claims v2 but has only two valid hooks
        let mut item = valid_v2_item("i1", "2024-02-02T00:00:00Z");
        item["output"]["hooks"] = json!([
            {"style": "Curiosity", "text": "h1"},
            {"style": "Nope", "text": "h2"},
            {"style": "Proof", "text": ""}
        ]);
        let items = read_items(&json!([item]), fallback());
        assert!(read_caption_pack(&items[0]).is_none());
    }

    #[test]
    fn test_read_caption_pack_legacy_v1() {
        let item = json!({
            "id": "legacy",
            "type": "caption_pack",
            "createdAt": "2023-11-01T00:00:00Z",
            "input": {"goal": "Reach", "cta": "Shop now", "topic": "Holiday"},
            "output": {
                "hooks": ["a", "b", "c"],
                "captions": ["d", "e", "f"],
                "notes": "seasonal"
            }
        });
        let items = read_items(&json!([item]), fallback());
        let pack = read_caption_pack(&items[0]).unwrap();
        assert_eq!(pack.output_version, 1);
        assert_eq!(pack.input.topic.as_deref(), Some("Holiday"));
        match &pack.output {
            CaptionOutput::V1(v1) => {
                assert_eq!(v1.hooks[0], "a");
                assert_eq!(v1.notes.as_deref(), Some("seasonal"));
            }
            CaptionOutput::V2(_) => panic!("expected legacy output"),
        }
    }

    #[test]
    fn test_read_caption_pack_requires_goal_and_cta() {
        let item = json!({
            "id": "x",
            "type": "caption_pack",
            "createdAt": "2023-11-01T00:00:00Z",
            "input": {"goal": "  ", "cta": "Shop"},
            "output": {"hooks": ["a", "b", "c"], "captions": ["d", "e", "f"]}
        });
        let items = read_items(&json!([item]), fallback());
        assert!(read_caption_pack(&items[0]).is_none());
    }

    #[test]
    fn test_read_items_carries_lineage() {
        let mut item = valid_v2_item("child", "2024-03-01T00:00:00Z");
        item["parentId"] = json!("root-1");
        item["variant"] = json!({"mode": "hooks_only", "tone": "bolder"});

        let items = read_items(&json!([item]), fallback());
        assert_eq!(items[0].parent_id.as_deref(), Some("root-1"));
        let variant = items[0].variant.unwrap();
        assert_eq!(variant.mode, crate::models::VariantMode::HooksOnly);
        assert_eq!(variant.tone, crate::models::VariantTone::Bolder);
    }

    #[test]
    fn test_read_items_drops_invalid_variant_metadata() {
        let mut item = valid_v2_item("child", "2024-03-01T00:00:00Z");
        item["variant"] = json!({"mode": "everything", "tone": "shouty"});
        let items = read_items(&json!([item]), fallback());
        assert!(items[0].variant.is_none());
    }

    #[test]
    fn test_read_profile_and_constraints_defaults() {
        let profile = read_profile(&json!({"name": "Acme", "tone": {"bold": 200}})).unwrap();
        assert_eq!(profile.name, "Acme");
        assert_eq!(profile.tone.bold, 100);
        assert_eq!(profile.tone.playful, 50);
        assert!(read_profile(&json!("nope")).is_none());

        let constraints =
            read_constraints(&json!({"humor": 90, "allowWords": ["Glow", "glow", "Renew"]}))
                .unwrap();
        assert_eq!(constraints.humor, 90);
        assert_eq!(constraints.formality, 50);
        assert_eq!(constraints.allow_words, vec!["Glow", "Renew"]);
    }

    #[test]
    fn test_read_brand_voice_arity_gate() {
        let good = json!({
            "taglines": ["t1", "t2", "t3"],
            "voiceSummary": "Warm and direct.",
            "guidelines": ["g1", "g2", "g3", "g4"],
            "do": ["d1", "d2", "d3"],
            "dont": ["n1", "n2", "n3"],
            "sampleLines": ["s1", "s2", "s3"]
        });
        assert!(read_brand_voice(&good).is_some());

        let mut two_taglines = good.clone();
        two_taglines["taglines"] = json!(["t1", "t2"]);
        assert!(read_brand_voice(&two_taglines).is_none());

        let mut seven_do = good.clone();
        seven_do["do"] = json!(["1", "2", "3", "4", "5", "6", "7"]);
        assert!(read_brand_voice(&seven_do).is_none());
    }
}
