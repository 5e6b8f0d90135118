//! Core data models for brandforge.
//!
//! These are the typed views of the brand-kit JSON document. The document
//! itself is schema-less storage with multiple historical shapes; nothing
//! here is deserialized directly from storage; the readers in
//! [`crate::readers`] reconstruct these types defensively, and serde is
//! used on the write path only, where the shapes are ours. Field renames
//! match the stored wire contract (camelCase, `do`/`dont`, `ctaLine`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

// =============================================================================
// PALETTE
// =============================================================================

/// Visual identity block at the document root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandPalette {
    /// `#RRGGBB` by contract.
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    /// Exactly four values, ordered light→dark or dark→light.
    pub neutrals: [String; 4],
    pub headline_font: String,
    pub body_font: String,
}

// =============================================================================
// PROFILE & CONSTRAINTS
// =============================================================================

/// The four profile tone sliders, each 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneSliders {
    pub bold: i64,
    pub playful: i64,
    pub formal: i64,
    pub emotional: i64,
}

impl Default for ToneSliders {
    fn default() -> Self {
        Self {
            bold: crate::defaults::TONE_DEFAULT,
            playful: crate::defaults::TONE_DEFAULT,
            formal: crate::defaults::TONE_DEFAULT,
            emotional: crate::defaults::TONE_DEFAULT,
        }
    }
}

/// Brand language constraints, embedded under `profile.constraints`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandConstraints {
    pub formality: i64,
    pub humor: i64,
    pub intensity: i64,
    /// 3..=6 entries once a brand core exists; deduped, first casing wins.
    pub allow_words: Vec<String>,
    /// 0..=6 entries; the denylist the policy scan enforces.
    pub avoid_words: Vec<String>,
}

impl Default for BrandConstraints {
    fn default() -> Self {
        Self {
            formality: crate::defaults::FORMALITY_DEFAULT,
            humor: crate::defaults::HUMOR_DEFAULT,
            intensity: crate::defaults::INTENSITY_DEFAULT,
            allow_words: Vec::new(),
            avoid_words: Vec::new(),
        }
    }
}

/// Brand identity fields stored under `profile` (constraints are a sibling
/// key inside the same object, handled separately on the write path).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandProfile {
    pub name: String,
    pub audience: String,
    pub description: String,
    pub tone: ToneSliders,
}

// =============================================================================
// VOICE
// =============================================================================

/// AI-suggested voice block stored under `voiceAi`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandVoice {
    pub taglines: [String; 3],
    pub voice_summary: String,
    /// 3..=6 entries.
    pub guidelines: Vec<String>,
    /// 3..=6 entries.
    #[serde(rename = "do")]
    pub do_list: Vec<String>,
    /// 3..=6 entries.
    #[serde(rename = "dont")]
    pub dont_list: Vec<String>,
    pub sample_lines: [String; 3],
}

// =============================================================================
// CAMPAIGN BRIEF (intelligence)
// =============================================================================

/// One objection/response pair in a brief.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objection {
    pub objection: String,
    pub response: String,
}

/// A complete campaign strategy brief. Only ever persisted whole: partial
/// patches are merged onto the stored brief and re-validated as a unit
/// before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignBrief {
    pub angle: String,
    pub promise: String,
    pub proof_points: [String; 3],
    /// 2..=3 pairs.
    pub objections: Vec<Objection>,
    pub pillars: [String; 3],
    #[serde(rename = "do")]
    pub do_list: Vec<String>,
    #[serde(rename = "dont")]
    pub dont_list: Vec<String>,
}

/// Who produced the stored brief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BriefSource {
    Ai,
    User,
}

/// Brief plus provenance, stored under `campaign.intelligence`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignIntelligence {
    pub brief: CampaignBrief,
    pub source: BriefSource,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// CAPTION PACKS
// =============================================================================

/// Hook framing style, version-2 packs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookStyle {
    Curiosity,
    Pain,
    Proof,
}

impl HookStyle {
    /// Parse the stored string form; anything else is not a hook style.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Curiosity" => Some(Self::Curiosity),
            "Pain" => Some(Self::Pain),
            "Proof" => Some(Self::Proof),
            _ => None,
        }
    }
}

/// A version-2 hook: styled framing plus the line itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hook {
    pub style: HookStyle,
    pub text: String,
}

/// A version-2 caption: body text plus a dedicated CTA line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caption {
    pub text: String,
    pub cta_line: String,
}

/// Version-2 output: the current generator schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionOutputV2 {
    pub angle: String,
    pub hooks: [Hook; 3],
    pub captions: [Caption; 3],
}

/// Version-1 (legacy) output: flat string facets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionOutputV1 {
    pub hooks: [String; 3],
    pub captions: [String; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Either historical output shape. Untagged: the stored document carries
/// the version on the item (`outputVersion`), not inside the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CaptionOutput {
    V2(CaptionOutputV2),
    V1(CaptionOutputV1),
}

impl CaptionOutput {
    pub fn version(&self) -> i64 {
        match self {
            Self::V2(_) => 2,
            Self::V1(_) => 1,
        }
    }

    pub fn as_v2(&self) -> Option<&CaptionOutputV2> {
        match self {
            Self::V2(v2) => Some(v2),
            Self::V1(_) => None,
        }
    }
}

/// The request facets frozen into a generated item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionInput {
    pub goal: String,
    pub cta: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

/// Which facet a variant regenerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantMode {
    HooksOnly,
    CaptionsOnly,
    CtasOnly,
}

/// Requested energy shift for a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantTone {
    Softer,
    Default,
    Bolder,
}

/// Variant metadata on a derived item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantInfo {
    pub mode: VariantMode,
    pub tone: VariantTone,
}

/// A fully validated caption pack, refined from a raw [`AssetItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionPack {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub output_version: i64,
    /// Set on variants: the root item this was derived from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<VariantInfo>,
    pub input: CaptionInput,
    pub output: CaptionOutput,
}

// =============================================================================
// CAMPAIGNS
// =============================================================================

/// A raw asset item as carried in the document: identity and lineage are
/// validated, input/output are preserved as-is and refined on demand via
/// [`crate::readers::read_caption_pack`]. Keeping the payloads untyped here
/// lets unknown historical shapes survive a whole-document rewrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub output_version: i64,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<VariantInfo>,
    pub input: JsonValue,
    pub output: JsonValue,
}

/// A named grouping of generated assets sharing goal/platform/context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCampaign {
    pub id: String,
    pub name: String,
    /// Empty only on the synthesized legacy "General" campaign.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub goal: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone_override: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intelligence: Option<CampaignIntelligence>,
    pub items: Vec<AssetItem>,
}

// =============================================================================
// META
// =============================================================================

/// Monotonic version counter and update stamps at the document root.
///
/// The version is advisory: it is incremented on every mutating write but
/// never compared-and-swapped, so it is an audit signal, not a lock.
/// Timestamps are kept as stored strings; historical writers disagree on
/// precision and the stamps are never computed with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitMeta {
    pub version: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets_updated_at: Option<String>,
}

// =============================================================================
// KIT RECORD (store row)
// =============================================================================

/// One stored brand kit: wizard facts plus the JSON document. Owned by
/// exactly one user; the store is keyed by `(id, owner_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitRecord {
    pub id: Uuid,
    pub owner_id: String,
    /// Wizard mode ("guided", "quick", ...).
    pub mode: String,
    pub business: String,
    pub vibe: String,
    pub created_at: DateTime<Utc>,
    /// The whole brand-kit document. Schema-less; read via `readers`.
    pub kit_json: JsonValue,
}
