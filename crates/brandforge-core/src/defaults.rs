//! Centralized default constants for the brandforge system.
//!
//! **This module is the single source of truth** for all shared default
//! values: slider defaults, word-list caps, per-field length bounds, and
//! the sanitizer's fallback copy. All crates reference these constants
//! instead of defining their own magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// TONE / CONSTRAINT SLIDERS
// =============================================================================

/// Inclusive lower bound of every 0..100 slider.
pub const SLIDER_MIN: i64 = 0;

/// Inclusive upper bound of every 0..100 slider.
pub const SLIDER_MAX: i64 = 100;

/// Default for the four profile tone sliders (bold/playful/formal/emotional).
pub const TONE_DEFAULT: i64 = 50;

/// Default formality constraint.
pub const FORMALITY_DEFAULT: i64 = 50;

/// Default humor constraint (brands start restrained).
pub const HUMOR_DEFAULT: i64 = 20;

/// Default intensity constraint.
pub const INTENSITY_DEFAULT: i64 = 50;

// =============================================================================
// WORD LISTS
// =============================================================================

/// Maximum entries kept in allow/avoid word lists.
pub const WORD_LIST_CAP: usize = 6;

/// Minimum allow-word count required for a valid brand core.
pub const ALLOW_WORDS_MIN: usize = 3;

// =============================================================================
// CAMPAIGN CONTEXT FIELDS
// =============================================================================

pub const CAMPAIGN_NAME_MIN: usize = 2;
pub const CAMPAIGN_NAME_MAX: usize = 60;
pub const CAMPAIGN_GOAL_MIN: usize = 3;
pub const CAMPAIGN_GOAL_MAX: usize = 80;
pub const CAMPAIGN_PLATFORM_MIN: usize = 2;
pub const CAMPAIGN_PLATFORM_MAX: usize = 40;
pub const CAMPAIGN_CTA_STYLE_MIN: usize = 2;
pub const CAMPAIGN_CTA_STYLE_MAX: usize = 30;
pub const CAMPAIGN_TONE_OVERRIDE_MIN: usize = 2;
pub const CAMPAIGN_TONE_OVERRIDE_MAX: usize = 60;
pub const CAMPAIGN_NOTES_MAX: usize = 280;

// =============================================================================
// CAPTION PACK FIELDS
// =============================================================================

/// Generation request: goal text.
pub const ASSET_GOAL_MAX: usize = 120;

/// Generation request: call-to-action text.
pub const ASSET_CTA_MAX: usize = 120;

/// Generation request: optional topic text.
pub const ASSET_TOPIC_MAX: usize = 280;

/// Version-1 (legacy) hook line.
pub const HOOK_V1_MAX: usize = 90;

/// Version-2 hook text.
pub const HOOK_TEXT_MAX: usize = 120;

/// Caption body text (both versions).
pub const CAPTION_TEXT_MAX: usize = 500;

/// Version-2 per-caption CTA line.
pub const CTA_LINE_MAX: usize = 90;

/// Version-2 angle line.
pub const ANGLE_MAX: usize = 140;

/// Version-1 optional notes.
pub const ASSET_NOTES_MAX: usize = 280;

/// Hooks and captions per pack, both versions.
pub const PACK_FACET_COUNT: usize = 3;

// =============================================================================
// CAMPAIGN BRIEF FIELDS
// =============================================================================

pub const BRIEF_ANGLE_MAX: usize = 180;
pub const BRIEF_PROMISE_MAX: usize = 200;
pub const BRIEF_PROOF_POINT_MAX: usize = 180;
pub const BRIEF_PROOF_POINT_COUNT: usize = 3;
pub const BRIEF_OBJECTION_MAX: usize = 180;
pub const BRIEF_RESPONSE_MAX: usize = 220;
pub const BRIEF_OBJECTIONS_MIN: usize = 2;
pub const BRIEF_OBJECTIONS_MAX: usize = 3;
pub const BRIEF_PILLAR_MAX: usize = 140;
pub const BRIEF_PILLAR_COUNT: usize = 3;
pub const BRIEF_LIST_ITEM_MAX: usize = 120;
pub const BRIEF_LIST_MIN: usize = 3;
pub const BRIEF_LIST_MAX: usize = 6;

// =============================================================================
// BRAND VOICE FIELDS
// =============================================================================

pub const VOICE_TAGLINE_COUNT: usize = 3;
pub const VOICE_SAMPLE_LINE_COUNT: usize = 3;
pub const VOICE_LIST_MIN: usize = 3;
pub const VOICE_LIST_MAX: usize = 6;

// =============================================================================
// PALETTE
// =============================================================================

/// Neutral swatches per palette, ordered light→dark or dark→light.
pub const NEUTRAL_COUNT: usize = 4;

// =============================================================================
// SANITIZER FALLBACK COPY
// =============================================================================

/// Substituted per hook slot when avoid-word stripping empties the field.
pub const HOOK_FALLBACKS: [&str; 3] = [
    "Clear value for the right audience.",
    "Consistent message with stronger impact.",
    "A fresh angle that still fits your brand.",
];

/// Substituted per caption slot when avoid-word stripping empties the field.
pub const CAPTION_FALLBACKS: [&str; 3] = [
    "Practical caption aligned with your brand voice and CTA.",
    "Audience-focused caption that keeps your message clear.",
    "Conversion-ready caption tailored to your brand direction.",
];

/// Substituted for an emptied or missing version-2 angle.
pub const ANGLE_FALLBACK: &str = "Brand-aligned captions for your campaign goal.";

/// Substituted for an emptied version-2 CTA line.
pub const CTA_LINE_FALLBACK: &str = "Take the next step today.";

// =============================================================================
// GENERATION BACKEND
// =============================================================================

/// Default OpenAI-compatible API endpoint.
pub const OPENAI_URL: &str = "https://api.openai.com/v1";

/// Default generation model slug.
pub const GEN_MODEL: &str = "gpt-4o-mini";

/// Timeout for generation requests (seconds). Caption packs and briefs are
/// single-shot completions, well under this even on slow upstreams.
pub const GEN_TIMEOUT_SECS: u64 = 120;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;
