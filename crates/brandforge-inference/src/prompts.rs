//! Task prompts and prompt-context builders.
//!
//! Each generation task pairs a fixed system prompt (the output contract
//! the normalizers re-validate against) with a structured JSON context
//! assembled from the stored document. The context is sent as the user
//! message, pretty-printed, so the collaborator sees brand facts in one
//! predictable shape.

use serde_json::{json, Value as JsonValue};

use brandforge_core::models::{
    AssetCampaign, BrandConstraints, BrandPalette, BrandProfile, BrandVoice, CaptionInput,
    CaptionOutputV2, VariantInfo,
};

/// The wizard facts stored on every kit record.
#[derive(Debug, Clone, Copy)]
pub struct KitFacts<'a> {
    pub mode: &'a str,
    pub business: &'a str,
    pub vibe: &'a str,
}

impl<'a> KitFacts<'a> {
    fn base(&self) -> JsonValue {
        json!({
            "mode": self.mode,
            "business": self.business,
            "vibe": self.vibe,
        })
    }
}

fn merge(mut base: JsonValue, extra: JsonValue) -> JsonValue {
    if let (Some(base_map), Some(extra_map)) = (base.as_object_mut(), extra.as_object()) {
        for (key, value) in extra_map {
            if !value.is_null() {
                base_map.insert(key.clone(), value.clone());
            }
        }
    }
    base
}

fn visual_block(palette: Option<&BrandPalette>) -> JsonValue {
    match palette {
        Some(p) => json!({
            "primary": p.primary,
            "secondary": p.secondary,
            "accent": p.accent,
            "neutrals": p.neutrals,
            "headlineFont": p.headline_font,
            "bodyFont": p.body_font,
        }),
        None => JsonValue::Null,
    }
}

fn profile_block(profile: &BrandProfile) -> JsonValue {
    json!({
        "name": profile.name,
        "audience": profile.audience,
        "description": profile.description,
        "tone": {
            "bold": profile.tone.bold,
            "playful": profile.tone.playful,
            "formal": profile.tone.formal,
            "emotional": profile.tone.emotional,
        },
    })
}

fn constraints_block(constraints: &BrandConstraints) -> JsonValue {
    json!({
        "formality": constraints.formality,
        "humor": constraints.humor,
        "intensity": constraints.intensity,
        "allowWords": constraints.allow_words,
        "avoidWords": constraints.avoid_words,
    })
}

fn campaign_block(campaign: &AssetCampaign) -> JsonValue {
    json!({
        "id": campaign.id,
        "name": campaign.name,
        "goal": campaign.goal,
        "platform": campaign.platform,
        "ctaStyle": campaign.cta_style,
        "toneOverride": campaign.tone_override,
        "notes": campaign.notes,
    })
}

// =============================================================================
// PALETTE
// =============================================================================

/// System prompt for first-kit palette generation.
pub fn palette_system_prompt() -> &'static str {
    "You are a senior brand designer for modern SaaS marketing.\n\
     Return ONLY valid JSON (no markdown, no commentary).\n\
     Rules:\n\
     1) Avoid generic default palettes. DO NOT use these hexes unless the user explicitly provided them: \
     #3B82F6, #2563EB, #1D4ED8, #10B981, #22C55E, #F59E0B, #111827, #0F172A.\n\
     2) Palette must feel specific to the requested vibe + business.\n\
     3) Ensure good contrast: secondary must be much darker or much lighter than primary.\n\
     4) Neutrals must be 4 values from light to dark or dark to light, consistent with the vibe.\n\
     Output schema keys EXACTLY: primary, secondary, accent, neutrals (array of 4 hex), headlineFont, bodyFont.\n\
     Fonts: pick headlineFont and bodyFont from modern web-safe Google fonts (e.g., Inter, Manrope, Plus Jakarta Sans, Space Grotesk, Sora, DM Sans, IBM Plex Sans)."
}

/// Context for palette generation: wizard facts plus any user-picked seeds.
pub fn palette_context(
    facts: KitFacts<'_>,
    primary: Option<&str>,
    secondary: Option<&str>,
) -> JsonValue {
    merge(
        facts.base(),
        json!({
            "primary": primary,
            "secondary": secondary,
        }),
    )
}

// =============================================================================
// BRAND CORE
// =============================================================================

/// System prompt for profile + constraints generation.
pub fn brand_core_system_prompt() -> &'static str {
    "You are a senior brand strategist creating practical, specific brand operating rules.\n\
     Return ONLY valid JSON (no markdown, no commentary).\n\
     Keep outputs concise and non-generic.\n\
     Rules:\n\
     1) name: short and brandable.\n\
     2) audience: specific and concrete.\n\
     3) description: 1-2 sentences.\n\
     4) tone and constraints sliders: integers 0..100.\n\
     5) allowWords length must be 3..6.\n\
     6) avoidWords length must be 0..6.\n\
     7) Avoid profanity and unsafe/offensive language.\n\
     JSON schema keys EXACTLY:\n\
     {\n\
       \"profile\": {\n\
         \"name\": string,\n\
         \"audience\": string,\n\
         \"description\": string,\n\
         \"tone\": { \"bold\": number, \"playful\": number, \"formal\": number, \"emotional\": number }\n\
       },\n\
       \"constraints\": {\n\
         \"formality\": number,\n\
         \"humor\": number,\n\
         \"intensity\": number,\n\
         \"allowWords\": string[],\n\
         \"avoidWords\": string[]\n\
       }\n\
     }"
}

/// Context for brand-core generation.
pub fn brand_core_context(
    facts: KitFacts<'_>,
    palette: Option<&BrandPalette>,
    profile: &BrandProfile,
    constraints: &BrandConstraints,
) -> JsonValue {
    merge(
        facts.base(),
        json!({
            "visual": visual_block(palette),
            "profile": profile_block(profile),
            "constraints": constraints_block(constraints),
        }),
    )
}

// =============================================================================
// BRAND VOICE
// =============================================================================

/// System prompt for brand-voice generation.
pub fn voice_system_prompt() -> &'static str {
    "You are a senior brand strategist for modern marketing teams.\n\
     Generate short, clear, marketing-friendly copy.\n\
     No profanity, no edgy/offensive language, no unsafe claims.\n\
     Return ONLY valid JSON (no markdown, no commentary).\n\
     JSON schema keys EXACTLY:\n\
     {\n\
       \"taglines\": string[3],\n\
       \"voiceSummary\": string,\n\
       \"guidelines\": string[3..6],\n\
       \"do\": string[3..6],\n\
       \"dont\": string[3..6],\n\
       \"sampleLines\": string[3]\n\
     }\n\
     Keep each line concise and usable in social and landing-page copy."
}

/// Context for voice generation.
pub fn voice_context(
    facts: KitFacts<'_>,
    palette: Option<&BrandPalette>,
    profile: &BrandProfile,
) -> JsonValue {
    merge(
        facts.base(),
        json!({
            "visual": visual_block(palette),
            "profile": profile_block(profile),
        }),
    )
}

// =============================================================================
// CAPTION PACK
// =============================================================================

/// System prompt for caption-pack generation (version-2 output schema).
pub fn caption_pack_system_prompt() -> &'static str {
    "You are a senior social copywriter creating brand-aware caption assets.\n\
     Return ONLY valid JSON with no markdown or prose.\n\
     Write concise, practical hooks and captions aligned to the brand input.\n\
     Respect brand constraints and avoid prohibited language.\n\
     JSON schema keys EXACTLY:\n\
     {\n\
       \"angle\": string,\n\
       \"hooks\": [\n\
         { \"style\": \"Curiosity\"|\"Pain\"|\"Proof\", \"text\": string },\n\
         { \"style\": \"Curiosity\"|\"Pain\"|\"Proof\", \"text\": string },\n\
         { \"style\": \"Curiosity\"|\"Pain\"|\"Proof\", \"text\": string }\n\
       ],\n\
       \"captions\": [\n\
         { \"text\": string, \"ctaLine\": string },\n\
         { \"text\": string, \"ctaLine\": string },\n\
         { \"text\": string, \"ctaLine\": string }\n\
       ]\n\
     }\n\
     Rules:\n\
     - angle: 1 concise sentence, <= 140 chars.\n\
     - hooks: exactly 3, each style must be one of Curiosity/Pain/Proof and text <= 120 chars.\n\
     - captions: exactly 3, each text <= 500 chars and ctaLine <= 90 chars.\n\
     - captions should be CTA-ready and platform-safe.\n\
     - respect avoidWords strictly: never include any avoidWords terms.\n\
     - use allowWords naturally when it fits; do not force repetition.\n\
     - adapt structure and length to platform context (shorter lines for fast-scroll platforms, more context for professional channels).\n\
     - adjust energy and punch based on goal and campaign.toneOverride when provided.\n\
     - when a variant block is present, regenerate ONLY the facet named by variant.mode at the requested variant.tone, keeping the parentOutput's other facets as creative anchors.\n\
     - avoid generic filler copy and repetition."
}

/// Context for caption-pack generation. For variants, the parent item's
/// frozen output and the requested mode/tone ride along so the
/// collaborator regenerates the right facet.
#[allow(clippy::too_many_arguments)]
pub fn caption_pack_context(
    facts: KitFacts<'_>,
    input: &CaptionInput,
    palette: Option<&BrandPalette>,
    profile: &BrandProfile,
    constraints: &BrandConstraints,
    voice: Option<&BrandVoice>,
    campaign: Option<&AssetCampaign>,
    variant: Option<(&VariantInfo, &CaptionOutputV2)>,
) -> JsonValue {
    let voice_value = match voice {
        Some(v) => json!({
            "voiceSummary": v.voice_summary,
            "guidelines": v.guidelines,
            "do": v.do_list,
            "dont": v.dont_list,
        }),
        None => JsonValue::Null,
    };

    let (variant_value, parent_output) = match variant {
        Some((info, parent)) => (
            serde_json::to_value(info).unwrap_or(JsonValue::Null),
            serde_json::to_value(parent).unwrap_or(JsonValue::Null),
        ),
        None => (JsonValue::Null, JsonValue::Null),
    };

    merge(
        facts.base(),
        json!({
            "goal": input.goal,
            "cta": input.cta,
            "topic": input.topic,
            "visual": visual_block(palette),
            "profile": profile_block(profile),
            "constraints": constraints_block(constraints),
            "voiceAi": voice_value,
            "campaign": campaign.map(campaign_block),
            "variant": variant_value,
            "parentOutput": parent_output,
        }),
    )
}

// =============================================================================
// CAMPAIGN BRIEF
// =============================================================================

/// System prompt for campaign-brief generation.
pub fn campaign_brief_system_prompt() -> &'static str {
    "You are a senior campaign strategist producing a concise campaign brief.\n\
     Return ONLY valid JSON, no markdown and no extra prose.\n\
     Use non-generic language and align tightly with the provided brand + campaign context.\n\
     Respect avoidWords strictly and prefer allowWords naturally.\n\
     Keep copy concise and practical for execution.\n\
     JSON schema keys EXACTLY:\n\
     {\n\
       \"angle\": string,\n\
       \"promise\": string,\n\
       \"proofPoints\": [string, string, string],\n\
       \"objections\": [\n\
         { \"objection\": string, \"response\": string },\n\
         { \"objection\": string, \"response\": string }\n\
       ],\n\
       \"pillars\": [string, string, string],\n\
       \"do\": string[],\n\
       \"dont\": string[]\n\
     }\n\
     Rules:\n\
     - proofPoints must be exactly 3.\n\
     - pillars must be exactly 3.\n\
     - objections must be 2 to 3 items.\n\
     - do and dont must be 3 to 6 items each.\n\
     - keep each line short and execution-ready."
}

/// Context for brief generation.
pub fn campaign_brief_context(
    facts: KitFacts<'_>,
    palette: Option<&BrandPalette>,
    profile: &BrandProfile,
    constraints: &BrandConstraints,
    campaign: &AssetCampaign,
) -> JsonValue {
    merge(
        facts.base(),
        json!({
            "visual": visual_block(palette),
            "profile": profile_block(profile),
            "constraints": constraints_block(constraints),
            "campaign": campaign_block(campaign),
        }),
    )
}

/// Render a context as the user message.
pub fn render_context(context: &JsonValue) -> String {
    serde_json::to_string_pretty(context).unwrap_or_else(|_| context.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandforge_core::models::ToneSliders;

    fn facts() -> KitFacts<'static> {
        KitFacts { mode: "guided", business: "coffee roastery", vibe: "warm minimal" }
    }

    #[test]
    fn test_palette_context_drops_absent_seeds() {
        let context = palette_context(facts(), Some("#AA1122"), None);
        assert_eq!(context["primary"], "#AA1122");
        assert!(context.get("secondary").is_none());
        assert_eq!(context["business"], "coffee roastery");
    }

    #[test]
    fn test_caption_pack_context_shapes() {
        let profile = BrandProfile {
            name: "Ember".into(),
            audience: "Home brewers".into(),
            description: "Small-batch beans.".into(),
            tone: ToneSliders::default(),
        };
        let constraints = BrandConstraints {
            avoid_words: vec!["cheap".into()],
            ..BrandConstraints::default()
        };
        let input = CaptionInput {
            goal: "Awareness".into(),
            cta: "Try now".into(),
            topic: None,
        };

        let context =
            caption_pack_context(facts(), &input, None, &profile, &constraints, None, None, None);

        assert_eq!(context["goal"], "Awareness");
        assert_eq!(context["constraints"]["avoidWords"][0], "cheap");
        // null blocks are dropped, not serialized
        assert!(context.get("visual").is_none());
        assert!(context.get("variant").is_none());
        assert!(context.get("topic").is_none());
    }

    #[test]
    fn test_render_context_is_pretty_json() {
        let rendered = render_context(&palette_context(facts(), None, None));
        assert!(rendered.contains('\n'));
        assert!(serde_json::from_str::<serde_json::Value>(&rendered).is_ok());
    }
}
