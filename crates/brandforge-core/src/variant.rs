//! Variant derivation: facet merge law and parent eligibility.
//!
//! A variant regenerates exactly one facet of a parent caption pack. The
//! merge law is strict: the requested facet comes from the new generation,
//! every other facet is copied verbatim from the parent's frozen output.
//! Parents must be root (non-variant) version-2 items in the same
//! campaign; variants of variants are not allowed.

use crate::error::{Error, Result};
use crate::models::{
    AssetCampaign, Caption, CaptionOutputV2, CaptionPack, VariantMode,
};
use crate::readers::read_caption_pack;

/// Merge a freshly generated output onto a parent according to the variant
/// mode.
///
/// - `hooks_only`: hooks from `generated`; angle and captions from parent.
/// - `captions_only`: captions (text and CTA line) from `generated`; angle
///   and hooks from parent.
/// - `ctas_only`: only each caption's `cta_line` from `generated`; caption
///   text, hooks, and angle from parent.
pub fn merge_variant_output(
    parent: &CaptionOutputV2,
    generated: CaptionOutputV2,
    mode: VariantMode,
) -> CaptionOutputV2 {
    match mode {
        VariantMode::HooksOnly => CaptionOutputV2 {
            angle: parent.angle.clone(),
            hooks: generated.hooks,
            captions: parent.captions.clone(),
        },
        VariantMode::CaptionsOnly => CaptionOutputV2 {
            angle: parent.angle.clone(),
            hooks: parent.hooks.clone(),
            captions: generated.captions,
        },
        VariantMode::CtasOnly => {
            let mut generated_lines = generated.captions.into_iter().map(|c| c.cta_line);
            CaptionOutputV2 {
                angle: parent.angle.clone(),
                hooks: parent.hooks.clone(),
                captions: parent.captions.clone().map(|caption| Caption {
                    text: caption.text,
                    cta_line: generated_lines.next().unwrap_or(caption.cta_line),
                }),
            }
        }
    }
}

/// Locate and validate the parent item for a variant request.
///
/// The parent must exist in this campaign, refine into a valid caption
/// pack, carry no `parent_id` of its own, and be a version-2 output.
pub fn find_variant_parent(campaign: &AssetCampaign, parent_item_id: &str) -> Result<CaptionPack> {
    let item = campaign
        .items
        .iter()
        .find(|item| item.id == parent_item_id)
        .ok_or_else(|| Error::InvalidInput("parentItemId not found in campaign.".to_string()))?;

    let pack = read_caption_pack(item).ok_or_else(|| {
        Error::InvalidInput("parent item is not a valid caption pack.".to_string())
    })?;

    if pack.parent_id.is_some() {
        return Err(Error::InvalidInput(
            "variants must derive from a root item.".to_string(),
        ));
    }
    if pack.output.as_v2().is_none() {
        return Err(Error::InvalidInput(
            "variants require a version-2 parent item.".to_string(),
        ));
    }

    Ok(pack)
}
