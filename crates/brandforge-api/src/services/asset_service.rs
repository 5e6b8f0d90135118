//! Campaign and caption-pack orchestration.
//!
//! One entry point handles the asset route's action family:
//! `create_campaign`, `update_campaign_context`, `variant_caption_pack`,
//! and bare `type:"caption_pack"` first-generation. Generation follows the
//! single-retry-then-sanitize policy: one re-invocation on an avoid-word
//! violation, then the deterministic sanitizer, never surfaced as an
//! error and never looped.

use chrono::Utc;
use serde_json::Value as JsonValue;
use tracing::{info, warn};
use uuid::Uuid;

use brandforge_core::{
    defaults, facet_has_avoid_words, find_variant_parent, merge_variant_output,
    output_has_avoid_words, read_asset_campaigns, read_caption_output_v2, sanitize_facet,
    sanitize_output, trim_and_clamp, writers, AssetCampaign, AssetItem, CaptionInput,
    CaptionOutput, CaptionOutputV2, Error, KitRecord, Result, VariantInfo, VariantMode,
    VariantTone,
};
use brandforge_inference::{caption_pack_context, caption_pack_system_prompt, render_context};

use super::{document_of, document_views, facts_of, parse_generated, ServiceDeps};

static NULL: JsonValue = JsonValue::Null;

/// What an asset write touched, for the response body.
#[derive(Debug, Clone)]
pub struct AssetWriteOutcome {
    pub campaign_id: String,
    pub item_id: Option<String>,
}

/// Campaigns, caption packs, and variants.
#[derive(Clone)]
pub struct AssetService {
    deps: ServiceDeps,
}

impl AssetService {
    pub fn new(deps: ServiceDeps) -> Self {
        Self { deps }
    }

    /// Dispatch one asset-route request body.
    pub async fn handle(
        &self,
        id: Uuid,
        owner_id: &str,
        body: &JsonValue,
    ) -> Result<AssetWriteOutcome> {
        let record = self
            .deps
            .kits
            .get_for_owner(id, owner_id)
            .await?
            .ok_or(Error::KitNotFound(id))?;

        let action = trim_and_clamp(body.get("action").unwrap_or(&NULL), 40);
        match action.as_str() {
            "" => {
                let kind = trim_and_clamp(body.get("type").unwrap_or(&NULL), 40);
                if kind != "caption_pack" {
                    return Err(Error::InvalidInput("Invalid type".to_string()));
                }
                self.generate_caption_pack(&record, body).await
            }
            "create_campaign" => self.create_campaign(&record, body).await,
            "update_campaign_context" => self.update_campaign_context(&record, body).await,
            "variant_caption_pack" => self.variant_caption_pack(&record, body).await,
            _ => Err(Error::InvalidInput("Invalid action".to_string())),
        }
    }

    // -------------------------------------------------------------------------
    // Request field helpers
    // -------------------------------------------------------------------------

    fn required_text(body: &JsonValue, key: &str, min: usize, max: usize) -> Result<String> {
        let value = trim_and_clamp(body.get(key).unwrap_or(&NULL), max);
        if value.chars().count() < min {
            return Err(Error::InvalidInput(format!(
                "{} must be {} to {} characters.",
                key, min, max
            )));
        }
        Ok(value)
    }

    /// Optional context field: absent stays absent, an empty string clears
    /// the stored value, anything else must meet the minimum.
    fn optional_text(
        body: &JsonValue,
        key: &str,
        min: usize,
        max: usize,
    ) -> Result<Option<Option<String>>> {
        if body.get(key).is_none() {
            return Ok(None);
        }
        let value = trim_and_clamp(&body[key], max);
        if value.is_empty() {
            return Ok(Some(None));
        }
        if value.chars().count() < min {
            return Err(Error::InvalidInput(format!(
                "{} must be {} to {} characters.",
                key, min, max
            )));
        }
        Ok(Some(Some(value)))
    }

    fn required_campaign_id(body: &JsonValue) -> Result<String> {
        let campaign_id = trim_and_clamp(body.get("campaignId").unwrap_or(&NULL), 80);
        if campaign_id.is_empty() {
            return Err(Error::InvalidInput("campaignId is required.".to_string()));
        }
        Ok(campaign_id)
    }

    fn find_campaign(campaigns: &[AssetCampaign], campaign_id: &str) -> Result<usize> {
        campaigns
            .iter()
            .position(|campaign| campaign.id == campaign_id)
            .ok_or_else(|| Error::CampaignNotFound(campaign_id.to_string()))
    }

    async fn persist(
        &self,
        record: &KitRecord,
        doc: &JsonValue,
        campaigns: &[AssetCampaign],
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<()> {
        let next = writers::save_campaigns(doc, campaigns, now)?;
        self.deps.kits.replace_document(record.id, &next).await
    }

    // -------------------------------------------------------------------------
    // Campaign context actions
    // -------------------------------------------------------------------------

    async fn create_campaign(
        &self,
        record: &KitRecord,
        body: &JsonValue,
    ) -> Result<AssetWriteOutcome> {
        let name = Self::required_text(
            body,
            "name",
            defaults::CAMPAIGN_NAME_MIN,
            defaults::CAMPAIGN_NAME_MAX,
        )?;
        let goal = Self::required_text(
            body,
            "goal",
            defaults::CAMPAIGN_GOAL_MIN,
            defaults::CAMPAIGN_GOAL_MAX,
        )?;
        let platform = Self::required_text(
            body,
            "platform",
            defaults::CAMPAIGN_PLATFORM_MIN,
            defaults::CAMPAIGN_PLATFORM_MAX,
        )?;
        let cta_style = Self::optional_text(
            body,
            "ctaStyle",
            defaults::CAMPAIGN_CTA_STYLE_MIN,
            defaults::CAMPAIGN_CTA_STYLE_MAX,
        )?
        .flatten();
        let tone_override = Self::optional_text(
            body,
            "toneOverride",
            defaults::CAMPAIGN_TONE_OVERRIDE_MIN,
            defaults::CAMPAIGN_TONE_OVERRIDE_MAX,
        )?
        .flatten();
        let notes = Self::optional_text(body, "notes", 1, defaults::CAMPAIGN_NOTES_MAX)?.flatten();

        let doc = document_of(record);
        let mut campaigns = read_asset_campaigns(
            doc.get("assets").unwrap_or(&NULL),
            record.created_at,
        );

        let now = Utc::now();
        let campaign = AssetCampaign {
            id: Uuid::new_v4().to_string(),
            name,
            goal,
            platform,
            cta_style,
            tone_override,
            notes,
            created_at: now,
            updated_at: now,
            intelligence: None,
            items: Vec::new(),
        };
        let campaign_id = campaign.id.clone();
        campaigns.push(campaign);

        self.persist(record, &doc, &campaigns, now).await?;

        info!(
            subsystem = "api",
            component = "asset_service",
            op = "create_campaign",
            kit_id = %record.id,
            campaign_id = %campaign_id,
            "Created campaign"
        );
        Ok(AssetWriteOutcome { campaign_id, item_id: None })
    }

    async fn update_campaign_context(
        &self,
        record: &KitRecord,
        body: &JsonValue,
    ) -> Result<AssetWriteOutcome> {
        let campaign_id = Self::required_campaign_id(body)?;
        let name = Self::required_text(
            body,
            "name",
            defaults::CAMPAIGN_NAME_MIN,
            defaults::CAMPAIGN_NAME_MAX,
        )?;
        let goal = Self::required_text(
            body,
            "goal",
            defaults::CAMPAIGN_GOAL_MIN,
            defaults::CAMPAIGN_GOAL_MAX,
        )?;
        let platform = Self::required_text(
            body,
            "platform",
            defaults::CAMPAIGN_PLATFORM_MIN,
            defaults::CAMPAIGN_PLATFORM_MAX,
        )?;
        let cta_style = Self::optional_text(
            body,
            "ctaStyle",
            defaults::CAMPAIGN_CTA_STYLE_MIN,
            defaults::CAMPAIGN_CTA_STYLE_MAX,
        )?;
        let tone_override = Self::optional_text(
            body,
            "toneOverride",
            defaults::CAMPAIGN_TONE_OVERRIDE_MIN,
            defaults::CAMPAIGN_TONE_OVERRIDE_MAX,
        )?;
        let notes = Self::optional_text(body, "notes", 1, defaults::CAMPAIGN_NOTES_MAX)?;

        let doc = document_of(record);
        let mut campaigns =
            read_asset_campaigns(doc.get("assets").unwrap_or(&NULL), record.created_at);
        let index = Self::find_campaign(&campaigns, &campaign_id)?;

        let now = Utc::now();
        let campaign = &mut campaigns[index];
        campaign.name = name;
        campaign.goal = goal;
        campaign.platform = platform;
        if let Some(value) = cta_style {
            campaign.cta_style = value;
        }
        if let Some(value) = tone_override {
            campaign.tone_override = value;
        }
        if let Some(value) = notes {
            campaign.notes = value;
        }
        campaign.updated_at = now;

        self.persist(record, &doc, &campaigns, now).await?;
        Ok(AssetWriteOutcome { campaign_id, item_id: None })
    }

    // -------------------------------------------------------------------------
    // Generation
    // -------------------------------------------------------------------------

    async fn generate_v2(&self, context: &JsonValue) -> Result<Option<CaptionOutputV2>> {
        let raw = self
            .deps
            .generator
            .generate_with_system(caption_pack_system_prompt(), &render_context(context))
            .await?;
        Ok(parse_generated(&raw).and_then(|parsed| read_caption_output_v2(&parsed)))
    }

    async fn generate_caption_pack(
        &self,
        record: &KitRecord,
        body: &JsonValue,
    ) -> Result<AssetWriteOutcome> {
        let goal = trim_and_clamp(body.get("goal").unwrap_or(&NULL), defaults::ASSET_GOAL_MAX);
        let cta = trim_and_clamp(body.get("cta").unwrap_or(&NULL), defaults::ASSET_CTA_MAX);
        if goal.is_empty() || cta.is_empty() {
            return Err(Error::InvalidInput("goal and cta are required.".to_string()));
        }
        let topic = {
            let t = trim_and_clamp(body.get("topic").unwrap_or(&NULL), defaults::ASSET_TOPIC_MAX);
            if t.is_empty() {
                None
            } else {
                Some(t)
            }
        };
        let input = CaptionInput { goal, cta, topic };

        let doc = document_of(record);
        let mut campaigns =
            read_asset_campaigns(doc.get("assets").unwrap_or(&NULL), record.created_at);

        // An explicit campaignId must exist; without one the implicit
        // "General" campaign receives the item (pre-campaign clients).
        let requested_id = trim_and_clamp(body.get("campaignId").unwrap_or(&NULL), 80);
        let index = if requested_id.is_empty() {
            match campaigns.iter().position(|c| c.id == "general") {
                Some(index) => index,
                None => {
                    let now = Utc::now();
                    campaigns.push(AssetCampaign {
                        id: "general".to_string(),
                        name: "General".to_string(),
                        goal: String::new(),
                        platform: String::new(),
                        cta_style: None,
                        tone_override: None,
                        notes: None,
                        created_at: now,
                        updated_at: now,
                        intelligence: None,
                        items: Vec::new(),
                    });
                    campaigns.len() - 1
                }
            }
        } else {
            Self::find_campaign(&campaigns, &requested_id)?
        };

        let views = document_views(&doc);
        let avoid_words = views.constraints.avoid_words.clone();
        let campaign_snapshot = campaigns[index].clone();

        let context = caption_pack_context(
            facts_of(record),
            &input,
            views.palette.as_ref(),
            &views.profile,
            &views.constraints,
            views.voice.as_ref(),
            Some(&campaign_snapshot),
            None,
        );

        let first = self.generate_v2(&context).await?.ok_or_else(|| {
            Error::Generation("Could not generate valid assets.".to_string())
        })?;

        let mut output = CaptionOutput::V2(first);
        if output_has_avoid_words(&output, &avoid_words) {
            warn!(
                subsystem = "api",
                component = "asset_service",
                op = "caption_pack",
                kit_id = %record.id,
                attempt = 2,
                "Avoid-word violation, regenerating once"
            );
            if let Some(regenerated) = self.generate_v2(&context).await? {
                output = CaptionOutput::V2(regenerated);
            }
            if output_has_avoid_words(&output, &avoid_words) {
                output = sanitize_output(output, &avoid_words);
            }
        }

        let now = Utc::now();
        let item = AssetItem {
            id: Uuid::new_v4().to_string(),
            kind: "caption_pack".to_string(),
            output_version: 2,
            created_at: now,
            parent_id: None,
            variant: None,
            input: serde_json::to_value(&input)?,
            output: serde_json::to_value(&output)?,
        };
        let item_id = item.id.clone();

        let campaign_id = campaigns[index].id.clone();
        campaigns[index].items.push(item);
        campaigns[index].updated_at = now;

        self.persist(record, &doc, &campaigns, now).await?;

        info!(
            subsystem = "api",
            component = "asset_service",
            op = "caption_pack",
            kit_id = %record.id,
            campaign_id = %campaign_id,
            item_id = %item_id,
            "Stored caption pack"
        );
        Ok(AssetWriteOutcome { campaign_id, item_id: Some(item_id) })
    }

    async fn variant_caption_pack(
        &self,
        record: &KitRecord,
        body: &JsonValue,
    ) -> Result<AssetWriteOutcome> {
        let campaign_id = Self::required_campaign_id(body)?;
        let parent_item_id = trim_and_clamp(body.get("parentItemId").unwrap_or(&NULL), 80);
        if parent_item_id.is_empty() {
            return Err(Error::InvalidInput("parentItemId is required.".to_string()));
        }

        let mode = match trim_and_clamp(body.get("mode").unwrap_or(&NULL), 20).as_str() {
            "hooks_only" => VariantMode::HooksOnly,
            "captions_only" => VariantMode::CaptionsOnly,
            "ctas_only" => VariantMode::CtasOnly,
            _ => return Err(Error::InvalidInput("Invalid mode".to_string())),
        };
        let tone = match trim_and_clamp(body.get("tone").unwrap_or(&NULL), 20).as_str() {
            "" | "default" => VariantTone::Default,
            "softer" => VariantTone::Softer,
            "bolder" => VariantTone::Bolder,
            _ => return Err(Error::InvalidInput("Invalid tone".to_string())),
        };

        let doc = document_of(record);
        let mut campaigns =
            read_asset_campaigns(doc.get("assets").unwrap_or(&NULL), record.created_at);
        let index = Self::find_campaign(&campaigns, &campaign_id)?;
        let campaign_snapshot = campaigns[index].clone();

        let parent = find_variant_parent(&campaign_snapshot, &parent_item_id)?;
        let Some(parent_output) = parent.output.as_v2() else {
            return Err(Error::Internal("parent output version changed".to_string()));
        };

        let views = document_views(&doc);
        let avoid_words = views.constraints.avoid_words.clone();
        let variant = VariantInfo { mode, tone };

        let context = caption_pack_context(
            facts_of(record),
            &parent.input,
            views.palette.as_ref(),
            &views.profile,
            &views.constraints,
            views.voice.as_ref(),
            Some(&campaign_snapshot),
            Some((&variant, parent_output)),
        );

        let generated = self.generate_v2(&context).await?.ok_or_else(|| {
            Error::Generation("Could not generate valid assets.".to_string())
        })?;

        // Only the requested facet comes from the new generation; the rest
        // copies verbatim from the parent. The merged facet alone is
        // policy-checked; parent facets are already compliant.
        let mut merged = merge_variant_output(parent_output, generated, mode);
        if facet_has_avoid_words(&merged, mode, &avoid_words) {
            warn!(
                subsystem = "api",
                component = "asset_service",
                op = "variant_caption_pack",
                kit_id = %record.id,
                attempt = 2,
                "Avoid-word violation in variant facet, regenerating once"
            );
            if let Some(regenerated) = self.generate_v2(&context).await? {
                merged = merge_variant_output(parent_output, regenerated, mode);
            }
            if facet_has_avoid_words(&merged, mode, &avoid_words) {
                merged = sanitize_facet(merged, mode, &avoid_words);
            }
        }

        let now = Utc::now();
        let item = AssetItem {
            id: Uuid::new_v4().to_string(),
            kind: "caption_pack".to_string(),
            output_version: 2,
            created_at: now,
            parent_id: Some(parent.id.clone()),
            variant: Some(variant),
            input: serde_json::to_value(&parent.input)?,
            output: serde_json::to_value(CaptionOutput::V2(merged))?,
        };
        let item_id = item.id.clone();

        campaigns[index].items.push(item);
        campaigns[index].updated_at = now;

        self.persist(record, &doc, &campaigns, now).await?;

        info!(
            subsystem = "api",
            component = "asset_service",
            op = "variant_caption_pack",
            kit_id = %record.id,
            campaign_id = %campaign_id,
            item_id = %item_id,
            "Stored caption pack variant"
        );
        Ok(AssetWriteOutcome { campaign_id, item_id: Some(item_id) })
    }
}
