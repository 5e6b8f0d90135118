//! Campaign intelligence briefs: generation and gated patch updates.

use chrono::Utc;
use serde_json::Value as JsonValue;
use tracing::info;
use uuid::Uuid;

use brandforge_core::{
    read_asset_campaigns, read_brief, read_brief_patch, trim_and_clamp, validate_complete_brief,
    writers, BriefPatch, BriefSource, CampaignIntelligence, Error, KitRecord, Result,
};
use brandforge_inference::{campaign_brief_context, campaign_brief_system_prompt, render_context};

use super::{document_of, document_views, facts_of, parse_generated, ServiceDeps};

static NULL: JsonValue = JsonValue::Null;

/// Brief generation and user patch updates for one campaign.
#[derive(Clone)]
pub struct IntelligenceService {
    deps: ServiceDeps,
}

impl IntelligenceService {
    pub fn new(deps: ServiceDeps) -> Self {
        Self { deps }
    }

    /// Dispatch one intelligence-route request body.
    pub async fn handle(
        &self,
        id: Uuid,
        owner_id: &str,
        campaign_id: &str,
        body: &JsonValue,
    ) -> Result<()> {
        let record = self
            .deps
            .kits
            .get_for_owner(id, owner_id)
            .await?
            .ok_or(Error::KitNotFound(id))?;

        let action = trim_and_clamp(body.get("action").unwrap_or(&NULL), 40);
        match action.as_str() {
            "generate_brief" => self.generate_brief(&record, campaign_id).await,
            "update_brief" => {
                self.update_brief(&record, campaign_id, body.get("brief").unwrap_or(&NULL))
                    .await
            }
            _ => Err(Error::InvalidInput("Invalid action".to_string())),
        }
    }

    /// Generate a complete brief and store it with `source: "ai"`.
    async fn generate_brief(&self, record: &KitRecord, campaign_id: &str) -> Result<()> {
        let doc = document_of(record);
        let mut campaigns =
            read_asset_campaigns(doc.get("assets").unwrap_or(&NULL), record.created_at);
        let index = campaigns
            .iter()
            .position(|campaign| campaign.id == campaign_id)
            .ok_or_else(|| Error::CampaignNotFound(campaign_id.to_string()))?;

        let views = document_views(&doc);
        let context = campaign_brief_context(
            facts_of(record),
            views.palette.as_ref(),
            &views.profile,
            &views.constraints,
            &campaigns[index],
        );

        let raw = self
            .deps
            .generator
            .generate_with_system(campaign_brief_system_prompt(), &render_context(&context))
            .await?;

        let brief = parse_generated(&raw)
            .and_then(|parsed| read_brief(&parsed))
            .ok_or_else(|| Error::Generation("Invalid campaign brief output".to_string()))?;

        let now = Utc::now();
        campaigns[index].intelligence = Some(CampaignIntelligence {
            brief,
            source: BriefSource::Ai,
            updated_at: now,
        });
        campaigns[index].updated_at = now;

        let next = writers::save_campaigns(&doc, &campaigns, now)?;
        self.deps.kits.replace_document(record.id, &next).await?;

        info!(
            subsystem = "api",
            component = "intelligence_service",
            op = "generate_brief",
            kit_id = %record.id,
            campaign_id = %campaign_id,
            "Stored generated brief"
        );
        Ok(())
    }

    /// Merge a user patch onto the stored brief; the merged result must
    /// pass the complete-brief validator or nothing is persisted.
    async fn update_brief(
        &self,
        record: &KitRecord,
        campaign_id: &str,
        brief_value: &JsonValue,
    ) -> Result<()> {
        let patch = read_brief_patch(brief_value)?;

        let doc = document_of(record);
        let mut campaigns =
            read_asset_campaigns(doc.get("assets").unwrap_or(&NULL), record.created_at);
        let index = campaigns
            .iter()
            .position(|campaign| campaign.id == campaign_id)
            .ok_or_else(|| Error::CampaignNotFound(campaign_id.to_string()))?;

        let existing = campaigns[index]
            .intelligence
            .as_ref()
            .map(|intelligence| BriefPatch::from_complete(&intelligence.brief))
            .unwrap_or_default();

        let merged = validate_complete_brief(&patch.merged_onto(existing)).ok_or_else(|| {
            Error::InvalidInput("Brief is incomplete or invalid.".to_string())
        })?;

        let now = Utc::now();
        campaigns[index].intelligence = Some(CampaignIntelligence {
            brief: merged,
            source: BriefSource::User,
            updated_at: now,
        });
        campaigns[index].updated_at = now;

        let next = writers::save_campaigns(&doc, &campaigns, now)?;
        self.deps.kits.replace_document(record.id, &next).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandforge_db::MemoryKitRepository;
    use brandforge_inference::MockGenerationBackend;
    use serde_json::json;
    use std::sync::Arc;

    fn service() -> (IntelligenceService, Arc<MemoryKitRepository>, MockGenerationBackend) {
        let kits = Arc::new(MemoryKitRepository::new());
        let generator = MockGenerationBackend::new();
        let deps = ServiceDeps::new(kits.clone(), Arc::new(generator.clone()));
        (IntelligenceService::new(deps), kits, generator)
    }

    fn seed_kit_with_campaign(kits: &MemoryKitRepository) -> (KitRecord, String) {
        let record = KitRecord {
            id: Uuid::new_v4(),
            owner_id: "owner-a".to_string(),
            mode: "guided".to_string(),
            business: "coffee roastery".to_string(),
            vibe: "warm minimal".to_string(),
            created_at: Utc::now(),
            kit_json: json!({
                "assets": {"campaigns": [{
                    "id": "c1", "name": "Launch Week", "goal": "Get signups",
                    "platform": "Instagram", "createdAt": "2024-02-01T00:00:00Z",
                    "items": []
                }]},
                "meta": {"version": 3}
            }),
        };
        kits.seed(record.clone());
        (record, "c1".to_string())
    }

    fn brief_response() -> String {
        json!({
            "angle": "The calm choice for busy mornings.",
            "promise": "Better coffee with less fuss.",
            "proofPoints": ["10k subscribers", "4.9 rating", "Roasted weekly"],
            "objections": [
                {"objection": "Too pricey", "response": "Cheaper than cafe habits"},
                {"objection": "Subscriptions lock me in", "response": "Pause anytime"}
            ],
            "pillars": ["Craft", "Ritual", "Simplicity"],
            "do": ["Name the roast", "Show the process", "Keep it warm"],
            "dont": ["No hype", "No jargon", "No guilt"]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_generate_brief_stores_ai_provenance() {
        let (service, kits, generator) = service();
        let (record, campaign_id) = seed_kit_with_campaign(&kits);

        generator.push_response(brief_response());
        service
            .handle(record.id, "owner-a", &campaign_id, &json!({"action": "generate_brief"}))
            .await
            .unwrap();

        let doc = kits.document(record.id).unwrap();
        assert_eq!(doc["meta"]["version"], json!(4));
        let campaigns = read_asset_campaigns(&doc["assets"], record.created_at);
        let intelligence = campaigns[0].intelligence.as_ref().unwrap();
        assert_eq!(intelligence.source, BriefSource::Ai);
        assert_eq!(intelligence.brief.pillars[0], "Craft");
    }

    #[tokio::test]
    async fn test_generate_brief_invalid_output_rejected() {
        let (service, kits, generator) = service();
        let (record, campaign_id) = seed_kit_with_campaign(&kits);

        generator.push_response(json!({"angle": "only an angle"}).to_string());
        let err = service
            .handle(record.id, "owner-a", &campaign_id, &json!({"action": "generate_brief"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid campaign brief output"));

        // nothing persisted
        let doc = kits.document(record.id).unwrap();
        assert_eq!(doc["meta"]["version"], json!(3));
    }

    #[tokio::test]
    async fn test_update_brief_patch_onto_empty_fails_whole_update() {
        let (service, kits, _) = service();
        let (record, campaign_id) = seed_kit_with_campaign(&kits);

        let err = service
            .handle(
                record.id,
                "owner-a",
                &campaign_id,
                &json!({
                    "action": "update_brief",
                    "brief": {"proofPoints": ["a", "b", "c"]}
                }),
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Brief is incomplete or invalid."));

        let doc = kits.document(record.id).unwrap();
        assert_eq!(doc["meta"]["version"], json!(3));
        let campaigns = read_asset_campaigns(&doc["assets"], record.created_at);
        assert!(campaigns[0].intelligence.is_none());
    }

    #[tokio::test]
    async fn test_update_brief_patch_onto_complete_preserves_rest() {
        let (service, kits, generator) = service();
        let (record, campaign_id) = seed_kit_with_campaign(&kits);

        generator.push_response(brief_response());
        service
            .handle(record.id, "owner-a", &campaign_id, &json!({"action": "generate_brief"}))
            .await
            .unwrap();

        service
            .handle(
                record.id,
                "owner-a",
                &campaign_id,
                &json!({
                    "action": "update_brief",
                    "brief": {"proofPoints": ["New A", "New B", "New C"]}
                }),
            )
            .await
            .unwrap();

        let doc = kits.document(record.id).unwrap();
        assert_eq!(doc["meta"]["version"], json!(5));
        let campaigns = read_asset_campaigns(&doc["assets"], record.created_at);
        let intelligence = campaigns[0].intelligence.as_ref().unwrap();
        assert_eq!(intelligence.source, BriefSource::User);
        assert_eq!(intelligence.brief.proof_points[0], "New A");
        assert_eq!(intelligence.brief.angle, "The calm choice for busy mornings.");
        assert_eq!(intelligence.brief.dont_list.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_campaign_and_action_rejected() {
        let (service, kits, _) = service();
        let (record, _) = seed_kit_with_campaign(&kits);

        let err = service
            .handle(record.id, "owner-a", "ghost", &json!({"action": "generate_brief"}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CampaignNotFound(_)));

        let err = service
            .handle(record.id, "owner-a", "c1", &json!({"action": "delete_brief"}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_empty_patch_rejected() {
        let (service, kits, _) = service();
        let (record, campaign_id) = seed_kit_with_campaign(&kits);

        let err = service
            .handle(
                record.id,
                "owner-a",
                &campaign_id,
                &json!({"action": "update_brief", "brief": {}}),
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("brief patch is empty."));
    }
}
