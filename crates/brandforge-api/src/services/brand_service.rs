//! Kit lifecycle and brand core/voice generation.

use chrono::Utc;
use serde_json::Value as JsonValue;
use tracing::{info, warn};
use uuid::Uuid;

use brandforge_core::{
    defaults, looks_like_hex, normalize_word_list, read_brand_voice, read_constraints,
    read_meta, read_profile, trim_and_clamp, writers, BrandConstraints, BrandProfile, Error,
    KitRecord, Result,
};
use brandforge_inference::{
    brand_core_context, brand_core_system_prompt, palette_context, palette_system_prompt,
    render_context, voice_context, voice_system_prompt,
};

use super::{document_of, document_views, facts_of, parse_generated, ServiceDeps};

/// Validated request to create a kit from the wizard.
#[derive(Debug, Clone)]
pub struct CreateKitRequest {
    pub mode: String,
    pub business: String,
    pub vibe: String,
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

/// Kit lifecycle plus the profile/constraints and voice generation flows.
#[derive(Clone)]
pub struct BrandService {
    deps: ServiceDeps,
}

impl BrandService {
    pub fn new(deps: ServiceDeps) -> Self {
        Self { deps }
    }

    async fn fetch(&self, id: Uuid, owner_id: &str) -> Result<KitRecord> {
        self.deps
            .kits
            .get_for_owner(id, owner_id)
            .await?
            .ok_or(Error::KitNotFound(id))
    }

    /// Read the create request out of an untyped body.
    pub fn read_create_request(body: &JsonValue) -> Result<CreateKitRequest> {
        static NULL: JsonValue = JsonValue::Null;
        let get = |key: &str| body.get(key).unwrap_or(&NULL);

        let mode = trim_and_clamp(get("mode"), 40);
        let business = trim_and_clamp(get("business"), 160);
        let vibe = trim_and_clamp(get("vibe"), 120);
        if mode.is_empty() || business.is_empty() || vibe.is_empty() {
            return Err(Error::InvalidInput(
                "mode, business, and vibe are required.".to_string(),
            ));
        }

        let seed = |key: &str| {
            let v = trim_and_clamp(get(key), 7);
            if v.is_empty() {
                None
            } else {
                Some(v)
            }
        };

        Ok(CreateKitRequest {
            mode,
            business,
            vibe,
            primary: seed("primary"),
            secondary: seed("secondary"),
        })
    }

    /// Generate a palette for the wizard facts and persist a fresh kit
    /// document (meta version 1).
    pub async fn create_kit(&self, owner_id: &str, request: CreateKitRequest) -> Result<KitRecord> {
        let facts = brandforge_inference::KitFacts {
            mode: &request.mode,
            business: &request.business,
            vibe: &request.vibe,
        };
        let context =
            palette_context(facts, request.primary.as_deref(), request.secondary.as_deref());
        let raw = self
            .deps
            .generator
            .generate_with_system(palette_system_prompt(), &render_context(&context))
            .await?;

        let palette = parse_generated(&raw)
            .and_then(|parsed| brandforge_core::read_brand_palette(&parsed))
            .filter(|palette| {
                looks_like_hex(&palette.primary)
                    && looks_like_hex(&palette.secondary)
                    && looks_like_hex(&palette.accent)
                    && palette.neutrals.iter().all(|n| looks_like_hex(n))
            })
            .ok_or_else(|| Error::Generation("Could not generate a valid brand kit.".to_string()))?;

        let now = Utc::now();
        let record = KitRecord {
            id: Uuid::new_v4(),
            owner_id: owner_id.to_string(),
            mode: request.mode,
            business: request.business,
            vibe: request.vibe,
            created_at: now,
            kit_json: writers::new_kit_document(&palette, now)?,
        };
        self.deps.kits.create(&record).await?;

        info!(
            subsystem = "api",
            component = "brand_service",
            op = "create_kit",
            kit_id = %record.id,
            "Created kit"
        );
        Ok(record)
    }

    pub async fn get_kit(&self, id: Uuid, owner_id: &str) -> Result<KitRecord> {
        self.fetch(id, owner_id).await
    }

    pub async fn list_kits(&self, owner_id: &str) -> Result<Vec<KitRecord>> {
        self.deps.kits.list_for_owner(owner_id).await
    }

    pub async fn delete_kit(&self, id: Uuid, owner_id: &str) -> Result<()> {
        if !self.deps.kits.delete_for_owner(id, owner_id).await? {
            return Err(Error::KitNotFound(id));
        }
        Ok(())
    }

    /// Apply profile and/or constraints fragments from an untyped PATCH
    /// body. At least one fragment must be present and each present
    /// fragment must validate.
    pub async fn patch_kit(&self, id: Uuid, owner_id: &str, body: &JsonValue) -> Result<()> {
        let has_profile = body.get("profile").is_some();
        let has_constraints = body.get("constraints").is_some();
        if !has_profile && !has_constraints {
            return Err(Error::InvalidInput("Missing profile or constraints".to_string()));
        }

        let profile = if has_profile {
            Some(
                read_profile(&body["profile"])
                    .ok_or_else(|| Error::InvalidInput("Invalid profile".to_string()))?,
            )
        } else {
            None
        };
        let constraints = if has_constraints {
            Some(
                read_constraints(&body["constraints"])
                    .ok_or_else(|| Error::InvalidInput("Invalid constraints".to_string()))?,
            )
        } else {
            None
        };

        let record = self.fetch(id, owner_id).await?;
        let doc = document_of(&record);
        let next = writers::save_profile(&doc, profile.as_ref(), constraints.as_ref(), Utc::now())?;
        self.deps.kits.replace_document(id, &next).await
    }

    /// Generate profile + constraints ("brand core"), preserving existing
    /// user-entered identity fields and an existing valid allow-word list.
    pub async fn generate_core(&self, id: Uuid, owner_id: &str) -> Result<()> {
        let record = self.fetch(id, owner_id).await?;
        let doc = document_of(&record);
        let views = document_views(&doc);

        let context = brand_core_context(
            facts_of(&record),
            views.palette.as_ref(),
            &views.profile,
            &views.constraints,
        );
        let raw = self
            .deps
            .generator
            .generate_with_system(brand_core_system_prompt(), &render_context(&context))
            .await?;

        let (generated_profile, generated_constraints) = parse_generated(&raw)
            .and_then(|parsed| Self::normalize_core(&parsed))
            .ok_or_else(|| {
                Error::Generation("Could not generate valid brand core.".to_string())
            })?;

        // Existing user-entered values win over generated ones.
        let existing = &views.profile;
        let profile = BrandProfile {
            name: if existing.name.trim().is_empty() {
                generated_profile.name
            } else {
                existing.name.trim().to_string()
            },
            audience: if existing.audience.trim().is_empty() {
                generated_profile.audience
            } else {
                existing.audience.trim().to_string()
            },
            description: if existing.description.trim().is_empty() {
                generated_profile.description
            } else {
                existing.description.trim().to_string()
            },
            tone: generated_profile.tone,
        };

        let existing_allow = &views.constraints.allow_words;
        let allow_words = if existing_allow.len() >= defaults::ALLOW_WORDS_MIN {
            existing_allow.clone()
        } else {
            generated_constraints.allow_words.clone()
        };
        let constraints = BrandConstraints { allow_words, ..generated_constraints };
        if constraints.allow_words.len() < defaults::ALLOW_WORDS_MIN {
            return Err(Error::Generation("Could not generate valid brand core.".to_string()));
        }

        let next = writers::save_profile(&doc, Some(&profile), Some(&constraints), Utc::now())?;
        self.deps.kits.replace_document(id, &next).await?;

        info!(
            subsystem = "api",
            component = "brand_service",
            op = "generate_core",
            kit_id = %id,
            doc_version = read_meta(next.get("meta").unwrap_or(&JsonValue::Null)).version,
            "Stored brand core"
        );
        Ok(())
    }

    fn normalize_core(parsed: &JsonValue) -> Option<(BrandProfile, BrandConstraints)> {
        let mut profile = read_profile(parsed.get("profile")?)?;
        let constraints_value = parsed.get("constraints")?;
        read_constraints(constraints_value)?;

        profile.name = profile.name.trim().to_string();
        profile.audience = profile.audience.trim().to_string();
        profile.description = profile.description.trim().to_string();

        static NULL: JsonValue = JsonValue::Null;
        let constraints = BrandConstraints {
            formality: brandforge_core::clamp_percent(
                constraints_value.get("formality").unwrap_or(&NULL),
                defaults::FORMALITY_DEFAULT,
            ),
            humor: brandforge_core::clamp_percent(
                constraints_value.get("humor").unwrap_or(&NULL),
                defaults::HUMOR_DEFAULT,
            ),
            intensity: brandforge_core::clamp_percent(
                constraints_value.get("intensity").unwrap_or(&NULL),
                defaults::INTENSITY_DEFAULT,
            ),
            allow_words: normalize_word_list(
                constraints_value.get("allowWords").unwrap_or(&NULL),
                defaults::WORD_LIST_CAP,
            ),
            avoid_words: normalize_word_list(
                constraints_value.get("avoidWords").unwrap_or(&NULL),
                defaults::WORD_LIST_CAP,
            ),
        };

        if constraints.allow_words.len() < defaults::ALLOW_WORDS_MIN {
            warn!(
                subsystem = "api",
                component = "brand_service",
                op = "generate_core",
                "Generated allow-word list below minimum"
            );
            return None;
        }

        Some((profile, constraints))
    }

    /// Generate the AI voice block and store it under `voiceAi`.
    pub async fn generate_voice(&self, id: Uuid, owner_id: &str) -> Result<()> {
        let record = self.fetch(id, owner_id).await?;
        let doc = document_of(&record);
        let views = document_views(&doc);

        let context = voice_context(facts_of(&record), views.palette.as_ref(), &views.profile);
        let raw = self
            .deps
            .generator
            .generate_with_system(voice_system_prompt(), &render_context(&context))
            .await?;

        let voice = parse_generated(&raw)
            .and_then(|parsed| read_brand_voice(&parsed))
            .ok_or_else(|| {
                Error::Generation("AI returned invalid voice suggestions.".to_string())
            })?;

        let next = writers::save_voice(&doc, &voice, Utc::now())?;
        self.deps.kits.replace_document(id, &next).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandforge_db::MemoryKitRepository;
    use brandforge_inference::MockGenerationBackend;
    use serde_json::json;
    use std::sync::Arc;

    fn service() -> (BrandService, Arc<MemoryKitRepository>, MockGenerationBackend) {
        let kits = Arc::new(MemoryKitRepository::new());
        let generator = MockGenerationBackend::new();
        let deps = ServiceDeps::new(kits.clone(), Arc::new(generator.clone()));
        (BrandService::new(deps), kits, generator)
    }

    fn palette_json() -> String {
        json!({
            "primary": "#7A3B2E",
            "secondary": "#F4EDE4",
            "accent": "#C96F4A",
            "neutrals": ["#FAF7F2", "#D9CFC1", "#8A7E6F", "#2C2620"],
            "headlineFont": "Space Grotesk",
            "bodyFont": "Inter"
        })
        .to_string()
    }

    fn create_request() -> CreateKitRequest {
        CreateKitRequest {
            mode: "guided".into(),
            business: "coffee roastery".into(),
            vibe: "warm minimal".into(),
            primary: None,
            secondary: None,
        }
    }

    #[tokio::test]
    async fn test_create_kit_persists_version_1_document() {
        let (service, kits, generator) = service();
        generator.push_response(palette_json());

        let record = service.create_kit("owner-a", create_request()).await.unwrap();

        let doc = kits.document(record.id).unwrap();
        assert_eq!(doc["meta"]["version"], json!(1));
        assert!(brandforge_core::read_brand_palette(&doc).is_some());
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_create_kit_rejects_unparseable_output() {
        let (service, _, generator) = service();
        generator.push_response("not json at all");
        let err = service.create_kit("owner-a", create_request()).await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[tokio::test]
    async fn test_create_kit_rejects_non_hex_palette() {
        let (service, _, generator) = service();
        let mut bad = serde_json::from_str::<JsonValue>(&palette_json()).unwrap();
        bad["primary"] = json!("tomato");
        generator.push_response(bad.to_string());
        let err = service.create_kit("owner-a", create_request()).await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[tokio::test]
    async fn test_read_create_request_validation() {
        assert!(BrandService::read_create_request(&json!({"mode": "guided"})).is_err());
        let request = BrandService::read_create_request(&json!({
            "mode": "guided", "business": "  roastery  ", "vibe": "warm",
            "primary": "#AA1122"
        }))
        .unwrap();
        assert_eq!(request.business, "roastery");
        assert_eq!(request.primary.as_deref(), Some("#AA1122"));
    }

    #[tokio::test]
    async fn test_patch_kit_requires_a_fragment() {
        let (service, kits, generator) = service();
        generator.push_response(palette_json());
        let record = service.create_kit("owner-a", create_request()).await.unwrap();

        let err = service.patch_kit(record.id, "owner-a", &json!({})).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        service
            .patch_kit(record.id, "owner-a", &json!({"constraints": {"humor": 80}}))
            .await
            .unwrap();
        let doc = kits.document(record.id).unwrap();
        assert_eq!(doc["profile"]["constraints"]["humor"], json!(80));
        assert_eq!(doc["meta"]["version"], json!(2));
    }

    #[tokio::test]
    async fn test_generate_core_preserves_existing_identity_and_allow_words() {
        let (service, kits, generator) = service();
        generator.push_response(palette_json());
        let record = service.create_kit("owner-a", create_request()).await.unwrap();

        // user already set a name and a valid allow list
        service
            .patch_kit(
                record.id,
                "owner-a",
                &json!({
                    "profile": {"name": "Ember & Oak", "audience": "", "description": ""},
                    "constraints": {"allowWords": ["roast", "origin", "craft"]}
                }),
            )
            .await
            .unwrap();

        generator.push_response(
            json!({
                "profile": {
                    "name": "Generated Name",
                    "audience": "Home espresso tinkerers",
                    "description": "Small-batch beans, roasted weekly.",
                    "tone": {"bold": 70, "playful": 40, "formal": 30, "emotional": 55}
                },
                "constraints": {
                    "formality": 35, "humor": 45, "intensity": 60,
                    "allowWords": ["fresh", "single-origin", "weekly"],
                    "avoidWords": ["cheap"]
                }
            })
            .to_string(),
        );
        service.generate_core(record.id, "owner-a").await.unwrap();

        let doc = kits.document(record.id).unwrap();
        assert_eq!(doc["profile"]["name"], json!("Ember & Oak"));
        assert_eq!(doc["profile"]["audience"], json!("Home espresso tinkerers"));
        assert_eq!(
            doc["profile"]["constraints"]["allowWords"],
            json!(["roast", "origin", "craft"])
        );
        assert_eq!(doc["profile"]["constraints"]["avoidWords"], json!(["cheap"]));
        assert_eq!(doc["profile"]["tone"]["bold"], json!(70));
        assert_eq!(doc["meta"]["version"], json!(3));
        assert!(doc["meta"]["profileUpdatedAt"].is_string());
    }

    #[tokio::test]
    async fn test_generate_core_rejects_short_allow_list() {
        let (service, _, generator) = service();
        generator.push_response(palette_json());
        let record = service.create_kit("owner-a", create_request()).await.unwrap();

        generator.push_response(
            json!({
                "profile": {"name": "X", "audience": "Y", "description": "Z",
                            "tone": {"bold": 50, "playful": 50, "formal": 50, "emotional": 50}},
                "constraints": {"formality": 50, "humor": 20, "intensity": 50,
                                "allowWords": ["one", "two"], "avoidWords": []}
            })
            .to_string(),
        );
        let err = service.generate_core(record.id, "owner-a").await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[tokio::test]
    async fn test_generate_voice_stores_block_and_bumps_version() {
        let (service, kits, generator) = service();
        generator.push_response(palette_json());
        let record = service.create_kit("owner-a", create_request()).await.unwrap();

        generator.push_response(
            json!({
                "taglines": ["t1", "t2", "t3"],
                "voiceSummary": "Warm, direct, craft-first.",
                "guidelines": ["g1", "g2", "g3"],
                "do": ["d1", "d2", "d3"],
                "dont": ["n1", "n2", "n3"],
                "sampleLines": ["s1", "s2", "s3"]
            })
            .to_string(),
        );
        service.generate_voice(record.id, "owner-a").await.unwrap();

        let doc = kits.document(record.id).unwrap();
        assert_eq!(doc["voiceAi"]["voiceSummary"], json!("Warm, direct, craft-first."));
        assert_eq!(doc["meta"]["version"], json!(2));
        assert!(doc["meta"]["voiceUpdatedAt"].is_string());
    }

    #[tokio::test]
    async fn test_generate_voice_rejects_bad_arity() {
        let (service, _, generator) = service();
        generator.push_response(palette_json());
        let record = service.create_kit("owner-a", create_request()).await.unwrap();

        generator.push_response(json!({"taglines": ["only", "two"]}).to_string());
        let err = service.generate_voice(record.id, "owner-a").await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[tokio::test]
    async fn test_owner_scoping_on_fetch_and_delete() {
        let (service, _, generator) = service();
        generator.push_response(palette_json());
        let record = service.create_kit("owner-a", create_request()).await.unwrap();

        assert!(matches!(
            service.get_kit(record.id, "owner-b").await.unwrap_err(),
            Error::KitNotFound(_)
        ));
        assert!(service.delete_kit(record.id, "owner-b").await.is_err());
        service.delete_kit(record.id, "owner-a").await.unwrap();
    }
}
