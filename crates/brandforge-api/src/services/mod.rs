//! Service layer: generation orchestration over the kit store and the
//! text-generation collaborator.
//!
//! Handlers stay thin; each service owns one route family's semantics.
//! Every mutation is a read-modify-write of the whole kit document with a
//! meta version bump: no locking and no compare-and-swap, matching the
//! store contract.

pub mod asset_service;
pub mod brand_service;
pub mod intelligence_service;

use std::sync::Arc;

use serde_json::Value as JsonValue;

use brandforge_core::{
    read_brand_palette, read_brand_voice, read_constraints, read_profile, BrandConstraints,
    BrandPalette, BrandProfile, BrandVoice, GenerationBackend, KitRecord, KitRepository,
};
use brandforge_inference::KitFacts;

pub use asset_service::AssetService;
pub use brand_service::BrandService;
pub use intelligence_service::IntelligenceService;

/// Shared collaborators injected into every service.
#[derive(Clone)]
pub struct ServiceDeps {
    pub kits: Arc<dyn KitRepository>,
    pub generator: Arc<dyn GenerationBackend>,
}

impl ServiceDeps {
    pub fn new(kits: Arc<dyn KitRepository>, generator: Arc<dyn GenerationBackend>) -> Self {
        Self { kits, generator }
    }
}

/// Lenient JSON parse of collaborator output: failure reads as `None` so
/// every call site funnels through the same "could not generate" path.
pub(crate) fn parse_generated(raw: &str) -> Option<JsonValue> {
    serde_json::from_str(raw).ok()
}

/// The stored document as an object, defaulting hostile/legacy values to
/// an empty document.
pub(crate) fn document_of(record: &KitRecord) -> JsonValue {
    if record.kit_json.is_object() {
        record.kit_json.clone()
    } else {
        JsonValue::Object(serde_json::Map::new())
    }
}

pub(crate) fn facts_of(record: &KitRecord) -> KitFacts<'_> {
    KitFacts {
        mode: &record.mode,
        business: &record.business,
        vibe: &record.vibe,
    }
}

/// Typed views of the document sections used to assemble prompt contexts.
pub(crate) struct DocumentViews {
    pub palette: Option<BrandPalette>,
    pub profile: BrandProfile,
    pub constraints: BrandConstraints,
    pub voice: Option<BrandVoice>,
}

pub(crate) fn document_views(doc: &JsonValue) -> DocumentViews {
    static NULL: JsonValue = JsonValue::Null;
    let profile_value = doc.get("profile").unwrap_or(&NULL);

    DocumentViews {
        palette: read_brand_palette(doc),
        profile: read_profile(profile_value).unwrap_or_default(),
        constraints: read_constraints(profile_value.get("constraints").unwrap_or(&NULL))
            .unwrap_or_default(),
        voice: read_brand_voice(doc.get("voiceAi").unwrap_or(&NULL)),
    }
}
