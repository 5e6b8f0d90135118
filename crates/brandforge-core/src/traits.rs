//! Core traits for brandforge abstractions.
//!
//! These traits define the seams to the two external collaborators: the
//! kit document store and the text-generation service. Both are treated
//! as black boxes: every response is re-validated through the readers
//! before use.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::error::Result;
use crate::models::KitRecord;

// =============================================================================
// KIT STORE
// =============================================================================

/// Key-value store of brand-kit records, keyed by `(id, owner_id)`.
///
/// `replace_document` overwrites the stored JSON unconditionally: there is
/// no compare-and-swap on `meta.version`, so two concurrent read-modify-
/// write sequences against the same kit can race and the second write wins
/// wholesale. The version counter is an audit signal only.
#[async_trait]
pub trait KitRepository: Send + Sync {
    /// Insert a new kit record.
    async fn create(&self, record: &KitRecord) -> Result<()>;

    /// Fetch a kit by id regardless of owner.
    async fn get(&self, id: Uuid) -> Result<Option<KitRecord>>;

    /// Fetch a kit only if it belongs to `owner_id`.
    async fn get_for_owner(&self, id: Uuid, owner_id: &str) -> Result<Option<KitRecord>>;

    /// List all kits belonging to `owner_id`, newest first.
    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<KitRecord>>;

    /// Replace the whole kit document for `id`. Unconditional overwrite.
    async fn replace_document(&self, id: Uuid, document: &JsonValue) -> Result<()>;

    /// Delete a kit only if it belongs to `owner_id`. Returns whether a
    /// record was removed.
    async fn delete_for_owner(&self, id: Uuid, owner_id: &str) -> Result<bool>;
}

// =============================================================================
// GENERATION
// =============================================================================

/// Backend for text generation (LLM).
///
/// Implementations must not retry on transient failure; the orchestration
/// layer owns retry policy (a single re-invocation on avoid-word
/// violations, nothing else).
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text given a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate text with system context.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}
