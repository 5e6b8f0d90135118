//! In-memory kit repository for tests.
//!
//! Always compiled (not cfg(test)) so integration tests in dependent
//! crates can drive the orchestration services without a database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use brandforge_core::{KitRecord, KitRepository, Result};

/// HashMap-backed [`KitRepository`] with the same whole-document overwrite
/// semantics as the Postgres implementation.
#[derive(Default)]
pub struct MemoryKitRepository {
    kits: Mutex<HashMap<Uuid, KitRecord>>,
}

impl MemoryKitRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, bypassing `create` (useful for legacy-shape
    /// documents that the writers would never produce).
    pub fn seed(&self, record: KitRecord) {
        self.kits.lock().unwrap().insert(record.id, record);
    }

    /// Snapshot the stored document for assertions.
    pub fn document(&self, id: Uuid) -> Option<JsonValue> {
        self.kits.lock().unwrap().get(&id).map(|r| r.kit_json.clone())
    }
}

#[async_trait]
impl KitRepository for MemoryKitRepository {
    async fn create(&self, record: &KitRecord) -> Result<()> {
        self.kits.lock().unwrap().insert(record.id, record.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<KitRecord>> {
        Ok(self.kits.lock().unwrap().get(&id).cloned())
    }

    async fn get_for_owner(&self, id: Uuid, owner_id: &str) -> Result<Option<KitRecord>> {
        Ok(self
            .kits
            .lock()
            .unwrap()
            .get(&id)
            .filter(|record| record.owner_id == owner_id)
            .cloned())
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<KitRecord>> {
        let mut records: Vec<KitRecord> = self
            .kits
            .lock()
            .unwrap()
            .values()
            .filter(|record| record.owner_id == owner_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn replace_document(&self, id: Uuid, document: &JsonValue) -> Result<()> {
        if let Some(record) = self.kits.lock().unwrap().get_mut(&id) {
            record.kit_json = document.clone();
        }
        Ok(())
    }

    async fn delete_for_owner(&self, id: Uuid, owner_id: &str) -> Result<bool> {
        let mut kits = self.kits.lock().unwrap();
        match kits.get(&id) {
            Some(record) if record.owner_id == owner_id => {
                kits.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn record(owner: &str) -> KitRecord {
        KitRecord {
            id: Uuid::new_v4(),
            owner_id: owner.to_string(),
            mode: "guided".to_string(),
            business: "coffee roastery".to_string(),
            vibe: "warm minimal".to_string(),
            created_at: Utc::now(),
            kit_json: json!({}),
        }
    }

    #[tokio::test]
    async fn test_owner_scoping() {
        let repo = MemoryKitRepository::new();
        let mine = record("owner-a");
        repo.create(&mine).await.unwrap();

        assert!(repo.get_for_owner(mine.id, "owner-a").await.unwrap().is_some());
        assert!(repo.get_for_owner(mine.id, "owner-b").await.unwrap().is_none());
        assert!(!repo.delete_for_owner(mine.id, "owner-b").await.unwrap());
        assert!(repo.delete_for_owner(mine.id, "owner-a").await.unwrap());
    }

    #[tokio::test]
    async fn test_replace_document_overwrites_wholesale() {
        let repo = MemoryKitRepository::new();
        let kit = record("owner-a");
        repo.create(&kit).await.unwrap();

        repo.replace_document(kit.id, &json!({"meta": {"version": 2}}))
            .await
            .unwrap();
        assert_eq!(repo.document(kit.id).unwrap()["meta"]["version"], json!(2));
    }
}
