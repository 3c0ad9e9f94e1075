//! Best-effort `external_id -> internal_id` session cache.
//!
//! Purely an optimization: the composite key in the store is always the
//! source of truth, this only saves a round trip on the common path. Reads
//! and writes never race because the pipeline runs each event to
//! completion on one task before the next begins for that session (see the
//! ordering guarantees around the hook pipeline).

use std::collections::HashMap;

use tokio::sync::RwLock;

#[derive(Default)]
pub struct SessionIdCache {
    map: RwLock<HashMap<String, String>>,
}

impl SessionIdCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, external_id: &str) -> Option<String> {
        self.map.read().await.get(external_id).cloned()
    }

    pub async fn put(&self, external_id: &str, internal_id: &str) {
        self.map
            .write()
            .await
            .insert(external_id.to_owned(), internal_id.to_owned());
    }
}
