use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::KeyValueCache;
use crate::domain::DomainError;

/// Process-local [`KeyValueCache`]. Used by tests and as the runtime
/// fallback when Redis is unreachable; contents vanish with the process.
pub struct InMemoryCache {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueCache for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        let entries = self.entries.lock().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), DomainError> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value.to_vec());
        debug!("Stored {} bytes under {}", value.len(), key);
        Ok(())
    }
}
