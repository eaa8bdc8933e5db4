use async_trait::async_trait;

use crate::domain::DomainError;

/// Byte-oriented key/value storage for cached artifacts.
///
/// Keys are independent; there is no cross-key transaction. Consistency is
/// per key, last write wins.
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Returns the stored value, or `None` if the key is absent. A transport
    /// failure is an error, never silently treated as absence.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError>;

    /// Stores `value` under `key`, overwriting any previous value.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), DomainError>;
}
