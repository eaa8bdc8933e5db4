use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::application::{KeyValueCache, StatsSource};
use crate::domain::DomainError;

/// Cache key for an organization's repository-name list.
pub fn repo_names_key(org: &str) -> String {
    format!("{org}::repos")
}

/// Serves an organization's repository names from the cache, or refreshes
/// them from the source and writes the result back.
pub struct ResolveRepoNamesUseCase {
    source: Arc<dyn StatsSource>,
    cache: Arc<dyn KeyValueCache>,
}

impl ResolveRepoNamesUseCase {
    pub fn new(source: Arc<dyn StatsSource>, cache: Arc<dyn KeyValueCache>) -> Self {
        Self { source, cache }
    }

    /// Resolves the repository names for `org`.
    ///
    /// Without `force_refresh` this reads the cached list and fails with
    /// [`DomainError::CacheMiss`] if none exists. With it, the source is
    /// queried and the cache entry fully overwritten, even when the new
    /// list is shorter than the old one (repositories get deleted
    /// upstream). Any source failure aborts the call; there is no retry.
    pub async fn execute(
        &self,
        org: &str,
        force_refresh: bool,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, DomainError> {
        if !force_refresh {
            return self.read_cached(org).await;
        }

        let repos = tokio::select! {
            // Check cancellation ahead of an already-completed fetch.
            biased;
            _ = cancel.cancelled() => {
                return Err(DomainError::cancelled(format!(
                    "listing repositories for {org}"
                )));
            }
            result = self.source.list_repositories(org) => result?,
        };

        let names: Vec<String> = repos.into_iter().map(|repo| repo.name).collect();
        debug!("Listed {} repositories for {}", names.len(), org);

        self.write_back(org, &names).await;

        Ok(names)
    }

    async fn read_cached(&self, org: &str) -> Result<Vec<String>, DomainError> {
        let key = repo_names_key(org);
        let bytes = self.cache.get(&key).await?.ok_or_else(|| {
            DomainError::cache_miss(format!("no cached repository list for {org}"))
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            DomainError::cache_read(format!("decoding cached repository list for {org}: {e}"))
        })
    }

    // A failed write leaves the next non-refresh read stale or missing;
    // the freshly listed names are still returned to the caller.
    async fn write_back(&self, org: &str, names: &[String]) {
        let bytes = match serde_json::to_vec(names) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to encode repository list for {}: {}", org, e);
                return;
            }
        };

        if let Err(e) = self.cache.set(&repo_names_key(org), &bytes).await {
            warn!("Failed to cache repository list for {}: {}", org, e);
        }
    }
}
