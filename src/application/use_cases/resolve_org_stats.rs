use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::application::{KeyValueCache, StatsSource};
use crate::domain::{DomainError, OrgStats};

/// Cache key for an organization's aggregated per-repository statistics.
pub fn org_stats_key(org: &str) -> String {
    format!("{org}::stats")
}

/// The outcome of a resolve: the snapshot plus the repositories whose fetch
/// failed and were left out of it. Only `stats` is ever persisted; a
/// cache-served resolution always reports an empty `skipped` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgStatsResolution {
    pub stats: OrgStats,
    pub skipped: Vec<String>,
}

impl OrgStatsResolution {
    pub fn is_degraded(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Serves the organization-wide statistics snapshot from the cache, or
/// rebuilds it repository by repository and writes it back.
pub struct ResolveOrgStatsUseCase {
    source: Arc<dyn StatsSource>,
    cache: Arc<dyn KeyValueCache>,
}

impl ResolveOrgStatsUseCase {
    pub fn new(source: Arc<dyn StatsSource>, cache: Arc<dyn KeyValueCache>) -> Self {
        Self { source, cache }
    }

    /// Resolves the per-repository contributor statistics for `org`.
    ///
    /// Without `force_refresh` this reads the cached snapshot and fails
    /// with [`DomainError::CacheMiss`] if none exists. With it, every name
    /// in `repo_names` is fetched in order; a repository whose fetch fails
    /// is logged and skipped (empty, archived, or rate-limited repositories
    /// must not sink the whole aggregate), while a cancellation aborts the
    /// remaining fetches and surfaces as the resolve error.
    pub async fn execute(
        &self,
        org: &str,
        force_refresh: bool,
        repo_names: &[String],
        cancel: &CancellationToken,
    ) -> Result<OrgStatsResolution, DomainError> {
        if !force_refresh {
            return self.read_cached(org).await;
        }

        let mut stats = OrgStats::new();
        let mut skipped = Vec::new();

        for name in repo_names {
            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(DomainError::cancelled(format!(
                        "fetching contributor stats for {org}/{name}"
                    )));
                }
                result = self.source.contributor_stats(org, name) => result,
            };

            match fetched {
                Ok(contributors) => {
                    debug!("Fetched {} contributors for {}/{}", contributors.len(), org, name);
                    stats.insert(name.clone(), contributors);
                }
                Err(e) => {
                    warn!("Skipping {}/{}: {}", org, name, e);
                    skipped.push(name.clone());
                }
            }
        }

        self.write_back(org, &stats).await;

        Ok(OrgStatsResolution { stats, skipped })
    }

    async fn read_cached(&self, org: &str) -> Result<OrgStatsResolution, DomainError> {
        let key = org_stats_key(org);
        let bytes = self
            .cache
            .get(&key)
            .await?
            .ok_or_else(|| DomainError::cache_miss(format!("no cached stats for {org}")))?;

        let stats = serde_json::from_slice(&bytes).map_err(|e| {
            DomainError::cache_read(format!("decoding cached stats for {org}: {e}"))
        })?;

        Ok(OrgStatsResolution {
            stats,
            skipped: Vec::new(),
        })
    }

    // A failed write leaves the next non-refresh read stale or missing;
    // the freshly built snapshot is still returned to the caller.
    async fn write_back(&self, org: &str, stats: &OrgStats) {
        let bytes = match serde_json::to_vec(stats) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to encode stats snapshot for {}: {}", org, e);
                return;
            }
        };

        if let Err(e) = self.cache.set(&org_stats_key(org), &bytes).await {
            warn!("Failed to cache stats snapshot for {}: {}", org, e);
        }
    }
}
