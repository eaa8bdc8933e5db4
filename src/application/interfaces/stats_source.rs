use async_trait::async_trait;

use crate::domain::{ContributorStat, DomainError, RepositorySummary};

/// Hosting-provider API for repository listings and per-repository
/// contributor statistics.
///
/// Both calls are blocking network round trips; per-call timeouts belong to
/// the implementing client, not to callers.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Lists every repository of `org`, preserving the source API's order.
    async fn list_repositories(&self, org: &str) -> Result<Vec<RepositorySummary>, DomainError>;

    /// Fetches per-contributor commit/addition/deletion counts for one
    /// repository of `org`.
    async fn contributor_stats(
        &self,
        org: &str,
        repo: &str,
    ) -> Result<Vec<ContributorStat>, DomainError>;
}
