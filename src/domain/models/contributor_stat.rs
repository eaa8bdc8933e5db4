use serde::{Deserialize, Serialize};

/// One repository as returned by the hosting API's listing endpoint.
///
/// Only the fields the pipeline cares about are kept; the API returns many
/// more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
}

/// One user's commit/addition/deletion counts within one repository.
///
/// Immutable once produced by a refresh; counts are unsigned so a
/// negative value from the source is a deserialization error, never a
/// representable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorStat {
    pub username: String,
    pub total_commits: u64,
    pub total_additions: u64,
    pub total_deletions: u64,
}

impl ContributorStat {
    pub fn new(
        username: impl Into<String>,
        total_commits: u64,
        total_additions: u64,
        total_deletions: u64,
    ) -> Self {
        Self {
            username: username.into(),
            total_commits,
            total_additions,
            total_deletions,
        }
    }
}
