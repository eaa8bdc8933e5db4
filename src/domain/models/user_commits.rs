use serde::{Deserialize, Serialize};

/// Per-user totals summed across every repository the user contributed to.
///
/// Derived from [`crate::domain::OrgStatsByUser`] on demand and never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCommits {
    pub username: String,
    pub total_commits: u64,
    pub total_additions: u64,
    pub total_deletions: u64,
}

impl UserCommits {
    /// A zeroed summary for `username`.
    pub fn zero(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            total_commits: 0,
            total_additions: 0,
            total_deletions: 0,
        }
    }

    /// Lines touched overall, useful for ranking output.
    pub fn total_lines(&self) -> u64 {
        self.total_additions + self.total_deletions
    }
}
