use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::application::StatsSource;
use crate::domain::{ContributorStat, DomainError, RepositorySummary};

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";
const USER_AGENT: &str = "octo-org";
/// Maximum page size accepted by the repository listing endpoint.
const PER_PAGE: usize = 100;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct RepoContributor {
    author: Option<Author>,
    total: u64,
    #[serde(default)]
    weeks: Vec<Week>,
}

#[derive(Deserialize)]
struct Author {
    login: String,
}

#[derive(Deserialize)]
struct Week {
    #[serde(default)]
    a: u64,
    #[serde(default)]
    d: u64,
}

/// HTTP client for the GitHub REST v3 API.
///
/// Implements [`StatsSource`] over two endpoints: the paginated
/// organization repository listing and the per-repository contributor
/// statistics. Authenticates with basic auth (username + personal access
/// token); the per-call timeout lives on the underlying client.
pub struct GithubStatsSource {
    client: reqwest::Client,
    username: String,
    token: String,
    base_url: String,
}

impl GithubStatsSource {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_base_url(username, token, DEFAULT_BASE_URL)
    }

    /// Points the client at a non-default API host (GitHub Enterprise, or a
    /// stub server in tests).
    pub fn with_base_url(
        username: impl Into<String>,
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            username: username.into(),
            token: token.into(),
            base_url: base.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<T, DomainError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .basic_auth(&self.username, Some(&self.token))
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| DomainError::source_fetch(format!("{what}: {e}")))?;

        let status = response.status();
        match status.as_u16() {
            // Statistics are computed in the background; the API answers 202
            // until they are ready and 204 when the repository is empty.
            202 => {
                return Err(DomainError::source_fetch(format!(
                    "{what}: statistics not yet computed (HTTP 202)"
                )))
            }
            204 => {
                return Err(DomainError::source_fetch(format!(
                    "{what}: repository has no content (HTTP 204)"
                )))
            }
            _ if !status.is_success() => {
                return Err(DomainError::source_fetch(format!("{what}: HTTP {status}")))
            }
            _ => {}
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::source_fetch(format!("{what}: invalid response: {e}")))
    }
}

#[async_trait]
impl StatsSource for GithubStatsSource {
    async fn list_repositories(&self, org: &str) -> Result<Vec<RepositorySummary>, DomainError> {
        let url = format!("{}/orgs/{}/repos", self.base_url, org);
        let mut repos = Vec::new();
        let mut page = 1usize;

        loop {
            let batch: Vec<RepositorySummary> = self
                .get_json(
                    &url,
                    &[
                        ("per_page", PER_PAGE.to_string()),
                        ("page", page.to_string()),
                    ],
                    &format!("listing repositories for {org} (page {page})"),
                )
                .await?;

            let len = batch.len();
            repos.extend(batch);

            if len < PER_PAGE {
                break;
            }
            page += 1;
        }

        debug!("Listed {} repositories for {}", repos.len(), org);
        Ok(repos)
    }

    async fn contributor_stats(
        &self,
        org: &str,
        repo: &str,
    ) -> Result<Vec<ContributorStat>, DomainError> {
        let url = format!("{}/repos/{}/{}/stats/contributors", self.base_url, org, repo);
        let contributors: Vec<RepoContributor> = self
            .get_json(&url, &[], &format!("contributor stats for {org}/{repo}"))
            .await?;

        let stats = contributors
            .into_iter()
            // Commits whose author has no account (deleted, or unmapped
            // email) come back with a null author; nothing to attribute.
            .filter_map(|contributor| {
                let author = contributor.author?;
                let mut additions = 0u64;
                let mut deletions = 0u64;
                for week in &contributor.weeks {
                    additions += week.a;
                    deletions += week.d;
                }
                Some(ContributorStat {
                    username: author.login,
                    total_commits: contributor.total,
                    total_additions: additions,
                    total_deletions: deletions,
                })
            })
            .collect();

        Ok(stats)
    }
}
