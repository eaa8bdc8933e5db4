//! Integration tests for the octo-org pipeline.
//!
//! Exercises the whole resolve/aggregate flow against a scripted stats
//! source and the in-memory cache adapter.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use octo_org::{
    aggregate_user_commits, group_by_user, repo_names_key, ContributorStat, DomainError,
    InMemoryCache, KeyValueCache, OrgStatsResolution, RepositorySummary, ResolveOrgStatsUseCase,
    ResolveRepoNamesUseCase, StatsSource,
};

/// Scripted source: a fixed repository listing plus per-repository stats;
/// repositories without an entry fail their fetch. Counts every call.
struct ScriptedSource {
    repos: Vec<String>,
    stats: HashMap<String, Vec<ContributorStat>>,
    list_calls: Mutex<usize>,
    stats_calls: Mutex<usize>,
}

impl ScriptedSource {
    fn new(repos: &[&str], stats: &[(&str, Vec<ContributorStat>)]) -> Self {
        Self {
            repos: repos.iter().map(|r| r.to_string()).collect(),
            stats: stats
                .iter()
                .map(|(repo, contributors)| (repo.to_string(), contributors.clone()))
                .collect(),
            list_calls: Mutex::new(0),
            stats_calls: Mutex::new(0),
        }
    }
}

#[async_trait]
impl StatsSource for ScriptedSource {
    async fn list_repositories(&self, _org: &str) -> Result<Vec<RepositorySummary>, DomainError> {
        *self.list_calls.lock().await += 1;
        Ok(self
            .repos
            .iter()
            .map(|name| RepositorySummary {
                name: name.clone(),
                fork: false,
                archived: false,
            })
            .collect())
    }

    async fn contributor_stats(
        &self,
        org: &str,
        repo: &str,
    ) -> Result<Vec<ContributorStat>, DomainError> {
        *self.stats_calls.lock().await += 1;
        self.stats
            .get(repo)
            .cloned()
            .ok_or_else(|| DomainError::source_fetch(format!("{org}/{repo}: HTTP 403")))
    }
}

/// Cache whose writes always fail; reads go to the wrapped cache.
struct ReadOnlyCache {
    inner: InMemoryCache,
}

#[async_trait]
impl KeyValueCache for ReadOnlyCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, _value: &[u8]) -> Result<(), DomainError> {
        Err(DomainError::cache_write(format!("SET {key}: read-only")))
    }
}

fn setup_source() -> Arc<ScriptedSource> {
    Arc::new(ScriptedSource::new(
        &["api", "web", "tools"],
        &[
            (
                "api",
                vec![
                    ContributorStat::new("alice", 3, 10, 2),
                    ContributorStat::new("bob", 1, 5, 5),
                ],
            ),
            ("web", vec![ContributorStat::new("alice", 5, 1, 1)]),
            ("tools", vec![]),
        ],
    ))
}

async fn resolve(
    source: Arc<ScriptedSource>,
    cache: Arc<dyn KeyValueCache>,
    org: &str,
    refresh: bool,
) -> OrgStatsResolution {
    let cancel = CancellationToken::new();
    let names = ResolveRepoNamesUseCase::new(source.clone(), cache.clone())
        .execute(org, refresh, &cancel)
        .await
        .expect("repository names should resolve");
    ResolveOrgStatsUseCase::new(source, cache)
        .execute(org, refresh, &names, &cancel)
        .await
        .expect("stats should resolve")
}

#[tokio::test]
async fn test_full_pipeline_totals() {
    let source = setup_source();
    let cache: Arc<dyn KeyValueCache> = Arc::new(InMemoryCache::new());

    let resolution = resolve(source, cache, "acme", true).await;
    assert!(!resolution.is_degraded());

    let totals = aggregate_user_commits(&group_by_user(&resolution.stats));

    // BTreeMap iteration: alice before bob.
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].username, "alice");
    assert_eq!(totals[0].total_commits, 8);
    assert_eq!(totals[0].total_additions, 11);
    assert_eq!(totals[0].total_deletions, 3);
    assert_eq!(totals[1].username, "bob");
    assert_eq!(totals[1].total_commits, 1);
}

#[tokio::test]
async fn test_second_run_is_served_from_cache() {
    let source = setup_source();
    let cache: Arc<dyn KeyValueCache> = Arc::new(InMemoryCache::new());

    let fresh = resolve(source.clone(), cache.clone(), "acme", true).await;
    let cached = resolve(source.clone(), cache, "acme", false).await;

    assert_eq!(fresh.stats, cached.stats);
    assert_eq!(*source.list_calls.lock().await, 1);
    assert_eq!(*source.stats_calls.lock().await, 3);
}

#[tokio::test]
async fn test_unreachable_repository_degrades_gracefully() {
    // "ghost" is listed but has no stats entry, so its fetch fails.
    let source = Arc::new(ScriptedSource::new(
        &["api", "ghost", "web"],
        &[
            ("api", vec![ContributorStat::new("alice", 2, 0, 0)]),
            ("web", vec![ContributorStat::new("alice", 1, 0, 0)]),
        ],
    ));
    let cache: Arc<dyn KeyValueCache> = Arc::new(InMemoryCache::new());

    let resolution = resolve(source, cache, "acme", true).await;

    let keys: Vec<&String> = resolution.stats.keys().collect();
    assert_eq!(keys, ["api", "web"]);
    assert_eq!(resolution.skipped, vec!["ghost"]);

    let totals = aggregate_user_commits(&group_by_user(&resolution.stats));
    assert_eq!(totals[0].total_commits, 3);
}

#[tokio::test]
async fn test_forced_refresh_is_idempotent_at_the_byte_level() {
    let source = setup_source();
    let cache = Arc::new(InMemoryCache::new());

    resolve(source.clone(), cache.clone(), "acme", true).await;
    let first = cache
        .get(&repo_names_key("acme"))
        .await
        .unwrap()
        .expect("repo names cached");

    resolve(source, cache.clone(), "acme", true).await;
    let second = cache
        .get(&repo_names_key("acme"))
        .await
        .unwrap()
        .expect("repo names cached");

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_cache_write_failure_does_not_discard_fresh_result() {
    let source = setup_source();
    let cache: Arc<dyn KeyValueCache> = Arc::new(ReadOnlyCache {
        inner: InMemoryCache::new(),
    });

    let resolution = resolve(source, cache.clone(), "acme", true).await;
    assert_eq!(resolution.stats.len(), 3);

    // But the next non-refresh read observes the absent data.
    let err = ResolveRepoNamesUseCase::new(
        setup_source(),
        cache,
    )
    .execute("acme", false, &CancellationToken::new())
    .await
    .expect_err("nothing was persisted");
    assert!(err.is_cache_miss());
}

#[tokio::test]
async fn test_scopes_are_isolated_per_organization() {
    let source = setup_source();
    let cache: Arc<dyn KeyValueCache> = Arc::new(InMemoryCache::new());

    resolve(source.clone(), cache.clone(), "acme", true).await;

    // A different organization sharing the cache still starts cold.
    let err = ResolveRepoNamesUseCase::new(source, cache)
        .execute("globex", false, &CancellationToken::new())
        .await
        .expect_err("globex was never refreshed");
    assert!(err.is_cache_miss());
}
