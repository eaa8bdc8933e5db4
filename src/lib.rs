pub mod application;
pub mod config;
pub mod connector;
pub mod domain;

pub use application::{
    aggregate_user_commits, org_stats_key, repo_names_key, KeyValueCache, OrgStatsResolution,
    ResolveOrgStatsUseCase, ResolveRepoNamesUseCase, StatsSource,
};

pub use config::Config;

pub use connector::{GithubStatsSource, InMemoryCache, RedisCache};

pub use domain::{
    group_by_user, ContributorStat, DomainError, OrgStats, OrgStatsByUser, RepositorySummary,
    UserCommits,
};
