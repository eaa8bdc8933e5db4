use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use octo_org::{
    aggregate_user_commits, group_by_user, Config, GithubStatsSource, InMemoryCache,
    KeyValueCache, RedisCache, ResolveOrgStatsUseCase, ResolveRepoNamesUseCase, StatsSource,
};

#[derive(Parser)]
#[command(name = "octo-org")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long)]
    verbose: bool,

    /// Organization to report on (defaults to GITHUB_ORG).
    #[arg(short, long)]
    org: Option<String>,

    /// Bypass the cache and refetch everything from the API.
    #[arg(short, long)]
    refresh: bool,

    /// Skip Redis and cache in process memory only.
    #[arg(long)]
    memory_cache: bool,

    /// How many users to print.
    #[arg(long, default_value = "20")]
    top: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env()?;
    let org = cli.org.unwrap_or_else(|| config.org.clone());

    let source: Arc<dyn StatsSource> =
        Arc::new(GithubStatsSource::new(&config.username, &config.token));

    let cache: Arc<dyn KeyValueCache> = if cli.memory_cache {
        info!("Using in-memory cache");
        Arc::new(InMemoryCache::new())
    } else {
        match RedisCache::connect(&config.redis_url) {
            Ok(redis) => {
                info!("Using Redis cache at {}", config.redis_url);
                Arc::new(redis)
            }
            Err(e) => {
                warn!(
                    "Failed to open Redis at {} ({}). Falling back to in-memory cache.",
                    config.redis_url, e
                );
                Arc::new(InMemoryCache::new())
            }
        }
    };

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, aborting remaining fetches");
            signal_token.cancel();
        }
    });

    let repo_names = ResolveRepoNamesUseCase::new(source.clone(), cache.clone());
    let org_stats = ResolveOrgStatsUseCase::new(source, cache);

    let names = match repo_names.execute(&org, cli.refresh, &cancel).await {
        Ok(names) => names,
        Err(e) if e.is_cache_miss() => {
            anyhow::bail!("{e} (run with --refresh to populate the cache)")
        }
        Err(e) => return Err(e.into()),
    };
    info!("Resolved {} repositories for {}", names.len(), org);

    let resolution = match org_stats.execute(&org, cli.refresh, &names, &cancel).await {
        Ok(resolution) => resolution,
        Err(e) if e.is_cache_miss() => {
            anyhow::bail!("{e} (run with --refresh to populate the cache)")
        }
        Err(e) => return Err(e.into()),
    };
    if resolution.is_degraded() {
        warn!(
            "Skipped {} unreachable repositories: {}",
            resolution.skipped.len(),
            resolution.skipped.join(", ")
        );
    }

    let by_user = group_by_user(&resolution.stats);
    let mut totals = aggregate_user_commits(&by_user);
    totals.sort_by(|a, b| b.total_commits.cmp(&a.total_commits));

    println!("{:<28} {:>10} {:>12} {:>12}", "USER", "COMMITS", "ADDED", "DELETED");
    for user in totals.iter().take(cli.top) {
        println!(
            "{:<28} {:>10} {:>12} {:>12}",
            user.username, user.total_commits, user.total_additions, user.total_deletions
        );
    }

    Ok(())
}
