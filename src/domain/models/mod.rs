mod contributor_stat;
mod org_stats;
mod user_commits;

pub use contributor_stat::*;
pub use org_stats::*;
pub use user_commits::*;
