mod aggregate_user_stats;
mod resolve_org_stats;
mod resolve_repo_names;

pub use aggregate_user_stats::*;
pub use resolve_org_stats::*;
pub use resolve_repo_names::*;
