mod github_stats_source;
mod in_memory_cache;
mod redis_cache;

pub use github_stats_source::*;
pub use in_memory_cache::*;
pub use redis_cache::*;
