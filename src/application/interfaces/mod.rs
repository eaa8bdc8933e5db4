mod key_value_cache;
mod stats_source;

pub use key_value_cache::*;
pub use stats_source::*;
