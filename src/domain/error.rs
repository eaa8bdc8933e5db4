use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Cache miss: {0}")]
    CacheMiss(String),

    #[error("Cache read failed: {0}")]
    CacheRead(String),

    #[error("Cache write failed: {0}")]
    CacheWrite(String),

    #[error("Source fetch failed: {0}")]
    SourceFetch(String),

    #[error("Cancelled: {0}")]
    Cancelled(String),
}

impl DomainError {
    pub fn cache_miss(msg: impl Into<String>) -> Self {
        Self::CacheMiss(msg.into())
    }

    pub fn cache_read(msg: impl Into<String>) -> Self {
        Self::CacheRead(msg.into())
    }

    pub fn cache_write(msg: impl Into<String>) -> Self {
        Self::CacheWrite(msg.into())
    }

    pub fn source_fetch(msg: impl Into<String>) -> Self {
        Self::SourceFetch(msg.into())
    }

    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::Cancelled(msg.into())
    }

    pub fn is_cache_miss(&self) -> bool {
        matches!(self, Self::CacheMiss(_))
    }

    pub fn is_source_fetch(&self) -> bool {
        matches!(self, Self::SourceFetch(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}
