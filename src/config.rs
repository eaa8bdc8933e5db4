use anyhow::{Context, Result};

/// Process configuration, read once at startup from the environment.
///
/// Every field is required; a missing variable is a fatal startup error.
/// The organization name is only a default — callers thread the scope
/// explicitly through the pipeline, so one process can serve several
/// organizations.
#[derive(Debug, Clone)]
pub struct Config {
    pub org: String,
    pub username: String,
    pub token: String,
    pub redis_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            org: require("GITHUB_ORG")?,
            username: require("GITHUB_USERNAME")?,
            token: require("GITHUB_TOKEN")?,
            redis_url: require("REDIS_URL")?,
        })
    }
}

fn require(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{name} environment variable not set"))
}
