use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;
use time::OffsetDateTime;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Repository {
    owner: String,
    name: String,
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, ConfigError> {
        let owner = owner.into();
        let name = name.into();
        if owner.trim().is_empty() || name.trim().is_empty() {
            return Err(ConfigError::InvalidRepository(format!("{owner}/{name}")));
        }
        Ok(Self { owner, name })
    }

    /// Parses the `owner/repo` form used by `GITHUB_REPOSITORY`.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let value = value.trim().trim_matches('/');
        match value.split_once('/') {
            Some((owner, name)) if !name.contains('/') => Self::new(owner, name),
            _ => Err(ConfigError::InvalidRepository(value.to_string())),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CacheEntry {
    pub id: u64,
    pub key: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub size_in_bytes: u64,
}

impl CacheEntry {
    pub fn size_mb(&self) -> f64 {
        self.size_in_bytes as f64 / 1024.0 / 1024.0
    }
}
