use crate::error::ConfigError;
use crate::model::Repository;
use std::fmt;

pub const DEFAULT_KEEP: usize = 3;
pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Clone)]
pub struct PruneConfig {
    pub repository: Repository,
    pub token: String,
    pub keep: usize,
    pub api_url: String,
}

impl PruneConfig {
    /// Builds a config from optional raw values, failing before any network
    /// activity when the token or repository is absent.
    pub fn from_parts(
        token: Option<String>,
        repository: Option<String>,
        keep: usize,
        api_url: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let token = token
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingToken)?;
        let repository = repository
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingRepository)?;
        let repository = Repository::parse(&repository)?;
        Ok(Self {
            repository,
            token,
            keep,
            api_url: api_url_or_default(api_url),
        })
    }
}

impl fmt::Debug for PruneConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PruneConfig")
            .field("repository", &self.repository)
            .field("token", &"<redacted>")
            .field("keep", &self.keep)
            .field("api_url", &self.api_url)
            .finish()
    }
}

pub fn api_url_or_default(api_url: Option<&str>) -> String {
    api_url
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_string()
}

/// Clamps a signed retention count; negative values retain nothing.
pub fn keep_from_signed(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}
