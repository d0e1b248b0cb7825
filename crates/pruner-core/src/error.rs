use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GITHUB_TOKEN must be set (or pass --token)")]
    MissingToken,
    #[error("GITHUB_REPOSITORY must be set (or pass --repo)")]
    MissingRepository,
    #[error("repository must be in owner/repo form, got {0:?}")]
    InvalidRepository(String),
}
