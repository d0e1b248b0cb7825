pub mod github;
pub(crate) mod github_models;
pub(crate) mod github_paging;
pub(crate) mod provider_paging;

pub use github::GitHubCacheStore;
