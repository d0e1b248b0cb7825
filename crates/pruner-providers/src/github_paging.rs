use anyhow::Context;
use pruner_core::model::Repository;
use reqwest::blocking::{Client, RequestBuilder};

use crate::github_models::CachesPage;
use crate::provider_paging::next_page_from_link_header;

pub(crate) const PER_PAGE: u32 = 100;
pub(crate) const USER_AGENT: &str = "cache-pruner";
pub(crate) const API_VERSION: &str = "2022-11-28";

pub(crate) fn caches_url(host: &str, repository: &Repository, page: u32) -> String {
    format!(
        "{host}/repos/{}/{}/actions/caches?per_page={PER_PAGE}&page={page}",
        repository.owner(),
        repository.name()
    )
}

pub(crate) fn cache_url(host: &str, repository: &Repository, id: u64) -> String {
    format!(
        "{host}/repos/{}/{}/actions/caches/{id}",
        repository.owner(),
        repository.name()
    )
}

pub(crate) fn with_github_headers(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder
        .header("User-Agent", USER_AGENT)
        .header("Accept", "application/vnd.github+json")
        .header("X-GitHub-Api-Version", API_VERSION)
        .bearer_auth(token)
}

pub(crate) fn fetch_caches_page(
    client: &Client,
    host: &str,
    repository: &Repository,
    token: &str,
    page: u32,
) -> anyhow::Result<(CachesPage, Option<u32>)> {
    let url = caches_url(host, repository, page);
    let response = with_github_headers(client.get(url), token)
        .send()
        .context("call GitHub list caches")?
        .error_for_status()
        .context("GitHub list caches status")?;
    let next_page = next_page_from_link_header(response.headers());
    let payload: CachesPage = response.json().context("decode caches response")?;
    Ok((payload, next_page))
}
