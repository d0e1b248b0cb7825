use crate::github_models::CachesPage;
use crate::github_paging::{cache_url, fetch_caches_page, with_github_headers};
use anyhow::Context;
use pruner_core::config::PruneConfig;
use pruner_core::model::{CacheEntry, Repository};
use pruner_core::store::CacheStore;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::debug;

pub struct GitHubCacheStore {
    client: Client,
    host: String,
    token: String,
}

impl GitHubCacheStore {
    pub fn new(host: &str, token: &str) -> anyhow::Result<Self> {
        let client = Client::builder().build().context("build HTTP client")?;
        Ok(Self {
            client,
            host: host.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    pub fn from_config(config: &PruneConfig) -> anyhow::Result<Self> {
        Self::new(&config.api_url, &config.token)
    }
}

impl CacheStore for GitHubCacheStore {
    fn list_caches(&self, repository: &Repository) -> anyhow::Result<Vec<CacheEntry>> {
        collect_pages(|page| {
            let (payload, next_page) =
                fetch_caches_page(&self.client, &self.host, repository, &self.token, page)
                    .or_else(|err| map_status_error(repository, err))?;
            debug!(
                repo = %repository,
                page,
                items = payload.actions_caches.len(),
                total_count = payload.total_count,
                "Fetched caches page"
            );
            Ok((payload, next_page))
        })
    }

    fn delete_cache(&self, repository: &Repository, id: u64) -> anyhow::Result<()> {
        let url = cache_url(&self.host, repository, id);
        with_github_headers(self.client.delete(url), &self.token)
            .send()
            .context("call GitHub delete cache")?
            .error_for_status()
            .context("GitHub delete cache status")
            .or_else(|err| map_status_error(repository, err))?;
        Ok(())
    }
}

/// Walks pages starting at 1 until a page is empty or the next page does not
/// advance.
pub(crate) fn collect_pages<F>(mut fetch: F) -> anyhow::Result<Vec<CacheEntry>>
where
    F: FnMut(u32) -> anyhow::Result<(CachesPage, Option<u32>)>,
{
    let mut page = 1;
    let mut caches = Vec::new();
    loop {
        let (payload, next_page) = fetch(page)?;
        if payload.actions_caches.is_empty() {
            break;
        }
        caches.extend(payload.actions_caches.into_iter().map(CacheEntry::from));
        match next_page {
            Some(next) if next > page => page = next,
            _ => break,
        }
    }
    Ok(caches)
}

fn map_status_error<T>(repository: &Repository, err: anyhow::Error) -> anyhow::Result<T> {
    if let Some(reqwest_err) = err.downcast_ref::<reqwest::Error>()
        && let Some(status) = reqwest_err.status()
        && let Some(message) = github_status_message(&repository.to_string(), status)
    {
        return Err(anyhow::anyhow!(message));
    }
    Err(err)
}

pub fn github_status_message(repository: &str, status: StatusCode) -> Option<String> {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Some(format!(
            "GitHub authentication failed for {repository} (HTTP {status}). Check the token has actions write access.",
        )),
        StatusCode::NOT_FOUND => Some(format!(
            "GitHub repository or cache not found: {repository} (HTTP {status}).",
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    fn page(ids: &[u64]) -> CachesPage {
        let items: Vec<_> = ids
            .iter()
            .map(|id| {
                json!({
                    "id": id,
                    "key": format!("linux-{id}"),
                    "created_at": "2024-03-01T12:00:00Z",
                    "size_in_bytes": 10
                })
            })
            .collect();
        serde_json::from_value(json!({
            "total_count": ids.len(),
            "actions_caches": items
        }))
        .unwrap()
    }

    fn ids(entries: &[CacheEntry]) -> Vec<u64> {
        entries.iter().map(|entry| entry.id).collect()
    }

    /// Serves one canned HTTP response on a local port and returns its base URL.
    fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}")
    }

    fn status_response(status_line: &str) -> String {
        format!("HTTP/1.1 {status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
    }

    #[test]
    fn collect_pages_follows_next_links() {
        let mut requested = Vec::new();
        let caches = collect_pages(|number| {
            requested.push(number);
            Ok(match number {
                1 => (page(&[1, 2]), Some(2)),
                2 => (page(&[3]), None),
                other => panic!("unexpected page {other}"),
            })
        })
        .unwrap();
        assert_eq!(requested, vec![1, 2]);
        assert_eq!(ids(&caches), vec![1, 2, 3]);
    }

    #[test]
    fn collect_pages_stops_on_empty_page() {
        let mut requested = Vec::new();
        let caches = collect_pages(|number| {
            requested.push(number);
            Ok(match number {
                1 => (page(&[1]), Some(2)),
                _ => (page(&[]), Some(3)),
            })
        })
        .unwrap();
        assert_eq!(requested, vec![1, 2]);
        assert_eq!(ids(&caches), vec![1]);
    }

    #[test]
    fn collect_pages_stops_when_next_does_not_advance() {
        let mut requested = Vec::new();
        let caches = collect_pages(|number| {
            requested.push(number);
            Ok((page(&[u64::from(number)]), Some(1)))
        })
        .unwrap();
        assert_eq!(requested, vec![1]);
        assert_eq!(ids(&caches), vec![1]);
    }

    #[test]
    fn collect_pages_propagates_fetch_errors() {
        let err = collect_pages(|_| Err(anyhow::anyhow!("offline"))).unwrap_err();
        assert_eq!(err.to_string(), "offline");
    }

    #[test]
    fn list_caches_reads_pages_over_http() {
        let body = json!({
            "total_count": 1,
            "actions_caches": [{
                "id": 77,
                "ref": "refs/heads/main",
                "key": "linux-cargo-abc",
                "created_at": "2024-03-01T12:00:00Z",
                "size_in_bytes": 2048
            }]
        })
        .to_string();
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let host = serve_once(response);
        let store = GitHubCacheStore::new(&host, "token").unwrap();
        let repo = Repository::parse("octo/widgets").unwrap();
        let caches = store.list_caches(&repo).unwrap();
        assert_eq!(ids(&caches), vec![77]);
        assert_eq!(caches[0].key, "linux-cargo-abc");
    }

    #[test]
    fn delete_not_found_maps_to_friendly_message() {
        let host = serve_once(status_response("404 Not Found"));
        let store = GitHubCacheStore::new(&host, "token").unwrap();
        let repo = Repository::parse("octo/widgets").unwrap();
        let err = store.delete_cache(&repo, 42).unwrap_err();
        assert!(err.to_string().contains("not found: octo/widgets"));
    }

    #[test]
    fn list_unauthorized_maps_to_friendly_message() {
        let host = serve_once(status_response("401 Unauthorized"));
        let store = GitHubCacheStore::new(&host, "bad").unwrap();
        let repo = Repository::parse("octo/widgets").unwrap();
        let err = store.list_caches(&repo).unwrap_err();
        assert!(err.to_string().contains("authentication failed"));
    }

    #[test]
    fn github_status_messages() {
        let message = github_status_message("octo/widgets", StatusCode::UNAUTHORIZED).unwrap();
        assert!(message.contains("authentication failed"));
        let message = github_status_message("octo/widgets", StatusCode::NOT_FOUND).unwrap();
        assert!(message.contains("not found"));
        assert!(github_status_message("octo/widgets", StatusCode::BAD_GATEWAY).is_none());
    }

    #[test]
    fn unrelated_errors_pass_through() {
        let repo = Repository::parse("octo/widgets").unwrap();
        let err = map_status_error::<()>(&repo, anyhow::anyhow!("boom")).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn store_trims_host() {
        let store = GitHubCacheStore::new("https://api.github.com/", "token").unwrap();
        assert_eq!(store.host, "https://api.github.com");
    }
}
