use pruner_core::model::CacheEntry;
use serde::Deserialize;
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub(crate) struct CachesPage {
    #[serde(default)]
    pub(crate) total_count: u64,
    #[serde(default)]
    pub(crate) actions_caches: Vec<CacheItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CacheItem {
    pub(crate) id: u64,
    pub(crate) key: String,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) created_at: OffsetDateTime,
    #[serde(default)]
    pub(crate) size_in_bytes: u64,
}

impl From<CacheItem> for CacheEntry {
    fn from(item: CacheItem) -> Self {
        CacheEntry {
            id: item.id,
            key: item.key,
            created_at: item.created_at,
            size_in_bytes: item.size_in_bytes,
        }
    }
}
