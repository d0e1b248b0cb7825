use crate::model::{CacheEntry, Repository};
#[cfg(any(test, feature = "test-util"))]
pub use memory::MemoryStore;

pub trait CacheStore {
    fn list_caches(&self, repository: &Repository) -> anyhow::Result<Vec<CacheEntry>>;
    fn delete_cache(&self, repository: &Repository, id: u64) -> anyhow::Result<()>;
}

#[cfg(any(test, feature = "test-util"))]
mod memory {
    use super::CacheStore;
    use crate::model::{CacheEntry, Repository};
    use anyhow::bail;
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// In-memory store that records delete calls. Ids registered with
    /// `fail_delete` error on deletion and stay in the store.
    #[derive(Debug, Default)]
    pub struct MemoryStore {
        entries: RefCell<Vec<CacheEntry>>,
        failing: HashSet<u64>,
        list_error: Option<String>,
        delete_calls: RefCell<Vec<u64>>,
    }

    impl MemoryStore {
        pub fn new(entries: Vec<CacheEntry>) -> Self {
            Self {
                entries: RefCell::new(entries),
                ..Self::default()
            }
        }

        pub fn fail_delete(mut self, id: u64) -> Self {
            self.failing.insert(id);
            self
        }

        pub fn fail_list(mut self, message: &str) -> Self {
            self.list_error = Some(message.to_string());
            self
        }

        pub fn entries(&self) -> Vec<CacheEntry> {
            self.entries.borrow().clone()
        }

        pub fn delete_calls(&self) -> Vec<u64> {
            self.delete_calls.borrow().clone()
        }
    }

    impl CacheStore for MemoryStore {
        fn list_caches(&self, _repository: &Repository) -> anyhow::Result<Vec<CacheEntry>> {
            if let Some(message) = &self.list_error {
                bail!("{message}");
            }
            Ok(self.entries.borrow().clone())
        }

        fn delete_cache(&self, _repository: &Repository, id: u64) -> anyhow::Result<()> {
            self.delete_calls.borrow_mut().push(id);
            if self.failing.contains(&id) {
                bail!("simulated transport error for cache {id}");
            }
            let mut entries = self.entries.borrow_mut();
            let before = entries.len();
            entries.retain(|entry| entry.id != id);
            if entries.len() == before {
                bail!("cache {id} not found");
            }
            Ok(())
        }
    }
}
