use crate::grouping::KeyGrouping;
use crate::model::CacheEntry;
use std::collections::BTreeMap;

/// Retention decision for one base-key group. Both halves are ordered newest
/// first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupPlan {
    pub base_key: String,
    pub keep: Vec<CacheEntry>,
    pub delete: Vec<CacheEntry>,
}

impl GroupPlan {
    pub fn total(&self) -> usize {
        self.keep.len() + self.delete.len()
    }
}

/// Groups entries by base key and splits each group into the newest `keep`
/// entries and the older remainder. Groups come back in ascending base-key
/// order.
pub fn plan(entries: Vec<CacheEntry>, keep: usize, grouping: &dyn KeyGrouping) -> Vec<GroupPlan> {
    let mut groups: BTreeMap<String, Vec<CacheEntry>> = BTreeMap::new();
    for entry in entries {
        groups
            .entry(grouping.base_key(&entry.key))
            .or_default()
            .push(entry);
    }

    groups
        .into_iter()
        .map(|(base_key, mut entries)| {
            entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            let split = keep.min(entries.len());
            let delete = entries.split_off(split);
            GroupPlan {
                base_key,
                keep: entries,
                delete,
            }
        })
        .collect()
}
