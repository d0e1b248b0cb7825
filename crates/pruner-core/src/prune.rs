use crate::config::PruneConfig;
use crate::grouping::{KeyGrouping, StripLastSegment};
use crate::model::CacheEntry;
use crate::plan::{GroupPlan, plan};
use crate::store::CacheStore;
use anyhow::Context;
use tracing::{debug, info, warn};

pub type PruneProgressReporter<'a> = dyn Fn(PruneProgress) + 'a;

#[derive(Clone, Debug, PartialEq)]
pub enum PruneProgress {
    NoCaches,
    GroupStarted {
        base_key: String,
        total: usize,
        keeping: usize,
        deleting: usize,
    },
    Deleted {
        key: String,
        size_in_bytes: u64,
    },
    DeleteFailed {
        key: String,
        message: String,
    },
    DryRun {
        key: String,
        size_in_bytes: u64,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Failed { message: String },
    Skipped,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeletionRecord {
    pub entry: CacheEntry,
    pub outcome: DeleteOutcome,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupReport {
    pub base_key: String,
    pub kept: Vec<CacheEntry>,
    pub deletions: Vec<DeletionRecord>,
}

impl GroupReport {
    pub fn total(&self) -> usize {
        self.kept.len() + self.deletions.len()
    }

    pub fn deleted(&self) -> usize {
        self.count(|outcome| matches!(outcome, DeleteOutcome::Deleted))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, DeleteOutcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&DeleteOutcome) -> bool) -> usize {
        self.deletions
            .iter()
            .filter(|record| predicate(&record.outcome))
            .count()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PruneReport {
    pub groups: Vec<GroupReport>,
    pub total_deleted: usize,
    pub total_failed: usize,
    pub bytes_freed: u64,
}

#[derive(Clone, Copy)]
pub struct PruneOptions<'a, 'b> {
    pub grouping: &'a dyn KeyGrouping,
    pub progress: Option<&'b PruneProgressReporter<'b>>,
    pub dry_run: bool,
}

static DEFAULT_GROUPING: StripLastSegment = StripLastSegment { separator: '-' };

impl Default for PruneOptions<'_, '_> {
    fn default() -> Self {
        Self {
            grouping: &DEFAULT_GROUPING,
            progress: None,
            dry_run: false,
        }
    }
}

/// Lists every cache of the configured repository and deletes all but the
/// newest `config.keep` entries of each base-key group.
///
/// Listing failures abort the run. Individual delete failures are recorded in
/// the report and never stop the remaining deletions.
pub fn prune(
    store: &dyn CacheStore,
    config: &PruneConfig,
    options: PruneOptions<'_, '_>,
) -> anyhow::Result<PruneReport> {
    let repository = &config.repository;
    let entries = store
        .list_caches(repository)
        .with_context(|| format!("list caches for {repository}"))?;
    info!(repo = %repository, count = entries.len(), "Listed caches");

    let mut report = PruneReport::default();
    if entries.is_empty() {
        info!(repo = %repository, "No caches found");
        emit(options.progress, PruneProgress::NoCaches);
        return Ok(report);
    }

    for group in plan(entries, config.keep, options.grouping) {
        let group = apply_group(store, config, group, &options);
        report.total_deleted += group.deleted();
        report.total_failed += group.failed();
        report.bytes_freed += group
            .deletions
            .iter()
            .filter(|record| record.outcome == DeleteOutcome::Deleted)
            .map(|record| record.entry.size_in_bytes)
            .sum::<u64>();
        report.groups.push(group);
    }

    info!(
        repo = %repository,
        groups = report.groups.len(),
        deleted = report.total_deleted,
        failed = report.total_failed,
        dry_run = options.dry_run,
        "Cleanup completed"
    );
    Ok(report)
}

fn apply_group(
    store: &dyn CacheStore,
    config: &PruneConfig,
    group: GroupPlan,
    options: &PruneOptions<'_, '_>,
) -> GroupReport {
    let GroupPlan {
        base_key,
        keep,
        delete,
    } = group;
    debug!(
        base_key = %base_key,
        total = keep.len() + delete.len(),
        keeping = keep.len(),
        deleting = delete.len(),
        "Evaluating group"
    );
    emit(
        options.progress,
        PruneProgress::GroupStarted {
            base_key: base_key.clone(),
            total: keep.len() + delete.len(),
            keeping: keep.len(),
            deleting: delete.len(),
        },
    );

    let deletions = delete
        .into_iter()
        .map(|entry| {
            let outcome = delete_entry(store, config, &entry, options);
            DeletionRecord { entry, outcome }
        })
        .collect();

    GroupReport {
        base_key,
        kept: keep,
        deletions,
    }
}

fn delete_entry(
    store: &dyn CacheStore,
    config: &PruneConfig,
    entry: &CacheEntry,
    options: &PruneOptions<'_, '_>,
) -> DeleteOutcome {
    if options.dry_run {
        emit(
            options.progress,
            PruneProgress::DryRun {
                key: entry.key.clone(),
                size_in_bytes: entry.size_in_bytes,
            },
        );
        return DeleteOutcome::Skipped;
    }

    match store.delete_cache(&config.repository, entry.id) {
        Ok(()) => {
            info!(
                key = %entry.key,
                id = entry.id,
                size_in_bytes = entry.size_in_bytes,
                "Deleted cache"
            );
            emit(
                options.progress,
                PruneProgress::Deleted {
                    key: entry.key.clone(),
                    size_in_bytes: entry.size_in_bytes,
                },
            );
            DeleteOutcome::Deleted
        }
        Err(err) => {
            let message = format!("{err:#}");
            warn!(
                key = %entry.key,
                id = entry.id,
                error = %message,
                "Failed to delete cache"
            );
            emit(
                options.progress,
                PruneProgress::DeleteFailed {
                    key: entry.key.clone(),
                    message: message.clone(),
                },
            );
            DeleteOutcome::Failed { message }
        }
    }
}

fn emit(progress: Option<&PruneProgressReporter<'_>>, event: PruneProgress) {
    if let Some(progress) = progress {
        progress(event);
    }
}
