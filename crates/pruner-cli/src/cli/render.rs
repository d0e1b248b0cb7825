use super::*;

pub(super) fn format_mb(size_in_bytes: u64) -> String {
    format!("{:.2} MB", size_in_bytes as f64 / 1024.0 / 1024.0)
}

pub(super) fn progress_lines(event: &PruneProgress) -> Vec<String> {
    match event {
        PruneProgress::NoCaches => vec!["No caches found".to_string()],
        PruneProgress::GroupStarted {
            base_key,
            total,
            keeping,
            deleting,
        } => vec![
            String::new(),
            format!("Group: {base_key}"),
            format!("  Total: {total}, Keeping: {keeping}, Deleting: {deleting}"),
        ],
        PruneProgress::Deleted { key, size_in_bytes } => {
            vec![format!("  ✓ Deleted: {key} ({})", format_mb(*size_in_bytes))]
        }
        PruneProgress::DeleteFailed { key, message } => {
            vec![format!("  ✗ Failed to delete {key}: {message}")]
        }
        PruneProgress::DryRun { key, size_in_bytes } => {
            vec![format!("  ~ Would delete: {key} ({})", format_mb(*size_in_bytes))]
        }
    }
}

pub(super) fn summary_line(report: &PruneReport, dry_run: bool) -> String {
    if dry_run {
        let pending: usize = report.groups.iter().map(|group| group.deletions.len()).sum();
        return format!("✅ Dry run completed. Would delete {pending} caches");
    }
    let mut line = format!(
        "✅ Cleanup completed. Deleted {} caches",
        report.total_deleted
    );
    if report.total_deleted > 0 {
        line.push_str(&format!(" ({} freed)", format_mb(report.bytes_freed)));
    }
    if report.total_failed > 0 {
        line.push_str(&format!(", {} failed", report.total_failed));
    }
    line
}
