use super::*;
use pruner_core::config::DEFAULT_KEEP;

#[derive(Parser, Debug)]
#[command(
    name = "cache-pruner",
    author,
    version,
    about = "Delete old GitHub Actions caches, keeping the newest entries per key group"
)]
pub(super) struct Cli {
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "Token used to list and delete caches")]
    pub(super) token: Option<String>,
    #[arg(long, env = "GITHUB_REPOSITORY", help = "Repository in owner/repo form")]
    pub(super) repo: Option<String>,
    #[arg(
        long,
        env = "CACHE_PRUNER_KEEP",
        default_value_t = DEFAULT_KEEP as i64,
        allow_negative_numbers = true,
        help = "Caches to keep per key group (zero or negative keeps none)"
    )]
    pub(super) keep: i64,
    #[arg(long, env = "GITHUB_API_URL", help = "GitHub API base URL")]
    pub(super) api_url: Option<String>,
    #[arg(
        long,
        default_value_t = '-',
        help = "Separator whose last segment is stripped to form the group key"
    )]
    pub(super) separator: char,
    #[arg(long, help = "Report what would be deleted without deleting")]
    pub(super) dry_run: bool,
}

impl Cli {
    pub(super) fn to_config(&self) -> anyhow::Result<PruneConfig> {
        let config = PruneConfig::from_parts(
            self.token.clone(),
            self.repo.clone(),
            keep_from_signed(self.keep),
            self.api_url.as_deref(),
        )?;
        Ok(config)
    }

    pub(super) fn grouping(&self) -> StripLastSegment {
        StripLastSegment {
            separator: self.separator,
        }
    }
}
