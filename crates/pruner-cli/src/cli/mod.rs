use crate::logging;
use clap::Parser;
use pruner_core::config::{PruneConfig, keep_from_signed};
use pruner_core::grouping::StripLastSegment;
use pruner_core::prune::{PruneOptions, PruneProgress, PruneReport, prune};
use pruner_core::store::CacheStore;
use pruner_providers::GitHubCacheStore;
use std::cell::RefCell;
use std::io::{self, Write};
use tracing::info;

mod app;
mod args;
mod render;

use args::*;

pub fn run() -> anyhow::Result<()> {
    app::run()
}
