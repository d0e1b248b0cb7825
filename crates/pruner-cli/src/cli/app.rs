use super::*;

pub(super) fn run() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();
    let config = cli.to_config()?;
    info!(
        repo = %config.repository,
        keep = config.keep,
        api_url = %config.api_url,
        dry_run = cli.dry_run,
        "Running cache prune"
    );
    let store = GitHubCacheStore::from_config(&config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&store, &config, &cli, &mut out)?;
    Ok(())
}

pub(super) fn execute<W: Write>(
    store: &dyn CacheStore,
    config: &PruneConfig,
    cli: &Cli,
    out: &mut W,
) -> anyhow::Result<PruneReport> {
    let grouping = cli.grouping();
    let out = RefCell::new(out);
    // Pruning keeps going when stdout breaks; the first write error is
    // returned once the run is over.
    let write_error: RefCell<Option<io::Error>> = RefCell::new(None);
    let reporter = |event: PruneProgress| {
        let mut out = out.borrow_mut();
        for line in render::progress_lines(&event) {
            if let Err(err) = writeln!(out, "{line}") {
                write_error.borrow_mut().get_or_insert(err);
                return;
            }
        }
    };
    let options = PruneOptions {
        grouping: &grouping,
        progress: Some(&reporter),
        dry_run: cli.dry_run,
    };
    let report = prune(store, config, options)?;
    if let Some(err) = write_error.into_inner() {
        return Err(anyhow::Error::new(err).context("write prune progress"));
    }
    if !report.groups.is_empty() {
        let mut out = out.borrow_mut();
        writeln!(out)?;
        writeln!(out, "{}", render::summary_line(&report, cli.dry_run))?;
    }
    Ok(report)
}
