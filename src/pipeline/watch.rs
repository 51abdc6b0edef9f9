// src/pipeline/watch.rs

//! Watch pipeline: fetch, extract, diff, notify, persist.

use crate::error::Result;
use crate::models::Config;
use crate::pipeline::{detect_new, should_notify};
use crate::services::{FixtureExtractor, Mailer};
use crate::storage::StateStore;
use crate::utils::http;

/// Options for a single watch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct WatchOptions {
    /// Report fixtures found by the very first run instead of treating the
    /// run as baseline-establishing.
    pub notify_on_first_run: bool,
}

/// Run one full watch cycle.
///
/// State is saved only after the notify-or-skip decision has succeeded. A
/// failed delivery therefore leaves the new ids unrecorded and they are
/// reported again on the next run.
pub async fn run_watch(
    config: &Config,
    storage: &dyn StateStore,
    mailer: &Mailer,
    client: &reqwest::Client,
    options: WatchOptions,
) -> Result<()> {
    let lines = http::fetch_page_lines(client, &config.watcher.url).await?;
    log::info!(
        "Fetched {} text lines from {}",
        lines.len(),
        config.watcher.url
    );

    let extractor = FixtureExtractor::new(config.heuristics.clone());
    let fixtures = extractor.extract(&lines);
    log::info!("Extracted {} fixture(s)", fixtures.len());

    let mut state = storage.load().await?;
    let new = detect_new(&fixtures, &state);

    if should_notify(&new, &state, options.notify_on_first_run) {
        log::info!("{} new fixture(s), sending notification", new.len());
        mailer.send(&new, &config.watcher.url).await?;
    } else if new.is_empty() {
        log::info!("No new fixtures");
    } else {
        log::info!(
            "First run: recording {} fixture(s) as baseline without notifying",
            new.len()
        );
    }

    state.absorb(fixtures.iter().map(|fixture| fixture.id.clone()));
    storage.save(&state).await?;
    log::info!("State saved with {} seen id(s)", state.len());

    Ok(())
}
