//! Run command implementation.
//!
//! Opens the full-screen demo: a counter above a hold button.

use anyhow::Context;
use tracing::info;

use crate::config::LongPressConfig;
use crate::logging::{self, LogTarget};
use crate::tui::TuiApp;

/// Run the demo until the user quits; returns the final count.
pub fn run_demo(config: &LongPressConfig) -> anyhow::Result<u64> {
    logging::init(&config.log, LogTarget::File)
        .with_context(|| format!("Failed to open log file {}", config.log.file))?;
    info!(
        text = %config.button.text,
        duration_secs = config.button.duration_secs,
        granularity_ms = config.clock.granularity_ms,
        "starting demo"
    );

    let mut app = TuiApp::new(&config.button, config.clock.granularity())
        .context("Failed to set up the terminal")?;
    app.run().context("Terminal UI failed")?;
    let count = app.count();
    drop(app);

    info!(count, "demo finished");
    Ok(count)
}
