use anyhow::{Context, Result};
use log::warn;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Installs a Ctrl-C handler that raises the returned flag.
///
/// Extractions that have not started yet check the flag and give up.
pub fn setup_shutdown_signal() -> Result<Arc<AtomicBool>> {
    let shutdown_signal = Arc::new(AtomicBool::new(false));
    let signal_clone = Arc::clone(&shutdown_signal);

    ctrlc::set_handler(move || {
        signal_clone.store(true, Ordering::SeqCst);
        warn!("interrupted, waiting for running extractions to finish");
    })
    .context("failed to install Ctrl-C handler")?;

    Ok(shutdown_signal)
}
