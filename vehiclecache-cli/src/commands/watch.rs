//! Watch command - refresh the cache repeatedly until interrupted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use console::style;
use vehiclecache::storage::LoadStatus;

use super::common::format_timestamp;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Granularity of the shutdown check while sleeping between refreshes.
const SHUTDOWN_POLL: Duration = Duration::from_millis(100);

/// Run the watch command.
pub fn run(runner: &CliRunner, interval: Duration) -> Result<(), CliError> {
    runner.log_startup("watch");
    let storage = runner.storage();

    println!("VehicleCache Watch v{}", vehiclecache::VERSION);
    println!("=========================");
    println!();
    println!("Update delay: {:?}", storage.config().update_delay);
    println!("Interval:     {:?}", interval);
    println!("Mode:         {}", storage.config().position_mode);
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();

    ctrlc::set_handler(move || {
        println!();
        println!("Received shutdown signal, stopping...");
        shutdown_clone.store(true, Ordering::SeqCst);
    })
    .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    while !shutdown.load(Ordering::SeqCst) {
        let status = runner.block_on(storage.fetch());
        println!(
            "{}",
            status_line(&status, storage.store().len(), storage.stats().remote_calls)
        );

        let mut slept = Duration::ZERO;
        while slept < interval && !shutdown.load(Ordering::SeqCst) {
            std::thread::sleep(SHUTDOWN_POLL);
            slept += SHUTDOWN_POLL;
        }
    }

    storage.log_stats();

    let stats = storage.stats();
    println!();
    println!("Session Summary");
    println!("───────────────");
    println!("  Requests:     {}", stats.total_requests);
    println!(
        "  Remote calls: {} ({} failed)",
        stats.remote_calls, stats.failures
    );
    println!(
        "  Coalesced:    {} ({:.0}%)",
        stats.coalesced_requests,
        stats.coalescing_ratio() * 100.0
    );
    println!("  Vehicles:     {}", storage.store().len());
    Ok(())
}

/// One status line per refresh attempt.
fn status_line(status: &LoadStatus, vehicles: usize, remote_calls: u64) -> String {
    let checked = format_timestamp(status.timestamp());
    match status {
        LoadStatus::Success(success) => format!(
            "[{}] {} watermark {} | {} vehicles | {} remote calls",
            checked,
            style("OK").green(),
            format_timestamp(success.last_update),
            vehicles,
            remote_calls
        ),
        LoadStatus::Error(error) => format!(
            "[{}] {} {} | keeping {} vehicles",
            checked,
            style("FAILED").red(),
            error.error,
            vehicles
        ),
    }
}
