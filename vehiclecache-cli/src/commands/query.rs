//! One-shot query commands: `vehicle`, `trip`, `bounds` and `list`.

use console::style;
use vehiclecache::time::Timestamp;

use super::common::{format_timestamp, print_record_detail, print_records};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Bounding box arguments for the `bounds` command.
#[derive(Debug, Clone, Copy)]
pub struct BoundsArgs {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Print the current record of one vehicle.
pub fn run_vehicle(runner: &CliRunner, id: &str) -> Result<(), CliError> {
    runner.log_startup("vehicle");
    let record = runner.block_on(runner.storage().get_vehicle(id))?;
    print_record_detail(&record);
    Ok(())
}

/// Print the vehicle currently serving a trip.
pub fn run_trip(runner: &CliRunner, trip_id: &str) -> Result<(), CliError> {
    runner.log_startup("trip");
    let record = runner.block_on(runner.storage().get_vehicle_by_trip_id(trip_id))?;
    print_record_detail(&record);
    Ok(())
}

/// List the vehicles inside a bounding box.
pub fn run_bounds(runner: &CliRunner, args: BoundsArgs) -> Result<(), CliError> {
    runner.log_startup("bounds");
    let snapshot = runner.block_on(runner.storage().get_vehicles_in_bounds(
        args.left,
        args.right,
        args.top,
        args.bottom,
    ))?;

    println!(
        "Vehicles in [{}, {}] x [{}, {}] as of {}",
        args.left,
        args.right,
        args.bottom,
        args.top,
        style(format_timestamp(snapshot.last_update)).cyan()
    );
    println!();
    print_records(&snapshot.vehicles);
    Ok(())
}

/// List every current vehicle updated at or after `since`.
pub fn run_list(runner: &CliRunner, since: Timestamp) -> Result<(), CliError> {
    runner.log_startup("list");
    let mut vehicles = runner.block_on(runner.storage().get_all_vehicles(since))?;
    vehicles.sort_by(|a, b| a.id.cmp(&b.id));
    print_records(&vehicles);
    Ok(())
}
