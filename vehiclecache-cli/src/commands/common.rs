//! Common types and utilities shared across CLI commands.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use console::style;
use vehiclecache::config::ConfigFile;
use vehiclecache::time::Timestamp;
use vehiclecache::{PositionMode, VehicleRecord};

use crate::error::CliError;

/// Position mode selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum PositionModeArg {
    /// Positions as reported by the vehicles
    Raw,
    /// Positions snapped to the route by the service
    Corrected,
}

impl From<PositionModeArg> for PositionMode {
    fn from(mode: PositionModeArg) -> Self {
        match mode {
            PositionModeArg::Raw => PositionMode::Raw,
            PositionModeArg::Corrected => PositionMode::Corrected,
        }
    }
}

/// Resolve the service base URL from CLI args and config.
pub fn resolve_base_url(cli_url: Option<String>, config: &ConfigFile) -> Result<String, CliError> {
    // CLI takes precedence, then config
    cli_url
        .or_else(|| config.source.url.clone())
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            CliError::Config(
                "No service URL configured. Set url in the [source] section of config.ini \
                 or use --url"
                    .to_string(),
            )
        })
}

/// Format an epoch-millisecond timestamp as UTC.
pub fn format_timestamp(ts: Timestamp) -> String {
    DateTime::<Utc>::from_timestamp_millis(ts)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string())
        .unwrap_or_else(|| ts.to_string())
}

/// One line describing a vehicle record.
pub fn format_record(record: &VehicleRecord) -> String {
    let position = match record.position() {
        Some((lat, lon)) => format!("{:>10.5} {:>10.5}", lat, lon),
        None => format!("{:>21}", "-"),
    };

    let mut line = format!(
        "{:<14} {:<12} {}",
        record.id,
        record.trip_id.as_deref().unwrap_or("-"),
        position
    );

    if let Some(heading) = record.heading {
        line.push_str(&format!(" {:>4}°", heading));
    }
    if let Some(name) = &record.name {
        line.push_str(&format!("  {}", name));
    }
    if record.is_deleted {
        line.push_str("  (deleted)");
    }

    line
}

/// Print a list of records under a styled header.
pub fn print_records(records: &[VehicleRecord]) {
    println!(
        "{}",
        style(format!(
            "{:<14} {:<12} {:>10} {:>10}",
            "VEHICLE", "TRIP", "LAT", "LON"
        ))
        .bold()
    );
    for record in records {
        println!("{}", format_record(record));
    }
    println!();
    println!("{} vehicle(s)", style(records.len()).cyan());
}

/// Print a single record with all of its fields.
pub fn print_record_detail(record: &VehicleRecord) {
    println!("{}", style(format!("Vehicle {}", record.id)).bold().underlined());
    println!("  Trip:        {}", record.trip_id.as_deref().unwrap_or("-"));
    match record.position() {
        Some((lat, lon)) => println!("  Position:    {:.6}, {:.6}", lat, lon),
        None => println!("  Position:    -"),
    }
    if let Some(heading) = record.heading {
        println!("  Heading:     {}°", heading);
    }
    if let Some(name) = &record.name {
        println!("  Name:        {}", name);
    }
    if let Some(category) = &record.category {
        println!("  Category:    {}", category);
    }
    if let Some(color) = &record.color {
        println!("  Color:       {}", color);
    }
    println!("  Last update: {}", format_timestamp(record.last_update));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_url_takes_precedence() {
        let mut config = ConfigFile::default();
        config.source.url = Some("https://config.example.org".to_string());

        let url = resolve_base_url(Some("https://cli.example.org".to_string()), &config).unwrap();
        assert_eq!(url, "https://cli.example.org");

        let url = resolve_base_url(None, &config).unwrap();
        assert_eq!(url, "https://config.example.org");
    }

    #[test]
    fn test_missing_url_is_config_error() {
        let config = ConfigFile::default();
        assert!(matches!(
            resolve_base_url(None, &config),
            Err(CliError::Config(_))
        ));
        assert!(resolve_base_url(Some("  ".to_string()), &config).is_err());
    }

    #[test]
    fn test_mode_arg_conversion() {
        assert_eq!(PositionMode::from(PositionModeArg::Raw), PositionMode::Raw);
        assert_eq!(
            PositionMode::from(PositionModeArg::Corrected),
            PositionMode::Corrected
        );
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00.000 UTC");
        assert_eq!(
            format_timestamp(1_700_000_000_123),
            "2023-11-14 22:13:20.123 UTC"
        );
    }

    #[test]
    fn test_format_record_with_position() {
        let record = VehicleRecord::new("-1187843737", 51.05, 13.74, 1000).with_trip("8142");
        let line = format_record(&record);
        assert!(line.starts_with("-1187843737"));
        assert!(line.contains("8142"));
        assert!(line.contains("51.05000"));
        assert!(line.contains("13.74000"));
    }

    #[test]
    fn test_format_tombstone() {
        let record = VehicleRecord::tombstone("-1187843737", 1000);
        let line = format_record(&record);
        assert!(line.contains("(deleted)"));
        assert!(!line.contains('.'));
    }
}
