//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::source::PositionMode;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [source] section
    if let Some(section) = ini.section(Some("source")) {
        if let Some(v) = section.get("url") {
            let v = v.trim();
            if !v.is_empty() {
                config.source.url = Some(v.to_string());
            }
        }
        if let Some(v) = section.get("position_mode") {
            config.source.position_mode =
                v.parse::<PositionMode>()
                    .map_err(|_| ConfigFileError::InvalidValue {
                        section: "source".to_string(),
                        key: "position_mode".to_string(),
                        value: v.to_string(),
                        reason: "must be one of: raw, corrected".to_string(),
                    })?;
        }
        if let Some(v) = section.get("timeout") {
            config.source.timeout = parse_u64("source", "timeout", v)?;
            if config.source.timeout == 0 {
                return Err(ConfigFileError::InvalidValue {
                    section: "source".to_string(),
                    key: "timeout".to_string(),
                    value: v.to_string(),
                    reason: "must be at least 1 second".to_string(),
                });
            }
        }
    }

    // [cache] section
    if let Some(section) = ini.section(Some("cache")) {
        if let Some(v) = section.get("update_delay") {
            config.cache.update_delay_ms = parse_u64("cache", "update_delay", v)?;
        }
        if let Some(v) = section.get("ttl") {
            config.cache.ttl_ms = parse_u64("cache", "ttl", v)?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
    }

    Ok(config)
}

fn parse_u64(section: &str, key: &str, value: &str) -> Result<u64, ConfigFileError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "must be a non-negative integer".to_string(),
        })
}

/// Expand a leading `~` to the home directory.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
