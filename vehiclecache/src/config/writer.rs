//! INI serialization logic for converting `ConfigFile` → INI string.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let url = config.source.url.as_deref().unwrap_or("");
    let position_mode = config.source.position_mode.as_str().to_lowercase();

    format!(
        r#"[source]
; Base URL of the Trapeze vehicle location service, e.g. https://transit.example.org
; The CLI --url flag overrides this value.
url = {}
; Position mode requested from the service:
;   raw       - positions as reported by the vehicles
;   corrected - positions snapped to the route by the service
position_mode = {}
; HTTP request timeout in seconds
timeout = {}

[cache]
; Minimum time between two refreshes from the service, in milliseconds
update_delay = {}
; Time-to-live for vehicle records in milliseconds (0 = records never expire)
ttl = {}

[logging]
; Directory for log files (relative paths resolve against the working directory)
directory = {}
; Log file name
file = {}
"#,
        url,
        position_mode,
        config.source.timeout,
        config.cache.update_delay_ms,
        config.cache.ttl_ms,
        path_to_string(&config.logging.directory),
        config.logging.file,
    )
}

/// Convert path to string, collapsing home dir to ~.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
