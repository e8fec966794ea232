//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::defaults::MIN_CONCURRENCY;
use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [server] section
    if let Some(section) = ini.section(Some("server")) {
        if let Some(v) = section.get("base_url") {
            let v = v.trim();
            if !v.starts_with("http://") && !v.starts_with("https://") {
                return Err(ConfigFileError::InvalidValue {
                    section: "server".to_string(),
                    key: "base_url".to_string(),
                    value: v.to_string(),
                    reason: "must start with http:// or https://".to_string(),
                });
            }
            config.server.base_url = v.to_string();
        }
    }

    // [download] section
    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = section.get("concurrency") {
            config.download.concurrency = v
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n >= MIN_CONCURRENCY)
                .ok_or_else(|| ConfigFileError::InvalidValue {
                    section: "download".to_string(),
                    key: "concurrency".to_string(),
                    value: v.to_string(),
                    reason: "must be an integer of at least 1".to_string(),
                })?;
        }
        if let Some(v) = section.get("timeout") {
            config.download.timeout = parse_positive(v, "download", "timeout", "seconds")?;
        }
        if let Some(v) = section.get("report_interval_ms") {
            config.download.report_interval_ms =
                parse_positive(v, "download", "report_interval_ms", "milliseconds")?;
        }
    }

    // [output] section
    if let Some(section) = ini.section(Some("output")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.output.directory = expand_tilde(v);
            }
        }
    }

    // [queue] section
    if let Some(section) = ini.section(Some("queue")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.queue.file = expand_tilde(v);
            }
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn parse_positive(
    value: &str,
    section: &str,
    key: &str,
    unit: &str,
) -> Result<u64, ConfigFileError> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: format!("must be a positive integer ({})", unit),
        })
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
