//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[server]
; Image server hosting metadata descriptors and tiles
base_url = {}

[download]
; Maximum number of tiles downloaded at the same time (at least 1)
concurrency = {}
; HTTP request timeout in seconds
timeout = {}
; Interval between throughput log lines in milliseconds
report_interval_ms = {}

[output]
; Root directory: each job writes {{directory}}/{{id}}/tiles and the assembled TIFF
directory = {}

[queue]
; Queue file, one image id per line
file = {}

[logging]
; Log file, truncated on each start
file = {}
"#,
        config.server.base_url,
        config.download.concurrency,
        config.download.timeout,
        config.download.report_interval_ms,
        path_to_string(&config.output.directory),
        path_to_string(&config.queue.file),
        path_to_string(&config.logging.file),
    )
}

/// Render a path, abbreviating the home directory as `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_written_config_lists_every_key() {
        let content = to_config_string(&ConfigFile::default());

        for key in [
            "[server]",
            "base_url = http://www.gigapan.org",
            "concurrency = 20",
            "timeout = 30",
            "report_interval_ms = 1000",
            "directory = .",
            "file = queue.txt",
            "file = logs/tilestitch.log",
        ] {
            assert!(content.contains(key), "missing {key:?}");
        }
    }

    #[test]
    fn test_save_then_load_preserves_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.ini");

        let mut config = ConfigFile::default();
        config.download.concurrency = 4;
        config.output.directory = PathBuf::from("/srv/out");
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
