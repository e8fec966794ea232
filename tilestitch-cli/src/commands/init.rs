//! Init command - write a default configuration file.

use super::common::GlobalArgs;
use crate::error::CliError;
use tilestitch::config::ConfigFile;

/// Create the configuration file with defaults if it does not exist.
pub fn run(args: &GlobalArgs) -> Result<(), CliError> {
    let path = args.config_path();
    if ConfigFile::ensure_exists_at(&path)? {
        println!("Created configuration file: {}", path.display());
    } else {
        println!("Configuration file already exists: {}", path.display());
    }
    Ok(())
}
