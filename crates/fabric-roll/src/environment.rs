//! Working directory checks run before any image is processed

use crate::constants::WRITE_PROBE_FILE;
use crate::options::RollConfig;
use crate::types::{Result, RollError};
use std::fs;
use std::path::Path;

/// Make sure the base, templates and scripts folders exist and are writable.
///
/// Missing folders are created. Any folder that cannot be created or written
/// to is an environment error.
pub fn verify_directories(config: &RollConfig) -> Result<()> {
    for dir in [&config.base_dir, &config.templates_dir, &config.scripts_dir] {
        ensure_directory(dir)?;
        probe_writable(dir)?;
        log::info!("Directory is writable: {}", dir.display());
    }
    Ok(())
}

fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    log::warn!("Directory not found: {}", dir.display());
    fs::create_dir_all(dir).map_err(|err| {
        RollError::Environment(format!(
            "failed to create directory {}: {}",
            dir.display(),
            err
        ))
    })?;
    log::info!("Created directory: {}", dir.display());
    Ok(())
}

fn probe_writable(dir: &Path) -> Result<()> {
    let probe = dir.join(WRITE_PROBE_FILE);
    fs::write(&probe, b"test")
        .and_then(|()| fs::remove_file(&probe))
        .map_err(|err| {
            RollError::Environment(format!(
                "directory is not writable: {}: {}",
                dir.display(),
                err
            ))
        })
}
