//! Footer asset lookup

use super::asset::FooterSource;
use crate::options::RollConfig;
use std::path::PathBuf;

/// Every location a footer may live at, in the order they are tried.
///
/// The scripts folder comes first, then the templates folder, then the base
/// folder; after that the same folders are tried with a lower-case file name.
pub fn footer_search_paths(config: &RollConfig) -> Vec<PathBuf> {
    let folders = [&config.scripts_dir, &config.templates_dir, &config.base_dir];
    let mut paths: Vec<PathBuf> = folders
        .iter()
        .map(|dir| dir.join(&config.footer_file_name))
        .collect();

    let lower = config.footer_file_name.to_lowercase();
    if lower != config.footer_file_name {
        paths.extend(folders.iter().map(|dir| dir.join(&lower)));
    }

    paths
}

/// Find the first existing footer, or fall back to a synthesized one
pub fn locate_footer(config: &RollConfig) -> FooterSource {
    let paths = footer_search_paths(config);
    log::info!("Using footer path: {}", paths[0].display());

    for (idx, path) in paths.iter().enumerate() {
        if path.is_file() {
            if idx > 0 {
                log::info!("Found alternate footer at: {}", path.display());
            }
            return FooterSource::File(path.clone());
        }
        if idx == 0 {
            log::warn!("Footer file not found at {}", path.display());
        }
    }

    log::warn!("No footer found, a simple replacement footer will be generated");
    FooterSource::Synthetic
}
