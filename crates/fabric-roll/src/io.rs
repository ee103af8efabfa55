//! Document serialization and safe output writing

use crate::types::*;
use lopdf::Document;
use std::fs;
use std::path::{Path, PathBuf};

/// Serialize a document to bytes
pub fn document_to_bytes(doc: &mut Document) -> Result<Vec<u8>> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    Ok(writer)
}

/// Destination for finished PDFs
pub trait OutputWriter: Send + Sync {
    /// Write `bytes` for `target`, returning the path actually written
    fn write(&self, bytes: &[u8], target: &Path) -> Result<PathBuf>;
}

/// Writes through a temporary file and renames it over the target.
///
/// When the rename cannot replace the target, the output goes to a
/// `<stem>_new.pdf` sibling instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomicWriter;

impl OutputWriter for AtomicWriter {
    fn write(&self, bytes: &[u8], target: &Path) -> Result<PathBuf> {
        let temp_path = sibling_with_suffix(target, "_temp");
        if let Err(err) = fs::write(&temp_path, bytes) {
            // A failed write may leave a partial file behind
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }
        log::info!("Saved temporary PDF: {}", temp_path.display());

        let final_path = match fs::rename(&temp_path, target) {
            Ok(()) => target.to_path_buf(),
            Err(err) => {
                log::warn!("Could not replace {}: {}", target.display(), err);
                let alternative = sibling_with_suffix(target, "_new");
                log::info!("Using alternative output path: {}", alternative.display());
                if let Err(err) = fs::rename(&temp_path, &alternative) {
                    let _ = fs::remove_file(&temp_path);
                    return Err(err.into());
                }
                alternative
            }
        };

        let size = fs::metadata(&final_path)?.len();
        log::info!(
            "Verified final PDF exists: {}, size: {} bytes",
            final_path.display(),
            size
        );
        Ok(final_path)
    }
}

/// `dir/name.pdf` -> `dir/name{suffix}.pdf`
pub fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match path.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };
    path.with_file_name(file_name)
}
