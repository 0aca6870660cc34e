//! Archive extraction: expands a submitted zip and flattens its text files into one blob.

use std::fs::{self, File};
use std::io::{self, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};
use zip::ZipArchive;

/// Returned instead of an error when the archive holds no readable text.
pub const NO_TEXT_FILES_SENTINEL: &str = "No valid text files found in the zip file.";

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Expands `zip_path` into `dest_dir` and concatenates every UTF-8 file it contained.
///
/// Sections follow archive listing order, each as `"\n\n=== <name> ===\n<content>"`.
/// Entries that are not valid UTF-8 are skipped. Extracted files stay on disk.
pub fn extract_user_code(zip_path: &Path, dest_dir: &Path) -> Result<String, ArchiveError> {
    let file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;

    let entries = extract_entries(&mut archive, dest_dir)?;
    info!("Extracted {} entries from {}", entries.len(), zip_path.display());

    let mut user_code = String::new();
    for (name, relative) in entries {
        let path = dest_dir.join(relative);
        if !path.is_file() {
            continue;
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => {
                user_code.push_str(&format!("\n\n=== {name} ===\n"));
                user_code.push_str(&content);
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                debug!("Skipping binary or non-utf-8 file: {}", path.display());
            }
            Err(e) => {
                warn!("Error reading file {}: {e}", path.display());
            }
        }
    }

    if user_code.is_empty() {
        info!("No valid text files found in {}", zip_path.display());
        return Ok(NO_TEXT_FILES_SENTINEL.to_string());
    }

    Ok(user_code)
}

/// Writes every safely-named entry under `dest_dir`, in listing order.
///
/// Returns entry names paired with their on-disk relative paths. Entries whose names
/// would escape `dest_dir` are skipped; the rest of the archive is still extracted.
fn extract_entries<R>(
    archive: &mut ZipArchive<R>,
    dest_dir: &Path,
) -> Result<Vec<(String, PathBuf)>, ArchiveError>
where
    R: io::Read + io::Seek,
{
    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let Some(relative) = entry.enclosed_name().map(Path::to_path_buf) else {
            warn!("Skipping archive entry with unsafe path: {}", entry.name());
            continue;
        };

        let target = dest_dir.join(&relative);
        if entry.is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = File::create(&target)?;
            io::copy(&mut entry, &mut out)?;
        }

        entries.push((entry.name().to_string(), relative));
    }
    Ok(entries)
}
