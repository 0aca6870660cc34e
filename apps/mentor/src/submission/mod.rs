//! Uploaded submissions: filename rules, question-id derivation, and saving to the upload dir.

pub mod archive;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

const ALLOWED_EXTENSIONS: &[&str] = &["zip"];
const FALLBACK_FILENAME: &str = "upload.zip";

/// True when the name's final extension is one we accept (case-insensitive).
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Derives the question id from an archive name: `"RJSCPYQN94.zip"` → `"RJSCPYQN94"`.
///
/// The suffix match is case-sensitive, so `"X.ZIP"` passes `allowed_file` but yields no id.
pub fn extract_question_id(filename: &str) -> Option<&str> {
    filename.strip_suffix(".zip")
}

/// Reduces a client-supplied name to a flat, ASCII-only file name safe to join onto a dir.
pub fn secure_filename(filename: &str) -> String {
    let flattened: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");

    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Writes an upload into `dir` under its sanitised name and returns the final path.
///
/// The bytes land in a temp file first and are renamed into place, so readers never see a
/// half-written archive. Two uploads with the same name still replace one another.
pub fn save_upload(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    let target = dir.join(secure_filename(filename));

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    tmp.write_all(bytes).context("Failed to write upload")?;
    tmp.persist(&target)
        .with_context(|| format!("Failed to persist upload to {}", target.display()))?;

    Ok(target)
}
