//! Bulk conversion of a directory of messages into `.html` files.

use std::path::{Path, PathBuf};

use crate::convert;
use crate::error::{ConvertError, Result};
use crate::model::message::MessageResult;

/// Placeholder kept in empty directories; never a message.
const GITKEEP: &str = ".gitkeep";

/// Options for [`convert_directory`].
#[derive(Debug, Clone, Default)]
pub struct BulkOptions {
    /// Log and count failing files instead of aborting the run.
    pub keep_going: bool,
}

/// Outcome of a bulk conversion.
#[derive(Debug, Clone, Default)]
pub struct BulkStats {
    /// Messages converted successfully.
    pub converted: usize,
    /// Messages that failed (only non-zero with `keep_going`).
    pub failed: usize,
    /// Files written, in order.
    pub written: Vec<PathBuf>,
    /// Total bytes written.
    pub bytes_written: u64,
}

/// Convert every message file in `original_dir` and write the results to `output_dir`.
///
/// Files are visited sorted by name. `.gitkeep` and sub-directories are skipped.
/// The progress callback receives `(current, total)`.
pub fn convert_directory(
    original_dir: &Path,
    output_dir: &Path,
    options: &BulkOptions,
    progress: &dyn Fn(usize, usize),
) -> Result<BulkStats> {
    let inputs = list_message_files(original_dir)?;
    std::fs::create_dir_all(output_dir).map_err(|e| ConvertError::io(output_dir, e))?;

    let mut stats = BulkStats::default();
    let total = inputs.len();

    for (i, path) in inputs.iter().enumerate() {
        progress(i, total);

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            tracing::warn!(path = %path.display(), "Skipping file with non UTF-8 name");
            continue;
        };

        match convert::convert_file(path) {
            Ok(message) => {
                if message.is_empty() {
                    tracing::warn!(path = %path.display(), "No text/plain or text/html body found");
                }
                for (written, len) in write_message(&message, output_dir, file_name)? {
                    stats.bytes_written += len;
                    stats.written.push(written);
                }
                stats.converted += 1;
            }
            Err(e) if options.keep_going => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to convert message");
                stats.failed += 1;
            }
            Err(e) => return Err(e),
        }
    }
    progress(total, total);

    Ok(stats)
}

/// Write the bodies of one message as `{file_name}.plain.html` / `{file_name}.html.html`.
///
/// Returns the paths written (zero, one or two) with their sizes in bytes.
pub fn write_message(
    message: &MessageResult,
    output_dir: &Path,
    file_name: &str,
) -> Result<Vec<(PathBuf, u64)>> {
    let bodies = [("plain", &message.plain), ("html", &message.html)];
    let mut paths = Vec::with_capacity(2);

    for (variant, body) in bodies {
        if let Some(body) = body {
            let path = output_path(output_dir, file_name, variant);
            std::fs::write(&path, body).map_err(|e| ConvertError::io(&path, e))?;
            tracing::debug!(path = %path.display(), "Wrote body");
            paths.push((path, body.len() as u64));
        }
    }

    Ok(paths)
}

/// `{output_dir}/{file_name}.{variant}.html`
pub fn output_path(output_dir: &Path, file_name: &str, variant: &str) -> PathBuf {
    output_dir.join(format!("{file_name}.{variant}.html"))
}

/// Regular files of `dir`, sorted by name, without `.gitkeep`.
fn list_message_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConvertError::FileNotFound(dir.to_path_buf())
        } else {
            ConvertError::io(dir, e)
        }
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConvertError::io(dir, e))?;
        let path = entry.path();

        if entry.file_name() == GITKEEP {
            continue;
        }
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "Skipping non-file entry");
            continue;
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}
