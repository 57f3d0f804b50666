//! Atomic I/O operations with file locking

use std::fs::{self, OpenOptions};
use std::io::Write;

use fs2::FileExt;

use crate::checksum::{compute_content_checksum, compute_file_checksum};
use crate::{Error, NormalizedPath, Result};

/// What a synthesis write did to the file on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// File did not exist and was created
    Created,
    /// File existed with different content and was replaced
    Updated,
    /// File already held identical content; nothing was written
    Unchanged,
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
/// Acquires an advisory lock on the temp file while writing.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Temp file in the same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;
    drop(temp_file);

    if let Err(e) = fs::rename(&temp_path, &native_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&native_path, e));
    }

    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Write text only if it differs from what is already on disk.
///
/// The comparison uses content checksums, so re-synthesizing an
/// unchanged artifact leaves the file untouched.
pub fn sync_text(path: &NormalizedPath, content: &str) -> Result<WriteOutcome> {
    let native_path = path.to_native();
    let outcome = if native_path.is_file() {
        let existing =
            compute_file_checksum(&native_path).map_err(|e| Error::io(&native_path, e))?;
        if existing == compute_content_checksum(content) {
            tracing::debug!(path = %path, "content unchanged, skipping write");
            return Ok(WriteOutcome::Unchanged);
        }
        WriteOutcome::Updated
    } else {
        WriteOutcome::Created
    };

    write_text(path, content)?;
    tracing::debug!(path = %path, ?outcome, "wrote file");
    Ok(outcome)
}
