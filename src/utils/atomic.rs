//! Crash-safe file replacement.

use std::{io::Write, path::Path};

use tempfile::NamedTempFile;

use crate::{Error, Result};

/// Writes `data` to a uniquely named temporary file next to `path` and renames it
/// over `path`.
///
/// A reader of `path` sees either the old content or the new one, never a partial
/// write. Concurrent saves to the same path each use their own temporary file, and
/// the temporary file is removed again if anything fails.
///
/// # Errors
///
/// Returns [`Error::Persistence`] if `path` has no file name and [`Error::Io`] if
/// writing or renaming fails.
pub fn write_atomically(path: &Path, data: &[u8]) -> Result<()> {
    if path.file_name().is_none() {
        return Err(Error::Persistence(format!(
            "{} is not a file path",
            path.display()
        )));
    }
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temporary = NamedTempFile::new_in(directory)?;
    temporary.write_all(data)?;
    temporary.as_file().sync_all()?;
    temporary.persist(path).map_err(|error| error.error)?;
    Ok(())
}
