use std::path::Path;

use crate::error::{ExplorerError, Result};

use super::entry::DirEntry;
use super::fs::Filesystem;
use super::options::ListOptions;

/// List the immediate entries of `path` that are at least `min_size` bytes.
pub fn list_directory<F: Filesystem + ?Sized>(
    fs: &F,
    path: &Path,
    min_size: u64,
) -> Result<Vec<DirEntry>> {
    list_directory_with(fs, path, &ListOptions::new().with_min_size(min_size))
}

/// List the immediate entries of `path` that pass `options`.
///
/// Fails as a whole if the directory or any entry's metadata cannot be read.
/// Entries keep the filesystem's enumeration order.
pub fn list_directory_with<F: Filesystem + ?Sized>(
    fs: &F,
    path: &Path,
    options: &ListOptions,
) -> Result<Vec<DirEntry>> {
    let raw = fs
        .read_dir(path)
        .map_err(|e| ExplorerError::from_io(path, e))?;

    let total = raw.len();
    let entries: Vec<DirEntry> = raw
        .into_iter()
        .filter(|e| options.admits(e.is_dir, e.size))
        .map(|e| {
            if e.is_dir {
                DirEntry::new_dir(e.path, e.size)
            } else {
                DirEntry::new_file(e.path, e.size)
            }
        })
        .collect();

    tracing::debug!(
        path = %path.display(),
        total,
        kept = entries.len(),
        min_size = options.min_size,
        "Listed directory"
    );

    Ok(entries)
}
