//! The filesystem boundary used by the lister and the tree controller.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::size::apparent_size;

/// One immediate child as reported by [`Filesystem::read_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Full path, built from the raw file name bytes.
    pub path: PathBuf,
    /// Display name; lossy for names that are not valid UTF-8.
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
}

/// Result of [`Filesystem::stat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub is_dir: bool,
    pub size: u64,
}

/// Filesystem operations needed by the explorer.
///
/// Every call is synchronous and releases whatever handles it opened before
/// returning.
pub trait Filesystem {
    /// List the immediate entries of a directory, in enumeration order.
    ///
    /// A metadata failure on any single entry fails the whole call.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<RawEntry>>;

    /// Metadata for a path, following symlinks.
    fn stat(&self, path: &Path) -> io::Result<FileStat>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// The local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl Filesystem for LocalFs {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<RawEntry>> {
        if !fs::metadata(path)?.is_dir() {
            return Err(io::Error::other(format!(
                "'{}' is not a directory",
                path.display()
            )));
        }

        let walker = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);

        let mut entries = Vec::new();
        for result in walker {
            let entry = result?;
            let metadata = entry.metadata()?;
            let is_dir = entry.file_type().is_dir();
            entries.push(RawEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                path: entry.into_path(),
                is_dir,
                size: apparent_size(&metadata),
            });
        }

        Ok(entries)
    }

    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let metadata = fs::metadata(path)?;
        Ok(FileStat {
            is_dir: metadata.is_dir(),
            size: apparent_size(&metadata),
        })
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}
