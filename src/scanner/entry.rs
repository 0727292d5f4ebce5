use serde::Serialize;
use std::path::PathBuf;

/// One immediate entry of a listed directory.
///
/// Produced by the lister and consumed right away to build tree nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntry {
    /// Entry name (last component of path)
    pub name: String,

    /// Full path to the file or directory
    pub path: PathBuf,

    /// True if this is a directory
    pub is_dir: bool,

    /// Apparent size in bytes, as reported by the entry's own metadata
    pub size: u64,
}

impl DirEntry {
    pub fn new_file(path: PathBuf, size: u64) -> Self {
        Self {
            name: file_name_of(&path),
            path,
            is_dir: false,
            size,
        }
    }

    pub fn new_dir(path: PathBuf, size: u64) -> Self {
        Self {
            name: file_name_of(&path),
            path,
            is_dir: true,
            size,
        }
    }
}

fn file_name_of(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
