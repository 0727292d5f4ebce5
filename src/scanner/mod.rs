mod entry;
mod fs;
mod lister;
mod options;
mod size;

pub use entry::DirEntry;
pub use fs::{FileStat, Filesystem, LocalFs, RawEntry};
pub use lister::{list_directory, list_directory_with};
pub use options::{ListOptions, DEFAULT_MIN_SIZE};
pub use size::{format_size, parse_size};

#[cfg(test)]
pub(crate) use fs::memory;
