/// Default minimum entry size: 1 MiB.
pub const DEFAULT_MIN_SIZE: u64 = 1024 * 1024;

/// Configuration options for directory listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    /// Entries strictly smaller than this many bytes are left out
    pub min_size: u64,

    /// Let directories through regardless of their reported size
    pub exempt_directories: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_SIZE,
            exempt_directories: false,
        }
    }
}

impl ListOptions {
    /// Create a new ListOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size threshold
    pub fn with_min_size(mut self, min_size: u64) -> Self {
        self.min_size = min_size;
        self
    }

    /// Set whether directories skip the size comparison
    pub fn with_exempt_directories(mut self, exempt: bool) -> Self {
        self.exempt_directories = exempt;
        self
    }

    /// Whether an entry with this size and kind passes the threshold.
    ///
    /// Directories are compared by their own metadata size unless exempted.
    pub fn admits(&self, is_dir: bool, size: u64) -> bool {
        (is_dir && self.exempt_directories) || size >= self.min_size
    }
}
