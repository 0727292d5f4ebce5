//! purgo - interactive large-file explorer
//!
//! Browses a directory tree showing only entries at or above a size
//! threshold, loads directories on demand, and deletes files after
//! confirmation.
//!
//! - [`scanner`] lists one directory at a time through a [`scanner::Filesystem`]
//! - [`tree`] holds the lazily loaded tree model
//! - [`controller`] drives activation, confirmation dialogs and refreshes
//! - [`tui`] renders the tree in the terminal

pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod scanner;
pub mod tree;
pub mod tui;

// Re-export commonly used types
pub use config::Config;
pub use controller::TreeController;
pub use error::{ExplorerError, Result};
