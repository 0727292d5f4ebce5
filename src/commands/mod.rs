//! Non-interactive subcommands.

pub mod list;
