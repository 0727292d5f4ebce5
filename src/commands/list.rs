//! List command implementation

use std::io::Write;

use crate::cli::ListArgs;
use crate::config::Config;
use crate::error::{ExplorerError, Result};
use crate::scanner::{format_size, list_directory_with, DirEntry, LocalFs};

/// Run the list command, writing to stdout.
pub fn run(args: ListArgs, config: Config) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_to(args, config, &mut out)
}

/// Run the list command against any writer.
pub fn run_to<W: Write>(args: ListArgs, config: Config, out: &mut W) -> Result<()> {
    let config = config.with_min_size_arg(args.min_size.as_deref())?;
    let options = config.list_options();

    tracing::info!(path = %args.path.display(), min_size = options.min_size, "Listing directory");

    let entries = list_directory_with(&LocalFs, &args.path, &options)?;

    let output = if args.json {
        serde_json::to_string_pretty(&entries)?
    } else {
        format_table(&entries)
    };

    writeln!(out, "{}", output).map_err(|e| ExplorerError::from_io(&args.path, e))?;
    Ok(())
}

/// One row per entry: size column, then the name (directories end in `/`).
pub fn format_table(entries: &[DirEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len());
    for entry in entries {
        let name = if entry.is_dir {
            format!("{}/", entry.name)
        } else {
            entry.name.clone()
        };
        lines.push(format!("{:>10}  {}", format_size(entry.size), name));
    }
    lines.join("\n")
}
