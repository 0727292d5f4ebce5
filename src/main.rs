use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use purgo::cli::{Cli, Command};
use purgo::commands;
use purgo::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The explorer owns the terminal, so it only logs when given a file
    let interactive = cli.command.is_none();
    init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref(), interactive)?;

    let config = Config::load(cli.config.as_deref())?;

    tracing::debug!(?config, "Loaded configuration");

    match cli.command {
        Some(Command::List(args)) => {
            tracing::info!(?args, "Starting list");
            commands::list::run(args, config)?;
        }
        Some(Command::Completions(args)) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(args.shell, &mut cmd, name, &mut std::io::stdout());
        }
        Some(Command::Man) => {
            let man = clap_mangen::Man::new(Cli::command());
            man.render(&mut std::io::stdout())?;
        }
        None => {
            let args = cli.explore;
            tracing::info!(?args, "Starting explorer");

            let config = config.with_min_size_arg(args.min_size.as_deref())?;
            let mut ui = config.ui_options();
            ui.no_color |= args.no_color;

            let root = args
                .path
                .canonicalize()
                .with_context(|| format!("Cannot open '{}'", args.path.display()))?;
            purgo::tui::run(root, config.list_options(), ui)?;
        }
    }

    Ok(())
}

fn init_logging(
    verbosity: u8,
    quiet: bool,
    log_file: Option<&Path>,
    interactive: bool,
) -> Result<()> {
    use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, EnvFilter};

    let level = if quiet {
        "warn"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("purgo={}", level)));

    let (writer, ansi) = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Cannot create log file '{}'", path.display()))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None if interactive => (BoxMakeWriter::new(std::io::sink), false),
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(ansi)
                .with_writer(writer),
        )
        .with(filter)
        .init();

    Ok(())
}
