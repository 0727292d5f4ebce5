//! TUI module for interactive exploration and deletion.

pub mod app;
pub mod event;
pub mod terminal;
pub mod ui;

use std::path::PathBuf;
use std::time::Duration;

pub use app::{App, UiOptions};

use crate::scanner::ListOptions;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Run the explorer on `root` until the user quits.
///
/// The root is listed before the terminal is touched, so a bad root fails
/// without leaving the screen in raw mode.
pub fn run(root: PathBuf, options: ListOptions, ui: UiOptions) -> anyhow::Result<()> {
    let mut app = App::new(root, options, ui)?;

    terminal::install_panic_hook();
    let mut tui = terminal::Tui::new()?;

    let result = event_loop(&mut tui, &mut app);
    tui.restore()?;

    tracing::info!("Explorer closed");
    result
}

fn event_loop(tui: &mut terminal::Tui, app: &mut App) -> anyhow::Result<()> {
    while !app.should_quit {
        tui.terminal_mut().draw(|frame| ui::render(app, frame))?;
        event::handle_events(app, POLL_INTERVAL)?;
    }
    Ok(())
}
