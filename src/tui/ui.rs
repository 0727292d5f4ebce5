//! UI rendering for the TUI.

use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::app::{App, Mode, VisibleEntry};
use crate::controller::Dialog;

/// Render the entire UI.
pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Tree view
            Constraint::Length(2), // Footer
        ])
        .split(frame.area());

    render_header(app, frame, chunks[0]);
    render_tree_area(app, frame, chunks[1]);
    render_footer(app, frame, chunks[2]);

    // Dialogs sit above everything else
    if let Some(dialog) = app.dialog() {
        render_dialog(app, frame, dialog);
    } else if app.mode == Mode::Help {
        render_help_overlay(app, frame);
    }
}

/// Foreground colour, unless colours are disabled.
fn fg(app: &App, color: Color) -> Style {
    if app.ui.no_color {
        Style::default()
    } else {
        Style::default().fg(color)
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let path_display = app.root().display().to_string();
    let threshold = format!("≥ {}", app.threshold_display());

    // Get disk usage info
    let disk_info = if app.ui.show_disk_usage {
        app.get_disk_usage().map(|(total, used, avail)| {
            let total_str = humansize::format_size(total, humansize::BINARY);
            let avail_str = humansize::format_size(avail, humansize::BINARY);
            let percent = used.saturating_mul(100).checked_div(total).unwrap_or(0);
            format!("Disk: {}% of {} used, {} free", percent, total_str, avail_str)
        })
    } else {
        None
    };

    let header_text = match disk_info {
        Some(disk) => format!(" {}  {}  │  {}", path_display, threshold, disk),
        None => format!(" {}  {}", path_display, threshold),
    };

    let block = Block::default()
        .title(" purgo - select files to delete, directories to expand/collapse ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(fg(app, Color::Cyan));

    let paragraph = Paragraph::new(header_text)
        .block(block)
        .style(fg(app, Color::White));

    frame.render_widget(paragraph, area);
}

fn render_tree_area(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(fg(app, Color::Gray));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let visible_height = inner_area.height as usize;
    let scroll_offset =
        calculate_scroll_offset(app.selected, visible_height, app.visible_entries.len());

    for (i, entry) in app
        .visible_entries
        .iter()
        .skip(scroll_offset)
        .take(visible_height)
        .enumerate()
    {
        let y = inner_area.y + i as u16;
        let is_selected = scroll_offset + i == app.selected;
        let row = Rect::new(inner_area.x, y, inner_area.width, 1);
        render_entry(app, frame, entry, row, is_selected);
    }

    // Only the root row left: say why
    if app.visible_entries.len() == 1 && inner_area.height > 2 {
        let hint = Rect::new(inner_area.x, inner_area.y + 2, inner_area.width, 1);
        let paragraph = Paragraph::new("No entries at or above the size threshold")
            .alignment(Alignment::Center)
            .style(fg(app, Color::DarkGray));
        frame.render_widget(paragraph, hint);
    }
}

fn calculate_scroll_offset(selected: usize, visible_height: usize, total: usize) -> usize {
    if total <= visible_height {
        return 0;
    }

    let padding = 3.min(visible_height / 4);

    if selected < padding {
        0
    } else if selected >= total - padding {
        total.saturating_sub(visible_height)
    } else {
        selected
            .saturating_sub(padding)
            .min(total.saturating_sub(visible_height))
    }
}

fn render_entry(app: &App, frame: &mut Frame, entry: &VisibleEntry, area: Rect, is_selected: bool) {
    let indent = "  ".repeat(entry.depth);

    let icon = if entry.is_dir {
        if entry.is_expanded {
            "▼ "
        } else {
            "► "
        }
    } else {
        "  "
    };

    // Truncate the label on char boundaries
    let prefix_len = indent.chars().count() + icon.chars().count();
    let label_width = (area.width as usize).saturating_sub(prefix_len);
    let label_len = entry.label.chars().count();
    let label = if label_len > label_width && label_width > 1 {
        let truncated: String = entry.label.chars().take(label_width - 1).collect();
        format!("{}…", truncated)
    } else {
        entry.label.clone()
    };

    let style = if entry.depth == 0 {
        fg(app, Color::White).bold()
    } else if entry.is_dir {
        fg(app, Color::Blue).bold()
    } else {
        fg(app, Color::Yellow)
    };

    let mut line = Line::from(vec![
        Span::styled(format!("{}{}", indent, icon), style),
        Span::styled(label, style),
    ]);

    if is_selected {
        line = line.style(if app.ui.no_color {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().bg(Color::DarkGray)
        });
    }

    frame.render_widget(Paragraph::new(line), area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match (app.dialog(), app.mode) {
        (Some(Dialog::Confirm { .. }), _) => "[y] Yes  [n] No",
        (Some(Dialog::Alert { .. }), _) => "[Enter] OK",
        (None, Mode::Normal) => {
            "[↑↓] Navigate  [Enter] Open / Delete  [←] Parent  [r] Refresh  [?] Help  [q] Quit"
        }
        (None, Mode::Help) => "[Esc] Close",
    };

    // Show status message if present, otherwise hints
    let text = match (&app.status_message, app.dialog()) {
        (Some(message), None) => message.as_str(),
        _ => hints,
    };

    let paragraph = Paragraph::new(text)
        .style(fg(app, Color::DarkGray))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Calculate a centered rectangle within the given area.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(w) / 2,
        y: area.y + area.height.saturating_sub(h) / 2,
        width: w,
        height: h,
    }
}

fn render_dialog(app: &App, frame: &mut Frame, dialog: &Dialog) {
    let area = frame.area();
    let dialog_width = 60u16.min(area.width.saturating_sub(4));
    let dialog_area = centered_rect(dialog_width, 8, area);

    frame.render_widget(Clear, dialog_area);

    let (title, border, buttons) = match dialog {
        Dialog::Confirm { .. } => (" Confirm ", Color::Red, "[y]es  [n]o"),
        Dialog::Alert { .. } => (" Error ", Color::Yellow, "[Enter] OK"),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(fg(app, border));

    let text = format!("{}\n\n{}", dialog.message(), buttons);
    let paragraph = Paragraph::new(text)
        .block(block)
        .style(fg(app, Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, dialog_area);
}

fn render_help_overlay(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let help_width = 60u16.min(area.width.saturating_sub(8));
    let help_height = 20u16.min(area.height.saturating_sub(4));
    let help_area = centered_rect(help_width, help_height, area);

    frame.render_widget(Clear, help_area);

    let help_text = r#"
 NAVIGATION
 ─────────────────────────────────
 ↑/k        Move up
 ↓/j        Move down
 ←/h/Bksp   Go to parent
 g / G      Go to top / bottom

 ACTIONS
 ─────────────────────────────────
 Enter/→/l  Expand or collapse directory
            Delete file (asks first)
 r          Re-read directory from disk

 ?          Toggle this help
 q/Esc      Quit
"#;

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(fg(app, Color::Cyan));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .style(fg(app, Color::White));

    frame.render_widget(paragraph, help_area);
}
