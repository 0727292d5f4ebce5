//! Application state for the TUI.

use std::path::{Path, PathBuf};

use crate::controller::{Activation, Answer, Dialog, Resolution, TreeController};
use crate::error::Result;
use crate::scanner::{format_size, ListOptions, LocalFs};
use crate::tree::TreeNode;

/// The current UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal navigation mode.
    Normal,
    /// Help overlay mode.
    Help,
}

/// Display options that do not affect the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiOptions {
    /// Render without colors.
    pub no_color: bool,
    /// Show free space of the root's filesystem in the header.
    pub show_disk_usage: bool,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            no_color: false,
            show_disk_usage: true,
        }
    }
}

/// A visible row in the flattened tree view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleEntry {
    /// Display label of the node.
    pub label: String,
    /// Path reference; `None` for the root row.
    pub path: Option<PathBuf>,
    /// Depth in the tree (0 = root).
    pub depth: usize,
    pub is_dir: bool,
    /// Whether this directory is expanded.
    pub is_expanded: bool,
}

/// Main application state for the TUI.
pub struct App {
    /// Owns the explored tree.
    pub controller: TreeController<LocalFs>,

    /// Flattened visible entries (for rendering).
    pub visible_entries: Vec<VisibleEntry>,

    /// Currently selected index in visible_entries.
    pub selected: usize,

    /// Current UI mode.
    pub mode: Mode,

    pub ui: UiOptions,

    /// Application should quit.
    pub should_quit: bool,

    /// Status message to display.
    pub status_message: Option<String>,

    /// Controller revision the rows were built from.
    rendered_revision: u64,
}

impl App {
    /// Open a session at `root`. Failing to list the root is fatal.
    pub fn new(root: PathBuf, options: ListOptions, ui: UiOptions) -> Result<Self> {
        let controller = TreeController::new(LocalFs, root, options)?;
        let mut app = Self {
            rendered_revision: controller.revision(),
            controller,
            visible_entries: Vec::new(),
            selected: 0,
            mode: Mode::Normal,
            ui,
            should_quit: false,
            status_message: None,
        };
        app.rebuild_visible_entries();
        Ok(app)
    }

    pub fn root(&self) -> &Path {
        self.controller.root_path()
    }

    /// Get the currently selected entry, if any.
    pub fn selected_entry(&self) -> Option<&VisibleEntry> {
        self.visible_entries.get(self.selected)
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.controller.dialog()
    }

    /// Move the selection by `delta` rows, clamped to the list.
    pub fn move_selection(&mut self, delta: isize) {
        if self.visible_entries.is_empty() {
            self.selected = 0;
            return;
        }
        let last = self.visible_entries.len() - 1;
        let target = self.selected as isize + delta;
        self.selected = target.clamp(0, last as isize) as usize;
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible_entries.len().saturating_sub(1);
    }

    /// Jump to the row of the selected entry's parent directory.
    pub fn select_parent(&mut self) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        let depth = entry.depth;
        if depth == 0 {
            return;
        }
        if let Some(idx) = self.visible_entries[..self.selected]
            .iter()
            .rposition(|e| e.depth < depth)
        {
            self.selected = idx;
        }
    }

    /// Activate the selected row.
    pub fn activate_selected(&mut self) {
        let path = self.selected_entry().and_then(|e| e.path.clone());
        let outcome = self.controller.activate(path.as_deref());
        tracing::debug!(?path, ?outcome, "Activated");

        if let Activation::Toggled { .. } | Activation::Loaded = outcome {
            self.status_message = None;
        }
        self.sync();
    }

    /// Answer the open dialog.
    pub fn answer(&mut self, answer: Answer) {
        let pending = self.dialog().cloned();
        let resolution = self.controller.resolve(answer);

        self.status_message = match (resolution, pending) {
            (Resolution::Deleted, Some(Dialog::Confirm { action, .. })) => {
                Some(format!("Deleted {}", display_action_path(&action)))
            }
            (Resolution::Refreshed, _) => Some("Directory refreshed".to_string()),
            (Resolution::Declined, _) => None,
            (_, _) => self.status_message.take(),
        };
        self.sync();
    }

    /// Re-list the selected directory, or the directory holding the selected file.
    pub fn refresh_selected(&mut self) {
        let target = match self.selected_entry() {
            Some(VisibleEntry {
                path: Some(path),
                is_dir: true,
                ..
            }) => path.clone(),
            Some(VisibleEntry {
                path: Some(path), ..
            }) => path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.root().to_path_buf()),
            _ => self.root().to_path_buf(),
        };

        self.status_message = match self.controller.refresh_directory(&target) {
            Ok(true) => Some(format!("Refreshed {}", target.display())),
            Ok(false) => Some(format!("{} is not in the tree", target.display())),
            Err(err) => Some(format!("Refresh failed: {}", err)),
        };
        self.sync();
    }

    /// Rebuild rows if the tree changed since the last rebuild.
    fn sync(&mut self) {
        if self.controller.revision() != self.rendered_revision {
            self.rebuild_visible_entries();
        }
    }

    /// Flatten the tree into rows, keeping the selection on the same path.
    ///
    /// If the selected path is gone, the selection keeps its index, clamped
    /// to the new list.
    pub fn rebuild_visible_entries(&mut self) {
        let selected_path = self.selected_entry().map(|e| e.path.clone());

        self.visible_entries.clear();
        flatten(self.controller.root(), 0, &mut self.visible_entries);
        self.rendered_revision = self.controller.revision();

        if let Some(path) = selected_path {
            if let Some(idx) = self.visible_entries.iter().position(|e| e.path == path) {
                self.selected = idx;
                return;
            }
        }
        self.selected = self
            .selected
            .min(self.visible_entries.len().saturating_sub(1));
    }

    /// Threshold shown in the header.
    pub fn threshold_display(&self) -> String {
        format_size(self.controller.options().min_size)
    }

    /// Get disk usage for the root's filesystem: (total, used, available).
    pub fn get_disk_usage(&self) -> Option<(u64, u64, u64)> {
        let stat = nix::sys::statvfs::statvfs(self.root()).ok()?;

        let block_size = stat.fragment_size() as u64;
        let total = stat.blocks() as u64 * block_size;
        let available = stat.blocks_available() as u64 * block_size;
        let free = stat.blocks_free() as u64 * block_size;

        Some((total, total.saturating_sub(free), available))
    }
}

fn flatten(node: &TreeNode, depth: usize, out: &mut Vec<VisibleEntry>) {
    out.push(VisibleEntry {
        label: node.label().to_string(),
        path: node.path().map(Path::to_path_buf),
        depth,
        is_dir: node.is_dir(),
        is_expanded: node.is_expanded(),
    });

    if node.is_expanded() {
        for child in node.children() {
            flatten(child, depth + 1, out);
        }
    }
}

fn display_action_path(action: &crate::controller::PendingAction) -> String {
    use crate::controller::PendingAction;

    match action {
        PendingAction::DeleteFile(path) | PendingAction::RefreshParent(path) => path
            .file_name()
            .map(|n| format!("'{}'", n.to_string_lossy()))
            .unwrap_or_else(|| format!("'{}'", path.display())),
    }
}
