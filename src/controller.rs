//! Lazy expansion, refresh-after-mutation and the confirm/delete workflow.
//!
//! Every user interaction goes through [`TreeController::activate`]. Anything
//! that needs the user's consent opens a [`Dialog`]; the answer comes back as a
//! separate call to [`TreeController::resolve`].

use std::path::{Path, PathBuf};

use crate::error::{ExplorerError, Result};
use crate::scanner::{list_directory_with, Filesystem, ListOptions, LocalFs};
use crate::tree::{find_by_path, find_by_path_mut, TreeNode};

/// Work to do once the user confirms a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Re-list the directory containing this path.
    RefreshParent(PathBuf),
    /// Delete this file, then re-list its directory.
    DeleteFile(PathBuf),
}

/// A modal message waiting for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Confirm {
        message: String,
        action: PendingAction,
    },
    Alert {
        message: String,
    },
}

impl Dialog {
    pub fn message(&self) -> &str {
        match self {
            Dialog::Confirm { message, .. } | Dialog::Alert { message } => message,
        }
    }
}

/// The user's answer to a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

/// What [`TreeController::activate`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// No path reference (root or placeholder), or no such node.
    Ignored,
    /// A dialog is still open.
    Blocked,
    /// The path could not be stat'ed; a refresh prompt is open.
    Stale,
    /// A directory was listed for the first time.
    Loaded,
    /// A loaded directory was expanded or collapsed without touching the disk.
    Toggled { expanded: bool },
    /// A file was selected; a delete prompt is open.
    Prompted,
}

/// What [`TreeController::resolve`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// There was no dialog.
    Idle,
    /// An alert was closed.
    Dismissed,
    /// A confirmation was declined; nothing changed.
    Declined,
    /// The parent directory was re-listed.
    Refreshed,
    /// The file was deleted and its directory re-listed.
    Deleted,
    /// The confirmed action failed; an alert is open.
    Failed,
}

/// Owns the explored tree and keeps it in step with the filesystem.
pub struct TreeController<F: Filesystem = LocalFs> {
    fs: F,
    root_path: PathBuf,
    options: ListOptions,
    root: TreeNode,
    dialog: Option<Dialog>,
    revision: u64,
}

impl<F: Filesystem> TreeController<F> {
    /// Start a session rooted at `root_path`, listing it immediately.
    ///
    /// Failing to list the root is fatal and returned to the caller.
    pub fn new(fs: F, root_path: PathBuf, options: ListOptions) -> Result<Self> {
        let stat = fs
            .stat(&root_path)
            .map_err(|e| ExplorerError::from_io(&root_path, e))?;
        if !stat.is_dir {
            return Err(ExplorerError::InvalidPath(format!(
                "{} is not a directory",
                root_path.display()
            )));
        }

        let root = TreeNode::root(root_path.display().to_string());
        let mut controller = Self {
            fs,
            root_path,
            options,
            root,
            dialog: None,
            revision: 0,
        };

        let root_path = controller.root_path.clone();
        controller.refresh_directory(&root_path)?;
        tracing::info!(
            root = %controller.root_path.display(),
            min_size = options.min_size,
            entries = controller.root.children().len(),
            "Session started"
        );

        Ok(controller)
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    /// The dialog waiting for an answer, if any.
    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    /// Bumped on every change to the tree.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Look up a node; the root path resolves to the root node.
    pub fn node(&self, path: &Path) -> Option<&TreeNode> {
        if path == self.root_path {
            Some(&self.root)
        } else {
            find_by_path(&self.root, path)
        }
    }

    fn node_mut(&mut self, path: &Path) -> Option<&mut TreeNode> {
        if path == self.root_path {
            Some(&mut self.root)
        } else {
            find_by_path_mut(&mut self.root, path)
        }
    }

    /// Handle the user triggering the node at `path`.
    pub fn activate(&mut self, path: Option<&Path>) -> Activation {
        let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
            return Activation::Ignored;
        };
        if self.dialog.is_some() {
            return Activation::Blocked;
        }

        let stat = match self.fs.stat(path) {
            Ok(stat) => stat,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Stale node");
                self.dialog = Some(Dialog::Confirm {
                    message: format!(
                        "Error accessing '{}': {}. Refresh parent directory?",
                        path.display(),
                        err
                    ),
                    action: PendingAction::RefreshParent(path.to_path_buf()),
                });
                return Activation::Stale;
            }
        };

        if stat.is_dir {
            self.expand_or_toggle(path)
        } else {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            self.dialog = Some(Dialog::Confirm {
                message: format!("Delete file '{}'?", name),
                action: PendingAction::DeleteFile(path.to_path_buf()),
            });
            Activation::Prompted
        }
    }

    fn expand_or_toggle(&mut self, path: &Path) -> Activation {
        let Some(node) = self.node_mut(path) else {
            tracing::debug!(path = %path.display(), "Activated path is not in the tree");
            return Activation::Ignored;
        };

        if node.is_loaded() {
            let expanded = node.toggle_expanded();
            self.revision += 1;
            tracing::debug!(path = %path.display(), expanded, "Toggled directory");
            return Activation::Toggled { expanded };
        }

        match self.refresh_directory(path) {
            Ok(_) => Activation::Loaded,
            Err(err) => {
                self.alert(format!("Error reading '{}': {}", path.display(), err));
                Activation::Stale
            }
        }
    }

    /// Answer the open dialog.
    pub fn resolve(&mut self, answer: Answer) -> Resolution {
        let Some(dialog) = self.dialog.take() else {
            return Resolution::Idle;
        };

        let action = match (dialog, answer) {
            (Dialog::Alert { .. }, _) => return Resolution::Dismissed,
            (Dialog::Confirm { .. }, Answer::No) => return Resolution::Declined,
            (Dialog::Confirm { action, .. }, Answer::Yes) => action,
        };

        match action {
            PendingAction::RefreshParent(path) => match self.refresh_parent_of(&path) {
                Ok(()) => Resolution::Refreshed,
                Err(err) => {
                    self.alert(format!("Error refreshing directory: {}", err));
                    Resolution::Failed
                }
            },
            PendingAction::DeleteFile(path) => {
                if let Err(err) = self.fs.remove_file(&path) {
                    tracing::warn!(path = %path.display(), error = %err, "Delete failed");
                    self.alert(format!("Error deleting file: {}", err));
                    return Resolution::Failed;
                }
                tracing::info!(path = %path.display(), "Deleted file");

                match self.refresh_parent_of(&path) {
                    Ok(()) => Resolution::Deleted,
                    Err(err) => {
                        self.alert(format!("File deleted, but refresh failed: {}", err));
                        Resolution::Failed
                    }
                }
            }
        }
    }

    /// Re-list the directory that contains `path`.
    ///
    /// Entries directly under the session root refresh the root itself. A
    /// parent that is no longer in the tree is left alone.
    fn refresh_parent_of(&mut self, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => self.root_path.clone(),
        };

        if !self.refresh_directory(&parent)? {
            tracing::warn!(parent = %parent.display(), "Parent directory is not in the tree");
        }
        Ok(())
    }

    /// Replace the children of the directory node at `path` with a fresh listing.
    ///
    /// Returns `Ok(false)` if no node has that path. On a listing error the
    /// node is left empty and unloaded, so the next activation retries.
    pub fn refresh_directory(&mut self, path: &Path) -> Result<bool> {
        if self.node(path).is_none() {
            return Ok(false);
        }

        let listing = list_directory_with(&self.fs, path, &self.options);
        self.revision += 1;

        let Some(node) = self.node_mut(path) else {
            return Ok(false);
        };
        node.clear_children();

        let entries = match listing {
            Ok(entries) => entries,
            Err(err) => {
                node.set_loaded(false);
                tracing::warn!(path = %path.display(), error = %err, "Refresh failed");
                return Err(err);
            }
        };

        let count = entries.len();
        for entry in entries {
            node.add_child(entry);
        }
        node.set_loaded(true);
        node.set_expanded(true);

        tracing::info!(path = %path.display(), entries = count, "Refreshed directory");
        Ok(true)
    }

    fn alert(&mut self, message: String) {
        self.dialog = Some(Dialog::Alert { message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::memory::MemoryFs;
    use crate::tree::NodeState;

    fn opts(min_size: u64) -> ListOptions {
        ListOptions::new().with_min_size(min_size)
    }

    fn sample_fs() -> MemoryFs {
        let fs = MemoryFs::new("/r");
        fs.add_file("/r/big.iso", 5000);
        fs.add_file("/r/tiny.txt", 10);
        fs.add_dir("/r/sub");
        fs.add_file("/r/sub/movie.mkv", 9000);
        fs.add_dir("/r/sub/deeper");
        fs
    }

    fn controller(fs: MemoryFs) -> TreeController<MemoryFs> {
        TreeController::new(fs, PathBuf::from("/r"), opts(0)).unwrap()
    }

    fn child_paths(node: &TreeNode) -> Vec<PathBuf> {
        node.children()
            .iter()
            .filter_map(|c| c.path().map(Path::to_path_buf))
            .collect()
    }

    fn p(s: &str) -> &Path {
        Path::new(s)
    }

    #[test]
    fn test_new_lists_root() {
        let c = controller(sample_fs());
        assert_eq!(c.root().state(), NodeState::Expanded);
        assert_eq!(c.root().children().len(), 3);
        assert_eq!(c.root().label(), "/r");
        assert!(c.dialog().is_none());
    }

    #[test]
    fn test_new_applies_threshold() {
        let c = TreeController::new(sample_fs(), PathBuf::from("/r"), opts(1000)).unwrap();
        // the directory's 4096-byte metadata size passes, tiny.txt does not
        assert_eq!(
            child_paths(c.root()),
            vec![PathBuf::from("/r/big.iso"), PathBuf::from("/r/sub")]
        );
    }

    #[test]
    fn test_new_fails_on_missing_root() {
        let fs = MemoryFs::new("/r");
        let err = TreeController::new(fs, PathBuf::from("/nope"), opts(0))
            .err()
            .unwrap();
        assert!(matches!(err, ExplorerError::PathNotFound(_)));
    }

    #[test]
    fn test_new_fails_on_file_root() {
        let fs = sample_fs();
        let err = TreeController::new(fs, PathBuf::from("/r/big.iso"), opts(0))
            .err()
            .unwrap();
        assert!(matches!(err, ExplorerError::InvalidPath(_)));
    }

    #[test]
    fn test_new_fails_on_unreadable_root() {
        let fs = sample_fs();
        fs.deny("/r");
        assert!(TreeController::new(fs, PathBuf::from("/r"), opts(0)).is_err());
    }

    #[test]
    fn test_activate_without_path_is_ignored() {
        let mut c = controller(sample_fs());
        let stats_before = c.filesystem().stat_calls.get();
        assert_eq!(c.activate(None), Activation::Ignored);
        assert_eq!(c.activate(Some(p(""))), Activation::Ignored);
        assert_eq!(c.filesystem().stat_calls.get(), stats_before);
    }

    #[test]
    fn test_first_activation_loads_directory() {
        let mut c = controller(sample_fs());
        let lists_before = c.filesystem().read_dir_calls.get();

        assert_eq!(c.activate(Some(p("/r/sub"))), Activation::Loaded);

        assert_eq!(c.filesystem().read_dir_calls.get(), lists_before + 1);
        let sub = c.node(p("/r/sub")).unwrap();
        assert_eq!(sub.state(), NodeState::Expanded);
        assert_eq!(sub.children().len(), 2);
    }

    #[test]
    fn test_loaded_directory_toggles_without_listing() {
        let mut c = controller(sample_fs());
        c.activate(Some(p("/r/sub")));
        let lists_before = c.filesystem().read_dir_calls.get();

        assert_eq!(
            c.activate(Some(p("/r/sub"))),
            Activation::Toggled { expanded: false }
        );
        assert_eq!(
            c.activate(Some(p("/r/sub"))),
            Activation::Toggled { expanded: true }
        );

        assert_eq!(c.filesystem().read_dir_calls.get(), lists_before);
    }

    #[test]
    fn test_empty_directory_toggles_after_first_load() {
        let mut c = controller(sample_fs());
        c.activate(Some(p("/r/sub")));
        assert_eq!(c.activate(Some(p("/r/sub/deeper"))), Activation::Loaded);
        let lists_before = c.filesystem().read_dir_calls.get();

        assert_eq!(
            c.activate(Some(p("/r/sub/deeper"))),
            Activation::Toggled { expanded: false }
        );
        assert_eq!(c.filesystem().read_dir_calls.get(), lists_before);
    }

    #[test]
    fn test_toggle_does_not_see_new_files_until_refresh() {
        let mut c = controller(sample_fs());
        c.activate(Some(p("/r/sub")));
        c.activate(Some(p("/r/sub")));
        c.filesystem().add_file("/r/sub/new.bin", 1);

        c.activate(Some(p("/r/sub")));
        assert_eq!(c.node(p("/r/sub")).unwrap().children().len(), 2);

        assert!(c.refresh_directory(p("/r/sub")).unwrap());
        assert_eq!(c.node(p("/r/sub")).unwrap().children().len(), 3);
    }

    #[test]
    fn test_activating_file_prompts_for_delete() {
        let mut c = controller(sample_fs());
        let revision = c.revision();

        assert_eq!(c.activate(Some(p("/r/big.iso"))), Activation::Prompted);

        assert_eq!(
            c.dialog(),
            Some(&Dialog::Confirm {
                message: "Delete file 'big.iso'?".to_string(),
                action: PendingAction::DeleteFile(PathBuf::from("/r/big.iso")),
            })
        );
        assert_eq!(c.revision(), revision);
    }

    #[test]
    fn test_activation_blocked_while_dialog_open() {
        let mut c = controller(sample_fs());
        c.activate(Some(p("/r/big.iso")));
        assert_eq!(c.activate(Some(p("/r/sub"))), Activation::Blocked);
        assert_eq!(c.node(p("/r/sub")).unwrap().state(), NodeState::Unloaded);
    }

    #[test]
    fn test_confirmed_delete_removes_exactly_that_entry() {
        let mut c = controller(sample_fs());
        let before = child_paths(c.root());

        c.activate(Some(p("/r/big.iso")));
        assert_eq!(c.resolve(Answer::Yes), Resolution::Deleted);

        assert!(!c.filesystem().exists("/r/big.iso"));
        let after = child_paths(c.root());
        let expected: Vec<_> = before
            .into_iter()
            .filter(|path| path != Path::new("/r/big.iso"))
            .collect();
        assert_eq!(after, expected);
        assert!(c.dialog().is_none());
    }

    #[test]
    fn test_delete_in_subdirectory_refreshes_that_directory() {
        let mut c = controller(sample_fs());
        c.activate(Some(p("/r/sub")));
        c.activate(Some(p("/r/sub/deeper")));

        c.activate(Some(p("/r/sub/movie.mkv")));
        assert_eq!(c.resolve(Answer::Yes), Resolution::Deleted);

        let sub = c.node(p("/r/sub")).unwrap();
        assert_eq!(child_paths(sub), vec![PathBuf::from("/r/sub/deeper")]);
        // refreshed descendants start over
        assert_eq!(
            c.node(p("/r/sub/deeper")).unwrap().state(),
            NodeState::Unloaded
        );
        assert_eq!(c.root().children().len(), 3);
    }

    #[test]
    fn test_declined_delete_changes_nothing() {
        let mut c = controller(sample_fs());
        let tree = c.root().clone();
        let revision = c.revision();

        c.activate(Some(p("/r/big.iso")));
        assert_eq!(c.resolve(Answer::No), Resolution::Declined);

        assert!(c.filesystem().exists("/r/big.iso"));
        assert_eq!(c.filesystem().remove_calls.get(), 0);
        assert_eq!(c.root(), &tree);
        assert_eq!(c.revision(), revision);
    }

    #[test]
    fn test_failed_delete_opens_alert_and_keeps_tree() {
        let fs = sample_fs();
        fs.make_undeletable("/r/big.iso");
        let mut c = controller(fs);
        let tree = c.root().clone();

        c.activate(Some(p("/r/big.iso")));
        assert_eq!(c.resolve(Answer::Yes), Resolution::Failed);

        match c.dialog() {
            Some(Dialog::Alert { message }) => {
                assert!(message.starts_with("Error deleting file:"));
                assert!(message.contains("busy"));
            }
            other => panic!("expected alert, got {:?}", other),
        }
        assert_eq!(c.root(), &tree);

        assert_eq!(c.resolve(Answer::Yes), Resolution::Dismissed);
        assert!(c.dialog().is_none());
    }

    #[test]
    fn test_stale_file_prompts_for_parent_refresh() {
        let mut c = controller(sample_fs());
        c.activate(Some(p("/r/sub")));
        c.filesystem().remove("/r/sub/movie.mkv");

        assert_eq!(c.activate(Some(p("/r/sub/movie.mkv"))), Activation::Stale);

        match c.dialog() {
            Some(Dialog::Confirm { message, action }) => {
                assert!(message.starts_with("Error accessing '/r/sub/movie.mkv':"));
                assert!(message.ends_with("Refresh parent directory?"));
                assert_eq!(
                    action,
                    &PendingAction::RefreshParent(PathBuf::from("/r/sub/movie.mkv"))
                );
            }
            other => panic!("expected confirm, got {:?}", other),
        }
    }

    #[test]
    fn test_stale_declined_leaves_tree_untouched() {
        let mut c = controller(sample_fs());
        c.activate(Some(p("/r/sub")));
        c.filesystem().remove("/r/sub/movie.mkv");
        let tree = c.root().clone();
        let revision = c.revision();
        let lists = c.filesystem().read_dir_calls.get();

        c.activate(Some(p("/r/sub/movie.mkv")));
        assert_eq!(c.resolve(Answer::No), Resolution::Declined);

        assert_eq!(c.root(), &tree);
        assert_eq!(c.revision(), revision);
        assert_eq!(c.filesystem().read_dir_calls.get(), lists);
        assert!(c.node(p("/r/sub/movie.mkv")).is_some());
    }

    #[test]
    fn test_stale_confirmed_refreshes_parent() {
        let mut c = controller(sample_fs());
        c.activate(Some(p("/r/sub")));
        c.filesystem().remove("/r/sub/movie.mkv");

        c.activate(Some(p("/r/sub/movie.mkv")));
        assert_eq!(c.resolve(Answer::Yes), Resolution::Refreshed);

        assert!(c.node(p("/r/sub/movie.mkv")).is_none());
        assert!(c.node(p("/r/sub/deeper")).is_some());
    }

    #[test]
    fn test_stale_entry_at_root_refreshes_root() {
        let mut c = controller(sample_fs());
        c.filesystem().remove("/r/big.iso");

        c.activate(Some(p("/r/big.iso")));
        assert_eq!(c.resolve(Answer::Yes), Resolution::Refreshed);

        assert!(c.node(p("/r/big.iso")).is_none());
        assert_eq!(c.root().children().len(), 2);
    }

    #[test]
    fn test_permission_denied_is_stale() {
        let mut c = controller(sample_fs());
        c.filesystem().deny("/r/sub");

        assert_eq!(c.activate(Some(p("/r/sub"))), Activation::Stale);
        assert!(c.dialog().unwrap().message().contains("permission denied"));
    }

    #[test]
    fn test_refresh_of_vanished_parent_reports_failure() {
        let mut c = controller(sample_fs());
        c.activate(Some(p("/r/sub")));
        c.filesystem().remove("/r/sub");

        c.activate(Some(p("/r/sub/movie.mkv")));
        assert_eq!(c.resolve(Answer::Yes), Resolution::Failed);

        assert!(matches!(c.dialog(), Some(Dialog::Alert { .. })));
        let sub = c.node(p("/r/sub")).unwrap();
        assert!(sub.children().is_empty());
        assert_eq!(sub.state(), NodeState::Unloaded);
    }

    #[test]
    fn test_refresh_when_parent_not_in_tree_is_noop() {
        let mut c = controller(sample_fs());
        let revision = c.revision();

        assert!(!c.refresh_directory(p("/r/elsewhere")).unwrap());
        assert_eq!(c.revision(), revision);
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let mut c = controller(sample_fs());
        c.activate(Some(p("/r/sub")));

        c.refresh_directory(p("/r/sub")).unwrap();
        let first = c.node(p("/r/sub")).unwrap().clone();
        c.refresh_directory(p("/r/sub")).unwrap();
        let second = c.node(p("/r/sub")).unwrap().clone();

        assert_eq!(first, second);
    }

    #[test]
    fn test_refresh_collapses_descendants() {
        let mut c = controller(sample_fs());
        c.activate(Some(p("/r/sub")));
        c.activate(Some(p("/r/sub/deeper")));
        assert_eq!(
            c.node(p("/r/sub/deeper")).unwrap().state(),
            NodeState::Expanded
        );

        let root_path = c.root_path().to_path_buf();
        c.refresh_directory(&root_path).unwrap();

        assert_eq!(c.node(p("/r/sub")).unwrap().state(), NodeState::Unloaded);
        assert!(c.node(p("/r/sub/deeper")).is_none());
    }

    #[test]
    fn test_resolve_without_dialog_is_idle() {
        let mut c = controller(sample_fs());
        assert_eq!(c.resolve(Answer::Yes), Resolution::Idle);
    }

    #[test]
    fn test_revision_bumps_on_mutation() {
        let mut c = controller(sample_fs());
        let start = c.revision();

        c.activate(Some(p("/r/sub")));
        let loaded = c.revision();
        assert!(loaded > start);

        c.activate(Some(p("/r/sub")));
        assert!(c.revision() > loaded);
    }
}
