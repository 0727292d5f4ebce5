use std::path::{Path, PathBuf};

use crate::scanner::{format_size, DirEntry};

/// What a node points at on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
}

/// Load and expansion state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Never listed.
    Unloaded,
    /// Listed, children hidden.
    Collapsed,
    /// Listed, children shown.
    Expanded,
}

/// A node in the explored tree.
///
/// Identity is the path; the label is derived for display only. The root node
/// has no path of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    label: String,
    path: Option<PathBuf>,
    kind: NodeKind,
    size: u64,
    expanded: bool,
    loaded: bool,
    children: Vec<TreeNode>,
}

impl TreeNode {
    /// The session root: a directory without a path reference, shown expanded.
    pub fn root(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: None,
            kind: NodeKind::Directory,
            size: 0,
            expanded: true,
            loaded: false,
            children: Vec::new(),
        }
    }

    pub fn from_entry(entry: DirEntry) -> Self {
        let (kind, label) = if entry.is_dir {
            (NodeKind::Directory, format!("{}/", entry.name))
        } else {
            (
                NodeKind::File,
                format!("{} ({})", entry.name, format_size(entry.size)),
            )
        };

        Self {
            label,
            path: Some(entry.path),
            kind,
            size: entry.size,
            expanded: false,
            loaded: false,
            children: Vec::new(),
        }
    }

    /// Append a child built from `entry`, keeping arrival order.
    pub fn add_child(&mut self, entry: DirEntry) -> &mut TreeNode {
        self.children.push(TreeNode::from_entry(entry));
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Drop every descendant.
    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn state(&self) -> NodeState {
        match (self.loaded, self.expanded) {
            (false, _) => NodeState::Unloaded,
            (true, false) => NodeState::Collapsed,
            (true, true) => NodeState::Expanded,
        }
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    /// Flip expansion and return the new value.
    pub fn toggle_expanded(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    pub(crate) fn set_loaded(&mut self, loaded: bool) {
        self.loaded = loaded;
    }
}

/// Pre-order depth-first search for the node whose path equals `target`.
pub fn find_by_path<'a>(node: &'a TreeNode, target: &Path) -> Option<&'a TreeNode> {
    if node.path() == Some(target) {
        return Some(node);
    }
    node.children
        .iter()
        .find_map(|child| find_by_path(child, target))
}

/// Mutable counterpart of [`find_by_path`], same visiting order.
pub fn find_by_path_mut<'a>(node: &'a mut TreeNode, target: &Path) -> Option<&'a mut TreeNode> {
    if node.path() == Some(target) {
        return Some(node);
    }
    node.children
        .iter_mut()
        .find_map(|child| find_by_path_mut(child, target))
}
