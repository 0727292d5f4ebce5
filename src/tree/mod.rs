//! In-memory model of the explored part of the filesystem.

mod node;

pub use node::{find_by_path, find_by_path_mut, NodeKind, NodeState, TreeNode};
