//! Arena-backed tree nodes.
//!
//! Nodes live in a flat `Vec` and refer to one another by [`NodeId`]. Children
//! are owned by their parent (listed in its `children`), while `parent` is a
//! plain index used only for navigation, so there is no ownership cycle.
//! Nodes are never removed; a child replaced by [`NodeArena::add_child`]
//! stays in the arena, unreachable.

use std::collections::HashMap;

/// Index of a node inside its arena.
///
/// Ids are only handed out by the arena that owns the node; using an id with
/// a different arena is a logic error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A file or directory in the virtual filesystem.
#[derive(Debug, Clone)]
pub struct VfsNode {
    pub(crate) name: String,
    pub(crate) is_directory: bool,
    pub(crate) content: String,
    pub(crate) children: Vec<NodeId>,
    /// Child name → position in `children`.
    child_index: HashMap<String, usize>,
    pub(crate) parent: Option<NodeId>,
}

impl VfsNode {
    /// Create a detached node. Directories never carry content.
    pub fn new(name: impl Into<String>, is_directory: bool, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory,
            content: if is_directory {
                String::new()
            } else {
                content.into()
            },
            children: Vec::new(),
            child_index: HashMap::new(),
            parent: None,
        }
    }

    /// Create a detached, empty directory node.
    pub fn directory(name: impl Into<String>) -> Self {
        Self::new(name, true, "")
    }

    /// Create a detached file node.
    pub fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(name, false, content)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    pub fn is_file(&self) -> bool {
        !self.is_directory
    }

    /// File payload. Empty for directories.
    pub fn content(&self) -> &str {
        if self.is_directory { "" } else { &self.content }
    }

    /// Size as shown by listings: characters of content, 0 for directories.
    pub fn size(&self) -> u64 {
        if self.is_directory {
            0
        } else {
            self.content.chars().count() as u64
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child ids in insertion order.
    ///
    /// A file's retained children (left over from a directory that was
    /// overwritten by a file entry) are not exposed.
    pub fn children(&self) -> &[NodeId] {
        if self.is_directory { &self.children } else { &[] }
    }

    /// Turn a file into a directory, dropping its content.
    pub(crate) fn coerce_to_directory(&mut self) {
        self.is_directory = true;
        self.content.clear();
    }
}

/// Flat storage for a single tree. Slot 0 is always the root.
#[derive(Debug, Clone)]
pub(crate) struct NodeArena {
    nodes: Vec<VfsNode>,
}

impl NodeArena {
    pub(crate) const ROOT: NodeId = NodeId(0);

    /// A fresh arena holding only the root directory (empty name, no parent).
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![VfsNode::directory("")],
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> &VfsNode {
        &self.nodes[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut VfsNode {
        &mut self.nodes[id.0]
    }

    /// Attach `node` under `parent`, keyed by its name.
    ///
    /// An existing child with the same name is replaced in place (it keeps its
    /// position in the iteration order). The new node's parent is set to
    /// `parent`.
    pub(crate) fn add_child(&mut self, parent: NodeId, mut node: VfsNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        let existing = self.child_position(parent, &node.name);
        let name = node.name.clone();
        self.nodes.push(node);

        let parent_node = &mut self.nodes[parent.0];
        match existing {
            Some(pos) => parent_node.children[pos] = id,
            None => {
                parent_node.child_index.insert(name, parent_node.children.len());
                parent_node.children.push(id);
            }
        }
        id
    }

    /// Look up a direct child by exact name.
    ///
    /// This reads the raw children list; callers decide whether descending
    /// into a file is allowed.
    pub(crate) fn child_by_name(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.child_position(parent, name)
            .map(|pos| self.nodes[parent.0].children[pos])
    }

    fn child_position(&self, parent: NodeId, name: &str) -> Option<usize> {
        self.nodes[parent.0].child_index.get(name).copied()
    }

    /// Absolute path of a node: `/a/b/c`, or `/` for the root.
    pub(crate) fn full_path(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id);
            if node.parent.is_some() {
                names.push(node.name.as_str());
            }
            current = node.parent;
        }

        if names.is_empty() {
            return "/".to_string();
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }
}
