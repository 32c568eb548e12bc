//! The in-memory virtual filesystem.
//!
//! A [`VirtualFileSystem`] owns one tree of [`VfsNode`]s and a cursor (the
//! current directory). The tree is built with [`VirtualFileSystem::create_path`],
//! which upserts along a path:
//!
//! - missing intermediate segments become directories
//! - an intermediate segment that is a file is coerced into a directory
//! - the final segment takes the kind of the latest entry; a file entry also
//!   replaces the content (last write wins)
//!
//! After the tree is built only the cursor moves.

use std::collections::HashMap;

use tracing::debug;

use super::node::{NodeArena, NodeId, VfsNode};
use super::path::{self, Segment};
use super::traits::{listing_order, DirEntry, DirTree, Filesystem};
use crate::error::{Result, VfsError};

/// In-memory filesystem tree with a current-directory cursor.
#[derive(Debug, Clone)]
pub struct VirtualFileSystem {
    arena: NodeArena,
    cursor: NodeId,
}

impl Default for VirtualFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualFileSystem {
    /// Create an empty filesystem: a bare root, with the cursor on it.
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            cursor: NodeArena::ROOT,
        }
    }

    /// Id of the root directory.
    pub fn root(&self) -> NodeId {
        NodeArena::ROOT
    }

    /// Id of the current directory.
    pub fn cursor(&self) -> NodeId {
        self.cursor
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> &VfsNode {
        self.arena.get(id)
    }

    /// Absolute path of a node.
    pub fn full_path(&self, id: NodeId) -> String {
        self.arena.full_path(id)
    }

    /// Create or update the node at `path`, making every prefix a directory.
    ///
    /// The path is always taken from the root; a leading `/` makes no
    /// difference. Fails only when `path` has no segments.
    pub fn create_path(&mut self, path: &str, is_directory: bool, content: &str) -> Result<NodeId> {
        let parsed = path::tokenize(path);
        let Some((last, intermediate)) = parsed.segments.split_last() else {
            return Err(VfsError::InvalidPath(path.to_string()));
        };

        let mut current = NodeArena::ROOT;
        for segment in intermediate {
            current = match self.arena.child_by_name(current, segment) {
                Some(existing) => {
                    let node = self.arena.get_mut(existing);
                    if !node.is_directory {
                        debug!(path, segment, "coercing file into directory");
                        node.coerce_to_directory();
                    }
                    existing
                }
                None => self.arena.add_child(current, VfsNode::directory(*segment)),
            };
        }

        match self.arena.child_by_name(current, last) {
            Some(existing) => {
                let node = self.arena.get_mut(existing);
                node.is_directory = is_directory;
                if !is_directory {
                    node.content = content.to_string();
                }
                Ok(existing)
            }
            None => Ok(self
                .arena
                .add_child(current, VfsNode::new(*last, is_directory, content))),
        }
    }

    /// Resolve a path to a node.
    ///
    /// Absolute paths start at the root, anything else at the cursor. `.`
    /// stays put, `..` climbs (staying at the root when already there), and
    /// every other segment must name an existing child of a directory.
    pub fn resolve_path(&self, path: &str) -> Option<NodeId> {
        let parsed = path::tokenize(path);
        let mut current = if parsed.absolute {
            NodeArena::ROOT
        } else {
            self.cursor
        };

        for segment in parsed.segments {
            match Segment::from(segment) {
                Segment::Current => {}
                Segment::Parent => {
                    if let Some(parent) = self.arena.get(current).parent {
                        current = parent;
                    }
                }
                Segment::Name(name) => {
                    if !self.arena.get(current).is_directory {
                        return None;
                    }
                    current = self.arena.child_by_name(current, name)?;
                }
            }
        }
        Some(current)
    }

    /// Move the cursor. See [`Filesystem::change_directory`].
    ///
    /// `..` at the root and `~`/`/` always succeed.
    pub fn change_directory(&mut self, target: &str) -> bool {
        match target {
            ".." => {
                if let Some(parent) = self.arena.get(self.cursor).parent {
                    self.cursor = parent;
                }
                true
            }
            "~" | "/" => {
                self.cursor = NodeArena::ROOT;
                true
            }
            _ => match self.resolve_path(target) {
                Some(id) if self.arena.get(id).is_directory => {
                    self.cursor = id;
                    true
                }
                _ => false,
            },
        }
    }

    /// List a directory, directories first and then by name.
    ///
    /// An empty path lists the current directory.
    pub fn list_directory(&self, path: &str) -> Option<Vec<DirEntry>> {
        let id = if path.is_empty() {
            self.cursor
        } else {
            self.resolve_path(path)?
        };
        let node = self.arena.get(id);
        if !node.is_directory {
            return None;
        }

        let mut entries: Vec<DirEntry> = node
            .children()
            .iter()
            .map(|&child| self.entry(child))
            .collect();
        entries.sort_by(listing_order);
        Some(entries)
    }

    /// Read a file's content; `None` for missing paths and directories.
    pub fn read_file(&self, path: &str) -> Option<String> {
        let node = self.arena.get(self.resolve_path(path)?);
        node.is_file().then(|| node.content.clone())
    }

    /// Absolute path of the cursor, `/` at the root.
    pub fn current_path(&self) -> String {
        self.arena.full_path(self.cursor)
    }

    /// Depth-first, pre-order search for names containing `needle`.
    ///
    /// Children are visited in insertion order, not listing order, and
    /// matching directories are reported as well as descended into. Result
    /// paths are built from `start` as written: `find_files("x", "docs")`
    /// yields `docs/x...`, not the canonical `/docs/x...`.
    pub fn find_files(&self, needle: &str, start: &str) -> Vec<String> {
        let mut results = Vec::new();
        let Some(id) = self.resolve_path(start) else {
            return results;
        };

        // Explicit stack so deep trees cannot exhaust the call stack.
        // Children go on in reverse to pop in insertion order.
        let mut stack: Vec<(NodeId, String)> = Vec::new();
        self.push_children(id, start, &mut stack);
        while let Some((child_id, child_path)) = stack.pop() {
            let child = self.arena.get(child_id);
            if child.name.contains(needle) {
                results.push(child_path.clone());
            }
            if child.is_directory {
                self.push_children(child_id, &child_path, &mut stack);
            }
        }
        results
    }

    fn push_children(&self, id: NodeId, prefix: &str, stack: &mut Vec<(NodeId, String)>) {
        for &child_id in self.arena.get(id).children().iter().rev() {
            let name = &self.arena.get(child_id).name;
            let child_path = if prefix == "/" {
                format!("/{}", name)
            } else {
                format!("{}/{}", prefix, name)
            };
            stack.push((child_id, child_path));
        }
    }

    /// The node at `start`, for callers that render trees themselves.
    pub fn directory_tree(&self, start: &str) -> Option<NodeId> {
        self.resolve_path(start)
    }

    /// Number of nodes in the tree, the root included.
    pub fn node_count(&self) -> usize {
        self.preorder(NodeArena::ROOT).len()
    }

    /// Ids reachable from `start`, `start` first, in pre-order.
    fn preorder(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.arena.get(id).children().iter().rev());
        }
        order
    }

    fn entry(&self, id: NodeId) -> DirEntry {
        let node = self.arena.get(id);
        if node.is_directory {
            DirEntry::directory(node.name.clone())
        } else {
            DirEntry::file(node.name.clone(), node.size())
        }
    }

    /// Build the subtree bottom-up, children before parents.
    fn snapshot(&self, start: NodeId) -> DirTree {
        let mut built: HashMap<NodeId, DirTree> = HashMap::new();
        for id in self.preorder(start).into_iter().rev() {
            let mut children: Vec<DirTree> = self
                .arena
                .get(id)
                .children()
                .iter()
                .filter_map(|child| built.remove(child))
                .collect();
            children.sort_by(|a, b| listing_order(&a.entry, &b.entry));
            built.insert(
                id,
                DirTree {
                    entry: self.entry(id),
                    children,
                },
            );
        }
        built.remove(&start).unwrap_or_else(|| DirTree {
            entry: self.entry(start),
            children: Vec::new(),
        })
    }
}

impl Filesystem for VirtualFileSystem {
    fn change_directory(&mut self, target: &str) -> bool {
        VirtualFileSystem::change_directory(self, target)
    }

    fn list_directory(&self, path: &str) -> Option<Vec<DirEntry>> {
        VirtualFileSystem::list_directory(self, path)
    }

    fn read_file(&self, path: &str) -> Option<String> {
        VirtualFileSystem::read_file(self, path)
    }

    fn current_path(&self) -> String {
        VirtualFileSystem::current_path(self)
    }

    fn find_files(&self, needle: &str, start: &str) -> Vec<String> {
        VirtualFileSystem::find_files(self, needle, start)
    }

    fn tree(&self, start: &str) -> Option<DirTree> {
        self.directory_tree(start).map(|id| self.snapshot(id))
    }

    fn is_directory(&self, path: &str) -> bool {
        self.resolve_path(path)
            .is_some_and(|id| self.arena.get(id).is_directory)
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve_path(path).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> VirtualFileSystem {
        let mut vfs = VirtualFileSystem::new();
        vfs.create_path("/docs/readme.txt", false, "Hello").unwrap();
        vfs.create_path("/docs/guide", true, "").unwrap();
        vfs.create_path("/docs/guide/intro.md", false, "# Intro").unwrap();
        vfs.create_path("/bin/tool", false, "#!/bin/sh").unwrap();
        vfs
    }

    #[test]
    fn new_starts_at_root() {
        let vfs = VirtualFileSystem::new();
        assert_eq!(vfs.cursor(), vfs.root());
        assert_eq!(vfs.current_path(), "/");
        assert_eq!(vfs.node_count(), 1);
    }

    #[test]
    fn create_path_rejects_empty() {
        let mut vfs = VirtualFileSystem::new();
        assert!(matches!(
            vfs.create_path("", false, ""),
            Err(VfsError::InvalidPath(_))
        ));
        assert!(matches!(
            vfs.create_path("///", true, ""),
            Err(VfsError::InvalidPath(_))
        ));
    }

    #[test]
    fn create_path_makes_intermediate_directories() {
        let mut vfs = VirtualFileSystem::new();
        vfs.create_path("a/b/c.txt", false, "data").unwrap();

        let a = vfs.resolve_path("/a").unwrap();
        let b = vfs.resolve_path("/a/b").unwrap();
        assert!(vfs.node(a).is_directory());
        assert!(vfs.node(b).is_directory());
        assert_eq!(vfs.read_file("/a/b/c.txt").as_deref(), Some("data"));
    }

    #[test]
    fn leading_slash_is_optional_for_creation() {
        let mut vfs = VirtualFileSystem::new();
        vfs.create_path("etc/hosts", false, "one").unwrap();
        vfs.create_path("/etc/hosts", false, "two").unwrap();

        assert_eq!(vfs.list_directory("/etc").unwrap().len(), 1);
        assert_eq!(vfs.read_file("/etc/hosts").as_deref(), Some("two"));
    }

    #[test]
    fn create_path_returns_final_node() {
        let mut vfs = VirtualFileSystem::new();
        let first = vfs.create_path("/etc/hosts", false, "one").unwrap();
        let again = vfs.create_path("etc/hosts", false, "two").unwrap();

        assert_eq!(first, again);
        assert_eq!(vfs.resolve_path("/etc/hosts"), Some(first));
        assert_eq!(vfs.full_path(first), "/etc/hosts");
        assert_eq!(vfs.node(first).content, "two");
    }

    #[test]
    fn intermediate_file_is_coerced_to_directory() {
        let mut vfs = VirtualFileSystem::new();
        vfs.create_path("/a", false, "was a file").unwrap();
        vfs.create_path("/a/b", false, "child").unwrap();

        assert_eq!(vfs.read_file("/a"), None);
        assert!(vfs.node(vfs.resolve_path("/a").unwrap()).is_directory());
        assert_eq!(vfs.read_file("/a/b").as_deref(), Some("child"));
    }

    #[test]
    fn child_before_parent_entry_coexists() {
        let mut vfs = VirtualFileSystem::new();
        vfs.create_path("/a/b/c", false, "deep").unwrap();
        vfs.create_path("/a", true, "").unwrap();

        assert!(Filesystem::is_directory(&vfs, "/a"));
        assert_eq!(vfs.read_file("/a/b/c").as_deref(), Some("deep"));
    }

    #[test]
    fn file_entry_over_directory_hides_children() {
        let mut vfs = VirtualFileSystem::new();
        vfs.create_path("/a/b", false, "child").unwrap();
        vfs.create_path("/a", false, "now a file").unwrap();

        assert_eq!(vfs.read_file("/a").as_deref(), Some("now a file"));
        assert_eq!(vfs.resolve_path("/a/b"), None);
        assert_eq!(vfs.list_directory("/a"), None);

        // A later path through /a brings the old children back.
        vfs.create_path("/a/c", false, "").unwrap();
        assert_eq!(vfs.read_file("/a/b").as_deref(), Some("child"));
    }

    #[test]
    fn last_write_wins_for_files() {
        let mut vfs = VirtualFileSystem::new();
        vfs.create_path("/f", false, "first").unwrap();
        vfs.create_path("/f", false, "second").unwrap();
        assert_eq!(vfs.read_file("/f").as_deref(), Some("second"));
    }

    #[test]
    fn directory_overwrite_keeps_existing_directory() {
        let mut vfs = sample();
        vfs.create_path("/docs", true, "ignored").unwrap();
        assert_eq!(vfs.list_directory("/docs").unwrap().len(), 2);
    }

    #[test]
    fn resolve_handles_dot_and_dotdot() {
        let vfs = sample();
        let guide = vfs.resolve_path("/docs/guide").unwrap();
        assert_eq!(vfs.resolve_path("/docs/./guide"), Some(guide));
        assert_eq!(vfs.resolve_path("/bin/../docs/guide"), Some(guide));
        assert_eq!(vfs.resolve_path("/../../docs/guide"), Some(guide));
        assert_eq!(vfs.resolve_path("/"), Some(vfs.root()));
        assert_eq!(vfs.resolve_path(""), Some(vfs.cursor()));
    }

    #[test]
    fn resolve_is_exact_match() {
        let vfs = sample();
        assert_eq!(vfs.resolve_path("/Docs"), None);
        assert_eq!(vfs.resolve_path("/doc"), None);
        assert_eq!(vfs.resolve_path("/docs/*"), None);
    }

    #[test]
    fn resolve_does_not_descend_through_files() {
        let vfs = sample();
        assert_eq!(vfs.resolve_path("/docs/readme.txt/x"), None);
    }

    #[test]
    fn relative_resolution_uses_cursor() {
        let mut vfs = sample();
        assert!(vfs.change_directory("docs"));
        assert_eq!(vfs.read_file("readme.txt").as_deref(), Some("Hello"));
        assert_eq!(vfs.read_file("guide/intro.md").as_deref(), Some("# Intro"));
        assert_eq!(vfs.read_file("../bin/tool").as_deref(), Some("#!/bin/sh"));
    }

    #[test]
    fn cd_dotdot_at_root_is_successful_noop() {
        let mut vfs = sample();
        assert!(vfs.change_directory(".."));
        assert_eq!(vfs.cursor(), vfs.root());
    }

    #[test]
    fn cd_home_and_slash_reset_to_root() {
        let mut vfs = sample();
        assert!(vfs.change_directory("/docs/guide"));
        assert!(vfs.change_directory("~"));
        assert_eq!(vfs.current_path(), "/");

        assert!(vfs.change_directory("docs"));
        assert!(vfs.change_directory("/"));
        assert_eq!(vfs.current_path(), "/");
    }

    #[test]
    fn cd_failure_leaves_cursor() {
        let mut vfs = sample();
        assert!(vfs.change_directory("/docs"));
        assert!(!vfs.change_directory("/nonexistent"));
        assert!(!vfs.change_directory("readme.txt"));
        assert_eq!(vfs.current_path(), "/docs");
    }

    #[test]
    fn cd_up_walks_parents() {
        let mut vfs = sample();
        assert!(vfs.change_directory("/docs/guide"));
        assert!(vfs.change_directory(".."));
        assert_eq!(vfs.current_path(), "/docs");
    }

    #[test]
    fn current_path_round_trips_through_resolution() {
        let mut vfs = sample();
        for target in ["/", "/docs", "/docs/guide", "/bin"] {
            assert!(vfs.change_directory(target));
            assert_eq!(vfs.resolve_path(&vfs.current_path()), Some(vfs.cursor()));
        }
    }

    #[test]
    fn listing_is_directories_first_then_by_name() {
        let mut vfs = VirtualFileSystem::new();
        vfs.create_path("/zfile", false, "z").unwrap();
        vfs.create_path("/adir", true, "").unwrap();
        vfs.create_path("/bfile", false, "").unwrap();
        vfs.create_path("/zdir", true, "").unwrap();

        let names: Vec<_> = vfs
            .list_directory("/")
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["adir", "zdir", "bfile", "zfile"]);
    }

    #[test]
    fn listing_reports_sizes() {
        let vfs = sample();
        let entries = vfs.list_directory("/docs").unwrap();
        assert_eq!(entries[0], DirEntry::directory("guide"));
        assert_eq!(entries[1], DirEntry::file("readme.txt", 5));
    }

    #[test]
    fn listing_a_file_or_missing_path_is_none() {
        let vfs = sample();
        assert_eq!(vfs.list_directory("/docs/readme.txt"), None);
        assert_eq!(vfs.list_directory("/missing"), None);
    }

    #[test]
    fn empty_listing_path_means_cursor() {
        let mut vfs = sample();
        vfs.change_directory("/docs/guide");
        let entries = vfs.list_directory("").unwrap();
        assert_eq!(entries, vec![DirEntry::file("intro.md", 7)]);
    }

    #[test]
    fn read_file_on_directory_is_none() {
        let vfs = sample();
        assert_eq!(vfs.read_file("/docs"), None);
        assert_eq!(vfs.read_file("/nope"), None);
    }

    #[test]
    fn find_uses_insertion_order() {
        let mut vfs = VirtualFileSystem::new();
        vfs.create_path("/d/b.log", false, "").unwrap();
        vfs.create_path("/d/a.log", false, "").unwrap();
        assert_eq!(vfs.find_files(".log", "/d"), vec!["/d/b.log", "/d/a.log"]);
    }

    #[test]
    fn find_is_preorder_and_matches_directories() {
        let vfs = sample();
        assert_eq!(
            vfs.find_files("i", "/"),
            vec!["/docs/guide", "/docs/guide/intro.md", "/bin"]
        );
    }

    #[test]
    fn find_keeps_literal_start_prefix() {
        let mut vfs = sample();
        assert_eq!(vfs.find_files("intro", "docs"), vec!["docs/guide/intro.md"]);
        assert_eq!(
            vfs.find_files("intro", "/bin/../docs"),
            vec!["/bin/../docs/guide/intro.md"]
        );

        vfs.change_directory("/docs");
        assert_eq!(vfs.find_files("intro", "."), vec!["./guide/intro.md"]);
    }

    #[test]
    fn find_is_case_sensitive() {
        let vfs = sample();
        assert!(vfs.find_files("README", "/").is_empty());
    }

    #[test]
    fn find_from_missing_start_is_empty() {
        let vfs = sample();
        assert!(vfs.find_files("a", "/missing").is_empty());
    }

    #[test]
    fn directory_tree_matches_resolution() {
        let vfs = sample();
        assert_eq!(vfs.directory_tree("/docs"), vfs.resolve_path("/docs"));
        assert_eq!(vfs.directory_tree("/missing"), None);
    }

    #[test]
    fn tree_snapshot_is_sorted() {
        let vfs = sample();
        let tree = vfs.tree("/").unwrap();
        let names: Vec<_> = tree.children.iter().map(|c| c.entry.name.as_str()).collect();
        assert_eq!(names, vec!["bin", "docs"]);
        assert_eq!(tree.counts(), (3, 3));
    }

    #[test]
    fn deep_paths_are_walked_without_recursion() {
        let depth = 20_000;
        let path = format!("{}/leaf", vec!["d"; depth].join("/"));
        let mut vfs = VirtualFileSystem::new();
        vfs.create_path(&path, false, "bottom").unwrap();

        assert_eq!(vfs.node_count(), depth + 2);
        let found = vfs.find_files("leaf", "/");
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("/d/leaf"));
        assert_eq!(vfs.tree("/").unwrap().counts(), (depth, 1));
        assert_eq!(vfs.read_file(&path).as_deref(), Some("bottom"));
    }

    #[test]
    fn node_count_includes_root() {
        assert_eq!(sample().node_count(), 7);
    }

    fn segment() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(String::from)
    }

    proptest! {
        #[test]
        fn every_prefix_is_a_directory(
            entries in prop::collection::vec(
                (prop::collection::vec(segment(), 1..5), any::<bool>()),
                1..20,
            )
        ) {
            let mut vfs = VirtualFileSystem::new();
            for (segments, is_directory) in &entries {
                vfs.create_path(&segments.join("/"), *is_directory, "x").unwrap();
            }

            // Only the prefixes of the last entry touching a path are
            // guaranteed: a later file entry may flip an earlier prefix.
            let (segments, _) = entries.last().unwrap();
            for depth in 1..segments.len() {
                let prefix = format!("/{}", segments[..depth].join("/"));
                let id = vfs.resolve_path(&prefix);
                prop_assert!(id.is_some(), "missing prefix {}", prefix);
                prop_assert!(vfs.node(id.unwrap()).is_directory());
            }
            let path = format!("/{}", segments.join("/"));
            prop_assert!(vfs.resolve_path(&path).is_some());
        }
    }
}
