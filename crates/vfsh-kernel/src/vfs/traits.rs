//! Core VFS traits and types.

use std::cmp::Ordering;

/// Kind of directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirEntryKind {
    File,
    Directory,
}

impl DirEntryKind {
    /// Lowercase label, as used in CSV descriptions.
    pub fn as_str(self) -> &'static str {
        match self {
            DirEntryKind::File => "file",
            DirEntryKind::Directory => "directory",
        }
    }
}

/// A directory entry as returned by [`Filesystem::list_directory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Name of the entry (not full path).
    pub name: String,
    /// Kind of entry.
    pub kind: DirEntryKind,
    /// Size: content length in characters for files, 0 for directories.
    pub size: u64,
}

impl DirEntry {
    /// Create a new directory entry.
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DirEntryKind::Directory,
            size: 0,
        }
    }

    /// Create a new file entry.
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            kind: DirEntryKind::File,
            size,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == DirEntryKind::Directory
    }
}

/// Display order for listings: directories first, then by name.
pub fn listing_order(a: &DirEntry, b: &DirEntry) -> Ordering {
    b.is_dir().cmp(&a.is_dir()).then_with(|| a.name.cmp(&b.name))
}

/// An owned snapshot of a subtree, for rendering.
///
/// Children are in listing order (see [`listing_order`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirTree {
    pub entry: DirEntry,
    pub children: Vec<DirTree>,
}

impl DirTree {
    /// Count `(directories, files)` below this node, excluding itself.
    pub fn counts(&self) -> (usize, usize) {
        let (mut dirs, mut files) = (0, 0);
        let mut stack: Vec<&DirTree> = self.children.iter().collect();
        while let Some(tree) = stack.pop() {
            if tree.entry.is_dir() {
                dirs += 1;
            } else {
                files += 1;
            }
            stack.extend(tree.children.iter());
        }
        (dirs, files)
    }
}

// Unlinks children one level at a time so dropping a deep snapshot does
// not recurse.
impl Drop for DirTree {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut tree) = stack.pop() {
            stack.append(&mut tree.children);
        }
    }
}

/// The contract the shell dispatches against.
///
/// Every operation reports failure with a sentinel (`None`, `false`, or an
/// empty result) so the shell can phrase its own error text.
pub trait Filesystem {
    /// Move the current directory. Returns false, leaving it unchanged, when
    /// the target is missing or not a directory.
    fn change_directory(&mut self, target: &str) -> bool;

    /// List a directory in [`listing_order`]. An empty path means the
    /// current directory.
    fn list_directory(&self, path: &str) -> Option<Vec<DirEntry>>;

    /// Read a file's content. `None` for missing paths and directories.
    fn read_file(&self, path: &str) -> Option<String>;

    /// Absolute path of the current directory.
    fn current_path(&self) -> String;

    /// Current directory as shown in the prompt.
    fn display_path(&self) -> String {
        self.current_path()
    }

    /// Paths under `start` whose final name contains `needle`, in traversal
    /// order, prefixed with `start` exactly as given.
    fn find_files(&self, needle: &str, start: &str) -> Vec<String>;

    /// Snapshot of the subtree at `start` for rendering.
    fn tree(&self, start: &str) -> Option<DirTree>;

    /// True if `path` resolves to a directory.
    fn is_directory(&self, path: &str) -> bool {
        self.list_directory(path).is_some()
    }

    /// True if `path` resolves to anything, readable or not.
    fn exists(&self, path: &str) -> bool {
        self.is_directory(path) || self.read_file(path).is_some()
    }
}
