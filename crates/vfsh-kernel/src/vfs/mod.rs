//! Virtual Filesystem (VFS) for vfsh.
//!
//! Two backends implement the [`Filesystem`] contract the shell dispatches
//! against:
//!
//! - **VirtualFileSystem**: an in-memory tree built from a CSV description
//! - **LocalFs**: the real filesystem, with a private current directory
//!
//! # Design
//!
//! The in-memory tree is an arena: nodes are stored in a flat vector and
//! addressed by [`NodeId`]. Each node lists its children by id and keeps its
//! parent as a plain id, so the upward link never owns anything.
//!
//! ```text
//! nodes[0]  ""          (root, parent: None)
//! nodes[1]  "docs"      (parent: 0, children: [2, 3])
//! nodes[2]  "readme.txt"(parent: 1)
//! nodes[3]  "guide"     (parent: 1, children: [4])
//! nodes[4]  "intro.md"  (parent: 3)
//! ```

mod loader;
mod local;
mod node;
pub mod path;
mod traits;
mod tree;

pub use loader::{load_csv_path, load_csv_reader, LoadReport};
pub use local::LocalFs;
pub use node::{NodeId, VfsNode};
pub use traits::{listing_order, DirEntry, DirEntryKind, DirTree, Filesystem};
pub use tree::VirtualFileSystem;
