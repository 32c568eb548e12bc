//! vfsh-kernel: the core of vfsh.
//!
//! This crate provides:
//!
//! - **VFS**: an arena-backed in-memory tree with path resolution, listing,
//!   search, and tree snapshots, plus a real-filesystem backend behind the
//!   same [`vfs::Filesystem`] trait
//! - **Loader**: builds a VFS from a CSV description (`path,type,content,encoding`)
//! - **Lexer**: splits command lines into words using logos
//! - **Tools**: the builtin command registry (`ls`, `cd`, `cat`, `find`, `tree`, ...)
//! - **Shell**: prompt, dispatch, and script playback

pub mod error;
pub mod lexer;
pub mod result;
pub mod shell;
pub mod tools;
pub mod vfs;

pub use error::VfsError;
pub use result::ExecResult;
pub use shell::{Shell, ShellConfig};
pub use vfs::{DirEntry, DirEntryKind, DirTree, Filesystem, LocalFs, VirtualFileSystem};
