//! Local filesystem backend.
//!
//! Runs the same shell contract against the real filesystem. The current
//! directory is tracked here rather than via the process working directory,
//! so several shells can coexist in one process.

use std::fs;
use std::path::{Component, Path, PathBuf};

use directories::BaseDirs;

use super::traits::{listing_order, DirEntry, DirTree, Filesystem};

/// Real filesystem access with a private current directory.
#[derive(Debug, Clone)]
pub struct LocalFs {
    cwd: PathBuf,
    home: Option<PathBuf>,
}

impl LocalFs {
    /// Create a backend whose current directory is `cwd`.
    ///
    /// `cwd` should be absolute; relative paths are kept as given.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            home: BaseDirs::new().map(|d| d.home_dir().to_path_buf()),
        }
    }

    /// Create a backend starting at the process working directory.
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// Override the home directory used for `~`.
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Current directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Turn a shell path into a lexically normalized absolute path.
    fn resolve(&self, path: &str) -> PathBuf {
        let joined = match (path, path.strip_prefix("~/"), self.home.as_ref()) {
            ("~", _, Some(home)) => home.clone(),
            (_, Some(rest), Some(home)) => home.join(rest),
            _ => self.cwd.join(path),
        };
        normalize(&joined)
    }

    fn entry(path: &Path, name: String) -> Option<DirEntry> {
        let meta = fs::metadata(path).ok()?;
        Some(if meta.is_dir() {
            DirEntry::directory(name)
        } else {
            DirEntry::file(name, char_len(path).unwrap_or(meta.len()))
        })
    }

    fn search(dir: &Path, prefix: &str, needle: &str, results: &mut Vec<String>) {
        let Ok(read_dir) = fs::read_dir(dir) else {
            return;
        };
        for item in read_dir.flatten() {
            let name = item.file_name().to_string_lossy().into_owned();
            let child_path = if prefix == "/" {
                format!("/{}", name)
            } else {
                format!("{}/{}", prefix, name)
            };

            if name.contains(needle) {
                results.push(child_path.clone());
            }
            // file_type() does not follow symlinks, so linked directories
            // are reported but not walked.
            if item.file_type().is_ok_and(|t| t.is_dir()) {
                Self::search(&item.path(), &child_path, needle, results);
            }
        }
    }

    fn snapshot(path: &Path, name: String) -> Option<DirTree> {
        let entry = Self::entry(path, name)?;
        let mut children = Vec::new();
        let is_real_dir = fs::symlink_metadata(path).is_ok_and(|m| m.is_dir());
        if entry.is_dir() && is_real_dir {
            if let Ok(read_dir) = fs::read_dir(path) {
                children = read_dir
                    .flatten()
                    .filter_map(|item| {
                        let name = item.file_name().to_string_lossy().into_owned();
                        Self::snapshot(&item.path(), name)
                    })
                    .collect();
                children.sort_by(|a, b| listing_order(&a.entry, &b.entry));
            }
        }
        Some(DirTree { entry, children })
    }
}

/// Character count of a UTF-8 file; `None` when it is not text.
fn char_len(path: &Path) -> Option<u64> {
    let text = fs::read_to_string(path).ok()?;
    Some(text.chars().count() as u64)
}

/// Resolve `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                if result.parent().is_some() {
                    result.pop();
                }
            }
            Component::CurDir => {}
            other => result.push(other.as_os_str()),
        }
    }
    result
}

impl Filesystem for LocalFs {
    fn change_directory(&mut self, target: &str) -> bool {
        match target {
            ".." => {
                if let Some(parent) = self.cwd.parent() {
                    self.cwd = parent.to_path_buf();
                }
                true
            }
            "/" => {
                self.cwd = PathBuf::from("/");
                true
            }
            _ => {
                let resolved = self.resolve(target);
                if resolved.is_dir() {
                    self.cwd = resolved;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn list_directory(&self, path: &str) -> Option<Vec<DirEntry>> {
        let dir = self.resolve(path);
        let mut entries: Vec<DirEntry> = fs::read_dir(&dir)
            .ok()?
            .flatten()
            .filter_map(|item| {
                let name = item.file_name().to_string_lossy().into_owned();
                Self::entry(&item.path(), name)
            })
            .collect();
        entries.sort_by(listing_order);
        Some(entries)
    }

    fn read_file(&self, path: &str) -> Option<String> {
        let file = self.resolve(path);
        if !file.is_file() {
            return None;
        }
        fs::read_to_string(file).ok()
    }

    fn current_path(&self) -> String {
        self.cwd.display().to_string()
    }

    /// The current directory with the home prefix shown as `~`.
    fn display_path(&self) -> String {
        if let Some(home) = &self.home
            && let Ok(rest) = self.cwd.strip_prefix(home)
        {
            if rest.as_os_str().is_empty() {
                return "~".to_string();
            }
            return format!("~/{}", rest.display());
        }
        self.current_path()
    }

    fn find_files(&self, needle: &str, start: &str) -> Vec<String> {
        let mut results = Vec::new();
        let dir = self.resolve(start);
        if dir.is_dir() {
            Self::search(&dir, start, needle, &mut results);
        }
        results
    }

    fn tree(&self, start: &str) -> Option<DirTree> {
        let path = self.resolve(start);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::snapshot(&path, name)
    }

    fn is_directory(&self, path: &str) -> bool {
        self.resolve(path).is_dir()
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }
}
