//! Execution context for tools.

use crate::vfs::Filesystem;

use super::traits::ToolSchema;

/// Execution context passed to tools.
///
/// Owns the filesystem backend, which also carries the current directory.
pub struct ExecContext {
    /// Filesystem the shell operates on.
    pub fs: Box<dyn Filesystem>,
    /// Schemas of the registered tools, for `help`.
    pub tool_schemas: Vec<ToolSchema>,
    /// Set by `exit`; the shell stops reading commands once this is `Some`.
    exit_requested: Option<i32>,
}

impl ExecContext {
    /// Create a new execution context over a filesystem.
    pub fn new(fs: impl Filesystem + 'static) -> Self {
        Self::from_boxed(Box::new(fs))
    }

    /// Create a context from an already boxed filesystem.
    pub fn from_boxed(fs: Box<dyn Filesystem>) -> Self {
        Self {
            fs,
            tool_schemas: Vec::new(),
            exit_requested: None,
        }
    }

    /// Ask the shell to stop with the given status.
    pub fn request_exit(&mut self, code: i32) {
        self.exit_requested = Some(code);
    }

    /// The status passed to `exit`, if it has run.
    pub fn exit_requested(&self) -> Option<i32> {
        self.exit_requested
    }
}

impl std::fmt::Debug for ExecContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecContext")
            .field("cwd", &self.fs.current_path())
            .field("exit_requested", &self.exit_requested)
            .finish()
    }
}
