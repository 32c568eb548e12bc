//! The Shell: prompt, dispatch, and script playback.
//!
//! The shell owns the tool registry and an [`ExecContext`] holding the active
//! filesystem. Each line goes through three steps:
//!
//! ```text
//! line ──tokenize──▶ words ──ToolArgs::parse──▶ args ──Tool::execute──▶ ExecResult
//! ```
//!
//! Nothing here prints; callers decide where `out` and `err` go.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, VfsError};
use crate::lexer::tokenize;
use crate::result::ExecResult;
use crate::tools::{ExecContext, ToolArgs, ToolRegistry};
use crate::vfs::{load_csv_path, Filesystem, LocalFs, VirtualFileSystem};

/// Exit status for a command that is not registered.
pub const STATUS_NOT_FOUND: i32 = 127;

/// Exit status for lexer and argument errors.
pub const STATUS_USAGE: i32 = 2;

/// Configuration for shell initialization.
#[derive(Debug, Clone, Default)]
pub struct ShellConfig {
    /// CSV description to load into a virtual filesystem. Without one the
    /// shell runs against the real filesystem.
    pub vfs_path: Option<PathBuf>,
    /// Script to play back instead of reading interactively.
    pub script_path: Option<PathBuf>,
    /// Verbose logging.
    pub debug: bool,
}

impl ShellConfig {
    /// Config for a shell over the CSV at `path`.
    pub fn with_vfs(path: impl Into<PathBuf>) -> Self {
        Self {
            vfs_path: Some(path.into()),
            ..Self::default()
        }
    }
}

/// A command interpreter bound to one filesystem.
pub struct Shell {
    tools: ToolRegistry,
    ctx: ExecContext,
    user: String,
    host: String,
    last_status: i32,
    load_error: Option<String>,
}

impl Shell {
    /// Create a shell over `fs` with all builtins registered.
    pub fn new(fs: impl Filesystem + 'static) -> Self {
        Self::from_boxed(Box::new(fs))
    }

    /// Create a shell over an already boxed filesystem.
    pub fn from_boxed(fs: Box<dyn Filesystem>) -> Self {
        let tools = ToolRegistry::with_builtins();

        let mut ctx = ExecContext::from_boxed(fs);
        ctx.tool_schemas = tools.schemas();

        Self {
            tools,
            ctx,
            user: current_user(),
            host: hostname(),
            last_status: 0,
            load_error: None,
        }
    }

    /// Build the backend described by `config` and wrap it in a shell.
    ///
    /// A CSV that cannot be opened is an error. A malformed row stops the
    /// load with a warning; the rows before it stay and the shell starts over
    /// that partial tree, with the failure kept in [`Shell::load_error`].
    pub fn with_config(config: &ShellConfig) -> Result<Self> {
        match &config.vfs_path {
            Some(path) => {
                let mut vfs = VirtualFileSystem::new();
                let load_error = match load_csv_path(&mut vfs, path) {
                    Ok(report) => {
                        debug!(
                            path = %path.display(),
                            rows = report.rows,
                            nodes = report.nodes,
                            "loaded virtual filesystem"
                        );
                        None
                    }
                    Err(err @ VfsError::Io(_)) => return Err(err),
                    Err(err) => {
                        warn!(
                            path = %path.display(),
                            error = %err,
                            nodes = vfs.node_count(),
                            "load stopped early, continuing with partial tree"
                        );
                        Some(err.to_string())
                    }
                };
                let mut shell = Self::new(vfs);
                shell.load_error = load_error;
                Ok(shell)
            }
            None => {
                let local = LocalFs::from_current_dir()?;
                debug!(cwd = %local.cwd().display(), "using local filesystem");
                Ok(Self::new(local))
            }
        }
    }

    /// The prompt shown before each command: `user@host:path$ `.
    pub fn prompt(&self) -> String {
        format!("{}@{}:{}$ ", self.user, self.host, self.ctx.fs.display_path())
    }

    /// Execute one command line.
    pub fn execute_line(&mut self, line: &str) -> ExecResult {
        let result = self.dispatch(line);
        if let Some(result) = &result {
            self.last_status = result.code;
        }
        result.unwrap_or_default()
    }

    /// Run a line; `None` when there was nothing to run.
    fn dispatch(&mut self, line: &str) -> Option<ExecResult> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }

        let words = match tokenize(trimmed) {
            Ok(words) => words,
            Err(e) => {
                debug!(line = trimmed, error = %e, "lex failed");
                return Some(ExecResult::failure(STATUS_USAGE, format!("parse error: {}", e)));
            }
        };
        let (name, rest) = words.split_first()?;

        let Some(tool) = self.tools.get(name) else {
            debug!(command = %name, "unknown command");
            return Some(ExecResult::failure(
                STATUS_NOT_FOUND,
                format!("{}: command not found", name),
            ));
        };

        let args = match ToolArgs::parse(rest, &tool.schema()) {
            Ok(args) => args,
            Err(msg) => {
                return Some(ExecResult::failure(STATUS_USAGE, format!("{}: {}", name, msg)));
            }
        };

        let result = tool.execute(args, &mut self.ctx);
        debug!(command = %name, args = ?rest, code = result.code, "executed");
        Some(result)
    }

    /// Play back a script file as if typed at the prompt.
    ///
    /// Blank lines and `#` comments are skipped. Each command is echoed after
    /// the prompt, followed by its output. Failing commands do not stop
    /// playback; `exit` does. Returns the transcript and the final status.
    pub fn run_script(&mut self, path: impl AsRef<Path>) -> Result<(String, i32)> {
        let source = std::fs::read_to_string(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "running script");
        let transcript = self.run_source(&source);
        Ok((transcript, self.last_status()))
    }

    /// Play back script text; see [`Shell::run_script`].
    pub fn run_source(&mut self, source: &str) -> String {
        let mut transcript = String::new();
        for line in source.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            transcript.push_str(&self.prompt());
            transcript.push_str(trimmed);
            transcript.push('\n');

            let result = self.execute_line(trimmed);
            push_line(&mut transcript, &result.out);
            push_line(&mut transcript, &result.err);

            if self.should_exit() {
                break;
            }
        }
        transcript
    }

    /// True once `exit` has run.
    pub fn should_exit(&self) -> bool {
        self.ctx.exit_requested().is_some()
    }

    /// Status of the last command that ran (or the `exit` status).
    pub fn last_status(&self) -> i32 {
        self.ctx.exit_requested().unwrap_or(self.last_status)
    }

    /// The active filesystem.
    pub fn fs(&self) -> &dyn Filesystem {
        self.ctx.fs.as_ref()
    }

    /// Why the CSV load stopped early, if it did.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Names of all registered commands, sorted.
    pub fn command_names(&self) -> Vec<&str> {
        self.tools.names()
    }
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("ctx", &self.ctx)
            .field("tools", &self.tools)
            .field("last_status", &self.last_status)
            .finish()
    }
}

/// Append `text` as a line, unless it is empty.
fn push_line(buf: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    buf.push_str(text);
    if !text.ends_with('\n') {
        buf.push('\n');
    }
}

fn current_user() -> String {
    ["USER", "USERNAME"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "user".to_string())
}

fn hostname() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .or_else(|| std::fs::read_to_string("/etc/hostname").ok())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}
