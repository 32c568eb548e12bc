//! ExecResult: the structured result of every command execution.
//!
//! Builtins never print. They return what they would have written to stdout
//! and stderr along with an exit code, and the caller decides where it goes.

/// The result of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Exit code. 0 means success.
    pub code: i32,
    /// Standard output, without a trailing newline.
    pub out: String,
    /// Standard error, without a trailing newline.
    pub err: String,
}

impl ExecResult {
    /// Create a successful result with output.
    pub fn success(out: impl Into<String>) -> Self {
        Self {
            code: 0,
            out: out.into(),
            err: String::new(),
        }
    }

    /// Create a failed result with an error message.
    pub fn failure(code: i32, err: impl Into<String>) -> Self {
        Self {
            code,
            out: String::new(),
            err: err.into(),
        }
    }

    /// Create a result from both streams.
    pub fn from_output(code: i32, out: impl Into<String>, err: impl Into<String>) -> Self {
        Self {
            code,
            out: out.into(),
            err: err.into(),
        }
    }

    /// True if the command succeeded (exit code 0).
    pub fn ok(&self) -> bool {
        self.code == 0
    }
}

impl Default for ExecResult {
    fn default() -> Self {
        Self::success("")
    }
}
