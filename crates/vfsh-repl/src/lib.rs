//! vfsh REPL: interactive front end and script runner for the vfsh shell.
//!
//! The REPL is a thin loop around [`Shell`]: read a line with rustyline,
//! execute it, print `out` to stdout and `err` to stderr, repeat until `exit`
//! or end of input.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use tracing::{debug, warn};

use vfsh_kernel::{ExecResult, Shell, ShellConfig};

/// REPL state.
pub struct Repl {
    shell: Shell,
}

impl Repl {
    /// Create a REPL over the backend described by `config`.
    pub fn new(config: &ShellConfig) -> Result<Self> {
        let shell = Shell::with_config(config).with_context(|| match &config.vfs_path {
            Some(path) => format!("Failed to load {}", path.display()),
            None => "Failed to open local filesystem".to_string(),
        })?;
        Ok(Self { shell })
    }

    /// Wrap an existing shell.
    pub fn from_shell(shell: Shell) -> Self {
        Self { shell }
    }

    /// The prompt for the next line.
    pub fn prompt(&self) -> String {
        self.shell.prompt()
    }

    /// Process a single line of input.
    ///
    /// Returns `None` when there is nothing to print.
    pub fn process_line(&mut self, line: &str) -> Option<ExecResult> {
        let result = self.shell.execute_line(line);
        if result.out.is_empty() && result.err.is_empty() {
            None
        } else {
            Some(result)
        }
    }

    /// True once `exit` has run.
    pub fn should_exit(&self) -> bool {
        self.shell.should_exit()
    }

    /// Status to leave the process with.
    pub fn status(&self) -> i32 {
        self.shell.last_status()
    }

    /// Play back a script, returning its transcript.
    pub fn run_script(&mut self, path: &Path) -> Result<String> {
        let (transcript, status) = self
            .shell
            .run_script(path)
            .with_context(|| format!("Failed to run script {}", path.display()))?;
        debug!(status, "script finished");
        Ok(transcript)
    }
}

/// Print a result the way a terminal shows it.
pub fn print_result(result: &ExecResult) {
    if !result.out.is_empty() {
        if result.out.ends_with('\n') {
            print!("{}", result.out);
        } else {
            println!("{}", result.out);
        }
    }
    if !result.err.is_empty() {
        eprintln!("{}", result.err.trim_end_matches('\n'));
    }
}

/// Where line history is kept: `<data dir>/vfsh/history.txt`.
pub fn history_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.data_dir().join("vfsh").join("history.txt"))
}

/// Run the interactive loop until `exit` or end of input.
///
/// Returns the status the process should exit with.
pub fn run(repl: &mut Repl) -> Result<i32> {
    println!(
        "vfsh v{}: type help for commands, exit to quit.\n",
        env!("CARGO_PKG_VERSION")
    );

    let mut rl: Editor<(), DefaultHistory> =
        Editor::new().context("Failed to create editor")?;

    let history_path = history_path();
    if let Some(ref path) = history_path {
        // Missing history on first run is expected.
        let _ = rl.load_history(path);
    }

    loop {
        match rl.readline(&repl.prompt()) {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());

                if let Some(result) = repl.process_line(&line) {
                    print_result(&result);
                }
                if repl.should_exit() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    if let Some(ref path) = history_path {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = rl.save_history(path) {
            warn!(path = %path.display(), error = %e, "could not save history");
        }
    }

    Ok(repl.status())
}
