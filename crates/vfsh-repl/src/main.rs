//! vfsh entry point.
//!
//! Launch the interactive shell over the current directory:
//! ```bash
//! cargo run -p vfsh-repl
//! ```
//!
//! Or over a virtual filesystem, optionally playing back a script:
//! ```bash
//! cargo run -p vfsh-repl -- --vfs tree.csv --script demo.sh
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vfsh_kernel::ShellConfig;
use vfsh_repl::Repl;

/// A UNIX-like shell over a CSV-described virtual filesystem.
#[derive(Parser, Debug)]
#[command(name = "vfsh", version, about)]
struct Args {
    /// CSV file describing the virtual filesystem (path,type,content,encoding).
    /// Without it the shell runs on the real filesystem.
    #[arg(long, value_name = "CSV")]
    vfs: Option<PathBuf>,

    /// Play back a script instead of reading commands interactively.
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Log at debug level (overrides RUST_LOG).
    #[arg(long)]
    debug: bool,
}

impl From<Args> for ShellConfig {
    fn from(args: Args) -> Self {
        Self {
            vfs_path: args.vfs,
            script_path: args.script,
            debug: args.debug,
        }
    }
}

fn main() -> Result<ExitCode> {
    let config = ShellConfig::from(Args::parse());

    let filter = if config.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut repl = Repl::new(&config)?;
    let status = match &config.script_path {
        Some(script) => {
            print!("{}", repl.run_script(script)?);
            repl.status()
        }
        None => vfsh_repl::run(&mut repl)?,
    };

    Ok(ExitCode::from((status & 0xff) as u8))
}
