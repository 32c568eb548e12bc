//! Core tool traits and types.

use std::collections::{HashMap, HashSet};

use crate::result::ExecResult;

use super::context::ExecContext;

/// Schema for a tool flag.
#[derive(Debug, Clone)]
pub struct FlagSchema {
    /// Flag name: one character for `-x`, longer for `--name` / `-name`.
    pub name: String,
    /// Whether the flag consumes the following word as its value.
    pub takes_value: bool,
    /// Description for help text.
    pub description: String,
}

/// Schema describing a tool's interface.
#[derive(Debug, Clone)]
pub struct ToolSchema {
    /// Tool name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Usage line, e.g. `ls [-l] [path...]`.
    pub usage: String,
    /// Accepted flags.
    pub flags: Vec<FlagSchema>,
    /// Pass every word through as positional (no flag parsing).
    pub raw: bool,
}

impl ToolSchema {
    /// Create a new tool schema.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            usage: name.clone(),
            name,
            description: description.into(),
            flags: Vec::new(),
            raw: false,
        }
    }

    /// Set the usage line.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Accept a boolean flag.
    pub fn flag(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.flags.push(FlagSchema {
            name: name.into(),
            takes_value: false,
            description: description.into(),
        });
        self
    }

    /// Accept a flag that takes the next word as its value.
    pub fn option(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.flags.push(FlagSchema {
            name: name.into(),
            takes_value: true,
            description: description.into(),
        });
        self
    }

    /// Disable flag parsing; every word is positional.
    pub fn raw(mut self) -> Self {
        self.raw = true;
        self
    }

    fn find_flag(&self, name: &str) -> Option<&FlagSchema> {
        self.flags.iter().find(|f| f.name == name)
    }
}

/// Parsed arguments ready for tool execution.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    /// Positional arguments in order.
    pub positional: Vec<String>,
    /// Flag values by name (from `-name value` or `--name value`).
    pub named: HashMap<String, String>,
    /// Boolean flags (e.g., -l, --long).
    pub flags: HashSet<String>,
}

impl ToolArgs {
    /// Create empty args.
    pub fn new() -> Self {
        Self::default()
    }

    /// Args with only positional words.
    pub fn positional<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            positional: words.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Parse command words (after the command name) against a schema.
    ///
    /// - `--` ends flag parsing
    /// - `-` alone, and `-` followed by a digit, are positional
    /// - `--name` and `-name` match a declared multi-character flag
    /// - `-abc` is the single-character flags `a`, `b`, `c`
    ///
    /// Undeclared flags and missing option values are errors, phrased the
    /// way the shell prints them.
    pub fn parse(words: &[String], schema: &ToolSchema) -> Result<Self, String> {
        let mut args = Self::new();
        if schema.raw {
            args.positional = words.to_vec();
            return Ok(args);
        }

        let mut iter = words.iter();
        while let Some(word) = iter.next() {
            if word == "--" {
                args.positional.extend(iter.by_ref().cloned());
                break;
            }

            let Some(body) = word.strip_prefix('-') else {
                args.positional.push(word.clone());
                continue;
            };
            if body.is_empty() || body.starts_with(|c: char| c.is_ascii_digit()) {
                args.positional.push(word.clone());
                continue;
            }

            let long = body.strip_prefix('-').unwrap_or(body);
            let names: Vec<String> = match schema.find_flag(long) {
                Some(_) => vec![long.to_string()],
                None if body.starts_with('-') => {
                    return Err(format!("unrecognized option '{}'", word));
                }
                None => body.chars().map(String::from).collect(),
            };

            for name in names {
                match schema.find_flag(&name) {
                    Some(flag) if flag.takes_value => {
                        let value = iter
                            .next()
                            .ok_or_else(|| format!("option requires an argument -- '{}'", name))?;
                        args.named.insert(name, value.clone());
                    }
                    Some(_) => {
                        args.flags.insert(name);
                    }
                    None => return Err(format!("invalid option -- '{}'", name)),
                }
            }
        }
        Ok(args)
    }

    /// Get a positional argument by index.
    pub fn get_positional(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }

    /// Get a flag value by name.
    pub fn get_named(&self, key: &str) -> Option<&str> {
        self.named.get(key).map(String::as_str)
    }

    /// Check if a flag is set.
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }
}

/// A tool that can be executed.
pub trait Tool: Send + Sync {
    /// The tool's name (used for lookup).
    fn name(&self) -> &str;

    /// Get the tool's schema.
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with the given arguments and context.
    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult;
}
