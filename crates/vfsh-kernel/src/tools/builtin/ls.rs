//! ls: List directory contents.

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};
use crate::vfs::{DirEntry, DirEntryKind};

/// Ls tool: list directory contents.
pub struct Ls;

impl Tool for Ls {
    fn name(&self) -> &str {
        "ls"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("ls", "List directory contents")
            .usage("ls [-l] [path...]")
            .flag("l", "Use long format with type and size")
            .flag("long", "Same as -l")
    }

    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let long_format = args.has_flag("long") || args.has_flag("l");
        let paths: Vec<&str> = if args.positional.is_empty() {
            vec![""]
        } else {
            args.positional.iter().map(String::as_str).collect()
        };
        let with_headers = paths.len() > 1;

        let mut blocks = Vec::new();
        let mut errors = Vec::new();
        for path in paths {
            if let Some(entries) = ctx.fs.list_directory(path) {
                let body = render(&entries, long_format);
                blocks.push(if with_headers {
                    format!("{}:\n{}", path, body).trim_end().to_string()
                } else {
                    body
                });
            } else if let Some(content) = ctx.fs.read_file(path) {
                let entry = DirEntry::file(path, content.chars().count() as u64);
                blocks.push(render(&[entry], long_format));
            } else {
                errors.push(format!(
                    "ls: cannot access '{}': No such file or directory",
                    path
                ));
            }
        }

        let separator = if with_headers { "\n\n" } else { "\n" };
        let code = if errors.is_empty() { 0 } else { 2 };
        ExecResult::from_output(code, blocks.join(separator), errors.join("\n"))
    }
}

fn render(entries: &[DirEntry], long_format: bool) -> String {
    if !long_format {
        return entries
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>()
            .join("\n");
    }

    let width = entries
        .iter()
        .map(|e| e.size.to_string().len())
        .max()
        .unwrap_or(1);
    entries
        .iter()
        .map(|e| {
            let type_char = match e.kind {
                DirEntryKind::Directory => 'd',
                DirEntryKind::File => '-',
            };
            format!("{} {:>width$} {}", type_char, e.size, e.name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::testing::{args, sample_ctx};

    #[test]
    fn ls_root() {
        let mut ctx = sample_ctx();
        let result = Ls.execute(args(&["/"]), &mut ctx);
        assert!(result.ok());
        assert_eq!(result.out, "docs\nempty\nnotes.txt");
    }

    #[test]
    fn ls_cwd() {
        let mut ctx = sample_ctx();
        assert!(ctx.fs.change_directory("docs"));
        let result = Ls.execute(ToolArgs::new(), &mut ctx);
        assert_eq!(result.out, "guide\nreadme.txt");
    }

    #[test]
    fn ls_long() {
        let mut ctx = sample_ctx();
        let mut long = args(&["/"]);
        long.flags.insert("l".to_string());

        let result = Ls.execute(long, &mut ctx);
        assert!(result.ok());
        assert_eq!(result.out, "d 0 docs\nd 0 empty\n- 8 notes.txt");
    }

    #[test]
    fn ls_empty_dir() {
        let mut ctx = sample_ctx();
        let result = Ls.execute(args(&["empty"]), &mut ctx);
        assert!(result.ok());
        assert_eq!(result.out, "");
    }

    #[test]
    fn ls_file_operand_prints_its_name() {
        let mut ctx = sample_ctx();
        let result = Ls.execute(args(&["notes.txt"]), &mut ctx);
        assert_eq!(result.out, "notes.txt");
    }

    #[test]
    fn ls_several_paths_get_headers() {
        let mut ctx = sample_ctx();
        let result = Ls.execute(args(&["docs", "empty"]), &mut ctx);
        assert_eq!(result.out, "docs:\nguide\nreadme.txt\n\nempty:");
    }

    #[test]
    fn ls_not_found() {
        let mut ctx = sample_ctx();
        let result = Ls.execute(args(&["/nonexistent"]), &mut ctx);
        assert_eq!(result.code, 2);
        assert_eq!(
            result.err,
            "ls: cannot access '/nonexistent': No such file or directory"
        );
    }

    #[test]
    fn ls_partial_failure_keeps_output() {
        let mut ctx = sample_ctx();
        let result = Ls.execute(args(&["nope", "docs"]), &mut ctx);
        assert_eq!(result.code, 2);
        assert!(result.out.contains("readme.txt"));
        assert!(result.err.contains("'nope'"));
    }
}
