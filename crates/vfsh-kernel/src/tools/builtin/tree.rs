//! tree: Display directory structure.

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};
use crate::vfs::DirTree;

/// Tree tool: draws the subtree below a directory.
pub struct Tree;

impl Tool for Tree {
    fn name(&self) -> &str {
        "tree"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("tree", "Display directory structure").usage("tree [path]")
    }

    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let path = args.get_positional(0).unwrap_or(".");

        let Some(tree) = ctx.fs.tree(path) else {
            return ExecResult::failure(1, format!("tree: {}: No such file or directory", path));
        };
        if !tree.entry.is_dir() {
            return ExecResult::failure(1, format!("tree: {}: Not a directory", path));
        }

        let mut output = String::from(path);
        output.push('\n');
        render(&tree, &mut output);

        let (dirs, files) = tree.counts();
        output.push('\n');
        output.push_str(&format!(
            "{} {}, {} {}",
            dirs,
            if dirs == 1 { "directory" } else { "directories" },
            files,
            if files == 1 { "file" } else { "files" },
        ));
        ExecResult::success(output)
    }
}

type Pending<'a> = Vec<(&'a DirTree, String, bool)>;

fn render(tree: &DirTree, output: &mut String) {
    let mut stack: Pending<'_> = Vec::new();
    push_children(tree, "", &mut stack);

    while let Some((node, prefix, is_last)) = stack.pop() {
        let connector = if is_last { "└── " } else { "├── " };
        output.push_str(&prefix);
        output.push_str(connector);
        output.push_str(&node.entry.name);
        output.push('\n');

        let guide = if is_last { "    " } else { "│   " };
        push_children(node, &format!("{}{}", prefix, guide), &mut stack);
    }
}

/// Queue children so they pop in order.
fn push_children<'a>(tree: &'a DirTree, prefix: &str, stack: &mut Pending<'a>) {
    let count = tree.children.len();
    for (i, child) in tree.children.iter().enumerate().rev() {
        stack.push((child, prefix.to_string(), i + 1 == count));
    }
}
