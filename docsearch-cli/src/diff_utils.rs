use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use std::path::Path;

/// Renders a unified diff between two versions of a file.
///
/// Returns an empty string when the contents are identical.
pub fn unified_diff(file_path: &Path, old_content: &str, new_content: &str) -> String {
    let mut out = String::new();
    if old_content == new_content {
        return out;
    }
    let diff = TextDiff::from_lines(old_content, new_content);

    out.push_str(&format!("--- {}\n", file_path.display()));
    out.push_str(&format!("+++ {}\n", file_path.display()));

    for hunk in diff.unified_diff().context_radius(3).iter_hunks() {
        out.push_str(&format!("{}\n", hunk.header()));
        for change in hunk.iter_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => '-',
                ChangeTag::Insert => '+',
                ChangeTag::Equal => ' ',
            };
            out.push(sign);
            out.push_str(change.value());
            if change.missing_newline() {
                out.push('\n');
            }
        }
    }
    out
}

/// Prints a unified diff, coloring removed and added lines
pub fn print_unified_diff(file_path: &Path, old_content: &str, new_content: &str) {
    for line in unified_diff(file_path, old_content, new_content).lines() {
        if line.starts_with("---") || line.starts_with("+++") {
            println!("{}", line.bold());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }
}
