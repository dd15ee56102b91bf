//! Model-friendly rendering of a raw diff: one uniquely fenced block per file,
//! each preceded by a `### File: <path> (+A, -D)` tally line.

use super::{count_changes, parse_file_header};

const FENCE: &str = "```";
const ESCAPED_FENCE: &str = "\\`\\`\\`";
const DIVIDER: &str = "\n---\n";

/// One file's slice of the diff, collected between two file headers.
#[derive(Debug)]
struct FileChangeBlock<'a> {
    index: usize,
    filename: &'a str,
    lines: Vec<&'a str>,
}

impl<'a> FileChangeBlock<'a> {
    fn open(index: usize, filename: &'a str, header: &'a str) -> Self {
        Self {
            index,
            filename,
            lines: vec![header],
        }
    }

    fn close_into(self, out: &mut Vec<String>) {
        let (additions, deletions) = count_changes(self.lines.iter().copied());
        out.push(format!(
            "### File: {} (+{additions}, -{deletions})",
            self.filename
        ));
        out.push(format!("{FENCE}diff-file-{}", self.index));
        out.extend(self.lines.into_iter().map(str::to_owned));
        out.push(FENCE.to_owned());
    }
}

/// Escape embedded fences so user content can never close one of ours.
pub fn escape_fences(diff: &str) -> String {
    diff.replace(FENCE, ESCAPED_FENCE)
}

/// Wrap every file of `diff` in its own numbered fence.
///
/// Lines seen before the first file header pass through unfenced. Empty input
/// is returned as-is.
pub fn format_diff(diff: &str) -> String {
    if diff.is_empty() {
        return String::new();
    }

    let escaped = escape_fences(diff);
    let mut out: Vec<String> = Vec::new();
    let mut current: Option<FileChangeBlock<'_>> = None;
    let mut counter = 0;

    for line in escaped.lines() {
        if let Some((_, after)) = parse_file_header(line) {
            if let Some(block) = current.take() {
                block.close_into(&mut out);
                out.push(DIVIDER.to_owned());
            }
            counter += 1;
            current = Some(FileChangeBlock::open(counter, after, line));
        } else if let Some(block) = current.as_mut() {
            block.lines.push(line);
        } else {
            out.push(line.to_owned());
        }
    }

    if let Some(block) = current {
        block.close_into(&mut out);
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIFF: &str = "\
diff --git a/src/a.rs b/src/a.rs
--- a/src/a.rs
+++ b/src/a.rs
@@ -1 +1,2 @@
-let x = 1;
+let x = 2;
+let y = 3;
diff --git a/docs/b.md b/docs/b.md
--- a/docs/b.md
+++ b/docs/b.md
@@ -1 +1 @@
-old
+new";

    #[test]
    fn empty_diff_is_unchanged() {
        assert_eq!(format_diff(""), "");
    }

    #[test]
    fn wraps_each_file_with_tally_and_unique_fence() {
        let formatted = format_diff(DIFF);
        let expected = "\
### File: src/a.rs (+2, -1)
```diff-file-1
diff --git a/src/a.rs b/src/a.rs
--- a/src/a.rs
+++ b/src/a.rs
@@ -1 +1,2 @@
-let x = 1;
+let x = 2;
+let y = 3;
```

---

### File: docs/b.md (+1, -1)
```diff-file-2
diff --git a/docs/b.md b/docs/b.md
--- a/docs/b.md
+++ b/docs/b.md
@@ -1 +1 @@
-old
+new
```";
        assert_eq!(formatted, expected);
    }

    #[test]
    fn lines_before_first_header_pass_through() {
        let formatted = format_diff("warning: CRLF\ndiff --git a/x b/x\n+a");
        assert!(formatted.starts_with("warning: CRLF\n### File: x (+1, -0)\n```diff-file-1"));
    }

    #[test]
    fn diff_without_headers_is_never_fenced() {
        let formatted = format_diff("+just\n-lines");
        assert_eq!(formatted, "+just\n-lines");
        assert!(!formatted.contains(FENCE));
    }

    #[test]
    fn embedded_fences_are_escaped() {
        let diff = "diff --git a/README.md b/README.md\n+```rust\n+fn main() {}\n+```";
        let formatted = format_diff(diff);

        // Only our own opening and closing fences remain.
        let fence_lines: Vec<&str> = formatted
            .lines()
            .filter(|l| l.contains(FENCE))
            .collect();
        assert_eq!(fence_lines, vec!["```diff-file-1", "```"]);
        assert!(formatted.contains("+\\`\\`\\`rust"));
    }
}
