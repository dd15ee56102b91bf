//! Restructuring, measuring and trimming of raw unified diffs.

pub mod format;
pub mod stats;
pub mod truncate;

use std::sync::LazyLock;

use regex::Regex;

static FILE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^diff --git a/(.+?) b/(.+)$").expect("file header pattern is valid")
});

/// Split a `diff --git a/<before> b/<after>` line into its two paths.
pub fn parse_file_header(line: &str) -> Option<(&str, &str)> {
    let caps = FILE_HEADER.captures(line)?;
    let before = caps.get(1)?.as_str();
    let after = caps.get(2)?.as_str();
    Some((before, after))
}

/// Count added and removed lines, skipping the `+++`/`---` file headers.
pub fn count_changes<'a, I>(lines: I) -> (usize, usize)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut additions = 0;
    let mut deletions = 0;
    for line in lines {
        if line.starts_with('+') && !line.starts_with("+++") {
            additions += 1;
        } else if line.starts_with('-') && !line.starts_with("---") {
            deletions += 1;
        }
    }
    (additions, deletions)
}
