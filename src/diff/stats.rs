use super::{count_changes, parse_file_header};

/// Added/removed line totals for one file of a raw diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    pub path: String,
    pub additions: usize,
    pub deletions: usize,
}

/// Split a raw diff at its file headers and tally each file's changes.
///
/// Lines before the first header belong to no file and are not counted.
pub fn parse_diff(raw: &str) -> Vec<FileStat> {
    let mut stats = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in raw.lines() {
        if let Some((_, after)) = parse_file_header(line) {
            if let Some((path, lines)) = current.take() {
                stats.push(tally(path, &lines));
            }
            current = Some((after.to_string(), Vec::new()));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line);
        }
    }

    if let Some((path, lines)) = current {
        stats.push(tally(path, &lines));
    }

    stats
}

/// Sum additions and deletions across every file.
pub fn totals(stats: &[FileStat]) -> (usize, usize) {
    stats.iter().fold((0, 0), |(adds, dels), s| {
        (adds + s.additions, dels + s.deletions)
    })
}

fn tally(path: String, lines: &[&str]) -> FileStat {
    let (additions, deletions) = count_changes(lines.iter().copied());
    FileStat {
        path,
        additions,
        deletions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_FILES: &str = "\
diff --git a/src/lib.rs b/src/lib.rs
index 1111111..2222222 100644
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -1,3 +1,3 @@
-pub fn old() {}
+pub fn new() {}
+pub fn newer() {}
 pub fn same() {}
diff --git a/README.md b/README.md
deleted file mode 100644
--- a/README.md
+++ /dev/null
@@ -1,2 +0,0 @@
-# Title
-text
";

    #[test]
    fn tallies_each_file_separately() {
        let stats = parse_diff(TWO_FILES);
        assert_eq!(
            stats,
            vec![
                FileStat {
                    path: "src/lib.rs".into(),
                    additions: 2,
                    deletions: 1
                },
                FileStat {
                    path: "README.md".into(),
                    additions: 0,
                    deletions: 2
                },
            ]
        );
        assert_eq!(totals(&stats), (2, 3));
    }

    #[test]
    fn diff_without_headers_has_no_files() {
        assert!(parse_diff("+orphan line\n-another").is_empty());
        assert!(parse_diff("").is_empty());
    }
}
