use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::PathBuf;
use std::process::Command as GitCommand;

const LOG_RECORD_END: &str = "---END---";

/// A commit in a summarized range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub commit_hash: String,
    pub title: String,
    pub body: String,
}

/// Run a git command and capture stdout as String.
pub fn git_output(args: &[&str]) -> Result<String> {
    let output = GitCommand::new("git")
        .args(args)
        .output()
        .with_context(|| format!("failed to run git {:?}", args))?;

    if !output.status.success() {
        return Err(anyhow!(
            "git {:?} exited with status {:?}: {}",
            args,
            output.status.code(),
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Get the path to the Git directory (e.g. .git)
pub fn git_dir() -> Result<PathBuf> {
    let dir = git_output(&["rev-parse", "--git-dir"])?.trim().to_string();
    Ok(PathBuf::from(dir))
}

/// Write the commit message into .git/COMMIT_EDITMSG so the next `git commit`
/// will use it as the default message in the editor.
pub fn write_commit_editmsg(message: &str) -> Result<()> {
    let path = git_dir()?.join("COMMIT_EDITMSG");
    fs::write(&path, message)
        .with_context(|| format!("failed to write commit message to {:?}", path))?;
    Ok(())
}

/// Get the current branch name.
pub fn current_branch() -> Result<String> {
    let name = git_output(&["rev-parse", "--abbrev-ref", "HEAD"])?
        .trim()
        .to_string();
    Ok(name)
}

/// Get the full staged diff.
pub fn staged_diff() -> Result<String> {
    git_output(&["diff", "--cached"])
}

/// Collect commits in `base..from`, oldest first.
pub fn collect_log(base: &str, from: &str) -> Result<Vec<LogEntry>> {
    let range = format!("{base}..{from}");
    let format = format!("--pretty=format:%H%n%s%n%b%n{LOG_RECORD_END}");
    let log_output = git_output(&["log", "--reverse", &format, &range])?;
    Ok(parse_log(&log_output))
}

fn parse_log(log_output: &str) -> Vec<LogEntry> {
    log_output
        .split(LOG_RECORD_END)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .filter_map(|block| {
            let mut lines = block.lines();
            let commit_hash = lines.next()?.trim().to_string();
            let title = lines.next().unwrap_or("").trim().to_string();
            let body = lines.collect::<Vec<_>>().join("\n");
            Some(LogEntry {
                commit_hash,
                title,
                body,
            })
        })
        .collect()
}
