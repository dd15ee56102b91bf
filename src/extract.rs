//! Recovery of the commit message from free-form model output.
//!
//! Two strategies are tried in order: a `<COMMIT_MESSAGE>` tagged block, then
//! fenced blocks opened with ```` ```commit ````. Each returns an optional match
//! so a miss is always an explicit `None`, never a panic.

use log::{debug, trace};

const REASONING_END: &str = "</think>";
const TAG: &str = "commit_message";
const FENCE: &str = "```";
const COMMIT_FENCE: &str = "```commit";

type Strategy = fn(&str) -> Option<String>;

const STRATEGIES: [(&str, Strategy); 2] = [
    ("tagged block", tagged_block),
    ("commit fence", commit_fences),
];

/// Pull the commit message out of `output`, or `None` if neither strategy
/// finds a non-empty payload.
pub fn extract(output: &str) -> Option<String> {
    let answer = strip_reasoning(output);

    for (name, strategy) in STRATEGIES {
        if let Some(message) = strategy(answer) {
            debug!("Extracted commit message via {name}");
            return Some(message);
        }
        trace!("No {name} found in model output");
    }

    debug!("Model output contained no recoverable commit message");
    None
}

/// Drop any deliberation the model emitted before its final answer.
fn strip_reasoning(output: &str) -> &str {
    match output.find(REASONING_END) {
        Some(idx) => &output[idx + REASONING_END.len()..],
        None => output,
    }
}

/// `<COMMIT_MESSAGE>…</COMMIT_MESSAGE>` or `[COMMIT_MESSAGE]…[/COMMIT_MESSAGE]`,
/// matched case-insensitively on both ends.
fn tagged_block(text: &str) -> Option<String> {
    // ASCII lowercasing keeps byte offsets, so indices map back onto `text`.
    let lower = text.to_ascii_lowercase();

    [('<', '>'), ('[', ']')].into_iter().find_map(|(open, close)| {
        let start_tag = format!("{open}{TAG}{close}");
        let end_tag = format!("{open}/{TAG}{close}");

        let start = lower.find(&start_tag)? + start_tag.len();
        let end = start + lower[start..].find(&end_tag)?;
        non_empty(&text[start..end])
    })
}

/// Every ```` ```commit ```` block, joined by newlines.
fn commit_fences(text: &str) -> Option<String> {
    let mut blocks = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(COMMIT_FENCE) {
        let body = &rest[open + COMMIT_FENCE.len()..];
        let Some(close) = body.find(FENCE) else {
            break;
        };
        if let Some(block) = non_empty(&body[..close]) {
            blocks.push(block);
        }
        rest = body[close + FENCE.len()..].trim_start_matches('`');
    }

    non_empty(&blocks.join("\n"))
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
