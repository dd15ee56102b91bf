use log::{debug, warn};

use crate::tokens;

/// Marker line standing in for the elided middle of a truncated diff.
pub const ELISION: &str = "...";

/// Trim `diff` so that it, the system prompt and the user appendix fit under
/// `ceiling` tokens.
///
/// Keeps a head and a tail window of lines joined by [`ELISION`]. This is a
/// single best-effort pass: the result may still exceed the ceiling and the
/// caller decides what to do about it.
pub fn fit_diff(diff: &str, system_prompt: &str, user_appendix: &str, ceiling: usize) -> String {
    let allowed = ceiling
        .saturating_sub(tokens::estimate(system_prompt))
        .saturating_sub(tokens::estimate(user_appendix));
    let current = tokens::estimate(diff);

    if current <= allowed {
        return diff.to_string();
    }

    debug!("Truncating diff from {current} to {allowed} tokens");

    let lines: Vec<&str> = diff.lines().collect();
    let avg_tokens_per_line = current as f64 / lines.len().max(1) as f64;
    let lines_to_keep = ((allowed as f64 / avg_tokens_per_line).floor() as usize).max(1);

    if lines_to_keep >= lines.len() {
        return diff.to_string();
    }

    let head_len = (lines_to_keep / 2).max(1);
    let tail_len = lines_to_keep.div_ceil(2).max(1);

    let mut kept: Vec<&str> = Vec::with_capacity(head_len + tail_len + 1);
    kept.extend_from_slice(&lines[..head_len]);
    kept.push(ELISION);
    kept.extend_from_slice(&lines[lines.len() - tail_len..]);
    let truncated = kept.join("\n");

    let final_tokens = tokens::estimate(system_prompt)
        + tokens::estimate(&truncated)
        + tokens::estimate(user_appendix);
    if final_tokens > ceiling {
        warn!(
            "Truncated diff still exceeds max tokens ({final_tokens}/{ceiling}); further truncation may be required"
        );
    } else {
        debug!("Diff truncated to {lines_to_keep} lines, keeping context at both ends");
    }

    truncated
}
