use crate::git::LogEntry;
use crate::llm::{prompts, ChatMessage};

const DIFF_HEADER: &str = "START BY CAREFULLY REVIEWING THE FOLLOWING DIFF(S):\n\n";

/// Which pair of static prompts to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStyle {
    Plain,
    Emoji,
}

impl PromptStyle {
    pub fn from_emoji_flag(emoji: bool) -> Self {
        if emoji {
            PromptStyle::Emoji
        } else {
            PromptStyle::Plain
        }
    }

    pub fn system(&self) -> &'static str {
        match self {
            PromptStyle::Plain => prompts::SYSTEM_MESSAGE,
            PromptStyle::Emoji => prompts::SYSTEM_MESSAGE_EMOJI,
        }
    }

    pub fn appendix(&self) -> &'static str {
        match self {
            PromptStyle::Plain => prompts::USER_MSG_APPENDIX,
            PromptStyle::Emoji => prompts::USER_MSG_APPENDIX_EMOJI,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

impl PromptPair {
    /// The `(system, user)` message pair sent as one request.
    pub fn messages(&self) -> [ChatMessage; 2] {
        [
            ChatMessage::system(self.system.clone()),
            ChatMessage::user(self.user.clone()),
        ]
    }

    /// Concatenated text used for token estimates.
    pub fn combined(&self) -> String {
        format!("{}{}", self.system, self.user)
    }
}

/// Commit-message request around an already formatted diff. Notes go after
/// the diff and before the closing instructions.
pub fn commit_message_prompt(
    formatted_diff: &str,
    notes: Option<&str>,
    style: PromptStyle,
) -> PromptPair {
    let mut user = String::from(DIFF_HEADER);
    user.push_str(formatted_diff);

    if let Some(notes) = notes.filter(|n| !n.trim().is_empty()) {
        user.push_str("\n\n## Custom User Notes\n```\n");
        user.push_str(notes);
        user.push_str("\n```\n");
    }

    user.push_str(style.appendix());

    PromptPair {
        system: style.system().to_owned(),
        user,
    }
}

pub fn summary_prompt(text: &str) -> PromptPair {
    PromptPair {
        system: prompts::SUMMARIZE_COMMITS.to_owned(),
        user: text.to_owned(),
    }
}

/// Render a commit range (oldest first) as input for [`summary_prompt`].
pub fn render_commit_log(base: &str, from: &str, entries: &[LogEntry]) -> String {
    let mut out = format!(
        "Base branch: {base}\nFeature branch: {from}\n\nCommit history (oldest first):\n"
    );

    for entry in entries {
        let short = entry.commit_hash.chars().take(7).collect::<String>();
        out.push_str(&format!("- {short}: {title}\n", title = entry.title.trim()));
        if !entry.body.trim().is_empty() {
            out.push_str("  ");
            out.push_str(&entry.body.trim_end().replace('\n', "\n  "));
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    #[test]
    fn notes_sit_between_diff_and_appendix() {
        let pair = commit_message_prompt("DIFF", Some("ticket ABC-1"), PromptStyle::Plain);

        let diff_at = pair.user.find("DIFF").unwrap();
        let notes_at = pair.user.find("## Custom User Notes\n```\nticket ABC-1\n```").unwrap();
        let appendix_at = pair.user.find(prompts::USER_MSG_APPENDIX).unwrap();
        assert!(pair.user.starts_with(DIFF_HEADER));
        assert!(diff_at < notes_at && notes_at < appendix_at);
        assert_eq!(pair.system, prompts::SYSTEM_MESSAGE);
    }

    #[test]
    fn blank_notes_are_omitted() {
        let pair = commit_message_prompt("DIFF", Some("  "), PromptStyle::Plain);
        assert!(!pair.user.contains("Custom User Notes"));
    }

    #[test]
    fn emoji_style_switches_both_prompts() {
        let pair = commit_message_prompt("DIFF", None, PromptStyle::Emoji);
        assert_eq!(pair.system, prompts::SYSTEM_MESSAGE_EMOJI);
        assert!(pair.user.ends_with(prompts::USER_MSG_APPENDIX_EMOJI));
    }

    #[test]
    fn summary_prompt_asks_for_summary_heading() {
        let pair = summary_prompt("fix: a");
        assert!(pair.system.contains("\"## Summary\""));
        assert!(pair.system.ends_with("Avoid jargon without context."));
        assert_eq!(pair.user, "fix: a");
    }

    #[test]
    fn messages_are_system_then_user() {
        let pair = summary_prompt("commits");
        let [system, user] = pair.messages();
        assert_eq!(system.role, Role::System);
        assert_eq!(user.role, Role::User);
        assert_eq!(user.content, "commits");
    }

    #[test]
    fn commit_log_renders_short_hashes_and_indented_bodies() {
        let entries = vec![LogEntry {
            commit_hash: "0123456789abcdef".into(),
            title: "feat: add parser ".into(),
            body: "Line one\nLine two\n".into(),
        }];
        let rendered = render_commit_log("main", "feature", &entries);
        assert!(rendered.contains("- 0123456: feat: add parser\n  Line one\n  Line two\n"));
    }
}
