use clap::{ArgAction, Parser, Subcommand};

/// CLI options
#[derive(Parser, Debug)]
#[command(
    name = "diffscribe",
    version,
    about = "LLM-assisted Git commit message generator for your staged diff"
)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Debug mode: log budgets, state transitions and raw responses
    #[arg(long, global = true)]
    pub debug: bool,

    /// Model name to use (e.g. gpt-4o-mini)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// API key (otherwise uses OPENAI_API_KEY env var)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    /// Upper bound for the request token ceiling
    #[arg(long, global = true)]
    pub max_tokens: Option<usize>,

    /// Sampling temperature
    #[arg(long, global = true)]
    pub temperature: Option<f32>,

    /// Tokens added to the request size when computing the ceiling
    #[arg(long, global = true)]
    pub token_increment: Option<usize>,

    /// Ask for an emoji-prefixed commit message
    #[arg(long, global = true)]
    pub emoji: bool,

    /// Wait for the whole response instead of streaming it
    #[arg(long, global = true)]
    pub no_stream: bool,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Free-text notes passed to the model alongside the diff
    #[arg(long)]
    pub notes: Option<String>,

    /// If set, write the generated message into .git/COMMIT_EDITMSG (no commit is created)
    #[arg(long)]
    pub apply: bool,

    /// Subcommand (e.g. 'summarize')
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Effective log verbosity; `--debug` implies at least `-vv`.
    pub fn verbosity(&self) -> u8 {
        if self.debug {
            self.verbose.max(2)
        } else {
            self.verbose
        }
    }
}

/// Subcommands, e.g. `diffscribe summarize main`
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write release notes summarizing the commit messages in base..from
    Summarize {
        /// Base branch or revision to compare against (e.g. main or v1.2.0)
        base: String,

        /// Optional feature/source branch; defaults to current branch if omitted
        from: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_raises_verbosity_floor() {
        let cli = Cli::parse_from(["diffscribe", "--debug"]);
        assert_eq!(cli.verbosity(), 2);

        let cli = Cli::parse_from(["diffscribe", "--debug", "-vvv"]);
        assert_eq!(cli.verbosity(), 3);

        let cli = Cli::parse_from(["diffscribe", "-v"]);
        assert_eq!(cli.verbosity(), 1);
    }

    #[test]
    fn summarize_takes_optional_from() {
        let cli = Cli::parse_from(["diffscribe", "summarize", "main"]);
        match cli.command {
            Some(Command::Summarize { base, from }) => {
                assert_eq!(base, "main");
                assert_eq!(from, None);
            }
            None => panic!("expected summarize subcommand"),
        }
    }

    #[test]
    fn notes_and_apply_parse_for_default_command() {
        let cli = Cli::parse_from(["diffscribe", "--notes", "closes #12", "--apply", "-y"]);
        assert_eq!(cli.notes.as_deref(), Some("closes #12"));
        assert!(cli.apply);
        assert!(cli.yes);
        assert!(cli.command.is_none());
    }
}
