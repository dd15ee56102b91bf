mod cli_args;
mod config;
mod diff;
mod error;
mod extract;
mod generate;
mod git;
mod llm;
mod logging;
mod setup;
mod tokens;
mod ui;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use crate::cli_args::{Cli, Command};
use crate::config::Config;
use crate::generate::Generator;
use crate::llm::prompt_builder::render_commit_log;
use crate::ui::{AutoConfirm, Confirm, TerminalConfirm, TerminalReporter};

fn print_preview(title: &str, body: &str) {
    let rule = "-".repeat(title.len() + 12);
    println!();
    println!("{}", format!("----- {title} -----").bold());
    println!("{body}");
    println!("{}", rule.bold());
}

/// Default mode: commit message from the entire staged diff.
fn run_commit(cli: &Cli, generator: &Generator<'_>) -> Result<()> {
    let diff = git::staged_diff()?;

    if diff.trim().is_empty() {
        println!("No staged changes found.");
        return Ok(());
    }

    let commit_message = generator.generate_commit_message(&diff, cli.notes.as_deref())?;
    if commit_message.is_empty() {
        eprintln!("{}", "No commit message produced.".red());
        return Ok(());
    }

    print_preview("Commit Message Preview", &commit_message);

    if cli.apply {
        git::write_commit_editmsg(&commit_message)?;
        println!("{}", "Message written to .git/COMMIT_EDITMSG".green());
    }

    Ok(())
}

/// Summarize mode: release notes for the commits in base..from.
fn run_summarize(generator: &Generator<'_>, base: &str, from_opt: Option<&str>) -> Result<()> {
    let from_branch = match from_opt {
        Some(name) => name.to_string(),
        None => git::current_branch()?,
    };

    let entries = git::collect_log(base, &from_branch)?;
    if entries.is_empty() {
        println!("No commits found between {base} and {from_branch}.");
        return Ok(());
    }
    log::debug!("Found {} commits in {base}..{from_branch}", entries.len());

    let text = render_commit_log(base, &from_branch, &entries);
    if let Some(summary) = generator.generate_summary(&text) {
        print_preview("Release Notes Preview", &summary);
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbosity());

    let cfg = Config::from_sources(&cli)?;
    let client = setup::build_chat_client(&cfg)?;

    let confirm: Box<dyn Confirm> = if cli.yes {
        Box::new(AutoConfirm)
    } else {
        Box::new(TerminalConfirm)
    };
    let reporter = TerminalReporter::new();

    let generator = Generator::new(
        cfg.generation.clone(),
        client.as_ref(),
        confirm.as_ref(),
        &reporter,
    );

    match &cli.command {
        Some(Command::Summarize { base, from }) => run_summarize(&generator, base, from.as_deref()),
        None => run_commit(&cli, &generator),
    }
}
