// src/tools/git.rs
use super::clean_command;
use crate::ai::{ChatBackend, GenerationClient, CHAT_MAX_TOKENS};
use tracing::{debug, warn};

/// Requests answered without asking a model.
const SIMPLE_COMMANDS: &[(&str, &str)] = &[
    ("status", "git status"),
    ("log", "git log --oneline -n 10"),
    ("branch", "git branch -vv"),
    ("stash", "git stash list"),
    ("diff", "git diff --cached"),
];

pub fn canned_command(args: &[String]) -> Option<&'static str> {
    let first = args.first()?;
    SIMPLE_COMMANDS
        .iter()
        .find(|(keyword, _)| keyword == first)
        .map(|(_, command)| *command)
}

fn build_prompt(args: &[String]) -> String {
    format!(
        r#"
Convert this natural language Git request to a SINGLE executable Git command.
Return ONLY the command without any explanations or formatting.

Request: git {}

Command: git "#,
        args.join(" ")
    )
}

/// Prefixes `git ` unless the model already did.
pub fn normalize(answer: &str) -> String {
    if answer == "git" || answer.starts_with("git ") {
        answer.to_string()
    } else {
        format!("git {}", answer)
    }
}

/// Suggests one git command for a `!git` request.
pub async fn handle_git<B: ChatBackend>(args: &[String], generator: &GenerationClient<B>) -> String {
    if args.is_empty() {
        return "git status".to_string();
    }
    if let Some(command) = canned_command(args) {
        debug!(command, "canned git command");
        return command.to_string();
    }

    let fallback = format!("git {}", args.join(" "));
    match generator.try_generate(&build_prompt(args), CHAT_MAX_TOKENS).await {
        Ok(answer) => {
            let answer = clean_command(&answer);
            if answer.is_empty() {
                fallback
            } else {
                normalize(&answer)
            }
        }
        Err(e) => {
            warn!(error = %e, "git suggestion failed, using the request as typed");
            fallback
        }
    }
}
