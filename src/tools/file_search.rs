use super::clean_command;
use crate::ai::{ChatBackend, GenerationClient};
use crate::shell::ShellType;
use tracing::warn;

const FIND_MAX_TOKENS: u32 = 256;

pub const USAGE: &str = "Usage: !find <description of the files you are looking for>";

fn build_prompt(query: &str, shell_type: ShellType) -> String {
    format!(
        "Convert this natural language file search into a SINGLE command for {}.\n\
         Search from the current directory. Prefer `find` on POSIX shells,\n\
         `Get-ChildItem -Recurse` on PowerShell and `dir /s /b` on Command Prompt.\n\
         Return ONLY the command without any explanations or formatting.\n\
         \n\
         Request: {}",
        shell_type.get_shell_name(),
        query
    )
}

/// Name-based search used when no model can help.
pub fn fallback_command(query: &str, shell_type: ShellType) -> String {
    match shell_type {
        ShellType::Posix => format!("find . -iname \"*{}*\"", query),
        ShellType::PowerShell => format!("Get-ChildItem -Recurse -Filter \"*{}*\"", query),
        ShellType::Cmd => format!("dir /s /b \"*{}*\"", query),
    }
}

/// Suggests a search command for a `!find` description. Never runs it.
pub async fn handle_find<B: ChatBackend>(
    query: &str,
    generator: &GenerationClient<B>,
    shell_type: ShellType,
) -> String {
    let query = query.trim();
    if query.is_empty() {
        return USAGE.to_string();
    }

    match generator
        .try_generate(&build_prompt(query, shell_type), FIND_MAX_TOKENS)
        .await
    {
        Ok(answer) => {
            let command = clean_command(&answer);
            if command.is_empty() {
                fallback_command(query, shell_type)
            } else {
                command
            }
        }
        Err(e) => {
            warn!(error = %e, "file search suggestion failed");
            fallback_command(query, shell_type)
        }
    }
}
