// src/tools/mod.rs
pub mod file_search;
pub mod git;
pub mod scaffold;

pub use file_search::handle_find;
pub use git::handle_git;
pub use scaffold::create_project;

/// Whether `program` can be found on `PATH`.
pub fn is_available(program: &str) -> bool {
    which::which(program).is_ok()
}

/// Strips markdown code fences and inline backticks from a model answer.
pub fn clean_command(answer: &str) -> String {
    let answer = answer.trim();
    let answer = match answer.strip_prefix("```") {
        Some(fenced) => {
            // Drop an optional language tag on the opening fence
            let body = fenced.split_once('\n').map_or("", |(_, body)| body);
            body.trim_end().trim_end_matches("```")
        }
        None => answer,
    };
    answer.trim().trim_matches('`').trim().to_string()
}
