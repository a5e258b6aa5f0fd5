use colored::Colorize;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;

/// Helper names offered after `cmd:`.
pub const HELPER_COMMANDS: &[&str] = &["explain", "git", "find", "help"];

const HELPER_PREFIX: &str = "cmd:";

#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub replacement: String,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Replace the text from `start` up to the cursor with a suggestion.
    Replace {
        start: usize,
        suggestions: Vec<Suggestion>,
    },
    /// Complete a filesystem path relative to the working directory.
    Paths,
}

/// Completions for the text before the cursor.
pub fn suggest(before_cursor: &str) -> Completion {
    if before_cursor.starts_with('?') {
        return Completion::Replace {
            start: 0,
            suggestions: vec![Suggestion {
                replacement: before_cursor.to_string(),
                display: "?Ask anything".to_string(),
            }],
        };
    }

    if let Some(partial) = before_cursor.strip_prefix(HELPER_PREFIX) {
        let suggestions = HELPER_COMMANDS
            .iter()
            .filter(|name| name.starts_with(partial))
            .map(|name| Suggestion {
                replacement: name[partial.len()..].to_string(),
                display: format!("{}{} - AI helper", HELPER_PREFIX, name),
            })
            .collect();
        return Completion::Replace {
            start: before_cursor.len(),
            suggestions,
        };
    }

    Completion::Paths
}

/// Line-editor glue: completions plus history hints.
pub struct ShellHelper {
    paths: FilenameCompleter,
    hinter: HistoryHinter,
}

impl ShellHelper {
    pub fn new() -> Self {
        Self {
            paths: FilenameCompleter::new(),
            hinter: HistoryHinter::new(),
        }
    }
}

impl Default for ShellHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        match suggest(&line[..pos]) {
            Completion::Replace { start, suggestions } => Ok((
                start,
                suggestions
                    .into_iter()
                    .map(|s| Pair {
                        display: s.display,
                        replacement: s.replacement,
                    })
                    .collect(),
            )),
            Completion::Paths => self.paths.complete(line, pos, ctx),
        }
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for ShellHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.dimmed().to_string())
    }
}

impl Validator for ShellHelper {}

impl Helper for ShellHelper {}
