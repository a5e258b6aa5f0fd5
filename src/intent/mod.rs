mod executor;
mod matcher;

pub use self::executor::{IntentExecutor, HELP_TEXT, INTERRUPT_NOTICE};
pub use self::matcher::{IntentMatcher, Matcher, Route, ROUTES};

/// What one input line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandIntent {
    AiQuery(String),
    Explain(String),
    Git(Vec<String>),
    Find(String),
    ChangeDir(String),
    Scaffold,
    Help,
    ListModels,
    Shell(String),
}
