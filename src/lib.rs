pub mod ai;
pub mod completion;
pub mod config;
pub mod executor;
pub mod intent;
pub mod session;
pub mod shell;
pub mod tools;
pub mod ui;
pub mod workdir;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use ai::{ChatBackend, GenerationClient, OpenAiBackend};
pub use config::Config;
pub use executor::{ExecutionResult, ShellExecutor};
pub use intent::{CommandIntent, IntentExecutor, IntentMatcher};
pub use session::Session;
pub use shell::ShellType;
