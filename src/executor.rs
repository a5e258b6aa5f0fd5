// src/executor.rs
use crate::shell::ShellType;
use anyhow::{Context, Result};
use std::process::ExitStatus;
use tokio::process::Command;
use tracing::debug;

/// Exit status a POSIX shell reports for a child killed by SIGINT.
const SIGINT_EXIT_CODE: i32 = 130;

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    /// `-1` when the child was terminated by a signal.
    pub exit_code: i32,
    /// The child was stopped by Ctrl-C.
    pub interrupted: bool,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

pub struct ShellExecutor {
    shell_type: ShellType,
}

impl ShellExecutor {
    pub fn new(shell_type: ShellType) -> Self {
        Self { shell_type }
    }

    /// Runs `command` through the platform interpreter and waits for it.
    /// Dropping the returned future kills the child.
    pub async fn run(&self, command: &str) -> Result<ExecutionResult> {
        let (shell, args) = self.shell_type.get_shell_command();
        debug!(shell, command, "executing");

        let output = Command::new(shell)
            .args(args)
            .arg(command)
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("Failed to start {}", shell))?;

        let exit_code = output.status.code().unwrap_or(-1);
        let result = ExecutionResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code,
            interrupted: exit_code == SIGINT_EXIT_CODE || killed_by_sigint(&output.status),
        };
        debug!(exit_code = result.exit_code, "command finished");
        Ok(result)
    }
}

#[cfg(unix)]
fn killed_by_sigint(status: &ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    const SIGINT: i32 = 2;
    status.signal() == Some(SIGINT)
}

#[cfg(not(unix))]
fn killed_by_sigint(_status: &ExitStatus) -> bool {
    false
}

/// Prompt asking the model to repair a failed command.
pub fn fix_prompt(command: &str, result: &ExecutionResult) -> String {
    format!(
        "Fix this shell error concisely:\n\
         Command: {}\n\
         Error: {}\n\
         Provide ONLY the corrected command",
        command, result.stderr
    )
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn executor() -> ShellExecutor {
        ShellExecutor::new(ShellType::Posix)
    }

    #[tokio::test]
    async fn test_captures_stdout() {
        let result = executor().run("echo hello").await.unwrap();
        assert_eq!(result.stdout, "hello\n");
        assert_eq!(result.stderr, "");
        assert!(result.success());
    }

    #[tokio::test]
    async fn test_captures_stderr_and_exit_code() {
        let result = executor().run("echo oops >&2; exit 3").await.unwrap();
        assert_eq!(result.stderr, "oops\n");
        assert_eq!(result.exit_code, 3);
        assert!(!result.success());
        assert!(!result.interrupted);
    }

    #[tokio::test]
    async fn test_stderr_alone_is_not_failure() {
        let result = executor().run("echo warning >&2").await.unwrap();
        assert!(result.success());
    }

    #[tokio::test]
    async fn test_sigint_marks_result_interrupted() {
        let result = executor().run("kill -INT $$").await.unwrap();
        assert!(result.interrupted);
        assert!(!result.success());
    }

    #[tokio::test]
    async fn test_run_can_be_cancelled() {
        let started = std::time::Instant::now();
        let outcome = tokio::time::timeout(
            std::time::Duration::from_millis(200),
            executor().run("sleep 5"),
        )
        .await;
        assert!(outcome.is_err());
        assert!(started.elapsed() < std::time::Duration::from_secs(2));
    }

    #[test]
    fn test_fix_prompt_embeds_command_and_error() {
        let result = ExecutionResult {
            stdout: String::new(),
            stderr: "ls: cannot access 'nope'".to_string(),
            exit_code: 2,
            interrupted: false,
        };
        let prompt = fix_prompt("ls nope", &result);
        assert!(prompt.contains("Command: ls nope"));
        assert!(prompt.contains("Error: ls: cannot access 'nope'"));
        assert!(prompt.ends_with("Provide ONLY the corrected command"));
    }
}
