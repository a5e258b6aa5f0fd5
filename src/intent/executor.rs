use super::{CommandIntent, IntentMatcher};
use crate::ai::ChatBackend;
use crate::executor::fix_prompt;
use crate::session::Session;
use crate::tools;
use crate::ui::{bullet_list, Output, OutputSink, PanelKind};
use crate::workdir;
use anyhow::Result;
use std::future::Future;
use tracing::debug;

pub const HELP_TEXT: &str = "\
COMMAND HELP
?<query>          - Ask Shellmate anything
!explain <cmd>    - Explain a shell command
!git <action>     - Smart git helper
!find <query>     - Natural language file search
!models           - List available AI models
!create           - Launch project generator (React, Node, Flask, etc.)
cd [path]         - Change directory (home when no path is given)
exit/quit         - Exit shell
Anything else runs in your shell; failures get a suggested fix.";

/// Shown when Ctrl-C stops a prompt or a running command.
pub const INTERRUPT_NOTICE: &str = "Use 'exit' to quit";

fn explain_prompt(command: &str) -> String {
    format!("Explain this shell command in one line:\n{}", command)
}

/// Runs classified input lines against a session.
pub struct IntentExecutor<'s, B> {
    session: &'s Session<B>,
}

impl<'s, B: ChatBackend> IntentExecutor<'s, B> {
    pub fn new(session: &'s Session<B>) -> Self {
        Self { session }
    }

    /// Classifies and handles one line. Errors never escape; they are
    /// shown as an error panel.
    pub async fn dispatch<S: OutputSink>(&self, line: &str, sink: &mut S) {
        let intent = IntentMatcher::analyze(line);
        debug!(?intent, "dispatching");

        if let Err(e) = self.execute(intent, sink).await {
            debug!(error = %e, "command failed");
            sink.emit(Output::Panel(
                PanelKind::Error,
                format!("Error: {}\nType !help for assistance", e),
            ));
        }
    }

    /// Runs [`dispatch`](Self::dispatch) until `interrupt` resolves. An
    /// interrupted line is abandoned (a running child is killed) and a
    /// notice is shown. Returns `false` when interrupted.
    pub async fn dispatch_until<S, I>(&self, line: &str, sink: &mut S, interrupt: I) -> bool
    where
        S: OutputSink,
        I: Future<Output = ()>,
    {
        let interrupted = tokio::select! {
            biased;
            _ = interrupt => true,
            _ = self.dispatch(line, sink) => false,
        };

        if interrupted {
            debug!(line, "interrupted");
            sink.emit(Output::Panel(PanelKind::Notice, INTERRUPT_NOTICE.to_string()));
        }
        !interrupted
    }

    pub async fn execute<S: OutputSink>(&self, intent: CommandIntent, sink: &mut S) -> Result<()> {
        let generator = &self.session.generator;

        match intent {
            CommandIntent::AiQuery(prompt) => {
                if prompt.is_empty() {
                    sink.emit(Output::Failure("Type a question after '?'".to_string()));
                    return Ok(());
                }
                let answer = generator.chat(&prompt).await;
                sink.emit(Output::Panel(PanelKind::Answer, answer));
            }
            CommandIntent::Explain(command) => {
                if command.is_empty() {
                    sink.emit(Output::Failure("Usage: !explain <command>".to_string()));
                    return Ok(());
                }
                let explanation = generator.chat(&explain_prompt(&command)).await;
                sink.emit(Output::Panel(PanelKind::Explanation, explanation));
            }
            CommandIntent::Git(args) => {
                let suggestion = tools::handle_git(&args, generator).await;
                sink.emit(Output::Panel(PanelKind::GitSuggestion, suggestion));
            }
            CommandIntent::Find(query) => {
                let command =
                    tools::handle_find(&query, generator, self.session.shell_type).await;
                sink.emit(Output::Panel(PanelKind::FileSearch, command));
            }
            CommandIntent::ChangeDir(path) => match workdir::change_directory(&path) {
                Ok(_) => sink.emit(Output::Success(format!(
                    "Changed to {}",
                    workdir::display_current_dir()
                ))),
                Err(e) => sink.emit(Output::Failure(format!("Error: {:#}", e))),
            },
            CommandIntent::Scaffold => {
                if let Err(e) = tools::create_project() {
                    sink.emit(Output::Failure(format!(
                        "Error running project generator: {:#}",
                        e
                    )));
                }
            }
            CommandIntent::Help => {
                sink.emit(Output::Panel(PanelKind::Help, HELP_TEXT.to_string()));
            }
            CommandIntent::ListModels => {
                let models = generator.discover_models().await;
                if models.is_empty() {
                    sink.emit(Output::Failure("No models available".to_string()));
                } else {
                    sink.emit(Output::Panel(PanelKind::Models, bullet_list(&models)));
                }
            }
            CommandIntent::Shell(command) => self.run_shell(&command, sink).await?,
        }

        Ok(())
    }

    async fn run_shell<S: OutputSink>(&self, command: &str, sink: &mut S) -> Result<()> {
        let result = self.session.executor.run(command).await?;

        if !result.stdout.is_empty() {
            sink.emit(Output::Stdout(result.stdout.clone()));
        }
        if !result.stderr.is_empty() {
            sink.emit(Output::Stderr(result.stderr.clone()));
        }

        if result.interrupted {
            debug!("command interrupted, no fix requested");
            sink.emit(Output::Panel(PanelKind::Notice, INTERRUPT_NOTICE.to_string()));
        } else if !result.success() {
            debug!(exit_code = result.exit_code, "requesting a fix");
            let fix = self.session.generator.chat(&fix_prompt(command, &result)).await;
            sink.emit(Output::Panel(PanelKind::Fix, fix.trim().to_string()));
        }
        Ok(())
    }
}
