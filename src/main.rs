use anyhow::Result;
use clap::Parser;
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config as EditorConfig, EditMode, Editor};
use shellmate::completion::ShellHelper;
use shellmate::ui::{Output, OutputSink, Panel, PanelKind, Terminal};
use shellmate::intent::INTERRUPT_NOTICE;
use shellmate::{config, workdir, Config, IntentExecutor, Session};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shellmate", version, about = "Interactive shell with AI suggestions")]
struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "shellmate=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("SHELLMATE_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config::get_config_path()?,
    };

    let mut config = Config::ensure_config_exists(&config_path)?;
    config.apply_env_overrides();
    config.validate()?;
    debug!(path = ?config_path, base_url = %config.base_url, "configuration loaded");
    Ok(config)
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        debug!(error = %e, "could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

fn prompt() -> String {
    format!("shellmate {}> ", workdir::display_current_dir())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenv::dotenv().ok();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let session = Session::from_config(config)?;
    let executor = IntentExecutor::new(&session);
    let mut terminal = Terminal;

    let editor_config = EditorConfig::builder()
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .auto_add_history(true)
        .build();
    let mut editor: Editor<ShellHelper, DefaultHistory> = Editor::with_config(editor_config)?;
    editor.set_helper(Some(ShellHelper::new()));

    let history_path = if session.config.history {
        config::get_history_path().ok()
    } else {
        None
    };
    if let Some(path) = &history_path {
        if editor.load_history(path).is_err() {
            debug!(path = ?path, "no previous history");
        }
    }

    let cwd = workdir::display_current_dir();
    println!(
        "{}",
        Panel::new(Some("Shellmate"), Color::Magenta)
            .subtitle(&cwd)
            .render("Your AI shell companion (type !help for commands)")
    );

    loop {
        match editor.readline(&prompt()) {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
                    println!("{}", "Goodbye!".green());
                    break;
                }
                executor.dispatch_until(input, &mut terminal, ctrl_c()).await;
            }
            Err(ReadlineError::Interrupted) => {
                terminal.emit(Output::Panel(
                    PanelKind::Notice,
                    INTERRUPT_NOTICE.to_string(),
                ));
            }
            Err(ReadlineError::Eof) => {
                println!("\n{}", "Goodbye!".green());
                break;
            }
            Err(e) => {
                warn!(error = %e, "line editor failed");
                eprintln!("{}: {}", "Error".red().bold(), e);
                break;
            }
        }
    }

    if let Some(path) = &history_path {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if let Err(e) = editor.save_history(path) {
            warn!(error = %e, "could not save history");
        }
    }

    Ok(())
}
