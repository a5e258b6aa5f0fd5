use super::{ScriptedBackend, TestUtils};
use crate::intent::{IntentExecutor, HELP_TEXT, INTERRUPT_NOTICE};
use crate::ui::{Output, PanelKind};
use crate::workdir::tests::CWD_LOCK;
use pretty_assertions::assert_eq;
use std::env;
use std::time::{Duration, Instant};

async fn dispatch(session: &crate::Session<ScriptedBackend>, line: &str) -> Vec<Output> {
    let mut outputs = Vec::new();
    IntentExecutor::new(session).dispatch(line, &mut outputs).await;
    outputs
}

#[tokio::test]
async fn test_question_goes_to_the_model() {
    let session = TestUtils::session(ScriptedBackend::new(&["llama-a"]).reply("llama-a", "42"));

    let outputs = dispatch(&session, "?meaning of life").await;

    assert_eq!(outputs, vec![Output::Panel(PanelKind::Answer, "42".to_string())]);
    let calls = session.generator.backend().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].prompt, "meaning of life");
    assert_eq!(calls[0].max_tokens, 1024);
}

#[tokio::test]
async fn test_explain_uses_one_line_template() {
    let session = TestUtils::session(
        ScriptedBackend::new(&["llama-a"]).reply("llama-a", "Lists all files in long format."),
    );

    let outputs = dispatch(&session, "!explain ls -la").await;

    assert_eq!(
        outputs,
        vec![Output::Panel(
            PanelKind::Explanation,
            "Lists all files in long format.".to_string()
        )]
    );
    assert_eq!(
        session.generator.backend().calls()[0].prompt,
        "Explain this shell command in one line:\nls -la"
    );
}

#[tokio::test]
async fn test_git_keyword_never_reaches_the_network() {
    let session = TestUtils::session(ScriptedBackend::unreachable());

    let outputs = dispatch(&session, "!git log").await;

    assert_eq!(
        outputs,
        vec![Output::Panel(
            PanelKind::GitSuggestion,
            "git log --oneline -n 10".to_string()
        )]
    );
    assert!(session.generator.backend().calls().is_empty());
    assert_eq!(session.generator.backend().listings(), 0);
}

#[tokio::test]
async fn test_total_model_failure_is_shown_not_raised() {
    let session = TestUtils::session(ScriptedBackend::new(&["llama-a", "llama-b"]));

    let outputs = dispatch(&session, "?anything").await;

    match outputs.as_slice() {
        [Output::Panel(PanelKind::Answer, text)] => {
            assert!(text.starts_with("Error: All models failed"));
        }
        other => panic!("unexpected outputs {:?}", other),
    }
}

#[tokio::test]
async fn test_help_and_models() {
    let session = TestUtils::session(ScriptedBackend::new(&["llama-a", "whisper", "gemma-b"]));

    assert_eq!(
        dispatch(&session, "!help").await,
        vec![Output::Panel(PanelKind::Help, HELP_TEXT.to_string())]
    );
    assert_eq!(
        dispatch(&session, "!models").await,
        vec![Output::Panel(
            PanelKind::Models,
            "• llama-a\n• gemma-b".to_string()
        )]
    );

    let offline = TestUtils::session(ScriptedBackend::unreachable());
    assert_eq!(
        dispatch(&offline, "!models").await,
        vec![Output::Failure("No models available".to_string())]
    );
}

#[test]
fn test_invalid_cd_reports_and_continues() {
    let _guard = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let before = env::current_dir().unwrap();
    let session = TestUtils::session(ScriptedBackend::unreachable());

    let outputs = tokio_test::block_on(dispatch(&session, "cd /no/such/dir/anywhere"));

    match outputs.as_slice() {
        [Output::Failure(message)] => assert!(message.contains("/no/such/dir/anywhere")),
        other => panic!("unexpected outputs {:?}", other),
    }
    assert_eq!(env::current_dir().unwrap(), before);
}

#[cfg(unix)]
#[tokio::test]
async fn test_successful_command_asks_for_nothing() {
    let session = TestUtils::session(ScriptedBackend::new(&["llama-a"]));

    let outputs = dispatch(&session, "echo hello").await;

    assert_eq!(outputs, vec![Output::Stdout("hello\n".to_string())]);
    assert!(session.generator.backend().calls().is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn test_failed_command_requests_exactly_one_fix() {
    let session = TestUtils::session(
        ScriptedBackend::new(&["llama-a"]).reply("llama-a", "  ls -la /tmp \n"),
    );

    let outputs = dispatch(&session, "echo 'no such option' >&2; exit 2").await;

    assert_eq!(
        outputs,
        vec![
            Output::Stderr("no such option\n".to_string()),
            Output::Panel(PanelKind::Fix, "ls -la /tmp".to_string()),
        ]
    );
    let calls = session.generator.backend().calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0]
        .prompt
        .contains("Command: echo 'no such option' >&2; exit 2"));
    assert!(calls[0].prompt.contains("Error: no such option"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_unmatched_prefix_runs_in_the_shell() {
    let session = TestUtils::session(ScriptedBackend::unreachable());

    let outputs = dispatch(&session, "cdrom_test_marker 2>/dev/null || echo fell-through").await;

    assert_eq!(outputs, vec![Output::Stdout("fell-through\n".to_string())]);
}

#[cfg(unix)]
#[tokio::test]
async fn test_interrupt_abandons_running_command() {
    let session = TestUtils::session(ScriptedBackend::new(&["llama-a"]).reply("llama-a", "fixed"));
    let executor = IntentExecutor::new(&session);
    let mut outputs = Vec::new();
    let started = Instant::now();

    let completed = executor
        .dispatch_until(
            "sleep 5; echo done",
            &mut outputs,
            tokio::time::sleep(Duration::from_millis(200)),
        )
        .await;

    assert!(!completed);
    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(
        outputs,
        vec![Output::Panel(PanelKind::Notice, INTERRUPT_NOTICE.to_string())]
    );
    assert!(session.generator.backend().calls().is_empty());

    let completed = executor
        .dispatch_until("echo still-here", &mut outputs, std::future::pending())
        .await;
    assert!(completed);
    assert_eq!(outputs.last(), Some(&Output::Stdout("still-here\n".to_string())));
}

#[cfg(unix)]
#[tokio::test]
async fn test_child_killed_by_ctrl_c_gets_no_fix() {
    let session = TestUtils::session(ScriptedBackend::new(&["llama-a"]).reply("llama-a", "fixed"));

    let outputs = dispatch(&session, "kill -INT $$").await;

    assert_eq!(
        outputs,
        vec![Output::Panel(PanelKind::Notice, INTERRUPT_NOTICE.to_string())]
    );
    assert!(session.generator.backend().calls().is_empty());
}
