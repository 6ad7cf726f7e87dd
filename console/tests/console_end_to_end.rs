// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Drives a whole [`Console`] the way a host would: key by key.

use std::{sync::Arc, time::Duration};

use pretty_assertions::assert_eq;
use termline::{CommandTable, CommonError, CommonErrorType, CompletionOutcome, Console,
               ConsoleConfig, DomKeyEvent, EditorEvent, ErrorHandler, EventDisposition,
               Fragment, History, HistoryStore, IgnoreReason, InMemoryTranscript, KeyPress,
               SpecialKey, StdMutex, Submission, TranscriptStore, completion_provider,
               feed_key_stream, gen_key_stream, key_presses_for_submission,
               key_presses_for_text, keypress};

fn focused(console: Console) -> Console {
    let mut console = console;
    console.set_focused(true);
    console
}

async fn type_text(console: &mut Console, text: &str) {
    feed_key_stream(console, gen_key_stream(key_presses_for_text(text)))
        .await
        .unwrap();
}

async fn submit(console: &mut Console, text: &str) {
    feed_key_stream(console, gen_key_stream(key_presses_for_submission(text)))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_echo_entry_has_prompt_line_and_output() {
    let commands = CommandTable::default()
        .with_dynamic("echo", |args| async move { Ok(Fragment::from(args)) });
    let transcript = Arc::new(StdMutex::new(InMemoryTranscript::default()));
    let mut console = focused(
        Console::new(ConsoleConfig::default(), commands).with_transcript(transcript.clone()),
    );

    submit(&mut console, "echo hi").await;

    let entries = transcript.lock().unwrap().get().entries;
    assert_eq!(
        entries,
        vec![Fragment::Group(vec![
            Fragment::Prompt("$ ".into()),
            Fragment::Input("echo hi".into()),
            Fragment::LineBreak,
            Fragment::from("hi"),
            Fragment::LineBreak,
        ])]
    );
}

#[tokio::test]
async fn test_unknown_command_uses_static_error_handler() {
    let commands = CommandTable::default()
        .with_error_handler(ErrorHandler::Static(Fragment::from("??")));
    let mut console = focused(Console::new(ConsoleConfig::default(), commands));

    submit(&mut console, "foo").await;

    assert_eq!(console.transcript_text().unwrap(), "$ \nfoo\n??");
}

#[tokio::test]
async fn test_default_handler_sees_transcript_before_entry() {
    let commands = CommandTable::default()
        .with_static("about", "termline")
        .with_default_handler(|name, args, transcript| async move {
            Ok(Fragment::from(format!(
                "{name}({args}) after {} lines",
                transcript.lines().count()
            )))
        });
    let mut console = focused(Console::new(ConsoleConfig::default(), commands));

    submit(&mut console, "about").await;
    submit(&mut console, "count  a   b").await;

    assert_eq!(
        console.transcript_text().unwrap(),
        "$ \nabout\ntermline\n$ \ncount  a   b\ncount(a b) after 3 lines"
    );
}

#[tokio::test]
async fn test_clear_empties_transcript_and_line() {
    let commands = CommandTable::default().with_static("about", "termline");
    let mut console = focused(Console::new(ConsoleConfig::default(), commands));

    submit(&mut console, "about").await;
    submit(&mut console, "clear").await;

    assert_eq!(console.transcript_text().unwrap(), "");
    let view = console.view().unwrap();
    assert_eq!(view.current_line.before_caret, "");
    assert_eq!(view.current_line.after_caret, "");
    assert_eq!(view.candidates, "");
    assert!(!view.current_line.busy);
}

#[tokio::test]
async fn test_empty_submission_has_no_output() {
    let commands = CommandTable::default()
        .with_error_handler(ErrorHandler::Static(Fragment::from("??")));
    let mut console = focused(Console::new(ConsoleConfig::default(), commands));

    submit(&mut console, "").await;

    assert_eq!(console.transcript_text().unwrap(), "$ ");
}

#[tokio::test]
async fn test_blank_submission_reaches_error_handler() {
    let commands = CommandTable::default()
        .with_error_handler(ErrorHandler::Static(Fragment::from("??")));
    let mut console = focused(Console::new(ConsoleConfig::default(), commands));

    submit(&mut console, "   ").await;

    assert_eq!(console.transcript_text().unwrap(), "$ \n   \n??");
}

#[tokio::test]
async fn test_blank_submission_reaches_default_handler_with_empty_name() {
    let commands = CommandTable::default()
        .with_default_handler(|name, args, _| async move {
            Ok(Fragment::from(format!("[{name}][{args}]")))
        })
        .with_error_handler(ErrorHandler::Static(Fragment::from("??")));
    let mut console = focused(Console::new(ConsoleConfig::default(), commands));

    submit(&mut console, "   ").await;

    assert_eq!(console.transcript_text().unwrap(), "$ \n   \n[][]");
}

#[tokio::test]
async fn test_handler_failure_returns_to_editing() {
    let commands = CommandTable::default().with_dynamic("fail", |_| async {
        CommonError::new_error_result(CommonErrorType::CommandExecutionError, "exploded")
    });
    let mut console = focused(Console::new(ConsoleConfig::default(), commands));

    submit(&mut console, "fail").await;

    assert_eq!(console.transcript_text().unwrap(), "$ \nfail\nfail: exploded");
    assert!(!console.session().is_busy());

    // Still editable.
    type_text(&mut console, "x").await;
    assert_eq!(console.session().buffer(), "x");
}

#[tokio::test]
async fn test_tab_completion_single_and_many() {
    let provider = completion_provider(|line: String| async move {
        Ok(match line.as_str() {
            "run bui" => vec!["build".to_string()],
            _ => vec!["build".to_string(), "bundle".to_string()],
        })
    });
    let mut console = focused(
        Console::new(ConsoleConfig::default(), CommandTable::default())
            .with_completion_provider(provider),
    );

    type_text(&mut console, "run bui").await;
    console.handle_key(keypress!(@special SpecialKey::Tab)).await.unwrap();
    assert_eq!(console.session().buffer(), "run build");
    assert_eq!(console.session().caret(), 9);
    assert_eq!(console.session().candidates(), "");

    console.handle_key(keypress!(@special SpecialKey::Backspace)).await.unwrap();
    console.handle_key(keypress!(@special SpecialKey::Tab)).await.unwrap();
    assert_eq!(console.session().buffer(), "run buil");
    assert_eq!(console.session().candidates(), "build bundle");

    // Typing clears the candidates.
    type_text(&mut console, "d").await;
    assert_eq!(console.session().candidates(), "");
}

#[tokio::test]
async fn test_tab_without_provider_clears_candidates() {
    let mut console = focused(Console::new(ConsoleConfig::default(), CommandTable::default()));
    type_text(&mut console, "abc").await;
    console.handle_key(keypress!(@special SpecialKey::Tab)).await.unwrap();
    assert_eq!(console.session().buffer(), "abc");
    assert_eq!(console.session().candidates(), "");
}

#[tokio::test]
async fn test_stale_completion_is_dropped() {
    let provider = completion_provider(|_| async { Ok(vec!["build".to_string()]) });
    let mut console = focused(
        Console::new(ConsoleConfig::default(), CommandTable::default())
            .with_completion_provider(provider),
    );
    type_text(&mut console, "run bu").await;

    let EditorEvent::CompletionRequested(request) =
        console.dispatch_key(keypress!(@special SpecialKey::Tab)).unwrap()
    else {
        panic!("expected completion request");
    };

    // The user keeps typing before the provider answers.
    console.dispatch_key(keypress!(@char 'n')).unwrap();

    assert_eq!(console.complete(&request).await, CompletionOutcome::Stale);
    assert_eq!(console.session().buffer(), "run bun");
}

#[tokio::test]
async fn test_history_recall_and_every_line_is_recorded() {
    let history = Arc::new(StdMutex::new(History::default()));
    let mut console = focused(
        Console::new(ConsoleConfig::default(), CommandTable::default())
            .with_history(history.clone()),
    );

    // Up with empty history does nothing.
    type_text(&mut console, "draft").await;
    console.handle_key(keypress!(@special SpecialKey::Up)).await.unwrap();
    assert_eq!(console.session().buffer(), "draft");

    console.handle_key(keypress!(@special SpecialKey::Down)).await.unwrap();
    submit(&mut console, "ls").await;
    submit(&mut console, "ls").await;
    submit(&mut console, "").await;
    assert_eq!(history.lock().unwrap().entries, ["", "ls", "ls"]);

    console.handle_key(keypress!(@special SpecialKey::Up)).await.unwrap();
    assert_eq!(console.session().buffer(), "");
    console.handle_key(keypress!(@special SpecialKey::Up)).await.unwrap();
    assert_eq!(console.session().buffer(), "ls");
    assert_eq!(console.session().caret(), 2);

    // Every submission resets the walk.
    history.lock().unwrap().append_command("pwd");
    assert_eq!(history.lock().unwrap().previous_command().as_deref(), Some("pwd"));
}

#[tokio::test]
async fn test_caret_edges() {
    let mut console = focused(Console::new(ConsoleConfig::default(), CommandTable::default()));
    type_text(&mut console, "ab").await;

    for _ in 0..4 {
        console.handle_key(keypress!(@special SpecialKey::Left)).await.unwrap();
    }
    assert_eq!(console.session().caret(), 0);

    console.handle_key(keypress!(@special SpecialKey::Backspace)).await.unwrap();
    assert_eq!(console.session().buffer(), "ab");

    for _ in 0..4 {
        console.handle_key(keypress!(@special SpecialKey::Right)).await.unwrap();
    }
    assert_eq!(console.session().caret(), 2);
}

#[tokio::test]
async fn test_input_disabled_ignores_everything() {
    let config = ConsoleConfig::default().with_enable_input(false);
    let mut console = focused(Console::new(config, CommandTable::default()));
    let event = console.handle_key(keypress!(@char 'a')).await.unwrap();
    assert_eq!(event, EditorEvent::Ignored(IgnoreReason::InputDisabled));
}

#[tokio::test]
async fn test_spawned_command_keeps_console_responsive() {
    let commands = CommandTable::default().with_dynamic("sleep", |args| async move {
        let millis = args.parse::<u64>().unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(millis)).await;
        Ok(Fragment::from("done"))
    });
    let mut console = focused(Console::new(ConsoleConfig::default(), commands));
    for key in key_presses_for_text("sleep 30") {
        console.dispatch_key(key).unwrap();
    }

    let EditorEvent::Submitted(ticket) =
        console.dispatch_key(keypress!(@special SpecialKey::Enter)).unwrap()
    else {
        panic!("expected submission");
    };
    let Submission::Pending(pending) = console.begin_submission(ticket).unwrap() else {
        panic!("expected pending command");
    };
    let handle = tokio::spawn(pending.execute());

    // Keys typed while the command runs are rejected, not queued.
    assert_eq!(
        console.dispatch_key(keypress!(@char 'x')).unwrap(),
        EditorEvent::Ignored(IgnoreReason::Busy)
    );
    assert_eq!(console.view().unwrap().current_line.before_caret, "");

    let outcome = handle.await.unwrap();
    assert!(console.finish_submission(outcome).unwrap());
    assert_eq!(console.transcript_text().unwrap(), "$ \nsleep 30\ndone");
    assert!(!console.session().is_busy());
}

#[test]
fn test_browser_modifier_only_keys_are_consumed() {
    let mut console = focused(Console::new(ConsoleConfig::default(), CommandTable::default()));

    for name in ["Shift", "Control", "MediaPlayPause"] {
        let key_press = KeyPress::from(DomKeyEvent::new(name));
        let event = console.dispatch_key(key_press).unwrap();
        assert_eq!(event, EditorEvent::Unhandled(key_press));
        assert_eq!(event.disposition(), EventDisposition::Consumed);
    }
    assert_eq!(console.session().buffer(), "");

    console.set_focused(false);
    let event = console
        .dispatch_key(KeyPress::from(DomKeyEvent::new("Shift")))
        .unwrap();
    assert_eq!(event.disposition(), EventDisposition::PassThrough);
}
