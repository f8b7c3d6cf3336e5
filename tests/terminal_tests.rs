//! End-to-end tests of the terminal engine on a paused tokio clock.
//!
//! With `start_paused = true` the runtime auto-advances time whenever every
//! task is asleep, so typing delays cost nothing while ordering between
//! overlapping runs stays exactly what a real clock would produce.

mod common;

use std::time::Duration;
use termfolio::{CommandOutcome, CursorMode, Key, KeyAction, Node, SequenceOutcome, ShadowChange};

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| (*line).to_string()).collect()
}

// ========================================================================
// Boot sequence
// ========================================================================

#[tokio::test(start_paused = true)]
async fn test_boot_types_banner_then_prompt() {
    let terminal = common::terminal();
    assert!(!terminal.input_enabled());
    assert_eq!(terminal.text(), "");

    let outcome = terminal.run_boot_sequence().await;

    assert_eq!(outcome, SequenceOutcome::Completed);
    assert_eq!(
        terminal.text(),
        common::booted_text(&common::config().boot_lines)
    );
    assert!(terminal.input_enabled());
    assert!(!terminal.is_typing());
    assert_eq!(
        terminal.with_surface(|surface| surface.cursor()),
        Some(CursorMode::Idle)
    );
    assert!(terminal.ansi().ends_with("$ _"));
}

#[tokio::test(start_paused = true)]
async fn test_input_is_disabled_while_booting() {
    let terminal = common::terminal();

    let observe = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        (
            terminal.input_enabled(),
            terminal.is_typing(),
            terminal.handle_key(Key::Char('x')),
            terminal.with_surface(|surface| surface.cursor()),
        )
    };
    let (outcome, (enabled, typing, action, cursor)) =
        tokio::join!(terminal.run_boot_sequence(), observe);

    assert_eq!(outcome, SequenceOutcome::Completed);
    assert!(!enabled);
    assert!(typing);
    assert_eq!(action, KeyAction::Ignored);
    assert_eq!(cursor, Some(CursorMode::Typing));
    assert_eq!(
        terminal.text(),
        common::booted_text(&common::config().boot_lines)
    );
}

#[tokio::test(start_paused = true)]
async fn test_boot_renders_links() {
    let terminal = common::terminal();
    terminal.run_boot_sequence().await;

    let html = terminal.html();
    assert!(html.contains(
        r#"<a href="mailto:hi@jared.sh" target="_blank" rel="noopener noreferrer">hi@jared.sh</a>"#
    ));
    assert!(html.contains(
        r#"<a href="https://github.com/jareddotsh" target="_blank" rel="noopener noreferrer">https://github.com/jareddotsh</a>"#
    ));
    assert!(html.ends_with(r#"<span class="cursor idle" aria-hidden="true"></span>"#));

    let ansi = terminal.ansi();
    assert!(ansi.contains("\x1b]8;;mailto:hi@jared.sh\x1b\\"));
}

#[tokio::test(start_paused = true)]
async fn test_empty_boot_still_arms_prompt() {
    let terminal = common::terminal_with_boot(&[]);
    assert_eq!(
        terminal.run_boot_sequence().await,
        SequenceOutcome::Completed
    );
    assert_eq!(terminal.text(), "\n\n$ ");
    assert!(terminal.input_enabled());
}

// ========================================================================
// Cancellation
// ========================================================================

#[tokio::test(start_paused = true)]
async fn test_newer_run_supersedes_older() {
    let terminal =
        common::terminal_with_boot(&["a fairly long line that takes a while to type out"]);
    let fresh = owned(&["fresh"]);

    let later = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        terminal.run_sequence(&fresh).await
    };
    let (first, second) = tokio::join!(terminal.run_boot_sequence(), later);

    assert_eq!(first, SequenceOutcome::Superseded);
    assert_eq!(second, SequenceOutcome::Completed);
    assert_eq!(terminal.text(), "fresh\n\n$ ");
    assert!(!terminal.is_typing());
    assert!(terminal.input_enabled());
}

#[tokio::test(start_paused = true)]
async fn test_rerun_during_command_output_leaves_single_prompt() {
    let terminal = common::terminal();
    terminal.run_boot_sequence().await;

    common::type_keys(&terminal, "about").await;
    let KeyAction::Submit(submission) = terminal.handle_key(Key::Enter) else {
        panic!("Enter at an armed prompt should submit");
    };

    let rerun = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        terminal.rerun().await
    };
    let (submitted, rerun) = tokio::join!(terminal.submit(submission), rerun);

    assert_eq!(submitted, CommandOutcome::Superseded);
    assert_eq!(rerun, SequenceOutcome::Completed);
    assert_eq!(
        terminal.text(),
        common::booted_text(&common::config().boot_lines)
    );
    assert!(terminal.input_enabled());
}

#[tokio::test(start_paused = true)]
async fn test_newer_run_supersedes_half_typed_link() {
    let url = "https://example.com/a/rather/long/path/to/somewhere";
    let line = format!("see {url}");
    let terminal = common::terminal_with_boot(&[line.as_str()]);
    let fresh = owned(&["fresh"]);

    // "see " takes at most 120 ms, the link at least 20 ms per character
    let later = async {
        tokio::time::sleep(Duration::from_millis(300)).await;
        let partial = terminal.with_surface(|surface| match surface.nodes().last() {
            Some(Node::Link(link)) => Some(link.text().to_string()),
            _ => None,
        });
        (partial, terminal.run_sequence(&fresh).await)
    };
    let (first, (partial, second)) = tokio::join!(terminal.run_boot_sequence(), later);

    let partial = partial.expect("link should be the tail node mid-reveal");
    assert!(!partial.is_empty());
    assert!(partial.len() < url.len());
    assert!(url.starts_with(&partial));

    assert_eq!(first, SequenceOutcome::Superseded);
    assert_eq!(second, SequenceOutcome::Completed);
    assert_eq!(terminal.text(), "fresh\n\n$ ");
    assert!(terminal.with_surface(|surface| {
        !surface
            .nodes()
            .iter()
            .any(|node| matches!(node, Node::Link(_)))
    }));
    assert!(!terminal.is_typing());
}

// ========================================================================
// Commands
// ========================================================================

#[tokio::test(start_paused = true)]
async fn test_help_prints_lines_then_prompt() {
    let terminal = common::terminal();
    terminal.run_boot_sequence().await;
    let booted = terminal.text();

    common::submit(&terminal, "help").await;

    let help = common::config().commands.help;
    assert_eq!(
        terminal.text(),
        format!("{booted}help\n{}\n$ ", help.join("\n"))
    );
    assert!(terminal.input_enabled());
    assert_eq!(terminal.input_text(), "");
}

#[tokio::test(start_paused = true)]
async fn test_commands_are_case_insensitive() {
    let lower = common::terminal();
    let upper = common::terminal();
    lower.run_boot_sequence().await;
    upper.run_boot_sequence().await;

    common::submit(&lower, "help").await;
    common::submit(&upper, "HELP").await;

    let lower_text = lower.text();
    let upper_text = upper.text();
    let lower_output = lower_text.split_once("$ help\n").map(|(_, out)| out);
    let upper_output = upper_text.split_once("$ HELP\n").map(|(_, out)| out);
    assert!(lower_output.is_some());
    assert_eq!(lower_output, upper_output);
}

#[tokio::test(start_paused = true)]
async fn test_blank_input_only_reprints_prompt() {
    let terminal = common::terminal();
    terminal.run_boot_sequence().await;
    let booted = terminal.text();

    // The submitted line's break, then a break before the new prompt
    common::submit(&terminal, "").await;
    assert_eq!(terminal.text(), format!("{booted}\n\n$ "));

    common::submit(&terminal, "   ").await;
    assert_eq!(terminal.text(), format!("{booted}\n\n$    \n\n$ "));
    assert!(terminal.input_enabled());
}

#[tokio::test(start_paused = true)]
async fn test_unknown_command_keeps_user_casing() {
    let terminal = common::terminal();
    terminal.run_boot_sequence().await;

    common::submit(&terminal, "FooBar").await;

    assert!(
        terminal
            .text()
            .ends_with("$ FooBar\ncommand not found: FooBar\n$ ")
    );
}

#[tokio::test(start_paused = true)]
async fn test_clear_is_idempotent_and_does_not_enable_input() {
    let terminal = common::terminal();
    let before = terminal.current_run();

    assert_eq!(terminal.execute("clear").await, CommandOutcome::Cleared);
    assert_eq!(terminal.execute("CLEAR").await, CommandOutcome::Cleared);

    assert!(terminal.with_surface(|surface| surface.is_empty()));
    assert!(!terminal.input_enabled());
    assert!(!terminal.is_typing());
    assert_eq!(terminal.current_run(), before);
}

#[tokio::test(start_paused = true)]
async fn test_clear_from_prompt_rearms_prompt() {
    let terminal = common::terminal();
    terminal.run_boot_sequence().await;

    common::submit(&terminal, "clear").await;

    assert_eq!(terminal.text(), "\n$ ");
    assert!(terminal.input_enabled());
}

#[tokio::test(start_paused = true)]
async fn test_restart_command_reruns_boot_with_single_prompt() {
    let terminal = common::terminal();
    terminal.run_boot_sequence().await;
    common::submit(&terminal, "help").await;
    let run_before = terminal.current_run();

    common::submit(&terminal, "./JARED.SH").await;

    assert_eq!(
        terminal.text(),
        common::booted_text(&common::config().boot_lines)
    );
    assert!(terminal.current_run() > run_before);
    assert!(terminal.input_enabled());
}

#[tokio::test(start_paused = true)]
async fn test_keys_are_ignored_while_command_types() {
    let terminal = common::terminal();
    terminal.run_boot_sequence().await;

    common::type_keys(&terminal, "contact").await;
    let KeyAction::Submit(submission) = terminal.handle_key(Key::Enter) else {
        panic!("Enter at an armed prompt should submit");
    };

    let observe = async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        (
            terminal.handle_key(Key::Char('z')),
            terminal.handle_key(Key::Backspace),
            terminal.handle_shadow_change("zz"),
        )
    };
    let (outcome, (typed, erased, shadow)) = tokio::join!(terminal.submit(submission), observe);

    assert_eq!(outcome, CommandOutcome::Printed);
    assert_eq!(typed, KeyAction::Ignored);
    assert_eq!(erased, KeyAction::Ignored);
    assert_eq!(shadow, ShadowChange::default());
    assert!(!terminal.text().contains('z'));
}

// ========================================================================
// Input buffer
// ========================================================================

#[tokio::test(start_paused = true)]
async fn test_backspace_removes_exactly_one_echoed_char() {
    let terminal = common::terminal();
    terminal.run_boot_sequence().await;
    let booted = terminal.text();

    common::type_keys(&terminal, "helpx").await;
    assert_eq!(terminal.input_text(), "helpx");
    assert_eq!(
        terminal.with_surface(|surface| surface.cursor()),
        Some(CursorMode::Typing)
    );

    assert_eq!(
        terminal.press(Key::Backspace).await,
        KeyAction::Erased(Some('x'))
    );
    assert_eq!(terminal.input_text(), "help");
    assert_eq!(terminal.text(), format!("{booted}help"));

    for _ in 0..4 {
        terminal.press(Key::Backspace).await;
    }
    assert_eq!(terminal.press(Key::Backspace).await, KeyAction::Erased(None));
    assert_eq!(terminal.input_text(), "");
    assert_eq!(terminal.text(), booted);
}

#[tokio::test(start_paused = true)]
async fn test_control_and_unhandled_keys_are_ignored() {
    let terminal = common::terminal();
    terminal.run_boot_sequence().await;
    let generation = terminal.generation();

    assert_eq!(terminal.handle_key(Key::Char('\t')), KeyAction::Ignored);
    assert_eq!(terminal.handle_key(Key::Other), KeyAction::Ignored);
    assert_eq!(terminal.generation(), generation);
}

#[tokio::test(start_paused = true)]
async fn test_shadow_field_reconciles_by_common_prefix() {
    let terminal = common::terminal();
    terminal.run_boot_sequence().await;
    let booted = terminal.text();

    let change = terminal.handle_shadow_change("hel");
    assert_eq!(change, ShadowChange { erased: 0, appended: 3 });

    let change = terminal.handle_shadow_change("he");
    assert_eq!(change, ShadowChange { erased: 1, appended: 0 });

    // Autocorrect-style replacement
    let change = terminal.handle_shadow_change("ab");
    assert_eq!(change, ShadowChange { erased: 2, appended: 2 });
    assert_eq!(terminal.input_text(), "ab");
    assert_eq!(terminal.text(), format!("{booted}ab"));

    // Control characters never reach the buffer
    let change = terminal.handle_shadow_change("ab\t");
    assert!(change.is_empty());
    assert_eq!(terminal.input_text(), "ab");
}

#[tokio::test(start_paused = true)]
async fn test_shadow_field_then_enter_submits_buffer() {
    let terminal = common::terminal();
    terminal.run_boot_sequence().await;

    terminal.handle_shadow_change("ls");
    terminal.press(Key::Enter).await;

    assert!(terminal.text().ends_with("$ ls\njared.sh\n$ "));
}

#[tokio::test(start_paused = true)]
async fn test_echoed_chars_track_buffer_through_edits() {
    let terminal = common::terminal();
    terminal.run_boot_sequence().await;

    let script = [
        Key::Char('a'),
        Key::Char('b'),
        Key::Char('c'),
        Key::Backspace,
        Key::Backspace,
        Key::Char('d'),
        Key::Char('é'),
        Key::Backspace,
        Key::Backspace,
        Key::Backspace,
        Key::Backspace,
        Key::Backspace,
        Key::Char('x'),
        Key::Char('y'),
        Key::Char('z'),
        Key::Backspace,
    ];
    for key in script {
        terminal.press(key).await;
        assert_eq!(
            terminal.with_surface(|surface| surface.input_char_count()),
            terminal.input_text().chars().count(),
            "after {key:?}"
        );
    }
    assert_eq!(terminal.input_text(), "xy");
    assert!(terminal.text().ends_with("$ xy"));
}

#[tokio::test(start_paused = true)]
async fn test_shadow_edits_after_rerun_start_from_empty_field() {
    let terminal = common::terminal();
    terminal.run_boot_sequence().await;
    let booted = terminal.text();

    terminal.handle_shadow_change("he");
    assert_eq!(terminal.input_text(), "he");

    terminal.rerun().await;
    assert_eq!(terminal.input_text(), "");
    assert_eq!(terminal.text(), booted);

    // The field is emptied alongside the buffer, so the next keystroke is
    // a single character
    let change = terminal.handle_shadow_change("l");
    assert_eq!(change, ShadowChange { erased: 0, appended: 1 });
    assert_eq!(terminal.input_text(), "l");
    assert_eq!(terminal.text(), format!("{booted}l"));
}

#[tokio::test(start_paused = true)]
async fn test_shadow_field_extends_physically_typed_buffer() {
    let terminal = common::terminal();
    terminal.run_boot_sequence().await;

    // Keys from the physical keyboard; the field is then set to the buffer
    common::type_keys(&terminal, "he").await;
    let change = terminal.handle_shadow_change("hel");

    assert_eq!(change, ShadowChange { erased: 0, appended: 1 });
    assert_eq!(terminal.input_text(), "hel");
    assert!(terminal.text().ends_with("$ hel"));
}
