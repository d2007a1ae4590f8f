use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

// Include binary-crate modules via path for testing.
#[path = "../src/app.rs"]
mod app;
#[path = "../src/command.rs"]
mod command;
#[path = "../src/effects.rs"]
mod effects;
#[path = "../src/sections/mod.rs"]
mod sections;
#[path = "../src/stepflow.rs"]
mod stepflow;
#[path = "../src/ui.rs"]
mod ui;
#[path = "../src/widgets/mod.rs"]
mod widgets;

use sections::finance::FinanceTab;
use sections::funding::FundingView;
use sections::plan::PlanTab;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

#[test]
fn app_new_hydrates_seed_state() {
    let app = app::App::new();
    assert_eq!(app.current_section, 0);
    assert!(!app.should_quit);
    assert!(!app.show_help);
    assert_eq!(app.plan.business.len(), 10);
    assert_eq!(app.plan.pitch.len(), 7);
    assert_eq!(app.track.projects.len(), 10);
    assert_eq!(app.finance.expenses.len(), 1);
    assert_eq!(app.funding.opportunities.len(), 5);
    assert_eq!(app.funding.chat.len(), 1);
}

#[test]
fn section_navigation_1_through_4() {
    let mut app = app::App::new();
    for i in 1..=4u8 {
        let c = (b'0' + i) as char;
        app.on_key(key(KeyCode::Char(c)));
        assert_eq!(app.current_section, (i - 1) as usize);
    }
}

#[test]
fn tab_cycles_and_wraps() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Tab));
    assert_eq!(app.current_section, 1);
    app.on_key(key(KeyCode::BackTab));
    assert_eq!(app.current_section, 0);
    app.on_key(key(KeyCode::BackTab));
    assert_eq!(app.current_section, app::SECTION_NAMES.len() - 1);
    app.on_key(key(KeyCode::Tab));
    assert_eq!(app.current_section, 0);
}

#[test]
fn quit_keys() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('q')));
    assert!(app.should_quit);

    let mut app = app::App::new();
    let ctrl_c = KeyEvent {
        code: KeyCode::Char('c'),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    };
    app.on_key(ctrl_c);
    assert!(app.should_quit);
}

#[test]
fn help_modal_swallows_keys() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('?')));
    assert!(app.show_help);
    app.on_key(key(KeyCode::Char('q')));
    assert!(!app.should_quit);
    app.on_key(key(KeyCode::Esc));
    assert!(!app.show_help);
}

#[test]
fn command_mode_runs_on_enter() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char(':')));
    assert!(app.in_command_mode);
    for c in "section 2".chars() {
        app.on_key(key(KeyCode::Char(c)));
    }
    app.on_key(key(KeyCode::Enter));
    assert!(!app.in_command_mode);
    assert_eq!(app.current_section, 2);
}

#[test]
fn command_mode_query_sets_result() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char(':')));
    for c in "query state".chars() {
        app.on_key(key(KeyCode::Char(c)));
    }
    app.on_key(key(KeyCode::Enter));
    let result = app.command_result.as_ref().unwrap();
    assert!(result.contains("section_name"));
}

#[test]
fn command_mode_esc_cancels() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char(':')));
    app.on_key(key(KeyCode::Char('q')));
    app.on_key(key(KeyCode::Esc));
    assert!(!app.in_command_mode);
    assert!(!app.should_quit);
}

// ---------------------------------------------------------------------------
// Draft timer lifecycle across sections
// ---------------------------------------------------------------------------

#[test]
fn section_switch_discards_draft_timer() {
    let mut app = app::App::new();
    let t0 = Instant::now();

    // Open a plan step and request an assistant draft.
    app.on_key_at(key(KeyCode::Char('j')), t0);
    app.on_key_at(key(KeyCode::Char('a')), t0);
    assert!(app.plan.business.has_pending());
    let before = app.plan.business.step("pb-1").unwrap().fields[0].value.clone();

    // Leave the section before the delay elapses.
    app.on_key_at(key(KeyCode::Char('2')), t0);
    assert!(!app.plan.business.has_pending());

    // Even after the deadline the stale write never lands.
    app.tick(t0 + Duration::from_secs(5));
    assert_eq!(
        app.plan.business.step("pb-1").unwrap().fields[0].value,
        before
    );
}

#[test]
fn draft_lands_and_toasts_when_step_stays_open() {
    let mut app = app::App::new();
    let t0 = Instant::now();
    app.on_key_at(key(KeyCode::Char('j')), t0);
    app.on_key_at(key(KeyCode::Char('a')), t0);
    app.tick(t0 + Duration::from_secs(2));
    assert!(!app.plan.business.has_pending());
    assert_eq!(app.toasts.latest_message(), Some("Draft added"));
}

// ---------------------------------------------------------------------------
// Funding chat key routing
// ---------------------------------------------------------------------------

#[test]
fn chat_captures_plain_characters() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('4')));
    app.on_key(key(KeyCode::Char('m')));
    assert_eq!(app.funding.view, FundingView::Chat);

    // 'q' types into the chat input instead of quitting.
    app.on_key(key(KeyCode::Char('q')));
    assert!(!app.should_quit);
    assert_eq!(app.funding.chat_input, "q");

    app.on_key(key(KeyCode::Backspace));
    for c in "need a microloan".chars() {
        app.on_key(key(KeyCode::Char(c)));
    }
    app.on_key(key(KeyCode::Enter));
    // User message + canned acknowledgement appended.
    assert_eq!(app.funding.chat.len(), 3);
    app.on_key(key(KeyCode::Esc));
    assert_eq!(app.funding.view, FundingView::Hub);
    // Back on the hub, 'q' quits again.
    app.on_key(key(KeyCode::Char('q')));
    assert!(app.should_quit);
}

#[test]
fn chat_question_flow_via_arrows() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('4')));
    app.on_key(key(KeyCode::Char('m')));
    app.on_key(key(KeyCode::Down));
    app.on_key(key(KeyCode::Down));
    assert_eq!(app.funding.chat_option, Some(1));
    app.on_key(key(KeyCode::Enter));
    assert!(app.funding.question_answered);
    assert_eq!(app.funding.chat.len(), 3);
}

// ---------------------------------------------------------------------------
// Cross-section isolation
// ---------------------------------------------------------------------------

#[test]
fn section_state_survives_switching() {
    let mut app = app::App::new();

    // Check a task off in Track.
    app.on_key(key(KeyCode::Char('2')));
    app.on_key(key(KeyCode::Char('l')));
    app.on_key(key(KeyCode::Enter));
    let checked = app.track.done.values().filter(|v| **v).count();
    assert_eq!(checked, 1);

    // Wander through every other section and come back.
    for c in ['1', '3', '4', '2'] {
        app.on_key(key(KeyCode::Char(c)));
    }
    assert_eq!(app.track.done.values().filter(|v| **v).count(), 1);
    assert_eq!(app.finance.expenses.len(), 1);
}

#[test]
fn plan_tab_switch_via_keys() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('l')));
    assert_eq!(app.plan.tab, PlanTab::Financial);
    app.on_key(key(KeyCode::Char('p')));
    assert_eq!(app.plan.period, 1);
    app.on_key(key(KeyCode::Char('l')));
    assert_eq!(app.plan.tab, PlanTab::Pitch);
    app.on_key(key(KeyCode::Char('l')));
    assert_eq!(app.plan.tab, PlanTab::Business);
}

#[test]
fn finance_submit_via_keys_and_commands() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('3')));
    assert_eq!(app.finance.tab, FinanceTab::Expenses);

    // Enter with an empty form is a guarded no-op.
    let before = app.finance.expenses.len();
    app.on_key(key(KeyCode::Enter));
    assert_eq!(app.finance.expenses.len(), before);

    // Fill the form through command mode, submit with Enter.
    for cmdline in [":amount 75", ":reason Sign deposit"] {
        app.on_key(key(KeyCode::Char(':')));
        for c in cmdline.trim_start_matches(':').chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
        app.on_key(key(KeyCode::Enter));
    }
    app.on_key(key(KeyCode::Enter));
    assert_eq!(app.finance.expenses.len(), before + 1);
    assert_eq!(app.finance.expenses.last().unwrap().amount, 75.0);
}
