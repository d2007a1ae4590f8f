//! Render tests for the four sections and their sub-views.
//!
//! Each test draws the full UI into a test backend and asserts that the
//! expected content shows up in the buffer.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

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

const WIDTH: u16 = 120;
const HEIGHT: u16 = 40;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

fn render_to_string(app: &mut app::App) -> String {
    let backend = TestBackend::new(WIDTH, HEIGHT);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();
    buffer_to_string(terminal.backend().buffer())
}

fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    let mut lines = Vec::new();
    for y in area.y..area.y + area.height {
        let mut line = String::new();
        for x in area.x..area.x + area.width {
            line.push_str(buf[(x, y)].symbol());
        }
        lines.push(line);
    }
    lines.join("\n")
}

fn assert_contains(output: &str, needle: &str) {
    assert!(
        output.contains(needle),
        "Expected to find {:?} in rendered output.\nFull output:\n{}",
        needle,
        output
    );
}

fn assert_contains_all(output: &str, needles: &[&str]) {
    for needle in needles {
        assert_contains(output, needle);
    }
}

// ===========================================================================
// Shell chrome
// ===========================================================================

#[test]
fn render_header_shows_business_identity() {
    let mut app = app::App::new();
    let output = render_to_string(&mut app);
    assert_contains_all(&output, &["Ramen Shop", "South Austin, TX", "Free Plan"]);
}

#[test]
fn render_bottom_nav_shows_four_destinations() {
    let mut app = app::App::new();
    let output = render_to_string(&mut app);
    assert_contains_all(&output, &["1:Plan", "2:Track", "3:Expenses", "4:Funding"]);
}

#[test]
fn render_prompt_bar_hint_per_section() {
    let mut app = app::App::new();
    let output = render_to_string(&mut app);
    assert_contains(&output, "Ask me to help fill in any step");

    app.on_key(key(KeyCode::Char('2')));
    let output = render_to_string(&mut app);
    assert_contains(&output, "I can break down any project");
}

#[test]
fn render_funding_has_no_prompt_bar() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('4')));
    let output = render_to_string(&mut app);
    assert!(!output.contains("Ask me to help fill in any step"));
}

#[test]
fn render_help_modal() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('?')));
    let output = render_to_string(&mut app);
    assert_contains_all(&output, &["Keybindings", "Jump to section", "Command mode"]);
}

#[test]
fn render_status_bar_shows_hints_and_clock() {
    let mut app = app::App::new();
    let output = render_to_string(&mut app);
    assert_contains_all(&output, &["[1-4]", "Help", "Quit", "20"]);
}

#[test]
fn render_command_mode_prompt() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char(':')));
    for c in "section".chars() {
        app.on_key(key(KeyCode::Char(c)));
    }
    let output = render_to_string(&mut app);
    assert_contains(&output, ":section");
}

// ===========================================================================
// Plan section
// ===========================================================================

#[test]
fn render_plan_business_steps() {
    let mut app = app::App::new();
    let output = render_to_string(&mut app);
    assert_contains_all(
        &output,
        &[
            "Business Plan",
            "Brand Identity",
            "Ideal Customer Profile",
            "Break-Even Analysis",
            "Powered by Financial Plan",
            "3/10 steps",
        ],
    );
}

#[test]
fn render_plan_open_step_shows_fields() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('j')));
    app.on_key(key(KeyCode::Enter));
    let output = render_to_string(&mut app);
    assert_contains_all(&output, &["Primary Customer", "Top 3 Pains", "Core Promise"]);
}

#[test]
fn render_plan_smart_step_computes_break_even() {
    let mut app = app::App::new();
    // Move the cursor to the smart break-even step and open it.
    for _ in 0..7 {
        app.on_key(key(KeyCode::Char('j')));
    }
    app.on_key(key(KeyCode::Enter));
    let output = render_to_string(&mut app);
    assert_contains_all(&output, &["Monthly Fixed", "Covers/Day", "~108", "2789 covers/mo"]);
}

#[test]
fn render_plan_financial_projections() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('l')));
    let output = render_to_string(&mut app);
    assert_contains_all(
        &output,
        &[
            "Estimated Budget",
            "$129k",
            "Month 6",
            "Key Financial Projections",
            "Mo 1",
            "-$9k",
            "Business Assumptions",
            "$29,450",
        ],
    );
}

#[test]
fn render_plan_financial_period_toggle() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('l')));
    app.on_key(key(KeyCode::Char('p')));
    let output = render_to_string(&mut app);
    assert_contains_all(&output, &["13-24", "Mo 13"]);
}

#[test]
fn render_plan_pitch_locked_and_unlocked() {
    let mut app = app::App::new();
    // Default seed meets the unlock threshold, so slides render.
    app.on_key(key(KeyCode::Char('h')));
    let output = render_to_string(&mut app);
    assert_contains_all(&output, &["Pitch Deck", "Problem", "Financial Snapshot"]);

    // Raise the bar and the locked state appears instead.
    let mut app = app::App::new();
    app.config.pitch_unlock_threshold = 6;
    app.plan = sections::plan::PlanState::new(&app.config);
    app.on_key(key(KeyCode::Char('h')));
    let output = render_to_string(&mut app);
    assert_contains_all(&output, &["Pitch Deck locked", "3 more plan step"]);
}

// ===========================================================================
// Track section
// ===========================================================================

#[test]
fn render_track_projects() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('2')));
    let output = render_to_string(&mut app);
    assert_contains_all(
        &output,
        &[
            "Market Research",
            "Location Scouting",
            "Supplier Sourcing",
            "Legal Groundwork",
            "Execution Phase: Unlocks When Plan is Complete",
            "[locked]",
            "Hiring & Training",
            "Sarah",
        ],
    );
}

#[test]
fn render_track_tasks_sorted() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('2')));
    app.on_key(key(KeyCode::Char('l')));
    let output = render_to_string(&mut app);
    assert_contains_all(
        &output,
        &[
            "Tasks (16)",
            "Survey 20 potential customers",
            "Register LLC with Texas Secretary of State",
            "[ ]",
        ],
    );
}

#[test]
fn render_track_project_detail() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('2')));
    app.on_key(key(KeyCode::Enter));
    let output = render_to_string(&mut app);
    assert_contains_all(
        &output,
        &["Market Research", "0/5 tasks", "Owner: Sarah", "[Esc] All Projects"],
    );
}

#[test]
fn render_track_checked_task() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('2')));
    app.on_key(key(KeyCode::Char('l')));
    app.on_key(key(KeyCode::Enter));
    let output = render_to_string(&mut app);
    assert_contains(&output, "[x]");
}

// ===========================================================================
// Finance section
// ===========================================================================

#[test]
fn render_finance_expense_form_and_entries() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('3')));
    let output = render_to_string(&mut app);
    assert_contains_all(
        &output,
        &[
            "Add Expense",
            "Amount",
            "Reason",
            "Legal Formation",
            "LLC filing fee + registered agent",
        ],
    );
}

#[test]
fn render_finance_by_project_grouping() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('3')));
    app.on_key(key(KeyCode::Char('v')));
    let output = render_to_string(&mut app);
    assert_contains_all(&output, &["By Project", "Legal Formation", "$1k"]);
}

#[test]
fn render_finance_empty_revenue_state() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('3')));
    app.on_key(key(KeyCode::Char('l')));
    let output = render_to_string(&mut app);
    assert_contains_all(&output, &["Add Revenue", "No revenue logged yet", "Projected"]);
}

#[test]
fn render_finance_dashboard() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('3')));
    app.on_key(key(KeyCode::Char('h')));
    let output = render_to_string(&mut app);
    assert_contains_all(
        &output,
        &[
            "Budget Required",
            "$129k",
            "Still Need",
            "Monthly Fixed Costs",
            "Rent",
            "covers/mo",
        ],
    );
}

// ===========================================================================
// Funding section
// ===========================================================================

#[test]
fn render_funding_hub() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('4')));
    let output = render_to_string(&mut app);
    assert_contains_all(
        &output,
        &[
            "Funding Projects",
            "TRA Foundation Grant",
            "Grants",
            "Texas Restaurant Association Foundation Grant",
            "87%",
            "2 opportunities matched",
        ],
    );
}

#[test]
fn render_funding_investment_empty_state() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('4')));
    app.on_key(key(KeyCode::Char('h')));
    let output = render_to_string(&mut app);
    assert_contains(&output, "Investment Coming Soon");
}

#[test]
fn render_funding_detail_context_card() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('4')));
    app.on_key(key(KeyCode::Enter));
    let output = render_to_string(&mut app);
    assert_contains_all(
        &output,
        &[
            "Business Plan Context",
            "Auto-pulled from your plan",
            "Month 6 at ~70 covers/day",
            "$129k total",
            "Grant Application Essay",
            "Supporting Documents Checklist",
        ],
    );
}

#[test]
fn render_funding_expert_modal_screens() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('4')));
    app.on_key(key(KeyCode::Enter));
    app.on_key(key(KeyCode::Char('b')));
    let output = render_to_string(&mut app);
    assert_contains_all(&output, &["Choose a Funding Expert", "Maria Gonzalez", "4.9"]);

    app.on_key(key(KeyCode::Enter));
    let output = render_to_string(&mut app);
    assert_contains_all(&output, &["Pick a Time", "Mon, Feb 24", "9:00 AM"]);

    app.on_key(key(KeyCode::Enter));
    app.on_key(key(KeyCode::Char('b')));
    let output = render_to_string(&mut app);
    assert_contains_all(&output, &["You're Booked!", "Maria Gonzalez"]);
}

#[test]
fn render_funding_chat() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('4')));
    app.on_key(key(KeyCode::Char('m')));
    let output = render_to_string(&mut app);
    assert_contains_all(
        &output,
        &[
            "Funding Assistant",
            "What type of funding are you looking for?",
            "Grants (free money)",
            "Ask about grants, loans, investors",
        ],
    );
}

#[test]
fn render_funding_project_detail() {
    let mut app = app::App::new();
    app.on_key(key(KeyCode::Char('4')));
    app.on_key(key(KeyCode::Char('p')));
    let output = render_to_string(&mut app);
    assert_contains_all(
        &output,
        &[
            "TRA Foundation Grant",
            "2/6 tasks",
            "Extract Business Plan",
            "From Business Plan",
        ],
    );
}

// ===========================================================================
// Full render cycle
// ===========================================================================

#[test]
fn render_all_sections_no_panic() {
    let mut app = app::App::new();
    for c in ['1', '2', '3', '4'] {
        app.on_key(key(KeyCode::Char(c)));
        let output = render_to_string(&mut app);
        assert!(!output.is_empty());
    }
}

#[test]
fn render_all_sections_at_minimum_size() {
    let mut app = app::App::new();
    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    for c in ['1', '2', '3', '4'] {
        app.on_key(key(KeyCode::Char(c)));
        terminal.draw(|frame| ui::render(frame, &mut app)).unwrap();
    }
}

#[test]
fn render_all_sections_at_wide_size() {
    let mut app = app::App::new();
    let backend = TestBackend::new(200, 50);
    let mut terminal = Terminal::new(backend).unwrap();
    for c in ['1', '2', '3', '4'] {
        app.on_key(key(KeyCode::Char(c)));
        terminal.draw(|frame| ui::render(frame, &mut app)).unwrap();
    }
}

#[test]
fn render_empty_states_no_panic() {
    let mut app = app::App::new();
    app.finance.expenses.clear();
    app.on_key(key(KeyCode::Char('3')));
    let output = render_to_string(&mut app);
    assert_contains(&output, "No expenses yet");

    app.on_key(key(KeyCode::Char('v')));
    let output = render_to_string(&mut app);
    assert_contains(&output, "No project expenses yet");
}
