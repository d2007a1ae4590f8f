//! Command system for the Venture TUI.
//!
//! Makes the app programmable via two interfaces:
//! - **Command mode**: `:` prefixed text commands typed interactively.
//! - **JSON pipe**: structured JSON commands received over stdin in
//!   headless mode.
//!
//! Query commands return serialized state as JSON strings so scripts can
//! inspect the app without direct struct access.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

use venture_core::metrics::match_tier;

use crate::app::{App, FINANCE, FUNDING, PLAN, SECTION_NAMES, TRACK};
use crate::sections::finance::FinanceTab;
use crate::sections::funding::{ExpertScreen, FundingView, HubTab};
use crate::sections::plan::PlanTab;
use crate::sections::track::TrackTab;

// ---------------------------------------------------------------------------
// AppCommand
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    // Navigation
    Section(usize),
    NextSection,
    PrevSection,
    View(String),
    Select(usize),
    Up,
    Down,
    Left,
    Right,
    Activate,
    Back,

    // Steps
    Open(String),
    Draft(String),
    Manual(String),
    SetField(String, String, String),
    Save(String),
    Toggle(String),
    Period,

    // Finance forms
    Amount(String),
    Project(String),
    Reason(String),
    Source(String),
    Note(String),
    Submit,

    // Chat
    Chat,
    Say(String),
    Choose(usize),
    Continue,

    // Expert booking
    Experts,
    Expert(usize),
    Slot(usize),
    Confirm,

    // Timers & queries
    Tick,
    QueryState,
    QueryTab,
    QuerySelected,

    // System
    Quit,
    Help,
}

// ---------------------------------------------------------------------------
// Text command parser (`:` prefixed)
// ---------------------------------------------------------------------------

/// Parse a `:` prefixed command string.
///
/// Examples: `:section 3`, `:amount 50`, `:say hello`, `:query state`.
pub fn parse_command(input: &str) -> Option<AppCommand> {
    let input = input.trim();
    let input = input.strip_prefix(':')?;
    let mut parts = input.splitn(2, ' ');
    let verb = parts.next()?.trim();
    let arg = parts.next().map(|s| s.trim());

    match verb {
        "section" | "tab" => {
            let idx: usize = arg?.parse().ok()?;
            Some(AppCommand::Section(idx))
        }
        "next" => Some(AppCommand::NextSection),
        "prev" => Some(AppCommand::PrevSection),
        "view" => {
            let name = arg?;
            if name.is_empty() {
                return None;
            }
            Some(AppCommand::View(name.to_string()))
        }
        "select" | "sel" => {
            let idx: usize = arg?.parse().ok()?;
            Some(AppCommand::Select(idx))
        }
        "up" | "k" => Some(AppCommand::Up),
        "down" | "j" => Some(AppCommand::Down),
        "left" | "h" => Some(AppCommand::Left),
        "right" | "l" => Some(AppCommand::Right),
        "enter" | "activate" => Some(AppCommand::Activate),
        "back" | "esc" => Some(AppCommand::Back),
        "open" => Some(AppCommand::Open(non_empty(arg)?)),
        "draft" => Some(AppCommand::Draft(non_empty(arg)?)),
        "manual" => Some(AppCommand::Manual(non_empty(arg)?)),
        "field" => {
            let rest = arg?;
            let mut parts = rest.splitn(3, ' ');
            let step = parts.next()?.trim();
            let key = parts.next()?.trim();
            let value = parts.next().unwrap_or("").trim();
            if step.is_empty() || key.is_empty() {
                return None;
            }
            Some(AppCommand::SetField(
                step.to_string(),
                key.to_string(),
                value.to_string(),
            ))
        }
        "save" => Some(AppCommand::Save(non_empty(arg)?)),
        "toggle" | "check" => Some(AppCommand::Toggle(non_empty(arg)?)),
        "period" => Some(AppCommand::Period),
        "amount" => Some(AppCommand::Amount(non_empty(arg)?)),
        "project" => Some(AppCommand::Project(non_empty(arg)?)),
        "reason" => Some(AppCommand::Reason(non_empty(arg)?)),
        "source" => Some(AppCommand::Source(non_empty(arg)?)),
        "note" => Some(AppCommand::Note(non_empty(arg)?)),
        "submit" | "add" => Some(AppCommand::Submit),
        "chat" => Some(AppCommand::Chat),
        "say" => Some(AppCommand::Say(non_empty(arg)?)),
        "choose" => {
            let idx: usize = arg?.parse().ok()?;
            Some(AppCommand::Choose(idx))
        }
        "continue" => Some(AppCommand::Continue),
        "experts" => Some(AppCommand::Experts),
        "expert" => {
            let idx: usize = arg?.parse().ok()?;
            Some(AppCommand::Expert(idx))
        }
        "slot" => {
            let idx: usize = arg?.parse().ok()?;
            Some(AppCommand::Slot(idx))
        }
        "confirm" | "book" => Some(AppCommand::Confirm),
        "tick" => Some(AppCommand::Tick),
        "query" => match arg? {
            "state" => Some(AppCommand::QueryState),
            "tab" => Some(AppCommand::QueryTab),
            "selected" => Some(AppCommand::QuerySelected),
            _ => None,
        },
        "quit" | "q" => Some(AppCommand::Quit),
        "help" | "?" => Some(AppCommand::Help),
        _ => None,
    }
}

fn non_empty(arg: Option<&str>) -> Option<String> {
    let value = arg?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// ---------------------------------------------------------------------------
// JSON command parser
// ---------------------------------------------------------------------------

/// Parse a JSON command from the headless pipe.
///
/// Expected format: `{"cmd":"section","args":[3]}` or `{"cmd":"query_state"}`.
pub fn parse_json_command(json: &str) -> Option<AppCommand> {
    let v: serde_json::Value = serde_json::from_str(json).ok()?;
    let cmd = v.get("cmd")?.as_str()?;
    let args = v.get("args");

    let arg_usize =
        |idx: usize| -> Option<usize> { args?.as_array()?.get(idx)?.as_u64().map(|n| n as usize) };
    let arg_str = |idx: usize| -> Option<&str> { args?.as_array()?.get(idx)?.as_str() };

    match cmd {
        "section" | "tab" => Some(AppCommand::Section(arg_usize(0)?)),
        "next" => Some(AppCommand::NextSection),
        "prev" => Some(AppCommand::PrevSection),
        "view" => Some(AppCommand::View(arg_str(0)?.to_string())),
        "select" => Some(AppCommand::Select(arg_usize(0)?)),
        "up" => Some(AppCommand::Up),
        "down" => Some(AppCommand::Down),
        "left" => Some(AppCommand::Left),
        "right" => Some(AppCommand::Right),
        "activate" | "enter" => Some(AppCommand::Activate),
        "back" => Some(AppCommand::Back),
        "open" => Some(AppCommand::Open(arg_str(0)?.to_string())),
        "draft" => Some(AppCommand::Draft(arg_str(0)?.to_string())),
        "manual" => Some(AppCommand::Manual(arg_str(0)?.to_string())),
        "set_field" => Some(AppCommand::SetField(
            arg_str(0)?.to_string(),
            arg_str(1)?.to_string(),
            arg_str(2).unwrap_or("").to_string(),
        )),
        "save" => Some(AppCommand::Save(arg_str(0)?.to_string())),
        "toggle" => Some(AppCommand::Toggle(arg_str(0)?.to_string())),
        "period" => Some(AppCommand::Period),
        "amount" => Some(AppCommand::Amount(arg_str(0)?.to_string())),
        "project" => Some(AppCommand::Project(arg_str(0)?.to_string())),
        "reason" => Some(AppCommand::Reason(arg_str(0)?.to_string())),
        "source" => Some(AppCommand::Source(arg_str(0)?.to_string())),
        "note" => Some(AppCommand::Note(arg_str(0)?.to_string())),
        "submit" => Some(AppCommand::Submit),
        "chat" => Some(AppCommand::Chat),
        "say" => Some(AppCommand::Say(arg_str(0)?.to_string())),
        "choose" => Some(AppCommand::Choose(arg_usize(0)?)),
        "continue" => Some(AppCommand::Continue),
        "experts" => Some(AppCommand::Experts),
        "expert" => Some(AppCommand::Expert(arg_usize(0)?)),
        "slot" => Some(AppCommand::Slot(arg_usize(0)?)),
        "confirm" => Some(AppCommand::Confirm),
        "tick" => Some(AppCommand::Tick),
        "query_state" => Some(AppCommand::QueryState),
        "query_tab" => Some(AppCommand::QueryTab),
        "query_selected" => Some(AppCommand::QuerySelected),
        "quit" => Some(AppCommand::Quit),
        "help" => Some(AppCommand::Help),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Command execution
// ---------------------------------------------------------------------------

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Execute a command against the application state.
///
/// Returns `Some(json_string)` for query commands, `None` for everything
/// else.
pub fn execute_command(app: &mut App, cmd: AppCommand, now: Instant) -> Option<String> {
    match cmd {
        // -- Navigation -----------------------------------------------------
        AppCommand::Section(idx) => {
            app.set_section(idx);
            None
        }
        AppCommand::NextSection => {
            app.next_section();
            None
        }
        AppCommand::PrevSection => {
            app.prev_section();
            None
        }
        AppCommand::View(name) => {
            apply_view(app, &name);
            None
        }
        AppCommand::Select(idx) => {
            match app.current_section {
                PLAN => app.plan.selected = idx,
                TRACK => app.track.selected = idx,
                FINANCE => {}
                FUNDING => app.funding.selected = idx,
                _ => {}
            }
            None
        }
        AppCommand::Up => forward_key(app, KeyCode::Up, now),
        AppCommand::Down => forward_key(app, KeyCode::Down, now),
        AppCommand::Left => forward_key(app, KeyCode::Left, now),
        AppCommand::Right => forward_key(app, KeyCode::Right, now),
        AppCommand::Activate => forward_key(app, KeyCode::Enter, now),
        AppCommand::Back => forward_key(app, KeyCode::Esc, now),

        // -- Steps ----------------------------------------------------------
        AppCommand::Open(id) => {
            open_by_id(app, &id);
            None
        }
        AppCommand::Draft(id) => {
            if id.starts_with("fas-") {
                if let Some(detail) = &mut app.funding.detail {
                    if !detail.flow.is_open(&id) {
                        detail.flow.toggle(&id);
                    }
                    detail.flow.start_draft(&id, now);
                }
            } else {
                if id.starts_with("pd-") && !app.plan.pitch_unlocked() {
                    return None;
                }
                let flow = if id.starts_with("pd-") {
                    &mut app.plan.pitch
                } else {
                    &mut app.plan.business
                };
                if !flow.is_open(&id) {
                    flow.toggle(&id);
                }
                flow.start_draft(&id, now);
            }
            None
        }
        AppCommand::Manual(id) => {
            step_flow_for(app, &id, |flow| {
                flow.set_mode(&id, crate::stepflow::StepMode::Manual);
            });
            None
        }
        AppCommand::SetField(id, field_key, value) => {
            step_flow_for(app, &id, |flow| {
                flow.set_field(&id, &field_key, &value);
            });
            None
        }
        AppCommand::Save(id) => {
            step_flow_for(app, &id, |flow| {
                flow.save(&id);
            });
            None
        }
        AppCommand::Toggle(id) => {
            if id.starts_with("ft") {
                app.funding.toggle_done(&id);
            } else {
                app.track.toggle_done(&id);
            }
            None
        }
        AppCommand::Period => {
            app.plan.period = (app.plan.period + 1) % 2;
            None
        }

        // -- Finance forms --------------------------------------------------
        AppCommand::Amount(value) => {
            app.set_section(FINANCE);
            match app.finance.tab {
                FinanceTab::Revenue => app.finance.revenue_form.amount = value,
                _ => app.finance.expense_form.amount = value,
            }
            None
        }
        AppCommand::Project(value) => {
            app.set_section(FINANCE);
            app.finance.expense_form.project = value;
            None
        }
        AppCommand::Reason(value) => {
            app.set_section(FINANCE);
            app.finance.expense_form.reason = value;
            None
        }
        AppCommand::Source(value) => {
            app.set_section(FINANCE);
            app.finance.revenue_form.source = value;
            None
        }
        AppCommand::Note(value) => {
            app.set_section(FINANCE);
            app.finance.revenue_form.note = value;
            None
        }
        AppCommand::Submit => {
            app.set_section(FINANCE);
            let outcome = match app.finance.tab {
                FinanceTab::Revenue => app.finance.submit_revenue().map(|_| "Revenue added"),
                _ => app.finance.submit_expense().map(|_| "Expense added"),
            };
            match outcome {
                Ok(message) => app.push_toast(message),
                Err(err) => tracing::debug!(%err, "submission rejected"),
            }
            None
        }

        // -- Chat -----------------------------------------------------------
        AppCommand::Chat => {
            app.set_section(FUNDING);
            app.funding.view = FundingView::Chat;
            None
        }
        AppCommand::Say(text) => {
            app.set_section(FUNDING);
            app.funding.view = FundingView::Chat;
            app.funding.send_chat(&text);
            None
        }
        AppCommand::Choose(idx) => {
            app.funding.select_option(idx);
            None
        }
        AppCommand::Continue => {
            app.funding.continue_question();
            None
        }

        // -- Expert booking -------------------------------------------------
        AppCommand::Experts => {
            if app.funding.detail.is_some() {
                app.funding.expert_screen = ExpertScreen::List;
            }
            None
        }
        AppCommand::Expert(idx) => {
            if app.funding.expert_screen == ExpertScreen::List
                && idx < app.funding.experts.len()
            {
                app.funding.chosen_expert = Some(idx);
                app.funding.chosen_slot = None;
                app.funding.expert_screen = ExpertScreen::Slots;
            }
            None
        }
        AppCommand::Slot(idx) => {
            if app.funding.expert_screen == ExpertScreen::Slots {
                app.funding.chosen_slot = app.funding.flat_slots().get(idx).cloned();
            }
            None
        }
        AppCommand::Confirm => {
            if let Some(booking) = app.funding.confirm_booking() {
                app.push_toast(&format!(
                    "Booked {} at {} with {}",
                    booking.day, booking.time, booking.expert
                ));
            }
            None
        }

        // -- Timers & queries -----------------------------------------------
        AppCommand::Tick => {
            app.tick(now);
            None
        }
        AppCommand::QueryState => Some(serialize_state(app)),
        AppCommand::QueryTab => Some(serialize_tab_data(app)),
        AppCommand::QuerySelected => Some(serialize_selected_item(app)),

        // -- System ---------------------------------------------------------
        AppCommand::Quit => {
            app.should_quit = true;
            None
        }
        AppCommand::Help => {
            app.show_help = true;
            None
        }
    }
}

fn forward_key(app: &mut App, code: KeyCode, now: Instant) -> Option<String> {
    let toast = match app.current_section {
        PLAN => app.plan.on_key(key(code), now),
        TRACK => app.track.on_key(key(code)),
        FINANCE => app.finance.on_key(key(code)),
        FUNDING => app.funding.on_key(key(code), now),
        _ => None,
    };
    if let Some(text) = toast {
        app.push_toast(&text);
    }
    None
}

/// Sub-view names jump both the section and its pill toggle.
fn apply_view(app: &mut App, name: &str) {
    match name.to_ascii_lowercase().as_str() {
        "business" => {
            app.set_section(PLAN);
            app.plan.set_tab(PlanTab::Business);
        }
        "financial" => {
            app.set_section(PLAN);
            app.plan.set_tab(PlanTab::Financial);
        }
        "pitch" => {
            app.set_section(PLAN);
            app.plan.set_tab(PlanTab::Pitch);
        }
        "projects" => {
            app.set_section(TRACK);
            app.track.tab = TrackTab::Projects;
        }
        "tasks" => {
            app.set_section(TRACK);
            app.track.tab = TrackTab::Tasks;
        }
        "expenses" => {
            app.set_section(FINANCE);
            app.finance.tab = FinanceTab::Expenses;
        }
        "revenue" => {
            app.set_section(FINANCE);
            app.finance.tab = FinanceTab::Revenue;
        }
        "dashboard" => {
            app.set_section(FINANCE);
            app.finance.tab = FinanceTab::Dashboard;
        }
        "grants" => {
            app.set_section(FUNDING);
            app.funding.hub_tab = HubTab::Grants;
        }
        "loans" => {
            app.set_section(FUNDING);
            app.funding.hub_tab = HubTab::Loans;
        }
        "investment" => {
            app.set_section(FUNDING);
            app.funding.hub_tab = HubTab::Investment;
        }
        other => tracing::debug!(view = other, "unknown view name"),
    }
}

/// Entity ids route by prefix: plan steps, pitch slides, application
/// steps, opportunities, funding projects and execution projects all
/// carry distinct prefixes in the seed.
fn open_by_id(app: &mut App, id: &str) {
    if id.starts_with("pb-") {
        app.set_section(PLAN);
        app.plan.set_tab(PlanTab::Business);
        app.plan.business.toggle(id);
    } else if id.starts_with("pd-") {
        app.set_section(PLAN);
        app.plan.set_tab(PlanTab::Pitch);
        if app.plan.pitch_unlocked() {
            app.plan.pitch.toggle(id);
        }
    } else if id.starts_with("fas-") {
        if let Some(detail) = &mut app.funding.detail {
            detail.flow.toggle(id);
        }
    } else if id.starts_with("fp-") {
        app.set_section(FUNDING);
        app.funding.open_project_detail(id);
    } else if id.starts_with("f-") {
        app.set_section(FUNDING);
        app.funding.open_detail(id);
    } else if id.starts_with("ep-") {
        app.set_section(TRACK);
        if app.track.projects.iter().any(|p| p.id == id && !p.is_locked()) {
            app.track.open_project = Some(id.to_string());
            app.track.task_cursor = 0;
        }
    } else {
        tracing::debug!(%id, "unknown id prefix");
    }
}

fn step_flow_for(app: &mut App, id: &str, apply: impl FnOnce(&mut crate::stepflow::StepFlow)) {
    if id.starts_with("fas-") {
        if let Some(detail) = &mut app.funding.detail {
            apply(&mut detail.flow);
        }
    } else if id.starts_with("pd-") {
        if app.plan.pitch_unlocked() {
            apply(&mut app.plan.pitch);
        }
    } else {
        apply(&mut app.plan.business);
    }
}

// ---------------------------------------------------------------------------
// Serialization helpers
// ---------------------------------------------------------------------------

fn serialize_state(app: &App) -> String {
    let section_name = SECTION_NAMES.get(app.current_section).unwrap_or(&"unknown");
    let state = serde_json::json!({
        "section": app.current_section,
        "section_name": section_name,
        "plan": {
            "tab": format!("{:?}", app.plan.tab),
            "steps_complete": app.plan.business.complete_count(),
            "steps_total": app.plan.business.len(),
            "open_step": app.plan.business.open_step_id(),
            "pitch_unlocked": app.plan.pitch_unlocked(),
            "draft_pending": app.plan.business.has_pending() || app.plan.pitch.has_pending(),
        },
        "track": {
            "active_projects": app.track.active_projects().len(),
            "locked_projects": app.track.locked_projects().len(),
            "tasks": app.track.flat_tasks().len(),
            "checked_off": app.track.done.values().filter(|v| **v).count(),
        },
        "finance": {
            "expenses": app.finance.expenses.len(),
            "revenue": app.finance.revenue.len(),
            "spent": app.finance.total_spent(),
            "still_needed": app.finance.still_needed(),
        },
        "funding": {
            "view": format!("{:?}", app.funding.view),
            "opportunities": app.funding.opportunities.len(),
            "projects": app.funding.projects.len(),
            "chat_messages": app.funding.chat.len(),
            "question_answered": app.funding.question_answered,
            "booking": app.funding.booking,
        },
    });
    serde_json::to_string(&state).unwrap_or_else(|_| "{}".into())
}

fn serialize_tab_data(app: &App) -> String {
    let value = match app.current_section {
        PLAN => serde_json::json!(app
            .plan
            .business
            .steps()
            .iter()
            .map(|s| serde_json::json!({
                "id": s.id,
                "phase": s.phase,
                "title": s.title,
                "kind": s.kind,
                "status": s.status,
                "fields": s.fields,
            }))
            .collect::<Vec<_>>()),
        TRACK => serde_json::json!(app
            .track
            .sorted_flat_tasks()
            .iter()
            .map(|(t, project)| serde_json::json!({
                "id": t.id,
                "title": t.title,
                "project": project,
                "status": t.status,
                "priority": t.priority,
                "cleared": app.track.cleared(t),
            }))
            .collect::<Vec<_>>()),
        FINANCE => serde_json::json!({
            "expenses": app.finance.expenses,
            "revenue": app.finance.revenue,
            "by_project": app.finance.expenses_by_project(),
        }),
        FUNDING => serde_json::json!(app
            .funding
            .sorted_opportunities()
            .iter()
            .map(|o| serde_json::json!({
                "id": o.id,
                "name": o.name,
                "type": o.kind,
                "match": o.match_score,
                "tier": match_tier(o.match_score),
                "amount": o.amount,
                "deadline": o.deadline,
            }))
            .collect::<Vec<_>>()),
        _ => serde_json::json!([]),
    };
    serde_json::to_string(&value).unwrap_or_else(|_| "[]".into())
}

fn serialize_selected_item(app: &App) -> String {
    let value = match app.current_section {
        PLAN => app
            .plan
            .business
            .steps()
            .get(app.plan.selected)
            .map(|s| serde_json::json!({
                "id": s.id,
                "title": s.title,
                "status": s.status,
                "open": app.plan.business.is_open(&s.id),
            })),
        TRACK => app
            .track
            .active_projects()
            .get(app.track.selected)
            .map(|p| {
                let (cleared, total, pct) = app.track.project_progress(p);
                serde_json::json!({
                    "id": p.id,
                    "title": p.title,
                    "cleared": cleared,
                    "total": total,
                    "percent": pct,
                })
            }),
        FUNDING => app
            .funding
            .sorted_opportunities()
            .get(app.funding.selected)
            .map(|o| serde_json::json!({
                "id": o.id,
                "name": o.name,
                "match": o.match_score,
                "status": o.status,
            })),
        _ => None,
    };
    serde_json::to_string(&value.unwrap_or(serde_json::Value::Null))
        .unwrap_or_else(|_| "null".into())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_app() -> App {
        App::new()
    }

    fn run(app: &mut App, line: &str) -> Option<String> {
        let cmd = parse_command(line).unwrap_or_else(|| panic!("parse failed: {}", line));
        execute_command(app, cmd, Instant::now())
    }

    // -- parse_command ------------------------------------------------------

    #[test]
    fn parse_section_command() {
        assert_eq!(parse_command(":section 3"), Some(AppCommand::Section(3)));
        assert_eq!(parse_command(":tab 0"), Some(AppCommand::Section(0)));
        assert_eq!(parse_command(":section"), None);
        assert_eq!(parse_command(":section abc"), None);
    }

    #[test]
    fn parse_navigation_commands() {
        assert_eq!(parse_command(":next"), Some(AppCommand::NextSection));
        assert_eq!(parse_command(":prev"), Some(AppCommand::PrevSection));
        assert_eq!(parse_command(":j"), Some(AppCommand::Down));
        assert_eq!(parse_command(":k"), Some(AppCommand::Up));
        assert_eq!(parse_command(":back"), Some(AppCommand::Back));
    }

    #[test]
    fn parse_form_commands() {
        assert_eq!(
            parse_command(":amount 50"),
            Some(AppCommand::Amount("50".into()))
        );
        assert_eq!(
            parse_command(":reason LLC filing fee"),
            Some(AppCommand::Reason("LLC filing fee".into()))
        );
        assert_eq!(parse_command(":submit"), Some(AppCommand::Submit));
        assert_eq!(parse_command(":amount"), None);
    }

    #[test]
    fn parse_field_command() {
        assert_eq!(
            parse_command(":field pb-5 founders Two co-founders"),
            Some(AppCommand::SetField(
                "pb-5".into(),
                "founders".into(),
                "Two co-founders".into()
            ))
        );
        assert_eq!(parse_command(":field pb-5"), None);
    }

    #[test]
    fn parse_chat_commands() {
        assert_eq!(
            parse_command(":say hello there"),
            Some(AppCommand::Say("hello there".into()))
        );
        assert_eq!(parse_command(":choose 2"), Some(AppCommand::Choose(2)));
        assert_eq!(parse_command(":continue"), Some(AppCommand::Continue));
        assert_eq!(parse_command(":say"), None);
    }

    #[test]
    fn parse_query_commands() {
        assert_eq!(parse_command(":query state"), Some(AppCommand::QueryState));
        assert_eq!(parse_command(":query tab"), Some(AppCommand::QueryTab));
        assert_eq!(
            parse_command(":query selected"),
            Some(AppCommand::QuerySelected)
        );
        assert_eq!(parse_command(":query invalid"), None);
    }

    #[test]
    fn parse_no_colon_prefix() {
        assert_eq!(parse_command("section 3"), None);
        assert_eq!(parse_command("quit"), None);
    }

    #[test]
    fn parse_whitespace_handling() {
        assert_eq!(parse_command("  :section 3  "), Some(AppCommand::Section(3)));
        assert_eq!(parse_command(":quit  "), Some(AppCommand::Quit));
    }

    // -- parse_json_command -------------------------------------------------

    #[test]
    fn parse_json_section() {
        assert_eq!(
            parse_json_command(r#"{"cmd":"section","args":[2]}"#),
            Some(AppCommand::Section(2))
        );
    }

    #[test]
    fn parse_json_forms() {
        assert_eq!(
            parse_json_command(r#"{"cmd":"amount","args":["50"]}"#),
            Some(AppCommand::Amount("50".into()))
        );
        assert_eq!(
            parse_json_command(r#"{"cmd":"set_field","args":["pb-5","founders","Us two"]}"#),
            Some(AppCommand::SetField(
                "pb-5".into(),
                "founders".into(),
                "Us two".into()
            ))
        );
    }

    #[test]
    fn parse_json_invalid() {
        assert_eq!(parse_json_command("not json"), None);
        assert_eq!(parse_json_command(r#"{"cmd":"unknown"}"#), None);
        assert_eq!(parse_json_command(r#"{"no_cmd":true}"#), None);
    }

    // -- execution: navigation ----------------------------------------------

    #[test]
    fn execute_section_navigation() {
        let mut app = test_app();
        assert_eq!(app.current_section, 0);
        run(&mut app, ":section 2");
        assert_eq!(app.current_section, 2);
        run(&mut app, ":section 99");
        assert_eq!(app.current_section, 2);
    }

    #[test]
    fn execute_view_jumps_section_and_tab() {
        let mut app = test_app();
        run(&mut app, ":view revenue");
        assert_eq!(app.current_section, FINANCE);
        assert_eq!(app.finance.tab, FinanceTab::Revenue);
        run(&mut app, ":view loans");
        assert_eq!(app.current_section, FUNDING);
        assert_eq!(app.funding.hub_tab, HubTab::Loans);
    }

    // -- execution: expense flow --------------------------------------------

    #[test]
    fn execute_expense_flow() {
        let mut app = test_app();
        let before = app.finance.expenses.len();
        run(&mut app, ":amount 50");
        run(&mut app, ":project General");
        run(&mut app, ":reason Test");
        run(&mut app, ":submit");
        assert_eq!(app.finance.expenses.len(), before + 1);
        let entry = app.finance.expenses.last().unwrap();
        assert_eq!(entry.amount, 50.0);
        assert_eq!(entry.project, "General");
        assert_eq!(entry.date, "Today");
        assert!(app.finance.expense_form.amount.is_empty());
        assert_eq!(app.finance.expense_form.project, "General");
        assert_eq!(app.toasts.latest_message(), Some("Expense added"));
    }

    #[test]
    fn execute_rejected_expense_mutates_nothing() {
        let mut app = test_app();
        let before = app.finance.expenses.len();
        run(&mut app, ":amount 50");
        // A whitespace-only reason does not even parse into a command, so
        // the form's reason stays empty and the guard rejects the submit.
        assert_eq!(parse_command(":reason   "), None);
        run(&mut app, ":submit");
        assert_eq!(app.finance.expenses.len(), before);
        assert_eq!(app.finance.expense_form.amount, "50");
    }

    #[test]
    fn execute_revenue_flow_routes_by_tab() {
        let mut app = test_app();
        run(&mut app, ":view revenue");
        run(&mut app, ":amount 120");
        run(&mut app, ":note Saturday pre-orders");
        run(&mut app, ":submit");
        assert_eq!(app.finance.revenue.len(), 1);
        assert_eq!(app.finance.revenue[0].amount, 120.0);
    }

    // -- execution: steps ---------------------------------------------------

    #[test]
    fn execute_open_and_save_step() {
        let mut app = test_app();
        run(&mut app, ":open pb-5");
        assert_eq!(app.current_section, PLAN);
        assert_eq!(app.plan.business.open_step_id(), Some("pb-5"));
        run(&mut app, ":field pb-5 founders Two of us");
        run(&mut app, ":save pb-5");
        let step = app.plan.business.step("pb-5").unwrap();
        assert_eq!(step.fields[0].value, "Two of us");
        assert_eq!(
            step.status,
            venture_core::types::StepStatus::Complete
        );
    }

    #[test]
    fn execute_draft_with_tick() {
        let mut app = test_app();
        let t0 = Instant::now();
        run(&mut app, ":open pb-1");
        let cmd = parse_command(":draft pb-1").unwrap();
        execute_command(&mut app, cmd, t0);
        assert!(app.plan.business.has_pending());

        let tick = parse_command(":tick").unwrap();
        execute_command(&mut app, tick, t0 + Duration::from_secs(2));
        assert!(!app.plan.business.has_pending());
        let icp = &app.plan.business.step("pb-1").unwrap().fields[0].value;
        assert!(icp.contains("Young professionals"));
    }

    #[test]
    fn execute_open_routes_funding_ids() {
        let mut app = test_app();
        run(&mut app, ":open f-3");
        assert_eq!(app.current_section, FUNDING);
        assert_eq!(app.funding.view, FundingView::Detail);
        run(&mut app, ":open fas-3-2");
        let detail = app.funding.detail.as_ref().unwrap();
        assert_eq!(detail.flow.open_step_id(), Some("fas-3-2"));
    }

    #[test]
    fn execute_toggle_task() {
        let mut app = test_app();
        run(&mut app, ":toggle t1-3");
        assert_eq!(app.track.done.get("t1-3"), Some(&true));
        run(&mut app, ":toggle t1-3");
        assert_eq!(app.track.done.get("t1-3"), Some(&false));
    }

    // -- execution: chat ----------------------------------------------------

    #[test]
    fn execute_chat_flow() {
        let mut app = test_app();
        run(&mut app, ":chat");
        assert_eq!(app.funding.view, FundingView::Chat);
        run(&mut app, ":choose 0");
        run(&mut app, ":continue");
        assert_eq!(app.funding.chat.len(), 3);
        assert!(app.funding.question_answered);
        run(&mut app, ":say what about microloans");
        assert_eq!(app.funding.chat.len(), 5);
    }

    // -- execution: booking -------------------------------------------------

    #[test]
    fn execute_booking_flow() {
        let mut app = test_app();
        run(&mut app, ":open f-1");
        run(&mut app, ":experts");
        assert_eq!(app.funding.expert_screen, ExpertScreen::List);
        run(&mut app, ":expert 2");
        assert_eq!(app.funding.expert_screen, ExpertScreen::Slots);
        run(&mut app, ":slot 1");
        run(&mut app, ":confirm");
        assert_eq!(app.funding.expert_screen, ExpertScreen::Confirmed);
        let booking = app.funding.booking.as_ref().unwrap();
        assert_eq!(booking.expert, "Aisha Thompson");
    }

    // -- execution: queries -------------------------------------------------

    #[test]
    fn execute_query_state() {
        let mut app = test_app();
        app.set_section(FUNDING);
        let result = run(&mut app, ":query state").unwrap();
        let json: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(json["section_name"], "Funding");
        assert_eq!(json["plan"]["steps_total"], 10);
        assert_eq!(json["funding"]["opportunities"], 5);
        assert_eq!(json["plan"]["pitch_unlocked"], true);
    }

    #[test]
    fn execute_query_tab_funding_sorted() {
        let mut app = test_app();
        app.set_section(FUNDING);
        let result = run(&mut app, ":query tab").unwrap();
        let json: serde_json::Value = serde_json::from_str(&result).unwrap();
        let arr = json.as_array().unwrap();
        assert!(!arr.is_empty());
        let scores: Vec<u64> = arr
            .iter()
            .map(|o| o["match"].as_u64().unwrap())
            .collect();
        for pair in scores.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn execute_query_selected_out_of_bounds() {
        let mut app = test_app();
        app.plan.selected = 999;
        let result = run(&mut app, ":query selected").unwrap();
        let json: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert!(json.is_null());
    }

    // -- execution: system --------------------------------------------------

    #[test]
    fn execute_quit_and_help() {
        let mut app = test_app();
        run(&mut app, ":quit");
        assert!(app.should_quit);
        let mut app = test_app();
        run(&mut app, ":help");
        assert!(app.show_help);
    }

    #[test]
    fn roundtrip_json_query() {
        let mut app = test_app();
        let cmd = parse_json_command(r#"{"cmd":"query_state"}"#).unwrap();
        let result = execute_command(&mut app, cmd, Instant::now());
        assert!(result.is_some());
    }
}
