//! Plan section: business-plan step builder, financial plan projections,
//! and the gated pitch deck.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use venture_core::config::AppConfig;
use venture_core::metrics::{break_even_covers, covers_per_day, format_currency, percent_of};
use venture_core::types::{Step, StepKind, StepStatus};
use venture_core::{drafts, seed};

use crate::app::App;
use crate::stepflow::{StepFlow, StepMode};
use crate::widgets::gauge_bar;

// ---------------------------------------------------------------------------
// PlanTab
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanTab {
    Business,
    Financial,
    Pitch,
}

impl PlanTab {
    pub fn label(&self) -> &'static str {
        match self {
            PlanTab::Business => "Business Plan",
            PlanTab::Financial => "Financial Plan",
            PlanTab::Pitch => "Pitch Deck",
        }
    }
}

const PLAN_TABS: [PlanTab; 3] = [PlanTab::Business, PlanTab::Financial, PlanTab::Pitch];

// ---------------------------------------------------------------------------
// PlanState
// ---------------------------------------------------------------------------

pub struct PlanState {
    pub tab: PlanTab,
    pub business: StepFlow,
    pub pitch: StepFlow,
    pub selected: usize,
    pub pitch_selected: usize,
    /// Index into the financial plan's projection periods.
    pub period: usize,
    unlock_threshold: usize,
}

impl PlanState {
    /// Hydrate local step state from the seed.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            tab: PlanTab::Business,
            business: StepFlow::new(
                seed::plan_steps(),
                drafts::plan_drafts(),
                config.draft_delay(),
            ),
            pitch: StepFlow::new(
                seed::pitch_sections(),
                drafts::DraftTable::new(),
                config.draft_delay(),
            ),
            selected: 0,
            pitch_selected: 0,
            period: 0,
            unlock_threshold: config.pitch_unlock_threshold,
        }
    }

    pub fn pitch_unlocked(&self) -> bool {
        self.business.complete_count() >= self.unlock_threshold
    }

    pub fn unlock_threshold(&self) -> usize {
        self.unlock_threshold
    }

    /// Steps still needed before the pitch deck opens.
    pub fn steps_to_unlock(&self) -> usize {
        self.unlock_threshold
            .saturating_sub(self.business.complete_count())
    }

    pub fn set_tab(&mut self, tab: PlanTab) {
        if self.tab != tab {
            // Leaving a sub-view discards its in-flight draft.
            self.business.close();
            self.pitch.close();
            self.tab = tab;
        }
    }

    fn cycle_tab(&mut self, forward: bool) {
        let idx = PLAN_TABS.iter().position(|t| *t == self.tab).unwrap_or(0);
        let next = if forward {
            (idx + 1) % PLAN_TABS.len()
        } else {
            (idx + PLAN_TABS.len() - 1) % PLAN_TABS.len()
        };
        self.set_tab(PLAN_TABS[next]);
    }

    fn active_flow(&mut self) -> Option<(&mut StepFlow, usize)> {
        match self.tab {
            PlanTab::Business => Some((&mut self.business, self.selected)),
            PlanTab::Pitch if self.pitch_unlocked() => Some((&mut self.pitch, self.pitch_selected)),
            _ => None,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) -> Option<String> {
        match key.code {
            KeyCode::Char('h') | KeyCode::Left => self.cycle_tab(false),
            KeyCode::Char('l') | KeyCode::Right => self.cycle_tab(true),
            KeyCode::Char('j') | KeyCode::Down => match self.tab {
                PlanTab::Business => {
                    if self.selected + 1 < self.business.len() {
                        self.selected += 1;
                    }
                }
                PlanTab::Pitch => {
                    if self.pitch_selected + 1 < self.pitch.len() {
                        self.pitch_selected += 1;
                    }
                }
                PlanTab::Financial => {}
            },
            KeyCode::Char('k') | KeyCode::Up => match self.tab {
                PlanTab::Business => self.selected = self.selected.saturating_sub(1),
                PlanTab::Pitch => self.pitch_selected = self.pitch_selected.saturating_sub(1),
                PlanTab::Financial => {}
            },
            KeyCode::Enter => {
                if let Some((flow, cursor)) = self.active_flow() {
                    if let Some(id) = flow.steps().get(cursor).map(|s| s.id.clone()) {
                        flow.toggle(&id);
                    }
                }
            }
            KeyCode::Char('a') => {
                if let Some((flow, cursor)) = self.active_flow() {
                    if let Some(id) = flow.steps().get(cursor).map(|s| s.id.clone()) {
                        if !flow.is_open(&id) {
                            flow.toggle(&id);
                        }
                        flow.start_draft(&id, now);
                    }
                }
            }
            KeyCode::Char('e') => {
                if let Some((flow, _)) = self.active_flow() {
                    if let Some(id) = flow.open_step_id().map(str::to_string) {
                        flow.set_mode(&id, StepMode::Manual);
                    }
                }
            }
            KeyCode::Char('c') => {
                if let Some((flow, _)) = self.active_flow() {
                    if let Some(id) = flow.open_step_id().map(str::to_string) {
                        if flow.save(&id) {
                            return Some("Step saved".into());
                        }
                    }
                }
            }
            KeyCode::Char('p') => {
                if self.tab == PlanTab::Financial {
                    self.period = (self.period + 1) % 2;
                }
            }
            _ => {}
        }
        None
    }

    /// Poll draft timers; returns the ids of steps whose drafts landed.
    pub fn tick(&mut self, now: Instant) -> Vec<String> {
        let mut applied = Vec::new();
        if let Some(id) = self.business.tick(now) {
            applied.push(id);
        }
        if let Some(id) = self.pitch.tick(now) {
            applied.push(id);
        }
        applied
    }

    /// Leaving the section discards in-flight drafts but keeps the rest of
    /// the local state.
    pub fn suspend(&mut self) {
        self.business.close();
        self.pitch.close();
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    render_pill_toggle(frame, app, chunks[0]);

    match app.plan.tab {
        PlanTab::Business => render_business(frame, app, chunks[1]),
        PlanTab::Financial => render_financial(frame, app, chunks[1]),
        PlanTab::Pitch => render_pitch(frame, app, chunks[1]),
    }
}

fn render_pill_toggle(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for tab in PLAN_TABS {
        let style = if app.plan.tab == tab {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("[{}]", tab.label()), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn step_rows<'a>(
    flow: &'a StepFlow,
    cursor: usize,
    draft_pending: bool,
    smart_body: &[ListItem<'a>],
) -> Vec<ListItem<'a>> {
    let mut items: Vec<ListItem> = Vec::new();
    let mut last_phase = "";
    let mut step_num = 0usize;

    for (idx, step) in flow.steps().iter().enumerate() {
        if step.phase != last_phase {
            last_phase = &step.phase;
            let done = flow
                .steps()
                .iter()
                .filter(|s| s.phase == step.phase && s.status == StepStatus::Complete)
                .count();
            let total = flow.steps().iter().filter(|s| s.phase == step.phase).count();
            items.push(ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {} ", step.phase),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{}/{}", done, total), Style::default().fg(Color::DarkGray)),
            ])));
        }

        step_num += 1;
        let open = flow.is_open(&step.id);
        let marker = match (step.status, open) {
            (StepStatus::Complete, _) => "*".to_string(),
            (_, true) => "v".to_string(),
            _ => format!("{}", step_num),
        };
        let marker_color = match step.status {
            StepStatus::Complete => Color::Green,
            StepStatus::InProgress => Color::Yellow,
            StepStatus::Todo => Color::DarkGray,
        };
        let row_style = if idx == cursor {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        let mut spans = vec![
            Span::styled(
                format!("  {} ", marker),
                Style::default().fg(marker_color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(step.title.clone()),
            Span::styled(
                format!("  [{}]", step.status.label()),
                Style::default().fg(marker_color),
            ),
        ];
        if step.kind == StepKind::Smart {
            spans.push(Span::styled(
                "  Powered by Financial Plan",
                Style::default().fg(Color::Magenta),
            ));
        }
        items.push(ListItem::new(Line::from(spans)).style(row_style));

        if open {
            if step.kind == StepKind::Smart {
                items.extend(smart_body.iter().cloned());
            } else {
                items.extend(expanded_step_rows(flow, step, draft_pending));
            }
        }
    }
    items
}

fn expanded_step_rows<'a>(flow: &'a StepFlow, step: &'a Step, draft_pending: bool) -> Vec<ListItem<'a>> {
    let mut items = Vec::new();
    match flow.mode(&step.id) {
        StepMode::Assistant if draft_pending => {
            items.push(ListItem::new(Line::from(Span::styled(
                "      Drafting with assistant...",
                Style::default().fg(Color::Yellow),
            ))));
        }
        StepMode::Assistant if flow.draft_applied(&step.id) => {
            items.push(ListItem::new(Line::from(Span::styled(
                "      Draft added. Edit any field before saving.",
                Style::default().fg(Color::Yellow),
            ))));
        }
        StepMode::Idle if step.status != StepStatus::Complete => {
            items.push(ListItem::new(Line::from(Span::styled(
                "      [e] fill in yourself   [a] consult assistant",
                Style::default().fg(Color::DarkGray),
            ))));
        }
        _ => {}
    }
    for field in &step.fields {
        let value = if field.value.is_empty() { "-" } else { &field.value };
        items.push(ListItem::new(Line::from(vec![
            Span::styled(
                format!("      {}: ", field.label),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(value.to_string()),
        ])));
    }
    items
}

fn render_business(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let flow = &app.plan.business;
    let complete = flow.complete_count();
    let pct = percent_of(complete as u64, flow.len() as u64) as u16;
    gauge_bar::render_gauge(
        frame,
        chunks[0],
        &format!("{}/{} steps", complete, flow.len()),
        pct,
        Color::Yellow,
    );

    // The smart break-even card gets its computed body when open.
    let smart_body = smart_breakeven_rows(app);
    let items = step_rows(flow, app.plan.selected, flow.has_pending(), &smart_body);

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Business Plan "),
    );
    frame.render_widget(list, chunks[1]);
}

fn smart_breakeven_rows(app: &App) -> Vec<ListItem<'static>> {
    let fixed = app.finance.budget.monthly_fixed_total() as f64;
    let covers = break_even_covers(fixed, app.config.avg_bowl_price, app.config.gross_margin);
    let per_day = covers_per_day(covers, app.config.operating_days_per_month);
    vec![
        ListItem::new(Line::from(vec![
            Span::styled("      Monthly Fixed ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format_currency(fixed),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled("   Break-Even ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Month {}", app.financial.break_even_month),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::styled("   Covers/Day ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("~{}", per_day),
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
        ])),
        ListItem::new(Line::from(Span::styled(
            format!(
                "      {} / (${} x {:.0}%) = {} covers/mo",
                format_currency(fixed),
                app.config.avg_bowl_price,
                app.config.gross_margin * 100.0,
                covers
            ),
            Style::default().fg(Color::DarkGray),
        ))),
        ListItem::new(Line::from(Span::styled(
            "      Auto-filled from your Financial Plan.",
            Style::default().fg(Color::Yellow),
        ))),
    ]
}

fn render_financial(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(8),
        ])
        .split(area);

    // KPI row
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);
    let kpis = [
        (
            "Estimated Budget",
            format_currency(app.financial.estimated_budget as f64),
            Color::Yellow,
        ),
        (
            "Break-Even",
            format!("Month {}", app.financial.break_even_month),
            Color::Green,
        ),
    ];
    for (i, (title, value, color)) in kpis.iter().enumerate() {
        let card = Paragraph::new(Line::from(Span::styled(
            value.clone(),
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", title)))
        .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(card, cols[i]);
    }

    // Projection table
    let period = &app.financial.periods[app.plan.period.min(app.financial.periods.len() - 1)];
    let mut rows: Vec<ListItem> = vec![ListItem::new(Line::from(Span::styled(
        format!("{:>6} {:>10} {:>10} {:>11}", "Month", "Revenue", "Expenses", "Net"),
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
    )))];
    for m in &period.months {
        let net_color = if m.net < 0 { Color::Red } else { Color::Green };
        rows.push(ListItem::new(Line::from(vec![
            Span::styled(format!("{:>6}", format!("Mo {}", m.month)), Style::default().fg(Color::DarkGray)),
            Span::raw(format!(" {:>10}", format_currency(m.revenue as f64))),
            Span::raw(format!(" {:>10}", format_currency(m.expenses as f64))),
            Span::styled(
                format!(" {:>10}", format_currency(m.net as f64)),
                Style::default().fg(net_color).add_modifier(Modifier::BOLD),
            ),
        ])));
    }
    let table = List::new(rows).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Key Financial Projections ({} Mo) [p] switch ", period.label)),
    );
    frame.render_widget(table, chunks[1]);

    // Assumptions
    let assumptions: Vec<ListItem> = app
        .financial
        .assumptions
        .iter()
        .map(|a| {
            ListItem::new(Line::from(vec![
                Span::raw(format!(" {:<24}", a.label)),
                Span::styled(
                    a.value.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();
    let list = List::new(assumptions).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Business Assumptions "),
    );
    frame.render_widget(list, chunks[2]);
}

fn render_pitch(frame: &mut Frame, app: &App, area: Rect) {
    if !app.plan.pitch_unlocked() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(1), Constraint::Min(0)])
            .split(area);
        let complete = app.plan.business.complete_count();
        let threshold = app.plan.unlock_threshold();
        let msg = Paragraph::new(vec![
            Line::from(Span::styled(
                " Pitch Deck locked",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    " Complete {} more plan step(s) to unlock.",
                    app.plan.steps_to_unlock()
                ),
                Style::default().fg(Color::DarkGray),
            )),
        ]);
        frame.render_widget(msg, chunks[0]);
        gauge_bar::render_gauge(
            frame,
            chunks[1],
            &format!("{}/{} steps", complete.min(threshold), threshold),
            percent_of(complete.min(threshold) as u64, threshold as u64) as u16,
            Color::Red,
        );
        return;
    }

    let flow = &app.plan.pitch;
    let smart_body = smart_breakeven_rows(app);
    let items = step_rows(flow, app.plan.pitch_selected, flow.has_pending(), &smart_body);
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Pitch Deck ({} slides) ", flow.len())),
    );
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    fn state() -> PlanState {
        PlanState::new(&AppConfig::default())
    }

    #[test]
    fn pitch_unlocks_at_threshold() {
        let s = state();
        // Seed ships with exactly three complete steps and threshold 3.
        assert_eq!(s.business.complete_count(), 3);
        assert!(s.pitch_unlocked());
        assert_eq!(s.steps_to_unlock(), 0);
    }

    #[test]
    fn pitch_locked_below_threshold() {
        let cfg = AppConfig {
            pitch_unlock_threshold: 5,
            ..AppConfig::default()
        };
        let s = PlanState::new(&cfg);
        assert!(!s.pitch_unlocked());
        assert_eq!(s.steps_to_unlock(), 2);
    }

    #[test]
    fn saving_steps_unlocks_pitch() {
        let cfg = AppConfig {
            pitch_unlock_threshold: 4,
            ..AppConfig::default()
        };
        let mut s = PlanState::new(&cfg);
        assert!(!s.pitch_unlocked());
        s.business.save("pb-5");
        assert!(s.pitch_unlocked());
    }

    #[test]
    fn enter_toggles_single_expansion() {
        let mut s = state();
        let now = Instant::now();
        s.on_key(key(KeyCode::Enter), now);
        assert_eq!(s.business.open_step_id(), Some("pb-0"));
        s.on_key(key(KeyCode::Char('j')), now);
        s.on_key(key(KeyCode::Enter), now);
        assert_eq!(s.business.open_step_id(), Some("pb-1"));
    }

    #[test]
    fn switching_tab_cancels_draft() {
        let mut s = state();
        let now = Instant::now();
        // Open pb-1 and start a draft.
        s.on_key(key(KeyCode::Char('j')), now);
        s.on_key(key(KeyCode::Char('a')), now);
        assert!(s.business.has_pending());
        // Move to the financial tab before the delay elapses.
        s.on_key(key(KeyCode::Char('l')), now);
        assert!(!s.business.has_pending());
        assert!(s.tick(now + AppConfig::default().draft_delay() * 2).is_empty());
    }

    #[test]
    fn period_toggle_only_on_financial_tab() {
        let mut s = state();
        let now = Instant::now();
        s.on_key(key(KeyCode::Char('p')), now);
        assert_eq!(s.period, 0);
        s.set_tab(PlanTab::Financial);
        s.on_key(key(KeyCode::Char('p')), now);
        assert_eq!(s.period, 1);
        s.on_key(key(KeyCode::Char('p')), now);
        assert_eq!(s.period, 0);
    }

    #[test]
    fn draft_lands_when_step_stays_open() {
        let mut s = state();
        let t0 = Instant::now();
        s.on_key(key(KeyCode::Char('j')), t0); // pb-1
        s.on_key(key(KeyCode::Char('a')), t0);
        let applied = s.tick(t0 + AppConfig::default().draft_delay() * 2);
        assert_eq!(applied, vec!["pb-1".to_string()]);
        let icp = s
            .business
            .step("pb-1")
            .unwrap()
            .fields
            .iter()
            .find(|f| f.key == "icp")
            .unwrap()
            .value
            .clone();
        assert!(icp.contains("Young professionals"));
    }
}
