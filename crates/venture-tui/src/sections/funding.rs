//! Funding section: opportunity hub, multi-step application detail with
//! the expert-booking sub-flow, scripted assistant chat, and funding
//! project checklists.

use std::collections::HashMap;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};
use ratatui::Frame;

use venture_core::config::AppConfig;
use venture_core::metrics::{format_currency, match_tier, percent_of, MatchTier};
use venture_core::types::{
    ChatMessage, ChatRole, Expert, FundingOpportunity, FundingProject, FundingType, ProjectTask,
    Step, StepKind, StepStatus, TimeSlotGroup,
};
use venture_core::{drafts, seed};

use crate::app::App;
use crate::stepflow::{StepFlow, StepMode};
use crate::widgets::gauge_bar;

// ---------------------------------------------------------------------------
// View states
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundingView {
    Hub,
    Detail,
    ProjectDetail,
    Chat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubTab {
    Grants,
    Loans,
    Investment,
}

impl HubTab {
    pub fn label(&self) -> &'static str {
        match self {
            HubTab::Grants => "Grants",
            HubTab::Loans => "Loans",
            HubTab::Investment => "Investment",
        }
    }

    /// The opportunity type this tab filters for; Investment has no
    /// matching inventory yet.
    fn filter(&self) -> Option<FundingType> {
        match self {
            HubTab::Grants => Some(FundingType::Grant),
            HubTab::Loans => Some(FundingType::Loan),
            HubTab::Investment => None,
        }
    }
}

const HUB_TABS: [HubTab; 3] = [HubTab::Grants, HubTab::Loans, HubTab::Investment];

/// Three-screen expert booking sub-flow. Forward-only except explicit
/// back actions; a confirmed booking is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpertScreen {
    Hidden,
    List,
    Slots,
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Booking {
    pub expert: String,
    pub day: String,
    pub time: String,
}

/// An opened application: the opportunity id plus the step flow for its
/// fillable steps (the smart context step renders separately).
pub struct ApplicationDetail {
    pub opportunity_id: String,
    pub flow: StepFlow,
    pub cursor: usize,
}

// ---------------------------------------------------------------------------
// FundingState
// ---------------------------------------------------------------------------

pub struct FundingState {
    pub view: FundingView,
    pub hub_tab: HubTab,
    pub opportunities: Vec<FundingOpportunity>,
    pub projects: Vec<FundingProject>,
    pub project_tasks: HashMap<String, Vec<ProjectTask>>,
    app_steps: HashMap<String, Vec<Step>>,
    draft_delay: std::time::Duration,

    // Hub cursors
    pub selected: usize,
    pub strip_selected: usize,

    // Application detail
    pub detail: Option<ApplicationDetail>,

    // Expert modal
    pub experts: Vec<Expert>,
    pub slots: Vec<TimeSlotGroup>,
    pub expert_screen: ExpertScreen,
    pub expert_cursor: usize,
    pub slot_cursor: usize,
    pub chosen_expert: Option<usize>,
    pub chosen_slot: Option<(String, String)>,
    pub booking: Option<Booking>,

    // Funding project detail
    pub open_project: Option<String>,
    pub task_cursor: usize,
    pub done: HashMap<String, bool>,

    // Chat
    pub chat: Vec<ChatMessage>,
    pub chat_input: String,
    pub chat_option: Option<usize>,
    pub question_answered: bool,
}

impl FundingState {
    /// Hydrate local funding state from the seed.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            view: FundingView::Hub,
            hub_tab: HubTab::Grants,
            opportunities: seed::funding_opportunities(),
            projects: seed::funding_projects(),
            project_tasks: seed::funding_project_tasks(),
            app_steps: seed::application_steps(),
            draft_delay: config.draft_delay(),
            selected: 0,
            strip_selected: 0,
            detail: None,
            experts: seed::experts(),
            slots: seed::time_slots(),
            expert_screen: ExpertScreen::Hidden,
            expert_cursor: 0,
            slot_cursor: 0,
            chosen_expert: None,
            chosen_slot: None,
            booking: None,
            open_project: None,
            task_cursor: 0,
            done: HashMap::new(),
            chat: seed::funding_chat(),
            chat_input: String::new(),
            chat_option: None,
            question_answered: false,
        }
    }

    /// Opportunities for the active hub tab, sorted descending by match
    /// score. The sort is stable so equal scores keep seed order.
    pub fn sorted_opportunities(&self) -> Vec<&FundingOpportunity> {
        let Some(kind) = self.hub_tab.filter() else {
            return Vec::new();
        };
        let mut list: Vec<&FundingOpportunity> = self
            .opportunities
            .iter()
            .filter(|o| o.kind == kind)
            .collect();
        list.sort_by_key(|o| std::cmp::Reverse(o.match_score));
        list
    }

    pub fn opportunity(&self, id: &str) -> Option<&FundingOpportunity> {
        self.opportunities.iter().find(|o| o.id == id)
    }

    /// Open the application view for an opportunity. Step 1 (the smart
    /// context card) renders on its own; the flow carries the fillable
    /// steps.
    pub fn open_detail(&mut self, opportunity_id: &str) -> bool {
        let Some(steps) = self.app_steps.get(opportunity_id) else {
            return false;
        };
        let fillable: Vec<Step> = steps
            .iter()
            .filter(|s| s.kind != StepKind::Smart)
            .cloned()
            .collect();
        self.detail = Some(ApplicationDetail {
            opportunity_id: opportunity_id.to_string(),
            flow: StepFlow::new(fillable, drafts::funding_drafts(), self.draft_delay),
            cursor: 0,
        });
        self.view = FundingView::Detail;
        tracing::debug!(opportunity = %opportunity_id, "application opened");
        true
    }

    pub fn close_detail(&mut self) {
        if let Some(detail) = &mut self.detail {
            detail.flow.close();
        }
        self.detail = None;
        self.expert_screen = ExpertScreen::Hidden;
        self.view = FundingView::Hub;
    }

    pub fn open_project_detail(&mut self, project_id: &str) -> bool {
        if !self.projects.iter().any(|p| p.id == project_id) {
            return false;
        }
        self.open_project = Some(project_id.to_string());
        self.task_cursor = 0;
        self.view = FundingView::ProjectDetail;
        true
    }

    /// Same reconciliation rule as the Track section: locally checked off
    /// or seeded complete.
    pub fn cleared(&self, task: &ProjectTask) -> bool {
        self.done.get(&task.id).copied().unwrap_or(false) || task.status == StepStatus::Complete
    }

    pub fn toggle_done(&mut self, task_id: &str) {
        let flag = self.done.entry(task_id.to_string()).or_insert(false);
        *flag = !*flag;
    }

    pub fn sorted_project_tasks(&self, project_id: &str) -> Vec<&ProjectTask> {
        let mut tasks: Vec<&ProjectTask> = self
            .project_tasks
            .get(project_id)
            .map(|v| v.iter().collect())
            .unwrap_or_default();
        tasks.sort_by_key(|t| (u8::from(self.cleared(t)), t.status.rank(), t.priority.rank()));
        tasks
    }

    pub fn project_progress(&self, project_id: &str) -> (u32, u32, u32) {
        let tasks = self.project_tasks.get(project_id);
        match tasks {
            Some(tasks) => {
                let cleared = tasks.iter().filter(|t| self.cleared(t)).count() as u32;
                let total = tasks.len() as u32;
                (cleared, total, percent_of(cleared as u64, total as u64))
            }
            None => (0, 0, 0),
        }
    }

    // -- Chat ---------------------------------------------------------------

    /// The embedded question is a one-shot gate: selectable only while it
    /// has never been answered.
    pub fn question_active(&self) -> bool {
        !self.question_answered
            && self
                .chat
                .first()
                .is_some_and(|m| m.question.is_some())
    }

    pub fn question_options(&self) -> Vec<String> {
        self.chat
            .first()
            .and_then(|m| m.question.as_ref())
            .map(|q| q.options.clone())
            .unwrap_or_default()
    }

    pub fn select_option(&mut self, index: usize) -> bool {
        if !self.question_active() || index >= self.question_options().len() {
            return false;
        }
        self.chat_option = Some(index);
        true
    }

    /// Confirm the selected option: append the user echo and one canned
    /// follow-up referencing it. Afterwards the question can never fire
    /// again.
    pub fn continue_question(&mut self) -> bool {
        if !self.question_active() {
            return false;
        }
        let Some(index) = self.chat_option else {
            return false;
        };
        let Some(option) = self.question_options().get(index).cloned() else {
            return false;
        };
        self.chat.push(ChatMessage::user(option.clone()));
        self.chat.push(ChatMessage::assistant(format!(
            "Great choice! Let me find the best {} opportunities for your Ramen Shop in South Austin. I'll look at your business profile and match you with the most relevant options.",
            option.to_lowercase()
        )));
        self.question_answered = true;
        self.chat_option = None;
        tracing::debug!(option = %option, "funding question answered");
        true
    }

    /// Free text always appends the user message plus one fixed canned
    /// acknowledgement; blank input is a no-op.
    pub fn send_chat(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.chat.push(ChatMessage::user(text));
        self.chat.push(ChatMessage::assistant(
            "Thanks for that! I'm researching funding options tailored to your profile. I'll have some recommendations for you shortly.",
        ));
        true
    }

    // -- Expert booking -----------------------------------------------------

    /// Flattened (day, time) pairs across the slot groups.
    pub fn flat_slots(&self) -> Vec<(String, String)> {
        self.slots
            .iter()
            .flat_map(|g| g.times.iter().map(move |t| (g.day.clone(), t.clone())))
            .collect()
    }

    /// Confirm the booking. Terminal: there is no cancel or reschedule.
    pub fn confirm_booking(&mut self) -> Option<Booking> {
        let expert = self.experts.get(self.chosen_expert?)?;
        let (day, time) = self.chosen_slot.clone()?;
        let booking = Booking {
            expert: expert.name.clone(),
            day,
            time,
        };
        self.booking = Some(booking.clone());
        self.expert_screen = ExpertScreen::Confirmed;
        tracing::debug!(expert = %booking.expert, "consult booked");
        Some(booking)
    }

    // -- Key handling -------------------------------------------------------

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) -> Option<String> {
        if self.expert_screen != ExpertScreen::Hidden {
            return self.on_expert_key(key);
        }
        match self.view {
            FundingView::Hub => self.on_hub_key(key),
            FundingView::Detail => self.on_detail_key(key, now),
            FundingView::ProjectDetail => self.on_project_key(key),
            FundingView::Chat => self.on_chat_key(key),
        }
    }

    fn on_hub_key(&mut self, key: KeyEvent) -> Option<String> {
        match key.code {
            KeyCode::Char('h') | KeyCode::Left => {
                let idx = HUB_TABS.iter().position(|t| *t == self.hub_tab).unwrap_or(0);
                self.hub_tab = HUB_TABS[(idx + HUB_TABS.len() - 1) % HUB_TABS.len()];
                self.selected = 0;
            }
            KeyCode::Char('l') | KeyCode::Right => {
                let idx = HUB_TABS.iter().position(|t| *t == self.hub_tab).unwrap_or(0);
                self.hub_tab = HUB_TABS[(idx + 1) % HUB_TABS.len()];
                self.selected = 0;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let len = self.sorted_opportunities().len();
                if len > 0 && self.selected + 1 < len {
                    self.selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Char(',') => self.strip_selected = self.strip_selected.saturating_sub(1),
            KeyCode::Char('.') => {
                if self.strip_selected + 1 < self.projects.len() {
                    self.strip_selected += 1;
                }
            }
            KeyCode::Enter => {
                let id = self
                    .sorted_opportunities()
                    .get(self.selected)
                    .map(|o| o.id.clone());
                if let Some(id) = id {
                    self.open_detail(&id);
                }
            }
            KeyCode::Char('p') => {
                let id = self.projects.get(self.strip_selected).map(|p| p.id.clone());
                if let Some(id) = id {
                    self.open_project_detail(&id);
                }
            }
            KeyCode::Char('m') => {
                self.view = FundingView::Chat;
            }
            _ => {}
        }
        None
    }

    fn on_detail_key(&mut self, key: KeyEvent, now: Instant) -> Option<String> {
        match key.code {
            KeyCode::Esc => self.close_detail(),
            KeyCode::Char('b') => {
                self.expert_screen = ExpertScreen::List;
                self.expert_cursor = 0;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if let Some(detail) = &mut self.detail {
                    if detail.cursor + 1 < detail.flow.len() {
                        detail.cursor += 1;
                    }
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if let Some(detail) = &mut self.detail {
                    detail.cursor = detail.cursor.saturating_sub(1);
                }
            }
            KeyCode::Enter => {
                if let Some(detail) = &mut self.detail {
                    if let Some(id) = detail.flow.steps().get(detail.cursor).map(|s| s.id.clone()) {
                        detail.flow.toggle(&id);
                    }
                }
            }
            KeyCode::Char('a') => {
                if let Some(detail) = &mut self.detail {
                    if let Some(id) = detail.flow.steps().get(detail.cursor).map(|s| s.id.clone()) {
                        if !detail.flow.is_open(&id) {
                            detail.flow.toggle(&id);
                        }
                        detail.flow.start_draft(&id, now);
                    }
                }
            }
            KeyCode::Char('e') => {
                if let Some(detail) = &mut self.detail {
                    if let Some(id) = detail.flow.open_step_id().map(str::to_string) {
                        detail.flow.set_mode(&id, StepMode::Manual);
                    }
                }
            }
            KeyCode::Char('c') => {
                if let Some(detail) = &mut self.detail {
                    if let Some(id) = detail.flow.open_step_id().map(str::to_string) {
                        if detail.flow.save(&id) {
                            return Some("Step saved".into());
                        }
                    }
                }
            }
            _ => {}
        }
        None
    }

    fn on_expert_key(&mut self, key: KeyEvent) -> Option<String> {
        match self.expert_screen {
            ExpertScreen::List => match key.code {
                KeyCode::Esc => self.expert_screen = ExpertScreen::Hidden,
                KeyCode::Char('j') | KeyCode::Down => {
                    if self.expert_cursor + 1 < self.experts.len() {
                        self.expert_cursor += 1;
                    }
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.expert_cursor = self.expert_cursor.saturating_sub(1)
                }
                KeyCode::Enter => {
                    self.chosen_expert = Some(self.expert_cursor);
                    self.slot_cursor = 0;
                    self.chosen_slot = None;
                    self.expert_screen = ExpertScreen::Slots;
                }
                _ => {}
            },
            ExpertScreen::Slots => match key.code {
                KeyCode::Esc => self.expert_screen = ExpertScreen::List,
                KeyCode::Char('j') | KeyCode::Down => {
                    if self.slot_cursor + 1 < self.flat_slots().len() {
                        self.slot_cursor += 1;
                    }
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.slot_cursor = self.slot_cursor.saturating_sub(1)
                }
                KeyCode::Enter => {
                    self.chosen_slot = self.flat_slots().get(self.slot_cursor).cloned();
                }
                KeyCode::Char('b') => {
                    if let Some(booking) = self.confirm_booking() {
                        return Some(format!(
                            "Booked {} at {} with {}",
                            booking.day, booking.time, booking.expert
                        ));
                    }
                }
                _ => {}
            },
            ExpertScreen::Confirmed => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                    self.expert_screen = ExpertScreen::Hidden;
                }
            }
            ExpertScreen::Hidden => {}
        }
        None
    }

    fn on_project_key(&mut self, key: KeyEvent) -> Option<String> {
        match key.code {
            KeyCode::Esc => {
                self.open_project = None;
                self.view = FundingView::Hub;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if let Some(id) = self.open_project.clone() {
                    let len = self.sorted_project_tasks(&id).len();
                    if len > 0 && self.task_cursor + 1 < len {
                        self.task_cursor += 1;
                    }
                }
            }
            KeyCode::Char('k') | KeyCode::Up => self.task_cursor = self.task_cursor.saturating_sub(1),
            KeyCode::Enter | KeyCode::Char('x') => {
                if let Some(id) = self.open_project.clone() {
                    let task_id = self
                        .sorted_project_tasks(&id)
                        .get(self.task_cursor)
                        .map(|t| t.id.clone());
                    if let Some(task_id) = task_id {
                        self.toggle_done(&task_id);
                    }
                }
            }
            KeyCode::Char('m') => self.view = FundingView::Chat,
            _ => {}
        }
        None
    }

    /// Chat captures plain characters into its own input bar; Esc returns
    /// to the hub.
    fn on_chat_key(&mut self, key: KeyEvent) -> Option<String> {
        match key.code {
            KeyCode::Esc => self.view = FundingView::Hub,
            KeyCode::Backspace => {
                self.chat_input.pop();
            }
            KeyCode::Up => {
                if self.question_active() {
                    let len = self.question_options().len();
                    if len > 0 {
                        let current = self.chat_option.unwrap_or(0);
                        self.chat_option = Some(current.saturating_sub(1));
                    }
                }
            }
            KeyCode::Down => {
                if self.question_active() {
                    let len = self.question_options().len();
                    if len > 0 {
                        let next = match self.chat_option {
                            Some(i) => (i + 1).min(len - 1),
                            None => 0,
                        };
                        self.chat_option = Some(next);
                    }
                }
            }
            KeyCode::Enter => {
                if !self.chat_input.trim().is_empty() {
                    let text = std::mem::take(&mut self.chat_input);
                    self.send_chat(&text);
                } else if self.question_active() && self.chat_option.is_some() {
                    self.continue_question();
                }
            }
            KeyCode::Char(c) => self.chat_input.push(c),
            _ => {}
        }
        None
    }

    /// Poll the application draft timer.
    pub fn tick(&mut self, now: Instant) -> Vec<String> {
        let mut applied = Vec::new();
        if let Some(detail) = &mut self.detail {
            if let Some(id) = detail.flow.tick(now) {
                applied.push(id);
            }
        }
        applied
    }

    /// Leaving the section discards in-flight drafts.
    pub fn suspend(&mut self) {
        if let Some(detail) = &mut self.detail {
            detail.flow.close();
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn tier_color(score: u8) -> Color {
    match match_tier(score) {
        MatchTier::Strong => Color::Green,
        MatchTier::Medium => Color::Yellow,
        MatchTier::Weak => Color::DarkGray,
    }
}

fn type_color(kind: FundingType) -> Color {
    match kind {
        FundingType::Grant => Color::Green,
        FundingType::Loan => Color::Yellow,
        FundingType::Scholarship => Color::Cyan,
    }
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    match app.funding.view {
        FundingView::Hub => render_hub(frame, app, area),
        FundingView::Detail => render_detail(frame, app, area),
        FundingView::ProjectDetail => render_project_detail(frame, app, area),
        FundingView::Chat => render_chat(frame, app, area),
    }
    if app.funding.expert_screen != ExpertScreen::Hidden {
        render_expert_modal(frame, app);
    }
}

fn render_hub(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2 + app.funding.projects.len() as u16),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    // Funding projects strip.
    let mut rows: Vec<ListItem> = Vec::new();
    for (idx, project) in app.funding.projects.iter().enumerate() {
        let (cleared, total, pct) = app.funding.project_progress(&project.id);
        let style = if idx == app.funding.strip_selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        let mut spans = vec![
            Span::styled(
                format!(" {} ", project.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("[{}] ", project.kind.label()),
                Style::default().fg(type_color(project.kind)),
            ),
            Span::styled(
                format!("{}/{} tasks {}%", cleared, total, pct),
                Style::default().fg(Color::Magenta),
            ),
        ];
        if project.notifications > 0 {
            spans.push(Span::styled(
                format!("  {}!", project.notifications),
                Style::default().fg(Color::Red),
            ));
        }
        rows.push(ListItem::new(Line::from(spans)).style(style));
    }
    let strip = List::new(rows).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Funding Projects [,/.] select [p] open "),
    );
    frame.render_widget(strip, chunks[0]);

    // Tab bar.
    let mut spans = vec![Span::raw(" ")];
    for tab in HUB_TABS {
        let style = if app.funding.hub_tab == tab {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("[{}]", tab.label()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        "   [m] ask the funding assistant",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);

    // Opportunity list.
    let sorted = app.funding.sorted_opportunities();
    let mut items: Vec<ListItem> = Vec::new();
    if app.funding.hub_tab == HubTab::Investment {
        items.push(ListItem::new(Line::from(Span::styled(
            " Investment Coming Soon: we're building connections to angel investors and VCs.",
            Style::default().fg(Color::DarkGray),
        ))));
    } else {
        items.push(ListItem::new(Line::from(Span::styled(
            format!(
                " {} {} matched to your business",
                sorted.len(),
                if sorted.len() == 1 { "opportunity" } else { "opportunities" }
            ),
            Style::default().fg(Color::DarkGray),
        ))));
    }
    for (idx, opp) in sorted.iter().enumerate() {
        let style = if idx == app.funding.selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        items.push(
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {}% ", opp.match_score),
                    Style::default()
                        .fg(tier_color(opp.match_score))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("[{}] ", opp.kind.label()),
                    Style::default().fg(type_color(opp.kind)),
                ),
                Span::raw(opp.name.clone()),
                Span::styled(
                    format!("  {} / Due {}", opp.amount, opp.deadline),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(format!("  {}", opp.status), Style::default().fg(Color::Green)),
            ]))
            .style(style),
        );
    }
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Funding Hub "),
    );
    frame.render_widget(list, chunks[2]);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let Some(detail) = &app.funding.detail else {
        return;
    };
    let Some(opp) = app.funding.opportunity(&detail.opportunity_id) else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(9),
            Constraint::Min(0),
        ])
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", opp.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{}% Match", opp.match_score),
                Style::default().fg(tier_color(opp.match_score)),
            ),
        ]),
        Line::from(Span::styled(
            format!(
                " [{}] {} / Due {}   [Esc] All Funding  [b] Book a 30-Min Consult",
                opp.kind.label(),
                opp.amount,
                opp.deadline
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(header, chunks[0]);

    // Step 1: always-expanded context card, auto-populated from the plan.
    let covers_day = app
        .financial
        .assumptions
        .iter()
        .find(|a| a.label == "Covers/Day (Month 6)")
        .map(|a| a.value.clone())
        .unwrap_or_else(|| "-".into());
    let context_lines = vec![
        Line::from(Span::styled(
            " Step 1: Business Plan Context  [Complete]",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            " Auto-pulled from your plan",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(format!(
            "   Business    {} - {}",
            app.profile.name, app.profile.location
        )),
        Line::from("   Model       Dine-in / Takeout / Catering"),
        Line::from("   Target      Young professionals 25-38"),
        Line::from(format!(
            "   Break-Even  Month {} at ~{} covers/day",
            app.financial.break_even_month, covers_day
        )),
        Line::from(format!(
            "   Budget Need {} total",
            format_currency(app.financial.estimated_budget as f64)
        )),
        Line::from(Span::styled(
            " This context is automatically shared with your application.",
            Style::default().fg(Color::Yellow),
        )),
    ];
    let context = Paragraph::new(context_lines)
        .block(Block::default().borders(Borders::ALL).title(" Application Steps "));
    frame.render_widget(context, chunks[1]);

    // Steps 2+.
    let mut items: Vec<ListItem> = Vec::new();
    for (idx, step) in detail.flow.steps().iter().enumerate() {
        let open = detail.flow.is_open(&step.id);
        let done = step.status == StepStatus::Complete;
        let marker = if done {
            "*".to_string()
        } else if open {
            "v".to_string()
        } else {
            format!("{}", idx + 2)
        };
        let style = if idx == detail.cursor {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        items.push(
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {} ", marker),
                    Style::default()
                        .fg(if done { Color::Green } else { Color::Yellow })
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(step.title.clone()),
                Span::styled(
                    format!("  [{}]", step.status.label()),
                    Style::default().fg(if done { Color::Green } else { Color::DarkGray }),
                ),
            ]))
            .style(style),
        );
        if open {
            if detail.flow.has_pending() {
                items.push(ListItem::new(Line::from(Span::styled(
                    "      Drafting with assistant...",
                    Style::default().fg(Color::Yellow),
                ))));
            } else if detail.flow.draft_applied(&step.id) {
                items.push(ListItem::new(Line::from(Span::styled(
                    "      Draft added. Edit any field before saving.",
                    Style::default().fg(Color::Yellow),
                ))));
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
        }
    }
    let list = List::new(items).block(Block::default().borders(Borders::ALL));
    frame.render_widget(list, chunks[2]);
}

fn render_project_detail(frame: &mut Frame, app: &App, area: Rect) {
    let Some(id) = app.funding.open_project.as_deref() else {
        return;
    };
    let Some(project) = app.funding.projects.iter().find(|p| p.id == id) else {
        return;
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let (cleared, total, pct) = app.funding.project_progress(id);
    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", project.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("[{}]", project.kind.label()),
                Style::default().fg(type_color(project.kind)),
            ),
        ]),
        Line::from(Span::styled(
            format!(
                " {} / Due {}   [Esc] Funding Projects  [m] find more funding",
                project.amount, project.deadline
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(header, chunks[0]);

    gauge_bar::render_gauge(
        frame,
        chunks[1],
        &format!("{}/{} tasks", cleared, total),
        pct as u16,
        Color::Magenta,
    );

    let tasks = app.funding.sorted_project_tasks(id);
    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let cleared = app.funding.cleared(task);
            let check = if cleared { "[x]" } else { "[ ]" };
            let title_style = if cleared {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };
            let mut spans = vec![
                Span::styled(
                    format!(" {} ", check),
                    Style::default().fg(if cleared { Color::Green } else { Color::DarkGray }),
                ),
                Span::styled(task.title.clone(), title_style),
            ];
            if task.title == "Extract Business Plan" {
                spans.push(Span::styled(
                    "  From Business Plan",
                    Style::default().fg(Color::Magenta),
                ));
            }
            spans.push(Span::styled(
                format!("  {}", task.priority.label()),
                Style::default().fg(match task.priority {
                    venture_core::types::Priority::High => Color::Red,
                    venture_core::types::Priority::Medium => Color::Yellow,
                    venture_core::types::Priority::Low => Color::DarkGray,
                }),
            ));
            let style = if idx == app.funding.task_cursor {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Tasks "));
    frame.render_widget(list, chunks[2]);
}

fn render_chat(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        " [Esc] Funding Hub ------- Today -------",
        Style::default().fg(Color::DarkGray),
    ))];
    for msg in &app.funding.chat {
        match msg.role {
            ChatRole::Assistant => {
                lines.push(Line::from(vec![
                    Span::styled(" assistant ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                    Span::raw(msg.text.clone()),
                ]));
                if let Some(note) = &msg.context_note {
                    lines.push(Line::from(Span::styled(
                        format!("           {}", note),
                        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                    )));
                }
                if let Some(question) = &msg.question {
                    if app.funding.question_active() {
                        lines.push(Line::from(Span::styled(
                            format!("           {}", question.prompt),
                            Style::default().add_modifier(Modifier::BOLD),
                        )));
                        for (idx, option) in question.options.iter().enumerate() {
                            let selected = app.funding.chat_option == Some(idx);
                            let glyph = if selected { "(x)" } else { "( )" };
                            let style = if selected {
                                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                            } else {
                                Style::default()
                            };
                            lines.push(Line::from(Span::styled(
                                format!("           {} {}", glyph, option),
                                style,
                            )));
                        }
                        lines.push(Line::from(Span::styled(
                            "           Up/Down to choose, Enter to continue",
                            Style::default().fg(Color::DarkGray),
                        )));
                    }
                }
            }
            ChatRole::User => {
                lines.push(Line::from(vec![
                    Span::styled("       you ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                    Span::raw(msg.text.clone()),
                ]));
            }
        }
    }
    let history = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Funding Assistant "),
    );
    frame.render_widget(history, chunks[0]);

    let input_shown: &str = if app.funding.chat_input.is_empty() {
        "Ask about grants, loans, investors..."
    } else {
        &app.funding.chat_input
    };
    let input_style = if app.funding.chat_input.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let input = Paragraph::new(Line::from(Span::styled(format!(" {}", input_shown), input_style)))
        .block(Block::default().borders(Borders::ALL).title(" Message "));
    frame.render_widget(input, chunks[1]);
}

fn render_expert_modal(frame: &mut Frame, app: &App) {
    let area = modal_rect(frame.area());
    frame.render_widget(Clear, area);

    match app.funding.expert_screen {
        ExpertScreen::List => {
            let mut items: Vec<ListItem> = vec![ListItem::new(Line::from(Span::styled(
                " Certified advisors specialising in food service funding",
                Style::default().fg(Color::DarkGray),
            )))];
            for (idx, expert) in app.funding.experts.iter().enumerate() {
                let style = if idx == app.funding.expert_cursor {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                items.push(
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            format!(" {} ", expert.name),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!("{} ", expert.title),
                            Style::default().fg(Color::DarkGray),
                        ),
                        Span::styled(
                            format!("* {:.1} ({})", expert.rating, expert.reviews),
                            Style::default().fg(Color::Yellow),
                        ),
                    ]))
                    .style(style),
                );
            }
            let list = List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Choose a Funding Expert ")
                    .border_style(Style::default().fg(Color::Magenta)),
            );
            frame.render_widget(list, area);
        }
        ExpertScreen::Slots => {
            let expert_name = app
                .funding
                .chosen_expert
                .and_then(|i| app.funding.experts.get(i))
                .map(|e| e.name.clone())
                .unwrap_or_default();
            let mut items: Vec<ListItem> = vec![ListItem::new(Line::from(Span::styled(
                format!(" Available times with {}  [Esc] All Experts", expert_name),
                Style::default().fg(Color::DarkGray),
            )))];
            for (idx, (day, time)) in app.funding.flat_slots().iter().enumerate() {
                let chosen = app
                    .funding
                    .chosen_slot
                    .as_ref()
                    .is_some_and(|(d, t)| d == day && t == time);
                let glyph = if chosen { "(x)" } else { "( )" };
                let style = if idx == app.funding.slot_cursor {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                items.push(
                    ListItem::new(Line::from(format!(" {} {} at {}", glyph, day, time))).style(style),
                );
            }
            items.push(ListItem::new(Line::from(Span::styled(
                " Enter selects a slot, [b] confirms the booking",
                Style::default().fg(Color::DarkGray),
            ))));
            let list = List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Pick a Time ")
                    .border_style(Style::default().fg(Color::Magenta)),
            );
            frame.render_widget(list, area);
        }
        ExpertScreen::Confirmed => {
            let booking = app.funding.booking.clone();
            let mut lines = vec![Line::from(Span::styled(
                " You're Booked!",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ))];
            if let Some(b) = booking {
                lines.push(Line::from(format!(" {} at {} with {}", b.day, b.time, b.expert)));
            }
            lines.push(Line::from(Span::styled(
                " Calendar invite sent. Bring your draft application.",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(Span::styled(
                " Press Enter to close",
                Style::default().fg(Color::DarkGray),
            )));
            let card = Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Consult Booked ")
                    .border_style(Style::default().fg(Color::Green)),
            );
            frame.render_widget(card, area);
        }
        ExpertScreen::Hidden => {}
    }
}

fn modal_rect(parent: Rect) -> Rect {
    let width = (parent.width * 70 / 100).max(20);
    let height = (parent.height * 60 / 100).max(8);
    Rect::new(
        parent.x + (parent.width.saturating_sub(width)) / 2,
        parent.y + (parent.height.saturating_sub(height)) / 2,
        width,
        height,
    )
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

    fn state() -> FundingState {
        FundingState::new(&AppConfig::default())
    }

    #[test]
    fn opportunities_sorted_descending_by_match() {
        let s = state();
        let sorted = s.sorted_opportunities();
        assert!(!sorted.is_empty());
        for pair in sorted.windows(2) {
            assert!(pair[0].match_score >= pair[1].match_score);
        }
        assert_eq!(sorted[0].id, "f-1");
    }

    #[test]
    fn hub_tabs_filter_by_type() {
        let mut s = state();
        assert!(s
            .sorted_opportunities()
            .iter()
            .all(|o| o.kind == FundingType::Grant));
        s.hub_tab = HubTab::Loans;
        assert_eq!(s.sorted_opportunities().len(), 2);
        s.hub_tab = HubTab::Investment;
        assert!(s.sorted_opportunities().is_empty());
    }

    #[test]
    fn open_detail_skips_smart_context_step() {
        let mut s = state();
        assert!(s.open_detail("f-1"));
        let detail = s.detail.as_ref().unwrap();
        assert_eq!(s.view, FundingView::Detail);
        assert!(detail.flow.steps().iter().all(|st| st.kind != StepKind::Smart));
        assert_eq!(detail.flow.steps()[0].id, "fas-1-2");
    }

    #[test]
    fn application_draft_applies_in_place() {
        let mut s = state();
        let t0 = Instant::now();
        s.open_detail("f-1");
        s.on_key(key(KeyCode::Enter), t0); // open fas-1-2
        s.on_key(key(KeyCode::Char('a')), t0);
        let applied = s.tick(t0 + AppConfig::default().draft_delay() * 2);
        assert_eq!(applied, vec!["fas-1-2".to_string()]);
        let detail = s.detail.as_ref().unwrap();
        let overview = detail.flow.step("fas-1-2").unwrap().fields[0].value.clone();
        assert!(overview.contains("tonkotsu-first"));
    }

    #[test]
    fn closing_detail_cancels_draft() {
        let mut s = state();
        let t0 = Instant::now();
        s.open_detail("f-1");
        s.on_key(key(KeyCode::Enter), t0);
        s.on_key(key(KeyCode::Char('a')), t0);
        s.on_key(key(KeyCode::Esc), t0);
        assert_eq!(s.view, FundingView::Hub);
        assert!(s.tick(t0 + AppConfig::default().draft_delay() * 2).is_empty());
    }

    #[test]
    fn chat_question_is_one_shot() {
        let mut s = state();
        assert!(s.question_active());
        assert!(s.select_option(1));
        assert!(s.continue_question());

        // Echo + canned follow-up referencing the option.
        assert_eq!(s.chat.len(), 3);
        assert_eq!(s.chat[1].role, ChatRole::User);
        assert_eq!(s.chat[1].text, "SBA / Bank Loans");
        assert!(s.chat[2].text.contains("sba / bank loans"));

        // The gate never reopens.
        assert!(!s.question_active());
        assert!(!s.select_option(0));
        assert!(!s.continue_question());
        assert_eq!(s.chat.len(), 3);
    }

    #[test]
    fn chat_free_text_appends_pair() {
        let mut s = state();
        let before = s.chat.len();
        assert!(s.send_chat("What about microloans?"));
        assert_eq!(s.chat.len(), before + 2);
        assert_eq!(s.chat[before].role, ChatRole::User);
        assert_eq!(s.chat[before + 1].role, ChatRole::Assistant);
    }

    #[test]
    fn chat_blank_text_is_noop() {
        let mut s = state();
        let before = s.chat.len();
        assert!(!s.send_chat("   "));
        assert_eq!(s.chat.len(), before);
    }

    #[test]
    fn chat_keys_type_into_input() {
        let mut s = state();
        s.view = FundingView::Chat;
        for c in "hi".chars() {
            s.on_key(key(KeyCode::Char(c)), Instant::now());
        }
        assert_eq!(s.chat_input, "hi");
        s.on_key(key(KeyCode::Enter), Instant::now());
        assert!(s.chat_input.is_empty());
        assert_eq!(s.chat.last().unwrap().role, ChatRole::Assistant);
    }

    #[test]
    fn expert_flow_forward_and_back() {
        let mut s = state();
        s.open_detail("f-1");
        s.on_key(key(KeyCode::Char('b')), Instant::now());
        assert_eq!(s.expert_screen, ExpertScreen::List);

        s.on_key(key(KeyCode::Char('j')), Instant::now());
        s.on_key(key(KeyCode::Enter), Instant::now());
        assert_eq!(s.expert_screen, ExpertScreen::Slots);
        assert_eq!(s.chosen_expert, Some(1));

        // Back to the list, then forward again.
        s.on_key(key(KeyCode::Esc), Instant::now());
        assert_eq!(s.expert_screen, ExpertScreen::List);
        s.on_key(key(KeyCode::Enter), Instant::now());

        // Confirm requires a chosen slot.
        s.on_key(key(KeyCode::Char('b')), Instant::now());
        assert_eq!(s.expert_screen, ExpertScreen::Slots);
        s.on_key(key(KeyCode::Enter), Instant::now());
        assert!(s.chosen_slot.is_some());
        let toast = s.on_key(key(KeyCode::Char('b')), Instant::now());
        assert_eq!(s.expert_screen, ExpertScreen::Confirmed);
        assert!(toast.unwrap().contains("Booked"));

        // Terminal: the booking survives closing the modal.
        s.on_key(key(KeyCode::Enter), Instant::now());
        assert_eq!(s.expert_screen, ExpertScreen::Hidden);
        assert!(s.booking.is_some());
    }

    #[test]
    fn project_detail_toggle_and_sort() {
        let mut s = state();
        assert!(s.open_project_detail("fp-1"));
        let tasks = s.sorted_project_tasks("fp-1");
        // Seed-complete tasks sink below the live ones.
        assert!(!s.cleared(tasks[0]));
        let first = tasks[0].id.clone();
        s.toggle_done(&first);
        let resorted = s.sorted_project_tasks("fp-1");
        assert_ne!(resorted[0].id, first);
    }

    #[test]
    fn project_progress_counts_seeded_complete() {
        let s = state();
        let (cleared, total, _) = s.project_progress("fp-1");
        assert_eq!((cleared, total), (2, 6));
    }
}
