use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use venture_core::config::AppConfig;
use venture_core::seed;
use venture_core::types::{BusinessProfile, FinancialPlan, TeamMember};

use crate::command;
use crate::effects::EffectManager;
use crate::sections::finance::FinanceState;
use crate::sections::funding::{FundingState, FundingView};
use crate::sections::plan::PlanState;
use crate::sections::track::TrackState;
use crate::widgets::toast::{Toast, ToastLevel, ToastManager};

/// Bottom-nav destinations.
pub const SECTION_NAMES: &[&str] = &["Plan", "Track", "Expenses", "Funding"];

pub const PLAN: usize = 0;
pub const TRACK: usize = 1;
pub const FINANCE: usize = 2;
pub const FUNDING: usize = 3;

/// Placeholder hints for the prompt bar, per section. Funding has its own
/// chat input and no prompt bar.
pub fn prompt_hint(section: usize) -> Option<&'static str> {
    match section {
        PLAN => Some("Ask me to help fill in any step of your plan..."),
        TRACK => Some("I can break down any project into tasks..."),
        FINANCE => Some("Ask me to estimate costs for your setup..."),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    pub current_section: usize,
    pub should_quit: bool,
    pub show_help: bool,

    pub in_command_mode: bool,
    pub command_buffer: String,
    pub command_result: Option<String>,

    // Immutable seed snapshots shared across sections.
    pub config: AppConfig,
    pub profile: BusinessProfile,
    pub financial: FinancialPlan,
    pub team: Vec<TeamMember>,

    // Section view-models; each owns its state exclusively.
    pub plan: PlanState,
    pub track: TrackState,
    pub finance: FinanceState,
    pub funding: FundingState,

    pub toasts: ToastManager,
    pub effects: EffectManager,
    pub last_frame: Instant,
}

impl App {
    pub fn new() -> Self {
        let config = AppConfig::default();
        Self {
            current_section: PLAN,
            should_quit: false,
            show_help: false,
            in_command_mode: false,
            command_buffer: String::new(),
            command_result: None,
            profile: seed::business_profile(),
            financial: seed::financial_plan(),
            team: seed::team_members(),
            plan: PlanState::new(&config),
            track: TrackState::new(),
            finance: FinanceState::new(),
            funding: FundingState::new(&config),
            config,
            toasts: ToastManager::new(),
            effects: EffectManager::new(),
            last_frame: Instant::now(),
        }
    }

    /// Switch the active section. In-flight draft timers belong to steps
    /// that are no longer on screen and are discarded; the rest of each
    /// section's local state stays put.
    pub fn set_section(&mut self, section: usize) {
        if section >= SECTION_NAMES.len() || section == self.current_section {
            return;
        }
        self.plan.suspend();
        self.funding.suspend();
        self.current_section = section;
        self.effects.section_swept();
        tracing::debug!(section = SECTION_NAMES[section], "section switched");
    }

    pub fn next_section(&mut self) {
        self.set_section((self.current_section + 1) % SECTION_NAMES.len());
    }

    pub fn prev_section(&mut self) {
        self.set_section((self.current_section + SECTION_NAMES.len() - 1) % SECTION_NAMES.len());
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        self.on_key_at(key, Instant::now());
    }

    /// Key dispatch with an injectable clock, so draft timing is
    /// deterministic under test.
    pub fn on_key_at(&mut self, key: KeyEvent, now: Instant) {
        // Help modal swallows everything except its own dismissal.
        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.in_command_mode {
            match key.code {
                KeyCode::Esc => {
                    self.in_command_mode = false;
                    self.command_buffer.clear();
                }
                KeyCode::Backspace => {
                    self.command_buffer.pop();
                }
                KeyCode::Enter => {
                    let line = format!(":{}", self.command_buffer);
                    self.in_command_mode = false;
                    self.command_buffer.clear();
                    if let Some(cmd) = command::parse_command(&line) {
                        self.command_result = command::execute_command(self, cmd, now);
                    } else {
                        self.command_result = Some(format!("unknown command: {}", line));
                    }
                }
                KeyCode::Char(c) => self.command_buffer.push(c),
                _ => {}
            }
            return;
        }

        // The funding chat has its own input bar: plain characters type
        // into it instead of acting as shortcuts.
        let chat_active =
            self.current_section == FUNDING && self.funding.view == FundingView::Chat;
        if chat_active && key.code != KeyCode::Char(':') {
            if let Some(toast) = self.funding.on_key(key, now) {
                self.push_toast(&toast);
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char(':') => {
                self.in_command_mode = true;
                self.command_buffer.clear();
                self.command_result = None;
            }
            KeyCode::Char(c @ '1'..='4') => {
                self.set_section((c as usize) - ('1' as usize));
            }
            KeyCode::Tab => self.next_section(),
            KeyCode::BackTab => self.prev_section(),
            _ => {
                let toast = match self.current_section {
                    PLAN => self.plan.on_key(key, now),
                    TRACK => self.track.on_key(key),
                    FINANCE => self.finance.on_key(key),
                    FUNDING => self.funding.on_key(key, now),
                    _ => None,
                };
                if let Some(text) = toast {
                    self.push_toast(&text);
                }
                if key.code == KeyCode::Enter
                    && matches!(self.current_section, PLAN | FUNDING)
                {
                    self.effects.accordion_opened();
                }
            }
        }
    }

    /// Poll deferred work: draft timers and toast expiry. Called once per
    /// event-loop pass.
    pub fn tick(&mut self, now: Instant) {
        for _ in self.plan.tick(now) {
            self.push_toast("Draft added");
            self.effects.accordion_opened();
        }
        for _ in self.funding.tick(now) {
            self.push_toast("Draft added");
            self.effects.accordion_opened();
        }
        self.toasts.tick();
    }

    pub fn push_toast(&mut self, message: &str) {
        self.toasts.push(Toast::new(message, ToastLevel::Success));
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
