//! Finance section: expense and revenue logging plus the budget dashboard.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use venture_core::error::FormError;
use venture_core::metrics::{break_even_covers, covers_per_day, format_currency, sum_by};
use venture_core::seed;
use venture_core::types::{entry_id, BudgetData, ExpenseEntry, RevenueEntry};

use crate::app::App;

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinanceTab {
    Expenses,
    Revenue,
    Dashboard,
}

const FINANCE_TABS: [FinanceTab; 3] =
    [FinanceTab::Expenses, FinanceTab::Revenue, FinanceTab::Dashboard];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseSubView {
    Entries,
    ByProject,
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

/// Draft contents of the add-expense form. Amount and reason are held as
/// raw text until the submit guard parses them.
#[derive(Debug, Clone, Default)]
pub struct ExpenseForm {
    pub amount: String,
    pub project: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct RevenueForm {
    pub amount: String,
    pub source: String,
    pub note: String,
}

fn parse_amount(raw: &str) -> Result<f64, FormError> {
    let value: f64 = raw.trim().parse().map_err(|_| FormError::InvalidAmount)?;
    if !value.is_finite() {
        return Err(FormError::InvalidAmount);
    }
    if value <= 0.0 {
        return Err(FormError::NonPositiveAmount);
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// FinanceState
// ---------------------------------------------------------------------------

pub struct FinanceState {
    pub tab: FinanceTab,
    pub sub_view: ExpenseSubView,
    pub expenses: Vec<ExpenseEntry>,
    pub revenue: Vec<RevenueEntry>,
    pub projects: Vec<String>,
    pub sources: Vec<String>,
    pub expense_form: ExpenseForm,
    pub revenue_form: RevenueForm,
    pub budget_required: i64,
    pub budget_available: i64,
    pub budget: BudgetData,
}

impl FinanceState {
    /// Hydrate local entry lists and form defaults from the seed.
    pub fn new() -> Self {
        let finance = seed::finance_seed();
        let revenue = seed::revenue_seed();
        Self {
            tab: FinanceTab::Expenses,
            sub_view: ExpenseSubView::Entries,
            expenses: finance.expenses,
            revenue: revenue.entries,
            expense_form: ExpenseForm {
                project: finance.projects.first().cloned().unwrap_or_default(),
                ..ExpenseForm::default()
            },
            revenue_form: RevenueForm {
                source: revenue.sources.first().cloned().unwrap_or_default(),
                ..RevenueForm::default()
            },
            projects: finance.projects,
            sources: revenue.sources,
            budget_required: finance.budget_required,
            budget_available: finance.budget_available,
            budget: seed::budget_data(),
        }
    }

    pub fn expense_form_valid(&self) -> bool {
        parse_amount(&self.expense_form.amount).is_ok() && !self.expense_form.reason.trim().is_empty()
    }

    pub fn revenue_form_valid(&self) -> bool {
        parse_amount(&self.revenue_form.amount).is_ok()
    }

    /// Append a new expense from the form. The guard runs before any
    /// mutation: a rejected submit leaves both the list and the form
    /// untouched. On success the amount and reason clear; the project
    /// selection stays.
    pub fn submit_expense(&mut self) -> Result<ExpenseEntry, FormError> {
        let amount = parse_amount(&self.expense_form.amount)?;
        let reason = self.expense_form.reason.trim();
        if reason.is_empty() {
            return Err(FormError::MissingReason);
        }
        let entry = ExpenseEntry {
            id: entry_id("e"),
            amount,
            project: self.expense_form.project.clone(),
            reason: reason.to_string(),
            date: "Today".into(),
        };
        tracing::debug!(amount, project = %entry.project, "expense added");
        self.expenses.push(entry.clone());
        self.expense_form.amount.clear();
        self.expense_form.reason.clear();
        Ok(entry)
    }

    /// Append a new revenue entry from the form; only the amount is
    /// required.
    pub fn submit_revenue(&mut self) -> Result<RevenueEntry, FormError> {
        let amount = parse_amount(&self.revenue_form.amount)?;
        let entry = RevenueEntry {
            id: entry_id("r"),
            amount,
            source: self.revenue_form.source.clone(),
            note: self.revenue_form.note.trim().to_string(),
            date: "Today".into(),
        };
        tracing::debug!(amount, source = %entry.source, "revenue added");
        self.revenue.push(entry.clone());
        self.revenue_form.amount.clear();
        self.revenue_form.note.clear();
        Ok(entry)
    }

    /// Fold the expense list into (project, total) pairs in first-seen
    /// order.
    pub fn expenses_by_project(&self) -> Vec<(String, f64)> {
        let mut out: Vec<(String, f64)> = Vec::new();
        for e in &self.expenses {
            match out.iter_mut().find(|(p, _)| p == &e.project) {
                Some((_, total)) => *total += e.amount,
                None => out.push((e.project.clone(), e.amount)),
            }
        }
        out
    }

    pub fn total_spent(&self) -> f64 {
        sum_by(&self.expenses, |e| e.amount)
    }

    pub fn total_revenue(&self) -> f64 {
        sum_by(&self.revenue, |e| e.amount)
    }

    /// Gap between required and available budget. Signed on purpose: an
    /// over-funded plan goes negative and is displayed that way.
    pub fn still_needed(&self) -> i64 {
        self.budget_required - self.budget_available
    }

    pub fn amount_remaining(&self) -> f64 {
        self.budget_required as f64 - self.total_spent()
    }

    fn cycle_tab(&mut self, forward: bool) {
        let idx = FINANCE_TABS.iter().position(|t| *t == self.tab).unwrap_or(0);
        let next = if forward {
            (idx + 1) % FINANCE_TABS.len()
        } else {
            (idx + FINANCE_TABS.len() - 1) % FINANCE_TABS.len()
        };
        self.tab = FINANCE_TABS[next];
    }

    fn cycle_choice(list: &[String], current: &str) -> Option<String> {
        if list.is_empty() {
            return None;
        }
        let idx = list.iter().position(|p| p == current).unwrap_or(0);
        Some(list[(idx + 1) % list.len()].clone())
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Option<String> {
        match key.code {
            KeyCode::Char('h') | KeyCode::Left => self.cycle_tab(false),
            KeyCode::Char('l') | KeyCode::Right => self.cycle_tab(true),
            KeyCode::Char('v') => {
                if self.tab == FinanceTab::Expenses {
                    self.sub_view = match self.sub_view {
                        ExpenseSubView::Entries => ExpenseSubView::ByProject,
                        ExpenseSubView::ByProject => ExpenseSubView::Entries,
                    };
                }
            }
            KeyCode::Char('o') => match self.tab {
                FinanceTab::Expenses => {
                    if let Some(next) = Self::cycle_choice(&self.projects, &self.expense_form.project)
                    {
                        self.expense_form.project = next;
                    }
                }
                FinanceTab::Revenue => {
                    if let Some(next) = Self::cycle_choice(&self.sources, &self.revenue_form.source)
                    {
                        self.revenue_form.source = next;
                    }
                }
                FinanceTab::Dashboard => {}
            },
            KeyCode::Enter => match self.tab {
                FinanceTab::Expenses => {
                    if self.submit_expense().is_ok() {
                        return Some("Expense added".into());
                    }
                }
                FinanceTab::Revenue => {
                    if self.submit_revenue().is_ok() {
                        return Some("Revenue added".into());
                    }
                }
                FinanceTab::Dashboard => {}
            },
            _ => {}
        }
        None
    }
}

impl Default for FinanceState {
    fn default() -> Self {
        Self::new()
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

    let mut spans = vec![Span::raw(" ")];
    for (tab, label) in [
        (FinanceTab::Expenses, "Expenses"),
        (FinanceTab::Revenue, "Revenue"),
        (FinanceTab::Dashboard, "Dashboard"),
    ] {
        let style = if app.finance.tab == tab {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("[{}]", label), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    match app.finance.tab {
        FinanceTab::Expenses => render_expenses(frame, app, chunks[1]),
        FinanceTab::Revenue => render_revenue(frame, app, chunks[1]),
        FinanceTab::Dashboard => render_dashboard(frame, app, chunks[1]),
    }
}

fn form_line<'a>(label: &'a str, value: &'a str, placeholder: &'a str) -> Line<'a> {
    let shown: &str = if value.is_empty() { placeholder } else { value };
    let style = if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(format!(" {:<10}", label), Style::default().fg(Color::DarkGray)),
        Span::styled(shown, style),
    ])
}

fn render_expenses(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    let form = &app.finance.expense_form;
    let ready = app.finance.expense_form_valid();
    let submit_hint = if ready {
        Span::styled(" [Enter] Add Expense", Style::default().fg(Color::Green))
    } else {
        Span::styled(" Add Expense (fill amount + reason)", Style::default().fg(Color::DarkGray))
    };
    let form_widget = Paragraph::new(vec![
        form_line("Amount", &form.amount, "0.00  (:amount <n>)"),
        form_line("Project", &form.project, "-"),
        form_line("Reason", &form.reason, "What was this expense for?  (:reason <text>)"),
        Line::from(submit_hint),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Add Expense "));
    frame.render_widget(form_widget, chunks[0]);

    match app.finance.sub_view {
        ExpenseSubView::Entries => {
            let items: Vec<ListItem> = if app.finance.expenses.is_empty() {
                vec![ListItem::new(Line::from(Span::styled(
                    " No expenses yet. Add your first expense above.",
                    Style::default().fg(Color::DarkGray),
                )))]
            } else {
                app.finance
                    .expenses
                    .iter()
                    .map(|e| {
                        ListItem::new(Line::from(vec![
                            Span::styled(
                                format!(" {:>8} ", format_currency(e.amount)),
                                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                            ),
                            Span::styled(
                                format!("[{}] ", e.project),
                                Style::default().fg(Color::Magenta),
                            ),
                            Span::raw(e.reason.clone()),
                            Span::styled(format!("  {}", e.date), Style::default().fg(Color::DarkGray)),
                        ]))
                    })
                    .collect()
            };
            let list = List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Project Expenses [v] by project "),
            );
            frame.render_widget(list, chunks[1]);
        }
        ExpenseSubView::ByProject => {
            let grouped = app.finance.expenses_by_project();
            let items: Vec<ListItem> = if grouped.is_empty() {
                vec![ListItem::new(Line::from(Span::styled(
                    " No project expenses yet",
                    Style::default().fg(Color::DarkGray),
                )))]
            } else {
                grouped
                    .iter()
                    .map(|(project, total)| {
                        ListItem::new(Line::from(vec![
                            Span::raw(format!(" {:<28}", project)),
                            Span::styled(
                                format_currency(*total),
                                Style::default().add_modifier(Modifier::BOLD),
                            ),
                        ]))
                    })
                    .collect()
            };
            let list = List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" By Project [v] entries "),
            );
            frame.render_widget(list, chunks[1]);
        }
    }
}

fn render_revenue(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(0),
        ])
        .split(area);

    // Summary tiles: logged total / today / projected month 1.
    let projected = app
        .financial
        .periods
        .first()
        .and_then(|p| p.months.first())
        .map(|m| m.revenue as f64)
        .unwrap_or(0.0);
    let today: f64 = sum_by(
        &app.finance
            .revenue
            .iter()
            .filter(|e| e.date == "Today")
            .collect::<Vec<_>>(),
        |e| e.amount,
    );
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(chunks[0]);
    let tiles = [
        ("Total", format_currency(app.finance.total_revenue()), Color::Green),
        ("Today", format_currency(today), Color::White),
        ("Projected", format_currency(projected), Color::DarkGray),
    ];
    for (i, (title, value, color)) in tiles.iter().enumerate() {
        let card = Paragraph::new(Line::from(Span::styled(
            value.clone(),
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", title)))
        .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(card, cols[i]);
    }

    let form = &app.finance.revenue_form;
    let ready = app.finance.revenue_form_valid();
    let submit_hint = if ready {
        Span::styled(" [Enter] Add Revenue", Style::default().fg(Color::Green))
    } else {
        Span::styled(" Add Revenue (fill amount)", Style::default().fg(Color::DarkGray))
    };
    let form_widget = Paragraph::new(vec![
        form_line("Amount", &form.amount, "0.00  (:amount <n>)"),
        form_line("Source", &form.source, "-"),
        form_line("Note", &form.note, "e.g. Saturday pre-orders  (:note <text>)"),
        Line::from(submit_hint),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Add Revenue "));
    frame.render_widget(form_widget, chunks[1]);

    let items: Vec<ListItem> = if app.finance.revenue.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            " No revenue logged yet. Add your first revenue entry above.",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        app.finance
            .revenue
            .iter()
            .map(|e| {
                let mut spans = vec![
                    Span::styled(
                        format!(" {:>8} ", format_currency(e.amount)),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("[{}] ", e.source), Style::default().fg(Color::Cyan)),
                ];
                if !e.note.is_empty() {
                    spans.push(Span::raw(e.note.clone()));
                }
                spans.push(Span::styled(
                    format!("  {}", e.date),
                    Style::default().fg(Color::DarkGray),
                ));
                ListItem::new(Line::from(spans))
            })
            .collect()
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Revenue Entries "),
    );
    frame.render_widget(list, chunks[2]);
}

fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(chunks[0]);
    let tiles = [
        (
            "Budget Required",
            format_currency(app.finance.budget_required as f64),
            Color::White,
        ),
        (
            "Budget Available",
            format_currency(app.finance.budget_available as f64),
            Color::Green,
        ),
        ("Amount Spent", format_currency(app.finance.total_spent()), Color::Red),
        (
            "Amount Remaining",
            format_currency(app.finance.amount_remaining()),
            Color::Magenta,
        ),
    ];
    for (i, (title, value, color)) in tiles.iter().enumerate() {
        let card = Paragraph::new(Line::from(Span::styled(
            value.clone(),
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", title)))
        .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(card, cols[i]);
    }

    // Still-needed strip. The sign stays: over-funded plans show a
    // negative figure rather than clamping to zero.
    let needed = app.finance.still_needed();
    let still = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {}", format_currency(needed as f64)),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " to reach your budget goal",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Still Need "));
    frame.render_widget(still, chunks[1]);

    // Monthly fixed costs + break-even tiles.
    let fixed = app.finance.budget.monthly_fixed_total();
    let covers = break_even_covers(
        fixed as f64,
        app.config.avg_bowl_price,
        app.config.gross_margin,
    );
    let per_day = covers_per_day(covers, app.config.operating_days_per_month);
    let mut rows: Vec<ListItem> = app
        .finance
        .budget
        .monthly_fixed
        .iter()
        .map(|line| {
            ListItem::new(Line::from(vec![
                Span::raw(format!(" {:<24}", line.category)),
                Span::styled(
                    format_currency(line.budgeted as f64),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();
    rows.push(ListItem::new(Line::from(Span::styled(
        format!(
            " Break-even: ~{} covers/mo (~{}/day over {} operating days)",
            covers, per_day, app.config.operating_days_per_month
        ),
        Style::default().fg(Color::Cyan),
    ))));
    let list = List::new(rows).block(
        Block::default().borders(Borders::ALL).title(format!(
            " Monthly Fixed Costs {} /mo ",
            format_currency(fixed as f64)
        )),
    );
    frame.render_widget(list, chunks[2]);
}
