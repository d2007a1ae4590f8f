//! Track section: execution projects grouped by phase, plus a flat task
//! list aggregated across the active projects.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use venture_core::metrics::percent_of;
use venture_core::seed;
use venture_core::types::{Priority, Project, ProjectTask, StepStatus, TeamMember};

use crate::app::App;
use crate::widgets::gauge_bar;

// ---------------------------------------------------------------------------
// TrackTab
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackTab {
    Projects,
    Tasks,
}

// ---------------------------------------------------------------------------
// TrackState
// ---------------------------------------------------------------------------

pub struct TrackState {
    pub tab: TrackTab,
    pub projects: Vec<Project>,
    pub tasks: HashMap<String, Vec<ProjectTask>>,
    /// Local check-off state, keyed by task id. Independent of the seed
    /// `status` field; see `cleared`.
    pub done: HashMap<String, bool>,
    pub selected: usize,
    pub task_cursor: usize,
    pub open_project: Option<String>,
}

impl TrackState {
    /// Hydrate local project/task state from the seed.
    pub fn new() -> Self {
        Self {
            tab: TrackTab::Projects,
            projects: seed::execution_projects(),
            tasks: seed::project_tasks(),
            done: HashMap::new(),
            selected: 0,
            task_cursor: 0,
            open_project: None,
        }
    }

    pub fn active_projects(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| !p.is_locked()).collect()
    }

    pub fn locked_projects(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.is_locked()).collect()
    }

    /// A task counts as cleared when it has been checked off locally or
    /// its seed status already arrived complete. The local map and the
    /// seed status are deliberately separate axes; this predicate is the
    /// single place they are reconciled.
    pub fn cleared(&self, task: &ProjectTask) -> bool {
        self.done.get(&task.id).copied().unwrap_or(false) || task.status == StepStatus::Complete
    }

    pub fn toggle_done(&mut self, task_id: &str) {
        let flag = self.done.entry(task_id.to_string()).or_insert(false);
        *flag = !*flag;
        tracing::debug!(task = %task_id, done = *flag, "task toggled");
    }

    /// Flat task list across active projects, paired with the owning
    /// project title, in seed order.
    pub fn flat_tasks(&self) -> Vec<(&ProjectTask, &str)> {
        let mut out = Vec::new();
        for project in self.projects.iter().filter(|p| !p.is_locked()) {
            if let Some(tasks) = self.tasks.get(&project.id) {
                for t in tasks {
                    out.push((t, project.title.as_str()));
                }
            }
        }
        out
    }

    /// The shared task comparator: incomplete before cleared, then
    /// in-progress before todo, then high before medium before low.
    /// The sort is stable, so ties keep their seed order.
    pub fn sorted_flat_tasks(&self) -> Vec<(&ProjectTask, &str)> {
        let mut tasks = self.flat_tasks();
        tasks.sort_by_key(|(t, _)| task_sort_key(self.cleared(t), t.status, t.priority));
        tasks
    }

    pub fn sorted_project_tasks(&self, project_id: &str) -> Vec<&ProjectTask> {
        let mut tasks: Vec<&ProjectTask> = self
            .tasks
            .get(project_id)
            .map(|v| v.iter().collect())
            .unwrap_or_default();
        tasks.sort_by_key(|t| task_sort_key(self.cleared(t), t.status, t.priority));
        tasks
    }

    /// Cleared/total/percent for a project, derived from its task list.
    /// Locked projects have no task breakdown and fall back to the seed
    /// counters.
    pub fn project_progress(&self, project: &Project) -> (u32, u32, u32) {
        match self.tasks.get(&project.id) {
            Some(tasks) => {
                let cleared = tasks.iter().filter(|t| self.cleared(t)).count() as u32;
                let total = tasks.len() as u32;
                (cleared, total, percent_of(cleared as u64, total as u64))
            }
            None => (
                project.completed_tasks,
                project.tasks,
                percent_of(project.completed_tasks as u64, project.tasks as u64),
            ),
        }
    }

    pub fn open_project(&self) -> Option<&Project> {
        let id = self.open_project.as_deref()?;
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Option<String> {
        if let Some(project_id) = self.open_project.clone() {
            match key.code {
                KeyCode::Esc => {
                    self.open_project = None;
                    self.task_cursor = 0;
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    let len = self.sorted_project_tasks(&project_id).len();
                    if len > 0 && self.task_cursor + 1 < len {
                        self.task_cursor += 1;
                    }
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.task_cursor = self.task_cursor.saturating_sub(1);
                }
                KeyCode::Enter | KeyCode::Char('x') => {
                    let id = self
                        .sorted_project_tasks(&project_id)
                        .get(self.task_cursor)
                        .map(|t| t.id.clone());
                    if let Some(id) = id {
                        self.toggle_done(&id);
                    }
                }
                _ => {}
            }
            return None;
        }

        match key.code {
            KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('l') | KeyCode::Right => {
                self.tab = match self.tab {
                    TrackTab::Projects => TrackTab::Tasks,
                    TrackTab::Tasks => TrackTab::Projects,
                };
                self.selected = 0;
                self.task_cursor = 0;
            }
            KeyCode::Char('j') | KeyCode::Down => match self.tab {
                TrackTab::Projects => {
                    let len = self.active_projects().len();
                    if len > 0 && self.selected + 1 < len {
                        self.selected += 1;
                    }
                }
                TrackTab::Tasks => {
                    let len = self.flat_tasks().len();
                    if len > 0 && self.task_cursor + 1 < len {
                        self.task_cursor += 1;
                    }
                }
            },
            KeyCode::Char('k') | KeyCode::Up => match self.tab {
                TrackTab::Projects => self.selected = self.selected.saturating_sub(1),
                TrackTab::Tasks => self.task_cursor = self.task_cursor.saturating_sub(1),
            },
            KeyCode::Enter => match self.tab {
                TrackTab::Projects => {
                    // Only active projects are selectable; locked ones are
                    // not reachable through the cursor at all.
                    if let Some(p) = self.active_projects().get(self.selected) {
                        self.open_project = Some(p.id.clone());
                        self.task_cursor = 0;
                    }
                }
                TrackTab::Tasks => {
                    let id = self
                        .sorted_flat_tasks()
                        .get(self.task_cursor)
                        .map(|(t, _)| t.id.clone());
                    if let Some(id) = id {
                        self.toggle_done(&id);
                    }
                }
            },
            KeyCode::Char('x') => {
                if self.tab == TrackTab::Tasks {
                    let id = self
                        .sorted_flat_tasks()
                        .get(self.task_cursor)
                        .map(|(t, _)| t.id.clone());
                    if let Some(id) = id {
                        self.toggle_done(&id);
                    }
                }
            }
            _ => {}
        }
        None
    }
}

impl Default for TrackState {
    fn default() -> Self {
        Self::new()
    }
}

fn task_sort_key(cleared: bool, status: StepStatus, priority: Priority) -> (u8, u8, u8) {
    (u8::from(cleared), status.rank(), priority.rank())
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn member_name<'a>(team: &'a [TeamMember], id: Option<&str>) -> Option<&'a str> {
    let id = id?;
    team.iter().find(|m| m.id == id).map(|m| m.name.as_str())
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::DarkGray,
    }
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if app.track.open_project.is_some() {
        render_project_detail(frame, app, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let mut spans = vec![Span::raw(" ")];
    for (tab, label) in [(TrackTab::Projects, "Projects"), (TrackTab::Tasks, "Tasks")] {
        let style = if app.track.tab == tab {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("[{}]", label), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    match app.track.tab {
        TrackTab::Projects => render_projects(frame, app, chunks[1]),
        TrackTab::Tasks => render_tasks(frame, app, chunks[1]),
    }
}

fn render_projects(frame: &mut Frame, app: &App, area: Rect) {
    let mut items: Vec<ListItem> = Vec::new();

    for (idx, project) in app.track.active_projects().iter().enumerate() {
        let (cleared, total, pct) = app.track.project_progress(project);
        let style = if idx == app.track.selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        let mut spans = vec![
            Span::styled(
                format!(" {} ", project.title),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{}% ({}/{})", pct, cleared, total),
                Style::default().fg(Color::Yellow),
            ),
        ];
        if let Some(owner) = member_name(&app.team, project.owner.as_deref()) {
            spans.push(Span::styled(
                format!("  {}", owner),
                Style::default().fg(Color::Cyan),
            ));
        }
        if project.notifications > 0 {
            spans.push(Span::styled(
                format!("  {} update{}", project.notifications, if project.notifications > 1 { "s" } else { "" }),
                Style::default().fg(Color::Red),
            ));
        }
        items.push(ListItem::new(Line::from(spans)).style(style));
        items.push(ListItem::new(Line::from(Span::styled(
            format!("   {}", project.description),
            Style::default().fg(Color::DarkGray),
        ))));
    }

    items.push(ListItem::new(Line::from(Span::styled(
        " Execution Phase: Unlocks When Plan is Complete",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))));
    for project in app.track.locked_projects() {
        items.push(ListItem::new(Line::from(vec![
            Span::styled(" [locked] ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                project.title.clone(),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("  {}", project.description),
                Style::default().fg(Color::DarkGray),
            ),
        ])));
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Projects "),
    );
    frame.render_widget(list, area);
}

fn task_row<'a>(
    task: &'a ProjectTask,
    project_title: &'a str,
    cleared: bool,
    selected: bool,
    team: &'a [TeamMember],
) -> ListItem<'a> {
    let check = if cleared { "[x]" } else { "[ ]" };
    let title_style = if cleared {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };
    let mut spans = vec![
        Span::styled(
            format!(" {} ", check),
            Style::default().fg(if cleared { Color::Green } else { Color::DarkGray }),
        ),
        Span::styled(task.title.clone(), title_style),
        Span::styled(format!("  ({})", project_title), Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("  {}", task.priority.label()),
            Style::default().fg(priority_color(task.priority)),
        ),
    ];
    if let Some(name) = member_name(team, task.assignee.as_deref()) {
        spans.push(Span::styled(format!("  {}", name), Style::default().fg(Color::Cyan)));
    }
    let style = if selected {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    ListItem::new(Line::from(spans)).style(style)
}

fn render_tasks(frame: &mut Frame, app: &App, area: Rect) {
    let tasks = app.track.sorted_flat_tasks();
    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(idx, (task, project_title))| {
            task_row(
                task,
                project_title,
                app.track.cleared(task),
                idx == app.track.task_cursor,
                &app.team,
            )
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Tasks ({}) ", tasks.len())),
    );
    frame.render_widget(list, area);
}

fn render_project_detail(frame: &mut Frame, app: &App, area: Rect) {
    let Some(project) = app.track.open_project() else {
        return;
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let (cleared, total, pct) = app.track.project_progress(project);
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {} ", project.title),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {}", project.description),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if let Some(owner) = member_name(&app.team, project.owner.as_deref()) {
        lines.push(Line::from(Span::styled(
            format!(" Owner: {}", owner),
            Style::default().fg(Color::Cyan),
        )));
    }
    lines.push(Line::from(Span::styled(
        " [Esc] All Projects",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    gauge_bar::render_gauge(
        frame,
        chunks[1],
        &format!("{}/{} tasks", cleared, total),
        pct as u16,
        Color::Yellow,
    );

    let tasks = app.track.sorted_project_tasks(&project.id);
    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            task_row(
                task,
                project.title.as_str(),
                app.track.cleared(task),
                idx == app.track.task_cursor,
                &app.team,
            )
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Tasks "),
    );
    frame.render_widget(list, chunks[2]);
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

    #[test]
    fn active_and_locked_split() {
        let s = TrackState::new();
        assert_eq!(s.active_projects().len(), 4);
        assert_eq!(s.locked_projects().len(), 6);
    }

    #[test]
    fn toggle_done_round_trips() {
        let mut s = TrackState::new();
        let task = s.flat_tasks()[0].0.id.clone();
        let before = s.done.get(&task).copied().unwrap_or(false);
        s.toggle_done(&task);
        s.toggle_done(&task);
        assert_eq!(s.done.get(&task).copied().unwrap_or(false), before);
    }

    #[test]
    fn sort_puts_incomplete_first() {
        let mut s = TrackState::new();
        let first_id = s.sorted_flat_tasks()[0].0.id.clone();
        s.toggle_done(&first_id);
        let sorted = s.sorted_flat_tasks();
        // The checked-off task sinks to the cleared block at the end.
        assert_ne!(sorted[0].0.id, first_id);
        assert!(s.cleared(sorted.last().unwrap().0));
    }

    #[test]
    fn sort_orders_status_then_priority() {
        let s = TrackState::new();
        let sorted = s.sorted_flat_tasks();
        for pair in sorted.windows(2) {
            let a = &pair[0];
            let b = &pair[1];
            let ka = task_sort_key(s.cleared(a.0), a.0.status, a.0.priority);
            let kb = task_sort_key(s.cleared(b.0), b.0.status, b.0.priority);
            assert!(ka <= kb, "sort keys out of order: {:?} > {:?}", ka, kb);
        }
        // First rows are the in-progress high-priority tasks, in seed order.
        assert_eq!(sorted[0].0.id, "t1-1");
        assert_eq!(sorted[1].0.id, "t1-2");
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let s = TrackState::new();
        let sorted = s.sorted_flat_tasks();
        // t2-2 and t4-2 are both todo/high; t2-2 comes from an earlier
        // project so it must stay first.
        let pos_a = sorted.iter().position(|(t, _)| t.id == "t2-2").unwrap();
        let pos_b = sorted.iter().position(|(t, _)| t.id == "t4-2").unwrap();
        assert!(pos_a < pos_b);
    }

    #[test]
    fn progress_derived_from_cleared_tasks() {
        let mut s = TrackState::new();
        let project = s.projects[0].clone();
        let (cleared, total, _) = s.project_progress(&project);
        // Seed statuses for ep-1 have nothing complete; the hard-coded
        // counter on the project is deliberately ignored.
        assert_eq!(cleared, 0);
        assert_eq!(total, 5);

        s.toggle_done("t1-1");
        let (cleared, _, pct) = s.project_progress(&project);
        assert_eq!(cleared, 1);
        assert_eq!(pct, 20);
    }

    #[test]
    fn locked_projects_fall_back_to_seed_counts() {
        let s = TrackState::new();
        let locked = s.locked_projects()[0].clone();
        let (cleared, total, _) = s.project_progress(&locked);
        assert_eq!(cleared, locked.completed_tasks);
        assert_eq!(total, locked.tasks);
    }

    #[test]
    fn enter_opens_only_active_projects() {
        let mut s = TrackState::new();
        // Cursor past the active list cannot select a locked project.
        s.selected = 99;
        s.on_key(key(KeyCode::Enter));
        assert!(s.open_project.is_none());

        s.selected = 1;
        s.on_key(key(KeyCode::Enter));
        assert_eq!(s.open_project.as_deref(), Some("ep-2"));
    }

    #[test]
    fn enter_in_tasks_view_toggles() {
        let mut s = TrackState::new();
        s.on_key(key(KeyCode::Char('l')));
        assert_eq!(s.tab, TrackTab::Tasks);
        let target = s.sorted_flat_tasks()[0].0.id.clone();
        s.on_key(key(KeyCode::Enter));
        assert!(s.done.get(&target).copied().unwrap_or(false));
    }

    #[test]
    fn esc_leaves_project_detail() {
        let mut s = TrackState::new();
        s.on_key(key(KeyCode::Enter));
        assert!(s.open_project.is_some());
        s.on_key(key(KeyCode::Esc));
        assert!(s.open_project.is_none());
    }
}
