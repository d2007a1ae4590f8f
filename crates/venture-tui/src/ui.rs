use std::time::Instant;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::app::{prompt_hint, App, FUNDING, SECTION_NAMES};
use crate::sections;
use crate::widgets::{help_modal, status_bar};

/// Master render: identity header, section content, prompt bar, bottom
/// nav, status line, then the overlay layers.
pub fn render(frame: &mut Frame, app: &mut App) {
    let show_prompt_bar = app.current_section != FUNDING;
    let mut constraints = vec![
        Constraint::Length(2), // header
        Constraint::Min(0),   // content
    ];
    if show_prompt_bar {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(2)); // bottom nav
    constraints.push(Constraint::Length(1)); // status bar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);

    let mut next = 2;
    if show_prompt_bar {
        render_prompt_bar(frame, app, chunks[next]);
        next += 1;
    }
    render_nav(frame, app, chunks[next]);
    status_bar::render(frame, app, chunks[next + 1]);

    if app.show_help {
        help_modal::render(frame);
    }
    app.toasts.render(frame, chunks[1]);

    let delta = app.last_frame.elapsed();
    app.last_frame = Instant::now();
    let area = frame.area();
    app.effects.tick_and_render(delta, frame.buffer_mut(), area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let badge = "Free Plan ";
    let left_width = app.profile.name.width() + app.profile.location.width() + 3;
    let padding = (area.width as usize)
        .saturating_sub(left_width + badge.width())
        .max(1);
    let lines = vec![Line::from(vec![
        Span::styled(
            format!(" {} ", app.profile.name),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            app.profile.location.clone(),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(" ".repeat(padding)),
        Span::styled(badge, Style::default().fg(Color::Cyan)),
    ])];
    let header = Paragraph::new(lines).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_section {
        0 => sections::plan::render(frame, app, area),
        1 => sections::track::render(frame, app, area),
        2 => sections::finance::render(frame, app, area),
        3 => sections::funding::render(frame, app, area),
        _ => {}
    }
}

fn render_prompt_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hint = prompt_hint(app.current_section).unwrap_or_default();
    let line = Line::from(vec![
        Span::styled(" * ", Style::default().fg(Color::Yellow)),
        Span::styled(hint, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_nav(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = SECTION_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            Line::from(vec![
                Span::styled(
                    format!("{}", i + 1),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(":"),
                Span::raw(*name),
            ])
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::TOP))
        .select(app.current_section)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw(" | "));
    frame.render_widget(tabs, area);
}
