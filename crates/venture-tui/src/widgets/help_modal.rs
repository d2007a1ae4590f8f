use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

/// Render a centered help modal overlay.
pub fn render(frame: &mut Frame) {
    let area = centered_rect(60, 75, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            "  Keybindings",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        help_line("1-4", "Jump to section (Plan/Track/Expenses/Funding)"),
        help_line("Tab / Shift-Tab", "Next / previous section"),
        help_line("j / k", "Move in list"),
        help_line("h / l", "Switch sub-view"),
        help_line("Enter", "Toggle step / open item / submit form"),
        help_line("a", "Draft the open step with the assistant"),
        help_line("e", "Fill the open step in yourself"),
        help_line("c", "Save the open step"),
        help_line("x", "Check a task off"),
        help_line("p", "Projection period / funding project"),
        help_line("m", "Funding assistant chat (Funding)"),
        help_line("b", "Book an expert consult (application view)"),
        help_line(":", "Command mode (:amount 50, :say hi, ...)"),
        help_line("Esc", "Back / close"),
        help_line("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  Press ? or Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(paragraph, area);
}

fn help_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(
            format!("{:<18}", key),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(desc.to_string()),
    ])
}

fn centered_rect(percent_x: u16, percent_y: u16, parent: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(parent);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
