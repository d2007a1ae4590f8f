use chrono::Local;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;

/// Bottom status line: key hints on the left, command prompt or result in
/// the middle, clock on the right.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut left: Vec<Span> = Vec::new();
    if app.in_command_mode {
        left.push(Span::styled(
            format!(" :{}", app.command_buffer),
            Style::default().fg(Color::Yellow),
        ));
    } else if let Some(result) = &app.command_result {
        let mut shown = result.replace('\n', " ");
        let max = (area.width as usize).saturating_sub(24);
        if shown.len() > max {
            shown.truncate(max.saturating_sub(3));
            shown.push_str("...");
        }
        left.push(Span::styled(
            format!(" {}", shown),
            Style::default().fg(Color::Cyan),
        ));
    } else {
        for (key, label) in [
            ("[1-4]", " Sections  "),
            ("[j/k]", " Move  "),
            ("[Enter]", " Select  "),
            ("[?]", " Help  "),
            ("[q]", " Quit"),
        ] {
            left.push(Span::styled(key, Style::default().fg(Color::Yellow)));
            left.push(Span::raw(label));
        }
    }

    let clock = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let left_len: usize = left.iter().map(|s| s.content.len()).sum();
    let padding = (area.width as usize)
        .saturating_sub(left_len + clock.len())
        .max(1);

    let mut spans = left;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(clock, Style::default().fg(Color::DarkGray)));

    let bar =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(bar, area);
}
