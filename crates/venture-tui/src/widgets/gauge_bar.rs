use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Render a one-line progress gauge: ` 3/10 steps [███░░░░░░░] 30%`.
///
/// `progress` is clamped to 100 for the bar fill, but the percentage text
/// shows the raw value so an over-complete count stays visible.
pub fn render_gauge(frame: &mut Frame, area: Rect, label: &str, progress: u16, color: Color) {
    if area.height == 0 {
        return;
    }
    let fill = progress.min(100);
    let pct_text = format!(" {}%", progress);
    let label_text = format!(" {} ", label);

    let overhead = label_text.len() + 2 + pct_text.len(); // brackets + label + pct
    let bar_width = (area.width as usize).saturating_sub(overhead);
    if bar_width == 0 {
        frame.render_widget(Paragraph::new(Line::from(label_text)), area);
        return;
    }

    let filled = bar_width * fill as usize / 100;
    let line = Line::from(vec![
        Span::raw(label_text),
        Span::raw("["),
        Span::styled("\u{2588}".repeat(filled), Style::default().fg(color)),
        Span::styled(
            "\u{2591}".repeat(bar_width - filled),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("]"),
        Span::styled(pct_text, Style::default().fg(color)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
