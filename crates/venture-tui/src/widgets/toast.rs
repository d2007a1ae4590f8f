use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

#[derive(Debug, Clone, Copy)]
pub enum ToastLevel {
    Info,
    Success,
}

impl ToastLevel {
    fn color(&self) -> Color {
        match self {
            ToastLevel::Info => Color::Cyan,
            ToastLevel::Success => Color::Green,
        }
    }
}

/// A transient confirmation ("Expense added", "Draft added") that fades
/// out after a few seconds.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    created: Instant,
    duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
            created: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn expired(&self) -> bool {
        self.created.elapsed() >= self.duration
    }
}

const MAX_TOASTS: usize = 4;
const TOAST_WIDTH: u16 = 36;

/// Manages the stack of active toasts.
pub struct ToastManager {
    toasts: VecDeque<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            toasts: VecDeque::new(),
        }
    }

    /// Push a toast; the oldest one drops off when the stack is full.
    pub fn push(&mut self, toast: Toast) {
        self.toasts.push_back(toast);
        if self.toasts.len() > MAX_TOASTS {
            self.toasts.pop_front();
        }
    }

    pub fn tick(&mut self) {
        self.toasts.retain(|t| !t.expired());
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn latest_message(&self) -> Option<&str> {
        self.toasts.back().map(|t| t.message.as_str())
    }

    /// Render the stack anchored to the bottom-right corner.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.toasts.is_empty() {
            return;
        }
        let width = TOAST_WIDTH.min(area.width);
        for (i, toast) in self.toasts.iter().rev().enumerate() {
            let y_offset = (i as u16 + 1) * 3;
            if y_offset > area.height {
                break;
            }
            let x = area.x + area.width.saturating_sub(width);
            let y = area.y + area.height.saturating_sub(y_offset);
            let rect = Rect::new(x, y, width, 3);
            frame.render_widget(Clear, rect);

            let color = toast.level.color();
            let body = Paragraph::new(Line::from(Span::styled(
                format!(" {}", toast.message),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
            frame.render_widget(body, rect);
        }
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_caps_at_max() {
        let mut mgr = ToastManager::new();
        for i in 0..6 {
            mgr.push(Toast::new(format!("msg {}", i), ToastLevel::Info));
        }
        assert_eq!(mgr.len(), MAX_TOASTS);
        assert_eq!(mgr.latest_message(), Some("msg 5"));
    }

    #[test]
    fn fresh_toast_is_not_expired() {
        let toast = Toast::new("Expense added", ToastLevel::Success);
        assert!(!toast.expired());
    }

    #[test]
    fn tick_keeps_live_toasts() {
        let mut mgr = ToastManager::new();
        mgr.push(Toast::new("alive", ToastLevel::Success));
        mgr.tick();
        assert_eq!(mgr.len(), 1);
    }
}
