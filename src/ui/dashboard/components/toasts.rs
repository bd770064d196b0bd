//! Notification toasts, stacked in the top-right corner

use super::super::state::DashboardState;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 3;

/// Render active notifications, newest on top.
pub fn render_toasts(f: &mut Frame, area: Rect, state: &DashboardState) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width.saturating_sub(width + 1);
    let mut y = area.y + 1;

    for notification in state.notifications.iter() {
        if area.bottom().saturating_sub(y) < TOAST_HEIGHT {
            break;
        }
        let toast_area = Rect::new(x, y, width, TOAST_HEIGHT);
        f.render_widget(Clear, toast_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(notification.kind.color()));
        let text = format!("{}  {}", notification.kind.icon(), notification.message);
        let toast = Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::White));
        f.render_widget(toast, toast_area);

        y += TOAST_HEIGHT;
    }
}
