//! Dashboard metrics components
//!
//! Renders the four animated stat cards

use super::super::state::DashboardState;
use crate::format::format_count;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render the stat cards side by side.
pub fn render_metrics_section(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let cards = state.counters.cards();
    let card_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, cards.len() as u32); 4])
        .split(area);

    for ((title, value, color), chunk) in cards.into_iter().zip(card_chunks.iter()) {
        let card = Paragraph::new(format_count(value))
            .alignment(Alignment::Center)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color)),
            );
        f.render_widget(card, *chunk);
    }
}
