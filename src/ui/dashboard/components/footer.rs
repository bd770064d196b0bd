//! Dashboard footer component
//!
//! Renders key bindings, or the search box while searching

use super::super::state::{DashboardState, InputMode};

use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

const NORMAL_KEYS: &str = concat!(
    "[Q] Quit | [↑↓] Select | [Enter] Details | [P] Reprocess | [S/X] Start/Stop | ",
    "[R] Refresh | [F] Filter | [N/B] Page | [/] Search"
);
const DETAIL_KEYS: &str = "[Esc] Close | [P] Reprocess | [Q] Quit";
const SEARCH_KEYS: &str = "[Enter] Keep | [Esc] Clear";

/// Render footer.
pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let (footer_text, footer_color) = match state.input_mode {
        InputMode::Search => (
            format!("Search: {}█   {}", state.search_term(), SEARCH_KEYS),
            Color::LightYellow,
        ),
        InputMode::Normal if state.is_detail_open() => (DETAIL_KEYS.to_string(), Color::Cyan),
        InputMode::Normal => (NORMAL_KEYS.to_string(), Color::Cyan),
    };

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(footer_color)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
