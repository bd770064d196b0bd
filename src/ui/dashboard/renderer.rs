//! Dashboard main renderer

use super::components::{detail, footer, header, info_panel, listings, logs, metrics, toasts};
use super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Percentage(25),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);
    metrics::render_metrics_section(f, main_chunks[1], state);
    listings::render_listings(f, main_chunks[2], state);

    let bottom_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(main_chunks[3]);

    info_panel::render_info_panel(f, bottom_chunks[0], state);
    logs::render_logs_panel(f, bottom_chunks[1], state);
    footer::render_footer(f, main_chunks[4], state);

    if let Some(listing) = state.detail() {
        detail::render_detail(f, f.area(), listing);
    }
    toasts::render_toasts(f, f.area(), state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::listing::ListingQuery;
    use crate::ui::UIConfig;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_fresh_dashboard() {
        let state = DashboardState::new(
            Environment::Local,
            ListingQuery::default(),
            UIConfig::new(true),
        );
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal.draw(|f| render_dashboard(f, &state)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("LISTINGS DASHBOARD"));
        assert!(text.contains("Disconnected"));
        assert!(text.contains("Loading listings..."));
    }
}
