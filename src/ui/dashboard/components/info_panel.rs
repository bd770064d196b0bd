//! Dashboard info panel component
//!
//! Renders connection and paging information

use crate::environment::Environment;
use crate::format::{format_count, format_datetime};
use crate::ui::dashboard::updaters::filter_label;

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn info_line(text: String, color: Color) -> Line<'static> {
    Line::from(vec![Span::styled(text, Style::default().fg(color))])
}

/// Render info panel.
pub fn render_info_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let mut info_lines = Vec::new();

    let env_color = match state.environment {
        Environment::Local => Color::Green,
        Environment::Custom { .. } => Color::Yellow,
    };
    info_lines.push(info_line(
        format!("Backend: {}", state.environment),
        env_color,
    ));

    let query = state.query();
    info_lines.push(info_line(
        format!("Filter: {}", filter_label(query.status)),
        Color::LightBlue,
    ));

    let page_text = match state.listings_total {
        Some(total) => format!(
            "Page: {} ({} matching)",
            query.page_number(),
            format_count(total)
        ),
        None => format!("Page: {}", query.page_number()),
    };
    info_lines.push(info_line(page_text, Color::LightBlue));

    if !state.search_term().trim().is_empty() {
        info_lines.push(info_line(
            format!("Search: \"{}\"", state.search_term()),
            Color::LightYellow,
        ));
    }

    if let Some(stats) = &state.stats {
        if let Some(today) = stats.today_count {
            info_lines.push(info_line(
                format!("Added today: {}", format_count(today)),
                Color::LightGreen,
            ));
        }
        info_lines.push(info_line(
            format!(
                "Last update: {}",
                format_datetime(stats.last_update.as_deref())
            ),
            Color::Gray,
        ));
    }

    let uptime = state.start_time.elapsed().as_secs();
    let uptime_string = if uptime >= 3600 {
        format!(
            "Uptime: {}h {}m {}s",
            uptime / 3600,
            (uptime % 3600) / 60,
            uptime % 60
        )
    } else {
        format!("Uptime: {}m {}s", uptime / 60, uptime % 60)
    };
    info_lines.push(info_line(uptime_string, Color::LightCyan));

    let info_block = Block::default()
        .title("DASHBOARD INFO")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let info_paragraph = Paragraph::new(info_lines)
        .block(info_block)
        .wrap(Wrap { trim: true });
    f.render_widget(info_paragraph, area);
}
