//! Dashboard header component
//!
//! Renders the title, clock, system status and the loading gauge

use super::super::state::DashboardState;
use super::super::utils::system_status_visual;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render header with title, system indicator and activity gauge.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let title_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(50),
            Constraint::Percentage(25),
        ])
        .split(header_chunks[0]);

    let bottom_rule = Block::default()
        .borders(Borders::BOTTOM)
        .border_type(BorderType::Thick);

    let (status_text, status_color) = system_status_visual(state.system_status);
    let status = Paragraph::new(Line::from(vec![
        Span::styled("● ", Style::default().fg(status_color)),
        Span::styled(
            status_text,
            Style::default()
                .fg(status_color)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Left)
    .block(bottom_rule.clone());
    f.render_widget(status, title_chunks[0]);

    let version = env!("CARGO_PKG_VERSION");
    let title = Paragraph::new(format!("LISTINGS DASHBOARD v{}", version))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(bottom_rule.clone());
    f.render_widget(title, title_chunks[1]);

    let clock = Paragraph::new(state.clock.clone())
        .alignment(Alignment::Right)
        .style(Style::default().fg(Color::Gray))
        .block(bottom_rule);
    f.render_widget(clock, title_chunks[2]);

    let (progress_text, gauge_color, progress_percent) = if state.is_loading() {
        // Loops every 20 ticks
        let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
        ("LOADING - Fetching data".to_string(), Color::LightBlue, progress)
    } else {
        let text = match &state.stats {
            Some(stats) => match stats.today_count {
                Some(today) => format!("UP TO DATE - {} new today", today),
                None => "UP TO DATE".to_string(),
            },
            None => "WAITING - No data yet".to_string(),
        };
        (text, Color::LightGreen, 100)
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}
