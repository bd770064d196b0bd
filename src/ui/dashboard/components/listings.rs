//! Listings table component

use super::super::state::DashboardState;
use super::super::utils::{status_badge, truncate};
use crate::format::{format_datetime, format_price, or_placeholder};
use crate::listing::Listing;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Padding, Paragraph, Row, Table, TableState,
};

const EMPTY_STATE: &str = "No listings to show";

fn header_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn listing_row(listing: &Listing) -> Row<'static> {
    let badge = status_badge(&listing.status);
    let action = if listing.allows_reprocess() {
        Span::styled("[P] reprocess", Style::default().fg(Color::Yellow))
    } else {
        Span::raw("")
    };

    Row::new(vec![
        Cell::from(listing.id.to_string()).style(Style::default().fg(Color::DarkGray)),
        Cell::from(truncate(&or_placeholder(listing.statement.as_deref()), 40)),
        Cell::from(or_placeholder(listing.region.as_deref())),
        Cell::from(or_placeholder(listing.unit_type.as_deref())),
        Cell::from(format_price(listing.price.as_deref()))
            .style(Style::default().fg(Color::LightGreen)),
        Cell::from(or_placeholder(listing.owner_name.as_deref())),
        Cell::from(Line::from(vec![
            Span::styled(
                format!("{} {}", badge.icon, badge.text),
                Style::default().fg(badge.color),
            ),
        ])),
        Cell::from(format_datetime(listing.created_at.as_deref()))
            .style(Style::default().fg(Color::Gray)),
        Cell::from(Line::from(action)),
    ])
}

/// Render the cached page, filtered by the current search term.
pub fn render_listings(f: &mut Frame, area: Rect, state: &DashboardState) {
    let visible = state.visible_listings();
    let title = match state.listings() {
        Some(all) if visible.len() != all.len() => {
            format!(" LISTINGS ({} of {}) ", visible.len(), all.len())
        }
        _ => format!(" LISTINGS ({}) ", visible.len()),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    if state.is_empty_state() || state.listings().is_none() {
        let message = if state.is_empty_state() {
            EMPTY_STATE
        } else {
            "Loading listings..."
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center)
        .block(block.padding(Padding::top(1)));
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("ID").style(header_style()),
        Cell::from("Statement").style(header_style()),
        Cell::from("Region").style(header_style()),
        Cell::from("Type").style(header_style()),
        Cell::from("Price").style(header_style()),
        Cell::from("Owner").style(header_style()),
        Cell::from("Status").style(header_style()),
        Cell::from("Created").style(header_style()),
        Cell::from("").style(header_style()),
    ]);

    let rows: Vec<Row> = visible.iter().map(|listing| listing_row(listing)).collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Min(20),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(13),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(13),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    let mut table_state = TableState::default().with_selected(Some(state.selected));
    f.render_stateful_widget(table, area, &mut table_state);
}
