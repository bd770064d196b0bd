//! Listing detail overlay
//!
//! Every field in two columns, then the full details text, processing errors
//! and links to the external systems the listing is filed in.

use super::super::utils::status_badge;
use crate::format::{external_links, format_datetime, format_price, or_placeholder};
use crate::listing::Listing;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

/// Rectangle of the given percentage size, centred in `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn field_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(value),
    ])
}

fn text(value: &Option<String>) -> String {
    or_placeholder(value.as_deref())
}

/// Left and right column contents.
pub fn detail_columns(listing: &Listing) -> (Vec<Line<'static>>, Vec<Line<'static>>) {
    let badge = status_badge(&listing.status);
    let left = vec![
        field_line("ID", listing.id.to_string()),
        field_line("Region", text(&listing.region)),
        field_line("Unit type", text(&listing.unit_type)),
        field_line("Unit code", text(&listing.unit_code)),
        field_line("Unit condition", text(&listing.unit_condition)),
        field_line("Area", text(&listing.area)),
        field_line("Floor", text(&listing.floor)),
        field_line("Price", format_price(listing.price.as_deref())),
        field_line("Features", text(&listing.features)),
        field_line("Address", text(&listing.address)),
    ];
    let right = vec![
        Line::from(vec![
            Span::styled(
                "Status: ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} {}", badge.icon, badge.text),
                Style::default().fg(badge.color),
            ),
        ]),
        field_line("Owner", text(&listing.owner_name)),
        field_line("Owner phone", text(&listing.owner_phone)),
        field_line("Employee", text(&listing.employee_name)),
        field_line("Availability", text(&listing.availability)),
        field_line("Photos", text(&listing.photos_status)),
        field_line("Attempts", listing.processing_attempts.to_string()),
        field_line("Created", format_datetime(listing.created_at.as_deref())),
        field_line("Updated", format_datetime(listing.updated_at.as_deref())),
    ];
    (left, right)
}

/// Statement, full details, errors and links, in display order.
pub fn detail_body(listing: &Listing) -> Vec<Line<'static>> {
    let mut lines = vec![
        field_line("Statement", text(&listing.statement)),
        Line::from(""),
        field_line("Full details", text(&listing.full_details)),
    ];

    if !listing.error_messages.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Processing errors:",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        for message in &listing.error_messages {
            lines.push(Line::from(Span::styled(
                format!("  • {}", message),
                Style::default().fg(Color::LightRed),
            )));
        }
    }

    let links = external_links(listing);
    if !links.is_empty() {
        lines.push(Line::from(""));
        for (title, url) in links {
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", title), Style::default().fg(Color::Cyan)),
                Span::styled(
                    url,
                    Style::default()
                        .fg(Color::LightBlue)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]));
        }
    }
    lines
}

/// Render the overlay on top of whatever is below it.
pub fn render_detail(f: &mut Frame, area: Rect, listing: &Listing) {
    let popup = centered_rect(80, 80, area);
    f.render_widget(Clear, popup);

    let hint = if listing.allows_reprocess() {
        " [Esc] Close  [P] Reprocess "
    } else {
        " [Esc] Close "
    };
    let block = Block::default()
        .title(format!(" LISTING #{} ", listing.id))
        .title_bottom(hint)
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black))
        .padding(Padding::uniform(1));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let (left, right) = detail_columns(listing);
    let rows = left.len().max(right.len()) as u16;
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(rows + 1), Constraint::Fill(1)])
        .split(inner);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(sections[0]);

    f.render_widget(Paragraph::new(left).wrap(Wrap { trim: true }), columns[0]);
    f.render_widget(Paragraph::new(right).wrap(Wrap { trim: true }), columns[1]);
    f.render_widget(
        Paragraph::new(detail_body(listing)).wrap(Wrap { trim: false }),
        sections[1],
    );
}
