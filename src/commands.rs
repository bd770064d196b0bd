//! One-shot CLI commands
//!
//! Each command performs a single request against the backend and prints the
//! result to stdout.

use crate::backend::Backend;
use crate::backend::error::BackendError;
use crate::backend::error_handler::ErrorHandler;
use crate::format::{
    external_links, format_count, format_datetime, format_price, or_placeholder,
};
use crate::listing::{
    self, Listing, ListingId, ListingQuery, ListingStatus, SystemAction, SystemStats,
    SystemStatus,
};
use crate::ui::dashboard::utils::{status_badge, truncate};
use crate::{print_cmd_error, print_cmd_info, print_cmd_success};
use std::error::Error;
use strum::IntoEnumIterator;

fn report(context: &str, error: BackendError) -> Box<dyn Error> {
    let details = ErrorHandler::new().describe(&error);
    print_cmd_error!(context, details.as_str());
    Box::new(error)
}

/// Stats snapshot, one figure per line.
pub fn render_stats(stats: &SystemStats) -> String {
    let mut lines = vec![format!("Total listings: {}", format_count(stats.total()))];
    for status in ListingStatus::iter() {
        lines.push(format!(
            "  {:<11} {}",
            status.to_string(),
            format_count(stats.count(status))
        ));
    }
    if let Some(today) = stats.today_count {
        lines.push(format!("Added today: {}", format_count(today)));
    }
    let system = stats
        .system_status
        .as_deref()
        .map(SystemStatus::from_tag)
        .unwrap_or_default();
    lines.push(format!("System: {}", system));
    if stats.last_update.is_some() {
        lines.push(format!(
            "Last update: {}",
            format_datetime(stats.last_update.as_deref())
        ));
    }
    lines.join("\n")
}

/// One table row per listing.
pub fn render_listing_line(listing: &Listing) -> String {
    let badge = status_badge(&listing.status);
    format!(
        "{:>6}  {:<24}  {:<16}  {:>13}  {} {}",
        listing.id,
        truncate(&or_placeholder(listing.region.as_deref()), 24),
        truncate(&or_placeholder(listing.unit_type.as_deref()), 16),
        format_price(listing.price.as_deref()),
        badge.icon,
        badge.text
    )
}

/// Every field of a listing, followed by its errors and external links.
pub fn render_listing_detail(listing: &Listing) -> String {
    let text = |value: &Option<String>| or_placeholder(value.as_deref());
    let badge = status_badge(&listing.status);
    let mut lines = vec![
        format!("Listing #{}", listing.id),
        format!("Status:          {} {}", badge.icon, badge.text),
        format!("Statement:       {}", text(&listing.statement)),
        format!("Region:          {}", text(&listing.region)),
        format!("Unit type:       {}", text(&listing.unit_type)),
        format!("Unit code:       {}", text(&listing.unit_code)),
        format!("Unit condition:  {}", text(&listing.unit_condition)),
        format!("Area:            {}", text(&listing.area)),
        format!("Floor:           {}", text(&listing.floor)),
        format!("Price:           {}", format_price(listing.price.as_deref())),
        format!("Features:        {}", text(&listing.features)),
        format!("Address:         {}", text(&listing.address)),
        format!("Owner:           {}", text(&listing.owner_name)),
        format!("Owner phone:     {}", text(&listing.owner_phone)),
        format!("Employee:        {}", text(&listing.employee_name)),
        format!("Availability:    {}", text(&listing.availability)),
        format!("Photos:          {}", text(&listing.photos_status)),
        format!("Attempts:        {}", listing.processing_attempts),
        format!(
            "Created:         {}",
            format_datetime(listing.created_at.as_deref())
        ),
        format!(
            "Updated:         {}",
            format_datetime(listing.updated_at.as_deref())
        ),
        format!("Full details:    {}", text(&listing.full_details)),
    ];
    if !listing.error_messages.is_empty() {
        lines.push("Processing errors:".to_string());
        lines.extend(listing.error_messages.iter().map(|m| format!("  - {}", m)));
    }
    for (title, url) in external_links(listing) {
        lines.push(format!("{}: {}", title, url));
    }
    lines.join("\n")
}

pub async fn stats(backend: &dyn Backend) -> Result<(), Box<dyn Error>> {
    let stats = backend
        .get_stats()
        .await
        .map_err(|e| report("Could not load statistics", e))?;
    println!("{}", render_stats(&stats));
    Ok(())
}

pub async fn list(
    backend: &dyn Backend,
    query: ListingQuery,
    search: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let page = backend
        .get_listings(query)
        .await
        .map_err(|e| report("Could not load listings", e))?;

    let term = search.unwrap_or_default();
    let matches = listing::search(&page.properties, &term);
    if matches.is_empty() {
        print_cmd_info!("No listings to show", "page {}", query.page_number());
        return Ok(());
    }
    for listing in &matches {
        println!("{}", render_listing_line(listing));
    }
    let shown = match page.total {
        Some(total) => format!("{} of {} listings", matches.len(), format_count(total)),
        None => format!("{} listings", matches.len()),
    };
    println!("\nPage {} - {}", query.page_number(), shown);
    Ok(())
}

pub async fn show(backend: &dyn Backend, id: ListingId) -> Result<(), Box<dyn Error>> {
    let listing = backend
        .get_listing(id)
        .await
        .map_err(|e| report(&format!("Could not load listing {}", id), e))?;
    println!("{}", render_listing_detail(&listing));
    Ok(())
}

pub async fn reprocess(backend: &dyn Backend, id: ListingId) -> Result<(), Box<dyn Error>> {
    let response = backend
        .reprocess(id)
        .await
        .map_err(|e| report(&format!("Could not reprocess listing {}", id), e))?;
    let message = response
        .message
        .unwrap_or_else(|| format!("Listing {} sent for reprocessing", id));
    print_cmd_success!("Reprocess", "{}", message);
    Ok(())
}

pub async fn system(backend: &dyn Backend, action: SystemAction) -> Result<(), Box<dyn Error>> {
    let response = backend
        .control_system(action)
        .await
        .map_err(|e| report(&format!("Could not {} the system", action), e))?;
    let message = response
        .message
        .unwrap_or_else(|| format!("System {} requested", action));
    print_cmd_success!("System", "{}", message);
    Ok(())
}

/// Health as a status; any failure reads as unreachable.
pub async fn check_health(backend: &dyn Backend) -> SystemStatus {
    match backend.get_health().await {
        Ok(health) => health.system_status(),
        Err(e) => {
            log::debug!("Health check failed: {}", e);
            SystemStatus::Unreachable
        }
    }
}

pub async fn health(backend: &dyn Backend) -> Result<(), Box<dyn Error>> {
    println!("{}", check_health(backend).await);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::consts::cli_consts::PLACEHOLDER;
    use crate::listing::{StatusLabel, SystemHealth};
    use std::collections::HashMap;

    #[test]
    fn stats_lists_every_status() {
        let mut counts = HashMap::new();
        counts.insert(ListingStatus::Failed.label().to_string(), 1200);
        let text = render_stats(&SystemStats {
            total_properties: Some(4000),
            status_counts: counts,
            system_status: Some("يعمل".to_string()),
            ..SystemStats::default()
        });
        assert!(text.starts_with("Total listings: 4,000"));
        assert!(text.contains("Failed      1,200"));
        assert!(text.contains("Duplicate   0"));
        assert!(text.ends_with("System: Running"));
    }

    #[test]
    fn listing_line_with_unknown_status() {
        let listing = Listing {
            id: 42,
            price: Some("1250000".to_string()),
            status: StatusLabel::Unrecognized("مؤرشف".to_string()),
            ..Listing::default()
        };
        let line = render_listing_line(&listing);
        assert!(line.contains("1,250,000"));
        assert!(line.contains(PLACEHOLDER));
        assert!(line.ends_with("Unknown (مؤرشف)"));
    }

    #[test]
    fn detail_includes_links() {
        let listing = Listing {
            id: 5,
            notion_property_id: Some("ab-cd-ef".to_string()),
            ..Listing::default()
        };
        let text = render_listing_detail(&listing);
        assert!(text.contains("Notion listing page: https://www.notion.so/abcdef"));
        assert!(text.contains(&format!("Region:          {}", PLACEHOLDER)));
    }

    #[tokio::test]
    async fn health_never_fails() {
        let mut backend = MockBackend::new();
        backend.expect_get_health().returning(|| {
            Err(BackendError::Http {
                status: 503,
                message: String::new(),
            })
        });
        assert_eq!(check_health(&backend).await, SystemStatus::Unreachable);
        assert!(health(&backend).await.is_ok());
    }

    #[tokio::test]
    async fn health_reports_processor_state() {
        let mut backend = MockBackend::new();
        backend.expect_get_health().returning(|| {
            Ok(SystemHealth {
                processor: Some("متوقف".to_string()),
                ..SystemHealth::default()
            })
        });
        assert_eq!(check_health(&backend).await, SystemStatus::Stopped);
    }

    #[tokio::test]
    async fn show_propagates_not_found() {
        let mut backend = MockBackend::new();
        backend.expect_get_listing().returning(|_| {
            Err(BackendError::Http {
                status: 404,
                message: "not found".to_string(),
            })
        });
        assert!(show(&backend, 7).await.is_err());
    }
}
