//! Display formatting for listing fields.

use crate::consts::cli_consts::PLACEHOLDER;
use chrono::{DateTime, NaiveDateTime};

/// Returns the value, or the placeholder when it is missing or blank.
pub fn or_placeholder(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Formats a price with thousands grouping.
///
/// Missing, blank, zero and non-numeric prices all render as `0`. Leading
/// digits are honoured the way a lenient integer parse would ("1500 EGP" is 1500).
pub fn format_price(price: Option<&str>) -> String {
    let Some(raw) = price.map(str::trim).filter(|p| !p.is_empty() && *p != "0") else {
        return "0".to_string();
    };

    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let leading: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    let trimmed = leading.trim_start_matches('0');
    if trimmed.is_empty() {
        return "0".to_string();
    }

    let grouped = group_thousands(trimmed);
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Formats a count with thousands grouping.
pub fn format_count(count: u64) -> String {
    group_thousands(&count.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a backend timestamp as `YYYY-MM-DD HH:MM`.
///
/// Accepts RFC 3339 and naive ISO-8601 (with or without fractional seconds).
/// Unparseable input is shown as-is; missing input renders the placeholder.
pub fn format_datetime(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return PLACEHOLDER.to_string();
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, pattern) {
            return parsed.format("%Y-%m-%d %H:%M").to_string();
        }
    }
    raw.to_string()
}

/// Link to a Notion page. Notion page ids are used without their dashes.
pub fn notion_url(page_id: &str) -> String {
    format!("https://www.notion.so/{}", page_id.replace('-', ""))
}

/// Link to a lead in Zoho CRM.
pub fn zoho_lead_url(lead_id: &str) -> String {
    format!(
        "https://crm.zoho.com/crm/EntityInfo?module=Leads&id={}",
        lead_id
    )
}

/// External pages a listing is cross-referenced with, as (title, url) pairs.
pub fn external_links(listing: &crate::listing::Listing) -> Vec<(&'static str, String)> {
    let mut links = Vec::new();
    if let Some(id) = &listing.notion_property_id {
        links.push(("Notion listing page", notion_url(id)));
    }
    if let Some(id) = &listing.notion_owner_id {
        links.push(("Notion owner page", notion_url(id)));
    }
    if let Some(id) = &listing.zoho_lead_id {
        links.push(("Zoho CRM lead", zoho_lead_url(id)));
    }
    links
}
