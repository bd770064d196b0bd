//! Typed records exchanged with the listings backend.
//!
//! The backend keys listing fields by their Arabic labels and reports statuses
//! as Arabic text. Both are mapped onto English-named Rust types here so the
//! rest of the crate never touches the raw labels.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator};

pub type ListingId = u64;

/// Lifecycle status of a listing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumIter, strum::Display)]
pub enum ListingStatus {
    New,
    Successful,
    Pending,
    Failed,
    Duplicate,
    Multiple,
}

impl ListingStatus {
    /// Label used for this status on the wire.
    pub fn label(&self) -> &'static str {
        match self {
            ListingStatus::New => "عقار جديد",
            ListingStatus::Successful => "عقار ناجح",
            ListingStatus::Pending => "قيد المعالجة",
            ListingStatus::Failed => "عقار فاشل",
            ListingStatus::Duplicate => "عقار مكرر",
            ListingStatus::Multiple => "عقار متعدد",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        ListingStatus::iter().find(|status| status.label() == label)
    }

    /// Whether a listing in this status can be sent back for processing from the table.
    pub fn allows_reprocess(&self) -> bool {
        matches!(self, ListingStatus::Failed | ListingStatus::Pending)
    }
}

impl FromStr for ListingStatus {
    type Err = String;

    /// Accepts the English name (any case) or the wire label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(status) = ListingStatus::from_label(s) {
            return Ok(status);
        }
        ListingStatus::iter()
            .find(|status| status.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<String> = ListingStatus::iter().map(|s| s.to_string()).collect();
                format!("Unknown status '{}'. Expected one of: {}", s, names.join(", "))
            })
    }
}

/// A status as reported by the backend, which may be one the client does not know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusLabel {
    Known(ListingStatus),
    Unrecognized(String),
}

impl StatusLabel {
    pub fn known(&self) -> Option<ListingStatus> {
        match self {
            StatusLabel::Known(status) => Some(*status),
            StatusLabel::Unrecognized(_) => None,
        }
    }

    pub fn as_label(&self) -> &str {
        match self {
            StatusLabel::Known(status) => status.label(),
            StatusLabel::Unrecognized(raw) => raw,
        }
    }
}

impl Default for StatusLabel {
    fn default() -> Self {
        StatusLabel::Unrecognized(String::new())
    }
}

impl From<String> for StatusLabel {
    fn from(raw: String) -> Self {
        match ListingStatus::from_label(&raw) {
            Some(status) => StatusLabel::Known(status),
            None => StatusLabel::Unrecognized(raw),
        }
    }
}

impl From<StatusLabel> for String {
    fn from(label: StatusLabel) -> Self {
        label.as_label().to_string()
    }
}

impl From<ListingStatus> for StatusLabel {
    fn from(status: ListingStatus) -> Self {
        StatusLabel::Known(status)
    }
}

/// Reads a field the backend may send as a string, a number or null.
/// Blank strings count as absent.
fn text_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One property record managed by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,

    #[serde(rename = "البيان", default, deserialize_with = "text_field")]
    pub statement: Option<String>,
    #[serde(rename = "المنطقة", default, deserialize_with = "text_field")]
    pub region: Option<String>,
    #[serde(rename = "كود الوحدة", default, deserialize_with = "text_field")]
    pub unit_code: Option<String>,
    #[serde(rename = "نوع الوحدة", default, deserialize_with = "text_field")]
    pub unit_type: Option<String>,
    #[serde(rename = "حالة الوحدة", default, deserialize_with = "text_field")]
    pub unit_condition: Option<String>,
    #[serde(rename = "المساحة", default, deserialize_with = "text_field")]
    pub area: Option<String>,
    #[serde(rename = "الدور", default, deserialize_with = "text_field")]
    pub floor: Option<String>,
    #[serde(rename = "السعر", default, deserialize_with = "text_field")]
    pub price: Option<String>,
    #[serde(rename = "المميزات", default, deserialize_with = "text_field")]
    pub features: Option<String>,
    #[serde(rename = "العنوان", default, deserialize_with = "text_field")]
    pub address: Option<String>,
    #[serde(rename = "اسم الموظف", default, deserialize_with = "text_field")]
    pub employee_name: Option<String>,
    #[serde(rename = "اسم المالك", default, deserialize_with = "text_field")]
    pub owner_name: Option<String>,
    #[serde(rename = "رقم المالك", default, deserialize_with = "text_field")]
    pub owner_phone: Option<String>,
    #[serde(rename = "اتاحة العقار", default, deserialize_with = "text_field")]
    pub availability: Option<String>,
    #[serde(rename = "حالة الصور", default, deserialize_with = "text_field")]
    pub photos_status: Option<String>,
    #[serde(rename = "تفاصيل كاملة", default, deserialize_with = "text_field")]
    pub full_details: Option<String>,

    #[serde(default)]
    pub status: StatusLabel,
    #[serde(default, deserialize_with = "text_field")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub processing_attempts: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub error_messages: Vec<String>,

    #[serde(default, deserialize_with = "text_field")]
    pub notion_property_id: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub notion_owner_id: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub zoho_lead_id: Option<String>,
}

impl Listing {
    /// Every string-valued field, in declaration order.
    pub fn text_fields(&self) -> impl Iterator<Item = &str> {
        [
            &self.statement,
            &self.region,
            &self.unit_code,
            &self.unit_type,
            &self.unit_condition,
            &self.area,
            &self.floor,
            &self.price,
            &self.features,
            &self.address,
            &self.employee_name,
            &self.owner_name,
            &self.owner_phone,
            &self.availability,
            &self.photos_status,
            &self.full_details,
            &self.created_at,
            &self.updated_at,
            &self.notion_property_id,
            &self.notion_owner_id,
            &self.zoho_lead_id,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .chain(std::iter::once(self.status.as_label()))
    }

    /// Case-insensitive substring match over all text fields.
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        self.text_fields()
            .any(|value| value.to_lowercase().contains(needle))
    }

    pub fn allows_reprocess(&self) -> bool {
        self.status
            .known()
            .is_some_and(|status| status.allows_reprocess())
    }
}

/// Filters a cached page by a free-text search term.
///
/// A blank term returns the whole set in its original order.
pub fn search<'a>(listings: &'a [Listing], term: &str) -> Vec<&'a Listing> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return listings.iter().collect();
    }
    listings
        .iter()
        .filter(|listing| listing.matches(&needle))
        .collect()
}

/// Parameters of a listings page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingQuery {
    pub status: Option<ListingStatus>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            status: None,
            limit: crate::consts::cli_consts::DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl ListingQuery {
    pub fn new(status: Option<ListingStatus>, limit: u32, offset: u32) -> Self {
        Self {
            status,
            limit,
            offset,
        }
    }

    /// Query string for `/api/properties`, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut query = format!("limit={}&offset={}", self.limit, self.offset);
        if let Some(status) = self.status {
            query.push_str("&status=");
            query.push_str(&urlencoding::encode(status.label()));
        }
        query
    }

    pub fn with_status(self, status: Option<ListingStatus>) -> Self {
        Self {
            status,
            offset: 0,
            ..self
        }
    }

    pub fn next_page(self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            ..self
        }
    }

    pub fn previous_page(self) -> Self {
        Self {
            offset: self.offset.saturating_sub(self.limit),
            ..self
        }
    }

    /// 1-based page number for display.
    pub fn page_number(&self) -> u32 {
        if self.limit == 0 {
            1
        } else {
            self.offset / self.limit + 1
        }
    }
}

/// Cycles through "all" followed by every known status.
pub fn next_status_filter(current: Option<ListingStatus>) -> Option<ListingStatus> {
    let all: Vec<ListingStatus> = ListingStatus::iter().collect();
    match current {
        None => all.first().copied(),
        Some(status) => {
            let position = all.iter().position(|s| *s == status).unwrap_or(0);
            all.get(position + 1).copied()
        }
    }
}

/// Response body of `GET /api/properties`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ListingsPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: Vec<Listing>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Response body of `GET /api/stats`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SystemStats {
    #[serde(default)]
    pub total_properties: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status_counts: HashMap<String, u64>,
    #[serde(default)]
    pub system_status: Option<String>,
    #[serde(default)]
    pub today_count: Option<u64>,
    #[serde(default)]
    pub last_update: Option<String>,
}

impl SystemStats {
    pub fn total(&self) -> u64 {
        self.total_properties.unwrap_or(0)
    }

    pub fn count(&self, status: ListingStatus) -> u64 {
        self.status_counts
            .get(status.label())
            .copied()
            .unwrap_or(0)
    }
}

/// Operational state of the backend's processor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, strum::Display)]
pub enum SystemStatus {
    Running,
    Stopped,
    #[default]
    Unreachable,
}

impl SystemStatus {
    /// Maps the backend's processor tag; anything unrecognised is unreachable.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "يعمل" => SystemStatus::Running,
            "متوقف" => SystemStatus::Stopped,
            _ => SystemStatus::Unreachable,
        }
    }
}

/// Response body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SystemHealth {
    #[serde(default)]
    pub processor: Option<String>,
}

impl SystemHealth {
    pub fn system_status(&self) -> SystemStatus {
        self.processor
            .as_deref()
            .map(SystemStatus::from_tag)
            .unwrap_or_default()
    }
}

/// Response body of the mutation endpoints.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Start or stop the backend processor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum SystemAction {
    Start,
    Stop,
}

impl SystemAction {
    pub fn path_segment(&self) -> &'static str {
        match self {
            SystemAction::Start => "start",
            SystemAction::Stop => "stop",
        }
    }
}

impl Display for SystemAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(id: ListingId, region: &str, owner: &str) -> Listing {
        Listing {
            id,
            region: Some(region.to_string()),
            owner_name: Some(owner.to_string()),
            status: StatusLabel::Known(ListingStatus::New),
            ..Listing::default()
        }
    }

    #[test]
    fn deserializes_wire_listing() {
        let raw = json!({
            "id": 7,
            "البيان": "شقة للبيع",
            "المنطقة": "Maadi",
            "السعر": 1250000,
            "الدور": "",
            "status": "عقار فاشل",
            "created_at": "2024-03-01T10:15:00.123456",
            "processing_attempts": 2,
            "error_messages": ["missing phone"],
            "notion_property_id": "abc-def",
            "zoho_lead_id": null
        });

        let listing: Listing = serde_json::from_value(raw).unwrap();
        assert_eq!(listing.id, 7);
        assert_eq!(listing.region.as_deref(), Some("Maadi"));
        assert_eq!(listing.price.as_deref(), Some("1250000"));
        assert_eq!(listing.floor, None);
        assert_eq!(listing.status.known(), Some(ListingStatus::Failed));
        assert_eq!(listing.processing_attempts, 2);
        assert_eq!(listing.error_messages, vec!["missing phone".to_string()]);
        assert_eq!(listing.zoho_lead_id, None);
        assert!(listing.allows_reprocess());
    }

    #[test]
    fn unknown_status_is_kept_verbatim() {
        let listing: Listing =
            serde_json::from_value(json!({"id": 1, "status": "archived"})).unwrap();
        assert_eq!(
            listing.status,
            StatusLabel::Unrecognized("archived".to_string())
        );
        assert!(!listing.allows_reprocess());
    }

    #[test]
    fn status_parses_from_name_or_label() {
        assert_eq!("failed".parse::<ListingStatus>(), Ok(ListingStatus::Failed));
        assert_eq!(
            "عقار مكرر".parse::<ListingStatus>(),
            Ok(ListingStatus::Duplicate)
        );
        assert!("bogus".parse::<ListingStatus>().is_err());
    }

    #[test]
    fn search_is_case_insensitive_over_text_fields() {
        let listings = vec![
            sample(1, "Maadi", "Ahmed"),
            sample(2, "Zamalek", "Mona"),
            sample(3, "New Cairo", "ahmed ali"),
        ];

        let hits: Vec<ListingId> = search(&listings, "  AHMED ").iter().map(|l| l.id).collect();
        assert_eq!(hits, vec![1, 3]);

        // Status labels are searchable too.
        assert_eq!(search(&listings, "عقار جديد").len(), 3);
        assert!(search(&listings, "heliopolis").is_empty());
    }

    #[test]
    fn empty_search_restores_cached_order() {
        let listings = vec![
            sample(3, "A", "x"),
            sample(1, "B", "y"),
            sample(2, "C", "z"),
        ];
        let narrowed = search(&listings, "b");
        assert_eq!(narrowed.len(), 1);

        let restored: Vec<ListingId> = search(&listings, "").iter().map(|l| l.id).collect();
        assert_eq!(restored, vec![3, 1, 2]);
    }

    #[test]
    fn query_string_encodes_status() {
        let query = ListingQuery::new(Some(ListingStatus::Pending), 50, 100);
        assert_eq!(
            query.to_query_string(),
            format!(
                "limit=50&offset=100&status={}",
                urlencoding::encode("قيد المعالجة")
            )
        );
        assert_eq!(ListingQuery::default().to_query_string(), "limit=50&offset=0");
    }

    #[test]
    fn paging_never_goes_negative() {
        let query = ListingQuery::new(None, 50, 20);
        assert_eq!(query.previous_page().offset, 0);
        assert_eq!(query.next_page().offset, 70);
        assert_eq!(ListingQuery::new(None, 50, 100).page_number(), 3);
    }

    #[test]
    fn status_filter_cycles_back_to_all() {
        let mut filter = None;
        let mut seen = Vec::new();
        for _ in 0..7 {
            filter = next_status_filter(filter);
            seen.push(filter);
        }
        assert_eq!(seen.first(), Some(&Some(ListingStatus::New)));
        assert_eq!(seen.get(5), Some(&Some(ListingStatus::Multiple)));
        assert_eq!(seen.get(6), Some(&None));
    }

    #[test]
    fn stats_count_missing_statuses_as_zero() {
        let stats: SystemStats = serde_json::from_value(json!({
            "total_properties": 12,
            "status_counts": {"عقار ناجح": 5}
        }))
        .unwrap();
        assert_eq!(stats.total(), 12);
        assert_eq!(stats.count(ListingStatus::Successful), 5);
        assert_eq!(stats.count(ListingStatus::Pending), 0);
        assert_eq!(stats.count(ListingStatus::Failed), 0);
    }

    #[test]
    fn health_maps_processor_tag() {
        let running = SystemHealth {
            processor: Some("يعمل".to_string()),
            ..SystemHealth::default()
        };
        assert_eq!(running.system_status(), SystemStatus::Running);
        assert_eq!(SystemStatus::from_tag("متوقف"), SystemStatus::Stopped);
        assert_eq!(
            SystemHealth::default().system_status(),
            SystemStatus::Unreachable
        );
    }
}
