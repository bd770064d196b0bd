//! Dashboard state management
//!
//! Holds everything the dashboard shows: the cached listings page, the detail
//! overlay, counters, system status, notifications and the activity log.

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::controller::command::RequestKind;
use crate::environment::Environment;
use crate::events::Event;
use crate::listing::{self, Listing, ListingId, ListingQuery, SystemStats, SystemStatus};
use crate::ui::UIConfig;
use crate::ui::metrics::StatCounters;
use crate::ui::notifications::Notifications;

use std::collections::{HashMap, VecDeque};
use std::time::Instant;

/// Whether key presses drive commands or edit the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
}

#[derive(Debug)]
pub struct DashboardState {
    /// The environment in which the application is running.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Whether to enable background colors
    pub with_background_color: bool,

    /// Snapshot of the last successfully fetched page. `None` until one arrives.
    listings: Option<Vec<Listing>>,
    /// Parameters of the page being shown (and of the next refresh).
    query: ListingQuery,
    /// Current search term, applied locally to the cached page.
    search_term: String,
    /// Whether the "no listings" message is showing.
    empty_state: bool,
    /// Total listings matching the filter, when the backend reports it.
    pub listings_total: Option<u64>,

    /// Listing shown in the detail overlay; the overlay is open while this is set.
    detail: Option<Listing>,
    /// Id of the last listing the user asked to view.
    current_detail_id: Option<ListingId>,

    pub stats: Option<SystemStats>,
    pub counters: StatCounters,
    pub system_status: SystemStatus,

    pub notifications: Notifications,
    /// Activity logs for display
    pub activity_logs: VecDeque<Event>,
    /// Events not yet handed to the headless printer, when echoing is on.
    outbox: Option<Vec<Event>>,

    /// Number of full loads in flight.
    pub(super) loads_in_flight: usize,
    /// Highest sequence number applied per request kind.
    last_applied: HashMap<RequestKind, u64>,

    /// Row selected in the (filtered) table.
    pub selected: usize,
    pub input_mode: InputMode,

    /// Clock text, refreshed once per second.
    pub clock: String,
    pub(super) last_clock_update: Option<Instant>,
    pub(super) last_counter_step: Instant,
    /// Animation tick counter
    pub tick: usize,
}

impl DashboardState {
    /// Creates a new instance of the dashboard state.
    pub fn new(environment: Environment, query: ListingQuery, ui_config: UIConfig) -> Self {
        Self {
            environment,
            start_time: Instant::now(),
            with_background_color: ui_config.with_background_color,
            listings: None,
            query,
            search_term: String::new(),
            empty_state: false,
            listings_total: None,
            detail: None,
            current_detail_id: None,
            stats: None,
            counters: StatCounters::default(),
            system_status: SystemStatus::Unreachable,
            notifications: Notifications::default(),
            activity_logs: VecDeque::new(),
            outbox: None,
            loads_in_flight: 0,
            last_applied: HashMap::new(),
            selected: 0,
            input_mode: InputMode::Normal,
            clock: String::new(),
            last_clock_update: None,
            last_counter_step: Instant::now(),
            tick: 0,
        }
    }

    /// Keeps a copy of every new activity event for [`Self::take_new_events`].
    pub fn echo_events(&mut self) {
        self.outbox = Some(Vec::new());
    }

    pub fn take_new_events(&mut self) -> Vec<Event> {
        self.outbox.as_mut().map(std::mem::take).unwrap_or_default()
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: Event) {
        if let Some(outbox) = self.outbox.as_mut() {
            outbox.push(event.clone());
        }
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    // Listing cache

    pub fn listings(&self) -> Option<&[Listing]> {
        self.listings.as_deref()
    }

    /// Replaces the cached page wholesale.
    pub(super) fn replace_listings(&mut self, listings: Vec<Listing>) {
        self.listings = Some(listings);
        self.empty_state = self.visible_listings().is_empty();
        self.clamp_selection();
    }

    pub(super) fn show_empty_state(&mut self) {
        self.empty_state = true;
    }

    pub fn is_loading(&self) -> bool {
        self.loads_in_flight > 0
    }

    pub fn is_empty_state(&self) -> bool {
        self.empty_state
    }

    /// Cached listings matching the search term, in cache order.
    pub fn visible_listings(&self) -> Vec<&Listing> {
        match &self.listings {
            Some(listings) => listing::search(listings, &self.search_term),
            None => Vec::new(),
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Applies a search term to the cached page without touching the network.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.selected = 0;
        if self.listings.is_some() {
            self.empty_state = self.visible_listings().is_empty();
        }
    }

    pub fn query(&self) -> ListingQuery {
        self.query
    }

    pub fn set_query(&mut self, query: ListingQuery) {
        self.query = query;
        self.selected = 0;
    }

    // Selection

    pub fn selected_listing(&self) -> Option<&Listing> {
        self.visible_listings().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.visible_listings().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_listings().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    // Detail overlay

    pub fn detail(&self) -> Option<&Listing> {
        self.detail.as_ref()
    }

    pub fn is_detail_open(&self) -> bool {
        self.detail.is_some()
    }

    pub(super) fn open_detail(&mut self, listing: Listing) {
        self.detail = Some(listing);
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn current_detail_id(&self) -> Option<ListingId> {
        self.current_detail_id
    }

    pub fn set_current_detail_id(&mut self, id: ListingId) {
        self.current_detail_id = Some(id);
    }

    // Staleness guard

    /// Records `seq` for `kind`, returning false when a newer response of the
    /// same kind was already applied.
    pub(super) fn accept_sequence(&mut self, kind: RequestKind, seq: u64) -> bool {
        if !kind.discards_stale() {
            return true;
        }
        let last = self.last_applied.entry(kind).or_insert(0);
        if seq < *last {
            return false;
        }
        *last = seq;
        true
    }
}
