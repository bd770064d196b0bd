//! Dashboard state update logic
//!
//! Applies finished requests and user intents to the dashboard state. Nothing
//! here performs I/O; follow-up requests are returned as [`Effect`]s for the
//! controller to schedule.

use super::state::DashboardState;

use crate::backend::error::BackendError;
use crate::backend::error_handler::ErrorHandler;
use crate::consts::cli_consts::counters::step_interval;
use crate::consts::cli_consts::timing::{clock_interval, deferred_refresh};
use crate::controller::command::{Command, Effect, Intent, Outcome, Response, Update};
use crate::events::{Event, Source};
use crate::listing::{
    self, ActionResponse, Listing, ListingId, ListingQuery, ListingStatus, ListingsPage,
    SystemAction, SystemHealth, SystemStats, SystemStatus,
};
use crate::ui::notifications::NotificationKind;

use chrono::Local;
use std::time::Instant;

impl DashboardState {
    /// Advance the clock, the counter animation and notification expiry.
    pub fn update(&mut self) {
        self.tick += 1;
        let now = Instant::now();

        let clock_due = self
            .last_clock_update
            .is_none_or(|last| now.duration_since(last) >= clock_interval());
        if clock_due {
            self.clock = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
            self.last_clock_update = Some(now);
        }

        if now.duration_since(self.last_counter_step) >= step_interval() {
            self.counters.step();
            self.last_counter_step = now;
        }

        self.notifications.expire(now);
    }

    /// Apply one message from the request tasks.
    pub fn apply(&mut self, update: Update) -> Vec<Effect> {
        match update {
            Update::LoadingStarted => {
                self.loads_in_flight += 1;
                Vec::new()
            }
            Update::LoadingFinished { manual } => {
                self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
                if manual {
                    self.notifications.success("Data refreshed");
                    self.add_to_activity_log(Event::success(Source::Session, "Data refreshed"));
                }
                Vec::new()
            }
            Update::Response(response) => self.apply_response(response),
        }
    }

    fn apply_response(&mut self, response: Response) -> Vec<Effect> {
        let Response { seq, outcome } = response;
        let kind = outcome.kind();
        if !self.accept_sequence(kind, seq) {
            log::debug!("Discarding stale {:?} response #{}", kind, seq);
            return Vec::new();
        }

        match outcome {
            Outcome::Stats(result) => {
                self.handle_stats(result);
                Vec::new()
            }
            Outcome::Listings(query, result) => {
                self.handle_listings(query, result);
                Vec::new()
            }
            Outcome::Detail(id, result) => {
                self.handle_detail(id, result);
                Vec::new()
            }
            Outcome::Health(result) => {
                self.handle_health(result);
                Vec::new()
            }
            Outcome::Reprocessed(id, result) => self.handle_reprocessed(id, result),
            Outcome::SystemControlled(action, result) => {
                self.handle_system_controlled(action, result)
            }
        }
    }

    fn log_failure(&mut self, source: Source, context: &str, error: &BackendError) -> String {
        let handler = ErrorHandler::new();
        let message = format!("{}: {}", context, handler.describe(error));
        log::debug!("{} failed: {}", source, error);
        self.add_to_activity_log(Event::error(
            source,
            message.clone(),
            handler.classify_error(error),
        ));
        message
    }

    fn handle_stats(&mut self, result: Result<SystemStats, BackendError>) {
        match result {
            Ok(stats) => {
                self.counters.set_targets(&stats);
                self.system_status = stats
                    .system_status
                    .as_deref()
                    .map(SystemStatus::from_tag)
                    .unwrap_or_default();
                self.add_to_activity_log(Event::refresh(
                    Source::Stats,
                    format!("{} listings in total", stats.total()),
                ));
                self.stats = Some(stats);
            }
            Err(e) => {
                self.log_failure(Source::Stats, "Could not load statistics", &e);
            }
        }
    }

    fn handle_listings(
        &mut self,
        query: ListingQuery,
        result: Result<ListingsPage, BackendError>,
    ) {
        // The filter or page changed while this request was pending
        if query != self.query() {
            log::debug!("Discarding listings fetched for {:?}", query);
            return;
        }
        match result {
            Ok(page) => {
                let count = page.properties.len();
                self.listings_total = page.total;
                self.replace_listings(page.properties);
                self.add_to_activity_log(Event::refresh(
                    Source::Listings,
                    format!(
                        "Loaded {} listings (page {})",
                        count,
                        self.query().page_number()
                    ),
                ));
            }
            Err(e) => {
                self.log_failure(Source::Listings, "Could not load listings", &e);
                self.show_empty_state();
            }
        }
    }

    fn handle_detail(&mut self, id: ListingId, result: Result<Listing, BackendError>) {
        if self.current_detail_id() != Some(id) {
            log::debug!("Ignoring detail for listing {} that is no longer wanted", id);
            return;
        }
        match result {
            Ok(listing) => self.open_detail(listing),
            Err(e) => {
                let message =
                    self.log_failure(Source::Detail, &format!("Could not load listing {}", id), &e);
                self.notifications.error(message);
            }
        }
    }

    fn handle_health(&mut self, result: Result<SystemHealth, BackendError>) {
        match result {
            Ok(health) => self.system_status = health.system_status(),
            Err(e) => {
                self.system_status = SystemStatus::Unreachable;
                self.log_failure(Source::Health, "Health check failed", &e);
            }
        }
    }

    fn handle_reprocessed(
        &mut self,
        id: ListingId,
        result: Result<ActionResponse, BackendError>,
    ) -> Vec<Effect> {
        match result {
            Ok(response) => {
                let message = response
                    .message
                    .unwrap_or_else(|| format!("Listing {} sent for reprocessing", id));
                self.notifications.success(message.clone());
                self.add_to_activity_log(Event::success(Source::Reprocess, message));
                self.close_detail();
                vec![Effect::Deferred {
                    delay: deferred_refresh(),
                    commands: vec![Command::LoadListings(self.query()), Command::LoadStats],
                }]
            }
            Err(e) => {
                let message = self.log_failure(
                    Source::Reprocess,
                    &format!("Could not reprocess listing {}", id),
                    &e,
                );
                self.notifications.error(message);
                Vec::new()
            }
        }
    }

    fn handle_system_controlled(
        &mut self,
        action: SystemAction,
        result: Result<ActionResponse, BackendError>,
    ) -> Vec<Effect> {
        match result {
            Ok(response) => {
                let message = response
                    .message
                    .unwrap_or_else(|| format!("System {} requested", action));
                self.notifications.success(message.clone());
                self.add_to_activity_log(Event::success(Source::SystemControl, message));
            }
            Err(e) => {
                let message = self.log_failure(
                    Source::SystemControl,
                    &format!("Could not {} the system", action),
                    &e,
                );
                self.notifications.error(message);
            }
        }
        vec![Effect::Deferred {
            delay: deferred_refresh(),
            commands: vec![Command::CheckHealth],
        }]
    }

    /// Translate a user intent into state changes and requests.
    pub fn handle_intent(&mut self, intent: Intent) -> Vec<Effect> {
        match intent {
            Intent::Refresh => vec![Effect::Reload { manual: true }],
            Intent::OpenDetail(id) => {
                self.set_current_detail_id(id);
                vec![Effect::Dispatch(Command::LoadDetail(id))]
            }
            Intent::CloseDetail => {
                self.close_detail();
                Vec::new()
            }
            Intent::Reprocess(id) => match id.or(self.current_detail_id()) {
                Some(id) => vec![Effect::Dispatch(Command::Reprocess(id))],
                None => Vec::new(),
            },
            Intent::ControlSystem(action) => {
                vec![Effect::Dispatch(Command::ControlSystem(action))]
            }
            Intent::CycleFilter => {
                let next = listing::next_status_filter(self.query().status);
                self.notifications.push(
                    NotificationKind::Info,
                    format!("Filter: {}", filter_label(next)),
                );
                self.reload_with(self.query().with_status(next))
            }
            Intent::NextPage => {
                let query = self.query();
                let page_len = self.listings().map(<[Listing]>::len).unwrap_or(0);
                if page_len < query.limit as usize {
                    self.notifications
                        .push(NotificationKind::Info, "Already on the last page");
                    return Vec::new();
                }
                self.reload_with(query.next_page())
            }
            Intent::PreviousPage => {
                let query = self.query();
                if query.offset == 0 {
                    return Vec::new();
                }
                self.reload_with(query.previous_page())
            }
            Intent::Search(term) => {
                self.set_search_term(term);
                Vec::new()
            }
        }
    }

    fn reload_with(&mut self, query: ListingQuery) -> Vec<Effect> {
        self.set_query(query);
        vec![Effect::Dispatch(Command::LoadListings(query))]
    }
}

/// Display name of a status filter.
pub fn filter_label(status: Option<ListingStatus>) -> String {
    match status {
        Some(status) => status.to_string(),
        None => "All".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::listing::StatusLabel;
    use crate::ui::UIConfig;
    use std::collections::HashMap;

    fn state() -> DashboardState {
        DashboardState::new(
            Environment::Local,
            ListingQuery::default(),
            UIConfig::new(false),
        )
    }

    fn response(seq: u64, outcome: Outcome) -> Update {
        Update::Response(Response { seq, outcome })
    }

    fn listings(
        seq: u64,
        query: ListingQuery,
        result: Result<ListingsPage, BackendError>,
    ) -> Update {
        response(seq, Outcome::Listings(query, result))
    }

    fn http(status: u16) -> BackendError {
        BackendError::Http {
            status,
            message: String::new(),
        }
    }

    fn listing(id: ListingId, status: ListingStatus) -> Listing {
        Listing {
            id,
            status: StatusLabel::Known(status),
            ..Listing::default()
        }
    }

    fn page(ids: &[ListingId]) -> ListingsPage {
        ListingsPage {
            properties: ids
                .iter()
                .map(|id| listing(*id, ListingStatus::New))
                .collect(),
            total: Some(ids.len() as u64),
        }
    }

    /// A transport-level error, produced without touching the network.
    async fn transport_error() -> BackendError {
        match reqwest::Client::new().get("not a url").send().await {
            Err(e) => BackendError::Reqwest(e),
            Ok(_) => panic!("request to an invalid URL succeeded"),
        }
    }

    #[test]
    fn reprocess_success_schedules_one_refresh_and_closes_overlay() {
        let mut state = state();
        state.handle_intent(Intent::OpenDetail(7));
        state.apply(response(1, Outcome::Detail(7, Ok(listing(7, ListingStatus::Failed)))));
        assert!(state.is_detail_open());

        let effects = state.apply(response(
            2,
            Outcome::Reprocessed(7, Ok(ActionResponse::default())),
        ));

        assert!(!state.is_detail_open());
        assert_eq!(
            effects,
            vec![Effect::Deferred {
                delay: deferred_refresh(),
                commands: vec![
                    Command::LoadListings(ListingQuery::default()),
                    Command::LoadStats
                ],
            }]
        );
        assert_eq!(
            state.notifications.latest().map(|n| n.kind),
            Some(NotificationKind::Success)
        );
    }

    #[test]
    fn reprocess_failure_notifies_without_refresh() {
        let mut state = state();
        let effects = state.apply(response(1, Outcome::Reprocessed(3, Err(http(500)))));
        assert!(effects.is_empty());
        assert_eq!(
            state.notifications.latest().map(|n| n.kind),
            Some(NotificationKind::Error)
        );
    }

    #[test]
    fn missing_listing_shows_error_and_no_overlay() {
        let mut state = state();
        let effects = state.handle_intent(Intent::OpenDetail(7));
        assert_eq!(effects, vec![Effect::Dispatch(Command::LoadDetail(7))]);

        state.apply(response(1, Outcome::Detail(7, Err(http(404)))));

        assert!(!state.is_detail_open());
        let toast = state.notifications.latest().unwrap();
        assert_eq!(toast.kind, NotificationKind::Error);
        assert!(toast.message.contains("7"));
    }

    #[test]
    fn detail_for_an_abandoned_id_is_ignored() {
        let mut state = state();
        state.handle_intent(Intent::OpenDetail(1));
        state.handle_intent(Intent::OpenDetail(2));
        state.apply(response(1, Outcome::Detail(1, Ok(listing(1, ListingStatus::New)))));
        assert!(!state.is_detail_open());
    }

    #[tokio::test]
    async fn health_network_error_means_unreachable() {
        let mut state = state();
        state.apply(response(
            1,
            Outcome::Health(Ok(SystemHealth {
                processor: Some("يعمل".to_string()),
                ..SystemHealth::default()
            })),
        ));
        assert_eq!(state.system_status, SystemStatus::Running);

        state.apply(response(2, Outcome::Health(Err(transport_error().await))));
        assert_eq!(state.system_status, SystemStatus::Unreachable);
    }

    #[test]
    fn failing_listings_on_empty_cache_shows_empty_state() {
        let mut state = state();
        state.apply(listings(1, ListingQuery::default(), Err(http(502))));
        assert!(state.is_empty_state());
        assert!(state.listings().is_none());
    }

    #[test]
    fn failing_listings_keeps_previous_snapshot() {
        let mut state = state();
        state.apply(listings(1, ListingQuery::default(), Ok(page(&[1, 2]))));
        state.apply(listings(2, ListingQuery::default(), Err(http(502))));
        assert_eq!(state.listings().map(<[Listing]>::len), Some(2));
    }

    #[test]
    fn listings_are_replaced_not_merged() {
        let mut state = state();
        state.apply(listings(1, ListingQuery::default(), Ok(page(&[1, 2, 3]))));
        state.apply(listings(2, ListingQuery::default(), Ok(page(&[9]))));
        let ids: Vec<ListingId> = state.listings().unwrap().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![9]);
        assert!(!state.is_empty_state());
    }

    #[test]
    fn stale_listings_response_is_discarded() {
        let mut state = state();
        state.apply(listings(5, ListingQuery::default(), Ok(page(&[5]))));
        state.apply(listings(4, ListingQuery::default(), Ok(page(&[4]))));
        let ids: Vec<ListingId> = state.listings().unwrap().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![5]);
    }

    #[test]
    fn listings_for_a_previous_filter_are_discarded() {
        let mut state = state();
        let all = state.query();
        state.handle_intent(Intent::CycleFilter);
        let new_only = state.query();

        // The older request started last and so carries the higher number
        state.apply(listings(1, new_only, Ok(page(&[2]))));
        state.apply(listings(2, all, Ok(page(&[1]))));
        let ids: Vec<ListingId> = state.listings().unwrap().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2]);

        state.apply(listings(3, all, Err(http(500))));
        assert!(!state.is_empty_state());
    }

    #[test]
    fn overlapping_loads_keep_the_indicator_on() {
        let mut state = state();
        state.apply(Update::LoadingStarted);
        state.apply(Update::LoadingStarted);
        state.apply(Update::LoadingFinished { manual: true });
        assert!(state.is_loading());
        state.apply(Update::LoadingFinished { manual: true });
        assert!(!state.is_loading());
    }

    #[test]
    fn stats_drive_counters_and_system_status() {
        let mut state = state();
        let mut counts = HashMap::new();
        counts.insert(ListingStatus::Successful.label().to_string(), 5);
        state.apply(response(
            1,
            Outcome::Stats(Ok(SystemStats {
                total_properties: Some(12),
                status_counts: counts,
                system_status: Some("متوقف".to_string()),
                ..SystemStats::default()
            })),
        ));

        assert_eq!(state.system_status, SystemStatus::Stopped);
        assert_eq!(state.counters.total.target(), 12);
        assert_eq!(state.counters.successful.target(), 5);
        assert_eq!(state.counters.pending.target(), 0);
        assert_eq!(state.counters.failed.target(), 0);

        state.apply(response(2, Outcome::Stats(Ok(SystemStats::default()))));
        assert_eq!(state.system_status, SystemStatus::Unreachable);
    }

    #[test]
    fn system_control_rechecks_health_either_way() {
        let expected = vec![Effect::Deferred {
            delay: deferred_refresh(),
            commands: vec![Command::CheckHealth],
        }];

        let mut state = state();
        let ok = state.apply(response(
            1,
            Outcome::SystemControlled(
                SystemAction::Start,
                Ok(ActionResponse {
                    message: Some("System started".to_string()),
                }),
            ),
        ));
        assert_eq!(ok, expected);
        assert_eq!(state.notifications.latest().unwrap().message, "System started");

        let failed = state.apply(response(
            2,
            Outcome::SystemControlled(SystemAction::Stop, Err(http(500))),
        ));
        assert_eq!(failed, expected);
        assert_eq!(
            state.notifications.latest().map(|n| n.kind),
            Some(NotificationKind::Error)
        );
    }

    #[test]
    fn manual_refresh_completion_is_announced() {
        let mut state = state();
        assert_eq!(
            state.handle_intent(Intent::Refresh),
            vec![Effect::Reload { manual: true }]
        );
        state.apply(Update::LoadingStarted);
        assert!(state.is_loading());
        state.apply(Update::LoadingFinished { manual: true });
        assert!(!state.is_loading());
        assert_eq!(state.notifications.latest().unwrap().message, "Data refreshed");
    }

    #[test]
    fn reprocess_defaults_to_last_viewed_listing() {
        let mut state = state();
        assert!(state.handle_intent(Intent::Reprocess(None)).is_empty());

        state.handle_intent(Intent::OpenDetail(11));
        assert_eq!(
            state.handle_intent(Intent::Reprocess(None)),
            vec![Effect::Dispatch(Command::Reprocess(11))]
        );
        assert_eq!(
            state.handle_intent(Intent::Reprocess(Some(4))),
            vec![Effect::Dispatch(Command::Reprocess(4))]
        );
    }

    #[test]
    fn filter_cycle_resets_offset() {
        let mut state = state();
        state.set_query(ListingQuery::new(None, 50, 100));

        let effects = state.handle_intent(Intent::CycleFilter);
        let expected = ListingQuery::new(Some(ListingStatus::New), 50, 0);
        assert_eq!(effects, vec![Effect::Dispatch(Command::LoadListings(expected))]);
        assert_eq!(state.query(), expected);
    }

    #[test]
    fn paging_stays_within_bounds() {
        let mut state = state();
        state.set_query(ListingQuery::new(None, 2, 0));
        assert!(state.handle_intent(Intent::PreviousPage).is_empty());

        let query = state.query();
        state.apply(listings(1, query, Ok(page(&[1]))));
        assert!(state.handle_intent(Intent::NextPage).is_empty());

        state.apply(listings(2, query, Ok(page(&[1, 2]))));
        assert_eq!(
            state.handle_intent(Intent::NextPage),
            vec![Effect::Dispatch(Command::LoadListings(ListingQuery::new(
                None, 2, 2
            )))]
        );
        assert_eq!(
            state.handle_intent(Intent::PreviousPage),
            vec![Effect::Dispatch(Command::LoadListings(ListingQuery::new(
                None, 2, 0
            )))]
        );
    }
}
