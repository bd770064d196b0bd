//! Messages exchanged between the dashboard state and the request tasks.

use crate::backend::error::BackendError;
use crate::listing::{
    ActionResponse, Listing, ListingId, ListingQuery, ListingsPage, SystemAction, SystemHealth,
    SystemStats,
};
use std::time::Duration;

/// The kinds of backend request the dashboard issues.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Stats,
    Listings,
    Detail,
    Health,
    Reprocess,
    SystemControl,
}

impl RequestKind {
    /// Reads can be overtaken by a newer read of the same kind; mutations never are.
    pub fn discards_stale(&self) -> bool {
        matches!(
            self,
            RequestKind::Stats | RequestKind::Listings | RequestKind::Detail | RequestKind::Health
        )
    }
}

/// A single backend request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoadStats,
    LoadListings(ListingQuery),
    LoadDetail(ListingId),
    CheckHealth,
    Reprocess(ListingId),
    ControlSystem(SystemAction),
}

/// Result of a finished request.
#[derive(Debug)]
pub enum Outcome {
    Stats(Result<SystemStats, BackendError>),
    /// A page, with the query it was fetched for.
    Listings(ListingQuery, Result<ListingsPage, BackendError>),
    Detail(ListingId, Result<Listing, BackendError>),
    Health(Result<SystemHealth, BackendError>),
    Reprocessed(ListingId, Result<ActionResponse, BackendError>),
    SystemControlled(SystemAction, Result<ActionResponse, BackendError>),
}

impl Outcome {
    pub fn kind(&self) -> RequestKind {
        match self {
            Outcome::Stats(_) => RequestKind::Stats,
            Outcome::Listings(..) => RequestKind::Listings,
            Outcome::Detail(..) => RequestKind::Detail,
            Outcome::Health(_) => RequestKind::Health,
            Outcome::Reprocessed(..) => RequestKind::Reprocess,
            Outcome::SystemControlled(..) => RequestKind::SystemControl,
        }
    }
}

/// A finished request tagged with the sequence number it was issued under.
#[derive(Debug)]
pub struct Response {
    pub seq: u64,
    pub outcome: Outcome,
}

/// Everything the request tasks report back to the owner of the dashboard state.
#[derive(Debug)]
pub enum Update {
    /// A full load (initial or manual refresh) began.
    LoadingStarted,
    /// A full load finished; `manual` is set for user-requested refreshes.
    LoadingFinished { manual: bool },
    Response(Response),
}

/// Follow-up work the state asks the controller to schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Rerun the full stats, listings and health sequence.
    Reload { manual: bool },
    Dispatch(Command),
    Deferred {
        delay: Duration,
        commands: Vec<Command>,
    },
}

/// What the user asked the dashboard to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Refresh,
    OpenDetail(ListingId),
    CloseDetail,
    /// Reprocess the given listing, or the last viewed one.
    Reprocess(Option<ListingId>),
    ControlSystem(SystemAction),
    CycleFilter,
    NextPage,
    PreviousPage,
    Search(String),
}
