use crate::backend::error::BackendError;
use crate::environment::Environment;
use crate::listing::{
    ActionResponse, Listing, ListingId, ListingQuery, ListingsPage, SystemAction, SystemHealth,
    SystemStats,
};

pub(crate) mod client;
pub use client::BackendClient;
pub mod error;
pub mod error_handler;

#[cfg(test)]
use mockall::{automock, predicate::*};

/// The REST surface of the listings backend the dashboard depends on.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    fn environment(&self) -> &Environment;

    /// `GET /api/stats`
    async fn get_stats(&self) -> Result<SystemStats, BackendError>;

    /// `GET /api/properties`
    async fn get_listings(&self, query: ListingQuery) -> Result<ListingsPage, BackendError>;

    /// `GET /api/property/{id}`
    async fn get_listing(&self, id: ListingId) -> Result<Listing, BackendError>;

    /// `POST /api/property/{id}/reprocess`
    async fn reprocess(&self, id: ListingId) -> Result<ActionResponse, BackendError>;

    /// `POST /api/system/{start|stop}`
    async fn control_system(&self, action: SystemAction) -> Result<ActionResponse, BackendError>;

    /// `GET /api/health`
    async fn get_health(&self) -> Result<SystemHealth, BackendError>;
}
