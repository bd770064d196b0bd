//! Listings Backend Client
//!
//! A JSON-over-HTTP client for the listings backend's REST API.

use crate::backend::Backend;
use crate::backend::error::BackendError;
use crate::consts::cli_consts::timing;
use crate::environment::Environment;
use crate::listing::{
    ActionResponse, Listing, ListingId, ListingQuery, ListingsPage, SystemAction, SystemHealth,
    SystemStats,
};
use log::debug;
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("listings-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    environment: Environment,
}

impl BackendClient {
    pub fn new(environment: Environment) -> Result<Self, BackendError> {
        let client = ClientBuilder::new()
            .connect_timeout(timing::http_timeout())
            .timeout(timing::http_timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.backend_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, BackendError> {
        serde_json::from_slice(bytes).map_err(BackendError::Decode)
    }

    async fn handle_response_status(response: Response) -> Result<Response, BackendError> {
        if !response.status().is_success() {
            return Err(BackendError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, BackendError> {
        let url = self.build_url(endpoint);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }

    async fn post_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, BackendError> {
        let url = self.build_url(endpoint);
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }
}

#[async_trait::async_trait]
impl Backend for BackendClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn get_stats(&self) -> Result<SystemStats, BackendError> {
        self.get_request("api/stats").await
    }

    async fn get_listings(&self, query: ListingQuery) -> Result<ListingsPage, BackendError> {
        let endpoint = format!("api/properties?{}", query.to_query_string());
        self.get_request(&endpoint).await
    }

    async fn get_listing(&self, id: ListingId) -> Result<Listing, BackendError> {
        self.get_request(&format!("api/property/{}", id)).await
    }

    async fn reprocess(&self, id: ListingId) -> Result<ActionResponse, BackendError> {
        self.post_request(&format!("api/property/{}/reprocess", id))
            .await
    }

    async fn control_system(&self, action: SystemAction) -> Result<ActionResponse, BackendError> {
        self.post_request(&format!("api/system/{}", action.path_segment()))
            .await
    }

    async fn get_health(&self) -> Result<SystemHealth, BackendError> {
        self.get_request("api/health").await
    }
}
