//! Listing store — the only code that talks to the remote `jobs` collection.
//!
//! `RestListingStore` speaks the PostgREST dialect exposed by the hosted data
//! service, plus its auth endpoint for resolving a caller's access token.
//! `AppState` carries it as `Arc<dyn ListingStore>` so the relay and handlers
//! can be exercised against an in-memory fake.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::models::listing::{JobListing, ListingStatus, NewJobListing};

const JOBS_COLLECTION: &str = "jobs";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Data service error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Data service returned no row for the insert")]
    EmptyInsert,
}

impl StoreError {
    /// True when the data service rejected the caller's credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, StoreError::Api { status: 401 | 403, .. })
    }
}

/// The signed-in user behind an access token.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Active listings, newest first.
    async fn active_listings(&self) -> Result<Vec<JobListing>, StoreError>;

    /// Every listing the caller may see under the data service's row policies,
    /// any status, newest first.
    async fn listings_visible_to(&self, access_token: &str)
        -> Result<Vec<JobListing>, StoreError>;

    /// Resolves `access_token` to the user it was issued for.
    async fn authenticated_user(&self, access_token: &str) -> Result<AuthUser, StoreError>;

    /// Inserts a listing on behalf of the caller identified by `access_token`.
    async fn insert_listing(
        &self,
        access_token: &str,
        listing: &NewJobListing,
    ) -> Result<JobListing, StoreError>;
}

#[derive(Debug, Deserialize)]
struct PostgrestError {
    #[serde(alias = "msg")]
    message: String,
}

pub struct RestListingStore {
    client: Client,
    base_url: String,
    service_key: String,
}

impl RestListingStore {
    pub fn new(base_url: &str, service_key: &str) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .build()
                .context("Failed to build data service HTTP client")?,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, JOBS_COLLECTION)
    }

    fn user_url(&self) -> String {
        format!("{}/auth/v1/user", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder, bearer: &str) -> RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .bearer_auth(bearer)
    }

    async fn fetch_listings(
        &self,
        bearer: &str,
        query: &[(&'static str, String)],
    ) -> Result<Vec<JobListing>, StoreError> {
        let response = self
            .authorized(self.client.get(self.collection_url()), bearer)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let listings: Vec<JobListing> = response.json().await?;
        debug!("Fetched {} listing(s)", listings.len());
        Ok(listings)
    }
}

/// Query string selecting every column of rows with `status = active`, newest first.
fn active_listings_query() -> [(&'static str, String); 3] {
    [
        ("select", "*".to_string()),
        ("status", format!("eq.{}", ListingStatus::Active.as_str())),
        ("order", "created_at.desc".to_string()),
    ]
}

/// Query string selecting every column of every visible row, newest first.
fn all_listings_query() -> [(&'static str, String); 2] {
    [
        ("select", "*".to_string()),
        ("order", "created_at.desc".to_string()),
    ]
}

async fn api_error(response: reqwest::Response) -> StoreError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<PostgrestError>(&body)
        .map(|e| e.message)
        .unwrap_or(body);
    StoreError::Api { status, message }
}

#[async_trait]
impl ListingStore for RestListingStore {
    async fn active_listings(&self) -> Result<Vec<JobListing>, StoreError> {
        self.fetch_listings(&self.service_key, &active_listings_query())
            .await
    }

    async fn listings_visible_to(
        &self,
        access_token: &str,
    ) -> Result<Vec<JobListing>, StoreError> {
        self.fetch_listings(access_token, &all_listings_query()).await
    }

    async fn authenticated_user(&self, access_token: &str) -> Result<AuthUser, StoreError> {
        let response = self
            .authorized(self.client.get(self.user_url()), access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }

    async fn insert_listing(
        &self,
        access_token: &str,
        listing: &NewJobListing,
    ) -> Result<JobListing, StoreError> {
        let response = self
            .authorized(self.client.post(self.collection_url()), access_token)
            .header("Prefer", "return=representation")
            .json(listing)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let mut rows: Vec<JobListing> = response.json().await?;
        if rows.is_empty() {
            return Err(StoreError::EmptyInsert);
        }
        Ok(rows.swap_remove(0))
    }
}
