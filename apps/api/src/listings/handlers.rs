//! Axum route handlers for the job listing API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;

use crate::config::DATA_SERVICE_URL_VAR;
use crate::errors::AppError;
use crate::listings::store::{AuthUser, ListingStore, StoreError};
use crate::models::listing::{JobListing, ListingStatus, NewJobListing};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// Skills arrive either as a list or as the comma-separated text of a form field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SkillsField {
    List(Vec<String>),
    Csv(String),
}

impl SkillsField {
    pub fn normalize(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            SkillsField::List(items) => items,
            SkillsField::Csv(text) => text.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Listing form fields. The employer is always the signed-in caller, never a body field.
#[derive(Debug, Deserialize)]
pub struct CreateListingRequest {
    pub title: String,
    pub company_name: String,
    pub role: String,
    pub salary: String,
    pub location: String,
    pub skills_required: Option<SkillsField>,
    pub description: Option<String>,
    #[serde(default)]
    pub status: ListingStatus,
}

impl CreateListingRequest {
    fn into_new_listing(self, employer: &AuthUser) -> Result<NewJobListing, AppError> {
        let required = [
            ("title", &self.title),
            ("company_name", &self.company_name),
            ("role", &self.role),
            ("salary", &self.salary),
            ("location", &self.location),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(AppError::Validation(format!("{field} cannot be empty")));
        }

        Ok(NewJobListing {
            employer_id: employer.id,
            title: self.title.trim().to_string(),
            company_name: self.company_name.trim().to_string(),
            role: self.role.trim().to_string(),
            salary: self.salary.trim().to_string(),
            location: self.location.trim().to_string(),
            skills_required: self
                .skills_required
                .map(SkillsField::normalize)
                .unwrap_or_default(),
            description: self.description.filter(|d| !d.is_empty()),
            status: self.status,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

fn require_store(state: &AppState) -> Result<&dyn ListingStore, AppError> {
    state
        .listings
        .as_deref()
        .ok_or(AppError::MissingConfig(DATA_SERVICE_URL_VAR))
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthorized)
}

/// A rejected token means the caller is not signed in, not that the store failed.
fn auth_error(err: StoreError) -> AppError {
    if err.is_auth_failure() {
        AppError::Unauthorized
    } else {
        AppError::Store(err)
    }
}

/// GET /api/v1/jobs
///
/// Active listings, newest first.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobListing>>, AppError> {
    let listings = require_store(&state)?.active_listings().await?;
    Ok(Json(listings))
}

/// GET /api/v1/employer/jobs
///
/// Employer dashboard feed: every listing the caller's session may read,
/// inactive ones included, newest first.
pub async fn handle_employer_jobs(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<JobListing>>, AppError> {
    let token = bearer_token(&headers)?;
    let listings = require_store(&state)?
        .listings_visible_to(token)
        .await
        .map_err(auth_error)?;
    Ok(Json(listings))
}

/// POST /api/v1/jobs
///
/// Posts a listing as the signed-in employer. The token is checked before the
/// body is decoded, and the employer id comes from the token's user.
pub async fn handle_create_job(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateListingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<JobListing>), AppError> {
    let token = bearer_token(&headers)?;
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let store = require_store(&state)?;

    let employer = store.authenticated_user(token).await.map_err(auth_error)?;
    let new_listing = request.into_new_listing(&employer)?;

    let stored = store.insert_listing(token, &new_listing).await?;

    tracing::info!(
        "Employer {} ({}) posted listing {}",
        employer.id,
        employer.email.as_deref().unwrap_or("no email"),
        stored.id
    );
    Ok((StatusCode::CREATED, Json(stored)))
}
