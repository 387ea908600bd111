use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    #[default]
    Active,
    Inactive,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Active => "active",
            ListingStatus::Inactive => "inactive",
        }
    }
}

/// A row of the `jobs` collection as returned by the data service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListing {
    pub id: Uuid,
    #[serde(default)]
    pub employer_id: Option<Uuid>,
    pub title: String,
    pub company_name: String,
    pub role: String,
    pub salary: String,
    pub location: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub skills_required: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
}

impl JobListing {
    /// Description text as stored, treating an empty string the same as a missing one.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

/// Insert payload for the `jobs` collection.
#[derive(Debug, Clone, Serialize)]
pub struct NewJobListing {
    pub employer_id: Uuid,
    pub title: String,
    pub company_name: String,
    pub role: String,
    pub salary: String,
    pub location: String,
    pub skills_required: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ListingStatus,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
