//! Job postings and the embedded projections returned by nested selects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::Application;
use crate::company::CompanyInfo;

/// A row in the `jobs` table.
///
/// `recruiter_id` is set at creation and never changes; it is the sole
/// authority for hiring-status mutation and deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    /// Markdown requirements text.
    pub requirements: String,
    pub company_id: i64,
    /// Identity-provider id of the posting recruiter.
    pub recruiter_id: String,
    /// Hiring status: accepting applications or closed.
    #[serde(rename = "isOpen")]
    pub is_open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for `jobs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub location: String,
    pub requirements: String,
    pub company_id: i64,
    pub recruiter_id: String,
    #[serde(rename = "isOpen")]
    pub is_open: bool,
}

/// Marker row from the `saved_jobs` embed on listing selects; presence means
/// the current user saved the job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedMarker {
    pub id: i64,
}

/// A job with its company embedded (`company:companies(name,logo_url)`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobWithCompany {
    #[serde(flatten)]
    pub job: Job,
    #[serde(default)]
    pub company: Option<CompanyInfo>,
}

/// A listing row: job + company + saved markers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(flatten)]
    pub job: Job,
    #[serde(default)]
    pub company: Option<CompanyInfo>,
    #[serde(default)]
    pub saved: Vec<SavedMarker>,
}

impl JobListing {
    /// Whether the requesting user has saved this job.
    pub fn is_saved(&self) -> bool {
        !self.saved.is_empty()
    }
}

/// A single job with company and all applications embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDetail {
    #[serde(flatten)]
    pub job: Job,
    #[serde(default)]
    pub company: Option<CompanyInfo>,
    #[serde(default)]
    pub applications: Vec<Application>,
}

impl JobDetail {
    /// Whether `user_id` already applied to this job.
    pub fn has_applied(&self, user_id: &str) -> bool {
        self.applications
            .iter()
            .any(|a| a.candidate_id == user_id)
    }
}

/// Listing filters; all optional and combined with AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobFilters {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub company_id: Option<i64>,
    /// Case-insensitive substring match on the title.
    #[serde(default)]
    pub search: Option<String>,
}
