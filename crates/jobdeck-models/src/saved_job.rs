//! Saved-job associations (a candidate's favorites list).

use serde::{Deserialize, Serialize};

use crate::job::JobWithCompany;

/// A row in the `saved_jobs` table, optionally embedding the job and its
/// company (`job:jobs(*, company:companies(name,logo_url))`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedJob {
    pub id: i64,
    pub user_id: String,
    pub job_id: i64,
    #[serde(default)]
    pub job: Option<JobWithCompany>,
}

/// Insert payload for `saved_jobs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSavedJob {
    pub user_id: String,
    pub job_id: i64,
}
