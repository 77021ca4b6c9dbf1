//! Wrappers over the `jobs` and `saved_jobs` tables.

use jobdeck_auth::AccessToken;
use jobdeck_models::{
    Job, JobDetail, JobFilters, JobListing, JobWithCompany, NewJob, NewSavedJob, SavedJob,
};
use jobdeck_supabase::{Filter, PostgrestClient};

use crate::error::{ApiCallError, ApiCallResult};

const JOBS: &str = "jobs";
const SAVED_JOBS: &str = "saved_jobs";

const LISTING_COLUMNS: &str = "*,saved:saved_jobs(id),company:companies(name,logo_url)";
const DETAIL_COLUMNS: &str = "*,company:companies(name,logo_url),applications:applications(*)";
const MY_JOBS_COLUMNS: &str = "*,company:companies(name,logo_url)";
const SAVED_COLUMNS: &str = "*,job:jobs(*,company:companies(name,logo_url))";

/// Listing query with optional location/company/title filters.
pub async fn get_jobs(
    db: &PostgrestClient,
    token: &AccessToken,
    filters: &JobFilters,
) -> ApiCallResult<Vec<JobListing>> {
    let mut query = Vec::new();
    if let Some(location) = &filters.location {
        query.push(Filter::eq("location", location));
    }
    if let Some(company_id) = filters.company_id {
        query.push(Filter::eq("company_id", company_id));
    }
    if let Some(search) = &filters.search {
        query.push(Filter::ilike_contains("title", search));
    }

    Ok(db.select(token, JOBS, LISTING_COLUMNS, &query).await?)
}

/// One job with company and applications embedded; `Ok(None)` when absent.
pub async fn get_single_job(
    db: &PostgrestClient,
    token: &AccessToken,
    job_id: i64,
) -> ApiCallResult<Option<JobDetail>> {
    Ok(db
        .select_single(token, JOBS, DETAIL_COLUMNS, &[Filter::eq("id", job_id)])
        .await?)
}

/// Insert a new job posting.
pub async fn add_new_job(
    db: &PostgrestClient,
    token: &AccessToken,
    job: &NewJob,
) -> ApiCallResult<Job> {
    let rows: Vec<Job> = db
        .insert(token, JOBS, &[job])
        .await
        .map_err(|e| ApiCallError::mutation("Error Creating Job", e))?;
    rows.into_iter()
        .next()
        .ok_or(ApiCallError::mutation_empty("Error Creating Job"))
}

/// Flip a job's hiring status.
pub async fn update_hiring_status(
    db: &PostgrestClient,
    token: &AccessToken,
    job_id: i64,
    is_open: bool,
) -> ApiCallResult<Vec<Job>> {
    Ok(db
        .update(
            token,
            JOBS,
            &serde_json::json!({ "isOpen": is_open }),
            &[Filter::eq("id", job_id)],
        )
        .await?)
}

/// Delete a job posting.
pub async fn delete_job(
    db: &PostgrestClient,
    token: &AccessToken,
    job_id: i64,
) -> ApiCallResult<Vec<Job>> {
    Ok(db.delete(token, JOBS, &[Filter::eq("id", job_id)]).await?)
}

/// Jobs created by a recruiter.
pub async fn get_my_jobs(
    db: &PostgrestClient,
    token: &AccessToken,
    recruiter_id: &str,
) -> ApiCallResult<Vec<JobWithCompany>> {
    Ok(db
        .select(
            token,
            JOBS,
            MY_JOBS_COLUMNS,
            &[Filter::eq("recruiter_id", recruiter_id)],
        )
        .await?)
}

/// Whether the user already saved this job (one select).
pub async fn is_job_saved(
    db: &PostgrestClient,
    token: &AccessToken,
    user_id: &str,
    job_id: i64,
) -> ApiCallResult<bool> {
    let rows: Vec<serde_json::Value> = db
        .select(
            token,
            SAVED_JOBS,
            "id",
            &[Filter::eq("user_id", user_id), Filter::eq("job_id", job_id)],
        )
        .await?;
    Ok(!rows.is_empty())
}

/// Toggle a saved-job association: delete it when `already_saved`, insert it
/// otherwise. Returns the affected rows.
pub async fn save_job(
    db: &PostgrestClient,
    token: &AccessToken,
    already_saved: bool,
    input: &NewSavedJob,
) -> ApiCallResult<Vec<SavedJob>> {
    if already_saved {
        Ok(db
            .delete(
                token,
                SAVED_JOBS,
                &[
                    Filter::eq("user_id", &input.user_id),
                    Filter::eq("job_id", input.job_id),
                ],
            )
            .await?)
    } else {
        Ok(db.insert(token, SAVED_JOBS, &[input]).await?)
    }
}

/// A candidate's saved jobs with the job and its company embedded.
pub async fn get_saved_jobs(
    db: &PostgrestClient,
    token: &AccessToken,
    user_id: &str,
) -> ApiCallResult<Vec<SavedJob>> {
    Ok(db
        .select(
            token,
            SAVED_JOBS,
            SAVED_COLUMNS,
            &[Filter::eq("user_id", user_id)],
        )
        .await?)
}
