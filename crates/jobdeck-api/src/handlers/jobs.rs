//! Job handlers: listing, detail, posting, hiring status, deletion,
//! applications.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Deserialize;

use jobdeck_app::pages::{JobListingPage, JobPage, PostJobOutcome, PostJobPage};
use jobdeck_models::{
    Application, ApplicationForm, ApplicationStatus, Education, Job, JobDetail, JobFilters,
    JobListing, PostJobForm,
};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::handlers::read_file_field;
use crate::state::AppState;

/// `GET /jobs` — listing with optional filters.
pub async fn list_jobs(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filters): Query<JobFilters>,
) -> ApiResult<Json<Vec<JobListing>>> {
    let page = JobListingPage::new(auth.shared_session(), state.db.clone());
    let jobs = page.load(filters).await?;
    Ok(Json(jobs))
}

/// `GET /job/:id` — one job with company and applications.
pub async fn get_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<JobDetail>> {
    let page = JobPage::new(auth.shared_session(), state.db.clone(), state.storage.clone(), id);
    let detail = page
        .load()
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Job {} not found", id)))?;
    Ok(Json(detail))
}

/// `POST /post-job` — create a job; non-recruiters are redirected to the
/// listing instead.
pub async fn post_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(form): Json<PostJobForm>,
) -> ApiResult<Response> {
    let page = PostJobPage::new(auth.shared_session(), state.db.clone(), state.storage.clone());

    match page.submit(&auth.profile(), form).await? {
        PostJobOutcome::Created { job, redirect } => Ok((
            StatusCode::CREATED,
            Json(serde_json::json!({
                "job": job,
                "redirect_to": redirect.path(),
            })),
        )
            .into_response()),
        PostJobOutcome::RedirectedAway(route) => Ok(Redirect::to(&route.path()).into_response()),
    }
}

#[derive(Debug, Deserialize)]
pub struct HiringStatusBody {
    #[serde(rename = "isOpen")]
    pub is_open: bool,
}

/// `PATCH /job/:id/hiring-status` — owner flips open/closed; answers the
/// refreshed job.
pub async fn update_hiring_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(body): Json<HiringStatusBody>,
) -> ApiResult<Json<JobDetail>> {
    let page = JobPage::new(auth.shared_session(), state.db.clone(), state.storage.clone(), id);
    let detail = page
        .set_hiring_status(&auth.profile(), body.is_open)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Job {} not found", id)))?;
    Ok(Json(detail))
}

/// `DELETE /job/:id` — owner deletes a posting.
pub async fn delete_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<Job>>> {
    let page = JobPage::new(auth.shared_session(), state.db.clone(), state.storage.clone(), id);
    let deleted = page.delete(&auth.profile()).await?;
    Ok(Json(deleted))
}

/// `POST /job/:id/apply` — candidate applies with a resume upload.
pub async fn apply_to_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> ApiResult<Response> {
    let mut experience: Option<u32> = None;
    let mut skills: Option<String> = None;
    let mut education: Option<String> = None;
    let mut resume = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "experience" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.to_string()))?;
                experience = Some(text.parse().map_err(|_| {
                    ApiError::bad_request("Experience must be a non-negative integer")
                })?);
            }
            "skills" => {
                skills = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(e.to_string()))?,
                )
            }
            "education" => {
                education = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(e.to_string()))?,
                )
            }
            "resume" => resume = Some(read_file_field(field).await?),
            _ => {}
        }
    }

    let education: Education = education
        .and_then(|e| serde_json::from_value(serde_json::Value::String(e)).ok())
        .ok_or_else(|| ApiError::bad_request("Education is required"))?;

    let form = ApplicationForm {
        experience: experience
            .ok_or_else(|| ApiError::bad_request("Experience must be a non-negative integer"))?,
        skills: skills.unwrap_or_default(),
        education,
        resume: resume.ok_or_else(|| ApiError::bad_request("Resume file is required"))?,
    };

    let page = JobPage::new(auth.shared_session(), state.db.clone(), state.storage.clone(), id);
    let application = page.apply(&auth.profile(), form).await?;
    Ok((StatusCode::CREATED, Json(application)).into_response())
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: ApplicationStatus,
}

/// `PATCH /job/:id/applications/status` — owner sets the status of the
/// job's applications, keyed by job.
pub async fn update_application_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(body): Json<StatusBody>,
) -> ApiResult<Json<Vec<Application>>> {
    let page = JobPage::new(auth.shared_session(), state.db.clone(), state.storage.clone(), id);
    let updated = page
        .update_application_status(&auth.profile(), body.status)
        .await?;
    Ok(Json(updated))
}
