//! Wrappers over the `applications` table.

use jobdeck_auth::AccessToken;
use jobdeck_models::{
    Application, ApplicationForm, ApplicationStatus, ApplicationWithJob, NewApplication,
};
use jobdeck_storage::{object_key, Bucket, StorageClient};
use jobdeck_supabase::{Filter, PostgrestClient};

use crate::error::{ApiCallError, ApiCallResult};

const APPLICATIONS: &str = "applications";

const WITH_JOB_COLUMNS: &str = "*,job:jobs(title,company:companies(name))";

/// Everything `apply_to_job` needs beyond the validated form.
#[derive(Debug, Clone)]
pub struct ApplicationInput {
    pub job_id: i64,
    pub candidate_id: String,
    /// Candidate display name, denormalized into the row.
    pub name: Option<String>,
    pub form: ApplicationForm,
}

/// Upload the resume, then insert the application pointing at its public
/// URL. An upload that succeeds before a failed insert stays in storage —
/// there is no cleanup.
pub async fn apply_to_job(
    db: &PostgrestClient,
    storage: &StorageClient,
    token: &AccessToken,
    input: &ApplicationInput,
) -> ApiCallResult<Application> {
    let key = object_key("resume", &input.candidate_id);

    storage
        .upload(
            token,
            Bucket::Resumes,
            &key,
            input.form.resume.bytes.clone(),
            &input.form.resume.content_type,
        )
        .await
        .map_err(|e| ApiCallError::upload("Error uploading Resume", e))?;

    let resume = storage.public_url(Bucket::Resumes, &key);

    let rows: Vec<Application> = db
        .insert(
            token,
            APPLICATIONS,
            &[NewApplication {
                job_id: input.job_id,
                candidate_id: input.candidate_id.clone(),
                name: input.name.clone(),
                status: ApplicationStatus::Applied,
                experience: input.form.experience,
                skills: input.form.skills.clone(),
                education: input.form.education,
                resume,
            }],
        )
        .await
        .map_err(|e| ApiCallError::mutation("Error submitting Application", e))?;

    rows.into_iter()
        .next()
        .ok_or(ApiCallError::mutation_empty("Error submitting Application"))
}

/// Set the status of a job's applications. The update is keyed by
/// `job_id`: one call touches every application for the job.
pub async fn update_application_status(
    db: &PostgrestClient,
    token: &AccessToken,
    job_id: i64,
    status: ApplicationStatus,
) -> ApiCallResult<Vec<Application>> {
    Ok(db
        .update(
            token,
            APPLICATIONS,
            &serde_json::json!({ "status": status }),
            &[Filter::eq("job_id", job_id)],
        )
        .await?)
}

/// A candidate's applications with job title and company name embedded.
pub async fn get_applications(
    db: &PostgrestClient,
    token: &AccessToken,
    user_id: &str,
) -> ApiCallResult<Vec<ApplicationWithJob>> {
    Ok(db
        .select(
            token,
            APPLICATIONS,
            WITH_JOB_COLUMNS,
            &[Filter::eq("candidate_id", user_id)],
        )
        .await?)
}
