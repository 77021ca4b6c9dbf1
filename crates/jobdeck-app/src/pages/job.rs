//! Job detail screen: hiring-status control for the owner, apply drawer for
//! candidates, applications list for the owner.

use std::sync::Arc;

use jobdeck_auth::{SharedSession, UserProfile};
use jobdeck_models::{Application, ApplicationForm, ApplicationStatus, Job, JobDetail};
use jobdeck_storage::StorageClient;
use jobdeck_supabase::PostgrestClient;

use crate::api;
use crate::api::applications::ApplicationInput;
use crate::error::ApiCallError;
use crate::fetch::{Fetcher, OpFuture};

/// Fixed options for the job-scoped fetchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobIdOptions {
    pub job_id: i64,
}

/// Detail controller for one job.
pub struct JobPage {
    job_id: i64,
    job: Fetcher<(), JobIdOptions, Option<JobDetail>>,
    hiring_status: Fetcher<bool, JobIdOptions, Vec<Job>>,
    apply: Fetcher<ApplicationInput, (), Application>,
    status_update: Fetcher<ApplicationStatus, JobIdOptions, Vec<Application>>,
    delete: Fetcher<(), JobIdOptions, Vec<Job>>,
}

impl JobPage {
    pub fn new(
        session: SharedSession,
        db: PostgrestClient,
        storage: StorageClient,
        job_id: i64,
    ) -> Self {
        let options = JobIdOptions { job_id };

        let job = {
            let db = db.clone();
            Fetcher::new(
                session.clone(),
                options.clone(),
                move |token, options: JobIdOptions, _args: ()| {
                    let db = db.clone();
                    Box::pin(async move {
                        api::jobs::get_single_job(&db, &token, options.job_id).await
                    }) as OpFuture<Option<JobDetail>>
                },
            )
        };

        let hiring_status = {
            let db = db.clone();
            Fetcher::new(
                session.clone(),
                options.clone(),
                move |token, options: JobIdOptions, is_open: bool| {
                    let db = db.clone();
                    Box::pin(async move {
                        api::jobs::update_hiring_status(&db, &token, options.job_id, is_open).await
                    }) as OpFuture<Vec<Job>>
                },
            )
        };

        let apply = {
            let db = db.clone();
            let storage = storage.clone();
            Fetcher::new(
                session.clone(),
                (),
                move |token, _options: (), input: ApplicationInput| {
                    let db = db.clone();
                    let storage = storage.clone();
                    Box::pin(async move {
                        api::applications::apply_to_job(&db, &storage, &token, &input).await
                    }) as OpFuture<Application>
                },
            )
        };

        let status_update = {
            let db = db.clone();
            Fetcher::new(
                session.clone(),
                options.clone(),
                move |token, options: JobIdOptions, status: ApplicationStatus| {
                    let db = db.clone();
                    Box::pin(async move {
                        api::applications::update_application_status(
                            &db,
                            &token,
                            options.job_id,
                            status,
                        )
                        .await
                    }) as OpFuture<Vec<Application>>
                },
            )
        };

        let delete = {
            let db = db.clone();
            Fetcher::new(
                session,
                options,
                move |token, options: JobIdOptions, _args: ()| {
                    let db = db.clone();
                    Box::pin(async move {
                        api::jobs::delete_job(&db, &token, options.job_id).await
                    }) as OpFuture<Vec<Job>>
                },
            )
        };

        Self {
            job_id,
            job,
            hiring_status,
            apply,
            status_update,
            delete,
        }
    }

    pub fn job_id(&self) -> i64 {
        self.job_id
    }

    /// Fetch the job with company and applications embedded.
    pub async fn load(&self) -> Result<Option<JobDetail>, Arc<ApiCallError>> {
        self.job.invoke(()).await
    }

    /// Current job data, loading it if this controller has not yet.
    async fn current(&self) -> Result<JobDetail, Arc<ApiCallError>> {
        let detail = match self.job.data() {
            Some(detail) => detail,
            None => self.load().await?,
        };
        detail.ok_or_else(|| Arc::new(ApiCallError::NotFound("Job not found")))
    }

    /// Open or close hiring. Only the posting recruiter may do this; the
    /// job is refetched afterwards so the screen shows the new state.
    pub async fn set_hiring_status(
        &self,
        user: &UserProfile,
        is_open: bool,
    ) -> Result<Option<JobDetail>, Arc<ApiCallError>> {
        let detail = self.current().await?;
        if detail.job.recruiter_id != user.id {
            return Err(Arc::new(ApiCallError::Forbidden(
                "Only the posting recruiter can change hiring status",
            )));
        }

        self.hiring_status.invoke(is_open).await?;
        self.load().await
    }

    /// Apply to this job as the signed-in candidate.
    pub async fn apply(
        &self,
        user: &UserProfile,
        form: ApplicationForm,
    ) -> Result<Application, Arc<ApiCallError>> {
        let detail = self.current().await?;
        if detail.job.recruiter_id == user.id {
            return Err(Arc::new(ApiCallError::Forbidden(
                "Recruiters cannot apply to their own job",
            )));
        }
        if !detail.job.is_open {
            return Err(Arc::new(ApiCallError::Forbidden("Hiring Closed")));
        }
        if detail.has_applied(&user.id) {
            return Err(Arc::new(ApiCallError::Forbidden("Already applied")));
        }
        form.validate_form()
            .map_err(|m| Arc::new(ApiCallError::Validation(m)))?;

        let application = self
            .apply
            .invoke(ApplicationInput {
                job_id: self.job_id,
                candidate_id: user.id.clone(),
                name: user.full_name.clone(),
                form,
            })
            .await?;

        // Refresh so the applications list includes the new row.
        self.load().await?;
        Ok(application)
    }

    /// Set the status of this job's applications (owner only).
    pub async fn update_application_status(
        &self,
        user: &UserProfile,
        status: ApplicationStatus,
    ) -> Result<Vec<Application>, Arc<ApiCallError>> {
        let detail = self.current().await?;
        if detail.job.recruiter_id != user.id {
            return Err(Arc::new(ApiCallError::Forbidden(
                "Only the posting recruiter can update application status",
            )));
        }
        self.status_update.invoke(status).await
    }

    /// Delete this job (owner only).
    pub async fn delete(&self, user: &UserProfile) -> Result<Vec<Job>, Arc<ApiCallError>> {
        let detail = self.current().await?;
        if detail.job.recruiter_id != user.id {
            return Err(Arc::new(ApiCallError::Forbidden(
                "Only the posting recruiter can delete this job",
            )));
        }
        self.delete.invoke(()).await
    }

    pub fn job(&self) -> &Fetcher<(), JobIdOptions, Option<JobDetail>> {
        &self.job
    }
}
