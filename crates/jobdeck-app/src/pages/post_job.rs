//! Post-a-job screen (recruiter only).

use std::sync::Arc;

use jobdeck_auth::{SharedSession, UserProfile};
use jobdeck_models::{AddCompanyForm, Company, Job, NewJob, PostJobForm, Role};
use jobdeck_storage::StorageClient;
use jobdeck_supabase::PostgrestClient;

use crate::api;
use crate::error::ApiCallError;
use crate::fetch::{Fetcher, OpFuture};
use crate::routes::Route;

/// Result of a submit attempt.
#[derive(Debug, Clone)]
pub enum PostJobOutcome {
    /// Job created; go back to the listing.
    Created { job: Job, redirect: Route },
    /// Non-recruiters never see this form; they are pushed to the listing.
    RedirectedAway(Route),
}

/// Post-job controller, including the add-company drawer.
pub struct PostJobPage {
    create: Fetcher<NewJob, (), Job>,
    companies: Fetcher<(), (), Vec<Company>>,
    add_company: Fetcher<AddCompanyForm, (), Company>,
}

impl PostJobPage {
    pub fn new(session: SharedSession, db: PostgrestClient, storage: StorageClient) -> Self {
        let create = {
            let db = db.clone();
            Fetcher::new(session.clone(), (), move |token, _options: (), job: NewJob| {
                let db = db.clone();
                Box::pin(async move { api::jobs::add_new_job(&db, &token, &job).await })
                    as OpFuture<Job>
            })
        };

        let companies = {
            let db = db.clone();
            Fetcher::new(session.clone(), (), move |token, _options: (), _args: ()| {
                let db = db.clone();
                Box::pin(async move { api::companies::get_companies(&db, &token).await })
                    as OpFuture<Vec<Company>>
            })
        };

        let add_company = {
            let db = db.clone();
            Fetcher::new(
                session,
                (),
                move |token, _options: (), form: AddCompanyForm| {
                    let db = db.clone();
                    let storage = storage.clone();
                    Box::pin(async move {
                        api::companies::add_new_company(&db, &storage, &token, &form).await
                    }) as OpFuture<Company>
                },
            )
        };

        Self {
            create,
            companies,
            add_company,
        }
    }

    /// Companies for the dropdown.
    pub async fn load_companies(&self) -> Result<Vec<Company>, Arc<ApiCallError>> {
        self.companies.invoke(()).await
    }

    /// Validate and submit the form. The posting user becomes the job's
    /// immutable recruiter reference and new jobs always start open.
    pub async fn submit(
        &self,
        user: &UserProfile,
        form: PostJobForm,
    ) -> Result<PostJobOutcome, Arc<ApiCallError>> {
        if user.role != Role::Recruiter {
            return Ok(PostJobOutcome::RedirectedAway(Route::Jobs));
        }
        form.validate_form()
            .map_err(|m| Arc::new(ApiCallError::Validation(m)))?;

        let job = self
            .create
            .invoke(NewJob {
                title: form.title,
                description: form.description,
                location: form.location,
                requirements: form.requirements,
                company_id: form.company_id,
                recruiter_id: user.id.clone(),
                is_open: true,
            })
            .await?;

        Ok(PostJobOutcome::Created {
            job,
            redirect: Route::Jobs,
        })
    }

    /// Add a company from the drawer (recruiter only).
    pub async fn add_company(
        &self,
        user: &UserProfile,
        form: AddCompanyForm,
    ) -> Result<Company, Arc<ApiCallError>> {
        if user.role != Role::Recruiter {
            return Err(Arc::new(ApiCallError::Forbidden(
                "Only recruiters can add companies",
            )));
        }
        form.validate_form()
            .map_err(|m| Arc::new(ApiCallError::Validation(m)))?;

        self.add_company.invoke(form).await
    }

    pub fn create(&self) -> &Fetcher<NewJob, (), Job> {
        &self.create
    }
}
