//! My-jobs screen: what it shows depends on the role — candidates see their
//! applications, recruiters see the jobs they created.

use std::sync::Arc;

use serde::Serialize;

use jobdeck_auth::{SharedSession, UserProfile};
use jobdeck_models::{ApplicationWithJob, JobWithCompany, Role};
use jobdeck_supabase::PostgrestClient;

use crate::api;
use crate::error::ApiCallError;
use crate::fetch::{Fetcher, OpFuture};

/// Role-dependent screen content.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum MyJobsView {
    CreatedJobs(Vec<JobWithCompany>),
    MyApplications(Vec<ApplicationWithJob>),
}

/// My-jobs controller.
pub struct MyJobsPage {
    created_jobs: Fetcher<String, (), Vec<JobWithCompany>>,
    my_applications: Fetcher<String, (), Vec<ApplicationWithJob>>,
}

impl MyJobsPage {
    pub fn new(session: SharedSession, db: PostgrestClient) -> Self {
        let created_jobs = {
            let db = db.clone();
            Fetcher::new(
                session.clone(),
                (),
                move |token, _options: (), recruiter_id: String| {
                    let db = db.clone();
                    Box::pin(async move {
                        api::jobs::get_my_jobs(&db, &token, &recruiter_id).await
                    }) as OpFuture<Vec<JobWithCompany>>
                },
            )
        };

        let my_applications = {
            let db = db.clone();
            Fetcher::new(session, (), move |token, _options: (), user_id: String| {
                let db = db.clone();
                Box::pin(async move {
                    api::applications::get_applications(&db, &token, &user_id).await
                }) as OpFuture<Vec<ApplicationWithJob>>
            })
        };

        Self {
            created_jobs,
            my_applications,
        }
    }

    /// Load the role-appropriate view. A user without a role never reaches
    /// this screen; the gate already bounced them to onboarding.
    pub async fn load(&self, user: &UserProfile) -> Result<MyJobsView, Arc<ApiCallError>> {
        match user.role {
            Role::Recruiter => {
                let jobs = self.created_jobs.invoke(user.id.clone()).await?;
                Ok(MyJobsView::CreatedJobs(jobs))
            }
            Role::Candidate => {
                let applications = self.my_applications.invoke(user.id.clone()).await?;
                Ok(MyJobsView::MyApplications(applications))
            }
            Role::Unset => Err(Arc::new(ApiCallError::Forbidden(
                "Pick a role on the onboarding screen first",
            ))),
        }
    }
}
