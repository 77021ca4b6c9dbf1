//! Job listing screen: filterable job list with save/unsave from the cards.

use std::sync::Arc;

use jobdeck_auth::{SharedSession, UserProfile};
use jobdeck_models::{Company, JobFilters, JobListing, NewSavedJob};
use jobdeck_supabase::PostgrestClient;

use crate::api;
use crate::error::ApiCallError;
use crate::fetch::{Fetcher, OpFuture};

/// Listing controller. Companies back the filter dropdown.
pub struct JobListingPage {
    jobs: Fetcher<JobFilters, (), Vec<JobListing>>,
    companies: Fetcher<(), (), Vec<Company>>,
    save: Fetcher<NewSavedJob, (), bool>,
}

impl JobListingPage {
    pub fn new(session: SharedSession, db: PostgrestClient) -> Self {
        let jobs = {
            let db = db.clone();
            Fetcher::new(
                session.clone(),
                (),
                move |token, _options: (), filters: JobFilters| {
                    let db = db.clone();
                    Box::pin(async move { api::jobs::get_jobs(&db, &token, &filters).await })
                        as OpFuture<Vec<JobListing>>
                },
            )
        };

        let companies = {
            let db = db.clone();
            Fetcher::new(session.clone(), (), move |token, _options: (), _args: ()| {
                let db = db.clone();
                Box::pin(async move { api::companies::get_companies(&db, &token).await })
                    as OpFuture<Vec<Company>>
            })
        };

        // Save toggle: one select to learn the current state, then the
        // toggle mutation. Resolves to the new saved state.
        let save = {
            let db = db.clone();
            Fetcher::new(session, (), move |token, _options: (), input: NewSavedJob| {
                let db = db.clone();
                Box::pin(async move {
                    let already_saved =
                        api::jobs::is_job_saved(&db, &token, &input.user_id, input.job_id).await?;
                    api::jobs::save_job(&db, &token, already_saved, &input).await?;
                    Ok(!already_saved)
                }) as OpFuture<bool>
            })
        };

        Self {
            jobs,
            companies,
            save,
        }
    }

    /// Fetch the listing with the given filters.
    pub async fn load(
        &self,
        filters: JobFilters,
    ) -> Result<Vec<JobListing>, Arc<ApiCallError>> {
        self.jobs.invoke(filters).await
    }

    /// Fetch companies for the filter dropdown.
    pub async fn load_companies(&self) -> Result<Vec<Company>, Arc<ApiCallError>> {
        self.companies.invoke(()).await
    }

    /// Toggle the heart on a card; returns the new saved state.
    pub async fn toggle_save(
        &self,
        user: &UserProfile,
        job_id: i64,
    ) -> Result<bool, Arc<ApiCallError>> {
        self.save
            .invoke(NewSavedJob {
                user_id: user.id.clone(),
                job_id,
            })
            .await
    }

    pub fn jobs(&self) -> &Fetcher<JobFilters, (), Vec<JobListing>> {
        &self.jobs
    }

    pub fn companies(&self) -> &Fetcher<(), (), Vec<Company>> {
        &self.companies
    }
}
