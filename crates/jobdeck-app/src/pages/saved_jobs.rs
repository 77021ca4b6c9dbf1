//! Saved-jobs screen (candidate's favorites).

use std::sync::Arc;

use jobdeck_auth::{SharedSession, UserProfile};
use jobdeck_models::SavedJob;
use jobdeck_supabase::PostgrestClient;

use crate::api;
use crate::error::ApiCallError;
use crate::fetch::{Fetcher, OpFuture};

/// Saved-jobs controller.
pub struct SavedJobsPage {
    saved: Fetcher<String, (), Vec<SavedJob>>,
}

impl SavedJobsPage {
    pub fn new(session: SharedSession, db: PostgrestClient) -> Self {
        let saved = Fetcher::new(session, (), move |token, _options: (), user_id: String| {
            let db = db.clone();
            Box::pin(async move { api::jobs::get_saved_jobs(&db, &token, &user_id).await })
                as OpFuture<Vec<SavedJob>>
        });

        Self { saved }
    }

    /// Fetch the signed-in user's saved jobs, jobs and companies embedded.
    pub async fn load(&self, user: &UserProfile) -> Result<Vec<SavedJob>, Arc<ApiCallError>> {
        self.saved.invoke(user.id.clone()).await
    }

    pub fn saved(&self) -> &Fetcher<String, (), Vec<SavedJob>> {
        &self.saved
    }
}
