//! Headless page controllers.
//!
//! One controller per screen, composing the session handle, fetch
//! controllers, and API wrappers: fetch-on-load for read screens,
//! validate-submit-redirect for write screens. Controllers branch on the
//! role and validate input; they carry no other business logic.

pub mod job;
pub mod job_listing;
pub mod landing;
pub mod my_jobs;
pub mod onboarding;
pub mod post_job;
pub mod saved_jobs;

pub use job::JobPage;
pub use job_listing::JobListingPage;
pub use landing::{landing_view, LandingView};
pub use my_jobs::{MyJobsPage, MyJobsView};
pub use onboarding::OnboardingPage;
pub use post_job::{PostJobOutcome, PostJobPage};
pub use saved_jobs::SavedJobsPage;
