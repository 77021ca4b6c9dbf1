//! Shared data models for the jobdeck backend.
//!
//! Row types mirror the managed database tables (jobs, companies,
//! applications, saved_jobs) including the embedded projections returned by
//! nested selects. Form payload types carry the client-side validation
//! rules.

pub mod application;
pub mod company;
pub mod forms;
pub mod job;
pub mod role;
pub mod saved_job;

pub use application::{
    Application, ApplicationStatus, ApplicationWithJob, Education, JobBrief, NewApplication,
};
pub use company::{Company, CompanyInfo, CompanyName, NewCompany};
pub use forms::{AddCompanyForm, ApplicationForm, FileUpload, PostJobForm, RoleSelection};
pub use job::{Job, JobDetail, JobFilters, JobListing, JobWithCompany, NewJob, SavedMarker};
pub use role::Role;
pub use saved_job::{NewSavedJob, SavedJob};
