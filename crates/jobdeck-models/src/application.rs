//! Job applications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::company::CompanyName;

/// Application status, settable by the recruiter who owns the parent job.
///
/// Transitions are unordered: any value may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Interviewing,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Interviewing => "interviewing",
            ApplicationStatus::Hired => "hired",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Highest completed education, from the application form's fixed choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Education {
    Intermediate,
    Graduate,
    #[serde(rename = "Post Graduate")]
    PostGraduate,
}

impl Education {
    pub fn as_str(&self) -> &'static str {
        match self {
            Education::Intermediate => "Intermediate",
            Education::Graduate => "Graduate",
            Education::PostGraduate => "Post Graduate",
        }
    }
}

/// A row in the `applications` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub job_id: i64,
    /// Identity-provider id of the applying candidate.
    pub candidate_id: String,
    /// Candidate display name, denormalized at apply time.
    #[serde(default)]
    pub name: Option<String>,
    pub status: ApplicationStatus,
    /// Years of experience.
    pub experience: u32,
    /// Comma-separated skills.
    pub skills: String,
    pub education: Education,
    /// Public URL of the uploaded resume document.
    pub resume: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for `applications`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewApplication {
    pub job_id: i64,
    pub candidate_id: String,
    pub name: Option<String>,
    pub status: ApplicationStatus,
    pub experience: u32,
    pub skills: String,
    pub education: Education,
    /// Public URL of the resume uploaded just before the insert.
    pub resume: String,
}

/// Job projection embedded on a candidate's application rows
/// (`job:jobs(title, company:companies(name))`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobBrief {
    pub title: String,
    #[serde(default)]
    pub company: Option<CompanyName>,
}

/// An application with its parent job embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationWithJob {
    #[serde(flatten)]
    pub application: Application,
    #[serde(default)]
    pub job: Option<JobBrief>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_names_are_lowercase() {
        assert_eq!(
            serde_json::to_value(ApplicationStatus::Interviewing).unwrap(),
            serde_json::json!("interviewing")
        );
        let parsed: ApplicationStatus = serde_json::from_value(serde_json::json!("hired")).unwrap();
        assert_eq!(parsed, ApplicationStatus::Hired);
    }

    #[test]
    fn education_post_graduate_keeps_space_on_the_wire() {
        assert_eq!(
            serde_json::to_value(Education::PostGraduate).unwrap(),
            serde_json::json!("Post Graduate")
        );
        let parsed: Education =
            serde_json::from_value(serde_json::json!("Post Graduate")).unwrap();
        assert_eq!(parsed, Education::PostGraduate);
    }

    #[test]
    fn application_with_nested_job_and_company() {
        let json = serde_json::json!({
            "id": 5,
            "job_id": 2,
            "candidate_id": "user_3",
            "name": "Asha",
            "status": "applied",
            "experience": 4,
            "skills": "Go, SQL",
            "education": "Graduate",
            "resume": "https://x/storage/v1/object/public/resumes/resume-1-user_3",
            "job": { "title": "Engineer", "company": { "name": "Acme" } }
        });
        let row: ApplicationWithJob = serde_json::from_value(json).unwrap();
        assert_eq!(row.job.unwrap().company.unwrap().name, "Acme");
        assert_eq!(row.application.status, ApplicationStatus::Applied);
    }
}
