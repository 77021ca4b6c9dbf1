//! Form payloads and their client-side validation rules.
//!
//! Field rules use `validator` derives; file checks (MIME types) are plain
//! methods since they inspect the upload, not a string.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::application::Education;
use crate::role::Role;

/// An uploaded file as received from the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Resume uploads must be PDF or MS Word documents.
    pub fn is_resume_document(&self) -> bool {
        matches!(
            self.content_type.as_str(),
            "application/pdf" | "application/msword"
        )
    }

    /// Logo uploads must be PNG or JPEG images.
    pub fn is_logo_image(&self) -> bool {
        matches!(self.content_type.as_str(), "image/png" | "image/jpeg")
    }
}

/// Post-a-job form (recruiter).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PostJobForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Select a location"))]
    pub location: String,
    #[validate(range(min = 1, message = "Select or Add a new Company"))]
    pub company_id: i64,
    #[validate(length(min = 1, message = "Requirements are required"))]
    pub requirements: String,
}

impl PostJobForm {
    pub fn validate_form(&self) -> Result<(), String> {
        self.validate().map_err(first_message)
    }
}

/// Apply-to-job form (candidate). `experience` is a non-negative integer by
/// construction (`u32`).
#[derive(Debug, Clone, Validate)]
pub struct ApplicationForm {
    pub experience: u32,
    #[validate(length(min = 1, message = "Skills are required"))]
    pub skills: String,
    pub education: Education,
    pub resume: FileUpload,
}

impl ApplicationForm {
    pub fn validate_form(&self) -> Result<(), String> {
        self.validate().map_err(first_message)?;
        if !self.resume.is_resume_document() {
            return Err("Only PDF or Word documents are allowed".to_string());
        }
        Ok(())
    }
}

/// Add-company form (recruiter, from the post-job screen).
#[derive(Debug, Clone, Validate)]
pub struct AddCompanyForm {
    #[validate(length(min = 1, message = "Company name is required"))]
    pub name: String,
    pub logo: FileUpload,
}

impl AddCompanyForm {
    pub fn validate_form(&self) -> Result<(), String> {
        self.validate().map_err(first_message)?;
        if !self.logo.is_logo_image() {
            return Err("Only PNG or JPEG images are allowed".to_string());
        }
        Ok(())
    }
}

/// Onboarding role selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSelection {
    pub role: Role,
}

/// First human-readable message out of a validation failure.
fn first_message(errors: ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Invalid input".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf() -> FileUpload {
        FileUpload::new("resume.pdf", "application/pdf", vec![1, 2, 3])
    }

    #[test]
    fn post_job_form_requires_every_field() {
        let form = PostJobForm {
            title: String::new(),
            description: "d".into(),
            location: "Delhi".into(),
            company_id: 7,
            requirements: "Go".into(),
        };
        assert_eq!(form.validate_form().unwrap_err(), "Title is required");

        let form = PostJobForm {
            title: "Engineer".into(),
            company_id: 0,
            ..form
        };
        assert_eq!(
            form.validate_form().unwrap_err(),
            "Select or Add a new Company"
        );
    }

    #[test]
    fn application_form_checks_resume_mime() {
        let mut form = ApplicationForm {
            experience: 0,
            skills: "Go, SQL".into(),
            education: Education::Graduate,
            resume: pdf(),
        };
        assert!(form.validate_form().is_ok());

        form.resume = FileUpload::new("resume.png", "image/png", vec![]);
        assert_eq!(
            form.validate_form().unwrap_err(),
            "Only PDF or Word documents are allowed"
        );

        form.resume = FileUpload::new("resume.doc", "application/msword", vec![]);
        assert!(form.validate_form().is_ok());
    }

    #[test]
    fn company_form_checks_logo_mime() {
        let form = AddCompanyForm {
            name: "Acme".into(),
            logo: FileUpload::new("logo.png", "image/png", vec![]),
        };
        assert!(form.validate_form().is_ok());

        let form = AddCompanyForm {
            name: "Acme".into(),
            logo: FileUpload::new("logo.pdf", "application/pdf", vec![]),
        };
        assert_eq!(
            form.validate_form().unwrap_err(),
            "Only PNG or JPEG images are allowed"
        );
    }
}
