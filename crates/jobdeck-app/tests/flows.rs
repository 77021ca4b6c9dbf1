//! End-to-end page flows against a stubbed backend.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jobdeck_app::pages::{JobListingPage, JobPage, PostJobOutcome, PostJobPage};
use jobdeck_app::{ApiCallError, Route};
use jobdeck_auth::{AccessToken, BearerProvider, Session, SharedSession, UserProfile};
use jobdeck_models::{
    ApplicationForm, Education, FileUpload, JobFilters, PostJobForm, Role,
};
use jobdeck_storage::{StorageClient, StorageConfig};
use jobdeck_supabase::{PostgrestClient, SupabaseConfig};

fn session_for(id: &str, name: Option<&str>, role: Role) -> (SharedSession, UserProfile) {
    let user = UserProfile {
        id: id.to_string(),
        full_name: name.map(|n| n.to_string()),
        role,
    };
    let provider = Arc::new(BearerProvider::new(AccessToken::new("user-jwt")));
    let session = SharedSession::signed_in(Session::new("sess_1", user.clone(), provider));
    (session, user)
}

fn db(server: &MockServer) -> PostgrestClient {
    PostgrestClient::new(SupabaseConfig {
        url: server.uri(),
        anon_key: "anon-key".to_string(),
    })
    .unwrap()
}

fn storage(server: &MockServer) -> StorageClient {
    StorageClient::new(StorageConfig {
        url: server.uri(),
        anon_key: "anon-key".to_string(),
    })
    .unwrap()
}

fn engineer_row() -> serde_json::Value {
    json!({
        "id": 42,
        "title": "Engineer",
        "description": "Build the hiring pipeline.",
        "location": "Delhi",
        "requirements": "Go, SQL",
        "company_id": 7,
        "recruiter_id": "rec_1",
        "isOpen": true
    })
}

// A recruiter posts a job; the listing subsequently includes it, open and
// attributed to the posting user.
#[tokio::test]
async fn posted_job_shows_up_in_the_listing() {
    let server = MockServer::start().await;
    let (session, recruiter) = session_for("rec_1", Some("Ravi"), Role::Recruiter);

    Mock::given(method("POST"))
        .and(path("/rest/v1/jobs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([engineer_row()])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/jobs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([engineer_row()])),
        )
        .mount(&server)
        .await;

    let post_page = PostJobPage::new(session.clone(), db(&server), storage(&server));
    let outcome = post_page
        .submit(
            &recruiter,
            PostJobForm {
                title: "Engineer".into(),
                description: "Build the hiring pipeline.".into(),
                location: "Delhi".into(),
                company_id: 7,
                requirements: "Go, SQL".into(),
            },
        )
        .await
        .unwrap();

    match outcome {
        PostJobOutcome::Created { job, redirect } => {
            assert_eq!(job.id, 42);
            assert_eq!(redirect, Route::Jobs);
        }
        other => panic!("expected Created, got {:?}", other),
    }

    let listing_page = JobListingPage::new(session, db(&server));
    let listing = listing_page.load(JobFilters::default()).await.unwrap();

    let posted = listing.iter().find(|row| row.job.title == "Engineer").unwrap();
    assert!(posted.job.is_open);
    assert_eq!(posted.job.recruiter_id, recruiter.id);
}

#[tokio::test]
async fn candidates_are_redirected_away_from_post_job() {
    let server = MockServer::start().await;
    let (session, candidate) = session_for("user_3", Some("Asha"), Role::Candidate);

    let page = PostJobPage::new(session, db(&server), storage(&server));
    let outcome = page
        .submit(
            &candidate,
            PostJobForm {
                title: "Engineer".into(),
                description: "d".into(),
                location: "Delhi".into(),
                company_id: 7,
                requirements: "r".into(),
            },
        )
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        PostJobOutcome::RedirectedAway(Route::Jobs)
    ));
    // Nothing was sent to the backend.
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn applying_uploads_the_resume_then_inserts() {
    let server = MockServer::start().await;
    let (session, candidate) = session_for("user_3", Some("Asha"), Role::Candidate);

    Mock::given(method("GET"))
        .and(path("/rest/v1/jobs"))
        .and(query_param("id", "eq.42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([engineer_row()])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/resumes/resume-\d+-user_3$"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/applications"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": 9,
            "job_id": 42,
            "candidate_id": "user_3",
            "name": "Asha",
            "status": "applied",
            "experience": 4,
            "skills": "Go, SQL",
            "education": "Graduate",
            "resume": "stub"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let page = JobPage::new(session, db(&server), storage(&server), 42);
    let application = page
        .apply(
            &candidate,
            ApplicationForm {
                experience: 4,
                skills: "Go, SQL".into(),
                education: Education::Graduate,
                resume: FileUpload::new("cv.pdf", "application/pdf", vec![1, 2, 3]),
            },
        )
        .await
        .unwrap();

    assert_eq!(application.candidate_id, "user_3");
}

// Upload succeeds, insert fails: the stored object is orphaned — no cleanup
// request is ever issued — and the caller sees the fixed form message.
#[tokio::test]
async fn failed_insert_after_upload_leaves_the_object_alone() {
    let server = MockServer::start().await;
    let (session, candidate) = session_for("user_3", None, Role::Candidate);

    Mock::given(method("GET"))
        .and(path("/rest/v1/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([engineer_row()])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/resumes/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/applications"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
        .mount(&server)
        .await;

    let page = JobPage::new(session, db(&server), storage(&server), 42);
    let err = page
        .apply(
            &candidate,
            ApplicationForm {
                experience: 1,
                skills: "Go".into(),
                education: Education::Intermediate,
                resume: FileUpload::new("cv.pdf", "application/pdf", vec![1]),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Error submitting Application");

    let deletes: Vec<_> = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.as_str() == "DELETE")
        .collect();
    assert!(deletes.is_empty());
}

#[tokio::test]
async fn closed_jobs_reject_applications() {
    let server = MockServer::start().await;
    let (session, candidate) = session_for("user_3", None, Role::Candidate);

    let mut closed = engineer_row();
    closed["isOpen"] = json!(false);
    Mock::given(method("GET"))
        .and(path("/rest/v1/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([closed])))
        .mount(&server)
        .await;

    let page = JobPage::new(session, db(&server), storage(&server), 42);
    let err = page
        .apply(
            &candidate,
            ApplicationForm {
                experience: 1,
                skills: "Go".into(),
                education: Education::Graduate,
                resume: FileUpload::new("cv.pdf", "application/pdf", vec![1]),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(*err, ApiCallError::Forbidden("Hiring Closed")));
}

#[tokio::test]
async fn only_the_owner_can_change_hiring_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([engineer_row()])))
        .mount(&server)
        .await;

    let (session, stranger) = session_for("rec_2", None, Role::Recruiter);
    let page = JobPage::new(session, db(&server), storage(&server), 42);

    let err = page.set_hiring_status(&stranger, false).await.unwrap_err();
    assert!(matches!(*err, ApiCallError::Forbidden(_)));
}

#[tokio::test]
async fn save_toggle_inserts_then_deletes() {
    let server = MockServer::start().await;
    let (session, candidate) = session_for("user_3", None, Role::Candidate);

    // First toggle: not saved yet -> insert.
    Mock::given(method("GET"))
        .and(path("/rest/v1/saved_jobs"))
        .and(query_param("user_id", "eq.user_3"))
        .and(query_param("job_id", "eq.42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/saved_jobs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": 5, "user_id": "user_3", "job_id": 42
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let page = JobListingPage::new(session.clone(), db(&server));
    assert!(page.toggle_save(&candidate, 42).await.unwrap());

    server.reset().await;

    // Second toggle: already saved -> delete.
    Mock::given(method("GET"))
        .and(path("/rest/v1/saved_jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 5 }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/saved_jobs"))
        .and(query_param("user_id", "eq.user_3"))
        .and(query_param("job_id", "eq.42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 5, "user_id": "user_3", "job_id": 42
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let page = JobListingPage::new(session, db(&server));
    assert!(!page.toggle_save(&candidate, 42).await.unwrap());
}

// Application status updates are keyed by job, not by application row: one
// PATCH with job_id=eq.<id>, owner only.
#[tokio::test]
async fn application_status_updates_by_job_id() {
    let server = MockServer::start().await;
    let (session, owner) = session_for("rec_1", None, Role::Recruiter);

    Mock::given(method("GET"))
        .and(path("/rest/v1/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([engineer_row()])))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/applications"))
        .and(query_param("job_id", "eq.42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 9,
            "job_id": 42,
            "candidate_id": "user_3",
            "status": "interviewing",
            "experience": 4,
            "skills": "Go, SQL",
            "education": "Graduate",
            "resume": "stub"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let page = JobPage::new(session, db(&server), storage(&server), 42);
    let updated = page
        .update_application_status(&owner, jobdeck_models::ApplicationStatus::Interviewing)
        .await
        .unwrap();
    assert_eq!(updated.len(), 1);

    // A non-owner is rejected before any request is made.
    let (other_session, stranger) = session_for("rec_2", None, Role::Recruiter);
    let page = JobPage::new(other_session, db(&server), storage(&server), 42);
    let err = page
        .update_application_status(&stranger, jobdeck_models::ApplicationStatus::Hired)
        .await
        .unwrap_err();
    assert!(matches!(*err, ApiCallError::Forbidden(_)));
}

#[tokio::test]
async fn company_logo_upload_precedes_the_insert() {
    let server = MockServer::start().await;
    let (session, recruiter) = session_for("rec_1", None, Role::Recruiter);

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/company-logo/logo-\d+-Acme$"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/companies"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": 7,
            "name": "Acme",
            "logo_url": format!("{}/storage/v1/object/public/company-logo/logo-1-Acme", server.uri())
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let page = PostJobPage::new(session, db(&server), storage(&server));
    let company = page
        .add_company(
            &recruiter,
            jobdeck_models::AddCompanyForm {
                name: "Acme".into(),
                logo: FileUpload::new("logo.png", "image/png", vec![9, 9]),
            },
        )
        .await
        .unwrap();

    assert_eq!(company.name, "Acme");
}
