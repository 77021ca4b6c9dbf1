//! Wire-level tests for the storage client.

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jobdeck_auth::AccessToken;
use jobdeck_storage::{Bucket, StorageClient, StorageConfig, StorageError};

fn client(server: &MockServer) -> StorageClient {
    StorageClient::new(StorageConfig {
        url: server.uri(),
        anon_key: "anon-key".to_string(),
    })
    .unwrap()
}

#[tokio::test]
async fn upload_sends_auth_and_upsert_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/storage/v1/object/resumes/resume-12345-user_3"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer user-jwt"))
        .and(header("x-upsert", "true"))
        .and(header("content-type", "application/pdf"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .upload(
            &AccessToken::new("user-jwt"),
            Bucket::Resumes,
            "resume-12345-user_3",
            vec![1, 2, 3],
            "application/pdf",
        )
        .await
        .unwrap();
}

// Pins the collision choice: uploading the same key twice overwrites
// silently; neither call errors.
#[tokio::test]
async fn key_collision_overwrites_silently() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/storage/v1/object/company-logo/logo-777-Acme"))
        .and(header("x-upsert", "true"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let storage = client(&server);
    for bytes in [vec![1u8], vec![2u8]] {
        storage
            .upload(
                &AccessToken::new("user-jwt"),
                Bucket::CompanyLogo,
                "logo-777-Acme",
                bytes,
                "image/png",
            )
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn upload_failure_is_a_typed_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/storage/v1/object/resumes/resume-1-user_9"))
        .respond_with(ResponseTemplate::new(500).set_body_string("disk full"))
        .mount(&server)
        .await;

    let err = client(&server)
        .upload(
            &AccessToken::new("user-jwt"),
            Bucket::Resumes,
            "resume-1-user_9",
            vec![],
            "application/pdf",
        )
        .await
        .unwrap_err();

    match err {
        StorageError::UploadFailed { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("disk full"));
        }
        other => panic!("expected UploadFailed, got {:?}", other),
    }
}
