use crate::helpers::{MultipartBody, admin_token, empty_request, json_request, make_test_app};
use axum::http::StatusCode;
use serde_json::{Value, json};
use serial_test::serial;

fn application_form() -> MultipartBody {
    MultipartBody::new()
        .text("name", "Ravi Kumar")
        .text("email", "ravi@example.com")
        .text("qualification", "B.Tech Mechanical")
        .text("position", "Calibration Engineer")
        .text("mobile", "+91 91234 56789")
}

fn posting() -> Value {
    json!({
        "title": "Calibration Engineer",
        "location": "Pune",
        "qualification": "B.Tech Mechanical",
        "description": "Calibrate dimensional instruments.",
        "responsibilities": ["Calibrate gauges", "Maintain records"],
        "requirements": ["2 years experience"]
    })
}

#[tokio::test]
#[serial]
async fn application_with_pdf_resume_is_stored() {
    let app = make_test_app().await;

    let (status, json) = app
        .send(
            application_form()
                .file("resume", "cv.pdf", "application/pdf", b"%PDF-1.4 resume")
                .into_request("POST", "/api/careers/applications/submit", None),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{json}");
    assert_eq!(json["data"]["status"], "pending");
    assert!(json["data"]["resumeUrl"].as_str().unwrap().ends_with(".pdf"));
    assert_eq!(app.stored_files("resumes"), 1);
}

#[tokio::test]
#[serial]
async fn oversized_resume_is_rejected_before_storage() {
    let app = make_test_app().await;
    let big = vec![b'a'; 2 * 1024 * 1024 + 1];

    let (status, _) = app
        .send(
            application_form()
                .file("resume", "cv.pdf", "application/pdf", &big)
                .into_request("POST", "/api/careers/applications/submit", None),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.stored_files("resumes"), 0);
    let admin = admin_token();
    let (_, list) = app
        .send(empty_request("GET", "/api/careers/applications", Some(&admin)))
        .await;
    assert_eq!(list["data"], json!([]));
}

#[tokio::test]
#[serial]
async fn resume_with_disallowed_type_is_rejected() {
    let app = make_test_app().await;

    let (status, _) = app
        .send(
            application_form()
                .file("resume", "cv.png", "image/png", b"png")
                .into_request("POST", "/api/careers/applications/submit", None),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.stored_files("resumes"), 0);
}

#[tokio::test]
#[serial]
async fn application_without_resume_is_rejected() {
    let app = make_test_app().await;

    let (status, json) = app
        .send(application_form().into_request("POST", "/api/careers/applications/submit", None))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Resume is required");
}

#[tokio::test]
#[serial]
async fn admin_reviews_and_deletes_application() {
    let app = make_test_app().await;
    let (_, created) = app
        .send(
            application_form()
                .file("resume", "cv.docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document", b"PK docx")
                .into_request("POST", "/api/careers/applications/submit", None),
        )
        .await;
    let id = created["data"]["id"].as_i64().unwrap();
    let admin = admin_token();

    let (status, json) = app
        .send(json_request(
            "PUT",
            &format!("/api/careers/applications/{id}/status"),
            Some(&admin),
            json!({ "status": "shortlisted" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "shortlisted");

    let (status, _) = app
        .send(empty_request("DELETE", &format!("/api/careers/applications/{id}"), Some(&admin)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.stored_files("resumes"), 0);

    let (status, _) = app
        .send(empty_request("GET", &format!("/api/careers/applications/{id}"), Some(&admin)))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn career_postings_crud() {
    let app = make_test_app().await;
    let admin = admin_token();

    let (status, created) = app
        .send(json_request("POST", "/api/dashboard/careers", Some(&admin), posting()))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    let id = created["data"]["id"].as_i64().unwrap();

    let mut edited = posting();
    edited["location"] = json!("Mumbai");
    let (status, updated) = app
        .send(json_request("PUT", &format!("/api/dashboard/careers/{id}"), Some(&admin), edited))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["location"], "Mumbai");

    let (_, list) = app.send(empty_request("GET", "/api/dashboard/careers", None)).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);

    let (status, _) = app
        .send(empty_request("DELETE", &format!("/api/dashboard/careers/{id}"), Some(&admin)))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .send(empty_request("GET", &format!("/api/dashboard/careers/{id}"), None))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn career_posting_needs_requirements() {
    let app = make_test_app().await;
    let admin = admin_token();
    let mut body = posting();
    body["requirements"] = json!([]);

    let (status, _) = app
        .send(json_request("POST", "/api/dashboard/careers", Some(&admin), body))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
