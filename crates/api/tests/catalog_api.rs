//! Integration tests for the static catalog endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};

#[tokio::test]
async fn api_root_returns_banner() {
    let response = get(common::build_test_app(), "/api").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["message"].as_str().is_some_and(|m| !m.is_empty()));
}

#[tokio::test]
async fn subjects_are_listed_in_catalog_order() {
    let response = get(common::build_test_app(), "/api/subjects").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let subjects = json["subjects"].as_array().unwrap();
    assert_eq!(subjects.len(), 10);
    assert_eq!(subjects[0]["id"], "maths");
    assert_eq!(subjects[0]["name"], "Mathématiques");
    assert!(subjects.iter().all(|s| s["icon"].is_string()));
    assert!(subjects.iter().any(|s| s["id"] == "histoire-geo"));
}

#[tokio::test]
async fn revision_types_are_listed() {
    let response = get(common::build_test_app(), "/api/revision-types").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let ids: Vec<&str> = json["types"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["fiche", "qcm", "flashcard", "resume", "trous"]);
    assert!(json["types"][0]["description"].is_string());
}

#[tokio::test]
async fn catalog_is_public() {
    // No Authorization header anywhere above; make sure a bogus one is ignored too.
    let app = common::build_test_app();
    let response = common::get_auth(app, "/api/subjects", "not-a-token").await;
    assert_eq!(response.status(), StatusCode::OK);
}
