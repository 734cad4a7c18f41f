use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use crate::workflows::applications::application_router;
use crate::workflows::applications::router::{cancel_handler, submit_handler};
use crate::workflows::applications::{FixedDecision, NotificationLog};

#[tokio::test(start_paused = true)]
async fn submit_handler_accepts_known_vacancy() {
    let (center, _) = build_center(true);

    let response = submit_handler::<NotificationLog, FixedDecision>(
        State(center.clone()),
        Path("v1".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = read_json_body(response).await;
    assert_eq!(body["submitted"], true);
    assert_eq!(body["application"]["status"], "submitted");
    assert_eq!(body["application"]["company"], "Pasha Bank");
}

#[tokio::test(start_paused = true)]
async fn submit_handler_reports_duplicates_without_error() {
    let (center, _) = build_center(true);
    submit_handler::<NotificationLog, FixedDecision>(State(center.clone()), Path("v2".into()))
        .await;

    let response =
        submit_handler::<NotificationLog, FixedDecision>(State(center.clone()), Path("v2".into()))
            .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json_body(response).await["submitted"], false);
    assert_eq!(center.lifecycle.applications().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn submit_handler_rejects_unknown_vacancy() {
    let (center, _) = build_center(true);
    let response =
        submit_handler::<NotificationLog, FixedDecision>(State(center), Path("v404".into()))
            .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(start_paused = true)]
async fn cancel_handler_returns_not_found_when_nothing_pending() {
    let (center, _) = build_center(true);
    let response =
        cancel_handler::<NotificationLog, FixedDecision>(State(center), Path("app-x".into()))
            .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(start_paused = true)]
async fn applications_route_reflects_lifecycle_progress() {
    let (center, notifications) = build_center(true);
    let router = application_router(center.clone());

    let response = router
        .clone()
        .oneshot(
            Request::post("/api/v1/vacancies/v1/applications")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    settle_after(15).await;

    let response = router
        .oneshot(
            Request::get("/api/v1/applications")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["status"], "accepted");
    assert_eq!(notifications.events().len(), 2);
}

#[tokio::test]
async fn vacancies_route_lists_seed_catalog() {
    let (center, _) = build_center(true);
    let response = application_router(center)
        .oneshot(
            Request::get("/api/v1/vacancies")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(3));
    assert_eq!(body[0]["id"], "v1");
}
