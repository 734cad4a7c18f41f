use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;

use super::decision::DecisionSampler;
use super::domain::{ApplicationId, Vacancy};
use super::lifecycle::{ApplicationLifecycle, Submission};
use super::notifications::NotificationSink;

/// Shared state behind the career-center routes.
pub struct CareerCenter<N, D> {
    pub lifecycle: ApplicationLifecycle<N, D>,
    pub vacancies: Vec<Vacancy>,
}

impl<N, D> CareerCenter<N, D> {
    pub fn vacancy(&self, id: &str) -> Option<&Vacancy> {
        self.vacancies.iter().find(|vacancy| vacancy.id == id)
    }
}

/// Router exposing vacancy browsing, submission, and application tracking.
pub fn application_router<N, D>(center: Arc<CareerCenter<N, D>>) -> Router
where
    N: NotificationSink + 'static,
    D: DecisionSampler + 'static,
{
    Router::new()
        .route("/api/v1/vacancies", get(vacancies_handler::<N, D>))
        .route(
            "/api/v1/vacancies/:vacancy_id/applications",
            post(submit_handler::<N, D>),
        )
        .route("/api/v1/applications", get(applications_handler::<N, D>))
        .route(
            "/api/v1/applications/:application_id/review",
            delete(cancel_handler::<N, D>),
        )
        .with_state(center)
}

pub(crate) async fn vacancies_handler<N, D>(
    State(center): State<Arc<CareerCenter<N, D>>>,
) -> Response
where
    N: NotificationSink + 'static,
    D: DecisionSampler + 'static,
{
    Json(center.vacancies.clone()).into_response()
}

pub(crate) async fn submit_handler<N, D>(
    State(center): State<Arc<CareerCenter<N, D>>>,
    Path(vacancy_id): Path<String>,
) -> Response
where
    N: NotificationSink + 'static,
    D: DecisionSampler + 'static,
{
    let Some(vacancy) = center.vacancy(&vacancy_id) else {
        let payload = json!({ "error": format!("vacancy {vacancy_id} not found") });
        return (StatusCode::NOT_FOUND, Json(payload)).into_response();
    };

    match center.lifecycle.submit(vacancy) {
        Submission::Accepted(application) => {
            let payload = json!({ "submitted": true, "application": application });
            (StatusCode::ACCEPTED, Json(payload)).into_response()
        }
        Submission::Duplicate => {
            let payload = json!({ "submitted": false });
            (StatusCode::OK, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn applications_handler<N, D>(
    State(center): State<Arc<CareerCenter<N, D>>>,
) -> Response
where
    N: NotificationSink + 'static,
    D: DecisionSampler + 'static,
{
    Json(center.lifecycle.applications()).into_response()
}

pub(crate) async fn cancel_handler<N, D>(
    State(center): State<Arc<CareerCenter<N, D>>>,
    Path(application_id): Path<String>,
) -> Response
where
    N: NotificationSink + 'static,
    D: DecisionSampler + 'static,
{
    let id = ApplicationId(application_id);
    if center.lifecycle.cancel(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        let payload = json!({ "error": format!("no pending review for {id}") });
        (StatusCode::NOT_FOUND, Json(payload)).into_response()
    }
}
