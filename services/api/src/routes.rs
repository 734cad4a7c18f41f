use crate::infra::{AppState, UbexContext};
use axum::extract::{Path, Query, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Extension, Json, Router};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use ubex::domain::{Certificate, ProfileLink, TeacherReference, UniversityStats, UserRole};
use ubex::error::AppError;
use ubex::session::{Credentials, SessionSnapshot, View};
use ubex::workflows::applications::{application_router, Notification};
use ubex::workflows::certificates::CertificateDraft;
use ubex::workflows::partners::{IndustryFilter, Partner, PartnerDraft};
use ubex::workflows::profile::{AnalysisMode, CvOutcome, CvUpload, LinkDraft};
use ubex::workflows::references::{QueueStatus, ReferenceDraft, ReferenceError};

type Ctx = State<Arc<UbexContext>>;

#[derive(Debug, Deserialize)]
pub(crate) struct DemoLoginRequest {
    pub(crate) role: UserRole,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NavigateRequest {
    pub(crate) view: View,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CvRequest {
    #[serde(flatten)]
    pub(crate) upload: CvUpload,
    #[serde(default)]
    pub(crate) mode: AnalysisMode,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PartnerQuery {
    #[serde(default)]
    pub(crate) search: Option<String>,
    #[serde(default)]
    pub(crate) industry: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchQuery {
    #[serde(default)]
    pub(crate) search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReferenceNote {
    pub(crate) text: String,
}

/// Full HTTP surface: session, career center, student profile, partner
/// directory, teacher references, insights, and operational probes.
pub(crate) fn ubex_router(ctx: Arc<UbexContext>) -> Router {
    let career = application_router(Arc::clone(&ctx.career)).route_layer(
        middleware::from_fn_with_state(Arc::clone(&ctx), require_career_access),
    );

    Router::new()
        .route("/api/v1/session", get(session_endpoint))
        .route("/api/v1/session/login", post(login_endpoint))
        .route("/api/v1/session/demo-login", post(demo_login_endpoint))
        .route("/api/v1/session/logout", post(logout_endpoint))
        .route("/api/v1/session/navigate", post(navigate_endpoint))
        .route("/api/v1/notifications", get(notifications_endpoint))
        .route(
            "/api/v1/certificates",
            get(list_certificates).post(create_certificate),
        )
        .route(
            "/api/v1/certificates/:certificate_id",
            put(update_certificate).delete(delete_certificate),
        )
        .route("/api/v1/profile/links", get(list_links).post(add_link))
        .route("/api/v1/profile/links/:link_id", delete(remove_link))
        .route("/api/v1/profile/cv", post(analyze_cv))
        .route("/api/v1/partners", get(list_partners).post(create_partner))
        .route(
            "/api/v1/partners/:partner_id",
            put(update_partner).delete(delete_partner),
        )
        .route("/api/v1/references/queue", get(queue_status))
        .route("/api/v1/references/queue/confirm", post(confirm_reference))
        .route("/api/v1/references", get(search_references))
        .route("/api/v1/insights/summary", get(student_summary))
        .route("/api/v1/insights/reference", post(structure_reference))
        .route("/api/v1/university/stats", get(university_stats))
        .with_state(ctx)
        .merge(career)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

async fn require_career_access(State(ctx): Ctx, request: Request, next: Next) -> Response {
    match ctx.session.require(View::Vacancies) {
        Ok(_) => next.run(request).await,
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn session_endpoint(State(ctx): Ctx) -> Json<SessionSnapshot> {
    Json(ctx.session.snapshot())
}

pub(crate) async fn login_endpoint(
    State(ctx): Ctx,
    Json(credentials): Json<Credentials>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(ctx.session.login(&credentials)?))
}

pub(crate) async fn demo_login_endpoint(
    State(ctx): Ctx,
    Json(request): Json<DemoLoginRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let credentials = ctx
        .session
        .demo_credentials(request.role)
        .ok_or_else(|| AppError::NotFound(format!("demo account for {:?}", request.role)))?;
    Ok(Json(ctx.session.login(&credentials)?))
}

/// Signing out abandons the session, so pending reviews stop where they are.
pub(crate) async fn logout_endpoint(State(ctx): Ctx) -> Json<serde_json::Value> {
    let cancelled = ctx.career.lifecycle.cancel_all();
    ctx.session.logout();
    Json(json!({ "session": ctx.session.snapshot(), "cancelled_reviews": cancelled }))
}

pub(crate) async fn navigate_endpoint(
    State(ctx): Ctx,
    Json(request): Json<NavigateRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(ctx.session.navigate(request.view)?))
}

pub(crate) async fn notifications_endpoint(
    State(ctx): Ctx,
) -> Result<Json<Vec<Notification>>, AppError> {
    ctx.session.require(View::Vacancies)?;
    Ok(Json(ctx.notifications.events()))
}

pub(crate) async fn list_certificates(State(ctx): Ctx) -> Result<Json<Vec<Certificate>>, AppError> {
    ctx.session.require(View::Certificates)?;
    Ok(Json(ctx.certificates.list()))
}

pub(crate) async fn create_certificate(
    State(ctx): Ctx,
    Json(draft): Json<CertificateDraft>,
) -> Result<(StatusCode, Json<Certificate>), AppError> {
    ctx.session.require(View::Certificates)?;
    let certificate = ctx.certificates.save(draft, None)?;
    Ok((StatusCode::CREATED, Json(certificate)))
}

pub(crate) async fn update_certificate(
    State(ctx): Ctx,
    Path(certificate_id): Path<String>,
    Json(draft): Json<CertificateDraft>,
) -> Result<Json<Certificate>, AppError> {
    ctx.session.require(View::Certificates)?;
    Ok(Json(ctx.certificates.save(draft, Some(&certificate_id))?))
}

pub(crate) async fn delete_certificate(
    State(ctx): Ctx,
    Path(certificate_id): Path<String>,
) -> Result<StatusCode, AppError> {
    ctx.session.require(View::Certificates)?;
    ctx.certificates.remove(&certificate_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn list_links(State(ctx): Ctx) -> Result<Json<Vec<ProfileLink>>, AppError> {
    ctx.session.require(View::Profile)?;
    Ok(Json(ctx.profile.links()))
}

pub(crate) async fn add_link(
    State(ctx): Ctx,
    Json(draft): Json<LinkDraft>,
) -> Result<(StatusCode, Json<ProfileLink>), AppError> {
    ctx.session.require(View::Profile)?;
    let link = ctx.profile.add_link(draft)?;
    Ok((StatusCode::CREATED, Json(link)))
}

pub(crate) async fn remove_link(
    State(ctx): Ctx,
    Path(link_id): Path<String>,
) -> Result<StatusCode, AppError> {
    ctx.session.require(View::Profile)?;
    ctx.profile.remove_link(&link_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn analyze_cv(
    State(ctx): Ctx,
    Json(request): Json<CvRequest>,
) -> Result<Json<CvOutcome>, AppError> {
    ctx.session.require(View::Profile)?;
    let outcome = ctx
        .profile
        .analyze_cv(request.upload, request.mode, &ctx.insights)
        .await?;
    Ok(Json(outcome))
}

pub(crate) async fn list_partners(
    State(ctx): Ctx,
    Query(query): Query<PartnerQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    ctx.session.require(View::Partners)?;
    let filter = IndustryFilter::parse(query.industry.as_deref());
    let directory = ctx.partners();
    let partners = directory.filter(query.search.as_deref().unwrap_or_default(), &filter);
    Ok(Json(json!({
        "partners": partners,
        "industries": directory.industries(),
    })))
}

pub(crate) async fn create_partner(
    State(ctx): Ctx,
    Json(draft): Json<PartnerDraft>,
) -> Result<(StatusCode, Json<Partner>), AppError> {
    ctx.session.require(View::Partners)?;
    let partner = ctx.partners_mut().save(draft, None)?;
    Ok((StatusCode::CREATED, Json(partner)))
}

pub(crate) async fn update_partner(
    State(ctx): Ctx,
    Path(partner_id): Path<String>,
    Json(draft): Json<PartnerDraft>,
) -> Result<Json<Partner>, AppError> {
    ctx.session.require(View::Partners)?;
    let partner = ctx.partners_mut().save(draft, Some(&partner_id))?;
    Ok(Json(partner))
}

pub(crate) async fn delete_partner(
    State(ctx): Ctx,
    Path(partner_id): Path<String>,
) -> Result<StatusCode, AppError> {
    ctx.session.require(View::Partners)?;
    ctx.partners_mut().remove(&partner_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn queue_status(State(ctx): Ctx) -> Result<Json<QueueStatus>, AppError> {
    ctx.session.require(View::References)?;
    Ok(Json(ctx.review_queue().status()))
}

pub(crate) async fn confirm_reference(
    State(ctx): Ctx,
    Json(draft): Json<ReferenceDraft>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    ctx.session.require(View::References)?;
    let today = Local::now().date_naive();
    let mut queue = ctx.review_queue();
    let reference = queue.confirm(draft, today, &mut ctx.archive_mut())?;
    let payload = json!({ "reference": reference, "queue": queue.status() });
    Ok((StatusCode::CREATED, Json(payload)))
}

pub(crate) async fn search_references(
    State(ctx): Ctx,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<TeacherReference>>, AppError> {
    ctx.session.require(View::References)?;
    let term = query.search.as_deref().unwrap_or_default();
    Ok(Json(ctx.archive().search(term)))
}

pub(crate) async fn student_summary(State(ctx): Ctx) -> Result<Json<serde_json::Value>, AppError> {
    ctx.session.require(View::Profile)?;
    let student = ctx.session.student().snapshot();
    let summary = ctx.insights.summarize_student(&student).await;
    Ok(Json(json!({ "summary": summary })))
}

pub(crate) async fn structure_reference(
    State(ctx): Ctx,
    Json(note): Json<ReferenceNote>,
) -> Result<Json<serde_json::Value>, AppError> {
    ctx.session.require(View::References)?;
    if note.text.trim().is_empty() {
        return Err(ReferenceError::EmptyComment.into());
    }
    let reference = ctx.insights.structure_reference(&note.text).await;
    Ok(Json(json!({ "reference": reference })))
}

pub(crate) async fn university_stats(State(ctx): Ctx) -> Result<Json<UniversityStats>, AppError> {
    ctx.session.require(View::Analytics)?;
    Ok(Json(ctx.stats.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use std::time::Duration;
    use tower::ServiceExt;
    use ubex::insights::{ConfiguredModel, InsightService, SUMMARY_FALLBACK};
    use ubex::workflows::applications::{LifecycleConfig, RandomDecision};

    fn context() -> Arc<UbexContext> {
        Arc::new(UbexContext::seeded(
            LifecycleConfig::default(),
            RandomDecision::seeded(1.0, 7),
            InsightService::new(ConfiguredModel::Disabled, Duration::from_secs(1)),
        ))
    }

    fn signed_in(role: UserRole) -> Arc<UbexContext> {
        let ctx = context();
        let credentials = ctx.session.demo_credentials(role).expect("demo account");
        ctx.session.login(&credentials).expect("demo sign-in");
        ctx
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    async fn read_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let response = ubex_router(context())
            .oneshot(get_request("/health"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn signed_out_requests_are_unauthorized() {
        let router = ubex_router(context());
        for uri in ["/api/v1/certificates", "/api/v1/applications", "/api/v1/university/stats"] {
            let response = router
                .clone()
                .oneshot(get_request(uri))
                .await
                .expect("router responds");
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[tokio::test]
    async fn login_rejects_wrong_domain_with_inline_error() {
        let response = ubex_router(context())
            .oneshot(json_request(
                "POST",
                "/api/v1/session/login",
                json!({ "role": "student", "email": "aysel@gmail.com", "password": "x" }),
            ))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = read_json(response).await;
        assert!(body["error"].as_str().expect("message").contains("@unec.edu.az"));
    }

    #[tokio::test]
    async fn demo_login_lands_admin_on_analytics() {
        let ctx = context();
        let Json(snapshot) = demo_login_endpoint(
            State(Arc::clone(&ctx)),
            Json(DemoLoginRequest {
                role: UserRole::UniversityAdmin,
            }),
        )
        .await
        .expect("demo login");
        assert_eq!(snapshot.view, View::Analytics);

        let Json(stats) = university_stats(State(ctx)).await.expect("admin sees stats");
        assert_eq!(stats.total_students, 1250);
    }

    #[tokio::test]
    async fn logout_cancels_pending_reviews() {
        let ctx = signed_in(UserRole::Student);
        let router = ubex_router(Arc::clone(&ctx));

        let response = router
            .clone()
            .oneshot(json_request("POST", "/api/v1/vacancies/v1/applications", json!({})))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let Json(body) = logout_endpoint(State(Arc::clone(&ctx))).await;
        assert_eq!(body["cancelled_reviews"], 1);
        assert!(body["session"]["role"].is_null());
        assert_eq!(ctx.career.lifecycle.pending(), 0);

        let response = router
            .oneshot(get_request("/api/v1/applications"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn certificate_without_image_is_unprocessable() {
        let ctx = signed_in(UserRole::Student);
        let err = create_certificate(
            State(ctx),
            Json(CertificateDraft {
                name: "AWS".to_string(),
                verification_number: "AWS-1".to_string(),
                url: "https://aws.example/verify".to_string(),
                ..CertificateDraft::default()
            }),
        )
        .await
        .expect_err("image missing");
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn students_cannot_manage_partners() {
        let ctx = signed_in(UserRole::Student);
        let err = list_partners(State(ctx), Query(PartnerQuery::default()))
            .await
            .expect_err("admin only");
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn partner_listing_applies_search_and_industry() {
        let router = ubex_router(signed_in(UserRole::UniversityAdmin));
        let response = router
            .oneshot(get_request("/api/v1/partners?search=bank&industry=Banking"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        let partners = body["partners"].as_array().expect("partners array");
        assert_eq!(partners.len(), 1);
        assert_eq!(partners[0]["name"], "Pasha Bank");
        assert_eq!(body["industries"][0], "All");
    }

    #[tokio::test]
    async fn teacher_confirms_reference_and_finds_it_in_archive() {
        let ctx = signed_in(UserRole::Teacher);

        let err = confirm_reference(State(Arc::clone(&ctx)), Json(ReferenceDraft::new("  ")))
            .await
            .expect_err("blank comment");
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let (status, Json(body)) = confirm_reference(
            State(Arc::clone(&ctx)),
            Json(ReferenceDraft::new("Məsuliyyətli və çalışqan tələbədir.")),
        )
        .await
        .expect("reference sent");
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["queue"]["position"], 2);

        let Json(found) = search_references(
            State(ctx),
            Query(SearchQuery {
                search: Some("aysel".to_string()),
            }),
        )
        .await
        .expect("teacher searches archive");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].teacher_name, crate::infra::SEED_TEACHER);
    }

    #[tokio::test]
    async fn summary_falls_back_without_model() {
        let ctx = signed_in(UserRole::Student);
        let Json(body) = student_summary(State(ctx)).await.expect("student summary");
        assert_eq!(body["summary"], SUMMARY_FALLBACK);
    }

    #[tokio::test]
    async fn cv_analysis_rejects_non_pdf() {
        let ctx = signed_in(UserRole::Student);
        let response = ubex_router(ctx)
            .oneshot(json_request(
                "POST",
                "/api/v1/profile/cv",
                json!({ "file_name": "cv.docx", "mode": "demo" }),
            ))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
