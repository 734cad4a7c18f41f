use std::sync::Arc;
use std::time::Duration;

use axum::response::Response;
use serde_json::Value;

use crate::seed;
use crate::session::StudentStore;
use crate::workflows::applications::{
    ApplicationLifecycle, CareerCenter, DecisionSampler, FixedDecision, LifecycleConfig,
    Notification, NotificationError, NotificationLog, NotificationSink, Vacancy,
};

pub(super) fn vacancy(id: &str) -> Vacancy {
    seed::vacancies()
        .into_iter()
        .find(|vacancy| vacancy.id == id)
        .expect("seed vacancy")
}

pub(super) fn build_lifecycle<D: DecisionSampler + 'static>(
    decisions: D,
) -> (
    ApplicationLifecycle<NotificationLog, D>,
    Arc<StudentStore>,
    Arc<NotificationLog>,
) {
    let store = Arc::new(StudentStore::new(seed::student()));
    let notifications = Arc::new(NotificationLog::default());
    let lifecycle = ApplicationLifecycle::new(
        store.clone(),
        notifications.clone(),
        Arc::new(decisions),
        LifecycleConfig::default(),
    );
    (lifecycle, store, notifications)
}

pub(super) fn build_center(
    accept: bool,
) -> (
    Arc<CareerCenter<NotificationLog, FixedDecision>>,
    Arc<NotificationLog>,
) {
    let (lifecycle, _, notifications) = build_lifecycle(FixedDecision(accept));
    let center = Arc::new(CareerCenter {
        lifecycle,
        vacancies: seed::vacancies(),
    });
    (center, notifications)
}

/// Sleeps past `secs` so timers due at exactly `secs` have already fired.
pub(super) async fn settle_after(secs: u64) {
    tokio::time::sleep(Duration::from_secs(secs) + Duration::from_millis(500)).await;
}

/// Sink whose transport is permanently down.
pub(super) struct BrokenSink;

impl NotificationSink for BrokenSink {
    fn publish(&self, _notification: Notification) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("push gateway offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
