use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use ubex::config::AppConfig;
use ubex::domain::UniversityStats;
use ubex::insights::{ConfiguredModel, InsightService};
use ubex::seed;
use ubex::session::AppSession;
use ubex::workflows::applications::{
    ApplicationLifecycle, CareerCenter, LifecycleConfig, NotificationLog, RandomDecision,
};
use ubex::workflows::certificates::CertificateService;
use ubex::workflows::partners::PartnerDirectory;
use ubex::workflows::profile::ProfileService;
use ubex::workflows::references::{ReferenceArchive, ReviewQueue};

/// Teacher whose queue and archive are served to the teacher role.
pub(crate) const SEED_TEACHER: &str = "Dr. Əli Əliyev";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type Career = CareerCenter<NotificationLog, RandomDecision>;

/// Everything one browser session works against, seeded at startup.
pub(crate) struct UbexContext {
    pub(crate) session: AppSession,
    pub(crate) career: Arc<Career>,
    pub(crate) notifications: Arc<NotificationLog>,
    pub(crate) certificates: CertificateService,
    pub(crate) profile: ProfileService,
    pub(crate) partners: RwLock<PartnerDirectory>,
    pub(crate) review_queue: Mutex<ReviewQueue>,
    pub(crate) archive: RwLock<ReferenceArchive>,
    pub(crate) insights: InsightService<ConfiguredModel>,
    pub(crate) stats: UniversityStats,
}

impl UbexContext {
    pub(crate) fn from_config(config: &AppConfig) -> Self {
        Self::seeded(
            config.lifecycle,
            RandomDecision::new(config.lifecycle.acceptance_probability()),
            InsightService::from_config(&config.insights),
        )
    }

    pub(crate) fn seeded(
        lifecycle: LifecycleConfig,
        decisions: RandomDecision,
        insights: InsightService<ConfiguredModel>,
    ) -> Self {
        let session = AppSession::new(seed::auth_users(), seed::student());
        let store = Arc::clone(session.student());
        let notifications = Arc::new(NotificationLog::default());
        let career = Arc::new(CareerCenter {
            lifecycle: ApplicationLifecycle::new(
                Arc::clone(&store),
                Arc::clone(&notifications),
                Arc::new(decisions),
                lifecycle,
            ),
            vacancies: seed::vacancies(),
        });

        Self {
            certificates: CertificateService::new(Arc::clone(&store)),
            profile: ProfileService::new(store),
            session,
            career,
            notifications,
            partners: RwLock::new(PartnerDirectory::new(seed::partners())),
            review_queue: Mutex::new(ReviewQueue::new(SEED_TEACHER, seed::teacher_queue())),
            archive: RwLock::new(ReferenceArchive::new(seed::sent_references())),
            insights,
            stats: seed::university_stats(),
        }
    }

    pub(crate) fn partners(&self) -> RwLockReadGuard<'_, PartnerDirectory> {
        self.partners.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn partners_mut(&self) -> RwLockWriteGuard<'_, PartnerDirectory> {
        self.partners.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn review_queue(&self) -> MutexGuard<'_, ReviewQueue> {
        self.review_queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn archive(&self) -> RwLockReadGuard<'_, ReferenceArchive> {
        self.archive.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn archive_mut(&self) -> RwLockWriteGuard<'_, ReferenceArchive> {
        self.archive.write().unwrap_or_else(PoisonError::into_inner)
    }
}
