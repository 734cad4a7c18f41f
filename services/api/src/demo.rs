use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use ubex::config::AppConfig;
use ubex::domain::UserRole;
use ubex::error::AppError;
use ubex::insights::InsightService;
use ubex::seed;
use ubex::session::AppSession;
use ubex::workflows::applications::{
    ApplicationLifecycle, ChannelNotifications, RandomDecision, Submission,
};
use ubex::workflows::certificates::{encode_image_preview, CertificateDraft, CertificateService};

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Divide the review and decision delays by this factor.
    #[arg(long, default_value_t = 5)]
    pub(crate) speedup: u32,
    /// Vacancy to apply to.
    #[arg(long, default_value = "v1")]
    pub(crate) vacancy: String,
    /// Seed for the accept/reject draw, for repeatable runs.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Image file to attach as a certificate preview.
    #[arg(long)]
    pub(crate) certificate_image: Option<PathBuf>,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        speedup,
        vacancy,
        seed: draw_seed,
        certificate_image,
    } = args;

    let config = AppConfig::load()?;
    let lifecycle_config = config.lifecycle.accelerated(speedup);
    let probability = lifecycle_config.acceptance_probability();
    let decisions = match draw_seed {
        Some(value) => RandomDecision::seeded(probability, value),
        None => RandomDecision::new(probability),
    };

    let session = AppSession::new(seed::auth_users(), seed::student());
    let credentials = session
        .demo_credentials(UserRole::Student)
        .ok_or_else(|| AppError::NotFound("student demo account".to_string()))?;
    session.login(&credentials)?;
    let student = session.student().snapshot();

    println!("UBEX career center demo");
    println!("- Signed in as {} ({})", student.full_name(), student.email);

    let vacancies = seed::vacancies();
    let vacancy = vacancies
        .iter()
        .find(|candidate| candidate.id == vacancy)
        .ok_or_else(|| AppError::NotFound(format!("vacancy {vacancy}")))?;

    let (sink, mut receiver) = ChannelNotifications::new();
    let lifecycle = ApplicationLifecycle::new(
        Arc::clone(session.student()),
        Arc::new(sink),
        Arc::new(decisions),
        lifecycle_config,
    );

    println!(
        "- Review after {:.1}s, decision after {:.1}s, acceptance p={:.2}",
        lifecycle_config.review_delay().as_secs_f64(),
        lifecycle_config.decision_delay().as_secs_f64(),
        probability
    );

    let application = match lifecycle.submit(vacancy) {
        Submission::Accepted(application) => application,
        Submission::Duplicate => {
            println!("  Already applied to {}", vacancy.title);
            return Ok(());
        }
    };
    println!(
        "- Applied to {} at {} ({}) -> {}",
        application.vacancy_title,
        application.company,
        application.id,
        application.status.label()
    );

    let deadline = lifecycle_config.decision_delay() + Duration::from_secs(1);
    for _ in 0..2 {
        match tokio::time::timeout(deadline, receiver.recv()).await {
            Ok(Some(notification)) => println!(
                "  [{:?}] {}: {}",
                notification.severity, notification.title, notification.message
            ),
            Ok(None) | Err(_) => {
                println!("  No further updates");
                break;
            }
        }
    }

    if let Some(final_state) = lifecycle
        .applications()
        .into_iter()
        .find(|candidate| candidate.id == application.id)
    {
        println!("- Final status: {}", final_state.status.label());
    }

    if let Some(path) = certificate_image {
        let image = encode_image_preview(&path).await?;
        let certificates = CertificateService::new(Arc::clone(session.student()));
        let certificate = certificates.save(
            CertificateDraft {
                name: "Demo Certificate".to_string(),
                verification_number: "DEMO-0001".to_string(),
                url: "https://example.com/verify/DEMO-0001".to_string(),
                image,
                date: None,
            },
            None,
        )?;
        println!(
            "- Attached certificate {} from {} ({} byte preview)",
            certificate.id,
            path.display(),
            certificate.image.len()
        );
    }

    let insights = InsightService::from_config(&config.insights);
    let summary = insights
        .summarize_student(&session.student().snapshot())
        .await;
    println!("\nInsight summary:\n  {summary}");

    Ok(())
}
