use std::time::Duration;

const DEFAULT_REVIEW_DELAY: Duration = Duration::from_secs(5);
const DEFAULT_DECISION_DELAY: Duration = Duration::from_secs(15);
const DEFAULT_ACCEPTANCE_PROBABILITY: f64 = 0.6;

/// Timing and outcome dials for the simulated employer review.
///
/// Both delays are offsets from the submission instant, so the decision delay
/// must be strictly larger than the review delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifecycleConfig {
    review_delay: Duration,
    decision_delay: Duration,
    acceptance_probability: f64,
}

impl LifecycleConfig {
    pub fn new(
        review_delay: Duration,
        decision_delay: Duration,
        acceptance_probability: f64,
    ) -> Result<Self, LifecycleConfigError> {
        if decision_delay <= review_delay {
            return Err(LifecycleConfigError::DecisionBeforeReview);
        }
        if !(0.0..=1.0).contains(&acceptance_probability) {
            return Err(LifecycleConfigError::Probability(acceptance_probability));
        }

        Ok(Self {
            review_delay,
            decision_delay,
            acceptance_probability,
        })
    }

    pub fn review_delay(&self) -> Duration {
        self.review_delay
    }

    pub fn decision_delay(&self) -> Duration {
        self.decision_delay
    }

    pub fn acceptance_probability(&self) -> f64 {
        self.acceptance_probability
    }

    /// Divide both delays by `factor`, keeping their ordering. Used by the CLI demo.
    pub fn accelerated(&self, factor: u32) -> Self {
        let factor = factor.max(1);
        Self {
            review_delay: self.review_delay / factor,
            decision_delay: self.decision_delay / factor,
            acceptance_probability: self.acceptance_probability,
        }
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            review_delay: DEFAULT_REVIEW_DELAY,
            decision_delay: DEFAULT_DECISION_DELAY,
            acceptance_probability: DEFAULT_ACCEPTANCE_PROBABILITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LifecycleConfigError {
    #[error("decision delay must be longer than the review delay")]
    DecisionBeforeReview,
    #[error("acceptance probability must be within 0..=1 (found {0})")]
    Probability(f64),
}
