use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws the employer's final answer for an application under review.
pub trait DecisionSampler: Send + Sync {
    fn accept(&self) -> bool;
}

/// Bernoulli draw with the configured acceptance probability.
#[derive(Debug)]
pub struct RandomDecision {
    acceptance_probability: f64,
    rng: Mutex<StdRng>,
}

impl RandomDecision {
    pub fn new(acceptance_probability: f64) -> Self {
        Self::with_rng(acceptance_probability, StdRng::from_entropy())
    }

    /// Reproducible sequence for tests and demos.
    pub fn seeded(acceptance_probability: f64, seed: u64) -> Self {
        Self::with_rng(acceptance_probability, StdRng::seed_from_u64(seed))
    }

    fn with_rng(acceptance_probability: f64, rng: StdRng) -> Self {
        let acceptance_probability = if acceptance_probability.is_finite() {
            acceptance_probability.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            acceptance_probability,
            rng: Mutex::new(rng),
        }
    }
}

impl DecisionSampler for RandomDecision {
    fn accept(&self) -> bool {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_bool(self.acceptance_probability)
    }
}

/// Always returns the same answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedDecision(pub bool);

impl DecisionSampler for FixedDecision {
    fn accept(&self) -> bool {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acceptance_rate_converges_to_probability() {
        let sampler = RandomDecision::seeded(0.6, 42);
        let trials = 20_000;
        let accepted = (0..trials).filter(|_| sampler.accept()).count();
        let rate = accepted as f64 / trials as f64;
        assert!((rate - 0.6).abs() < 0.02, "acceptance rate {rate}");
    }

    #[test]
    fn out_of_range_probability_is_clamped() {
        assert!(RandomDecision::seeded(7.0, 1).accept());
        assert!(!RandomDecision::seeded(-1.0, 1).accept());
        assert!(!RandomDecision::seeded(f64::NAN, 1).accept());
    }
}
