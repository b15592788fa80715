use rand::Rng;
use crate::error::{SimError, SimResult};
use crate::simulation::variability::sample_bernoulli;

/// Probability that a patient is ever operated on within the horizon.
pub const SURGERY_PROBABILITY: f64 = 0.05;

pub const SURGERY_NOTE: &str = "Surgery done today";

/// Per-patient surgery schedule, drawn once before the day loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurgeryPlan {
    surgery_day: Option<u32>,
}

impl SurgeryPlan {
    pub fn none() -> Self {
        Self { surgery_day: None }
    }

    pub fn on_day(day: u32) -> Self {
        Self { surgery_day: Some(day) }
    }

    /// Draws the surgery flag and, only when set, the day in
    /// `[1, horizon - 1]` (day 1 for a single-day horizon).
    pub fn sample<R: Rng + ?Sized>(horizon: u32, rng: &mut R) -> SimResult<Self> {
        if horizon == 0 {
            return Err(SimError::Configuration(
                "Surgery plan requires a horizon of at least one day".to_string()
            ));
        }

        if !sample_bernoulli(SURGERY_PROBABILITY, rng)? {
            return Ok(Self::none());
        }

        let last_eligible = horizon.saturating_sub(1).max(1);
        Ok(Self::on_day(rng.gen_range(1..=last_eligible)))
    }

    pub fn surgery_day(&self) -> Option<u32> {
        self.surgery_day
    }

    pub fn is_surgery_day(&self, day: u32) -> bool {
        self.surgery_day == Some(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_surgery_day_within_horizon() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut scheduled = 0;
        for _ in 0..5000 {
            let plan = SurgeryPlan::sample(15, &mut rng).unwrap();
            if let Some(day) = plan.surgery_day() {
                assert!((1..=14).contains(&day));
                scheduled += 1;
            }
        }
        // ~5% of 5000
        assert!(scheduled > 150 && scheduled < 400, "scheduled = {}", scheduled);
    }

    #[test]
    fn test_single_day_horizon_schedules_day_one() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..2000 {
            let plan = SurgeryPlan::sample(1, &mut rng).unwrap();
            if let Some(day) = plan.surgery_day() {
                assert_eq!(day, 1);
            }
        }
    }

    #[test]
    fn test_two_day_horizon_schedules_day_one() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..2000 {
            let plan = SurgeryPlan::sample(2, &mut rng).unwrap();
            assert!(plan.surgery_day().map_or(true, |d| d == 1));
        }
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(matches!(SurgeryPlan::sample(0, &mut rng), Err(SimError::Configuration(_))));
    }

    #[test]
    fn test_is_surgery_day() {
        let plan = SurgeryPlan::on_day(4);
        assert!(plan.is_surgery_day(4));
        assert!(!plan.is_surgery_day(5));
        assert!(!SurgeryPlan::none().is_surgery_day(1));
    }
}
