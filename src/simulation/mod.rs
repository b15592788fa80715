pub mod cohort;
pub mod rules;
pub mod trajectory;
pub mod variability;

use crate::config::Config;
use crate::error::SimResult;
use crate::model::Dataset;
use rand::SeedableRng;
use rand::rngs::StdRng;
use log::{info, debug};

pub use cohort::*;
pub use trajectory::*;

/// First identifier handed out to a simulated patient.
pub const PATIENT_ID_OFFSET: u32 = 100;

/// Cohort driver. Owns the single seeded random stream that every patient
/// draws from in patient-major, day-minor, rule order.
pub struct Simulator {
    config: Config,
    seed: u64,
    rng: StdRng,
}

impl Simulator {
    /// Validates the run parameters before any draw is made. Without an
    /// explicit seed one is taken from OS entropy and kept for replay.
    pub fn new(config: Config) -> SimResult<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let rng = StdRng::seed_from_u64(seed);

        Ok(Self { config, seed, rng })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn simulate_cohort(&mut self) -> SimResult<Dataset> {
        self.config.validate()?;

        let n_patients = self.config.patients_count;
        let horizon = self.config.days_interval;
        info!(
            "Starting cohort simulation for {} patients over {} days (seed: {})",
            n_patients, horizon, self.seed
        );

        let mut dataset = Dataset::with_capacity(n_patients * horizon as usize);

        for (index, patient_id) in (PATIENT_ID_OFFSET..).take(n_patients).enumerate() {
            let ordinal = index + 1;
            if ordinal % 10 == 0 || ordinal <= 10 {
                info!("Simulating patient {}/{}", ordinal, n_patients);
            }
            debug!("Simulating patient id {}", patient_id);

            let trajectory = TrajectoryGenerator::new(patient_id, horizon).run(&mut self.rng)?;
            dataset.extend_patient(trajectory);
        }

        info!("Cohort simulation completed: {} records", dataset.len());
        Ok(dataset)
    }
}
