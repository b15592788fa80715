use rand::Rng;
use log::debug;
use crate::error::SimResult;
use crate::model::{PatientRecord, PatientState};
use crate::surgery::SurgeryPlan;
use super::rules::{DayContext, TransitionRule};

/// Evolves one patient through `horizon` days.
#[derive(Debug, Clone, Copy)]
pub struct TrajectoryGenerator {
    patient_id: u32,
    horizon: u32,
}

impl TrajectoryGenerator {
    pub fn new(patient_id: u32, horizon: u32) -> Self {
        Self { patient_id, horizon }
    }

    /// Samples the day-0 baseline and surgery plan, then emits one record
    /// per day `1..=horizon`. Patients always complete the full horizon.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> SimResult<Vec<PatientRecord>> {
        let mut state = PatientState::sample_initial(rng)?;
        let plan = SurgeryPlan::sample(self.horizon, rng)?;

        if let Some(day) = plan.surgery_day() {
            debug!("Patient {} scheduled for surgery on day {}", self.patient_id, day);
        }

        self.evolve(&mut state, &plan, rng)
    }

    pub fn evolve<R: Rng + ?Sized>(
        &self,
        state: &mut PatientState,
        plan: &SurgeryPlan,
        rng: &mut R,
    ) -> SimResult<Vec<PatientRecord>> {
        let mut records = Vec::with_capacity(self.horizon as usize);

        for day in 1..=self.horizon {
            let ctx = DayContext { day, plan };
            for rule in TransitionRule::ORDER {
                rule.apply(state, &ctx, rng)?;
            }
            records.push(state.snapshot(self.patient_id, day));
        }

        Ok(records)
    }
}
