pub mod categories;

use rand::Rng;
use crate::error::SimResult;
use crate::simulation::variability::{pick_weighted, sample_uniform};

pub use categories::*;

pub const FRAILTY_RANGE: (f64, f64) = (0.0, 1.0);
pub const SFR_RANGE: (f64, f64) = (0.1, 0.7);
pub const FRAX_RANGE: (f64, f64) = (1.0, 30.0);
pub const FUNCTIONAL_INDEPENDENCE_FLOOR: f64 = 30.0;
pub const MAX_PAIN: u8 = 10;

/// Mutable clinical state of one simulated patient.
///
/// Created once at day 0 and mutated in place by the transition rules.
/// `decision` and `notes` are rewritten every day and carry nothing over.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientState {
    pub bone_quality: BoneQuality,
    pub muscle_strength: MuscleStrength,
    pub disease_stage: DiseaseStage,
    pub frailty_level: f64,
    pub sfr_score: f64,
    pub frax_score: f64,
    pub functional_independence: f64,
    pub pain_level: u8,
    pub surgery_status: bool,
    pub complications: Complications,
    pub economic_burden: f64,
    pub cumulative_suffering: f64,
    pub fracture_event: bool,
    pub mortality_risk: f64,
    pub decision: Decision,
    pub notes: String,
}

impl PatientState {
    /// Day-0 baseline. Draw order is fixed and part of the seeded stream.
    pub fn sample_initial<R: Rng + ?Sized>(rng: &mut R) -> SimResult<Self> {
        let bone_quality = pick_weighted(&BoneQuality::INITIAL_WEIGHTS, rng)?;
        let frailty_level = sample_uniform(0.0, 1.0, rng)?;
        let muscle_strength = pick_weighted(&MuscleStrength::INITIAL_WEIGHTS, rng)?;
        let disease_stage = pick_weighted(&DiseaseStage::INITIAL_WEIGHTS, rng)?;
        let sfr_score = sample_uniform(0.2, 0.6, rng)?;
        let frax_score = sample_uniform(5.0, 20.0, rng)?;
        let functional_independence = sample_uniform(70.0, 100.0, rng)?;
        let pain_level = rng.gen_range(0..=4);

        Ok(Self {
            bone_quality,
            muscle_strength,
            disease_stage,
            frailty_level,
            sfr_score,
            frax_score,
            functional_independence,
            pain_level,
            surgery_status: false,
            complications: Complications::No,
            economic_burden: 0.0,
            cumulative_suffering: 0.0,
            fracture_event: false,
            mortality_risk: 0.0,
            decision: Decision::Wait,
            notes: String::new(),
        })
    }

    pub fn snapshot(&self, patient_id: u32, day: u32) -> PatientRecord {
        PatientRecord {
            patient_id,
            day,
            bone_quality: self.bone_quality,
            frailty_level: self.frailty_level,
            muscle_strength: self.muscle_strength,
            disease_stage: self.disease_stage,
            surgery_status: self.surgery_status,
            complications: self.complications,
            sfr_score: self.sfr_score,
            frax_score: self.frax_score,
            functional_independence: self.functional_independence,
            pain_level: self.pain_level,
            economic_burden: self.economic_burden,
            cumulative_suffering: self.cumulative_suffering,
            fracture_event: self.fracture_event,
            mortality_risk: self.mortality_risk,
            decision: self.decision,
            notes: self.notes.clone(),
        }
    }
}

/// Immutable patient-day row at full precision; rounding happens on emission.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientRecord {
    pub patient_id: u32,
    pub day: u32,
    pub bone_quality: BoneQuality,
    pub frailty_level: f64,
    pub muscle_strength: MuscleStrength,
    pub disease_stage: DiseaseStage,
    pub surgery_status: bool,
    pub complications: Complications,
    pub sfr_score: f64,
    pub frax_score: f64,
    pub functional_independence: f64,
    pub pain_level: u8,
    pub economic_burden: f64,
    pub cumulative_suffering: f64,
    pub fracture_event: bool,
    pub mortality_risk: f64,
    pub decision: Decision,
    pub notes: String,
}

/// Patient-major, day-minor sequence of records for a whole cohort.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<PatientRecord>,
}

impl Dataset {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn extend_patient(&mut self, trajectory: Vec<PatientRecord>) {
        self.records.extend(trajectory);
    }

    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct patient ids in emission order.
    pub fn patient_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = Vec::new();
        for record in &self.records {
            if ids.last() != Some(&record.patient_id) {
                ids.push(record.patient_id);
            }
        }
        ids
    }

    /// All days of one patient.
    pub fn trajectory(&self, patient_id: u32) -> impl Iterator<Item = &PatientRecord> {
        self.records.iter().filter(move |r| r.patient_id == patient_id)
    }
}
