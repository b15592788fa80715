//! Daily transition rules.
//!
//! Each rule reads and updates one patient's state for a single day.
//! The rules run in [`TransitionRule::ORDER`]; that order also fixes how
//! the seeded random stream is consumed, so changing it changes every
//! generated dataset.

use rand::Rng;
use crate::error::SimResult;
use crate::model::{
    BoneQuality, Complications, Decision, MuscleStrength, PatientState,
    FRAILTY_RANGE, FRAX_RANGE, FUNCTIONAL_INDEPENDENCE_FLOOR, MAX_PAIN, SFR_RANGE,
};
use crate::surgery::{SurgeryPlan, SURGERY_NOTE};
use super::variability::{pick_uniform, pick_weighted, sample_bernoulli, sample_uniform, vary_value};

pub const BONE_REROLL_PROBABILITY: f64 = 0.05;
pub const MUSCLE_REROLL_PROBABILITY: f64 = 0.1;
pub const PROGRESSION_PROBABILITY: f64 = 0.1;

pub const FRAILTY_MAX_CHANGE: f64 = 0.05;
pub const SFR_MAX_CHANGE: f64 = 0.02;
pub const FRAX_MAX_CHANGE: f64 = 1.0;

/// First day on which an operated patient loses function faster.
pub const POST_OP_DECLINE_DAY: u32 = 5;
/// First day on which an uncomplicated operated patient improves.
pub const POST_OP_RELIEF_DAY: u32 = 6;

pub const MIN_FRACTURE_PROBABILITY: f64 = 0.01;
pub const BASE_MORTALITY: f64 = 0.01;
pub const STAGE_MORTALITY: f64 = 0.05;
pub const FRACTURE_MORTALITY: f64 = 0.1;
pub const COMPLICATION_MORTALITY: f64 = 0.1;

/// Per-day inputs that are not part of the patient state.
#[derive(Debug, Clone, Copy)]
pub struct DayContext<'a> {
    pub day: u32,
    pub plan: &'a SurgeryPlan,
}

impl DayContext<'_> {
    fn post_op_since(&self, state: &PatientState, from_day: u32) -> bool {
        state.surgery_status && self.day >= from_day
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionRule {
    SurgeryTrigger,
    Complications,
    BoneQualityDrift,
    FrailtyDrift,
    MuscleStrengthDrift,
    DiseaseProgression,
    SfrDrift,
    FraxDrift,
    FunctionalDecline,
    Pain,
    Suffering,
    EconomicBurden,
    Fracture,
    Mortality,
}

impl TransitionRule {
    pub const ORDER: [TransitionRule; 14] = [
        TransitionRule::SurgeryTrigger,
        TransitionRule::Complications,
        TransitionRule::BoneQualityDrift,
        TransitionRule::FrailtyDrift,
        TransitionRule::MuscleStrengthDrift,
        TransitionRule::DiseaseProgression,
        TransitionRule::SfrDrift,
        TransitionRule::FraxDrift,
        TransitionRule::FunctionalDecline,
        TransitionRule::Pain,
        TransitionRule::Suffering,
        TransitionRule::EconomicBurden,
        TransitionRule::Fracture,
        TransitionRule::Mortality,
    ];

    pub fn apply<R: Rng + ?Sized>(
        self,
        state: &mut PatientState,
        ctx: &DayContext<'_>,
        rng: &mut R,
    ) -> SimResult<()> {
        match self {
            TransitionRule::SurgeryTrigger => {
                trigger_surgery(state, ctx);
                Ok(())
            }
            TransitionRule::Complications => resample_complications(state, rng),
            TransitionRule::BoneQualityDrift => drift_bone_quality(state, rng),
            TransitionRule::FrailtyDrift => {
                drift_frailty(state, rng);
                Ok(())
            }
            TransitionRule::MuscleStrengthDrift => drift_muscle_strength(state, rng),
            TransitionRule::DiseaseProgression => progress_disease(state, rng),
            TransitionRule::SfrDrift => {
                drift_sfr(state, rng);
                Ok(())
            }
            TransitionRule::FraxDrift => {
                drift_frax(state, rng);
                Ok(())
            }
            TransitionRule::FunctionalDecline => decline_function(state, ctx, rng),
            TransitionRule::Pain => update_pain(state, ctx, rng),
            TransitionRule::Suffering => {
                accumulate_suffering(state);
                Ok(())
            }
            TransitionRule::EconomicBurden => accrue_cost(state, rng),
            TransitionRule::Fracture => sample_fracture(state, rng),
            TransitionRule::Mortality => {
                state.mortality_risk = mortality_risk(state);
                Ok(())
            }
        }
    }
}

/// Sets the sticky surgery flag on the scheduled day and resets the
/// day's decision labels otherwise. Never clears `surgery_status`.
pub fn trigger_surgery(state: &mut PatientState, ctx: &DayContext<'_>) {
    if ctx.plan.is_surgery_day(ctx.day) {
        state.surgery_status = true;
        state.decision = Decision::Surgery;
        state.notes = SURGERY_NOTE.to_string();
    } else {
        state.decision = Decision::Wait;
        state.notes.clear();
    }
}

/// Fresh draw every post-operative day; complications do not persist.
pub fn resample_complications<R: Rng + ?Sized>(state: &mut PatientState, rng: &mut R) -> SimResult<()> {
    if state.surgery_status {
        state.complications = pick_weighted(&Complications::DAILY_WEIGHTS, rng)?;
    }
    Ok(())
}

pub fn drift_bone_quality<R: Rng + ?Sized>(state: &mut PatientState, rng: &mut R) -> SimResult<()> {
    if sample_bernoulli(BONE_REROLL_PROBABILITY, rng)? {
        state.bone_quality = pick_uniform(&BoneQuality::ALL, rng)?;
    }
    Ok(())
}

pub fn drift_frailty<R: Rng + ?Sized>(state: &mut PatientState, rng: &mut R) {
    let (low, high) = FRAILTY_RANGE;
    state.frailty_level = vary_value(state.frailty_level, low, high, FRAILTY_MAX_CHANGE, rng);
}

pub fn drift_muscle_strength<R: Rng + ?Sized>(state: &mut PatientState, rng: &mut R) -> SimResult<()> {
    if sample_bernoulli(MUSCLE_REROLL_PROBABILITY, rng)? {
        state.muscle_strength = pick_uniform(&MuscleStrength::ALL, rng)?;
    }
    Ok(())
}

/// Advances at most one stage; the terminal stage absorbs.
pub fn progress_disease<R: Rng + ?Sized>(state: &mut PatientState, rng: &mut R) -> SimResult<()> {
    if state.disease_stage.is_terminal() {
        return Ok(());
    }
    if sample_bernoulli(PROGRESSION_PROBABILITY, rng)? {
        if let Some(next) = state.disease_stage.next() {
            state.disease_stage = next;
        }
    }
    Ok(())
}

pub fn drift_sfr<R: Rng + ?Sized>(state: &mut PatientState, rng: &mut R) {
    let (low, high) = SFR_RANGE;
    state.sfr_score = vary_value(state.sfr_score, low, high, SFR_MAX_CHANGE, rng);
}

pub fn drift_frax<R: Rng + ?Sized>(state: &mut PatientState, rng: &mut R) {
    let (low, high) = FRAX_RANGE;
    state.frax_score = vary_value(state.frax_score, low, high, FRAX_MAX_CHANGE, rng);
}

pub fn decline_function<R: Rng + ?Sized>(
    state: &mut PatientState,
    ctx: &DayContext<'_>,
    rng: &mut R,
) -> SimResult<()> {
    let loss = if ctx.post_op_since(state, POST_OP_DECLINE_DAY) {
        sample_uniform(5.0, 10.0, rng)?
    } else {
        sample_uniform(0.0, 3.0, rng)?
    };
    state.functional_independence =
        (state.functional_independence - loss).max(FUNCTIONAL_INDEPENDENCE_FLOOR);
    Ok(())
}

/// Uncomplicated recovery relieves pain by one point a day; otherwise
/// pain creeps up by zero or one.
pub fn update_pain<R: Rng + ?Sized>(
    state: &mut PatientState,
    ctx: &DayContext<'_>,
    rng: &mut R,
) -> SimResult<()> {
    let recovering = ctx.post_op_since(state, POST_OP_RELIEF_DAY) && !state.complications.is_present();
    if recovering {
        state.pain_level = state.pain_level.saturating_sub(1);
    } else {
        let step = u8::from(sample_bernoulli(0.5, rng)?);
        state.pain_level = (state.pain_level + step).min(MAX_PAIN);
    }
    Ok(())
}

pub fn accumulate_suffering(state: &mut PatientState) {
    state.cumulative_suffering += f64::from(state.pain_level) * (1.0 + state.frailty_level);
}

pub fn accrue_cost<R: Rng + ?Sized>(state: &mut PatientState, rng: &mut R) -> SimResult<()> {
    state.economic_burden += sample_uniform(50.0, 200.0, rng)?;
    Ok(())
}

/// Daily fracture probability from biomechanical instability, FRAX and frailty.
pub fn fracture_probability(state: &PatientState) -> f64 {
    let p = 0.05 * (1.0 - state.sfr_score)
        + 0.03 * (state.frax_score / 30.0)
        + 0.1 * state.frailty_level;
    p.max(MIN_FRACTURE_PROBABILITY)
}

pub fn sample_fracture<R: Rng + ?Sized>(state: &mut PatientState, rng: &mut R) -> SimResult<()> {
    state.fracture_event = sample_bernoulli(fracture_probability(state), rng)?;
    Ok(())
}

/// Day-local estimate; never terminates the trajectory.
pub fn mortality_risk(state: &PatientState) -> f64 {
    let mut risk = BASE_MORTALITY + STAGE_MORTALITY * state.disease_stage.severity();
    if state.fracture_event {
        risk += FRACTURE_MORTALITY;
    }
    if state.complications.is_present() {
        risk += COMPLICATION_MORTALITY;
    }
    risk
}
