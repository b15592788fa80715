use crate::model::{yes_no, Dataset, PatientRecord};
use crate::error::{SimError, SimResult};
use serde::Serialize;
use std::path::Path;
use tempfile::NamedTempFile;
use log::{info, debug};

/// Column order of the emitted dataset.
pub const COLUMNS: [&str; 18] = [
    "Patient_ID", "Day", "Bone_Quality", "Frailty_Level", "Muscle_Strength",
    "Disease_Progression", "Surgery_Status", "Complications", "SFR_Score",
    "FRAX_Score", "Functional_Independence", "Pain_Level", "Economic_Burden",
    "Cumulative_Suffering", "Fracture_Event", "Mortality_Risk", "Decision", "Notes",
];

/// One CSV row; continuous values are rounded here and nowhere else.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Patient_ID")]
    patient_id: u32,
    #[serde(rename = "Day")]
    day: u32,
    #[serde(rename = "Bone_Quality")]
    bone_quality: String,
    #[serde(rename = "Frailty_Level")]
    frailty_level: f64,
    #[serde(rename = "Muscle_Strength")]
    muscle_strength: String,
    #[serde(rename = "Disease_Progression")]
    disease_progression: String,
    #[serde(rename = "Surgery_Status")]
    surgery_status: &'static str,
    #[serde(rename = "Complications")]
    complications: String,
    #[serde(rename = "SFR_Score")]
    sfr_score: f64,
    #[serde(rename = "FRAX_Score")]
    frax_score: f64,
    #[serde(rename = "Functional_Independence")]
    functional_independence: f64,
    #[serde(rename = "Pain_Level")]
    pain_level: u8,
    #[serde(rename = "Economic_Burden")]
    economic_burden: f64,
    #[serde(rename = "Cumulative_Suffering")]
    cumulative_suffering: f64,
    #[serde(rename = "Fracture_Event")]
    fracture_event: &'static str,
    #[serde(rename = "Mortality_Risk")]
    mortality_risk: f64,
    #[serde(rename = "Decision")]
    decision: String,
    #[serde(rename = "Notes")]
    notes: &'a str,
}

impl<'a> From<&'a PatientRecord> for CsvRow<'a> {
    fn from(record: &'a PatientRecord) -> Self {
        CsvRow {
            patient_id: record.patient_id,
            day: record.day,
            bone_quality: record.bone_quality.to_string(),
            frailty_level: round_to(record.frailty_level, 3),
            muscle_strength: record.muscle_strength.to_string(),
            disease_progression: record.disease_stage.to_string(),
            surgery_status: yes_no(record.surgery_status),
            complications: record.complications.to_string(),
            sfr_score: round_to(record.sfr_score, 3),
            frax_score: round_to(record.frax_score, 2),
            functional_independence: round_to(record.functional_independence, 2),
            pain_level: record.pain_level,
            economic_burden: round_to(record.economic_burden, 2),
            cumulative_suffering: round_to(record.cumulative_suffering, 2),
            fracture_event: yes_no(record.fracture_event),
            mortality_risk: round_to(record.mortality_risk, 3),
            decision: record.decision.to_string(),
            notes: &record.notes,
        }
    }
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Writes the dataset as CSV to `path`, creating the parent directory and
/// replacing any existing file. The rows go to a temporary file in the
/// same directory which is renamed over `path` only once fully synced, so
/// a failure never leaves a partial artifact behind.
pub fn save_dataset<P: AsRef<Path>>(dataset: &Dataset, path: P) -> SimResult<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    debug!("Writing {} records to temporary file {:?}", dataset.len(), temp.path());

    {
        let mut writer = csv::Writer::from_writer(temp.as_file_mut());
        if dataset.is_empty() {
            writer.write_record(COLUMNS)?;
        }
        for record in dataset.records() {
            writer.serialize(CsvRow::from(record))?;
        }
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| SimError::Io(e.error))?;

    info!("Dataset with {} records saved to {:?}", dataset.len(), path);
    Ok(())
}
