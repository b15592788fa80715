use serde::Serialize;
use crate::model::{Dataset, PatientRecord};

#[derive(Debug, Serialize)]
pub struct CohortSummary {
    pub n_patients: usize,
    pub n_records: usize,
    pub surgeries: usize,
    pub fracture_days: usize,
    pub complication_days: usize,
    pub outcomes: OutcomeSummary,
}

/// Statistics over each patient's last recorded day.
#[derive(Debug, Serialize)]
pub struct OutcomeSummary {
    pub suffering_mean: f64,
    pub suffering_sd: f64,
    pub economic_burden_mean: f64,
    pub economic_burden_sd: f64,
    pub functional_independence_mean: f64,
    pub functional_independence_sd: f64,
    pub mortality_risk_mean: f64,
}

impl CohortSummary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let finals: Vec<&PatientRecord> = dataset.patient_ids()
            .into_iter()
            .filter_map(|id| dataset.trajectory(id).last())
            .collect();

        let suffering: Vec<f64> = finals.iter().map(|r| r.cumulative_suffering).collect();
        let burden: Vec<f64> = finals.iter().map(|r| r.economic_burden).collect();
        let independence: Vec<f64> = finals.iter().map(|r| r.functional_independence).collect();
        let mortality: Vec<f64> = dataset.records().iter().map(|r| r.mortality_risk).collect();

        Self {
            n_patients: finals.len(),
            n_records: dataset.len(),
            surgeries: finals.iter().filter(|r| r.surgery_status).count(),
            fracture_days: dataset.records().iter().filter(|r| r.fracture_event).count(),
            complication_days: dataset.records().iter()
                .filter(|r| r.complications.is_present())
                .count(),
            outcomes: OutcomeSummary {
                suffering_mean: mean(&suffering),
                suffering_sd: std_dev(&suffering),
                economic_burden_mean: mean(&burden),
                economic_burden_sd: std_dev(&burden),
                functional_independence_mean: mean(&independence),
                functional_independence_sd: std_dev(&independence),
                mortality_risk_mean: mean(&mortality),
            },
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        0.0
    } else {
        let mean_val = mean(values);
        let variance = values.iter()
            .map(|v| (v - mean_val).powi(2))
            .sum::<f64>() / (values.len() - 1) as f64;
        variance.sqrt()
    }
}
