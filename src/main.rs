use anyhow::Context;
use clap::Parser;
use log::info;
use std::path::PathBuf;

mod config;
mod model;
mod surgery;
mod simulation;
mod output;
mod error;

use crate::config::Config;
use crate::simulation::{CohortSummary, Simulator};

#[derive(Parser)]
#[command(name = "patient_trajectory_sim")]
#[command(about = "Synthetic longitudinal patient trajectory generator")]
struct Cli {
    /// JSON run configuration; command-line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of patients to simulate (1-100)
    #[arg(short = 'n', long = "patients-num")]
    patients: Option<usize>,

    /// Days simulated per patient (1-100)
    #[arg(short, long = "days-interval")]
    days: Option<u32>,

    /// Output directory, created if missing
    #[arg(short, long = "output-dir")]
    output: Option<PathBuf>,

    /// Dataset file name inside the output directory
    #[arg(long)]
    file_name: Option<String>,

    /// Random seed for reproducibility (default 42)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the cohort summary as JSON to stdout
    #[arg(long)]
    summary: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                let config = Config::from_file(path)
                    .with_context(|| format!("failed to load configuration from {:?}", path))?;
                info!("Loaded configuration from {:?}", path);
                config
            }
            None => Config::default(),
        };

        if let Some(patients) = self.patients {
            config.patients_count = patients;
        }
        if let Some(days) = self.days {
            config.days_interval = days;
        }
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if let Some(file_name) = &self.file_name {
            config.file_name = file_name.clone();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("invalid run parameters")?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let config = cli.resolve_config()?;
    let output_path = config.output_path();

    let mut simulator = Simulator::new(config)?;
    info!(
        "Starting patient trajectory simulation (seed: {})",
        simulator.seed()
    );

    let dataset = simulator
        .simulate_cohort()
        .context("cohort simulation failed")?;

    crate::output::save_dataset(&dataset, &output_path)
        .with_context(|| format!("failed to write dataset to {:?}", output_path))?;

    let summary = CohortSummary::from_dataset(&dataset);
    info!(
        "{} patients, {} surgeries, {} fracture days, mean final suffering {:.2}",
        summary.n_patients, summary.surgeries, summary.fracture_days, summary.outcomes.suffering_mean
    );

    if cli.summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
