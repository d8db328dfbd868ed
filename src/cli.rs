use crate::dataset::SensorDataset;
use crate::processing::{ChannelEnsemble, drop_degenerate_rows};
use crate::submission::write_submission;
use crate::types::RunConfig;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Train one KNN per sensor channel, fuse predictions by majority vote and
/// write a submission CSV.
#[derive(Parser, Debug)]
#[command(name = "har-ensemble", version, about)]
pub struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of neighbors for every channel model
    #[arg(short)]
    pub k: Option<usize>,

    /// Root directory containing the LS/ and TS/ splits
    #[arg(long)]
    pub data_path: Option<PathBuf>,

    /// Directory to write the submission into
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Submission file name
    #[arg(long)]
    pub output_name: Option<String>,

    /// Skip the degenerate-row filter
    #[arg(long)]
    pub no_filter: bool,
}

impl Cli {
    /// Resolve the effective configuration: defaults, then the config
    /// file, then individual flags.
    pub fn into_config(self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)?,
            None => RunConfig::default(),
        };
        if let Some(k) = self.k {
            config.k = k;
        }
        if let Some(data_path) = self.data_path {
            config.data_path = data_path;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(output_name) = self.output_name {
            config.output_name = output_name;
        }
        if self.no_filter {
            config.filter = false;
        }
        Ok(config)
    }
}

/// Parse the command line and run the full pipeline.
pub fn run() -> Result<()> {
    let config = Cli::parse().into_config()?;
    run_with_config(&config)
}

/// Execute load -> filter -> fit -> predict -> write with the given
/// configuration.
pub fn run_with_config(config: &RunConfig) -> Result<()> {
    log::info!("loading data from {}", config.data_path.display());
    let mut dataset = SensorDataset::load(&config.data_path)?;

    if config.filter {
        let report = drop_degenerate_rows(&mut dataset);
        log::info!(
            "filter dropped {} training rows ({} zero-variance test rows kept)",
            report.dropped_train,
            report.degenerate_test
        );
    }

    log::info!("fitting {} channel models", dataset.train.len());
    let ensemble = ChannelEnsemble::fit(config.k, &dataset.train, dataset.labels.view())?;

    log::info!("predicting");
    let fused = ensemble.predict(&dataset.test)?;

    let path = write_submission(fused.view(), &config.output_dir, &config.output_name)?;
    println!("Submission saved to {}", path.display());
    Ok(())
}
