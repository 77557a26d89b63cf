use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use inflation_hub::config::DEFAULT_SETTINGS_PATH;
use inflation_hub::{HubError, run_pipeline_from_settings};
use log::{error, info};

/// Exit status when inputs or settings are missing, as opposed to a failed run
const SETUP_EXIT_CODE: u8 = 2;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH), PathBuf::from);

    match run(&settings_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            let setup = err
                .downcast_ref::<HubError>()
                .is_some_and(HubError::is_setup_error);
            if setup {
                error!("Check the settings file and the raw extract location before rerunning");
                ExitCode::from(SETUP_EXIT_CODE)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(settings_path: &Path) -> anyhow::Result<()> {
    info!("Running pipeline with settings from {}", settings_path.display());
    let start = Instant::now();

    let report = run_pipeline_from_settings(settings_path)
        .with_context(|| format!("pipeline failed for settings {}", settings_path.display()))?;

    info!(
        "Pipeline finished: {} rows, {} countries in {:?}",
        report.rows_processed,
        report.countries,
        start.elapsed()
    );
    println!("{}", report.to_json()?);

    Ok(())
}
