//! Predict command implementation.
//!
//! This module asks the ML service for a footfall prediction and prints the
//! resources needed to serve it.

use crate::display::{Format, print_prediction};
use anyhow::{Context, Result, bail};
use footfall_lib::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::Select;
use std::path::PathBuf;
use std::time::Duration;

/// Request a prediction and print it with its resource plan.
///
/// `save` is `None` to skip logging, `Some(None)` to log to the default
/// directory, or `Some(Some(dir))` to log to `dir`.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn predict(
    ml_url: &str,
    location: Option<String>,
    year: i32,
    month: u32,
    rolling_avg: Option<f64>,
    save: Option<Option<PathBuf>>,
    format: Format,
    quiet: bool,
) -> Result<()> {
    let client = PredictionClient::new(ClientConfig::with_base_url(ml_url))?;

    let location = match location {
        Some(location) => location,
        None => prompt_location(&client).await?,
    };

    let mut request = PredictionRequest::new(location, year, month);
    if let Some(rolling_avg) = rolling_avg {
        request = request.with_rolling_avg(rolling_avg);
    }

    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.set_message(format!(
            "Predicting footfall for {} {}-{:02}",
            request.location, year, month
        ));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };

    let response = client.predict(&request).await;
    spinner.finish_and_clear();
    let response = response.context("Prediction failed")?;

    let footfall = response
        .prediction
        .footfall()
        .context("Prediction service returned an unusable footfall")?;
    let plan = ResourceEstimator::global().plan(footfall);

    print_prediction(&response, &plan, format)?;

    if let Some(path) = save {
        let store = match path {
            Some(path) => PredictionStore::new(path),
            None => PredictionStore::with_default_path(),
        }
        .context("Failed to open prediction log")?;

        let record = PredictionRecord::from_prediction(&response.prediction);
        store.save(&record).context("Failed to save prediction")?;

        if !quiet {
            eprintln!("Saved prediction {}", record.id);
        }
    }

    Ok(())
}

/// Let the user pick a location from the service's list.
async fn prompt_location(client: &PredictionClient) -> Result<String> {
    let locations = client
        .locations()
        .await
        .context("Failed to fetch locations; pass --location instead")?;

    if locations.is_empty() {
        bail!("The prediction service reported no locations.");
    }

    Select::new("Select a location:", locations)
        .prompt()
        .context("Location selection cancelled")
}
