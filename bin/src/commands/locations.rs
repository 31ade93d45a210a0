//! Locations command implementation.

use anyhow::{Context, Result};
use footfall_lib::prelude::*;

/// List the locations the ML service can predict for.
pub(crate) async fn list_locations(ml_url: &str) -> Result<()> {
    let client = PredictionClient::new(ClientConfig::with_base_url(ml_url))?;
    let locations = client
        .locations()
        .await
        .with_context(|| format!("Failed to fetch locations from {ml_url}"))?;

    if locations.is_empty() {
        println!("No locations found.");
        return Ok(());
    }

    for location in &locations {
        println!("{location}");
    }
    println!("\nTotal: {} locations", locations.len());
    Ok(())
}
