//! History command implementation.
//!
//! Lists predictions recorded by `predict --save` or by the HTTP host.

use crate::display::{Format, print_records};
use anyhow::{Context, Result};
use footfall_lib::prelude::*;
use std::path::PathBuf;

/// List logged predictions matching the given filters.
pub(crate) fn history(
    store: Option<PathBuf>,
    location: Option<String>,
    year: Option<i32>,
    month: Option<u32>,
    limit: usize,
    format: Format,
) -> Result<()> {
    let store = match store {
        Some(path) => PredictionStore::new(path),
        None => PredictionStore::with_default_path(),
    }
    .context("Failed to open prediction log")?;

    let filter = PredictionFilter {
        location,
        year,
        month,
        limit: Some(limit),
        ..PredictionFilter::new()
    };
    let records = store
        .list(&filter)
        .context("Failed to read prediction log")?;

    print_records(&records, format)
}
