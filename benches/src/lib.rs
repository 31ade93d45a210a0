//! Benchmark fixtures for footfall.

use chrono::{Duration, Utc};
use footfall_store::{PredictionRecord, PredictionStore, StoreError};
use footfall_types::{Holidays, Weather};
use uuid::Uuid;

/// Locations used when generating fixture records.
pub const LOCATIONS: [&str; 6] = [
    "Gulmarg",
    "Pahalgam",
    "Sonamarg",
    "Yusmarg",
    "Doodhpathri",
    "Gurez",
];

/// Footfall values spanning empty sites to peak season.
#[must_use]
pub fn footfall_samples() -> Vec<(&'static str, f64)> {
    vec![
        ("zero", 0.0),
        ("fractional", 0.5),
        ("small", 500.0),
        ("typical", 25_000.0),
        ("peak", 1_250_000.0),
        ("max", 1e12),
    ]
}

/// Writes `count` records spread over locations, months and creation times.
///
/// # Errors
///
/// Returns an error if a record cannot be written.
pub fn seed_store(store: &PredictionStore, count: usize) -> Result<(), StoreError> {
    let now = Utc::now();
    for i in 0..count {
        let record = PredictionRecord {
            id: Uuid::new_v4(),
            location: LOCATIONS[i % LOCATIONS.len()].to_string(),
            year: 2020 + (i / 12 % 6) as i32,
            month: (i % 12) as u32 + 1,
            predicted_footfall: 1_000.0 + (i * 37 % 90_000) as f64,
            confidence: 0.75,
            weather: Weather::default(),
            holidays: Holidays::default(),
            created_at: now - Duration::seconds(i as i64),
        };
        store.save(&record)?;
    }
    Ok(())
}
