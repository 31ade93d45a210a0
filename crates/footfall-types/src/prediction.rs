//! Request and response shapes for the ML prediction service.

use serde::{Deserialize, Serialize};

use crate::error::{EstimateError, RequestError};
use crate::footfall::Footfall;

/// Rolling average sent to the prediction service when the caller has none.
pub const DEFAULT_ROLLING_AVG: f64 = 80_000.0;

/// A footfall prediction request for one location and month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Location name as known to the prediction service (e.g., "Gulmarg").
    pub location: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-based.
    pub month: u32,
    /// Recent average monthly visitors, used as a model feature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolling_avg: Option<f64>,
}

impl PredictionRequest {
    /// Creates a request without a rolling average.
    #[must_use]
    pub fn new(location: impl Into<String>, year: i32, month: u32) -> Self {
        Self {
            location: location.into(),
            year,
            month,
            rolling_avg: None,
        }
    }

    /// Sets the rolling average.
    #[must_use]
    pub fn with_rolling_avg(mut self, rolling_avg: f64) -> Self {
        self.rolling_avg = Some(rolling_avg);
        self
    }

    /// Returns the rolling average, falling back to [`DEFAULT_ROLLING_AVG`].
    ///
    /// Zero and NaN count as missing.
    #[must_use]
    pub fn rolling_avg_or_default(&self) -> f64 {
        self.rolling_avg
            .filter(|avg| avg.abs() > 0.0)
            .unwrap_or(DEFAULT_ROLLING_AVG)
    }

    /// Checks the request before it is sent upstream.
    ///
    /// # Errors
    ///
    /// Returns an error if the location is blank or the month is not 1..=12.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.location.trim().is_empty() {
            return Err(RequestError::MissingLocation);
        }
        if !(1..=12).contains(&self.month) {
            return Err(RequestError::InvalidMonth(self.month));
        }
        Ok(())
    }
}

/// Weather features the model used for a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Weather {
    /// Mean temperature (°C).
    pub temperature_mean: f64,
    /// Maximum temperature (°C).
    pub temperature_max: f64,
    /// Minimum temperature (°C).
    pub temperature_min: f64,
    /// Precipitation (mm).
    pub precipitation: f64,
    /// Snowfall (cm).
    pub snowfall: f64,
    /// Sunshine (hours).
    pub sunshine_hours: f64,
    /// Wind speed (km/h).
    pub wind_speed: f64,
}

/// Holiday features the model used for a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Holidays {
    /// Total holidays in the month.
    pub count: u32,
    /// Long weekends in the month.
    pub long_weekends: u32,
    /// National holidays in the month.
    pub national_holidays: u32,
    /// Festival holidays in the month.
    pub festival_holidays: u32,
}

/// A single footfall prediction returned by the ML service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Location the prediction is for.
    pub location: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-based.
    pub month: u32,
    /// Predicted number of visitors.
    pub predicted_footfall: f64,
    /// Model confidence in `0.0..=1.0`.
    #[serde(default)]
    pub confidence: f64,
    /// Weather features.
    #[serde(default)]
    pub weather: Weather,
    /// Holiday features.
    #[serde(default)]
    pub holidays: Holidays,
    /// Free-text observations from the model.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub insights: Vec<String>,
    /// Free-text planning suggestions from the model.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_suggestions: Vec<String>,
}

impl Prediction {
    /// Returns the predicted footfall as a validated value.
    ///
    /// # Errors
    ///
    /// Returns an error if the service produced a value the planner cannot use.
    pub fn footfall(&self) -> Result<Footfall, EstimateError> {
        Footfall::new(self.predicted_footfall)
    }
}

/// Envelope of a `POST /api/predict` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Whether the service considers the call successful.
    #[serde(default = "default_success")]
    pub success: bool,
    /// The prediction itself.
    pub prediction: Prediction,
    /// Service-side timestamp, passed through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

const fn default_success() -> bool {
    true
}

/// Body of a `GET /api/locations` response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocationList {
    /// Location names the model knows about.
    pub locations: Vec<String>,
}

/// Body of a `GET /api/health` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Reported status, `"healthy"` when the service is up.
    pub status: String,
    /// Whether the model artefacts are loaded.
    #[serde(default)]
    pub model_loaded: bool,
    /// Service-side timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}
