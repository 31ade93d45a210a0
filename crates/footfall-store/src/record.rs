//! Stored prediction records and listing filters.

use chrono::{DateTime, Utc};
use footfall_types::{EstimateError, Footfall, Holidays, Prediction, Weather};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a stored prediction.
pub type RecordId = Uuid;

/// Number of records returned by a listing when no limit is given.
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// A prediction as written to the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Unique identifier for this record.
    pub id: RecordId,
    /// Location the prediction is for.
    pub location: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-based.
    pub month: u32,
    /// Predicted number of visitors.
    pub predicted_footfall: f64,
    /// Model confidence in `0.0..=1.0`.
    pub confidence: f64,
    /// Weather features the model used.
    #[serde(default)]
    pub weather: Weather,
    /// Holiday features the model used.
    #[serde(default)]
    pub holidays: Holidays,
    /// Timestamp when the record was created.
    pub created_at: DateTime<Utc>,
}

impl PredictionRecord {
    /// Creates a fresh record from a service prediction.
    #[must_use]
    pub fn from_prediction(prediction: &Prediction) -> Self {
        Self {
            id: Uuid::new_v4(),
            location: prediction.location.clone(),
            year: prediction.year,
            month: prediction.month,
            predicted_footfall: prediction.predicted_footfall,
            confidence: prediction.confidence,
            weather: prediction.weather,
            holidays: prediction.holidays,
            created_at: Utc::now(),
        }
    }

    /// Returns the stored footfall as a validated value.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value cannot be planned for, e.g. a
    /// hand-edited file with a negative count.
    pub fn footfall(&self) -> Result<Footfall, EstimateError> {
        Footfall::new(self.predicted_footfall)
    }
}

/// Filter applied when listing records.
///
/// Unset fields match everything. Location comparison ignores ASCII case and
/// both creation bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PredictionFilter {
    /// Only records for this location.
    pub location: Option<String>,
    /// Only records for this year.
    pub year: Option<i32>,
    /// Only records for this month.
    pub month: Option<u32>,
    /// Only records created at or after this instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_after: Option<DateTime<Utc>>,
    /// Only records created at or before this instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_before: Option<DateTime<Utc>>,
    /// Maximum number of records, [`DEFAULT_LIST_LIMIT`] when unset.
    pub limit: Option<usize>,
}

impl PredictionFilter {
    /// Creates a filter that matches every record.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            location: None,
            year: None,
            month: None,
            created_after: None,
            created_before: None,
            limit: None,
        }
    }

    /// Restricts the filter to one location.
    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Restricts the filter to one year.
    #[must_use]
    pub const fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Restricts the filter to one month.
    #[must_use]
    pub const fn month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    /// Drops records created before `at`.
    #[must_use]
    pub const fn created_after(mut self, at: DateTime<Utc>) -> Self {
        self.created_after = Some(at);
        self
    }

    /// Drops records created after `at`.
    #[must_use]
    pub const fn created_before(mut self, at: DateTime<Utc>) -> Self {
        self.created_before = Some(at);
        self
    }

    /// Caps the number of records returned.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns the effective limit.
    #[must_use]
    pub fn limit_or_default(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIST_LIMIT)
    }

    /// Returns true if the record passes every set criterion.
    #[must_use]
    pub fn matches(&self, record: &PredictionRecord) -> bool {
        self.location
            .as_deref()
            .is_none_or(|location| record.location.eq_ignore_ascii_case(location.trim()))
            && self.year.is_none_or(|year| record.year == year)
            && self.month.is_none_or(|month| record.month == month)
            && self.created_after.is_none_or(|at| record.created_at >= at)
            && self.created_before.is_none_or(|at| record.created_at <= at)
    }
}
