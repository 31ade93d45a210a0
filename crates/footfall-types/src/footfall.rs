//! Validated visitor counts.

use std::str::FromStr;

use derive_more::{Display, Into};
use serde::{Deserialize, Serialize};

use crate::error::{EstimateError, InvalidFootfall};

/// Predicted number of visitors to a location for a period.
///
/// Always finite and within `0.0..=Footfall::MAX`. Fractional values are
/// allowed since model output is not necessarily integral.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Display, Into, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Footfall(f64);

impl Footfall {
    /// No visitors.
    pub const ZERO: Self = Self(0.0);

    /// Largest footfall the planner accepts.
    pub const MAX: f64 = 1e12;

    /// Validates a raw visitor count.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::InvalidInput`] if the value is NaN, infinite,
    /// negative or larger than [`Footfall::MAX`].
    pub fn new(value: f64) -> Result<Self, EstimateError> {
        if !value.is_finite() {
            return Err(InvalidFootfall::NonFinite.into());
        }
        if value < 0.0 {
            return Err(InvalidFootfall::Negative.into());
        }
        if value > Self::MAX {
            return Err(InvalidFootfall::TooLarge.into());
        }
        // Normalise -0.0 so serialized output never carries a sign.
        Ok(Self(value + 0.0))
    }

    /// Returns the raw visitor count.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Returns true if no visitors are expected.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl TryFrom<f64> for Footfall {
    type Error = EstimateError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Footfall {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .replace(['_', ','], "")
            .parse()
            .map_err(|_| EstimateError::from(InvalidFootfall::NonNumeric))?;
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_accepts_zero_and_fractions() {
        assert!(Footfall::new(0.0).unwrap().is_zero());
        assert_relative_eq!(Footfall::new(12.5).unwrap().get(), 12.5);
        assert_relative_eq!(Footfall::new(Footfall::MAX).unwrap().get(), 1e12);
    }

    #[test]
    fn test_negative_zero_is_normalised() {
        let footfall = Footfall::new(-0.0).unwrap();
        assert!(footfall.get().is_sign_positive());
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert_eq!(
            Footfall::new(-1.0).unwrap_err().reason(),
            InvalidFootfall::Negative
        );
        assert_eq!(
            Footfall::new(f64::NAN).unwrap_err().reason(),
            InvalidFootfall::NonFinite
        );
        assert_eq!(
            Footfall::new(f64::INFINITY).unwrap_err().reason(),
            InvalidFootfall::NonFinite
        );
        assert_eq!(
            Footfall::new(1e13).unwrap_err().reason(),
            InvalidFootfall::TooLarge
        );
    }

    #[test]
    fn test_parse_from_str() {
        let footfall: Footfall = "25,000".parse().unwrap();
        assert_relative_eq!(footfall.get(), 25_000.0);

        let footfall: Footfall = " 1_000 ".parse().unwrap();
        assert_relative_eq!(footfall.get(), 1_000.0);

        let err = "lots".parse::<Footfall>().unwrap_err();
        assert_eq!(err.reason(), InvalidFootfall::NonNumeric);
    }

    #[test]
    fn test_serde_validates() {
        let footfall: Footfall = serde_json::from_str("1000").unwrap();
        assert_relative_eq!(footfall.get(), 1000.0);
        assert_eq!(serde_json::to_string(&footfall).unwrap(), "1000.0");

        assert!(serde_json::from_str::<Footfall>("-5").is_err());
        assert!(serde_json::from_str::<Footfall>("\"5\"").is_err());
    }

    #[test]
    fn test_display_and_into() {
        let footfall = Footfall::new(42.0).unwrap();
        assert_eq!(footfall.to_string(), "42");
        let raw: f64 = footfall.into();
        assert_relative_eq!(raw, 42.0);
    }
}
