//! Ratio table used to size resources.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Embedded JSON ratio table.
const RATIOS_JSON: &str = include_str!("../data/ratios.json");

/// Static ratio table instance.
static RATIOS: OnceLock<RatioTable> = OnceLock::new();

/// Errors raised when a ratio table is malformed.
#[derive(Error, Debug)]
pub enum RatioError {
    /// The JSON document could not be parsed.
    #[error("Failed to parse ratio table: {0}")]
    Parse(#[from] serde_json::Error),

    /// A divisor is zero.
    #[error("Ratio '{0}' must be greater than zero")]
    ZeroDivisor(&'static str),

    /// Role or vehicle shares do not add up to the whole.
    #[error("Shares for {group} must sum to 100%, got {sum}%")]
    SharesMismatch {
        /// The group whose shares are off ("staff" or "transport").
        group: &'static str,
        /// Actual sum of the percentages.
        sum: u64,
    },

    /// A percentage is above 100.
    #[error("Percentage '{name}' must not exceed 100, got {value}")]
    PercentOutOfRange {
        /// Name of the offending field.
        name: &'static str,
        /// The value supplied.
        value: u64,
    },
}

/// How staff headcount is split across roles, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffShares {
    /// Tour guides.
    pub guides: u64,
    /// Security personnel.
    pub security: u64,
    /// Support staff.
    pub support: u64,
}

/// How vehicles are split across types, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportShares {
    /// Buses.
    pub buses: u64,
    /// Vans.
    pub vans: u64,
    /// Taxis.
    pub taxis: u64,
}

/// Headcount ratios for staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRatios {
    /// Visitors served by one staff member.
    pub visitors_per_unit: u64,
    /// Cost of one staff member for the period.
    pub cost_per_unit: u64,
    /// Split across roles.
    pub shares_percent: StaffShares,
}

/// Fleet ratios for transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportRatios {
    /// Visitors served by one vehicle.
    pub visitors_per_unit: u64,
    /// Cost of one vehicle for the period.
    pub cost_per_unit: u64,
    /// Split across vehicle types.
    pub shares_percent: TransportShares,
}

/// Lodging ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccommodationRatios {
    /// Share of visitors staying overnight, in percent.
    pub overnight_percent: u64,
    /// Guests sharing one room.
    pub guests_per_room: u64,
    /// Rooms provided by one hotel.
    pub rooms_per_hotel: u64,
}

/// Budget ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRatios {
    /// Site maintenance cost per visitor.
    pub maintenance_per_visitor: u64,
    /// Emergency reserve on top of the subtotal, in percent.
    pub emergency_percent: u64,
}

/// Complete set of ratios used by the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioTable {
    /// Staff ratios.
    pub staff: StaffRatios,
    /// Transport ratios.
    pub transport: TransportRatios,
    /// Accommodation ratios.
    pub accommodation: AccommodationRatios,
    /// Budget ratios.
    pub budget: BudgetRatios,
}

impl RatioTable {
    /// Returns the global ratio table instance.
    ///
    /// This lazily initializes the table from embedded JSON on first access.
    #[must_use]
    pub fn global() -> &'static Self {
        RATIOS.get_or_init(|| {
            Self::from_json(RATIOS_JSON).expect("embedded ratios.json should be valid")
        })
    }

    /// Creates a ratio table from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or the ratios fail validation.
    pub fn from_json(json: &str) -> Result<Self, RatioError> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Checks that every divisor is non-zero and every share set is whole.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), RatioError> {
        let divisors = [
            ("staff.visitors_per_unit", self.staff.visitors_per_unit),
            ("transport.visitors_per_unit", self.transport.visitors_per_unit),
            ("accommodation.guests_per_room", self.accommodation.guests_per_room),
            ("accommodation.rooms_per_hotel", self.accommodation.rooms_per_hotel),
        ];
        if let Some((name, _)) = divisors.iter().find(|(_, value)| *value == 0) {
            return Err(RatioError::ZeroDivisor(*name));
        }

        let overnight = self.accommodation.overnight_percent;
        if overnight > 100 {
            return Err(RatioError::PercentOutOfRange {
                name: "accommodation.overnight_percent",
                value: overnight,
            });
        }

        let staff = self.staff.shares_percent;
        let staff_sum = staff.guides + staff.security + staff.support;
        if staff_sum != 100 {
            return Err(RatioError::SharesMismatch {
                group: "staff",
                sum: staff_sum,
            });
        }

        let transport = self.transport.shares_percent;
        let transport_sum = transport.buses + transport.vans + transport.taxis;
        if transport_sum != 100 {
            return Err(RatioError::SharesMismatch {
                group: "transport",
                sum: transport_sum,
            });
        }

        Ok(())
    }
}

impl Default for RatioTable {
    fn default() -> Self {
        *Self::global()
    }
}
