//! Resource estimation logic.

use std::sync::OnceLock;

use footfall_types::{
    AccommodationPlan, BudgetPlan, EstimateError, Footfall, ResourcePlan, StaffPlan, TransportPlan,
};

use crate::data::{RatioError, RatioTable};

/// Static estimator instance.
static ESTIMATOR: OnceLock<ResourceEstimator> = OnceLock::new();

/// Sizes staff, transport, accommodation and budget from a footfall.
///
/// Estimation is pure: no I/O, no hidden state, and the same footfall always
/// yields the same plan. The estimator is `Send + Sync` and can be shared
/// freely across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEstimator {
    ratios: RatioTable,
}

impl ResourceEstimator {
    /// Creates an estimator with a custom ratio table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table fails validation.
    pub fn new(ratios: RatioTable) -> Result<Self, RatioError> {
        ratios.validate()?;
        Ok(Self { ratios })
    }

    /// Returns the global estimator using the embedded ratio table.
    #[must_use]
    pub fn global() -> &'static Self {
        ESTIMATOR.get_or_init(|| Self {
            ratios: *RatioTable::global(),
        })
    }

    /// Returns the ratio table in use.
    #[must_use]
    pub const fn ratios(&self) -> &RatioTable {
        &self.ratios
    }

    /// Estimates resources for a raw footfall value.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::InvalidInput`] if `footfall` is negative,
    /// NaN, infinite or above [`Footfall::MAX`].
    pub fn estimate(&self, footfall: f64) -> Result<ResourcePlan, EstimateError> {
        Footfall::new(footfall).map(|footfall| self.plan(footfall))
    }

    /// Computes the plan for an already validated footfall.
    #[must_use]
    pub fn plan(&self, footfall: Footfall) -> ResourcePlan {
        let visitors = footfall.get();
        let ratios = &self.ratios;

        let staff_total = ceil_ratio(visitors, ratios.staff.visitors_per_unit);
        let staff_shares = ratios.staff.shares_percent;
        let staff = StaffPlan {
            total: staff_total,
            guides: ceil_percent(staff_total, staff_shares.guides),
            security: ceil_percent(staff_total, staff_shares.security),
            support: ceil_percent(staff_total, staff_shares.support),
        };

        let vehicles = ceil_ratio(visitors, ratios.transport.visitors_per_unit);
        let vehicle_shares = ratios.transport.shares_percent;
        let transport = TransportPlan {
            total: vehicles,
            buses: ceil_percent(vehicles, vehicle_shares.buses),
            vans: ceil_percent(vehicles, vehicle_shares.vans),
            taxis: ceil_percent(vehicles, vehicle_shares.taxis),
        };

        // rooms = ceil(visitors * overnight% / guests_per_room), kept as one
        // division so integral footfalls stay exact.
        let lodging = ratios.accommodation;
        let rooms = ceil_ratio(
            visitors * lodging.overnight_percent as f64,
            lodging.guests_per_room.saturating_mul(100),
        );
        let accommodation = AccommodationPlan {
            rooms,
            hotels: rooms.div_ceil(lodging.rooms_per_hotel),
        };

        let staff_cost = staff_total.saturating_mul(ratios.staff.cost_per_unit);
        let transport_cost = vehicles.saturating_mul(ratios.transport.cost_per_unit);
        let maintenance = (visitors * ratios.budget.maintenance_per_visitor as f64).round() as u64;
        let subtotal = staff_cost
            .saturating_add(transport_cost)
            .saturating_add(maintenance);
        let emergency = round_percent(subtotal, ratios.budget.emergency_percent);

        let budget = BudgetPlan {
            total: subtotal.saturating_add(emergency),
            staff: staff_cost,
            transport: transport_cost,
            maintenance,
            emergency,
        };

        ResourcePlan {
            staff,
            transport,
            accommodation,
            budget,
        }
    }

    /// Formats a rupee amount with Indian digit grouping (e.g., "₹1,50,93,750").
    #[must_use]
    pub fn format_rupees(amount: u64) -> String {
        format!("₹{}", Self::format_count(amount))
    }

    /// Formats a count with Indian digit grouping (e.g., "12,50,000").
    ///
    /// The last three digits form one group; the remainder is grouped in pairs.
    #[must_use]
    pub fn format_count(value: u64) -> String {
        let digits = value.to_string();
        if digits.len() <= 3 {
            return digits;
        }

        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);
        for (i, ch) in head.chars().enumerate() {
            if i > 0 && (head.len() - i) % 2 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        grouped.push(',');
        grouped.push_str(tail);
        grouped
    }

    /// Formats a plan as a human-readable summary.
    #[must_use]
    pub fn format_plan(plan: &ResourcePlan) -> String {
        format!(
            "Staff: {} (guides {}, security {}, support {})\n\
             Transport: {} vehicles (buses {}, vans {}, taxis {})\n\
             Accommodation: {} rooms across {} hotels\n\
             Budget: {} (staff {}, transport {}, maintenance {}, emergency {})",
            Self::format_count(plan.staff.total),
            Self::format_count(plan.staff.guides),
            Self::format_count(plan.staff.security),
            Self::format_count(plan.staff.support),
            Self::format_count(plan.transport.total),
            Self::format_count(plan.transport.buses),
            Self::format_count(plan.transport.vans),
            Self::format_count(plan.transport.taxis),
            Self::format_count(plan.accommodation.rooms),
            Self::format_count(plan.accommodation.hotels),
            Self::format_rupees(plan.budget.total),
            Self::format_rupees(plan.budget.staff),
            Self::format_rupees(plan.budget.transport),
            Self::format_rupees(plan.budget.maintenance),
            Self::format_rupees(plan.budget.emergency),
        )
    }
}

impl Default for ResourceEstimator {
    fn default() -> Self {
        Self::global().clone()
    }
}

/// `ceil(value / divisor)` for a non-negative value.
fn ceil_ratio(value: f64, divisor: u64) -> u64 {
    (value / divisor as f64).ceil() as u64
}

/// `ceil(count * percent / 100)` in exact integer arithmetic.
const fn ceil_percent(count: u64, percent: u64) -> u64 {
    count.saturating_mul(percent).div_ceil(100)
}

/// `round(amount * percent / 100)`, halves rounded up.
const fn round_percent(amount: u64, percent: u64) -> u64 {
    amount.saturating_mul(percent).saturating_add(50) / 100
}

#[cfg(test)]
mod tests {
    use super::*;
    use footfall_types::InvalidFootfall;

    fn estimate(footfall: f64) -> ResourcePlan {
        ResourceEstimator::global().estimate(footfall).unwrap()
    }

    #[test]
    fn test_zero_footfall_is_all_zero() {
        let plan = estimate(0.0);
        assert!(plan.is_empty());
        assert!(plan.fields().iter().all(|(_, value)| *value == 0));
    }

    #[test]
    fn test_peak_scenario() {
        let plan = estimate(25_000.0);

        assert_eq!(plan.staff.total, 500);
        assert_eq!(plan.staff.guides, 150);
        assert_eq!(plan.staff.security, 125);
        assert_eq!(plan.staff.support, 225);

        assert_eq!(plan.transport.total, 25);
        assert_eq!(plan.transport.buses, 13);
        assert_eq!(plan.transport.vans, 8);
        assert_eq!(plan.transport.taxis, 5);

        assert_eq!(plan.accommodation.rooms, 3750);
        assert_eq!(plan.accommodation.hotels, 75);

        assert_eq!(plan.budget.staff, 12_500_000);
        assert_eq!(plan.budget.transport, 375_000);
        assert_eq!(plan.budget.maintenance, 250_000);
        assert_eq!(plan.budget.subtotal(), 13_125_000);
        assert_eq!(plan.budget.emergency, 1_968_750);
        assert_eq!(plan.budget.total, 15_093_750);
    }

    #[test]
    fn test_thousand_visitors() {
        let plan = estimate(1000.0);
        assert_eq!(plan.staff.total, 20);
        assert_eq!(plan.transport.total, 1);
        assert_eq!(plan.accommodation.rooms, 150);
        assert_eq!(plan.accommodation.hotels, 3);
    }

    #[test]
    fn test_shares_are_exact() {
        // 10 * 0.30 must be 3, not 4.
        let plan = estimate(500.0);
        assert_eq!(plan.staff.total, 10);
        assert_eq!(plan.staff.guides, 3);
        assert_eq!(plan.staff.security, 3);
        assert_eq!(plan.staff.support, 5);

        // 20 * 0.30 / 2 must be 3, not 4.
        assert_eq!(estimate(20.0).accommodation.rooms, 3);
    }

    #[test]
    fn test_fractional_footfall() {
        let plan = estimate(0.5);
        assert_eq!(plan.staff.total, 1);
        assert_eq!(plan.transport.total, 1);
        assert_eq!(plan.accommodation.rooms, 1);
        assert_eq!(plan.accommodation.hotels, 1);
        assert_eq!(plan.budget.maintenance, 5);
    }

    #[test]
    fn test_budget_total_is_sum_of_parts() {
        for footfall in [1.0, 49.0, 51.0, 999.0, 12_345.0, 250_000.0, 7_654_321.0] {
            let budget = estimate(footfall).budget;
            assert_eq!(
                budget.total,
                budget.staff + budget.transport + budget.maintenance + budget.emergency
            );
            assert_eq!(budget.emergency, (budget.subtotal() * 15 + 50) / 100);
        }
    }

    #[test]
    fn test_shares_within_tolerance_of_total() {
        for footfall in (0..20_000).step_by(37).map(f64::from) {
            let plan = estimate(footfall);
            let staff = plan.staff.allocated();
            let transport = plan.transport.allocated();
            assert!(staff >= plan.staff.total && staff <= plan.staff.total + 2);
            assert!(transport >= plan.transport.total && transport <= plan.transport.total + 2);
        }
    }

    #[test]
    fn test_monotonic_in_footfall() {
        let mut previous = estimate(0.0);
        for footfall in (1..5_000).map(|n| f64::from(n) * 13.7) {
            let current = estimate(footfall);
            for ((name, before), (_, after)) in previous.fields().iter().zip(current.fields()) {
                assert!(
                    *before <= after,
                    "{name} decreased at footfall {footfall}: {before} > {after}"
                );
            }
            previous = current;
        }
    }

    #[test]
    fn test_idempotent() {
        let estimator = ResourceEstimator::global();
        assert_eq!(
            estimator.estimate(31_337.0).unwrap(),
            estimator.estimate(31_337.0).unwrap()
        );
    }

    #[test]
    fn test_invalid_input() {
        let estimator = ResourceEstimator::global();
        assert_eq!(
            estimator.estimate(-1.0).unwrap_err(),
            EstimateError::InvalidInput {
                reason: InvalidFootfall::Negative
            }
        );
        assert_eq!(
            estimator.estimate(f64::NAN).unwrap_err().reason(),
            InvalidFootfall::NonFinite
        );
        assert_eq!(
            estimator.estimate(1e13).unwrap_err().reason(),
            InvalidFootfall::TooLarge
        );
    }

    #[test]
    fn test_maximum_footfall_does_not_saturate() {
        let plan = estimate(Footfall::MAX);
        assert_eq!(plan.staff.total, 20_000_000_000);
        assert_eq!(plan.budget.staff, 500_000_000_000_000);
        assert_eq!(
            plan.budget.total,
            plan.budget.subtotal() + plan.budget.emergency
        );
    }

    #[test]
    fn test_custom_ratios() {
        let mut ratios = *RatioTable::global();
        ratios.staff.visitors_per_unit = 100;
        ratios.budget.emergency_percent = 0;
        let estimator = ResourceEstimator::new(ratios).unwrap();

        let plan = estimator.estimate(25_000.0).unwrap();
        assert_eq!(plan.staff.total, 250);
        assert_eq!(plan.budget.emergency, 0);
        assert_eq!(plan.budget.total, plan.budget.subtotal());
    }

    #[test]
    fn test_custom_ratios_are_validated() {
        let mut ratios = *RatioTable::global();
        ratios.transport.visitors_per_unit = 0;
        assert!(ResourceEstimator::new(ratios).is_err());
    }

    #[test]
    fn test_format_count() {
        assert_eq!(ResourceEstimator::format_count(0), "0");
        assert_eq!(ResourceEstimator::format_count(999), "999");
        assert_eq!(ResourceEstimator::format_count(1000), "1,000");
        assert_eq!(ResourceEstimator::format_count(125_000), "1,25,000");
        assert_eq!(ResourceEstimator::format_count(1_250_000), "12,50,000");
        assert_eq!(ResourceEstimator::format_count(15_093_750), "1,50,93,750");
    }

    #[test]
    fn test_format_plan() {
        let summary = ResourceEstimator::format_plan(&estimate(25_000.0));
        assert!(summary.contains("Staff: 500 (guides 150, security 125, support 225)"));
        assert!(summary.contains("Accommodation: 3,750 rooms across 75 hotels"));
        assert!(summary.contains("Budget: ₹1,50,93,750"));
    }
}
