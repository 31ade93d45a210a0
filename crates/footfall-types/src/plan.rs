//! Resource plan representation.

use serde::{Deserialize, Serialize};

/// Staffing requirement split by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StaffPlan {
    /// Total staff headcount.
    pub total: u64,
    /// Tour guides.
    pub guides: u64,
    /// Security personnel.
    pub security: u64,
    /// Support staff (sanitation, medical, information desks).
    pub support: u64,
}

impl StaffPlan {
    /// Returns the sum of the per-role shares.
    ///
    /// Each share is rounded up on its own, so this can exceed `total` by a
    /// small margin.
    #[must_use]
    pub const fn allocated(&self) -> u64 {
        self.guides + self.security + self.support
    }
}

/// Vehicle requirement split by vehicle type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TransportPlan {
    /// Total vehicles.
    pub total: u64,
    /// Buses.
    pub buses: u64,
    /// Vans.
    pub vans: u64,
    /// Taxis.
    pub taxis: u64,
}

impl TransportPlan {
    /// Returns the sum of the per-type shares.
    #[must_use]
    pub const fn allocated(&self) -> u64 {
        self.buses + self.vans + self.taxis
    }
}

/// Lodging requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AccommodationPlan {
    /// Rooms needed for overnight visitors.
    pub rooms: u64,
    /// Hotels needed to provide those rooms.
    pub hotels: u64,
}

/// Budget in the smallest currency unit (rupees).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BudgetPlan {
    /// Grand total including the emergency reserve.
    pub total: u64,
    /// Staff wages.
    pub staff: u64,
    /// Vehicle costs.
    pub transport: u64,
    /// Per-visitor site maintenance.
    pub maintenance: u64,
    /// Emergency reserve on top of the subtotal.
    pub emergency: u64,
}

impl BudgetPlan {
    /// Returns the pre-emergency subtotal.
    #[must_use]
    pub const fn subtotal(&self) -> u64 {
        self.staff + self.transport + self.maintenance
    }
}

/// Resources required to serve a given footfall.
///
/// A plan is a pure projection of the footfall it was computed from. It has
/// no identity of its own and is recomputed on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ResourcePlan {
    /// Staffing.
    pub staff: StaffPlan,
    /// Transport.
    pub transport: TransportPlan,
    /// Accommodation.
    pub accommodation: AccommodationPlan,
    /// Budget.
    pub budget: BudgetPlan,
}

impl ResourcePlan {
    /// Number of scalar fields in a plan.
    pub const FIELD_COUNT: usize = 15;

    /// Returns true if every figure in the plan is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns every figure paired with its dotted field name, in display order.
    #[must_use]
    pub const fn fields(&self) -> [(&'static str, u64); Self::FIELD_COUNT] {
        [
            ("staff.total", self.staff.total),
            ("staff.guides", self.staff.guides),
            ("staff.security", self.staff.security),
            ("staff.support", self.staff.support),
            ("transport.total", self.transport.total),
            ("transport.buses", self.transport.buses),
            ("transport.vans", self.transport.vans),
            ("transport.taxis", self.transport.taxis),
            ("accommodation.rooms", self.accommodation.rooms),
            ("accommodation.hotels", self.accommodation.hotels),
            ("budget.total", self.budget.total),
            ("budget.staff", self.budget.staff),
            ("budget.transport", self.budget.transport),
            ("budget.maintenance", self.budget.maintenance),
            ("budget.emergency", self.budget.emergency),
        ]
    }
}
