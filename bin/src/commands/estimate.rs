//! Estimate command implementation.

use crate::display::{Format, print_plan};
use anyhow::Result;
use footfall_lib::prelude::*;

/// Print the resource plan for a footfall.
pub(crate) fn estimate(footfall: Footfall, format: Format) -> Result<()> {
    let plan = ResourceEstimator::global().plan(footfall);
    print_plan(footfall, &plan, format)
}
