//! Resource-allocation calculator for the footfall resource planner.
//!
//! This crate converts a predicted visitor count into the resources needed
//! to serve it:
//!
//! - [`RatioTable`] - Fixed ratios (visitors per staff, role shares, unit costs)
//! - [`ResourceEstimator`] - Computes a [`ResourcePlan`](footfall_types::ResourcePlan) from a footfall
//! - [`RatioError`] - Validation failure for custom ratio tables

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/footfall-planning/footfall/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod data;
mod estimator;

pub use data::{
    AccommodationRatios, BudgetRatios, RatioError, RatioTable, StaffRatios, StaffShares,
    TransportRatios, TransportShares,
};
pub use estimator::ResourceEstimator;
