//! Core types for the footfall resource planner.
//!
//! This crate provides the fundamental data structures used throughout footfall:
//!
//! - [`Footfall`] - A validated, non-negative visitor count
//! - [`ResourcePlan`] - Staff, transport, accommodation and budget figures
//! - [`PredictionRequest`] / [`Prediction`] - Exchange with the ML prediction service
//! - [`EstimateError`] - The single failure kind of the resource calculator

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/footfall-planning/footfall/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod footfall;
mod plan;
mod prediction;

pub use error::{EstimateError, InvalidFootfall, RequestError, Result};
pub use footfall::Footfall;
pub use plan::{AccommodationPlan, BudgetPlan, ResourcePlan, StaffPlan, TransportPlan};
pub use prediction::{
    DEFAULT_ROLLING_AVG, Holidays, LocationList, Prediction, PredictionRequest,
    PredictionResponse, ServiceHealth, Weather,
};
