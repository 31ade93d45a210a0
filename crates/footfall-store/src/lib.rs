//! Prediction log for the footfall resource planner.
//!
//! This crate persists predictions returned by the ML service:
//!
//! - [`RecordId`] - Unique identifier for a stored prediction
//! - [`PredictionRecord`] - One prediction with its weather and holiday features
//! - [`PredictionFilter`] - Location / year / month filter with a result limit
//! - [`PredictionStore`] - JSON-file storage and retrieval

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/footfall-planning/footfall/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod record;
mod store;

pub use record::{DEFAULT_LIST_LIMIT, PredictionFilter, PredictionRecord, RecordId};
pub use store::{PredictionStore, Result, StoreError};
