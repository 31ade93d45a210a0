//! HTTP client for the footfall ML prediction service.
//!
//! This crate talks to the external model service:
//!
//! - [`url::endpoint`] - Builds service URLs
//! - [`PredictionClient`] - HTTP client with connection pooling and retries
//! - [`ClientConfig`] - Base URL, timeouts and backoff settings
//! - [`PredictError`] - Transport and service failures

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/footfall-planning/footfall/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
pub mod url;

pub use client::{ClientConfig, HEALTH_TIMEOUT, PredictError, PredictionClient};
