//! Tourism resource planning from predicted footfall.
//!
//! This is a facade crate that re-exports functionality from the footfall
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use footfall_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PredictionClient::with_defaults()?;
//!     let response = client
//!         .predict(&PredictionRequest::new("Gulmarg", 2024, 12))
//!         .await?;
//!
//!     let footfall = response.prediction.footfall()?;
//!     let plan = ResourceEstimator::global().plan(footfall);
//!     println!("{}", ResourceEstimator::format_plan(&plan));
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/footfall-planning/footfall/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use footfall_types::*;

// Re-export the calculator
pub use footfall_estimate::{RatioError, RatioTable, ResourceEstimator};

// Re-export the prediction client
#[cfg(feature = "predict")]
pub use footfall_predict::{ClientConfig, PredictError, PredictionClient};

// Re-export the prediction log
#[cfg(feature = "store")]
pub use footfall_store::{
    DEFAULT_LIST_LIMIT, PredictionFilter, PredictionRecord, PredictionStore, RecordId, StoreError,
};

// Re-export the HTTP host
#[cfg(feature = "server")]
pub use footfall_server::{ApiError, AppState, AuthMode, ServerConfig, ServerError, router, serve};

/// Prelude module for convenient imports.
///
/// ```
/// use footfall_lib::prelude::*;
/// ```
pub mod prelude {
    pub use footfall_types::{
        EstimateError, Footfall, Prediction, PredictionRequest, PredictionResponse, ResourcePlan,
    };

    pub use footfall_estimate::ResourceEstimator;

    #[cfg(feature = "predict")]
    pub use footfall_predict::{ClientConfig, PredictionClient};

    #[cfg(feature = "store")]
    pub use footfall_store::{PredictionFilter, PredictionRecord, PredictionStore};

    #[cfg(feature = "server")]
    pub use footfall_server::{AuthMode, ServerConfig};
}
