//! Shared application state.

use std::sync::Arc;

use footfall_estimate::ResourceEstimator;
use footfall_predict::PredictionClient;
use footfall_store::PredictionStore;

use crate::config::AuthMode;

/// State shared by every handler. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    estimator: ResourceEstimator,
    client: PredictionClient,
    store: PredictionStore,
    auth: AuthMode,
}

impl AppState {
    /// Creates state using the default ratio table.
    #[must_use]
    pub fn new(client: PredictionClient, store: PredictionStore, auth: AuthMode) -> Self {
        Self::with_estimator(ResourceEstimator::default(), client, store, auth)
    }

    /// Creates state with a custom estimator.
    #[must_use]
    pub fn with_estimator(
        estimator: ResourceEstimator,
        client: PredictionClient,
        store: PredictionStore,
        auth: AuthMode,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                estimator,
                client,
                store,
                auth,
            }),
        }
    }

    /// Returns the resource estimator.
    #[must_use]
    pub fn estimator(&self) -> &ResourceEstimator {
        &self.inner.estimator
    }

    /// Returns the prediction service client.
    #[must_use]
    pub fn client(&self) -> &PredictionClient {
        &self.inner.client
    }

    /// Returns the prediction log.
    #[must_use]
    pub fn store(&self) -> &PredictionStore {
        &self.inner.store
    }

    /// Returns the admin authentication mode.
    #[must_use]
    pub fn auth(&self) -> &AuthMode {
        &self.inner.auth
    }
}
