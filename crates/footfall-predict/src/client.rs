//! HTTP client for the prediction service.

use std::time::Duration;

use footfall_types::{
    LocationList, PredictionRequest, PredictionResponse, RequestError, ServiceHealth,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::url::{DEFAULT_BASE_URL, HEALTH_PATH, LOCATIONS_PATH, PREDICT_PATH, endpoint};

/// Timeout of a health probe. Probes are never retried.
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the prediction client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the prediction service.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retry attempts for transient failures.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
    /// User agent string.
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a default configuration pointing at `base_url`.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            // Model inference can take a few seconds on a cold start
            timeout: Duration::from_secs(30),
            max_retries: 3,
            base_delay_ms: 250,
            max_delay_ms: 5_000,
            user_agent: format!("footfall/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors that can occur when talking to the prediction service.
#[derive(Error, Debug)]
pub enum PredictError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a body that is not a prediction.
    #[error("Invalid prediction payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Request was rejected locally before being sent.
    #[error(transparent)]
    InvalidRequest(#[from] RequestError),

    /// Service rejected the request (4xx).
    #[error("Prediction service rejected request ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the service.
        message: String,
    },

    /// Service kept failing (5xx or 429) after all retries.
    #[error("Prediction service error ({status}): {message}")]
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the service.
        message: String,
    },
}

/// Error body returned by the prediction service.
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    error: String,
}

/// Body sent to `POST /api/predict`.
#[derive(Debug, Serialize)]
struct PredictBody<'a> {
    location: &'a str,
    year: i32,
    month: u32,
    rolling_avg: f64,
}

/// HTTP client with connection pooling and retry logic.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: Client,
    config: ClientConfig,
}

impl PredictionClient {
    /// Creates a new prediction client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(5))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Requests a footfall prediction.
    ///
    /// The rolling average defaults to
    /// [`DEFAULT_ROLLING_AVG`](footfall_types::DEFAULT_ROLLING_AVG) when the
    /// request does not carry one.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is invalid, the service rejects it, or
    /// the service stays unavailable after all retries.
    pub async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, PredictError> {
        let payload = self.predict_payload(request).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Requests a footfall prediction and returns the service body untouched.
    ///
    /// Fields the typed [`PredictionResponse`] does not model survive, as do
    /// integer footfalls.
    ///
    /// # Errors
    ///
    /// Same as [`predict`](Self::predict), except that the body is not checked
    /// for a prediction.
    pub async fn predict_payload(&self, request: &PredictionRequest) -> Result<Value, PredictError> {
        request.validate()?;

        let url = endpoint(&self.config.base_url, PREDICT_PATH);
        let body = PredictBody {
            location: request.location.trim(),
            year: request.year,
            month: request.month,
            rolling_avg: request.rolling_avg_or_default(),
        };
        debug!(location = body.location, year = body.year, month = body.month, "requesting prediction");

        let response = self.send(|| self.client.post(&url).json(&body)).await?;
        Ok(response.json().await?)
    }

    /// Lists the locations the model can predict for.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable or answers with an error.
    pub async fn locations(&self) -> Result<Vec<String>, PredictError> {
        let url = endpoint(&self.config.base_url, LOCATIONS_PATH);
        let response = self.send(|| self.client.get(&url)).await?;
        let list: LocationList = response.json().await?;
        Ok(list.locations)
    }

    /// Queries the service health endpoint.
    ///
    /// Sends a single request bounded by [`HEALTH_TIMEOUT`], whatever the
    /// retry settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable or answers with an error.
    pub async fn health(&self) -> Result<ServiceHealth, PredictError> {
        let url = endpoint(&self.config.base_url, HEALTH_PATH);
        let response = self
            .client
            .get(&url)
            .timeout(HEALTH_TIMEOUT.min(self.config.timeout))
            .send()
            .await?;

        let status = response.status();
        if status.is_server_error() {
            return Err(PredictError::ServerError {
                status: status.as_u16(),
                message: error_message(response).await,
            });
        }
        if status.is_client_error() {
            return Err(PredictError::Rejected {
                status: status.as_u16(),
                message: error_message(response).await,
            });
        }
        Ok(response.json().await?)
    }

    /// Sends a request, retrying transient failures.
    async fn send<F>(&self, build: F) -> Result<Response, PredictError>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempts = 0;

        loop {
            match build().send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                        if attempts < self.config.max_retries {
                            attempts += 1;
                            let delay = self.calculate_backoff_delay(attempts);
                            warn!(%status, attempt = attempts, ?delay, "prediction service unavailable, retrying");
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                        return Err(PredictError::ServerError {
                            status: status.as_u16(),
                            message: error_message(response).await,
                        });
                    }

                    if status.is_client_error() {
                        return Err(PredictError::Rejected {
                            status: status.as_u16(),
                            message: error_message(response).await,
                        });
                    }

                    return Ok(response);
                }
                Err(e) if Self::is_retryable_error(&e) && attempts < self.config.max_retries => {
                    attempts += 1;
                    let delay = self.calculate_backoff_delay(attempts);
                    warn!(error = %e, attempt = attempts, ?delay, "prediction request failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Calculates the backoff delay with exponential backoff and jitter.
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        let base = self.config.base_delay_ms;
        let capped = base
            .saturating_mul(1u64 << attempt.min(10))
            .min(self.config.max_delay_ms);

        // Deterministic ±25% jitter so concurrent callers spread out
        let jitter_range = capped / 4;
        let delay = if jitter_range > 0 {
            let offset = (u64::from(attempt) * 17) % (jitter_range * 2);
            (capped + offset).saturating_sub(jitter_range)
        } else {
            capped
        };

        Duration::from_millis(delay.max(base.min(self.config.max_delay_ms)))
    }

    /// Determines if a transport error is worth retrying.
    fn is_retryable_error(error: &reqwest::Error) -> bool {
        if error.is_builder() || error.is_decode() {
            return false;
        }
        error.is_timeout() || error.is_connect() || error.is_request()
    }
}

/// Extracts the service's `error` message from a failed response.
async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.json::<ServiceErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::{
        Json, Router,
        extract::State,
        http::StatusCode as AxumStatus,
        response::{IntoResponse, Response as AxumResponse},
        routing::{get, post},
    };
    use serde_json::{Value, json};

    async fn spawn_service(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn mock_predict(Json(body): Json<Value>) -> AxumResponse {
        let location = body["location"].as_str().unwrap_or_default().to_string();
        if location == "Atlantis" {
            return (
                AxumStatus::BAD_REQUEST,
                Json(json!({ "error": "Unknown location: Atlantis" })),
            )
                .into_response();
        }
        // Echo the rolling average back so tests can observe what was sent
        let rolling_avg = body["rolling_avg"].as_f64().unwrap_or_default();
        Json(json!({
            "success": true,
            "prediction": {
                "location": location,
                "year": body["year"],
                "month": body["month"],
                "predicted_footfall": rolling_avg / 4.0,
                "confidence": 0.9
            },
            "timestamp": "2025-01-01T00:00:00"
        }))
        .into_response()
    }

    fn mock_router() -> Router {
        Router::new()
            .route("/api/predict", post(mock_predict))
            .route(
                "/api/locations",
                get(|| async { Json(json!({ "locations": ["Gulmarg", "Pahalgam"] })) }),
            )
            .route(
                "/api/health",
                get(|| async { Json(json!({ "status": "healthy", "model_loaded": true })) }),
            )
    }

    fn fast_config(base_url: String) -> ClientConfig {
        ClientConfig {
            base_url,
            max_retries: 2,
            base_delay_ms: 1,
            max_delay_ms: 5,
            ..ClientConfig::default()
        }
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.base_delay_ms, 250);
        assert_eq!(config.max_delay_ms, 5_000);
        assert!(config.user_agent.starts_with("footfall/"));
    }

    #[tokio::test]
    async fn test_client_creation() {
        assert!(PredictionClient::with_defaults().is_ok());
    }

    #[test]
    fn test_backoff_delay_calculation() {
        let client = PredictionClient::with_defaults().unwrap();

        // First retry: 250 * 2 = 500ms (plus jitter)
        let delay1 = client.calculate_backoff_delay(1);
        assert!(delay1.as_millis() >= 375 && delay1.as_millis() <= 625);

        // Second retry: 250 * 4 = 1000ms (plus jitter)
        let delay2 = client.calculate_backoff_delay(2);
        assert!(delay2.as_millis() >= 750 && delay2.as_millis() <= 1250);

        // Capped at max_delay plus jitter
        let delay_high = client.calculate_backoff_delay(20);
        assert!(delay_high.as_millis() <= 6_250);
    }

    #[tokio::test]
    async fn test_predict_sends_default_rolling_avg() {
        let base_url = spawn_service(mock_router()).await;
        let client = PredictionClient::new(fast_config(base_url)).unwrap();

        let response = client
            .predict(&PredictionRequest::new("Gulmarg", 2024, 12))
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.prediction.location, "Gulmarg");
        assert_eq!(response.prediction.month, 12);
        assert!((response.prediction.predicted_footfall - 20_000.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_predict_with_rolling_avg() {
        let base_url = spawn_service(mock_router()).await;
        let client = PredictionClient::new(fast_config(base_url)).unwrap();

        let request = PredictionRequest::new("Pahalgam", 2025, 6).with_rolling_avg(40_000.0);
        let response = client.predict(&request).await.unwrap();
        assert!((response.prediction.predicted_footfall - 10_000.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_predict_rejected_by_service() {
        let base_url = spawn_service(mock_router()).await;
        let client = PredictionClient::new(fast_config(base_url)).unwrap();

        let err = client
            .predict(&PredictionRequest::new("Atlantis", 2025, 6))
            .await
            .unwrap_err();
        match err {
            PredictError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Unknown location: Atlantis");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_predict_validates_before_sending() {
        // Nothing listens here; validation must fail first
        let client = PredictionClient::new(fast_config("http://127.0.0.1:9".into())).unwrap();
        let err = client
            .predict(&PredictionRequest::new("Gulmarg", 2025, 13))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PredictError::InvalidRequest(RequestError::InvalidMonth(13))
        ));
    }

    #[tokio::test]
    async fn test_locations_and_health() {
        let base_url = spawn_service(mock_router()).await;
        let client = PredictionClient::new(fast_config(base_url)).unwrap();

        assert_eq!(client.locations().await.unwrap(), vec!["Gulmarg", "Pahalgam"]);

        let health = client.health().await.unwrap();
        assert_eq!(health.status, "healthy");
        assert!(health.model_loaded);
    }

    #[tokio::test]
    async fn test_retries_transient_server_errors() {
        let calls = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route(
                "/api/locations",
                get(|State(calls): State<Arc<AtomicUsize>>| async move {
                    if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                        return AxumStatus::SERVICE_UNAVAILABLE.into_response();
                    }
                    Json(json!({ "locations": ["Sonamarg"] })).into_response()
                }),
            )
            .with_state(calls.clone());
        let base_url = spawn_service(router).await;
        let client = PredictionClient::new(fast_config(base_url)).unwrap();

        assert_eq!(client.locations().await.unwrap(), vec!["Sonamarg"]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let calls = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route(
                "/api/locations",
                get(|State(calls): State<Arc<AtomicUsize>>| async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    (
                        AxumStatus::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": "model not loaded" })),
                    )
                }),
            )
            .with_state(calls.clone());
        let base_url = spawn_service(router).await;
        let client = PredictionClient::new(fast_config(base_url)).unwrap();

        let err = client.locations().await.unwrap_err();
        match err {
            PredictError::ServerError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "model not loaded");
            }
            other => panic!("unexpected error: {other}"),
        }
        // One initial attempt plus two retries
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_health_is_probed_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route(
                "/api/health",
                get(|State(calls): State<Arc<AtomicUsize>>| async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    (
                        AxumStatus::SERVICE_UNAVAILABLE,
                        Json(json!({ "error": "model not loaded" })),
                    )
                }),
            )
            .with_state(calls.clone());
        let base_url = spawn_service(router).await;
        let client = PredictionClient::new(ClientConfig::with_base_url(base_url)).unwrap();

        let started = std::time::Instant::now();
        let err = client.health().await.unwrap_err();
        assert!(matches!(err, PredictError::ServerError { status: 503, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        // Default backoff would sleep at least 375ms before a retry
        assert!(started.elapsed() < Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_predict_payload_keeps_unmodelled_fields() {
        let router = Router::new().route(
            "/api/predict",
            post(|| async {
                Json(json!({
                    "success": true,
                    "prediction": {
                        "location": "Gulmarg",
                        "year": 2024,
                        "month": 12,
                        "predicted_footfall": 25000,
                        "comparative_analysis": { "change": 12.5 }
                    }
                }))
            }),
        );
        let base_url = spawn_service(router).await;
        let client = PredictionClient::new(fast_config(base_url)).unwrap();
        let request = PredictionRequest::new("Gulmarg", 2024, 12);

        let payload = client.predict_payload(&request).await.unwrap();
        assert_eq!(payload["prediction"]["predicted_footfall"], json!(25000));
        assert_eq!(
            payload["prediction"]["comparative_analysis"],
            json!({ "change": 12.5 })
        );
        assert!(payload["prediction"].get("weather").is_none());
    }

    #[tokio::test]
    async fn test_predict_rejects_non_prediction_body() {
        let router = Router::new().route(
            "/api/predict",
            post(|| async { Json(json!({ "success": true })) }),
        );
        let base_url = spawn_service(router).await;
        let client = PredictionClient::new(fast_config(base_url)).unwrap();

        let err = client
            .predict(&PredictionRequest::new("Gulmarg", 2024, 12))
            .await
            .unwrap_err();
        assert!(matches!(err, PredictError::Decode(_)));
    }
}
