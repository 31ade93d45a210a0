//! Prediction service URL construction.

/// Default base URL of the prediction service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Path of the prediction endpoint.
pub const PREDICT_PATH: &str = "/api/predict";

/// Path of the location listing endpoint.
pub const LOCATIONS_PATH: &str = "/api/locations";

/// Path of the health endpoint.
pub const HEALTH_PATH: &str = "/api/health";

/// Joins a base URL and an endpoint path without doubling slashes.
///
/// # Example
///
/// ```
/// use footfall_predict::url::{PREDICT_PATH, endpoint};
///
/// assert_eq!(
///     endpoint("http://ml.internal:5000/", PREDICT_PATH),
///     "http://ml.internal:5000/api/predict"
/// );
/// ```
#[must_use]
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_plain() {
        assert_eq!(
            endpoint(DEFAULT_BASE_URL, HEALTH_PATH),
            "http://localhost:5000/api/health"
        );
    }

    #[test]
    fn test_endpoint_trailing_slashes() {
        assert_eq!(
            endpoint("http://localhost:5000///", "api/locations"),
            "http://localhost:5000/api/locations"
        );
    }

    #[test]
    fn test_endpoint_with_prefix() {
        assert_eq!(
            endpoint("https://example.org/ml", LOCATIONS_PATH),
            "https://example.org/ml/api/locations"
        );
    }
}
