//! Request handlers.

use axum::{
    Extension, Json,
    extract::{Path, Query, State, rejection::JsonRejection, rejection::QueryRejection},
};
use chrono::{DateTime, NaiveDate, Utc};
use footfall_store::{PredictionFilter, PredictionRecord};
use footfall_types::{Footfall, LocationList, PredictionRequest, PredictionResponse, ResourcePlan};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{ApiError, AppState, Principal};

/// Listing limit on the admin route when the query sets none.
pub const ADMIN_LIST_LIMIT: usize = 100;

/// Body of `POST /api/resources`.
#[derive(Debug, Deserialize)]
pub struct ResourceRequest {
    /// Predicted visitors to plan for.
    pub footfall: Footfall,
}

/// Query of the prediction listing routes.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Only this location.
    pub location: Option<String>,
    /// Only this year.
    pub year: Option<i32>,
    /// Only this month.
    pub month: Option<u32>,
    /// Maximum number of records.
    pub limit: Option<usize>,
}

impl ListQuery {
    fn into_filter(self, default_limit: usize) -> PredictionFilter {
        PredictionFilter {
            location: self.location.filter(|l| !l.trim().is_empty()),
            year: self.year,
            month: self.month,
            limit: Some(self.limit.unwrap_or(default_limit)),
            ..PredictionFilter::new()
        }
    }
}

/// Query of `GET /api/predictions/range`.
///
/// `start` and `end` accept RFC 3339 timestamps or `YYYY-MM-DD` dates, the
/// latter read as midnight UTC. Both bounds are inclusive.
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    /// Earliest creation time.
    pub start: Option<String>,
    /// Latest creation time.
    pub end: Option<String>,
    /// Maximum number of records.
    pub limit: Option<usize>,
}

impl RangeQuery {
    fn into_filter(self) -> Result<PredictionFilter, ApiError> {
        let start = parse_instant("start", self.start.as_deref())?;
        let end = parse_instant("end", self.end.as_deref())?;
        if start > end {
            return Err(ApiError::InvalidInput(
                "start must not be after end".to_string(),
            ));
        }

        let mut filter = PredictionFilter::new().created_after(start).created_before(end);
        filter.limit = self.limit;
        Ok(filter)
    }
}

fn parse_instant(name: &str, value: Option<&str>) -> Result<DateTime<Utc>, ApiError> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::InvalidInput(format!("Missing {name} date")))?;

    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| ApiError::InvalidInput(format!("Invalid {name} date: {value}")))
}

/// Body of the prediction listing routes.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionList {
    /// Matching records, newest first.
    pub predictions: Vec<PredictionRecord>,
    /// Number of records returned.
    pub count: usize,
}

impl From<Vec<PredictionRecord>> for PredictionList {
    fn from(predictions: Vec<PredictionRecord>) -> Self {
        Self {
            count: predictions.len(),
            predictions,
        }
    }
}

/// `GET /api/health`
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let ml_service = match state.client().health().await {
        Ok(health) => health.status,
        Err(e) => {
            warn!(error = %e, "prediction service health check failed");
            "unavailable".to_string()
        }
    };
    let store = if state.store().path().is_dir() {
        "available"
    } else {
        "unavailable"
    };

    Json(json!({
        "server": "healthy",
        "ml_service": ml_service,
        "store": store,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// `POST /api/resources`
pub async fn resources(
    State(state): State<AppState>,
    body: Result<Json<ResourceRequest>, JsonRejection>,
) -> Result<Json<ResourcePlan>, ApiError> {
    let Json(request) = body?;
    Ok(Json(state.estimator().plan(request.footfall)))
}

/// `GET /api/locations`
pub async fn locations(State(state): State<AppState>) -> Result<Json<LocationList>, ApiError> {
    let locations = state.client().locations().await?;
    Ok(Json(LocationList { locations }))
}

/// `POST /api/predict`
///
/// Forwards the request to the prediction service and logs the answer. The
/// service body is returned as received. A failure to log is reported but
/// does not fail the request.
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = body?;
    forward_prediction(&state, &request).await
}

/// `POST /api/admin/prediction-create`
///
/// Same as [`predict`], attributed to the admin caller.
pub async fn admin_create_prediction(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    body: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = body?;
    info!(principal = %principal.id, location = %request.location, "admin prediction");
    forward_prediction(&state, &request).await
}

/// `GET /api/predictions`
pub async fn list_predictions(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<PredictionList>, ApiError> {
    let Query(query) = query?;
    let filter = query.into_filter(footfall_store::DEFAULT_LIST_LIMIT);
    list(&state, filter).await
}

/// `GET /api/predictions/range`
pub async fn predictions_in_range(
    State(state): State<AppState>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<Json<PredictionList>, ApiError> {
    let Query(query) = query?;
    list(&state, query.into_filter()?).await
}

/// `GET /api/admin/predictions`
pub async fn admin_predictions(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<PredictionList>, ApiError> {
    let Query(query) = query?;
    info!(principal = %principal.id, "admin listing predictions");
    list(&state, query.into_filter(ADMIN_LIST_LIMIT)).await
}

/// `GET /api/admin/resources/:id`
///
/// Recomputes the plan for a logged prediction.
pub async fn admin_resources(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<ResourcePlan>, ApiError> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| ApiError::InvalidInput(format!("Invalid prediction id: {id}")))?;
    info!(principal = %principal.id, %id, "admin resources lookup");

    let store = state.store().clone();
    let record = tokio::task::spawn_blocking(move || store.load(id)).await??;
    let footfall = record.footfall()?;

    Ok(Json(state.estimator().plan(footfall)))
}

async fn forward_prediction(
    state: &AppState,
    request: &PredictionRequest,
) -> Result<Json<Value>, ApiError> {
    let payload = state.client().predict_payload(request).await?;

    let response = match PredictionResponse::deserialize(&payload) {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "prediction payload not logged");
            return Ok(Json(payload));
        }
    };

    let record = PredictionRecord::from_prediction(&response.prediction);
    let store = state.store().clone();
    match tokio::task::spawn_blocking(move || store.save(&record).map(|()| record.id)).await {
        Ok(Ok(id)) => info!(
            %id,
            location = %response.prediction.location,
            footfall = response.prediction.predicted_footfall,
            "prediction logged"
        ),
        Ok(Err(e)) => warn!(error = %e, "failed to log prediction"),
        Err(e) => warn!(error = %e, "failed to log prediction"),
    }

    Ok(Json(payload))
}

async fn list(state: &AppState, filter: PredictionFilter) -> Result<Json<PredictionList>, ApiError> {
    let store = state.store().clone();
    let records = tokio::task::spawn_blocking(move || store.list(&filter)).await??;
    Ok(Json(records.into()))
}
