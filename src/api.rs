//! HTTP front end
//!
//! A stateless request/response counterpart to the voice loop. Handlers
//! share only the weather service and the saved-city store; successful
//! lookups record the queried city, mirroring the voice session.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::store::CityStore;
use crate::weather::{AirQuality, CurrentConditions, ForecastEntry, NearbyTown, WeatherService};
use crate::{Error, Result};

/// Shared state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub weather: Arc<dyn WeatherService>,
    pub cities: CityStore,
}

/// Error payload returned for failed requests
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiResult<T> = std::result::Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// Map an upstream fetch failure to a gateway error response
fn upstream_error(e: &Error) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

fn store_error(e: &Error) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// Record a fetched city, logging rather than failing the request
fn record_city(state: &ApiState, city: &str) {
    if let Err(e) = state.cities.append_if_absent(city) {
        tracing::warn!(%city, error = %e, "failed to record city");
    }
}

#[derive(Deserialize)]
struct CityQuery {
    city: String,
}

#[derive(Deserialize)]
struct NearbyQuery {
    city: String,
    #[serde(default = "default_nearby_count")]
    count: u32,
}

const fn default_nearby_count() -> u32 {
    10
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ForecastBody {
    city: String,
    entries: Vec<ForecastEntry>,
}

#[derive(Serialize)]
struct AirBody {
    city: String,
    index: u8,
    label: &'static str,
}

#[derive(Serialize)]
struct SavedBody {
    saved_cities: Vec<String>,
}

/// Liveness probe
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Current conditions for a city
async fn current(
    State(state): State<ApiState>,
    Query(q): Query<CityQuery>,
) -> ApiResult<CurrentConditions> {
    let conditions = state
        .weather
        .current(&q.city)
        .await
        .map_err(|e| upstream_error(&e))?;
    record_city(&state, &conditions.city);
    Ok(Json(conditions))
}

/// 5-day forecast in 3-hour increments
async fn forecast(
    State(state): State<ApiState>,
    Query(q): Query<CityQuery>,
) -> ApiResult<ForecastBody> {
    let entries = state
        .weather
        .forecast(&q.city)
        .await
        .map_err(|e| upstream_error(&e))?;
    record_city(&state, &q.city);
    Ok(Json(ForecastBody {
        city: q.city,
        entries,
    }))
}

/// Air quality, resolving coordinates via a current-weather lookup
async fn air(State(state): State<ApiState>, Query(q): Query<CityQuery>) -> ApiResult<AirBody> {
    let conditions = state
        .weather
        .current(&q.city)
        .await
        .map_err(|e| upstream_error(&e))?;
    let AirQuality { index } = state
        .weather
        .air_quality(conditions.lat, conditions.lon)
        .await
        .map_err(|e| upstream_error(&e))?;
    record_city(&state, &conditions.city);

    Ok(Json(AirBody {
        city: conditions.city,
        index,
        label: AirQuality { index }.label(),
    }))
}

/// Saved city list
async fn saved(State(state): State<ApiState>) -> ApiResult<SavedBody> {
    let saved_cities = state.cities.load().map_err(|e| store_error(&e))?;
    Ok(Json(SavedBody { saved_cities }))
}

/// Marker data for surrounding towns (the map view, minus rendering)
async fn nearby(
    State(state): State<ApiState>,
    Query(q): Query<NearbyQuery>,
) -> ApiResult<Vec<NearbyTown>> {
    let conditions = state
        .weather
        .current(&q.city)
        .await
        .map_err(|e| upstream_error(&e))?;
    let towns = state
        .weather
        .nearby(conditions.lat, conditions.lon, q.count)
        .await
        .map_err(|e| upstream_error(&e))?;
    record_city(&state, &conditions.city);

    Ok(Json(towns))
}

/// Build the API router
#[must_use]
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/weather", get(current))
        .route("/api/forecast", get(forecast))
        .route("/api/air", get(air))
        .route("/api/saved", get(saved))
        .route("/api/nearby", get(nearby))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

/// Serve the API until the process exits
///
/// # Errors
///
/// Returns error if the listener cannot bind or the server fails
pub async fn serve(state: ApiState, port: u16) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "api server listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
