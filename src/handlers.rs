use std::convert::Infallible;
use std::sync::Arc;

use chrono::Utc;
use hyper::StatusCode;
use tokio::time::timeout;
use tracing::info;
use warp::{Filter, Rejection, Reply};

use crate::errors::GatewayError;
use crate::middleware::{error_response, json_response, request_span};
use crate::models::{AppState, ValidationResult};
use crate::services::{build_response, fetch_validation};


type Response = warp::reply::Response;

/// Route table: `GET /health` and `GET /validation/{id}`.
pub fn routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let state_filter = warp::any().map(move || state.clone());

    let health_check = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| "OK");

    let validation = warp::path!("validation" / String)
        .and(warp::get())
        .and(state_filter)
        .and_then(validate_vehicle);

    health_check
        .or(validation)
        .recover(handle_rejection)
        .with(warp::trace(request_span))
}

pub async fn validate_vehicle(id: String, state: Arc<AppState>) -> Result<Response, Rejection> {
    info!(id = %id, "validation requested");

    let outcome = lookup(&state, &id).await;
    let result = state
        .config
        .failure_policy
        .apply(outcome)
        .map_err(warp::reject::custom)?;

    let response = build_response(&result, Utc::now().into());
    Ok(json_response(StatusCode::OK, &response))
}

async fn lookup(state: &AppState, id: &str) -> Result<ValidationResult, GatewayError> {
    let config = &state.config;
    let request = fetch_validation(
        &state.client,
        &config.validation_url,
        &config.region_id,
        id,
        &state.token,
    );

    match timeout(config.request_timeout, request).await {
        Ok(result) => result,
        Err(_) => Err(GatewayError::Timeout),
    }
}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (code, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found".to_string())
    } else if let Some(e) = err.find::<GatewayError>() {
        (status_for(e), e.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string())
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
    };

    Ok(error_response(code, &message))
}

/// Status surfaced for an upstream failure under the strict policy.
pub fn status_for(err: &GatewayError) -> StatusCode {
    match err {
        GatewayError::UpstreamStatus(404) => StatusCode::NOT_FOUND,
        GatewayError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        e if e.is_upstream() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
