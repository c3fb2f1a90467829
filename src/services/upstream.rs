use bytes::Bytes;
use tracing::debug;

use crate::errors::GatewayError;
use crate::models::{AccessToken, ValidationResult};

/// `{base_url}/{region_id}/{vehicle_id}`. The vehicle id is passed through as-is.
pub fn validation_url(base_url: &str, region_id: &str, vehicle_id: &str) -> String {
    format!("{}/{}/{}", base_url, region_id, vehicle_id)
}

pub async fn fetch_validation(
    client: &reqwest::Client,
    base_url: &str,
    region_id: &str,
    vehicle_id: &str,
    token: &AccessToken,
) -> Result<ValidationResult, GatewayError> {
    let url = validation_url(base_url, region_id, vehicle_id);

    let res = client
        .get(&url)
        .bearer_auth(token.secret())
        .send()
        .await
        .map_err(|e| GatewayError::UpstreamRequest(e.to_string()))?;

    let status = res.status();
    debug!(%url, status = status.as_u16(), "upstream responded");
    if !status.is_success() {
        return Err(GatewayError::UpstreamStatus(status.as_u16()));
    }

    let body = res
        .bytes()
        .await
        .map_err(|e| GatewayError::UpstreamRequest(e.to_string()))?;
    parse_validation(&body)
}

pub fn parse_validation(body: &Bytes) -> Result<ValidationResult, GatewayError> {
    serde_json::from_slice(body).map_err(|e| GatewayError::UpstreamParse(e.to_string()))
}
