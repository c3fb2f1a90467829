use bytes::Bytes;
use tracing::debug;

use crate::errors::GatewayError;
use crate::models::{AccessToken, TokenResponse};

/// Runs one OAuth2 client-credentials exchange against `token_url`.
///
/// Fails when the endpoint is unreachable, answers with a non-success
/// status, returns an empty body, or the body lacks a usable `access_token`.
pub async fn acquire_token(
    client: &reqwest::Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<AccessToken, GatewayError> {
    let params = [
        ("grant_type", "client_credentials"),
        ("client_id", client_id),
        ("client_secret", client_secret),
    ];

    let res = client
        .post(token_url)
        .form(&params)
        .send()
        .await
        .map_err(|e| GatewayError::TokenAcquisition(e.to_string()))?;

    let status = res.status();
    if !status.is_success() {
        return Err(GatewayError::TokenAcquisition(format!(
            "token endpoint returned {}",
            status
        )));
    }

    let body: Bytes = res
        .bytes()
        .await
        .map_err(|e| GatewayError::TokenAcquisition(e.to_string()))?;
    if body.is_empty() {
        return Err(GatewayError::TokenAcquisition(
            "empty body in response".to_string(),
        ));
    }

    let token: TokenResponse = serde_json::from_slice(&body)
        .map_err(|e| GatewayError::TokenAcquisition(format!("parsing response failed: {}", e)))?;
    if token.access_token.is_empty() {
        return Err(GatewayError::TokenAcquisition(
            "response carried an empty access_token".to_string(),
        ));
    }

    debug!(
        token_type = %token.token_type,
        expires_in = token.expires_in,
        "access token acquired"
    );
    Ok(token.into())
}
