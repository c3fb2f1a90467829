use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Token acquisition failed: {0}")]
    TokenAcquisition(String),

    #[error("Upstream request failed: {0}")]
    UpstreamRequest(String),

    #[error("Upstream returned status {0}")]
    UpstreamStatus(u16),

    #[error("Upstream response could not be parsed: {0}")]
    UpstreamParse(String),

    #[error("Upstream request timed out")]
    Timeout,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),
}

impl GatewayError {
    /// True for errors raised while talking to the validation API.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::UpstreamRequest(_) | Self::UpstreamStatus(_) | Self::UpstreamParse(_) | Self::Timeout
        )
    }
}

impl warp::reject::Reject for GatewayError {}
