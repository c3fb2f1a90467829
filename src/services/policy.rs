use std::str::FromStr;

use tracing::warn;

use crate::errors::GatewayError;
use crate::models::ValidationResult;

/// What the gateway does when the validation API cannot be used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the error and answer 200 with a zero-valued result.
    #[default]
    Lenient,
    /// Surface the error to the caller as a non-200 status.
    Strict,
}

impl FailurePolicy {
    pub fn apply(
        self,
        outcome: Result<ValidationResult, GatewayError>,
    ) -> Result<ValidationResult, GatewayError> {
        match (self, outcome) {
            (_, Ok(result)) => Ok(result),
            (Self::Lenient, Err(e)) => {
                warn!(error = %e, "upstream validation failed, answering with an empty result");
                Ok(ValidationResult::default())
            }
            (Self::Strict, Err(e)) => Err(e),
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(GatewayError::Config(format!(
                "unknown failure policy: {}",
                other
            ))),
        }
    }
}
