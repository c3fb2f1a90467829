use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::GatewayConfig;

/// Decodes a JSON `null` to the type's zero value, like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// RFC 3339 keeping the offset the timestamp carries, `Z` when it is zero.
fn rfc3339<S>(ts: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(deserialize_with = "null_as_default")]
    pub license_plate: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Charge {
    #[serde(deserialize_with = "null_as_default")]
    pub price_list_item_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub valid_since: DateTime<FixedOffset>,
    #[serde(deserialize_with = "null_as_default")]
    pub valid_until: DateTime<FixedOffset>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_currently_valid: bool,
}

/// Payload returned by the charge registration API for one vehicle.
///
/// Every field defaults, whether missing or `null`, so a partial body still
/// yields a usable value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationResult {
    #[serde(deserialize_with = "null_as_default")]
    pub vehicle: Vehicle,
    #[serde(deserialize_with = "null_as_default")]
    pub is_given_exemption: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub possible_exemption_reason_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub charges: Vec<Charge>,
}

/// Public response of `GET /validation/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    pub id: String,
    pub valid: bool,
    #[serde(serialize_with = "rfc3339")]
    pub valid_until: DateTime<FixedOffset>,
}

/// Body of a client-credentials token response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
}

/// Bearer credential obtained once at startup. Never refreshed.
#[derive(Clone)]
pub struct AccessToken {
    value: String,
    token_type: String,
    expires_in: u64,
}

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            token_type: "Bearer".to_string(),
            expires_in: 0,
        }
    }

    pub fn secret(&self) -> &str {
        &self.value
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Declared lifetime in seconds. Informational only.
    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }
}

impl From<TokenResponse> for AccessToken {
    fn from(res: TokenResponse) -> Self {
        Self {
            value: res.access_token,
            token_type: res.token_type,
            expires_in: res.expires_in,
        }
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Read-only state shared by every request.
pub struct AppState {
    pub config: GatewayConfig,
    pub token: AccessToken,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(config: GatewayConfig, token: AccessToken, client: reqwest::Client) -> Self {
        Self {
            config,
            token,
            client,
        }
    }
}
