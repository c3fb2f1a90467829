use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::errors::GatewayError;
use crate::services::FailurePolicy;

pub const VALIDATION_URL: &str = "https://eshop.edalnice.cz/api/v3/charge_registrations";
pub const TOKEN_URL: &str = "https://auth.edalnice.cz/auth/connect/token";
pub const CLIENT_ID: &str = "eshop.client";
pub const REGION_ID: &str = "3906ba89-153c-4038-8e36-0ca1deb76076"; // Czech Republic
pub const LISTEN_HOST: &str = "0.0.0.0";
pub const LISTEN_PORT: u16 = 8080;
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub validation_url: String,
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub region_id: String,
    pub request_timeout: Duration,
    pub failure_policy: FailurePolicy,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("validation_url", &self.validation_url)
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("region_id", &self.region_id)
            .field("request_timeout", &self.request_timeout)
            .field("failure_policy", &self.failure_policy)
            .finish()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: LISTEN_HOST.to_string(),
            port: LISTEN_PORT,
            validation_url: VALIDATION_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            client_id: CLIENT_ID.to_string(),
            client_secret: String::new(),
            region_id: REGION_ID.to_string(),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl GatewayConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from the defaults, overriding each field the lookup
    /// returns a value for.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("GATEWAY_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("GATEWAY_PORT") {
            config.port = port
                .parse()
                .map_err(|_| GatewayError::Config(format!("invalid GATEWAY_PORT: {}", port)))?;
        }
        if let Some(url) = lookup("VALIDATION_URL") {
            config.validation_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = lookup("TOKEN_URL") {
            config.token_url = url;
        }
        if let Some(id) = lookup("OAUTH_CLIENT_ID") {
            config.client_id = id;
        }
        if let Some(secret) = lookup("OAUTH_CLIENT_SECRET") {
            config.client_secret = secret;
        }
        if let Some(region) = lookup("REGION_ID") {
            config.region_id = region;
        }
        if let Some(secs) = lookup("UPSTREAM_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                GatewayError::Config(format!("invalid UPSTREAM_TIMEOUT_SECS: {}", secs))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(policy) = lookup("UPSTREAM_FAILURE_POLICY") {
            config.failure_policy = policy.parse()?;
        }

        Ok(config)
    }

    /// Checks the settings that cannot be defaulted.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.client_secret.is_empty() {
            return Err(GatewayError::Config(
                "OAUTH_CLIENT_SECRET must be set".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(GatewayError::Config(
                "UPSTREAM_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, GatewayError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| GatewayError::Config(format!("invalid GATEWAY_HOST: {}", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
