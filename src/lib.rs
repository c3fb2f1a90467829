pub mod config;
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod server;
pub mod services;

pub use config::GatewayConfig;
pub use errors::GatewayError;
pub use models::{AccessToken, AppState, Charge, ValidationResponse, ValidationResult, Vehicle};
