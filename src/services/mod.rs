mod policy;
mod token;
mod upstream;
mod validity;


pub use policy::FailurePolicy;
pub use token::acquire_token;
pub use upstream::{fetch_validation, parse_validation, validation_url};
pub use validity::{build_response, is_currently_valid, latest_valid_until};
