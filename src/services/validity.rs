use chrono::{DateTime, FixedOffset};

use crate::models::{Charge, ValidationResponse, ValidationResult};

/// True iff at least one charge is flagged as currently valid.
pub fn is_currently_valid(charges: &[Charge]) -> bool {
    charges.iter().any(|charge| charge.is_currently_valid)
}

/// Latest `valid_until` among currently valid charges, never earlier than `now`.
///
/// Only a strictly later instant replaces the running maximum; the winner
/// keeps the offset it arrived with.
pub fn latest_valid_until(
    now: DateTime<FixedOffset>,
    charges: &[Charge],
) -> DateTime<FixedOffset> {
    charges
        .iter()
        .filter(|charge| charge.is_currently_valid)
        .fold(now, |latest, charge| {
            if charge.valid_until > latest {
                charge.valid_until
            } else {
                latest
            }
        })
}

/// Reshapes an upstream result into the public response.
pub fn build_response(result: &ValidationResult, now: DateTime<FixedOffset>) -> ValidationResponse {
    ValidationResponse {
        id: result.vehicle.license_plate.clone(),
        valid: is_currently_valid(&result.charges),
        valid_until: latest_valid_until(now, &result.charges),
    }
}
