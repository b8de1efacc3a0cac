//! Tree attribute validation.
//!
//! Coordinates are stored as opaque numbers; only finiteness is checked.
//! Measurements (`diameter`, `height`) are optional and non-negative.

use crate::error::CoreError;

/// Maximum length of a species name in characters.
pub const MAX_SPECIES_LENGTH: usize = 200;

/// Maximum length of a street address in characters.
pub const MAX_ADDRESS_LENGTH: usize = 500;

/// Require a coordinate to be present and finite.
pub fn validate_coordinate(field: &'static str, value: Option<f64>) -> Result<f64, CoreError> {
    let value = value.ok_or_else(|| CoreError::missing(field))?;
    if !value.is_finite() {
        return Err(CoreError::validation(field, "must be a finite number"));
    }
    Ok(value)
}

/// Validate an optional measurement: finite and `>= 0` when present.
pub fn validate_measurement(
    field: &'static str,
    value: Option<f64>,
) -> Result<Option<f64>, CoreError> {
    match value {
        None => Ok(None),
        Some(v) if !v.is_finite() => Err(CoreError::validation(field, "must be a finite number")),
        Some(v) if v < 0.0 => Err(CoreError::validation(field, "must not be negative")),
        Some(v) => Ok(Some(v)),
    }
}

/// Validate the species name: required, non-blank, bounded. Returns the
/// trimmed value.
pub fn validate_species(species: Option<&str>) -> Result<String, CoreError> {
    let species = species.map(str::trim).unwrap_or_default();
    if species.is_empty() {
        return Err(CoreError::missing("species"));
    }
    if species.chars().count() > MAX_SPECIES_LENGTH {
        return Err(CoreError::validation(
            "species",
            format!("must be at most {MAX_SPECIES_LENGTH} characters"),
        ));
    }
    Ok(species.to_string())
}

/// Validate an optional address. Blank addresses collapse to `None`.
pub fn validate_address(address: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(address) = address.map(str::trim).filter(|a| !a.is_empty()) else {
        return Ok(None);
    };
    if address.chars().count() > MAX_ADDRESS_LENGTH {
        return Err(CoreError::validation(
            "address",
            format!("must be at most {MAX_ADDRESS_LENGTH} characters"),
        ));
    }
    Ok(Some(address.to_string()))
}
