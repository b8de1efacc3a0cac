//! Tree entity model and DTOs.

use dendro_core::error::CoreError;
use dendro_core::status::{validate_notes, validate_status};
use dendro_core::trees::{
    validate_address, validate_coordinate, validate_measurement, validate_species,
};
use dendro_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `trees` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Tree {
    pub id: DbId,
    pub latitude: f64,
    pub longitude: f64,
    pub species: String,
    pub address: Option<String>,
    pub diameter: Option<f64>,
    pub height: Option<f64>,
    pub created_at: Timestamp,
}

/// DTO for creating a tree together with its initial status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTree {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub species: Option<String>,
    pub address: Option<String>,
    pub diameter: Option<f64>,
    pub height: Option<f64>,
    /// Initial status label, required.
    pub status: Option<String>,
    /// Notes for the initial status record.
    pub notes: Option<String>,
}

/// A validated tree insert, including the initial status.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTree {
    pub latitude: f64,
    pub longitude: f64,
    pub species: String,
    pub address: Option<String>,
    pub diameter: Option<f64>,
    pub height: Option<f64>,
    pub status: String,
    pub notes: Option<String>,
}

impl CreateTree {
    /// Check required fields and value ranges.
    ///
    /// Required fields are checked in the order latitude, longitude, species,
    /// status; the first missing one is reported.
    pub fn validate(&self) -> Result<NewTree, CoreError> {
        let latitude = validate_coordinate("latitude", self.latitude)?;
        let longitude = validate_coordinate("longitude", self.longitude)?;
        let species = validate_species(self.species.as_deref())?;
        let status = validate_status(self.status.as_deref())?;

        Ok(NewTree {
            latitude,
            longitude,
            species,
            address: validate_address(self.address.as_deref())?,
            diameter: validate_measurement("diameter", self.diameter)?,
            height: validate_measurement("height", self.height)?,
            status,
            notes: validate_notes(self.notes.as_deref())?,
        })
    }
}
