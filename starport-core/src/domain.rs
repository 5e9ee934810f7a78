//! Domain entities for the Starport catalog.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::StarportError;

/// Classification of a catalogued ship.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShipType {
    /// Bulk cargo and passenger haulers.
    Transport,
    /// Combat and escort vessels.
    Military,
    /// Independent trading vessels.
    Merchant,
}

impl ShipType {
    /// Wire and storage representation of the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipType::Transport => "TRANSPORT",
            ShipType::Military => "MILITARY",
            ShipType::Merchant => "MERCHANT",
        }
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipType {
    type Err = StarportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "TRANSPORT" => Ok(ShipType::Transport),
            "MILITARY" => Ok(ShipType::Military),
            "MERCHANT" => Ok(ShipType::Merchant),
            other => Err(StarportError::BadRequest(format!(
                "unknown ship type: {other}"
            ))),
        }
    }
}

/// A catalogued ship as stored by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    /// Storage-assigned identifier, positive and immutable.
    pub id: i64,
    /// Ship name, 1-50 characters.
    pub name: String,
    /// Home planet, 1-50 characters.
    pub planet: String,
    /// Ship classification.
    pub ship_type: ShipType,
    /// Production date as epoch milliseconds; its UTC year lies in [2800, 3019).
    pub prod_date: i64,
    /// Whether the ship has a previous owner.
    pub is_used: bool,
    /// Cruising speed, stored rounded half-up to two decimals.
    pub speed: f64,
    /// Crew headcount, strictly between 1 and 9999.
    pub crew_size: i32,
    /// Derived score; recomputed on every write, never client-supplied.
    pub rating: f64,
}

/// Raw mutation payload with every field optional.
///
/// Creation requires all fields except `is_used`; updates apply whichever
/// fields are present. A `rating` sent by a client has no field to land in
/// and is dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ShipInput {
    /// Ship name.
    pub name: Option<String>,
    /// Home planet.
    pub planet: Option<String>,
    /// Ship classification.
    pub ship_type: Option<ShipType>,
    /// Production date as epoch milliseconds.
    pub prod_date: Option<i64>,
    /// Whether the ship has a previous owner.
    pub is_used: Option<bool>,
    /// Cruising speed.
    pub speed: Option<f64>,
    /// Crew headcount.
    pub crew_size: Option<i32>,
}

/// A fully validated ship awaiting its storage-assigned identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShip {
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship classification.
    pub ship_type: ShipType,
    /// Production date as epoch milliseconds.
    pub prod_date: i64,
    /// Whether the ship has a previous owner.
    pub is_used: bool,
    /// Cruising speed, already rounded.
    pub speed: f64,
    /// Crew headcount.
    pub crew_size: i32,
    /// Derived score for the draft values.
    pub rating: f64,
}

impl NewShip {
    /// Attach a storage-assigned identifier, producing the stored entity.
    pub fn with_id(self, id: i64) -> Ship {
        Ship {
            id,
            name: self.name,
            planet: self.planet,
            ship_type: self.ship_type,
            prod_date: self.prod_date,
            is_used: self.is_used,
            speed: self.speed,
            crew_size: self.crew_size,
            rating: self.rating,
        }
    }
}
