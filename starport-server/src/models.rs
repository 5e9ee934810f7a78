//! Database models for the Starport server.

use diesel::prelude::*;

use starport_core::{NewShip, Ship, StarportError};

use crate::schema::ships;

/// Ship database record.
#[derive(Debug, Clone, Queryable, Identifiable, AsChangeset, Selectable)]
#[diesel(table_name = ships)]
pub struct ShipRecord {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship classification as text.
    pub ship_type: String,
    /// Production date, epoch milliseconds.
    pub prod_date: i64,
    /// Whether the ship has a previous owner.
    pub is_used: bool,
    /// Cruising speed.
    pub speed: f64,
    /// Crew headcount.
    pub crew_size: i32,
    /// Derived rating.
    pub rating: f64,
}

/// Insertable ship record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ships)]
pub struct NewShipRecord {
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship classification as text.
    pub ship_type: String,
    /// Production date, epoch milliseconds.
    pub prod_date: i64,
    /// Whether the ship has a previous owner.
    pub is_used: bool,
    /// Cruising speed.
    pub speed: f64,
    /// Crew headcount.
    pub crew_size: i32,
    /// Derived rating.
    pub rating: f64,
}

impl TryFrom<ShipRecord> for Ship {
    type Error = StarportError;

    fn try_from(record: ShipRecord) -> Result<Self, Self::Error> {
        let ship_type = record.ship_type.parse().map_err(|_| {
            StarportError::Storage(format!(
                "stored ship {} has unknown type {}",
                record.id, record.ship_type
            ))
        })?;
        Ok(Ship {
            id: record.id,
            name: record.name,
            planet: record.planet,
            ship_type,
            prod_date: record.prod_date,
            is_used: record.is_used,
            speed: record.speed,
            crew_size: record.crew_size,
            rating: record.rating,
        })
    }
}

impl From<&Ship> for ShipRecord {
    fn from(ship: &Ship) -> Self {
        ShipRecord {
            id: ship.id,
            name: ship.name.clone(),
            planet: ship.planet.clone(),
            ship_type: ship.ship_type.as_str().to_string(),
            prod_date: ship.prod_date,
            is_used: ship.is_used,
            speed: ship.speed,
            crew_size: ship.crew_size,
            rating: ship.rating,
        }
    }
}

impl From<&NewShip> for NewShipRecord {
    fn from(ship: &NewShip) -> Self {
        NewShipRecord {
            name: ship.name.clone(),
            planet: ship.planet.clone(),
            ship_type: ship.ship_type.as_str().to_string(),
            prod_date: ship.prod_date,
            is_used: ship.is_used,
            speed: ship.speed,
            crew_size: ship.crew_size,
            rating: ship.rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ShipRecord;
    use starport_core::{Ship, ShipType, StarportError};

    fn record() -> ShipRecord {
        ShipRecord {
            id: 3,
            name: "Zeus".to_string(),
            planet: "Earth".to_string(),
            ship_type: "MILITARY".to_string(),
            prod_date: 29_362_608_000_000,
            is_used: false,
            speed: 0.5,
            crew_size: 70,
            rating: 0.33,
        }
    }

    #[test]
    fn record_converts_to_domain_ship() {
        let ship = Ship::try_from(record()).expect("convert");
        assert_eq!(ship.ship_type, ShipType::Military);
        assert_eq!(ship.id, 3);
    }

    #[test]
    fn unknown_stored_type_is_a_storage_error() {
        let mut record = record();
        record.ship_type = "BARGE".to_string();
        assert!(matches!(
            Ship::try_from(record),
            Err(StarportError::Storage(_))
        ));
    }
}
