//! Catalog operations orchestrating validation, rating, and storage.

use crate::criteria::QueryCriteria;
use crate::domain::{NewShip, Ship, ShipInput};
use crate::error::{Result, StarportError};
use crate::query::QuerySpec;
use crate::rating;
use crate::repository::ShipRepository;
use crate::validate;

/// Ship catalog service over a storage backend.
///
/// Mutations validate strictly and recompute the derived rating before any
/// write; listings degrade gracefully by dropping invalid filter bounds.
#[derive(Debug, Clone)]
pub struct ShipService<R> {
    repository: R,
}

impl<R: ShipRepository> ShipService<R> {
    /// Create a service over the given repository.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// List ships matching the criteria, ordered and paginated.
    ///
    /// Never fails on filter validity: invalid bounds are dropped while
    /// building the query. An empty page is a success.
    pub fn list_ships(&self, criteria: &QueryCriteria) -> Result<Vec<Ship>> {
        self.repository.query(&QuerySpec::from_criteria(criteria))
    }

    /// Count ships matching the criteria.
    ///
    /// Implemented as an unbounded listing whose length is reported, not a
    /// storage-level count.
    pub fn count_ships(&self, criteria: &QueryCriteria) -> Result<i64> {
        let unbounded = criteria.clone().unpaginated();
        let ships = self.list_ships(&unbounded)?;
        Ok(ships.len() as i64)
    }

    /// Fetch a single ship by identifier.
    pub fn get_ship(&self, id: i64) -> Result<Ship> {
        validate::ensure_valid_id(id)?;
        self.repository
            .find_by_id(id)?
            .ok_or(StarportError::NotFound)
    }

    /// Create a ship from raw input.
    ///
    /// All fields except `is_used` must be present and valid; `is_used`
    /// defaults to false. Speed is stored rounded half-up to two decimals
    /// and the rating is derived from the stored values.
    pub fn create_ship(&self, input: &ShipInput) -> Result<Ship> {
        let name = input
            .name
            .clone()
            .filter(|v| validate::valid_string(v))
            .ok_or_else(|| invalid_field("name"))?;
        let planet = input
            .planet
            .clone()
            .filter(|v| validate::valid_string(v))
            .ok_or_else(|| invalid_field("planet"))?;
        let ship_type = input.ship_type.ok_or_else(|| invalid_field("shipType"))?;
        let prod_date = input
            .prod_date
            .filter(|v| validate::valid_production_date(*v))
            .ok_or_else(|| invalid_field("prodDate"))?;
        let speed = input
            .speed
            .filter(|v| validate::valid_speed(*v))
            .ok_or_else(|| invalid_field("speed"))?;
        let crew_size = input
            .crew_size
            .filter(|v| validate::valid_crew_size(*v))
            .ok_or_else(|| invalid_field("crewSize"))?;
        let is_used = input.is_used.unwrap_or(false);

        let speed = rating::round_half_up(speed);
        let prod_year = rating::production_year(prod_date).ok_or_else(|| invalid_field("prodDate"))?;
        let rating = rating::ship_rating(is_used, speed, prod_year);

        self.repository.insert(&NewShip {
            name,
            planet,
            ship_type,
            prod_date,
            is_used,
            speed,
            crew_size,
            rating,
        })
    }

    /// Apply a partial update to a stored ship.
    ///
    /// Each present field is validated individually; absent fields keep
    /// their stored values. The rating is recomputed unconditionally from
    /// the resulting record before saving.
    pub fn update_ship(&self, id: i64, input: &ShipInput) -> Result<Ship> {
        validate::ensure_valid_id(id)?;
        let mut ship = self
            .repository
            .find_by_id(id)?
            .ok_or(StarportError::NotFound)?;

        if let Some(name) = &input.name {
            if !validate::valid_string(name) {
                return Err(invalid_field("name"));
            }
            ship.name = name.clone();
        }
        if let Some(planet) = &input.planet {
            if !validate::valid_string(planet) {
                return Err(invalid_field("planet"));
            }
            ship.planet = planet.clone();
        }
        if let Some(speed) = input.speed {
            if !validate::valid_speed(speed) {
                return Err(invalid_field("speed"));
            }
            ship.speed = rating::round_half_up(speed);
        }
        if let Some(crew_size) = input.crew_size {
            if !validate::valid_crew_size(crew_size) {
                return Err(invalid_field("crewSize"));
            }
            ship.crew_size = crew_size;
        }
        if let Some(is_used) = input.is_used {
            ship.is_used = is_used;
        }
        if let Some(ship_type) = input.ship_type {
            ship.ship_type = ship_type;
        }
        if let Some(prod_date) = input.prod_date {
            if !validate::valid_production_date(prod_date) {
                return Err(invalid_field("prodDate"));
            }
            ship.prod_date = prod_date;
        }

        let prod_year =
            rating::production_year(ship.prod_date).ok_or_else(|| invalid_field("prodDate"))?;
        ship.rating = rating::ship_rating(ship.is_used, ship.speed, prod_year);

        self.repository.save(&ship)
    }

    /// Delete a stored ship.
    pub fn delete_ship(&self, id: i64) -> Result<()> {
        validate::ensure_valid_id(id)?;
        self.repository
            .find_by_id(id)?
            .ok_or(StarportError::NotFound)?;
        self.repository.delete_by_id(id)
    }
}

fn invalid_field(field: &str) -> StarportError {
    StarportError::BadRequest(format!("invalid or missing {field}"))
}
