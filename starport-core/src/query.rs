//! Query specifications: the predicate tree built from listing criteria.
//!
//! Filters are plain data rather than callbacks, so a repository can
//! interpret them against its own storage and tests can inspect exactly
//! what a set of criteria translates to.

use serde::{Deserialize, Serialize};

use crate::criteria::{QueryCriteria, SortKey, bounded};
use crate::domain::{Ship, ShipType};
use crate::validate;

/// An inclusive one- or two-sided range restriction.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum RangeClause<T> {
    /// Value lies in [low, high].
    Between(T, T),
    /// Value is at least the bound.
    AtLeast(T),
    /// Value is at most the bound.
    AtMost(T),
}

impl<T: PartialOrd + Copy> RangeClause<T> {
    /// Whether a value satisfies the range.
    pub fn contains(&self, value: T) -> bool {
        match *self {
            RangeClause::Between(low, high) => value >= low && value <= high,
            RangeClause::AtLeast(low) => value >= low,
            RangeClause::AtMost(high) => value <= high,
        }
    }

    /// Build a range from independently optional, pre-validated bounds.
    ///
    /// Invalid bounds arrive here already stripped to `None`; whichever
    /// side survives still applies on its own.
    fn from_bounds(min: Option<T>, max: Option<T>) -> Option<Self> {
        match (min, max) {
            (Some(low), Some(high)) => Some(RangeClause::Between(low, high)),
            (Some(low), None) => Some(RangeClause::AtLeast(low)),
            (None, Some(high)) => Some(RangeClause::AtMost(high)),
            (None, None) => None,
        }
    }
}

/// A single comparison applied during listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Clause {
    /// Ship name contains the substring, case-sensitively.
    NameContains(String),
    /// Planet contains the substring, case-sensitively.
    PlanetContains(String),
    /// Ship type equals the value.
    TypeEquals(ShipType),
    /// Used flag equals the value.
    UsedEquals(bool),
    /// Production date lies in the range, epoch milliseconds.
    ProdDate(RangeClause<i64>),
    /// Speed lies in the range.
    Speed(RangeClause<f64>),
    /// Crew size lies in the range.
    CrewSize(RangeClause<i32>),
    /// Rating lies in the range.
    Rating(RangeClause<f64>),
}

impl Clause {
    /// Whether a ship satisfies this clause.
    pub fn matches(&self, ship: &Ship) -> bool {
        match self {
            Clause::NameContains(needle) => ship.name.contains(needle),
            Clause::PlanetContains(needle) => ship.planet.contains(needle),
            Clause::TypeEquals(ship_type) => ship.ship_type == *ship_type,
            Clause::UsedEquals(is_used) => ship.is_used == *is_used,
            Clause::ProdDate(range) => range.contains(ship.prod_date),
            Clause::Speed(range) => range.contains(ship.speed),
            Clause::CrewSize(range) => range.contains(ship.crew_size),
            Clause::Rating(range) => range.contains(ship.rating),
        }
    }
}

/// Conjunction of clauses; a ship must satisfy every one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipFilter {
    /// Active clauses, all of which must hold.
    pub clauses: Vec<Clause>,
}

impl ShipFilter {
    /// Whether a ship satisfies every clause.
    pub fn matches(&self, ship: &Ship) -> bool {
        self.clauses.iter().all(|clause| clause.matches(ship))
    }
}

/// A complete, storage-agnostic listing query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Filter conjunction.
    pub filter: ShipFilter,
    /// Ascending order key, if any.
    pub order: Option<SortKey>,
    /// Rows to skip, if paginated.
    pub offset: Option<i64>,
    /// Maximum rows to return, if paginated.
    pub limit: Option<i64>,
}

impl QuerySpec {
    /// Translate listing criteria into a query.
    ///
    /// Mutation paths reject invalid fields; listing instead drops an
    /// invalid filter bound and keeps whatever remains valid.
    pub fn from_criteria(criteria: &QueryCriteria) -> Self {
        let mut clauses = Vec::new();

        if let Some(name) = criteria.name.as_deref().filter(|v| validate::valid_string(v)) {
            clauses.push(Clause::NameContains(name.to_string()));
        }
        if let Some(planet) = criteria
            .planet
            .as_deref()
            .filter(|v| validate::valid_string(v))
        {
            clauses.push(Clause::PlanetContains(planet.to_string()));
        }
        if let Some(range) = RangeClause::from_bounds(
            criteria
                .after
                .filter(|v| validate::valid_production_date(*v)),
            criteria
                .before
                .filter(|v| validate::valid_production_date(*v)),
        ) {
            clauses.push(Clause::ProdDate(range));
        }
        if let Some(is_used) = criteria.is_used {
            clauses.push(Clause::UsedEquals(is_used));
        }
        if let Some(ship_type) = criteria.ship_type {
            clauses.push(Clause::TypeEquals(ship_type));
        }
        if let Some(range) = RangeClause::from_bounds(
            criteria
                .min_crew_size
                .filter(|v| validate::valid_crew_size(*v)),
            criteria
                .max_crew_size
                .filter(|v| validate::valid_crew_size(*v)),
        ) {
            clauses.push(Clause::CrewSize(range));
        }
        if let Some(range) = RangeClause::from_bounds(
            criteria.min_speed.filter(|v| validate::valid_speed(*v)),
            criteria.max_speed.filter(|v| validate::valid_speed(*v)),
        ) {
            clauses.push(Clause::Speed(range));
        }
        if let Some(range) = RangeClause::from_bounds(
            criteria.min_rating.filter(|v| validate::valid_rating(*v)),
            criteria.max_rating.filter(|v| validate::valid_rating(*v)),
        ) {
            clauses.push(Clause::Rating(range));
        }

        let (offset, limit) = match (criteria.page_size, criteria.page_number) {
            (Some(size), Some(number)) if bounded(size) && bounded(number) => {
                if number == 0 {
                    // The raw page number doubles as the offset on page zero.
                    (Some(i64::from(number)), Some(i64::from(size)))
                } else {
                    (Some(i64::from(number) * i64::from(size)), Some(i64::from(size)))
                }
            }
            _ => (None, None),
        };

        QuerySpec {
            filter: ShipFilter { clauses },
            order: criteria.order,
            offset,
            limit,
        }
    }
}
