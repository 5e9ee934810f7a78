//! Diesel-backed ship repository.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::result::OptionalExtension;

use starport_core::{
    Clause, NewShip, QuerySpec, RangeClause, Result, Ship, ShipRepository, SortKey, StarportError,
};

use crate::db::DbPool;
use crate::models::{NewShipRecord, ShipRecord};
use crate::schema::ships;

type PooledConn =
    diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<PgConnection>>;

/// `ShipRepository` implementation over a PostgreSQL connection pool.
///
/// Every mutation is a single SQL statement, so each catalog operation
/// either fully persists or leaves storage unmodified.
#[derive(Clone)]
pub struct PgShipRepository {
    pool: DbPool,
}

impl PgShipRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledConn> {
        self.pool
            .get()
            .map_err(|err| StarportError::Storage(err.to_string()))
    }
}

impl ShipRepository for PgShipRepository {
    fn find_by_id(&self, id: i64) -> Result<Option<Ship>> {
        let mut conn = self.conn()?;
        let record = ships::table
            .find(id)
            .first::<ShipRecord>(&mut conn)
            .optional()
            .map_err(storage)?;
        record.map(Ship::try_from).transpose()
    }

    fn insert(&self, ship: &NewShip) -> Result<Ship> {
        let mut conn = self.conn()?;
        let record = diesel::insert_into(ships::table)
            .values(NewShipRecord::from(ship))
            .get_result::<ShipRecord>(&mut conn)
            .map_err(storage)?;
        Ship::try_from(record)
    }

    fn save(&self, ship: &Ship) -> Result<Ship> {
        let mut conn = self.conn()?;
        let record = diesel::update(ships::table.find(ship.id))
            .set(ShipRecord::from(ship))
            .get_result::<ShipRecord>(&mut conn)
            .map_err(|err| match err {
                diesel::result::Error::NotFound => StarportError::NotFound,
                other => storage(other),
            })?;
        Ship::try_from(record)
    }

    fn delete_by_id(&self, id: i64) -> Result<()> {
        let mut conn = self.conn()?;
        diesel::delete(ships::table.find(id))
            .execute(&mut conn)
            .map_err(storage)?;
        Ok(())
    }

    fn query(&self, spec: &QuerySpec) -> Result<Vec<Ship>> {
        let mut conn = self.conn()?;
        let mut query = ships::table.into_boxed();
        for clause in &spec.filter.clauses {
            query = apply_clause(query, clause);
        }
        if let Some(key) = spec.order {
            query = match key {
                SortKey::Id => query.order(ships::id.asc()),
                SortKey::Speed => query.order(ships::speed.asc()),
                SortKey::CrewSize => query.order(ships::crew_size.asc()),
                SortKey::Rating => query.order(ships::rating.asc()),
                SortKey::ProdDate => query.order(ships::prod_date.asc()),
            };
        }
        if let Some(offset) = spec.offset {
            query = query.offset(offset);
        }
        if let Some(limit) = spec.limit {
            query = query.limit(limit);
        }

        let records = query.load::<ShipRecord>(&mut conn).map_err(storage)?;
        records.into_iter().map(Ship::try_from).collect()
    }
}

fn storage(err: diesel::result::Error) -> StarportError {
    StarportError::Storage(err.to_string())
}

/// LIKE pattern matching the needle as a literal substring.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn apply_clause<'a>(
    query: ships::BoxedQuery<'a, Pg>,
    clause: &Clause,
) -> ships::BoxedQuery<'a, Pg> {
    match clause {
        Clause::NameContains(needle) => query.filter(ships::name.like(like_pattern(needle))),
        Clause::PlanetContains(needle) => query.filter(ships::planet.like(like_pattern(needle))),
        Clause::TypeEquals(ship_type) => query.filter(ships::ship_type.eq(ship_type.as_str())),
        Clause::UsedEquals(is_used) => query.filter(ships::is_used.eq(*is_used)),
        Clause::ProdDate(range) => match *range {
            RangeClause::Between(low, high) => query.filter(ships::prod_date.between(low, high)),
            RangeClause::AtLeast(low) => query.filter(ships::prod_date.ge(low)),
            RangeClause::AtMost(high) => query.filter(ships::prod_date.le(high)),
        },
        Clause::Speed(range) => match *range {
            RangeClause::Between(low, high) => query.filter(ships::speed.between(low, high)),
            RangeClause::AtLeast(low) => query.filter(ships::speed.ge(low)),
            RangeClause::AtMost(high) => query.filter(ships::speed.le(high)),
        },
        Clause::CrewSize(range) => match *range {
            RangeClause::Between(low, high) => query.filter(ships::crew_size.between(low, high)),
            RangeClause::AtLeast(low) => query.filter(ships::crew_size.ge(low)),
            RangeClause::AtMost(high) => query.filter(ships::crew_size.le(high)),
        },
        Clause::Rating(range) => match *range {
            RangeClause::Between(low, high) => query.filter(ships::rating.between(low, high)),
            RangeClause::AtLeast(low) => query.filter(ships::rating.ge(low)),
            RangeClause::AtMost(high) => query.filter(ships::rating.le(high)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{PgShipRepository, like_pattern};
    use crate::db::{TestDatabase, test_database_configured};
    use starport_core::{
        Clause, NewShip, QuerySpec, RangeClause, ShipFilter, ShipRepository, ShipType, SortKey,
    };

    fn draft(name: &str, speed: f64) -> NewShip {
        NewShip {
            name: name.to_string(),
            planet: "Earth".to_string(),
            ship_type: ShipType::Transport,
            prod_date: 28_000_000_000_000,
            is_used: false,
            speed,
            crew_size: 50,
            rating: speed * 10.0,
        }
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Zeus"), "%Zeus%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn crud_round_trips_through_postgres() {
        if !test_database_configured() {
            eprintln!("skipping: set TEST_DATABASE_URL or DATABASE_URL for PostgreSQL tests");
            return;
        }
        let mut test_db = TestDatabase::new();
        let repo = PgShipRepository::new(test_db.pool());

        let created = repo.insert(&draft("Zeus", 0.5)).expect("insert");
        assert!(created.id > 0);

        let found = repo.find_by_id(created.id).expect("find").expect("present");
        assert_eq!(found, created);

        let mut changed = created.clone();
        changed.crew_size = 99;
        let saved = repo.save(&changed).expect("save");
        assert_eq!(saved.crew_size, 99);

        repo.delete_by_id(created.id).expect("delete");
        assert_eq!(repo.find_by_id(created.id).expect("find"), None);
    }

    #[test]
    fn query_applies_filters_order_and_pagination() {
        if !test_database_configured() {
            eprintln!("skipping: set TEST_DATABASE_URL or DATABASE_URL for PostgreSQL tests");
            return;
        }
        let mut test_db = TestDatabase::new();
        let repo = PgShipRepository::new(test_db.pool());
        for (name, speed) in [("Alpha", 0.5), ("Beta", 0.2), ("Gamma", 0.8), ("Delta", 0.4)] {
            repo.insert(&draft(name, speed)).expect("insert");
        }

        let spec = QuerySpec {
            filter: ShipFilter {
                clauses: vec![Clause::Speed(RangeClause::AtLeast(0.3))],
            },
            order: Some(SortKey::Speed),
            offset: Some(1),
            limit: Some(2),
        };
        let ships = repo.query(&spec).expect("query");
        let names: Vec<&str> = ships.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Gamma"]);
    }

    #[test]
    fn substring_filter_is_literal() {
        if !test_database_configured() {
            eprintln!("skipping: set TEST_DATABASE_URL or DATABASE_URL for PostgreSQL tests");
            return;
        }
        let mut test_db = TestDatabase::new();
        let repo = PgShipRepository::new(test_db.pool());
        repo.insert(&draft("Discount 50%", 0.5)).expect("insert");
        repo.insert(&draft("Discount 55", 0.5)).expect("insert");

        let spec = QuerySpec {
            filter: ShipFilter {
                clauses: vec![Clause::NameContains("50%".to_string())],
            },
            ..QuerySpec::default()
        };
        let ships = repo.query(&spec).expect("query");
        assert_eq!(ships.len(), 1);
        assert_eq!(ships[0].name, "Discount 50%");
    }
}
