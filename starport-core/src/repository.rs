//! Storage abstraction for ship records.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::criteria::SortKey;
use crate::domain::{NewShip, Ship};
use crate::error::{Result, StarportError};
use crate::query::QuerySpec;

/// Abstraction over ship storage for testability and backend choice.
#[cfg_attr(test, mockall::automock)]
pub trait ShipRepository {
    /// Look up a ship by identifier.
    fn find_by_id(&self, id: i64) -> Result<Option<Ship>>;
    /// Persist a new ship and return it with its assigned identifier.
    fn insert(&self, ship: &NewShip) -> Result<Ship>;
    /// Persist changes to an existing ship.
    fn save(&self, ship: &Ship) -> Result<Ship>;
    /// Remove a ship by identifier.
    fn delete_by_id(&self, id: i64) -> Result<()>;
    /// Execute a listing query and return the matching ships.
    fn query(&self, spec: &QuerySpec) -> Result<Vec<Ship>>;
}

/// In-process repository backed by a shared ordered map.
///
/// The reference implementation of query semantics: filter, ascending
/// sort, then offset/limit. Identifiers are assigned monotonically.
#[derive(Debug, Default, Clone)]
pub struct MemoryShipRepository {
    inner: Arc<RwLock<MemoryStore>>,
}

#[derive(Debug, Default)]
struct MemoryStore {
    ships: BTreeMap<i64, Ship>,
    next_id: i64,
}

impl MemoryShipRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, MemoryStore>> {
        self.inner
            .read()
            .map_err(|_| StarportError::Storage("ship store unavailable".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, MemoryStore>> {
        self.inner
            .write()
            .map_err(|_| StarportError::Storage("ship store unavailable".to_string()))
    }
}

impl ShipRepository for MemoryShipRepository {
    fn find_by_id(&self, id: i64) -> Result<Option<Ship>> {
        Ok(self.read()?.ships.get(&id).cloned())
    }

    fn insert(&self, ship: &NewShip) -> Result<Ship> {
        let mut store = self.write()?;
        store.next_id += 1;
        let stored = ship.clone().with_id(store.next_id);
        store.ships.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn save(&self, ship: &Ship) -> Result<Ship> {
        let mut store = self.write()?;
        store.ships.insert(ship.id, ship.clone());
        Ok(ship.clone())
    }

    fn delete_by_id(&self, id: i64) -> Result<()> {
        self.write()?.ships.remove(&id);
        Ok(())
    }

    fn query(&self, spec: &QuerySpec) -> Result<Vec<Ship>> {
        let store = self.read()?;
        let mut ships: Vec<Ship> = store
            .ships
            .values()
            .filter(|ship| spec.filter.matches(ship))
            .cloned()
            .collect();
        drop(store);

        if let Some(key) = spec.order {
            sort_ships(&mut ships, key);
        }

        let skipped = ships
            .into_iter()
            .skip(spec.offset.unwrap_or(0).max(0) as usize);
        Ok(match spec.limit {
            Some(limit) => skipped.take(limit.max(0) as usize).collect(),
            None => skipped.collect(),
        })
    }
}

fn sort_ships(ships: &mut [Ship], key: SortKey) {
    match key {
        SortKey::Id => ships.sort_by_key(|ship| ship.id),
        SortKey::Speed => ships.sort_by(|a, b| a.speed.total_cmp(&b.speed)),
        SortKey::CrewSize => ships.sort_by_key(|ship| ship.crew_size),
        SortKey::Rating => ships.sort_by(|a, b| a.rating.total_cmp(&b.rating)),
        SortKey::ProdDate => ships.sort_by_key(|ship| ship.prod_date),
    }
}
