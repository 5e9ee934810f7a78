#![deny(missing_docs)]
//! Starport core library.
//!
//! This crate contains the domain types, validation and rating logic, and
//! the query engine that power the Starport ship catalog.

pub mod criteria;
pub mod domain;
pub mod error;
pub mod query;
pub mod rating;
pub mod repository;
pub mod service;
pub mod validate;

pub use criteria::{QueryCriteria, SortKey, UNBOUNDED_PAGE, bounded};
pub use domain::{NewShip, Ship, ShipInput, ShipType};
pub use error::{Result, StarportError};
pub use query::{Clause, QuerySpec, RangeClause, ShipFilter};
pub use rating::{REFERENCE_YEAR, production_year, round_half_up, ship_rating};
pub use repository::{MemoryShipRepository, ShipRepository};
pub use service::ShipService;
