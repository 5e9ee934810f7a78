//! Listing request criteria: optional filters, ordering, and pagination.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ShipType;
use crate::error::StarportError;

/// Sentinel page value requesting every matching row.
///
/// The count operation lists with both page fields set to this marker.
pub const UNBOUNDED_PAGE: i32 = i32::MAX;

/// Whether a page field carries a real value rather than the sentinel.
pub fn bounded(value: i32) -> bool {
    value != UNBOUNDED_PAGE
}

/// Field a listing can be ordered by, ascending.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SortKey {
    /// Order by storage identifier.
    #[serde(rename = "ID")]
    Id,
    /// Order by cruising speed.
    #[serde(rename = "SPEED")]
    Speed,
    /// Order by crew headcount.
    #[serde(rename = "CREW_SIZE")]
    CrewSize,
    /// Order by derived rating.
    #[serde(rename = "RATING")]
    Rating,
    /// Order by production date.
    #[serde(rename = "PROD_DATE")]
    ProdDate,
}

impl FromStr for SortKey {
    type Err = StarportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ID" => Ok(SortKey::Id),
            "SPEED" => Ok(SortKey::Speed),
            "CREW_SIZE" => Ok(SortKey::CrewSize),
            "RATING" => Ok(SortKey::Rating),
            "PROD_DATE" => Ok(SortKey::ProdDate),
            other => Err(StarportError::BadRequest(format!(
                "unknown order key: {other}"
            ))),
        }
    }
}

/// Normalized filter/sort/page specification for one listing request.
///
/// Every field is independently optional; deserialization accepts the
/// camelCase query-parameter names of the REST surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", default)]
#[into_params(parameter_in = Query)]
pub struct QueryCriteria {
    /// Substring the ship name must contain.
    pub name: Option<String>,
    /// Substring the planet must contain.
    pub planet: Option<String>,
    /// Exact ship classification.
    pub ship_type: Option<ShipType>,
    /// Earliest production date, epoch milliseconds, inclusive.
    pub after: Option<i64>,
    /// Latest production date, epoch milliseconds, inclusive.
    pub before: Option<i64>,
    /// Exact used flag.
    pub is_used: Option<bool>,
    /// Minimum speed, inclusive.
    pub min_speed: Option<f64>,
    /// Maximum speed, inclusive.
    pub max_speed: Option<f64>,
    /// Minimum crew size, inclusive.
    pub min_crew_size: Option<i32>,
    /// Maximum crew size, inclusive.
    pub max_crew_size: Option<i32>,
    /// Minimum rating, inclusive.
    pub min_rating: Option<f64>,
    /// Maximum rating, inclusive.
    pub max_rating: Option<f64>,
    /// Ascending order key; an empty string reads as no ordering.
    #[serde(deserialize_with = "order_from_str")]
    #[param(value_type = Option<SortKey>)]
    pub order: Option<SortKey>,
    /// Zero-based page number.
    pub page_number: Option<i32>,
    /// Rows per page.
    pub page_size: Option<i32>,
}

impl QueryCriteria {
    /// Force unbounded pagination and drop ordering, as the count path does.
    pub fn unpaginated(mut self) -> Self {
        self.order = None;
        self.page_number = Some(UNBOUNDED_PAGE);
        self.page_size = Some(UNBOUNDED_PAGE);
        self
    }
}

/// Accept an absent or empty order parameter as "no ordering"; reject
/// anything that is not a known sort key.
fn order_from_str<'de, D>(deserializer: D) -> Result<Option<SortKey>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::{QueryCriteria, SortKey, UNBOUNDED_PAGE, bounded};

    #[test]
    fn sort_keys_parse_from_wire_names() {
        assert_eq!("ID".parse::<SortKey>().unwrap(), SortKey::Id);
        assert_eq!("CREW_SIZE".parse::<SortKey>().unwrap(), SortKey::CrewSize);
        assert_eq!("PROD_DATE".parse::<SortKey>().unwrap(), SortKey::ProdDate);
        assert!("TONNAGE".parse::<SortKey>().is_err());
    }

    #[test]
    fn criteria_deserialize_from_camel_case() {
        let criteria: QueryCriteria = serde_json::from_str(
            r#"{"name":"Zeus","shipType":"MERCHANT","minSpeed":0.2,"order":"SPEED","pageNumber":1,"pageSize":5}"#,
        )
        .expect("deserialize");

        assert_eq!(criteria.name.as_deref(), Some("Zeus"));
        assert_eq!(criteria.min_speed, Some(0.2));
        assert_eq!(criteria.order, Some(SortKey::Speed));
        assert_eq!(criteria.page_number, Some(1));
        assert_eq!(criteria.max_crew_size, None);
    }

    #[test]
    fn empty_order_reads_as_absent() {
        let criteria: QueryCriteria = serde_json::from_str(r#"{"order":""}"#).expect("deserialize");
        assert_eq!(criteria.order, None);
    }

    #[test]
    fn unknown_order_is_rejected() {
        let result = serde_json::from_str::<QueryCriteria>(r#"{"order":"SIDEWAYS"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn unpaginated_clears_order_and_marks_pages_unbounded() {
        let criteria = QueryCriteria {
            order: Some(SortKey::Id),
            page_number: Some(2),
            page_size: Some(10),
            ..QueryCriteria::default()
        };
        let unbounded = criteria.unpaginated();

        assert_eq!(unbounded.order, None);
        assert_eq!(unbounded.page_number, Some(UNBOUNDED_PAGE));
        assert_eq!(unbounded.page_size, Some(UNBOUNDED_PAGE));
    }

    #[test]
    fn sentinel_pages_are_not_bounded() {
        assert!(bounded(0));
        assert!(bounded(3));
        assert!(!bounded(UNBOUNDED_PAGE));
    }
}
