//! OpenAPI specification for the Starport server.

use utoipa::OpenApi;

use starport_core::{Ship, ShipInput, ShipType, SortKey};

use crate::routes::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::list_ships,
        crate::routes::count_ships,
        crate::routes::get_ship,
        crate::routes::create_ship,
        crate::routes::update_ship,
        crate::routes::delete_ship,
        crate::routes::openapi_json
    ),
    components(
        schemas(
            Ship,
            ShipInput,
            ShipType,
            SortKey,
            ErrorResponse
        )
    ),
    tags(
        (name = "ships", description = "Ship catalog"),
        (name = "system", description = "System endpoints")
    )
)]
/// OpenAPI specification for the Starport server.
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn openapi_includes_expected_paths() {
        let doc = ApiDoc::openapi();
        let paths = doc.paths.paths;

        assert!(paths.contains_key("/ships"));
        assert!(paths.contains_key("/ships/count"));
        assert!(paths.contains_key("/ships/{id}"));
        assert!(paths.contains_key("/openapi.json"));
    }
}
