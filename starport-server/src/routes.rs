//! HTTP handlers for the Starport server.

use actix_web::{HttpResponse, Responder, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use starport_core::{QueryCriteria, Ship, ShipInput, ShipService, StarportError};

use crate::openapi::ApiDoc;
use crate::repo::PgShipRepository;

/// Shared application state for handlers.
#[derive(Clone)]
pub struct AppState {
    /// Ship catalog service over the PostgreSQL repository.
    pub service: ShipService<PgShipRepository>,
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}

fn error_response(err: StarportError) -> HttpResponse {
    match err {
        StarportError::BadRequest(message) => {
            HttpResponse::BadRequest().json(ErrorResponse { message })
        }
        StarportError::NotFound => HttpResponse::NotFound().json(ErrorResponse {
            message: "ship not found".to_string(),
        }),
        StarportError::Storage(message) => {
            HttpResponse::InternalServerError().json(ErrorResponse { message })
        }
    }
}

fn respond<T: Serialize>(
    result: Result<starport_core::Result<T>, actix_web::error::BlockingError>,
) -> HttpResponse {
    match result {
        Ok(Ok(value)) => HttpResponse::Ok().json(value),
        Ok(Err(err)) => error_response(err),
        Err(err) => HttpResponse::InternalServerError().json(ErrorResponse {
            message: format!("catalog task failed: {err}"),
        }),
    }
}

#[utoipa::path(
    get,
    path = "/ships",
    params(QueryCriteria),
    responses(
        (status = 200, description = "Matching ships", body = [Ship])
    ),
    tag = "ships"
)]
#[get("/rest/ships")]
/// List ships matching the filter, order, and pagination criteria.
pub async fn list_ships(
    state: web::Data<AppState>,
    query: web::Query<QueryCriteria>,
) -> impl Responder {
    let service = state.service.clone();
    let criteria = query.into_inner();
    respond(web::block(move || service.list_ships(&criteria)).await)
}

#[utoipa::path(
    get,
    path = "/ships/count",
    params(QueryCriteria),
    responses(
        (status = 200, description = "Number of matching ships", body = i64)
    ),
    tag = "ships"
)]
#[get("/rest/ships/count")]
/// Count ships matching the filter criteria; pagination is ignored.
pub async fn count_ships(
    state: web::Data<AppState>,
    query: web::Query<QueryCriteria>,
) -> impl Responder {
    let service = state.service.clone();
    let criteria = query.into_inner();
    respond(web::block(move || service.count_ships(&criteria)).await)
}

#[utoipa::path(
    get,
    path = "/ships/{id}",
    params(
        ("id" = i64, Path, description = "Ship identifier")
    ),
    responses(
        (status = 200, description = "The ship", body = Ship),
        (status = 400, description = "Invalid identifier", body = ErrorResponse),
        (status = 404, description = "No such ship", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships/{id}")]
/// Fetch a single ship by identifier.
pub async fn get_ship(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let service = state.service.clone();
    let id = path.into_inner();
    respond(web::block(move || service.get_ship(id)).await)
}

#[utoipa::path(
    post,
    path = "/ships",
    request_body = ShipInput,
    responses(
        (status = 200, description = "Created ship", body = Ship),
        (status = 400, description = "Invalid or incomplete input", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[post("/rest/ships")]
/// Create a ship; the rating is derived, never taken from the payload.
pub async fn create_ship(
    state: web::Data<AppState>,
    payload: web::Json<ShipInput>,
) -> impl Responder {
    let service = state.service.clone();
    let input = payload.into_inner();
    respond(web::block(move || service.create_ship(&input)).await)
}

#[utoipa::path(
    post,
    path = "/ships/{id}",
    params(
        ("id" = i64, Path, description = "Ship identifier")
    ),
    request_body = ShipInput,
    responses(
        (status = 200, description = "Updated ship", body = Ship),
        (status = 400, description = "Invalid field value", body = ErrorResponse),
        (status = 404, description = "No such ship", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[post("/rest/ships/{id}")]
/// Apply a partial update; absent fields keep their stored values.
pub async fn update_ship(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<ShipInput>,
) -> impl Responder {
    let service = state.service.clone();
    let id = path.into_inner();
    let input = payload.into_inner();
    respond(web::block(move || service.update_ship(id, &input)).await)
}

#[utoipa::path(
    delete,
    path = "/ships/{id}",
    params(
        ("id" = i64, Path, description = "Ship identifier")
    ),
    responses(
        (status = 200, description = "Ship deleted"),
        (status = 400, description = "Invalid identifier", body = ErrorResponse),
        (status = 404, description = "No such ship", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[delete("/rest/ships/{id}")]
/// Delete a ship by identifier.
pub async fn delete_ship(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let service = state.service.clone();
    let id = path.into_inner();
    let result = web::block(move || service.delete_ship(id)).await;
    match result {
        Ok(Ok(())) => HttpResponse::Ok().finish(),
        Ok(Err(err)) => error_response(err),
        Err(err) => HttpResponse::InternalServerError().json(ErrorResponse {
            message: format!("catalog task failed: {err}"),
        }),
    }
}

#[utoipa::path(
    get,
    path = "/openapi.json",
    responses(
        (status = 200, description = "OpenAPI document", body = serde_json::Value)
    ),
    tag = "system"
)]
#[get("/rest/openapi.json")]
/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl Responder {
    use utoipa::OpenApi;
    HttpResponse::Ok().json(ApiDoc::openapi())
}
